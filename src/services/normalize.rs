//! Text normalization for fuzzy name comparison

/// Reduce a string to its comparison form: ASCII alphanumerics only,
/// upper-cased. Used solely for equality checks, never for display.
pub fn normalize(s: &str) -> String {
    s.chars()
        .filter(|c| c.is_ascii_alphanumeric())
        .map(|c| c.to_ascii_uppercase())
        .collect()
}
