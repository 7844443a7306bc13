//! Retry controller
//!
//! Fixed escalation policy over one edge, expressed as an explicit state
//! machine rather than recursive re-calls. At most three resolver
//! invocations, no backoff delay:
//!
//! - `not found` on the primary attempt: retry once without the artist
//!   constraint, accept whatever that returns.
//! - `request error` on the primary attempt: retry once with the constraint;
//!   if that retry is `not found`, retry once more without it.
//! - success: accept immediately.

use crate::models::{Edge, ResolveError, ResolvedTheme};
use crate::services::resolver::TrackResolver;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum RetryState {
    /// First attempt, artist constraint included
    Primary,
    /// Re-attempt after a request error, constraint still included
    StrictRetry,
    /// Final attempt with the artist constraint dropped
    RelaxedRetry,
}

/// Drives the escalation policy for one edge at a time
pub struct RetryController<'a> {
    resolver: &'a TrackResolver,
}

impl<'a> RetryController<'a> {
    pub fn new(resolver: &'a TrackResolver) -> Self {
        Self { resolver }
    }

    /// Resolve an edge to its terminal record
    pub async fn run(&self, edge: &Edge) -> ResolvedTheme {
        let mut state = RetryState::Primary;

        loop {
            let hide_artist = state == RetryState::RelaxedRetry;
            let theme = self.resolver.resolve(edge, hide_artist).await;

            state = match (state, theme.error) {
                (RetryState::Primary, ResolveError::NotFound) => RetryState::RelaxedRetry,
                (RetryState::Primary, ResolveError::RequestError) => RetryState::StrictRetry,
                (RetryState::StrictRetry, ResolveError::NotFound) => RetryState::RelaxedRetry,
                // Success anywhere, a repeated request error, or any relaxed
                // outcome is terminal.
                _ => return theme,
            };
        }
    }
}
