//! Resolver, retry-escalation and pipeline behavior against a mock Spotify

mod support;

use preview_scraper::models::{Edge, Preview, ResolveError, ResolvedTheme};
use preview_scraper::services::pipeline::{BatchPipeline, ResultCache};
use preview_scraper::services::{RetryController, SpotifyClient, TrackResolver};
use serde_json::json;
use std::sync::atomic::Ordering;
use support::{track_json, DetailReply, MockSpotify, SearchReply};

fn test_edge() -> Edge {
    Edge {
        source: "A".into(),
        target: "B".into(),
        colab_track_name: "X".into(),
    }
}

async fn resolver_for(mock: &MockSpotify) -> TrackResolver {
    let base_url = mock.clone().spawn().await;
    TrackResolver::new(SpotifyClient::with_base_url("test-token", base_url).unwrap())
}

#[tokio::test]
async fn empty_search_yields_not_found_with_blank_fields() {
    let mock = MockSpotify::new(vec![SearchReply::Items(json!([]))], DetailReply::Preview(None));
    let resolver = resolver_for(&mock).await;

    let theme = resolver.resolve(&test_edge(), false).await;

    assert_eq!(theme.error, ResolveError::NotFound);
    assert_eq!(theme.preview, Preview::Missing);
    assert_eq!(theme.source, "A");
    assert_eq!(theme.target, "B");
    assert_eq!(theme.edge_track_name, "X");
    assert!(theme.spotify_track_name.is_empty());
    assert!(theme.spotify_artists.is_empty());
    assert!(theme.id.is_empty());
    assert_eq!(theme.track_name_coincides, None);
    assert_eq!(theme.artists_coincides, None);
}

#[tokio::test]
async fn query_includes_artists_unless_hidden() {
    let mock = MockSpotify::new(vec![SearchReply::Items(json!([]))], DetailReply::Preview(None));
    let resolver = resolver_for(&mock).await;

    resolver.resolve(&test_edge(), false).await;
    resolver.resolve(&test_edge(), true).await;

    let queries = mock.queries.lock().unwrap().clone();
    assert_eq!(queries[0], "track:X artist:A B");
    assert_eq!(queries[1], "track:X");
}

#[tokio::test]
async fn search_failure_yields_request_error() {
    let mock = MockSpotify::new(vec![SearchReply::Status(500)], DetailReply::Preview(None));
    let resolver = resolver_for(&mock).await;

    let theme = resolver.resolve(&test_edge(), false).await;
    assert_eq!(theme.error, ResolveError::RequestError);
    assert_eq!(theme.preview, Preview::Missing);
    assert!(theme.id.is_empty());
}

#[tokio::test]
async fn full_match_candidate_populates_record() {
    let items = json!([
        track_json("t0", "X", &["A"], None),
        track_json("t1", "x!", &["a", "b"], Some("https://p.scdn.co/mp3-preview/t1")),
    ]);
    let mock = MockSpotify::new(vec![SearchReply::Items(items)], DetailReply::Preview(None));
    let resolver = resolver_for(&mock).await;

    let theme = resolver.resolve(&test_edge(), false).await;

    assert_eq!(theme.error, ResolveError::Ok);
    assert_eq!(theme.id, "t1");
    assert_eq!(theme.spotify_track_name, "x!");
    assert_eq!(theme.spotify_artists, "a, b");
    assert_eq!(theme.track_name_coincides, Some(true));
    assert_eq!(theme.artists_coincides, Some(true));
    assert_eq!(theme.preview, Preview::Url("https://p.scdn.co/mp3-preview/t1".into()));
    // Preview came straight from the candidate, no detail lookup
    assert_eq!(mock.detail_calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn fallback_candidate_reports_honest_flags() {
    let items = json!([track_json("t0", "Other", &["C"], None)]);
    let mock = MockSpotify::new(vec![SearchReply::Items(items)], DetailReply::Preview(None));
    let resolver = resolver_for(&mock).await;

    let theme = resolver.resolve(&test_edge(), false).await;

    assert_eq!(theme.error, ResolveError::Ok);
    assert_eq!(theme.id, "t0");
    assert_eq!(theme.track_name_coincides, Some(false));
    assert_eq!(theme.artists_coincides, Some(false));
}

#[tokio::test]
async fn missing_preview_recovered_from_detail_lookup() {
    let items = json!([track_json("t1", "X", &["A", "B"], None)]);
    let mock = MockSpotify::new(
        vec![SearchReply::Items(items)],
        DetailReply::Preview(Some("https://p.scdn.co/mp3-preview/detail".into())),
    );
    let resolver = resolver_for(&mock).await;

    let theme = resolver.resolve(&test_edge(), false).await;

    assert_eq!(theme.error, ResolveError::Ok);
    assert_eq!(
        theme.preview,
        Preview::Url("https://p.scdn.co/mp3-preview/detail".into())
    );
    assert_eq!(mock.detail_calls.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn detail_lookup_failure_is_swallowed() {
    let items = json!([track_json("t1", "X", &["A", "B"], None)]);
    let mock = MockSpotify::new(vec![SearchReply::Items(items)], DetailReply::Status(500));
    let resolver = resolver_for(&mock).await;

    let theme = resolver.resolve(&test_edge(), false).await;

    // Degrades to "no preview", never to an error
    assert_eq!(theme.error, ResolveError::Ok);
    assert_eq!(theme.preview, Preview::Missing);
    assert_eq!(mock.detail_calls.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn successful_primary_attempt_never_retries() {
    let items = json!([track_json("t1", "X", &["A", "B"], Some("https://p/a"))]);
    let mock = MockSpotify::new(vec![SearchReply::Items(items)], DetailReply::Preview(None));
    let resolver = resolver_for(&mock).await;

    let theme = RetryController::new(&resolver).run(&test_edge()).await;

    assert_eq!(theme.error, ResolveError::Ok);
    assert_eq!(mock.search_calls.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn not_found_retries_exactly_once_without_artist() {
    let mock = MockSpotify::new(vec![SearchReply::Items(json!([]))], DetailReply::Preview(None));
    let resolver = resolver_for(&mock).await;

    let theme = RetryController::new(&resolver).run(&test_edge()).await;

    assert_eq!(theme.error, ResolveError::NotFound);
    assert_eq!(mock.search_calls.load(Ordering::SeqCst), 2);
    let queries = mock.queries.lock().unwrap().clone();
    assert_eq!(queries, vec!["track:X artist:A B", "track:X"]);
}

#[tokio::test]
async fn relaxed_retry_can_still_succeed() {
    let items = json!([track_json("t1", "X", &["A", "B"], Some("https://p/a"))]);
    let mock = MockSpotify::new(
        vec![SearchReply::Items(json!([])), SearchReply::Items(items)],
        DetailReply::Preview(None),
    );
    let resolver = resolver_for(&mock).await;

    let theme = RetryController::new(&resolver).run(&test_edge()).await;

    assert_eq!(theme.error, ResolveError::Ok);
    assert_eq!(theme.id, "t1");
    assert_eq!(mock.search_calls.load(Ordering::SeqCst), 2);
}

#[tokio::test]
async fn request_error_then_not_found_escalates_to_three_attempts() {
    let mock = MockSpotify::new(
        vec![
            SearchReply::Status(500),
            SearchReply::Items(json!([])),
            SearchReply::Items(json!([])),
        ],
        DetailReply::Preview(None),
    );
    let resolver = resolver_for(&mock).await;

    let theme = RetryController::new(&resolver).run(&test_edge()).await;

    assert_eq!(theme.error, ResolveError::NotFound);
    assert_eq!(mock.search_calls.load(Ordering::SeqCst), 3);
    let queries = mock.queries.lock().unwrap().clone();
    // Strict retry keeps the artist constraint; only the last drops it
    assert_eq!(
        queries,
        vec!["track:X artist:A B", "track:X artist:A B", "track:X"]
    );
}

#[tokio::test]
async fn repeated_request_error_stops_after_two_attempts() {
    let mock = MockSpotify::new(vec![SearchReply::Status(500)], DetailReply::Preview(None));
    let resolver = resolver_for(&mock).await;

    let theme = RetryController::new(&resolver).run(&test_edge()).await;

    assert_eq!(theme.error, ResolveError::RequestError);
    assert_eq!(mock.search_calls.load(Ordering::SeqCst), 2);
}

#[tokio::test]
async fn request_error_then_success_stops_after_two_attempts() {
    let items = json!([track_json("t1", "X", &["A", "B"], Some("https://p/a"))]);
    let mock = MockSpotify::new(
        vec![SearchReply::Status(500), SearchReply::Items(items)],
        DetailReply::Preview(None),
    );
    let resolver = resolver_for(&mock).await;

    let theme = RetryController::new(&resolver).run(&test_edge()).await;

    assert_eq!(theme.error, ResolveError::Ok);
    assert_eq!(mock.search_calls.load(Ordering::SeqCst), 2);
}

#[tokio::test]
async fn cached_edge_costs_zero_resolver_invocations() {
    let cached = ResolvedTheme {
        source: "A".into(),
        target: "B".into(),
        edge_track_name: "X".into(),
        spotify_track_name: "X (stale title is fine)".into(),
        spotify_artists: "A, B".into(),
        track_name_coincides: Some(false),
        artists_coincides: Some(true),
        id: "cached-id".into(),
        preview: Preview::Url("https://p/cached".into()),
        error: ResolveError::Ok,
    };

    let mock = MockSpotify::new(vec![SearchReply::Items(json!([]))], DetailReply::Preview(None));
    let base_url = mock.clone().spawn().await;
    let pipeline =
        BatchPipeline::new(SpotifyClient::with_base_url("test-token", base_url).unwrap());
    let cache = ResultCache::new(vec![cached.clone()]);

    let themes = pipeline.run(&[test_edge()], &cache).await;

    assert_eq!(themes, vec![cached]);
    assert_eq!(mock.search_calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn pipeline_preserves_input_edge_order() {
    let cached = ResolvedTheme {
        source: "C".into(),
        target: "D".into(),
        edge_track_name: "Y".into(),
        spotify_track_name: "Y".into(),
        spotify_artists: "C, D".into(),
        track_name_coincides: Some(true),
        artists_coincides: Some(true),
        id: "cached-id".into(),
        preview: Preview::Missing,
        error: ResolveError::Ok,
    };

    let items = json!([track_json("fresh-id", "X", &["A", "B"], Some("https://p/a"))]);
    let mock = MockSpotify::new(vec![SearchReply::Items(items)], DetailReply::Preview(None));
    let base_url = mock.clone().spawn().await;
    let pipeline =
        BatchPipeline::new(SpotifyClient::with_base_url("test-token", base_url).unwrap());
    let cache = ResultCache::new(vec![cached.clone()]);

    let edges = vec![
        test_edge(),
        Edge {
            source: "C".into(),
            target: "D".into(),
            colab_track_name: "Y".into(),
        },
    ];
    let themes = pipeline.run(&edges, &cache).await;

    assert_eq!(themes.len(), 2);
    assert_eq!(themes[0].id, "fresh-id");
    assert_eq!(themes[1], cached);
    assert_eq!(mock.search_calls.load(Ordering::SeqCst), 1);
}
