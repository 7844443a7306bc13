//! Shared test support: an in-process mock of the Spotify endpoints
//!
//! Serves canned replies for `/search`, `/tracks/:id` and `/artists`, and
//! counts requests so tests can assert exactly how many calls a scenario
//! produced.

#![allow(dead_code)]

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::{Json, Router};
use serde_json::{json, Value};
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

/// Reply for one `/search` call, consumed in order (the last one repeats)
#[derive(Clone)]
pub enum SearchReply {
    /// 200 with the given array as `tracks.items`
    Items(Value),
    /// Bare status code, no body
    Status(u16),
}

/// Reply for every `/tracks/:id` call
#[derive(Clone)]
pub enum DetailReply {
    Preview(Option<String>),
    Status(u16),
}

#[derive(Clone)]
pub struct MockSpotify {
    pub search_calls: Arc<AtomicUsize>,
    pub detail_calls: Arc<AtomicUsize>,
    pub artist_calls: Arc<AtomicUsize>,
    /// Query strings seen by `/search`, in call order
    pub queries: Arc<Mutex<Vec<String>>>,
    search_replies: Arc<Vec<SearchReply>>,
    detail_reply: Arc<DetailReply>,
}

impl MockSpotify {
    pub fn new(search_replies: Vec<SearchReply>, detail_reply: DetailReply) -> Self {
        Self {
            search_calls: Arc::new(AtomicUsize::new(0)),
            detail_calls: Arc::new(AtomicUsize::new(0)),
            artist_calls: Arc::new(AtomicUsize::new(0)),
            queries: Arc::new(Mutex::new(Vec::new())),
            search_replies: Arc::new(search_replies),
            detail_reply: Arc::new(detail_reply),
        }
    }

    /// Bind an ephemeral port, serve in the background, return the base URL
    pub async fn spawn(self) -> String {
        let router = Router::new()
            .route("/search", get(search_handler))
            .route("/tracks/:id", get(detail_handler))
            .route("/artists", get(artists_handler))
            .with_state(self);

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, router).await.unwrap();
        });

        format!("http://{}", addr)
    }
}

async fn search_handler(
    State(mock): State<MockSpotify>,
    Query(params): Query<HashMap<String, String>>,
) -> Response {
    let n = mock.search_calls.fetch_add(1, Ordering::SeqCst);
    if let Some(q) = params.get("q") {
        mock.queries.lock().unwrap().push(q.clone());
    }

    let reply = mock
        .search_replies
        .get(n)
        .or_else(|| mock.search_replies.last())
        .cloned()
        .unwrap_or(SearchReply::Items(json!([])));

    match reply {
        SearchReply::Items(items) => Json(json!({ "tracks": { "items": items } })).into_response(),
        SearchReply::Status(code) => StatusCode::from_u16(code).unwrap().into_response(),
    }
}

async fn detail_handler(State(mock): State<MockSpotify>, Path(id): Path<String>) -> Response {
    mock.detail_calls.fetch_add(1, Ordering::SeqCst);

    match &*mock.detail_reply {
        DetailReply::Preview(url) => {
            Json(json!({ "id": id, "preview_url": url })).into_response()
        }
        DetailReply::Status(code) => StatusCode::from_u16(*code).unwrap().into_response(),
    }
}

/// Batched artist lookup: ids starting with `fail` poison the whole batch,
/// ids starting with `noimg` return an artist without images.
async fn artists_handler(
    State(mock): State<MockSpotify>,
    Query(params): Query<HashMap<String, String>>,
) -> Response {
    mock.artist_calls.fetch_add(1, Ordering::SeqCst);

    let ids: Vec<&str> = params
        .get("ids")
        .map(|raw| raw.split(',').collect())
        .unwrap_or_default();

    if ids.iter().any(|id| id.starts_with("fail")) {
        return StatusCode::INTERNAL_SERVER_ERROR.into_response();
    }

    let artists: Vec<Value> = ids
        .iter()
        .map(|id| {
            let images = if id.starts_with("noimg") {
                json!([])
            } else {
                json!([{ "url": format!("https://i.scdn.co/image/{}", id) }])
            };
            json!({ "id": id, "images": images })
        })
        .collect();

    Json(json!({ "artists": artists })).into_response()
}

/// Build a search-result track object in Spotify's wire shape
pub fn track_json(id: &str, name: &str, artists: &[&str], preview_url: Option<&str>) -> Value {
    let artists: Vec<Value> = artists.iter().map(|n| json!({ "name": n })).collect();
    json!({
        "id": id,
        "name": name,
        "artists": artists,
        "preview_url": preview_url,
    })
}
