//! HTTP surface of the preview server

use std::convert::Infallible;

use axum::Router;
use axum::extract::{Path, State};
use axum::http::{StatusCode, Uri, header};
use axum::response::sse::{Event, KeepAlive, Sse};
use axum::response::{Html, IntoResponse, Json, Response};
use axum::routing::get;
use serde_json::json;
use tokio_stream::StreamExt;

use super::pages;
use super::state::ServerState;
use crate::{analyzer, render};

const TRACING_TARGET: &str = "artifact::server::routes";

pub fn router(state: ServerState) -> Router {
    Router::new()
        .route("/", get(root))
        .route("/__reload", get(reload_events))
        .route("/__status", get(status))
        .route("/{segment}", get(preview))
        .route("/{segment}/", get(preview))
        .fallback(not_found)
        .with_state(state)
}

async fn root(State(state): State<ServerState>) -> Response {
    (
        StatusCode::FOUND,
        [(header::LOCATION, format!("/{}", state.id()))],
    )
        .into_response()
}

/// Fresh analysis and render on every request. Both are blocking file work.
async fn preview(
    State(state): State<ServerState>,
    Path(segment): Path<String>,
    uri: Uri,
) -> Response {
    if segment != state.id() {
        return not_found_response(&state, uri.path());
    }

    let component = state.component_file();
    let rendered = tokio::task::spawn_blocking(move || {
        analyzer::analyze(&component).map(|analysis| render::render(&analysis))
    })
    .await;

    let detail = match rendered {
        Ok(Ok(html)) => return Html(html).into_response(),
        Ok(Err(err)) => err.to_string(),
        Err(err) => format!("Render task failed: {err}"),
    };

    tracing::warn!(target: TRACING_TARGET, error = %detail, "preview render failed");
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Html(pages::error_page(&detail)),
    )
        .into_response()
}

async fn reload_events(State(state): State<ServerState>) -> impl IntoResponse {
    let stream = state
        .connect()
        .map(|notice| Ok::<_, Infallible>(Event::default().data(notice.as_str())));

    (
        [(header::CACHE_CONTROL, "no-cache")],
        Sse::new(stream).keep_alive(KeepAlive::default()),
    )
}

async fn status(State(state): State<ServerState>) -> Json<serde_json::Value> {
    Json(json!({ "watchers": state.watcher_count() }))
}

async fn not_found(State(state): State<ServerState>, uri: Uri) -> Response {
    not_found_response(&state, uri.path())
}

fn not_found_response(state: &ServerState, path: &str) -> Response {
    (
        StatusCode::NOT_FOUND,
        Html(pages::not_found_page(state.id(), path)),
    )
        .into_response()
}
