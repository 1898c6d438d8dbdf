//! Addon protocol routes.
//!
//! Resource paths end in `.json`; the router captures whole segments, so the
//! suffix is stripped here and a segment without it is a 404.

use crate::server::AppContext;
use axum::{
    extract::{OriginalUri, Path, State},
    http::StatusCode,
    response::IntoResponse,
    routing::get,
    Json, Router,
};
use std::collections::HashMap;
use tvstreams_catalog::{CatalogResponse, MetaResponse, StreamsResponse};

pub fn addon_routes() -> Router<AppContext> {
    Router::new()
        .route("/manifest.json", get(manifest))
        .route("/catalog/:type/:id", get(catalog))
        .route("/catalog/:type/:id/:extra", get(catalog_with_extra))
        .route("/meta/:type/:id", get(meta))
        .route("/stream/:type/:id", get(stream))
}

async fn manifest(State(ctx): State<AppContext>) -> impl IntoResponse {
    Json(ctx.manifest.as_ref().clone())
}

async fn catalog(
    State(ctx): State<AppContext>,
    Path((content_type, id)): Path<(String, String)>,
) -> Result<Json<CatalogResponse>, StatusCode> {
    let catalog_id = strip_json(&id).ok_or(StatusCode::NOT_FOUND)?;
    Ok(Json(ctx.resolver.list_or_search(&content_type, catalog_id, None)))
}

async fn catalog_with_extra(
    State(ctx): State<AppContext>,
    Path((content_type, catalog_id, _extra)): Path<(String, String, String)>,
    OriginalUri(uri): OriginalUri,
) -> Result<Json<CatalogResponse>, StatusCode> {
    // The extra segment is form encoded; decode it from the raw path so an
    // escaped `&` or `=` inside a value survives.
    let raw_extra = uri.path().rsplit('/').next().unwrap_or_default();
    let raw_extra = strip_json(raw_extra).ok_or(StatusCode::NOT_FOUND)?;
    let extra = parse_extra(raw_extra);

    let search = extra.get("search").map(String::as_str);
    Ok(Json(
        ctx.resolver
            .list_or_search(&content_type, &catalog_id, search),
    ))
}

async fn meta(
    State(ctx): State<AppContext>,
    Path((_content_type, id)): Path<(String, String)>,
) -> Result<Json<MetaResponse>, StatusCode> {
    let id = strip_json(&id).ok_or(StatusCode::NOT_FOUND)?;
    Ok(Json(ctx.resolver.meta_lookup(id)))
}

async fn stream(
    State(ctx): State<AppContext>,
    Path((content_type, id)): Path<(String, String)>,
) -> Result<Json<StreamsResponse>, StatusCode> {
    let id = strip_json(&id).ok_or(StatusCode::NOT_FOUND)?;
    Ok(Json(ctx.resolver.stream_lookup(&content_type, id).await))
}

fn strip_json(segment: &str) -> Option<&str> {
    segment.strip_suffix(".json")
}

/// Parse an extra segment such as `search=the%20wire&skip=0`.
///
/// `+` decodes to a space. The first occurrence of a key wins; pairs that do
/// not decode to UTF-8 are dropped.
pub fn parse_extra(raw: &str) -> HashMap<String, String> {
    let mut extra = HashMap::new();

    for pair in raw.split('&').filter(|p| !p.is_empty()) {
        let (key, value) = pair.split_once('=').unwrap_or((pair, ""));
        match (decode_component(key), decode_component(value)) {
            (Some(key), Some(value)) => {
                extra.entry(key).or_insert(value);
            }
            _ => tracing::debug!("Dropping undecodable extra pair {:?}", pair),
        }
    }

    extra
}

fn decode_component(s: &str) -> Option<String> {
    let s = s.replace('+', " ");
    urlencoding::decode(&s).ok().map(|decoded| decoded.into_owned())
}
