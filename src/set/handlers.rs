use axum::{Json, extract::Extension, http::StatusCode};
use std::sync::Arc;

use super::protocol::{Item, Response};
use super::service::SetService;

pub async fn handle_add(
    Extension(service): Extension<Arc<SetService>>,
    Json(req): Json<Item>,
) -> (StatusCode, Json<Response>) {
    (StatusCode::OK, Json(service.add(&req.item)))
}

pub async fn handle_remove(
    Extension(service): Extension<Arc<SetService>>,
    Json(req): Json<Item>,
) -> (StatusCode, Json<Response>) {
    (StatusCode::OK, Json(service.remove(&req.item)))
}

pub async fn handle_contains(
    Extension(service): Extension<Arc<SetService>>,
    Json(req): Json<Item>,
) -> (StatusCode, Json<Response>) {
    (StatusCode::OK, Json(service.contains(&req.item)))
}
