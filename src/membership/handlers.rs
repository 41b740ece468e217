use axum::{Json, extract::Extension, http::StatusCode};
use std::sync::Arc;

use super::manager::MembershipManager;
use super::types::Member;

pub async fn handle_peers(
    Extension(membership): Extension<Arc<MembershipManager>>,
) -> (StatusCode, Json<Vec<Member>>) {
    (StatusCode::OK, Json(membership.peers().await))
}
