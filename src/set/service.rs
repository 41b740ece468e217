use std::sync::Arc;

use super::backend::SetBackend;
use super::protocol::Response;
use crate::error::SetError;

/// RPC-facing set service.
///
/// Forwards calls to the injected backend and folds every outcome into a [`Response`].
/// Backend failures never escape as errors.
pub struct SetService {
    backend: Arc<dyn SetBackend>,
}

impl SetService {
    pub fn new(backend: Arc<dyn SetBackend>) -> Arc<Self> {
        Arc::new(Self { backend })
    }

    pub fn add(&self, item: &str) -> Response {
        match self.backend.add(item) {
            Ok(present) => {
                tracing::debug!("Added {:?} (already present: {})", item, present);
                Response::success(present)
            }
            Err(e) => {
                tracing::warn!("Backend rejected add of {:?}: {}", item, e);
                Response::error(e.to_string())
            }
        }
    }

    /// Always answers "not implemented"; the backend is not consulted.
    pub fn remove(&self, item: &str) -> Response {
        tracing::debug!("Remove of {:?} is not wired to the backend", item);
        Response::error(SetError::NotImplemented.to_string())
    }

    /// Always answers "not implemented"; the backend is not consulted.
    pub fn contains(&self, item: &str) -> Response {
        tracing::debug!("Contains of {:?} is not wired to the backend", item);
        Response::error(SetError::NotImplemented.to_string())
    }
}
