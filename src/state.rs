//! Shared application state injected into handlers.

use std::sync::Arc;

use crate::application::services::LinkService;
use crate::domain::password_hasher::PasswordHasher;
use crate::domain::repositories::LinkRepository;

#[derive(Clone)]
pub struct AppState {
    pub link_service: Arc<LinkService>,
}

impl AppState {
    /// Wires the link service from its collaborators.
    pub fn new(
        repository: Arc<dyn LinkRepository>,
        hasher: Arc<dyn PasswordHasher>,
        mask_prefix: String,
    ) -> Self {
        Self {
            link_service: Arc::new(LinkService::new(repository, hasher, mask_prefix)),
        }
    }
}
