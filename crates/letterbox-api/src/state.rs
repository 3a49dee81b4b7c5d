//! Shared application state.

use std::sync::Arc;

use letterbox_checkout::pricing::PricingConfig;
use letterbox_core::clock::Clock;
use letterbox_core::repository::EventRepository;
use letterbox_letter::domain::catalog::Catalogs;

use crate::config::DEFAULT_UPLOAD_LIMIT_BYTES;

/// Application state shared across all request handlers.
#[derive(Clone)]
pub struct AppState {
    /// Source of event timestamps.
    pub clock: Arc<dyn Clock + Send + Sync>,
    /// Event streams for every letter.
    pub event_repository: Arc<dyn EventRepository>,
    /// Option catalogs offered by the wizard.
    pub catalogs: Arc<Catalogs>,
    /// Prices applied to quotes and orders.
    pub pricing: PricingConfig,
    /// Body size limit for photo uploads.
    pub upload_limit_bytes: usize,
}

impl AppState {
    /// Create new application state.
    #[must_use]
    pub fn new(
        clock: Arc<dyn Clock + Send + Sync>,
        event_repository: Arc<dyn EventRepository>,
        catalogs: Catalogs,
        pricing: PricingConfig,
    ) -> Self {
        Self {
            clock,
            event_repository,
            catalogs: Arc::new(catalogs),
            pricing,
            upload_limit_bytes: DEFAULT_UPLOAD_LIMIT_BYTES,
        }
    }

    /// Replaces the photo upload body limit.
    #[must_use]
    pub fn with_upload_limit(mut self, upload_limit_bytes: usize) -> Self {
        self.upload_limit_bytes = upload_limit_bytes;
        self
    }
}
