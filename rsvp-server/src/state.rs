use std::sync::Arc;

use rsvp_core::config::RsvpConfig;
use rsvp_core::event::EventDetails;
use rsvp_core::{RsvpResult, RsvpService, store};

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub service: Arc<RsvpService>,
    pub event: Arc<EventDetails>,
}

impl AppState {
    pub fn new(service: RsvpService, event: EventDetails) -> Self {
        AppState {
            service: Arc::new(service),
            event: Arc::new(event),
        }
    }

    /// Open the configured storage backend. The file backend creates its
    /// document here, so a bad data path fails at startup rather than on
    /// the first request.
    pub async fn from_config(config: &RsvpConfig) -> RsvpResult<Self> {
        let store = store::open(&config.storage).await?;
        Ok(Self::new(RsvpService::new(store), config.event.clone()))
    }
}
