//! Service providers for the presentation layer
//!
//! The composition root puts a [`UiServices`] into Dioxus context. Components
//! use the hooks below instead of touching infrastructure types.

use dioxus::prelude::*;
use std::sync::Arc;

use crate::application::{LandingService, SessionService};
use crate::config::SessionTimings;
use crate::ports::outbound::{ApiPort, GameConnectionPort, PlatformPort};

/// Ports shared by every screen
#[derive(Clone)]
pub struct UiServices {
    pub api: Arc<dyn ApiPort>,
    /// Shared session socket. One screen owns it at a time.
    pub connection: Arc<dyn GameConnectionPort>,
    pub platform: Arc<dyn PlatformPort>,
    pub timings: SessionTimings,
}

impl UiServices {
    pub fn new(
        api: Arc<dyn ApiPort>,
        connection: Arc<dyn GameConnectionPort>,
        platform: Arc<dyn PlatformPort>,
        timings: SessionTimings,
    ) -> Self {
        Self {
            api,
            connection,
            platform,
            timings,
        }
    }

    pub fn landing(&self) -> LandingService {
        LandingService::new(Arc::clone(&self.api), Arc::clone(&self.platform))
    }

    pub fn session(&self) -> SessionService {
        SessionService::new(
            Arc::clone(&self.api),
            Arc::clone(&self.connection),
            Arc::clone(&self.platform),
        )
    }
}

/// Hook to access the service bundle from context
pub fn use_services() -> UiServices {
    use_context::<UiServices>()
}
