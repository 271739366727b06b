//! Gateway application state.
//!
//! This module defines the shared state that is available to all request handlers.

use std::sync::Arc;

use shift_roster_control::Roster;

use crate::config::GatewayConfig;

/// Shared application state for the gateway.
///
/// This struct holds references to all services needed by the HTTP handlers.
pub struct GatewayState<R>
where
    R: Roster,
{
    /// The roster service.
    pub roster: Arc<R>,
    /// Gateway configuration.
    pub config: GatewayConfig,
}

impl<R> GatewayState<R>
where
    R: Roster,
{
    /// Create a new gateway state.
    #[must_use]
    pub fn new(roster: Arc<R>, config: GatewayConfig) -> Self {
        Self { roster, config }
    }
}

impl<R> Clone for GatewayState<R>
where
    R: Roster,
{
    fn clone(&self) -> Self {
        Self {
            roster: Arc::clone(&self.roster),
            config: self.config.clone(),
        }
    }
}
