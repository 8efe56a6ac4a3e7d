//! Gateway application state.

use std::sync::Arc;

use bookstack_auth::IdentityVerifier;
use bookstack_control::Records;

use crate::config::GatewayConfig;

/// Shared application state for the gateway.
///
/// This struct holds references to all services needed by the HTTP handlers.
pub struct GatewayState<R, V>
where
    R: Records,
    V: IdentityVerifier,
{
    /// The records service for CRUD operations.
    pub records: Arc<R>,
    /// The identity verifier resolving session tokens.
    pub verifier: Arc<V>,
    /// Gateway configuration.
    pub config: GatewayConfig,
}

impl<R, V> GatewayState<R, V>
where
    R: Records,
    V: IdentityVerifier,
{
    /// Create a new gateway state.
    #[must_use]
    pub fn new(records: Arc<R>, verifier: Arc<V>, config: GatewayConfig) -> Self {
        Self {
            records,
            verifier,
            config,
        }
    }
}

impl<R, V> Clone for GatewayState<R, V>
where
    R: Records,
    V: IdentityVerifier,
{
    fn clone(&self) -> Self {
        Self {
            records: Arc::clone(&self.records),
            verifier: Arc::clone(&self.verifier),
            config: self.config.clone(),
        }
    }
}
