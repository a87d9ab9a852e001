//! Configuration for the reconciliation subsystem.

use serde::{Deserialize, Serialize};

/// Upstream endpoint configuration.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct EndpointConfig {
    /// Base URL of the bidding endpoint.
    pub endpoint_url: String,
    /// The one fixed user-sync pixel URL.
    pub sync_pixel_url: String,
    /// Timeout sent upstream when the caller does not set one (ms).
    pub default_timeout_ms: u64,
}

impl Default for EndpointConfig {
    fn default() -> Self {
        Self {
            endpoint_url: "https://bid.hivebid.io/hbid".into(),
            sync_pixel_url: "https://bid.hivebid.io/sync".into(),
            default_timeout_ms: 1_000,
        }
    }
}
