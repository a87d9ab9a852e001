//! User-sync pixel registration.

use crate::config::EndpointConfig;
use shared_types::{AuctionContext, SyncPixel};

/// The pixels exposed for one caller: the single configured pixel when the
/// caller enabled syncing, none otherwise.
pub fn sync_pixels(context: &AuctionContext, config: &EndpointConfig) -> Vec<SyncPixel> {
    if context.sync_enabled && !config.sync_pixel_url.is_empty() {
        vec![SyncPixel {
            url: config.sync_pixel_url.clone(),
        }]
    } else {
        Vec::new()
    }
}
