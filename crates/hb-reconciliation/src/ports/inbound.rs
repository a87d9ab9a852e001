//! Inbound Ports (Driving Ports / API)
//!
//! The surface the embedding auction framework calls.

use crate::domain::errors::AuctionCycleError;
use async_trait::async_trait;
use shared_types::{AuctionContext, NormalizedBid, PlacementRequest, SyncPixel};

/// Primary header-auction API.
#[async_trait]
pub trait HeaderAuctionApi: Send + Sync {
    /// Runs one full auction cycle. It:
    ///
    /// 1. Drops requests without an auction identifier (with a warning)
    /// 2. Builds the reverse index and the outbound payload
    /// 3. Dispatches the encoded request through the transport port
    /// 4. Reconciles the response against the index
    ///
    /// The returned bids are in emission order. An upstream response that
    /// matched nothing yields an empty list, not an error.
    async fn run_auction(
        &self,
        requests: Vec<PlacementRequest>,
        context: AuctionContext,
    ) -> Result<Vec<NormalizedBid>, AuctionCycleError>;

    /// User-sync pixels exposed for this caller: at most one, and only when
    /// the caller enabled syncing.
    fn user_syncs(&self, context: &AuctionContext) -> Vec<SyncPixel>;
}
