//! Auction cycle orchestration.
//!
//! One `run_auction` call is one cycle: validate the batch, build the index
//! and payload, encode, dispatch through the transport port, reconcile the
//! response. The index is created and consumed inside the call; nothing
//! survives into the next cycle.

use crate::adapters::{encode_bid_request, sync_pixels};
use crate::config::EndpointConfig;
use crate::domain::errors::AuctionCycleError;
use crate::domain::index::IndexBuilder;
use crate::domain::matcher::ResponseMatcher;
use crate::ports::inbound::HeaderAuctionApi;
use crate::ports::outbound::BidTransport;
use async_trait::async_trait;
use shared_types::{AuctionContext, NormalizedBid, PlacementRequest, SyncPixel};
use tracing::{debug, info, warn};
use uuid::Uuid;

/// The subsystem's driving-port implementation.
pub struct AuctionService<T: BidTransport> {
    config: EndpointConfig,
    transport: T,
}

impl<T: BidTransport> AuctionService<T> {
    /// Creates a service over a transport collaborator.
    pub fn new(config: EndpointConfig, transport: T) -> Self {
        Self { config, transport }
    }

    /// Drops requests the upstream validation should have caught; the only
    /// check repeated here is auction-identifier presence.
    fn accept(requests: Vec<PlacementRequest>) -> Vec<PlacementRequest> {
        requests
            .into_iter()
            .filter(|request| {
                if request.has_auction_id() {
                    true
                } else {
                    warn!(
                        placement = %request.placement_id,
                        request = %request.request_id,
                        "[hb-recon] dropping request without auction identifier"
                    );
                    false
                }
            })
            .collect()
    }
}

#[async_trait]
impl<T: BidTransport> HeaderAuctionApi for AuctionService<T> {
    async fn run_auction(
        &self,
        requests: Vec<PlacementRequest>,
        context: AuctionContext,
    ) -> Result<Vec<NormalizedBid>, AuctionCycleError> {
        let cycle_id = Uuid::new_v4();
        let mut context = context;
        context.timeout_ms = context.timeout_ms.or(Some(self.config.default_timeout_ms));

        let accepted = Self::accept(requests);
        let (payload, mut index) = IndexBuilder::build(&accepted, &context);
        let encoded = encode_bid_request(&payload, &self.config)?;
        debug!(
            %cycle_id,
            requests = accepted.len(),
            auction_ids = payload.auction_ids.len(),
            url = %encoded.url,
            "[hb-recon] dispatching bid request"
        );

        let body = self.transport.fetch(&encoded).await?;
        let outcome = ResponseMatcher::interpret(body, &mut index, payload.price_mode);
        info!(
            %cycle_id,
            matched = outcome.bids.len(),
            diagnostics = outcome.diagnostics.len(),
            "[hb-recon] auction cycle complete"
        );
        Ok(outcome.bids)
    }

    fn user_syncs(&self, context: &AuctionContext) -> Vec<SyncPixel> {
        sync_pixels(context, &self.config)
    }
}
