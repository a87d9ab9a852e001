//! Outbound Ports (Driven Ports / SPI)
//!
//! The transport collaborator owned by the embedding framework. Cancellation
//! and timeout live entirely on that side; if no response ever arrives, the
//! cycle's index is simply dropped.

use crate::domain::errors::TransportError;
use async_trait::async_trait;
use shared_types::{BidResponseBody, EncodedBidRequest};

/// The single GET-style call to the upstream bidding endpoint.
#[async_trait]
pub trait BidTransport: Send + Sync {
    /// Dispatches one encoded request.
    ///
    /// `None` means the endpoint answered without a usable body; that is a
    /// diagnostic for the matcher, not a transport failure.
    async fn fetch(
        &self,
        request: &EncodedBidRequest,
    ) -> Result<Option<BidResponseBody>, TransportError>;
}
