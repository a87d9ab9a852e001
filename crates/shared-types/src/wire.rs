//! # Upstream Wire Types
//!
//! The request and response shapes spoken by the upstream bidding endpoint.
//! The response is a flat collection of winning bids tagged only by auction
//! identifier and pixel dimensions; no placement identifier comes back.

use serde::{Deserialize, Serialize};

/// The fully encoded GET-style call handed to the transport collaborator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EncodedBidRequest {
    /// Endpoint URL with all query parameters applied.
    pub url: String,
}

/// Upstream auction response body.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BidResponseBody {
    /// Bid groups. Absent and empty are distinguished only for diagnostics.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub seatbid: Option<Vec<SeatBid>>,
}

/// One bid group. Only the first element of the inner list is used.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SeatBid {
    #[serde(default)]
    pub bid: Vec<ServerBid>,
}

/// One winning bid as returned by the endpoint.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ServerBid {
    /// Auction identifier this bid answers.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub auid: Option<String>,
    /// Ad markup.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub adm: Option<String>,
    #[serde(default)]
    pub price: f64,
    #[serde(default)]
    pub w: u32,
    #[serde(default)]
    pub h: u32,
    /// Deal identifier, passed through untouched.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dealid: Option<String>,
    /// Settlement currency, when the endpoint states one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cur: Option<String>,
}
