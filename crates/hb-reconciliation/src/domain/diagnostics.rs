//! Diagnostic taxonomy for response interpretation.
//!
//! Every condition here is non-fatal: the matcher records it and keeps
//! walking the remaining bid groups. Variants carry the offending payload
//! serialized as JSON for traceability.

use thiserror::Error;

/// A non-fatal condition recorded while interpreting a response.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MatchDiagnostic {
    /// Response body absent, or present without a bid-group list.
    #[error("empty response from upstream")]
    EmptyResponse,

    /// Bid-group list present but empty.
    #[error("response carried an empty bid-group list")]
    EmptySeatbidList,

    /// A bid group with a missing or empty inner bid list.
    #[error("bid group without usable bids: {seatbid}")]
    EmptyBidList { seatbid: String },

    /// A bid missing its auction identifier.
    #[error("bid without auction identifier: {bid}")]
    MissingAuctionId { bid: String },

    /// A bid missing its ad markup.
    #[error("bid without ad markup: {bid}")]
    MissingAdMarkup { bid: String },

    /// No placement is waiting for this bid's auction identifier.
    #[error("no placement for auction identifier {auid}: {bid}")]
    NoPlacementForAuctionId { auid: String, bid: String },
}

/// Serializes an offending payload for a diagnostic message.
pub(crate) fn raw_payload<T: serde::Serialize>(payload: &T) -> String {
    serde_json::to_string(payload).unwrap_or_else(|_| String::from("<unserializable>"))
}
