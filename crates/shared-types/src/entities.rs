//! # Auction Domain Entities
//!
//! Types exchanged with the embedding auction framework: placement requests
//! going in, normalized bids coming out, and the per-cycle context that is
//! passed through to the upstream endpoint untouched.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Canonical `"<width>x<height>"` string used as a matching dimension.
pub type SizeKey = String;

/// Seconds a matched bid stays valid for rendering.
pub const BID_TTL_SECS: u64 = 180;

/// Currency assumed when the upstream omits one.
pub const DEFAULT_CURRENCY: &str = "RUB";

/// Declared pixel dimensions of one placement slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct AdSize {
    pub width: u32,
    pub height: u32,
}

impl AdSize {
    /// Creates a new size.
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// Canonical size-key form, e.g. `"300x250"`.
    pub fn key(&self) -> SizeKey {
        format!("{}x{}", self.width, self.height)
    }
}

impl fmt::Display for AdSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}", self.width, self.height)
    }
}

/// Price accounting convention applied to a whole request batch.
///
/// A single gross request flips the entire batch to gross; this is a
/// batch-wide setting, never per placement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PriceMode {
    #[default]
    Net,
    Gross,
}

impl PriceMode {
    /// Wire form used in the outbound `pt` parameter.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Net => "net",
            Self::Gross => "gross",
        }
    }
}

impl fmt::Display for PriceMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One placement request as handed over by the auction framework.
///
/// The framework validates these before they reach the subsystem; the only
/// check repeated at the boundary is auction-identifier presence.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlacementRequest {
    /// Identifier of the ad slot on the page.
    pub placement_id: String,
    /// Identifier of this individual request (returned on the matched bid).
    pub request_id: String,
    /// Upstream-assigned auction identifier grouping bids across placements.
    pub auction_id: String,
    /// Declared sizes, in declaration order. May be empty.
    pub sizes: Vec<AdSize>,
    /// Per-request price accounting preference.
    pub price_mode: PriceMode,
}

impl PlacementRequest {
    /// Presence-only check; auction-identifier semantics are upstream's.
    pub fn has_auction_id(&self) -> bool {
        !self.auction_id.trim().is_empty()
    }
}

/// GDPR consent fields passed through to the endpoint verbatim.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConsentData {
    /// Whether GDPR applies to this user, when known.
    pub gdpr_applies: Option<bool>,
    /// The raw consent string, when one was collected.
    pub consent_string: Option<String>,
}

/// Caller-supplied context for one auction cycle.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AuctionContext {
    /// Top-level page URL.
    pub page_url: Option<String>,
    /// Auction timeout in milliseconds.
    pub timeout_ms: Option<u64>,
    /// Consent pass-through.
    pub consent: ConsentData,
    /// Whether the caller allows user-sync pixel registration.
    pub sync_enabled: bool,
}

/// A matched bid, normalized for the auction caller.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NormalizedBid {
    /// Identifier of the placement request this bid satisfied.
    pub request_id: String,
    pub price: f64,
    pub width: u32,
    pub height: u32,
    /// Ad markup, verbatim from the upstream bid.
    pub ad_markup: String,
    pub currency: String,
    /// The batch-wide accounting convention, not the per-request preference.
    pub price_mode: PriceMode,
    pub ttl_secs: u64,
    pub deal_id: Option<String>,
}

/// The single fixed user-sync pixel exposed when the caller enables syncing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SyncPixel {
    pub url: String,
}
