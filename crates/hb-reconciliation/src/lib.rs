//! # Bid Reconciliation Subsystem
//!
//! Reconciles outbound header-auction bid requests with the inbound auction
//! response of a single upstream bidding endpoint. Multiple placements on a
//! page may request the same auction identifier at different sizes; the
//! response returns a flat collection of winning bids tagged only by auction
//! identifier and pixel dimensions. This subsystem assigns each returned bid
//! to exactly one waiting placement.
//!
//! ## Control Flow
//!
//! ```text
//! Auction framework ──requests──→ IndexBuilder ──payload──→ [Transport port]
//!                                      │                          │
//!                                 BidsIndex ←───────response──────┘
//!                                      │
//!                                      ↓
//!                               ResponseMatcher ──normalized bids──→ caller
//! ```
//!
//! The index builder runs once per outbound request; the matcher runs once
//! per inbound response and consumes the same index. Each cycle owns its
//! index end-to-end, so the whole engine is single-threaded and lock-free.
//!
//! ## Matching Rules
//!
//! - Exact (auction-identifier, "<w>x<h>") buckets are consumed first,
//!   across the entire response, before any size-agnostic fallback runs
//! - Each matched bid dequeues exactly one pending request (FIFO per
//!   placement); a drained placement is retired from every bucket it
//!   occupies via its back-reference list
//! - Malformed or unmatched bids become diagnostics, never failures; the
//!   matcher always returns whatever it could assemble
//!
//! ## Hexagonal Architecture
//!
//! - **Domain Layer** (`domain/`): index construction, matching, pruning;
//!   pure logic, no I/O dependencies
//! - **Ports Layer** (`ports/`): inbound API trait, outbound transport trait
//! - **Adapters Layer** (`adapters/`): query-parameter encoding, user-sync
//!   pixel registration
//! - **Application Layer** (`application/`): one-cycle orchestration

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;

// Re-export main types for convenience
pub use adapters::{encode_bid_request, sync_pixels};
pub use application::AuctionService;
pub use config::EndpointConfig;
pub use domain::{
    AuctionCycleError, BidRequestPayload, BidsIndex, EncodeError, GroupId, IndexBuilder,
    MatchDiagnostic, MatchOutcome, PendingRequest, PlacementGroup, ResponseMatcher, TransportError,
};
pub use ports::{BidTransport, HeaderAuctionApi};
