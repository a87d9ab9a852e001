//! # Shared Types Crate
//!
//! This crate contains the auction entities exchanged between the embedding
//! auction framework and the reconciliation subsystem, plus the wire shapes
//! spoken by the upstream bidding endpoint.
//!
//! ## Design Principles
//!
//! - **Single Source of Truth**: every type that crosses the subsystem
//!   boundary is defined here.
//! - **Pass-through fidelity**: upstream fields (price, markup, deal, size)
//!   are carried verbatim; the subsystem never reinterprets them.
//! - **Presence over semantics**: identifiers are validated for presence
//!   only; their meaning belongs to the upstream endpoint.

pub mod entities;
pub mod wire;

pub use entities::*;
pub use wire::*;
