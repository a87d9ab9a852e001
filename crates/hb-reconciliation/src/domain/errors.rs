//! Error types for the reconciliation subsystem.
//!
//! The matching engine itself has no fatal error class: malformed bids
//! become diagnostics and the engine always returns whatever it assembled.
//! The types here cover the faults around the engine, at the transport and
//! encoding boundaries.

use thiserror::Error;

/// Failure reported by the transport collaborator.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{0}")]
pub struct TransportError(pub String);

/// Outbound payload rejected by the encoder.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EncodeError {
    /// The configured endpoint URL did not parse.
    #[error("endpoint URL `{0}` is not parseable")]
    InvalidEndpoint(String),
}

/// A fault that aborts one auction cycle before results could be assembled.
#[derive(Debug, Error)]
pub enum AuctionCycleError {
    #[error("transport failure: {0}")]
    Transport(#[from] TransportError),

    #[error("outbound encoding failed: {0}")]
    Encode(#[from] EncodeError),
}
