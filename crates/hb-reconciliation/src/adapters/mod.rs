//! Adapters: the straight-line glue around the engine, outbound payload
//! encoding and user-sync pixel registration.

pub mod payload;
pub mod user_sync;

pub use payload::encode_bid_request;
pub use user_sync::sync_pixels;
