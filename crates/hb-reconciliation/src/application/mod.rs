//! Application layer: orchestrates one auction cycle over the ports.

pub mod service;

pub use service::AuctionService;
