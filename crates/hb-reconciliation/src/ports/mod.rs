//! Ports module: inbound (API) and outbound (SPI) port traits.

pub mod inbound;
pub mod outbound;

pub use inbound::HeaderAuctionApi;
pub use outbound::BidTransport;
