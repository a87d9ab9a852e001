//! Cross-layer auction cycle flows.

pub mod flows;
