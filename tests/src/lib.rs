//! # Hivebid Test Suite
//!
//! Unified test crate containing cross-layer flows that exercise the
//! reconciliation subsystem through its public ports, from raw upstream
//! JSON to normalized bids.
//!
//! ## Running Tests
//!
//! ```bash
//! # All tests
//! cargo test -p hb-tests
//!
//! # By category
//! cargo test -p hb-tests integration::
//! ```

#![allow(dead_code)]

pub mod integration;
