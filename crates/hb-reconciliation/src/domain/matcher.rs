//! # Response Matcher
//!
//! Walks the upstream response's bid groups, assigns each usable bid to
//! exactly one waiting placement through the reverse index, and tears down
//! index structure as placements are satisfied.
//!
//! ## Two-Pass Ordering
//!
//! Exact-size matches are exhausted across the *entire* response before any
//! fallback runs: the primary sweep handles exact buckets and defers bids
//! whose exact size has no bucket; the fallback sweep then re-runs the
//! deferred bids with the size-agnostic rule. This is a global ordering
//! constraint, implemented as two sequential sweeps over an explicit
//! deferred buffer, never as per-bid interleaved logic.
//!
//! ## Diagnostics
//!
//! Nothing here aborts interpretation. Every malformed or unmatched bid
//! becomes a [`MatchDiagnostic`]; the collected diagnostics are logged after
//! the walk completes and returned to the caller alongside the results.

use super::diagnostics::{raw_payload, MatchDiagnostic};
use super::index::BidsIndex;
use shared_types::{
    AdSize, BidResponseBody, NormalizedBid, PriceMode, ServerBid, BID_TTL_SECS, DEFAULT_CURRENCY,
};
use tracing::{debug, warn};

/// Outcome of interpreting one upstream response.
#[derive(Debug, Default)]
pub struct MatchOutcome {
    /// Normalized bids, in emission order.
    pub bids: Vec<NormalizedBid>,
    /// Non-fatal conditions recorded during the walk.
    pub diagnostics: Vec<MatchDiagnostic>,
}

/// What a single matching attempt did with a bid.
enum MatchStep {
    Matched,
    Discarded,
    Deferred,
}

/// Consumes a cycle's [`BidsIndex`] against the inbound response.
pub struct ResponseMatcher;

impl ResponseMatcher {
    /// Interprets a response body against the index built for the same
    /// cycle. Pure except for mutating the supplied index; never blocks.
    pub fn interpret(
        body: Option<BidResponseBody>,
        index: &mut BidsIndex,
        price_mode: PriceMode,
    ) -> MatchOutcome {
        let mut outcome = MatchOutcome::default();

        let seatbids = match body {
            None => {
                outcome.diagnostics.push(MatchDiagnostic::EmptyResponse);
                return Self::report(outcome);
            }
            Some(body) => match body.seatbid {
                None => {
                    outcome.diagnostics.push(MatchDiagnostic::EmptyResponse);
                    return Self::report(outcome);
                }
                Some(seatbids) if seatbids.is_empty() => {
                    outcome.diagnostics.push(MatchDiagnostic::EmptySeatbidList);
                    return Self::report(outcome);
                }
                Some(seatbids) => seatbids,
            },
        };

        // Primary sweep: exact sizes only, fallback disabled.
        let mut deferred: Vec<&ServerBid> = Vec::new();
        for seatbid in &seatbids {
            let Some(bid) = seatbid.bid.first() else {
                outcome.diagnostics.push(MatchDiagnostic::EmptyBidList {
                    seatbid: raw_payload(seatbid),
                });
                continue;
            };
            if let MatchStep::Deferred = Self::match_one(bid, index, price_mode, false, &mut outcome)
            {
                deferred.push(bid);
            }
        }

        // Fallback sweep over the deferred buffer.
        for bid in deferred {
            Self::match_one(bid, index, price_mode, true, &mut outcome);
        }

        Self::report(outcome)
    }

    /// Matching logic for a single bid, shared by both sweeps.
    fn match_one(
        bid: &ServerBid,
        index: &mut BidsIndex,
        price_mode: PriceMode,
        fallback: bool,
        outcome: &mut MatchOutcome,
    ) -> MatchStep {
        let Some(auction_id) = bid.auid.as_deref().filter(|auid| !auid.is_empty()) else {
            outcome.diagnostics.push(MatchDiagnostic::MissingAuctionId {
                bid: raw_payload(bid),
            });
            return MatchStep::Discarded;
        };
        let Some(ad_markup) = bid.adm.as_deref().filter(|adm| !adm.is_empty()) else {
            outcome.diagnostics.push(MatchDiagnostic::MissingAdMarkup {
                bid: raw_payload(bid),
            });
            return MatchStep::Discarded;
        };

        let exact_key = AdSize::new(bid.w, bid.h).key();
        let (has_exact, first_key) = match index.lookup(auction_id) {
            Some(buckets) => (
                buckets.contains_key(exact_key.as_str()),
                buckets.keys().next().cloned(),
            ),
            None => {
                outcome
                    .diagnostics
                    .push(Self::no_placement(auction_id, bid));
                return MatchStep::Discarded;
            }
        };

        let key = if has_exact {
            exact_key
        } else if !fallback {
            return MatchStep::Deferred;
        } else if let Some(first) = first_key {
            first
        } else {
            // Unreachable while the no-empty-bucket invariant holds.
            outcome
                .diagnostics
                .push(Self::no_placement(auction_id, bid));
            return MatchStep::Discarded;
        };

        let Some(group_id) = index.head_of(auction_id, &key) else {
            outcome
                .diagnostics
                .push(Self::no_placement(auction_id, bid));
            return MatchStep::Discarded;
        };
        let Some(pending) = index.consume_one(group_id) else {
            outcome
                .diagnostics
                .push(Self::no_placement(auction_id, bid));
            return MatchStep::Discarded;
        };
        debug!(
            auction_id,
            size_key = %key,
            request_id = %pending.request_id,
            declared_mode = %pending.price_mode,
            fallback,
            "[hb-recon] bid matched"
        );

        outcome.bids.push(NormalizedBid {
            request_id: pending.request_id,
            price: bid.price,
            width: bid.w,
            height: bid.h,
            ad_markup: ad_markup.to_owned(),
            currency: bid
                .cur
                .clone()
                .unwrap_or_else(|| DEFAULT_CURRENCY.to_owned()),
            price_mode,
            ttl_secs: BID_TTL_SECS,
            deal_id: bid.dealid.clone(),
        });
        index.prune_if_empty(group_id);
        MatchStep::Matched
    }

    fn no_placement(auction_id: &str, bid: &ServerBid) -> MatchDiagnostic {
        MatchDiagnostic::NoPlacementForAuctionId {
            auid: auction_id.to_owned(),
            bid: raw_payload(bid),
        }
    }

    /// Reports the collected diagnostics once the walk is complete.
    fn report(outcome: MatchOutcome) -> MatchOutcome {
        for diagnostic in &outcome.diagnostics {
            warn!(diagnostic = %diagnostic, "[hb-recon] discarded during reconciliation");
        }
        outcome
    }
}
