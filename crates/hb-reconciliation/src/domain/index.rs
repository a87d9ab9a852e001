//! # Reverse Bid Index
//!
//! Implements the per-cycle reverse index from (auction-identifier, size-key)
//! to the placements waiting on that combination, plus the builder that
//! populates it from a validated request batch.
//!
//! ## Data Structures
//!
//! - `groups`: arena of `PlacementGroup`s; a `GroupId` is an arena index and
//!   is the identity used for bucket membership and removal
//! - `by_auction`: auction-identifier → size-key → ordered occupant list
//!
//! ## Invariants Enforced
//!
//! - An outer key exists iff at least one non-empty bucket exists under it
//! - A bucket exists iff it holds at least one occupant
//! - Bucket and size-key iteration order is insertion order; the fallback
//!   pass depends on it, so nothing here reorders surviving keys
//! - Back-references mirror bucket occupancy exactly: one entry per insertion

use indexmap::{IndexMap, IndexSet};
use shared_types::{AuctionContext, ConsentData, PlacementRequest, PriceMode, SizeKey};
use std::collections::{HashMap, VecDeque};
use tracing::debug;

/// Arena handle for a placement group within one cycle's index.
pub type GroupId = usize;

/// One pending request record: the queue slot a matched bid consumes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingRequest {
    /// Identifier returned to the caller on the matched bid.
    pub request_id: String,
    /// The accounting mode this request declared (the batch-wide mode is
    /// what gets emitted; the declaration feeds the batch decision).
    pub price_mode: PriceMode,
}

/// The set of pending requests for one placement, consumed in FIFO order.
#[derive(Debug)]
pub struct PlacementGroup {
    pub placement_id: String,
    queue: VecDeque<PendingRequest>,
    /// (auction-identifier, size-key) of every bucket this group occupies.
    back_refs: Vec<(String, SizeKey)>,
}

impl PlacementGroup {
    fn new(placement_id: String) -> Self {
        Self {
            placement_id,
            queue: VecDeque::new(),
            back_refs: Vec::new(),
        }
    }

    /// Number of requests still waiting on this placement.
    pub fn pending(&self) -> usize {
        self.queue.len()
    }

    /// True once every pending request has been consumed.
    pub fn is_drained(&self) -> bool {
        self.queue.is_empty()
    }
}

/// The outbound payload skeleton produced alongside the index.
///
/// Carries everything the payload encoder needs: the per-request identifier
/// list in input order, the distinct size-key set, the batch price mode, and
/// the caller's pass-through fields.
#[derive(Debug, Clone)]
pub struct BidRequestPayload {
    /// Auction identifiers, one per accepted request, in input order.
    pub auction_ids: Vec<String>,
    /// Distinct size-keys across the whole batch, insertion-ordered.
    pub size_keys: IndexSet<SizeKey>,
    /// Gross if any request declared gross, net otherwise.
    pub price_mode: PriceMode,
    pub page_url: Option<String>,
    pub timeout_ms: Option<u64>,
    pub consent: ConsentData,
}

/// Mutable reverse index owned by exactly one request/response cycle.
#[derive(Debug, Default)]
pub struct BidsIndex {
    groups: Vec<PlacementGroup>,
    by_auction: IndexMap<String, IndexMap<SizeKey, Vec<GroupId>>>,
}

impl BidsIndex {
    /// True when no auction identifier has any waiting placement.
    pub fn is_empty(&self) -> bool {
        self.by_auction.is_empty()
    }

    /// Number of auction identifiers with at least one waiting placement.
    pub fn len(&self) -> usize {
        self.by_auction.len()
    }

    /// Size-key buckets registered under an auction identifier.
    pub fn lookup(&self, auction_id: &str) -> Option<&IndexMap<SizeKey, Vec<GroupId>>> {
        self.by_auction.get(auction_id)
    }

    /// The group a consumed match should be taken from: head of the bucket.
    /// The head is not removed from the list here; removal happens only when
    /// the group drains and is pruned.
    pub fn head_of(&self, auction_id: &str, key: &str) -> Option<GroupId> {
        self.by_auction
            .get(auction_id)
            .and_then(|buckets| buckets.get(key))
            .and_then(|occupants| occupants.first().copied())
    }

    /// First size-key registered under an auction identifier, in insertion
    /// order. This is the fallback bucket choice.
    pub fn first_key_of(&self, auction_id: &str) -> Option<SizeKey> {
        self.by_auction
            .get(auction_id)
            .and_then(|buckets| buckets.keys().next().cloned())
    }

    /// Read access to a group, primarily for logging and assertions.
    pub fn group(&self, id: GroupId) -> Option<&PlacementGroup> {
        self.groups.get(id)
    }

    /// Dequeues the oldest pending request of a group.
    pub fn consume_one(&mut self, id: GroupId) -> Option<PendingRequest> {
        self.groups.get_mut(id).and_then(|group| group.queue.pop_front())
    }

    /// Retires a drained group from every bucket it occupies.
    ///
    /// Walks the full back-reference list, never stopping at the first hit: a
    /// group registered under several size-keys must leave all of them
    /// together. Emptied buckets and emptied outer entries are deleted;
    /// surviving keys keep their order.
    pub fn prune_if_empty(&mut self, id: GroupId) {
        let Some(group) = self.groups.get_mut(id) else {
            return;
        };
        if !group.queue.is_empty() {
            return;
        }
        let back_refs = std::mem::take(&mut group.back_refs);
        debug!(
            placement = %group.placement_id,
            buckets = back_refs.len(),
            "[hb-recon] retiring drained placement group"
        );
        for (auction_id, key) in back_refs {
            let Some(buckets) = self.by_auction.get_mut(&auction_id) else {
                continue;
            };
            if let Some(occupants) = buckets.get_mut(&key) {
                occupants.retain(|occupant| *occupant != id);
                if occupants.is_empty() {
                    buckets.shift_remove(&key);
                }
            }
            if buckets.is_empty() {
                self.by_auction.shift_remove(&auction_id);
            }
        }
    }

    fn add_group(&mut self, placement_id: String) -> GroupId {
        self.groups.push(PlacementGroup::new(placement_id));
        self.groups.len() - 1
    }

    fn enqueue(&mut self, id: GroupId, pending: PendingRequest) {
        if let Some(group) = self.groups.get_mut(id) {
            group.queue.push_back(pending);
        }
    }

    fn insert_into_bucket(&mut self, auction_id: &str, key: SizeKey, id: GroupId) {
        self.by_auction
            .entry(auction_id.to_owned())
            .or_default()
            .entry(key.clone())
            .or_default()
            .push(id);
        if let Some(group) = self.groups.get_mut(id) {
            group.back_refs.push((auction_id.to_owned(), key));
        }
    }
}

/// Builds the reverse index and the outbound payload skeleton for one cycle.
///
/// Runs once per outbound request; the produced `BidsIndex` is carried
/// alongside the request and consumed by the matcher when the response
/// arrives.
pub struct IndexBuilder;

impl IndexBuilder {
    /// Indexes a validated request batch.
    ///
    /// Input order is preserved everywhere it matters: the identifier list,
    /// bucket occupancy, and each group's queue. An empty batch yields an
    /// empty payload and an empty index; the endpoint call still proceeds.
    pub fn build(
        requests: &[PlacementRequest],
        context: &AuctionContext,
    ) -> (BidRequestPayload, BidsIndex) {
        let mut index = BidsIndex::default();
        let mut auction_ids = Vec::with_capacity(requests.len());
        let mut size_keys = IndexSet::new();
        let mut price_mode = PriceMode::Net;
        let mut group_by_placement: HashMap<String, GroupId> = HashMap::new();

        for request in requests {
            auction_ids.push(request.auction_id.clone());
            if request.price_mode == PriceMode::Gross {
                price_mode = PriceMode::Gross;
            }

            let group_id = *group_by_placement
                .entry(request.placement_id.clone())
                .or_insert_with(|| index.add_group(request.placement_id.clone()));
            index.enqueue(
                group_id,
                PendingRequest {
                    request_id: request.request_id.clone(),
                    price_mode: request.price_mode,
                },
            );

            // One bucket insertion per distinct size-key of this request;
            // duplicates in the declared list collapse.
            let mut keys_of_request = IndexSet::new();
            for size in &request.sizes {
                let key = size.key();
                size_keys.insert(key.clone());
                if keys_of_request.insert(key.clone()) {
                    index.insert_into_bucket(&request.auction_id, key, group_id);
                }
            }
        }

        let payload = BidRequestPayload {
            auction_ids,
            size_keys,
            price_mode,
            page_url: context.page_url.clone(),
            timeout_ms: context.timeout_ms,
            consent: context.consent.clone(),
        };
        (payload, index)
    }
}
