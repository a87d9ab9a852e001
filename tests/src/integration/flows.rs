//! # Integration Test Flows
//!
//! Exercises a full auction cycle through the public port surface: placement
//! requests in, raw upstream JSON through a mock transport, normalized bids
//! out. The upstream body is always parsed from literal JSON so the wire
//! layer is part of every flow.

#[cfg(test)]
mod tests {
    use std::sync::{Arc, Mutex};

    use hb_reconciliation::ports::inbound::HeaderAuctionApi;
    use hb_reconciliation::ports::outbound::BidTransport;
    use hb_reconciliation::{AuctionService, EndpointConfig, TransportError};
    use shared_types::{
        AdSize, AuctionContext, BidResponseBody, ConsentData, EncodedBidRequest, NormalizedBid,
        PlacementRequest, PriceMode, BID_TTL_SECS,
    };

    // =============================================================================
    // TEST FIXTURES
    // =============================================================================

    /// Transport that records the dispatched URL and replays raw JSON.
    /// Clones share the recorder, so a test can keep a probe handle while
    /// the service owns the transport.
    #[derive(Clone)]
    struct RecordingTransport {
        raw_body: Option<&'static str>,
        dispatched_url: Arc<Mutex<Option<String>>>,
    }

    impl RecordingTransport {
        fn replaying(raw_body: &'static str) -> Self {
            Self {
                raw_body: Some(raw_body),
                dispatched_url: Arc::new(Mutex::new(None)),
            }
        }

        fn silent() -> Self {
            Self {
                raw_body: None,
                dispatched_url: Arc::new(Mutex::new(None)),
            }
        }

        fn dispatched_query(&self) -> std::collections::HashMap<String, String> {
            let url = self
                .dispatched_url
                .lock()
                .unwrap()
                .clone()
                .expect("no request dispatched");
            url::Url::parse(&url)
                .unwrap()
                .query_pairs()
                .map(|(k, v)| (k.into_owned(), v.into_owned()))
                .collect()
        }
    }

    #[async_trait::async_trait]
    impl BidTransport for RecordingTransport {
        async fn fetch(
            &self,
            request: &EncodedBidRequest,
        ) -> Result<Option<BidResponseBody>, TransportError> {
            *self.dispatched_url.lock().unwrap() = Some(request.url.clone());
            match self.raw_body {
                Some(raw) => {
                    let body = serde_json::from_str(raw)
                        .map_err(|e| TransportError(format!("bad fixture: {e}")))?;
                    Ok(Some(body))
                }
                None => Ok(None),
            }
        }
    }

    fn request(
        placement: &str,
        req: &str,
        auid: &str,
        sizes: &[(u32, u32)],
        price_mode: PriceMode,
    ) -> PlacementRequest {
        PlacementRequest {
            placement_id: placement.into(),
            request_id: req.into(),
            auction_id: auid.into(),
            sizes: sizes.iter().map(|&(w, h)| AdSize::new(w, h)).collect(),
            price_mode,
        }
    }

    fn by_request_id(bids: &[NormalizedBid]) -> std::collections::HashMap<String, NormalizedBid> {
        bids.iter()
            .map(|bid| (bid.request_id.clone(), bid.clone()))
            .collect()
    }

    // =============================================================================
    // FULL CYCLE FLOWS
    // =============================================================================

    /// The two-slot worked example, end to end: slotA declares 300x250,
    /// slotB declares 300x250 and 728x90, both under auction id "123".
    #[tokio::test]
    async fn test_two_slot_cycle_assigns_each_bid_once() {
        let transport = RecordingTransport::replaying(
            r#"{
                "seatbid": [
                    {"bid": [{"auid": "123", "adm": "<a/>", "price": 1.5, "w": 300, "h": 250}]},
                    {"bid": [{"auid": "123", "adm": "<b/>", "price": 2.0, "w": 728, "h": 90}]}
                ]
            }"#,
        );
        let service = AuctionService::new(EndpointConfig::default(), transport);

        let bids = service
            .run_auction(
                vec![
                    request("slotA", "rA", "123", &[(300, 250)], PriceMode::Net),
                    request("slotB", "rB", "123", &[(300, 250), (728, 90)], PriceMode::Net),
                ],
                AuctionContext::default(),
            )
            .await
            .unwrap();

        assert_eq!(bids.len(), 2);
        let bids = by_request_id(&bids);
        // First-registered 300x250 placement (slotA) wins the 300x250 bid.
        assert_eq!(bids["rA"].price, 1.5);
        assert_eq!((bids["rA"].width, bids["rA"].height), (300, 250));
        assert_eq!(bids["rB"].price, 2.0);
        assert_eq!((bids["rB"].width, bids["rB"].height), (728, 90));
        assert!(bids.values().all(|bid| bid.ttl_secs == BID_TTL_SECS));
    }

    /// A bid at an undeclared size reaches its placement on the fallback
    /// pass, after exact matches were exhausted response-wide.
    #[tokio::test]
    async fn test_fallback_cycle_matches_off_size_bid() {
        let transport = RecordingTransport::replaying(
            r#"{"seatbid": [{"bid": [{"auid": "77", "adm": "<x/>", "price": 0.8, "w": 970, "h": 250}]}]}"#,
        );
        let service = AuctionService::new(EndpointConfig::default(), transport);

        let bids = service
            .run_auction(
                vec![request("tower", "r1", "77", &[(160, 600)], PriceMode::Net)],
                AuctionContext::default(),
            )
            .await
            .unwrap();

        assert_eq!(bids.len(), 1);
        assert_eq!(bids[0].request_id, "r1");
        assert_eq!((bids[0].width, bids[0].height), (970, 250));
    }

    /// `{}` from upstream: empty result set, no error, nothing consumed.
    #[tokio::test]
    async fn test_empty_object_body_yields_no_bids() {
        let transport = RecordingTransport::replaying("{}");
        let service = AuctionService::new(EndpointConfig::default(), transport);

        let bids = service
            .run_auction(
                vec![request("slotA", "rA", "123", &[(300, 250)], PriceMode::Net)],
                AuctionContext::default(),
            )
            .await
            .unwrap();
        assert!(bids.is_empty());
    }

    /// A transport that produced no body at all behaves the same way.
    #[tokio::test]
    async fn test_missing_body_yields_no_bids() {
        let service = AuctionService::new(EndpointConfig::default(), RecordingTransport::silent());
        let bids = service
            .run_auction(
                vec![request("slotA", "rA", "123", &[(300, 250)], PriceMode::Net)],
                AuctionContext::default(),
            )
            .await
            .unwrap();
        assert!(bids.is_empty());
    }

    /// Bids for identifiers nobody requested are dropped without affecting
    /// the rest of the response.
    #[tokio::test]
    async fn test_unrequested_identifier_does_not_poison_the_cycle() {
        let transport = RecordingTransport::replaying(
            r#"{
                "seatbid": [
                    {"bid": [{"auid": "999", "adm": "<x/>", "price": 9.0, "w": 300, "h": 250}]},
                    {"bid": [{"auid": "123", "adm": "<a/>", "price": 1.0, "w": 300, "h": 250}]}
                ]
            }"#,
        );
        let service = AuctionService::new(EndpointConfig::default(), transport);

        let bids = service
            .run_auction(
                vec![request("slotA", "rA", "123", &[(300, 250)], PriceMode::Net)],
                AuctionContext::default(),
            )
            .await
            .unwrap();
        assert_eq!(bids.len(), 1);
        assert_eq!(bids[0].request_id, "rA");
    }

    // =============================================================================
    // OUTBOUND PAYLOAD FLOWS
    // =============================================================================

    /// The dispatched GET call carries the joined identifiers, the distinct
    /// size-key union, the batch price mode, and the pass-through context.
    #[tokio::test]
    async fn test_dispatched_query_reflects_the_batch() {
        let transport = RecordingTransport::replaying("{}");
        let probe = transport.clone();
        let config = EndpointConfig::default();
        let context = AuctionContext {
            page_url: Some("https://publisher.example/article".into()),
            timeout_ms: None,
            consent: ConsentData {
                gdpr_applies: Some(true),
                consent_string: Some("CONSENT-STRING".into()),
            },
            sync_enabled: false,
        };
        let service = AuctionService::new(config.clone(), transport);

        service
            .run_auction(
                vec![
                    request("a", "r1", "123", &[(300, 250), (728, 90)], PriceMode::Net),
                    request("b", "r2", "456", &[(728, 90)], PriceMode::Gross),
                ],
                context,
            )
            .await
            .unwrap();

        let query = probe.dispatched_query();
        assert_eq!(query["auids"], "123,456");
        assert_eq!(query["sizes"], "300x250,728x90");
        // One gross request flips the whole batch.
        assert_eq!(query["pt"], "gross");
        assert_eq!(query["u"], "https://publisher.example/article");
        // Caller set no timeout; the configured default goes upstream.
        assert_eq!(query["wtimeout"], config.default_timeout_ms.to_string());
        assert_eq!(query["gdpr"], "1");
        assert_eq!(query["gdpr_consent"], "CONSENT-STRING");
    }

    /// An empty request batch still dispatches, with empty identifier and
    /// size lists.
    #[tokio::test]
    async fn test_empty_batch_still_dispatches() {
        let transport = RecordingTransport::replaying("{}");
        let probe = transport.clone();
        let service = AuctionService::new(EndpointConfig::default(), transport);

        let bids = service
            .run_auction(vec![], AuctionContext::default())
            .await
            .unwrap();
        assert!(bids.is_empty());

        let query = probe.dispatched_query();
        assert_eq!(query["auids"], "");
        assert_eq!(query["sizes"], "");
    }

    // =============================================================================
    // USER SYNC FLOWS
    // =============================================================================

    #[test]
    fn test_sync_pixel_follows_caller_enablement() {
        let config = EndpointConfig::default();
        let service = AuctionService::new(config.clone(), RecordingTransport::silent());

        let disabled = AuctionContext::default();
        assert!(service.user_syncs(&disabled).is_empty());

        let enabled = AuctionContext {
            sync_enabled: true,
            ..Default::default()
        };
        let pixels = service.user_syncs(&enabled);
        assert_eq!(pixels.len(), 1);
        assert_eq!(pixels[0].url, config.sync_pixel_url);
    }
}
