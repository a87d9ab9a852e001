//! Outbound payload encoding.
//!
//! Serializes the payload produced by the index builder into the endpoint's
//! GET query parameters: joined auction identifiers, joined distinct
//! size-keys, the batch price mode, and the caller's pass-through fields.
//! Empty optional parameters are skipped rather than sent blank.

use crate::config::EndpointConfig;
use crate::domain::errors::EncodeError;
use crate::domain::index::BidRequestPayload;
use shared_types::EncodedBidRequest;
use url::Url;

/// Encodes one cycle's payload against the configured endpoint.
pub fn encode_bid_request(
    payload: &BidRequestPayload,
    config: &EndpointConfig,
) -> Result<EncodedBidRequest, EncodeError> {
    let mut url = Url::parse(&config.endpoint_url)
        .map_err(|_| EncodeError::InvalidEndpoint(config.endpoint_url.clone()))?;

    {
        let mut pairs = url.query_pairs_mut();
        pairs.append_pair("auids", &payload.auction_ids.join(","));
        let size_keys: Vec<&str> = payload.size_keys.iter().map(String::as_str).collect();
        pairs.append_pair("sizes", &size_keys.join(","));
        pairs.append_pair("pt", payload.price_mode.as_str());

        if let Some(page_url) = payload.page_url.as_deref().filter(|u| !u.is_empty()) {
            pairs.append_pair("u", page_url);
        }
        if let Some(timeout_ms) = payload.timeout_ms {
            pairs.append_pair("wtimeout", &timeout_ms.to_string());
        }
        if let Some(applies) = payload.consent.gdpr_applies {
            pairs.append_pair("gdpr", if applies { "1" } else { "0" });
        }
        if let Some(consent) = payload
            .consent
            .consent_string
            .as_deref()
            .filter(|c| !c.is_empty())
        {
            pairs.append_pair("gdpr_consent", consent);
        }
    }

    Ok(EncodedBidRequest {
        url: url.as_str().to_owned(),
    })
}
