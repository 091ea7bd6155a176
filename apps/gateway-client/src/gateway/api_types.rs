//! Typed JSON envelopes for the gateway API.
//!
//! Fields this core does not interpret are carried through untouched in the
//! `extra` map of each envelope.

use serde::{Deserialize, Serialize};

use crate::result::OfferOutcome;

/// Reply to a synchronous transaction submission.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SubmitTransactionResponse {
    /// Transaction hash.
    pub hash: Option<String>,
    /// Ledger the transaction was recorded in.
    pub ledger: Option<u64>,
    /// Whether the transaction succeeded.
    pub successful: Option<bool>,
    /// Base64 envelope echoed back by the gateway.
    pub envelope_xdr: Option<String>,
    /// Base64 binary result, decoded into [`Self::offer_results`] when
    /// present.
    pub result_xdr: Option<String>,
    /// Base64 binary result metadata (not decoded by this core).
    pub result_meta_xdr: Option<String>,
    /// Fields this core treats as opaque.
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
    /// Per-operation offer outcomes; `None` when the transaction contained
    /// no manage-offer operations or no per-operation results exist.
    #[serde(skip)]
    pub offer_results: Option<Vec<OfferOutcome>>,
}

/// Reply to an asynchronous transaction submission.
///
/// The async path relays the network's response; nothing here is decoded.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AsyncSubmitResponse {
    /// Relay status reported by the network.
    pub tx_status: Option<String>,
    /// Transaction hash.
    pub hash: Option<String>,
    /// Fields this core treats as opaque.
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

/// Reply from the fee-stats resource.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FeeStatsResponse {
    /// Base fee of the last closed ledger, rendered as a string.
    pub last_ledger_base_fee: Option<String>,
    /// Fields this core treats as opaque.
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

/// Validity window for a transaction, in seconds since the epoch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Timebounds {
    /// Earliest valid time (always zero here).
    pub min_time: u64,
    /// Latest valid time.
    pub max_time: u64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn submit_response_captures_unknown_fields() {
        let json = serde_json::json!({
            "hash": "abc",
            "ledger": 12345,
            "successful": true,
            "result_xdr": "AAAA",
            "paging_token": "12345-1",
        });
        let response: SubmitTransactionResponse = serde_json::from_value(json).unwrap();
        assert_eq!(response.hash.as_deref(), Some("abc"));
        assert_eq!(response.ledger, Some(12345));
        assert!(response.extra.contains_key("paging_token"));
        assert!(response.offer_results.is_none());
    }

    #[test]
    fn async_response_is_opaque() {
        let json = serde_json::json!({
            "tx_status": "PENDING",
            "hash": "def",
            "error_result_xdr": null,
        });
        let response: AsyncSubmitResponse = serde_json::from_value(json).unwrap();
        assert_eq!(response.tx_status.as_deref(), Some("PENDING"));
        assert!(response.extra.contains_key("error_result_xdr"));
    }

    #[test]
    fn fee_stats_tolerates_missing_base_fee() {
        let response: FeeStatsResponse =
            serde_json::from_value(serde_json::json!({"fee_charged": {}})).unwrap();
        assert!(response.last_ledger_base_fee.is_none());
    }
}
