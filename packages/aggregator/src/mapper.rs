//! Transaction Mapper
//!
//! Turns each raw explorer transaction into exactly one decoded attestation
//! record: article URL, grouping key and feedback polarity.

use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};

use crate::classifier::{classify_feedback, FeedbackType};
use crate::decoder::{decode_article_url, PayloadLayout};
use crate::normalizer::normalize_url;
use crate::source::RawTransaction;

/// Decoded attestation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DecodedRecord {
    pub tx_hash: String,
    pub block_number: u64,
    pub from: String,
    /// ISO-8601 UTC timestamp with millisecond precision
    pub timestamp: String,
    /// Decoded URL or `"Unknown Page"`
    pub article_page: String,
    /// Grouping key
    #[serde(rename = "normalizedURL")]
    pub normalized_url: String,
    pub feedback_type: FeedbackType,
}

/// Format unix seconds as an ISO-8601 string (`2024-01-01T00:00:00.000Z`)
///
/// Values outside the representable range fall back to the unix epoch.
pub fn iso_timestamp(unix_secs: u64) -> String {
    let dt = i64::try_from(unix_secs)
        .ok()
        .and_then(|secs| DateTime::<Utc>::from_timestamp(secs, 0))
        .unwrap_or(DateTime::<Utc>::UNIX_EPOCH);
    dt.to_rfc3339_opts(SecondsFormat::Millis, true)
}

/// Map one raw transaction to its decoded record
pub fn map_transaction(tx: &RawTransaction, layout: &PayloadLayout) -> DecodedRecord {
    let article_page = decode_article_url(&tx.input, layout);
    let feedback_type = classify_feedback(&tx.input, layout);
    let normalized_url = normalize_url(&article_page);

    DecodedRecord {
        tx_hash: tx.hash.clone(),
        block_number: tx.block_number,
        from: tx.from.clone(),
        timestamp: iso_timestamp(tx.time_stamp),
        article_page,
        normalized_url,
        feedback_type,
    }
}

/// Map a batch, preserving order
pub fn map_transactions(txs: &[RawTransaction], layout: &PayloadLayout) -> Vec<DecodedRecord> {
    txs.iter().map(|tx| map_transaction(tx, layout)).collect()
}
