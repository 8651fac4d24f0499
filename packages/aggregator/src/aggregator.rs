//! Per-Article Aggregation
//!
//! Folds decoded attestations into one summary per normalized article URL.
//! Output order is the order in which each article first appears in the
//! input batch, which for the explorer is most recent first.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::classifier::FeedbackType;
use crate::mapper::DecodedRecord;

/// One attestation contributing to an article
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionSummary {
    pub tx_hash: String,
    pub from: String,
    pub timestamp: String,
    pub block_number: u64,
    pub feedback_type: FeedbackType,
}

impl From<&DecodedRecord> for TransactionSummary {
    fn from(record: &DecodedRecord) -> Self {
        Self {
            tx_hash: record.tx_hash.clone(),
            from: record.from.clone(),
            timestamp: record.timestamp.clone(),
            block_number: record.block_number,
            feedback_type: record.feedback_type,
        }
    }
}

/// Feedback totals for one article
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ArticleAggregate {
    /// Display URL, taken from the first record seen for the article
    pub article_page: String,
    pub positive_feedback: u64,
    pub negative_feedback: u64,
    pub transaction_count: u64,
    pub transactions: Vec<TransactionSummary>,
}

impl ArticleAggregate {
    fn new(article_page: String) -> Self {
        Self {
            article_page,
            positive_feedback: 0,
            negative_feedback: 0,
            transaction_count: 0,
            transactions: Vec::new(),
        }
    }

    fn push(&mut self, record: &DecodedRecord) {
        match record.feedback_type {
            FeedbackType::Positive => self.positive_feedback += 1,
            FeedbackType::Negative => self.negative_feedback += 1,
        }
        self.transactions.push(TransactionSummary::from(record));
        self.transaction_count = self.transactions.len() as u64;
    }
}

/// Group decoded records by normalized URL
///
/// # Returns
/// One aggregate per distinct `normalized_url`, in first-seen order
pub fn aggregate(records: &[DecodedRecord]) -> Vec<ArticleAggregate> {
    let mut aggregates: Vec<ArticleAggregate> = Vec::new();
    let mut index: HashMap<&str, usize> = HashMap::new();

    for record in records {
        let slot = *index.entry(record.normalized_url.as_str()).or_insert_with(|| {
            aggregates.push(ArticleAggregate::new(record.article_page.clone()));
            aggregates.len() - 1
        });
        aggregates[slot].push(record);
    }

    aggregates
}
