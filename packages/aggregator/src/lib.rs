//! AttestScope Aggregator Library
//!
//! This crate decodes feedback attestations (article URL plus a
//! positive/negative flag) from on-chain transaction calldata and aggregates
//! them per article.

pub mod aggregator;
pub mod classifier;
pub mod config;
pub mod decoder;
pub mod mapper;
pub mod normalizer;
pub mod pipeline;
pub mod report;
pub mod source;
pub mod telemetry;

// Re-export commonly used types
pub use aggregator::{aggregate, ArticleAggregate, TransactionSummary};
pub use classifier::{classify_feedback, FeedbackType};
pub use decoder::{decode_article_url, PayloadLayout, UNKNOWN_PAGE};
pub use mapper::{map_transaction, DecodedRecord};
pub use normalizer::normalize_url;
pub use pipeline::{aggregate_transactions, fetch_article_aggregates};
pub use source::{ExplorerClient, ExplorerConfig, FetchError, RawTransaction, TransactionSource};
