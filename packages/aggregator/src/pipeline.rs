//! Fetch → decode → aggregate.

use tracing::{error, info};

use crate::aggregator::{aggregate, ArticleAggregate};
use crate::decoder::PayloadLayout;
use crate::mapper::map_transactions;
use crate::source::{RawTransaction, TransactionSource};

/// Decode and aggregate an in-memory batch
pub fn aggregate_transactions(txs: &[RawTransaction], layout: &PayloadLayout) -> Vec<ArticleAggregate> {
    let records = map_transactions(txs, layout);
    aggregate(&records)
}

/// Fetch the current batch and aggregate it per article.
///
/// A failed fetch is logged and yields an empty list; there is no retry and
/// no partial aggregation.
pub async fn fetch_article_aggregates<S>(source: &S, layout: &PayloadLayout) -> Vec<ArticleAggregate>
where
    S: TransactionSource + ?Sized,
{
    let txs = match source.fetch_transactions().await {
        Ok(txs) => txs,
        Err(e) => {
            error!("Failed to fetch attestations: {}", e);
            return Vec::new();
        }
    };

    let aggregates = aggregate_transactions(&txs, layout);
    info!(
        "Aggregated {} transactions into {} articles",
        txs.len(),
        aggregates.len()
    );
    aggregates
}
