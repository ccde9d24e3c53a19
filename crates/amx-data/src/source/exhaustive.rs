//! 종목별 최근 시세 기반 소스.

use std::sync::Arc;

use async_trait::async_trait;
use futures::stream::{self, StreamExt};
use tracing::{debug, warn};

use super::{AcquisitionMode, MarketDataSource, SourceBatch};
use crate::error::Result;
use crate::merge::{InstrumentIndex, MergeRow};
use crate::provider::{BondDataProvider, InstrumentRecord, MarketQuote};

/// 기본 동시 조회 수.
pub const DEFAULT_HISTORY_CONCURRENCY: usize = 4;

/// 통화별 모든 종목에 대해 가장 최근 과거 시세를 조회합니다.
///
/// 조회는 최대 `concurrency`개까지 동시에 진행하며 결과는 종목 순서대로 모읍니다.
/// 조회에 실패한 종목은 시세 없이 포함됩니다.
pub struct ExhaustiveSource {
    provider: Arc<dyn BondDataProvider>,
    concurrency: usize,
}

impl ExhaustiveSource {
    pub fn new(provider: Arc<dyn BondDataProvider>) -> Self {
        Self {
            provider,
            concurrency: DEFAULT_HISTORY_CONCURRENCY,
        }
    }

    /// 동시 조회 수를 설정합니다 (최소 1).
    pub fn with_concurrency(mut self, concurrency: usize) -> Self {
        self.concurrency = concurrency.max(1);
        self
    }
}

#[async_trait]
impl MarketDataSource for ExhaustiveSource {
    fn mode(&self) -> AcquisitionMode {
        AcquisitionMode::Exhaustive
    }

    async fn collect(&self, _currency: &str, index: &InstrumentIndex) -> Result<SourceBatch> {
        let targets: Vec<(String, InstrumentRecord)> = index
            .iter()
            .map(|(isin, instrument)| (isin.to_string(), instrument.clone()))
            .collect();

        let fetched: Vec<(MergeRow, bool)> = stream::iter(targets)
            .map(|(isin, instrument)| {
                let provider = Arc::clone(&self.provider);
                async move {
                    match provider.fetch_latest_snapshot(&isin).await {
                        Ok(snapshot) => {
                            let quote = snapshot.map(MarketQuote::from);
                            (MergeRow::new(isin, Some(instrument), quote), false)
                        }
                        Err(e) => {
                            warn!(
                                isin = %isin,
                                error = %e,
                                retryable = e.is_retryable(),
                                "과거 시세 조회 실패, 시세 없이 진행"
                            );
                            (MergeRow::new(isin, Some(instrument), None), true)
                        }
                    }
                }
            })
            .buffered(self.concurrency)
            .collect()
            .await;

        let mut batch = SourceBatch::default();
        for (row, failed) in fetched {
            if failed {
                batch.fetch_failures += 1;
            }
            batch.rows.push(row);
        }

        debug!(
            instruments = index.len(),
            failures = batch.fetch_failures,
            concurrency = self.concurrency,
            "종목별 과거 시세 수집"
        );

        Ok(batch)
    }
}
