//! 당일 시장 데이터 기반 소스.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::debug;

use super::{AcquisitionMode, MarketDataSource, SourceBatch};
use crate::error::Result;
use crate::merge::{InstrumentIndex, MergeRow};
use crate::provider::{BondDataProvider, MarketQuote};

/// 오늘 거래된 종목의 시장 데이터를 기준으로 행을 만듭니다.
///
/// 오늘 거래가 없는 종목은 결과에 포함되지 않습니다.
pub struct SameDaySource {
    provider: Arc<dyn BondDataProvider>,
    market_type: String,
}

impl SameDaySource {
    pub fn new(provider: Arc<dyn BondDataProvider>, market_type: impl Into<String>) -> Self {
        Self {
            provider,
            market_type: market_type.into(),
        }
    }
}

#[async_trait]
impl MarketDataSource for SameDaySource {
    fn mode(&self) -> AcquisitionMode {
        AcquisitionMode::SameDay
    }

    async fn collect(&self, currency: &str, index: &InstrumentIndex) -> Result<SourceBatch> {
        let market = self.provider.fetch_market_snapshot(&self.market_type).await?;
        let fetched = market.len();
        let mut batch = SourceBatch::default();

        for record in market {
            if record.currency.as_deref() != Some(currency) {
                continue;
            }
            let Some(isin) = record.isin().map(str::to_string) else {
                batch.skipped_missing_isin += 1;
                continue;
            };
            let instrument = index.get(&isin).cloned();
            batch
                .rows
                .push(MergeRow::new(isin, instrument, Some(MarketQuote::from(record))));
        }

        debug!(
            market_type = %self.market_type,
            fetched,
            matched = batch.rows.len(),
            "당일 시장 데이터 수집"
        );

        Ok(batch)
    }
}
