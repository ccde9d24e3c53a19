//! 인메모리 Provider.
//!
//! 미리 넣어 둔 레코드를 돌려주며, 지정한 요청을 실패시킬 수 있습니다.
//! 네트워크 없이 분석 파이프라인을 실행하거나 테스트할 때 사용합니다.

use std::collections::{HashMap, HashSet};
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;

use super::records::{HistoricalSnapshot, InstrumentRecord, MarketRecord};
use super::BondDataProvider;
use crate::error::{DataError, Result};

/// 고정 레코드 기반 Provider.
#[derive(Debug, Default)]
pub struct InMemoryProvider {
    instruments: Vec<InstrumentRecord>,
    market: Vec<MarketRecord>,
    history: HashMap<String, Vec<HistoricalSnapshot>>,
    failing_history: HashSet<String>,
    fail_instruments: bool,
    fail_market: bool,
    history_calls: AtomicUsize,
}

impl InMemoryProvider {
    /// 빈 Provider를 생성합니다.
    pub fn new() -> Self {
        Self::default()
    }

    /// 종목 참조 레코드를 설정합니다.
    pub fn with_instruments(mut self, instruments: Vec<InstrumentRecord>) -> Self {
        self.instruments = instruments;
        self
    }

    /// 당일 시장 데이터 행을 설정합니다.
    pub fn with_market(mut self, market: Vec<MarketRecord>) -> Self {
        self.market = market;
        self
    }

    /// 종목의 과거 시세를 추가합니다.
    pub fn with_history(
        mut self,
        isin: impl Into<String>,
        snapshots: Vec<HistoricalSnapshot>,
    ) -> Self {
        self.history.insert(isin.into(), snapshots);
        self
    }

    /// 해당 종목의 과거 시세 요청을 실패시킵니다.
    pub fn with_failing_history(mut self, isin: impl Into<String>) -> Self {
        self.failing_history.insert(isin.into());
        self
    }

    /// 종목 참조 데이터 요청을 실패시킵니다.
    pub fn failing_instruments(mut self) -> Self {
        self.fail_instruments = true;
        self
    }

    /// 당일 시장 데이터 요청을 실패시킵니다.
    pub fn failing_market(mut self) -> Self {
        self.fail_market = true;
        self
    }

    /// 지금까지의 과거 시세 요청 횟수.
    pub fn history_calls(&self) -> usize {
        self.history_calls.load(Ordering::Relaxed)
    }
}

#[async_trait]
impl BondDataProvider for InMemoryProvider {
    fn name(&self) -> &str {
        "memory"
    }

    async fn fetch_instruments(&self) -> Result<Vec<InstrumentRecord>> {
        if self.fail_instruments {
            return Err(DataError::Network("instruments unavailable".to_string()));
        }
        Ok(self.instruments.clone())
    }

    async fn fetch_market_snapshot(&self, market_type: &str) -> Result<Vec<MarketRecord>> {
        if self.fail_market {
            return Err(DataError::Http {
                status: 503,
                url: format!("memory://getMarketData/{}", market_type),
                body: String::new(),
            });
        }
        Ok(self.market.clone())
    }

    async fn fetch_instrument_history(&self, isin: &str) -> Result<Vec<HistoricalSnapshot>> {
        self.history_calls.fetch_add(1, Ordering::Relaxed);

        if self.failing_history.contains(isin) {
            return Err(DataError::Fetch(format!("history unavailable for {}", isin)));
        }
        Ok(self.history.get(isin).cloned().unwrap_or_default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use amx_core::RawNumber;

    #[tokio::test]
    async fn test_latest_snapshot_default_method() {
        let provider = InMemoryProvider::new().with_history(
            "AM1",
            vec![
                HistoricalSnapshot {
                    order_date: Some("2024-01-05".to_string()),
                    best_ask: Some(RawNumber::from(95.0)),
                    ..Default::default()
                },
                HistoricalSnapshot {
                    order_date: Some("2024-02-01".to_string()),
                    best_ask: Some(RawNumber::from(96.0)),
                    ..Default::default()
                },
            ],
        );

        let latest = provider.fetch_latest_snapshot("AM1").await.unwrap().unwrap();
        assert_eq!(latest.order_date.as_deref(), Some("2024-02-01"));

        assert!(provider.fetch_latest_snapshot("AM2").await.unwrap().is_none());
        assert_eq!(provider.history_calls(), 2);
    }

    #[tokio::test]
    async fn test_failure_switches() {
        let provider = InMemoryProvider::new()
            .failing_instruments()
            .failing_market()
            .with_failing_history("AM1");

        assert!(provider.fetch_instruments().await.is_err());
        assert!(provider.fetch_market_snapshot("corporate_bonds").await.is_err());
        assert!(provider.fetch_instrument_history("AM1").await.is_err());
    }
}
