//! 채권 수익률 분석 파이프라인.
//!
//! 종목 참조 데이터 조회 → 시세 수집 → 병합 → 수익률 계산 → 정렬 순서로 실행합니다.

use std::sync::Arc;
use std::time::Instant;

use amx_core::{analysis_span, ranked, AppConfig, Bond};
use chrono::NaiveDate;
use tracing::{info, Instrument};

use crate::error::Result;
use crate::merge::{merge_bonds, InstrumentIndex};
use crate::provider::BondDataProvider;
use crate::source::{
    AcquisitionMode, ExhaustiveSource, MarketDataSource, SameDaySource,
    DEFAULT_HISTORY_CONCURRENCY,
};
use crate::stats::AnalysisStats;

/// 기본 시장 유형.
pub const DEFAULT_MARKET_TYPE: &str = "corporate_bonds";

/// 통화 하나에 대한 분석 결과.
#[derive(Debug, Clone)]
pub struct AnalysisReport {
    /// 대상 통화
    pub currency: String,
    /// 수익률 계산 기준일
    pub as_of: NaiveDate,
    /// 일본식 수익률 내림차순으로 정렬된 채권 목록
    pub bonds: Vec<Bond>,
    /// 실행 통계
    pub stats: AnalysisStats,
}

/// 채권 수익률 분석기.
pub struct BondAnalyzer {
    provider: Arc<dyn BondDataProvider>,
    market_type: String,
    history_concurrency: usize,
}

impl BondAnalyzer {
    pub fn new(provider: Arc<dyn BondDataProvider>) -> Self {
        Self {
            provider,
            market_type: DEFAULT_MARKET_TYPE.to_string(),
            history_concurrency: DEFAULT_HISTORY_CONCURRENCY,
        }
    }

    /// 설정의 시장 유형과 동시 조회 수를 사용합니다.
    pub fn from_config(provider: Arc<dyn BondDataProvider>, config: &AppConfig) -> Self {
        Self::new(provider)
            .with_market_type(config.api.market_type.clone())
            .with_history_concurrency(config.analysis.history_concurrency)
    }

    pub fn with_market_type(mut self, market_type: impl Into<String>) -> Self {
        self.market_type = market_type.into();
        self
    }

    pub fn with_history_concurrency(mut self, concurrency: usize) -> Self {
        self.history_concurrency = concurrency.max(1);
        self
    }

    /// 수집 방식에 맞는 시세 소스를 만듭니다.
    pub fn source(&self, mode: AcquisitionMode) -> Box<dyn MarketDataSource> {
        match mode {
            AcquisitionMode::SameDay => Box::new(SameDaySource::new(
                Arc::clone(&self.provider),
                self.market_type.clone(),
            )),
            AcquisitionMode::Exhaustive => Box::new(
                ExhaustiveSource::new(Arc::clone(&self.provider))
                    .with_concurrency(self.history_concurrency),
            ),
        }
    }

    /// 통화 하나를 분석합니다.
    ///
    /// 종목 참조 데이터나 당일 시장 데이터 조회 실패는 오류로 돌려줍니다.
    pub async fn analyze(
        &self,
        currency: &str,
        mode: AcquisitionMode,
        as_of: NaiveDate,
    ) -> Result<AnalysisReport> {
        let source = self.source(mode);
        self.analyze_with(source.as_ref(), currency, as_of).await
    }

    /// 지정한 시세 소스로 통화 하나를 분석합니다.
    pub async fn analyze_with(
        &self,
        source: &dyn MarketDataSource,
        currency: &str,
        as_of: NaiveDate,
    ) -> Result<AnalysisReport> {
        let mode = source.mode();
        async move {
            let start = Instant::now();
            let mut stats = AnalysisStats::new(currency, mode);

            let instruments = self.provider.fetch_instruments().await?;
            let index = InstrumentIndex::build(instruments, currency);
            info!(
                provider = self.provider.name(),
                instruments = index.len(),
                "종목 참조 데이터 로드"
            );

            let batch = source.collect(currency, &index).await?;
            let outcome = merge_bonds(batch.rows, as_of);
            let bonds = ranked(outcome.bonds);

            stats.total = bonds.len();
            stats.with_yield = bonds.iter().filter(|b| b.has_yield()).count();
            stats.skipped_missing_isin = index.skipped_missing_isin() + batch.skipped_missing_isin;
            stats.duplicates_dropped = index.duplicates_dropped() + outcome.duplicates_dropped;
            stats.history_failures = batch.fetch_failures;
            stats.elapsed = start.elapsed();
            stats.log_summary();

            Ok(AnalysisReport {
                currency: currency.to_string(),
                as_of,
                bonds,
                stats,
            })
        }
        .instrument(analysis_span!(currency, mode))
        .await
    }
}
