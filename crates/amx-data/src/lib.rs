//! AMX 채권 데이터 수집과 분석.
//!
//! 이 crate는 다음을 제공합니다:
//! - AMX 공개 API 클라이언트와 인메모리 Provider
//! - 당일/전체 시세 수집 방식
//! - 종목 참조 데이터와 시세의 병합
//! - 통화별 분석 파이프라인과 실행 통계

pub mod analyzer;
pub mod error;
pub mod merge;
pub mod provider;
pub mod source;
pub mod stats;

pub use analyzer::{AnalysisReport, BondAnalyzer, DEFAULT_MARKET_TYPE};
pub use error::{DataError, Result};
pub use merge::{build_bond, merge_bonds, InstrumentIndex, MergeOutcome, MergeRow};
pub use provider::{
    AmxApiClient, BondDataProvider, HistoricalSnapshot, InMemoryProvider, InstrumentRecord,
    MarketQuote, MarketRecord,
};
pub use source::{AcquisitionMode, ExhaustiveSource, MarketDataSource, SameDaySource, SourceBatch};
pub use stats::AnalysisStats;
