//! 시세 수집 방식.
//!
//! - **당일(same-day)**: 오늘 거래된 종목의 시장 데이터 한 번 조회
//! - **전체(exhaustive)**: 통화별 모든 종목에 대해 최근 과거 시세를 개별 조회
//!
//! 두 방식 모두 [`MergeRow`] 목록을 만들어 같은 병합 루틴으로 넘깁니다.

mod exhaustive;
mod same_day;

use std::fmt;
use std::str::FromStr;

use async_trait::async_trait;

use crate::error::Result;
use crate::merge::{InstrumentIndex, MergeRow};

pub use exhaustive::{ExhaustiveSource, DEFAULT_HISTORY_CONCURRENCY};
pub use same_day::SameDaySource;

/// 시세 수집 방식.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AcquisitionMode {
    /// 당일 시장 데이터 (빠름, 거래된 종목만)
    #[default]
    SameDay,
    /// 종목별 최근 시세 (느림, 모든 종목)
    Exhaustive,
}

impl AcquisitionMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::SameDay => "same-day",
            Self::Exhaustive => "exhaustive",
        }
    }
}

impl fmt::Display for AcquisitionMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AcquisitionMode {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_lowercase().replace('_', "-").as_str() {
            "same-day" | "today" => Ok(Self::SameDay),
            "exhaustive" | "all" => Ok(Self::Exhaustive),
            _ => Err(format!(
                "Unknown acquisition mode: {} (expected same-day or exhaustive)",
                s
            )),
        }
    }
}

/// 소스가 만든 병합 행과 부가 통계.
#[derive(Debug, Clone, Default)]
pub struct SourceBatch {
    /// 입력 순서를 유지한 병합 행
    pub rows: Vec<MergeRow>,
    /// ISIN이 없어 제외된 시세 행 수
    pub skipped_missing_isin: usize,
    /// 실패한 종목별 조회 수
    pub fetch_failures: usize,
}

/// 통화 하나에 대한 병합 행을 만드는 시세 소스.
#[async_trait]
pub trait MarketDataSource: Send + Sync {
    /// 수집 방식.
    fn mode(&self) -> AcquisitionMode;

    /// 종목 참조 색인을 기준으로 병합 행을 수집합니다.
    ///
    /// 통화 전체 조회가 실패하면 오류를 돌려주고,
    /// 종목별 조회 실패는 시세 없는 행으로 처리합니다.
    async fn collect(&self, currency: &str, index: &InstrumentIndex) -> Result<SourceBatch>;
}
