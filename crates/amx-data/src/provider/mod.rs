//! 데이터 Provider 모듈.
//!
//! 거래소에서 원시 레코드를 가져오는 Provider들을 정의합니다.
//!
//! ## AMX API
//! - `AmxApiClient`: amx.am 공개 JSON API 클라이언트
//! - 종목 참조 데이터, 당일 시장 데이터, 종목별 과거 시세
//!
//! ## 인메모리
//! - `InMemoryProvider`: 고정 레코드를 돌려주는 테스트/오프라인용 Provider

pub mod amx_api;
pub mod memory;
pub mod records;

use async_trait::async_trait;

use crate::error::Result;

pub use amx_api::AmxApiClient;
pub use memory::InMemoryProvider;
pub use records::{HistoricalSnapshot, InstrumentRecord, MarketQuote, MarketRecord};

/// 채권 원시 데이터 Provider trait.
///
/// 통화 필터링과 병합은 호출자가 수행하며, Provider는 응답을 있는 그대로 돌려줍니다.
#[async_trait]
pub trait BondDataProvider: Send + Sync {
    /// Provider 이름.
    fn name(&self) -> &str;

    /// 전체 종목 참조 데이터를 가져옵니다.
    async fn fetch_instruments(&self) -> Result<Vec<InstrumentRecord>>;

    /// 시장 유형(예: `corporate_bonds`)의 당일 시장 데이터를 가져옵니다.
    async fn fetch_market_snapshot(&self, market_type: &str) -> Result<Vec<MarketRecord>>;

    /// 종목 하나의 과거 시세 목록을 가져옵니다.
    ///
    /// 거래 이력이 없으면 빈 목록입니다.
    async fn fetch_instrument_history(&self, isin: &str) -> Result<Vec<HistoricalSnapshot>>;

    /// 가장 최근 과거 시세를 가져옵니다.
    async fn fetch_latest_snapshot(&self, isin: &str) -> Result<Option<HistoricalSnapshot>> {
        let history = self.fetch_instrument_history(isin).await?;
        Ok(HistoricalSnapshot::latest(&history).cloned())
    }
}
