//! AMX 공개 API 클라이언트.
//!
//! 아르메니아 증권거래소(amx.am) 웹사이트가 사용하는 JSON API에서 채권 데이터를 수집합니다.
//!
//! # 엔드포인트
//!
//! - `GET /getInstruments`: 전체 종목 참조 데이터
//! - `GET /getMarketData/{market_type}`: 당일 시장 데이터
//! - `GET /getInstrument/{isin}`: 종목별 과거 시세
//!
//! # 사용 예제
//!
//! ```rust,ignore
//! use amx_data::provider::AmxApiClient;
//! use std::time::Duration;
//!
//! let client = AmxApiClient::new("https://amx.am/api", Duration::from_secs(20))?;
//! let instruments = client.fetch_instruments().await?;
//! ```

use std::time::Duration;

use amx_core::{lenient, ApiConfig};
use async_trait::async_trait;
use reqwest::header::{self, HeaderMap, HeaderValue};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::Value;
use tracing::{debug, warn};

use super::records::{HistoricalSnapshot, InstrumentRecord, MarketRecord};
use super::BondDataProvider;
use crate::error::{DataError, Result};

/// 브라우저 요청으로 보이기 위한 User-Agent.
const USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 \
     (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36";

const ACCEPT: &str = "application/json, text/plain, */*";

const ACCEPT_LANGUAGE: &str = "en-US,en;q=0.9";

/// AMX 공개 API 클라이언트.
#[derive(Clone)]
pub struct AmxApiClient {
    client: reqwest::Client,
    base_url: String,
}

/// 응답 공통 래퍼 (`{"data": ...}`).
#[derive(Debug, Deserialize)]
#[serde(bound(deserialize = "T: DeserializeOwned"))]
struct ApiResponse<T> {
    #[serde(default, deserialize_with = "lenient::deserialize")]
    data: Option<T>,
}

/// `getInstruments` 응답 본문.
#[derive(Debug, Deserialize)]
struct InstrumentsData {
    #[serde(default, deserialize_with = "lenient::deserialize")]
    instruments: Option<Vec<Value>>,
}

/// `getInstrument/{isin}` 응답 본문.
#[derive(Debug, Deserialize)]
struct InstrumentData {
    #[serde(default, deserialize_with = "lenient::deserialize")]
    market_data: Option<Vec<Value>>,
}

impl AmxApiClient {
    /// 새로운 클라이언트를 생성합니다.
    ///
    /// # Arguments
    /// * `base_url` - API 기본 URL (예: `https://amx.am/api`)
    /// * `timeout` - 요청별 타임아웃
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self> {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        let headers = default_headers(&base_url)?;

        let client = reqwest::Client::builder()
            .timeout(timeout)
            .default_headers(headers)
            .build()?;

        Ok(Self { client, base_url })
    }

    /// 설정에서 클라이언트를 생성합니다.
    pub fn from_config(config: &ApiConfig) -> Result<Self> {
        Self::new(config.base_url.clone(), config.timeout())
    }

    /// API 기본 URL.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// GET 요청을 보내고 JSON 본문을 디코딩합니다.
    async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        let url = format!("{}/{}", self.base_url, path.trim_start_matches('/'));
        debug!(url = %url, "AMX API 요청");

        let response = self.client.get(&url).send().await?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let body = response.text().await.unwrap_or_default();
            return Err(DataError::Http { status, url, body });
        }

        let text = response.text().await?;
        Ok(serde_json::from_str(&text)?)
    }
}

#[async_trait]
impl BondDataProvider for AmxApiClient {
    fn name(&self) -> &str {
        "amx"
    }

    async fn fetch_instruments(&self) -> Result<Vec<InstrumentRecord>> {
        let response: ApiResponse<InstrumentsData> = self.get("getInstruments").await?;
        let values = response
            .data
            .and_then(|data| data.instruments)
            .unwrap_or_default();

        Ok(decode_records(values, "instrument"))
    }

    async fn fetch_market_snapshot(&self, market_type: &str) -> Result<Vec<MarketRecord>> {
        let response: ApiResponse<Vec<Value>> =
            self.get(&format!("getMarketData/{}", market_type)).await?;

        Ok(decode_records(response.data.unwrap_or_default(), "market"))
    }

    async fn fetch_instrument_history(&self, isin: &str) -> Result<Vec<HistoricalSnapshot>> {
        let response: ApiResponse<InstrumentData> =
            self.get(&format!("getInstrument/{}", isin)).await?;
        let values = response
            .data
            .and_then(|data| data.market_data)
            .unwrap_or_default();

        Ok(decode_records(values, "history"))
    }
}

/// 브라우저와 같은 기본 헤더를 구성합니다.
fn default_headers(base_url: &str) -> Result<HeaderMap> {
    let parsed = reqwest::Url::parse(base_url)
        .map_err(|e| DataError::Config(format!("잘못된 base_url '{}': {}", base_url, e)))?;
    let origin = parsed.origin().ascii_serialization();
    let referer = format!("{}/", origin);

    let mut headers = HeaderMap::new();
    headers.insert(header::USER_AGENT, HeaderValue::from_static(USER_AGENT));
    headers.insert(header::ACCEPT, HeaderValue::from_static(ACCEPT));
    headers.insert(
        header::ACCEPT_LANGUAGE,
        HeaderValue::from_static(ACCEPT_LANGUAGE),
    );
    headers.insert(header::REFERER, header_value(&referer)?);
    headers.insert(header::ORIGIN, header_value(&origin)?);

    Ok(headers)
}

fn header_value(value: &str) -> Result<HeaderValue> {
    HeaderValue::from_str(value).map_err(|e| DataError::Config(e.to_string()))
}

/// 레코드를 하나씩 디코딩하고, 객체가 아닌 항목은 건너뜁니다.
fn decode_records<T: DeserializeOwned>(values: Vec<Value>, kind: &str) -> Vec<T> {
    let total = values.len();
    let records: Vec<T> = values
        .into_iter()
        .filter_map(|value| serde_json::from_value(value).ok())
        .collect();

    let skipped = total - records.len();
    if skipped > 0 {
        warn!(kind, skipped, total, "디코딩할 수 없는 레코드 건너뜀");
    }

    records
}
