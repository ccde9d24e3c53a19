//! 시세 레코드와 필드 추출 정책.
//!
//! 가격/수익률 시세는 `ask`, `bid`, `avg`, `close` 중 일부만 채워져 내려옵니다.
//! 추출 정책은 명시적인 존재 여부(`Option`)로 폴백을 결정하므로
//! `0.0`으로 파싱된 값도 유효한 값으로 취급합니다.

use serde::{Deserialize, Serialize};

use crate::types::{lenient, parse_number, RawNumber};

/// 가격 또는 수익률 시세 레코드.
///
/// 알 수 없는 키는 무시하고, 형태가 맞지 않는 필드는 누락으로 읽습니다.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct QuoteRecord {
    /// 매도 호가
    #[serde(default, deserialize_with = "lenient::deserialize")]
    pub ask: Option<RawNumber>,
    /// 매수 호가
    #[serde(default, deserialize_with = "lenient::deserialize")]
    pub bid: Option<RawNumber>,
    /// 평균가
    #[serde(default, deserialize_with = "lenient::deserialize")]
    pub avg: Option<RawNumber>,
    /// 종가
    #[serde(default, deserialize_with = "lenient::deserialize")]
    pub close: Option<RawNumber>,
}

impl QuoteRecord {
    /// 매도 호가를 지정합니다.
    pub fn with_ask(mut self, ask: impl Into<RawNumber>) -> Self {
        self.ask = Some(ask.into());
        self
    }

    /// 매수 호가를 지정합니다.
    pub fn with_bid(mut self, bid: impl Into<RawNumber>) -> Self {
        self.bid = Some(bid.into());
        self
    }

    /// 평균가를 지정합니다.
    pub fn with_avg(mut self, avg: impl Into<RawNumber>) -> Self {
        self.avg = Some(avg.into());
        self
    }

    /// 종가를 지정합니다.
    pub fn with_close(mut self, close: impl Into<RawNumber>) -> Self {
        self.close = Some(close.into());
        self
    }

    /// 정책에 따라 단일 값을 추출합니다.
    pub fn extract(&self, policy: ExtractionPolicy) -> Option<f64> {
        match policy {
            ExtractionPolicy::AskWithFallback => [&self.ask, &self.avg, &self.close]
                .into_iter()
                .find_map(|field| parse_number(field.as_ref())),
            ExtractionPolicy::BidOnly => parse_number(self.bid.as_ref()),
        }
    }
}

/// 시세 필드 추출 정책.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExtractionPolicy {
    /// `ask` → `avg` → `close` 순서로 처음 파싱되는 값
    AskWithFallback,
    /// `bid` 필드만 사용 (폴백 없음)
    BidOnly,
}

/// 레코드가 없으면 `None`, 있으면 정책에 따라 값을 추출합니다.
pub fn extract(record: Option<&QuoteRecord>, policy: ExtractionPolicy) -> Option<f64> {
    record.and_then(|r| r.extract(policy))
}

/// 매도 가격 (ask → avg → close).
pub fn extract_ask_price(record: Option<&QuoteRecord>) -> Option<f64> {
    extract(record, ExtractionPolicy::AskWithFallback)
}

/// 매수 가격 (bid만).
pub fn extract_bid_price(record: Option<&QuoteRecord>) -> Option<f64> {
    extract(record, ExtractionPolicy::BidOnly)
}

/// 시장 수익률 (ask → avg → close).
pub fn extract_yield(record: Option<&QuoteRecord>) -> Option<f64> {
    extract(record, ExtractionPolicy::AskWithFallback)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ask_falls_back_to_avg() {
        let record = QuoteRecord::default().with_avg(101.5).with_close(99.0);
        assert_eq!(extract_ask_price(Some(&record)), Some(101.5));
    }

    #[test]
    fn test_ask_falls_back_to_close() {
        let record = QuoteRecord::default().with_ask("-").with_avg("").with_close("99,25");
        assert_eq!(extract_ask_price(Some(&record)), Some(99.25));
    }

    #[test]
    fn test_all_sentinels_yield_none() {
        let record = QuoteRecord::default().with_ask("-").with_avg("-").with_close("-");
        assert_eq!(extract_ask_price(Some(&record)), None);
        assert_eq!(extract_yield(Some(&record)), None);
    }

    #[test]
    fn test_zero_stops_fallback() {
        let record = QuoteRecord::default().with_ask("0").with_avg(101.5);
        assert_eq!(extract_ask_price(Some(&record)), Some(0.0));
    }

    #[test]
    fn test_bid_has_no_fallback() {
        let record = QuoteRecord::default().with_avg(100.0).with_close(100.0);
        assert_eq!(extract_bid_price(Some(&record)), None);

        let record = record.with_bid("97,5");
        assert_eq!(extract_bid_price(Some(&record)), Some(97.5));
    }

    #[test]
    fn test_absent_record() {
        assert_eq!(extract_ask_price(None), None);
        assert_eq!(extract_bid_price(None), None);
    }

    #[test]
    fn test_deserialize_ignores_unknown_and_malformed() {
        let json = r#"{"ask": {"nested": true}, "avg": "100,5", "volume": 12}"#;
        let record: QuoteRecord = serde_json::from_str(json).unwrap();
        assert!(record.ask.is_none());
        assert_eq!(extract_ask_price(Some(&record)), Some(100.5));
    }
}
