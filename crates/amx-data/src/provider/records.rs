//! AMX API 원시 레코드.
//!
//! 필드 이름은 거래소 응답 그대로 매핑하고, 형태가 어긋난 필드는 누락으로 읽습니다.

use amx_core::{lenient, QuoteRecord, RawNumber};
use serde::Deserialize;

/// 종목 참조 데이터 (`getInstruments`).
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct InstrumentRecord {
    /// ISIN
    #[serde(default, deserialize_with = "lenient::deserialize")]
    pub isin: Option<String>,
    /// 단축 코드
    #[serde(default, deserialize_with = "lenient::deserialize")]
    pub ticker: Option<String>,
    /// 통화 코드
    #[serde(default, deserialize_with = "lenient::deserialize")]
    pub currency: Option<String>,
    /// 만기일
    #[serde(default, deserialize_with = "lenient::deserialize")]
    pub maturity_date: Option<String>,
    /// 영문 약칭
    #[serde(
        rename = "short_name_en",
        default,
        deserialize_with = "lenient::deserialize"
    )]
    pub short_name: Option<String>,
    /// 쿠폰 이율 (쉼표 소수점 문자열)
    #[serde(rename = "cpn_rate", default, deserialize_with = "lenient::deserialize")]
    pub coupon_rate: Option<RawNumber>,
    /// 쿠폰 지급 주기 (영문)
    #[serde(
        rename = "cpn_frequency_en",
        default,
        deserialize_with = "lenient::deserialize"
    )]
    pub coupon_frequency: Option<String>,
    /// 액면가 (쉼표 소수점 문자열)
    #[serde(rename = "per_value", default, deserialize_with = "lenient::deserialize")]
    pub par_value: Option<RawNumber>,
}

/// 당일 시장 데이터 행 (`getMarketData/{market_type}`).
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct MarketRecord {
    /// ISIN
    #[serde(default, deserialize_with = "lenient::deserialize")]
    pub isin: Option<String>,
    /// 단축 코드
    #[serde(default, deserialize_with = "lenient::deserialize")]
    pub ticker: Option<String>,
    /// 통화 코드
    #[serde(rename = "cur", default, deserialize_with = "lenient::deserialize")]
    pub currency: Option<String>,
    /// 만기일
    #[serde(default, deserialize_with = "lenient::deserialize")]
    pub maturity_date: Option<String>,
    /// 영문 약칭
    #[serde(
        rename = "short_name_en",
        default,
        deserialize_with = "lenient::deserialize"
    )]
    pub short_name: Option<String>,
    /// 가격 시세
    #[serde(default, deserialize_with = "lenient::deserialize")]
    pub price: Option<QuoteRecord>,
    /// 수익률 시세
    #[serde(rename = "yield", default, deserialize_with = "lenient::deserialize")]
    pub yield_quote: Option<QuoteRecord>,
}

/// 종목별 과거 시장 데이터 항목 (`getInstrument/{isin}`의 `market_data`).
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct HistoricalSnapshot {
    /// 주문 일자
    #[serde(default, deserialize_with = "lenient::deserialize")]
    pub order_date: Option<String>,
    /// 최우선 매도 호가
    #[serde(default, deserialize_with = "lenient::deserialize")]
    pub best_ask: Option<RawNumber>,
    /// 최우선 매수 호가
    #[serde(default, deserialize_with = "lenient::deserialize")]
    pub best_bid: Option<RawNumber>,
    /// 최우선 매도 호가 수익률
    #[serde(default, deserialize_with = "lenient::deserialize")]
    pub best_ask_yield: Option<RawNumber>,
    /// 평균가
    #[serde(default, deserialize_with = "lenient::deserialize")]
    pub avg: Option<RawNumber>,
    /// 종가
    #[serde(default, deserialize_with = "lenient::deserialize")]
    pub close: Option<RawNumber>,
}

impl HistoricalSnapshot {
    /// 가장 최근 항목을 선택합니다.
    ///
    /// `order_date` 문자열이 가장 큰 항목이며, 같으면 앞선 항목을 유지합니다.
    /// 날짜가 없는 항목은 가장 오래된 것으로 취급합니다.
    pub fn latest(snapshots: &[HistoricalSnapshot]) -> Option<&HistoricalSnapshot> {
        let mut latest: Option<&HistoricalSnapshot> = None;
        for snapshot in snapshots {
            let newer = match latest {
                None => true,
                Some(current) => snapshot.order_key() > current.order_key(),
            };
            if newer {
                latest = Some(snapshot);
            }
        }
        latest
    }

    fn order_key(&self) -> &str {
        self.order_date.as_deref().unwrap_or("")
    }
}

/// 병합에 사용하는 공통 시세 형태.
///
/// 당일 시장 데이터 행과 과거 스냅샷 모두 이 형태로 변환됩니다.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MarketQuote {
    /// 단축 코드
    pub ticker: Option<String>,
    /// 만기일
    pub maturity_date: Option<String>,
    /// 영문 약칭
    pub short_name: Option<String>,
    /// 기준 일자 (과거 스냅샷만)
    pub order_date: Option<String>,
    /// 가격 시세
    pub price: Option<QuoteRecord>,
    /// 수익률 시세
    pub yield_quote: Option<QuoteRecord>,
}

impl From<MarketRecord> for MarketQuote {
    fn from(record: MarketRecord) -> Self {
        Self {
            ticker: record.ticker,
            maturity_date: record.maturity_date,
            short_name: record.short_name,
            order_date: None,
            price: record.price,
            yield_quote: record.yield_quote,
        }
    }
}

impl From<HistoricalSnapshot> for MarketQuote {
    fn from(snapshot: HistoricalSnapshot) -> Self {
        let price = QuoteRecord {
            ask: snapshot.best_ask,
            bid: snapshot.best_bid,
            avg: snapshot.avg,
            close: snapshot.close,
        };
        let yield_quote = QuoteRecord {
            ask: snapshot.best_ask_yield,
            ..Default::default()
        };

        Self {
            ticker: None,
            maturity_date: None,
            short_name: None,
            order_date: snapshot.order_date,
            price: Some(price),
            yield_quote: Some(yield_quote),
        }
    }
}

/// 공백을 제거한 비어 있지 않은 문자열만 남깁니다.
pub(crate) fn non_empty(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

impl InstrumentRecord {
    /// 유효한 ISIN (비어 있으면 `None`).
    pub fn isin(&self) -> Option<&str> {
        non_empty(self.isin.as_deref())
    }
}

impl MarketRecord {
    /// 유효한 ISIN (비어 있으면 `None`).
    pub fn isin(&self) -> Option<&str> {
        non_empty(self.isin.as_deref())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use amx_core::extract_ask_price;

    fn snapshot(order_date: Option<&str>, best_ask: f64) -> HistoricalSnapshot {
        HistoricalSnapshot {
            order_date: order_date.map(str::to_string),
            best_ask: Some(RawNumber::from(best_ask)),
            ..Default::default()
        }
    }

    #[test]
    fn test_instrument_wire_names() {
        let json = r#"{
            "isin": "AMGB1029A250",
            "ticker": "AMB1",
            "currency": "AMD",
            "maturity_date": "2026-01-01",
            "short_name_en": "Bond One",
            "cpn_rate": "9,5",
            "cpn_frequency_en": "Semi-Annually",
            "per_value": 1000,
            "issuer": "ignored"
        }"#;
        let record: InstrumentRecord = serde_json::from_str(json).unwrap();

        assert_eq!(record.isin(), Some("AMGB1029A250"));
        assert_eq!(record.short_name.as_deref(), Some("Bond One"));
        assert_eq!(record.coupon_rate, Some(RawNumber::from("9,5")));
        assert_eq!(record.par_value, Some(RawNumber::from(1000.0)));
    }

    #[test]
    fn test_market_record_malformed_nested() {
        let json = r#"{"isin": "X1", "cur": "AMD", "price": "n/a", "yield": {"ask": "12,1"}}"#;
        let record: MarketRecord = serde_json::from_str(json).unwrap();

        assert_eq!(record.currency.as_deref(), Some("AMD"));
        assert!(record.price.is_none());
        assert!(record.yield_quote.is_some());
    }

    #[test]
    fn test_blank_isin_is_absent() {
        let record: MarketRecord = serde_json::from_str(r#"{"isin": "  "}"#).unwrap();
        assert_eq!(record.isin(), None);
    }

    #[test]
    fn test_latest_snapshot() {
        let snapshots = vec![
            snapshot(Some("2024-03-01"), 97.0),
            snapshot(Some("2024-05-10"), 98.5),
            snapshot(None, 90.0),
            snapshot(Some("2024-05-10"), 99.9),
        ];
        let latest = HistoricalSnapshot::latest(&snapshots).unwrap();
        assert_eq!(latest.best_ask, Some(RawNumber::from(98.5)));

        assert!(HistoricalSnapshot::latest(&[]).is_none());
    }

    #[test]
    fn test_snapshot_to_quote() {
        let snap = HistoricalSnapshot {
            order_date: Some("2024-05-10".to_string()),
            best_ask: Some(RawNumber::from("-")),
            avg: Some(RawNumber::from("101,2")),
            best_ask_yield: Some(RawNumber::from(11.2)),
            ..Default::default()
        };
        let quote = MarketQuote::from(snap);

        assert_eq!(extract_ask_price(quote.price.as_ref()), Some(101.2));
        assert_eq!(
            quote.yield_quote.and_then(|q| q.ask),
            Some(RawNumber::from(11.2))
        );
        assert_eq!(quote.order_date.as_deref(), Some("2024-05-10"));
    }
}
