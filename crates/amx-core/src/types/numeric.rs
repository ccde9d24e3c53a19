//! 거래소 숫자 값 파싱.
//!
//! AMX API는 같은 필드를 JSON 숫자, 쉼표 소수점 문자열(`"12,5"`),
//! 누락 표시(`"-"`, 빈 문자열, `null`)로 섞어서 내려줍니다.
//! 이 모듈은 그 값들을 `Option<f64>`로 정규화합니다.

use serde::{Deserialize, Serialize};

/// 누락 값을 나타내는 센티널 문자열.
pub const MISSING_SENTINEL: &str = "-";

/// API에서 받은 원시 스칼라 값.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RawNumber {
    /// JSON 숫자
    Number(f64),
    /// 문자열 (쉼표 소수점 허용)
    Text(String),
}

impl RawNumber {
    /// 값을 `f64`로 파싱합니다. 실패하면 `None`.
    pub fn to_f64(&self) -> Option<f64> {
        match self {
            RawNumber::Number(n) => n.is_finite().then_some(*n),
            RawNumber::Text(s) => parse_number_str(s),
        }
    }
}

impl From<f64> for RawNumber {
    fn from(value: f64) -> Self {
        RawNumber::Number(value)
    }
}

impl From<&str> for RawNumber {
    fn from(value: &str) -> Self {
        RawNumber::Text(value.to_string())
    }
}

impl From<String> for RawNumber {
    fn from(value: String) -> Self {
        RawNumber::Text(value)
    }
}

/// 원시 값을 숫자로 파싱합니다.
///
/// `None`, 빈 문자열, `"-"`, 변환 불가능한 값은 모두 `None`을 반환합니다.
/// `0.0`은 유효한 결과이며 누락으로 취급하지 않습니다.
pub fn parse_number(raw: Option<&RawNumber>) -> Option<f64> {
    raw.and_then(RawNumber::to_f64)
}

/// 쉼표 소수점 문자열을 숫자로 파싱합니다.
///
/// ```
/// use amx_core::parse_number_str;
///
/// assert_eq!(parse_number_str("12,5"), Some(12.5));
/// assert_eq!(parse_number_str("-"), None);
/// ```
pub fn parse_number_str(raw: &str) -> Option<f64> {
    let trimmed = raw.trim();
    if trimmed.is_empty() || trimmed == MISSING_SENTINEL {
        return None;
    }

    trimmed
        .replace(',', ".")
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
}
