//! 쿠폰 지급 주기.

use serde::{Deserialize, Serialize};
use std::fmt;

/// 쿠폰 지급 주기.
///
/// 거래소가 자유 텍스트로 내려주므로 인식하지 못한 값은 원문 그대로 보존합니다.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum CouponFrequency {
    /// 월 지급
    Monthly,
    /// 분기 지급
    Quarterly,
    /// 반기 지급
    SemiAnnually,
    /// 연 지급
    Annually,
    /// 인식하지 못한 주기 (원문)
    Unknown(String),
}

impl CouponFrequency {
    /// 거래소 텍스트를 파싱합니다.
    pub fn parse(text: &str) -> Self {
        match text.trim() {
            "Monthly" => Self::Monthly,
            "Quarterly" => Self::Quarterly,
            "Semi-Annually" => Self::SemiAnnually,
            "Annually" | "Annual" => Self::Annually,
            other => Self::Unknown(other.to_string()),
        }
    }

    /// 연간 지급 횟수. 알 수 없는 주기는 `None`.
    pub fn payments_per_year(&self) -> Option<u32> {
        match self {
            Self::Monthly => Some(12),
            Self::Quarterly => Some(4),
            Self::SemiAnnually => Some(2),
            Self::Annually => Some(1),
            Self::Unknown(_) => None,
        }
    }

    /// 표시용 텍스트.
    pub fn as_str(&self) -> &str {
        match self {
            Self::Monthly => "Monthly",
            Self::Quarterly => "Quarterly",
            Self::SemiAnnually => "Semi-Annually",
            Self::Annually => "Annually",
            Self::Unknown(text) => text,
        }
    }
}

impl fmt::Display for CouponFrequency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<String> for CouponFrequency {
    fn from(value: String) -> Self {
        Self::parse(&value)
    }
}

impl From<CouponFrequency> for String {
    fn from(value: CouponFrequency) -> Self {
        value.as_str().to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_payments_per_year() {
        assert_eq!(CouponFrequency::parse("Monthly").payments_per_year(), Some(12));
        assert_eq!(CouponFrequency::parse("Quarterly").payments_per_year(), Some(4));
        assert_eq!(CouponFrequency::parse("Semi-Annually").payments_per_year(), Some(2));
        assert_eq!(CouponFrequency::parse("Annually").payments_per_year(), Some(1));
        assert_eq!(CouponFrequency::parse("Annual").payments_per_year(), Some(1));
    }

    #[test]
    fn test_unknown_keeps_text() {
        let freq = CouponFrequency::parse("At maturity");
        assert_eq!(freq.payments_per_year(), None);
        assert_eq!(freq.to_string(), "At maturity");
    }
}
