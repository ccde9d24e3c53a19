//! 채권 스냅샷 모델.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::calculations::compute_japanese_yield;
use super::frequency::CouponFrequency;

/// 분석 실행 한 번에서 ISIN 하나에 대응하는 채권 스냅샷.
///
/// 가격은 액면가 대비 퍼센트(예: 98.5 = 액면의 98.5%)입니다.
/// 생성 후 [`Bond::evaluate`]로 일본식 수익률을 한 번 계산해 붙이고,
/// 그 이후에는 변경하지 않습니다.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Bond {
    /// 표시용 단축 코드
    pub ticker: String,
    /// ISIN (실행 내 고유 키)
    pub isin: String,
    /// 만기일 (`YYYY-MM-DD`)
    pub maturity_date: Option<String>,
    /// 영문 약칭
    pub short_name: Option<String>,
    /// 매도 호가 (액면 대비 %)
    pub ask_price: Option<f64>,
    /// 매수 호가 (액면 대비 %)
    pub bid_price: Option<f64>,
    /// 시장 호가 수익률 (참고용)
    pub ask_yield: Option<f64>,
    /// 연 쿠폰 이율 (%)
    pub coupon_rate: Option<f64>,
    /// 쿠폰 지급 주기
    pub coupon_frequency: Option<CouponFrequency>,
    /// 액면가 (통화 단위)
    pub par_value: Option<f64>,
    /// 일본식 수익률 (단순 만기수익률, %)
    pub japanese_yield: Option<f64>,
}

impl Bond {
    /// 필수 식별 정보만으로 채권을 생성합니다.
    pub fn new(ticker: impl Into<String>, isin: impl Into<String>) -> Self {
        Self {
            ticker: ticker.into(),
            isin: isin.into(),
            maturity_date: None,
            short_name: None,
            ask_price: None,
            bid_price: None,
            ask_yield: None,
            coupon_rate: None,
            coupon_frequency: None,
            par_value: None,
            japanese_yield: None,
        }
    }

    /// 만기일을 설정합니다.
    pub fn with_maturity_date(mut self, maturity_date: impl Into<String>) -> Self {
        self.maturity_date = Some(maturity_date.into());
        self
    }

    /// 매도 호가를 설정합니다.
    pub fn with_ask_price(mut self, ask_price: f64) -> Self {
        self.ask_price = Some(ask_price);
        self
    }

    /// 쿠폰 이율을 설정합니다.
    pub fn with_coupon_rate(mut self, coupon_rate: f64) -> Self {
        self.coupon_rate = Some(coupon_rate);
        self
    }

    /// 액면가를 설정합니다.
    pub fn with_par_value(mut self, par_value: f64) -> Self {
        self.par_value = Some(par_value);
        self
    }

    /// `as_of` 기준으로 일본식 수익률을 계산해 붙입니다.
    pub fn evaluate(mut self, as_of: NaiveDate) -> Self {
        self.japanese_yield = compute_japanese_yield(&self, as_of);
        self
    }

    /// 일본식 수익률이 계산되었는지 여부.
    pub fn has_yield(&self) -> bool {
        self.japanese_yield.is_some()
    }
}
