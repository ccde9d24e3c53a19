//! 일본식 수익률(단순 만기수익률) 계산.
//!
//! 연간 쿠폰 수입과, 만기까지 액면으로 수렴하는 가격 차익을 잔존 기간에
//! 선형 배분한 연간 자본 손익을 더해 현재 가격으로 나눕니다.
//!
//! ```text
//! 실제 가격      = (매도 호가 / 100) × 액면가
//! 연간 쿠폰      = (쿠폰 이율 / 100) × 액면가
//! 연간 자본 손익 = (액면가 − 실제 가격) / 잔존 연수
//! 수익률 (%)     = (연간 쿠폰 + 연간 자본 손익) / 실제 가격 × 100
//! ```

use chrono::NaiveDate;

use super::bond::Bond;

/// 잔존 연수 계산에 사용하는 1년의 일수.
pub const DAYS_PER_YEAR: f64 = 365.25;

/// 만기일 문자열 형식.
pub const MATURITY_DATE_FORMAT: &str = "%Y-%m-%d";

/// 만기일 문자열을 파싱합니다.
pub fn parse_maturity_date(maturity_date: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(maturity_date.trim(), MATURITY_DATE_FORMAT).ok()
}

/// `as_of`부터 만기까지의 잔존 연수.
///
/// 날짜 파싱에 실패하면 `None`. 이미 만기된 채권은 0 이하 값을 반환합니다.
pub fn years_to_maturity(maturity_date: &str, as_of: NaiveDate) -> Option<f64> {
    let maturity = parse_maturity_date(maturity_date)?;
    let days = (maturity - as_of).num_days();
    Some(days as f64 / DAYS_PER_YEAR)
}

/// 소수점 `dp`자리로 반올림합니다. 결과가 `-0.0`이면 `0.0`을 반환합니다.
pub fn round_dp(value: f64, dp: u32) -> f64 {
    let factor = 10f64.powi(dp as i32);
    (value * factor).round() / factor + 0.0
}

/// 입력 값으로 일본식 수익률을 계산합니다 (소수점 2자리).
///
/// 잔존 연수가 0 이하이거나 실제 가격이 0 이하이면 `None`.
pub fn simple_yield_to_maturity(
    ask_price: f64,
    coupon_rate: f64,
    par_value: f64,
    years_to_maturity: f64,
) -> Option<f64> {
    if years_to_maturity <= 0.0 {
        return None;
    }

    let actual_price = (ask_price / 100.0) * par_value;
    let annual_coupon = (coupon_rate / 100.0) * par_value;
    let annual_capital_gain = (par_value - actual_price) / years_to_maturity;

    if actual_price > 0.0 {
        let japanese_yield = ((annual_coupon + annual_capital_gain) / actual_price) * 100.0;
        Some(round_dp(japanese_yield, 2))
    } else {
        None
    }
}

/// 채권의 일본식 수익률을 계산합니다.
///
/// 매도 호가, 쿠폰 이율, 액면가, 만기일 중 하나라도 없으면 `None`.
pub fn compute_japanese_yield(bond: &Bond, as_of: NaiveDate) -> Option<f64> {
    let ask_price = bond.ask_price?;
    let coupon_rate = bond.coupon_rate?;
    let par_value = bond.par_value?;
    let maturity_date = bond.maturity_date.as_deref()?;

    let years = years_to_maturity(maturity_date, as_of)?;
    simple_yield_to_maturity(ask_price, coupon_rate, par_value, years)
}
