//! 채권 평가 → 정렬 → 리포트 통합 테스트
//!
//! 수익률 계산부터 콘솔/알림 포맷까지 공개 API만으로 연결해 확인합니다.

use amx_core::{ranked, Bond, CouponFrequency, ReportFormatter, ReportSummary};
use chrono::NaiveDate;

fn as_of() -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 1, 1).unwrap()
}

/// 테스트용 채권 생성
fn bond(ticker: &str, maturity: &str, ask: Option<f64>, coupon: f64) -> Bond {
    let mut bond = Bond::new(ticker, format!("AM{}", ticker))
        .with_maturity_date(maturity)
        .with_coupon_rate(coupon)
        .with_par_value(1000.0);
    bond.ask_price = ask;
    bond.coupon_frequency = Some(CouponFrequency::parse("Semi-Annually"));
    bond.evaluate(as_of())
}

fn sample() -> Vec<Bond> {
    ranked(vec![
        bond("LOW", "2027-01-01", Some(101.0), 6.0),
        bond("NOPX", "2026-06-01", None, 12.0),
        bond("HIGH", "2026-01-01", Some(98.0), 9.5),
        bond("OLD", "2024-01-01", Some(99.0), 9.0),
    ])
}

#[test]
fn test_ranking_places_missing_yields_last() {
    let bonds = sample();
    let tickers: Vec<&str> = bonds.iter().map(|b| b.ticker.as_str()).collect();

    assert_eq!(tickers, vec!["HIGH", "LOW", "NOPX", "OLD"]);
    assert_eq!(
        ReportSummary::from_bonds(&bonds),
        ReportSummary {
            total: 4,
            with_yield: 2
        }
    );
}

#[test]
fn test_console_report_top_n() {
    let bonds = sample();
    let formatter = ReportFormatter::new("AMD").with_top_n(2);
    let table = formatter.format_for_console(&bonds);

    // 헤더 + 상위 2개
    assert_eq!(table.lines().count(), 3);
    assert!(table.contains("HIGH"));
    assert!(!table.contains("NOPX"));
    assert_eq!(
        formatter.format_statistics(&bonds),
        "Total AMD bonds: 4\nBonds with Japanese yield: 2"
    );
}

#[test]
fn test_notification_report_skips_missing_yields() {
    let bonds = sample();
    let message = ReportFormatter::new("AMD").format_for_notification(&bonds, as_of());

    assert!(message.starts_with("📊 <b>AMX Bond Yields Report</b>"));
    assert!(message.contains("📅 2025-01-01"));
    assert!(message.contains("HIGH"));
    assert!(message.contains("LOW"));
    assert!(!message.contains("NOPX"));
    assert!(!message.contains("OLD"));
    assert!(message.ends_with("📈 Total AMD bonds analyzed: 4"));
}
