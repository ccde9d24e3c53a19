//! 채권 수익률 분석 명령.
//!
//! 통화마다 독립적으로 분석을 실행하고 콘솔 표와 통계를 출력하며,
//! 요청하면 같은 결과를 알림 채널로 전송합니다.

use std::io::Write;

use amx_core::{AppConfig, ReportFormatter};
use amx_data::{AcquisitionMode, AnalysisReport, BondAnalyzer};
use amx_notification::{deliver, NotificationSender};
use anyhow::{Context, Result};
use chrono::NaiveDate;
use tracing::info;

/// 날짜 문자열 파싱 (YYYY-MM-DD).
pub fn parse_date(s: &str) -> std::result::Result<NaiveDate, String> {
    NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d")
        .map_err(|e| format!("Invalid date '{}': {} (expected YYYY-MM-DD)", s, e))
}

/// 분석 실행 옵션.
#[derive(Debug, Clone)]
pub struct AnalyzeOptions {
    /// 대상 통화 목록 (순서대로 실행)
    pub currencies: Vec<String>,
    /// 수집 방식
    pub mode: AcquisitionMode,
    /// 수익률 계산 기준일
    pub as_of: NaiveDate,
    /// 표에 표시할 상위 개수
    pub top_n: usize,
    /// 리포트 제목
    pub title: String,
}

impl AnalyzeOptions {
    /// 설정 값에 명령줄 인자를 덮어써 옵션을 만듭니다.
    pub fn from_config(
        config: &AppConfig,
        currency: Option<&str>,
        all_currencies: bool,
        mode: AcquisitionMode,
        as_of: NaiveDate,
        top_n: Option<usize>,
    ) -> Self {
        Self {
            currencies: config
                .analysis
                .target_currencies(currency, all_currencies),
            mode,
            as_of,
            top_n: top_n.unwrap_or(config.analysis.top_n).max(1),
            title: config.report.title.clone(),
        }
    }

    fn formatter(&self, currency: &str) -> ReportFormatter {
        ReportFormatter::new(currency)
            .with_title(self.title.clone())
            .with_top_n(self.top_n)
    }
}

/// 통화 하나의 실행 결과.
#[derive(Debug, Clone)]
pub struct CurrencyOutcome {
    /// 분석 결과
    pub report: AnalysisReport,
    /// 알림 전송 결과 (전송하지 않았으면 `None`)
    pub notified: Option<bool>,
}

/// 통화별 분석을 실행하고 리포트를 `out`에 출력합니다.
///
/// 통화 하나라도 종목/시장 데이터 조회에 실패하면 즉시 오류를 돌려줍니다.
/// 알림 전송 실패는 결과에 기록만 하고 실행을 중단하지 않습니다.
pub async fn run_analysis<W: Write>(
    analyzer: &BondAnalyzer,
    options: &AnalyzeOptions,
    notifier: Option<&dyn NotificationSender>,
    out: &mut W,
) -> Result<Vec<CurrencyOutcome>> {
    let mut outcomes = Vec::with_capacity(options.currencies.len());

    for currency in &options.currencies {
        info!(currency = %currency, mode = %options.mode, as_of = %options.as_of, "분석 시작");

        let report = analyzer
            .analyze(currency, options.mode, options.as_of)
            .await
            .with_context(|| format!("{} 채권 분석 실패", currency))?;

        let formatter = options.formatter(currency);
        writeln!(
            out,
            "\n=== {} bonds ({}, as of {}) ===\n",
            currency, options.mode, options.as_of
        )?;
        writeln!(out, "{}", formatter.format_for_console(&report.bonds))?;
        writeln!(out, "\n{}", formatter.format_statistics(&report.bonds))?;

        let notified = match notifier {
            Some(sender) => {
                let message = formatter.format_for_notification(&report.bonds, options.as_of);
                Some(deliver(sender, &message).await)
            }
            None => None,
        };

        outcomes.push(CurrencyOutcome { report, notified });
    }

    Ok(outcomes)
}
