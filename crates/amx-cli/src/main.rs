//! AMX 채권 수익률 분석기 CLI.
//!
//! # 사용 예시
//!
//! ```bash
//! # 기본 통화(AMD), 당일 시장 데이터
//! amx-bonds
//!
//! # USD 채권, 모든 종목의 최근 시세 (느림)
//! amx-bonds --currency USD --mode exhaustive
//!
//! # 설정된 모든 통화 분석 후 텔레그램 전송
//! amx-bonds --all-currencies --telegram
//! ```

use std::path::PathBuf;
use std::sync::Arc;

use amx_cli::{parse_date, run_analysis, AnalyzeOptions};
use amx_core::{init_logging, AppConfig, LogConfig, LogFormat, DEFAULT_CONFIG_PATH};
use amx_data::{AcquisitionMode, AmxApiClient, BondAnalyzer};
use amx_notification::{NotificationSender, TelegramSender};
use anyhow::Context;
use chrono::{Local, NaiveDate};
use clap::Parser;
use tracing::{info, warn};

#[derive(Parser)]
#[command(name = "amx-bonds")]
#[command(about = "AMX bond yield analyzer - 일본식 수익률 기준 채권 순위", long_about = None)]
#[command(version)]
struct Cli {
    /// 분석할 통화 (기본: 설정의 default_currency)
    #[arg(short, long)]
    currency: Option<String>,

    /// 설정된 모든 통화 분석 (analysis.currencies)
    #[arg(long, conflicts_with = "currency")]
    all_currencies: bool,

    /// 수집 방식 (same-day: 당일 거래 종목, exhaustive: 모든 종목의 최근 시세)
    #[arg(short, long, default_value = "same-day")]
    mode: AcquisitionMode,

    /// 결과를 텔레그램으로 전송 (TELEGRAM_BOT_TOKEN, TELEGRAM_CHAT_ID 필요)
    #[arg(long)]
    telegram: bool,

    /// 표시할 상위 채권 수
    #[arg(short = 'n', long)]
    top: Option<usize>,

    /// 수익률 계산 기준일 (YYYY-MM-DD, 기본: 오늘)
    #[arg(long, value_parser = parse_date)]
    as_of: Option<NaiveDate>,

    /// 설정 파일 경로 (없으면 기본값 사용)
    #[arg(long, default_value = DEFAULT_CONFIG_PATH)]
    config: PathBuf,

    /// 로그 레벨 (trace, debug, info, warn, error)
    #[arg(long)]
    log_level: Option<String>,

    /// 로그 형식 (pretty, json, compact)
    #[arg(long)]
    log_format: Option<LogFormat>,
}

/// 텔레그램 전송기를 준비합니다. 환경 변수가 없으면 경고 후 비활성화합니다.
fn telegram_sender() -> anyhow::Result<Option<TelegramSender>> {
    match TelegramSender::from_env()? {
        Some(sender) => Ok(Some(sender)),
        None => {
            warn!("TELEGRAM_BOT_TOKEN 또는 TELEGRAM_CHAT_ID가 없어 텔레그램 전송을 건너뜁니다");
            Ok(None)
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    let mut config = AppConfig::load(&cli.config)
        .with_context(|| format!("설정 로드 실패: {}", cli.config.display()))?;
    if let Some(level) = &cli.log_level {
        config.logging.level = level.clone();
    }

    let mut log_config = LogConfig::from(&config.logging);
    if let Some(format) = cli.log_format {
        log_config = log_config.with_format(format);
    }
    init_logging(log_config).map_err(|e| anyhow::anyhow!("로깅 초기화 실패: {}", e))?;

    let as_of = cli.as_of.unwrap_or_else(|| Local::now().date_naive());
    let options = AnalyzeOptions::from_config(
        &config,
        cli.currency.as_deref(),
        cli.all_currencies,
        cli.mode,
        as_of,
        cli.top,
    );

    info!(
        base_url = %config.api.base_url,
        currencies = ?options.currencies,
        mode = %options.mode,
        "AMX 채권 분석 시작"
    );

    let client = AmxApiClient::from_config(&config.api)?;
    let analyzer = BondAnalyzer::from_config(Arc::new(client), &config);

    let telegram = if cli.telegram { telegram_sender()? } else { None };
    let notifier = telegram.as_ref().map(|s| s as &dyn NotificationSender);

    let mut stdout = std::io::stdout().lock();
    let outcomes = run_analysis(&analyzer, &options, notifier, &mut stdout).await?;

    let failed_notifications = outcomes
        .iter()
        .filter(|o| o.notified == Some(false))
        .count();
    if failed_notifications > 0 {
        warn!(failed = failed_notifications, "일부 리포트를 전송하지 못했습니다");
    }

    info!(currencies = outcomes.len(), "AMX 채권 분석 완료");
    Ok(())
}
