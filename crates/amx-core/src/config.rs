//! 설정 관리.
//!
//! 기본값 → TOML 파일(선택) → `AMX__` 접두사 환경 변수 순서로 덮어씁니다.
//!
//! ```text
//! AMX__API__BASE_URL=https://amx.am/api
//! AMX__ANALYSIS__TOP_N=20
//! AMX__ANALYSIS__CURRENCIES=AMD,USD
//! ```

use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

use crate::error::{CoreError, CoreResult};
use crate::report::{DEFAULT_REPORT_TITLE, DEFAULT_TOP_N};

/// 기본 설정 파일 경로.
pub const DEFAULT_CONFIG_PATH: &str = "config/amx.toml";

/// 환경 변수 접두사.
pub const ENV_PREFIX: &str = "AMX";

/// 애플리케이션 설정.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct AppConfig {
    /// 거래소 API 설정
    pub api: ApiConfig,
    /// 분석 설정
    pub analysis: AnalysisConfig,
    /// 리포트 설정
    pub report: ReportConfig,
    /// 로깅 설정
    pub logging: LoggingConfig,
}

/// 거래소 API 설정.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ApiConfig {
    /// REST API 기본 URL
    pub base_url: String,
    /// 요청 타임아웃 (초)
    pub timeout_secs: u64,
    /// 시장 데이터 유형 (`getMarketData/{market_type}`)
    pub market_type: String,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: "https://amx.am/api".to_string(),
            timeout_secs: 20,
            market_type: "corporate_bonds".to_string(),
        }
    }
}

impl ApiConfig {
    /// 요청 타임아웃을 Duration으로 반환
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

/// 분석 설정.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct AnalysisConfig {
    /// 기본 통화
    pub default_currency: String,
    /// 전체 통화 실행 시 대상 통화 목록
    pub currencies: Vec<String>,
    /// 리포트 상위 표시 개수
    pub top_n: usize,
    /// 전수 조회 모드의 동시 이력 조회 수
    pub history_concurrency: usize,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            default_currency: "AMD".to_string(),
            currencies: vec!["AMD".to_string(), "USD".to_string()],
            top_n: DEFAULT_TOP_N,
            history_concurrency: 4,
        }
    }
}

impl AnalysisConfig {
    /// 실행 대상 통화 목록을 결정합니다.
    ///
    /// `all`이면 설정된 목록 전체, 아니면 명시한 통화 또는 기본 통화 하나.
    pub fn target_currencies(&self, explicit: Option<&str>, all: bool) -> Vec<String> {
        if all {
            return self.currencies.clone();
        }
        vec![explicit.unwrap_or(&self.default_currency).to_string()]
    }
}

/// 리포트 설정.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ReportConfig {
    /// 알림 메시지 제목
    pub title: String,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            title: DEFAULT_REPORT_TITLE.to_string(),
        }
    }
}

/// 로깅 설정.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// 로그 레벨
    pub level: String,
    /// 로그 형식 (pretty, json, compact)
    pub format: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: "pretty".to_string(),
        }
    }
}

impl AppConfig {
    /// 파일과 환경 변수에서 설정을 로드합니다. 파일이 없으면 기본값을 사용합니다.
    pub fn load<P: AsRef<Path>>(path: P) -> CoreResult<Self> {
        let builder = config::Config::builder()
            .add_source(config::File::from(path.as_ref()).required(false))
            .add_source(
                config::Environment::with_prefix(ENV_PREFIX)
                    .separator("__")
                    .list_separator(",")
                    .with_list_parse_key("analysis.currencies")
                    .try_parsing(true),
            );

        let config: AppConfig = builder.build()?.try_deserialize()?;
        config.validate()?;
        Ok(config)
    }

    /// 설정 값을 검증합니다.
    pub fn validate(&self) -> CoreResult<()> {
        if self.api.base_url.trim().is_empty() {
            return Err(CoreError::Config("api.base_url이 비어 있습니다".to_string()));
        }
        if self.api.timeout_secs == 0 {
            return Err(CoreError::Config(
                "api.timeout_secs는 0보다 커야 합니다".to_string(),
            ));
        }
        if self.analysis.top_n == 0 {
            return Err(CoreError::Config(
                "analysis.top_n은 0보다 커야 합니다".to_string(),
            ));
        }
        if self.analysis.history_concurrency == 0 {
            return Err(CoreError::Config(
                "analysis.history_concurrency는 0보다 커야 합니다".to_string(),
            ));
        }
        if self.analysis.default_currency.trim().is_empty()
            || self.analysis.currencies.iter().any(|c| c.trim().is_empty())
        {
            return Err(CoreError::Config("빈 통화 코드가 있습니다".to_string()));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        let config = AppConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.api.market_type, "corporate_bonds");
        assert_eq!(config.api.timeout(), Duration::from_secs(20));
        assert_eq!(config.analysis.top_n, 15);
    }

    #[test]
    fn test_missing_file_uses_defaults() {
        let path = std::env::temp_dir().join("amx-config-does-not-exist.toml");
        let config = AppConfig::load(&path).unwrap();
        assert_eq!(config.api.base_url, "https://amx.am/api");
        assert_eq!(config.report.title, DEFAULT_REPORT_TITLE);
    }

    #[test]
    fn test_load_partial_file() {
        let path = std::env::temp_dir().join(format!("amx-config-{}.toml", std::process::id()));
        std::fs::write(
            &path,
            "[analysis]\ntop_n = 5\ncurrencies = [\"AMD\"]\n\n[report]\ntitle = \"Daily\"\n",
        )
        .unwrap();

        let config = AppConfig::load(&path).unwrap();
        std::fs::remove_file(&path).ok();

        assert_eq!(config.analysis.top_n, 5);
        assert_eq!(config.analysis.currencies, vec!["AMD".to_string()]);
        assert_eq!(config.analysis.default_currency, "AMD");
        assert_eq!(config.report.title, "Daily");
        assert_eq!(config.api.timeout_secs, 20);
    }

    #[test]
    fn test_validate_rejects_zero_limits() {
        let mut config = AppConfig::default();
        config.analysis.top_n = 0;
        assert!(config.validate().is_err());

        let mut config = AppConfig::default();
        config.analysis.history_concurrency = 0;
        assert!(config.validate().is_err());

        let mut config = AppConfig::default();
        config.analysis.currencies.push(" ".to_string());
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_target_currencies() {
        let analysis = AnalysisConfig::default();
        assert_eq!(analysis.target_currencies(None, false), vec!["AMD"]);
        assert_eq!(analysis.target_currencies(Some("EUR"), false), vec!["EUR"]);
        assert_eq!(analysis.target_currencies(Some("EUR"), true), vec!["AMD", "USD"]);
    }
}
