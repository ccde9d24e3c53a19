//! 텔레그램 알림 서비스.
//!
//! Telegram Bot API `sendMessage`로 리포트를 전송합니다.

use std::time::Duration;

use async_trait::async_trait;
use serde::Deserialize;
use tracing::{debug, error, warn};

use crate::types::{NotificationError, NotificationResult, NotificationSender};

/// Telegram Bot API 기본 URL.
pub const TELEGRAM_API_BASE: &str = "https://api.telegram.org";

/// 요청 타임아웃.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// 429 응답에 재시도 시간이 없을 때 사용하는 값 (초).
const DEFAULT_RETRY_AFTER: u64 = 60;

/// 텔레그램 알림 전송 설정.
#[derive(Debug, Clone)]
pub struct TelegramConfig {
    /// @BotFather에서 받은 봇 토큰
    pub bot_token: String,
    /// 메시지를 보낼 채팅 ID
    pub chat_id: String,
    /// 전송 활성화 여부
    pub enabled: bool,
    /// 파싱 모드 (HTML 또는 MarkdownV2)
    pub parse_mode: String,
    /// Bot API 기본 URL
    pub api_base: String,
}

impl TelegramConfig {
    /// 새 텔레그램 설정을 생성합니다.
    pub fn new(bot_token: impl Into<String>, chat_id: impl Into<String>) -> Self {
        Self {
            bot_token: bot_token.into(),
            chat_id: chat_id.into(),
            enabled: true,
            parse_mode: "HTML".to_string(),
            api_base: TELEGRAM_API_BASE.to_string(),
        }
    }

    /// 환경 변수에서 설정을 생성합니다.
    ///
    /// `TELEGRAM_BOT_TOKEN`과 `TELEGRAM_CHAT_ID`가 모두 있어야 합니다.
    /// 비어 있거나 공백뿐인 값은 설정되지 않은 것으로 봅니다.
    pub fn from_env() -> Option<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Option<Self> {
        let present = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let bot_token = present("TELEGRAM_BOT_TOKEN")?;
        let chat_id = present("TELEGRAM_CHAT_ID")?;
        let enabled = present("TELEGRAM_ENABLED")
            .map(|v| parse_flag(&v))
            .unwrap_or(true);

        Some(Self {
            enabled,
            ..Self::new(bot_token, chat_id)
        })
    }

    /// Bot API 기본 URL을 변경합니다.
    pub fn with_api_base(mut self, api_base: impl Into<String>) -> Self {
        self.api_base = api_base.into().trim_end_matches('/').to_string();
        self
    }

    /// 활성화 여부를 설정합니다.
    pub fn with_enabled(mut self, enabled: bool) -> Self {
        self.enabled = enabled;
        self
    }

    /// 필수 값이 비어 있는지 검증합니다.
    pub fn validate(&self) -> NotificationResult<()> {
        if self.bot_token.trim().is_empty() {
            return Err(NotificationError::InvalidConfig(
                "TELEGRAM_BOT_TOKEN이 비어 있습니다".to_string(),
            ));
        }
        if self.chat_id.trim().is_empty() {
            return Err(NotificationError::InvalidConfig(
                "TELEGRAM_CHAT_ID가 비어 있습니다".to_string(),
            ));
        }
        Ok(())
    }
}

fn parse_flag(value: &str) -> bool {
    matches!(value.trim().to_lowercase().as_str(), "true" | "1" | "yes" | "on")
}

/// 텔레그램 오류 응답.
#[derive(Debug, Deserialize)]
struct TelegramErrorBody {
    #[serde(default)]
    description: Option<String>,
    #[serde(default)]
    parameters: Option<ResponseParameters>,
}

#[derive(Debug, Deserialize)]
struct ResponseParameters {
    #[serde(default)]
    retry_after: Option<u64>,
}

/// 텔레그램 알림 전송기.
pub struct TelegramSender {
    config: TelegramConfig,
    client: reqwest::Client,
}

impl TelegramSender {
    /// 새 텔레그램 전송기를 생성합니다.
    pub fn new(config: TelegramConfig) -> NotificationResult<Self> {
        let client = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()?;

        Ok(Self { config, client })
    }

    /// 환경 변수에서 전송기를 생성합니다.
    ///
    /// 필수 환경 변수가 없으면 `Ok(None)`을 돌려줍니다.
    pub fn from_env() -> NotificationResult<Option<Self>> {
        TelegramConfig::from_env().map(Self::new).transpose()
    }

    /// 현재 설정.
    pub fn config(&self) -> &TelegramConfig {
        &self.config
    }

    /// 텔레그램에 원시 메시지를 전송합니다.
    async fn send_message(&self, text: &str) -> NotificationResult<()> {
        self.config.validate()?;

        let url = format!(
            "{}/bot{}/sendMessage",
            self.config.api_base, self.config.bot_token
        );

        let params = serde_json::json!({
            "chat_id": self.config.chat_id,
            "text": text,
            "parse_mode": self.config.parse_mode,
            "disable_web_page_preview": true,
        });

        debug!(chat_id = %self.config.chat_id, "Sending Telegram message");

        let response = self.client.post(&url).json(&params).send().await?;

        if response.status().is_success() {
            return Ok(());
        }

        let status = response.status();
        let body = response.text().await.unwrap_or_default();
        let parsed: Option<TelegramErrorBody> = serde_json::from_str(&body).ok();

        if status.as_u16() == 429 {
            let retry_after = parsed
                .and_then(|b| b.parameters)
                .and_then(|p| p.retry_after)
                .unwrap_or(DEFAULT_RETRY_AFTER);
            warn!(retry_after, "Telegram rate limited");
            return Err(NotificationError::RateLimited(retry_after));
        }

        let description = parsed.and_then(|b| b.description).unwrap_or(body);
        error!(status = %status, description = %description, "Failed to send Telegram message");
        Err(NotificationError::SendFailed(format!(
            "HTTP {}: {}",
            status.as_u16(),
            description
        )))
    }
}

#[async_trait]
impl NotificationSender for TelegramSender {
    async fn send_text(&self, text: &str) -> NotificationResult<()> {
        if !self.is_enabled() {
            debug!("Telegram notifications are disabled, skipping");
            return Ok(());
        }
        self.send_message(text).await
    }

    fn is_enabled(&self) -> bool {
        self.config.enabled && !self.config.bot_token.is_empty() && !self.config.chat_id.is_empty()
    }

    fn name(&self) -> &str {
        "telegram"
    }
}
