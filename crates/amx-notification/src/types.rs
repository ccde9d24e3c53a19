//! 알림 타입 및 trait 정의.

use async_trait::async_trait;
use tracing::{info, warn};

/// 알림 작업용 Result 타입.
pub type NotificationResult<T> = Result<T, NotificationError>;

/// 알림 에러.
#[derive(Debug, thiserror::Error)]
pub enum NotificationError {
    #[error("알림 전송 실패: {0}")]
    SendFailed(String),

    #[error("잘못된 설정: {0}")]
    InvalidConfig(String),

    #[error("요청 한도 초과: {0}초 후 재시도")]
    RateLimited(u64),

    #[error("네트워크 에러: {0}")]
    NetworkError(reqwest::Error),
}

impl From<reqwest::Error> for NotificationError {
    /// 요청 URL에는 봇 토큰이 들어가므로 제거합니다.
    fn from(err: reqwest::Error) -> Self {
        NotificationError::NetworkError(err.without_url())
    }
}

/// 알림 전송기 trait.
///
/// 완성된 텍스트 블록 하나를 전송합니다. 재시도는 하지 않습니다.
#[async_trait]
pub trait NotificationSender: Send + Sync {
    /// 텍스트 메시지를 전송합니다.
    async fn send_text(&self, text: &str) -> NotificationResult<()>;

    /// 전송기가 활성화되어 있는지 확인합니다.
    fn is_enabled(&self) -> bool;

    /// 전송기 이름을 반환합니다.
    fn name(&self) -> &str;
}

/// 텍스트를 전송하고 성공 여부만 돌려줍니다.
///
/// 비활성화된 전송기는 전송하지 않고 `false`를 돌려줍니다.
pub async fn deliver(sender: &dyn NotificationSender, text: &str) -> bool {
    if !sender.is_enabled() {
        warn!(sender = sender.name(), "알림 전송기가 비활성화되어 전송 건너뜀");
        return false;
    }

    match sender.send_text(text).await {
        Ok(()) => {
            info!(sender = sender.name(), "리포트 전송 완료");
            true
        }
        Err(e) => {
            warn!(sender = sender.name(), error = %e, "리포트 전송 실패");
            false
        }
    }
}
