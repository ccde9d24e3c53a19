//! 채권 분석기의 핵심 에러 타입.

use thiserror::Error;

/// 핵심 에러.
///
/// 숫자/날짜 파싱 실패는 에러가 아니라 `None`으로 처리되므로 여기에 포함되지 않습니다.
#[derive(Debug, Error)]
pub enum CoreError {
    /// 설정 에러
    #[error("설정 에러: {0}")]
    Config(String),

    /// 잘못된 입력
    #[error("잘못된 입력: {0}")]
    InvalidInput(String),
}

/// 핵심 작업을 위한 Result 타입.
pub type CoreResult<T> = Result<T, CoreError>;

impl From<config::ConfigError> for CoreError {
    fn from(err: config::ConfigError) -> Self {
        CoreError::Config(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = CoreError::Config("top_n must be positive".to_string());
        assert_eq!(err.to_string(), "설정 에러: top_n must be positive");

        let err = CoreError::InvalidInput("bad date".to_string());
        assert!(err.to_string().contains("bad date"));
    }
}
