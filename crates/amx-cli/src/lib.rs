//! CLI 도구 모음.
//!
//! 이 crate는 다음 기능을 제공합니다:
//! - 통화별 채권 수익률 분석 실행
//! - 콘솔 리포트 출력
//! - 텔레그램 리포트 전송

pub mod commands;

pub use commands::*;
