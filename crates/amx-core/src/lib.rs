//! # AMX Core
//!
//! AMX(아르메니아 증권거래소) 채권 수익률 분석기의 핵심 모델과 계산을 제공합니다.
//!
//! - 채권 스냅샷 모델과 쿠폰 주기
//! - 쉼표 소수점 숫자 파싱
//! - 시세 필드 추출 (ask → avg → close 폴백)
//! - 일본식 수익률(단순 만기수익률) 계산과 정렬
//! - 콘솔/알림 리포트 포맷팅
//! - 설정 관리
//! - 로깅 인프라

pub mod config;
pub mod domain;
pub mod error;
pub mod logging;
pub mod report;
pub mod types;

pub use config::*;
pub use domain::*;
pub use error::*;
pub use logging::{init_logging, LogConfig, LogFormat};
pub use report::*;
pub use types::*;
