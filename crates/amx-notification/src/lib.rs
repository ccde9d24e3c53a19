//! 채권 수익률 리포트 알림 서비스.
//!
//! 지원 채널:
//! - 텔레그램 (Telegram Bot API)

pub mod telegram;
pub mod types;

pub use telegram::{TelegramConfig, TelegramSender, TELEGRAM_API_BASE};
pub use types::{deliver, NotificationError, NotificationResult, NotificationSender};
