//! CLI 명령 모음.

pub mod analyze;

pub use analyze::{parse_date, run_analysis, AnalyzeOptions, CurrencyOutcome};
