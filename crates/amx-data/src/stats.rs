//! 분석 실행 통계.

use std::time::Duration;

use serde::Serialize;

use crate::source::AcquisitionMode;

/// 통화 하나에 대한 분석 실행 통계.
#[derive(Debug, Clone, Default, Serialize)]
pub struct AnalysisStats {
    /// 대상 통화
    pub currency: String,
    /// 수집 방식
    #[serde(serialize_with = "serialize_mode")]
    pub mode: AcquisitionMode,
    /// 결과 채권 수
    pub total: usize,
    /// 일본식 수익률이 계산된 채권 수
    pub with_yield: usize,
    /// ISIN이 없어 제외된 레코드 수
    pub skipped_missing_isin: usize,
    /// 중복 ISIN으로 제외된 레코드 수
    pub duplicates_dropped: usize,
    /// 실패한 종목별 과거 시세 조회 수
    pub history_failures: usize,
    /// 소요 시간
    #[serde(skip)]
    pub elapsed: Duration,
}

fn serialize_mode<S: serde::Serializer>(
    mode: &AcquisitionMode,
    serializer: S,
) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(mode.as_str())
}

impl AnalysisStats {
    pub fn new(currency: impl Into<String>, mode: AcquisitionMode) -> Self {
        Self {
            currency: currency.into(),
            mode,
            ..Default::default()
        }
    }

    /// 수익률 계산 비율 (%)
    pub fn yield_coverage(&self) -> f64 {
        if self.total == 0 {
            0.0
        } else {
            (self.with_yield as f64 / self.total as f64) * 100.0
        }
    }

    /// 통계 요약 로그 출력
    pub fn log_summary(&self) {
        tracing::info!(
            currency = %self.currency,
            mode = %self.mode,
            total = self.total,
            with_yield = self.with_yield,
            skipped_missing_isin = self.skipped_missing_isin,
            duplicates_dropped = self.duplicates_dropped,
            history_failures = self.history_failures,
            yield_coverage = format!("{:.1}%", self.yield_coverage()),
            elapsed = format!("{:.1}s", self.elapsed.as_secs_f64()),
            "분석 완료"
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_yield_coverage() {
        let mut stats = AnalysisStats::new("AMD", AcquisitionMode::SameDay);
        assert_eq!(stats.yield_coverage(), 0.0);

        stats.total = 4;
        stats.with_yield = 3;
        assert!((stats.yield_coverage() - 75.0).abs() < 1e-9);
    }

    #[test]
    fn test_serialize_mode_as_text() {
        let stats = AnalysisStats::new("USD", AcquisitionMode::Exhaustive);
        let json = serde_json::to_value(&stats).unwrap();
        assert_eq!(json["mode"], "exhaustive");
        assert!(json.get("elapsed").is_none());
    }
}
