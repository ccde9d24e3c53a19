//! 채권 수익률 리포트 포맷팅.
//!
//! 두 가지 출력 형식을 제공합니다:
//! - **콘솔**: 고정 폭 텍스트 표
//! - **알림**: Telegram HTML 서브셋(`<b>`, `<pre>`)으로 감싼 고정 폭 표

use chrono::NaiveDate;

use crate::domain::Bond;

/// 기본 리포트 제목.
pub const DEFAULT_REPORT_TITLE: &str = "AMX Bond Yields Report";

/// 기본 상위 표시 개수.
pub const DEFAULT_TOP_N: usize = 15;

const MISSING_CELL: &str = "-";

/// HTML 마크업에서 의미를 갖는 문자를 이스케이프합니다.
pub fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            _ => escaped.push(ch),
        }
    }
    escaped
}

/// 리포트 요약 통계.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ReportSummary {
    /// 분석한 채권 수
    pub total: usize,
    /// 일본식 수익률이 계산된 채권 수
    pub with_yield: usize,
}

impl ReportSummary {
    /// 채권 목록에서 요약을 계산합니다.
    pub fn from_bonds(bonds: &[Bond]) -> Self {
        Self {
            total: bonds.len(),
            with_yield: bonds.iter().filter(|b| b.has_yield()).count(),
        }
    }
}

/// 채권 리포트 포맷터.
#[derive(Debug, Clone)]
pub struct ReportFormatter {
    /// 리포트 제목
    pub title: String,
    /// 통화 코드 (푸터 표시용)
    pub currency: String,
    /// 상위 표시 개수
    pub top_n: usize,
}

impl ReportFormatter {
    /// 통화별 포맷터를 기본 설정으로 생성합니다.
    pub fn new(currency: impl Into<String>) -> Self {
        Self {
            title: DEFAULT_REPORT_TITLE.to_string(),
            currency: currency.into(),
            top_n: DEFAULT_TOP_N,
        }
    }

    /// 리포트 제목을 설정합니다.
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    /// 상위 표시 개수를 설정합니다.
    pub fn with_top_n(mut self, top_n: usize) -> Self {
        self.top_n = top_n;
        self
    }

    /// 콘솔용 고정 폭 표를 생성합니다.
    ///
    /// 정렬된 목록의 상위 `top_n`개만 표시하며, 값이 없는 칸은 `-`로 표시합니다.
    pub fn format_for_console(&self, bonds: &[Bond]) -> String {
        if bonds.is_empty() {
            return "No bonds to display.".to_string();
        }

        let shown = &bonds[..bonds.len().min(self.top_n)];
        let index_width = shown.len().saturating_sub(1).to_string().len();

        let mut lines = Vec::with_capacity(shown.len() + 1);
        lines.push(format!(
            "{:<iw$}  {:<10} {:<13} {:>10} {:>11} {:<16} {:>14}",
            "",
            "ticker",
            "maturity_date",
            "ask_price",
            "coupon_rate",
            "coupon_frequency",
            "japanese_yield",
            iw = index_width,
        ));

        for (index, bond) in shown.iter().enumerate() {
            let frequency = bond
                .coupon_frequency
                .as_ref()
                .map(|f| f.to_string())
                .unwrap_or_else(|| MISSING_CELL.to_string());

            lines.push(format!(
                "{:<iw$}  {:<10} {:<13} {:>10} {:>11} {:<16} {:>14}",
                index,
                truncate(&bond.ticker, 10),
                truncate(bond.maturity_date.as_deref().unwrap_or(MISSING_CELL), 13),
                format_cell(bond.ask_price),
                format_cell(bond.coupon_rate),
                truncate(&frequency, 16),
                format_cell(bond.japanese_yield),
                iw = index_width,
            ));
        }

        lines.join("\n")
    }

    /// 콘솔용 요약 통계 문구.
    pub fn format_statistics(&self, bonds: &[Bond]) -> String {
        let summary = ReportSummary::from_bonds(bonds);
        format!(
            "Total {} bonds: {}\nBonds with Japanese yield: {}",
            self.currency, summary.total, summary.with_yield
        )
    }

    /// 알림용 HTML 메시지를 생성합니다.
    ///
    /// 상위 `top_n`개 중 수익률이 있는 채권만 표에 포함하고,
    /// 푸터에는 분석한 전체 채권 수를 표시합니다.
    pub fn format_for_notification(&self, bonds: &[Bond], date: NaiveDate) -> String {
        let mut lines = vec![
            format!("📊 <b>{}</b>", escape_html(&self.title)),
            format!("📅 {}\n", date.format("%Y-%m-%d")),
            "<b>Top Bonds by Japanese Yield:</b>\n".to_string(),
            "<pre>".to_string(),
            format!(
                "{:<8} {:<12} {:>7} {:>5} {:>6}",
                "Ticker", "Maturity", "Price", "Cpn%", "Yield%"
            ),
            "-".repeat(45),
        ];

        for bond in bonds.iter().take(self.top_n) {
            let Some(japanese_yield) = bond.japanese_yield else {
                continue;
            };

            let row = format!(
                "{:<8} {:<12} {:>7} {:>5} {:>6.2}",
                bond.ticker,
                bond.maturity_date.as_deref().unwrap_or(MISSING_CELL),
                format_cell(bond.ask_price),
                format_cell(bond.coupon_rate),
                japanese_yield,
            );
            lines.push(escape_html(&row));
        }

        lines.push("</pre>".to_string());
        lines.push(format!(
            "\n📈 Total {} bonds analyzed: {}",
            escape_html(&self.currency),
            bonds.len()
        ));

        lines.join("\n")
    }
}

fn format_cell(value: Option<f64>) -> String {
    value
        .map(|v| format!("{v:.2}"))
        .unwrap_or_else(|| MISSING_CELL.to_string())
}

fn truncate(text: &str, width: usize) -> String {
    text.chars().take(width).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::CouponFrequency;

    fn date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 1, 1).unwrap()
    }

    fn priced(ticker: &str, japanese_yield: Option<f64>) -> Bond {
        let mut bond = Bond::new(ticker, format!("AM{ticker}"))
            .with_maturity_date("2027-06-30")
            .with_ask_price(97.5)
            .with_coupon_rate(10.0)
            .with_par_value(100000.0);
        bond.coupon_frequency = Some(CouponFrequency::SemiAnnually);
        bond.japanese_yield = japanese_yield;
        bond
    }

    #[test]
    fn test_escape_html() {
        assert_eq!(escape_html("A&B <x>"), "A&amp;B &lt;x&gt;");
        assert_eq!(escape_html("plain"), "plain");
    }

    #[test]
    fn test_console_columns_and_truncation() {
        let bonds: Vec<Bond> = (0..20).map(|i| priced(&format!("T{i}"), Some(10.0))).collect();
        let formatter = ReportFormatter::new("AMD");
        let output = formatter.format_for_console(&bonds);
        let lines: Vec<&str> = output.lines().collect();

        assert_eq!(lines.len(), DEFAULT_TOP_N + 1);
        assert!(lines[0].contains("ticker"));
        assert!(lines[0].contains("coupon_frequency"));
        assert!(lines[0].contains("japanese_yield"));
        assert!(lines[1].contains("T0"));
        assert!(lines[1].contains("Semi-Annually"));
        assert!(lines[1].contains("97.50"));
        assert!(!output.contains("T15"));
    }

    #[test]
    fn test_console_missing_values() {
        let bond = Bond::new("BARE", "AMBARE");
        let output = ReportFormatter::new("AMD").format_for_console(&[bond]);
        let row = output.lines().nth(1).unwrap();
        assert!(row.contains("BARE"));
        assert!(row.contains('-'));
    }

    #[test]
    fn test_console_empty() {
        let output = ReportFormatter::new("AMD").format_for_console(&[]);
        assert_eq!(output, "No bonds to display.");
    }

    #[test]
    fn test_statistics() {
        let bonds = vec![priced("A", Some(9.0)), priced("B", None)];
        let stats = ReportFormatter::new("USD").format_statistics(&bonds);
        assert_eq!(stats, "Total USD bonds: 2\nBonds with Japanese yield: 1");
    }

    #[test]
    fn test_notification_skips_missing_yield() {
        let bonds = vec![priced("GOOD", Some(11.74)), priced("NOYLD", None)];
        let text = ReportFormatter::new("AMD").format_for_notification(&bonds, date());

        assert!(text.starts_with("📊 <b>AMX Bond Yields Report</b>\n📅 2025-01-01\n"));
        assert!(text.contains("<pre>"));
        assert!(text.contains("GOOD     2027-06-30     97.50 10.00  11.74"));
        assert!(!text.contains("NOYLD"));
        assert!(text.ends_with("📈 Total AMD bonds analyzed: 2"));
    }

    #[test]
    fn test_notification_respects_top_n() {
        let bonds = vec![priced("FIRST", Some(12.0)), priced("SECOND", Some(11.0))];
        let text = ReportFormatter::new("AMD")
            .with_top_n(1)
            .format_for_notification(&bonds, date());
        assert!(text.contains("FIRST"));
        assert!(!text.contains("SECOND"));
        assert!(text.ends_with("analyzed: 2"));
    }

    #[test]
    fn test_notification_empty() {
        let text = ReportFormatter::new("AMD").format_for_notification(&[], date());
        assert!(text.contains("AMX Bond Yields Report"));
        assert!(text.contains("</pre>"));
        assert!(text.ends_with("📈 Total AMD bonds analyzed: 0"));
    }

    #[test]
    fn test_notification_escapes_markup() {
        let bond = priced("A<B>&C", Some(8.0));
        let text = ReportFormatter::new("AMD")
            .with_title("Bonds & <Yields>")
            .format_for_notification(&[bond], date());
        assert!(text.contains("<b>Bonds &amp; &lt;Yields&gt;</b>"));
        assert!(text.contains("A&lt;B&gt;&amp;C"));
    }
}
