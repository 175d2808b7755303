//! Export filename derivation.

use chrono::{Local, NaiveDate};
use once_cell::sync::Lazy;
use regex::Regex;

static WHITESPACE_RUN_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\s+").expect("valid whitespace regex"));

/// `week-<title with whitespace runs replaced by "_">-<date>.csv`.
pub fn week_export_filename(title: &str, date: &str) -> String {
    format!("week-{}-{date}.csv", WHITESPACE_RUN_RE.replace_all(title, "_"))
}

/// `summary-<YYYY>-<MM>-<DD>.csv` for the given day, zero padded.
pub fn summary_export_filename(on: NaiveDate) -> String {
    on.format("summary-%Y-%m-%d.csv").to_string()
}

/// Summary filename stamped with today's local date.
pub fn summary_export_filename_today() -> String {
    summary_export_filename(Local::now().date_naive())
}

#[cfg(test)]
mod tests {
    use super::{summary_export_filename, week_export_filename};
    use chrono::NaiveDate;

    #[test]
    fn week_filename_collapses_whitespace_runs() {
        assert_eq!(
            week_export_filename("Parshas  Noach\tweek", "2024-11-02"),
            "week-Parshas_Noach_week-2024-11-02.csv"
        );
    }

    #[test]
    fn summary_filename_is_zero_padded() {
        let day = NaiveDate::from_ymd_opt(2025, 3, 7).unwrap();
        assert_eq!(summary_export_filename(day), "summary-2025-03-07.csv");
    }
}
