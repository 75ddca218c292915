//! Shared utility functions for drought monitor crates.

/// Date utility functions
pub mod dates {
    use chrono::{DateTime, Datelike, NaiveDate, Utc};

    /// Canonical time format used as the key into time-indexed data.
    pub const CANONICAL_FORMAT: &str = "%Y-%m-%d";

    /// Format a NaiveDate as "YYYY-MM-DD"
    pub fn format_date(date: &NaiveDate) -> String {
        date.format(CANONICAL_FORMAT).to_string()
    }

    /// Parse a date string in "YYYY-MM-DD" format
    pub fn parse_date(s: &str) -> anyhow::Result<NaiveDate> {
        Ok(NaiveDate::parse_from_str(s, CANONICAL_FORMAT)?)
    }

    /// Build a canonical time string from a year and an "MM-DD" period value.
    pub fn join_year_period(year: i32, month_day: &str) -> String {
        format!("{year:04}-{month_day}")
    }

    /// Parse an "MM-DD" period value against a concrete year.
    /// Returns None for impossible dates such as 02-30.
    pub fn period_date(year: i32, month_day: &str) -> Option<NaiveDate> {
        let (month, day) = month_day.split_once('-')?;
        NaiveDate::from_ymd_opt(year, month.parse().ok()?, day.parse().ok()?)
    }

    /// Year component of a date.
    pub fn year_of(date: &NaiveDate) -> i32 {
        date.year()
    }

    /// HTTP-style GMT timestamp, e.g. "Tue, 18 Jun 2024 09:30:00 GMT".
    pub fn gmt_timestamp(now: &DateTime<Utc>) -> String {
        now.format("%a, %d %b %Y %H:%M:%S GMT").to_string()
    }

    #[cfg(test)]
    mod tests {
        use super::*;
        use chrono::TimeZone;

        #[test]
        fn test_format_and_parse() {
            let date = NaiveDate::from_ymd_opt(2023, 6, 15).unwrap();
            let formatted = format_date(&date);
            assert_eq!(formatted, "2023-06-15");
            let parsed = parse_date(&formatted).unwrap();
            assert_eq!(parsed, date);
            assert!(parse_date("2023-13-01").is_err());
        }

        #[test]
        fn test_period_date() {
            assert_eq!(
                period_date(2024, "06-18"),
                NaiveDate::from_ymd_opt(2024, 6, 18)
            );
            assert_eq!(period_date(2023, "02-29"), None);
            assert_eq!(period_date(2023, "garbage"), None);
            assert_eq!(join_year_period(2001, "01-01"), "2001-01-01");
        }

        #[test]
        fn test_gmt_timestamp() {
            let now = Utc.with_ymd_and_hms(2024, 6, 18, 9, 30, 0).unwrap();
            assert_eq!(gmt_timestamp(&now), "Tue, 18 Jun 2024 09:30:00 GMT");
        }
    }
}

/// Rounding helpers shared by the statistics and viewport code.
pub mod numbers {
    /// Round to a fixed number of decimal places.
    pub fn round_to(value: f64, places: u32) -> f64 {
        let factor = 10f64.powi(places as i32);
        (value * factor).round() / factor
    }

    /// Render with exactly two fractional digits.
    pub fn fixed2(value: f64) -> String {
        format!("{:.2}", round_to(value, 2))
    }

    #[cfg(test)]
    mod tests {
        use super::*;

        #[test]
        fn test_round_to() {
            assert_eq!(round_to(0.30000000000000004, 2), 0.3);
            assert_eq!(round_to(1.305, 1), 1.3);
            assert_eq!(round_to(-40.004, 2), -40.0);
        }

        #[test]
        fn test_fixed2() {
            assert_eq!(fixed2(3.0), "3.00");
            assert_eq!(fixed2(-40.0), "-40.00");
            assert_eq!(fixed2(12.3456), "12.35");
        }
    }
}
