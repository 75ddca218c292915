//! Year / period slider state.
//!
//! The cursor is a `(year, period_index)` pair. The first and last year of
//! the archive are usually partial, so the selectable period range narrows
//! for those years and every mutation clamps into it.

use crate::error::{DmError, Result};
use crate::periods::PeriodGranularity;
use chrono::NaiveDate;
use dm_utils::dates::{join_year_period, parse_date, period_date, year_of};
use std::ops::RangeInclusive;

/// Dates spanned by the archive.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Coverage {
    pub min_date: NaiveDate,
    pub max_date: NaiveDate,
    /// Last date with published data. Lags `max_date` while a release is
    /// being ingested.
    pub max_available: NaiveDate,
}

impl Coverage {
    pub fn parse(min_date: &str, max_date: &str, max_available: Option<&str>) -> Result<Self> {
        let parse = |s: &str| parse_date(s).map_err(|e| DmError::DateParse(format!("{s}: {e}")));
        let min_date = parse(min_date)?;
        let max_date = parse(max_date)?;
        if min_date > max_date {
            return Err(DmError::DateParse(format!(
                "coverage starts after it ends ({min_date} > {max_date})"
            )));
        }
        let max_available = match max_available {
            Some(s) => parse(s)?,
            None => max_date,
        };
        Ok(Self {
            min_date,
            max_date,
            max_available,
        })
    }

    pub fn min_year(&self) -> i32 {
        year_of(&self.min_date)
    }

    pub fn max_year(&self) -> i32 {
        year_of(&self.max_date)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct TimeSelector {
    granularity: PeriodGranularity,
    coverage: Coverage,
    year: i32,
    period_index: usize,
    sliding: bool,
    warning: bool,
}

impl TimeSelector {
    /// Cursor starts at the first selectable period of the first year.
    pub fn new(granularity: PeriodGranularity, coverage: Coverage) -> Self {
        let year = coverage.min_year();
        let mut selector = Self {
            granularity,
            coverage,
            year,
            period_index: 0,
            sliding: false,
            warning: false,
        };
        selector.period_index = *selector.period_bounds(year).start();
        selector.refresh_warning();
        selector
    }

    pub fn granularity(&self) -> PeriodGranularity {
        self.granularity
    }

    pub fn coverage(&self) -> &Coverage {
        &self.coverage
    }

    pub fn year(&self) -> i32 {
        self.year
    }

    pub fn period_index(&self) -> usize {
        self.period_index
    }

    pub fn min_year(&self) -> i32 {
        self.coverage.min_year()
    }

    pub fn max_year(&self) -> i32 {
        self.coverage.max_year()
    }

    /// Selectable period indices for `year`.
    pub fn period_bounds(&self, year: i32) -> RangeInclusive<usize> {
        let values = self.granularity.values();
        let last = values.len() - 1;
        let mut lo = 0;
        let mut hi = last;
        if year == self.min_year() {
            lo = values
                .iter()
                .position(|md| period_date(year, md).is_some_and(|d| d >= self.coverage.min_date))
                .unwrap_or(last);
        }
        if year == self.max_year() {
            hi = values
                .iter()
                .rposition(|md| period_date(year, md).is_some_and(|d| d <= self.coverage.max_date))
                .unwrap_or(lo);
        }
        // A single-year archive can leave no period inside both bounds.
        lo..=hi.max(lo)
    }

    /// Move to a new year, pulling the period back inside that year's range.
    pub fn set_year(&mut self, year: i32) {
        self.year = year.clamp(self.min_year(), self.max_year());
        let bounds = self.period_bounds(self.year);
        self.period_index = self.period_index.clamp(*bounds.start(), *bounds.end());
        self.refresh_warning();
    }

    /// Select a period; out-of-range indices are clamped, never applied.
    pub fn set_period_index(&mut self, index: usize) {
        let bounds = self.period_bounds(self.year);
        if !bounds.contains(&index) {
            log::debug!(
                "period index {index} outside {:?} for {}, clamping",
                bounds,
                self.year
            );
        }
        self.period_index = index.clamp(*bounds.start(), *bounds.end());
        self.refresh_warning();
    }

    /// Move the cursor onto an exact canonical time from the catalog.
    pub fn select_time(&mut self, time: &str) -> Result<()> {
        let date = parse_date(time).map_err(|e| DmError::DateParse(format!("{time}: {e}")))?;
        let year = year_of(&date);
        let month_day = time.get(5..).unwrap_or_default();
        let index = self
            .granularity
            .values()
            .iter()
            .position(|md| *md == month_day)
            .ok_or_else(|| DmError::DateParse(format!("{time} is not a published period")))?;
        if year < self.min_year() || year > self.max_year() || !self.period_bounds(year).contains(&index) {
            return Err(DmError::DateParse(format!("{time} is outside the archive")));
        }
        self.year = year;
        self.period_index = index;
        self.refresh_warning();
        Ok(())
    }

    /// "MM-DD" value of the current period.
    pub fn period_value(&self) -> &'static str {
        self.granularity.values()[self.period_index]
    }

    /// Canonical `YYYY-MM-DD` key for the current cursor.
    pub fn canonical_time(&self) -> String {
        join_year_period(self.year, self.period_value())
    }

    pub fn data_available(&self) -> bool {
        period_date(self.year, self.period_value())
            .is_some_and(|d| d <= self.coverage.max_available)
    }

    /// Region picker visibility for a `requested` state at the current
    /// cursor. The picker can only be on over published data.
    pub fn region_picker_allowed(&self, requested: bool) -> bool {
        requested && self.data_available()
    }

    pub fn set_sliding(&mut self, sliding: bool) {
        self.sliding = sliding;
    }

    pub fn sliding(&self) -> bool {
        self.sliding
    }

    /// Whether the out-of-range warning overlay is showing.
    pub fn show_warning(&self) -> bool {
        self.warning
    }

    /// Close the overlay; it reappears on the next unavailable selection.
    pub fn dismiss_warning(&mut self) {
        self.warning = false;
    }

    /// Replace the availability date, e.g. once a release finishes ingesting.
    pub fn set_max_available(&mut self, date: NaiveDate) {
        self.coverage.max_available = date;
        self.refresh_warning();
    }

    fn refresh_warning(&mut self) {
        self.warning = !self.data_available();
    }
}
