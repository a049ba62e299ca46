//! Time-of-day and weekday filtering of visit records.
//!
//! Analysis sessions usually look at a slice of the event: "Saturday and
//! Sunday, between 10:00 and 16:00". [`VisitFilter`] captures that slice as
//! a value so the hosting layer can keep it alongside the rest of its
//! session state and re-apply it on every re-render.
//!
//! Both bounds of the time window are inclusive, and an empty weekday
//! selection means "all weekdays" — clearing the selection widens the filter
//! rather than emptying the result.

use chrono::{Datelike, NaiveTime, Timelike, Weekday};
use rustc_hash::FxHashSet;

use crate::records::VisitRecord;

/// Filter over visit records by time-of-day window and weekday set.
///
/// Built fluently, applied as a pure function:
///
/// ```
/// use chrono::{NaiveTime, Weekday};
/// use stampgraph::filter::VisitFilter;
///
/// let filter = VisitFilter::new()
///     .with_time_window(
///         NaiveTime::from_hms_opt(10, 0, 0).unwrap(),
///         NaiveTime::from_hms_opt(16, 0, 0).unwrap(),
///     )
///     .with_weekdays([Weekday::Sat, Weekday::Sun]);
///
/// let kept = filter.apply(&[]);
/// assert!(kept.is_empty());
/// ```
#[derive(Clone, Debug, Default)]
pub struct VisitFilter {
    window: Option<(NaiveTime, NaiveTime)>,
    weekdays: FxHashSet<Weekday>,
}

impl VisitFilter {
    /// Creates a filter that keeps everything.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Restricts records to those whose time-of-day lies in `[start, end]`.
    ///
    /// Dates are ignored; only the clock component of each timestamp is
    /// compared. Both bounds are inclusive.
    #[must_use]
    pub fn with_time_window(mut self, start: NaiveTime, end: NaiveTime) -> Self {
        self.window = Some((start, end));
        self
    }

    /// Restricts records to the given weekdays.
    ///
    /// Passing an empty iterator leaves the filter unrestricted, matching
    /// the "nothing selected means everything" convention of the analysis
    /// front-ends this crate serves.
    #[must_use]
    pub fn with_weekdays(mut self, weekdays: impl IntoIterator<Item = Weekday>) -> Self {
        self.weekdays = weekdays.into_iter().collect();
        self
    }

    /// Returns `true` if the record survives the filter.
    #[must_use]
    pub fn matches(&self, record: &VisitRecord) -> bool {
        if let Some((start, end)) = self.window {
            let t = record.timestamp.time();
            // NaiveTime compares with sub-second precision; truncate so a
            // 10:00:00.500 record still matches an end bound of 10:00:00.
            let t = NaiveTime::from_hms_opt(t.hour(), t.minute(), t.second()).unwrap_or(t);
            if t < start || t > end {
                return false;
            }
        }
        if !self.weekdays.is_empty() && !self.weekdays.contains(&record.timestamp.weekday()) {
            return false;
        }
        true
    }

    /// Applies the filter, preserving input order.
    #[must_use]
    pub fn apply(&self, records: &[VisitRecord]) -> Vec<VisitRecord> {
        records
            .iter()
            .filter(|r| self.matches(r))
            .cloned()
            .collect()
    }
}
