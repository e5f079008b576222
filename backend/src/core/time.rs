//! Calendar clock for the simulation
//!
//! The simulation advances one calendar day at a time, not one tick at a
//! time: schedules are expressed in day-of-month salary dates, year-end tax
//! days, and month boundaries, so the clock tracks a [`chrono::NaiveDate`]
//! rather than a tick counter.

use chrono::{Datelike, Duration, NaiveDate};
use serde::{Deserialize, Serialize};

/// Tracks the simulation's current calendar date and advances it one day
/// at a time.
///
/// # Example
/// ```
/// use chrono::NaiveDate;
/// use future_wallet_core::core::time::SimClock;
///
/// let start = NaiveDate::from_ymd_opt(2026, 1, 1).unwrap();
/// let mut clock = SimClock::new(start);
/// assert_eq!(clock.current_date(), start);
///
/// clock.advance_day();
/// assert_eq!(clock.current_date(), NaiveDate::from_ymd_opt(2026, 1, 2).unwrap());
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SimClock {
    /// The date the clock started at
    start_date: NaiveDate,
    /// Number of days elapsed since `start_date`
    elapsed_days: i64,
}

impl SimClock {
    /// Create a new clock pinned to the given start date.
    ///
    /// # Example
    /// ```
    /// use chrono::NaiveDate;
    /// use future_wallet_core::core::time::SimClock;
    ///
    /// let clock = SimClock::new(NaiveDate::from_ymd_opt(2026, 1, 1).unwrap());
    /// assert_eq!(clock.day_index(), 0);
    /// ```
    pub fn new(start_date: NaiveDate) -> Self {
        Self {
            start_date,
            elapsed_days: 0,
        }
    }

    /// Advance the clock by one day.
    ///
    /// # Example
    /// ```
    /// use chrono::NaiveDate;
    /// use future_wallet_core::core::time::SimClock;
    ///
    /// let mut clock = SimClock::new(NaiveDate::from_ymd_opt(2026, 1, 1).unwrap());
    /// clock.advance_day();
    /// assert_eq!(clock.day_index(), 1);
    /// ```
    pub fn advance_day(&mut self) {
        self.elapsed_days += 1;
    }

    /// The current simulated date.
    pub fn current_date(&self) -> NaiveDate {
        self.start_date + Duration::days(self.elapsed_days)
    }

    /// Zero-indexed count of days elapsed since `start_date`.
    pub fn day_index(&self) -> i64 {
        self.elapsed_days
    }

    /// `true` on the first day of the calendar month.
    ///
    /// # Example
    /// ```
    /// use chrono::NaiveDate;
    /// use future_wallet_core::core::time::SimClock;
    ///
    /// let mut clock = SimClock::new(NaiveDate::from_ymd_opt(2026, 1, 31).unwrap());
    /// assert!(!clock.is_month_start());
    /// clock.advance_day();
    /// assert!(clock.is_month_start());
    /// ```
    pub fn is_month_start(&self) -> bool {
        self.current_date().day() == 1
    }

    /// `true` on December 31st — the fixed annual tax/settlement day.
    pub fn is_year_end(&self) -> bool {
        let date = self.current_date();
        date.month() == 12 && date.day() == 31
    }

    /// The start date the clock was constructed with.
    pub fn start_date(&self) -> NaiveDate {
        self.start_date
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    #[test]
    fn advance_day_steps_calendar_forward_across_month_boundary() {
        let mut clock = SimClock::new(d(2026, 1, 31));
        clock.advance_day();
        assert_eq!(clock.current_date(), d(2026, 2, 1));
        assert!(clock.is_month_start());
    }

    #[test]
    fn is_year_end_only_true_on_december_31() {
        let mut clock = SimClock::new(d(2026, 12, 30));
        assert!(!clock.is_year_end());
        clock.advance_day();
        assert!(clock.is_year_end());
        clock.advance_day();
        assert!(!clock.is_year_end());
    }

    #[test]
    fn day_index_tracks_elapsed_days_not_calendar_day() {
        let mut clock = SimClock::new(d(2026, 3, 15));
        for _ in 0..40 {
            clock.advance_day();
        }
        assert_eq!(clock.day_index(), 40);
        assert_eq!(clock.current_date(), d(2026, 4, 24));
    }
}
