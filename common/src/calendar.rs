//! Contribution calendar snapshot: weeks of days of counts.
//!
//! A snapshot is built once per polling cycle from whatever the calendar
//! source returned, rendered, and dropped. Capacities are fixed so the whole
//! structure lives on the stack:
//!
//! - a week holds at most [`DAYS_PER_WEEK`] days
//! - a snapshot holds at most [`MAX_WEEKS`] weeks
//!
//! Weekday values are stored as supplied. The layout engine validates them
//! when placing cells instead of rejecting the snapshot.

use chrono::NaiveDate;
use heapless::Vec;
use thiserror::Error;

use crate::config::DAYS_PER_WEEK;

/// Maximum weeks in one snapshot. A one-year query spans 53 weeks plus a
/// partial week at either edge, which is the widest window the source allows.
pub const MAX_WEEKS: usize = 54;

/// Rejected while assembling a snapshot.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum CalendarError {
    #[error("week starting {0} already holds {max} days", max = DAYS_PER_WEEK)]
    WeekFull(NaiveDate),
    #[error("calendar holds at most {max} weeks", max = MAX_WEEKS)]
    TooManyWeeks,
}

// =============================================================================
// Day / Week Records
// =============================================================================

/// Activity for a single day.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DayRecord {
    pub date: NaiveDate,
    /// 0 = Sunday .. 6 = Saturday. Trusted from the source, validated at layout.
    pub weekday: u8,
    pub count: u32,
}

impl DayRecord {
    pub const fn new(
        date: NaiveDate,
        weekday: u8,
        count: u32,
    ) -> Self {
        Self { date, weekday, count }
    }

    /// Row index if the weekday is in range.
    #[inline]
    pub const fn row(&self) -> Option<usize> {
        if (self.weekday as usize) < DAYS_PER_WEEK { Some(self.weekday as usize) } else { None }
    }
}

/// One grid column: up to seven chronological days.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct WeekRecord {
    first_day: NaiveDate,
    days: Vec<DayRecord, DAYS_PER_WEEK>,
}

impl WeekRecord {
    pub const fn new(first_day: NaiveDate) -> Self { Self { first_day, days: Vec::new() } }

    /// Append the next day. Fails once the week is full.
    pub fn push_day(
        &mut self,
        day: DayRecord,
    ) -> Result<(), CalendarError> {
        self.days.push(day).map_err(|_| CalendarError::WeekFull(self.first_day))
    }

    #[inline]
    pub const fn first_day(&self) -> NaiveDate { self.first_day }

    #[inline]
    pub fn days(&self) -> &[DayRecord] { &self.days }

    /// Sum of the counts in this week.
    pub fn total(&self) -> u64 { self.days.iter().map(|d| u64::from(d.count)).sum() }
}

// =============================================================================
// Calendar Snapshot
// =============================================================================

/// The calendar as fetched in one polling cycle, oldest week first.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CalendarSnapshot {
    total_contributions: u32,
    weeks: Vec<WeekRecord, MAX_WEEKS>,
}

impl CalendarSnapshot {
    /// Empty snapshot carrying the source's aggregate total.
    pub const fn new(total_contributions: u32) -> Self { Self { total_contributions, weeks: Vec::new() } }

    /// Append the next (newer) week.
    pub fn push_week(
        &mut self,
        week: WeekRecord,
    ) -> Result<(), CalendarError> {
        self.weeks.push(week).map_err(|_| CalendarError::TooManyWeeks)
    }

    /// Aggregate reported by the source. Used for change detection and the header.
    #[inline]
    pub const fn total_contributions(&self) -> u32 { self.total_contributions }

    #[inline]
    pub fn weeks(&self) -> &[WeekRecord] { &self.weeks }

    /// The trailing `count` weeks, or all of them if fewer are stored.
    pub fn trailing_weeks(
        &self,
        count: usize,
    ) -> &[WeekRecord] {
        let start = self.weeks.len().saturating_sub(count);
        &self.weeks[start..]
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
