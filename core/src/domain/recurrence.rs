//! Recurrence engine for scheduled care events.
//!
//! This module contains the pure scheduling logic: classifying an event's
//! due timestamp into a status bucket relative to "now", and computing the
//! replacement due timestamp once an event is completed, including the
//! catch-up rule for events completed late. Callers capture "now" once per
//! operation and pass it in, which keeps every function here a deterministic
//! function of its arguments.
//!
//! All arithmetic is calendar arithmetic on local wall-clock timestamps:
//! a week is 7 calendar days, months and years follow month lengths and
//! leap years (with end-of-month clamping), never a fixed duration.

use chrono::{Datelike, Duration, Months, NaiveDateTime};
use log::{debug, warn};
use shared::{EventStatus, IntervalUnit};

/// Upper bound on catch-up steps for late completions. Guards degenerate
/// interval configurations such as a zero-length step.
const MAX_CATCH_UP_STEPS: u32 = 1000;

/// Pure calendar/scheduling logic for events.
#[derive(Clone)]
pub struct RecurrenceEngine;

impl RecurrenceEngine {
    pub fn new() -> Self {
        Self
    }

    /// Classify a due timestamp relative to `now`.
    ///
    /// Tier order is fixed: same calendar day wins, then overdue, then the
    /// first upcoming granularity that fits (whole-day gap <= 7 reports in
    /// days, whole-week gap <= 4 in weeks, whole-month gap <= 12 in months,
    /// anything else in years). Each tier's count is its own calendar
    /// difference, so neighbouring tiers can disagree about the magnitude;
    /// that behaviour is load-bearing for callers and kept as is.
    pub fn classify(&self, due_at: NaiveDateTime, now: NaiveDateTime) -> EventStatus {
        if due_at.date() == now.date() {
            return EventStatus::Today;
        }
        if due_at < now {
            return EventStatus::Overdue;
        }

        let days = self.whole_days_between(now, due_at);
        if days <= 7 {
            return EventStatus::Upcoming(days, IntervalUnit::Day);
        }
        let weeks = self.whole_weeks_between(now, due_at);
        if weeks <= 4 {
            return EventStatus::Upcoming(weeks, IntervalUnit::Week);
        }
        let months = self.whole_months_between(now, due_at);
        if months <= 12 {
            return EventStatus::Upcoming(months, IntervalUnit::Month);
        }
        EventStatus::Upcoming(self.whole_years_between(now, due_at), IntervalUnit::Year)
    }

    /// Compute the replacement due timestamp for an event just completed.
    ///
    /// A due timestamp that is today or still in the future advances by one
    /// step from the due timestamp itself, preserving the schedule's phase.
    /// A stale due timestamp (late completion) is caught up by stepping from
    /// `now` instead, so the result lands after the missed occurrence rather
    /// than in the past. Arithmetic failures leave the timestamp unchanged.
    pub fn next_occurrence(
        &self,
        due_at: NaiveDateTime,
        now: NaiveDateTime,
        interval: i32,
        unit: IntervalUnit,
    ) -> NaiveDateTime {
        if due_at >= now || due_at.date() == now.date() {
            return self.advance(due_at, interval, unit).unwrap_or(due_at);
        }
        self.catch_up(due_at, now, interval, unit)
    }

    /// Step from `now` until the candidate passes the stale due timestamp:
    /// the smallest k >= 1 with `now + k*step > due_at`. Bounded at
    /// [`MAX_CATCH_UP_STEPS`]; at the bound the last candidate is returned.
    fn catch_up(
        &self,
        due_at: NaiveDateTime,
        now: NaiveDateTime,
        interval: i32,
        unit: IntervalUnit,
    ) -> NaiveDateTime {
        debug!(
            "Catching up overdue event: due {}, now {}, step {} {:?}",
            due_at, now, interval, unit
        );

        let mut candidate = now;
        let mut steps = 0;
        loop {
            candidate = match self.advance(candidate, interval, unit) {
                Some(next) => next,
                None => break,
            };
            steps += 1;
            if candidate > due_at {
                break;
            }
            if steps >= MAX_CATCH_UP_STEPS {
                warn!(
                    "Catch-up hit the {} step bound (step {} {:?}); keeping last candidate {}",
                    MAX_CATCH_UP_STEPS, interval, unit, candidate
                );
                break;
            }
        }
        candidate
    }

    /// Advance a timestamp by `count` units of calendar arithmetic.
    /// Returns `None` when the resulting date cannot be represented.
    pub fn advance(
        &self,
        timestamp: NaiveDateTime,
        count: i32,
        unit: IntervalUnit,
    ) -> Option<NaiveDateTime> {
        let count = i64::from(count);
        match unit {
            IntervalUnit::Hour => timestamp.checked_add_signed(Duration::hours(count)),
            IntervalUnit::Day => timestamp.checked_add_signed(Duration::days(count)),
            IntervalUnit::Week => timestamp.checked_add_signed(Duration::days(count * 7)),
            IntervalUnit::Month => self.shift_months(timestamp, count),
            IntervalUnit::Year => self.shift_months(timestamp, count * 12),
        }
    }

    /// Whether a completion at `completed_at` counts as on time for a due
    /// timestamp: the completion day must not be after the due day. Time of
    /// day is ignored, so finishing later the same day is still on time.
    pub fn is_on_time(&self, due_at: NaiveDateTime, completed_at: NaiveDateTime) -> bool {
        completed_at.date() <= due_at.date()
    }

    /// Whole elapsed days from `from` to `to`, truncated.
    pub fn whole_days_between(&self, from: NaiveDateTime, to: NaiveDateTime) -> i64 {
        (to - from).num_days()
    }

    /// Whole elapsed 7-day weeks from `from` to `to`, truncated.
    pub fn whole_weeks_between(&self, from: NaiveDateTime, to: NaiveDateTime) -> i64 {
        (to - from).num_weeks()
    }

    /// Complete calendar months from `from` to `to`: the largest n such that
    /// `from + n months <= to`, with end-of-month clamping.
    pub fn whole_months_between(&self, from: NaiveDateTime, to: NaiveDateTime) -> i64 {
        let mut months = (i64::from(to.year()) - i64::from(from.year())) * 12
            + (i64::from(to.month()) - i64::from(from.month()));
        // The field estimate overshoots when the day or clock time of the
        // target month has not been reached yet.
        while months > 0 {
            match self.shift_months(from, months) {
                Some(candidate) if candidate > to => months -= 1,
                _ => break,
            }
        }
        while let Some(candidate) = self.shift_months(from, months + 1) {
            if candidate <= to {
                months += 1;
            } else {
                break;
            }
        }
        months
    }

    /// Complete calendar years from `from` to `to`, same rules as
    /// [`whole_months_between`](Self::whole_months_between).
    pub fn whole_years_between(&self, from: NaiveDateTime, to: NaiveDateTime) -> i64 {
        let mut years = i64::from(to.year()) - i64::from(from.year());
        while years > 0 {
            match self.shift_months(from, years * 12) {
                Some(candidate) if candidate > to => years -= 1,
                _ => break,
            }
        }
        while let Some(candidate) = self.shift_months(from, (years + 1) * 12) {
            if candidate <= to {
                years += 1;
            } else {
                break;
            }
        }
        years
    }

    fn shift_months(&self, timestamp: NaiveDateTime, months: i64) -> Option<NaiveDateTime> {
        if months >= 0 {
            let months = u32::try_from(months).ok()?;
            timestamp.checked_add_months(Months::new(months))
        } else {
            let months = u32::try_from(-months).ok()?;
            timestamp.checked_sub_months(Months::new(months))
        }
    }
}

impl Default for RecurrenceEngine {
    fn default() -> Self {
        Self::new()
    }
}
