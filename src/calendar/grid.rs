//! Visible-day grid for a month view.
//!
//! The grid runs from the start of the week containing the 1st of the
//! reference month to the end of the week containing its last day, so it
//! always holds whole weeks (4 to 6 of them) and every day of the month.

use chrono::{Datelike, Days, NaiveDate, Weekday};

use super::month::ReferenceMonth;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CalendarDay {
    pub date: NaiveDate,
    /// False for overflow days borrowed from the neighbouring months.
    pub in_month: bool,
}

#[derive(Debug, Clone)]
pub struct MonthGrid {
    pub reference: ReferenceMonth,
    pub week_start: Weekday,
    pub days: Vec<CalendarDay>,
}

impl MonthGrid {
    pub fn build(reference: ReferenceMonth, week_start: Weekday) -> Self {
        let first = reference.first_day();
        let last = reference.last_day();

        let lead = days_after(week_start, first.weekday());
        let trail = days_after(last.weekday(), week_start.pred());

        let start = first.checked_sub_days(Days::new(lead)).unwrap_or(first);
        let end = last.checked_add_days(Days::new(trail)).unwrap_or(last);

        let days: Vec<CalendarDay> = start
            .iter_days()
            .take_while(|d| *d <= end)
            .map(|date| CalendarDay {
                date,
                in_month: reference.contains(date),
            })
            .collect();

        log::debug!(
            "built grid for {}: {} days from {} to {}",
            reference,
            days.len(),
            start,
            end
        );

        Self {
            reference,
            week_start,
            days,
        }
    }

    pub fn week_count(&self) -> usize {
        self.days.len().div_ceil(7)
    }

    pub fn first_date(&self) -> Option<NaiveDate> {
        self.days.first().map(|d| d.date)
    }

    pub fn last_date(&self) -> Option<NaiveDate> {
        self.days.last().map(|d| d.date)
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        match (self.first_date(), self.last_date()) {
            (Some(first), Some(last)) => first <= date && date <= last,
            _ => false,
        }
    }

    /// Column headers, rotated so the configured week start comes first.
    pub fn weekday_labels(&self) -> [&'static str; 7] {
        weekday_labels(self.week_start)
    }
}

pub fn weekday_labels(week_start: Weekday) -> [&'static str; 7] {
    let mut labels = [""; 7];
    let mut day = week_start;
    for label in labels.iter_mut() {
        *label = short_name(day);
        day = day.succ();
    }
    labels
}

fn short_name(day: Weekday) -> &'static str {
    match day {
        Weekday::Mon => "Mon",
        Weekday::Tue => "Tue",
        Weekday::Wed => "Wed",
        Weekday::Thu => "Thu",
        Weekday::Fri => "Fri",
        Weekday::Sat => "Sat",
        Weekday::Sun => "Sun",
    }
}

/// Number of days from `from` forward to `to` (0..=6).
fn days_after(from: Weekday, to: Weekday) -> u64 {
    let from = from.num_days_from_monday();
    let to = to.num_days_from_monday();
    u64::from((7 + to - from) % 7)
}
