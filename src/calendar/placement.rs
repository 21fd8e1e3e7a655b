use std::collections::HashMap;

use chrono::NaiveDate;

use super::event::CalendarEvent;
use super::grid::{CalendarDay, MonthGrid};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlacedEvent<'a> {
    pub event: &'a CalendarEvent,
    /// Shares its start time with at least one other event that day.
    pub conflict: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct DayCell<'a> {
    pub day: CalendarDay,
    pub events: Vec<PlacedEvent<'a>>,
}

impl DayCell<'_> {
    pub fn has_conflict(&self) -> bool {
        self.events.iter().any(|p| p.conflict)
    }
}

/// Attach events to the grid days they fall on, in list order, and flag
/// start-time conflicts. Events dated outside the grid are dropped.
pub fn place_events<'a>(grid: &MonthGrid, events: &'a [CalendarEvent]) -> Vec<DayCell<'a>> {
    let mut by_day: HashMap<NaiveDate, Vec<&'a CalendarEvent>> = HashMap::new();
    for ev in events {
        if let Some(day) = ev.day() {
            if grid.contains(day) {
                by_day.entry(day).or_default().push(ev);
            }
        }
    }

    log::debug!(
        "placed {} of {} events on {} days",
        by_day.values().map(Vec::len).sum::<usize>(),
        events.len(),
        by_day.len()
    );

    grid.days
        .iter()
        .map(|day| DayCell {
            day: *day,
            events: by_day
                .remove(&day.date)
                .map(|day_events| flag_conflicts(&day_events))
                .unwrap_or_default(),
        })
        .collect()
}

/// Events dated `date`, in list order, with conflict flags.
pub fn events_on(date: NaiveDate, events: &[CalendarEvent]) -> Vec<PlacedEvent<'_>> {
    let day_events: Vec<&CalendarEvent> = events.iter().filter(|e| e.day() == Some(date)).collect();
    flag_conflicts(&day_events)
}

/// For each event, whether another event in the slice has the identical
/// `start_time` string. Overlapping but different start times do not count.
pub fn find_conflicts(day_events: &[&CalendarEvent]) -> Vec<bool> {
    let mut counts: HashMap<&str, usize> = HashMap::new();
    for ev in day_events {
        *counts.entry(ev.start_time.as_str()).or_insert(0) += 1;
    }
    day_events
        .iter()
        .map(|ev| counts.get(ev.start_time.as_str()).copied().unwrap_or(0) > 1)
        .collect()
}

fn flag_conflicts<'a>(day_events: &[&'a CalendarEvent]) -> Vec<PlacedEvent<'a>> {
    find_conflicts(day_events)
        .into_iter()
        .zip(day_events)
        .map(|(conflict, event)| PlacedEvent { event, conflict })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calendar::month::ReferenceMonth;
    use chrono::Weekday;

    fn ev(title: &str, date: &str, start: &str) -> CalendarEvent {
        CalendarEvent::new(title, date, start, "23:59", "#123456")
    }

    fn january_grid() -> MonthGrid {
        MonthGrid::build(ReferenceMonth::new(2025, 1).unwrap(), Weekday::Sun)
    }

    fn cell<'a, 'b>(cells: &'b [DayCell<'a>], y: i32, m: u32, d: u32) -> &'b DayCell<'a> {
        let date = NaiveDate::from_ymd_opt(y, m, d).unwrap();
        cells.iter().find(|c| c.day.date == date).unwrap()
    }

    #[test]
    fn test_one_cell_per_grid_day() {
        let grid = january_grid();
        let cells = place_events(&grid, &[]);
        assert_eq!(cells.len(), grid.days.len());
        assert!(cells.iter().all(|c| c.events.is_empty()));
    }

    #[test]
    fn test_every_event_lands_once_or_not_at_all() {
        let events = vec![
            ev("a", "2025-01-01", "09:00"),
            ev("b", "2024-12-29", "09:00"),
            ev("c", "2025-02-01", "09:00"),
            ev("outside", "2025-03-10", "09:00"),
            ev("broken", "tomorrow", "09:00"),
        ];
        let cells = place_events(&january_grid(), &events);

        for event in &events {
            let hits = cells
                .iter()
                .flat_map(|c| &c.events)
                .filter(|p| std::ptr::eq(p.event, event))
                .count();
            let expected = if event.title == "outside" || event.title == "broken" { 0 } else { 1 };
            assert_eq!(hits, expected, "{}", event.title);
        }

        assert_eq!(cell(&cells, 2024, 12, 29).events[0].event.title, "b");
        assert!(!cell(&cells, 2024, 12, 29).day.in_month);
    }

    #[test]
    fn test_order_is_preserved() {
        let events = vec![
            ev("first", "2025-01-10", "12:00"),
            ev("other day", "2025-01-11", "08:00"),
            ev("second", "2025-01-10", "07:00"),
            ev("third", "2025-01-10", "09:00"),
        ];
        let cells = place_events(&january_grid(), &events);
        let titles: Vec<&str> = cell(&cells, 2025, 1, 10)
            .events
            .iter()
            .map(|p| p.event.title.as_str())
            .collect();
        assert_eq!(titles, ["first", "second", "third"]);
    }

    #[test]
    fn test_identical_start_times_conflict() {
        let events = vec![
            ev("standup", "2025-01-15", "08:00"),
            ev("review", "2025-01-15", "08:00"),
            ev("lunch", "2025-01-15", "12:00"),
        ];
        let cells = place_events(&january_grid(), &events);
        let day = cell(&cells, 2025, 1, 15);
        let flags: Vec<bool> = day.events.iter().map(|p| p.conflict).collect();
        assert_eq!(flags, [true, true, false]);
        assert!(day.has_conflict());
    }

    #[test]
    fn test_overlapping_times_are_not_conflicts() {
        let a = ev("a", "2025-01-15", "08:00");
        let b = ev("b", "2025-01-15", "08:30");
        assert_eq!(find_conflicts(&[&a, &b]), [false, false]);
    }

    #[test]
    fn test_conflicts_are_per_day() {
        let events = vec![ev("a", "2025-01-15", "08:00"), ev("b", "2025-01-16", "08:00")];
        let cells = place_events(&january_grid(), &events);
        assert!(!cell(&cells, 2025, 1, 15).has_conflict());
        assert!(!cell(&cells, 2025, 1, 16).has_conflict());
    }

    #[test]
    fn test_three_way_conflict() {
        let a = ev("a", "2025-01-15", "10:00");
        let b = ev("b", "2025-01-15", "10:00");
        let c = ev("c", "2025-01-15", "10:00");
        assert_eq!(find_conflicts(&[&a, &b, &c]), [true, true, true]);
    }

    #[test]
    fn test_events_on() {
        let events = vec![
            ev("a", "2025-01-15", "10:00"),
            ev("b", "2025-01-16", "10:00"),
            ev("c", "2025-01-15", "10:00"),
        ];
        let date = NaiveDate::from_ymd_opt(2025, 1, 15).unwrap();
        let placed = events_on(date, &events);
        assert_eq!(placed.len(), 2);
        assert!(placed.iter().all(|p| p.conflict));
    }
}
