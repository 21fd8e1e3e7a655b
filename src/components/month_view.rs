use chrono::{Datelike, NaiveDate};
use ratatui::{
    layout::{Constraint, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use crate::calendar::{DayCell, MonthGrid, PlacedEvent};
use crate::theme;

pub struct MonthView;

impl MonthView {
    pub fn render(
        frame: &mut Frame,
        area: Rect,
        grid: &MonthGrid,
        cells: &[DayCell],
        cursor: NaiveDate,
        today: NaiveDate,
    ) {
        let theme = theme::current();

        let block = Block::default()
            .title(format!(" {} ", grid.reference))
            .title_style(theme.header)
            .borders(Borders::ALL)
            .border_style(theme.border);

        let inner = block.inner(area);
        frame.render_widget(block, area);

        if inner.width < 14 || inner.height < 2 {
            return;
        }

        let mut row_constraints = vec![Constraint::Length(1)]; // weekday header
        row_constraints.extend((0..grid.week_count()).map(|_| Constraint::Fill(1)));
        let rows = Layout::vertical(row_constraints).split(inner);

        let columns = |row: Rect| Layout::horizontal([Constraint::Fill(1); 7]).split(row);

        for (label, col) in grid.weekday_labels().iter().zip(columns(rows[0]).iter()) {
            let w = col.width as usize;
            let text = if w >= 4 { label.to_string() } else { label[..2].to_string() };
            let header = Paragraph::new(Span::styled(format!("{:^w$}", text), theme.header));
            frame.render_widget(header, *col);
        }

        for (week, row) in cells.chunks(7).zip(rows.iter().skip(1)) {
            for (cell, col) in week.iter().zip(columns(*row).iter()) {
                render_cell(frame, *col, cell, cursor, today);
            }
        }
    }
}

fn render_cell(frame: &mut Frame, area: Rect, cell: &DayCell, cursor: NaiveDate, today: NaiveDate) {
    if area.width < 3 || area.height == 0 {
        return;
    }
    let theme = theme::current();
    let date = cell.day.date;
    let width = area.width as usize;

    let number_style = if date == cursor {
        theme.selected.add_modifier(Modifier::BOLD)
    } else if date == today {
        theme.today
    } else if !cell.day.in_month {
        theme.dim
    } else {
        Style::default()
    };

    // Compact form: day number plus a marker when there is no room for
    // event lines.
    let marker = if cell.has_conflict() {
        Span::styled("!", theme.conflict)
    } else if !cell.events.is_empty() {
        Span::styled("*", theme.dim)
    } else {
        Span::raw(" ")
    };
    let mut lines = vec![Line::from(vec![
        Span::styled(format!("{:>2}", date.day()), number_style),
        marker,
    ])];

    let room = (area.height as usize).saturating_sub(1);
    if room > 0 && !cell.events.is_empty() {
        let shown = if cell.events.len() > room { room - 1 } else { cell.events.len() };
        for placed in &cell.events[..shown] {
            lines.push(event_line(placed, width));
        }
        if shown < cell.events.len() {
            lines.push(Line::from(Span::styled(
                format!("+{} more", cell.events.len() - shown),
                theme.dim,
            )));
        }
    }

    frame.render_widget(Paragraph::new(lines), area);
}

fn event_line(placed: &PlacedEvent, width: usize) -> Line<'static> {
    let theme = theme::current();
    let ev = placed.event;

    let flag = if placed.conflict {
        Span::styled("!", theme.conflict)
    } else {
        Span::raw(" ")
    };

    let text = if ev.start_time.is_empty() {
        ev.title.clone()
    } else {
        format!("{} {}", ev.start_time, ev.title)
    };
    let text = truncate(&text, width.saturating_sub(1));
    let chip = Span::styled(
        format!("{:<w$}", text, w = width.saturating_sub(1)),
        theme.event_style(&ev.color),
    );

    Line::from(vec![flag, chip])
}

pub(crate) fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        s.to_string()
    } else if max > 1 {
        let mut out: String = s.chars().take(max - 1).collect();
        out.push('\u{2026}');
        out
    } else {
        s.chars().take(max).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calendar::{placement, CalendarEvent, ReferenceMonth};
    use chrono::Weekday;
    use ratatui::{backend::TestBackend, Terminal};

    fn screen_text(terminal: &Terminal<TestBackend>) -> String {
        let buffer = terminal.backend().buffer();
        let width = buffer.area.width as usize;
        buffer
            .content
            .chunks(width)
            .map(|row| row.iter().map(|c| c.symbol()).collect::<String>())
            .collect::<Vec<_>>()
            .join("\n")
    }

    fn draw(events: &[CalendarEvent], width: u16, height: u16) -> String {
        let grid = MonthGrid::build(ReferenceMonth::new(2025, 1).unwrap(), Weekday::Sun);
        let cells = placement::place_events(&grid, events);
        let cursor = NaiveDate::from_ymd_opt(2025, 1, 10).unwrap();
        let today = NaiveDate::from_ymd_opt(2025, 1, 20).unwrap();

        let mut terminal = Terminal::new(TestBackend::new(width, height)).unwrap();
        terminal
            .draw(|frame| {
                let area = frame.area();
                MonthView::render(frame, area, &grid, &cells, cursor, today);
            })
            .unwrap();
        screen_text(&terminal)
    }

    #[test]
    fn test_renders_title_header_and_days() {
        let text = draw(&[], 100, 30);
        assert!(text.contains("January 2025"));
        assert!(text.contains("Sun"));
        assert!(text.contains("Sat"));
        assert!(text.contains("31"));
    }

    #[test]
    fn test_renders_events_and_conflicts() {
        let events = vec![
            CalendarEvent::new("Standup", "2025-01-15", "08:00", "08:15", "#f6be23"),
            CalendarEvent::new("Review", "2025-01-15", "08:00", "09:00", "#f6501e"),
        ];
        let text = draw(&events, 140, 40);
        assert!(text.contains("08:00 Standup"));
        assert!(text.contains("!08:00 Review"));
    }

    #[test]
    fn test_compact_cells_show_markers() {
        let events = vec![
            CalendarEvent::new("A", "2025-01-15", "08:00", "08:15", "#fff"),
            CalendarEvent::new("B", "2025-01-15", "08:00", "09:00", "#fff"),
        ];
        // One line per week: no room for event lines.
        let text = draw(&events, 60, 8);
        assert!(text.contains("15!"));
    }

    #[test]
    fn test_truncate() {
        assert_eq!(truncate("Weekly catchup", 20), "Weekly catchup");
        assert_eq!(truncate("Weekly catchup", 7), "Weekly\u{2026}");
        assert_eq!(truncate("abc", 1), "a");
        assert_eq!(truncate("abc", 0), "");
    }
}
