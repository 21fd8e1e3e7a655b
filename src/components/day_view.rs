use chrono::NaiveDate;
use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, Paragraph},
    Frame,
};

use crate::calendar::PlacedEvent;
use crate::theme;

use super::month_view::truncate;

/// Side panel listing the events of the cursor day.
pub struct DayView;

impl DayView {
    pub fn render(frame: &mut Frame, area: Rect, date: NaiveDate, events: &[PlacedEvent]) {
        let theme = theme::current();
        let w = area.width as usize;

        let title = if w >= 30 {
            format!(" {} ", date.format("%A, %B %d, %Y"))
        } else if w >= 18 {
            format!(" {} ", date.format("%b %d, %Y"))
        } else {
            format!(" {} ", date.format("%m/%d"))
        };

        let count_str = if events.is_empty() {
            String::new()
        } else {
            let n = events.len();
            let conflicts = events.iter().filter(|p| p.conflict).count();
            let mut s = format!(" {} event{}", n, if n == 1 { "" } else { "s" });
            if conflicts > 0 {
                s.push_str(&format!(", {} in conflict", conflicts));
            }
            s.push(' ');
            s
        };

        let block = Block::default()
            .title(title)
            .title_style(theme.header)
            .title_bottom(Line::from(Span::styled(count_str, theme.dim)))
            .borders(Borders::ALL)
            .border_style(theme.border);

        if events.is_empty() {
            let inner = block.inner(area);
            frame.render_widget(block, area);
            let msg = Paragraph::new("No events").style(theme.dim);
            frame.render_widget(msg, inner);
            return;
        }

        let inner_w = area.width.saturating_sub(2) as usize;
        let items: Vec<ListItem> = events.iter().map(|p| format_event(p, inner_w)).collect();

        let list = List::new(items).block(block);
        frame.render_widget(list, area);
    }
}

fn format_event(placed: &PlacedEvent, max_width: usize) -> ListItem<'static> {
    let theme = theme::current();
    let ev = placed.event;

    let color_chip = Span::styled("  ", theme.event_style(&ev.color));

    let time_str = format!(" {} ", ev.duration_display());
    let time_span = Span::styled(time_str.clone(), Style::default().add_modifier(Modifier::DIM));

    let used = 2 + time_str.chars().count();
    let title = if ev.title.is_empty() { "(untitled)" } else { ev.title.as_str() };
    let title_span = Span::styled(truncate(title, max_width.saturating_sub(used)), Style::default());

    let mut lines = vec![Line::from(vec![color_chip, time_span, title_span])];

    if placed.conflict {
        lines.push(Line::from(Span::styled(
            "   \u{26a0} Time Conflict",
            theme.conflict,
        )));
    }

    ListItem::new(lines)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calendar::{placement, CalendarEvent};
    use ratatui::{backend::TestBackend, Terminal};

    fn render_to_string(events: &[CalendarEvent]) -> String {
        let date = NaiveDate::from_ymd_opt(2025, 12, 18).unwrap();
        let placed = placement::events_on(date, events);

        let mut terminal = Terminal::new(TestBackend::new(50, 12)).unwrap();
        terminal
            .draw(|frame| {
                let area = frame.area();
                DayView::render(frame, area, date, &placed);
            })
            .unwrap();
        terminal
            .backend()
            .buffer()
            .content
            .iter()
            .map(|c| c.symbol())
            .collect()
    }

    #[test]
    fn test_empty_day() {
        let text = render_to_string(&[]);
        assert!(text.contains("Thursday, December 18, 2025"));
        assert!(text.contains("No events"));
    }

    #[test]
    fn test_lists_events_with_times() {
        let text = render_to_string(&CalendarEvent::samples());
        assert!(text.contains("00:00 - 01:30 Daily Standup"));
        assert!(text.contains("04:30 - 07:30 Weekly catchup"));
        assert!(text.contains("2 events"));
        assert!(!text.contains("Time Conflict"));
    }

    #[test]
    fn test_marks_conflicts() {
        let events = vec![
            CalendarEvent::new("A", "2025-12-18", "08:00", "09:00", "#fff"),
            CalendarEvent::new("B", "2025-12-18", "08:00", "08:30", "#000"),
        ];
        let text = render_to_string(&events);
        assert!(text.contains("Time Conflict"));
        assert!(text.contains("2 in conflict"));
    }
}
