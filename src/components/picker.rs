use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, List, ListItem, ListState},
    Frame,
};

use crate::theme;

use super::popup_area;

/// Drop-down style list used for both the month and the year selector.
pub struct Picker;

impl Picker {
    pub fn render(
        frame: &mut Frame,
        area: Rect,
        title: &str,
        options: &[String],
        selected: usize,
        current: Option<usize>,
    ) {
        let theme = theme::current();
        let width = options.iter().map(|o| o.len()).max().unwrap_or(0) as u16 + 8;
        let height = options.len() as u16 + 2;
        let popup = popup_area(area, width.max(title.len() as u16 + 4), height);

        frame.render_widget(Clear, popup);

        let block = Block::default()
            .title(format!(" {} ", title))
            .title_style(Style::default().fg(Color::Green).add_modifier(Modifier::BOLD))
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Green));

        let items: Vec<ListItem> = options
            .iter()
            .enumerate()
            .map(|(i, label)| {
                let mark = if Some(i) == current { "\u{2022} " } else { "  " };
                ListItem::new(Line::from(vec![
                    Span::styled(mark, theme.dim),
                    Span::raw(label.clone()),
                ]))
            })
            .collect();

        let list = List::new(items)
            .block(block)
            .highlight_style(theme.selected);

        // Stateful render so the selection scrolls into view on short terminals.
        let mut state = ListState::default().with_selected(Some(selected));
        frame.render_stateful_widget(list, popup, &mut state);
    }
}
