use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};

use crate::theme;

use super::popup_area;

/// Modal message box. The caller decides what dismisses it.
pub struct Notification;

impl Notification {
    pub fn render(frame: &mut Frame, area: Rect, message: &str) {
        let theme = theme::current();
        let popup_w = area.width.min(50).max(24);
        let text_w = popup_w.saturating_sub(4).max(1) as usize;
        let text_lines = message.chars().count().div_ceil(text_w).max(1) as u16;
        let popup = popup_area(area, popup_w, text_lines + 4);

        frame.render_widget(Clear, popup);

        let block = Block::default()
            .title(" Import failed ")
            .title_style(theme.conflict.add_modifier(Modifier::BOLD))
            .borders(Borders::ALL)
            .border_style(theme.conflict.remove_modifier(Modifier::SLOW_BLINK));

        let inner = block.inner(popup);
        frame.render_widget(block, popup);

        let lines = vec![
            Line::from(message.to_string()),
            Line::from(""),
            Line::from(Span::styled("Press Enter to close", theme.dim)),
        ];
        let para = Paragraph::new(lines)
            .style(Style::default())
            .wrap(Wrap { trim: false });
        frame.render_widget(para, inner);
    }
}
