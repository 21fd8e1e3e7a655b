use ratatui::{
    layout::{Constraint, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

use crate::theme;

use super::popup_area;

/// Path input for loading a JSON event file.
pub struct ImportPrompt;

impl ImportPrompt {
    pub fn render(frame: &mut Frame, area: Rect, path: &str) {
        let theme = theme::current();
        let popup = popup_area(area, area.width.min(70).max(30), 6);

        frame.render_widget(Clear, popup);

        let block = Block::default()
            .title(" Import events (JSON) ")
            .title_style(Style::default().fg(Color::Green).add_modifier(Modifier::BOLD))
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Green));

        let inner = block.inner(popup);
        frame.render_widget(block, popup);

        let rows = Layout::vertical([
            Constraint::Length(1), // path
            Constraint::Length(1), // spacer
            Constraint::Length(1), // help
            Constraint::Min(0),
        ])
        .split(inner);

        // Keep the end of a long path (and the cursor) visible.
        let room = (inner.width as usize).saturating_sub(7);
        let shown: String = {
            let count = path.chars().count();
            path.chars().skip(count.saturating_sub(room)).collect()
        };
        let field = Line::from(vec![
            Span::styled("File: ", theme.dim),
            Span::styled(format!("{}_", shown), Style::default().fg(Color::Cyan)),
        ]);
        frame.render_widget(Paragraph::new(field), rows[0]);

        let help = Line::from(vec![
            Span::styled("Enter", Style::default().add_modifier(Modifier::BOLD)),
            Span::styled(":Load ", theme.dim),
            Span::styled("Esc", Style::default().add_modifier(Modifier::BOLD)),
            Span::styled(":Cancel", theme.dim),
        ]);
        frame.render_widget(Paragraph::new(help), rows[2]);
    }
}
