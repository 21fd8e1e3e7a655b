use ratatui::{
    layout::Rect,
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

use crate::app::{App, InputMode};
use crate::theme;

pub struct StatusBar;

impl StatusBar {
    pub fn render(frame: &mut Frame, area: Rect, app: &App) {
        let style = theme::current().status;
        let w = area.width as usize;

        let mode_str = match app.input_mode {
            InputMode::Normal => "",
            InputMode::MonthPicker => " [Month]",
            InputMode::YearPicker => " [Year]",
            InputMode::Import => " [Import]",
        };
        let n = app.events.len();
        let left = format!(
            " {}{} \u{2502} {} event{} ",
            app.reference,
            mode_str,
            n,
            if n == 1 { "" } else { "s" }
        );

        // Show status message if present, otherwise show context-aware hints
        let right = if let Some(ref msg) = app.status_message {
            format!(" {} ", msg)
        } else {
            hints(app.input_mode, w).to_string()
        };

        let padding = " ".repeat(w.saturating_sub(left.chars().count() + right.chars().count()));

        let line = Line::from(vec![
            Span::styled(left, style),
            Span::styled(padding, style),
            Span::styled(right, style),
        ]);

        frame.render_widget(Paragraph::new(line).style(style), area);
    }
}

fn hints(mode: InputMode, w: usize) -> &'static str {
    match mode {
        InputMode::Normal if w >= 90 => {
            " hjkl:Move [/]:Month m:Pick month y:Pick year o:Open t:Today ?:Help q:Quit "
        }
        InputMode::Normal if w >= 50 => " [/]:Month o:Open ?:Help q:Quit ",
        InputMode::MonthPicker | InputMode::YearPicker if w >= 40 => {
            " jk:Choose Enter:Apply Esc:Cancel "
        }
        InputMode::Import if w >= 40 => " Enter:Load Esc:Cancel ",
        _ => " ?:Help q:Quit ",
    }
}
