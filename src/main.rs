mod app;
mod calendar;
mod components;
mod config;
mod event;
mod logging;
mod theme;
mod tui;

use std::path::PathBuf;
use std::time::Duration;

use app::{App, InputMode};
use calendar::{month::MONTH_NAMES, placement, CalendarEvent};
use chrono::{Datelike, Local, Weekday};
use clap::Parser;
use color_eyre::Result;
use config::Config;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::layout::{Constraint, Layout, Rect};

#[derive(Parser, Debug)]
#[command(name = "month-calendar", version)]
#[command(about = "Month calendar in the terminal, with events imported from JSON")]
struct Cli {
    /// JSON file with an array of events to load on startup
    #[arg(short, long)]
    events: Option<PathBuf>,

    /// First day of the week, e.g. "sunday" or "mon"
    #[arg(long, value_parser = parse_week_start_arg)]
    week_start: Option<Weekday>,

    /// Config file (defaults to <config dir>/month-calendar/config.toml)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Log file (defaults to <cache dir>/month-calendar/month-calendar.log)
    #[arg(long)]
    log_file: Option<PathBuf>,
}

fn parse_week_start_arg(raw: &str) -> Result<Weekday, String> {
    config::parse_week_start(raw).ok_or_else(|| format!("unknown day {raw:?}"))
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    color_eyre::install()?;
    let cli = Cli::parse();

    let log_path = logging::init(cli.log_file.as_deref());
    let config = Config::load(cli.config.as_deref());
    let week_start = cli.week_start.unwrap_or_else(|| config.week_start());
    let Config {
        events, theme: theme_config, ..
    } = config;
    theme::init(theme_config.into_theme());
    log::info!("using theme {}", theme::current().name);

    let today = Local::now().date_naive();
    let events_file = cli.events.or(events);
    let initial_events = if events_file.is_some() {
        Vec::new()
    } else {
        CalendarEvent::samples()
    };
    let mut app = App::new(today, week_start, initial_events);

    log::info!(
        "starting on {} (week starts {:?}, log {:?})",
        today,
        week_start,
        log_path
    );
    if let Some(path) = events_file {
        app.start_import(path);
    }

    let mut terminal = tui::init()?;
    let result = run(&mut terminal, &mut app).await;
    tui::restore()?;
    log::info!("exiting");
    result
}

async fn run(terminal: &mut tui::Tui, app: &mut App) -> Result<()> {
    while app.running {
        terminal.draw(|frame| render(frame, app))?;

        if let Some(key) = event::next_key_press(Duration::from_millis(100))? {
            handle_key(app, key);
        }

        // Give a pending import task a chance to run, then apply its result.
        tokio::task::yield_now().await;
        app.poll_imports();
    }

    Ok(())
}

fn handle_key(app: &mut App, key: KeyEvent) {
    // Notification is modal: nothing else happens until it is dismissed.
    if app.notification.is_some() {
        if matches!(key.code, KeyCode::Enter | KeyCode::Esc) {
            app.dismiss_notification();
        }
        return;
    }

    // Help overlay takes priority
    if app.show_help {
        if matches!(key.code, KeyCode::Esc | KeyCode::Char('?') | KeyCode::Char('q')) {
            app.show_help = false;
        }
        return;
    }

    match app.input_mode {
        InputMode::Normal => handle_normal_input(app, key.code, key.modifiers),
        InputMode::MonthPicker | InputMode::YearPicker => handle_picker_input(app, key.code),
        InputMode::Import => handle_import_input(app, key.code),
    }
}

fn handle_normal_input(app: &mut App, code: KeyCode, modifiers: KeyModifiers) {
    // Clear status message on any key
    app.status_message = None;

    match (code, modifiers) {
        (KeyCode::Char('q'), _) | (KeyCode::Char('c'), KeyModifiers::CONTROL) => {
            app.running = false;
        }
        (KeyCode::Char('['), _) | (KeyCode::Char('p'), _) => app.prev_month(),
        (KeyCode::Char(']'), _) | (KeyCode::Char('n'), _) => app.next_month(),
        (KeyCode::Char('m'), _) => app.open_month_picker(),
        (KeyCode::Char('y'), _) => app.open_year_picker(),
        (KeyCode::Char('o'), _) => app.open_import_prompt(),
        (KeyCode::Char('t'), _) => app.go_to_today(),
        (KeyCode::Left, _) | (KeyCode::Char('h'), _) => app.move_cursor(-1),
        (KeyCode::Right, _) | (KeyCode::Char('l'), _) => app.move_cursor(1),
        (KeyCode::Up, _) | (KeyCode::Char('k'), _) => app.move_cursor(-7),
        (KeyCode::Down, _) | (KeyCode::Char('j'), _) => app.move_cursor(7),
        (KeyCode::Char('?'), _) => app.show_help = true,
        _ => {}
    }
}

fn handle_picker_input(app: &mut App, code: KeyCode) {
    match code {
        KeyCode::Esc | KeyCode::Char('q') => app.close_picker(),
        KeyCode::Enter => app.confirm_picker(),
        KeyCode::Up | KeyCode::Char('k') => app.picker_up(),
        KeyCode::Down | KeyCode::Char('j') => app.picker_down(),
        _ => {}
    }
}

fn handle_import_input(app: &mut App, code: KeyCode) {
    match code {
        KeyCode::Esc => app.cancel_import(),
        KeyCode::Enter => app.submit_import(),
        KeyCode::Backspace => app.import_backspace(),
        KeyCode::Char(c) => app.import_input_char(c),
        _ => {}
    }
}

fn render(frame: &mut ratatui::Frame, app: &App) {
    let area = frame.area();

    // Main layout: content + status bar
    let layout = Layout::vertical([Constraint::Min(1), Constraint::Length(1)]).split(area);
    let content_area = layout[0];

    // Grid and placement are derived from scratch every frame.
    let grid = app.grid();
    let cells = placement::place_events(&grid, &app.events);

    if area.width >= 100 {
        let content = Layout::horizontal([Constraint::Min(60), Constraint::Length(38)])
            .split(content_area);
        components::MonthView::render(frame, content[0], &grid, &cells, app.cursor, app.today);
        components::DayView::render(frame, content[1], app.cursor, &app.cursor_events());
    } else {
        components::MonthView::render(frame, content_area, &grid, &cells, app.cursor, app.today);
    }

    match app.input_mode {
        InputMode::MonthPicker => {
            let options: Vec<String> = MONTH_NAMES.iter().map(|m| m.to_string()).collect();
            let current = Some(app.reference.first_day().month0() as usize);
            components::Picker::render(frame, area, "Month", &options, app.picker_index, current);
        }
        InputMode::YearPicker => {
            let years = app.year_options();
            let current = years.iter().position(|y| *y == app.reference.year());
            let options: Vec<String> = years.iter().map(|y| y.to_string()).collect();
            components::Picker::render(frame, area, "Year", &options, app.picker_index, current);
        }
        InputMode::Import => components::ImportPrompt::render(frame, area, &app.import_path),
        InputMode::Normal => {}
    }

    if app.show_help {
        render_help(frame, area);
    }

    if let Some(ref message) = app.notification {
        components::Notification::render(frame, area, message);
    }

    components::StatusBar::render(frame, layout[1], app);
}

fn render_help(frame: &mut ratatui::Frame, area: Rect) {
    use ratatui::style::{Color, Modifier, Style};
    use ratatui::text::{Line, Span};
    use ratatui::widgets::{Block, Borders, Clear, Paragraph, Wrap};

    let theme = theme::current();
    let popup_area = components::popup_area(area, area.width.min(52).max(30), area.height.min(21).max(12));

    frame.render_widget(Clear, popup_area);

    let block = Block::default()
        .title(" Keybindings ")
        .title_style(Style::default().fg(Color::Green).add_modifier(Modifier::BOLD))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Green));

    let inner = block.inner(popup_area);
    frame.render_widget(block, popup_area);

    let key_style = Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD);
    let desc_style = Style::default();
    let section_style = Style::default().add_modifier(Modifier::BOLD | Modifier::UNDERLINED);

    let entry = |keys: &'static str, desc: &'static str| {
        Line::from(vec![
            Span::styled(format!("  {:<10}", keys), key_style),
            Span::styled(desc, desc_style),
        ])
    };

    let lines = vec![
        Line::from(Span::styled("Navigation", section_style)),
        entry("[/] p/n", "Previous/next month"),
        entry("m", "Choose month"),
        entry("y", "Choose year"),
        entry("h/l", "Previous/next day"),
        entry("j/k", "Next/previous week"),
        entry("t", "Jump to today"),
        Line::from(""),
        Line::from(Span::styled("Events", section_style)),
        entry("o", "Import a JSON event file"),
        Line::from(vec![
            Span::styled("  !         ", theme.conflict),
            Span::styled("Same start time as another event", desc_style),
        ]),
        Line::from(""),
        Line::from(vec![
            Span::styled("  q", key_style),
            Span::styled(" / ", theme.dim),
            Span::styled("Esc     ", key_style),
            Span::styled("Quit / close popup", desc_style),
        ]),
    ];

    let para = Paragraph::new(lines).wrap(Wrap { trim: false });
    frame.render_widget(para, inner);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calendar::ReferenceMonth;
    use chrono::NaiveDate;
    use ratatui::{backend::TestBackend, Terminal};

    fn test_app() -> App {
        let today = NaiveDate::from_ymd_opt(2025, 12, 18).unwrap();
        App::new(today, Weekday::Sun, CalendarEvent::samples())
    }

    fn press(app: &mut App, code: KeyCode) {
        handle_key(app, KeyEvent::new(code, KeyModifiers::NONE));
    }

    fn screen(app: &App, width: u16, height: u16) -> String {
        let mut terminal = Terminal::new(TestBackend::new(width, height)).unwrap();
        terminal.draw(|frame| render(frame, app)).unwrap();
        terminal
            .backend()
            .buffer()
            .content
            .iter()
            .map(|c| c.symbol())
            .collect()
    }

    #[test]
    fn test_quit() {
        let mut app = test_app();
        press(&mut app, KeyCode::Char('q'));
        assert!(!app.running);

        let mut app = test_app();
        handle_key(&mut app, KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL));
        assert!(!app.running);
    }

    #[test]
    fn test_prev_next_keys() {
        let mut app = test_app();
        for _ in 0..12 {
            press(&mut app, KeyCode::Char(']'));
        }
        assert_eq!(app.reference, ReferenceMonth::new(2026, 12).unwrap());
        for _ in 0..12 {
            press(&mut app, KeyCode::Char('p'));
        }
        assert_eq!(app.reference, ReferenceMonth::new(2025, 12).unwrap());
    }

    #[test]
    fn test_month_picker_keys() {
        let mut app = test_app();
        press(&mut app, KeyCode::Char('m'));
        assert_eq!(app.input_mode, InputMode::MonthPicker);
        press(&mut app, KeyCode::Char('k'));
        press(&mut app, KeyCode::Up);
        press(&mut app, KeyCode::Enter);
        assert_eq!(app.input_mode, InputMode::Normal);
        assert_eq!(app.reference, ReferenceMonth::new(2025, 10).unwrap());
    }

    #[test]
    fn test_picker_escape_keeps_month() {
        let mut app = test_app();
        press(&mut app, KeyCode::Char('y'));
        press(&mut app, KeyCode::Down);
        press(&mut app, KeyCode::Esc);
        assert_eq!(app.input_mode, InputMode::Normal);
        assert_eq!(app.reference, ReferenceMonth::new(2025, 12).unwrap());
    }

    #[test]
    fn test_import_prompt_accepts_q() {
        let mut app = test_app();
        press(&mut app, KeyCode::Char('o'));
        press(&mut app, KeyCode::Char('q'));
        assert!(app.running);
        assert_eq!(app.import_path, "q");
        press(&mut app, KeyCode::Esc);
        assert_eq!(app.input_mode, InputMode::Normal);
    }

    #[test]
    fn test_notification_blocks_input() {
        let mut app = test_app();
        app.notification = Some("Invalid JSON format.".to_string());

        press(&mut app, KeyCode::Char(']'));
        press(&mut app, KeyCode::Char('q'));
        assert!(app.running);
        assert_eq!(app.reference, ReferenceMonth::new(2025, 12).unwrap());

        press(&mut app, KeyCode::Enter);
        assert_eq!(app.notification, None);
        press(&mut app, KeyCode::Char(']'));
        assert_eq!(app.reference, ReferenceMonth::new(2026, 1).unwrap());
    }

    #[test]
    fn test_help_overlay() {
        let mut app = test_app();
        press(&mut app, KeyCode::Char('?'));
        assert!(app.show_help);
        press(&mut app, KeyCode::Char(']'));
        assert_eq!(app.reference, ReferenceMonth::new(2025, 12).unwrap());
        press(&mut app, KeyCode::Esc);
        assert!(!app.show_help);
    }

    #[test]
    fn test_render_wide_layout() {
        let app = test_app();
        let text = screen(&app, 140, 40);
        assert!(text.contains("December 2025"));
        assert!(text.contains("Daily Standup"));
        assert!(text.contains("Thursday, December 18, 2025"));
        assert!(text.contains("2 events"));
    }

    #[test]
    fn test_render_overlays() {
        let mut app = test_app();
        app.open_year_picker();
        assert!(screen(&app, 80, 30).contains("2035"));

        app.close_picker();
        app.notification = Some("Invalid JSON format.".to_string());
        let text = screen(&app, 80, 30);
        assert!(text.contains("Invalid JSON format."));
        assert!(text.contains("Import failed"));
    }

    #[test]
    fn test_render_tiny_terminal() {
        let mut app = test_app();
        app.show_help = true;
        app.notification = Some("x".to_string());
        screen(&app, 10, 3);
    }

    #[test]
    fn test_week_start_arg() {
        assert_eq!(parse_week_start_arg("monday"), Ok(Weekday::Mon));
        assert!(parse_week_start_arg("blursday").is_err());
    }

    #[test]
    fn test_cli_parses() {
        let cli = Cli::try_parse_from([
            "month-calendar",
            "--events",
            "events.json",
            "--week-start",
            "mon",
        ])
        .unwrap();
        assert_eq!(cli.events, Some(PathBuf::from("events.json")));
        assert_eq!(cli.week_start, Some(Weekday::Mon));
    }
}
