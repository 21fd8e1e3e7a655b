use std::path::PathBuf;

use chrono::{Datelike, Days, Local, NaiveDate, Weekday};
use tokio::sync::mpsc;

use crate::calendar::{import, placement, CalendarEvent, ImportError, MonthGrid, PlacedEvent, ReferenceMonth};

/// Years offered on either side of the current one by the year picker.
pub const YEAR_SPAN: i32 = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputMode {
    Normal,
    MonthPicker,
    YearPicker,
    Import,
}

#[derive(Debug)]
pub struct ImportOutcome {
    pub path: PathBuf,
    pub result: Result<Vec<CalendarEvent>, ImportError>,
}

pub struct App {
    pub running: bool,
    pub reference: ReferenceMonth,
    pub cursor: NaiveDate,
    pub today: NaiveDate,
    pub week_start: Weekday,
    pub events: Vec<CalendarEvent>,
    pub input_mode: InputMode,
    pub picker_index: usize,
    pub import_path: String,
    /// Blocking message; all input except dismissal is ignored while set.
    pub notification: Option<String>,
    pub status_message: Option<String>,
    pub show_help: bool,
    last_import: Option<PathBuf>,
    imports_tx: mpsc::UnboundedSender<ImportOutcome>,
    imports_rx: mpsc::UnboundedReceiver<ImportOutcome>,
}

impl App {
    pub fn new(today: NaiveDate, week_start: Weekday, events: Vec<CalendarEvent>) -> Self {
        let (imports_tx, imports_rx) = mpsc::unbounded_channel();
        Self {
            running: true,
            reference: ReferenceMonth::from_date(today),
            cursor: today,
            today,
            week_start,
            events,
            input_mode: InputMode::Normal,
            picker_index: 0,
            import_path: String::new(),
            notification: None,
            status_message: None,
            show_help: false,
            last_import: None,
            imports_tx,
            imports_rx,
        }
    }

    /// Visible days for the current reference month. Rebuilt on every call.
    pub fn grid(&self) -> MonthGrid {
        MonthGrid::build(self.reference, self.week_start)
    }

    pub fn cursor_events(&self) -> Vec<PlacedEvent<'_>> {
        placement::events_on(self.cursor, &self.events)
    }

    // ── navigation ──

    pub fn next_month(&mut self) {
        self.set_reference(self.reference.next());
    }

    pub fn prev_month(&mut self) {
        self.set_reference(self.reference.prev());
    }

    pub fn select_month(&mut self, month: u32) {
        if let Some(reference) = self.reference.with_month(month) {
            self.set_reference(reference);
        }
    }

    pub fn select_year(&mut self, year: i32) {
        if let Some(reference) = self.reference.with_year(year) {
            self.set_reference(reference);
        }
    }

    pub fn go_to_today(&mut self) {
        self.today = Local::now().date_naive();
        self.reference = ReferenceMonth::from_date(self.today);
        self.cursor = self.today;
    }

    /// Move the cursor by `days`. Leaving the visible grid brings the
    /// cursor's month on screen.
    pub fn move_cursor(&mut self, days: i64) {
        let step = Days::new(days.unsigned_abs());
        let moved = if days >= 0 {
            self.cursor.checked_add_days(step)
        } else {
            self.cursor.checked_sub_days(step)
        };
        let Some(cursor) = moved else {
            return;
        };

        self.cursor = cursor;
        if !self.grid().contains(cursor) {
            self.reference = ReferenceMonth::from_date(cursor);
            log::info!("showing {}", self.reference);
        }
    }

    fn set_reference(&mut self, reference: ReferenceMonth) {
        if reference != self.reference {
            log::info!("showing {}", reference);
        }
        self.reference = reference;
        self.cursor = reference.clamp_day(self.cursor.day());
    }

    // ── month / year pickers ──

    pub fn year_options(&self) -> Vec<i32> {
        year_options(self.today.year())
    }

    pub fn open_month_picker(&mut self) {
        self.picker_index = self.reference.first_day().month0() as usize;
        self.input_mode = InputMode::MonthPicker;
    }

    pub fn open_year_picker(&mut self) {
        let options = self.year_options();
        let year = self.reference.year();
        self.picker_index = options
            .iter()
            .position(|y| *y == year)
            .unwrap_or(if year < options[0] { 0 } else { options.len() - 1 });
        self.input_mode = InputMode::YearPicker;
    }

    fn picker_len(&self) -> usize {
        match self.input_mode {
            InputMode::MonthPicker => 12,
            InputMode::YearPicker => self.year_options().len(),
            InputMode::Normal | InputMode::Import => 0,
        }
    }

    pub fn picker_up(&mut self) {
        self.picker_index = self.picker_index.saturating_sub(1);
    }

    pub fn picker_down(&mut self) {
        if self.picker_index + 1 < self.picker_len() {
            self.picker_index += 1;
        }
    }

    pub fn confirm_picker(&mut self) {
        match self.input_mode {
            InputMode::MonthPicker => self.select_month(self.picker_index as u32 + 1),
            InputMode::YearPicker => {
                if let Some(year) = self.year_options().get(self.picker_index) {
                    self.select_year(*year);
                }
            }
            InputMode::Normal | InputMode::Import => {}
        }
        self.input_mode = InputMode::Normal;
    }

    pub fn close_picker(&mut self) {
        self.input_mode = InputMode::Normal;
    }

    // ── import ──

    pub fn open_import_prompt(&mut self) {
        self.import_path = self
            .last_import
            .as_ref()
            .map(|p| p.display().to_string())
            .unwrap_or_default();
        self.input_mode = InputMode::Import;
    }

    pub fn import_input_char(&mut self, c: char) {
        self.import_path.push(c);
    }

    pub fn import_backspace(&mut self) {
        self.import_path.pop();
    }

    pub fn cancel_import(&mut self) {
        self.input_mode = InputMode::Normal;
    }

    pub fn submit_import(&mut self) {
        let raw = self.import_path.trim();
        if raw.is_empty() {
            return;
        }
        let path = expand_home(raw);
        self.input_mode = InputMode::Normal;
        self.status_message = Some(format!("Loading {}...", path.display()));
        self.start_import(path);
    }

    /// Read and parse `path` in the background. The outcome is applied by
    /// `poll_imports`. Must be called from within a tokio runtime.
    pub fn start_import(&self, path: PathBuf) {
        log::info!("importing events from {}", path.display());
        let tx = self.imports_tx.clone();
        tokio::spawn(async move {
            let result = import::load_events(&path).await;
            let _ = tx.send(ImportOutcome { path, result });
        });
    }

    /// Apply every import that has finished since the last call.
    pub fn poll_imports(&mut self) {
        while let Ok(outcome) = self.imports_rx.try_recv() {
            self.apply_import(outcome);
        }
    }

    pub fn apply_import(&mut self, outcome: ImportOutcome) {
        let ImportOutcome { path, result } = outcome;
        match result {
            Ok(events) => {
                log::info!("imported {} events from {}", events.len(), path.display());
                let n = events.len();
                self.events = events;
                self.status_message = Some(format!(
                    "Loaded {} event{} from {}",
                    n,
                    if n == 1 { "" } else { "s" },
                    path.display()
                ));
            }
            Err(err) => {
                log::warn!("import of {} failed: {err}", path.display());
                self.status_message = None;
                self.notification = Some(err.to_string());
            }
        }
        self.last_import = Some(path);
    }

    pub fn dismiss_notification(&mut self) {
        self.notification = None;
    }
}

/// `2 * YEAR_SPAN + 1` years centred on `current_year`.
pub fn year_options(current_year: i32) -> Vec<i32> {
    (current_year - YEAR_SPAN..=current_year + YEAR_SPAN).collect()
}

fn expand_home(raw: &str) -> PathBuf {
    match (raw.strip_prefix("~/"), dirs::home_dir()) {
        (Some(rest), Some(home)) => home.join(rest),
        _ => PathBuf::from(raw),
    }
}
