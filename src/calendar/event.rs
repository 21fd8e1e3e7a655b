use chrono::{NaiveDate, NaiveTime};
use serde_json::Value;

/// One entry of an imported event list.
///
/// Every field is kept as the string it was imported as. Nothing is
/// validated: an event whose `date` does not parse just never lands on a
/// day, and conflicts compare `start_time` strings verbatim.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CalendarEvent {
    pub title: String,
    pub date: String,
    pub start_time: String,
    pub end_time: String,
    pub color: String,
}

impl CalendarEvent {
    pub fn new(title: &str, date: &str, start_time: &str, end_time: &str, color: &str) -> Self {
        Self {
            title: title.to_string(),
            date: date.to_string(),
            start_time: start_time.to_string(),
            end_time: end_time.to_string(),
            color: color.to_string(),
        }
    }

    /// Build an event from one element of an imported JSON array.
    pub fn from_json(value: &Value) -> Self {
        Self {
            title: field(value, "title"),
            date: field(value, "date"),
            start_time: field(value, "startTime"),
            end_time: field(value, "endTime"),
            color: field(value, "color"),
        }
    }

    /// The calendar day this event belongs to.
    ///
    /// `date` must start with a strict `YYYY-MM-DD`, optionally followed by
    /// `T` or a space and an ISO time (`HH:MM`, `HH:MM:SS`, fractional
    /// seconds, `Z` or a `+HH:MM` offset). The offset is checked but not
    /// applied: the literal calendar date is the day.
    pub fn day(&self) -> Option<NaiveDate> {
        let prefix = self.date.get(..10)?;
        let rest = self.date.get(10..)?;
        let shape_ok = prefix.bytes().enumerate().all(|(i, b)| match i {
            4 | 7 => b == b'-',
            _ => b.is_ascii_digit(),
        });
        if !shape_ok {
            return None;
        }
        let day = NaiveDate::parse_from_str(prefix, "%Y-%m-%d").ok()?;

        if rest.is_empty() {
            return Some(day);
        }
        let time = rest.strip_prefix('T').or_else(|| rest.strip_prefix(' '))?;
        is_iso_time(time).then_some(day)
    }

    pub fn duration_display(&self) -> String {
        match (self.start_time.is_empty(), self.end_time.is_empty()) {
            (false, false) => format!("{} - {}", self.start_time, self.end_time),
            (false, true) => self.start_time.clone(),
            (true, false) => format!("until {}", self.end_time),
            (true, true) => String::new(),
        }
    }

    /// Events shown when no file has been imported yet.
    pub fn samples() -> Vec<Self> {
        vec![
            Self::new("Daily Standup", "2025-12-18", "00:00", "01:30", "#f6be23"),
            Self::new("Weekly catchup", "2025-12-18", "04:30", "07:30", "#f6501e"),
        ]
    }
}

fn is_iso_time(s: &str) -> bool {
    let (time, offset) = match s.find(['Z', 'z', '+', '-']) {
        Some(i) => s.split_at(i),
        None => (s, ""),
    };
    if time.as_bytes().get(2) != Some(&b':') {
        return false;
    }
    let time_ok = NaiveTime::parse_from_str(time, "%H:%M:%S%.f").is_ok()
        || NaiveTime::parse_from_str(time, "%H:%M").is_ok();
    time_ok && is_utc_offset(offset)
}

/// `""`, `Z`, or `+HH`, `+HHMM`, `+HH:MM` (either sign).
fn is_utc_offset(s: &str) -> bool {
    if s.is_empty() || s.eq_ignore_ascii_case("z") {
        return true;
    }
    let Some(digits) = s.strip_prefix(['+', '-']) else {
        return false;
    };
    if !digits.is_ascii() {
        return false;
    }
    let digits_ok = |d: &str| d.len() == 2 && d.bytes().all(|b| b.is_ascii_digit());
    match digits.len() {
        2 => digits_ok(digits),
        4 => digits_ok(&digits[..2]) && digits_ok(&digits[2..]),
        5 => digits_ok(&digits[..2]) && &digits[2..3] == ":" && digits_ok(&digits[3..]),
        _ => false,
    }
}

/// Non-string scalars are stringified, so `800` and `"800"` read the same.
fn field(value: &Value, key: &str) -> String {
    match value.get(key) {
        Some(Value::String(s)) => s.clone(),
        Some(Value::Number(n)) => n.to_string(),
        Some(Value::Bool(b)) => b.to_string(),
        _ => String::new(),
    }
}
