use std::path::{Path, PathBuf};

use serde_json::Value;
use thiserror::Error;

use super::event::CalendarEvent;

#[derive(Debug, Error)]
pub enum ImportError {
    #[error("Could not read {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Invalid JSON format.")]
    InvalidJson(#[from] serde_json::Error),
    #[error("Expected a JSON array of events.")]
    NotAnArray,
}

/// Parse an event file. Only the top-level shape is checked: the payload
/// must be a JSON array. Elements are converted leniently.
pub fn parse_events(text: &str) -> Result<Vec<CalendarEvent>, ImportError> {
    match serde_json::from_str::<Value>(text)? {
        Value::Array(items) => Ok(items.iter().map(CalendarEvent::from_json).collect()),
        _ => Err(ImportError::NotAnArray),
    }
}

pub async fn load_events(path: &Path) -> Result<Vec<CalendarEvent>, ImportError> {
    let text = tokio::fs::read_to_string(path)
        .await
        .map_err(|source| ImportError::Read {
            path: path.to_path_buf(),
            source,
        })?;
    parse_events(&text)
}
