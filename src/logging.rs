use std::fs::{self, File, OpenOptions};
use std::path::{Path, PathBuf};

use env_logger::{Builder, Env, Target};

use crate::config::APP_NAME;

/// Send `log` output to a file; stderr belongs to the terminal UI.
///
/// Level comes from `RUST_LOG` (default `info`). If the file cannot be
/// opened logging stays off. Returns the path actually used.
pub fn init(path: Option<&Path>) -> Option<PathBuf> {
    let path = path.map(Path::to_path_buf).or_else(default_path)?;
    let file = match open(&path) {
        Ok(file) => file,
        Err(err) => {
            eprintln!("Logging disabled: could not open {}: {err}", path.display());
            return None;
        }
    };

    let result = Builder::from_env(Env::default().default_filter_or("info"))
        .target(Target::Pipe(Box::new(file)))
        .format_timestamp_millis()
        .try_init();

    match result {
        Ok(()) => Some(path),
        Err(_) => None,
    }
}

fn default_path() -> Option<PathBuf> {
    dirs::cache_dir().map(|d| d.join(APP_NAME).join(format!("{APP_NAME}.log")))
}

fn open(path: &Path) -> std::io::Result<File> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    OpenOptions::new().create(true).append(true).open(path)
}
