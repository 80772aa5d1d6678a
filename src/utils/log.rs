//! Logging setup for dirview.
//!
//! The TUI owns the terminal, so logs never go to stdout/stderr. Events are appended to the
//! file named by `DIRVIEW_LOG`, or to `dirview/dirview.log` under the user state directory
//! (cache directory where the platform has no state directory). An empty `DIRVIEW_LOG`
//! turns file logging off. The filter comes from `RUST_LOG` and defaults to `info`.

use std::ffi::OsString;
use std::fs::{self, File, OpenOptions};
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use tracing_subscriber::EnvFilter;

pub const LOG_ENV: &str = "DIRVIEW_LOG";

pub(crate) fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let state_dir = dirs::state_dir().or_else(dirs::cache_dir);

    let file = match log_path(std::env::var_os(LOG_ENV), state_dir) {
        Some(path) => match open_log_file(&path) {
            Ok(file) => Some(file),
            Err(e) => {
                eprintln!("log_file_error: {}: {}", path.display(), e);
                None
            }
        },
        None => None,
    };

    match file {
        Some(file) => {
            let _ = tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_ansi(false)
                .with_writer(Mutex::new(file))
                .try_init();
            tracing::info!(version = env!("CARGO_PKG_VERSION"), "dirview starting");
        }
        None => {
            let _ = tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_writer(io::sink)
                .try_init();
        }
    }
}

/// Where logs go: the `DIRVIEW_LOG` value if set, else the default file under `state_dir`.
/// `None` when logging to a file is off or no directory is known.
fn log_path(env: Option<OsString>, state_dir: Option<PathBuf>) -> Option<PathBuf> {
    match env {
        Some(value) if value.is_empty() => None,
        Some(value) => Some(PathBuf::from(value)),
        None => state_dir.map(|dir| dir.join("dirview").join("dirview.log")),
    }
}

fn open_log_file(path: &Path) -> io::Result<File> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        fs::create_dir_all(parent)?;
    }
    OpenOptions::new().create(true).append(true).open(path)
}
