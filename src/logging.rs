//! File logging.
//!
//! The terminal belongs to the animation while it runs, so log records go to
//! a file instead of stderr. Logging is off unless a file is requested or
//! `RUST_LOG` is set, in which case a randomly named file is created in the
//! system temp directory.

use std::fs::{File, OpenOptions};
use std::io;
use std::path::{Path, PathBuf};

use env_logger::{Builder, Env, Target};
use thiserror::Error;

/// Environment variable holding the log filter.
pub const LOG_ENV: &str = "RUST_LOG";

/// Errors that can occur while setting up logging.
#[derive(Error, Debug)]
pub enum LogError {
    #[error("Failed to open log file {}: {source}", .path.display())]
    Open {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Logger already initialized: {0}")]
    AlreadyInitialized(#[from] log::SetLoggerError),
}

/// Picks the log file: the explicit path, a random temp file when `RUST_LOG`
/// is set, or nothing.
pub fn resolve_log_path(explicit: Option<&Path>, env_filter_set: bool) -> Option<PathBuf> {
    match explicit {
        Some(path) => Some(path.to_path_buf()),
        None if env_filter_set => Some(std::env::temp_dir().join(random_log_name())),
        None => None,
    }
}

/// `helixtui-<8 hex digits>.log`
pub fn random_log_name() -> String {
    format!("{}-{:08x}.log", env!("CARGO_PKG_NAME"), rand::random::<u32>())
}

/// Opens (creating or appending to) the log file.
pub fn open_log_file(path: &Path) -> Result<File, LogError> {
    OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .map_err(|source| LogError::Open {
            path: path.to_path_buf(),
            source,
        })
}

/// Installs the global logger if a log file applies.
///
/// Returns the path being written to, if any.
pub fn init(explicit: Option<&Path>) -> Result<Option<PathBuf>, LogError> {
    let env_filter_set = std::env::var_os(LOG_ENV).is_some();
    let Some(path) = resolve_log_path(explicit, env_filter_set) else {
        return Ok(None);
    };

    let file = open_log_file(&path)?;
    Builder::from_env(Env::default().default_filter_or("info"))
        .target(Target::Pipe(Box::new(file)))
        .format_timestamp_millis()
        .try_init()?;

    log::info!("{} {} logging to {}", env!("CARGO_PKG_NAME"), env!("CARGO_PKG_VERSION"), path.display());
    Ok(Some(path))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_resolve_explicit_path() {
        let path = Path::new("/tmp/some.log");
        assert_eq!(resolve_log_path(Some(path), false), Some(path.to_path_buf()));
        assert_eq!(resolve_log_path(Some(path), true), Some(path.to_path_buf()));
    }

    #[test]
    fn test_resolve_without_path() {
        assert_eq!(resolve_log_path(None, false), None);

        let path = resolve_log_path(None, true).unwrap();
        assert_eq!(path.parent(), Some(std::env::temp_dir().as_path()));
    }

    #[test]
    fn test_random_log_name() {
        let name = random_log_name();
        assert!(name.starts_with("helixtui-"));
        assert!(name.ends_with(".log"));
        let hex = &name["helixtui-".len()..name.len() - ".log".len()];
        assert_eq!(hex.len(), 8);
        assert!(hex.chars().all(|c| c.is_ascii_hexdigit()));
    }

    #[test]
    fn test_open_log_file_appends() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("helix.log");

        let mut file = open_log_file(&path).unwrap();
        writeln!(file, "first").unwrap();
        drop(file);
        let mut file = open_log_file(&path).unwrap();
        writeln!(file, "second").unwrap();
        drop(file);

        let content = std::fs::read_to_string(&path).unwrap();
        assert_eq!(content, "first\nsecond\n");
    }

    #[test]
    fn test_open_log_file_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing").join("helix.log");
        let err = open_log_file(&path).unwrap_err();
        assert!(matches!(err, LogError::Open { .. }));
        assert!(err.to_string().contains("helix.log"));
    }
}
