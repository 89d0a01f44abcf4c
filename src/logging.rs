//! Logging initialization.
//!
//! A single entry point that installs a `tracing` subscriber for the chosen
//! profile. The filter comes from `RUST_LOG` when set.

use std::fs::File;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, Once};
use tracing_subscriber::{util::SubscriberInitExt, EnvFilter};

/// Environment variable naming a log file for terminal programs.
pub const LOG_FILE_ENV: &str = "DIFFABLE_LOG";

/// Logging profile configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Profile {
    /// Human-readable output on stderr
    Development,
    /// JSON structured output on stderr
    Production,
    /// No output; a registry so spans still work
    Test,
    /// Human-readable output appended to a file
    File(PathBuf),
}

impl Profile {
    /// `File` if [`LOG_FILE_ENV`] is set, otherwise `None`.
    ///
    /// Full-screen programs cannot log to stderr, so they log to a file or
    /// not at all.
    pub fn from_env() -> Option<Self> {
        std::env::var_os(LOG_FILE_ENV).map(|path| Self::File(PathBuf::from(path)))
    }
}

static INIT_ONCE: Once = Once::new();

fn filter(default: &str) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default))
}

fn open_log(path: &Path) -> io::Result<File> {
    File::options().create(true).append(true).open(path)
}

/// Initialize logging for `profile`.
///
/// Only the first call installs a subscriber; later calls are no-ops and
/// leave any log file untouched. A subscriber installed elsewhere is left
/// in place.
pub fn init(profile: &Profile) -> io::Result<()> {
    init_once(&INIT_ONCE, profile)
}

fn init_once(once: &Once, profile: &Profile) -> io::Result<()> {
    if once.is_completed() {
        return Ok(());
    }

    // Open the file before installing so the error reaches the caller.
    let file = match profile {
        Profile::File(path) => Some(open_log(path)?),
        _ => None,
    };

    once.call_once(|| match (profile, file) {
        (Profile::Development, _) => {
            let _ = tracing_subscriber::fmt()
                .with_env_filter(filter("diffable=debug"))
                .with_writer(io::stderr)
                .try_init();
        }
        (Profile::Production, _) => {
            let _ = tracing_subscriber::fmt()
                .json()
                .with_env_filter(filter("diffable=info"))
                .with_writer(io::stderr)
                .try_init();
        }
        (Profile::Test, _) => {
            let _ = tracing_subscriber::registry().try_init();
        }
        (Profile::File(_), Some(file)) => {
            let _ = tracing_subscriber::fmt()
                .with_env_filter(filter("diffable=info"))
                .with_ansi(false)
                .with_writer(Mutex::new(file))
                .try_init();
        }
        (Profile::File(_), None) => {}
    });
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_init_idempotent() {
        // Multiple calls should not panic
        init(&Profile::Test).unwrap();
        init(&Profile::Test).unwrap();
        init(&Profile::Development).unwrap();
    }

    #[test]
    fn test_file_profile_reports_open_errors() {
        let once = Once::new();
        let missing = std::env::temp_dir().join("diffable-no-such-dir").join("x").join("log");
        assert!(init_once(&once, &Profile::File(missing)).is_err());
        assert!(!once.is_completed());
    }

    #[test]
    fn test_file_not_created_once_initialized() {
        let once = Once::new();
        once.call_once(|| {});

        let path = std::env::temp_dir().join(format!("diffable-unused-{}.log", std::process::id()));
        let _ = std::fs::remove_file(&path);
        init_once(&once, &Profile::File(path.clone())).unwrap();
        assert!(!path.exists());
    }

    #[test]
    fn test_profile_equality() {
        assert_eq!(Profile::Development, Profile::Development);
        assert_ne!(Profile::Development, Profile::Production);
    }
}
