//! Tracing setup. In terminal mode logs must never reach stdout or stderr,
//! since either would corrupt the alternate screen.

use std::fs::OpenOptions;
use std::io;
use std::path::PathBuf;
use std::sync::Mutex;

use tracing_subscriber::EnvFilter;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LogTarget {
    Stderr,
    File(PathBuf),
    Disabled,
}

impl LogTarget {
    /// A log file always wins; otherwise only headless runs log, to stderr.
    pub fn select(log_file: Option<PathBuf>, headless: bool) -> Self {
        match log_file {
            Some(path) => Self::File(path),
            None if headless => Self::Stderr,
            None => Self::Disabled,
        }
    }
}

/// Installs the global subscriber. Returns false when logging is disabled or
/// a subscriber was already installed.
pub fn init_tracing(target: &LogTarget, debug: bool) -> io::Result<bool> {
    let default_level = if debug { "debug" } else { "info" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    let installed = match target {
        LogTarget::Disabled => false,
        LogTarget::Stderr => tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(io::stderr)
            .with_target(false)
            .try_init()
            .is_ok(),
        LogTarget::File(path) => {
            let file = OpenOptions::new().create(true).append(true).open(path)?;
            tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_writer(Mutex::new(file))
                .with_ansi(false)
                .try_init()
                .is_ok()
        }
    };
    Ok(installed)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn terminal_mode_logs_only_to_a_file() {
        assert_eq!(LogTarget::select(None, false), LogTarget::Disabled);
        assert_eq!(LogTarget::select(None, true), LogTarget::Stderr);
        assert_eq!(
            LogTarget::select(Some(PathBuf::from("story.log")), false),
            LogTarget::File(PathBuf::from("story.log"))
        );
    }

    #[test]
    fn disabled_target_installs_nothing() {
        assert!(matches!(init_tracing(&LogTarget::Disabled, true), Ok(false)));
    }
}
