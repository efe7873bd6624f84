//! Best-effort interaction log.
//!
//! A single-method capability so the pipeline stays testable without
//! filesystem side effects. Writes must never affect control flow: failures
//! are swallowed after a debug-level trace.

use std::fs::OpenOptions;
use std::io::Write;
use std::path::PathBuf;

use chrono::Local;

pub trait InteractionLog: Send + Sync {
    fn log(&self, message: &str);
}

/// Appends `[yyyy-MM-dd HH:mm:ss] <message>` lines to a file, creating it on
/// first use.
pub struct FileInteractionLog {
    path: PathBuf,
}

impl FileInteractionLog {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl InteractionLog for FileInteractionLog {
    fn log(&self, message: &str) {
        let line = format!("[{}] {}\n", Local::now().format("%Y-%m-%d %H:%M:%S"), message);
        let result = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .and_then(|mut file| file.write_all(line.as_bytes()));

        if let Err(error) = result {
            tracing::debug!(path = %self.path.display(), error = %error, "interaction log write failed");
        }
    }
}

/// Used when the interaction log is disabled by configuration and in tests.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoopInteractionLog;

impl InteractionLog for NoopInteractionLog {
    fn log(&self, _message: &str) {}
}

#[cfg(test)]
mod tests {
    use std::fs;

    use tempfile::TempDir;

    use super::{FileInteractionLog, InteractionLog};

    #[test]
    fn appends_timestamped_lines() {
        let dir = TempDir::new().expect("tempdir");
        let path = dir.path().join("wayfarer.log");
        let log = FileInteractionLog::new(&path);

        log.log("user query received");
        log.log("assistant turn recorded");

        let contents = fs::read_to_string(&path).expect("read log");
        let lines: Vec<&str> = contents.lines().collect();
        assert_eq!(lines.len(), 2);
        assert!(lines[0].starts_with('['));
        assert!(lines[0].ends_with("user query received"));
        assert!(lines[1].contains("] assistant turn recorded"));
        // [yyyy-MM-dd HH:mm:ss] prefix is 21 characters.
        assert_eq!(lines[0].find(']'), Some(20));
    }

    #[test]
    fn unwritable_path_is_swallowed() {
        let log = FileInteractionLog::new("/this/path/does/not/exist/wayfarer.log");
        log.log("must not panic");
    }
}
