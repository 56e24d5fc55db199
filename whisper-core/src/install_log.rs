//! Installation log
//!
//! Each installer run writes a timestamped log file into the temp directory
//! so a failed package install can be diagnosed after the console output
//! is gone.

use anyhow::{Context, Result};
use std::fs::{File, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};

const LOG_PREFIX: &str = "whisper-install-";
const LOG_SUFFIX: &str = ".log";

/// Number of previous install logs kept around
pub const KEEP_LOGS: usize = 5;

/// Append-only log of a single installer run
pub struct InstallLogger {
    log_file: Option<File>,
    log_path: PathBuf,
}

impl InstallLogger {
    /// Create a new logger with a timestamped log file in the temp directory
    pub fn new() -> Result<Self> {
        Self::in_dir(&std::env::temp_dir())
    }

    /// Create a new logger with a timestamped log file in `dir`
    pub fn in_dir(dir: &Path) -> Result<Self> {
        let stamp = format!(
            "{}-{}",
            chrono::Local::now().format("%Y%m%d_%H%M%S_%3f"),
            std::process::id()
        );

        // Never share a file with another run, even within one millisecond
        let mut attempt = 0;
        let (file, log_path) = loop {
            let name = if attempt == 0 {
                format!("{LOG_PREFIX}{stamp}{LOG_SUFFIX}")
            } else {
                format!("{LOG_PREFIX}{stamp}-{attempt}{LOG_SUFFIX}")
            };
            let log_path = dir.join(name);
            match OpenOptions::new().write(true).create_new(true).open(&log_path) {
                Ok(file) => break (file, log_path),
                Err(e) if e.kind() == std::io::ErrorKind::AlreadyExists && attempt < 100 => {
                    attempt += 1;
                }
                Err(e) => {
                    return Err(e).with_context(|| {
                        format!("Failed to create log file at {}", log_path.display())
                    })
                }
            }
        };

        let mut logger = Self {
            log_file: Some(file),
            log_path,
        };

        logger.info("=== Whisper CLI Installation Log ===");
        logger.info(&format!("Version: {}", env!("CARGO_PKG_VERSION")));
        logger.info(&format!(
            "Started: {}",
            chrono::Local::now().format("%Y-%m-%d %H:%M:%S")
        ));

        Ok(logger)
    }

    /// A logger that discards everything, used when the log file can't be created
    pub fn disabled() -> Self {
        Self {
            log_file: None,
            log_path: PathBuf::new(),
        }
    }

    pub fn log_path(&self) -> &Path {
        &self.log_path
    }

    pub fn info(&mut self, message: &str) {
        self.log_message("INFO", message);
    }

    pub fn warn(&mut self, message: &str) {
        self.log_message("WARN", message);
    }

    pub fn error(&mut self, message: &str) {
        self.log_message("ERROR", message);
    }

    fn log_message(&mut self, level: &str, message: &str) {
        let timestamp = chrono::Local::now().format("%H:%M:%S");
        if let Some(ref mut file) = self.log_file {
            // Logging must never interfere with the install itself
            let _ = writeln!(file, "[{timestamp}] [{level}] {message}");
        }
    }

    /// Remove all but the newest `keep_count` install logs in `dir`
    pub fn cleanup_old_logs(dir: &Path, keep_count: usize) -> Result<()> {
        let mut log_files: Vec<PathBuf> = std::fs::read_dir(dir)
            .with_context(|| format!("Failed to read {}", dir.display()))?
            .filter_map(|entry| entry.ok())
            .map(|entry| entry.path())
            .filter(|path| {
                path.file_name()
                    .and_then(|n| n.to_str())
                    .map(|n| n.starts_with(LOG_PREFIX) && n.ends_with(LOG_SUFFIX))
                    .unwrap_or(false)
            })
            .collect();

        // Oldest first; the name embeds the timestamp so it breaks mtime ties
        log_files.sort_by_key(|path| {
            let modified = std::fs::metadata(path).and_then(|m| m.modified()).ok();
            (modified, path.clone())
        });

        if log_files.len() > keep_count {
            let to_remove = log_files.len() - keep_count;
            for path in log_files.iter().take(to_remove) {
                let _ = std::fs::remove_file(path);
            }
        }

        Ok(())
    }

    /// Write the footer and flush
    pub fn finalize(&mut self) {
        self.info(&format!(
            "Finished: {}",
            chrono::Local::now().format("%Y-%m-%d %H:%M:%S")
        ));
        if let Some(ref mut file) = self.log_file {
            let _ = file.flush();
        }
    }
}

impl Drop for InstallLogger {
    fn drop(&mut self) {
        if let Some(ref mut file) = self.log_file {
            let _ = file.flush();
        }
    }
}
