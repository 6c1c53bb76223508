//! Unified logging system for Waffle Bar.
//!
//! Every `log::` record from Rust and every line sent by the bridge script
//! ends up in one daily log file, with automatic rotation and cleanup.
//! Console output goes through `env_logger`, filtered by `RUST_LOG`.

use chrono::Local;
use log::Log;
use std::fs::{self, File, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use tauri::{command, AppHandle, Manager};

/// Maximum log file size before rotation (5MB)
const MAX_LOG_SIZE: u64 = 5 * 1024 * 1024;

/// Maximum number of log files to keep
const MAX_LOG_FILES: usize = 5;

/// Prefix of every log file name
const LOG_FILE_PREFIX: &str = "waffle-bar";

lazy_static::lazy_static! {
    /// Global log file handle
    static ref LOG_FILE: Mutex<Option<File>> = Mutex::new(None);
    /// Log directory path
    static ref LOG_DIR: Mutex<Option<PathBuf>> = Mutex::new(None);
}

/// Log levels matching frontend
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogLevel {
    Debug,
    Info,
    Warn,
    Error,
}

impl LogLevel {
    /// Parse a level name sent by the frontend. Unknown names become `Info`.
    pub fn from_name(name: &str) -> Self {
        match name.to_lowercase().as_str() {
            "debug" | "trace" => LogLevel::Debug,
            "warn" | "warning" => LogLevel::Warn,
            "error" => LogLevel::Error,
            _ => LogLevel::Info,
        }
    }
}

impl From<log::Level> for LogLevel {
    fn from(level: log::Level) -> Self {
        match level {
            log::Level::Error => LogLevel::Error,
            log::Level::Warn => LogLevel::Warn,
            log::Level::Info => LogLevel::Info,
            log::Level::Debug | log::Level::Trace => LogLevel::Debug,
        }
    }
}

impl std::fmt::Display for LogLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LogLevel::Debug => write!(f, "DEBUG"),
            LogLevel::Info => write!(f, "INFO"),
            LogLevel::Warn => write!(f, "WARN"),
            LogLevel::Error => write!(f, "ERROR"),
        }
    }
}

/// `log` backend: file first, then the env_logger console logger.
struct FileLogger {
    console: env_logger::Logger,
}

impl Log for FileLogger {
    fn enabled(&self, metadata: &log::Metadata) -> bool {
        self.console.enabled(metadata)
    }

    fn log(&self, record: &log::Record) {
        if !self.console.matches(record) {
            return;
        }
        write_line(
            record.level().into(),
            record.target(),
            &record.args().to_string(),
        );
        self.console.log(record);
    }

    fn flush(&self) {
        if let Ok(mut log_file) = LOG_FILE.lock() {
            if let Some(ref mut file) = *log_file {
                let _ = file.flush();
            }
        }
        self.console.flush();
    }
}

/// Initialize the logging system
pub fn init_logging(app: &AppHandle) -> Result<(), String> {
    let log_dir = app
        .path()
        .app_log_dir()
        .map_err(|e| format!("Failed to get log directory: {}", e))?;

    open_log_dir(&log_dir)?;

    let console = env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .build();
    let max_level = console.filter();
    log::set_boxed_logger(Box::new(FileLogger { console }))
        .map_err(|e| format!("Failed to install logger: {}", e))?;
    log::set_max_level(max_level);

    log::info!("Logging system initialized");
    log::info!("Log directory: {:?}", log_dir);

    Ok(())
}

/// Point the file sink at `log_dir`, creating it if needed.
fn open_log_dir(log_dir: &Path) -> Result<(), String> {
    fs::create_dir_all(log_dir).map_err(|e| format!("Failed to create log directory: {}", e))?;

    {
        let mut dir = LOG_DIR
            .lock()
            .map_err(|e| format!("Failed to acquire log directory lock: {}", e))?;
        *dir = Some(log_dir.to_path_buf());
    }

    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(current_log_path(log_dir))
        .map_err(|e| format!("Failed to open log file: {}", e))?;

    {
        let mut log_file = LOG_FILE
            .lock()
            .map_err(|e| format!("Failed to acquire log file lock: {}", e))?;
        *log_file = Some(file);
    }

    cleanup_old_logs(log_dir, MAX_LOG_FILES);
    Ok(())
}

/// Get the path for the current log file (one per day)
fn current_log_path(log_dir: &Path) -> PathBuf {
    let date = Local::now().format("%Y-%m-%d");
    log_dir.join(format!("{}_{}.log", LOG_FILE_PREFIX, date))
}

/// Clean up old log files, keeping only the most recent `keep`
fn cleanup_old_logs(log_dir: &Path, keep: usize) {
    if let Ok(entries) = fs::read_dir(log_dir) {
        let mut log_files: Vec<_> = entries
            .filter_map(|e| e.ok())
            .filter(|e| {
                e.path()
                    .extension()
                    .map(|ext| ext == "log")
                    .unwrap_or(false)
            })
            .collect();

        // Sort by modification time (newest first)
        log_files.sort_by(|a, b| {
            let a_time = a.metadata().and_then(|m| m.modified()).ok();
            let b_time = b.metadata().and_then(|m| m.modified()).ok();
            b_time.cmp(&a_time)
        });

        for file in log_files.into_iter().skip(keep) {
            let _ = fs::remove_file(file.path());
        }
    }
}

/// Check if log rotation is needed and rotate if necessary
fn check_rotation() {
    // Use safe locking - if lock is poisoned, skip rotation rather than panic
    let log_dir = {
        let dir = match LOG_DIR.lock() {
            Ok(guard) => guard,
            Err(_) => return,
        };
        match dir.as_ref() {
            Some(d) => d.clone(),
            None => return,
        }
    };

    let current_path = current_log_path(&log_dir);

    if let Ok(metadata) = fs::metadata(&current_path) {
        if metadata.len() > MAX_LOG_SIZE {
            let timestamp = Local::now().format("%Y-%m-%d_%H%M%S");
            let rotated_path = log_dir.join(format!("{}_{}.log", LOG_FILE_PREFIX, timestamp));
            let _ = fs::rename(&current_path, &rotated_path);

            if let Ok(file) = OpenOptions::new()
                .create(true)
                .append(true)
                .open(&current_path)
            {
                if let Ok(mut log_file) = LOG_FILE.lock() {
                    *log_file = Some(file);
                }
            }

            cleanup_old_logs(&log_dir, MAX_LOG_FILES);
        }
    }
}

fn format_line(level: LogLevel, source: &str, message: &str) -> String {
    let timestamp = Local::now().format("%Y-%m-%d %H:%M:%S%.3f");
    format!("[{}] [{}] [{}] {}\n", timestamp, level, source, message)
}

/// Append one line to the log file.
fn write_line(level: LogLevel, source: &str, message: &str) {
    let log_line = format_line(level, source, message);

    if let Ok(mut log_file) = LOG_FILE.lock() {
        if let Some(ref mut file) = *log_file {
            let _ = file.write_all(log_line.as_bytes());
            let _ = file.flush();
        }
    }

    check_rotation();
}

/// Log a line that did not come through the `log` facade (frontend logs).
pub fn log_internal(level: LogLevel, source: &str, message: &str) {
    write_line(level, source, message);

    // Also print to console in debug builds
    #[cfg(debug_assertions)]
    {
        let line = format_line(level, source, message);
        match level {
            LogLevel::Error => eprintln!("{}", line.trim()),
            _ => println!("{}", line.trim()),
        }
    }
}

/// Last `lines` lines of `content`, oldest first.
fn tail_lines(content: &str, lines: usize) -> String {
    let recent: Vec<&str> = content.lines().rev().take(lines).collect();
    recent.into_iter().rev().collect::<Vec<_>>().join("\n")
}

// ============================================================================
// Tauri Commands
// ============================================================================

/// Write a log message from the frontend
#[command]
pub fn write_log(level: String, source: String, message: String) {
    log_internal(LogLevel::from_name(&level), &source, &message);
}

/// Write multiple log messages from the frontend (batch)
#[command]
pub fn write_logs(logs: Vec<(String, String, String)>) {
    for (level, source, message) in logs {
        write_log(level, source, message);
    }
}

/// Get the log directory path
#[command]
pub fn get_log_dir(app: AppHandle) -> Result<String, String> {
    let log_dir = app
        .path()
        .app_log_dir()
        .map_err(|e| format!("Failed to get log directory: {}", e))?;

    Ok(log_dir.to_string_lossy().to_string())
}

/// Get recent logs (last N lines) for debugging
#[command]
pub fn get_recent_logs(app: AppHandle, lines: Option<usize>) -> Result<String, String> {
    let log_dir = app
        .path()
        .app_log_dir()
        .map_err(|e| format!("Failed to get log directory: {}", e))?;

    let log_path = current_log_path(&log_dir);

    if !log_path.exists() {
        return Ok(String::new());
    }

    let content =
        fs::read_to_string(&log_path).map_err(|e| format!("Failed to read log file: {}", e))?;

    Ok(tail_lines(&content, lines.unwrap_or(100)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::{Duration, SystemTime};

    #[test]
    fn level_names_from_frontend() {
        assert_eq!(LogLevel::from_name("DEBUG"), LogLevel::Debug);
        assert_eq!(LogLevel::from_name("warning"), LogLevel::Warn);
        assert_eq!(LogLevel::from_name("error"), LogLevel::Error);
        assert_eq!(LogLevel::from_name("verbose"), LogLevel::Info);
    }

    #[test]
    fn levels_from_log_crate() {
        assert_eq!(LogLevel::from(log::Level::Trace), LogLevel::Debug);
        assert_eq!(LogLevel::from(log::Level::Warn), LogLevel::Warn);
        assert_eq!(LogLevel::Error.to_string(), "ERROR");
    }

    #[test]
    fn line_format_has_level_and_source() {
        let line = format_line(LogLevel::Warn, "bridge", "headers missing");
        assert!(line.ends_with("[WARN] [bridge] headers missing\n"));
    }

    #[test]
    fn log_file_is_named_by_day() {
        let dir = Path::new("/tmp/logs");
        let name = current_log_path(dir)
            .file_name()
            .unwrap()
            .to_string_lossy()
            .to_string();
        assert!(name.starts_with("waffle-bar_"));
        assert!(name.ends_with(".log"));
    }

    #[test]
    fn cleanup_keeps_newest_logs() {
        let dir = tempfile::tempdir().unwrap();
        let now = SystemTime::now();

        for i in 0..4u64 {
            let path = dir.path().join(format!("old_{}.log", i));
            let file = File::create(&path).unwrap();
            file.set_modified(now - Duration::from_secs(3600 * (i + 1)))
                .unwrap();
        }
        fs::write(dir.path().join("notes.txt"), "keep me").unwrap();

        cleanup_old_logs(dir.path(), 2);

        assert!(dir.path().join("old_0.log").exists());
        assert!(dir.path().join("old_1.log").exists());
        assert!(!dir.path().join("old_2.log").exists());
        assert!(!dir.path().join("old_3.log").exists());
        assert!(dir.path().join("notes.txt").exists());
    }

    #[test]
    fn tail_returns_last_lines_in_order() {
        let content = "one\ntwo\nthree\nfour";
        assert_eq!(tail_lines(content, 2), "three\nfour");
        assert_eq!(tail_lines(content, 10), content);
        assert_eq!(tail_lines("", 5), "");
    }
}
