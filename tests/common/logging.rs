//! Verbose test logging infrastructure.
//!
//! Every entry captures elapsed time, level, category and message with
//! optional key-value context. Entries stay in memory and are dumped when a
//! test fails.
//!
//! ```ignore
//! let logger = TestLogger::new();
//! logger.info("setup", "Writing sample file");
//! logger.info_ctx("action", "Starting batch", |ctx| {
//!     ctx.push(("calls".into(), "2".into()));
//! });
//! // [   0.001s] INFO  [setup] Writing sample file
//! // [   0.002s] INFO  [action] Starting batch
//! //            calls = 2
//! ```

#![allow(dead_code)]

use std::fmt::Write as _;
use std::sync::Mutex;
use std::time::{Duration, Instant};

const REDACTED_VALUE: &str = "[REDACTED]";
const REDACTION_KEYS: [&str; 5] = ["api_key", "api-key", "authorization", "bearer", "token"];

/// Log entry severity level.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogLevel {
    Debug,
    Info,
}

impl LogLevel {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Debug => "DEBUG",
            Self::Info => "INFO ",
        }
    }

    pub const fn color_code(self) -> &'static str {
        match self {
            Self::Debug => "\x1b[90m", // Gray
            Self::Info => "\x1b[32m",  // Green
        }
    }
}

/// A single captured log entry.
#[derive(Debug, Clone)]
pub struct LogEntry {
    pub elapsed_ms: u64,
    pub level: LogLevel,
    pub category: String,
    pub message: String,
    pub context: Vec<(String, String)>,
}

impl LogEntry {
    pub fn format(&self) -> String {
        let elapsed = format_elapsed_ms(self.elapsed_ms);
        let mut output = format!(
            "[{elapsed}s] {} [{}] {}\n",
            self.level.as_str(),
            self.category,
            self.message
        );
        for (key, value) in &self.context {
            let _ = writeln!(output, "           {key} = {value}");
        }
        output
    }

    pub fn format_colored(&self) -> String {
        const RESET: &str = "\x1b[0m";
        const DIM: &str = "\x1b[2m";

        let elapsed = format_elapsed_ms(self.elapsed_ms);
        let mut output = format!(
            "{DIM}[{elapsed}s]{RESET} {}{}{RESET} {DIM}[{}]{RESET} {}\n",
            self.level.color_code(),
            self.level.as_str(),
            self.category,
            self.message
        );
        for (key, value) in &self.context {
            let _ = writeln!(output, "{DIM}           {key}{RESET} = {value}");
        }
        output
    }
}

fn format_elapsed_ms(elapsed_ms: u64) -> String {
    let secs = elapsed_ms / 1000;
    let millis = elapsed_ms % 1000;
    let raw = format!("{secs}.{millis:03}");
    format!("{raw:>8}")
}

fn redact(key: &str, value: String) -> String {
    let lowered = key.to_ascii_lowercase();
    if REDACTION_KEYS.iter().any(|needle| lowered.contains(needle)) {
        REDACTED_VALUE.to_string()
    } else {
        value
    }
}

/// Thread-safe logger capturing entries for later dumping.
pub struct TestLogger {
    entries: Mutex<Vec<LogEntry>>,
    start: Instant,
}

impl TestLogger {
    pub fn new() -> Self {
        Self {
            entries: Mutex::new(Vec::new()),
            start: Instant::now(),
        }
    }

    pub fn elapsed(&self) -> Duration {
        self.start.elapsed()
    }

    pub fn with_context<F>(&self, level: LogLevel, category: &str, message: impl Into<String>, f: F)
    where
        F: FnOnce(&mut Vec<(String, String)>),
    {
        let mut context = Vec::new();
        f(&mut context);
        let context = context
            .into_iter()
            .map(|(key, value)| {
                let value = redact(&key, value);
                (key, value)
            })
            .collect();

        let entry = LogEntry {
            elapsed_ms: u64::try_from(self.start.elapsed().as_millis()).unwrap_or(u64::MAX),
            level,
            category: category.to_string(),
            message: message.into(),
            context,
        };
        self.entries.lock().expect("log lock").push(entry);
    }

    pub fn info(&self, category: &str, message: impl Into<String>) {
        self.with_context(LogLevel::Info, category, message, |_| {});
    }

    pub fn info_ctx<F>(&self, category: &str, message: impl Into<String>, f: F)
    where
        F: FnOnce(&mut Vec<(String, String)>),
    {
        self.with_context(LogLevel::Info, category, message, f);
    }

    pub fn debug_ctx<F>(&self, category: &str, message: impl Into<String>, f: F)
    where
        F: FnOnce(&mut Vec<(String, String)>),
    {
        self.with_context(LogLevel::Debug, category, message, f);
    }

    fn entries(&self) -> Vec<LogEntry> {
        self.entries.lock().expect("log lock").clone()
    }

    pub fn dump(&self) -> String {
        self.entries().iter().map(LogEntry::format).collect()
    }

    pub fn dump_colored(&self) -> String {
        self.entries().iter().map(LogEntry::format_colored).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dump_keeps_entry_order_and_levels() {
        let logger = TestLogger::new();
        logger.info("setup", "Writing sample file");
        logger.debug_ctx("harness", "Read test file", |ctx| {
            ctx.push(("size".into(), "12 bytes".into()));
        });
        let dump = logger.dump();
        let lines: Vec<&str> = dump.lines().collect();
        assert_eq!(lines.len(), 3, "{dump}");
        assert!(lines[0].ends_with("INFO  [setup] Writing sample file"), "{dump}");
        assert!(lines[1].ends_with("DEBUG [harness] Read test file"), "{dump}");
        assert_eq!(lines[2].trim(), "size = 12 bytes");
    }

    #[test]
    fn credential_context_is_redacted() {
        let logger = TestLogger::new();
        logger.info_ctx("setup", "Resolved key", |ctx| {
            ctx.push(("api_key".into(), "sk-or-secret".into()));
            ctx.push(("model".into(), "openai/gpt-4o-mini".into()));
        });
        let dump = logger.dump();
        assert!(!dump.contains("sk-or-secret"));
        assert!(dump.contains("model = openai/gpt-4o-mini"));
    }
}
