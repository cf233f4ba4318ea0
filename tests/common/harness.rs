//! Test harness for consistent setup/teardown and auto-logging.
//!
//! The `TestHarness` provides a temporary directory, a test logger, and an
//! automatic log dump when the test panics.
//!
//! ```ignore
//! #[test]
//! fn loads_samples() {
//!     let harness = TestHarness::new("loads_samples");
//!     let path = harness.create_file("pre.csv", "4;Status de Entrega do Cartão;cadê\n");
//!     harness.log().info_ctx("action", "Loading", |ctx| {
//!         ctx.push(("path".into(), path.display().to_string()));
//!     });
//! }
//! ```

#![allow(dead_code)]

use super::logging::TestLogger;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Test harness providing temp directories, logging, and cleanup.
pub struct TestHarness {
    name: String,
    temp_dir: TempDir,
    logger: TestLogger,
}

impl TestHarness {
    pub fn new(name: impl Into<String>) -> Self {
        let name = name.into();
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let logger = TestLogger::new();

        logger.info("harness", format!("Test '{name}' started"));
        logger.info_ctx("harness", "Temp directory created", |ctx| {
            ctx.push(("path".into(), temp_dir.path().display().to_string()));
        });

        Self {
            name,
            temp_dir,
            logger,
        }
    }

    pub const fn log(&self) -> &TestLogger {
        &self.logger
    }

    pub fn temp_path(&self, path: impl AsRef<Path>) -> PathBuf {
        self.temp_dir.path().join(path)
    }

    /// Create a file in the temp directory with the given content.
    ///
    /// Returns the full path to the created file.
    pub fn create_file(&self, name: impl AsRef<Path>, content: impl AsRef<[u8]>) -> PathBuf {
        let path = self.temp_path(name);

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).expect("Failed to create parent directories");
        }

        let content_ref = content.as_ref();
        std::fs::write(&path, content_ref).expect("Failed to create test file");

        self.logger.info_ctx("harness", "Created test file", |ctx| {
            ctx.push(("path".into(), path.display().to_string()));
            ctx.push(("size".into(), format!("{} bytes", content_ref.len())));
        });

        path
    }

    pub fn read_file(&self, name: impl AsRef<Path>) -> String {
        let path = self.temp_path(name);
        let content = std::fs::read_to_string(&path).expect("Failed to read test file");

        self.logger.debug_ctx("harness", "Read test file", |ctx| {
            ctx.push(("path".into(), path.display().to_string()));
            ctx.push(("size".into(), format!("{} bytes", content.len())));
        });

        content
    }
}

impl Drop for TestHarness {
    fn drop(&mut self) {
        self.logger.info_ctx("harness", "Test completing", |ctx| {
            ctx.push((
                "elapsed".into(),
                format!("{:.3}s", self.logger.elapsed().as_secs_f64()),
            ));
        });

        if std::thread::panicking() {
            eprint!("\x1b[1;31m\n=== TEST FAILED: {} ===\n\x1b[0m", self.name);
            eprint!("{}", self.logger.dump_colored());
            eprintln!("=== END LOGS ===\n");
        }
    }
}
