//! Tracing subscriber setup.
//!
//! The terminal belongs to the game screen, so the binary logs to a file.
//! Tests log through the test writer so output is captured per test.

use once_cell::sync::OnceCell;
use std::fs::{self, File};
use std::path::Path;
use std::sync::Mutex;
use tracing_subscriber::{fmt, EnvFilter};

static TEST_INIT: OnceCell<()> = OnceCell::new();

fn filter_from_env(var: &str, fallback: &str) -> EnvFilter {
    std::env::var(var)
        .map(EnvFilter::new)
        .unwrap_or_else(|_| EnvFilter::new(fallback))
}

/// Log to `path`, filtered by `RUST_LOG` (default `warn`).
pub fn init_file(path: &Path) -> std::io::Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let file = File::options().create(true).append(true).open(path)?;

    fmt()
        .with_env_filter(filter_from_env("RUST_LOG", "warn"))
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .try_init()
        .ok();
    Ok(())
}

/// Idempotent test logging. `TEST_LOG` wins over `RUST_LOG`; quiet by default.
pub fn init_test() {
    TEST_INIT.get_or_init(|| {
        let filter = std::env::var("TEST_LOG")
            .or_else(|_| std::env::var("RUST_LOG"))
            .map(EnvFilter::new)
            .unwrap_or_else(|_| EnvFilter::new("warn"));

        fmt()
            .with_env_filter(filter)
            .with_test_writer()
            .without_time()
            .try_init()
            .ok();
    });
}
