//! Logging setup
//!
//! The interactive reviewer owns the terminal, so it logs to a timestamped
//! file in the cache directory (`~/.cache/gh-dep/` on Linux). Batch commands
//! log to stderr through env_logger.

use anyhow::{Context, Result};
use simplelog::{ConfigBuilder, LevelFilter, WriteLogger};
use std::fs::File;
use std::path::PathBuf;

fn log_file_path() -> PathBuf {
    let timestamp = chrono::Local::now().format("%Y%m%d-%H%M%S");
    let filename = format!("gh-dep-{}.log", timestamp);

    gh_dep_config::cache_dir()
        .map(|dir| dir.join(&filename))
        .unwrap_or_else(|_| PathBuf::from(filename))
}

fn level_from_env(default: LevelFilter) -> LevelFilter {
    std::env::var("RUST_LOG")
        .map(|v| match v.to_lowercase().as_str() {
            "error" => LevelFilter::Error,
            "warn" => LevelFilter::Warn,
            "info" => LevelFilter::Info,
            "debug" => LevelFilter::Debug,
            "trace" => LevelFilter::Trace,
            _ => default,
        })
        .unwrap_or(default)
}

/// Log to a file, returns its path
pub fn init_file(verbose: bool) -> Result<PathBuf> {
    let log_file = log_file_path();
    let level = if verbose {
        LevelFilter::Debug
    } else {
        level_from_env(LevelFilter::Info)
    };

    let config = ConfigBuilder::new()
        .set_time_format_rfc3339()
        .set_time_offset_to_local()
        .unwrap_or_else(|c| c)
        .build();

    let file = File::create(&log_file)
        .with_context(|| format!("Failed to create log file {}", log_file.display()))?;
    WriteLogger::init(level, config, file).context("Failed to initialize logger")?;

    Ok(log_file)
}

/// Log to stderr, `warn` unless RUST_LOG or --verbose say otherwise
pub fn init_stderr(verbose: bool) {
    let mut builder =
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn"));
    if verbose {
        builder.filter_level(log::LevelFilter::Debug);
    }
    builder.format_timestamp(None).init();
}
