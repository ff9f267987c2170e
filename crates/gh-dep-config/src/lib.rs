//! Configuration and file management for gh-dep
//!
//! This crate provides:
//! - File path utilities for config and cache files
//! - Configuration file loading (TOML)
//! - Application configuration (AppConfig)
//! - Group cache persistence

pub mod app_config;
pub mod config_file;
pub mod group_cache;
pub mod paths;

pub use app_config::AppConfig;
pub use config_file::load_config_file;
pub use group_cache::GroupCache;
pub use paths::{app_config_path, cache_dir, config_dir, group_cache_path};
