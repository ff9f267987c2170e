//! Domain models
//!
//! Core domain types used throughout the application.
//! These are pure domain concepts, separate from UI state.

pub mod execution;
pub mod group;
pub mod pull_request;
pub mod repository;
pub mod title_parser;

pub use execution::{
    ExecutionError, ExecutionMode, ExecutionOptions, ExecutionResult, MergeStrategy,
};
pub use group::{group_prs, Groups};
pub use pull_request::Pr;
pub use repository::Repository;
pub use title_parser::TitleParser;
