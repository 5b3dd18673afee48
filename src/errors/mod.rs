//! Centralized error handling for the registry
//!
//! This module provides the error taxonomy shared by the store, the reference
//! cache, the lifecycle guard and the request layer.
//!
//! # Error Categories
//!
//! - **Repository Errors**: store connectivity, query failures, deadlines
//! - **Lifecycle Errors**: rejected enable/disable/delete transitions
//! - **Reference Errors**: dependent writes pointing at unknown parents
//! - **Validation Errors**: malformed input caught at the boundary
//!
//! # Usage
//!
//! ```rust
//! use fyc_registry::errors::{AppError, AppResult};
//!
//! async fn example_function() -> AppResult<String> {
//!     Ok("success".to_string())
//! }
//! ```

pub mod types;

pub use types::*;

/// Convenience type alias for Results using AppError
pub type AppResult<T> = Result<T, AppError>;

/// Convenience type alias for Repository Results
pub type RepositoryResult<T> = Result<T, RepositoryError>;
