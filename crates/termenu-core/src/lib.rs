//! # termenu-core - Core Types
//!
//! Foundation crate for termenu. Provides the error taxonomy, the escape
//! sequence vocabulary the engine emits, and display metrics for raw
//! terminal text.
//!
//! This crate has **zero internal dependencies** -- it only depends on external
//! crates (thiserror, regex, toml, tracing).
//!
//! ## Public API
//!
//! ### Error Handling (`error`)
//! - [`Error`] - Error enum with `fatal` vs `recoverable` classification
//! - [`Result`] - Type alias for `std::result::Result<T, Error>`
//! - [`ResultExt`] - Extension trait for adding error context
//!
//! ### Escape Sequences (`ansi`)
//! - [`strip_escape_codes()`], [`contains_escape_codes()`]
//! - [`ansi::escape_segments()`] - literal/escape split in char units
//! - cursor movement and line clearing builders
//!
//! ### Display Metrics (`metrics`)
//! - [`display_width()`] - columns occupied by raw text
//! - [`offset_for_width()`] - char index reaching a target width
//!
//! ## Prelude
//!
//! ```rust
//! use termenu_core::prelude::*;
//! ```

pub mod ansi;
pub mod error;
pub mod logging;
pub mod metrics;
pub mod prelude;

pub use ansi::{contains_escape_codes, strip_escape_codes};
pub use error::{Error, Result, ResultExt};
pub use metrics::{display_width, offset_for_width, prefix_width};
