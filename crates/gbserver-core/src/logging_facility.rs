//! Structured logging facility for gbserver
//!
//! - Single initialization point via `init(profile)`
//! - Structured logging macros (`log_op_start!`, `log_op_end!`, `log_op_error!`)
//! - Test capture mode for deterministic assertions
//!
//! Operation boundaries (start, end, end_error) are logged once, by the
//! service layer. Store ops below it only emit `tracing::debug!`.
//!
//! # Usage
//!
//! ```rust
//! use gbserver_core::logging_facility::{init, Profile};
//!
//! init(Profile::Development);
//! ```

pub mod init;
pub mod macros;
pub mod test_capture;

pub use init::{init, Profile};
pub use test_capture::{init_test_capture, CapturedEvent, TestCapture};
