//! Canonical logging macros
//!
//! Field names and event values come from `gbserver_core_types::schema`.

/// Log the start of an operation
///
/// ```
/// # use gbserver_core::log_op_start;
/// log_op_start!("create_repository");
/// log_op_start!("create_repository", org = "gborg", owner = "gbuser");
/// ```
#[macro_export]
macro_rules! log_op_start {
    ($op:expr) => {
        tracing::info!(
            component = module_path!(),
            op = $op,
            event = $crate::schema::EVENT_START,
        );
    };
    ($op:expr, $($field:tt)*) => {
        tracing::info!(
            component = module_path!(),
            op = $op,
            event = $crate::schema::EVENT_START,
            $($field)*
        );
    };
}

/// Log the successful end of an operation
///
/// ```
/// # use gbserver_core::log_op_end;
/// log_op_end!("list_branches", duration_ms = 3);
/// log_op_end!("list_branches", duration_ms = 3, result_len = 2);
/// ```
#[macro_export]
macro_rules! log_op_end {
    ($op:expr, duration_ms = $duration:expr) => {
        tracing::info!(
            component = module_path!(),
            op = $op,
            event = $crate::schema::EVENT_END,
            duration_ms = $duration,
        );
    };
    ($op:expr, duration_ms = $duration:expr, $($field:tt)*) => {
        tracing::info!(
            component = module_path!(),
            op = $op,
            event = $crate::schema::EVENT_END,
            duration_ms = $duration,
            $($field)*
        );
    };
}

/// Log an operation error
///
/// Accepts anything convertible into `ErrorReport`.
///
/// ```
/// # use gbserver_core::{log_op_error, GbError};
/// let err = GbError::OrganizationNotFound { org: "nope".to_string() };
/// log_op_error!("list_repositories", err, duration_ms = 1);
/// ```
#[macro_export]
macro_rules! log_op_error {
    ($op:expr, $err:expr, duration_ms = $duration:expr) => {{
        let report: $crate::errors::ErrorReport = $err.into();
        tracing::error!(
            component = module_path!(),
            op = $op,
            event = $crate::schema::EVENT_END_ERROR,
            duration_ms = $duration,
            err.kind = ?report.kind(),
            err.code = report.code(),
            message = report.message(),
        );
    }};
    ($op:expr, $err:expr, duration_ms = $duration:expr, $($field:tt)*) => {{
        let report: $crate::errors::ErrorReport = $err.into();
        tracing::error!(
            component = module_path!(),
            op = $op,
            event = $crate::schema::EVENT_END_ERROR,
            duration_ms = $duration,
            err.kind = ?report.kind(),
            err.code = report.code(),
            message = report.message(),
            $($field)*
        );
    }};
}
