//! Operation boundary macros
//!
//! `save_personal_info`, `kv_commit` and friends each log one `start` event
//! and then exactly one of `end` or `end_error`. All three carry `component`
//! (the calling module), `op` and `event`; any trailing `name = value` pairs
//! are passed through to `tracing` unchanged.
//!
//! The closing macros take either a precomputed `duration_ms = <u64>` or
//! `since = <Instant>`, in which case the elapsed milliseconds are measured
//! at the call.

/// Log the start of an operation
///
/// ```
/// # use pinfo_core::log_op_start;
/// log_op_start!("load_personal_info");
/// log_op_start!("kv_commit", backend = "memory", batch_len = 3u64);
/// ```
#[macro_export]
macro_rules! log_op_start {
    ($op:expr $(, $($field:tt)*)?) => {
        tracing::info!(
            component = module_path!(),
            op = $op,
            event = pinfo_core_types::schema::EVENT_START,
            $($($field)*)?
        );
    };
}

/// Log the successful end of an operation
///
/// ```
/// # use pinfo_core::log_op_end;
/// let started = std::time::Instant::now();
/// log_op_end!("kv_commit", since = started);
/// log_op_end!("save_personal_info", duration_ms = 3, backend = "json");
/// ```
#[macro_export]
macro_rules! log_op_end {
    ($op:expr, since = $started:expr $(, $($field:tt)*)?) => {
        $crate::log_op_end!(
            $op,
            duration_ms = $started.elapsed().as_millis() as u64
            $(, $($field)*)?
        )
    };
    ($op:expr, duration_ms = $duration:expr $(, $($field:tt)*)?) => {
        tracing::info!(
            component = module_path!(),
            op = $op,
            event = pinfo_core_types::schema::EVENT_END,
            duration_ms = $duration,
            $($($field)*)?
        );
    };
}

/// Log a failed operation at ERROR level
///
/// `$err` is anything convertible into [`ExError`](crate::errors::ExError);
/// its kind, stable code and message become `err_kind`, `err_code` and
/// `err_message`.
///
/// ```
/// # use pinfo_core::log_op_error;
/// # use pinfo_core::errors::PInfoError;
/// let started = std::time::Instant::now();
/// log_op_error!("submit_profile", PInfoError::InvalidEmail, since = started);
/// ```
#[macro_export]
macro_rules! log_op_error {
    ($op:expr, $err:expr, since = $started:expr $(, $($field:tt)*)?) => {
        $crate::log_op_error!(
            $op,
            $err,
            duration_ms = $started.elapsed().as_millis() as u64
            $(, $($field)*)?
        )
    };
    ($op:expr, $err:expr, duration_ms = $duration:expr $(, $($field:tt)*)?) => {{
        let ex_err: $crate::errors::ExError = $err.into();
        tracing::error!(
            component = module_path!(),
            op = $op,
            event = pinfo_core_types::schema::EVENT_END_ERROR,
            duration_ms = $duration,
            err_kind = ?ex_err.kind(),
            err_code = ex_err.code(),
            err_message = ex_err.message(),
            $($($field)*)?
        );
    }};
}
