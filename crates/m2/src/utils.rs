//! Utility macros used across the crate.

/// Returns early with an error if a condition is not met.
///
/// Like `assert!`, but returns `Err($error)` instead of panicking.
///
/// # Example
///
/// ```ignore
/// ensure!(fields.len() == FIELD_NUM, ParseError::malformed_envelope(fields.len()));
/// ```
macro_rules! ensure {
    ($predicate:expr, $error:expr) => {
        if !$predicate {
            return Err($error);
        }
    };
}

pub(crate) use ensure;
