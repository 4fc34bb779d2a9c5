use crate::Timing;
use thiserror::Error;

#[doc = r#"
A set of errors that can occur while converting time spans.

Every failure is local to the call that produced it. A conversion never
returns a partial value.
"#]
#[derive(Debug, Error, Clone, PartialEq)]
pub enum TimeSpanError {
    /// An argument was rejected before the tempo map was consulted.
    #[error("Invalid argument `{name}`: {reason}")]
    InvalidArgument {
        /// Name of the offending argument
        name: &'static str,
        /// Why it was rejected
        reason: &'static str,
    },
    /// The requested operation has no meaning for the given time spans.
    #[error("Unsupported operation: {0}")]
    UnsupportedOperation(&'static str),
    /// Only ticks-per-quarter-note timing can express musical or metric time.
    #[error("Time division `{0}` is not supported for time span conversion")]
    UnsupportedTimeDivision(Timing),
    /// The result does not fit into a 64-bit tick count.
    #[error("Time span is too big")]
    Overflow,
    /// A string is not a time span in its display format.
    #[error("Invalid time span format, expected {0}")]
    InvalidFormat(&'static str),
}

impl TimeSpanError {
    pub(crate) const fn invalid(name: &'static str, reason: &'static str) -> Self {
        Self::InvalidArgument { name, reason }
    }

    pub(crate) const fn negative(name: &'static str) -> Self {
        Self::InvalidArgument {
            name,
            reason: "value is negative",
        }
    }

    /// True if the error was caused by an argument check
    pub const fn is_invalid_argument(&self) -> bool {
        matches!(self, Self::InvalidArgument { .. })
    }
}

/// The Convert Result type (see [`TimeSpanError`])
pub type ConvertResult<T> = Result<T, TimeSpanError>;

/// Fails with [`TimeSpanError::InvalidArgument`] if `value` is negative.
pub(crate) const fn ensure_non_negative(name: &'static str, value: i64) -> ConvertResult<i64> {
    if value < 0 {
        return Err(TimeSpanError::negative(name));
    }
    Ok(value)
}

#[test]
fn negative_values_are_rejected() {
    use pretty_assertions::assert_eq;
    assert_eq!(ensure_non_negative("time", 0), Ok(0));
    assert_eq!(ensure_non_negative("time", 10), Ok(10));
    let err = ensure_non_negative("length", -1).unwrap_err();
    assert!(err.is_invalid_argument());
    assert_eq!(
        err,
        TimeSpanError::InvalidArgument {
            name: "length",
            reason: "value is negative"
        }
    );
}
