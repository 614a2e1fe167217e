use thiserror::Error;

/// Errors raised for caller-supplied timeline configuration
///
/// Task data never produces an error; inconsistent or missing dates are
/// resolved by fallback rules. These variants only cover values a caller
/// passes in directly.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TimelineError {
    /// Unknown granularity name
    #[error("invalid granularity '{value}'. Valid values: week, month, quarter")]
    InvalidGranularity { value: String },

    /// Unknown grouping key
    #[error("invalid grouping '{value}'. Valid values: none, assignee, priority, status")]
    InvalidGroupBy { value: String },

    /// Unknown text direction
    #[error("invalid direction '{value}'. Valid values: ltr, rtl")]
    InvalidDirection { value: String },

    /// A configuration constant that must be positive is zero
    #[error("{field} must be greater than zero")]
    ZeroValue { field: &'static str },
}

/// Result type alias for timeline configuration operations
pub type TimelineResult<T> = Result<T, TimelineError>;
