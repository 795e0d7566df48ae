//! Error types for the grouping pipeline.

/// Result alias used throughout the crate.
pub type Result<T, E = GroupingError> = std::result::Result<T, E>;

/// Failures of a single grouping computation.
///
/// Every variant is local to one request; the pipeline holds no state, so a
/// failure never leaves anything behind that a later request could observe.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GroupingError {
    /// The item count is not a positive integer.
    ///
    /// `value` is the offending input rendered as text, so fractional and
    /// negative host values survive into the message unchanged.
    #[error("Invalid number of elephants: {value}")]
    InvalidItemCount { value: String },

    /// No length in `0..=count` covers `count`.
    ///
    /// Unreachable for positive input; kept as a hard failure so a broken
    /// solver surfaces instead of returning a default.
    #[error("No valid group length found for {count} elephants")]
    NoValidGroupLength { count: u64 },

    /// Fewer encodings were generated than items requested.
    #[error("Only {available} encodings available for {requested} elephants")]
    InsufficientEncodings { requested: u64, available: u64 },

    /// The minimal group count exceeds the configured enumeration limit.
    #[error("{required} groups required, but at most {max} are allowed")]
    TooManyGroups { required: u32, max: u32 },
}

impl GroupingError {
    pub(crate) fn invalid_count(value: impl std::fmt::Display) -> Self {
        Self::InvalidItemCount {
            value: value.to_string(),
        }
    }
}
