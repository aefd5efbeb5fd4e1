//! Error handling for the ballot engine
//!
//! The taxonomy is deliberately closed: callers must handle terminal
//! outcomes (`AlreadyVoted`), correctable ones (`InvalidSelection`,
//! `EmptyBallot`) and transient storage faults (`Unavailable`) distinctly.

use uuid::Uuid;

/// Result type alias for the ballot engine
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for the ballot engine
#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum Error {
    /// The supplied credential does not resolve to a known voter
    #[error("No voter found for the supplied credential")]
    NotFound,

    /// The voter has already cast a ballot; terminal for that voter
    #[error("Voter has already cast a ballot")]
    AlreadyVoted,

    /// A selection violates cardinality or membership rules
    #[error("Invalid selection for position {position}: {reason}")]
    InvalidSelection { position: Uuid, reason: String },

    /// The submission contains no selections at all
    #[error("Ballot contains no selections")]
    EmptyBallot,

    /// Storage or catalog read/write failure; the caller may retry
    #[error("Storage unavailable: {message}")]
    Unavailable { message: String },
}

impl Error {
    /// Create an invalid-selection error with a free-form reason
    pub fn invalid_selection(position: Uuid, reason: impl Into<String>) -> Self {
        Self::InvalidSelection {
            position,
            reason: reason.into(),
        }
    }

    /// Selection set exceeds the position's `max_vote`
    pub fn over_limit(position: Uuid, max_vote: u32, chosen: usize) -> Self {
        Self::invalid_selection(
            position,
            format!("{chosen} candidates selected, position allows at most {max_vote}"),
        )
    }

    /// A chosen candidate does not belong to the position it was filed under
    pub fn foreign_candidate(position: Uuid, candidate: Uuid) -> Self {
        Self::invalid_selection(
            position,
            format!("candidate {candidate} does not belong to this position"),
        )
    }

    /// A chosen candidate does not exist in the catalog at all
    pub fn unknown_candidate(position: Uuid, candidate: Uuid) -> Self {
        Self::invalid_selection(position, format!("candidate {candidate} is not in the catalog"))
    }

    /// The submission names a position that is not in the catalog
    pub fn unknown_position(position: Uuid) -> Self {
        Self::invalid_selection(position, "position does not exist in the catalog")
    }

    /// Create an unavailable error
    pub fn unavailable(message: impl Into<String>) -> Self {
        Self::Unavailable {
            message: message.into(),
        }
    }

    /// Whether the caller may retry the operation with the same payload
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::Unavailable { .. })
    }
}

/// Convenience macro for creating `Unavailable` errors
#[macro_export]
macro_rules! unavailable {
    ($msg:expr) => {
        $crate::Error::unavailable($msg)
    };
    ($fmt:expr, $($arg:tt)*) => {
        $crate::Error::unavailable(format!($fmt, $($arg)*))
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_creation() {
        let position = Uuid::new_v4();

        let over = Error::over_limit(position, 2, 3);
        assert!(matches!(over, Error::InvalidSelection { .. }));
        assert!(over.to_string().contains("at most 2"));

        let unknown = Error::unknown_position(position);
        assert!(unknown.to_string().contains("does not exist"));

        let storage = Error::unavailable("lock poisoned");
        assert!(matches!(storage, Error::Unavailable { .. }));
    }

    #[test]
    fn test_retryability() {
        assert!(Error::unavailable("transient").is_retryable());
        assert!(!Error::AlreadyVoted.is_retryable());
        assert!(!Error::EmptyBallot.is_retryable());
        assert!(!Error::NotFound.is_retryable());
    }

    #[test]
    fn test_unavailable_macro() {
        let err = unavailable!("store {} offline", 2);
        assert!(matches!(err, Error::Unavailable { .. }));
        assert!(err.to_string().contains("store 2 offline"));
    }
}
