//! Error types for snapshot construction and reconciliation.
//!
//! Every failure here is recoverable: an invalid snapshot is rejected before
//! anything is mutated, and a disconnected actor leaves the last applied
//! state on screen.

use thiserror::Error;

/// Result alias for reconciler operations.
pub type Result<T> = std::result::Result<T, ReconcileError>;

/// A snapshot violated one of its structural invariants.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SnapshotError {
    /// The same item identity appears twice, in one section or across two.
    #[error("duplicate item identity {0}")]
    DuplicateItem(String),

    /// The same section identity was appended twice.
    #[error("duplicate section identity {0}")]
    DuplicateSection(String),

    /// Items were appended to a section the snapshot does not contain.
    #[error("section {0} is not part of the snapshot")]
    UnknownSection(String),

    /// Items were appended before any section existed.
    #[error("items appended before any section")]
    NoSection,
}

/// Errors surfaced by the reconciler and its actor.
#[derive(Debug, Error)]
pub enum ReconcileError {
    /// The snapshot was rejected; the previously applied state is unchanged.
    #[error("invalid snapshot: {0}")]
    InvalidSnapshot(#[from] SnapshotError),

    /// The reconciler actor has shut down.
    #[error("reconciler actor is no longer running")]
    Disconnected,

    /// Terminal I/O failed.
    #[error("terminal I/O failed: {0}")]
    Io(#[from] std::io::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_snapshot_error_converts() {
        let err: ReconcileError = SnapshotError::DuplicateItem("A".to_string()).into();
        assert!(matches!(
            err,
            ReconcileError::InvalidSnapshot(SnapshotError::DuplicateItem(_))
        ));
        assert_eq!(err.to_string(), "invalid snapshot: duplicate item identity A");
    }

    #[test]
    fn test_io_error_converts() {
        let err: ReconcileError = std::io::Error::other("gone").into();
        assert!(err.to_string().contains("gone"));
    }
}
