//! Error types for group change handling.

use crate::types::MemberId;
use thiserror::Error;

/// Main error type for applying changes and checking the snapshot schema.
///
/// Reconstruction itself never fails; these errors come from forward
/// application of a change record and from the schema guard.
#[derive(Debug, Error)]
pub enum GroupError {
    #[error("Member not found: {0}")]
    MemberNotFound(MemberId),

    #[error("Pending member not found: {0}")]
    PendingMemberNotFound(MemberId),

    #[error("Requesting member not found: {0}")]
    RequestingMemberNotFound(MemberId),

    #[error("Member already exists: {0}")]
    MemberExists(MemberId),

    #[error("Stale revision: change is at {change}, snapshot is already at {current}")]
    StaleRevision { current: u32, change: u32 },

    #[error("Snapshot schema drift: {0}")]
    SchemaDrift(String),

    #[error("Serialization error: {0}")]
    Serialization(String),

    #[error("Deserialization error: {0}")]
    Deserialization(String),
}

impl From<serde_json::Error> for GroupError {
    fn from(e: serde_json::Error) -> Self {
        if e.is_data() || e.is_syntax() || e.is_eof() {
            GroupError::Deserialization(e.to_string())
        } else {
            GroupError::Serialization(e.to_string())
        }
    }
}

/// Result type for group operations.
pub type Result<T> = std::result::Result<T, GroupError>;
