//! # Group Change Reconstruction
//!
//! Derives group change records from two full group snapshots.
//!
//! Group state (membership, roles, title, avatar, timer, access policy,
//! invite link, pending and requesting members) reaches clients as
//! snapshots. When only two snapshots are known, the change between them has
//! to be rebuilt locally so it can flow through the same event path as
//! changes received from the service.
//!
//! ## Core Concepts
//!
//! - **Snapshots**: Full, decrypted group state at a revision
//! - **Change records**: Discrete edits moving one snapshot to the next
//! - **Reconstruction**: Pure, identity-keyed diff of two snapshots
//! - **Schema guard**: Test-time check that every snapshot field is diffed
//!
//! ## Example
//!
//! ```ignore
//! use group_reconstruct::{apply_change, reconstruct, ApplyConfig, GroupSnapshot};
//!
//! let change = reconstruct(&cached, &fetched);
//!
//! // Moving the cached state forward by the change lands on the fetched state
//! let next = apply_change(&cached, &change, &ApplyConfig::default())?;
//! ```

pub mod apply;
pub mod change;
pub mod error;
pub mod reconstruct;
pub mod schema;
pub mod snapshot;
pub mod types;

// Re-exports
pub use apply::{apply_change, ApplyConfig};
pub use change::{ApproveMember, ChangeRecord, FieldChange, ModifyMemberRole};
pub use error::{GroupError, Result};
pub use reconstruct::reconstruct;
pub use schema::{
    verify_field_coverage, SnapshotField, EXPECTED_SNAPSHOT_FIELD_COUNT, MAX_SNAPSHOT_FIELD_TAG,
};
pub use snapshot::GroupSnapshot;
pub use types::*;
