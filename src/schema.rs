//! Snapshot schema coverage guard.
//!
//! A snapshot field that [`crate::reconstruct`] never diffs produces change
//! records that silently drop information. The engine destructures snapshots
//! without a rest pattern, which catches new fields at compile time; this
//! module catches the rest at test time by checking the serialized shape of
//! [`GroupSnapshot`] and [`ChangeRecord`] against the list of fields the
//! engine is known to handle.
//!
//! Adding a snapshot field means, in the same change: a new [`SnapshotField`]
//! variant, a bump of [`EXPECTED_SNAPSHOT_FIELD_COUNT`] (and
//! [`MAX_SNAPSHOT_FIELD_TAG`] if the tag is higher), the matching change
//! record field(s), and diff logic for them.

use crate::change::ChangeRecord;
use crate::error::{GroupError, Result};
use crate::snapshot::GroupSnapshot;
use serde::Serialize;
use std::collections::{BTreeMap, BTreeSet};

/// Number of snapshot fields the reconstructor covers.
pub const EXPECTED_SNAPSHOT_FIELD_COUNT: usize = 9;

/// Highest schema tag among covered snapshot fields. Tag 1 is reserved.
pub const MAX_SNAPSHOT_FIELD_TAG: u32 = 10;

/// Every field of [`GroupSnapshot`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum SnapshotField {
    Title,
    Avatar,
    DisappearingMessagesTimer,
    AccessControl,
    Revision,
    Members,
    PendingMembers,
    RequestingMembers,
    InviteLinkPassword,
}

impl SnapshotField {
    pub const ALL: [SnapshotField; EXPECTED_SNAPSHOT_FIELD_COUNT] = [
        SnapshotField::Title,
        SnapshotField::Avatar,
        SnapshotField::DisappearingMessagesTimer,
        SnapshotField::AccessControl,
        SnapshotField::Revision,
        SnapshotField::Members,
        SnapshotField::PendingMembers,
        SnapshotField::RequestingMembers,
        SnapshotField::InviteLinkPassword,
    ];

    /// Serialized field name on [`GroupSnapshot`].
    pub fn name(self) -> &'static str {
        match self {
            SnapshotField::Title => "title",
            SnapshotField::Avatar => "avatar",
            SnapshotField::DisappearingMessagesTimer => "disappearing_messages_timer",
            SnapshotField::AccessControl => "access_control",
            SnapshotField::Revision => "revision",
            SnapshotField::Members => "members",
            SnapshotField::PendingMembers => "pending_members",
            SnapshotField::RequestingMembers => "requesting_members",
            SnapshotField::InviteLinkPassword => "invite_link_password",
        }
    }

    /// Field tag in the group state protocol schema.
    pub fn tag(self) -> u32 {
        match self {
            SnapshotField::Title => 2,
            SnapshotField::Avatar => 3,
            SnapshotField::DisappearingMessagesTimer => 4,
            SnapshotField::AccessControl => 5,
            SnapshotField::Revision => 6,
            SnapshotField::Members => 7,
            SnapshotField::PendingMembers => 8,
            SnapshotField::RequestingMembers => 9,
            SnapshotField::InviteLinkPassword => 10,
        }
    }

    /// Serialized [`ChangeRecord`] fields that carry changes to this field.
    pub fn change_fields(self) -> &'static [&'static str] {
        match self {
            SnapshotField::Title => &["new_title"],
            SnapshotField::Avatar => &["new_avatar"],
            SnapshotField::DisappearingMessagesTimer => &["new_timer"],
            SnapshotField::AccessControl => &[
                "new_attribute_access",
                "new_member_access",
                "new_invite_link_access",
            ],
            SnapshotField::Revision => &["revision"],
            SnapshotField::Members => &[
                "new_members",
                "delete_members",
                "modify_member_roles",
                "modified_profile_keys",
            ],
            SnapshotField::PendingMembers => &[
                "new_pending_members",
                "delete_pending_members",
                "promote_pending_members",
            ],
            SnapshotField::RequestingMembers => &[
                "new_requesting_members",
                "delete_requesting_members",
                "promote_requesting_members",
            ],
            SnapshotField::InviteLinkPassword => &["new_invite_link_password"],
        }
    }
}

/// Check that the snapshot and change record schemas match the covered fields.
///
/// Fails with [`GroupError::SchemaDrift`] when a snapshot field was added or
/// renamed without updating [`SnapshotField`], or when a change record field
/// is not claimed by exactly one snapshot field.
pub fn verify_field_coverage() -> Result<()> {
    let snapshot_fields = serialized_field_names(&GroupSnapshot::default())?;
    let change_fields = serialized_field_names(&ChangeRecord::default())?;

    if snapshot_fields.len() != EXPECTED_SNAPSHOT_FIELD_COUNT {
        return Err(GroupError::SchemaDrift(format!(
            "snapshot has {} fields, reconstruction covers {}",
            snapshot_fields.len(),
            EXPECTED_SNAPSHOT_FIELD_COUNT
        )));
    }

    let covered: BTreeSet<String> = SnapshotField::ALL
        .iter()
        .map(|f| f.name().to_string())
        .collect();
    if covered != snapshot_fields {
        let unknown: Vec<&String> = snapshot_fields.difference(&covered).collect();
        return Err(GroupError::SchemaDrift(format!(
            "snapshot fields not covered by reconstruction: {:?}",
            unknown
        )));
    }

    let max_tag = SnapshotField::ALL.iter().map(|f| f.tag()).max().unwrap_or(0);
    if max_tag != MAX_SNAPSHOT_FIELD_TAG {
        return Err(GroupError::SchemaDrift(format!(
            "highest snapshot field tag is {}, expected {}",
            max_tag, MAX_SNAPSHOT_FIELD_TAG
        )));
    }

    let mut owners: BTreeMap<&str, Vec<SnapshotField>> = BTreeMap::new();
    for field in SnapshotField::ALL {
        for &name in field.change_fields() {
            owners.entry(name).or_default().push(field);
        }
    }

    for name in &change_fields {
        match owners.get(name.as_str()).map(Vec::len) {
            Some(1) => {}
            Some(n) => {
                return Err(GroupError::SchemaDrift(format!(
                    "change field `{}` is claimed by {} snapshot fields",
                    name, n
                )))
            }
            None => {
                return Err(GroupError::SchemaDrift(format!(
                    "change field `{}` is not claimed by any snapshot field",
                    name
                )))
            }
        }
    }

    if let Some(stale) = owners.keys().find(|name| !change_fields.contains(**name)) {
        return Err(GroupError::SchemaDrift(format!(
            "change field `{}` no longer exists on the change record",
            stale
        )));
    }

    Ok(())
}

fn serialized_field_names(value: &impl Serialize) -> Result<BTreeSet<String>> {
    match serde_json::to_value(value)? {
        serde_json::Value::Object(map) => Ok(map.keys().cloned().collect()),
        other => Err(GroupError::SchemaDrift(format!(
            "expected a struct, serialized as {}",
            other
        ))),
    }
}
