//! Change records: the edit set that moves one snapshot to the next.

use crate::error::Result;
use crate::types::{
    AccessRequired, DisappearingTimer, InviteLinkPassword, Member, MemberId, PendingMember,
    RequestingMember, Role,
};
use serde::{Deserialize, Serialize};

/// Update of an optional snapshot field.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldChange<T> {
    /// The field now holds this value.
    Set(T),
    /// The field is now absent.
    Cleared,
}

impl<T: Clone> FieldChange<T> {
    /// The change that turns `from` into `to`, or `None` if they are equal.
    pub fn between(from: &Option<T>, to: &Option<T>) -> Option<Self>
    where
        T: PartialEq,
    {
        if from == to {
            return None;
        }
        Some(match to {
            Some(value) => FieldChange::Set(value.clone()),
            None => FieldChange::Cleared,
        })
    }

    /// The field value after the change.
    pub fn into_value(self) -> Option<T> {
        match self {
            FieldChange::Set(value) => Some(value),
            FieldChange::Cleared => None,
        }
    }
}

/// New role for a retained member.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModifyMemberRole {
    pub id: MemberId,
    pub role: Role,
}

/// Approval of a join request, with the role granted.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApproveMember {
    pub id: MemberId,
    pub role: Role,
}

/// A set of discrete edits transforming one snapshot into the next.
///
/// Every field apart from `revision` is independently optional; an unset
/// field or empty list means "no change".
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChangeRecord {
    /// Revision of the resulting snapshot.
    pub revision: u32,

    pub new_title: Option<FieldChange<String>>,
    pub new_avatar: Option<FieldChange<String>>,
    pub new_timer: Option<FieldChange<DisappearingTimer>>,

    pub new_attribute_access: Option<AccessRequired>,
    pub new_member_access: Option<AccessRequired>,
    pub new_invite_link_access: Option<AccessRequired>,

    pub new_members: Vec<Member>,
    pub delete_members: Vec<MemberId>,
    pub modify_member_roles: Vec<ModifyMemberRole>,
    /// Full updated records of members whose profile key changed.
    pub modified_profile_keys: Vec<Member>,

    pub new_pending_members: Vec<PendingMember>,
    pub delete_pending_members: Vec<MemberId>,
    /// Invitees who joined, as their resulting member records.
    pub promote_pending_members: Vec<Member>,

    pub new_requesting_members: Vec<RequestingMember>,
    pub delete_requesting_members: Vec<MemberId>,
    pub promote_requesting_members: Vec<ApproveMember>,

    pub new_invite_link_password: Option<FieldChange<InviteLinkPassword>>,
}

impl ChangeRecord {
    /// A record that only moves the revision.
    pub fn new(revision: u32) -> Self {
        Self {
            revision,
            ..Default::default()
        }
    }

    /// True when nothing but the revision is set.
    pub fn is_empty(&self) -> bool {
        let ChangeRecord {
            revision: _,
            new_title,
            new_avatar,
            new_timer,
            new_attribute_access,
            new_member_access,
            new_invite_link_access,
            new_members,
            delete_members,
            modify_member_roles,
            modified_profile_keys,
            new_pending_members,
            delete_pending_members,
            promote_pending_members,
            new_requesting_members,
            delete_requesting_members,
            promote_requesting_members,
            new_invite_link_password,
        } = self;

        new_title.is_none()
            && new_avatar.is_none()
            && new_timer.is_none()
            && new_attribute_access.is_none()
            && new_member_access.is_none()
            && new_invite_link_access.is_none()
            && new_members.is_empty()
            && delete_members.is_empty()
            && modify_member_roles.is_empty()
            && modified_profile_keys.is_empty()
            && new_pending_members.is_empty()
            && delete_pending_members.is_empty()
            && promote_pending_members.is_empty()
            && new_requesting_members.is_empty()
            && delete_requesting_members.is_empty()
            && promote_requesting_members.is_empty()
            && new_invite_link_password.is_none()
    }

    /// Parse a change record from JSON (fixtures and debugging).
    pub fn from_json(bytes: &[u8]) -> Result<Self> {
        Ok(serde_json::from_slice(bytes)?)
    }

    pub fn to_json(&self) -> Result<Vec<u8>> {
        Ok(serde_json::to_vec_pretty(self)?)
    }
}
