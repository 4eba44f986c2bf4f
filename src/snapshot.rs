//! Full group state at one revision.

use crate::error::Result;
use crate::types::{
    AccessControl, DisappearingTimer, InviteLinkPassword, Member, MemberId, MemberIdentity,
    PendingMember, RequestingMember,
};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// A full, authoritative, already-decrypted group state.
///
/// Lists may hold duplicate entries for one id; readers treat them as one
/// logical entry and the last one listed wins.
///
/// Every field here must be handled by [`crate::reconstruct`] and listed in
/// [`crate::schema::SnapshotField`].
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GroupSnapshot {
    pub revision: u32,
    pub title: Option<String>,
    pub avatar: Option<String>,
    pub disappearing_messages_timer: Option<DisappearingTimer>,
    pub access_control: AccessControl,
    pub members: Vec<Member>,
    pub pending_members: Vec<PendingMember>,
    pub requesting_members: Vec<RequestingMember>,
    pub invite_link_password: Option<InviteLinkPassword>,
}

impl GroupSnapshot {
    /// Empty group at the given revision.
    pub fn new(revision: u32) -> Self {
        Self {
            revision,
            ..Default::default()
        }
    }

    /// Parse a snapshot from JSON (fixtures and debugging).
    pub fn from_json(bytes: &[u8]) -> Result<Self> {
        Ok(serde_json::from_slice(bytes)?)
    }

    pub fn to_json(&self) -> Result<Vec<u8>> {
        Ok(serde_json::to_vec_pretty(self)?)
    }

    pub fn find_member(&self, id: MemberId) -> Option<&Member> {
        self.members.iter().rev().find(|m| m.id == id)
    }

    pub fn find_pending_member(&self, id: MemberId) -> Option<&PendingMember> {
        self.pending_members.iter().rev().find(|m| m.id == id)
    }

    pub fn find_requesting_member(&self, id: MemberId) -> Option<&RequestingMember> {
        self.requesting_members.iter().rev().find(|m| m.id == id)
    }

    /// Distinct full-member ids in first-seen order.
    pub fn member_ids(&self) -> Vec<MemberId> {
        distinct_ids(&self.members)
    }

    pub fn pending_member_ids(&self) -> Vec<MemberId> {
        distinct_ids(&self.pending_members)
    }

    pub fn requesting_member_ids(&self) -> Vec<MemberId> {
        distinct_ids(&self.requesting_members)
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn with_avatar(mut self, avatar: impl Into<String>) -> Self {
        self.avatar = Some(avatar.into());
        self
    }

    pub fn with_timer(mut self, timer: DisappearingTimer) -> Self {
        self.disappearing_messages_timer = Some(timer);
        self
    }

    pub fn with_access_control(mut self, access_control: AccessControl) -> Self {
        self.access_control = access_control;
        self
    }

    pub fn with_member(mut self, member: Member) -> Self {
        self.members.push(member);
        self
    }

    pub fn with_pending_member(mut self, pending: PendingMember) -> Self {
        self.pending_members.push(pending);
        self
    }

    pub fn with_requesting_member(mut self, requesting: RequestingMember) -> Self {
        self.requesting_members.push(requesting);
        self
    }

    pub fn with_invite_link_password(mut self, password: InviteLinkPassword) -> Self {
        self.invite_link_password = Some(password);
        self
    }
}

fn distinct_ids<T: MemberIdentity>(items: &[T]) -> Vec<MemberId> {
    let mut seen = HashSet::with_capacity(items.len());
    items
        .iter()
        .map(MemberIdentity::member_id)
        .filter(|id| seen.insert(*id))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{ProfileKey, Role};

    fn id(n: u128) -> MemberId {
        MemberId::from_u128(n)
    }

    #[test]
    fn test_find_member_prefers_last_duplicate() {
        let snapshot = GroupSnapshot::new(1)
            .with_member(Member::member(id(1)))
            .with_member(Member::administrator(id(1)));

        assert_eq!(snapshot.find_member(id(1)).unwrap().role, Role::Administrator);
        assert!(snapshot.find_member(id(2)).is_none());
    }

    #[test]
    fn test_member_ids_are_distinct_in_first_seen_order() {
        let snapshot = GroupSnapshot::new(1)
            .with_member(Member::member(id(3)))
            .with_member(Member::member(id(1)))
            .with_member(Member::member(id(3)));

        assert_eq!(snapshot.member_ids(), vec![id(3), id(1)]);
    }

    #[test]
    fn test_json_roundtrip() {
        let snapshot = GroupSnapshot::new(4)
            .with_title("Book club")
            .with_member(Member::administrator(id(1)).with_profile_key(ProfileKey(vec![1, 2])))
            .with_pending_member(PendingMember::new(id(2)).with_added_by(id(1)))
            .with_requesting_member(RequestingMember::new(id(3), ProfileKey(vec![9])))
            .with_invite_link_password(InviteLinkPassword(vec![0; 16]));

        let json = snapshot.to_json().unwrap();
        assert_eq!(GroupSnapshot::from_json(&json).unwrap(), snapshot);
    }

    #[test]
    fn test_from_json_allows_missing_fields() {
        let snapshot = GroupSnapshot::from_json(br#"{"revision": 7}"#).unwrap();
        assert_eq!(snapshot, GroupSnapshot::new(7));
    }
}
