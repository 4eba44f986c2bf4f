//! Full-member diff and promotion reconciliation.

use super::keyed::{diff_keyed, KeyedView, SetDiff};
use crate::change::{ApproveMember, ModifyMemberRole};
use crate::types::{Member, MemberId, PendingMember, RequestingMember};
use std::collections::HashSet;

/// Differences between two full-member lists.
pub(crate) struct MemberChanges<'a> {
    pub added: Vec<&'a Member>,
    pub removed: Vec<MemberId>,
    pub role_changes: Vec<ModifyMemberRole>,
    pub key_changes: Vec<Member>,
}

pub(crate) fn diff_members<'a>(
    from: &KeyedView<'a, Member>,
    to: &KeyedView<'a, Member>,
) -> MemberChanges<'a> {
    let SetDiff {
        added,
        removed,
        retained,
    } = diff_keyed(from, to);

    let mut role_changes = Vec::new();
    let mut key_changes = Vec::new();

    // Role and key are independent: one member may show up in both lists.
    for (before, after) in retained {
        if before.role != after.role {
            role_changes.push(ModifyMemberRole {
                id: after.id,
                role: after.role,
            });
        }
        if before.profile_key != after.profile_key {
            key_changes.push(after.clone());
        }
    }

    MemberChanges {
        added,
        removed: removed.into_iter().map(|m| m.id).collect(),
        role_changes,
        key_changes,
    }
}

/// Pending and requesting removals split into promotions and plain deletions.
pub(crate) struct Promotions {
    pub promoted_pending: Vec<Member>,
    pub deleted_pending: Vec<MemberId>,
    pub approved_requesting: Vec<ApproveMember>,
    pub deleted_requesting: Vec<MemberId>,
    promoted: HashSet<MemberId>,
}

impl Promotions {
    /// An id that left the pending or requesting list and is a full member
    /// in `to` was promoted; anything else was uninvited or rejected.
    pub(crate) fn reconcile(
        to_members: &KeyedView<'_, Member>,
        removed_pending: &[&PendingMember],
        removed_requesting: &[&RequestingMember],
    ) -> Self {
        let mut promoted = HashSet::new();

        let mut promoted_pending = Vec::new();
        let mut deleted_pending = Vec::new();
        for pending in removed_pending {
            match to_members.get(pending.id) {
                Some(member) => {
                    tracing::trace!(id = %pending.id, role = ?member.role, "invite accepted");
                    promoted.insert(pending.id);
                    promoted_pending.push(member.clone());
                }
                None => deleted_pending.push(pending.id),
            }
        }

        let mut approved_requesting = Vec::new();
        let mut deleted_requesting = Vec::new();
        for requesting in removed_requesting {
            match to_members.get(requesting.id) {
                Some(member) => {
                    tracing::trace!(
                        id = %requesting.id,
                        role = ?member.role,
                        "join request approved"
                    );
                    promoted.insert(requesting.id);
                    approved_requesting.push(ApproveMember {
                        id: requesting.id,
                        role: member.role,
                    });
                }
                None => deleted_requesting.push(requesting.id),
            }
        }

        Self {
            promoted_pending,
            deleted_pending,
            approved_requesting,
            deleted_requesting,
            promoted,
        }
    }

    pub(crate) fn is_promoted(&self, id: MemberId) -> bool {
        self.promoted.contains(&id)
    }
}
