//! Change reconstruction from two snapshots.
//!
//! When a client only holds two full snapshots of a group, [`reconstruct`]
//! derives the change record that turns the older one into the newer one,
//! so downstream code can treat it like a change received from the service.
//!
//! - Scalar fields are compared by value; a difference carries `to`'s value.
//! - Member, pending and requesting lists are diffed as sets keyed by
//!   [`MemberId`](crate::MemberId), with duplicates collapsed.
//! - An invitee or requester who became a full member is reported once, as a
//!   promotion, never as a removal plus an addition.
//!
//! # Example
//!
//! ```ignore
//! let change = group_reconstruct::reconstruct(&cached, &fetched);
//! if !change.is_empty() {
//!     pipeline.handle(change);
//! }
//! ```

mod keyed;
mod members;

use crate::change::{ChangeRecord, FieldChange};
use crate::snapshot::GroupSnapshot;
use keyed::{diff_keyed, KeyedView};
use members::{diff_members, Promotions};

/// Derive the change record that moves `from` to `to`.
///
/// Total and side-effect free. The result's `revision` is always
/// `to.revision`; `reconstruct(s, s)` carries nothing else.
#[tracing::instrument(level = "debug", skip_all, fields(from = from.revision, to = to.revision))]
pub fn reconstruct(from: &GroupSnapshot, to: &GroupSnapshot) -> ChangeRecord {
    // No `..` here: a new snapshot field must be handled before this compiles.
    let GroupSnapshot {
        revision: _,
        title: from_title,
        avatar: from_avatar,
        disappearing_messages_timer: from_timer,
        access_control: from_access,
        members: from_members,
        pending_members: from_pending,
        requesting_members: from_requesting,
        invite_link_password: from_password,
    } = from;
    let GroupSnapshot {
        revision,
        title,
        avatar,
        disappearing_messages_timer,
        access_control,
        members,
        pending_members,
        requesting_members,
        invite_link_password,
    } = to;

    let from_members = KeyedView::build(from_members);
    let to_members = KeyedView::build(members);
    let member_changes = diff_members(&from_members, &to_members);

    let pending = diff_keyed(
        &KeyedView::build(from_pending),
        &KeyedView::build(pending_members),
    );
    let requesting = diff_keyed(
        &KeyedView::build(from_requesting),
        &KeyedView::build(requesting_members),
    );

    let promotions = Promotions::reconcile(&to_members, &pending.removed, &requesting.removed);

    let new_members: Vec<_> = member_changes
        .added
        .into_iter()
        .filter(|m| !promotions.is_promoted(m.id))
        .cloned()
        .collect();

    let change = ChangeRecord {
        revision: *revision,
        new_title: FieldChange::between(from_title, title),
        new_avatar: FieldChange::between(from_avatar, avatar),
        new_timer: FieldChange::between(from_timer, disappearing_messages_timer),
        new_attribute_access: (from_access.attributes != access_control.attributes)
            .then_some(access_control.attributes),
        new_member_access: (from_access.members != access_control.members)
            .then_some(access_control.members),
        new_invite_link_access: (from_access.add_from_invite_link
            != access_control.add_from_invite_link)
            .then_some(access_control.add_from_invite_link),
        new_members,
        delete_members: member_changes.removed,
        modify_member_roles: member_changes.role_changes,
        modified_profile_keys: member_changes.key_changes,
        new_pending_members: pending.added.into_iter().cloned().collect(),
        delete_pending_members: promotions.deleted_pending,
        promote_pending_members: promotions.promoted_pending,
        new_requesting_members: requesting.added.into_iter().cloned().collect(),
        delete_requesting_members: promotions.deleted_requesting,
        promote_requesting_members: promotions.approved_requesting,
        new_invite_link_password: FieldChange::between(from_password, invite_link_password),
    };

    tracing::debug!(
        from_members = from_members.len(),
        to_members = to_members.len(),
        new_members = change.new_members.len(),
        deleted_members = change.delete_members.len(),
        role_changes = change.modify_member_roles.len(),
        key_changes = change.modified_profile_keys.len(),
        promoted_pending = change.promote_pending_members.len(),
        approved_requesting = change.promote_requesting_members.len(),
        empty = change.is_empty(),
        "reconstructed group change"
    );

    change
}
