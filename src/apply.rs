//! Forward application of a change record to a snapshot.

use crate::change::ChangeRecord;
use crate::error::{GroupError, Result};
use crate::snapshot::GroupSnapshot;
use crate::types::{Member, MemberId};

/// Configuration for [`apply_change`].
#[derive(Clone, Debug)]
pub struct ApplyConfig {
    /// Fail when a change deletes an id that is not in the snapshot, or adds
    /// a member that already exists. When off, such edits are skipped or
    /// replace the existing entry.
    /// Default: true
    pub strict: bool,

    /// Reject changes whose revision is not past the snapshot's revision.
    /// Default: true
    pub require_newer_revision: bool,
}

impl Default for ApplyConfig {
    fn default() -> Self {
        Self {
            strict: true,
            require_newer_revision: true,
        }
    }
}

impl ApplyConfig {
    /// Skip inconsistent deletions and additions and accept any revision.
    pub fn lenient() -> Self {
        Self {
            strict: false,
            require_newer_revision: false,
        }
    }
}

/// Apply `change` to `snapshot`, returning the resulting snapshot.
///
/// Role changes, profile-key changes and promotions must reference entries
/// the snapshot holds, regardless of `config.strict`.
pub fn apply_change(
    snapshot: &GroupSnapshot,
    change: &ChangeRecord,
    config: &ApplyConfig,
) -> Result<GroupSnapshot> {
    if config.require_newer_revision && change.revision <= snapshot.revision {
        return Err(GroupError::StaleRevision {
            current: snapshot.revision,
            change: change.revision,
        });
    }

    let mut group = snapshot.clone();
    group.revision = change.revision;

    for id in &change.delete_members {
        if !remove_all(&mut group.members, |m| m.id == *id) {
            missing(config, GroupError::MemberNotFound(*id))?;
        }
    }

    for modify in &change.modify_member_roles {
        let mut found = false;
        for member in group.members.iter_mut().filter(|m| m.id == modify.id) {
            member.role = modify.role;
            found = true;
        }
        if !found {
            return Err(GroupError::MemberNotFound(modify.id));
        }
    }

    for updated in &change.modified_profile_keys {
        let mut found = false;
        for member in group.members.iter_mut().filter(|m| m.id == updated.id) {
            member.profile_key = updated.profile_key.clone();
            found = true;
        }
        if !found {
            return Err(GroupError::MemberNotFound(updated.id));
        }
    }

    for id in &change.delete_pending_members {
        if !remove_all(&mut group.pending_members, |p| p.id == *id) {
            missing(config, GroupError::PendingMemberNotFound(*id))?;
        }
    }

    for id in &change.delete_requesting_members {
        if !remove_all(&mut group.requesting_members, |r| r.id == *id) {
            missing(config, GroupError::RequestingMemberNotFound(*id))?;
        }
    }

    for promoted in &change.promote_pending_members {
        if !remove_all(&mut group.pending_members, |p| p.id == promoted.id) {
            return Err(GroupError::PendingMemberNotFound(promoted.id));
        }
        add_member(&mut group, promoted.clone(), config)?;
    }

    for approved in &change.promote_requesting_members {
        let profile_key = group
            .find_requesting_member(approved.id)
            .ok_or(GroupError::RequestingMemberNotFound(approved.id))?
            .profile_key
            .clone();
        remove_all(&mut group.requesting_members, |r| r.id == approved.id);
        add_member(
            &mut group,
            Member {
                id: approved.id,
                role: approved.role,
                profile_key,
            },
            config,
        )?;
    }

    for member in &change.new_members {
        remove_all(&mut group.pending_members, |p| p.id == member.id);
        remove_all(&mut group.requesting_members, |r| r.id == member.id);
        add_member(&mut group, member.clone(), config)?;
    }

    for pending in &change.new_pending_members {
        remove_all(&mut group.pending_members, |p| p.id == pending.id);
        group.pending_members.push(pending.clone());
    }

    for requesting in &change.new_requesting_members {
        remove_all(&mut group.requesting_members, |r| r.id == requesting.id);
        group.requesting_members.push(requesting.clone());
    }

    if let Some(title) = &change.new_title {
        group.title = title.clone().into_value();
    }
    if let Some(avatar) = &change.new_avatar {
        group.avatar = avatar.clone().into_value();
    }
    if let Some(timer) = &change.new_timer {
        group.disappearing_messages_timer = timer.clone().into_value();
    }
    if let Some(access) = change.new_attribute_access {
        group.access_control.attributes = access;
    }
    if let Some(access) = change.new_member_access {
        group.access_control.members = access;
    }
    if let Some(access) = change.new_invite_link_access {
        group.access_control.add_from_invite_link = access;
    }
    if let Some(password) = &change.new_invite_link_password {
        group.invite_link_password = password.clone().into_value();
    }

    Ok(group)
}

/// Remove every entry matching `predicate`; true if any was removed.
fn remove_all<T>(items: &mut Vec<T>, predicate: impl Fn(&T) -> bool) -> bool {
    let before = items.len();
    items.retain(|item| !predicate(item));
    items.len() != before
}

fn add_member(group: &mut GroupSnapshot, member: Member, config: &ApplyConfig) -> Result<()> {
    if group.find_member(member.id).is_some() {
        if config.strict {
            return Err(GroupError::MemberExists(member.id));
        }
        tracing::warn!(id = %member.id, "replacing existing member");
        remove_all(&mut group.members, |m| m.id == member.id);
    }
    group.members.push(member);
    Ok(())
}

/// A deletion target is absent: an error when strict, otherwise skipped.
fn missing(config: &ApplyConfig, error: GroupError) -> Result<()> {
    if config.strict {
        return Err(error);
    }
    tracing::warn!(%error, "skipping deletion of absent entry");
    Ok(())
}
