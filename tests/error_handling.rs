//! Error handling and edge case tests for applying change records.

use group_reconstruct::{
    apply_change, reconstruct, ApplyConfig, ApproveMember, ChangeRecord, FieldChange, GroupError,
    GroupSnapshot, Member, MemberId, ModifyMemberRole, PendingMember, ProfileKey,
    RequestingMember, Role,
};

fn id(n: u128) -> MemberId {
    MemberId::from_u128(n)
}

fn base_group() -> GroupSnapshot {
    GroupSnapshot::new(10)
        .with_title("Choir")
        .with_member(Member::administrator(id(1)).with_profile_key(ProfileKey(vec![1; 32])))
        .with_member(Member::member(id(2)).with_profile_key(ProfileKey(vec![2; 32])))
        .with_pending_member(PendingMember::new(id(3)).with_added_by(id(1)))
        .with_requesting_member(RequestingMember::new(id(4), ProfileKey(vec![4; 32])))
}

// --- Revision Errors ---

#[test]
fn test_apply_same_revision_is_stale() {
    let result = apply_change(&base_group(), &ChangeRecord::new(10), &ApplyConfig::default());
    assert!(matches!(
        result,
        Err(GroupError::StaleRevision {
            current: 10,
            change: 10
        })
    ));
}

#[test]
fn test_apply_older_revision_is_stale() {
    let result = apply_change(&base_group(), &ChangeRecord::new(3), &ApplyConfig::default());
    assert!(matches!(result, Err(GroupError::StaleRevision { .. })));
}

#[test]
fn test_stale_revision_message() {
    let err = apply_change(&base_group(), &ChangeRecord::new(9), &ApplyConfig::default())
        .unwrap_err();
    assert_eq!(
        err.to_string(),
        "Stale revision: change is at 9, snapshot is already at 10"
    );
}

// --- Missing References ---

#[test]
fn test_modify_role_of_unknown_member() {
    let mut change = ChangeRecord::new(11);
    change.modify_member_roles.push(ModifyMemberRole {
        id: id(99),
        role: Role::Administrator,
    });

    let result = apply_change(&base_group(), &change, &ApplyConfig::default());
    assert!(matches!(result, Err(GroupError::MemberNotFound(m)) if m == id(99)));
}

#[test]
fn test_profile_key_of_unknown_member() {
    let mut change = ChangeRecord::new(11);
    change
        .modified_profile_keys
        .push(Member::member(id(99)).with_profile_key(ProfileKey(vec![9; 32])));

    let result = apply_change(&base_group(), &change, &ApplyConfig::lenient());
    assert!(matches!(result, Err(GroupError::MemberNotFound(_))));
}

#[test]
fn test_promote_unknown_invite() {
    let mut change = ChangeRecord::new(11);
    change.promote_pending_members.push(Member::member(id(99)));

    let result = apply_change(&base_group(), &change, &ApplyConfig::lenient());
    assert!(matches!(result, Err(GroupError::PendingMemberNotFound(m)) if m == id(99)));
}

#[test]
fn test_approve_unknown_request() {
    let mut change = ChangeRecord::new(11);
    change.promote_requesting_members.push(ApproveMember {
        id: id(99),
        role: Role::Member,
    });

    let result = apply_change(&base_group(), &change, &ApplyConfig::default());
    assert!(matches!(result, Err(GroupError::RequestingMemberNotFound(m)) if m == id(99)));
}

#[test]
fn test_strict_delete_of_unknown_request() {
    let mut change = ChangeRecord::new(11);
    change.delete_requesting_members.push(id(99));

    let strict = apply_change(&base_group(), &change, &ApplyConfig::default());
    assert!(matches!(strict, Err(GroupError::RequestingMemberNotFound(_))));

    let lenient = apply_change(&base_group(), &change, &ApplyConfig::lenient()).unwrap();
    assert_eq!(lenient.requesting_members, base_group().requesting_members);
}

#[test]
fn test_failed_apply_leaves_input_untouched() {
    let group = base_group();
    let mut change = ChangeRecord::new(11);
    change.delete_members.push(id(2));
    change.modify_member_roles.push(ModifyMemberRole {
        id: id(99),
        role: Role::Member,
    });

    assert!(apply_change(&group, &change, &ApplyConfig::default()).is_err());
    assert_eq!(group, base_group());
}

// --- Forward Application ---

#[test]
fn test_apply_reconstructed_change_reaches_target() {
    let from = base_group();
    let to = GroupSnapshot::new(12)
        .with_member(Member::administrator(id(1)).with_profile_key(ProfileKey(vec![1; 32])))
        .with_member(Member::member(id(3)).with_profile_key(ProfileKey(vec![3; 32])))
        .with_member(Member::administrator(id(4)).with_profile_key(ProfileKey(vec![4; 32])))
        .with_pending_member(PendingMember::new(id(5)).with_added_by(id(1)));

    let change = reconstruct(&from, &to);
    let applied = apply_change(&from, &change, &ApplyConfig::default()).unwrap();

    assert_eq!(applied, to);
}

#[test]
fn test_apply_clears_optional_fields() {
    let mut change = ChangeRecord::new(11);
    change.new_title = Some(FieldChange::Cleared);

    let group = apply_change(&base_group(), &change, &ApplyConfig::default()).unwrap();
    assert_eq!(group.title, None);
}

#[test]
fn test_apply_empty_change_only_moves_revision() {
    let group = apply_change(&base_group(), &ChangeRecord::new(11), &ApplyConfig::default())
        .unwrap();

    let mut expected = base_group();
    expected.revision = 11;
    assert_eq!(group, expected);
}
