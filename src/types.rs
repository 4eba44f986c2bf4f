//! Core value types shared by snapshots and change records.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use uuid::Uuid;

/// Stable identity of a group participant.
///
/// The identity key for full, pending and requesting members alike.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MemberId(pub Uuid);

impl MemberId {
    pub fn from_u128(value: u128) -> Self {
        MemberId(Uuid::from_u128(value))
    }

    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl From<Uuid> for MemberId {
    fn from(uuid: Uuid) -> Self {
        MemberId(uuid)
    }
}

impl fmt::Debug for MemberId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "MemberId({})", self.0)
    }
}

impl fmt::Display for MemberId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Role of a full member.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    Member,
    Administrator,
}

impl Default for Role {
    fn default() -> Self {
        Role::Member
    }
}

/// Access level required for a group action.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AccessRequired {
    Unknown,
    Any,
    Member,
    Administrator,
    /// Nobody satisfies the policy; used to switch a feature off.
    Unsatisfiable,
}

impl Default for AccessRequired {
    fn default() -> Self {
        AccessRequired::Unknown
    }
}

/// Per-group access policy.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct AccessControl {
    /// Who may change title, avatar and timer.
    #[serde(default)]
    pub attributes: AccessRequired,

    /// Who may add members.
    #[serde(default)]
    pub members: AccessRequired,

    /// Who may join through the invite link.
    #[serde(default)]
    pub add_from_invite_link: AccessRequired,
}

/// Disappearing-message timer.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DisappearingTimer {
    pub duration_secs: u32,
}

impl DisappearingTimer {
    pub fn from_secs(duration_secs: u32) -> Self {
        Self { duration_secs }
    }
}

/// Opaque profile key blob, serialized as hex.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct ProfileKey(pub Vec<u8>);

impl ProfileKey {
    /// Convert to hex string.
    pub fn to_hex(&self) -> String {
        hex::encode(&self.0)
    }

    /// Parse from hex string.
    pub fn from_hex(s: &str) -> Result<Self, hex::FromHexError> {
        Ok(ProfileKey(hex::decode(s)?))
    }
}

impl fmt::Debug for ProfileKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let hex = self.to_hex();
        write!(f, "ProfileKey({}...)", &hex[..hex.len().min(8)])
    }
}

impl Serialize for ProfileKey {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_hex())
    }
}

impl<'de> Deserialize<'de> for ProfileKey {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        ProfileKey::from_hex(&s).map_err(serde::de::Error::custom)
    }
}

/// Opaque secret gating the group's invite link, serialized as hex.
///
/// `Debug` never prints the bytes.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct InviteLinkPassword(pub Vec<u8>);

impl fmt::Debug for InviteLinkPassword {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "InviteLinkPassword(<{} bytes>)", self.0.len())
    }
}

impl Serialize for InviteLinkPassword {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&hex::encode(&self.0))
    }
}

impl<'de> Deserialize<'de> for InviteLinkPassword {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        hex::decode(&s)
            .map(InviteLinkPassword)
            .map_err(serde::de::Error::custom)
    }
}

/// Anything keyed by a [`MemberId`].
pub trait MemberIdentity {
    fn member_id(&self) -> MemberId;
}

/// A full member of the group.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Member {
    pub id: MemberId,

    #[serde(default)]
    pub role: Role,

    /// `None` when the key is not known to this client.
    #[serde(default)]
    pub profile_key: Option<ProfileKey>,
}

impl Member {
    pub fn new(id: MemberId, role: Role) -> Self {
        Self {
            id,
            role,
            profile_key: None,
        }
    }

    /// A member with the default role.
    pub fn member(id: MemberId) -> Self {
        Self::new(id, Role::Member)
    }

    /// A member with the administrator role.
    pub fn administrator(id: MemberId) -> Self {
        Self::new(id, Role::Administrator)
    }

    pub fn with_profile_key(mut self, key: ProfileKey) -> Self {
        self.profile_key = Some(key);
        self
    }
}

impl MemberIdentity for Member {
    fn member_id(&self) -> MemberId {
        self.id
    }
}

/// An invited member who has not joined yet.
///
/// Only presence is diffed; the invite metadata is carried as-is.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PendingMember {
    pub id: MemberId,

    /// Role the invitee gets on accepting.
    #[serde(default)]
    pub role: Role,

    #[serde(default)]
    pub added_by: Option<MemberId>,

    /// Milliseconds since Unix epoch.
    #[serde(default)]
    pub timestamp: u64,
}

impl PendingMember {
    pub fn new(id: MemberId) -> Self {
        Self {
            id,
            role: Role::Member,
            added_by: None,
            timestamp: 0,
        }
    }

    pub fn with_added_by(mut self, inviter: MemberId) -> Self {
        self.added_by = Some(inviter);
        self
    }

    pub fn with_role(mut self, role: Role) -> Self {
        self.role = role;
        self
    }

    pub fn with_timestamp(mut self, timestamp: u64) -> Self {
        self.timestamp = timestamp;
        self
    }
}

impl MemberIdentity for PendingMember {
    fn member_id(&self) -> MemberId {
        self.id
    }
}

/// Someone who asked to join through the invite link.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RequestingMember {
    pub id: MemberId,

    #[serde(default)]
    pub profile_key: Option<ProfileKey>,

    /// Milliseconds since Unix epoch.
    #[serde(default)]
    pub timestamp: u64,
}

impl RequestingMember {
    pub fn new(id: MemberId, profile_key: ProfileKey) -> Self {
        Self {
            id,
            profile_key: Some(profile_key),
            timestamp: 0,
        }
    }

    pub fn with_timestamp(mut self, timestamp: u64) -> Self {
        self.timestamp = timestamp;
        self
    }
}

impl MemberIdentity for RequestingMember {
    fn member_id(&self) -> MemberId {
        self.id
    }
}
