use serde::{Deserialize, Serialize, Serializer};
use std::{cmp::Ordering, fmt};

use super::{flag, or_default};

/// Origin of a post or owner of a wall. The remote API folds both kinds into
/// one signed id space (groups negative); that convention only exists at the
/// serialization boundary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Identity {
    User(u64),
    Group(u64),
}

impl Identity {
    /// Zero is not a valid origin and yields `None`, as does `i64::MIN`,
    /// whose magnitude has no signed counterpart.
    pub fn from_signed(id: i64) -> Option<Self> {
        let magnitude = id.checked_abs()?.unsigned_abs();
        match id.cmp(&0) {
            Ordering::Greater => Some(Identity::User(magnitude)),
            Ordering::Less => Some(Identity::Group(magnitude)),
            Ordering::Equal => None,
        }
    }

    /// Ids beyond the signed range saturate instead of wrapping.
    pub fn to_signed(self) -> i64 {
        match self {
            Identity::User(id) => i64::try_from(id).unwrap_or(i64::MAX),
            Identity::Group(id) => i64::try_from(id).map_or(-i64::MAX, |id| -id),
        }
    }

    pub fn is_group(self) -> bool {
        matches!(self, Identity::Group(_))
    }
}

impl fmt::Display for Identity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_signed())
    }
}

impl Serialize for Identity {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_i64(self.to_signed())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct GroupFlags {
    pub is_member: bool,
    pub can_post: bool,
    pub is_admin: bool,
}

/// Author metadata for either a user or a group.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Profile {
    #[serde(rename = "id")]
    pub identity: Identity,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub screen_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub photo_50: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub photo_100: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub photo_200: Option<String>,
    /// Present only for groups.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub group: Option<GroupFlags>,
}

impl Profile {
    pub fn is_group(&self) -> bool {
        self.identity.is_group()
    }
}

/// Entry of the `profiles` array.
#[derive(Debug, Deserialize)]
pub struct UserRecord {
    pub id: u64,
    #[serde(default, deserialize_with = "or_default")]
    pub first_name: String,
    #[serde(default, deserialize_with = "or_default")]
    pub last_name: String,
    pub screen_name: Option<String>,
    pub photo_50: Option<String>,
    pub photo_100: Option<String>,
    pub photo_200: Option<String>,
}

/// Entry of the `groups` array. Ids are positive here.
#[derive(Debug, Deserialize)]
pub struct GroupRecord {
    pub id: u64,
    #[serde(default, deserialize_with = "or_default")]
    pub name: String,
    pub screen_name: Option<String>,
    pub photo_50: Option<String>,
    pub photo_100: Option<String>,
    pub photo_200: Option<String>,
    #[serde(default, deserialize_with = "flag")]
    pub is_member: bool,
    #[serde(default, deserialize_with = "flag")]
    pub can_post: bool,
    #[serde(default, deserialize_with = "flag")]
    pub is_admin: bool,
}

impl From<UserRecord> for Profile {
    fn from(user: UserRecord) -> Self {
        let name = match (user.first_name.is_empty(), user.last_name.is_empty()) {
            (false, false) => format!("{} {}", user.first_name, user.last_name),
            (false, true) => user.first_name,
            (true, false) => user.last_name,
            (true, true) => user.screen_name.clone().unwrap_or_default(),
        };

        Self {
            identity: Identity::User(user.id),
            name,
            screen_name: user.screen_name,
            photo_50: user.photo_50,
            photo_100: user.photo_100,
            photo_200: user.photo_200,
            group: None,
        }
    }
}

impl From<GroupRecord> for Profile {
    fn from(group: GroupRecord) -> Self {
        Self {
            identity: Identity::Group(group.id),
            name: group.name,
            screen_name: group.screen_name,
            photo_50: group.photo_50,
            photo_100: group.photo_100,
            photo_200: group.photo_200,
            group: Some(GroupFlags {
                is_member: group.is_member,
                can_post: group.can_post,
                is_admin: group.is_admin,
            }),
        }
    }
}
