use serde::{Deserialize, Serialize, Serializer};
use serde_json::{Map, Value};
use std::{fmt, str::FromStr};

use super::{flag, or_default};
use super::profile::{Identity, Profile};

/// Identifies a post across all walls, rendered as `{owner_id}_{id}`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PostKey {
    pub owner_id: i64,
    pub id: i64,
}

impl PostKey {
    pub fn new(owner_id: i64, id: i64) -> Self {
        Self { owner_id, id }
    }
}

impl fmt::Display for PostKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}_{}", self.owner_id, self.id)
    }
}

impl FromStr for PostKey {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (owner_id, id) = s
            .split_once('_')
            .ok_or_else(|| format!("invalid post key: {s}"))?;
        let owner_id = owner_id
            .parse()
            .map_err(|_| format!("invalid owner id in post key: {s}"))?;
        let id = id
            .parse()
            .map_err(|_| format!("invalid post id in post key: {s}"))?;
        Ok(Self { owner_id, id })
    }
}

impl Serialize for PostKey {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// How complete a post is after a hydration run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Resolution {
    /// Truncated content as embedded in another response.
    #[default]
    Summary,
    /// Full content from the listing or a by-id fetch.
    Hydrated,
    /// The by-id fetch for this post failed; content is still the summary.
    Unresolved,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Post {
    pub id: i64,
    pub owner_id: i64,
    #[serde(default, deserialize_with = "or_default")]
    pub from_id: i64,
    #[serde(default, deserialize_with = "or_default")]
    pub date: i64,
    #[serde(default, deserialize_with = "or_default")]
    pub text: String,
    #[serde(default, deserialize_with = "flag")]
    pub is_pinned: bool,
    #[serde(
        default,
        deserialize_with = "or_default",
        skip_serializing_if = "Vec::is_empty"
    )]
    pub copy_history: Vec<Post>,
    #[serde(
        default,
        deserialize_with = "or_default",
        skip_serializing_if = "Vec::is_empty"
    )]
    pub attachments: Vec<Value>,
    #[serde(skip_deserializing, skip_serializing_if = "Option::is_none")]
    pub author: Option<Profile>,
    #[serde(skip_deserializing)]
    pub resolution: Resolution,
    /// Every other field of the post, passed through untouched.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Post {
    pub fn key(&self) -> PostKey {
        PostKey::new(self.owner_id, self.id)
    }

    pub fn has_repost(&self) -> bool {
        !self.copy_history.is_empty()
    }

    pub fn origin(&self) -> Option<Identity> {
        Identity::from_signed(self.from_id)
    }
}
