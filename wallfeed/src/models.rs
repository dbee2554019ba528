pub mod profile;
pub mod wall;

use serde::{Deserialize, Deserializer};

use crate::error::{FeedError, Result};
use profile::{GroupRecord, Profile, UserRecord};
use wall::Post;

/// One decoded response of the listing or by-id endpoints.
#[derive(Debug, Clone, Default)]
pub struct FeedPage {
    pub items: Vec<Post>,
    /// Users referenced by the items.
    pub profiles: Vec<Profile>,
    /// Groups referenced by the items.
    pub groups: Vec<Profile>,
}

#[derive(Debug, Default, Deserialize)]
struct RawPage {
    #[serde(default, deserialize_with = "or_default")]
    items: Vec<Post>,
    #[serde(default, deserialize_with = "or_default")]
    profiles: Vec<UserRecord>,
    #[serde(default, deserialize_with = "or_default")]
    groups: Vec<GroupRecord>,
}

// Non-extended by-id calls answer with a bare array of posts.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum RawResponse {
    Items(Vec<Post>),
    Page(RawPage),
}

#[derive(Debug, Deserialize)]
struct ApiErrorBody {
    error_code: i64,
    #[serde(default)]
    error_msg: String,
}

#[derive(Debug, Deserialize)]
struct Envelope {
    response: Option<RawResponse>,
    error: Option<ApiErrorBody>,
}

/// Decode a raw response body. An empty `items` array is a valid empty page;
/// malformed JSON or a body without `response` is a decode error and the
/// API's error envelope becomes `FeedError::Api`.
pub fn parse_page(body: &str) -> Result<FeedPage> {
    let envelope: Envelope = serde_json::from_str(body)?;

    if let Some(error) = envelope.error {
        return Err(FeedError::Api {
            code: error.error_code,
            message: error.error_msg,
        });
    }

    let response = envelope
        .response
        .ok_or_else(|| <serde_json::Error as serde::de::Error>::missing_field("response"))?;

    let page = match response {
        RawResponse::Items(items) => FeedPage {
            items,
            ..FeedPage::default()
        },
        RawResponse::Page(raw) => FeedPage {
            items: raw.items,
            profiles: raw.profiles.into_iter().map(Profile::from).collect(),
            groups: raw.groups.into_iter().map(Profile::from).collect(),
        },
    };

    Ok(page)
}

/// Accepts `true`/`false`, `0`/`1` and `null` for boolean flags.
pub(crate) fn flag<'de, D>(deserializer: D) -> std::result::Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum RawFlag {
        Bool(bool),
        Int(i64),
    }

    Ok(match Option::<RawFlag>::deserialize(deserializer)? {
        Some(RawFlag::Bool(value)) => value,
        Some(RawFlag::Int(value)) => value != 0,
        None => false,
    })
}

/// Treats an explicit `null` like a missing field.
pub(crate) fn or_default<'de, D, T>(deserializer: D) -> std::result::Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}
