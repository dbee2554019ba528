use crate::api::{ApiReply, Transport};
use crate::cancel::CancelSignal;
use crate::error::{FeedError, Result};
use crate::models::profile::Identity;
use crate::models::wall::PostKey;

use anyhow::Context;
use async_trait::async_trait;
use log::debug;
use reqwest::Client;
use std::time::Duration;

pub const DEFAULT_API_URL: &str = "https://api.vk.com/method";
pub const DEFAULT_API_VERSION: &str = "5.199";

pub const WALL_GET: &str = "wall.get";
pub const WALL_GET_BY_ID: &str = "wall.getById";

const PROFILE_FIELDS: &str = "photo_50,photo_100,photo_200,screen_name";

pub fn wall_get_params(owner: Identity, count: u32) -> Vec<(&'static str, String)> {
    vec![
        ("owner_id", owner.to_signed().to_string()),
        ("count", count.to_string()),
        ("extended", "1".to_string()),
        ("fields", PROFILE_FIELDS.to_string()),
    ]
}

pub fn wall_get_by_id_params(key: PostKey) -> Vec<(&'static str, String)> {
    vec![
        ("posts", key.to_string()),
        ("extended", "1".to_string()),
        ("fields", PROFILE_FIELDS.to_string()),
    ]
}

pub struct VkClient {
    client: Client,
    base_url: String,
    token: String,
    version: String,
}

impl VkClient {
    pub fn new(base_url: String, token: String, version: String) -> Result<Self> {
        let client = Client::builder().timeout(Duration::from_secs(30)).build()?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            token,
            version,
        })
    }

    /// Accepts `wall-1`, `club1`, `public1`, `event1`, `id1`, a bare signed id
    /// or a full link such as `https://vk.com/wall-1_2`.
    pub fn parse_wall_ref(input: &str) -> anyhow::Result<Identity> {
        let re = regex::Regex::new(
            r"^(?:https?://)?(?:m\.)?(?:vk\.com/)?(wall|club|public|event|id)?(-?\d+)(?:_\d+)?/?$",
        )?;
        let caps = re
            .captures(input.trim())
            .context("Invalid wall reference format")?;

        let id: i64 = caps[2].parse().context("Wall id out of range")?;
        let magnitude = id
            .checked_abs()
            .context("Wall id out of range")?
            .unsigned_abs();
        let identity = match caps.get(1).map(|m| m.as_str()) {
            Some("club" | "public" | "event") => {
                (magnitude != 0).then_some(Identity::Group(magnitude))
            }
            Some("id") => (magnitude != 0).then_some(Identity::User(magnitude)),
            _ => Identity::from_signed(id),
        };

        identity.context("Wall id must not be zero")
    }
}

#[async_trait]
impl Transport for VkClient {
    async fn get(
        &self,
        method: &str,
        params: &[(&str, String)],
        cancel: &CancelSignal,
    ) -> Result<ApiReply> {
        let url = format!("{}/{}", self.base_url, method);
        debug!("GET {} {:?}", url, params);

        let request = async {
            let response = self
                .client
                .get(&url)
                .query(params)
                .query(&[("access_token", &self.token), ("v", &self.version)])
                .send()
                .await?;

            let status = response.status();
            let body = response.text().await?;

            Ok::<_, FeedError>(ApiReply {
                status: status.as_u16(),
                body,
            })
        };

        tokio::select! {
            _ = cancel.cancelled() => Err(FeedError::Cancelled),
            reply = request => reply,
        }
    }
}
