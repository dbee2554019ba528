pub mod vk;

use async_trait::async_trait;

use crate::cancel::CancelSignal;
use crate::error::{FeedError, Result};
use crate::models::{parse_page, FeedPage};

/// Raw answer of a method call, status and body untouched.
#[derive(Debug, Clone)]
pub struct ApiReply {
    pub status: u16,
    pub body: String,
}

impl ApiReply {
    pub fn ok(body: impl Into<String>) -> Self {
        Self {
            status: 200,
            body: body.into(),
        }
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    pub fn into_page(self) -> Result<FeedPage> {
        if !self.is_success() {
            return Err(FeedError::Transport(format!(
                "request failed with status {}",
                self.status
            )));
        }
        parse_page(&self.body)
    }
}

/// GET-style access to the remote API. Implementations should give up on the
/// in-flight request once `cancel` is raised and return `FeedError::Cancelled`.
#[async_trait]
pub trait Transport: Send + Sync {
    async fn get(
        &self,
        method: &str,
        params: &[(&str, String)],
        cancel: &CancelSignal,
    ) -> Result<ApiReply>;
}
