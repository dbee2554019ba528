#![allow(dead_code)]

use async_trait::async_trait;
use serde_json::{json, Value};
use std::collections::HashMap;
use std::sync::Mutex;

use wallfeed::api::{ApiReply, Transport};
use wallfeed::cancel::{CancelHandle, CancelSignal};
use wallfeed::{FeedError, Result};

#[derive(Clone)]
pub enum Reply {
    Body(Value),
    Raw(String),
    Status(u16),
    Fail,
    /// The request was abandoned because cancellation was raised.
    Cancelled,
}

/// Scripted stand-in for the remote API. By-id replies are keyed by the
/// composite post key; unknown keys fail at the transport level.
pub struct FakeTransport {
    listing: Reply,
    posts: HashMap<String, Reply>,
    cancel_after: Option<(String, CancelHandle)>,
    calls: Mutex<Vec<String>>,
}

impl FakeTransport {
    pub fn new(listing: Reply) -> Self {
        Self {
            listing,
            posts: HashMap::new(),
            cancel_after: None,
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn with_post(mut self, key: &str, body: Value) -> Self {
        self.posts.insert(key.to_string(), Reply::Body(body));
        self
    }

    pub fn with_reply(mut self, key: &str, reply: Reply) -> Self {
        self.posts.insert(key.to_string(), reply);
        self
    }

    /// Raise cancellation once the by-id request for `key` has been served.
    pub fn cancel_after(mut self, key: &str, handle: CancelHandle) -> Self {
        self.cancel_after = Some((key.to_string(), handle));
        self
    }

    /// Every call in order: `wall.get` for listings, the post key for by-id.
    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    pub fn fetches(&self) -> Vec<String> {
        self.calls()
            .into_iter()
            .filter(|call| call != "wall.get")
            .collect()
    }

    pub fn fetch_count(&self, key: &str) -> usize {
        self.fetches().iter().filter(|call| *call == key).count()
    }
}

fn into_reply(reply: &Reply) -> Result<ApiReply> {
    match reply {
        Reply::Body(body) => Ok(ApiReply::ok(body.to_string())),
        Reply::Raw(body) => Ok(ApiReply::ok(body.clone())),
        Reply::Status(status) => Ok(ApiReply {
            status: *status,
            body: String::new(),
        }),
        Reply::Fail => Err(FeedError::Transport("connection reset".to_string())),
        Reply::Cancelled => Err(FeedError::Cancelled),
    }
}

#[async_trait]
impl Transport for FakeTransport {
    async fn get(
        &self,
        method: &str,
        params: &[(&str, String)],
        _cancel: &CancelSignal,
    ) -> Result<ApiReply> {
        if method == "wall.get" {
            self.calls.lock().unwrap().push(method.to_string());
            return into_reply(&self.listing);
        }

        let key = params
            .iter()
            .find(|(name, _)| *name == "posts")
            .map(|(_, value)| value.clone())
            .expect("by-id call without posts param");
        self.calls.lock().unwrap().push(key.clone());

        let reply = self
            .posts
            .get(&key)
            .map(into_reply)
            .unwrap_or(Err(FeedError::Transport(format!("no reply for {key}"))));

        if let Some((cancel_key, handle)) = &self.cancel_after {
            if *cancel_key == key {
                handle.cancel();
            }
        }

        reply
    }
}

pub fn post(owner_id: i64, id: i64, from_id: i64, text: &str) -> Value {
    json!({
        "id": id,
        "owner_id": owner_id,
        "from_id": from_id,
        "date": 1_700_000_000,
        "text": text,
    })
}

pub fn repost(owner_id: i64, id: i64, from_id: i64, text: &str, history: Vec<Value>) -> Value {
    let mut value = post(owner_id, id, from_id, text);
    value["copy_history"] = Value::Array(history);
    value
}

pub fn pinned(mut value: Value) -> Value {
    value["is_pinned"] = json!(1);
    value
}

pub fn user(id: u64, first_name: &str, last_name: &str) -> Value {
    json!({
        "id": id,
        "first_name": first_name,
        "last_name": last_name,
        "photo_50": format!("https://example.com/u{id}_50.jpg"),
    })
}

pub fn group(id: u64, name: &str) -> Value {
    json!({
        "id": id,
        "name": name,
        "screen_name": format!("club{id}"),
        "is_member": 1,
        "can_post": 0,
        "is_admin": 0,
    })
}

pub fn page(items: Vec<Value>, profiles: Vec<Value>, groups: Vec<Value>) -> Value {
    json!({
        "response": {
            "count": items.len(),
            "items": items,
            "profiles": profiles,
            "groups": groups,
        }
    })
}

/// A by-id response carrying a single post and no profiles.
pub fn single(item: Value) -> Value {
    page(vec![item], vec![], vec![])
}
