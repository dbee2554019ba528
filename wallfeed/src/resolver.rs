//! Turns one listing page into a fully hydrated feed.
//!
//! The run is strictly sequential: promote the pinned post, seed the store
//! with the listing, drain the hydration queue one fetch at a time, then
//! rewrite every repost chain from the store and attach author profiles.

pub mod link;
mod pinned;
mod queue;
pub mod store;

use log::{debug, info};
use serde::Serialize;

use crate::api::vk::{wall_get_by_id_params, wall_get_params, WALL_GET, WALL_GET_BY_ID};
use crate::api::Transport;
use crate::cancel::CancelSignal;
use crate::error::{FeedError, Result};
use crate::models::profile::Identity;
use crate::models::wall::{Post, PostKey};
use crate::models::FeedPage;

use queue::HydrationQueue;
pub use store::{KeyState, ProfileMap, ResolutionStore};

pub const DEFAULT_COUNT: u32 = 20;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct RunStats {
    /// By-id requests issued, pinned promotion included.
    pub fetches: usize,
    pub hydrated: usize,
    pub unresolved: usize,
    pub profiles: usize,
    pub pinned_promoted: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct HydratedFeed {
    pub owner: Identity,
    pub items: Vec<Post>,
    pub stats: RunStats,
}

pub struct Resolver<T> {
    transport: T,
    count: u32,
}

impl<T: Transport> Resolver<T> {
    pub fn new(transport: T) -> Self {
        Self {
            transport,
            count: DEFAULT_COUNT,
        }
    }

    pub fn with_count(mut self, count: u32) -> Self {
        self.count = count;
        self
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    pub fn into_transport(self) -> T {
        self.transport
    }

    /// Fetch the first page of `owner`'s wall and hydrate it. Failure of the
    /// listing call fails the run; every later failure is absorbed.
    pub async fn resolve(&self, owner: Identity, cancel: &CancelSignal) -> Result<HydratedFeed> {
        if cancel.is_cancelled() {
            return Err(FeedError::Cancelled);
        }

        info!("fetching wall {}", owner);
        let page = self
            .transport
            .get(WALL_GET, &wall_get_params(owner, self.count), cancel)
            .await?
            .into_page()?;

        self.hydrate(owner, page, cancel).await
    }

    /// Hydrate an already fetched listing page.
    pub async fn hydrate(
        &self,
        owner: Identity,
        page: FeedPage,
        cancel: &CancelSignal,
    ) -> Result<HydratedFeed> {
        let mut store = ResolutionStore::default();
        let mut stats = RunStats::default();

        let FeedPage {
            mut items,
            profiles,
            groups,
        } = page;
        store.merge_profiles(profiles);
        store.merge_profiles(groups);
        debug!("listing returned {} items", items.len());

        let promoted =
            pinned::promote_pinned(&self.transport, &mut items, &mut store, &mut stats, cancel)
                .await?;

        let mut queue = HydrationQueue::default();
        queue.seed(&mut items, &promoted, &mut store);
        queue
            .drain(&self.transport, &mut store, &mut stats, cancel)
            .await?;

        link::link_reposts(&mut items, &store);
        link::attach_authors(&mut items, store.profiles());

        stats.unresolved = store.count(KeyState::Unresolved);
        stats.profiles = store.profiles().len();
        info!(
            "wall {} hydrated: {} items, {} fetches, {} reposts hydrated, {} unresolved, {} profiles",
            owner,
            items.len(),
            stats.fetches,
            stats.hydrated,
            stats.unresolved,
            stats.profiles
        );

        Ok(HydratedFeed {
            owner,
            items,
            stats,
        })
    }
}

/// Single-item hydrate call. Checks cancellation right before dispatch.
async fn fetch_post(
    transport: &dyn Transport,
    key: PostKey,
    stats: &mut RunStats,
    cancel: &CancelSignal,
) -> Result<FeedPage> {
    if cancel.is_cancelled() {
        return Err(FeedError::Cancelled);
    }

    debug!("hydrating {}", key);
    stats.fetches += 1;
    transport
        .get(WALL_GET_BY_ID, &wall_get_by_id_params(key), cancel)
        .await?
        .into_page()
}

/// Commit every post of a by-id response and return the keys that made it
/// into the store, in response order. Besides the requested post this picks
/// up anything else the same response fully carries.
fn absorb(store: &mut ResolutionStore, page: FeedPage) -> Vec<PostKey> {
    let FeedPage {
        items,
        profiles,
        groups,
    } = page;
    store.merge_profiles(profiles);
    store.merge_profiles(groups);

    items
        .into_iter()
        .filter_map(|post| {
            let key = post.key();
            store.commit(post).then_some(key)
        })
        .collect()
}
