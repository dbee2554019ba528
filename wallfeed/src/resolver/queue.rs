use log::{debug, info, warn};
use std::collections::VecDeque;

use super::{absorb, fetch_post, ResolutionStore, RunStats};
use crate::api::Transport;
use crate::cancel::CancelSignal;
use crate::error::{FeedError, Result};
use crate::models::wall::{Post, PostKey, Resolution};

/// FIFO of repost keys waiting for their by-id fetch.
#[derive(Debug, Default)]
pub(super) struct HydrationQueue {
    pending: VecDeque<PostKey>,
}

fn repost_keys(post: &Post) -> Vec<PostKey> {
    post.copy_history.iter().map(Post::key).collect()
}

impl HydrationQueue {
    /// Record the listing as final and queue every repost it references,
    /// followed by the reposts of posts committed during pinned promotion.
    pub(super) fn seed(
        &mut self,
        items: &mut [Post],
        promoted: &[PostKey],
        store: &mut ResolutionStore,
    ) {
        for post in items.iter_mut() {
            store.commit(post.clone());
            post.resolution = Resolution::Hydrated;
        }

        for post in items.iter() {
            self.enqueue(repost_keys(post), store);
        }

        for key in promoted {
            let keys = store.hydrated(*key).map(repost_keys).unwrap_or_default();
            self.enqueue(keys, store);
        }
    }

    fn enqueue(&mut self, keys: Vec<PostKey>, store: &mut ResolutionStore) {
        for key in keys {
            if store.mark_queued(key) {
                debug!("queued {}", key);
                self.pending.push_back(key);
            }
        }
    }

    /// Fetch queued keys one at a time until the queue is empty. Every key is
    /// marked dispatched before its request goes out and is never retried.
    pub(super) async fn drain(
        &mut self,
        transport: &dyn Transport,
        store: &mut ResolutionStore,
        stats: &mut RunStats,
        cancel: &CancelSignal,
    ) -> Result<()> {
        loop {
            if cancel.is_cancelled() {
                info!("hydration cancelled, {} keys left", self.pending.len());
                return Err(FeedError::Cancelled);
            }

            let Some(key) = self.pending.pop_front() else {
                break;
            };

            if !store.mark_dispatched(key) {
                debug!("{} already visited, skipping", key);
                continue;
            }

            let page = match fetch_post(transport, key, stats, cancel).await {
                Ok(page) => page,
                Err(FeedError::Cancelled) => {
                    info!("hydration cancelled while fetching {}", key);
                    return Err(FeedError::Cancelled);
                }
                Err(err) => {
                    warn!("cannot hydrate {}: {}", key, err);
                    store.mark_unresolved(key);
                    continue;
                }
            };

            let committed = absorb(store, page);
            stats.hydrated += committed.len();

            if !committed.contains(&key) {
                warn!("{} missing from by-id response", key);
                store.mark_unresolved(key);
            }

            for committed_key in committed {
                let keys = store
                    .hydrated(committed_key)
                    .map(repost_keys)
                    .unwrap_or_default();
                self.enqueue(keys, store);
            }
        }

        Ok(())
    }
}
