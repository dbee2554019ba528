use log::{info, warn};

use super::{absorb, fetch_post, ResolutionStore, RunStats};
use crate::api::Transport;
use crate::cancel::CancelSignal;
use crate::error::{FeedError, Result};
use crate::models::wall::{Post, PostKey};

/// Replace the first pinned summary with its by-id form, in place.
///
/// Returns every key the promotion response committed. A failed fetch keeps
/// the summary and is not an error; only cancellation is.
pub(super) async fn promote_pinned(
    transport: &dyn Transport,
    items: &mut [Post],
    store: &mut ResolutionStore,
    stats: &mut RunStats,
    cancel: &CancelSignal,
) -> Result<Vec<PostKey>> {
    let Some(index) = items.iter().position(|post| post.is_pinned) else {
        return Ok(Vec::new());
    };
    let key = items[index].key();

    let page = match fetch_post(transport, key, stats, cancel).await {
        Ok(page) => page,
        Err(FeedError::Cancelled) => return Err(FeedError::Cancelled),
        Err(err) => {
            warn!("cannot promote pinned post {}, keeping summary: {}", key, err);
            return Ok(Vec::new());
        }
    };

    let committed = absorb(store, page);
    stats.hydrated += committed.len();

    let Some(mut hydrated) = store.hydrated(key).cloned() else {
        warn!("pinned post {} missing from response, keeping summary", key);
        return Ok(committed);
    };

    for entry in &hydrated.copy_history {
        store.insert_summary(entry.clone());
    }

    hydrated.is_pinned = true;
    items[index] = hydrated;
    stats.pinned_promoted = true;
    info!("promoted pinned post {}", key);

    Ok(committed)
}
