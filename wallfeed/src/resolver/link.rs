use log::debug;
use std::collections::HashSet;

use super::{ProfileMap, ResolutionStore};
use crate::models::wall::{Post, PostKey, Resolution};

/// Replace `copy_history` summaries with their hydrated versions from the
/// store, recursively. Purely in-memory; nothing is fetched here.
///
/// Entries whose fetch failed stay in place tagged `Unresolved`. An entry
/// pointing back at one of its own ancestors is left as a summary, so a
/// cyclic repost graph still produces a finite tree.
///
/// The API lists a repost's whole ancestor chain flat: A carries
/// `[B, C, D]` and B's own full form carries `[C, D]`. When an entry's
/// history is exactly the run of siblings that follows it, the entry keeps
/// an empty history and the chain stays flat. Any other key is expanded at
/// most once per top-level post; later occurrences get the hydrated post
/// without walking into its history again.
pub fn link_reposts(items: &mut [Post], store: &ResolutionStore) {
    let mut path = Vec::new();
    for post in items.iter_mut() {
        let mut expanded = HashSet::new();
        path.push(post.key());
        link_post(post, store, &mut path, &mut expanded);
        path.pop();
    }
}

fn link_post(
    post: &mut Post,
    store: &ResolutionStore,
    path: &mut Vec<PostKey>,
    expanded: &mut HashSet<PostKey>,
) {
    if !post.has_repost() {
        return;
    }

    let chain: Vec<PostKey> = post.copy_history.iter().map(Post::key).collect();
    for (index, entry) in post.copy_history.iter_mut().enumerate() {
        let key = chain[index];
        if path.contains(&key) {
            debug!("repost cycle through {}, leaving summary", key);
            continue;
        }

        let Some(full) = store.hydrated(key) else {
            if store.is_visited(key) {
                entry.resolution = Resolution::Unresolved;
            }
            continue;
        };
        *entry = full.clone();

        let ancestors: Vec<PostKey> = entry.copy_history.iter().map(Post::key).collect();
        if !ancestors.is_empty() && chain[index + 1..].starts_with(&ancestors) {
            entry.copy_history.clear();
            continue;
        }

        if !expanded.insert(key) {
            debug!("{} already linked under this post", key);
            continue;
        }

        path.push(key);
        link_post(entry, store, path, expanded);
        path.pop();
    }
}

/// Set `author` on every post and nested repost whose origin is a known
/// profile. Returns how many posts got one.
pub fn attach_authors(items: &mut [Post], profiles: &ProfileMap) -> usize {
    items
        .iter_mut()
        .map(|post| attach_author(post, profiles))
        .sum()
}

fn attach_author(post: &mut Post, profiles: &ProfileMap) -> usize {
    let mut attached = 0;
    if let Some(profile) = post.origin().and_then(|origin| profiles.get(origin)) {
        post.author = Some(profile.clone());
        attached += 1;
    }

    attached
        + post
            .copy_history
            .iter_mut()
            .map(|entry| attach_author(entry, profiles))
            .sum::<usize>()
}
