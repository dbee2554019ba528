use log::debug;
use std::collections::HashMap;

use crate::models::profile::{Identity, Profile};
use crate::models::wall::{Post, PostKey, Resolution};

/// Lifecycle of a composite key within one run. A key with no state is
/// unseen; `Hydrated` and `Unresolved` are terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyState {
    Queued,
    Dispatched,
    Hydrated,
    Unresolved,
}

impl KeyState {
    pub fn is_terminal(self) -> bool {
        matches!(self, KeyState::Hydrated | KeyState::Unresolved)
    }
}

/// Profiles gathered across every response of a run. First write wins.
#[derive(Debug, Default)]
pub struct ProfileMap {
    profiles: HashMap<Identity, Profile>,
}

impl ProfileMap {
    /// Insert every profile whose identity is not known yet and return how
    /// many were new.
    pub fn merge<I>(&mut self, incoming: I) -> usize
    where
        I: IntoIterator<Item = Profile>,
    {
        let mut inserted = 0;
        for profile in incoming {
            if let std::collections::hash_map::Entry::Vacant(slot) =
                self.profiles.entry(profile.identity)
            {
                slot.insert(profile);
                inserted += 1;
            }
        }
        inserted
    }

    pub fn get(&self, identity: Identity) -> Option<&Profile> {
        self.profiles.get(&identity)
    }

    pub fn len(&self) -> usize {
        self.profiles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.profiles.is_empty()
    }
}

/// Working state of a single hydration run.
#[derive(Debug, Default)]
pub struct ResolutionStore {
    posts: HashMap<PostKey, Post>,
    states: HashMap<PostKey, KeyState>,
    profiles: ProfileMap,
}

impl ResolutionStore {
    pub fn state(&self, key: PostKey) -> Option<KeyState> {
        self.states.get(&key).copied()
    }

    /// A key is visited once its fetch has been dispatched or its content
    /// is otherwise final.
    pub fn is_visited(&self, key: PostKey) -> bool {
        matches!(
            self.state(key),
            Some(KeyState::Dispatched | KeyState::Hydrated | KeyState::Unresolved)
        )
    }

    /// Unseen -> Queued. Returns false when the key was already seen.
    pub fn mark_queued(&mut self, key: PostKey) -> bool {
        if self.states.contains_key(&key) {
            return false;
        }
        self.states.insert(key, KeyState::Queued);
        true
    }

    /// Unseen | Queued -> Dispatched. Returns false for visited keys, which
    /// must not be fetched again.
    pub fn mark_dispatched(&mut self, key: PostKey) -> bool {
        if self.is_visited(key) {
            return false;
        }
        self.states.insert(key, KeyState::Dispatched);
        true
    }

    pub fn mark_unresolved(&mut self, key: PostKey) {
        if self.state(key).is_some_and(KeyState::is_terminal) {
            return;
        }
        self.states.insert(key, KeyState::Unresolved);
    }

    /// Store a fully fetched post. Posts arriving for a terminal key are
    /// dropped so that committed content never changes.
    pub fn commit(&mut self, mut post: Post) -> bool {
        let key = post.key();
        if self.state(key).is_some_and(KeyState::is_terminal) {
            debug!("post {} already final, ignoring", key);
            return false;
        }
        post.resolution = Resolution::Hydrated;
        self.posts.insert(key, post);
        self.states.insert(key, KeyState::Hydrated);
        true
    }

    /// Keep a summary for a key we know nothing better about yet.
    pub fn insert_summary(&mut self, post: Post) {
        self.posts.entry(post.key()).or_insert(post);
    }

    pub fn post(&self, key: PostKey) -> Option<&Post> {
        self.posts.get(&key)
    }

    /// The stored post for `key` if it reached `Hydrated`.
    pub fn hydrated(&self, key: PostKey) -> Option<&Post> {
        match self.state(key) {
            Some(KeyState::Hydrated) => self.posts.get(&key),
            _ => None,
        }
    }

    pub fn merge_profiles<I>(&mut self, incoming: I) -> usize
    where
        I: IntoIterator<Item = Profile>,
    {
        self.profiles.merge(incoming)
    }

    pub fn profiles(&self) -> &ProfileMap {
        &self.profiles
    }

    pub fn count(&self, state: KeyState) -> usize {
        self.states.values().filter(|s| **s == state).count()
    }
}
