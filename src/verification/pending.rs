use dashmap::mapref::entry::Entry;
use dashmap::DashMap;
use poise::serenity_prelude::UserId;
use tracing::debug;

/// Members whose introduction passed the format check and who have not
/// confirmed yet, whether or not the button reached them. Memory only.
#[derive(Debug, Default)]
pub struct PendingApprovals {
    pending: DashMap<UserId, ()>,
}

impl PendingApprovals {
    pub fn new() -> Self {
        Self::default()
    }

    /// Mark a member as pending. Returns `false` if they already were.
    /// Check and insert happen under one shard lock, so concurrent
    /// submissions by the same member cannot both succeed.
    pub fn try_insert(&self, user_id: UserId) -> bool {
        match self.pending.entry(user_id) {
            Entry::Occupied(_) => false,
            Entry::Vacant(slot) => {
                slot.insert(());
                debug!("Marked user {} as pending confirmation", user_id);
                true
            }
        }
    }

    pub fn contains(&self, user_id: UserId) -> bool {
        self.pending.contains_key(&user_id)
    }

    /// Returns `true` if the member was pending
    pub fn remove(&self, user_id: UserId) -> bool {
        let removed = self.pending.remove(&user_id).is_some();
        if removed {
            debug!("Cleared pending confirmation for user {}", user_id);
        }
        removed
    }

    pub fn len(&self) -> usize {
        self.pending.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }
}
