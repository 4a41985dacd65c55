//! Session Store
//!
//! Concurrency-safe mapping from chat identity to at most one active
//! interview session. The table is split into fixed shards so that holding a
//! write lock across a slow extractor call only blocks users on the same
//! shard; "one session per user" is enforced by an atomic check-and-insert
//! under the shard's write lock.

use std::collections::HashMap;

use gigmatch_core::{InterviewKind, InterviewSession};
use tokio::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

const SHARD_COUNT: usize = 16;

type Shard = RwLock<HashMap<i64, InterviewSession>>;

/// Sharded session table
pub struct SessionStore {
    shards: Vec<Shard>,
}

impl SessionStore {
    pub fn new() -> Self {
        Self {
            shards: (0..SHARD_COUNT).map(|_| RwLock::new(HashMap::new())).collect(),
        }
    }

    fn shard(&self, chat_id: i64) -> &Shard {
        &self.shards[chat_id.rem_euclid(SHARD_COUNT as i64) as usize]
    }

    /// Take the write lock on the shard owning `chat_id`. The guard must be
    /// held for the whole mutating operation, including any awaited
    /// extractor call, to keep per-user mutations linearizable.
    pub async fn write(&self, chat_id: i64) -> RwLockWriteGuard<'_, HashMap<i64, InterviewSession>> {
        self.shard(chat_id).write().await
    }

    /// Take the read lock on the shard owning `chat_id`
    pub async fn read(&self, chat_id: i64) -> RwLockReadGuard<'_, HashMap<i64, InterviewSession>> {
        self.shard(chat_id).read().await
    }

    /// Insert a session unless one already exists for the user.
    /// Returns the existing session's kind on conflict.
    pub async fn try_create(&self, session: InterviewSession) -> Result<(), InterviewKind> {
        let mut shard = self.write(session.chat_id).await;
        if let Some(existing) = shard.get(&session.chat_id) {
            return Err(existing.kind);
        }
        shard.insert(session.chat_id, session);
        Ok(())
    }

    /// Clone of the user's session, if any
    pub async fn snapshot(&self, chat_id: i64) -> Option<InterviewSession> {
        self.read(chat_id).await.get(&chat_id).cloned()
    }

    /// Remove the user's session; idempotent
    pub async fn remove(&self, chat_id: i64) -> Option<InterviewSession> {
        self.write(chat_id).await.remove(&chat_id)
    }

    pub async fn exists(&self, chat_id: i64) -> bool {
        self.read(chat_id).await.contains_key(&chat_id)
    }

    pub async fn kind_of(&self, chat_id: i64) -> Option<InterviewKind> {
        self.read(chat_id).await.get(&chat_id).map(|s| s.kind)
    }
}

impl Default for SessionStore {
    fn default() -> Self {
        Self::new()
    }
}
