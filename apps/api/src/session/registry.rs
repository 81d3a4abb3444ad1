use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use tokio::sync::RwLock;
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::errors::AppError;
use crate::session::store::SessionStore;

/// Owns every live session. Each session is an independent `SessionStore`;
/// nothing is shared between them. Sessions not looked up for `idle_ttl`
/// are evicted.
pub struct SessionRegistry {
    sessions: RwLock<HashMap<Uuid, Arc<SessionStore>>>,
    max_sessions: usize,
    idle_ttl: Duration,
}

impl SessionRegistry {
    pub fn new(max_sessions: usize, idle_ttl: Duration) -> Self {
        Self {
            sessions: RwLock::new(HashMap::new()),
            max_sessions,
            idle_ttl,
        }
    }

    pub async fn create(&self) -> Result<Arc<SessionStore>, AppError> {
        let mut sessions = self.sessions.write().await;
        if sessions.len() >= self.max_sessions {
            self.evict_expired(&mut sessions);
        }
        if sessions.len() >= self.max_sessions {
            warn!(active = sessions.len(), "Refusing to create session: limit reached");
            return Err(AppError::SessionLimit(self.max_sessions));
        }

        let id = Uuid::new_v4();
        let store = Arc::new(SessionStore::new(id));
        sessions.insert(id, Arc::clone(&store));
        info!(session_id = %id, active = sessions.len(), "Session created");
        Ok(store)
    }

    /// Looks a session up and marks it as seen. Expired sessions that the
    /// sweeper has not reached yet are treated as gone.
    pub async fn get(&self, id: Uuid) -> Option<Arc<SessionStore>> {
        let store = self.sessions.read().await.get(&id).cloned()?;
        if store.idle_for() >= self.idle_ttl {
            return None;
        }
        store.touch();
        Some(store)
    }

    /// Like `get`, but a missing session is a 404.
    pub async fn require(&self, id: Uuid) -> Result<Arc<SessionStore>, AppError> {
        self.get(id)
            .await
            .ok_or_else(|| AppError::NotFound(format!("Session {id} not found")))
    }

    pub async fn remove(&self, id: Uuid) -> bool {
        let removed = self.sessions.write().await.remove(&id).is_some();
        if removed {
            info!(session_id = %id, "Session removed");
        }
        removed
    }

    pub async fn len(&self) -> usize {
        self.sessions.read().await.len()
    }

    /// Drops every session idle for at least `idle_ttl`. Returns how many went.
    pub async fn evict_idle(&self) -> usize {
        let mut sessions = self.sessions.write().await;
        self.evict_expired(&mut sessions)
    }

    fn evict_expired(&self, sessions: &mut HashMap<Uuid, Arc<SessionStore>>) -> usize {
        let before = sessions.len();
        sessions.retain(|id, store| {
            let keep = store.idle_for() < self.idle_ttl;
            if !keep {
                debug!(session_id = %id, "Evicting idle session");
            }
            keep
        });
        let evicted = before - sessions.len();
        if evicted > 0 {
            info!(evicted, active = sessions.len(), "Idle sessions evicted");
        }
        evicted
    }

    /// Sweeps idle sessions in the background, four times per TTL.
    pub fn spawn_idle_sweeper(self: &Arc<Self>) -> JoinHandle<()> {
        let registry = Arc::clone(self);
        let period = (self.idle_ttl / 4).max(Duration::from_secs(1));
        tokio::spawn(async move {
            let mut ticker = tokio::time::interval(period);
            loop {
                ticker.tick().await;
                registry.evict_idle().await;
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TTL: Duration = Duration::from_secs(60);

    #[tokio::test]
    async fn test_create_and_get() {
        let registry = SessionRegistry::new(10, TTL);
        let store = registry.create().await.unwrap();
        let found = registry.get(store.id()).await.unwrap();
        assert!(Arc::ptr_eq(&store, &found));
        assert_eq!(registry.len().await, 1);
    }

    #[tokio::test]
    async fn test_capacity_is_enforced() {
        let registry = SessionRegistry::new(2, TTL);
        registry.create().await.unwrap();
        registry.create().await.unwrap();
        let err = registry.create().await.err().unwrap();
        assert!(matches!(err, AppError::SessionLimit(2)));
    }

    #[tokio::test]
    async fn test_remove_frees_capacity() {
        let registry = SessionRegistry::new(1, TTL);
        let store = registry.create().await.unwrap();
        assert!(registry.remove(store.id()).await);
        assert!(!registry.remove(store.id()).await);
        assert!(registry.create().await.is_ok());
    }

    #[tokio::test]
    async fn test_require_unknown_is_not_found() {
        let registry = SessionRegistry::new(1, TTL);
        let err = registry.require(Uuid::new_v4()).await.err().unwrap();
        assert!(matches!(err, AppError::NotFound(_)));
    }

    #[tokio::test(start_paused = true)]
    async fn test_abandoned_sessions_free_their_slots() {
        let registry = SessionRegistry::new(2, TTL);
        let first = registry.create().await.unwrap();
        registry.create().await.unwrap();
        assert!(registry.create().await.is_err());

        tokio::time::advance(TTL).await;
        let third = registry.create().await.unwrap();
        assert_eq!(registry.len().await, 1);
        assert!(registry.get(first.id()).await.is_none());
        assert!(registry.get(third.id()).await.is_some());
    }

    #[tokio::test(start_paused = true)]
    async fn test_lookup_keeps_session_alive() {
        let registry = SessionRegistry::new(10, TTL);
        let active = registry.create().await.unwrap();
        let idle = registry.create().await.unwrap();

        tokio::time::advance(Duration::from_secs(40)).await;
        assert!(registry.get(active.id()).await.is_some());
        tokio::time::advance(Duration::from_secs(30)).await;

        assert_eq!(registry.evict_idle().await, 1);
        assert!(registry.get(active.id()).await.is_some());
        assert!(registry.get(idle.id()).await.is_none());
    }

    #[tokio::test(start_paused = true)]
    async fn test_sweeper_evicts_in_background() {
        let registry = Arc::new(SessionRegistry::new(10, TTL));
        registry.create().await.unwrap();
        let sweeper = registry.spawn_idle_sweeper();

        tokio::time::sleep(TTL + Duration::from_secs(20)).await;
        assert_eq!(registry.len().await, 0);
        sweeper.abort();
    }
}
