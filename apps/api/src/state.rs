use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use tokio::sync::RwLock;
use tokio::time::Instant;
use tracing::info;
use uuid::Uuid;

use crate::config::Config;
use crate::lottery::{PickRules, Ticket};
use crate::resume::ResumeDraft;
use crate::unlock::flow::UnlockSession;
use crate::unlock::validator::{FormatOnlyVerifier, ReferenceVerifier};

/// A stored ticket and the rules it was drawn with, so regeneration
/// re-rolls under the same rules.
#[derive(Debug, Clone)]
pub struct TicketEntry {
    pub ticket: Ticket,
    pub rules: PickRules,
}

/// A stored value plus the time it was last written.
/// Reads do not extend its life; only inserts and updates do.
#[derive(Debug, Clone)]
pub struct Slot<T> {
    pub value: T,
    last_written: Instant,
}

impl<T> Slot<T> {
    pub fn new(value: T) -> Self {
        Slot {
            value,
            last_written: Instant::now(),
        }
    }

    /// Replaces the value and restarts the idle clock.
    pub fn replace(&mut self, value: T) {
        self.value = value;
        self.last_written = Instant::now();
    }

    fn idle_for(&self, now: Instant) -> Duration {
        now.saturating_duration_since(self.last_written)
    }
}

pub type SlotMap<T> = RwLock<HashMap<Uuid, Slot<T>>>;

/// In-memory page instances. Nothing here survives a restart.
/// Each map entry is replaced whole under the write lock, so readers never
/// see a half-applied update. Entries left unwritten longer than the idle
/// limit are dropped by the sweep task.
#[derive(Default)]
pub struct SessionStore {
    pub tickets: SlotMap<TicketEntry>,
    pub unlocks: SlotMap<UnlockSession>,
    pub resumes: SlotMap<ResumeDraft>,
}

impl SessionStore {
    /// Drops every entry idle for at least `idle`. Returns how many went.
    pub async fn evict_idle(&self, idle: Duration) -> usize {
        evict(&self.tickets, idle).await
            + evict(&self.unlocks, idle).await
            + evict(&self.resumes, idle).await
    }

    pub async fn entry_count(&self) -> usize {
        self.tickets.read().await.len()
            + self.unlocks.read().await.len()
            + self.resumes.read().await.len()
    }

    pub fn start_idle_sweep(self: Arc<Self>, idle: Duration, every: Duration) {
        tokio::spawn(async move {
            let mut ticker = tokio::time::interval(every);
            loop {
                ticker.tick().await;
                let evicted = self.evict_idle(idle).await;
                if evicted > 0 {
                    info!("Evicted {evicted} idle page instances");
                }
            }
        });
    }
}

async fn evict<T>(map: &SlotMap<T>, idle: Duration) -> usize {
    let now = Instant::now();
    let mut entries = map.write().await;
    let before = entries.len();
    entries.retain(|_, slot| slot.idle_for(now) < idle);
    before - entries.len()
}

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    /// Pluggable payment reference check. Default: FormatOnlyVerifier.
    pub verifier: Arc<dyn ReferenceVerifier>,
    pub sessions: Arc<SessionStore>,
}

impl AppState {
    pub fn new(config: Config) -> Self {
        AppState {
            config,
            verifier: Arc::new(FormatOnlyVerifier),
            sessions: Arc::new(SessionStore::default()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::resume::{FormState, ResumeVariant};

    #[tokio::test(start_paused = true)]
    async fn test_idle_entries_are_evicted() {
        let store = SessionStore::default();
        let stale = Uuid::new_v4();
        let fresh = Uuid::new_v4();
        store
            .unlocks
            .write()
            .await
            .insert(stale, Slot::new(UnlockSession::default()));

        tokio::time::advance(Duration::from_secs(50)).await;
        store
            .unlocks
            .write()
            .await
            .insert(fresh, Slot::new(UnlockSession::default()));

        tokio::time::advance(Duration::from_secs(15)).await;
        assert_eq!(store.evict_idle(Duration::from_secs(60)).await, 1);

        let unlocks = store.unlocks.read().await;
        assert!(!unlocks.contains_key(&stale));
        assert!(unlocks.contains_key(&fresh));
    }

    #[tokio::test(start_paused = true)]
    async fn test_replace_restarts_idle_clock() {
        let store = SessionStore::default();
        let id = Uuid::new_v4();
        store
            .unlocks
            .write()
            .await
            .insert(id, Slot::new(UnlockSession::default()));

        tokio::time::advance(Duration::from_secs(45)).await;
        if let Some(slot) = store.unlocks.write().await.get_mut(&id) {
            slot.replace(UnlockSession::default());
        }
        tokio::time::advance(Duration::from_secs(45)).await;

        assert_eq!(store.evict_idle(Duration::from_secs(60)).await, 0);
        assert_eq!(store.entry_count().await, 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_sweep_task_runs_on_interval() {
        let store = Arc::new(SessionStore::default());
        let draft = ResumeDraft::new(ResumeVariant::Classic, FormState::new());
        store
            .resumes
            .write()
            .await
            .insert(Uuid::new_v4(), Slot::new(draft));
        store
            .clone()
            .start_idle_sweep(Duration::from_secs(30), Duration::from_secs(10));

        tokio::time::sleep(Duration::from_secs(41)).await;
        assert_eq!(store.entry_count().await, 0);
    }
}
