//! User store with cancellable loads and change notifications.
//!
//! Every load gets a [`LoadTicket`]. Starting a new load cancels the
//! previous ticket, and [`UserStore::teardown`] cancels the active one. A
//! result is applied only if its ticket is neither cancelled nor stale, so
//! the last load started is the one that wins.

use std::sync::Arc;

use parking_lot::RwLock;
use roster_core::{fallback_users, FetchError, FetchFailurePolicy, UserRecord};
use tokio::sync::watch;
use tokio_util::sync::CancellationToken;

use crate::source::UserSource;

/// Lifecycle of the store contents.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum LoadState {
    /// Nothing requested yet.
    #[default]
    Idle,
    /// A fetch is in flight.
    Loading,
    /// Records are available.
    Ready { count: usize },
    /// The fetch failed and the store is empty.
    Failed { message: String },
}

impl LoadState {
    pub fn is_loading(&self) -> bool {
        matches!(self, LoadState::Loading)
    }
}

/// Handle for one in-flight load.
#[derive(Debug, Clone)]
pub struct LoadTicket {
    generation: u64,
    token: CancellationToken,
}

impl LoadTicket {
    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn is_cancelled(&self) -> bool {
        self.token.is_cancelled()
    }

    /// Resolves when the ticket is cancelled.
    pub async fn cancelled(&self) {
        self.token.cancelled().await
    }
}

struct StoreInner {
    records: Arc<[UserRecord]>,
    state: LoadState,
    generation: u64,
    active: Option<CancellationToken>,
}

/// Holds the current snapshot of user records.
///
/// Uses `parking_lot::RwLock` for the contents and `tokio::sync::watch` to
/// broadcast [`LoadState`] changes. Every state transition broadcasts.
pub struct UserStore {
    inner: RwLock<StoreInner>,
    policy: FetchFailurePolicy,
    tx: watch::Sender<LoadState>,
    rx: watch::Receiver<LoadState>,
}

impl UserStore {
    pub fn new(policy: FetchFailurePolicy) -> Self {
        let (tx, rx) = watch::channel(LoadState::Idle);
        Self {
            inner: RwLock::new(StoreInner {
                records: Arc::from(Vec::new()),
                state: LoadState::Idle,
                generation: 0,
                active: None,
            }),
            policy,
            tx,
            rx,
        }
    }

    pub fn policy(&self) -> FetchFailurePolicy {
        self.policy
    }

    /// Current immutable snapshot.
    pub fn snapshot(&self) -> Arc<[UserRecord]> {
        self.inner.read().records.clone()
    }

    pub fn state(&self) -> LoadState {
        self.inner.read().state.clone()
    }

    /// Subscribe to load state changes.
    pub fn subscribe(&self) -> watch::Receiver<LoadState> {
        self.rx.clone()
    }

    /// Start a load: supersede any in-flight one and mark the store loading.
    pub fn begin_load(&self) -> LoadTicket {
        let ticket = {
            let mut inner = self.inner.write();
            if let Some(previous) = inner.active.take() {
                previous.cancel();
                tracing::debug!("Superseded load generation {}", inner.generation);
            }
            inner.generation += 1;
            let token = CancellationToken::new();
            inner.active = Some(token.clone());
            inner.state = LoadState::Loading;
            LoadTicket {
                generation: inner.generation,
                token,
            }
        };
        let _ = self.tx.send(LoadState::Loading);
        ticket
    }

    /// Apply a settled fetch result. Returns false if the ticket was
    /// cancelled or superseded and the result was discarded.
    pub fn apply(&self, ticket: &LoadTicket, result: Result<Vec<UserRecord>, FetchError>) -> bool {
        let state = {
            let mut inner = self.inner.write();
            if ticket.is_cancelled() || ticket.generation != inner.generation {
                tracing::debug!(
                    "Discarding stale load result (generation {}, current {})",
                    ticket.generation,
                    inner.generation
                );
                return false;
            }
            inner.active = None;

            let (records, state) = match result {
                Ok(users) => {
                    let count = users.len();
                    tracing::info!("Loaded {} users", count);
                    (users, LoadState::Ready { count })
                }
                Err(e) => match self.policy {
                    FetchFailurePolicy::Fallback => {
                        tracing::warn!("Fetch failed, using fallback dataset: {}", e);
                        let users = fallback_users();
                        let count = users.len();
                        (users, LoadState::Ready { count })
                    }
                    FetchFailurePolicy::Error => {
                        tracing::error!("Fetch failed: {}", e);
                        (
                            Vec::new(),
                            LoadState::Failed {
                                message: e.to_string(),
                            },
                        )
                    }
                },
            };

            inner.records = Arc::from(records);
            inner.state = state.clone();
            state
        };
        let _ = self.tx.send(state);
        true
    }

    /// Fetch from `source` and apply the result, unless cancelled first.
    pub async fn load(&self, source: &dyn UserSource) -> LoadState {
        let ticket = self.begin_load();
        tracing::info!("Loading users from {}", source.describe());

        let result = tokio::select! {
            _ = ticket.cancelled() => Err(FetchError::Cancelled),
            result = source.fetch_users() => result,
        };
        self.apply(&ticket, result);
        self.state()
    }

    /// Cancel the active load, if any. Its result will be discarded.
    pub fn teardown(&self) {
        if let Some(active) = self.inner.write().active.take() {
            active.cancel();
            tracing::debug!("Store torn down with a load in flight");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::source::StaticUserSource;
    use roster_core::UserId;
    use std::time::Duration;

    fn users(names: &[&str]) -> Vec<UserRecord> {
        names
            .iter()
            .enumerate()
            .map(|(i, name)| UserRecord::new(i as u64 + 1, *name))
            .collect()
    }

    #[tokio::test]
    async fn test_load_success() {
        let store = UserStore::new(FetchFailurePolicy::Error);
        let rx = store.subscribe();
        assert_eq!(*rx.borrow(), LoadState::Idle);

        let source = StaticUserSource::new(users(&["Ann", "Bob"]));
        let state = store.load(&source).await;

        assert_eq!(state, LoadState::Ready { count: 2 });
        assert_eq!(*rx.borrow(), LoadState::Ready { count: 2 });
        assert_eq!(store.snapshot().len(), 2);
        assert_eq!(store.snapshot()[0].id, UserId(1));
    }

    #[tokio::test]
    async fn test_error_policy_leaves_store_empty() {
        let store = UserStore::new(FetchFailurePolicy::Error);
        let state = store.load(&StaticUserSource::failing("connection refused")).await;

        assert_eq!(
            state,
            LoadState::Failed {
                message: "Request failed: connection refused".to_string()
            }
        );
        assert!(store.snapshot().is_empty());
    }

    #[tokio::test]
    async fn test_error_policy_clears_previous_records() {
        let store = UserStore::new(FetchFailurePolicy::Error);
        store.load(&StaticUserSource::new(users(&["Ann"]))).await;
        store.load(&StaticUserSource::failing("gone")).await;
        assert!(store.snapshot().is_empty());
    }

    #[tokio::test]
    async fn test_fallback_policy_substitutes_dataset_silently() {
        let store = UserStore::new(FetchFailurePolicy::Fallback);
        let state = store.load(&StaticUserSource::failing("HTTP 500")).await;

        assert_eq!(state, LoadState::Ready { count: 10 });
        assert_eq!(store.snapshot().len(), 10);
    }

    #[test]
    fn test_stale_ticket_is_discarded() {
        let store = UserStore::new(FetchFailurePolicy::Error);
        let first = store.begin_load();
        let second = store.begin_load();
        assert!(first.is_cancelled());
        assert!(!second.is_cancelled());

        assert!(store.apply(&second, Ok(users(&["New"]))));
        assert!(!store.apply(&first, Ok(users(&["Old", "Older"]))));

        let snapshot = store.snapshot();
        assert_eq!(snapshot.len(), 1);
        assert_eq!(snapshot[0].name, "New");
    }

    #[test]
    fn test_teardown_discards_in_flight_result() {
        let store = UserStore::new(FetchFailurePolicy::Fallback);
        let ticket = store.begin_load();
        store.teardown();

        assert!(!store.apply(&ticket, Err(FetchError::Transport("late".to_string()))));
        assert!(store.snapshot().is_empty());
        assert_eq!(store.state(), LoadState::Loading);
    }

    #[tokio::test(start_paused = true)]
    async fn test_slow_load_loses_to_newer_load() {
        let store = Arc::new(UserStore::new(FetchFailurePolicy::Error));
        let slow = StaticUserSource::new(users(&["Slow"])).with_delay(Duration::from_secs(5));
        let fast = StaticUserSource::new(users(&["Fast", "Faster"]));

        let background = {
            let store = store.clone();
            tokio::spawn(async move { store.load(&slow).await })
        };
        // Let the slow load start and register its ticket
        tokio::task::yield_now().await;
        assert!(store.state().is_loading());

        store.load(&fast).await;
        background.await.unwrap();

        let snapshot = store.snapshot();
        assert_eq!(snapshot.len(), 2);
        assert_eq!(snapshot[0].name, "Fast");
        assert_eq!(store.state(), LoadState::Ready { count: 2 });
    }
}
