//! Debounced asset search.
//!
//! Each call to [`SearchDebouncer::search`] bumps a sequence number and
//! restarts a single pending timer. When the timer fires, the lookup runs on
//! its own task so that later input can cancel the *timer* but never abort a
//! request already on the wire. Every state update is tagged with the
//! sequence number it belongs to and dropped if a newer call has happened
//! since (last call wins, regardless of response order).

use finboard_core::api::FinanceApi;
use finboard_core::search::SearchState;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, PoisonError};
use std::time::Duration;
use tokio::sync::watch;
use tokio::task::JoinHandle;

#[derive(Clone)]
pub struct SearchDebouncer {
    inner: Arc<Inner>,
}

struct Inner {
    api: Arc<dyn FinanceApi>,
    quiet: Duration,
    seq: AtomicU64,
    pending: Mutex<Option<JoinHandle<()>>>,
    state: watch::Sender<SearchState>,
}

impl SearchDebouncer {
    /// Must be used from within a tokio runtime.
    pub fn new(api: Arc<dyn FinanceApi>, quiet: Duration) -> Self {
        let (state, _) = watch::channel(SearchState::Idle);
        Self {
            inner: Arc::new(Inner {
                api,
                quiet,
                seq: AtomicU64::new(0),
                pending: Mutex::new(None),
                state,
            }),
        }
    }

    /// Schedules a lookup for `query` once input has been quiet long enough.
    ///
    /// A blank query clears the results immediately without a remote call.
    pub fn search(&self, query: &str) {
        let query = query.trim().to_string();
        let seq = self.inner.seq.fetch_add(1, Ordering::SeqCst) + 1;
        self.inner.abort_pending();

        if query.is_empty() {
            self.inner.publish(seq, SearchState::Idle);
            return;
        }

        self.inner.publish(
            seq,
            SearchState::Debouncing {
                query: query.clone(),
            },
        );

        let inner = Arc::clone(&self.inner);
        let timer = tokio::spawn(async move {
            tokio::time::sleep(inner.quiet).await;
            if !inner.is_current(seq) {
                return;
            }
            tokio::spawn(Inner::lookup(inner, seq, query));
        });

        *self
            .inner
            .pending
            .lock()
            .unwrap_or_else(PoisonError::into_inner) = Some(timer);
    }

    /// Drops any scheduled lookup and clears the results.
    pub fn cancel(&self) {
        let seq = self.inner.seq.fetch_add(1, Ordering::SeqCst) + 1;
        self.inner.abort_pending();
        self.inner.publish(seq, SearchState::Idle);
    }

    pub fn state(&self) -> SearchState {
        self.inner.state.borrow().clone()
    }

    pub fn subscribe(&self) -> watch::Receiver<SearchState> {
        self.inner.state.subscribe()
    }

    /// Waits until the latest search has produced results, failed, or been cleared.
    pub async fn settled(&self) -> SearchState {
        let mut rx = self.subscribe();
        match rx.wait_for(SearchState::is_settled).await {
            Ok(state) => state.clone(),
            Err(_) => self.state(),
        }
    }
}

impl Inner {
    fn is_current(&self, seq: u64) -> bool {
        self.seq.load(Ordering::SeqCst) == seq
    }

    fn abort_pending(&self) {
        let previous = self
            .pending
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .take();
        if let Some(timer) = previous {
            timer.abort();
        }
    }

    /// Publishes `next` only if `seq` is still the latest call.
    fn publish(&self, seq: u64, next: SearchState) -> bool {
        self.state.send_if_modified(|state| {
            if self.is_current(seq) {
                *state = next;
                true
            } else {
                false
            }
        })
    }

    async fn lookup(self: Arc<Self>, seq: u64, query: String) {
        self.publish(
            seq,
            SearchState::Searching {
                query: query.clone(),
            },
        );
        tracing::debug!("[SearchDebouncer] Looking up '{}' (#{})", query, seq);

        let next = match self.api.search_assets(&query).await {
            Ok(results) => SearchState::Ready { query, results },
            Err(e) => {
                tracing::warn!("[SearchDebouncer] Search for '{}' failed: {}", query, e);
                SearchState::Failed {
                    query,
                    message: e.user_message(),
                }
            }
        };

        if !self.publish(seq, next) {
            tracing::debug!("[SearchDebouncer] Discarding superseded result #{}", seq);
        }
    }
}
