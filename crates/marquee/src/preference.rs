//! Persisted preference cell
//!
//! One in-memory value mirrored to one key of a [`KeyValueStore`].
//!
//! Reads and mutations are synchronous. Every committed mutation queues a
//! full snapshot of the value for a background writer task, which stores
//! the snapshots in mutation order. Callers never wait on storage unless
//! they ask to through [`Preference::flush`].
//!
//! Storage failures never escape to readers or mutators: a failed read
//! leaves the value untouched, a failed write is logged and counted, and
//! the in-memory value stays authoritative for the life of the process.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use serde::de::DeserializeOwned;
use serde::Serialize;
use tokio::sync::{mpsc, oneshot, watch};
use tracing::{debug, warn};

use crate::error::{Result, StoreError};
use crate::storage::KeyValueStore;

/// What happened when a preference was loaded from storage
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HydrateOutcome {
    /// A stored value was found and is now in memory
    Loaded,
    /// Nothing was stored; the current value was kept
    Missing,
    /// Reading or parsing failed; the current value was kept
    Failed,
    /// The value was mutated before the read finished; the stored value was discarded
    Superseded,
}

/// Writes that failed since the last flush
#[derive(Debug)]
struct WriteFailures {
    count: usize,
    last_error: String,
}

enum WriteOp {
    Write(String),
    Flush(oneshot::Sender<Option<WriteFailures>>),
}

/// A value of type `T` kept in memory and mirrored to `key`
pub struct Preference<T> {
    key: &'static str,
    store: Arc<dyn KeyValueStore>,
    value: watch::Sender<T>,
    writes: mpsc::UnboundedSender<WriteOp>,
    /// Set by the first committed mutation; guarded by the watch lock
    mutated: AtomicBool,
}

impl<T> Preference<T>
where
    T: Clone + PartialEq + Serialize + DeserializeOwned + Send + Sync + 'static,
{
    /// Create a cell holding `initial` and start its writer task
    ///
    /// Must be called from within a tokio runtime.
    pub fn new(store: Arc<dyn KeyValueStore>, key: &'static str, initial: T) -> Self {
        let (value, _) = watch::channel(initial);
        let (writes, rx) = mpsc::unbounded_channel();
        tokio::spawn(run_writer(Arc::clone(&store), key, rx));

        Self {
            key,
            store,
            value,
            writes,
            mutated: AtomicBool::new(false),
        }
    }

    /// Storage key this cell mirrors
    pub fn key(&self) -> &'static str {
        self.key
    }

    /// Load the stored value, replacing the in-memory one
    pub async fn hydrate(&self) -> HydrateOutcome {
        self.hydrate_with(|v| v).await
    }

    /// Load the stored value, passing it through `normalize` first
    pub async fn hydrate_with<F>(&self, normalize: F) -> HydrateOutcome
    where
        F: FnOnce(T) -> T,
    {
        let raw = match self.store.get(self.key).await {
            Ok(Some(raw)) => raw,
            Ok(None) => {
                debug!(key = self.key, "no stored value, keeping default");
                return HydrateOutcome::Missing;
            }
            Err(e) => {
                warn!(key = self.key, error = %e, "failed to read stored preference");
                return HydrateOutcome::Failed;
            }
        };

        let loaded = match serde_json::from_str::<T>(&raw) {
            Ok(v) => normalize(v),
            Err(e) => {
                warn!(key = self.key, error = %e, "stored preference is malformed, ignoring");
                return HydrateOutcome::Failed;
            }
        };

        let mut outcome = HydrateOutcome::Loaded;
        self.value.send_if_modified(|current| {
            if self.mutated.load(Ordering::Acquire) {
                outcome = HydrateOutcome::Superseded;
                return false;
            }
            if *current == loaded {
                return false;
            }
            *current = loaded;
            true
        });

        match outcome {
            HydrateOutcome::Superseded => {
                warn!(key = self.key, "preference changed before load finished, keeping in-memory value");
            }
            _ => debug!(key = self.key, "preference loaded"),
        }
        outcome
    }

    /// Mutate the value in place
    ///
    /// `f` returns whether it changed anything. On change, observers are
    /// notified and a snapshot is queued for the writer. Returns the result
    /// of `f`.
    pub fn update<F>(&self, f: F) -> bool
    where
        F: FnOnce(&mut T) -> bool,
    {
        self.value.send_if_modified(|value| {
            if !f(value) {
                return false;
            }
            self.mutated.store(true, Ordering::Release);

            // Serialized and queued under the lock so writes stay in mutation order
            match serde_json::to_string(value) {
                Ok(json) => {
                    if self.writes.send(WriteOp::Write(json)).is_err() {
                        warn!(key = self.key, "preference writer stopped, change kept in memory only");
                    }
                }
                Err(e) => {
                    warn!(key = self.key, error = %e, "failed to serialize preference");
                }
            }
            true
        })
    }

    /// Clone of the current value
    pub fn get(&self) -> T {
        self.value.borrow().clone()
    }

    /// Read the current value without cloning it
    pub fn with<R>(&self, f: impl FnOnce(&T) -> R) -> R {
        f(&self.value.borrow())
    }

    /// Observe changes to the value
    pub fn subscribe(&self) -> watch::Receiver<T> {
        self.value.subscribe()
    }

    /// Wait until every write queued before this call has been attempted
    ///
    /// Fails if any write since the previous flush failed.
    pub async fn flush(&self) -> Result<()> {
        let (reply, done) = oneshot::channel();
        if self.writes.send(WriteOp::Flush(reply)).is_err() {
            return Ok(());
        }

        match done.await {
            Ok(Some(failures)) => Err(StoreError::PersistFailed {
                key: self.key.to_string(),
                failures: failures.count,
                last_error: failures.last_error,
            }),
            Ok(None) | Err(_) => Ok(()),
        }
    }
}

/// Background task that stores queued snapshots one at a time
async fn run_writer(
    store: Arc<dyn KeyValueStore>,
    key: &'static str,
    mut rx: mpsc::UnboundedReceiver<WriteOp>,
) {
    let mut failures: Option<WriteFailures> = None;

    while let Some(op) = rx.recv().await {
        let mut json = match op {
            WriteOp::Write(json) => json,
            WriteOp::Flush(reply) => {
                let _ = reply.send(failures.take());
                continue;
            }
        };

        // Snapshots are whole values, so only the newest queued one matters
        let mut pending_flush = None;
        while let Ok(next) = rx.try_recv() {
            match next {
                WriteOp::Write(newer) => json = newer,
                WriteOp::Flush(reply) => {
                    pending_flush = Some(reply);
                    break;
                }
            }
        }

        match store.set(key, &json).await {
            Ok(()) => debug!(key, bytes = json.len(), "preference persisted"),
            Err(e) => {
                warn!(key, error = %e, "failed to persist preference");
                let entry = failures.get_or_insert(WriteFailures {
                    count: 0,
                    last_error: String::new(),
                });
                entry.count += 1;
                entry.last_error = e.to_string();
            }
        }

        if let Some(reply) = pending_flush {
            let _ = reply.send(failures.take());
        }
    }

    debug!(key, "preference writer stopped");
}
