//! Fire-and-forget persistence queue
//!
//! [`WriteBehindStore`] returns from `write` immediately and applies the write
//! on a background task. Every write is stamped with the sequence number of
//! its call; a queued write that has been superseded by a later call for the
//! same key is discarded, so the store always ends on the value of the last
//! call regardless of how long earlier writes take.
//!
//! Reads observe the newest queued value for a key before the backing store
//! has caught up.

use parking_lot::Mutex;
use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use tokio::sync::{mpsc, oneshot};

use crate::adapter::PersistentStore;
use crate::kv::{KvError, Result};

enum Command {
    Write { seq: u64, key: String, value: String },
    Settle(oneshot::Sender<()>),
}

/// Newest queued (sequence, value) per key
type Pending = Arc<Mutex<HashMap<String, (u64, String)>>>;

/// Write-behind wrapper around any [`PersistentStore`]
pub struct WriteBehindStore<S> {
    inner: Arc<S>,
    tx: mpsc::UnboundedSender<Command>,
    pending: Pending,
    next_seq: AtomicU64,
}

impl<S> std::fmt::Debug for WriteBehindStore<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WriteBehindStore")
            .field("pending", &self.pending.lock().len())
            .field("next_seq", &self.next_seq.load(Ordering::Relaxed))
            .finish()
    }
}

impl<S: PersistentStore + 'static> WriteBehindStore<S> {
    /// Start the writer task on the current Tokio runtime
    pub fn spawn(inner: S) -> Result<Self> {
        let handle = tokio::runtime::Handle::try_current()
            .map_err(|e| KvError::Unavailable(format!("no async runtime for write-behind: {e}")))?;

        let inner = Arc::new(inner);
        let pending: Pending = Arc::new(Mutex::new(HashMap::new()));
        let (tx, rx) = mpsc::unbounded_channel();

        handle.spawn(run_writer(Arc::clone(&inner), Arc::clone(&pending), rx));

        Ok(Self { inner, tx, pending, next_seq: AtomicU64::new(1) })
    }

    /// Wait until every write issued before this call has been applied or discarded
    pub async fn settled(&self) {
        let (done_tx, done_rx) = oneshot::channel();
        if self.tx.send(Command::Settle(done_tx)).is_ok() {
            // Writer gone means nothing is left to settle
            let _ = done_rx.await;
        }
    }

    /// Number of keys with a write not yet applied
    pub fn pending_writes(&self) -> usize {
        self.pending.lock().len()
    }

    /// The wrapped store
    pub fn inner(&self) -> &S {
        &self.inner
    }
}

impl<S: PersistentStore + 'static> PersistentStore for WriteBehindStore<S> {
    fn read(&self, key: &str) -> Option<String> {
        if let Some((_, value)) = self.pending.lock().get(key) {
            return Some(value.clone());
        }
        self.inner.read(key)
    }

    fn write(&self, key: &str, value: &str) {
        let seq = self.next_seq.fetch_add(1, Ordering::SeqCst);
        record_pending(&self.pending, key, seq, value);

        let command = Command::Write { seq, key: key.to_string(), value: value.to_string() };
        if self.tx.send(command).is_err() {
            // Runtime shut down; fall back to writing inline
            tracing::warn!(key, seq, "write-behind task gone, writing synchronously");
            self.inner.write(key, value);
            clear_if_current(&self.pending, key, seq);
        }
    }
}

async fn run_writer<S: PersistentStore>(
    inner: Arc<S>,
    pending: Pending,
    mut rx: mpsc::UnboundedReceiver<Command>,
) {
    // Newest sequence applied per key; concurrent callers may enqueue out of order
    let mut applied: HashMap<String, u64> = HashMap::new();

    while let Some(command) = rx.recv().await {
        match command {
            Command::Write { seq, key, value } => {
                let newest = pending.lock().get(&key).map(|(s, _)| *s);
                let superseded = newest.is_some_and(|newest| newest > seq)
                    || applied.get(&key).is_some_and(|&last| last > seq);
                if superseded {
                    tracing::debug!(key = %key, seq, "discarding superseded write");
                    continue;
                }
                inner.write(&key, &value);
                clear_if_current(&pending, &key, seq);
                applied.insert(key.clone(), seq);
                tracing::debug!(key = %key, seq, "write applied");
            }
            Command::Settle(done) => {
                let _ = done.send(());
            }
        }
    }
}

/// Queue `value` unless a later call for `key` is already pending
fn record_pending(pending: &Mutex<HashMap<String, (u64, String)>>, key: &str, seq: u64, value: &str) {
    let mut pending = pending.lock();
    if pending.get(key).is_some_and(|(newest, _)| *newest > seq) {
        return;
    }
    pending.insert(key.to_string(), (seq, value.to_string()));
}

fn clear_if_current(pending: &Mutex<HashMap<String, (u64, String)>>, key: &str, seq: u64) {
    let mut pending = pending.lock();
    if pending.get(key).is_some_and(|(s, _)| *s == seq) {
        pending.remove(key);
    }
}
