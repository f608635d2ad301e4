//! Bounded rebuild worker pool
//!
//! Runs recompute-and-store tasks off the reader's path. A fixed number of
//! workers drain a bounded queue; when the queue is full, submissions are
//! rejected with [`Error::SchedulerSaturated`] instead of blocking the
//! reader or growing without limit.
//!
//! Every finished task publishes a [`RebuildEvent`] on a broadcast channel.
//! Failures (errors and panics) are logged and published, never dropped.

use futures::FutureExt;
use futures::future::BoxFuture;
use stampede_domain::constants::{
    DEFAULT_REBUILD_QUEUE_CAPACITY, DEFAULT_REBUILD_WORKERS, REBUILD_EVENT_CHANNEL_CAPACITY,
};
use stampede_domain::error::{Error, Result};
use std::any::Any;
use std::fmt;
use std::future::Future;
use std::panic::AssertUnwindSafe;
use std::sync::{Arc, Mutex};
use tokio::sync::mpsc::error::TrySendError;
use tokio::sync::{Mutex as AsyncMutex, broadcast, mpsc};
use tokio::task::JoinHandle;
use tracing::{debug, error, info, warn};

/// Worker pool sizing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SchedulerConfig {
    /// Number of tasks executed concurrently
    pub workers: usize,
    /// Number of tasks that may wait for a worker before submissions are rejected
    pub queue_capacity: usize,
}

impl Default for SchedulerConfig {
    fn default() -> Self {
        Self {
            workers: DEFAULT_REBUILD_WORKERS,
            queue_capacity: DEFAULT_REBUILD_QUEUE_CAPACITY,
        }
    }
}

/// Outcome of a finished rebuild task
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RebuildEvent {
    /// The task stored a fresh value
    Completed {
        /// Cache key that was rebuilt
        key: String,
    },
    /// The task returned an error or panicked
    Failed {
        /// Cache key whose rebuild failed
        key: String,
        /// Rendered failure
        reason: String,
    },
}

impl RebuildEvent {
    /// Cache key the event refers to
    pub fn key(&self) -> &str {
        match self {
            Self::Completed { key } | Self::Failed { key, .. } => key,
        }
    }

    /// Whether the rebuild succeeded
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Completed { .. })
    }
}

/// A unit of rebuild work
///
/// The work future owns whatever cleanup it needs (lock guards in
/// particular); a task rejected at submission is dropped unexecuted.
pub struct RebuildTask {
    key: String,
    work: BoxFuture<'static, Result<()>>,
}

impl RebuildTask {
    /// Wrap a rebuild future for `key`
    pub fn new<F>(key: impl Into<String>, work: F) -> Self
    where
        F: Future<Output = Result<()>> + Send + 'static,
    {
        Self {
            key: key.into(),
            work: work.boxed(),
        }
    }

    /// Cache key this task rebuilds
    pub fn key(&self) -> &str {
        &self.key
    }
}

impl fmt::Debug for RebuildTask {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RebuildTask")
            .field("key", &self.key)
            .finish_non_exhaustive()
    }
}

type SharedReceiver = Arc<AsyncMutex<mpsc::Receiver<RebuildTask>>>;

struct SchedulerInner {
    config: SchedulerConfig,
    sender: Mutex<Option<mpsc::Sender<RebuildTask>>>,
    events: broadcast::Sender<RebuildEvent>,
    workers: Mutex<Vec<JoinHandle<()>>>,
}

/// Bounded pool executing [`RebuildTask`]s on the Tokio runtime
///
/// Cloning is cheap; clones share the same queue and workers.
#[derive(Clone)]
pub struct RebuildScheduler {
    inner: Arc<SchedulerInner>,
}

impl RebuildScheduler {
    /// Start the worker pool on the current Tokio runtime
    pub fn new(config: SchedulerConfig) -> Result<Self> {
        let handle = tokio::runtime::Handle::try_current().map_err(|e| {
            Error::internal(format!("Rebuild scheduler requires a Tokio runtime: {e}"))
        })?;
        Self::with_handle(config, &handle)
    }

    /// Start the worker pool on the given runtime
    pub fn with_handle(config: SchedulerConfig, handle: &tokio::runtime::Handle) -> Result<Self> {
        if config.workers == 0 {
            return Err(Error::invalid_argument(
                "Rebuild scheduler needs at least one worker",
            ));
        }
        if config.queue_capacity == 0 {
            return Err(Error::invalid_argument(
                "Rebuild queue capacity cannot be 0",
            ));
        }

        let (sender, receiver) = mpsc::channel(config.queue_capacity);
        let (events, _) = broadcast::channel(REBUILD_EVENT_CHANNEL_CAPACITY);
        let receiver: SharedReceiver = Arc::new(AsyncMutex::new(receiver));

        let workers = (0..config.workers)
            .map(|worker_id| {
                handle.spawn(run_worker(
                    worker_id,
                    Arc::clone(&receiver),
                    events.clone(),
                ))
            })
            .collect();

        debug!(
            workers = config.workers,
            queue_capacity = config.queue_capacity,
            "Rebuild scheduler started"
        );

        Ok(Self {
            inner: Arc::new(SchedulerInner {
                config,
                sender: Mutex::new(Some(sender)),
                events,
                workers: Mutex::new(workers),
            }),
        })
    }

    /// Pool sizing
    pub fn config(&self) -> SchedulerConfig {
        self.inner.config
    }

    /// Queue a task without waiting
    ///
    /// # Errors
    /// - [`Error::SchedulerSaturated`] when the queue is full
    /// - [`Error::SchedulerClosed`] after [`RebuildScheduler::shutdown`]
    pub fn submit(&self, task: RebuildTask) -> Result<()> {
        let guard = self
            .inner
            .sender
            .lock()
            .map_err(|_| Error::internal("Rebuild scheduler state poisoned"))?;
        let Some(sender) = guard.as_ref() else {
            return Err(Error::SchedulerClosed);
        };

        match sender.try_send(task) {
            Ok(()) => Ok(()),
            Err(TrySendError::Full(task)) => Err(Error::scheduler_saturated(task.key)),
            Err(TrySendError::Closed(_)) => Err(Error::SchedulerClosed),
        }
    }

    /// Subscribe to task outcomes published after this call
    pub fn subscribe(&self) -> broadcast::Receiver<RebuildEvent> {
        self.inner.events.subscribe()
    }

    /// Number of tasks waiting for a worker
    pub fn queued(&self) -> usize {
        self.inner
            .sender
            .lock()
            .ok()
            .and_then(|guard| {
                guard
                    .as_ref()
                    .map(|sender| sender.max_capacity() - sender.capacity())
            })
            .unwrap_or(0)
    }

    /// Whether the scheduler still accepts tasks
    pub fn is_running(&self) -> bool {
        self.inner
            .sender
            .lock()
            .map(|guard| guard.is_some())
            .unwrap_or(false)
    }

    /// Stop accepting tasks, drain the queue and wait for the workers to exit
    pub async fn shutdown(&self) {
        let sender = self.inner.sender.lock().ok().and_then(|mut guard| guard.take());
        drop(sender);

        let workers = self
            .inner
            .workers
            .lock()
            .map(|mut guard| std::mem::take(&mut *guard))
            .unwrap_or_default();

        for worker in workers {
            if let Err(e) = worker.await {
                warn!(error = %e, "Rebuild worker terminated abnormally");
            }
        }
        info!("Rebuild scheduler stopped");
    }
}

impl fmt::Debug for RebuildScheduler {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RebuildScheduler")
            .field("config", &self.inner.config)
            .field("running", &self.is_running())
            .finish()
    }
}

async fn run_worker(
    worker_id: usize,
    receiver: SharedReceiver,
    events: broadcast::Sender<RebuildEvent>,
) {
    loop {
        let next = receiver.lock().await.recv().await;
        let Some(task) = next else {
            break;
        };
        let event = execute(task).await;
        // No subscribers is not an error
        let _ = events.send(event);
    }
    debug!(worker_id, "Rebuild worker exiting");
}

async fn execute(task: RebuildTask) -> RebuildEvent {
    let RebuildTask { key, work } = task;
    match AssertUnwindSafe(work).catch_unwind().await {
        Ok(Ok(())) => {
            info!(key = %key, "Cache rebuild completed");
            RebuildEvent::Completed { key }
        }
        Ok(Err(e)) => {
            error!(key = %key, error = %e, "Cache rebuild failed");
            RebuildEvent::Failed {
                key,
                reason: e.to_string(),
            }
        }
        Err(panic) => {
            let reason = panic_message(panic.as_ref());
            error!(key = %key, reason = %reason, "Cache rebuild panicked");
            RebuildEvent::Failed { key, reason }
        }
    }
}

fn panic_message(panic: &(dyn Any + Send)) -> String {
    if let Some(message) = panic.downcast_ref::<&str>() {
        format!("rebuild task panicked: {message}")
    } else if let Some(message) = panic.downcast_ref::<String>() {
        format!("rebuild task panicked: {message}")
    } else {
        "rebuild task panicked".to_string()
    }
}
