use std::hash::Hash;
use std::ops::Drop;
use std::time::Duration;
use std::{collections::HashMap, fmt::Debug};

use tokio::sync::{mpsc, oneshot};
use tokio_util::sync::CancellationToken;
use tracing_futures::Instrument;

use crate::{
    batch_function::BatchFunction,
    error::{LoadError, LoadResult},
    loader_op::{LoadRequest, LoaderOp},
    loader_worker::LoaderWorker,
};

/// Time a loader's execution frame stays open after its first op when no other delay is set.
pub const DEFAULT_BATCH_DELAY: Duration = Duration::from_millis(1);

/// Construction options for a [`Loader`].
#[derive(Debug, Clone)]
pub struct LoaderOptions {
    /// How long the worker waits after the first op of a frame before draining its queue. Loads
    /// issued from other tasks or runtime threads within this window share one batch. Zero relies on
    /// scheduler yields alone, which only covers callers on the same thread.
    pub batch_delay: Duration,
    pub cancellation: CancellationToken,
}

impl Default for LoaderOptions {
    fn default() -> Self {
        Self { batch_delay: DEFAULT_BATCH_DELAY, cancellation: CancellationToken::new() }
    }
}

/// Batch loads values from some expensive resource, primarily intended for mitigating GraphQL's
/// N+1 problem.
///
/// Users can call [`Loader::load`] and [`Loader::load_many`] to fetch values from the underlying
/// resource or cache. The cache can be cleared with calls to [`Loader::clear`] and
/// [`Loader::clear_many`], and values can be added to the cache out-of-band through the use of
/// [`Loader::prime`] and [`Loader::prime_many`].
///
/// The `Loader` struct acts as an intermediary between the async domain in which `load` calls are
/// invoked and the pseudo-single-threaded domain of the `LoaderWorker`. Callers can invoke the
/// `Loader` from multiple parallel tasks, and the loader will enqueue the requested operations on
/// the request queue for processing by its `LoaderWorker`. The worker processes the requests
/// sequentially and provides results via response oneshot channels back to the Loader.
///
/// A `Loader` is meant to live for exactly one GraphQL request: its cache is never shared and is
/// dropped with it.
pub struct Loader<K, V>
where
    K: 'static + Eq + Debug + Clone + Send,
    V: 'static + Send + Debug + Clone,
{
    request_tx: mpsc::UnboundedSender<LoaderOp<K, V>>,
    cancellation: CancellationToken,
    load_task_handle: tokio::task::JoinHandle<()>,
}

impl<K, V> Drop for Loader<K, V>
where
    K: 'static + Eq + Debug + Clone + Send,
    V: 'static + Send + Debug + Clone,
{
    fn drop(&mut self) {
        self.load_task_handle.abort();
    }
}

impl<K, V> Loader<K, V>
where
    K: 'static + Eq + Debug + Ord + Clone + Hash + Send + Sync,
    V: 'static + Send + Debug + Clone,
{
    /// Creates a new Loader for the provided BatchFunction and Context type.
    ///
    /// Note: the batch function is passed in as a marker for type inference.
    pub fn new<F, ContextT>(batch_fn: F, context: ContextT) -> Self
    where
        ContextT: Send + Sync + 'static,
        F: 'static + BatchFunction<K, V, Context = ContextT> + Send,
    {
        Self::with_options(batch_fn, context, LoaderOptions::default())
    }

    /// Creates a new Loader whose pending and future loads fail with [`LoadError::Cancelled`] once
    /// `cancellation` fires.
    pub fn with_cancellation<F, ContextT>(
        batch_fn: F,
        context: ContextT,
        cancellation: CancellationToken,
    ) -> Self
    where
        ContextT: Send + Sync + 'static,
        F: 'static + BatchFunction<K, V, Context = ContextT> + Send,
    {
        Self::with_options(batch_fn, context, LoaderOptions { cancellation, ..Default::default() })
    }

    pub fn with_options<F, ContextT>(_: F, context: ContextT, options: LoaderOptions) -> Self
    where
        ContextT: Send + Sync + 'static,
        F: 'static + BatchFunction<K, V, Context = ContextT> + Send,
    {
        let LoaderOptions { batch_delay, cancellation } = options;
        let (tx, rx) = mpsc::unbounded_channel();
        let worker = LoaderWorker::<K, V, F, HashMap<K, LoadResult<V>>, ContextT>::new(
            HashMap::new(),
            rx,
            context,
            cancellation.clone(),
            batch_delay,
        );
        let span = tracing::trace_span!("LoaderWorker", kv = worker.debug_name());
        Self {
            request_tx: tx,
            cancellation,
            load_task_handle: tokio::task::spawn(worker.start().instrument(span)),
        }
    }
}

impl<K, V> Loader<K, V>
where
    K: 'static + Eq + Debug + Clone + Send,
    V: 'static + Send + Debug + Clone,
{
    /// Loads a value from the underlying resource.
    ///
    /// Returns `Ok(None)` if the value was not returned by the BatchFunction, and the error recorded
    /// for this key if loading it failed.
    ///
    /// If the value is already in the loader cache, it is returned as soon as it is processed.
    /// Otherwise, the requested key is enqueued for batch loading in the next loader execution
    /// frame.
    pub async fn load(&self, key: K) -> LoadResult<V> {
        let (response_tx, response_rx) = oneshot::channel();
        self.enqueue(LoaderOp::Load(LoadRequest::One(key, response_tx)))?;
        tokio::select! {
            biased;
            response = response_rx => response.unwrap_or_else(|_| Err(self.closed_error())),
            _ = self.cancellation.cancelled() => Err(LoadError::Cancelled),
        }
    }

    /// Loads many values at once, answering in the order of `keys`.
    ///
    /// If all the values are already present in the loader cache, they are returned as soon as the
    /// request is processed by the worker. Otherwise, the missing keys are enqueued for batch
    /// loading in the next loader execution frame.
    pub async fn load_many(&self, keys: Vec<K>) -> Vec<LoadResult<V>> {
        let key_count = keys.len();
        let (response_tx, response_rx) = oneshot::channel();
        if let Err(e) = self.enqueue(LoaderOp::Load(LoadRequest::Many(keys, response_tx))) {
            return vec![Err(e); key_count];
        }
        tokio::select! {
            biased;
            response = response_rx => {
                response.unwrap_or_else(|_| vec![Err(self.closed_error()); key_count])
            }
            _ = self.cancellation.cancelled() => vec![Err(LoadError::Cancelled); key_count],
        }
    }

    /// Adds a value to the cache.
    pub async fn prime(&self, key: K, value: V) {
        self.enqueue_or_log(LoaderOp::Prime(key, value));
    }

    /// Adds many values to the cache at once.
    pub async fn prime_many(&self, key_vals: Vec<(K, V)>) {
        self.enqueue_or_log(LoaderOp::PrimeMany(key_vals));
    }

    /// Removes a value from the cache.
    ///
    /// This key will be reloaded when it is next requested.
    pub async fn clear(&self, key: K) {
        self.enqueue_or_log(LoaderOp::Clear(key));
    }

    /// Removes multiple values from the cache at once.
    ///
    /// These keys will be reloaded when requested.
    pub async fn clear_many(&self, keys: Vec<K>) {
        self.enqueue_or_log(LoaderOp::ClearMany(keys));
    }

    /// Executes the currently staged batch without waiting for the execution frame to end.
    pub async fn flush(&self) {
        self.enqueue_or_log(LoaderOp::Flush);
    }

    fn enqueue(&self, op: LoaderOp<K, V>) -> Result<(), LoadError> {
        if self.cancellation.is_cancelled() {
            return Err(LoadError::Cancelled);
        }
        self.request_tx.send(op).map_err(|_| self.closed_error())
    }

    fn enqueue_or_log(&self, op: LoaderOp<K, V>) {
        if let Err(error) = self.enqueue(op) {
            tracing::warn!(%error, "loader op dropped");
        }
    }

    fn closed_error(&self) -> LoadError {
        if self.cancellation.is_cancelled() {
            LoadError::Cancelled
        } else {
            LoadError::WorkerTerminated
        }
    }
}
