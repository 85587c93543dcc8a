use std::fmt::Debug;
use std::marker::PhantomData;
use std::slice;
use std::time::Duration;

use futures::future::FutureExt;
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;

use crate::{
    batch_function::BatchFunction,
    cache::Cache,
    error::LoadError,
    loader_op::{LoadRequest, LoaderOp},
};

#[cfg(feature = "stats")]
use crate::worker_stats::WorkerStats;

/// Whether the op just processed asked for the staged batch to run immediately.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Frame {
    Open,
    Flush,
}

/// A `LoaderWorker` is the "single-thread" worker task that actually does the loading work.
///
/// Once started, it runs in a loop until the parent Loader aborts its `JoinHandle`, drops the
/// request queue tx channel, or the request's cancellation token fires.
///
/// The worker can be in one of three states during its lifetime:
///
/// 1. Waiting for requests
/// 2. Flushing the request queue and staging keys for loading.
/// 3. Executing its load batch function.
///
/// One cycle through this loop may be called an "execution frame".
///
/// In state (1), the worker awaits any messages on the request queue channel, idling until work
/// arrives.
///
/// In state (2), the worker first waits out the loader's batch delay so that callers on other
/// tasks and threads get their requests queued. It then pulls requests from the queue until it is
/// empty, yields to the scheduler and repeats until a yield brings in no new request. Prime and Clear requests are resolved immediately against the cache. For Load requests,
/// the worker checks if the request can be resolved immediately from the cache. If so, it
/// immediately sends the entries on the load request's response channel, otherwise it stages the
/// missing keys for loading. A Flush request runs state (3) right away for whatever is staged.
///
/// In state (3), the loader invokes its `BatchFunction` once with the sorted, deduplicated set of
/// keys collected in (2). The outcome is written into the cache key by key (keys the batch function
/// did not return become `Ok(None)`, a failed batch becomes an error on each of its keys) and then
/// outstanding Load requests are resolved from the cache.
///
/// If the cancellation token fires, any in-flight batch is abandoned, every waiting request is
/// answered with [`LoadError::Cancelled`] and the worker exits.
pub struct LoaderWorker<K, V, F, CacheT, ContextT>
where
    K: 'static + Eq + Debug + Ord + Clone + Send + Sync,
    V: 'static + Send + Debug + Clone,
    F: 'static + BatchFunction<K, V, Context = ContextT> + Send,
    CacheT: Cache,
    ContextT: Send + Sync + 'static,
{
    cache: CacheT,
    request_rx: mpsc::UnboundedReceiver<LoaderOp<K, V>>,
    keys_to_load: Vec<K>,
    pending_requests: Vec<LoadRequest<K, V>>,
    context: ContextT,
    cancellation: CancellationToken,
    batch_delay: Duration,
    phantom_batch_function: PhantomData<F>,
    debug_name: &'static str,
    #[cfg(feature = "stats")]
    stats: WorkerStats,
}

impl<K, V, F, CacheT, ContextT> LoaderWorker<K, V, F, CacheT, ContextT>
where
    K: 'static + Eq + Debug + Clone + Ord + Send + Sync,
    V: 'static + Send + Debug + Clone,
    F: 'static + BatchFunction<K, V, Context = ContextT> + Send,
    CacheT: Cache<K = K, V = V>,
    ContextT: Send + Sync + 'static,
{
    pub fn new(
        cache: CacheT,
        request_rx: mpsc::UnboundedReceiver<LoaderOp<K, V>>,
        context: ContextT,
        cancellation: CancellationToken,
        batch_delay: Duration,
    ) -> Self {
        let debug_name = std::any::type_name::<(K, V)>();
        Self {
            cache,
            request_rx,
            keys_to_load: Vec::new(),
            pending_requests: Vec::new(),
            context,
            cancellation,
            batch_delay,
            phantom_batch_function: PhantomData,
            debug_name,
            #[cfg(feature = "stats")]
            stats: WorkerStats::new(debug_name),
        }
    }

    pub fn debug_name(&self) -> &'static str {
        self.debug_name
    }

    pub async fn start(mut self) {
        loop {
            // Async await until we receive the first op, or the request goes away.
            let op = tokio::select! {
                biased;
                _ = self.cancellation.cancelled() => None,
                op = self.request_rx.recv() => Some(op),
            };
            let mut frame = match op {
                None => {
                    tracing::info!("Request cancelled. Terminating LoaderWorker.");
                    self.abandon();
                    return;
                }
                Some(None) => {
                    tracing::info!("Tx channel closed. Terminating LoaderWorker.");
                    return;
                }
                Some(Some(op)) => self.mux_op(op),
            };

            if frame == Frame::Open && !self.batch_delay.is_zero() {
                // A cancelled request is picked up by `execute_load`.
                tokio::select! {
                    biased;
                    _ = self.cancellation.cancelled() => {}
                    _ = tokio::time::sleep(self.batch_delay) => {}
                }
            }

            // Flush remainder of the op queue, then yield and keep flushing until a pass through
            // the scheduler brings in nothing new.
            loop {
                loop {
                    if frame == Frame::Flush && !self.execute_load().await {
                        return;
                    }
                    match self.request_rx.recv().now_or_never() {
                        Some(Some(op)) => frame = self.mux_op(op),
                        _ => break,
                    }
                }
                tokio::task::yield_now().await;
                match self.request_rx.recv().now_or_never() {
                    Some(Some(op)) => frame = self.mux_op(op),
                    _ => break,
                }
            }
            if !self.execute_load().await {
                return;
            }
        }
    }

    #[tracing::instrument(skip(self))]
    fn mux_op(&mut self, op: LoaderOp<K, V>) -> Frame {
        match op {
            LoaderOp::Load(request) => {
                let keys_to_load = self.cache.missing(request.keys());
                tracing::debug!(requested_keys = ?request.keys(), ?keys_to_load);
                #[cfg(feature = "stats")]
                {
                    let requested = request.keys().len() as u32;
                    self.stats.record_load_request(requested);
                    self.stats.record_cache_hits(requested - keys_to_load.len() as u32);
                }
                if keys_to_load.is_empty() {
                    let entries =
                        request.keys().iter().map(|k| self.cache.get(k)).collect::<Vec<_>>();
                    request.send_response(entries);
                } else {
                    self.keys_to_load.extend(keys_to_load);
                    self.pending_requests.push(request);
                }
            }
            LoaderOp::Prime(key, value) => self.cache.insert(key, Ok(Some(value))),
            LoaderOp::PrimeMany(key_vals) => {
                self.cache.insert_many(key_vals.into_iter().map(|(k, v)| (k, Ok(Some(v)))))
            }
            LoaderOp::Clear(key) => self.cache.remove(slice::from_ref(&key)),
            LoaderOp::ClearMany(keys) => self.cache.remove(&keys),
            LoaderOp::Flush => return Frame::Flush,
        }
        Frame::Open
    }

    /// Runs the batch function over the staged keys and answers the pending requests.
    ///
    /// Returns `false` when the request was cancelled mid-batch and the worker must stop.
    #[tracing::instrument(skip(self), fields(kv = self.debug_name))]
    async fn execute_load(&mut self) -> bool {
        if self.pending_requests.is_empty() {
            return true;
        }
        self.keys_to_load.sort();
        self.keys_to_load.dedup();
        let keys = std::mem::take(&mut self.keys_to_load);
        #[cfg(feature = "stats")]
        self.stats.record_load_exec(
            self.pending_requests.iter().map(|r| r.keys().len() as u32).sum(),
        );

        let outcome = tokio::select! {
            biased;
            _ = self.cancellation.cancelled() => None,
            outcome = F::load(&keys, &self.context) => Some(outcome),
        };
        let Some(outcome) = outcome else {
            tracing::info!(abandoned_keys = ?keys, "Request cancelled during batch load.");
            self.abandon();
            return false;
        };

        match outcome {
            Ok(loaded) => {
                tracing::debug!(?loaded);
                #[cfg(feature = "stats")]
                self.stats.record_load_exec_completed(keys.len() as u32, loaded.len() as u32);
                self.cache.insert_many(loaded.into_iter().map(|(k, v)| (k, v.map(Some))));
            }
            Err(error) => {
                tracing::warn!(?error, ?keys, "batch load failed");
                #[cfg(feature = "stats")]
                self.stats.record_load_failed();
                self.cache.insert_many(keys.iter().map(|k| (k.clone(), Err(error.clone()))));
            }
        }

        // Keys the batch function skipped are cached as not found.
        let not_found = self.cache.missing(&keys);
        self.cache.insert_many(not_found.into_iter().map(|k| (k, Ok(None))));

        for request in self.pending_requests.drain(..) {
            let entries = request.keys().iter().map(|k| self.cache.get(k)).collect::<Vec<_>>();
            request.send_response(entries);
        }
        true
    }

    /// Answers everything still waiting with [`LoadError::Cancelled`].
    fn abandon(&mut self) {
        self.keys_to_load.clear();
        for request in self.pending_requests.drain(..) {
            request.fail(LoadError::Cancelled);
        }
        self.request_rx.close();
        while let Ok(op) = self.request_rx.try_recv() {
            if let LoaderOp::Load(request) = op {
                request.fail(LoadError::Cancelled);
            }
        }
    }
}
