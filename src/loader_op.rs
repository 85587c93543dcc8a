use std::slice;

use tokio::sync::oneshot;

use crate::error::{LoadError, LoadResult};

/// Set of possible requests that can be sent to the [`LoaderWorker`](crate::loader_worker::LoaderWorker).
///
/// The three main categories of commands are Load, Prime, and Clear; each of which has a single
/// and many variant for convenience.
#[derive(Debug)]
pub enum LoaderOp<K, V> {
    /// Fetch data from the resource wrapped by this data loader (or the cache).
    Load(LoadRequest<K, V>),
    /// Add values to the cache that were fetched from elsewhere.
    Prime(K, V),
    PrimeMany(Vec<(K, V)>),
    /// Remove values from the cache so that they will be reloaded when they are next requested.
    Clear(K),
    ClearMany(Vec<K>),
    /// Execute the staged batch now instead of waiting for the end of the execution frame.
    Flush,
}

#[derive(Debug)]
pub enum LoadRequest<K, V> {
    One(K, oneshot::Sender<LoadResult<V>>),
    Many(Vec<K>, oneshot::Sender<Vec<LoadResult<V>>>),
}

impl<K, V> LoadRequest<K, V>
where
    V: Send + Clone + std::fmt::Debug,
{
    pub fn keys(&self) -> &[K] {
        match self {
            LoadRequest::One(ref key, _) => slice::from_ref(key),
            LoadRequest::Many(ref keys, _) => keys,
        }
    }

    /// Answers the request with one cache entry per requested key.
    ///
    /// A key without an entry is answered as not found.
    pub fn send_response<'a, I>(self, entries: I)
    where
        I: IntoIterator<Item = Option<&'a LoadResult<V>>>,
        V: 'a,
    {
        let resolve = |entry: Option<&LoadResult<V>>| entry.cloned().unwrap_or(Ok(None));
        match self {
            LoadRequest::One(_, response_tx) => {
                let response = entries.into_iter().next().map(resolve).unwrap_or(Ok(None));
                if let Err(e) = response_tx.send(response) {
                    tracing::debug!(?e, "receiver dropped");
                }
            }
            LoadRequest::Many(_, response_tx) => {
                let response = entries.into_iter().map(resolve).collect::<Vec<_>>();
                if let Err(e) = response_tx.send(response) {
                    tracing::debug!(?e, "receiver dropped");
                }
            }
        }
    }

    /// Answers every key of the request with `error`.
    pub fn fail(self, error: LoadError) {
        match self {
            LoadRequest::One(_, response_tx) => {
                if let Err(e) = response_tx.send(Err(error)) {
                    tracing::debug!(?e, "receiver dropped");
                }
            }
            LoadRequest::Many(keys, response_tx) => {
                if let Err(e) = response_tx.send(vec![Err(error); keys.len()]) {
                    tracing::debug!(?e, "receiver dropped");
                }
            }
        }
    }
}
