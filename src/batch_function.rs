use async_trait::async_trait;

use crate::error::LoadError;

/// Per-key results of one batch, or a failure of the batch as a whole.
pub type BatchOutcome<K, V> = Result<Vec<(K, Result<V, LoadError>)>, LoadError>;

/// A `BatchFunction` defines the method through which some `Loader` may fetch
/// batched data from some resource. The `BatchFunction` receives a sorted, deduplicated slice of
/// keys that have been requested during the `Loader`'s most recent execution frame, and some user
/// defined context struct (usually a handle to the data store).
///
/// The BatchFunction is not required to return a result for all keys that were provided. It can
/// return any set of loaded key value pairs, in any order it chooses. Requesters of keys whose
/// values are not returned will receive `Ok(None)`.
///
/// A per-key `Err` is delivered only to requesters of that key. Returning `Err` for the whole
/// batch records that error against every key of the batch, and no other key.
///
/// Multiple `BatchFunctions` (and therefore loaders) can share the same context (likely through an
/// `Arc`).
#[async_trait]
pub trait BatchFunction<K, V> {
    type Context;
    async fn load(keys: &[K], context: &Self::Context) -> BatchOutcome<K, V>;
}
