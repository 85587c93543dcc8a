use std::future::Future;
use std::sync::Arc;

use tokio_util::sync::CancellationToken;

use crate::config::Config;
use crate::error::{LoadError, ResolveError};
use crate::loader::LoaderOptions;
use crate::loaders::DataLoaders;
use crate::store::StoreHandle;

/// Everything a resolver may touch while serving one GraphQL operation.
///
/// Built by the transport layer when a request arrives and passed by reference through every
/// resolver. Its loaders (and their caches) die with it, so nothing leaks between requests.
pub struct RequestContext {
    pub loaders: DataLoaders,
    /// Direct, non-batched queries (paginated lists, aggregates).
    pub queries: StoreHandle,
    pub config: Arc<Config>,
    user_address: Option<String>,
    cancellation: CancellationToken,
}

impl RequestContext {
    /// Must be called from within a tokio runtime.
    pub fn new(store: StoreHandle, config: Arc<Config>) -> Self {
        Self::with_cancellation(store, config, CancellationToken::new())
    }

    /// Binds the request's loaders to `cancellation`, typically a child of the server's shutdown
    /// token or a per-request timeout.
    pub fn with_cancellation(
        store: StoreHandle,
        config: Arc<Config>,
        cancellation: CancellationToken,
    ) -> Self {
        Self {
            loaders: DataLoaders::new(
                store.clone(),
                LoaderOptions {
                    batch_delay: config.loader.batch_delay(),
                    cancellation: cancellation.clone(),
                },
            ),
            queries: store,
            config,
            user_address: None,
            cancellation,
        }
    }

    /// Sets the address of the signed-in user, as extracted by the session layer.
    pub fn with_user_address(mut self, address: impl Into<String>) -> Self {
        self.user_address = Some(address.into());
        self
    }

    /// The signed-in user's address, if any.
    pub fn authed_user_address(&self) -> Option<&str> {
        self.user_address.as_deref().filter(|a| !a.is_empty())
    }

    /// Abandons outstanding loads; every waiting resolver receives [`LoadError::Cancelled`].
    pub fn cancel(&self) {
        self.cancellation.cancel();
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancellation.is_cancelled()
    }

    /// Runs `fut` unless the request is cancelled first.
    pub async fn cancellable<F, T>(&self, fut: F) -> Result<T, ResolveError>
    where
        F: Future<Output = T>,
    {
        tokio::select! {
            biased;
            _ = self.cancellation.cancelled() => Err(ResolveError::Load(LoadError::Cancelled)),
            out = fut => Ok(out),
        }
    }
}
