//! Batched GraphQL resolvers over an indexed blockchain governance dataset.
//!
//! The generic [`Loader`] coalesces every `load` issued during one execution frame into a single
//! [`BatchFunction`] call and memoizes the outcome per key for the rest of the request. The domain
//! loaders in [`loaders`] bind it to the governance store, and [`resolvers`] implement the field
//! rules on top, taking an explicit per-request [`RequestContext`].

mod batch_function;
mod cache;
pub mod config;
pub mod connection;
mod context;
pub mod error;
mod loader;
mod loader_op;
mod loader_worker;
pub mod loaders;
pub mod models;
pub mod resolvers;
pub mod store;
#[cfg(feature = "stats")]
mod worker_stats;

pub use batch_function::{BatchFunction, BatchOutcome};
pub use config::Config;
pub use connection::{Connection, Edge, PageInfo, Paginated, PaginationInfo};
pub use context::RequestContext;
pub use error::{LoadError, LoadResult, ResolveError, ResolveResult, StoreError};
pub use loader::{Loader, LoaderOptions, DEFAULT_BATCH_DELAY};
pub use loaders::DataLoaders;
pub use store::{GovernanceStore, StoreHandle};
pub use tokio_util::sync::CancellationToken;
