//! Query data-binding layer
//!
//! Binds a query signature (operation + normalized arguments) to a cached,
//! version-stamped result and drives the async request lifecycle against a
//! remote query service.

pub mod binding;
pub mod cache;
pub mod error;
pub mod executor;
pub mod key;
pub mod shapes;

pub use binding::QueryBinding;
pub use cache::{CacheEntry, QueryCache, QueryState};
pub use error::QueryError;
pub use executor::QueryExecutor;
pub use key::{ArgValue, QueryKey};
pub use shapes::{DetailArgs, ListArgs, ListResult};
