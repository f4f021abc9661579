//! External query execution collaborator.

use async_trait::async_trait;
use serde_json::Value;

use crate::error::QueryError;
use crate::key::QueryKey;

/// Executes query operations against the remote service.
///
/// Implementations own the transport (HTTP, gateway client, a test double).
/// The binding layer assumes each call is idempotent for identical arguments
/// and cancellable by ignoring its result: superseded replies are discarded
/// on arrival via version stamping, no explicit cancel is issued. There is
/// no timeout policy at this layer either; a hung call leaves the entry
/// `Pending` until the transport gives up.
///
/// # Example
///
/// ```ignore
/// struct GatewayExecutor { client: GatewayClient }
///
/// #[async_trait]
/// impl QueryExecutor for GatewayExecutor {
///     async fn execute(&self, key: &QueryKey) -> Result<Value, QueryError> {
///         self.client
///             .run(key.operation(), key.args())
///             .await
///             .map_err(|e| QueryError::transport(e.to_string()))
///     }
/// }
/// ```
#[async_trait]
pub trait QueryExecutor: Send + Sync {
    /// Executes the keyed operation and returns the raw response payload.
    async fn execute(&self, key: &QueryKey) -> Result<Value, QueryError>;
}
