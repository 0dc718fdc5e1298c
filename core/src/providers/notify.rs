//! Event notification contract.

use crate::context::Context;
use crate::error::Result;
use crate::types::NotifyArgs;
use async_trait::async_trait;

/// Receives asynchronous editing events.
#[async_trait]
pub trait NotifyProvider: Send + Sync {
    /// Handle one event.
    ///
    /// # Errors
    ///
    /// Any classified failure; the client is told the event was not accepted.
    async fn on_notify(&self, ctx: &Context, args: &NotifyArgs) -> Result<()>;
}
