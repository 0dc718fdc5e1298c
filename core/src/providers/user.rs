//! User lookup contract.

use crate::context::Context;
use crate::error::Result;
use crate::types::UserInfo;
use async_trait::async_trait;

/// Resolves user ids to display profiles.
#[async_trait]
pub trait UserProvider: Send + Sync {
    /// Resolve a batch of user ids.
    ///
    /// # Errors
    ///
    /// `UserNotExists` when an id cannot be resolved.
    async fn get_users(&self, ctx: &Context, user_ids: &[String]) -> Result<Vec<UserInfo>>;
}
