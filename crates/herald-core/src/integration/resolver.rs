//! Entity lookup.

use std::sync::Arc;

use async_trait::async_trait;

use crate::foundation::{ApiResult, Channel, Member, Role, Snowflake, User};

/// Looks up entities referenced by mention tokens or raw identifiers.
///
/// Every lookup reports absence as `Ok(None)`. An `Err` means the lookup
/// itself failed (network, permissions); the argument resolution engine
/// treats both as "not found", but logs the error.
///
/// # Example Implementation
///
/// ```rust,ignore
/// #[async_trait]
/// impl EntityResolver for MyPlatform {
///     async fn user(&self, id: Snowflake) -> ApiResult<Option<User>> {
///         self.http.get_user(id).await.map(Some).or_else(not_found_as_none)
///     }
///     // ...
/// }
/// ```
#[async_trait]
pub trait EntityResolver: Send + Sync {
    /// Looks up a guild member.
    async fn member(&self, guild: Snowflake, id: Snowflake) -> ApiResult<Option<Member>>;

    /// Looks up a user directly, without guild context.
    async fn user(&self, id: Snowflake) -> ApiResult<Option<User>>;

    /// Looks up a role of a guild.
    async fn role(&self, guild: Snowflake, id: Snowflake) -> ApiResult<Option<Role>>;

    /// Looks up a channel of a guild.
    async fn channel(&self, guild: Snowflake, id: Snowflake) -> ApiResult<Option<Channel>>;
}

/// A shared entity resolver.
pub type BoxedResolver = Arc<dyn EntityResolver>;
