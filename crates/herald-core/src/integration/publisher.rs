use async_trait::async_trait;

use crate::foundation::{ApiResult, CommandData};

/// Registers application commands with the remote platform.
///
/// Called once when the bot becomes ready, with every command that supports
/// slash invocation. Implementations replace the full command set.
#[async_trait]
pub trait CommandPublisher: Send + Sync {
    async fn publish(&self, commands: &[CommandData]) -> ApiResult<()>;
}
