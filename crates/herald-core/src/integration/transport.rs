//! Reply transport.
//!
//! Each invocation origin has its own primitives. Interactions reply through
//! the interaction itself (with a separate "defer" acknowledgement); text
//! messages reply by sending, editing and deleting ordinary messages.

use std::sync::Arc;

use async_trait::async_trait;

use crate::foundation::{ApiResult, MessageRef, Reply};

/// Reply primitives scoped to one interaction.
#[async_trait]
pub trait InteractionTransport: Send + Sync {
    /// Acknowledges the interaction; the response is sent later via
    /// [`edit_reply`](Self::edit_reply).
    async fn defer(&self, ephemeral: bool) -> ApiResult<()>;

    /// Sends the initial response.
    async fn reply(&self, reply: &Reply) -> ApiResult<()>;

    /// Edits the initial (or deferred) response.
    async fn edit_reply(&self, reply: &Reply) -> ApiResult<()>;

    /// Deletes the initial response.
    async fn delete_reply(&self) -> ApiResult<()>;
}

/// Message primitives scoped to the channel a message arrived in.
#[async_trait]
pub trait MessageTransport: Send + Sync {
    /// Replies to `message` and returns the sent message.
    async fn reply_to(&self, message: &MessageRef, reply: &Reply) -> ApiResult<MessageRef>;

    /// Edits a message previously sent by the bot.
    async fn edit(&self, message: &MessageRef, reply: &Reply) -> ApiResult<MessageRef>;

    /// Deletes a message previously sent by the bot.
    async fn delete(&self, message: &MessageRef) -> ApiResult<()>;
}

pub type BoxedInteractionTransport = Arc<dyn InteractionTransport>;
pub type BoxedMessageTransport = Arc<dyn MessageTransport>;
