//! Incoming invocations.
//!
//! Adapters convert platform events into one of two shapes:
//!
//! - [`Interaction`]: a schema-validated command invocation. Options arrive
//!   already resolved.
//! - [`Message`]: a free-text message. Options are resolved by Herald from
//!   the message content.

use super::entity::{Channel, Guild, Member, Membership, MessageRef, Snowflake, User};
use super::options::ResolvedOption;

/// A structured command invocation delivered by the platform.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Interaction {
    pub id: Snowflake,
    /// The invoked command name.
    pub command_name: String,
    pub guild: Option<Guild>,
    pub channel: Channel,
    pub user: User,
    /// Membership as attached by the platform; `None` outside a guild.
    pub member: Option<Membership>,
    /// Options as resolved by the platform.
    pub options: Vec<ResolvedOption>,
}

/// A free-text chat message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Message {
    pub id: Snowflake,
    pub guild: Option<Guild>,
    pub channel: Channel,
    pub author: User,
    /// The author's membership; `None` in direct messages.
    pub member: Option<Member>,
    pub content: String,
}

impl Message {
    /// Returns a reference usable for replying to this message.
    pub fn reference(&self) -> MessageRef {
        MessageRef {
            id: self.id,
            channel_id: self.channel.id,
        }
    }
}
