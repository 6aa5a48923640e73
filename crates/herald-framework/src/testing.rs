//! In-memory platform fakes for tests.
//!
//! [`MemoryResolver`] answers entity lookups from maps filled up front, and
//! [`RecordingTransport`] implements both transports by recording every call.

use std::collections::HashMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use async_trait::async_trait;
use parking_lot::Mutex;

use herald_core::{
    ApiError, ApiResult, Channel, CommandData, CommandPublisher, EntityResolver,
    InteractionTransport, Member, MessageRef, MessageTransport, Reply, Role, Snowflake, User,
};

// ============================================================================
// Resolver
// ============================================================================

/// An [`EntityResolver`] backed by in-memory maps.
#[derive(Debug, Default)]
pub struct MemoryResolver {
    users: HashMap<Snowflake, User>,
    members: HashMap<(Snowflake, Snowflake), Member>,
    roles: HashMap<(Snowflake, Snowflake), Role>,
    channels: HashMap<Snowflake, Channel>,
    fail_members: bool,
}

impl MemoryResolver {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_user(mut self, user: User) -> Self {
        self.users.insert(user.id, user);
        self
    }

    /// Adds a guild member; the member's user is known too.
    pub fn with_member(mut self, member: Member) -> Self {
        self.users.insert(member.user.id, member.user.clone());
        self.members.insert((member.guild_id, member.user.id), member);
        self
    }

    pub fn with_role(mut self, role: Role) -> Self {
        self.roles.insert((role.guild_id, role.id), role);
        self
    }

    pub fn with_channel(mut self, channel: Channel) -> Self {
        self.channels.insert(channel.id, channel);
        self
    }

    /// Makes every member lookup fail with an API error.
    pub fn fail_member_lookups(mut self) -> Self {
        self.fail_members = true;
        self
    }

    pub fn into_arc(self) -> Arc<Self> {
        Arc::new(self)
    }
}

#[async_trait]
impl EntityResolver for MemoryResolver {
    async fn member(&self, guild: Snowflake, id: Snowflake) -> ApiResult<Option<Member>> {
        if self.fail_members {
            return Err(ApiError::Api {
                code: 10007,
                message: "Unknown Member".into(),
            });
        }
        Ok(self.members.get(&(guild, id)).cloned())
    }

    async fn user(&self, id: Snowflake) -> ApiResult<Option<User>> {
        Ok(self.users.get(&id).cloned())
    }

    async fn role(&self, guild: Snowflake, id: Snowflake) -> ApiResult<Option<Role>> {
        Ok(self.roles.get(&(guild, id)).cloned())
    }

    async fn channel(&self, guild: Snowflake, id: Snowflake) -> ApiResult<Option<Channel>> {
        Ok(self
            .channels
            .get(&id)
            .filter(|c| c.guild_id == Some(guild))
            .cloned())
    }
}

// ============================================================================
// Transports
// ============================================================================

/// One recorded transport call.
#[derive(Debug, Clone, PartialEq)]
pub enum TransportCall {
    Defer { ephemeral: bool },
    Reply(Reply),
    EditReply(Reply),
    DeleteReply,
    ReplyTo {
        to: MessageRef,
        reply: Reply,
        sent: MessageRef,
    },
    Edit { message: MessageRef, reply: Reply },
    Delete(MessageRef),
}

/// Records every call made through either transport trait.
///
/// Messages sent with [`MessageTransport::reply_to`] get ids counting up from
/// 1000 in the channel of the message they answer.
#[derive(Debug)]
pub struct RecordingTransport {
    calls: Mutex<Vec<TransportCall>>,
    next_id: AtomicU64,
}

impl Default for RecordingTransport {
    fn default() -> Self {
        Self {
            calls: Mutex::new(Vec::new()),
            next_id: AtomicU64::new(1000),
        }
    }
}

impl RecordingTransport {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn calls(&self) -> Vec<TransportCall> {
        self.calls.lock().clone()
    }

    /// Text content of every reply and edit, in call order.
    pub fn texts(&self) -> Vec<String> {
        self.calls
            .lock()
            .iter()
            .filter_map(|call| match call {
                TransportCall::Reply(reply)
                | TransportCall::EditReply(reply)
                | TransportCall::ReplyTo { reply, .. }
                | TransportCall::Edit { reply, .. } => reply.content.clone(),
                _ => None,
            })
            .collect()
    }

    fn record(&self, call: TransportCall) {
        self.calls.lock().push(call);
    }
}

#[async_trait]
impl InteractionTransport for RecordingTransport {
    async fn defer(&self, ephemeral: bool) -> ApiResult<()> {
        self.record(TransportCall::Defer { ephemeral });
        Ok(())
    }

    async fn reply(&self, reply: &Reply) -> ApiResult<()> {
        self.record(TransportCall::Reply(reply.clone()));
        Ok(())
    }

    async fn edit_reply(&self, reply: &Reply) -> ApiResult<()> {
        self.record(TransportCall::EditReply(reply.clone()));
        Ok(())
    }

    async fn delete_reply(&self) -> ApiResult<()> {
        self.record(TransportCall::DeleteReply);
        Ok(())
    }
}

#[async_trait]
impl MessageTransport for RecordingTransport {
    async fn reply_to(&self, message: &MessageRef, reply: &Reply) -> ApiResult<MessageRef> {
        let sent = MessageRef::new(
            self.next_id.fetch_add(1, Ordering::Relaxed),
            message.channel_id,
        );
        self.record(TransportCall::ReplyTo {
            to: *message,
            reply: reply.clone(),
            sent,
        });
        Ok(sent)
    }

    async fn edit(&self, message: &MessageRef, reply: &Reply) -> ApiResult<MessageRef> {
        self.record(TransportCall::Edit {
            message: *message,
            reply: reply.clone(),
        });
        Ok(*message)
    }

    async fn delete(&self, message: &MessageRef) -> ApiResult<()> {
        self.record(TransportCall::Delete(*message));
        Ok(())
    }
}

// ============================================================================
// Publisher
// ============================================================================

/// Records every published batch of command schemas.
#[derive(Debug, Default)]
pub struct RecordingPublisher {
    published: Mutex<Vec<Vec<CommandData>>>,
}

impl RecordingPublisher {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn published(&self) -> Vec<Vec<CommandData>> {
        self.published.lock().clone()
    }
}

#[async_trait]
impl CommandPublisher for RecordingPublisher {
    async fn publish(&self, commands: &[CommandData]) -> ApiResult<()> {
        self.published.lock().push(commands.to_vec());
        Ok(())
    }
}
