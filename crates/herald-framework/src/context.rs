//! The unified invocation context.
//!
//! A command runs the same way whether it was invoked through a structured
//! interaction or a prefixed text message. [`Invocation`] hides the
//! difference: it exposes the invoking guild, channel, user and member, the
//! resolved [`OptionSet`], and one reply family whose behaviour is picked by
//! the [`Origin`] variant fixed at construction.
//!
//! - **Interaction**: replies go through the interaction transport. When the
//!   interaction was deferred, the first reply edits the deferred response.
//! - **Message**: replies are sent as new messages answering the invoking
//!   message (or edit a deferred placeholder for `long` + `force_long`
//!   commands). The first reply is tracked so it can be edited or deleted,
//!   and replies of non-public commands are deleted after a delay.

use std::fmt;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use parking_lot::Mutex;
use tracing::debug;

use crate::command::Command;
use herald_core::{
    ApiResult, BoxedInteractionTransport, BoxedMessageTransport, Channel, EntityResolver, Guild,
    Interaction, Member, Membership, Message, MessageRef, OptionSet, Reply, ResolvedOption,
    Snowflake, User,
};

/// How long replies of non-public commands stay visible by default.
pub const DEFAULT_REPLY_TTL: Duration = Duration::from_millis(5000);

/// Prefix of rejection replies.
pub const REJECT_PREFIX: &str = "Command rejected: ";

// =============================================================================
// Origin
// =============================================================================

/// An invocation that arrived as an interaction.
pub struct InteractionOrigin {
    interaction: Interaction,
    transport: BoxedInteractionTransport,
    deferred: bool,
}

impl InteractionOrigin {
    /// `deferred` records whether the interaction was already deferred.
    pub fn new(
        interaction: Interaction,
        transport: BoxedInteractionTransport,
        deferred: bool,
    ) -> Self {
        Self {
            interaction,
            transport,
            deferred,
        }
    }

    pub fn interaction(&self) -> &Interaction {
        &self.interaction
    }
}

/// An invocation that arrived as a prefixed text message.
pub struct MessageOrigin {
    message: Message,
    content: String,
    transport: BoxedMessageTransport,
    deferred: Option<MessageRef>,
}

impl MessageOrigin {
    /// `content` is the argument text following the command name;
    /// `deferred` is a placeholder message posted before the command ran.
    pub fn new(
        message: Message,
        content: impl Into<String>,
        transport: BoxedMessageTransport,
        deferred: Option<MessageRef>,
    ) -> Self {
        Self {
            message,
            content: content.into(),
            transport,
            deferred,
        }
    }

    pub fn message(&self) -> &Message {
        &self.message
    }
}

/// Where an invocation came from.
pub enum Origin {
    Interaction(InteractionOrigin),
    Message(MessageOrigin),
}

impl Origin {
    /// The argument text; `None` for interactions.
    pub fn content(&self) -> Option<&str> {
        match self {
            Self::Interaction(_) => None,
            Self::Message(origin) => Some(origin.content.as_str()),
        }
    }

    pub fn guild(&self) -> Option<&Guild> {
        match self {
            Self::Interaction(origin) => origin.interaction.guild.as_ref(),
            Self::Message(origin) => origin.message.guild.as_ref(),
        }
    }

    pub fn guild_id(&self) -> Option<Snowflake> {
        self.guild().map(|g| g.id)
    }

    pub fn channel(&self) -> &Channel {
        match self {
            Self::Interaction(origin) => &origin.interaction.channel,
            Self::Message(origin) => &origin.message.channel,
        }
    }

    pub fn user(&self) -> &User {
        match self {
            Self::Interaction(origin) => &origin.interaction.user,
            Self::Message(origin) => &origin.message.author,
        }
    }

    /// Message invocations are never deferred.
    pub fn is_deferred(&self) -> bool {
        match self {
            Self::Interaction(origin) => origin.deferred,
            Self::Message(_) => false,
        }
    }
}

impl fmt::Debug for Origin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Interaction(origin) => f
                .debug_struct("Interaction")
                .field("interaction", &origin.interaction)
                .field("deferred", &origin.deferred)
                .finish_non_exhaustive(),
            Self::Message(origin) => f
                .debug_struct("Message")
                .field("message", &origin.message)
                .field("content", &origin.content)
                .field("deferred", &origin.deferred)
                .finish_non_exhaustive(),
        }
    }
}

// =============================================================================
// Invocation
// =============================================================================

/// The context handed to command handlers.
///
/// # Example
///
/// ```rust,ignore
/// async fn kick(inv: Arc<Invocation>) -> Result<(), BoxError> {
///     let Some(member) = inv.member() else {
///         inv.reject("only usable in a server").await?;
///         return Ok(());
///     };
///     let target = inv.options().require_user("user")?;
///     inv.reply(format!("{} kicked {}", member.display_name(), target.name)).await?;
///     Ok(())
/// }
/// ```
pub struct Invocation {
    command: Arc<Command>,
    origin: Origin,
    member: Option<Member>,
    options: OptionSet,
    /// The first reply sent to a message invocation.
    initial_reply: Arc<Mutex<Option<MessageRef>>>,
    replied: AtomicBool,
    reply_ttl: Duration,
}

impl Invocation {
    /// Builds the context for a resolved invocation.
    ///
    /// A partial interaction membership is completed through `resolver`;
    /// when that lookup fails the member is absent.
    pub async fn new(
        command: Arc<Command>,
        origin: Origin,
        options: Vec<ResolvedOption>,
        resolver: &dyn EntityResolver,
    ) -> Self {
        let member = match &origin {
            Origin::Interaction(origin) => membership(&origin.interaction, resolver).await,
            Origin::Message(origin) => origin.message.member.clone(),
        };

        Self {
            command,
            origin,
            member,
            options: OptionSet::new(options),
            initial_reply: Arc::new(Mutex::new(None)),
            replied: AtomicBool::new(false),
            reply_ttl: DEFAULT_REPLY_TTL,
        }
    }

    /// Sets how long replies of non-public commands stay visible.
    pub fn with_reply_ttl(mut self, ttl: Duration) -> Self {
        self.reply_ttl = ttl;
        self
    }

    // ─── Accessors ────────────────────────────────────────────────────────────

    pub fn command(&self) -> &Arc<Command> {
        &self.command
    }

    pub fn origin(&self) -> &Origin {
        &self.origin
    }

    pub fn guild(&self) -> Option<&Guild> {
        self.origin.guild()
    }

    pub fn channel(&self) -> &Channel {
        self.origin.channel()
    }

    pub fn user(&self) -> &User {
        self.origin.user()
    }

    /// The invoking member; `None` outside a guild or when it could not be
    /// resolved.
    pub fn member(&self) -> Option<&Member> {
        self.member.as_ref()
    }

    pub fn options(&self) -> &OptionSet {
        &self.options
    }

    pub fn interaction(&self) -> Option<&Interaction> {
        match &self.origin {
            Origin::Interaction(origin) => Some(&origin.interaction),
            Origin::Message(_) => None,
        }
    }

    pub fn message(&self) -> Option<&Message> {
        match &self.origin {
            Origin::Interaction(_) => None,
            Origin::Message(origin) => Some(&origin.message),
        }
    }

    pub fn is_deferred(&self) -> bool {
        self.origin.is_deferred()
    }

    /// Returns `true` once any reply was sent.
    pub fn has_replied(&self) -> bool {
        self.replied.load(Ordering::SeqCst)
    }

    /// The tracked first reply to a message invocation.
    pub fn initial_reply(&self) -> Option<MessageRef> {
        *self.initial_reply.lock()
    }

    // ─── Replies ──────────────────────────────────────────────────────────────

    /// Sends the command's reply.
    pub async fn reply(&self, reply: impl Into<Reply>) -> ApiResult<()> {
        let reply = reply.into();
        match &self.origin {
            Origin::Interaction(origin) => {
                if origin.deferred {
                    origin.transport.edit_reply(&reply).await?;
                } else {
                    origin.transport.reply(&reply).await?;
                }
            }
            Origin::Message(origin) => {
                let settings = self.command.settings();
                let sent = match origin.deferred {
                    Some(placeholder) if settings.long && settings.force_long => {
                        origin.transport.edit(&placeholder, &reply).await?
                    }
                    _ => {
                        origin
                            .transport
                            .reply_to(&origin.message.reference(), &reply)
                            .await?
                    }
                };
                *self.initial_reply.lock() = Some(sent);
                if !settings.public {
                    self.schedule_delete(origin.transport.clone(), sent);
                }
            }
        }
        self.replied.store(true, Ordering::SeqCst);
        Ok(())
    }

    /// Edits the reply sent earlier.
    ///
    /// For message invocations without a tracked reply this does nothing.
    pub async fn edit_reply(&self, reply: impl Into<Reply>) -> ApiResult<()> {
        let reply = reply.into();
        match &self.origin {
            Origin::Interaction(origin) => origin.transport.edit_reply(&reply).await,
            Origin::Message(origin) => {
                let Some(current) = self.initial_reply() else {
                    debug!(command = %self.command.name(), "No reply to edit");
                    return Ok(());
                };
                let edited = origin.transport.edit(&current, &reply).await?;
                *self.initial_reply.lock() = Some(edited);
                Ok(())
            }
        }
    }

    /// Deletes the reply sent earlier.
    ///
    /// For message invocations the deferred placeholder is removed too when
    /// it is not the tracked reply itself.
    pub async fn delete_reply(&self) -> ApiResult<()> {
        match &self.origin {
            Origin::Interaction(origin) => origin.transport.delete_reply().await,
            Origin::Message(origin) => {
                let Some(current) = self.initial_reply.lock().take() else {
                    return Ok(());
                };
                if let Some(placeholder) = origin.deferred
                    && placeholder != current
                {
                    origin.transport.delete(&placeholder).await?;
                }
                origin.transport.delete(&current).await
            }
        }
    }

    /// Replies with `Command rejected: <reason>`.
    pub async fn reject(&self, reason: &str) -> ApiResult<()> {
        self.reject_with(Some(reason), Reply::default()).await
    }

    /// Rejects with an optional reason and extra payload (embeds, files).
    ///
    /// The payload's text content is replaced by the rejection line.
    pub async fn reject_with(&self, reason: Option<&str>, mut reply: Reply) -> ApiResult<()> {
        reply.content = reason.map(|reason| format!("{REJECT_PREFIX}{reason}"));
        self.reply(reply).await
    }

    fn schedule_delete(&self, transport: BoxedMessageTransport, message: MessageRef) {
        let tracked = Arc::clone(&self.initial_reply);
        let ttl = self.reply_ttl;
        tokio::spawn(async move {
            tokio::time::sleep(ttl).await;
            if let Err(e) = transport.delete(&message).await {
                debug!(message = %message.id, error = %e, "Failed to delete non-public reply");
            }
            let mut current = tracked.lock();
            if *current == Some(message) {
                *current = None;
            }
        });
    }
}

impl fmt::Debug for Invocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Invocation")
            .field("command", &self.command.name())
            .field("origin", &self.origin)
            .field("member", &self.member)
            .field("options", &self.options)
            .field("replied", &self.has_replied())
            .finish_non_exhaustive()
    }
}

async fn membership(interaction: &Interaction, resolver: &dyn EntityResolver) -> Option<Member> {
    match (&interaction.member, &interaction.guild) {
        (Some(Membership::Full(member)), _) => Some(member.clone()),
        (Some(Membership::Partial(id)), Some(guild)) => match resolver.member(guild.id, *id).await {
            Ok(member) => member,
            Err(e) => {
                debug!(user = %id, error = %e, "Failed to resolve interaction member");
                None
            }
        },
        _ => None,
    }
}
