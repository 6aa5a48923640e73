//! Command dispatcher.
//!
//! The [`Dispatcher`] is the boundary between platform events and command
//! handlers. For each incoming invocation it:
//!
//! 1. finds the command in the [`CommandRegistry`] (skipping commands that do
//!    not accept the invocation's channel);
//! 2. defers long interactions, or resolves message text into options;
//! 3. builds the [`Invocation`] and calls the command's handler service;
//! 4. reports argument and handler errors back through the invocation's
//!    reply channel.
//!
//! ```rust,ignore
//! let dispatcher = Dispatcher::new(registry, resolver, DispatchSettings::default());
//!
//! match dispatcher.dispatch_message(message, transport, None).await {
//!     DispatchOutcome::Ignored => { /* not a command */ }
//!     outcome => debug!(?outcome, "Command processed"),
//! }
//! ```

use std::sync::Arc;
use std::time::Duration;

use tower::ServiceExt;
use tracing::{Instrument, Level, debug, error, span, warn};

use crate::command::{ArgumentResolver, Command, DEFAULT_PREFIX, IntegerMode, split_invocation};
use crate::context::{DEFAULT_REPLY_TTL, InteractionOrigin, Invocation, MessageOrigin, Origin};
use crate::registry::CommandRegistry;
use herald_core::{
    BoxedInteractionTransport, BoxedMessageTransport, BoxedResolver, Interaction, Message,
    MessageRef, ResolvedOption,
};

/// Dispatch-wide settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DispatchSettings {
    /// Prefix of text commands.
    pub prefix: String,
    pub integer_mode: IntegerMode,
    /// How long replies of non-public commands stay visible.
    pub ephemeral_reply_ttl: Duration,
}

impl Default for DispatchSettings {
    fn default() -> Self {
        Self {
            prefix: DEFAULT_PREFIX.to_string(),
            integer_mode: IntegerMode::default(),
            ephemeral_reply_ttl: DEFAULT_REPLY_TTL,
        }
    }
}

/// What became of one incoming event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DispatchOutcome {
    /// Not a command this dispatcher handles.
    Ignored,
    /// The handler ran to completion.
    Handled,
    /// Argument resolution rejected the invocation.
    Rejected,
    /// Deferring failed or the handler returned an error.
    Failed,
}

/// Routes interactions and messages to command handlers.
#[derive(Clone)]
pub struct Dispatcher {
    registry: Arc<CommandRegistry>,
    resolver: BoxedResolver,
    arguments: ArgumentResolver,
    settings: DispatchSettings,
}

impl Dispatcher {
    pub fn new(
        registry: Arc<CommandRegistry>,
        resolver: BoxedResolver,
        settings: DispatchSettings,
    ) -> Self {
        let arguments = ArgumentResolver::new(Arc::clone(&resolver))
            .prefix(settings.prefix.clone())
            .integer_mode(settings.integer_mode);
        Self {
            registry,
            resolver,
            arguments,
            settings,
        }
    }

    pub fn registry(&self) -> &Arc<CommandRegistry> {
        &self.registry
    }

    pub fn settings(&self) -> &DispatchSettings {
        &self.settings
    }

    /// Handles a structured interaction.
    pub async fn dispatch_interaction(
        &self,
        interaction: Interaction,
        transport: BoxedInteractionTransport,
    ) -> DispatchOutcome {
        let span = span!(Level::DEBUG, "dispatch", command = %interaction.command_name);
        async move {
            let Some(command) = self.registry.get(&interaction.command_name) else {
                debug!("Unknown command");
                return DispatchOutcome::Ignored;
            };
            let settings = *command.settings();
            if !settings.supports_slash {
                debug!("Command does not accept interactions");
                return DispatchOutcome::Ignored;
            }

            if settings.long
                && let Err(e) = transport.defer(!settings.public).await
            {
                error!(error = %e, "Failed to defer interaction");
                return DispatchOutcome::Failed;
            }

            let options = interaction.options.clone();
            let origin = Origin::Interaction(InteractionOrigin::new(
                interaction,
                transport,
                settings.long,
            ));
            let invocation = self.invocation(command, origin, options).await;
            self.run(Arc::new(invocation)).await
        }
        .instrument(span)
        .await
    }

    /// Handles a free-text message.
    ///
    /// `deferred` is a placeholder message the platform posted before the
    /// command ran, if any.
    pub async fn dispatch_message(
        &self,
        message: Message,
        transport: BoxedMessageTransport,
        deferred: Option<MessageRef>,
    ) -> DispatchOutcome {
        let Some((name, args)) = split_invocation(&message.content, &self.settings.prefix) else {
            return DispatchOutcome::Ignored;
        };
        let Some(command) = self.registry.get(name) else {
            debug!(command = %name, "Unknown command");
            return DispatchOutcome::Ignored;
        };
        if !command.settings().supports_message {
            debug!(command = %name, "Command does not accept messages");
            return DispatchOutcome::Ignored;
        }

        let span = span!(Level::DEBUG, "dispatch", command = %command.name());
        let args = args.to_string();
        async move {
            let origin = Origin::Message(MessageOrigin::new(message, args, transport, deferred));
            match self.arguments.resolve_origin(&command, &origin).await {
                Ok(options) => {
                    let invocation = self.invocation(command, origin, options).await;
                    self.run(Arc::new(invocation)).await
                }
                Err(err) => {
                    warn!(kind = ?err.kind(), error = %err.message(), "Argument resolution failed");
                    let invocation = self.invocation(command, origin, Vec::new()).await;
                    report(&invocation, &err.to_string()).await;
                    DispatchOutcome::Rejected
                }
            }
        }
        .instrument(span)
        .await
    }

    async fn invocation(
        &self,
        command: Arc<Command>,
        origin: Origin,
        options: Vec<ResolvedOption>,
    ) -> Invocation {
        Invocation::new(command, origin, options, self.resolver.as_ref())
            .await
            .with_reply_ttl(self.settings.ephemeral_reply_ttl)
    }

    async fn run(&self, invocation: Arc<Invocation>) -> DispatchOutcome {
        let service = invocation.command().handler_service();
        match service.oneshot(Arc::clone(&invocation)).await {
            Ok(()) => {
                debug!("Command handled");
                DispatchOutcome::Handled
            }
            Err(e) => {
                error!(error = %e, "Command handler failed");
                report(&invocation, &e.to_string()).await;
                DispatchOutcome::Failed
            }
        }
    }
}

impl std::fmt::Debug for Dispatcher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Dispatcher")
            .field("registry", &self.registry)
            .field("settings", &self.settings)
            .finish_non_exhaustive()
    }
}

/// Shows an error to the invoking user, editing the existing reply if one
/// was already sent and is still there.
async fn report(invocation: &Invocation, text: &str) {
    let editable = invocation.has_replied()
        && (invocation.interaction().is_some() || invocation.initial_reply().is_some());
    let result = if editable {
        invocation.edit_reply(text).await
    } else {
        invocation.reply(text).await
    };
    if let Err(e) = result {
        error!(error = %e, "Failed to report command error");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{MemoryResolver, RecordingTransport, TransportCall};
    use herald_core::{
        Channel, CommandOption, Guild, Member, Membership, OptionValue, Reply, Snowflake, User,
    };
    use parking_lot::Mutex;
    use tower::BoxError;

    fn dispatcher(commands: Vec<Command>) -> Dispatcher {
        let registry = Arc::new(CommandRegistry::new());
        for command in commands {
            registry.register_command(command).unwrap();
        }
        let resolver = MemoryResolver::new()
            .with_member(Member::new(1, User::new(10, "alice")))
            .with_member(Member::new(1, User::new(11, "bob")));
        Dispatcher::new(registry, resolver.into_arc(), DispatchSettings::default())
    }

    fn message(content: &str) -> Message {
        Message {
            id: Snowflake(500),
            guild: Some(Guild::new(1, "guild")),
            channel: Channel::text(2, 1, "general"),
            author: User::new(10, "alice"),
            member: Some(Member::new(1, User::new(10, "alice"))),
            content: content.to_string(),
        }
    }

    fn interaction(name: &str, options: Vec<ResolvedOption>) -> Interaction {
        Interaction {
            id: Snowflake(900),
            command_name: name.to_string(),
            guild: Some(Guild::new(1, "guild")),
            channel: Channel::text(2, 1, "general"),
            user: User::new(10, "alice"),
            member: Some(Membership::Partial(Snowflake(10))),
            options,
        }
    }

    fn ban_command() -> Command {
        Command::new("ban", "Ban a member")
            .option(CommandOption::user("user", "Who").required())
            .option(CommandOption::string("reason", "Why").required())
            .handler(|inv: Arc<Invocation>| async move {
                let user = inv.options().require_user("user")?;
                let reason = inv.options().require_string("reason")?;
                Ok::<_, BoxError>(format!("Banned {} for {reason}", user.name))
            })
    }

    #[tokio::test]
    async fn test_message_round_trip() {
        let dispatcher = dispatcher(vec![ban_command()]);
        let transport = RecordingTransport::new();

        let outcome = dispatcher
            .dispatch_message(message("!BAN <@11> spamming links"), transport.clone(), None)
            .await;

        assert_eq!(outcome, DispatchOutcome::Handled);
        assert_eq!(transport.texts(), vec!["Banned bob for spamming links".to_string()]);
    }

    #[tokio::test]
    async fn test_non_commands_are_ignored() {
        let dispatcher = dispatcher(vec![ban_command(), Command::new("hidden", "Slash only").message(false)]);
        let transport = RecordingTransport::new();

        for content in ["hello", "!unknown", "!hidden"] {
            let outcome = dispatcher
                .dispatch_message(message(content), transport.clone(), None)
                .await;
            assert_eq!(outcome, DispatchOutcome::Ignored, "content {content}");
        }
        assert!(transport.calls().is_empty());
    }

    #[tokio::test]
    async fn test_parse_error_is_reported() {
        let dispatcher = dispatcher(vec![ban_command()]);
        let transport = RecordingTransport::new();

        let outcome = dispatcher
            .dispatch_message(message("!ban <@11>"), transport.clone(), None)
            .await;

        assert_eq!(outcome, DispatchOutcome::Rejected);
        assert_eq!(
            transport.texts(),
            vec!["Not enough arguments\n\n!ban <user (@user/id)> <reason>".to_string()]
        );
    }

    #[tokio::test]
    async fn test_handler_error_edits_existing_reply() {
        let command = Command::new("fail", "Fails").handler(|inv: Arc<Invocation>| async move {
            inv.reply("working...").await?;
            Err::<(), BoxError>("boom".into())
        });
        let dispatcher = dispatcher(vec![command]);
        let transport = RecordingTransport::new();

        let outcome = dispatcher
            .dispatch_message(message("!fail"), transport.clone(), None)
            .await;

        assert_eq!(outcome, DispatchOutcome::Failed);
        let calls = transport.calls();
        assert_eq!(calls.len(), 2);
        assert!(matches!(
            &calls[1],
            TransportCall::Edit { reply, .. } if reply.content.as_deref() == Some("boom")
        ));
    }

    #[tokio::test(start_paused = true)]
    async fn test_handler_error_after_reply_expired_sends_fresh_reply() {
        let command = Command::new("slow", "Slow")
            .public(false)
            .handler(|inv: Arc<Invocation>| async move {
                inv.reply("working").await?;
                tokio::time::sleep(std::time::Duration::from_secs(6)).await;
                Err::<(), BoxError>("boom".into())
            });
        let dispatcher = dispatcher(vec![command]);
        let transport = RecordingTransport::new();

        let outcome = dispatcher
            .dispatch_message(message("!slow"), transport.clone(), None)
            .await;

        assert_eq!(outcome, DispatchOutcome::Failed);
        assert_eq!(
            transport.texts(),
            vec!["working".to_string(), "boom".to_string()]
        );
        let calls = transport.calls();
        assert!(matches!(calls[1], TransportCall::Delete(_)));
        assert!(matches!(
            &calls[2],
            TransportCall::ReplyTo { reply, .. } if reply.content.as_deref() == Some("boom")
        ));
    }

    #[tokio::test]
    async fn test_interaction_is_deferred_and_bypasses_parsing() {
        let seen = Arc::new(Mutex::new(None));
        let captured = Arc::clone(&seen);
        let command = Command::new("echo", "Echo")
            .option(CommandOption::string("text", "Text").required())
            .public(false)
            .handler(move |inv: Arc<Invocation>| {
                let captured = Arc::clone(&captured);
                async move {
                    *captured.lock() = inv.member().map(|m| m.user.name.clone());
                    inv.options().string("text").map(str::to_string)
                }
            });
        let dispatcher = dispatcher(vec![command]);
        let transport = RecordingTransport::new();

        let outcome = dispatcher
            .dispatch_interaction(
                interaction(
                    "echo",
                    vec![ResolvedOption::new("text", OptionValue::String("a b  c".into()))],
                ),
                transport.clone(),
            )
            .await;

        assert_eq!(outcome, DispatchOutcome::Handled);
        assert_eq!(seen.lock().as_deref(), Some("alice"));
        assert_eq!(
            transport.calls(),
            vec![
                TransportCall::Defer { ephemeral: true },
                TransportCall::EditReply(Reply::text("a b  c")),
            ]
        );
    }

    #[tokio::test]
    async fn test_short_interaction_replies_directly() {
        let command = Command::new("ping", "Ping")
            .long(false)
            .handler(|_inv: Arc<Invocation>| async { "pong" });
        let dispatcher = dispatcher(vec![command, Command::new("text", "Text only").slash(false)]);
        let transport = RecordingTransport::new();

        let outcome = dispatcher
            .dispatch_interaction(interaction("ping", Vec::new()), transport.clone())
            .await;
        assert_eq!(outcome, DispatchOutcome::Handled);
        assert_eq!(transport.calls(), vec![TransportCall::Reply(Reply::text("pong"))]);

        let outcome = dispatcher
            .dispatch_interaction(interaction("text", Vec::new()), transport.clone())
            .await;
        assert_eq!(outcome, DispatchOutcome::Ignored);
    }

    #[tokio::test]
    async fn test_grouped_message_command() {
        let command = Command::new("tag", "Tags")
            .option(CommandOption::group(
                "add",
                "Add",
                vec![CommandOption::string("name", "Name").required()],
            ))
            .option(CommandOption::group("list", "List", vec![]))
            .handler(|inv: Arc<Invocation>| async move {
                match inv.options().sub_command() {
                    Some("add") => format!("added {}", inv.options().string("name").unwrap_or("?")),
                    Some(other) => other.to_string(),
                    None => "none".to_string(),
                }
            });
        let dispatcher = dispatcher(vec![command]);
        let transport = RecordingTransport::new();

        dispatcher
            .dispatch_message(message("!tag add rust"), transport.clone(), None)
            .await;
        dispatcher
            .dispatch_message(message("!tag LIST"), transport.clone(), None)
            .await;

        assert_eq!(
            transport.texts(),
            vec!["added rust".to_string(), "list".to_string()]
        );
    }
}
