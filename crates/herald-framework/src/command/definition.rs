//! Command definitions.
//!
//! A [`Command`] couples an option schema with per-command settings and a
//! handler. Handlers are tower services over `Arc<Invocation>`; plain async
//! closures are wrapped in a [`HandlerService`] by [`Command::handler`].

use std::fmt;
use std::future::Future;
use std::sync::Arc;
use std::task::{Context, Poll};

use async_trait::async_trait;
use futures::FutureExt;
use futures::future::BoxFuture;
use tower::util::BoxCloneSyncService;
use tower::{BoxError, Service};

use crate::context::Invocation;
use herald_core::{CommandData, CommandOption, Reply, SchemaError, is_grouped, validate_options};

/// The type-erased handler service stored in a [`Command`].
pub type CommandService = BoxCloneSyncService<Arc<Invocation>, (), BoxError>;

// ============================================================================
// HandlerResponse
// ============================================================================

/// A value a handler can return.
///
/// Text and [`Reply`] values are sent as the command's reply. An `Err` is
/// handed back to the dispatcher, which reports it to the invoking user.
#[async_trait]
pub trait HandlerResponse: Send + 'static {
    async fn respond(self, invocation: &Invocation) -> Result<(), BoxError>;
}

#[async_trait]
impl HandlerResponse for () {
    async fn respond(self, _invocation: &Invocation) -> Result<(), BoxError> {
        Ok(())
    }
}

#[async_trait]
impl HandlerResponse for String {
    async fn respond(self, invocation: &Invocation) -> Result<(), BoxError> {
        invocation.reply(self).await?;
        Ok(())
    }
}

#[async_trait]
impl HandlerResponse for &'static str {
    async fn respond(self, invocation: &Invocation) -> Result<(), BoxError> {
        invocation.reply(self).await?;
        Ok(())
    }
}

#[async_trait]
impl HandlerResponse for Reply {
    async fn respond(self, invocation: &Invocation) -> Result<(), BoxError> {
        invocation.reply(self).await?;
        Ok(())
    }
}

#[async_trait]
impl<T: HandlerResponse> HandlerResponse for Option<T> {
    async fn respond(self, invocation: &Invocation) -> Result<(), BoxError> {
        match self {
            Some(inner) => inner.respond(invocation).await,
            None => Ok(()),
        }
    }
}

#[async_trait]
impl<T, E> HandlerResponse for Result<T, E>
where
    T: HandlerResponse,
    E: Into<BoxError> + Send + 'static,
{
    async fn respond(self, invocation: &Invocation) -> Result<(), BoxError> {
        match self {
            Ok(inner) => inner.respond(invocation).await,
            Err(err) => Err(err.into()),
        }
    }
}

// ============================================================================
// HandlerService
// ============================================================================

/// A tower [`Service`] that calls an async handler function.
///
/// ```rust,ignore
/// let svc = HandlerService::new(|inv: Arc<Invocation>| async move {
///     format!("Hello, {}!", inv.user().name)
/// });
/// ```
#[derive(Clone)]
pub struct HandlerService<F> {
    handler: F,
}

impl<F> HandlerService<F> {
    pub fn new(handler: F) -> Self {
        Self { handler }
    }
}

impl<F, Fut, R> Service<Arc<Invocation>> for HandlerService<F>
where
    F: Fn(Arc<Invocation>) -> Fut + Clone + Send + Sync + 'static,
    Fut: Future<Output = R> + Send + 'static,
    R: HandlerResponse,
{
    type Response = ();
    type Error = BoxError;
    type Future = BoxFuture<'static, Result<(), BoxError>>;

    fn poll_ready(&mut self, _cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        Poll::Ready(Ok(()))
    }

    fn call(&mut self, invocation: Arc<Invocation>) -> Self::Future {
        let response = (self.handler)(Arc::clone(&invocation));
        async move { response.await.respond(&invocation).await }.boxed()
    }
}

// ============================================================================
// Command
// ============================================================================

/// How a command is invoked and how it replies.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CommandSettings {
    /// Defer interactions before running the handler.
    pub long: bool,
    /// Replies are visible to everyone. Non-public message replies are
    /// deleted after a short delay and deferrals are ephemeral.
    pub public: bool,
    /// Reply to a message invocation by editing its deferred placeholder.
    pub force_long: bool,
    /// Offer the command as a slash command.
    pub supports_slash: bool,
    /// Accept the command from prefixed text messages.
    pub supports_message: bool,
}

impl Default for CommandSettings {
    fn default() -> Self {
        Self {
            long: true,
            public: true,
            force_long: false,
            supports_slash: true,
            supports_message: true,
        }
    }
}

/// A command: schema, settings and handler.
///
/// # Example
///
/// ```rust,ignore
/// let ban = Command::new("ban", "Ban a member")
///     .option(CommandOption::user("user", "Who to ban").required())
///     .option(CommandOption::string("reason", "Why").required())
///     .public(false)
///     .handler(|inv: Arc<Invocation>| async move {
///         let user = inv.options().require_user("user")?;
///         Ok::<_, BoxError>(format!("Banned {}", user.name))
///     });
/// ```
#[derive(Clone)]
pub struct Command {
    name: String,
    description: String,
    options: Vec<CommandOption>,
    settings: CommandSettings,
    grouped: bool,
    service: CommandService,
}

impl Command {
    /// Creates a command whose handler does nothing.
    pub fn new(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            options: Vec::new(),
            settings: CommandSettings::default(),
            grouped: false,
            service: BoxCloneSyncService::new(HandlerService::new(
                |_invocation: Arc<Invocation>| async {},
            )),
        }
    }

    /// Appends an option to the schema.
    pub fn option(mut self, option: CommandOption) -> Self {
        self.options.push(option);
        self.grouped = is_grouped(&self.options);
        self
    }

    /// Replaces the whole schema.
    pub fn with_options(mut self, options: Vec<CommandOption>) -> Self {
        self.grouped = is_grouped(&options);
        self.options = options;
        self
    }

    pub fn with_settings(mut self, settings: CommandSettings) -> Self {
        self.settings = settings;
        self
    }

    pub fn long(mut self, long: bool) -> Self {
        self.settings.long = long;
        self
    }

    pub fn public(mut self, public: bool) -> Self {
        self.settings.public = public;
        self
    }

    pub fn force_long(mut self, force_long: bool) -> Self {
        self.settings.force_long = force_long;
        self
    }

    pub fn slash(mut self, enabled: bool) -> Self {
        self.settings.supports_slash = enabled;
        self
    }

    pub fn message(mut self, enabled: bool) -> Self {
        self.settings.supports_message = enabled;
        self
    }

    /// Sets the handler to an async function.
    pub fn handler<F, Fut, R>(self, handler: F) -> Self
    where
        F: Fn(Arc<Invocation>) -> Fut + Clone + Send + Sync + 'static,
        Fut: Future<Output = R> + Send + 'static,
        R: HandlerResponse,
    {
        self.service(HandlerService::new(handler))
    }

    /// Sets the handler to an arbitrary tower service.
    ///
    /// Use this to stack tower layers (timeouts, rate limits, ...) in front
    /// of a handler.
    pub fn service<S>(mut self, service: S) -> Self
    where
        S: Service<Arc<Invocation>, Response = (), Error = BoxError>
            + Clone
            + Send
            + Sync
            + 'static,
        S::Future: Send + 'static,
    {
        self.service = BoxCloneSyncService::new(service);
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn options(&self) -> &[CommandOption] {
        &self.options
    }

    pub fn settings(&self) -> &CommandSettings {
        &self.settings
    }

    /// Returns `true` when the schema is made of sub-command groups.
    pub fn is_grouped(&self) -> bool {
        self.grouped
    }

    /// Checks the schema's structural rules.
    pub fn validate(&self) -> Result<(), SchemaError> {
        validate_options(&self.options)
    }

    /// Returns the registration payload for publishing.
    pub fn data(&self) -> CommandData {
        CommandData {
            name: self.name.clone(),
            description: self.description.clone(),
            options: self.options.clone(),
        }
    }

    pub(crate) fn handler_service(&self) -> CommandService {
        self.service.clone()
    }
}

impl fmt::Debug for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Command")
            .field("name", &self.name)
            .field("description", &self.description)
            .field("options", &self.options)
            .field("settings", &self.settings)
            .field("grouped", &self.grouped)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_settings() {
        let settings = Command::new("ping", "Ping").settings().to_owned();
        assert!(settings.long);
        assert!(settings.public);
        assert!(!settings.force_long);
        assert!(settings.supports_slash);
        assert!(settings.supports_message);
    }

    #[test]
    fn test_builder_flags() {
        let command = Command::new("ping", "Ping")
            .long(false)
            .public(false)
            .force_long(true)
            .slash(false)
            .message(true);
        assert_eq!(
            *command.settings(),
            CommandSettings {
                long: false,
                public: false,
                force_long: true,
                supports_slash: false,
                supports_message: true,
            }
        );
    }

    #[test]
    fn test_grouped_flag_tracks_schema() {
        let flat = Command::new("say", "Say").option(CommandOption::string("text", "Text"));
        assert!(!flat.is_grouped());

        let grouped = flat.with_options(vec![CommandOption::group("add", "Add", vec![])]);
        assert!(grouped.is_grouped());
        assert!(grouped.validate().is_ok());
    }

    #[test]
    fn test_data_serializes_for_publishing() {
        let command = Command::new("tag", "Tags").option(CommandOption::group(
            "add",
            "Add a tag",
            vec![CommandOption::string("name", "Tag name").required()],
        ));
        let json = serde_json::to_value(command.data()).unwrap();
        assert_eq!(json["name"], "tag");
        assert_eq!(json["options"][0]["type"], "SUB_COMMAND");
        assert_eq!(json["options"][0]["options"][0]["required"], true);
    }
}
