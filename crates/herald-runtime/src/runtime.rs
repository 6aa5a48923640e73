//! Runtime orchestration.
//!
//! [`HeraldRuntime`] ties configuration, logging, the command registry and
//! the dispatcher together. The platform integration feeds it events and
//! calls [`HeraldRuntime::ready`] once its connection is up.
//!
//! ```rust,ignore
//! use herald_runtime::HeraldRuntime;
//!
//! let runtime = HeraldRuntime::builder()
//!     .resolver(resolver)
//!     .module(Moderation)
//!     .build()?;
//!
//! runtime.ready(&*publisher).await?;
//! runtime.handle_message(message, transport, None).await;
//! ```

use std::path::PathBuf;
use std::sync::Arc;

use tracing::{Instrument, Level, debug, info, span};

use crate::config::{ConfigLoader, HeraldConfig, validate_config};
use crate::error::{RuntimeError, RuntimeResult};
use crate::logging;
use herald_core::{
    BoxedInteractionTransport, BoxedMessageTransport, BoxedResolver, CommandPublisher,
    Interaction, Message, MessageRef,
};
use herald_framework::{
    BoxedModule, Command, CommandRegistry, DispatchOutcome, Dispatcher, Module,
};

/// Owns the command registry and routes platform events to it.
pub struct HeraldRuntime {
    config: HeraldConfig,
    registry: Arc<CommandRegistry>,
    dispatcher: Dispatcher,
}

impl HeraldRuntime {
    pub fn builder() -> RuntimeBuilder {
        RuntimeBuilder::new()
    }

    /// Creates a runtime from an already loaded configuration and
    /// initializes logging from it.
    ///
    /// The configuration is validated first, so one built in code gets the
    /// same checks as one read from files.
    pub fn from_config(config: &HeraldConfig, resolver: BoxedResolver) -> RuntimeResult<Self> {
        validate_config(config)?;
        logging::init_from_config(&config.logging);
        Ok(Self::with_config(config.clone(), resolver))
    }

    /// Loads the configuration from the default locations, then behaves
    /// like [`from_config`](Self::from_config).
    pub fn load(resolver: BoxedResolver) -> RuntimeResult<Self> {
        let config = ConfigLoader::new().load()?;
        Self::from_config(&config, resolver)
    }

    fn with_config(config: HeraldConfig, resolver: BoxedResolver) -> Self {
        let registry = Arc::new(CommandRegistry::new());
        let dispatcher = Dispatcher::new(
            Arc::clone(&registry),
            resolver,
            config.commands.dispatch_settings(),
        );

        info!(
            prefix = %config.commands.prefix,
            integer_mode = ?config.commands.integer_mode,
            log_level = %config.logging.level,
            "Runtime initialized"
        );

        Self {
            config,
            registry,
            dispatcher,
        }
    }

    pub fn config(&self) -> &HeraldConfig {
        &self.config
    }

    pub fn registry(&self) -> &Arc<CommandRegistry> {
        &self.registry
    }

    pub fn dispatcher(&self) -> &Dispatcher {
        &self.dispatcher
    }

    pub fn register_module(&self, module: impl Module) -> RuntimeResult<()> {
        self.registry.register_module(Arc::new(module))?;
        Ok(())
    }

    pub fn register_command(&self, command: Command) -> RuntimeResult<()> {
        self.registry.register_command(command)?;
        Ok(())
    }

    /// Publishes slash-capable commands (when `publish_on_ready` is set),
    /// then runs every module's `ready` hook in registration order.
    pub async fn ready(&self, publisher: &dyn CommandPublisher) -> RuntimeResult<()> {
        let span = span!(Level::DEBUG, "ready");
        async move {
            if self.config.commands.publish_on_ready {
                let commands = self.registry.slash_commands();
                publisher.publish(&commands).await?;
                info!(count = commands.len(), "Slash commands published");
            } else {
                debug!("Publishing on ready is disabled");
            }

            for module in self.registry.modules() {
                debug!(module = %module.name(), "Running ready hook");
                module.ready().await;
            }
            Ok(())
        }
        .instrument(span)
        .await
    }

    pub async fn handle_interaction(
        &self,
        interaction: Interaction,
        transport: BoxedInteractionTransport,
    ) -> DispatchOutcome {
        self.dispatcher
            .dispatch_interaction(interaction, transport)
            .await
    }

    /// `deferred` is a placeholder message already posted for this
    /// invocation, if any.
    pub async fn handle_message(
        &self,
        message: Message,
        transport: BoxedMessageTransport,
        deferred: Option<MessageRef>,
    ) -> DispatchOutcome {
        self.dispatcher
            .dispatch_message(message, transport, deferred)
            .await
    }
}

impl std::fmt::Debug for HeraldRuntime {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HeraldRuntime")
            .field("config", &self.config)
            .field("registry", &self.registry)
            .finish_non_exhaustive()
    }
}

// =============================================================================
// RuntimeBuilder
// =============================================================================

/// Builder for [`HeraldRuntime`].
///
/// Without an explicit [`config`](Self::config) the configuration is loaded
/// with [`ConfigLoader`], honoring [`config_file`](Self::config_file) and
/// [`profile`](Self::profile).
#[derive(Default)]
pub struct RuntimeBuilder {
    config: Option<HeraldConfig>,
    config_file: Option<PathBuf>,
    profile: Option<String>,
    resolver: Option<BoxedResolver>,
    modules: Vec<BoxedModule>,
    commands: Vec<Command>,
    init_logging: bool,
}

impl RuntimeBuilder {
    pub fn new() -> Self {
        Self {
            init_logging: true,
            ..Default::default()
        }
    }

    pub fn config(mut self, config: HeraldConfig) -> Self {
        self.config = Some(config);
        self
    }

    pub fn config_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.config_file = Some(path.into());
        self
    }

    pub fn profile(mut self, profile: impl Into<String>) -> Self {
        self.profile = Some(profile.into());
        self
    }

    /// Sets the platform's entity resolver. Required.
    pub fn resolver(mut self, resolver: BoxedResolver) -> Self {
        self.resolver = Some(resolver);
        self
    }

    pub fn module(mut self, module: impl Module) -> Self {
        self.modules.push(Arc::new(module));
        self
    }

    pub fn command(mut self, command: Command) -> Self {
        self.commands.push(command);
        self
    }

    /// Leaves the global tracing subscriber alone.
    pub fn without_logging(mut self) -> Self {
        self.init_logging = false;
        self
    }

    pub fn build(self) -> RuntimeResult<HeraldRuntime> {
        let resolver = self.resolver.ok_or(RuntimeError::MissingResolver)?;

        let config = match self.config {
            Some(config) => {
                validate_config(&config)?;
                config
            }
            None => {
                let mut loader = ConfigLoader::new();
                if let Some(profile) = &self.profile {
                    loader = loader.profile(profile);
                }
                if let Some(path) = &self.config_file {
                    loader = loader.file(path);
                }
                loader.load()?
            }
        };

        if self.init_logging {
            logging::init_from_config(&config.logging);
        }

        let runtime = HeraldRuntime::with_config(config, resolver);
        for module in self.modules {
            runtime.registry.register_module(module)?;
        }
        for command in self.commands {
            runtime.registry.register_command(command)?;
        }
        Ok(runtime)
    }
}
