//! Command and module registry.

use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use parking_lot::RwLock;
use tracing::info;

use crate::command::Command;
use crate::error::RegistryError;
use crate::module::BoxedModule;
use herald_core::CommandData;

#[derive(Default)]
struct RegistryInner {
    /// Keyed by lower-cased command name.
    commands: HashMap<String, Arc<Command>>,
    modules: Vec<BoxedModule>,
    module_commands: HashMap<String, Vec<String>>,
}

/// All registered commands, looked up by name without regard to case.
///
/// Registration takes `&self`, so a registry can be shared behind an `Arc`
/// with the dispatcher and still accept commands.
#[derive(Default)]
pub struct CommandRegistry {
    inner: RwLock<RegistryInner>,
}

impl CommandRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a command that belongs to no module.
    pub fn register_command(&self, command: Command) -> Result<Arc<Command>, RegistryError> {
        check_command(&command)?;
        let mut inner = self.inner.write();
        let key = command.name().to_lowercase();
        if inner.commands.contains_key(&key) {
            return Err(RegistryError::DuplicateCommand(command.name().to_string()));
        }

        let command = Arc::new(command);
        inner.commands.insert(key, Arc::clone(&command));
        info!(command = %command.name(), "Command registered");
        Ok(command)
    }

    /// Registers a module and all of its commands.
    ///
    /// Either every command is registered or, on error, none is.
    pub fn register_module(&self, module: BoxedModule) -> Result<(), RegistryError> {
        let name = module.name().to_string();
        let commands = module.commands();
        for command in &commands {
            check_command(command)?;
        }

        let mut inner = self.inner.write();
        if inner.module_commands.contains_key(&name) {
            return Err(RegistryError::DuplicateModule(name));
        }

        let mut seen = HashSet::new();
        for command in &commands {
            let key = command.name().to_lowercase();
            if inner.commands.contains_key(&key) || !seen.insert(key) {
                return Err(RegistryError::DuplicateCommand(command.name().to_string()));
            }
        }

        let names: Vec<String> = commands.iter().map(|c| c.name().to_string()).collect();
        for command in commands {
            inner
                .commands
                .insert(command.name().to_lowercase(), Arc::new(command));
        }
        info!(module = %name, commands = names.len(), "Module registered");
        inner.module_commands.insert(name, names);
        inner.modules.push(module);
        Ok(())
    }

    /// Looks up a command by name, ignoring case.
    pub fn get(&self, name: &str) -> Option<Arc<Command>> {
        self.inner.read().commands.get(&name.to_lowercase()).cloned()
    }

    /// All commands, sorted by name.
    pub fn commands(&self) -> Vec<Arc<Command>> {
        let mut commands: Vec<_> = self.inner.read().commands.values().cloned().collect();
        commands.sort_by(|a, b| a.name().cmp(b.name()));
        commands
    }

    /// Registered modules, in registration order.
    pub fn modules(&self) -> Vec<BoxedModule> {
        self.inner.read().modules.clone()
    }

    /// Names of the commands a module registered.
    pub fn module_commands(&self, module: &str) -> Option<Vec<String>> {
        self.inner.read().module_commands.get(module).cloned()
    }

    /// Registration payloads of every slash-capable command, sorted by name.
    pub fn slash_commands(&self) -> Vec<CommandData> {
        self.commands()
            .iter()
            .filter(|c| c.settings().supports_slash)
            .map(|c| c.data())
            .collect()
    }

    pub fn len(&self) -> usize {
        self.inner.read().commands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl std::fmt::Debug for CommandRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let inner = self.inner.read();
        f.debug_struct("CommandRegistry")
            .field("commands", &inner.commands.keys().collect::<Vec<_>>())
            .field("modules", &inner.module_commands.keys().collect::<Vec<_>>())
            .finish()
    }
}

fn check_command(command: &Command) -> Result<(), RegistryError> {
    command
        .validate()
        .map_err(|source| RegistryError::InvalidSchema {
            command: command.name().to_string(),
            source,
        })
}
