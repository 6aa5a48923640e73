//! Command option schemas.
//!
//! A command declares the arguments it accepts as an ordered list of
//! [`CommandOption`]s. The list is either *flat* (plain options only) or
//! *grouped* (every top-level entry is a [`OptionKind::SubCommand`] carrying
//! its own option list). Only one level of nesting exists.
//!
//! ```rust,ignore
//! use herald_core::CommandOption;
//!
//! let ban = vec![
//!     CommandOption::user("user", "Who to ban").required(),
//!     CommandOption::string("reason", "Why").required(),
//! ];
//!
//! let tags = vec![
//!     CommandOption::group("add", "Add a tag", vec![CommandOption::string("name", "Tag").required()]),
//!     CommandOption::group("remove", "Remove a tag", vec![CommandOption::string("name", "Tag").required()]),
//! ];
//! ```

use std::collections::HashSet;
use std::fmt;

use serde::{Deserialize, Serialize};

use super::error::SchemaError;

// ============================================================================
// Option Kind
// ============================================================================

/// The type tag of an option.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OptionKind {
    SubCommand,
    String,
    Integer,
    Boolean,
    User,
    Channel,
    Role,
}

impl OptionKind {
    /// Returns the canonical upper-case name (e.g. `"SUB_COMMAND"`).
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::SubCommand => "SUB_COMMAND",
            Self::String => "STRING",
            Self::Integer => "INTEGER",
            Self::Boolean => "BOOLEAN",
            Self::User => "USER",
            Self::Channel => "CHANNEL",
            Self::Role => "ROLE",
        }
    }
}

impl fmt::Display for OptionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ============================================================================
// Option Descriptor
// ============================================================================

/// One allowed value of a string option.
///
/// The user types `name`; the command receives `value`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OptionChoice {
    pub name: String,
    pub value: String,
}

/// A single slot in a command schema.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommandOption {
    /// Option name, unique within its enclosing list.
    pub name: String,
    /// Human readable description.
    pub description: String,
    /// The type tag.
    #[serde(rename = "type")]
    pub kind: OptionKind,
    /// Whether the option must be supplied. Ignored for sub-commands.
    #[serde(default)]
    pub required: bool,
    /// Allowed values (string options only).
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub choices: Vec<OptionChoice>,
    /// Nested options (sub-commands only).
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub options: Vec<CommandOption>,
}

impl CommandOption {
    /// Creates an optional option of the given kind.
    pub fn new(name: impl Into<String>, description: impl Into<String>, kind: OptionKind) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            kind,
            required: false,
            choices: Vec::new(),
            options: Vec::new(),
        }
    }

    pub fn string(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self::new(name, description, OptionKind::String)
    }

    pub fn integer(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self::new(name, description, OptionKind::Integer)
    }

    pub fn boolean(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self::new(name, description, OptionKind::Boolean)
    }

    pub fn user(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self::new(name, description, OptionKind::User)
    }

    pub fn role(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self::new(name, description, OptionKind::Role)
    }

    pub fn channel(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self::new(name, description, OptionKind::Channel)
    }

    /// Creates a sub-command group with its own option list.
    pub fn group(
        name: impl Into<String>,
        description: impl Into<String>,
        options: Vec<CommandOption>,
    ) -> Self {
        Self {
            options,
            ..Self::new(name, description, OptionKind::SubCommand)
        }
    }

    /// Marks the option as required.
    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    /// Adds an allowed value.
    pub fn choice(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.choices.push(OptionChoice {
            name: name.into(),
            value: value.into(),
        });
        self
    }

    pub fn is_group(&self) -> bool {
        self.kind == OptionKind::SubCommand
    }

    /// Finds the choice whose name matches `input`, ignoring case.
    pub fn find_choice(&self, input: &str) -> Option<&OptionChoice> {
        self.choices
            .iter()
            .find(|c| c.name.eq_ignore_ascii_case(input))
    }
}

/// The registration payload of one command.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommandData {
    pub name: String,
    pub description: String,
    #[serde(default)]
    pub options: Vec<CommandOption>,
}

// ============================================================================
// Schema Helpers
// ============================================================================

/// Returns `true` if any top-level option is a sub-command.
pub fn is_grouped(options: &[CommandOption]) -> bool {
    options.iter().any(CommandOption::is_group)
}

/// Finds a sub-command by name, ignoring case.
pub fn find_group<'a>(options: &'a [CommandOption], name: &str) -> Option<&'a CommandOption> {
    options
        .iter()
        .find(|o| o.is_group() && o.name.eq_ignore_ascii_case(name))
}

/// Checks the structural rules of a schema.
///
/// Rules: no mixing of sub-commands and plain options, no nested
/// sub-commands, unique names per list, choices only on string options.
pub fn validate_options(options: &[CommandOption]) -> Result<(), SchemaError> {
    let grouped = is_grouped(options);
    if grouped && options.iter().any(|o| !o.is_group()) {
        return Err(SchemaError::MixedGroups);
    }

    validate_list(options)?;

    if grouped {
        for group in options {
            if is_grouped(&group.options) {
                return Err(SchemaError::NestedGroup(group.name.clone()));
            }
            validate_list(&group.options)?;
        }
    }

    Ok(())
}

fn validate_list(options: &[CommandOption]) -> Result<(), SchemaError> {
    let mut seen = HashSet::new();
    for opt in options {
        if !seen.insert(opt.name.to_lowercase()) {
            return Err(SchemaError::DuplicateName(opt.name.clone()));
        }
        if !opt.choices.is_empty() && opt.kind != OptionKind::String {
            return Err(SchemaError::ChoicesOnNonString {
                name: opt.name.clone(),
                kind: opt.kind,
            });
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tags() -> Vec<CommandOption> {
        vec![
            CommandOption::group(
                "add",
                "Add a tag",
                vec![CommandOption::string("name", "Tag name").required()],
            ),
            CommandOption::group("list", "List tags", vec![]),
        ]
    }

    #[test]
    fn test_grouped_lists_and_lookup() {
        let flat = vec![
            CommandOption::user("user", "Target").required(),
            CommandOption::string("reason", "Reason"),
        ];
        assert!(!is_grouped(&flat));
        assert!(find_group(&flat, "user").is_none());

        let opts = tags();
        assert!(is_grouped(&opts));
        assert_eq!(find_group(&opts, "ADD").unwrap().options.len(), 1);
        assert!(find_group(&opts, "list").unwrap().options.is_empty());
    }

    #[test]
    fn test_find_choice_ignores_case() {
        let opt = CommandOption::string("color", "Color")
            .choice("red", "#f00")
            .choice("blue", "#00f");
        assert_eq!(opt.find_choice("RED").unwrap().value, "#f00");
        assert!(opt.find_choice("green").is_none());
    }

    #[test]
    fn test_validate_rejects_mixed() {
        let mut opts = tags();
        opts.push(CommandOption::string("oops", "Plain"));
        assert_eq!(validate_options(&opts), Err(SchemaError::MixedGroups));
    }

    #[test]
    fn test_validate_rejects_nested_group() {
        let opts = vec![CommandOption::group(
            "outer",
            "Outer",
            vec![CommandOption::group("inner", "Inner", vec![])],
        )];
        assert_eq!(
            validate_options(&opts),
            Err(SchemaError::NestedGroup("outer".into()))
        );
    }

    #[test]
    fn test_validate_rejects_duplicates_and_bad_choices() {
        let dup = vec![
            CommandOption::string("name", "A"),
            CommandOption::string("Name", "B"),
        ];
        assert_eq!(
            validate_options(&dup),
            Err(SchemaError::DuplicateName("Name".into()))
        );

        let bad = vec![CommandOption::integer("n", "N").choice("one", "1")];
        assert!(matches!(
            validate_options(&bad),
            Err(SchemaError::ChoicesOnNonString { .. })
        ));

        assert!(validate_options(&tags()).is_ok());
    }

    #[test]
    fn test_option_serializes_with_type_tag() {
        let opt = CommandOption::boolean("silent", "Silent").required();
        let json = serde_json::to_value(&opt).unwrap();
        assert_eq!(json["type"], "BOOLEAN");
        assert_eq!(json["required"], true);
        assert!(json.get("choices").is_none());
    }
}
