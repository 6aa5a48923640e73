//! Resolved command options.
//!
//! Both input channels end up here. An interaction carries these values as
//! the platform produced them; a text message gets them from the argument
//! resolution engine. Command logic reads them through [`OptionSet`] without
//! caring which channel the invocation came from.

use super::entity::{Channel, Member, Role, User};
use super::error::OptionError;
use super::schema::OptionKind;

/// The typed payload of one resolved option.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OptionValue {
    String(String),
    Integer(i64),
    /// An integer slot whose text had no leading integer.
    ///
    /// Only produced in lenient integer mode; the raw token is kept so that
    /// command logic can report it.
    UnparsedInteger(String),
    Boolean(bool),
    /// A user, with the guild membership when one was found.
    User {
        user: User,
        member: Option<Member>,
    },
    Role(Role),
    Channel(Channel),
    /// The options of a selected sub-command.
    SubCommand(Vec<ResolvedOption>),
}

impl OptionValue {
    /// Returns the kind tag of this value.
    pub fn kind(&self) -> OptionKind {
        match self {
            Self::String(_) => OptionKind::String,
            Self::Integer(_) | Self::UnparsedInteger(_) => OptionKind::Integer,
            Self::Boolean(_) => OptionKind::Boolean,
            Self::User { .. } => OptionKind::User,
            Self::Role(_) => OptionKind::Role,
            Self::Channel(_) => OptionKind::Channel,
            Self::SubCommand(_) => OptionKind::SubCommand,
        }
    }
}

/// A value keyed by the option name that produced it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedOption {
    pub name: String,
    pub value: OptionValue,
}

impl ResolvedOption {
    pub fn new(name: impl Into<String>, value: OptionValue) -> Self {
        Self {
            name: name.into(),
            value,
        }
    }

    pub fn kind(&self) -> OptionKind {
        self.value.kind()
    }
}

// ============================================================================
// OptionSet
// ============================================================================

/// Typed read access to the resolved options of one invocation.
///
/// When a sub-command was selected, lookups by name search the sub-command's
/// options, so handlers can write `options.string("name")` for grouped and
/// flat commands alike.
///
/// # Example
///
/// ```rust,ignore
/// match options.sub_command() {
///     Some("add") => add(options.require_string("name")?),
///     Some("remove") => remove(options.require_string("name")?),
///     _ => {}
/// }
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OptionSet {
    options: Vec<ResolvedOption>,
}

impl OptionSet {
    pub fn new(options: Vec<ResolvedOption>) -> Self {
        Self { options }
    }

    /// Returns the raw resolved list.
    pub fn as_slice(&self) -> &[ResolvedOption] {
        &self.options
    }

    pub fn into_inner(self) -> Vec<ResolvedOption> {
        self.options
    }

    pub fn is_empty(&self) -> bool {
        self.options.is_empty()
    }

    /// Returns the selected sub-command name, if any.
    pub fn sub_command(&self) -> Option<&str> {
        match self.options.as_slice() {
            [
                ResolvedOption {
                    name,
                    value: OptionValue::SubCommand(_),
                },
            ] => Some(name.as_str()),
            _ => None,
        }
    }

    /// The options lookups search: the sub-command's when one is selected.
    fn scope(&self) -> &[ResolvedOption] {
        match self.options.as_slice() {
            [
                ResolvedOption {
                    value: OptionValue::SubCommand(inner),
                    ..
                },
            ] => inner.as_slice(),
            other => other,
        }
    }

    /// Looks up a value by option name.
    pub fn get(&self, name: &str) -> Option<&OptionValue> {
        self.scope()
            .iter()
            .find(|o| o.name == name)
            .map(|o| &o.value)
    }

    pub fn string(&self, name: &str) -> Option<&str> {
        match self.get(name)? {
            OptionValue::String(s) => Some(s.as_str()),
            _ => None,
        }
    }

    /// Returns the integer value; `None` for unparsed integer tokens.
    pub fn integer(&self, name: &str) -> Option<i64> {
        match self.get(name)? {
            OptionValue::Integer(n) => Some(*n),
            _ => None,
        }
    }

    pub fn boolean(&self, name: &str) -> Option<bool> {
        match self.get(name)? {
            OptionValue::Boolean(b) => Some(*b),
            _ => None,
        }
    }

    pub fn user(&self, name: &str) -> Option<&User> {
        match self.get(name)? {
            OptionValue::User { user, .. } => Some(user),
            _ => None,
        }
    }

    pub fn member(&self, name: &str) -> Option<&Member> {
        match self.get(name)? {
            OptionValue::User { member, .. } => member.as_ref(),
            _ => None,
        }
    }

    pub fn role(&self, name: &str) -> Option<&Role> {
        match self.get(name)? {
            OptionValue::Role(role) => Some(role),
            _ => None,
        }
    }

    pub fn channel(&self, name: &str) -> Option<&Channel> {
        match self.get(name)? {
            OptionValue::Channel(channel) => Some(channel),
            _ => None,
        }
    }

    fn require(&self, name: &str) -> Result<&OptionValue, OptionError> {
        self.get(name)
            .ok_or_else(|| OptionError::Missing(name.to_string()))
    }

    fn wrong_kind(name: &str, expected: OptionKind, got: &OptionValue) -> OptionError {
        OptionError::WrongKind {
            name: name.to_string(),
            expected,
            got: got.kind(),
        }
    }

    pub fn require_string(&self, name: &str) -> Result<&str, OptionError> {
        match self.require(name)? {
            OptionValue::String(s) => Ok(s.as_str()),
            other => Err(Self::wrong_kind(name, OptionKind::String, other)),
        }
    }

    /// Like [`integer`](Self::integer), but an unparsed token is an error.
    pub fn require_integer(&self, name: &str) -> Result<i64, OptionError> {
        match self.require(name)? {
            OptionValue::Integer(n) => Ok(*n),
            OptionValue::UnparsedInteger(_) => Err(OptionError::WrongKind {
                name: name.to_string(),
                expected: OptionKind::Integer,
                got: OptionKind::String,
            }),
            other => Err(Self::wrong_kind(name, OptionKind::Integer, other)),
        }
    }

    pub fn require_boolean(&self, name: &str) -> Result<bool, OptionError> {
        match self.require(name)? {
            OptionValue::Boolean(b) => Ok(*b),
            other => Err(Self::wrong_kind(name, OptionKind::Boolean, other)),
        }
    }

    pub fn require_user(&self, name: &str) -> Result<&User, OptionError> {
        match self.require(name)? {
            OptionValue::User { user, .. } => Ok(user),
            other => Err(Self::wrong_kind(name, OptionKind::User, other)),
        }
    }

    pub fn require_role(&self, name: &str) -> Result<&Role, OptionError> {
        match self.require(name)? {
            OptionValue::Role(role) => Ok(role),
            other => Err(Self::wrong_kind(name, OptionKind::Role, other)),
        }
    }

    pub fn require_channel(&self, name: &str) -> Result<&Channel, OptionError> {
        match self.require(name)? {
            OptionValue::Channel(channel) => Ok(channel),
            other => Err(Self::wrong_kind(name, OptionKind::Channel, other)),
        }
    }
}

impl From<Vec<ResolvedOption>> for OptionSet {
    fn from(options: Vec<ResolvedOption>) -> Self {
        Self::new(options)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flat_lookup() {
        let set = OptionSet::new(vec![
            ResolvedOption::new("reason", OptionValue::String("spam".into())),
            ResolvedOption::new("days", OptionValue::Integer(7)),
            ResolvedOption::new(
                "user",
                OptionValue::User {
                    user: User::new(1, "alice"),
                    member: None,
                },
            ),
        ]);

        assert_eq!(set.sub_command(), None);
        assert_eq!(set.string("reason"), Some("spam"));
        assert_eq!(set.integer("days"), Some(7));
        assert_eq!(set.user("user").unwrap().name, "alice");
        assert!(set.member("user").is_none());
        assert!(set.string("days").is_none());
    }

    #[test]
    fn test_lookup_through_sub_command() {
        let set = OptionSet::new(vec![ResolvedOption::new(
            "add",
            OptionValue::SubCommand(vec![ResolvedOption::new(
                "name",
                OptionValue::String("rust".into()),
            )]),
        )]);

        assert_eq!(set.sub_command(), Some("add"));
        assert_eq!(set.string("name"), Some("rust"));
        assert_eq!(set.require_string("name"), Ok("rust"));
    }

    #[test]
    fn test_require_errors() {
        let set = OptionSet::new(vec![
            ResolvedOption::new("flag", OptionValue::Boolean(true)),
            ResolvedOption::new("count", OptionValue::UnparsedInteger("abc1".into())),
        ]);

        assert_eq!(
            set.require_string("missing"),
            Err(OptionError::Missing("missing".into()))
        );
        assert!(matches!(
            set.require_string("flag"),
            Err(OptionError::WrongKind {
                expected: OptionKind::String,
                got: OptionKind::Boolean,
                ..
            })
        ));
        assert!(set.integer("count").is_none());
        assert!(set.require_integer("count").is_err());
        assert_eq!(set.require_boolean("flag"), Ok(true));
    }
}
