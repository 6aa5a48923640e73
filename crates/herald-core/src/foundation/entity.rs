//! Platform entities referenced by commands.
//!
//! These are the shapes the [`EntityResolver`](crate::EntityResolver) hands
//! back and the shapes an [`Interaction`](crate::Interaction) or
//! [`Message`](crate::Message) carries. Adapters translate their wire models
//! into these types once, at the edge.

use std::fmt;
use std::num::ParseIntError;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

// ============================================================================
// Snowflake
// ============================================================================

/// A platform identifier.
///
/// Identifiers are opaque 64-bit integers. In text they appear as a run of
/// ASCII digits, either bare or inside a mention token.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Snowflake(pub u64);

impl Snowflake {
    /// Returns the raw integer value.
    pub fn get(self) -> u64 {
        self.0
    }
}

impl From<u64> for Snowflake {
    fn from(id: u64) -> Self {
        Self(id)
    }
}

impl FromStr for Snowflake {
    type Err = ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.parse().map(Self)
    }
}

impl fmt::Display for Snowflake {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

// ============================================================================
// Entities
// ============================================================================

/// A platform user, independent of any guild.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: Snowflake,
    pub name: String,
    #[serde(default)]
    pub bot: bool,
}

impl User {
    pub fn new(id: impl Into<Snowflake>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            bot: false,
        }
    }

    /// Returns the mention token for this user (`<@id>`).
    pub fn mention(&self) -> String {
        format!("<@{}>", self.id)
    }
}

/// A user's membership in one guild.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Member {
    pub guild_id: Snowflake,
    pub user: User,
    #[serde(default)]
    pub nick: Option<String>,
    #[serde(default)]
    pub roles: Vec<Snowflake>,
}

impl Member {
    pub fn new(guild_id: impl Into<Snowflake>, user: User) -> Self {
        Self {
            guild_id: guild_id.into(),
            user,
            nick: None,
            roles: Vec::new(),
        }
    }

    /// The name shown in the guild: the nickname if set, else the user name.
    pub fn display_name(&self) -> &str {
        self.nick.as_deref().unwrap_or(&self.user.name)
    }
}

/// Membership data as the platform delivered it with an interaction.
///
/// Some platforms attach a complete member record, others only a partial
/// shape that must be looked up again. The variant is decided by the adapter
/// when it builds the [`Interaction`](crate::Interaction).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Membership {
    /// Only the user id is known; a full lookup is required.
    Partial(Snowflake),
    /// The full member record is already available.
    Full(Member),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Role {
    pub id: Snowflake,
    pub guild_id: Snowflake,
    pub name: String,
}

impl Role {
    pub fn new(id: impl Into<Snowflake>, guild_id: impl Into<Snowflake>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            guild_id: guild_id.into(),
            name: name.into(),
        }
    }
}

/// The kind of a channel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChannelKind {
    #[default]
    Text,
    Direct,
    News,
    Thread,
    Voice,
    Other,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Channel {
    pub id: Snowflake,
    #[serde(default)]
    pub guild_id: Option<Snowflake>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub kind: ChannelKind,
}

impl Channel {
    /// Creates a text channel inside a guild.
    pub fn text(id: impl Into<Snowflake>, guild_id: impl Into<Snowflake>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            guild_id: Some(guild_id.into()),
            name: Some(name.into()),
            kind: ChannelKind::Text,
        }
    }

    /// Creates a direct-message channel.
    pub fn direct(id: impl Into<Snowflake>) -> Self {
        Self {
            id: id.into(),
            guild_id: None,
            name: None,
            kind: ChannelKind::Direct,
        }
    }

    pub fn is_direct(&self) -> bool {
        self.kind == ChannelKind::Direct
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Guild {
    pub id: Snowflake,
    pub name: String,
}

impl Guild {
    pub fn new(id: impl Into<Snowflake>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
        }
    }
}

/// A reference to a sent message, enough to edit or delete it later.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MessageRef {
    pub id: Snowflake,
    pub channel_id: Snowflake,
}

impl MessageRef {
    pub fn new(id: impl Into<Snowflake>, channel_id: impl Into<Snowflake>) -> Self {
        Self {
            id: id.into(),
            channel_id: channel_id.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_snowflake_from_str() {
        let id: Snowflake = "123456789012345678".parse().unwrap();
        assert_eq!(id.get(), 123456789012345678);
        assert_eq!(id.to_string(), "123456789012345678");
        assert!("12a".parse::<Snowflake>().is_err());
    }

    #[test]
    fn test_member_display_name() {
        let mut member = Member::new(1, User::new(2, "alice"));
        assert_eq!(member.display_name(), "alice");
        member.nick = Some("Al".into());
        assert_eq!(member.display_name(), "Al");
    }

    #[test]
    fn test_user_mention() {
        assert_eq!(User::new(42, "bob").mention(), "<@42>");
    }
}
