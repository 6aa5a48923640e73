//! Mention grammar.
//!
//! Every pattern matches a whole token:
//!
//! | Token        | Meaning          |
//! |--------------|------------------|
//! | `<@id>`      | user             |
//! | `<@!id>`     | user (nickname)  |
//! | `<@&id>`     | role             |
//! | `<#id>`      | channel          |
//! | `id`         | bare id          |
//!
//! where `id` is one or more ASCII digits.

use std::sync::LazyLock;

use herald_core::Snowflake;
use regex::Regex;

static USER_MENTION: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^<@!?([0-9]+)>$").expect("valid user mention pattern"));
static ROLE_MENTION: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^<@&([0-9]+)>$").expect("valid role mention pattern"));
static CHANNEL_MENTION: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^<#([0-9]+)>$").expect("valid channel mention pattern"));

/// A mention token.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mention {
    User(Snowflake),
    Role(Snowflake),
    Channel(Snowflake),
}

impl Mention {
    /// Parses a whole token as a mention.
    ///
    /// Ids too large for a [`Snowflake`] do not parse.
    pub fn parse(token: &str) -> Option<Self> {
        if let Some(id) = capture_id(&USER_MENTION, token) {
            Some(Self::User(id))
        } else if let Some(id) = capture_id(&ROLE_MENTION, token) {
            Some(Self::Role(id))
        } else {
            capture_id(&CHANNEL_MENTION, token).map(Self::Channel)
        }
    }
}

fn capture_id(pattern: &Regex, token: &str) -> Option<Snowflake> {
    pattern.captures(token)?.get(1)?.as_str().parse().ok()
}

/// Parses a bare numeric id.
pub fn parse_id(token: &str) -> Option<Snowflake> {
    if token.is_empty() || !token.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    token.parse().ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_mentions() {
        assert_eq!(Mention::parse("<@42>"), Some(Mention::User(Snowflake(42))));
        assert_eq!(Mention::parse("<@!42>"), Some(Mention::User(Snowflake(42))));
    }

    #[test]
    fn test_role_and_channel_mentions() {
        assert_eq!(Mention::parse("<@&7>"), Some(Mention::Role(Snowflake(7))));
        assert_eq!(Mention::parse("<#9>"), Some(Mention::Channel(Snowflake(9))));
    }

    #[test]
    fn test_mentions_match_whole_token() {
        assert_eq!(Mention::parse("x<@42>"), None);
        assert_eq!(Mention::parse("<@42>!"), None);
        assert_eq!(Mention::parse("<@>"), None);
        assert_eq!(Mention::parse("<@abc>"), None);
        assert_eq!(Mention::parse("<@&>"), None);
    }

    #[test]
    fn test_bare_ids() {
        assert_eq!(parse_id("123"), Some(Snowflake(123)));
        assert_eq!(parse_id("-1"), None);
        assert_eq!(parse_id("12a"), None);
        assert_eq!(parse_id(""), None);
        assert_eq!(parse_id("99999999999999999999999"), None);
    }
}
