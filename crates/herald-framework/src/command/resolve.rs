//! Argument resolution engine.
//!
//! Turns the free text of a message invocation into the same resolved option
//! list an interaction would carry. Tokens are consumed left to right by a
//! small state machine whose state is an explicit [`Cursor`] value:
//!
//! 1. an open greedy capture swallows every token up to the last one;
//! 2. an open quoted capture swallows tokens until one ends with `"`;
//! 3. at position zero of a grouped schema, a token naming a group selects it;
//! 4. otherwise the token is classified against the slot at the cursor.
//!
//! Mentioned entities are looked up through the platform
//! [`EntityResolver`](herald_core::EntityResolver).

use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};
use tracing::debug;

use herald_core::{
    ApiResult, BoxedResolver, CommandOption, OptionKind, OptionValue, ResolvedOption, Snowflake,
    find_group, is_grouped,
};

use super::mention::{Mention, parse_id};
use super::split::split_tokens;
use super::usage::format_usage;
use super::Command;
use crate::context::Origin;
use crate::error::{ParseError, ParseErrorKind, ParseResult};

static STRICT_INTEGER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^-?[0-9]+(\.[0-9]+)?$").expect("valid integer pattern"));

/// Default command prefix.
pub const DEFAULT_PREFIX: &str = "!";

/// How tokens for INTEGER slots are accepted.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IntegerMode {
    /// Any token containing a digit is accepted and parsed by its leading
    /// integer. A token without one becomes [`OptionValue::UnparsedInteger`].
    #[default]
    Lenient,
    /// Only `-?digits(.digits)?` fitting an `i64` is accepted; the fraction
    /// is dropped.
    Strict,
}

// ============================================================================
// ArgumentResolver
// ============================================================================

/// Resolves message text against command schemas.
///
/// Cheap to clone; every call keeps its own parse state, so one resolver can
/// serve any number of concurrent invocations.
///
/// # Example
///
/// ```rust,ignore
/// let arguments = ArgumentResolver::new(resolver).integer_mode(IntegerMode::Strict);
/// let options = arguments
///     .resolve("ban", &schema, "<@42> spamming links", Some(guild_id))
///     .await?;
/// ```
#[derive(Clone)]
pub struct ArgumentResolver {
    entities: BoxedResolver,
    prefix: String,
    integer_mode: IntegerMode,
}

impl ArgumentResolver {
    pub fn new(entities: BoxedResolver) -> Self {
        Self {
            entities,
            prefix: DEFAULT_PREFIX.to_string(),
            integer_mode: IntegerMode::default(),
        }
    }

    /// Sets the prefix shown in usage hints.
    pub fn prefix(mut self, prefix: impl Into<String>) -> Self {
        self.prefix = prefix.into();
        self
    }

    pub fn integer_mode(mut self, mode: IntegerMode) -> Self {
        self.integer_mode = mode;
        self
    }

    /// Resolves `text` against the option list of `command`.
    ///
    /// `guild` scopes member, role and channel lookups; without one those
    /// lookups find nothing and only plain user lookups succeed.
    pub async fn resolve(
        &self,
        command: &str,
        options: &[CommandOption],
        text: &str,
        guild: Option<Snowflake>,
    ) -> ParseResult<Vec<ResolvedOption>> {
        let parse = Parse {
            resolver: self,
            command,
            root: options,
            guild,
        };

        let tokens = split_tokens(text);
        let mut cursor = Cursor::default();
        for (index, token) in tokens.iter().enumerate() {
            let more = index + 1 < tokens.len();
            cursor = parse.step(cursor, token, more).await?;
        }
        parse.finish(cursor)
    }

    /// Resolves the text of a message invocation for `command`.
    ///
    /// Interactions carry no text and fail with
    /// [`ParseErrorKind::NotMessageBased`].
    pub async fn resolve_origin(
        &self,
        command: &Command,
        origin: &Origin,
    ) -> ParseResult<Vec<ResolvedOption>> {
        let Some(text) = origin.content() else {
            return Err(ParseError::not_message_based());
        };
        self.resolve(command.name(), command.options(), text, origin.guild_id())
            .await
    }

    fn parse_integer(&self, token: &str) -> Option<OptionValue> {
        match self.integer_mode {
            IntegerMode::Lenient => {
                if !token.bytes().any(|b| b.is_ascii_digit()) {
                    return None;
                }
                Some(match leading_integer(token) {
                    Some(n) => OptionValue::Integer(n),
                    None => OptionValue::UnparsedInteger(token.to_string()),
                })
            }
            IntegerMode::Strict => {
                if !STRICT_INTEGER.is_match(token) {
                    return None;
                }
                let whole = token.split('.').next()?;
                whole.parse().ok().map(OptionValue::Integer)
            }
        }
    }
}

impl std::fmt::Debug for ArgumentResolver {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ArgumentResolver")
            .field("prefix", &self.prefix)
            .field("integer_mode", &self.integer_mode)
            .finish_non_exhaustive()
    }
}

/// Parses the leading integer of a token (`"12abc"` is 12).
fn leading_integer(token: &str) -> Option<i64> {
    let (negative, digits) = match token.as_bytes().first() {
        Some(b'-') => (true, &token[1..]),
        Some(b'+') => (false, &token[1..]),
        _ => (false, token),
    };
    let end = digits
        .bytes()
        .position(|b| !b.is_ascii_digit())
        .unwrap_or(digits.len());
    if end == 0 {
        return None;
    }
    let magnitude = &digits[..end];
    if negative {
        format!("-{magnitude}").parse().ok()
    } else {
        magnitude.parse().ok()
    }
}

// ============================================================================
// Parse state
// ============================================================================

/// A multi-token STRING value being assembled.
#[derive(Debug, Default)]
enum Capture {
    #[default]
    None,
    /// Opened by a token starting with `"`, closed by one ending with `"`.
    Quoted { name: String, text: String },
    /// Opened on the last slot while tokens remain; closed by the last token.
    Greedy { name: String, text: String },
}

/// Where the parse stands between two tokens.
#[derive(Debug, Default)]
struct Cursor<'a> {
    /// Index of the next slot to fill in the active list.
    index: usize,
    /// The selected group, if any.
    group: Option<&'a CommandOption>,
    capture: Capture,
    resolved: Vec<ResolvedOption>,
}

impl<'a> Cursor<'a> {
    /// The active slot list: the group's options once one is selected.
    fn slots(&self, root: &'a [CommandOption]) -> &'a [CommandOption] {
        match self.group {
            Some(group) => &group.options,
            None => root,
        }
    }

    fn fill(&mut self, name: &str, value: OptionValue) {
        self.resolved.push(ResolvedOption::new(name, value));
        self.index += 1;
    }

    fn close(&mut self, name: String, text: String) {
        self.resolved
            .push(ResolvedOption::new(name, OptionValue::String(text)));
        self.index += 1;
    }
}

/// What classifying one token produced.
enum Outcome {
    Value(OptionValue),
    Open(Capture),
}

/// One resolution call.
struct Parse<'a> {
    resolver: &'a ArgumentResolver,
    command: &'a str,
    root: &'a [CommandOption],
    guild: Option<Snowflake>,
}

impl<'a> Parse<'a> {
    async fn step(&self, mut cursor: Cursor<'a>, token: &str, more: bool) -> ParseResult<Cursor<'a>> {
        match std::mem::take(&mut cursor.capture) {
            Capture::Greedy { name, mut text } => {
                text.push(' ');
                text.push_str(token);
                if more {
                    cursor.capture = Capture::Greedy { name, text };
                } else {
                    cursor.close(name, text);
                }
                return Ok(cursor);
            }
            Capture::Quoted { name, mut text } => {
                text.push(' ');
                match token.strip_suffix('"') {
                    Some(head) => {
                        text.push_str(head);
                        cursor.close(name, text);
                    }
                    None => {
                        text.push_str(token);
                        cursor.capture = Capture::Quoted { name, text };
                    }
                }
                return Ok(cursor);
            }
            Capture::None => {}
        }

        if cursor.index == 0
            && cursor.group.is_none()
            && let Some(group) = find_group(self.root, token)
        {
            cursor.group = Some(group);
            return Ok(cursor);
        }

        let slots = cursor.slots(self.root);
        let Some(slot) = slots.get(cursor.index) else {
            return Err(self.fail(
                &cursor,
                ParseErrorKind::TooManyArguments,
                "Too many arguments",
            ));
        };

        match self.classify(&cursor, slot, token, more).await? {
            Outcome::Value(value) => cursor.fill(&slot.name, value),
            Outcome::Open(capture) => cursor.capture = capture,
        }
        Ok(cursor)
    }

    async fn classify(
        &self,
        cursor: &Cursor<'a>,
        slot: &CommandOption,
        token: &str,
        more: bool,
    ) -> ParseResult<Outcome> {
        let target = match (Mention::parse(token), slot.kind) {
            (Some(Mention::User(id)), OptionKind::User) => Some(Mention::User(id)),
            (Some(mention @ (Mention::Role(_) | Mention::Channel(_))), _) => Some(mention),
            (None, OptionKind::User) => parse_id(token).map(Mention::User),
            (None, OptionKind::Role) => parse_id(token).map(Mention::Role),
            (None, OptionKind::Channel) => parse_id(token).map(Mention::Channel),
            _ => None,
        };
        if let Some(target) = target {
            return self.lookup(cursor, slot, token, target).await.map(Outcome::Value);
        }

        if slot.kind == OptionKind::Integer
            && let Some(value) = self.resolver.parse_integer(token)
        {
            return Ok(Outcome::Value(value));
        }

        match slot.kind {
            OptionKind::String => self.string(cursor, slot, token, more),
            OptionKind::Boolean => {
                let truthy = matches!(token.to_ascii_lowercase().as_str(), "yes" | "true" | "y");
                Ok(Outcome::Value(OptionValue::Boolean(truthy)))
            }
            OptionKind::SubCommand => {
                let groups: Vec<&str> = cursor
                    .slots(self.root)
                    .iter()
                    .map(|o| o.name.as_str())
                    .collect();
                Err(self.fail(
                    cursor,
                    ParseErrorKind::TypeMismatch,
                    format!("Unknown sub-command {token}, expected one of {}", groups.join(", ")),
                ))
            }
            other => Err(self.fail(
                cursor,
                ParseErrorKind::TypeMismatch,
                format!("Incorrect value type for {other}"),
            )),
        }
    }

    fn string(
        &self,
        cursor: &Cursor<'a>,
        slot: &CommandOption,
        token: &str,
        more: bool,
    ) -> ParseResult<Outcome> {
        let last_slot = cursor.index + 1 >= cursor.slots(self.root).len();
        if last_slot && more {
            return Ok(Outcome::Open(Capture::Greedy {
                name: slot.name.clone(),
                text: token.to_string(),
            }));
        }

        if let Some(rest) = token.strip_prefix('"') {
            return Ok(match rest.strip_suffix('"') {
                Some(inner) => Outcome::Value(OptionValue::String(inner.to_string())),
                None => Outcome::Open(Capture::Quoted {
                    name: slot.name.clone(),
                    text: rest.to_string(),
                }),
            });
        }

        if slot.choices.is_empty() {
            return Ok(Outcome::Value(OptionValue::String(token.to_string())));
        }

        match slot.find_choice(token) {
            Some(choice) => Ok(Outcome::Value(OptionValue::String(choice.value.clone()))),
            None => {
                let names: Vec<String> = slot
                    .choices
                    .iter()
                    .map(|c| c.name.to_lowercase())
                    .collect();
                Err(self.fail(
                    cursor,
                    ParseErrorKind::InvalidChoice,
                    format!(
                        "{} does not exist in choices of {}",
                        token.to_lowercase(),
                        names.join(", ")
                    ),
                ))
            }
        }
    }

    async fn lookup(
        &self,
        cursor: &Cursor<'a>,
        slot: &CommandOption,
        token: &str,
        target: Mention,
    ) -> ParseResult<OptionValue> {
        let entities = &self.resolver.entities;
        let (what, value) = match (target, self.guild) {
            (Mention::User(id), guild) => {
                let member = match guild {
                    Some(guild) => found(entities.member(guild, id).await, "member", id),
                    None => None,
                };
                let value = match member {
                    Some(member) => Some(OptionValue::User {
                        user: member.user.clone(),
                        member: Some(member),
                    }),
                    None => found(entities.user(id).await, "user", id)
                        .map(|user| OptionValue::User { user, member: None }),
                };
                ("user", value)
            }
            (Mention::Role(id), Some(guild)) => (
                "role",
                found(entities.role(guild, id).await, "role", id).map(OptionValue::Role),
            ),
            (Mention::Channel(id), Some(guild)) => (
                "channel",
                found(entities.channel(guild, id).await, "channel", id).map(OptionValue::Channel),
            ),
            (Mention::Role(_), None) => ("role", None),
            (Mention::Channel(_), None) => ("channel", None),
        };

        value.ok_or_else(|| {
            self.fail(
                cursor,
                ParseErrorKind::EntityNotFound,
                format!("Could not find {what} {token} for argument {}", slot.name),
            )
        })
    }

    fn finish(&self, mut cursor: Cursor<'a>) -> ParseResult<Vec<ResolvedOption>> {
        match std::mem::take(&mut cursor.capture) {
            Capture::Quoted { name, text } | Capture::Greedy { name, text } => {
                cursor.close(name, text)
            }
            Capture::None => {}
        }

        let slots = cursor.slots(self.root);
        let unfilled = if cursor.group.is_none() && is_grouped(slots) {
            true
        } else {
            slots.iter().skip(cursor.index).any(|s| s.required)
        };
        if unfilled {
            return Err(self.fail(
                &cursor,
                ParseErrorKind::NotEnoughArguments,
                "Not enough arguments",
            ));
        }

        let Cursor {
            group, resolved, ..
        } = cursor;
        Ok(match group {
            Some(group) => vec![ResolvedOption::new(
                group.name.clone(),
                OptionValue::SubCommand(resolved),
            )],
            None => resolved,
        })
    }

    fn fail(&self, cursor: &Cursor<'a>, kind: ParseErrorKind, message: impl Into<String>) -> ParseError {
        let usage = format_usage(
            &self.resolver.prefix,
            self.command,
            self.root,
            cursor.group.map(|g| g.name.as_str()),
        );
        ParseError::new(kind, message, usage)
    }
}

/// Treats a failed lookup as "not found".
fn found<T>(result: ApiResult<Option<T>>, what: &str, id: Snowflake) -> Option<T> {
    match result {
        Ok(value) => value,
        Err(err) => {
            debug!(%id, error = %err, "{what} lookup failed");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::MemoryResolver;
    use herald_core::{Channel, Member, Role, User};

    const GUILD: Snowflake = Snowflake(1);

    fn resolver() -> ArgumentResolver {
        let entities = MemoryResolver::new()
            .with_member(Member::new(1, User::new(10, "alice")))
            .with_user(User::new(11, "bob"))
            .with_role(Role::new(20, 1, "mods"))
            .with_channel(Channel::text(30, 1, "general"));
        ArgumentResolver::new(entities.into_arc())
    }

    fn strings(names: &[&str]) -> Vec<CommandOption> {
        names
            .iter()
            .map(|n| CommandOption::string(*n, *n).required())
            .collect()
    }

    fn tag_schema() -> Vec<CommandOption> {
        vec![
            CommandOption::group(
                "add",
                "Add a tag",
                vec![CommandOption::string("name", "Tag name").required()],
            ),
            CommandOption::group(
                "remove",
                "Remove a tag",
                vec![CommandOption::string("name", "Tag name").required()],
            ),
        ]
    }

    fn string_of(option: &ResolvedOption) -> &str {
        match &option.value {
            OptionValue::String(s) => s,
            other => panic!("expected string, got {other:?}"),
        }
    }

    async fn resolve(options: &[CommandOption], text: &str) -> ParseResult<Vec<ResolvedOption>> {
        resolver().resolve("cmd", options, text, Some(GUILD)).await
    }

    #[tokio::test]
    async fn test_flat_strings_follow_input_order() {
        let options = strings(&["a", "b", "c"]);
        let resolved = resolve(&options, "x y z").await.unwrap();
        let pairs: Vec<(&str, &str)> = resolved
            .iter()
            .map(|o| (o.name.as_str(), string_of(o)))
            .collect();
        assert_eq!(pairs, vec![("a", "x"), ("b", "y"), ("c", "z")]);
    }

    #[tokio::test]
    async fn test_argument_counts() {
        let options = strings(&["a", "b"]);
        let err = resolve(&options, "x").await.unwrap_err();
        assert_eq!(err.kind(), ParseErrorKind::NotEnoughArguments);
        assert_eq!(err.to_string(), "Not enough arguments\n\n!cmd <a> <b>");

        let options = vec![CommandOption::integer("n", "n").required()];
        let err = resolve(&options, "1 2").await.unwrap_err();
        assert_eq!(err.kind(), ParseErrorKind::TooManyArguments);
    }

    #[tokio::test]
    async fn test_optional_slots_may_stay_empty() {
        let options = vec![
            CommandOption::string("a", "a").required(),
            CommandOption::integer("b", "b"),
        ];
        let resolved = resolve(&options, "x").await.unwrap();
        assert_eq!(resolved.len(), 1);
        assert!(resolve(&[], "").await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_required_slot_after_optional_must_be_filled() {
        let options = vec![
            CommandOption::string("a", "a"),
            CommandOption::string("b", "b").required(),
        ];
        let err = resolve(&options, "x").await.unwrap_err();
        assert_eq!(err.kind(), ParseErrorKind::NotEnoughArguments);
        assert_eq!(err.usage(), "!cmd [a] <b>");

        let resolved = resolve(&options, "x y").await.unwrap();
        assert_eq!(resolved.len(), 2);
    }

    #[tokio::test]
    async fn test_quoted_capture() {
        let options = vec![
            CommandOption::string("title", "t").required(),
            CommandOption::integer("n", "n").required(),
        ];
        let resolved = resolve(&options, r#""a b c" 3"#).await.unwrap();
        assert_eq!(string_of(&resolved[0]), "a b c");
        assert_eq!(resolved[1].value, OptionValue::Integer(3));

        let resolved = resolve(&options, r#""solo" 3"#).await.unwrap();
        assert_eq!(string_of(&resolved[0]), "solo");
    }

    #[tokio::test]
    async fn test_unterminated_quote_closes_at_end() {
        let options = vec![
            CommandOption::string("title", "t").required(),
            CommandOption::string("body", "b"),
        ];
        let resolved = resolve(&options, r#""a b"#).await.unwrap();
        assert_eq!(resolved.len(), 1);
        assert_eq!(string_of(&resolved[0]), "a b");
    }

    #[tokio::test]
    async fn test_greedy_tail_keeps_quotes() {
        let options = vec![
            CommandOption::user("user", "u").required(),
            CommandOption::string("reason", "r").required(),
        ];
        let resolved = resolve(&options, r#"<@10> said "hi"   twice"#).await.unwrap();
        assert_eq!(string_of(&resolved[1]), r#"said "hi" twice"#);
    }

    #[tokio::test]
    async fn test_group_selection() {
        let resolved = resolve(&tag_schema(), "ADD foo").await.unwrap();
        assert_eq!(resolved.len(), 1);
        assert_eq!(resolved[0].name, "add");
        match &resolved[0].value {
            OptionValue::SubCommand(inner) => {
                assert_eq!(inner.len(), 1);
                assert_eq!(inner[0].name, "name");
                assert_eq!(string_of(&inner[0]), "foo");
            }
            other => panic!("expected sub-command, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_group_errors() {
        let err = resolve(&tag_schema(), "").await.unwrap_err();
        assert_eq!(err.kind(), ParseErrorKind::NotEnoughArguments);
        assert_eq!(err.usage(), "!cmd [add (sub_command)] [remove (sub_command)]");

        let err = resolve(&tag_schema(), "rename foo").await.unwrap_err();
        assert_eq!(err.kind(), ParseErrorKind::TypeMismatch);

        let err = resolve(&tag_schema(), "add").await.unwrap_err();
        assert_eq!(err.kind(), ParseErrorKind::NotEnoughArguments);
        assert_eq!(err.usage(), "!cmd add <name>");

        let err = resolve(&tag_schema(), "add a b").await;
        assert!(err.is_ok(), "last slot captures the tail");
    }

    #[tokio::test]
    async fn test_booleans() {
        let options = vec![CommandOption::boolean("flag", "f").required()];
        for (input, expected) in [("yes", true), ("Y", true), ("true", true), ("no", false), ("1", false)] {
            let resolved = resolve(&options, input).await.unwrap();
            assert_eq!(resolved[0].value, OptionValue::Boolean(expected), "input {input}");
        }
    }

    #[tokio::test]
    async fn test_choices() {
        let options = vec![
            CommandOption::string("color", "c")
                .required()
                .choice("Red", "#f00")
                .choice("Blue", "#00f"),
            CommandOption::integer("n", "n"),
        ];
        let resolved = resolve(&options, "RED").await.unwrap();
        assert_eq!(string_of(&resolved[0]), "#f00");

        let err = resolve(&options, "green").await.unwrap_err();
        assert_eq!(err.kind(), ParseErrorKind::InvalidChoice);
        assert_eq!(err.message(), "green does not exist in choices of red, blue");
    }

    #[tokio::test]
    async fn test_user_resolution() {
        let options = vec![CommandOption::user("user", "u").required()];

        let resolved = resolve(&options, "<@!10>").await.unwrap();
        match &resolved[0].value {
            OptionValue::User { user, member } => {
                assert_eq!(user.name, "alice");
                assert!(member.is_some());
            }
            other => panic!("expected user, got {other:?}"),
        }

        let resolved = resolve(&options, "11").await.unwrap();
        match &resolved[0].value {
            OptionValue::User { user, member } => {
                assert_eq!(user.name, "bob");
                assert!(member.is_none());
            }
            other => panic!("expected user, got {other:?}"),
        }

        let err = resolve(&options, "<@99>").await.unwrap_err();
        assert_eq!(err.kind(), ParseErrorKind::EntityNotFound);
        assert_eq!(err.message(), "Could not find user <@99> for argument user");

        let err = resolve(&options, "alice").await.unwrap_err();
        assert_eq!(err.kind(), ParseErrorKind::TypeMismatch);
        assert_eq!(err.message(), "Incorrect value type for USER");
    }

    #[tokio::test]
    async fn test_member_lookup_failure_falls_back() {
        let entities = MemoryResolver::new()
            .with_user(User::new(10, "alice"))
            .fail_member_lookups();
        let arguments = ArgumentResolver::new(entities.into_arc());
        let options = vec![CommandOption::user("user", "u").required()];

        let resolved = arguments
            .resolve("cmd", &options, "<@10>", Some(GUILD))
            .await
            .unwrap();
        assert!(matches!(
            &resolved[0].value,
            OptionValue::User { member: None, .. }
        ));
    }

    #[tokio::test]
    async fn test_roles_and_channels() {
        let options = vec![
            CommandOption::string("target", "t").required(),
            CommandOption::channel("where", "w").required(),
        ];
        let resolved = resolve(&options, "<@&20> 30").await.unwrap();
        assert!(matches!(&resolved[0].value, OptionValue::Role(role) if role.name == "mods"));
        assert!(matches!(&resolved[1].value, OptionValue::Channel(c) if c.id == Snowflake(30)));

        let outside_guild = resolver()
            .resolve("cmd", &options, "x <#30>", None)
            .await
            .unwrap_err();
        assert_eq!(outside_guild.kind(), ParseErrorKind::EntityNotFound);
    }

    #[tokio::test]
    async fn test_lenient_integers() {
        let options = vec![CommandOption::integer("n", "n").required()];
        let cases = [
            ("42", OptionValue::Integer(42)),
            ("-7", OptionValue::Integer(-7)),
            ("12abc", OptionValue::Integer(12)),
            ("a1", OptionValue::UnparsedInteger("a1".into())),
        ];
        for (input, expected) in cases {
            let resolved = resolve(&options, input).await.unwrap();
            assert_eq!(resolved[0].value, expected, "input {input}");
        }

        let err = resolve(&options, "abc").await.unwrap_err();
        assert_eq!(err.kind(), ParseErrorKind::TypeMismatch);
        assert_eq!(err.message(), "Incorrect value type for INTEGER");
    }

    #[tokio::test]
    async fn test_strict_integers() {
        let arguments = resolver().integer_mode(IntegerMode::Strict);
        let options = vec![CommandOption::integer("n", "n").required()];

        let resolved = arguments.resolve("cmd", &options, "-5", None).await.unwrap();
        assert_eq!(resolved[0].value, OptionValue::Integer(-5));
        let resolved = arguments.resolve("cmd", &options, "3.9", None).await.unwrap();
        assert_eq!(resolved[0].value, OptionValue::Integer(3));

        for input in ["12abc", "99999999999999999999"] {
            let err = arguments
                .resolve("cmd", &options, input, None)
                .await
                .unwrap_err();
            assert_eq!(err.kind(), ParseErrorKind::TypeMismatch, "input {input}");
        }
    }

    #[test]
    fn test_leading_integer() {
        assert_eq!(leading_integer("12abc"), Some(12));
        assert_eq!(leading_integer("+3"), Some(3));
        assert_eq!(leading_integer("-"), None);
        assert_eq!(leading_integer("x1"), None);
        assert_eq!(leading_integer("99999999999999999999"), None);
    }

    #[test]
    fn test_resolve_blocking() {
        let options = strings(&["a"]);
        let resolved = tokio_test::block_on(resolve(&options, "x")).unwrap();
        assert_eq!(string_of(&resolved[0]), "x");
    }
}
