/// Splits raw command text into whitespace-separated tokens.
///
/// Runs of whitespace collapse, and leading or trailing whitespace produces
/// no empty tokens. Quotes are left untouched: quoted and greedy captures are
/// reassembled by the resolution engine, which joins tokens back with single
/// spaces.
pub fn split_tokens(input: &str) -> Vec<&str> {
    input.split_whitespace().collect()
}

/// Detects a `<prefix><name> <rest>` invocation in message content.
///
/// Returns the command name and the remaining argument text, or `None` when
/// the content does not start with `prefix` or names no command.
pub fn split_invocation<'a>(content: &'a str, prefix: &str) -> Option<(&'a str, &'a str)> {
    let body = content.trim_start().strip_prefix(prefix)?;
    let end = body.find(char::is_whitespace).unwrap_or(body.len());
    let (name, rest) = body.split_at(end);
    if name.is_empty() {
        return None;
    }
    Some((name, rest.trim_start()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_collapses_whitespace() {
        assert_eq!(split_tokens("  a \t b\n\nc  "), vec!["a", "b", "c"]);
        assert!(split_tokens("").is_empty());
        assert!(split_tokens("   ").is_empty());
    }

    #[test]
    fn test_split_keeps_quotes() {
        assert_eq!(
            split_tokens(r#""a b" c"#),
            vec![r#""a"#, r#"b""#, "c"]
        );
    }

    #[test]
    fn test_split_invocation() {
        assert_eq!(
            split_invocation("!ban <@1> spamming  links", "!"),
            Some(("ban", "<@1> spamming  links"))
        );
        assert_eq!(split_invocation("!ping", "!"), Some(("ping", "")));
        assert_eq!(split_invocation("  ?help me", "?"), Some(("help", "me")));
    }

    #[test]
    fn test_split_invocation_rejects() {
        assert_eq!(split_invocation("hello", "!"), None);
        assert_eq!(split_invocation("! ping", "!"), None);
        assert_eq!(split_invocation("!", "!"), None);
    }
}
