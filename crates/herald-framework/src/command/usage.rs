use std::borrow::Cow;

use herald_core::{CommandOption, OptionKind, find_group};

/// Renders the usage hint of a command.
///
/// Required slots are wrapped in `<…>` and optional ones in `[…]`. Slots that
/// are not plain strings carry a hint of what to type:
///
/// ```text
/// !ban <user (@user/id)> <reason>
/// !tag add <name> [color]
/// !tag [add (sub_command)] [remove (sub_command)]
/// ```
///
/// When `group` names one of the command's sub-commands, the group name is
/// printed after the command and the group's options replace the root list.
pub fn format_usage(
    prefix: &str,
    command: &str,
    options: &[CommandOption],
    group: Option<&str>,
) -> String {
    let mut usage = format!("{prefix}{command}");
    let mut slots = options;

    if let Some(group) = group {
        usage.push(' ');
        usage.push_str(group);
        if let Some(found) = find_group(options, group) {
            slots = &found.options;
        }
    }

    for slot in slots {
        let label = match kind_hint(slot.kind) {
            Some(hint) => format!("{} ({hint})", slot.name),
            None => slot.name.clone(),
        };
        if slot.required {
            usage.push_str(&format!(" <{label}>"));
        } else {
            usage.push_str(&format!(" [{label}]"));
        }
    }

    usage
}

fn kind_hint(kind: OptionKind) -> Option<Cow<'static, str>> {
    let hint = match kind {
        OptionKind::String => return None,
        OptionKind::Integer => "number",
        OptionKind::Boolean => "yes/no",
        OptionKind::Role => "@role/id",
        OptionKind::User => "@user/id",
        OptionKind::Channel => "#channel/id",
        other => return Some(Cow::Owned(other.as_str().to_lowercase())),
    };
    Some(Cow::Borrowed(hint))
}
