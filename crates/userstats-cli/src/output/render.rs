//! Human-readable rendering of response payloads.

use serde_json::{Map, Value};

const RULE_WIDTH: usize = 50;
const NESTED_INDENT: usize = 2;
const DIGIT_GROUP: usize = 3;

/// Renders the `data` payload of a successful `command` response.
///
/// Objects become aligned `label  value` lines, arrays become numbered
/// lists, and integers are printed with thousands separators.
#[must_use]
pub fn render_human_output(command: &str, data: &Value) -> String {
    let mut output = String::new();
    output.push_str(&heading(command));
    output.push('\n');
    output.push_str(&"=".repeat(RULE_WIDTH));
    output.push('\n');
    render_value(&mut output, data, 0);
    output
}

fn heading(command: &str) -> String {
    command
        .split(['.', '_'])
        .filter(|part| !part.is_empty())
        .map(str::to_ascii_uppercase)
        .collect::<Vec<_>>()
        .join(" ")
}

fn render_value(output: &mut String, value: &Value, indent: usize) {
    match value {
        Value::Object(fields) => render_object(output, fields, indent),
        Value::Array(items) => render_list(output, items, indent),
        scalar => push_line(output, indent, &scalar_text(scalar)),
    }
}

fn render_object(output: &mut String, fields: &Map<String, Value>, indent: usize) {
    if fields.is_empty() {
        push_line(output, indent, "(empty)");
        return;
    }

    let width = fields.keys().map(|key| label(key).len()).max().unwrap_or(0);
    for (key, value) in fields {
        let caption = label(key);
        match value {
            Value::Object(_) | Value::Array(_) => {
                push_line(output, indent, &format!("{caption}:"));
                render_value(output, value, indent + NESTED_INDENT);
            }
            scalar => push_line(
                output,
                indent,
                &format!("{caption:<width$}  {}", scalar_text(scalar)),
            ),
        }
    }
}

fn render_list(output: &mut String, items: &[Value], indent: usize) {
    if items.is_empty() {
        push_line(output, indent, "(none)");
        return;
    }

    let number_width = items.len().to_string().len();
    for (index, item) in items.iter().enumerate() {
        let number = format!("{:>number_width$}.", index + 1);
        match item {
            Value::Object(fields) => {
                push_line(output, indent, &format!("{number} {}", inline_fields(fields)));
            }
            Value::Array(_) => {
                push_line(output, indent, &number);
                render_value(output, item, indent + number_width + NESTED_INDENT);
            }
            scalar => push_line(output, indent, &format!("{number} {}", scalar_text(scalar))),
        }
    }
}

fn inline_fields(fields: &Map<String, Value>) -> String {
    fields
        .iter()
        .map(|(key, value)| match value {
            Value::Object(_) | Value::Array(_) => format!("{key}={value}"),
            scalar => format!("{key}={}", scalar_text(scalar)),
        })
        .collect::<Vec<_>>()
        .join("  ")
}

fn label(key: &str) -> String {
    let spaced = key.replace('_', " ");
    let mut chars = spaced.chars();
    let Some(first) = chars.next() else {
        return spaced;
    };
    first.to_uppercase().chain(chars).collect()
}

fn scalar_text(value: &Value) -> String {
    match value {
        Value::Null => String::from("-"),
        Value::Bool(true) => String::from("yes"),
        Value::Bool(false) => String::from("no"),
        Value::Number(number) => match (number.as_u64(), number.as_i64()) {
            (Some(unsigned), _) => group_digits(unsigned),
            (None, Some(signed)) => format!("-{}", group_digits(signed.unsigned_abs())),
            (None, None) => number.to_string(),
        },
        Value::String(text) => text.clone(),
        Value::Array(_) | Value::Object(_) => value.to_string(),
    }
}

fn group_digits(value: u64) -> String {
    let reversed: Vec<char> = value.to_string().chars().rev().collect();
    let mut groups: Vec<String> = reversed
        .chunks(DIGIT_GROUP)
        .map(|group| group.iter().rev().collect())
        .collect();
    groups.reverse();
    groups.join(",")
}

fn push_line(output: &mut String, indent: usize, text: &str) {
    output.push_str(&" ".repeat(indent));
    output.push_str(text);
    output.push('\n');
}

#[cfg(test)]
mod tests {
    use rstest::rstest;
    use serde_json::json;

    use super::*;

    fn rule() -> String {
        "=".repeat(RULE_WIDTH)
    }

    #[rstest]
    #[case(0, "0")]
    #[case(999, "999")]
    #[case(1_000, "1,000")]
    #[case(12_345, "12,345")]
    #[case(1_234_567, "1,234,567")]
    fn groups_thousands(#[case] value: u64, #[case] expected: &str) {
        assert_eq!(group_digits(value), expected);
    }

    #[test]
    fn heading_splits_command_tokens() {
        assert_eq!(heading("channel.top_users"), "CHANNEL TOP USERS");
    }

    #[test]
    fn objects_render_aligned_labels() {
        let rendered = render_human_output(
            "system.stats",
            &json!({"total_users": 3, "total_messages": 12_000}),
        );
        assert_eq!(
            rendered,
            format!(
                "SYSTEM STATS\n{}\nTotal messages  12,000\nTotal users     3\n",
                rule()
            )
        );
    }

    #[test]
    fn arrays_render_numbered_entries() {
        let rendered = render_human_output(
            "leaderboard.messages",
            &json!([
                {"username": "alice", "count": 1200},
                {"username": "bob", "count": 7}
            ]),
        );
        assert_eq!(
            rendered,
            format!(
                "LEADERBOARD MESSAGES\n{}\n1. count=1,200  username=alice\n2. count=7  username=bob\n",
                rule()
            )
        );
    }

    #[test]
    fn nested_values_are_indented_under_their_label() {
        let rendered = render_human_output(
            "user.stats",
            &json!({"username": "alice", "channels": ["lobby"], "online": false}),
        );
        assert_eq!(
            rendered,
            format!("USER STATS\n{}\nChannels:\n  1. lobby\nOnline    no\nUsername  alice\n", rule())
        );
    }

    #[test]
    fn empty_collections_are_marked() {
        let rendered = render_human_output("channel.media_history", &json!([]));
        assert!(rendered.ends_with("(none)\n"));
    }
}
