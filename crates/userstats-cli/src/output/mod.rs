//! Rendering of endpoint responses.
//!
//! JSON output forwards the response envelope unchanged apart from
//! indentation. Human output prints the `data` payload of successful
//! responses as an aligned listing under a heading derived from the command.

mod render;

use clap::ValueEnum;
use serde_json::Value;

pub use render::render_human_output;

/// Output format selection for query responses.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, ValueEnum)]
pub enum OutputFormat {
    /// Selects `human` for terminal output and `json` for redirected output.
    #[default]
    Auto,
    /// Always render human-readable output.
    Human,
    /// Always emit the response envelope as JSON.
    Json,
}

/// Output format after resolving `auto` based on TTY detection.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum ResolvedOutputFormat {
    /// Human-readable listing.
    Human,
    /// Response envelope as JSON.
    Json,
}

impl OutputFormat {
    /// Resolves the output format based on whether stdout is a terminal.
    #[must_use]
    pub const fn resolve(self, stdout_is_terminal: bool) -> ResolvedOutputFormat {
        match self {
            Self::Auto => {
                if stdout_is_terminal {
                    ResolvedOutputFormat::Human
                } else {
                    ResolvedOutputFormat::Json
                }
            }
            Self::Human => ResolvedOutputFormat::Human,
            Self::Json => ResolvedOutputFormat::Json,
        }
    }
}

/// Pretty-prints a response envelope.
#[must_use]
pub fn render_json_output(envelope: &Value) -> String {
    let mut rendered =
        serde_json::to_string_pretty(envelope).unwrap_or_else(|_| envelope.to_string());
    rendered.push('\n');
    rendered
}

#[cfg(test)]
mod tests {
    use rstest::rstest;
    use serde_json::json;

    use super::*;

    #[rstest]
    #[case(OutputFormat::Auto, true, ResolvedOutputFormat::Human)]
    #[case(OutputFormat::Auto, false, ResolvedOutputFormat::Json)]
    #[case(OutputFormat::Human, false, ResolvedOutputFormat::Human)]
    #[case(OutputFormat::Json, true, ResolvedOutputFormat::Json)]
    fn resolves_output_format(
        #[case] format: OutputFormat,
        #[case] terminal: bool,
        #[case] expected: ResolvedOutputFormat,
    ) {
        assert_eq!(format.resolve(terminal), expected);
    }

    #[test]
    fn json_output_is_indented_and_terminated() {
        let rendered = render_json_output(&json!({"success": true}));
        assert_eq!(rendered, "{\n  \"success\": true\n}\n");
    }
}
