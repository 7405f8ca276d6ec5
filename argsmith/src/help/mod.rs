//! Help, suggestion and author text.
//!
//! Help is laid out as a usage line followed by the `Commands`, `Options` and
//! `Examples` sections, each omitted when empty. Commands sort by primary
//! name and options by long name. Within a section every label is padded to
//! the widest label, measured in terminal columns, so the descriptions line up
//! two columns after it:
//!
//! ```text
//!
//!   Usage: tool [options] [command]
//!
//!   Commands:
//!
//!     help        Output usage information
//!     install, i  Install a package
//!
//!   Options:
//!
//!     -h, --help                Output usage information
//!     -p, --port <n>            Port to use (defaults to 8080)
//! ```
//!
//! Padding happens before styling, so escapes never disturb the columns.
//! With no options and no commands the whole text is replaced by a single
//! `No sub commands or options available` line.

mod palette;

use unicode_width::UnicodeWidthStr;

use crate::config::RuntimeConfig;
use crate::registry::{ArgOption, Command, Example, Registry};

pub use palette::Palette;

const GUTTER: usize = 2;
const EMPTY: &str = "No sub commands or options available";
const ENTRY_INDENT: &str = "    ";

/// Render help for `registry`, then run the usage filter if one is set.
///
/// `binary` is the basename of the invoked program; it names the program on
/// the usage line unless the runtime configuration overrides the name.
#[must_use]
pub fn render_help(registry: &Registry, runtime: &RuntimeConfig, binary: &str) -> String {
    let palette = Palette::from_runtime(runtime);
    let text = compose(registry, runtime, binary, &palette);
    apply_filter(runtime, text)
}

fn apply_filter(runtime: &RuntimeConfig, text: String) -> String {
    runtime
        .filter()
        .and_then(|filter| filter(&text))
        .filter(|filtered| !filtered.is_empty())
        .unwrap_or(text)
}

fn compose(registry: &Registry, runtime: &RuntimeConfig, binary: &str, palette: &Palette) -> String {
    if registry.options().is_empty() && registry.commands().is_empty() {
        return format!("{EMPTY}\n");
    }
    let mut lines = vec![String::new(), usage_line(registry, runtime, binary, palette)];

    let mut commands: Vec<&Command> = registry.commands().iter().collect();
    commands.sort_by(|a, b| a.name().cmp(b.name()));
    push_section(
        &mut lines,
        "Commands",
        commands
            .iter()
            .map(|command| (command.usage_label(), command.description().to_owned())),
        palette,
    );

    let mut options: Vec<&ArgOption> = registry.options().iter().collect();
    options.sort_by(|a, b| a.long().cmp(b.long()));
    push_section(
        &mut lines,
        "Options",
        options
            .iter()
            .map(|option| (option.usage_label(), option.described())),
        palette,
    );

    push_examples(&mut lines, registry.examples(), palette);

    lines.push(String::new());
    lines.join("\n")
}

/// `Usage: <name> [options] [command] <value>`, without the trailing parts
/// that do not apply.
fn usage_line(
    registry: &Registry,
    runtime: &RuntimeConfig,
    binary: &str,
    palette: &Palette,
) -> String {
    let name = display_name(runtime, binary);
    let tail: Vec<&str> = [
        (!registry.options().is_empty()).then_some("[options]"),
        (!registry.commands().is_empty()).then_some("[command]"),
        runtime.value_placeholder().filter(|value| !value.is_empty()),
    ]
    .into_iter()
    .flatten()
    .collect();
    if tail.is_empty() {
        format!("  Usage: {}", palette.main(&name))
    } else {
        format!(
            "  Usage: {} {}",
            palette.main(&name),
            palette.sub(&tail.join(" "))
        )
    }
}

/// Program name shown on the usage line. A dispatched `tool-install` binary
/// reads as `tool install`.
pub(crate) fn display_name(runtime: &RuntimeConfig, binary: &str) -> String {
    runtime
        .display_name()
        .map_or_else(|| binary.replacen('-', " ", 1), str::to_owned)
}

fn push_section<I>(lines: &mut Vec<String>, title: &str, entries: I, palette: &Palette)
where
    I: Iterator<Item = (String, String)>,
{
    let entries: Vec<(String, String)> = entries.collect();
    if entries.is_empty() {
        return;
    }
    lines.push(String::new());
    lines.push(format!("  {title}:"));
    lines.push(String::new());
    lines.extend(aligned(&entries, palette));
}

/// Pad every label to the widest one and append its description.
fn aligned(entries: &[(String, String)], palette: &Palette) -> Vec<String> {
    let width = entries
        .iter()
        .map(|(label, _)| label.width())
        .max()
        .unwrap_or_default();
    entries
        .iter()
        .map(|(label, description)| {
            let padding = " ".repeat(width - label.width() + GUTTER);
            format!(
                "{ENTRY_INDENT}{}{padding}{}",
                palette.main(label),
                palette.sub(description.trim_end())
            )
            .trim_end()
            .to_owned()
        })
        .collect()
}

fn push_examples(lines: &mut Vec<String>, examples: &[Example], palette: &Palette) {
    if examples.is_empty() {
        return;
    }
    lines.push(String::new());
    lines.push("  Examples:".to_owned());
    lines.push(String::new());
    for example in examples {
        lines.push(format!(
            "{ENTRY_INDENT}{}",
            palette.main(&format!("- {}", example.description()))
        ));
        lines.push(String::new());
        lines.push(format!(
            "{ENTRY_INDENT}  {}",
            palette.sub(&format!("$ {}", example.usage()))
        ));
        lines.push(String::new());
    }
    lines.pop();
}

/// Notice for an unknown flag that has a close match.
#[must_use]
pub fn render_suggestion(unknown: &str, option: &ArgOption, palette: &Palette) -> String {
    let line = aligned(&[(option.usage_label(), option.described())], palette)
        .concat()
        .trim()
        .to_owned();
    format!(
        "The option \"{unknown}\" is unknown. Did you mean the following one?\n\n  {line}\n"
    )
}

/// Notice for an unknown flag without a close match, followed by `help`.
#[must_use]
pub fn render_unknown(unknown: &str, help: &str) -> String {
    format!("The option \"{unknown}\" is unknown. Here's a list of all available options: \n{help}")
}

/// Author listing.
///
/// Several authors render as a heading and a bulleted list, one as a single
/// line, none as a notice.
#[must_use]
pub fn render_authors(authors: &[String], palette: &Palette) -> String {
    let lines: Vec<String> = match authors {
        [] => vec!["No author found.".to_owned()],
        [single] => vec![format!("Author: {}", palette.main(single))],
        several => std::iter::once(palette.heading("Authors"))
            .chain(
                several
                    .iter()
                    .map(|author| format!("{} {}", palette.sub("-"), palette.main(author))),
            )
            .collect(),
    };
    format!("\n  {}\n", lines.join("\n  "))
}
