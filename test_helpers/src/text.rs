//! Helpers for inspecting rendered help text.

/// Remove ANSI SGR escape sequences (`ESC [ ... m`).
#[must_use]
pub fn strip_ansi(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut chars = text.chars();
    while let Some(ch) = chars.next() {
        if ch == '\u{1b}' {
            for inner in chars.by_ref() {
                if inner.is_ascii_alphabetic() {
                    break;
                }
            }
        } else {
            out.push(ch);
        }
    }
    out
}

/// Entry lines of the help section headed `title` (for example `Options`),
/// with styling removed.
#[must_use]
pub fn section_entries(help: &str, title: &str) -> Vec<String> {
    let heading = format!("  {title}:");
    strip_ansi(help)
        .lines()
        .skip_while(|line| *line != heading)
        .skip(1)
        .skip_while(|line| line.trim().is_empty())
        .take_while(|line| !line.trim().is_empty())
        .map(str::to_owned)
        .collect()
}

/// Column at which each entry's description starts in the section headed
/// `title`.
///
/// An entry is the label, at least two spaces, then the description; the
/// returned column is the character offset of the description.
#[must_use]
pub fn description_columns(help: &str, title: &str) -> Vec<usize> {
    section_entries(help, title)
        .iter()
        .filter_map(|line| {
            let label_start = line.len() - line.trim_start().len();
            let rest = line.get(label_start..)?;
            let gap = rest.find("  ")?;
            let after_gap = rest.get(gap..)?;
            let description = after_gap.trim_start();
            Some(line.chars().count() - description.chars().count())
        })
        .collect()
}
