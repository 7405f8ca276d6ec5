//! Styling for help output, backed by `colored`.

use std::borrow::Cow;
use std::str::FromStr;

use colored::Color;

use crate::config::RuntimeConfig;

/// Resolved main and sub styles for one render.
#[derive(Debug, Clone, Default)]
pub struct Palette {
    main: Vec<Style>,
    sub: Vec<Style>,
    enabled: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Style {
    Color(Color),
    Dim,
    Bold,
    Italic,
    Underline,
}

impl Style {
    fn parse(name: &str) -> Option<Self> {
        match name.trim().to_ascii_lowercase().as_str() {
            "dim" | "dimmed" => Some(Self::Dim),
            "bold" => Some(Self::Bold),
            "italic" => Some(Self::Italic),
            "underline" => Some(Self::Underline),
            other => Color::from_str(other).ok().map(Self::Color),
        }
    }

    /// SGR parameter selecting this style.
    fn sgr(self) -> Cow<'static, str> {
        match self {
            Self::Color(color) => color.to_fg_str(),
            Self::Bold => Cow::Borrowed("1"),
            Self::Dim => Cow::Borrowed("2"),
            Self::Italic => Cow::Borrowed("3"),
            Self::Underline => Cow::Borrowed("4"),
        }
    }
}

fn parse_styles(names: &[String]) -> Vec<Style> {
    names
        .iter()
        .filter_map(|name| {
            let style = Style::parse(name);
            if style.is_none() {
                tracing::warn!(style = %name, "ignoring unknown color name");
            }
            style
        })
        .collect()
}

impl Palette {
    /// Palette described by `runtime`.
    ///
    /// Escapes are written directly, so [`ColorChoice::Always`](crate::ColorChoice::Always) paints without
    /// touching `colored`'s process-wide override.
    #[must_use]
    pub fn from_runtime(runtime: &RuntimeConfig) -> Self {
        Self {
            main: parse_styles(runtime.main_styles()),
            sub: parse_styles(runtime.sub_styles()),
            enabled: runtime.color_choice().enabled(),
        }
    }

    /// A palette that leaves text untouched.
    #[must_use]
    pub fn plain() -> Self {
        Self::default()
    }

    /// Paint `text` with the main styles.
    #[must_use]
    pub fn main(&self, text: &str) -> String {
        self.paint(&self.main, text)
    }

    /// Paint `text` with the sub styles.
    #[must_use]
    pub fn sub(&self, text: &str) -> String {
        self.paint(&self.sub, text)
    }

    /// Underline `text`, used for headings.
    #[must_use]
    pub fn heading(&self, text: &str) -> String {
        self.paint(&[Style::Underline], text)
    }

    fn paint(&self, styles: &[Style], text: &str) -> String {
        if !self.enabled || styles.is_empty() || text.is_empty() {
            return text.to_owned();
        }
        let codes: Vec<Cow<'static, str>> = styles.iter().map(|style| style.sgr()).collect();
        format!("\u{1b}[{}m{text}\u{1b}[0m", codes.join(";"))
    }
}
