//! Per-call knobs for [`Args::parse`](crate::Args::parse).

use std::fmt;
use std::io::IsTerminal;
use std::sync::Arc;

use crate::tokenizer::TokenizerOptions;

/// Post-processes rendered help. Returning `None` or an empty string keeps the
/// unfiltered text.
pub type UsageFilter = Arc<dyn Fn(&str) -> Option<String> + Send + Sync>;

/// When help output is painted.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ColorChoice {
    /// Paint when stdout is a terminal.
    #[default]
    Auto,
    /// Always paint.
    Always,
    /// Never paint.
    Never,
}

impl ColorChoice {
    /// Whether output produced under this choice should carry styling.
    ///
    /// `Auto` also needs `colored`'s environment checks to agree, so
    /// `NO_COLOR` turns painting off.
    #[must_use]
    pub fn enabled(self) -> bool {
        match self {
            Self::Auto => {
                std::io::stdout().is_terminal()
                    && colored::control::SHOULD_COLORIZE.should_colorize()
            }
            Self::Always => true,
            Self::Never => false,
        }
    }
}

/// Settings supplied to a single parse.
///
/// Construct with [`RuntimeConfig::default`] and adjust with the chainable
/// setters:
///
/// ```
/// use argsmith::{ColorChoice, RuntimeConfig};
/// let config = RuntimeConfig::default()
///     .version(false)
///     .value("<directories>")
///     .color(ColorChoice::Never);
/// assert!(config.help_enabled());
/// ```
#[derive(Clone)]
pub struct RuntimeConfig {
    help: bool,
    version: bool,
    usage_filter: Option<UsageFilter>,
    value: Option<String>,
    name: Option<String>,
    main_color: Vec<String>,
    sub_color: Vec<String>,
    color: ColorChoice,
    tokenizer: TokenizerOptions,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            help: true,
            version: true,
            usage_filter: None,
            value: None,
            name: None,
            main_color: vec!["yellow".to_owned()],
            sub_color: vec!["dim".to_owned()],
            color: ColorChoice::Auto,
            tokenizer: TokenizerOptions::default(),
        }
    }
}

impl RuntimeConfig {
    /// Enable or disable the built-in `help` option and command.
    #[must_use]
    pub const fn help(mut self, enabled: bool) -> Self {
        self.help = enabled;
        self
    }

    /// Enable or disable the version option.
    #[must_use]
    pub const fn version(mut self, enabled: bool) -> Self {
        self.version = enabled;
        self
    }

    /// Install a filter applied to rendered help.
    #[must_use]
    pub fn usage_filter<F>(mut self, filter: F) -> Self
    where
        F: Fn(&str) -> Option<String> + Send + Sync + 'static,
    {
        self.usage_filter = Some(Arc::new(filter));
        self
    }

    /// Placeholder appended to the usage line, such as `<directories>`.
    #[must_use]
    pub fn value(mut self, value: impl Into<String>) -> Self {
        self.value = Some(value.into());
        self
    }

    /// Override the program name shown on the usage line.
    #[must_use]
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Styles for headings and labels, by `colored` name.
    #[must_use]
    pub fn main_color<I, S>(mut self, styles: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.main_color = styles.into_iter().map(Into::into).collect();
        self
    }

    /// Styles for the usage-line tail and suggestions.
    #[must_use]
    pub fn sub_color<I, S>(mut self, styles: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.sub_color = styles.into_iter().map(Into::into).collect();
        self
    }

    /// When to paint help output.
    #[must_use]
    pub const fn color(mut self, choice: ColorChoice) -> Self {
        self.color = choice;
        self
    }

    /// Options forwarded to the tokenizer.
    #[must_use]
    pub fn tokenizer(mut self, options: TokenizerOptions) -> Self {
        self.tokenizer = options;
        self
    }

    /// Returns `true` when the built-in help entries are active.
    #[must_use]
    pub const fn help_enabled(&self) -> bool {
        self.help
    }

    /// Returns `true` when the version option is active.
    #[must_use]
    pub const fn version_enabled(&self) -> bool {
        self.version
    }

    pub(crate) const fn filter(&self) -> Option<&UsageFilter> {
        self.usage_filter.as_ref()
    }

    pub(crate) fn value_placeholder(&self) -> Option<&str> {
        self.value.as_deref()
    }

    pub(crate) fn display_name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    pub(crate) fn main_styles(&self) -> &[String] {
        &self.main_color
    }

    pub(crate) fn sub_styles(&self) -> &[String] {
        &self.sub_color
    }

    pub(crate) const fn color_choice(&self) -> ColorChoice {
        self.color
    }

    pub(crate) const fn tokenizer_options(&self) -> &TokenizerOptions {
        &self.tokenizer
    }
}

impl fmt::Debug for RuntimeConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RuntimeConfig")
            .field("help", &self.help)
            .field("version", &self.version)
            .field("usage_filter", &self.usage_filter.as_ref().map(|_| ".."))
            .field("value", &self.value)
            .field("name", &self.name)
            .field("main_color", &self.main_color)
            .field("sub_color", &self.sub_color)
            .field("color", &self.color)
            .field("tokenizer", &self.tokenizer)
            .finish()
    }
}
