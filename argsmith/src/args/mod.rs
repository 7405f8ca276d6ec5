//! The [`Args`] facade: registration, parsing and dispatch in one owner.
//!
//! An `Args` value is built once by the host program. Options, commands and
//! examples are registered with chainable calls that return
//! [`ArgsResult<&mut Args>`](crate::ArgsResult), so setup reads as a `?`
//! chain. [`Args::try_parse`] then tokenizes an argument vector, resolves it
//! and either returns the options, runs the matched command, or hands back
//! text to display. [`Args::parse`] does the same but prints that text and
//! exits, the way a CLI usually wants.
//!
//! The built-in `help` option and command, and the `version` option, are
//! registered at the start of every parse according to that parse's
//! [`RuntimeConfig`], and removed again before the next one.

mod outcome;
mod parse;

use std::ffi::OsString;
use std::fmt;
use std::sync::Arc;

use crate::config::{Config, RuntimeConfig};
use crate::dispatch::{Launcher, ProcessLauncher};
use crate::error::ArgsResult;
use crate::help::{self, Palette};
use crate::package::VersionSource;
use crate::registry::{CommandDef, Example, OptionDef, OptionName, Registry};
use crate::value::Value;

pub use outcome::{DisplayKind, DisplayRequest, Parsed, is_display_request};

/// Registers options and commands, then parses argument vectors against them.
///
/// # Examples
///
/// ```
/// use argsmith::{Args, ColorChoice, RuntimeConfig};
///
/// let mut args = Args::new();
/// args.option("port", "The port on which the app will be running")?
///     .option(["d", "data"], "Enable data mode")?;
///
/// let runtime = RuntimeConfig::default().color(ColorChoice::Never);
/// let config = args
///     .try_parse_with(["node", "tool", "-p", "--data"], &runtime)?
///     .into_config()
///     .unwrap_or_default();
/// assert_eq!(config.get_bool("port"), Some(true));
/// assert_eq!(config.get_bool("d"), Some(true));
/// # Ok::<(), argsmith::ArgsError>(())
/// ```
pub struct Args {
    registry: Registry,
    launcher: Arc<dyn Launcher>,
    version_source: Option<Arc<dyn VersionSource>>,
}

impl Default for Args {
    fn default() -> Self {
        Self {
            registry: Registry::default(),
            launcher: Arc::new(ProcessLauncher::new()),
            version_source: None,
        }
    }
}

impl fmt::Debug for Args {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Args")
            .field("registry", &self.registry)
            .field("version_source", &self.version_source.as_ref().map(|_| ".."))
            .finish_non_exhaustive()
    }
}

impl Args {
    /// An empty instance dispatching external commands through
    /// [`ProcessLauncher`] and without a version source.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Use `launcher` for commands without a handler.
    #[must_use]
    pub fn with_launcher(mut self, launcher: impl Launcher + 'static) -> Self {
        self.launcher = Arc::new(launcher);
        self
    }

    /// Report the version and authors found by `source`.
    ///
    /// ```
    /// use argsmith::{Args, package_info};
    /// let args = Args::new().with_version_source(package_info!());
    /// assert!(!args.render_authors().trim().is_empty());
    /// ```
    #[must_use]
    pub fn with_version_source(mut self, source: impl VersionSource + 'static) -> Self {
        self.version_source = Some(Arc::new(source));
        self
    }

    /// Everything registered so far, including the built-ins of the last
    /// parse.
    #[must_use]
    pub const fn registry(&self) -> &Registry {
        &self.registry
    }

    /// Register an option without a default.
    ///
    /// A plain name derives its short form from the first letter, falling
    /// back to the uppercase letter when that is taken. A `[short, long]`
    /// pair uses the given short form.
    ///
    /// # Errors
    ///
    /// Fails when the name is malformed, the long name is already registered
    /// or no short form is free.
    pub fn option(
        &mut self,
        name: impl Into<OptionName>,
        description: impl Into<String>,
    ) -> ArgsResult<&mut Self> {
        self.add_option(OptionDef::new(name, description))
    }

    /// Register an option with a default; the default's type fixes the
    /// option's kind.
    ///
    /// # Errors
    ///
    /// As for [`Args::option`].
    pub fn option_with_default(
        &mut self,
        name: impl Into<OptionName>,
        description: impl Into<String>,
        default: impl Into<Value>,
    ) -> ArgsResult<&mut Self> {
        self.add_option(OptionDef::new(name, description).default_value(default))
    }

    /// Register a fully described option.
    ///
    /// # Errors
    ///
    /// As for [`Args::option`].
    pub fn add_option(&mut self, def: OptionDef) -> ArgsResult<&mut Self> {
        self.registry.add_option(def, false)?;
        Ok(self)
    }

    /// Register several options, stopping at the first failure.
    ///
    /// # Errors
    ///
    /// As for [`Args::option`].
    pub fn options<I>(&mut self, defs: I) -> ArgsResult<&mut Self>
    where
        I: IntoIterator<Item = OptionDef>,
    {
        for def in defs {
            self.registry.add_option(def, false)?;
        }
        Ok(self)
    }

    /// Register a command handled in process.
    ///
    /// # Errors
    ///
    /// Fails when a selector is malformed or already taken.
    pub fn command<F>(
        &mut self,
        name: impl Into<crate::registry::CommandName>,
        description: impl Into<String>,
        handler: F,
    ) -> ArgsResult<&mut Self>
    where
        F: Fn(&Self, &str, &[String], &Config) + Send + Sync + 'static,
    {
        self.add_command(CommandDef::new(name, description).handler(handler))
    }

    /// Register a command implemented by the `<binary>-<name>` executable.
    ///
    /// # Errors
    ///
    /// As for [`Args::command`].
    pub fn external_command(
        &mut self,
        name: impl Into<crate::registry::CommandName>,
        description: impl Into<String>,
    ) -> ArgsResult<&mut Self> {
        self.add_command(CommandDef::new(name, description))
    }

    /// Register a fully described command.
    ///
    /// # Errors
    ///
    /// As for [`Args::command`].
    pub fn add_command(&mut self, def: CommandDef) -> ArgsResult<&mut Self> {
        self.registry.add_command(def, None, false)?;
        Ok(self)
    }

    /// Dispatch `name` when the input has no command token.
    ///
    /// # Errors
    ///
    /// Returns [`crate::ArgsError::UnknownCommand`] when no command has that
    /// name or alias.
    pub fn default_command(&mut self, name: &str) -> ArgsResult<&mut Self> {
        self.registry.set_default_command(name)?;
        Ok(self)
    }

    /// Add a usage example to the help output.
    ///
    /// # Errors
    ///
    /// Returns [`crate::ArgsError::InvalidExample`] when either text is blank.
    pub fn example(
        &mut self,
        usage: impl Into<String>,
        description: impl Into<String>,
    ) -> ArgsResult<&mut Self> {
        self.registry.add_example(Example::new(usage, description)?);
        Ok(self)
    }

    /// Add several `(usage, description)` examples.
    ///
    /// # Errors
    ///
    /// As for [`Args::example`].
    pub fn examples<I, U, D>(&mut self, examples: I) -> ArgsResult<&mut Self>
    where
        I: IntoIterator<Item = (U, D)>,
        U: Into<String>,
        D: Into<String>,
    {
        for (usage, description) in examples {
            self.example(usage, description)?;
        }
        Ok(self)
    }

    /// Forget every registration.
    pub fn reset(&mut self) -> &mut Self {
        self.registry.clear();
        self
    }

    /// Help text for the current registrations.
    ///
    /// Built-ins appear only after a parse has registered them.
    #[must_use]
    pub fn render_help(&self, runtime: &RuntimeConfig, binary: &str) -> String {
        help::render_help(&self.registry, runtime, binary)
    }

    /// Print help for the running program and exit with status 0.
    pub fn show_help(&self, runtime: &RuntimeConfig) -> ! {
        let text = self.render_help(runtime, &current_binary());
        DisplayRequest::new(DisplayKind::Help, text).exit()
    }

    /// Author listing from the version source.
    #[must_use]
    pub fn render_authors(&self) -> String {
        self.render_authors_with(&RuntimeConfig::default())
    }

    /// Author listing styled by `runtime`.
    #[must_use]
    pub fn render_authors_with(&self, runtime: &RuntimeConfig) -> String {
        let authors = self
            .version_source
            .as_ref()
            .and_then(|source| source.package())
            .map(|info| info.authors)
            .unwrap_or_default();
        help::render_authors(&authors, &Palette::from_runtime(runtime))
    }

    /// Print the author listing and exit with status 0.
    pub fn show_authors(&self) -> ! {
        DisplayRequest::new(DisplayKind::Authors, self.render_authors()).exit()
    }
}

/// Basename of the running executable.
fn current_binary() -> String {
    std::env::args_os()
        .next()
        .map(OsString::into_string)
        .and_then(Result::ok)
        .map(|path| {
            std::path::Path::new(&path)
                .file_name()
                .map_or_else(|| path.clone(), |name| name.to_string_lossy().into_owned())
        })
        .unwrap_or_default()
}

#[cfg(test)]
mod tests;
