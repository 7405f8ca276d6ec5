//! Turns tokenized input into a configuration mapping or a command match.
//!
//! Resolution never prints or exits. It reports what it found, including any
//! unknown flag, and leaves the terminating flows to the caller.

mod suggest;

use std::path::Path;

use crate::config::Config;
use crate::registry::{ArgOption, Registry};
use crate::tokenizer::{Flags, Tokens};

pub use suggest::{SUGGESTION_THRESHOLD, suggest};

/// A command selected by the input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandMatch {
    /// Primary name of the selected command.
    pub primary: String,
    /// Token that selected it, or `None` when the default command applied.
    pub selector: Option<String>,
    /// Positionals after the command token.
    pub sub_args: Vec<String>,
}

/// Outcome of [`resolve`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Resolution {
    /// Basename of the first positional.
    pub binary: String,
    /// Command selected by the second positional, or the default command.
    pub command: Option<CommandMatch>,
    /// Options resolved from defaults and flags.
    pub config: Config,
    /// First flag matching no option, reported only when no command matched.
    pub unknown: Option<String>,
}

/// Resolve `tokens` against `registry`.
///
/// The first positional names the invoked binary and the second is a
/// candidate command. Configuration is computed even when a command matches
/// so the command receives it.
#[must_use]
pub fn resolve(tokens: &Tokens, registry: &Registry) -> Resolution {
    let binary = tokens
        .positionals
        .first()
        .map(String::as_str)
        .map(basename)
        .unwrap_or_default();
    let command = match_command(tokens, registry);

    let mut config = Config::default();
    for option in registry.options() {
        read_option(option, &tokens.flags, &mut config);
    }

    let unknown = if command.is_none() {
        tokens
            .flags
            .keys()
            .find(|flag| registry.find_option(flag).is_none())
            .map(str::to_owned)
    } else {
        None
    };

    if let Some(found) = &command {
        tracing::debug!(
            command = %found.primary,
            selector = ?found.selector,
            sub_args = ?found.sub_args,
            "resolved command"
        );
    }

    Resolution {
        binary,
        command,
        config,
        unknown,
    }
}

fn match_command(tokens: &Tokens, registry: &Registry) -> Option<CommandMatch> {
    let Some(token) = tokens.positionals.get(1) else {
        return registry.default_command().map(|command| CommandMatch {
            primary: command.name().to_owned(),
            selector: None,
            sub_args: Vec::new(),
        });
    };
    registry.find_command(token).map(|command| CommandMatch {
        primary: command.name().to_owned(),
        selector: Some(token.clone()),
        sub_args: tokens.positionals.iter().skip(2).cloned().collect(),
    })
}

/// Returns `true` when either form of `option` appears in `flags`.
#[must_use]
pub fn is_present(option: &ArgOption, flags: &Flags) -> bool {
    option.forms().iter().any(|form| flags.contains(form))
}

/// Resolve one option into `config`.
///
/// The default seeds the value, then the short and the long form overwrite it
/// in that order when present. The value is brought into the option kind's
/// shape; if a default exists and the shapes still differ, the default wins.
/// After coercion the value is stored under both output keys, or removed from
/// them when it is `false`.
///
/// # Examples
///
/// ```
/// use argsmith::{Args, Config, OptionDef, TokenizerOptions, read_option, tokenize};
///
/// let mut args = Args::new();
/// args.add_option(OptionDef::new(["p", "port"], "Port").default_value(8080))?;
/// let tokens = tokenize(["tool", "--port", "3000"], &TokenizerOptions::default());
/// let mut config = Config::default();
/// for option in args.registry().options() {
///     read_option(option, &tokens.flags, &mut config);
/// }
/// assert_eq!(config.get_i64("port"), Some(3000));
/// assert_eq!(config.get_i64("p"), Some(3000));
/// # Ok::<(), argsmith::ArgsError>(())
/// ```
pub fn read_option(option: &ArgOption, flags: &Flags, config: &mut Config) {
    let default = option.default_value();
    let mut value = default.cloned();
    for form in option.forms() {
        if let Some(found) = flags.get(form) {
            value = Some(found.clone());
        }
    }

    let kind = option.kind();
    let resolved = value.map(|raw| {
        let normalised = kind.normalise(raw);
        let shaped = match default {
            Some(fallback) if fallback.shape() != normalised.shape() => fallback.clone(),
            _ => normalised,
        };
        option.coercer().apply(kind, shaped)
    });

    for (_, key) in option.keyed_forms() {
        match &resolved {
            Some(found) if found.is_truthy() => config.insert(key, found.clone()),
            _ => config.remove(key),
        }
    }
}

fn basename(path: &str) -> String {
    Path::new(path)
        .file_name()
        .map_or_else(|| path.to_owned(), |name| name.to_string_lossy().into_owned())
}
