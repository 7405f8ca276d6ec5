//! Primary error enum for registration and dispatch flows.

use thiserror::Error;

/// Result alias used across the crate.
pub type ArgsResult<T> = Result<T, ArgsError>;

/// Errors raised while registering options, commands and examples, or while
/// dispatching an external subcommand.
///
/// Help, version and unknown-option output are not errors; they surface as
/// [`crate::DisplayRequest`] values instead.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ArgsError {
    /// The option name is empty, malformed, or its short form is not a single
    /// ASCII alphanumeric character.
    #[error("invalid option name '{name}': {reason}")]
    InvalidOptionName {
        /// Name as supplied by the caller.
        name: String,
        /// Why the name was rejected.
        reason: String,
    },

    /// No free short flag could be found for the option.
    #[error("short flag '-{short}' for option '--{option}' is already taken")]
    ShortFlagCollision {
        /// The short flag that collided.
        short: String,
        /// Long name of the option being registered.
        option: String,
    },

    /// An option with the same long name is already registered.
    #[error("option '--{long}' is already registered")]
    DuplicateOption {
        /// Long name shared by both registrations.
        long: String,
    },

    /// The command name or one of its aliases is empty or looks like a flag.
    #[error("invalid command name '{name}': {reason}")]
    InvalidCommandName {
        /// Name as supplied by the caller.
        name: String,
        /// Why the name was rejected.
        reason: String,
    },

    /// Another command already answers to this selector.
    #[error("command selector '{selector}' is already registered")]
    DuplicateCommand {
        /// Primary name or alias that is already taken.
        selector: String,
    },

    /// A command was referenced before it was registered.
    #[error("command '{name}' is not registered")]
    UnknownCommand {
        /// Name that failed to resolve.
        name: String,
    },

    /// An example is missing its usage text or description.
    #[error("usage for adding an example: example(\"usage\", \"description\"); {reason}")]
    InvalidExample {
        /// What was missing.
        reason: String,
    },

    /// The `<binary>-<command>` executable could not be found.
    #[error("executable '{binary}' for external subcommand not found")]
    MissingExternalBinary {
        /// Name of the executable that was looked up.
        binary: String,
        /// Lookup failure reported by the search.
        #[source]
        source: which::Error,
    },

    /// The external subcommand was found but could not be started.
    #[error("failed to spawn '{binary}': {source}")]
    Spawn {
        /// Name of the executable.
        binary: String,
        /// Underlying operating system error.
        #[source]
        source: std::io::Error,
    },

    /// Waiting for the external subcommand failed.
    #[error("failed to wait for '{binary}': {source}")]
    Wait {
        /// Name of the executable.
        binary: String,
        /// Underlying operating system error.
        #[source]
        source: std::io::Error,
    },

    /// Writing help or version output failed.
    #[error("failed to write output: {0}")]
    Io(#[from] std::io::Error),
}
