//! Declarative command-line arguments for small tools.
//!
//! `argsmith` lets a program register named options (with short forms,
//! defaults and coercion) and subcommands (with aliases, handled in process or
//! by a separate `<binary>-<command>` executable), then parse an argument
//! vector into a [`Config`] mapping. Aligned help output, fuzzy suggestions
//! for mistyped options and a version flag come for free.
//!
//! ```
//! use argsmith::{Args, ColorChoice, Parsed, RuntimeConfig};
//!
//! let mut args = Args::new();
//! args.option_with_default("port", "Port to listen on", 8080)?
//!     .option(["d", "dry-run"], "Skip writes")?
//!     .command(["install", "i"], "Install a package", |_, name, sub, _| {
//!         assert_eq!(name, "install");
//!         assert_eq!(sub, ["left-pad"]);
//!     })?;
//!
//! let runtime = RuntimeConfig::default().color(ColorChoice::Never);
//! let parsed = args.try_parse_with(["node", "tool", "--port", "3000", "-d"], &runtime)?;
//! let config = parsed.into_config().unwrap_or_default();
//! assert_eq!(config.get_i64("port"), Some(3000));
//! assert_eq!(config.get_bool("dryRun"), Some(true));
//!
//! let parsed = args.try_parse_with(["node", "tool", "i", "left-pad"], &runtime)?;
//! assert!(matches!(parsed, Parsed::Handled { ref command } if command == "install"));
//! # Ok::<(), argsmith::ArgsError>(())
//! ```
//!
//! Output keys follow the option names: short forms verbatim, long forms in
//! camel case. Options that resolve to `false` or to nothing are omitted.

mod args;
mod config;
mod dispatch;
mod error;
mod help;
mod package;
mod registry;
mod resolver;
mod tokenizer;
mod value;

pub use args::{Args, DisplayKind, DisplayRequest, Parsed, is_display_request};
pub use config::{ColorChoice, Config, RuntimeConfig, UsageFilter};
pub use dispatch::{
    ChildExit, ChildHandle, GRACE, Launcher, ProcessChild, ProcessLauncher, RelaySignal,
    external_program, forwarded_args, run_external,
};
pub use error::{ArgsError, ArgsResult};
pub use help::{Palette, render_authors, render_help, render_suggestion, render_unknown};
pub use package::{ManifestSource, PackageInfo, VersionSource};
pub use registry::{
    ArgOption, Command, CommandDef, CommandName, Entry, EntryKind, Example, Handler, OptionDef,
    OptionName, Registry, mapping_key,
};
pub use resolver::{
    CommandMatch, Resolution, SUGGESTION_THRESHOLD, is_present, read_option, resolve, suggest,
};
pub use tokenizer::{Flags, TokenizerOptions, Tokens, tokenize};
pub use value::{CoerceFn, Coercer, OptionKind, Value};
