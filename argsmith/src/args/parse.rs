//! The parse pipeline behind [`Args::try_parse`].

use std::ffi::OsString;

use super::{Args, DisplayKind, DisplayRequest, Parsed};
use crate::config::{Config, RuntimeConfig};
use crate::dispatch::{external_program, forwarded_args, run_external};
use crate::error::ArgsResult;
use crate::help::{self, Palette};
use crate::registry::{CommandAction, CommandDef, OptionDef};
use crate::resolver::{CommandMatch, Resolution, is_present, resolve, suggest};
use crate::tokenizer::{Tokens, tokenize};
use crate::value::OptionKind;

const HELP: &str = "help";
const VERSION: &str = "version";

impl Args {
    /// Parse `argv` with the default [`RuntimeConfig`].
    ///
    /// # Errors
    ///
    /// See [`Args::try_parse_with`].
    pub fn try_parse<I, S>(&mut self, argv: I) -> ArgsResult<Parsed>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.try_parse_with(argv, &RuntimeConfig::default())
    }

    /// Parse `argv` and report the outcome without printing or exiting.
    ///
    /// `argv` follows the interpreter convention: the launcher, then the
    /// program path, then user arguments. The launcher is dropped, the
    /// program's basename names the binary and the next positional may
    /// select a command.
    ///
    /// In order of precedence the outcome is version output when the version
    /// flag is given, an unknown-option notice when a flag matches no option
    /// and no command was selected, the matched command's result, help output
    /// when the help flag is given, and otherwise the resolved options.
    ///
    /// # Errors
    ///
    /// Returns registration errors from the built-ins and any failure to
    /// launch or wait for an external command binary.
    pub fn try_parse_with<I, S>(&mut self, args: I, runtime: &RuntimeConfig) -> ArgsResult<Parsed>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let argv: Vec<String> = args.into_iter().map(Into::into).collect();
        let version = self.install_builtins(runtime)?;
        let this: &Self = self;

        let tokens = this.tokenize(&argv, runtime);
        let resolution = resolve(&tokens, &this.registry);

        if let Some(text) = version.filter(|_| this.builtin_present(VERSION, &tokens)) {
            return Ok(Parsed::Display(DisplayRequest::new(
                DisplayKind::Version,
                format!("{text}\n"),
            )));
        }
        if let Some(unknown) = &resolution.unknown {
            return Ok(Parsed::Display(this.unknown_option(unknown, &resolution, runtime)));
        }
        if let Some(matched) = &resolution.command {
            return this.dispatch(matched, &resolution, &argv, runtime);
        }
        if runtime.help_enabled() && this.builtin_present(HELP, &tokens) {
            return Ok(Parsed::Display(this.help_request(&resolution, runtime)));
        }
        Ok(Parsed::Options(resolution.config))
    }

    /// Parse `argv`, printing help, version or unknown-option text and
    /// exiting when the outcome calls for it.
    ///
    /// A handled command yields an empty mapping. An external command's exit
    /// is propagated as this process's own.
    ///
    /// # Errors
    ///
    /// As for [`Args::try_parse_with`].
    pub fn parse<I, S>(&mut self, argv: I) -> ArgsResult<Config>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.parse_with(argv, &RuntimeConfig::default())
    }

    /// [`Args::parse`] with an explicit [`RuntimeConfig`].
    ///
    /// # Errors
    ///
    /// As for [`Args::try_parse_with`].
    pub fn parse_with<I, S>(&mut self, argv: I, runtime: &RuntimeConfig) -> ArgsResult<Config>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        match self.try_parse_with(argv, runtime)? {
            Parsed::Options(config) => Ok(config),
            Parsed::Handled { .. } => Ok(Config::default()),
            Parsed::Exited(exit) => exit.propagate(),
            Parsed::Display(request) => request.exit(),
        }
    }

    /// Parse the running process's arguments.
    ///
    /// A native binary has no separate launcher, so the program path is
    /// supplied twice to keep the launcher-first convention.
    ///
    /// # Errors
    ///
    /// As for [`Args::try_parse_with`].
    pub fn parse_env(&mut self) -> ArgsResult<Config> {
        self.parse_env_with(&RuntimeConfig::default())
    }

    /// [`Args::parse_env`] with an explicit [`RuntimeConfig`].
    ///
    /// # Errors
    ///
    /// As for [`Args::try_parse_with`].
    pub fn parse_env_with(&mut self, runtime: &RuntimeConfig) -> ArgsResult<Config> {
        self.parse_with(env_argv(std::env::args_os()), runtime)
    }

    /// [`Args::try_parse_with`] over the running process's arguments, with
    /// the program path doubled as for [`Args::parse_env`].
    ///
    /// # Errors
    ///
    /// As for [`Args::try_parse_with`].
    pub fn try_parse_env_with(&mut self, runtime: &RuntimeConfig) -> ArgsResult<Parsed> {
        self.try_parse_with(env_argv(std::env::args_os()), runtime)
    }

    /// Replace last parse's built-ins with the ones `runtime` asks for.
    /// Returns the version to report, when the version option is active.
    fn install_builtins(&mut self, runtime: &RuntimeConfig) -> ArgsResult<Option<String>> {
        self.registry.remove_builtins();
        if runtime.help_enabled() {
            if self.registry.find_option(HELP).is_none() {
                self.registry.add_option(
                    OptionDef::new(HELP, "Output usage information").kind(OptionKind::Flag),
                    true,
                )?;
            }
            if self.registry.find_command(HELP).is_none() {
                self.registry.add_command(
                    CommandDef::new(HELP, "Display help"),
                    Some(CommandAction::Help),
                    true,
                )?;
            }
        }
        if !runtime.version_enabled() {
            return Ok(None);
        }
        let version = self
            .version_source
            .as_ref()
            .and_then(|source| source.package())
            .and_then(|info| info.version);
        if version.is_some() && self.registry.find_option(VERSION).is_none() {
            self.registry.add_option(
                OptionDef::new(VERSION, "Output the version number").kind(OptionKind::Flag),
                true,
            )?;
        }
        Ok(version)
    }

    fn tokenize(&self, argv: &[String], runtime: &RuntimeConfig) -> Tokens {
        let forms_of = |kind: OptionKind| {
            self.registry
                .options()
                .iter()
                .filter(move |option| option.kind() == kind)
                .flat_map(|option| option.forms())
        };
        let options = runtime
            .tokenizer_options()
            .with_keys(forms_of(OptionKind::Text), forms_of(OptionKind::Flag));
        tokenize(argv.iter().skip(1), &options)
    }

    /// Returns `true` when the named built-in option is registered and given.
    fn builtin_present(&self, long: &str, tokens: &Tokens) -> bool {
        self.registry
            .options()
            .iter()
            .find(|option| option.builtin && option.long() == long)
            .is_some_and(|option| is_present(option, &tokens.flags))
    }

    fn help_request(&self, resolution: &Resolution, runtime: &RuntimeConfig) -> DisplayRequest {
        DisplayRequest::new(
            DisplayKind::Help,
            help::render_help(&self.registry, runtime, &resolution.binary),
        )
    }

    fn unknown_option(
        &self,
        unknown: &str,
        resolution: &Resolution,
        runtime: &RuntimeConfig,
    ) -> DisplayRequest {
        let closest = suggest(unknown, &self.registry);
        tracing::debug!(option = unknown, suggestion = ?closest.map(|o| o.long()), "unknown option");
        let text = closest.map_or_else(
            || {
                let help = help::render_help(&self.registry, runtime, &resolution.binary);
                help::render_unknown(unknown, &help)
            },
            |option| help::render_suggestion(unknown, option, &Palette::from_runtime(runtime)),
        );
        DisplayRequest::new(
            DisplayKind::UnknownOption {
                option: unknown.to_owned(),
                suggestion: closest.map(|option| option.long().to_owned()),
            },
            text,
        )
    }

    fn dispatch(
        &self,
        matched: &CommandMatch,
        resolution: &Resolution,
        argv: &[String],
        runtime: &RuntimeConfig,
    ) -> ArgsResult<Parsed> {
        let Some(command) = self.registry.find_command(&matched.primary) else {
            return Ok(Parsed::Options(resolution.config.clone()));
        };
        match &command.action {
            CommandAction::Handler(handler) => {
                tracing::debug!(command = %matched.primary, "running command handler");
                handler(self, &matched.primary, &matched.sub_args, &resolution.config);
                Ok(Parsed::Handled {
                    command: matched.primary.clone(),
                })
            }
            CommandAction::Help => Ok(Parsed::Display(self.help_request(resolution, runtime))),
            CommandAction::External => {
                let program = external_program(&resolution.binary, &matched.primary);
                let args = forwarded_args(argv, matched.selector.is_some());
                tracing::debug!(%program, ?args, "dispatching to command binary");
                run_external(self.launcher.as_ref(), &program, &args).map(Parsed::Exited)
            }
        }
    }
}

/// The process arguments with the program path doubled.
pub(super) fn env_argv(args: impl Iterator<Item = OsString>) -> Vec<String> {
    let mut argv: Vec<String> = args
        .map(|arg| arg.to_string_lossy().into_owned())
        .collect();
    if let Some(program) = argv.first().cloned() {
        argv.insert(0, program);
    }
    argv
}
