//! Command-line interface for the `hello_args` demo.
//!
//! The demo poses as a tiny package manager. `install` and `uninstall` run in
//! process, `binary` is delegated to a `hello_args-binary` executable found on
//! the search path and `authors` lists the package authors.

use std::io::{self, Write};

use argsmith::{Args, Config, RuntimeConfig, package_info};

use crate::error::Result;

/// Register the demo's options, commands and examples.
///
/// # Errors
///
/// Returns [`crate::error::DemoError::Arguments`] when a registration is
/// rejected.
pub fn build() -> Result<Args> {
    let mut args = Args::new().with_version_source(package_info!());
    args.option_with_default("port", "The port on which the app will be running", 3000)?
        .option_with_default(["d", "dry-run"], "Report what would change", false)?
        .option_with_default(["a", "abc"], "Label attached to installed packages", "def value")?
        .command(["install", "i"], "Install packages", |_, _, packages, config| {
            report(&install_lines(packages, config));
        })?
        .command(
            ["uninstall", "u", "rm", "remove"],
            "Remove packages",
            |_, _, packages, config| report(&uninstall_lines(packages, config)),
        )?
        .command("authors", "List the package authors", |args, _, _, _| {
            args.show_authors()
        })?
        .external_command(["binary", "b"], "Run the hello_args-binary helper")?
        .examples([
            ("hello_args install left-pad", "Install a package"),
            ("hello_args --port 8080", "Print the options for a custom port"),
        ])?;
    Ok(args)
}

/// Per-run settings: a `<package>` placeholder on the usage line, with
/// colours only when stdout is a terminal.
#[must_use]
pub fn runtime() -> RuntimeConfig {
    RuntimeConfig::default().value("<package>")
}

/// Lines printed by the `install` command.
#[must_use]
pub fn install_lines(packages: &[String], config: &Config) -> Vec<String> {
    if packages.is_empty() {
        return vec!["nothing to install".to_owned()];
    }
    let label = config.get_str("abc").unwrap_or_default();
    let verb = if config.contains("dryRun") {
        "would install"
    } else {
        "installing"
    };
    packages
        .iter()
        .map(|package| format!("{verb} {package} ({label})"))
        .collect()
}

/// Lines printed by the `uninstall` command.
#[must_use]
pub fn uninstall_lines(packages: &[String], config: &Config) -> Vec<String> {
    let verb = if config.contains("dryRun") {
        "would remove"
    } else {
        "removing"
    };
    packages
        .iter()
        .map(|package| format!("{verb} {package}"))
        .collect()
}

/// Print the resolved options as pretty JSON.
///
/// # Errors
///
/// Fails when serialisation or writing to stdout fails.
pub fn print_options(config: &Config) -> Result<()> {
    let json = serde_json::to_string_pretty(config)?;
    let mut out = io::stdout().lock();
    writeln!(out, "{json}")?;
    Ok(())
}

fn report(lines: &[String]) {
    let mut out = io::stdout().lock();
    for line in lines {
        if let Err(err) = writeln!(out, "{line}") {
            tracing::warn!(error = %err, "failed to write command output");
            return;
        }
    }
}
