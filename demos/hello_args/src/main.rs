//! `hello_args` entry-point: register the demo interface, parse the process
//! arguments and act on the outcome.

use argsmith::Parsed;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

use hello_args::cli::{build, print_options, runtime};
use hello_args::error::Result;

fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;
    setup_logging();
    run().map_err(color_eyre::eyre::Report::from)
}

/// Log to stderr so stdout stays reserved for help and command output.
fn setup_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

fn run() -> Result<()> {
    let mut args = build()?;
    match args.try_parse_env_with(&runtime())? {
        Parsed::Options(config) => print_options(&config),
        Parsed::Handled { command } => {
            tracing::debug!(%command, "command finished");
            Ok(())
        }
        Parsed::Exited(exit) => exit.propagate(),
        Parsed::Display(request) => request.exit(),
    }
}
