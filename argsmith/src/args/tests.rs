//! Tests for the parse pipeline and the registration facade.

use std::io;
use std::sync::Arc;

use parking_lot::Mutex;
use rstest::{fixture, rstest};

use super::parse::env_argv;
use super::{Args, DisplayKind, Parsed, is_display_request};
use crate::config::{ColorChoice, Config, RuntimeConfig};
use crate::dispatch::{ChildExit, ChildHandle, Launcher, RelaySignal};
use crate::error::{ArgsError, ArgsResult};
use crate::package::PackageInfo;
use crate::registry::OptionDef;

type Calls = Arc<Mutex<Vec<(String, Vec<String>)>>>;

struct ExitedChild(i32);

impl ChildHandle for ExitedChild {
    fn id(&self) -> u32 {
        1
    }

    fn forward_signal(&self, _signal: RelaySignal) -> io::Result<()> {
        Ok(())
    }

    fn wait_for_exit(&self) -> io::Result<ChildExit> {
        Ok(ChildExit::code(self.0))
    }
}

struct RecordingLauncher(Calls);

impl Launcher for RecordingLauncher {
    fn launch(&self, program: &str, args: &[String]) -> ArgsResult<Box<dyn ChildHandle>> {
        self.0.lock().push((program.to_owned(), args.to_vec()));
        Ok(Box::new(ExitedChild(0)))
    }
}

#[fixture]
fn runtime() -> RuntimeConfig {
    RuntimeConfig::default().color(ColorChoice::Never)
}

struct Harness {
    args: Args,
    handled: Calls,
    launched: Calls,
}

#[fixture]
fn harness() -> Harness {
    let handled = Calls::default();
    let launched = Calls::default();
    let mut args = Args::new()
        .with_launcher(RecordingLauncher(Arc::clone(&launched)))
        .with_version_source(PackageInfo::from_cargo("foo", "1.4.0", "Ann"));
    for (name, aliases) in [("install", vec!["i"]), ("uninstall", vec!["u", "rm", "remove"])] {
        let seen = Arc::clone(&handled);
        let selectors: Vec<String> = std::iter::once(name)
            .chain(aliases)
            .map(str::to_owned)
            .collect();
        args.command(selectors, "desc here", move |_, primary, sub, _| {
            seen.lock().push((primary.to_owned(), sub.to_vec()));
        })
        .expect("register command");
    }
    args.external_command(["binary", "b"], "some desc")
        .expect("register binary")
        .option_with_default(["a", "abc"], "something", "def value")
        .expect("register abc")
        .option("port", "Port")
        .expect("register port");
    Harness {
        args,
        handled,
        launched,
    }
}

fn display_kind(parsed: &Parsed) -> Option<&DisplayKind> {
    parsed.as_display().map(super::DisplayRequest::kind)
}

#[rstest]
fn resolves_options_without_command(mut harness: Harness, runtime: RuntimeConfig) {
    let parsed = harness
        .args
        .try_parse_with(["node", "foo", "-p", "--abc", "x"], &runtime)
        .expect("parse");
    let config = parsed.into_config().expect("options outcome");
    assert_eq!(config.get_bool("port"), Some(true));
    assert_eq!(config.get_str("abc"), Some("x"));
    assert_eq!(config.get_str("a"), Some("x"));
}

#[rstest]
fn alias_runs_handler_with_primary_name(mut harness: Harness, runtime: RuntimeConfig) {
    let parsed = harness
        .args
        .try_parse_with(["node", "foo", "i"], &runtime)
        .expect("parse");
    assert_eq!(
        parsed,
        Parsed::Handled {
            command: "install".into()
        }
    );
    assert_eq!(*harness.handled.lock(), vec![("install".to_owned(), Vec::new())]);
}

#[rstest]
fn handler_sees_sub_args(mut harness: Harness, runtime: RuntimeConfig) {
    harness
        .args
        .try_parse_with(["node", "foo", "rm", "left-pad", "--unknown"], &runtime)
        .expect("parse");
    assert_eq!(
        *harness.handled.lock(),
        vec![("uninstall".to_owned(), vec!["left-pad".to_owned()])]
    );
}

#[rstest]
fn handler_receives_resolved_options(runtime: RuntimeConfig) {
    let received: Arc<Mutex<Option<Config>>> = Arc::default();
    let sink = Arc::clone(&received);
    let mut args = Args::new();
    args.option_with_default("level", "Level", 1)
        .and_then(|a| {
            a.command("run", "Run", move |_, _, _, config| {
                *sink.lock() = Some(config.clone());
            })
        })
        .expect("register");
    args.try_parse_with(["node", "foo", "run", "--level", "3"], &runtime)
        .expect("parse");
    let config = received.lock().clone().expect("handler ran");
    assert_eq!(config.get_i64("level"), Some(3));
}

#[rstest]
fn external_command_forwards_the_tail(mut harness: Harness, runtime: RuntimeConfig) {
    let parsed = harness
        .args
        .try_parse_with(["node", "/usr/bin/foo", "b", "x", "--flag"], &runtime)
        .expect("parse");
    assert_eq!(parsed, Parsed::Exited(ChildExit::code(0)));
    assert_eq!(
        *harness.launched.lock(),
        vec![(
            "foo-binary".to_owned(),
            vec!["x".to_owned(), "--flag".to_owned()]
        )]
    );
}

#[rstest]
fn default_command_runs_without_token(mut harness: Harness, runtime: RuntimeConfig) {
    harness.args.default_command("binary").expect("binary exists");
    harness
        .args
        .try_parse_with(["node", "foo", "-p"], &runtime)
        .expect("parse");
    assert_eq!(
        *harness.launched.lock(),
        vec![("foo-binary".to_owned(), vec!["-p".to_owned()])]
    );
}

#[rstest]
fn unknown_default_command_is_rejected(mut harness: Harness) {
    let err = harness.args.default_command("nope").expect_err("not registered");
    assert!(matches!(err, ArgsError::UnknownCommand { ref name } if name == "nope"));
}

#[rstest]
#[case(&["node", "foo", "--help"])]
#[case(&["node", "foo", "-h"])]
#[case(&["node", "foo", "help"])]
fn help_is_a_display_request(
    mut harness: Harness,
    runtime: RuntimeConfig,
    #[case] argv: &[&str],
) {
    let parsed = harness
        .args
        .try_parse_with(argv.iter().copied(), &runtime)
        .expect("parse");
    assert!(is_display_request(&parsed));
    assert_eq!(display_kind(&parsed), Some(&DisplayKind::Help));
    let text = parsed.as_display().map(super::DisplayRequest::text).unwrap_or_default();
    assert!(text.contains("Usage: foo [options] [command]"));
    assert!(text.contains("-h, --help"));
    assert!(text.contains("-v, --version"));
}

#[rstest]
fn help_can_be_disabled(mut harness: Harness, runtime: RuntimeConfig) {
    harness
        .args
        .try_parse_with(["node", "foo"], &runtime)
        .expect("first parse");
    assert!(harness.args.registry().find_option("help").is_some());

    let quiet = runtime.help(false);
    let parsed = harness
        .args
        .try_parse_with(["node", "foo", "--help"], &quiet)
        .expect("second parse");
    assert!(harness.args.registry().find_option("help").is_none());
    assert!(harness.args.registry().find_command("help").is_none());
    assert!(matches!(
        display_kind(&parsed),
        Some(DisplayKind::UnknownOption { .. })
    ));
}

#[rstest]
#[case(&["node", "foo", "--version"])]
#[case(&["node", "foo", "-v", "install"])]
fn version_flag_short_circuits(
    mut harness: Harness,
    runtime: RuntimeConfig,
    #[case] argv: &[&str],
) {
    let parsed = harness
        .args
        .try_parse_with(argv.iter().copied(), &runtime)
        .expect("parse");
    assert_eq!(display_kind(&parsed), Some(&DisplayKind::Version));
    assert_eq!(parsed.as_display().map(super::DisplayRequest::text), Some("1.4.0\n"));
    assert!(harness.handled.lock().is_empty());
}

#[rstest]
fn version_option_needs_package_metadata(runtime: RuntimeConfig) {
    let mut args = Args::new();
    args.try_parse_with(["node", "foo"], &runtime).expect("parse");
    assert!(args.registry().find_option("version").is_none());
}

#[rstest]
fn help_falls_back_to_long_form_when_both_shorts_are_taken(runtime: RuntimeConfig) {
    let mut args = Args::new();
    args.option("host", "Host")
        .expect("register host")
        .option("header", "Header")
        .expect("register header");

    let parsed = args
        .try_parse_with(["node", "tool", "--host", "x"], &runtime)
        .expect("built-ins never collide");
    let config = parsed.into_config().expect("options outcome");
    assert_eq!(config.get_str("host"), Some("x"));
    assert_eq!(config.get_str("h"), Some("x"));

    let help = args.registry().find_option("help").expect("help registered");
    assert_eq!(help.short(), None);
    assert_eq!(help.forms(), ["help"]);
    let parsed = args
        .try_parse_with(["node", "tool", "--help"], &runtime)
        .expect("parse");
    assert_eq!(display_kind(&parsed), Some(&DisplayKind::Help));
    let text = parsed.as_display().map(super::DisplayRequest::text).unwrap_or_default();
    assert!(text.contains("    --help  "), "{text}");
}

#[rstest]
fn version_falls_back_to_long_form_when_both_shorts_are_taken(runtime: RuntimeConfig) {
    let mut args =
        Args::new().with_version_source(PackageInfo::from_cargo("foo", "2.0.0", ""));
    args.option("verbose", "Chatty")
        .expect("register verbose")
        .option("validate", "Check only")
        .expect("register validate");

    let parsed = args
        .try_parse_with(["node", "tool", "-V"], &runtime)
        .expect("built-ins never collide");
    let config = parsed.into_config().expect("options outcome");
    assert_eq!(config.get_bool("validate"), Some(true));

    let parsed = args
        .try_parse_with(["node", "tool", "--version"], &runtime)
        .expect("parse");
    assert_eq!(display_kind(&parsed), Some(&DisplayKind::Version));
    assert_eq!(parsed.as_display().map(super::DisplayRequest::text), Some("2.0.0\n"));
}

#[rstest]
fn unknown_option_suggests_close_match(mut harness: Harness, runtime: RuntimeConfig) {
    let parsed = harness
        .args
        .try_parse_with(["node", "foo", "--potr"], &runtime)
        .expect("parse");
    assert_eq!(
        display_kind(&parsed),
        Some(&DisplayKind::UnknownOption {
            option: "potr".into(),
            suggestion: Some("port".into()),
        })
    );
    let text = parsed.as_display().map(super::DisplayRequest::text).unwrap_or_default();
    assert!(text.contains("Did you mean the following one?"));
    assert!(text.contains("-p, --port"));
}

#[rstest]
fn unknown_option_without_match_shows_help(mut harness: Harness, runtime: RuntimeConfig) {
    let parsed = harness
        .args
        .try_parse_with(["node", "foo", "--zzzzzz"], &runtime)
        .expect("parse");
    let text = parsed.as_display().map(super::DisplayRequest::text).unwrap_or_default();
    assert!(text.starts_with("The option \"zzzzzz\" is unknown. Here's a list"));
    assert!(text.contains("  Options:"));
}

#[rstest]
fn reset_forgets_registrations(mut harness: Harness, runtime: RuntimeConfig) {
    harness.args.reset();
    assert!(harness.args.registry().options().is_empty());
    let parsed = harness
        .args
        .try_parse_with(["node", "foo", "i"], &runtime)
        .expect("parse");
    assert_eq!(parsed, Parsed::Options(Config::default()));
}

#[rstest]
fn batch_registration() {
    let mut args = Args::new();
    args.options([
        OptionDef::new("port", "Port").default_value(80),
        OptionDef::new("host", "Host").default_value("localhost"),
    ])
    .and_then(|a| a.examples([("tool -p 8080", "Listen on 8080"), ("tool", "Defaults")]))
    .expect("register");
    assert_eq!(args.registry().options().len(), 2);
    assert_eq!(args.registry().examples().len(), 2);

    let err = args
        .examples([("tool", "")])
        .expect_err("blank description");
    assert!(matches!(err, ArgsError::InvalidExample { .. }));
}

#[rstest]
fn env_argv_doubles_the_program() {
    let argv = env_argv(["/bin/tool", "-p"].iter().map(std::ffi::OsString::from));
    assert_eq!(argv, ["/bin/tool", "/bin/tool", "-p"]);
    assert!(env_argv(std::iter::empty()).is_empty());
}

#[rstest]
#[case("Ann", "\n  Author: Ann\n")]
#[case("Ann:Bo", "\n  Authors\n  - Ann\n  - Bo\n")]
#[case("", "\n  No author found.\n")]
fn authors_come_from_package_metadata(#[case] authors: &str, #[case] expected: &str, runtime: RuntimeConfig) {
    let args = Args::new().with_version_source(PackageInfo::from_cargo("foo", "1.0.0", authors));
    assert_eq!(args.render_authors_with(&runtime), expected);
}
