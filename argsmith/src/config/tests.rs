//! Tests for the resolved configuration mapping.

use rstest::{fixture, rstest};
use serde::Deserialize;

use super::{Config, RuntimeConfig};
use crate::value::Value;

#[fixture]
fn config() -> Config {
    [
        ("p", Value::Bool(true)),
        ("port", Value::Integer(8080)),
        ("name", Value::from("demo")),
        ("ratio", Value::Float(0.5)),
        ("tags", Value::from(vec!["a", "b"])),
    ]
    .into_iter()
    .collect()
}

#[rstest]
fn typed_getters(config: Config) {
    assert_eq!(config.get_bool("p"), Some(true));
    assert_eq!(config.get_i64("port"), Some(8080));
    assert_eq!(config.get_f64("port"), Some(8080.0));
    assert_eq!(config.get_str("name"), Some("demo"));
    assert_eq!(config.get_f64("ratio"), Some(0.5));
    assert_eq!(config.get_list("tags").map(<[Value]>::len), Some(2));
    assert_eq!(config.get_str("port"), None);
    assert!(!config.contains("missing"));
}

#[rstest]
fn keys_are_sorted(config: Config) {
    assert_eq!(
        config.keys().collect::<Vec<_>>(),
        ["name", "p", "port", "ratio", "tags"]
    );
    assert_eq!(config.len(), 5);
}

#[rstest]
fn length_tracks_inserts_and_removals(mut config: Config) {
    assert!(Config::default().is_empty());
    config.remove("ratio");
    config.remove("tags");
    assert_eq!(config.len(), 3);
    assert!(!config.is_empty());
}

#[rstest]
fn insert_and_remove(mut config: Config) {
    config.remove("p");
    config.insert("dryRun", Value::Bool(true));
    assert!(!config.contains("p"));
    assert_eq!(config.get_bool("dryRun"), Some(true));
}

#[derive(Debug, Deserialize, PartialEq)]
struct Settings {
    port: u16,
    name: String,
    #[serde(default)]
    verbose: bool,
    tags: Vec<String>,
}

#[rstest]
fn extract_into_struct(config: Config) -> anyhow::Result<()> {
    let settings: Settings = config.extract()?;
    anyhow::ensure!(
        settings
            == Settings {
                port: 8080,
                name: "demo".into(),
                verbose: false,
                tags: vec!["a".into(), "b".into()],
            },
        "unexpected settings: {settings:?}"
    );
    Ok(())
}

#[rstest]
fn extract_reports_mismatch(config: Config) {
    assert!(config.extract::<Vec<u8>>().is_err());
}

#[rstest]
fn runtime_defaults() {
    let runtime = RuntimeConfig::default();
    assert!(runtime.help_enabled());
    assert!(runtime.version_enabled());
    assert_eq!(runtime.main_styles(), ["yellow"]);
    assert_eq!(runtime.sub_styles(), ["dim"]);
    assert!(runtime.filter().is_none());
}

#[rstest]
fn runtime_builders() {
    let runtime = RuntimeConfig::default()
        .help(false)
        .name("tool")
        .value("<dirs>")
        .main_color(["red", "bold"])
        .usage_filter(|text| Some(text.to_uppercase()));
    assert!(!runtime.help_enabled());
    assert_eq!(runtime.display_name(), Some("tool"));
    assert_eq!(runtime.value_placeholder(), Some("<dirs>"));
    assert_eq!(runtime.main_styles(), ["red", "bold"]);
    let filtered = runtime.filter().and_then(|filter| filter("abc"));
    assert_eq!(filtered.as_deref(), Some("ABC"));
}
