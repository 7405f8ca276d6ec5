//! Option definitions and their registered form.

use heck::ToLowerCamelCase;

use crate::error::{ArgsError, ArgsResult};
use crate::value::{Coercer, OptionKind, Value};

/// Name given to [`OptionDef::new`].
///
/// A bare long name derives its short form from the first letter; a pair
/// supplies both forms explicitly.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OptionName {
    /// Long name only; the short form is derived at registration.
    Long(String),
    /// Explicit `(short, long)` pair.
    Pair(String, String),
}

impl OptionName {
    pub(crate) fn long(&self) -> &str {
        match self {
            Self::Long(long) | Self::Pair(_, long) => long,
        }
    }
}

impl From<&str> for OptionName {
    fn from(value: &str) -> Self {
        Self::Long(value.to_owned())
    }
}

impl From<String> for OptionName {
    fn from(value: String) -> Self {
        Self::Long(value)
    }
}

impl From<[&str; 2]> for OptionName {
    fn from([short, long]: [&str; 2]) -> Self {
        Self::Pair(short.to_owned(), long.to_owned())
    }
}

impl From<(&str, &str)> for OptionName {
    fn from((short, long): (&str, &str)) -> Self {
        Self::Pair(short.to_owned(), long.to_owned())
    }
}

/// Builder describing an option before registration.
///
/// # Examples
///
/// ```
/// use argsmith::{OptionDef, OptionKind};
/// let port = OptionDef::new("port", "Port to listen on").default_value(3000);
/// assert_eq!(port.inferred_kind(), OptionKind::Numeric);
/// ```
#[derive(Debug, Clone)]
pub struct OptionDef {
    pub(crate) name: OptionName,
    pub(crate) description: String,
    pub(crate) default: Option<Value>,
    pub(crate) kind: Option<OptionKind>,
    pub(crate) coercer: Option<Coercer>,
}

impl OptionDef {
    /// Start describing an option.
    #[must_use]
    pub fn new(name: impl Into<OptionName>, description: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            default: None,
            kind: None,
            coercer: None,
        }
    }

    /// Value used when the option is absent from the command line.
    #[must_use]
    pub fn default_value(mut self, value: impl Into<Value>) -> Self {
        self.default = Some(value.into());
        self
    }

    /// Declare the kind instead of inferring it from the default.
    #[must_use]
    pub const fn kind(mut self, kind: OptionKind) -> Self {
        self.kind = Some(kind);
        self
    }

    /// Run `f` over the resolved value.
    #[must_use]
    pub fn coerce<F>(mut self, f: F) -> Self
    where
        F: Fn(Value) -> Value + Send + Sync + 'static,
    {
        self.coercer = Some(Coercer::custom(f));
        self
    }

    /// Kind that registration will assign.
    #[must_use]
    pub fn inferred_kind(&self) -> OptionKind {
        self.kind
            .unwrap_or_else(|| OptionKind::infer(self.default.as_ref()))
    }
}

/// A registered option.
#[derive(Debug, Clone)]
pub struct ArgOption {
    short: Option<String>,
    long: String,
    short_key: Option<String>,
    long_key: String,
    description: String,
    default: Option<Value>,
    kind: OptionKind,
    coercer: Coercer,
    pub(crate) builtin: bool,
}

impl ArgOption {
    /// Short form, a single character.
    ///
    /// Only the built-in `help` and `version` options can lack one, when both
    /// case variants of their initial are already taken.
    #[must_use]
    pub fn short(&self) -> Option<&str> {
        self.short.as_deref()
    }

    /// Long form as registered.
    #[must_use]
    pub fn long(&self) -> &str {
        &self.long
    }

    /// Usage forms in resolution order: short first, then long.
    #[must_use]
    pub fn forms(&self) -> Vec<&str> {
        self.short
            .as_deref()
            .into_iter()
            .chain(std::iter::once(self.long.as_str()))
            .collect()
    }

    /// Help text.
    #[must_use]
    pub fn description(&self) -> &str {
        &self.description
    }

    /// Default value, if any.
    #[must_use]
    pub const fn default_value(&self) -> Option<&Value> {
        self.default.as_ref()
    }

    /// Kind assigned at registration.
    #[must_use]
    pub const fn kind(&self) -> OptionKind {
        self.kind
    }

    /// Returns `true` when `token` is one of the option's usage forms.
    #[must_use]
    pub fn matches(&self, token: &str) -> bool {
        self.short.as_deref() == Some(token) || self.long == token
    }

    /// Mapping keys paired with the usage form they are read from.
    pub(crate) fn keyed_forms(&self) -> Vec<(&str, &str)> {
        self.short
            .as_deref()
            .zip(self.short_key.as_deref())
            .into_iter()
            .chain(std::iter::once((self.long.as_str(), self.long_key.as_str())))
            .collect()
    }

    pub(crate) const fn coercer(&self) -> &Coercer {
        &self.coercer
    }

    /// Usage label shown in help, e.g. `-p, --port <n>`.
    #[must_use]
    pub fn usage_label(&self) -> String {
        let forms = self.short.as_ref().map_or_else(
            || format!("--{}", self.long),
            |short| format!("-{short}, --{}", self.long),
        );
        let placeholder = self.kind.placeholder();
        if placeholder.is_empty() {
            forms
        } else {
            format!("{forms} {placeholder}")
        }
    }

    /// Help description with the default-value suffix appended.
    #[must_use]
    pub fn described(&self) -> String {
        match &self.default {
            Some(Value::Bool(enabled)) => format!(
                "{} ({} by default)",
                self.description,
                if *enabled { "enabled" } else { "disabled" }
            ),
            Some(value) => match serde_json::to_string(value) {
                Ok(json) => format!("{} (defaults to {json})", self.description),
                Err(_) => self.description.clone(),
            },
            None => self.description.clone(),
        }
    }
}

/// Output key for a usage form: single characters verbatim, anything longer
/// camel-cased (`dry-run` becomes `dryRun`).
#[must_use]
pub fn mapping_key(form: &str) -> String {
    if form.chars().count() > 1 {
        form.to_lower_camel_case()
    } else {
        form.to_owned()
    }
}

fn validate_long(long: &str) -> ArgsResult<()> {
    if long.is_empty() {
        return Err(ArgsError::invalid_option(long, "long form must be non-empty"));
    }
    if long.starts_with(['-', '_']) {
        return Err(ArgsError::invalid_option(
            long,
            "long form must not start with '-' or '_'",
        ));
    }
    if !long.chars().all(|c| c.is_ascii_alphanumeric() || c == '-') {
        return Err(ArgsError::invalid_option(
            long,
            "long form must contain only ASCII alphanumeric characters or '-'",
        ));
    }
    Ok(())
}

fn validate_short(short: &str, long: &str) -> ArgsResult<()> {
    let mut chars = short.chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) if c.is_ascii_alphanumeric() => Ok(()),
        (Some(_), None) => Err(ArgsError::invalid_option(
            short,
            "short form must be ASCII alphanumeric",
        )),
        (None, _) => Err(ArgsError::invalid_option(
            format!("['', '{long}']"),
            "short form must be a single character",
        )),
        (Some(_), Some(_)) => Err(ArgsError::invalid_option(
            short,
            "short version of option is longer than 1 char",
        )),
    }
}

/// Pick the short form for `name`, avoiding shorts already in use.
///
/// A derived short tries the long name's first letter as written, then its
/// uppercase variant. When both are taken a built-in goes without a short
/// form and a user option is rejected. An explicit short has no fallback.
fn resolve_short<'a, I>(name: &OptionName, used: I, builtin: bool) -> ArgsResult<Option<String>>
where
    I: IntoIterator<Item = &'a str> + Clone,
{
    let taken = |candidate: &str| used.clone().into_iter().any(|s| s == candidate);
    match name {
        OptionName::Pair(short, long) => {
            validate_short(short, long)?;
            if taken(short.as_str()) {
                return Err(ArgsError::ShortFlagCollision {
                    short: short.clone(),
                    option: long.clone(),
                });
            }
            Ok(Some(short.clone()))
        }
        OptionName::Long(long) => {
            let first = long.chars().next().ok_or_else(|| {
                ArgsError::invalid_option(long, "long form must be non-empty")
            })?;
            let free = [first, first.to_ascii_uppercase()]
                .into_iter()
                .map(String::from)
                .find(|candidate| !taken(candidate.as_str()));
            if free.is_none() && !builtin {
                return Err(ArgsError::ShortFlagCollision {
                    short: first.to_string(),
                    option: long.clone(),
                });
            }
            Ok(free)
        }
    }
}

impl ArgOption {
    pub(crate) fn register<'a, I>(def: OptionDef, used_shorts: I, builtin: bool) -> ArgsResult<Self>
    where
        I: IntoIterator<Item = &'a str> + Clone,
    {
        validate_long(def.name.long())?;
        let short = resolve_short(&def.name, used_shorts, builtin)?;
        let kind = def.inferred_kind();
        let long = def.name.long().to_owned();
        Ok(Self {
            short_key: short.as_deref().map(mapping_key),
            long_key: mapping_key(&long),
            short,
            long,
            description: def.description,
            default: def.default,
            kind,
            coercer: def.coercer.unwrap_or(Coercer::Kind(kind)),
            builtin,
        })
    }
}
