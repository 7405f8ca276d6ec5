//! Splits a raw argument vector into positionals and flags.
//!
//! Lexing is delegated to `clap_lex`; this module layers the familiar
//! shell-tool conventions on top: `--key=value`, `--key value`, `--no-key`,
//! clustered short flags (`-abc`, `-n5`), `--` as the end of flags, repeated
//! keys collecting into lists and numeric-looking values becoming numbers.

use std::collections::{BTreeMap, BTreeSet};
use std::ffi::{OsStr, OsString};

use clap_lex::{ArgCursor, RawArgs};

use crate::value::Value;

/// Knobs forwarded verbatim to the tokenizer.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TokenizerOptions {
    strings: BTreeSet<String>,
    booleans: BTreeSet<String>,
    aliases: BTreeMap<String, Vec<String>>,
    stop_early: bool,
}

impl TokenizerOptions {
    /// Treat `key` as text: values are never turned into numbers and a bare
    /// `--key` yields an empty string.
    #[must_use]
    pub fn string(mut self, key: impl Into<String>) -> Self {
        self.strings.insert(key.into());
        self
    }

    /// Treat `key` as a switch that never consumes the next argument.
    #[must_use]
    pub fn boolean(mut self, key: impl Into<String>) -> Self {
        self.booleans.insert(key.into());
        self
    }

    /// Mirror every value set for `key` onto `alias`, and the other way round.
    #[must_use]
    pub fn alias(mut self, key: impl Into<String>, other: impl Into<String>) -> Self {
        let (left, right) = (key.into(), other.into());
        self.aliases
            .entry(left.clone())
            .or_default()
            .push(right.clone());
        self.aliases.entry(right).or_default().push(left);
        self
    }

    /// Stop parsing flags at the first positional.
    #[must_use]
    pub const fn stop_early(mut self, enabled: bool) -> Self {
        self.stop_early = enabled;
        self
    }

    /// Merge registry-derived string and boolean keys into a copy.
    pub(crate) fn with_keys<'a>(
        &self,
        strings: impl IntoIterator<Item = &'a str>,
        booleans: impl IntoIterator<Item = &'a str>,
    ) -> Self {
        let mut merged = self.clone();
        merged.strings.extend(strings.into_iter().map(str::to_owned));
        merged.booleans.extend(booleans.into_iter().map(str::to_owned));
        merged
    }

    fn is_string(&self, key: &str) -> bool {
        self.strings.contains(key)
    }

    fn is_boolean(&self, key: &str) -> bool {
        self.booleans.contains(key)
    }
}

/// Flags in the order they were first seen.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Flags(Vec<(String, Value)>);

impl Flags {
    /// Value recorded for `key`.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.iter().find(|(k, _)| k == key).map(|(_, v)| v)
    }

    /// Returns `true` when `key` was supplied.
    #[must_use]
    pub fn contains(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    /// Flag names in first-seen order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(|(k, _)| k.as_str())
    }

    /// `(name, value)` pairs in first-seen order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Number of distinct flags.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns `true` when no flags were supplied.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    fn set(&mut self, key: &str, value: Value, overwrite: bool) {
        match self.0.iter_mut().find(|(k, _)| k == key) {
            Some((_, existing)) if overwrite || matches!(existing, Value::Bool(_)) => {
                *existing = value;
            }
            Some((_, existing)) => existing.push(value),
            None => self.0.push((key.to_owned(), value)),
        }
    }
}

/// Tokenizer output.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Tokens {
    /// Non-flag arguments, in order.
    pub positionals: Vec<String>,
    /// Flags keyed by the name used on the command line.
    pub flags: Flags,
}

/// Split `args` into positionals and flags.
///
/// # Examples
///
/// ```
/// use argsmith::{TokenizerOptions, Value, tokenize};
/// let tokens = tokenize(["foo", "-p", "--data", "--name=x"], &TokenizerOptions::default());
/// assert_eq!(tokens.positionals, ["foo"]);
/// assert_eq!(tokens.flags.get("p"), Some(&Value::Bool(true)));
/// assert_eq!(tokens.flags.get("name"), Some(&Value::Text("x".into())));
/// ```
#[must_use]
pub fn tokenize<I, S>(args: I, options: &TokenizerOptions) -> Tokens
where
    I: IntoIterator<Item = S>,
    S: Into<OsString>,
{
    let raw = RawArgs::new(args);
    let mut cursor = raw.cursor();
    let mut state = State {
        options,
        tokens: Tokens::default(),
    };

    while let Some(arg) = raw.next(&mut cursor) {
        if arg.is_escape() {
            state.rest(raw.remaining(&mut cursor));
            break;
        }
        let dashed = arg.to_value_os().to_string_lossy().starts_with('-');
        if arg.is_stdio() || arg.is_negative_number() || !dashed {
            state.positional(lossy(arg.to_value_os()));
            if options.stop_early {
                state.rest(raw.remaining(&mut cursor));
                break;
            }
            continue;
        }
        if let Some((raw_name, value)) = arg.to_long() {
            let name = raw_name.map_or_else(lossy, str::to_owned);
            if let Some(explicit) = value {
                state.set_raw(&name, &lossy(explicit));
            } else if let Some(negated) = name.strip_prefix("no-") {
                state.set(negated, Value::Bool(false));
            } else {
                state.take_next(&name, &raw, &mut cursor);
            }
            continue;
        }
        let text = lossy(arg.to_value_os());
        state.short_cluster(text.trim_start_matches('-'), &raw, &mut cursor);
    }

    tracing::trace!(
        positionals = ?state.tokens.positionals,
        flags = ?state.tokens.flags,
        "tokenized arguments"
    );
    state.tokens
}

fn lossy(value: &OsStr) -> String {
    value.to_string_lossy().into_owned()
}

struct State<'o> {
    options: &'o TokenizerOptions,
    tokens: Tokens,
}

impl State<'_> {
    fn positional(&mut self, value: String) {
        self.tokens.positionals.push(value);
    }

    fn rest<'a>(&mut self, remaining: impl Iterator<Item = &'a OsStr>) {
        self.tokens.positionals.extend(remaining.map(lossy));
    }

    fn set(&mut self, key: &str, value: Value) {
        let overwrite = self.options.is_boolean(key);
        self.tokens.flags.set(key, value.clone(), overwrite);
        if let Some(aliases) = self.options.aliases.get(key) {
            for alias in aliases {
                self.tokens.flags.set(alias, value.clone(), overwrite);
            }
        }
    }

    /// Record an explicitly supplied value, typed according to the key.
    fn set_raw(&mut self, key: &str, raw: &str) {
        let value = if self.options.is_string(key) {
            Value::Text(raw.to_owned())
        } else if self.options.is_boolean(key) {
            Value::Bool(raw != "false")
        } else {
            Value::from_token(raw)
        };
        self.set(key, value);
    }

    /// Record a key with no attached value, consuming the next argument when
    /// it can serve as one.
    fn take_next(&mut self, key: &str, raw: &RawArgs, cursor: &mut ArgCursor) {
        let next = raw.peek(cursor).and_then(|arg| {
            if arg.is_escape() {
                return None;
            }
            let text = lossy(arg.to_value_os());
            let usable = !text.starts_with('-') || arg.is_stdio() || arg.is_negative_number();
            usable.then_some(text)
        });
        match next {
            Some(text) if !self.options.is_boolean(key) => {
                raw.next(cursor);
                self.set_raw(key, &text);
            }
            Some(text) if text == "true" || text == "false" => {
                raw.next(cursor);
                self.set(key, Value::Bool(text == "true"));
            }
            _ => {
                let bare = if self.options.is_string(key) {
                    Value::Text(String::new())
                } else {
                    Value::Bool(true)
                };
                self.set(key, bare);
            }
        }
    }

    /// Expand `-abc`, `-n5` and `-k=v`.
    fn short_cluster(&mut self, letters: &str, raw: &RawArgs, cursor: &mut ArgCursor) {
        let chars: Vec<(usize, char)> = letters.char_indices().collect();
        for (pos, &(offset, letter)) in chars.iter().enumerate() {
            let key = letter.to_string();
            let rest = letters.get(offset + letter.len_utf8()..).unwrap_or_default();
            if pos + 1 == chars.len() {
                self.take_next(&key, raw, cursor);
                return;
            }
            if let Some(value) = rest.strip_prefix('=') {
                self.set_raw(&key, value);
                return;
            }
            let attached = letter.is_ascii_alphabetic()
                && matches!(Value::from_token(rest), Value::Integer(_) | Value::Float(_));
            let punctuation_follows = rest
                .chars()
                .next()
                .is_some_and(|c| !c.is_alphanumeric() && c != '_');
            if attached || punctuation_follows {
                self.set_raw(&key, rest);
                return;
            }
            let bare = if self.options.is_string(&key) {
                Value::Text(String::new())
            } else {
                Value::Bool(true)
            };
            self.set(&key, bare);
        }
    }
}
