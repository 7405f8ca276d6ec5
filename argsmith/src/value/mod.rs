//! Values carried by flags and options, and the coercions applied to them.
//!
//! A raw flag value comes from the tokenizer as a bool, number, text or list.
//! Each option carries an [`OptionKind`] chosen once at registration, either
//! explicitly or inferred from the default literal, and resolution applies
//! the kind's coercion without inspecting runtime types again.

use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

/// A single option or flag value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Value {
    /// Presence marker or explicit boolean.
    Bool(bool),
    /// Whole number.
    Integer(i64),
    /// Number with a fractional part.
    Float(f64),
    /// Free-form text.
    Text(String),
    /// Values collected from repeated flags or a list default.
    List(Vec<Value>),
}

/// Primitive shape of a [`Value`], used for default type checks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Shape {
    Bool,
    Number,
    Text,
    List,
}

impl Value {
    /// Returns `false` only for `Bool(false)`.
    ///
    /// Zero and the empty string are values; only an explicit `false` counts
    /// as "no value" when the resolved mapping is built.
    #[must_use]
    pub const fn is_truthy(&self) -> bool {
        !matches!(self, Self::Bool(false))
    }

    /// Returns the boolean when this is a [`Value::Bool`].
    #[must_use]
    pub const fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Bool(flag) => Some(*flag),
            _ => None,
        }
    }

    /// Returns the text when this is a [`Value::Text`].
    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Text(text) => Some(text),
            _ => None,
        }
    }

    /// Returns the number as `i64` when this is a [`Value::Integer`].
    #[must_use]
    pub const fn as_i64(&self) -> Option<i64> {
        match self {
            Self::Integer(n) => Some(*n),
            _ => None,
        }
    }

    /// Returns any number as `f64`.
    #[must_use]
    #[expect(
        clippy::cast_precision_loss,
        reason = "integers are widened for callers that asked for a float"
    )]
    pub const fn as_f64(&self) -> Option<f64> {
        match self {
            Self::Integer(n) => Some(*n as f64),
            Self::Float(n) => Some(*n),
            _ => None,
        }
    }

    /// Returns the items when this is a [`Value::List`].
    #[must_use]
    pub fn as_list(&self) -> Option<&[Self]> {
        match self {
            Self::List(items) => Some(items),
            _ => None,
        }
    }

    pub(crate) const fn shape(&self) -> Shape {
        match self {
            Self::Bool(_) => Shape::Bool,
            Self::Integer(_) | Self::Float(_) => Shape::Number,
            Self::Text(_) => Shape::Text,
            Self::List(_) => Shape::List,
        }
    }

    /// Parse a raw token the way shell-style flag parsers do: anything that
    /// looks numeric becomes a number, everything else stays text.
    #[must_use]
    pub fn from_token(token: &str) -> Self {
        parse_number(token).unwrap_or_else(|| Self::Text(token.to_owned()))
    }

    /// Append `other`, turning a scalar into a list on first repeat.
    pub(crate) fn push(&mut self, other: Self) {
        match self {
            Self::List(items) => items.push(other),
            scalar => {
                let first = std::mem::replace(scalar, Self::Bool(false));
                *scalar = Self::List(vec![first, other]);
            }
        }
    }
}

fn parse_number(token: &str) -> Option<Value> {
    let trimmed = token.trim();
    if trimmed.is_empty() {
        return None;
    }
    if let Ok(n) = trimmed.parse::<i64>() {
        return Some(Value::Integer(n));
    }
    if let Some(hex) = trimmed.strip_prefix("0x") {
        return i64::from_str_radix(hex, 16).ok().map(Value::Integer);
    }
    let looks_decimal = trimmed
        .chars()
        .all(|c| c.is_ascii_digit() || matches!(c, '.' | '-' | '+' | 'e' | 'E'));
    if !looks_decimal {
        return None;
    }
    trimmed
        .parse::<f64>()
        .ok()
        .filter(|n| n.is_finite())
        .map(Value::Float)
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Bool(flag) => write!(f, "{flag}"),
            Self::Integer(n) => write!(f, "{n}"),
            Self::Float(n) => write!(f, "{n}"),
            Self::Text(text) => f.write_str(text),
            Self::List(items) => {
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        f.write_str(",")?;
                    }
                    write!(f, "{item}")?;
                }
                Ok(())
            }
        }
    }
}

impl From<bool> for Value {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<i64> for Value {
    fn from(value: i64) -> Self {
        Self::Integer(value)
    }
}

impl From<i32> for Value {
    fn from(value: i32) -> Self {
        Self::Integer(i64::from(value))
    }
}

impl From<u16> for Value {
    fn from(value: u16) -> Self {
        Self::Integer(i64::from(value))
    }
}

impl From<u32> for Value {
    fn from(value: u32) -> Self {
        Self::Integer(i64::from(value))
    }
}

impl From<f64> for Value {
    fn from(value: f64) -> Self {
        Self::Float(value)
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Self::Text(value.to_owned())
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl<T: Into<Self>> From<Vec<T>> for Value {
    fn from(values: Vec<T>) -> Self {
        Self::List(values.into_iter().map(Into::into).collect())
    }
}

/// How an option's raw value is interpreted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OptionKind {
    /// Boolean switch; never consumes the following argument.
    Flag,
    /// Text; numeric-looking input stays text.
    Text,
    /// Collects one or more values.
    List,
    /// Numbers, truncated to integers.
    Numeric,
    /// No default and no declared kind; values pass through untouched.
    #[default]
    Any,
}

impl OptionKind {
    /// Infer the kind from a default literal.
    #[must_use]
    pub const fn infer(default: Option<&Value>) -> Self {
        match default {
            Some(Value::Bool(_)) => Self::Flag,
            Some(Value::Text(_)) => Self::Text,
            Some(Value::List(_)) => Self::List,
            Some(Value::Integer(_) | Value::Float(_)) => Self::Numeric,
            None => Self::Any,
        }
    }

    /// Placeholder appended to the option's usage in help output.
    #[must_use]
    pub const fn placeholder(self) -> &'static str {
        match self {
            Self::Text => "[value]",
            Self::List => "<list>",
            Self::Numeric => "<n>",
            Self::Flag | Self::Any => "",
        }
    }

    /// Bring a raw value into this kind's shape before default checks.
    pub(crate) fn normalise(self, value: Value) -> Value {
        match (self, value) {
            (Self::List, Value::List(items)) => Value::List(items),
            (Self::List, scalar) => Value::List(vec![scalar]),
            (Self::Text, number @ (Value::Integer(_) | Value::Float(_))) => {
                Value::Text(number.to_string())
            }
            (Self::Numeric, Value::Text(text)) => {
                parse_number(&text).unwrap_or(Value::Text(text))
            }
            (_, other) => other,
        }
    }

    /// Apply the kind's own coercion.
    ///
    /// Numeric truncation only touches values that are already numbers, so a
    /// bare presence marker is never parsed as one.
    #[expect(
        clippy::cast_possible_truncation,
        reason = "numeric options truncate fractional input to whole numbers"
    )]
    pub(crate) fn coerce(self, value: Value) -> Value {
        match (self, value) {
            (Self::Numeric, Value::Float(n)) => Value::Integer(n.trunc() as i64),
            (_, other) => other,
        }
    }
}

/// Caller-supplied value transform.
pub type CoerceFn = Arc<dyn Fn(Value) -> Value + Send + Sync>;

/// Transform applied to a resolved option value.
#[derive(Clone)]
pub enum Coercer {
    /// The option kind's built-in coercion.
    Kind(OptionKind),
    /// A caller closure run after kind normalisation.
    Custom(CoerceFn),
}

impl Coercer {
    /// Wrap a closure as a custom coercer.
    pub fn custom<F>(f: F) -> Self
    where
        F: Fn(Value) -> Value + Send + Sync + 'static,
    {
        Self::Custom(Arc::new(f))
    }

    pub(crate) fn apply(&self, kind: OptionKind, value: Value) -> Value {
        match self {
            Self::Kind(own) => own.coerce(value),
            Self::Custom(f) => f(kind.coerce(value)),
        }
    }
}

impl fmt::Debug for Coercer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Kind(kind) => f.debug_tuple("Kind").field(kind).finish(),
            Self::Custom(_) => f.write_str("Custom(<fn>)"),
        }
    }
}

#[cfg(test)]
mod tests;
