//! Per-session round parameters
//!
//! The set of parameter names is closed and every name has a declared type.
//! Raw text from chat is coerced against that declared type, never against
//! whatever happens to be stored.

use crate::core::WordRules;
use serde_json::{Map, Value};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParamError {
    #[error("unknown parameter `{0}`")]
    UnknownName(String),
    #[error("`{value}` is not a valid {kind} for `{name}`")]
    InvalidValue {
        name: ParamName,
        kind: ParamKind,
        value: String,
    },
    #[error("`{name}` must be at least {minimum}")]
    BelowMinimum { name: ParamName, minimum: usize },
    #[error("`{name}` must be at most {maximum}")]
    AboveMaximum { name: ParamName, maximum: usize },
}

/// Declared type of a parameter
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParamKind {
    Integer,
    Boolean,
    Text,
}

impl fmt::Display for ParamKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Integer => "non-negative integer",
            Self::Boolean => "boolean",
            Self::Text => "string",
        })
    }
}

/// The known parameter names
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ParamName {
    MinLetters,
    MaxLetters,
    ForceUncommon,
    LookupDepth,
    GuessCount,
    WinMessage,
    LossMessage,
}

impl ParamName {
    /// All names, in display order
    pub const ALL: [Self; 7] = [
        Self::MinLetters,
        Self::MaxLetters,
        Self::ForceUncommon,
        Self::LookupDepth,
        Self::GuessCount,
        Self::WinMessage,
        Self::LossMessage,
    ];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::MinLetters => "min_letters",
            Self::MaxLetters => "max_letters",
            Self::ForceUncommon => "force_uncommon",
            Self::LookupDepth => "lookup_depth",
            Self::GuessCount => "guess_count",
            Self::WinMessage => "win_message",
            Self::LossMessage => "loss_message",
        }
    }

    #[must_use]
    pub const fn kind(self) -> ParamKind {
        match self {
            Self::MinLetters | Self::MaxLetters | Self::LookupDepth | Self::GuessCount => {
                ParamKind::Integer
            }
            Self::ForceUncommon => ParamKind::Boolean,
            Self::WinMessage | Self::LossMessage => ParamKind::Text,
        }
    }

    /// Accepted `(minimum, maximum)` for integer parameters
    const fn bounds(self) -> (usize, usize) {
        match self {
            Self::MinLetters | Self::MaxLetters | Self::GuessCount => (1, 100),
            Self::LookupDepth => (1, 100_000),
            Self::ForceUncommon | Self::WinMessage | Self::LossMessage => (0, 0),
        }
    }
}

impl fmt::Display for ParamName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ParamName {
    type Err = ParamError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|name| name.as_str() == s)
            .ok_or_else(|| ParamError::UnknownName(s.to_string()))
    }
}

/// A typed parameter value
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParamValue {
    Integer(usize),
    Boolean(bool),
    Text(String),
}

fn coerce_integer(name: ParamName, raw: &str) -> Result<usize, ParamError> {
    let value: usize = raw.parse().map_err(|_| ParamError::InvalidValue {
        name,
        kind: ParamKind::Integer,
        value: raw.to_string(),
    })?;
    let (minimum, maximum) = name.bounds();
    if value < minimum {
        return Err(ParamError::BelowMinimum { name, minimum });
    }
    if value > maximum {
        return Err(ParamError::AboveMaximum { name, maximum });
    }
    Ok(value)
}

fn coerce_boolean(raw: &str) -> bool {
    raw.eq_ignore_ascii_case("true")
}

impl fmt::Display for ParamValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Integer(v) => write!(f, "{v}"),
            Self::Boolean(v) => write!(f, "{v}"),
            Self::Text(v) => f.write_str(v),
        }
    }
}

impl From<ParamValue> for Value {
    fn from(value: ParamValue) -> Self {
        match value {
            ParamValue::Integer(v) => v.into(),
            ParamValue::Boolean(v) => v.into(),
            ParamValue::Text(v) => v.into(),
        }
    }
}

/// One session's parameter set
///
/// `Parameters::default()` is the template every session starts from; each
/// session owns its own copy.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Parameters {
    pub min_letters: usize,
    pub max_letters: usize,
    pub force_uncommon: bool,
    pub lookup_depth: usize,
    pub guess_count: usize,
    pub win_message: String,
    pub loss_message: String,
}

impl Default for Parameters {
    fn default() -> Self {
        Self {
            min_letters: 8,
            max_letters: 15,
            force_uncommon: true,
            lookup_depth: 5000,
            guess_count: 8,
            win_message: "ROUND WON!".to_string(),
            loss_message: "GUESSES EXHAUSTED!".to_string(),
        }
    }
}

impl Parameters {
    #[must_use]
    pub fn get(&self, name: ParamName) -> ParamValue {
        match name {
            ParamName::MinLetters => ParamValue::Integer(self.min_letters),
            ParamName::MaxLetters => ParamValue::Integer(self.max_letters),
            ParamName::ForceUncommon => ParamValue::Boolean(self.force_uncommon),
            ParamName::LookupDepth => ParamValue::Integer(self.lookup_depth),
            ParamName::GuessCount => ParamValue::Integer(self.guess_count),
            ParamName::WinMessage => ParamValue::Text(self.win_message.clone()),
            ParamName::LossMessage => ParamValue::Text(self.loss_message.clone()),
        }
    }

    /// Assign a parameter from raw text
    ///
    /// Nothing is modified when an error is returned.
    ///
    /// # Errors
    ///
    /// Returns `ParamError` if the name is unknown or the value fails
    /// coercion to the parameter's declared type. Integers must be base-10,
    /// non-negative and within the parameter's bounds; booleans accept a
    /// case-insensitive `true` and treat anything else as `false`.
    ///
    /// # Examples
    /// ```
    /// use chaordle::game::{ParamValue, Parameters};
    ///
    /// let mut params = Parameters::default();
    /// assert_eq!(params.set("min_letters", "10"), Ok(ParamValue::Integer(10)));
    /// assert!(params.set("foo", "1").is_err());
    /// ```
    pub fn set(&mut self, name: &str, raw: &str) -> Result<ParamValue, ParamError> {
        let name: ParamName = name.parse()?;

        match name {
            ParamName::MinLetters => self.min_letters = coerce_integer(name, raw)?,
            ParamName::MaxLetters => self.max_letters = coerce_integer(name, raw)?,
            ParamName::LookupDepth => self.lookup_depth = coerce_integer(name, raw)?,
            ParamName::GuessCount => self.guess_count = coerce_integer(name, raw)?,
            ParamName::ForceUncommon => self.force_uncommon = coerce_boolean(raw),
            ParamName::WinMessage => self.win_message = raw.to_string(),
            ParamName::LossMessage => self.loss_message = raw.to_string(),
        }

        Ok(self.get(name))
    }

    /// All parameters as pretty-printed JSON
    #[must_use]
    pub fn list(&self) -> String {
        let map: Map<String, Value> = ParamName::ALL
            .into_iter()
            .map(|name| (name.as_str().to_string(), self.get(name).into()))
            .collect();
        format!("{:#}", Value::Object(map))
    }

    /// Secret word constraints derived from these parameters
    #[must_use]
    pub const fn word_rules(&self) -> WordRules {
        WordRules {
            min_letters: self.min_letters,
            max_letters: self.max_letters,
            force_uncommon: self.force_uncommon,
        }
    }
}
