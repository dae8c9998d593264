//! Building a [`Stashmap`] from a plain JSON object.
//!
//! Input that is not an object is not an error: it produces an empty stash and a
//! [`LoadWarning`]. Only text that is not JSON at all, or a value that does not fit the
//! requested value type, is fatal.

use diagnostic::{miette, Dr};
use miette::Diagnostic;
use serde::de::DeserializeOwned;
use serde_json::Value;
use thiserror::Error;

use crate::{key::Key, map::Stashmap};

pub type LoadDr<T> = Dr<T, LoadError, LoadWarning>;

#[derive(Error, Diagnostic, Debug, Clone, PartialEq, Eq)]
pub enum LoadError {
    #[error("malformed JSON: {message}")]
    #[diagnostic(
        code(stashmap::load::syntax),
        help("a stash is loaded from a JSON object such as `{{\"a\": 1}}`")
    )]
    Syntax {
        message: String,
        line: usize,
        column: usize,
    },
    #[error("value of `{key}` could not be loaded: {message}")]
    #[diagnostic(code(stashmap::load::value))]
    Value { key: Key, message: String },
}

impl LoadError {
    fn syntax(err: &serde_json::Error) -> Self {
        LoadError::Syntax {
            message: err.to_string(),
            line: err.line(),
            column: err.column(),
        }
    }
}

#[derive(Error, Diagnostic, Debug, Clone, PartialEq, Eq)]
pub enum LoadWarning {
    #[error("expected an object but found {found}; the stash starts out empty")]
    #[diagnostic(
        code(stashmap::load::not_an_object),
        severity(Warning),
        help("only the properties of a JSON object become entries")
    )]
    NotAnObject { found: &'static str },
}

/// Describes the kind of a JSON value, with an article.
fn describe(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

impl Stashmap<Value> {
    /// Creates a stash with one entry per property of `object`, in the object's own order.
    /// Anything other than an object gives an empty stash and a warning.
    #[tracing::instrument(level = "debug", skip_all)]
    pub fn from_object(object: Value) -> LoadDr<Self> {
        match object {
            Value::Object(properties) => {
                let stash: Self = properties.into_iter().collect();
                tracing::debug!(entries = stash.len(), "loaded object");
                Dr::new(stash)
            }
            other => {
                let found = describe(&other);
                tracing::debug!(found, "initializer is not an object");
                Dr::new(Self::new()).with(LoadWarning::NotAnObject { found })
            }
        }
    }
}

impl<V> Stashmap<V>
where
    V: DeserializeOwned,
{
    /// Parses `text` as JSON and creates a stash from its top-level object, converting every
    /// property value into `V`.
    #[tracing::instrument(level = "debug", skip_all, fields(len = text.len()))]
    pub fn from_json(text: &str) -> LoadDr<Self> {
        let document: Value = match serde_json::from_str(text) {
            Ok(document) => document,
            Err(err) => return Dr::new_err(LoadError::syntax(&err)),
        };
        Stashmap::<Value>::from_object(document).bind(|raw| {
            let mut stash = Self::with_capacity(raw.len());
            for (key, value) in raw {
                match serde_json::from_value::<V>(value) {
                    Ok(value) => {
                        stash.set(key, value);
                    }
                    Err(err) => {
                        return Dr::new_err(LoadError::Value {
                            key,
                            message: err.to_string(),
                        })
                    }
                }
            }
            Dr::new(stash)
        })
    }
}
