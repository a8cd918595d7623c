//! Typed access to raw definition records.
//!
//! Every accessor applies the kind's default when the key is absent (or `null`)
//! and fails with [`Error::ValidationError`] when the value has the wrong shape.

use serde_json::Value;

use crate::error::{Error, Result};
use crate::loader::Definition;
use crate::module::Flag;

pub struct Fields<'a> {
    kind: &'static str,
    name: String,
    definition: &'a Definition,
}

impl<'a> Fields<'a> {
    pub fn new(kind: &'static str, definition: &'a Definition) -> Self {
        let name = definition
            .get("name")
            .and_then(Value::as_str)
            .unwrap_or("<unnamed>")
            .to_string();
        Self { kind, name, definition }
    }

    fn get(&self, key: &str) -> Option<&'a Value> {
        self.definition.get(key).filter(|value| !value.is_null())
    }

    /// Builds the validation error for this record.
    pub fn invalid<S: Into<String>>(&self, message: S) -> Error {
        Error::ValidationError { kind: self.kind, name: self.name.clone(), message: message.into() }
    }

    pub fn ensure<S: Into<String>>(&self, condition: bool, message: S) -> Result<()> {
        if condition {
            Ok(())
        } else {
            Err(self.invalid(message))
        }
    }

    /// The required, non-empty `name`.
    pub fn name(&self) -> Result<String> {
        match self.get("name") {
            Some(Value::String(name)) if !name.is_empty() => Ok(name.clone()),
            Some(Value::String(_)) | None => Err(self.invalid("name must be a non-empty string")),
            Some(_) => Err(self.invalid("name must be a string")),
        }
    }

    pub fn string(&self, key: &str, default: &str) -> Result<String> {
        match self.get(key) {
            None => Ok(default.to_string()),
            Some(Value::String(value)) => Ok(value.clone()),
            Some(_) => Err(self.invalid(format!("{key} must be a string"))),
        }
    }

    pub fn integer(&self, key: &str, default: i64) -> Result<i64> {
        match self.get(key) {
            None => Ok(default),
            Some(value) => value
                .as_i64()
                .ok_or_else(|| self.invalid(format!("{key} must be an integer"))),
        }
    }

    /// Integer that must be `>= 0`.
    pub fn non_negative(&self, key: &str, default: i64) -> Result<i64> {
        let value = self.integer(key, default)?;
        self.ensure(value >= 0, format!("{key} must be non-negative"))?;
        Ok(value)
    }

    /// Integer restricted to `allowed`.
    pub fn one_of(&self, key: &str, default: i64, allowed: &[i64]) -> Result<i64> {
        let value = self.integer(key, default)?;
        self.ensure(
            allowed.contains(&value),
            format!("{key} must be one of {allowed:?}, got {value}"),
        )?;
        Ok(value)
    }

    /// A two-state `"yes"`/`"no"` value. Raw booleans are accepted as well.
    pub fn flag(&self, key: &str, default: Flag) -> Result<Flag> {
        match self.get(key) {
            None => Ok(default),
            Some(Value::Bool(value)) => Ok(Flag::from(*value)),
            Some(Value::String(value)) => {
                Flag::parse(value).ok_or_else(|| self.invalid(format!("{key} must be 'yes' or 'no'")))
            }
            Some(_) => Err(self.invalid(format!("{key} must be 'yes' or 'no'"))),
        }
    }

    /// An array that is empty or holds only strings.
    pub fn strings(&self, key: &str) -> Result<Vec<String>> {
        self.array(key)?
            .iter()
            .map(|item| {
                item.as_str()
                    .map(str::to_string)
                    .ok_or_else(|| self.invalid(format!("{key} must be an empty or string array")))
            })
            .collect()
    }

    /// An array that is empty or holds only integers.
    pub fn integers(&self, key: &str) -> Result<Vec<i64>> {
        self.array(key)?
            .iter()
            .map(|item| {
                item.as_i64()
                    .ok_or_else(|| self.invalid(format!("{key} must be an empty or integer array")))
            })
            .collect()
    }

    fn array(&self, key: &str) -> Result<&'a [Value]> {
        match self.get(key) {
            None => Ok(&[]),
            Some(Value::Array(items)) => Ok(items.as_slice()),
            Some(_) => Err(self.invalid(format!("{key} must be an array"))),
        }
    }
}
