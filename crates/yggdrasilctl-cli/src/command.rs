//! Request modelling for admin socket commands.
//!
//! This module turns the command name and trailing `key=value` tokens into
//! the flat JSON object the daemon expects, so the main runtime remains
//! focused on IO orchestration.

use std::io::Write;

use serde_json::{Map, Value};

use crate::AppError;

/// Field carrying the command name in both requests and echoed replies.
pub(crate) const REQUEST_FIELD: &str = "request";

/// Converts the value half of a `key=value` token into a JSON scalar.
///
/// Base-10 integers win over booleans, and only the exact lowercase
/// `true`/`false` spellings become booleans. Everything else is sent as the
/// raw string.
pub(crate) fn coerce_value(raw: &str) -> Value {
    if let Ok(integer) = raw.parse::<i64>() {
        return Value::from(integer);
    }
    match raw {
        "true" => Value::Bool(true),
        "false" => Value::Bool(false),
        other => Value::String(other.to_owned()),
    }
}

/// Splits a parameter token at its first `=` and coerces the value.
pub(crate) fn coerce_argument(token: &str) -> Result<(String, Value), AppError> {
    let (key, raw) = token
        .split_once('=')
        .ok_or_else(|| AppError::MissingSeparator(token.to_owned()))?;
    if key.is_empty() {
        return Err(AppError::EmptyKey(token.to_owned()));
    }
    if key == REQUEST_FIELD {
        return Err(AppError::ReservedKey(token.to_owned()));
    }
    Ok((key.to_owned(), coerce_value(raw)))
}

/// A single admin request, ready to be written to the socket.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct AdminRequest {
    fields: Map<String, Value>,
}

impl AdminRequest {
    /// Assembles a request from the command name and its parameter tokens.
    ///
    /// The command name is sent verbatim as a string. Repeated keys keep the
    /// last value supplied.
    pub(crate) fn build<S>(command: &str, parameters: &[S]) -> Result<Self, AppError>
    where
        S: AsRef<str>,
    {
        if command.trim().is_empty() {
            return Err(AppError::MissingCommand);
        }
        let mut fields = Map::new();
        fields.insert(
            String::from(REQUEST_FIELD),
            Value::String(command.to_owned()),
        );
        for token in parameters {
            let (key, value) = coerce_argument(token.as_ref())?;
            fields.insert(key, value);
        }
        Ok(Self { fields })
    }

    pub(crate) fn command(&self) -> &str {
        self.fields
            .get(REQUEST_FIELD)
            .and_then(Value::as_str)
            .unwrap_or_default()
    }

    /// Number of parameters besides the command name.
    pub(crate) fn parameter_count(&self) -> usize {
        self.fields.len().saturating_sub(1)
    }

    #[cfg(test)]
    pub(crate) const fn fields(&self) -> &Map<String, Value> {
        &self.fields
    }

    /// Writes the request as one newline-terminated line in a single write.
    pub(crate) fn write_jsonl<W>(&self, writer: &mut W) -> Result<(), AppError>
    where
        W: Write,
    {
        let mut line = serde_json::to_vec(&self.fields).map_err(AppError::SerialiseRequest)?;
        line.push(b'\n');
        writer.write_all(&line).map_err(AppError::SendRequest)?;
        writer.flush().map_err(AppError::SendRequest)
    }
}
