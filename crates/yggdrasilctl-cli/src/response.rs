//! Classification of decoded admin replies.

use std::fmt;

use serde_json::{Map, Value};

use crate::command::REQUEST_FIELD;

const STATUS_FIELD: &str = "status";
const ERROR_FIELD: &str = "error";
const RESPONSE_FIELD: &str = "response";
const ERROR_STATUS: &str = "error";

/// Exit status reported when the daemon answers with `status: "error"`.
pub(crate) const PROTOCOL_ERROR_EXIT: u8 = 1;

/// What the runner should do with a decoded reply.
#[derive(Debug, PartialEq)]
pub(crate) enum Classification<'a> {
    /// The daemon reported an error; the message is ready to print.
    ProtocolError(String),
    /// A non-error reply lacked the fields needed to render it.
    Malformed(MalformedReply),
    /// A renderable reply.
    Success {
        /// Command name echoed back by the daemon, when it is a string.
        command: Option<&'a str>,
        /// The command-defined payload.
        response: &'a Value,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum MalformedReply {
    MissingRequest,
    RequestNotObject,
    MissingResponse,
}

impl fmt::Display for MalformedReply {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        let message = match self {
            Self::MissingRequest => "Missing request in response (malformed response?)",
            Self::RequestNotObject => "Request echo is not an object (malformed response?)",
            Self::MissingResponse => "Missing response body (malformed response?)",
        };
        formatter.write_str(message)
    }
}

pub(crate) fn classify(reply: &Map<String, Value>) -> Classification<'_> {
    if is_error_status(reply) {
        return Classification::ProtocolError(error_message(reply));
    }

    let Some(echo_value) = reply.get(REQUEST_FIELD) else {
        return Classification::Malformed(MalformedReply::MissingRequest);
    };
    let Some(response) = reply.get(RESPONSE_FIELD) else {
        return Classification::Malformed(MalformedReply::MissingResponse);
    };
    let Some(echo) = echo_value.as_object() else {
        return Classification::Malformed(MalformedReply::RequestNotObject);
    };

    Classification::Success {
        command: echo.get(REQUEST_FIELD).and_then(Value::as_str),
        response,
    }
}

/// Exit status implied by the reply's `status` field alone.
pub(crate) fn exit_status(reply: &Map<String, Value>) -> u8 {
    if is_error_status(reply) {
        PROTOCOL_ERROR_EXIT
    } else {
        0
    }
}

fn is_error_status(reply: &Map<String, Value>) -> bool {
    reply.get(STATUS_FIELD).and_then(Value::as_str) == Some(ERROR_STATUS)
}

fn error_message(reply: &Map<String, Value>) -> String {
    match reply.get(ERROR_FIELD) {
        Some(Value::String(message)) => format!("Error: {message}"),
        Some(other) => format!("Error: {other}"),
        None => String::from("Unspecified error occurred"),
    }
}
