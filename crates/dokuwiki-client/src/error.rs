//! Error types for the DokuWiki client

use std::fmt;

/// Errors that can occur during wiki client operations
#[derive(Debug, thiserror::Error)]
pub enum WikiError {
    /// The wiki rejected the call. The message is surfaced verbatim.
    #[error("{message}")]
    Fault { code: i64, message: String },

    #[error(transparent)]
    Parse(#[from] ParseError),

    #[error("Request failed with status {status}: {body}")]
    RequestFailed { status: u16, body: String },

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Invalid base64 payload: {0}")]
    Encoding(#[from] base64::DecodeError),
}

impl WikiError {
    pub fn fault(code: i64, message: impl Into<String>) -> Self {
        WikiError::Fault {
            code,
            message: message.into(),
        }
    }

    /// Remote fault message, if this error is a fault
    pub fn fault_message(&self) -> Option<&str> {
        match self {
            WikiError::Fault { message, .. } => Some(message),
            _ => None,
        }
    }

    pub fn is_fault(&self) -> bool {
        matches!(self, WikiError::Fault { .. })
    }
}

pub type Result<T> = std::result::Result<T, WikiError>;

/// A single field that did not match the expected response schema
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum FieldProblem {
    Missing {
        field: &'static str,
    },
    WrongKind {
        field: &'static str,
        expected: &'static str,
        found: &'static str,
    },
}

impl fmt::Display for FieldProblem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldProblem::Missing { field } => write!(f, "'{}' is missing", field),
            FieldProblem::WrongKind {
                field,
                expected,
                found,
            } => write!(f, "'{}' expected {}, found {}", field, expected, found),
        }
    }
}

/// Response did not have the shape the caller expected
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum ParseError {
    #[error("invalid {record}: {}", join_problems(.problems))]
    InvalidRecord {
        record: &'static str,
        problems: Vec<FieldProblem>,
    },

    #[error("expected {expected} in {context} response, found {found}")]
    UnexpectedShape {
        context: &'static str,
        expected: &'static str,
        found: &'static str,
    },
}

fn join_problems(problems: &[FieldProblem]) -> String {
    problems
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}
