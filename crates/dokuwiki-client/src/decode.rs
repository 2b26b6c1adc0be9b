//! Schema-checked decoding of untyped RPC values
//!
//! Responses arrive as `serde_json::Value`. Records are built through a
//! [`FieldReader`], which checks each named field against the primitive kind
//! the record needs and keeps going after a mismatch so that one
//! [`ParseError`] reports every problem at once.

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use chrono::{DateTime, NaiveDateTime};
use serde_json::{Map, Value};

use crate::error::{FieldProblem, ParseError, Result};

/// XML-RPC style compact timestamp, still emitted by some DokuWiki versions
const COMPACT_DATETIME: &str = "%Y%m%dT%H:%M:%S";
const ISO_DATETIME: &str = "%Y-%m-%dT%H:%M:%S";

/// Human readable kind of a JSON value, used in error messages
pub fn kind_of(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(n) if n.is_i64() => "integer",
        Value::Number(n) if n.is_u64() => "unsigned integer",
        Value::Number(_) => "float",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "struct",
    }
}

/// Reads typed fields out of one response struct, collecting mismatches
pub struct FieldReader<'a> {
    record: &'static str,
    fields: &'a Map<String, Value>,
    problems: Vec<FieldProblem>,
}

impl<'a> FieldReader<'a> {
    /// Start reading `value` as a record named `record`
    pub fn new(record: &'static str, value: &'a Value) -> std::result::Result<Self, ParseError> {
        match value {
            Value::Object(fields) => Ok(Self {
                record,
                fields,
                problems: Vec::new(),
            }),
            other => Err(ParseError::UnexpectedShape {
                context: record,
                expected: "struct",
                found: kind_of(other),
            }),
        }
    }

    fn field(&mut self, name: &'static str) -> Option<&'a Value> {
        let value = self.fields.get(name);
        if value.is_none() {
            self.problems.push(FieldProblem::Missing { field: name });
        }
        value
    }

    fn mismatch(&mut self, name: &'static str, expected: &'static str, found: &Value) {
        self.problems.push(FieldProblem::WrongKind {
            field: name,
            expected,
            found: kind_of(found),
        });
    }

    pub fn string(&mut self, name: &'static str) -> String {
        match self.field(name) {
            Some(Value::String(s)) => s.clone(),
            Some(other) => {
                self.mismatch(name, "string", other);
                String::new()
            }
            None => String::new(),
        }
    }

    pub fn int(&mut self, name: &'static str) -> i64 {
        match self.field(name) {
            Some(Value::Number(n)) if n.is_i64() => n.as_i64().unwrap_or_default(),
            Some(other) => {
                self.mismatch(name, "integer", other);
                0
            }
            None => 0,
        }
    }

    pub fn bool(&mut self, name: &'static str) -> bool {
        match self.field(name) {
            Some(Value::Bool(b)) => *b,
            Some(other) => {
                self.mismatch(name, "boolean", other);
                false
            }
            None => false,
        }
    }

    pub fn datetime(&mut self, name: &'static str) -> NaiveDateTime {
        match self.field(name) {
            Some(value) => match parse_datetime(value) {
                Some(dt) => dt,
                None => {
                    self.mismatch(name, "datetime", value);
                    NaiveDateTime::default()
                }
            },
            None => NaiveDateTime::default(),
        }
    }

    /// Finish reading; fails with every recorded problem if there were any
    pub fn finish<T>(self, record: T) -> std::result::Result<T, ParseError> {
        if self.problems.is_empty() {
            Ok(record)
        } else {
            Err(ParseError::InvalidRecord {
                record: self.record,
                problems: self.problems,
            })
        }
    }
}

/// Accepts ISO-8601 (with or without offset), the compact XML-RPC form or a
/// Unix timestamp in seconds
pub fn parse_datetime(value: &Value) -> Option<NaiveDateTime> {
    match value {
        Value::String(s) => DateTime::parse_from_rfc3339(s)
            .map(|dt| dt.naive_utc())
            .or_else(|_| NaiveDateTime::parse_from_str(s, ISO_DATETIME))
            .or_else(|_| NaiveDateTime::parse_from_str(s, COMPACT_DATETIME))
            .ok(),
        Value::Number(n) => n
            .as_i64()
            .and_then(|secs| DateTime::from_timestamp(secs, 0))
            .map(|dt| dt.naive_utc()),
        _ => None,
    }
}

/// Elements of a listing response
pub fn expect_array<'a>(context: &'static str, value: &'a Value) -> Result<&'a [Value]> {
    match value {
        Value::Array(items) => Ok(items),
        other => Err(ParseError::UnexpectedShape {
            context,
            expected: "array",
            found: kind_of(other),
        }
        .into()),
    }
}

pub fn expect_string(context: &'static str, value: Value) -> Result<String> {
    match value {
        Value::String(s) => Ok(s),
        other => Err(ParseError::UnexpectedShape {
            context,
            expected: "string",
            found: kind_of(&other),
        }
        .into()),
    }
}

/// Decode each element of a listing with `parse`
pub fn decode_list<T>(
    context: &'static str,
    value: &Value,
    parse: impl Fn(&Value) -> std::result::Result<T, ParseError>,
) -> Result<Vec<T>> {
    expect_array(context, value)?
        .iter()
        .map(|item| parse(item).map_err(Into::into))
        .collect()
}

/// Read the `id` field of every element in a listing
pub fn decode_ids(context: &'static str, value: &Value) -> Result<Vec<String>> {
    decode_list(context, value, |item| {
        let mut reader = FieldReader::new(context, item)?;
        let id = reader.string("id");
        reader.finish(id)
    })
}

/// Binary payloads travel as base64 strings
pub fn decode_binary(context: &'static str, value: Value) -> Result<Vec<u8>> {
    let encoded = expect_string(context, value)?;
    Ok(STANDARD.decode(encoded.as_bytes())?)
}

pub fn encode_binary(bytes: &[u8]) -> Value {
    Value::String(STANDARD.encode(bytes))
}
