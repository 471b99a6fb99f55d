//! JSON with escaped strings for values JSON has no syntax for.
//!
//! An escaped string starts with ESC (`\u001b`). The bare escape is `undefined`,
//! `NaN`, `Inf` and `-Inf` are the non-finite numbers, and `<tag>:<payload>` carries
//! binary data (`Bin`, `B64`, and `Buf` on input), timestamps (`Date`) and registered
//! custom tags.
//! Escapes that cannot be read back parse as [`Value::Undefined`].

mod value;

use crate::{
    base64, base93,
    config::{BinaryFormat, Configuration},
};
use chrono::{DateTime, SecondsFormat, Utc};
use log::debug;
use serde::Serialize;
use serde_json::ser::PrettyFormatter;
use std::{collections::BTreeSet, error, fmt, string::FromUtf8Error};

pub use value::Value;

pub const ESCAPE: char = '\u{1b}';

const RESERVED_TAGS: [&str; 4] = ["Bin", "Buf", "B64", "Date"];

/// Integers below this magnitude are written without a fraction.
const MAX_SAFE_INTEGER: f64 = 9_007_199_254_740_992.0;

#[derive(Debug)]
pub enum Error {
    Json(serde_json::Error),
    Utf8(FromUtf8Error),
    InvalidTag(String),
    UnregisteredTag(String),
}

impl error::Error for Error {
    fn source(&self) -> Option<&(dyn error::Error + 'static)> {
        match self {
            Self::Json(error) => Some(error),
            Self::Utf8(error) => Some(error),
            Self::InvalidTag(_) | Self::UnregisteredTag(_) => None,
        }
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Json(error) => write!(f, "{}", error),
            Self::Utf8(error) => write!(f, "{}", error),
            Self::InvalidTag(tag) => write!(f, "Invalid escape tag {:?}", tag),
            Self::UnregisteredTag(tag) => write!(f, "Unregistered escape tag {:?}", tag),
        }
    }
}

impl From<serde_json::Error> for Error {
    fn from(error: serde_json::Error) -> Self {
        Self::Json(error)
    }
}

impl From<FromUtf8Error> for Error {
    fn from(error: FromUtf8Error) -> Self {
        Self::Utf8(error)
    }
}

fn escaped(body: &str) -> serde_json::Value {
    let mut text = String::with_capacity(body.len() + 1);
    text.push(ESCAPE);
    text.push_str(body);
    serde_json::Value::String(text)
}

fn number(value: f64) -> serde_json::Value {
    if value.is_nan() {
        escaped("NaN")
    } else if value == f64::INFINITY {
        escaped("Inf")
    } else if value == f64::NEG_INFINITY {
        escaped("-Inf")
    } else if value.fract() == 0.0 && value.abs() < MAX_SAFE_INTEGER {
        serde_json::Value::from(value as i64)
    } else {
        serde_json::Number::from_f64(value).map_or(serde_json::Value::Null, serde_json::Value::Number)
    }
}

/// Reads an RFC 3339 timestamp, or milliseconds since the epoch.
fn parse_date(payload: &str) -> Option<DateTime<Utc>> {
    match DateTime::parse_from_rfc3339(payload) {
        Ok(date) => Some(date.with_timezone(&Utc)),
        Err(_) => DateTime::from_timestamp_millis(payload.parse().ok()?),
    }
}

#[derive(Debug, Clone, Default)]
pub struct JsonEsc {
    configuration: Configuration,
    tags: BTreeSet<String>,
}

impl JsonEsc {
    pub fn new(configuration: Configuration) -> Self {
        Self {
            configuration,
            tags: BTreeSet::new(),
        }
    }

    pub fn configuration(&self) -> &Configuration {
        &self.configuration
    }

    /// Allows `tag` in [`Value::Custom`] and makes `"\u001b<tag>:..."` parse back to it.
    pub fn register(&mut self, tag: impl Into<String>) -> Result<(), Error> {
        let tag = tag.into();
        if tag.is_empty() || tag.contains(':') || tag.contains(ESCAPE) || RESERVED_TAGS.contains(&tag.as_str()) {
            return Err(Error::InvalidTag(tag));
        }
        self.tags.insert(tag);
        Ok(())
    }

    pub fn stringify(&self, value: &Value) -> Result<String, Error> {
        let json = self.encode_value(value)?;
        match self.configuration.indent() {
            None => Ok(serde_json::to_string(&json)?),
            Some(width) => {
                let indent = vec![b' '; width];
                let mut buffer = Vec::new();
                let mut serializer = serde_json::Serializer::with_formatter(&mut buffer, PrettyFormatter::with_indent(&indent));
                json.serialize(&mut serializer)?;
                Ok(String::from_utf8(buffer)?)
            }
        }
    }

    pub fn parse(&self, text: &str) -> Result<Value, Error> {
        let json: serde_json::Value = serde_json::from_str(text)?;
        Ok(self.decode_value(json))
    }

    fn encode_value(&self, value: &Value) -> Result<serde_json::Value, Error> {
        Ok(match value {
            Value::Undefined => escaped(""),
            Value::Null => serde_json::Value::Null,
            Value::Bool(value) => serde_json::Value::Bool(*value),
            Value::Number(value) => number(*value),
            Value::String(value) => serde_json::Value::String(value.clone()),
            Value::Binary(bytes) => {
                let format = self.configuration.binary_format();
                let payload = match format {
                    BinaryFormat::Base93 => base93::encode(bytes),
                    BinaryFormat::Base64 => base64::encode(bytes),
                };
                escaped(&format!("{}:{}", format.tag(), payload))
            }
            Value::Date(date) => escaped(&format!("Date:{}", date.to_rfc3339_opts(SecondsFormat::Millis, true))),
            Value::Custom { tag, payload } => {
                if !self.tags.contains(tag) {
                    return Err(Error::UnregisteredTag(tag.clone()));
                }
                escaped(&format!("{}:{}", tag, payload))
            }
            Value::Array(items) => serde_json::Value::Array(items.iter().map(|item| self.encode_value(item)).collect::<Result<_, _>>()?),
            Value::Object(entries) => {
                let mut map = serde_json::Map::new();
                for (key, value) in entries.iter().filter(|(_, value)| !value.is_undefined()) {
                    map.insert(key.clone(), self.encode_value(value)?);
                }
                serde_json::Value::Object(map)
            }
        })
    }

    fn decode_value(&self, json: serde_json::Value) -> Value {
        match json {
            serde_json::Value::Null => Value::Null,
            serde_json::Value::Bool(value) => Value::Bool(value),
            serde_json::Value::Number(value) => Value::Number(value.as_f64().unwrap_or(f64::NAN)),
            serde_json::Value::String(value) => match value.strip_prefix(ESCAPE) {
                Some(body) => self.unescape(body),
                None => Value::String(value),
            },
            serde_json::Value::Array(items) => Value::Array(items.into_iter().map(|item| self.decode_value(item)).collect()),
            serde_json::Value::Object(entries) => Value::Object(
                entries
                    .into_iter()
                    .map(|(key, value)| (key, self.decode_value(value)))
                    .filter(|(_, value)| !value.is_undefined())
                    .collect(),
            ),
        }
    }

    fn unescape(&self, body: &str) -> Value {
        match body {
            "" => return Value::Undefined,
            "NaN" => return Value::Number(f64::NAN),
            "Inf" => return Value::Number(f64::INFINITY),
            "-Inf" => return Value::Number(f64::NEG_INFINITY),
            _ => {}
        }
        let Some((tag, payload)) = body.split_once(':') else {
            debug!("ignoring malformed escape {:?}", body);
            return Value::Undefined;
        };
        match tag {
            "Bin" | "Buf" => Value::Binary(base93::decode(payload)),
            "B64" => match base64::decode(payload) {
                Ok(bytes) => Value::Binary(bytes),
                Err(error) => {
                    debug!("ignoring invalid base64 escape: {}", error);
                    Value::Undefined
                }
            },
            "Date" => match parse_date(payload) {
                Some(date) => Value::Date(date),
                None => {
                    debug!("ignoring invalid date escape {:?}", payload);
                    Value::Undefined
                }
            },
            _ if self.tags.contains(tag) => Value::Custom {
                tag: tag.to_string(),
                payload: payload.to_string(),
            },
            _ => {
                debug!("ignoring unknown escape tag {:?}", tag);
                Value::Undefined
            }
        }
    }
}

pub fn stringify(value: &Value) -> Result<String, Error> {
    JsonEsc::default().stringify(value)
}

pub fn parse(text: &str) -> Result<Value, Error> {
    JsonEsc::default().parse(text)
}
