use log::debug;
use serde::{Deserialize, Serialize};
use std::{env, error, fmt, str::FromStr};

#[derive(Debug)]
pub enum Error {
    InvalidValue { key: &'static str, value: String },
    Json(serde_json::Error),
}

impl error::Error for Error {
    fn source(&self) -> Option<&(dyn error::Error + 'static)> {
        match self {
            Self::InvalidValue { .. } => None,
            Self::Json(error) => Some(error),
        }
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidValue { key, value } => write!(f, "Invalid {} {}", key, value),
            Self::Json(error) => write!(f, "Invalid configuration: {}", error),
        }
    }
}

impl From<serde_json::Error> for Error {
    fn from(error: serde_json::Error) -> Self {
        Self::Json(error)
    }
}

/// Text encoding used for binary values in escaped JSON.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BinaryFormat {
    /// `Bin:` tag, basE93 payload.
    #[default]
    Base93,
    /// `B64:` tag, padded base64 payload.
    Base64,
}

impl BinaryFormat {
    pub fn tag(&self) -> &'static str {
        match self {
            Self::Base93 => "Bin",
            Self::Base64 => "B64",
        }
    }
}

#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub struct UnknownBinaryFormat;

impl FromStr for BinaryFormat {
    type Err = UnknownBinaryFormat;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.to_ascii_lowercase().as_str() {
            "base93" => Ok(Self::Base93),
            "base64" => Ok(Self::Base64),
            _ => Err(UnknownBinaryFormat),
        }
    }
}

#[derive(Debug, Clone, Default, Eq, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Configuration {
    binary_format: BinaryFormat,
    indent: Option<usize>,
}

pub const BINARY_FORMAT_KEY: &str = "JSONESC_BINARY_FORMAT";
pub const INDENT_KEY: &str = "JSONESC_INDENT";

fn var_map<T, E>(
    lookup: &mut impl FnMut(&str) -> Option<String>,
    key: &'static str,
    f: impl FnOnce(&str) -> Result<T, E>,
) -> Result<Option<T>, Error> {
    match lookup(key) {
        Some(value) => match f(value.trim()) {
            Ok(parsed) => Ok(Some(parsed)),
            Err(_) => Err(Error::InvalidValue { key, value }),
        },
        None => Ok(None),
    }
}

impl Configuration {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reads `JSONESC_BINARY_FORMAT` and `JSONESC_INDENT`; unset variables keep defaults.
    pub fn from_env() -> Result<Self, Error> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup(mut lookup: impl FnMut(&str) -> Option<String>) -> Result<Self, Error> {
        let mut configuration = Self::new();
        if let Some(binary_format) = var_map(&mut lookup, BINARY_FORMAT_KEY, BinaryFormat::from_str)? {
            configuration.binary_format = binary_format;
        }
        if let Some(indent) = var_map(&mut lookup, INDENT_KEY, usize::from_str)? {
            configuration.indent = Some(indent);
        }
        debug!("loaded configuration {:?}", configuration);
        Ok(configuration)
    }

    pub fn from_json(text: &str) -> Result<Self, Error> {
        Ok(serde_json::from_str(text)?)
    }

    pub fn with_binary_format(mut self, binary_format: BinaryFormat) -> Self {
        self.binary_format = binary_format;
        self
    }

    pub fn with_indent(mut self, indent: Option<usize>) -> Self {
        self.indent = indent;
        self
    }

    pub fn binary_format(&self) -> BinaryFormat {
        self.binary_format
    }

    pub fn indent(&self) -> Option<usize> {
        self.indent
    }
}
