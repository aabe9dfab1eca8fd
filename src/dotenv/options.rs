//! Option structs shared by the loader operations.

use std::fmt;

use serde::Deserialize;

/// Text encoding used to decode `.env*` files.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
pub enum Encoding {
    /// UTF-8; a leading byte order mark is stripped.
    #[default]
    #[serde(rename = "utf8", alias = "utf-8", alias = "UTF-8")]
    Utf8,
    /// ISO-8859-1, every byte maps to the char with the same code point.
    #[serde(rename = "latin1", alias = "iso-8859-1", alias = "ISO-8859-1")]
    Latin1,
}

impl Encoding {
    /// Decodes raw file bytes, returning `None` if they are invalid for this encoding.
    pub fn decode(self, bytes: Vec<u8>) -> Option<String> {
        match self {
            Self::Utf8 => {
                let text = String::from_utf8(bytes).ok()?;
                match text.strip_prefix('\u{feff}') {
                    Some(stripped) => Some(stripped.to_string()),
                    None => Some(text),
                }
            }
            Self::Latin1 => Some(bytes.into_iter().map(char::from).collect()),
        }
    }
}

impl fmt::Display for Encoding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Utf8 => f.write_str("utf-8"),
            Self::Latin1 => f.write_str("latin1"),
        }
    }
}

/// Options for [`list_files`](super::list_files).
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ListOptions {
    /// Environment name (`development`, `test`, `production`, ...).
    /// Without one only `.env` and `.env.local` are considered.
    pub environment: Option<String>,
}

impl ListOptions {
    #[must_use]
    pub fn with_environment(mut self, environment: impl Into<String>) -> Self {
        self.environment = Some(environment.into());
        self
    }
}

/// Options for reading files in [`parse`](super::parse) and [`unload`](super::unload).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ReadOptions {
    /// Defaults to [`Encoding::Utf8`].
    pub encoding: Encoding,
}

impl ReadOptions {
    #[must_use]
    pub fn with_encoding(mut self, encoding: Encoding) -> Self {
        self.encoding = encoding;
        self
    }
}

/// Options for [`load`](super::load).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct LoadOptions {
    /// Defaults to [`Encoding::Utf8`].
    pub encoding: Encoding,
    /// Demote diagnostics to debug level. Defaults to `false`.
    pub silent: bool,
}

impl LoadOptions {
    #[must_use]
    pub fn with_encoding(mut self, encoding: Encoding) -> Self {
        self.encoding = encoding;
        self
    }

    #[must_use]
    pub fn with_silent(mut self, silent: bool) -> Self {
        self.silent = silent;
        self
    }

    pub(crate) fn read_options(&self) -> ReadOptions {
        ReadOptions {
            encoding: self.encoding,
        }
    }
}
