//! Document codecs: raw input bytes to [`Value`] trees and back.
//!
//! - **[toml]** - TOML documents, the default format
//! - **[json]** - JSON documents over the same value model
//!
//! Encoding layout is controlled by [`EncodeOptions`]; it never changes what a
//! value means, only how it is laid out.

pub mod json;
pub mod toml;

use thiserror::Error;

use crate::value::Value;

pub use self::json::JsonCodec;
pub use self::toml::TomlCodec;

/// Errors raised at the codec boundary.
#[derive(Debug, Error)]
pub enum CodecError {
    #[error("TOML error: {0}")]
    TomlDecode(#[from] ::toml::de::Error),

    #[error("TOML error: {0}")]
    TomlEncode(#[from] ::toml::ser::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("input is not valid UTF-8: {0}")]
    Utf8(#[from] std::str::Utf8Error),

    /// The input holds something the value model cannot represent
    #[error("{format} error: {message}")]
    Unsupported {
        format: &'static str,
        message: String,
    },
}

/// Layout settings for encoding.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EncodeOptions {
    /// Render tables as inline `{ key = value }` tables
    pub inline_tables: bool,

    /// Put each array element on its own line
    pub multiline_arrays: bool,

    /// One level of indentation
    pub indent_symbol: String,

    /// Indent nested tables by depth
    pub indent_tables: bool,
}

impl Default for EncodeOptions {
    fn default() -> Self {
        EncodeOptions {
            inline_tables: false,
            multiline_arrays: false,
            indent_symbol: "  ".to_string(),
            indent_tables: false,
        }
    }
}

/// Something that turns raw document bytes into a value tree and back.
pub trait DocumentCodec {
    fn decode(&self, input: &[u8]) -> Result<Value, CodecError>;

    fn encode(&self, value: &Value, options: &EncodeOptions) -> Result<String, CodecError>;
}

/// Supported document formats.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "cli", derive(clap::ValueEnum))]
pub enum Format {
    #[default]
    Toml,
    Json,
}

impl Format {
    pub fn codec(self) -> &'static dyn DocumentCodec {
        match self {
            Format::Toml => &TomlCodec,
            Format::Json => &JsonCodec,
        }
    }
}
