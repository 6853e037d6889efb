//! Quiz definition parsers.
//!
//! Two authoring dialects normalize into the same [`Question`] list:
//! - [`gift`]: delimited blocks, lenient (bad questions are dropped)
//! - [`yaml`]: a list of mappings, strict (bad items abort the parse)

pub mod gift;
pub mod yaml;

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{ParseError, Result};
use crate::types::Question;

/// Supported quiz authoring formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Format {
    Gift,
    #[default]
    Yaml,
}

impl Format {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Gift => "gift",
            Self::Yaml => "yaml",
        }
    }
}

impl fmt::Display for Format {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Format {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "gift" => Ok(Self::Gift),
            "yaml" | "yml" => Ok(Self::Yaml),
            other => Err(ParseError::UnknownFormat(other.to_string())),
        }
    }
}

/// Parse quiz content in the given format.
///
/// GIFT never fails here; an input with no recognizable questions yields an
/// empty list, which the validator rejects later.
pub fn parse(format: Format, content: &str) -> Result<Vec<Question>> {
    match format {
        Format::Gift => Ok(gift::parse(content)),
        Format::Yaml => yaml::parse(content),
    }
}
