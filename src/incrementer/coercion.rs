use anyhow::Result;
use regex::Regex;

use crate::incrementer::{IncrementError, VersionCode};

pub const KEY_PREFIX: &str = "VERSION_CODE";
pub const KEY_ASSIGNMENT: &str = "VERSION_CODE=";

/// Converts the text left on a `VERSION_CODE` line into a version code.
///
/// Lenient mode reads a leading integer the way a loose string-to-int
/// conversion does: whitespace and a `+` sign may precede the digits,
/// underscores may separate them, and anything after them is ignored. Input
/// with no leading digits (including a `-` sign) becomes zero. Strict mode
/// requires the trimmed remainder to be digits only. In both modes a digit run
/// too large for `u64` is an overflow error rather than a reset.
pub struct ValueCoercion {
    strict: bool,
    lenient_regex: Regex,
    strict_regex: Regex,
}

impl ValueCoercion {
    pub fn new(strict: bool) -> Result<Self> {
        Ok(Self {
            strict,
            lenient_regex: Self::lenient_match_regex()?,
            strict_regex: Self::strict_match_regex()?,
        })
    }

    fn lenient_match_regex() -> Result<Regex> {
        Ok(Regex::new(r"^\s*\+?(\d+(?:_\d+)*)")?)
    }

    fn strict_match_regex() -> Result<Regex> {
        Ok(Regex::new(r"^\d+$")?)
    }

    /// Strips every `VERSION_CODE=` from the line and coerces what remains.
    pub fn parse_line(&self, line: &str) -> Result<VersionCode> {
        let remainder = line.replace(KEY_ASSIGNMENT, "");
        if self.strict {
            self.parse_strict(&remainder, line)
        } else {
            self.parse_lenient(&remainder)
        }
    }

    fn parse_lenient(&self, remainder: &str) -> Result<VersionCode> {
        let digits = self
            .lenient_regex
            .captures(remainder)
            .and_then(|captures| captures.get(1))
            .map(|m| m.as_str().replace('_', ""));

        match digits {
            Some(digits) => Self::parse_digits(&digits),
            None => Ok(VersionCode(0)),
        }
    }

    fn parse_digits(digits: &str) -> Result<VersionCode> {
        let value = digits.parse::<u64>().map_err(|_| IncrementError::Overflow {
            value: digits.to_string(),
        })?;
        Ok(VersionCode(value))
    }

    fn parse_strict(&self, remainder: &str, line: &str) -> Result<VersionCode> {
        let trimmed = remainder.trim();
        let malformed = || IncrementError::MalformedValue {
            line: line.trim_end().to_string(),
        };

        if !self.strict_regex.is_match(trimmed) {
            return Err(malformed().into());
        }
        Self::parse_digits(trimmed)
    }
}
