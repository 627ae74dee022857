//! License plate normalization and format check
//!
//! Accepted format: two uppercase letters, one space, 1-6 digits ("ZH 12345").
//! Input is trimmed and upper-cased before matching.

use regex::Regex;
use serde::Serialize;
use std::fmt;
use std::sync::OnceLock;
use thiserror::Error;

const PLATE_PATTERN: &str = r"^[A-Z]{2} [0-9]{1,6}$";

fn plate_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(PLATE_PATTERN).expect("plate pattern is a valid regex"))
}

/// Why a raw plate was refused
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum PlateError {
    #[error("license plate is empty")]
    Empty,
    #[error("license plate does not match the expected format")]
    InvalidFormat,
}

/// A normalized, well-formed license plate
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct LicensePlate(String);

impl LicensePlate {
    /// Trim surrounding whitespace and upper-case
    pub fn normalize(raw: &str) -> String {
        raw.trim().to_uppercase()
    }

    /// Normalize and validate raw user input
    pub fn parse(raw: &str) -> Result<Self, PlateError> {
        let normalized = Self::normalize(raw);
        if normalized.is_empty() {
            return Err(PlateError::Empty);
        }
        if !plate_regex().is_match(&normalized) {
            return Err(PlateError::InvalidFormat);
        }
        Ok(Self(normalized))
    }

    #[inline]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for LicensePlate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
