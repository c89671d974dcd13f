//! Phone number extraction and format validation.
//!
//! Extraction looks for the first phone-shaped run in raw page text and
//! rewrites it into the canonical `<code>(<area>)<exchange>-<pair>-<pair>`
//! form; validation checks a candidate against that form.

use std::fmt;

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::error::{Result, SiteCheckError};

/// National prefix used when the page shows no `+<code>`.
pub const DEFAULT_COUNTRY_CODE: &str = "8";

static PHONE_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"(?:\+([0-9]{1,3}))?\s*\(?([0-9]{3,5})\)?[\s-]*([0-9]{3})[\s-]*([0-9]{2})[\s-]*([0-9]{2})",
    )
    .expect("Invalid phone search regex")
});

static CANONICAL_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(\+?[0-9]{1,3})?\(?[0-9]{1,5}\)?[0-9]{1,3}-[0-9]{2}-[0-9]{2}$")
        .expect("Invalid canonical phone regex")
});

/// A phone number pulled out of page text, split into its groups
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PhoneNumber {
    /// Country code with its leading `+`, or the default national prefix
    pub country_code: String,
    /// Area code, 3 to 5 digits
    pub area_code: String,
    /// Three-digit exchange
    pub exchange: String,
    pub first_pair: String,
    pub second_pair: String,
}

impl fmt::Display for PhoneNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}({}){}-{}-{}",
            self.country_code, self.area_code, self.exchange, self.first_pair, self.second_pair
        )
    }
}

/// Find the first phone number in `text`
///
/// `default_code` stands in for the country code when none is written
/// next to the number.
pub fn find_phone_number(text: &str, default_code: &str) -> Result<PhoneNumber> {
    let caps = PHONE_PATTERN
        .captures(text)
        .ok_or(SiteCheckError::PhoneNotFound)?;

    let group = |i: usize| {
        caps.get(i)
            .map(|m| m.as_str().to_string())
            .unwrap_or_default()
    };

    let country_code = caps
        .get(1)
        .map(|m| format!("+{}", m.as_str()))
        .unwrap_or_else(|| default_code.to_string());

    Ok(PhoneNumber {
        country_code,
        area_code: group(2),
        exchange: group(3),
        first_pair: group(4),
        second_pair: group(5),
    })
}

/// Check that `candidate` is in the canonical format, returning it unchanged
pub fn validate_phone_number(candidate: &str) -> Result<&str> {
    if CANONICAL_PATTERN.is_match(candidate) {
        Ok(candidate)
    } else {
        Err(SiteCheckError::InvalidPhone(candidate.to_string()))
    }
}
