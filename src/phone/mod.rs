//! Phone number normalization
//!
//! Parses a free-form number and renders it as `+<country code><national
//! number>`, with no separators.

use phonenumber::country;
use thiserror::Error;

/// Phone number errors
#[derive(Debug, Error)]
pub enum PhoneError {
    /// The input could not be parsed as a phone number
    #[error("Could not parse phone number {input:?}: {reason}")]
    Unparsable { input: String, reason: String },

    /// The configured default region is not a known ISO 3166 code
    #[error("Unknown default region: {0}")]
    UnknownRegion(String),
}

/// Normalize `input` to `+<cc><national>`.
///
/// Without `default_region`, numbers must carry their own `+<cc>` prefix.
pub fn normalize(input: &str, default_region: Option<&str>) -> Result<String, PhoneError> {
    let region = default_region
        .map(|r| {
            r.parse::<country::Id>()
                .map_err(|_| PhoneError::UnknownRegion(r.to_string()))
        })
        .transpose()?;

    let number = phonenumber::parse(region, input).map_err(|e| PhoneError::Unparsable {
        input: input.to_string(),
        reason: e.to_string(),
    })?;

    Ok(format!("+{}{}", number.code().value(), number.national().value()))
}
