//! Canonical expiry rendering.
//!
//! Signatures cover the expiry as text, so issuer and verifier must render it
//! byte for byte the same way: UTC, RFC 3339, exactly nine fractional digits.

use jiff::Timestamp;
use jiff::fmt::temporal::DateTimePrinter;

use crate::GuthError;

/// Render a timestamp in the canonical form, eg `2024-01-01T00:10:00.000000000Z`.
pub fn render(ts: Timestamp) -> String {
    DateTimePrinter::new()
        .precision(Some(9))
        .timestamp_to_string(&ts)
}

/// Parse a timestamp, accepting only the canonical form.
pub fn parse(text: &[u8]) -> Result<Timestamp, GuthError> {
    let text = std::str::from_utf8(text).map_err(|_| GuthError::TimestampFormat)?;
    let ts: Timestamp = text.parse().map_err(|_| GuthError::TimestampFormat)?;
    if render(ts) != text {
        return Err(GuthError::TimestampFormat);
    }
    Ok(ts)
}
