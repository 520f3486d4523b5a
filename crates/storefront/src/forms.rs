//! Form field validation shared by the checkout and contact forms.
//!
//! Each check returns the message to show next to the field, or `None` when
//! the value is acceptable.

use customtee_core::Email;

pub const EMAIL_REQUIRED: &str = "E-mail é obrigatório";
pub const EMAIL_INVALID: &str = "E-mail inválido";

/// The value must contain something other than whitespace.
#[must_use]
pub fn required(value: &str, message: &'static str) -> Option<&'static str> {
    value.trim().is_empty().then_some(message)
}

/// The value must be a well-formed email address.
///
/// Surrounding whitespace counts as a required-check pass but fails the
/// format check, matching what the customer typed.
#[must_use]
pub fn email(value: &str) -> Option<&'static str> {
    required(value, EMAIL_REQUIRED).or_else(|| Email::parse(value).err().map(|_| EMAIL_INVALID))
}

/// The value must be present and at least `min` characters long.
///
/// Length is counted on the raw value, so leading and trailing spaces count.
#[must_use]
pub fn required_min_chars(
    value: &str,
    min: usize,
    missing: &'static str,
    too_short: &'static str,
) -> Option<&'static str> {
    required(value, missing).or_else(|| (value.chars().count() < min).then_some(too_short))
}

/// Parse a numeric form field leniently, yielding `default` for blank or
/// malformed input.
#[must_use]
pub fn lenient_u32(value: Option<&str>, default: u32) -> u32 {
    value
        .and_then(|v| v.trim().parse::<u32>().ok())
        .unwrap_or(default)
}
