use once_cell::sync::Lazy;
use regex::Regex;

use crate::service::BookingError;

static EMAIL_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"^[A-Za-z0-9.!#$%&'*+/=?^_`{|}~-]+@[A-Za-z0-9](?:[A-Za-z0-9-]{0,61}[A-Za-z0-9])?(?:\.[A-Za-z0-9](?:[A-Za-z0-9-]{0,61}[A-Za-z0-9])?)+$",
    )
    .expect("regex compiles")
});

pub fn validate_email(value: &str) -> Result<&str, BookingError> {
    let local = value.split('@').next().unwrap_or_default();
    let well_formed = EMAIL_RE.is_match(value)
        && local.len() <= 64
        && !local.starts_with('.')
        && !local.ends_with('.')
        && !local.contains("..");
    if well_formed {
        Ok(value)
    } else {
        Err(BookingError::InvalidEmail(value.to_string()))
    }
}

pub fn validate_client_name(value: &str) -> Result<&str, BookingError> {
    if value.trim().is_empty() {
        Err(BookingError::InvalidName)
    } else {
        Ok(value)
    }
}
