use email_address::EmailAddress;
use std::str::FromStr;

/// Checks `candidate` against the RFC 5322 address grammar, additionally
/// requiring a dotted domain and rejecting any whitespace or control characters.
#[must_use]
pub fn is_valid_email(candidate: &str) -> bool {
    if candidate.chars().any(|c| c.is_whitespace() || c.is_control()) {
        return false;
    }

    EmailAddress::from_str(candidate).is_ok_and(|address| {
        let domain = address.domain();
        domain.contains('.') && !domain.starts_with('.') && !domain.ends_with('.')
    })
}
