use crate::domain::email::is_valid_email;
use thiserror::Error;
use time::OffsetDateTime;
use time::format_description::BorrowedFormatItem;
use time::macros::format_description;

/// `YYYY-MM-DD HH:MM:SS`, the timestamp shape of every log line.
pub const TIMESTAMP_FORMAT: &[BorrowedFormatItem<'static>] =
    format_description!("[year]-[month]-[day] [hour]:[minute]:[second]");

#[cfg(windows)]
pub const LINE_ENDING: &str = "\r\n";
#[cfg(not(windows))]
pub const LINE_ENDING: &str = "\n";

#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationError {
    #[error("A required field is empty")]
    MissingField,
    #[error("The email address is malformed")]
    InvalidEmail,
}

/// Raw fields as they arrive from the form, each possibly absent.
#[derive(Debug, Clone, Default)]
pub struct SubmissionFields {
    pub name: Option<String>,
    pub email: Option<String>,
    pub message: Option<String>,
}

/// A validated submission. Field values are already trimmed and markup-escaped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Submission {
    pub(crate) name: String,
    pub(crate) email: String,
    pub(crate) message: String,
    pub(crate) received_at: OffsetDateTime,
}

/// Trims surrounding whitespace and escapes `& < > " '`. Absent values become the empty string.
#[must_use]
pub fn sanitize(value: Option<&str>) -> String {
    value.map(|v| html_escape::encode_quoted_attribute(v.trim()).into_owned()).unwrap_or_default()
}

/// Wall-clock time in the server's local offset, or UTC when the offset is unknown.
#[must_use]
pub fn local_now() -> OffsetDateTime {
    OffsetDateTime::now_local().unwrap_or_else(|_| OffsetDateTime::now_utc())
}

impl Submission {
    /// Sanitizes and validates raw fields. Checks run in order and stop at the first failure:
    /// every field must be non-empty, then the email must be well formed.
    ///
    /// # Errors
    /// Returns `ValidationError::MissingField` or `ValidationError::InvalidEmail`.
    pub fn parse(fields: &SubmissionFields, received_at: OffsetDateTime) -> Result<Self, ValidationError> {
        let name = sanitize(fields.name.as_deref());
        let email = sanitize(fields.email.as_deref());
        let message = sanitize(fields.message.as_deref());

        if name.is_empty() || email.is_empty() || message.is_empty() {
            return Err(ValidationError::MissingField);
        }

        if !is_valid_email(&email) {
            return Err(ValidationError::InvalidEmail);
        }

        Ok(Self { name, email, message, received_at })
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn email(&self) -> &str {
        &self.email
    }

    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Renders the single log line for this submission, terminator included.
    ///
    /// # Errors
    /// Returns an error if the timestamp cannot be formatted.
    pub fn to_log_line(&self) -> Result<String, time::error::Format> {
        let timestamp = self.received_at.format(TIMESTAMP_FORMAT)?;
        Ok(format!(
            "[{timestamp}] Name: {}, Email: {}, Message: {}{LINE_ENDING}",
            self.name, self.email, self.message
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::macros::datetime;

    fn fields(name: &str, email: &str, message: &str) -> SubmissionFields {
        SubmissionFields { name: Some(name.into()), email: Some(email.into()), message: Some(message.into()) }
    }

    #[test]
    fn test_sanitize_trims_and_escapes() {
        assert_eq!(sanitize(Some("  Alice \n")), "Alice");
        assert_eq!(sanitize(None), "");
        assert_eq!(sanitize(Some("   ")), "");

        let escaped = sanitize(Some("<script>alert(1)<&\"'"));
        assert!(!escaped.contains('<'));
        assert!(!escaped.contains('>'));
        assert!(!escaped.contains('"'));
        assert!(!escaped.contains('\''));
        assert!(escaped.starts_with("&lt;script&gt;alert(1)&lt;&amp;&quot;"));
    }

    #[test]
    fn test_sanitize_keeps_slashes() {
        assert_eq!(sanitize(Some("see http://example.com/a")), "see http://example.com/a");
    }

    #[test]
    fn test_email_with_slash_is_accepted() {
        let submission = Submission::parse(&fields("Alice", "a/b@example.com", "Hi"), local_now()).unwrap();
        assert_eq!(submission.email(), "a/b@example.com");
    }

    #[test]
    fn test_parse_valid_submission() {
        let received_at = datetime!(2024-03-09 14:05:07 UTC);
        let submission = Submission::parse(&fields(" Alice ", "alice@example.com", "Hello there"), received_at).unwrap();

        assert_eq!(submission.name(), "Alice");
        assert_eq!(submission.email(), "alice@example.com");
        assert_eq!(submission.message(), "Hello there");
        assert!(submission.to_log_line().unwrap().starts_with("[2024-03-09 14:05:07] "));
    }

    #[test]
    fn test_parse_missing_fields() {
        let now = local_now();
        assert_eq!(Submission::parse(&fields("", "alice@example.com", "Hi"), now), Err(ValidationError::MissingField));
        assert_eq!(Submission::parse(&fields("Alice", "   ", "Hi"), now), Err(ValidationError::MissingField));
        assert_eq!(Submission::parse(&fields("Alice", "alice@example.com", "\t\n"), now), Err(ValidationError::MissingField));
        assert_eq!(Submission::parse(&SubmissionFields::default(), now), Err(ValidationError::MissingField));
    }

    #[test]
    fn test_missing_field_wins_over_bad_email() {
        let result = Submission::parse(&fields("", "not-an-email", "Hi"), local_now());
        assert_eq!(result, Err(ValidationError::MissingField));
    }

    #[test]
    fn test_parse_invalid_email() {
        let now = local_now();
        assert_eq!(Submission::parse(&fields("Alice", "not-an-email", "Hi"), now), Err(ValidationError::InvalidEmail));
        assert_eq!(Submission::parse(&fields("Alice", "a@b", "Hi"), now), Err(ValidationError::InvalidEmail));
    }

    #[test]
    fn test_email_is_validated_after_escaping() {
        let result = Submission::parse(&fields("Alice", "o'brien@example.com", "Hi"), local_now());
        assert_eq!(result, Err(ValidationError::InvalidEmail));
    }

    #[test]
    fn test_log_line_format() {
        let received_at = datetime!(2024-03-09 14:05:07 UTC);
        let submission = Submission::parse(&fields("Alice", "alice@example.com", "Hello, there: friend"), received_at).unwrap();

        assert_eq!(
            submission.to_log_line().unwrap(),
            format!("[2024-03-09 14:05:07] Name: Alice, Email: alice@example.com, Message: Hello, there: friend{LINE_ENDING}")
        );
    }

    #[test]
    fn test_log_line_stores_escaped_markup() {
        let submission =
            Submission::parse(&fields("<script>x</script>", "alice@example.com", "Hi"), local_now()).unwrap();
        let line = submission.to_log_line().unwrap();

        assert!(line.contains("Name: &lt;script&gt;x&lt;"));
        assert!(!line.contains("<script>"));
    }
}
