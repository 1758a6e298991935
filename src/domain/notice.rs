//! Outcome indicators carried from the submit route back to the view route.
//!
//! Success and error live in separate query parameters (`success`, `error`), so
//! `success=1` and `error=1` never mean the same thing.

/// Error indicator values, serialized as the `error` query parameter.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ErrorCode {
    MissingField,
    InvalidEmail,
    StorageFailure,
}

impl ErrorCode {
    #[must_use]
    pub const fn code(self) -> u8 {
        match self {
            Self::MissingField => 1,
            Self::InvalidEmail => 2,
            Self::StorageFailure => 3,
        }
    }

    #[must_use]
    pub fn from_code(value: &str) -> Option<Self> {
        match value {
            "1" => Some(Self::MissingField),
            "2" => Some(Self::InvalidEmail),
            "3" => Some(Self::StorageFailure),
            _ => None,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Indicator {
    Success,
    Error(ErrorCode),
}

impl Indicator {
    /// Interprets the view route's query parameters. Only exact, known values
    /// produce an indicator; `success` is checked first.
    #[must_use]
    pub fn from_query(success: Option<&str>, error: Option<&str>) -> Option<Self> {
        if success == Some("1") {
            return Some(Self::Success);
        }
        error.and_then(ErrorCode::from_code).map(Self::Error)
    }

    /// Redirect target on the view route carrying this indicator.
    #[must_use]
    pub fn location(self) -> String {
        match self {
            Self::Success => "/?success=1".to_string(),
            Self::Error(code) => format!("/?error={}", code.code()),
        }
    }

    #[must_use]
    pub const fn message(self) -> &'static str {
        match self {
            Self::Success => "Thank you! Your message has been received.",
            Self::Error(ErrorCode::MissingField) => "Please fill in all required fields.",
            Self::Error(ErrorCode::InvalidEmail) => "Please enter a valid email address.",
            Self::Error(ErrorCode::StorageFailure) => "Your message could not be saved. Please try again later.",
        }
    }

    #[must_use]
    pub const fn is_success(self) -> bool {
        matches!(self, Self::Success)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_success_indicator() {
        assert_eq!(Indicator::from_query(Some("1"), None), Some(Indicator::Success));
    }

    #[test]
    fn test_error_indicators() {
        assert_eq!(Indicator::from_query(None, Some("1")), Some(Indicator::Error(ErrorCode::MissingField)));
        assert_eq!(Indicator::from_query(None, Some("2")), Some(Indicator::Error(ErrorCode::InvalidEmail)));
        assert_eq!(Indicator::from_query(None, Some("3")), Some(Indicator::Error(ErrorCode::StorageFailure)));
    }

    #[test]
    fn test_unrecognized_values_yield_nothing() {
        assert_eq!(Indicator::from_query(None, None), None);
        assert_eq!(Indicator::from_query(Some("0"), None), None);
        assert_eq!(Indicator::from_query(Some("true"), None), None);
        assert_eq!(Indicator::from_query(Some(""), Some("")), None);
        assert_eq!(Indicator::from_query(None, Some("9")), None);
        assert_eq!(Indicator::from_query(None, Some(" 1")), None);
    }

    #[test]
    fn test_namespaces_do_not_collide() {
        let success = Indicator::from_query(Some("1"), None);
        let missing = Indicator::from_query(None, Some("1"));
        assert_ne!(success, missing);
        assert_ne!(Indicator::Success.location(), Indicator::Error(ErrorCode::MissingField).location());
    }

    #[test]
    fn test_success_takes_precedence() {
        assert_eq!(Indicator::from_query(Some("1"), Some("2")), Some(Indicator::Success));
        assert_eq!(Indicator::from_query(Some("7"), Some("2")), Some(Indicator::Error(ErrorCode::InvalidEmail)));
    }

    #[test]
    fn test_locations() {
        assert_eq!(Indicator::Success.location(), "/?success=1");
        assert_eq!(Indicator::Error(ErrorCode::MissingField).location(), "/?error=1");
        assert_eq!(Indicator::Error(ErrorCode::InvalidEmail).location(), "/?error=2");
        assert_eq!(Indicator::Error(ErrorCode::StorageFailure).location(), "/?error=3");
    }

    #[test]
    fn test_location_matches_code() {
        for code in [ErrorCode::MissingField, ErrorCode::InvalidEmail, ErrorCode::StorageFailure] {
            let location = Indicator::Error(code).location();
            assert_eq!(Indicator::from_query(None, location.strip_prefix("/?error=")), Some(Indicator::Error(code)));
        }
    }
}
