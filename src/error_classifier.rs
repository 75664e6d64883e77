use crate::api::error::ApiError;
use crate::date_range::RangeError;

#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub enum LogLevel {
    Trace = 0,
    Debug = 1,
    Info = 2,
    Warn = 3,
    Error = 4,
}

#[derive(Debug, Clone)]
pub struct ErrorClassifier;

impl ErrorClassifier {
    pub fn new() -> Self {
        Self
    }

    pub fn classify_api_error(&self, error: &ApiError) -> LogLevel {
        match error {
            // Temporary server issues
            ApiError::Http { status, .. } if (500..=599).contains(status) => LogLevel::Warn,

            // Wrong URL or rejected query
            ApiError::Http { status, .. } if (400..=499).contains(status) => LogLevel::Error,

            // Server answered with something we cannot read
            ApiError::Decode(_) | ApiError::InvalidDate(_) => LogLevel::Error,

            // Network issues - usually temporary
            _ => LogLevel::Warn,
        }
    }

    pub fn classify_range_error(&self, error: &RangeError) -> LogLevel {
        match error {
            // The user is still editing
            RangeError::StartAfterEnd
            | RangeError::EndBeforeStart
            | RangeError::SpanExceeded { .. }
            | RangeError::OutOfBounds { .. } => LogLevel::Info,

            RangeError::Uninitialized | RangeError::AlreadyInitialized => LogLevel::Warn,
            RangeError::InvalidBounds { .. } => LogLevel::Error,
        }
    }
}

impl Default for ErrorClassifier {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify_api_error() {
        let classifier = ErrorClassifier::new();
        let server = ApiError::Http {
            status: 503,
            message: "unavailable".to_string(),
        };
        let not_found = ApiError::Http {
            status: 404,
            message: "Not Found".to_string(),
        };
        assert_eq!(classifier.classify_api_error(&server), LogLevel::Warn);
        assert_eq!(classifier.classify_api_error(&not_found), LogLevel::Error);
        assert_eq!(
            classifier.classify_api_error(&ApiError::InvalidDate("x".to_string())),
            LogLevel::Error
        );
    }

    #[test]
    fn test_classify_range_error() {
        let classifier = ErrorClassifier::default();
        assert_eq!(
            classifier.classify_range_error(&RangeError::SpanExceeded { max_days: 30 }),
            LogLevel::Info
        );
        assert_eq!(
            classifier.classify_range_error(&RangeError::Uninitialized),
            LogLevel::Warn
        );
    }
}
