//! Error types for the UV bot

use thiserror::Error;

/// Main error type for the UV bot
#[derive(Error, Debug)]
pub enum UvBotError {
    /// Missing or malformed startup configuration. Fatal.
    #[error("Configuration error: {message}")]
    Configuration { message: String },

    /// The weather provider could not produce an index for a location.
    #[error("failed to get UV index for {location}: {message}")]
    Measurement { location: String, message: String },

    /// An alert could not be published for a location.
    #[error("failed to report UV index for {location}: {message}")]
    Report { location: String, message: String },

    /// A configured location references a time zone we cannot resolve. Fatal.
    #[error("failed to load location {timezone}: {message}")]
    LocationLoad { timezone: String, message: String },
}

impl UvBotError {
    /// Create a new configuration error
    pub fn configuration<S: Into<String>>(message: S) -> Self {
        Self::Configuration {
            message: message.into(),
        }
    }

    /// Create a new measurement error
    pub fn measurement<L: Into<String>, S: Into<String>>(location: L, message: S) -> Self {
        Self::Measurement {
            location: location.into(),
            message: message.into(),
        }
    }

    /// Create a new report error
    pub fn report<L: Into<String>, S: Into<String>>(location: L, message: S) -> Self {
        Self::Report {
            location: location.into(),
            message: message.into(),
        }
    }

    /// Create a new location load error
    pub fn location_load<T: Into<String>, S: Into<String>>(timezone: T, message: S) -> Self {
        Self::LocationLoad {
            timezone: timezone.into(),
            message: message.into(),
        }
    }

    /// Whether the poll loop can carry on past this error.
    #[must_use]
    pub fn is_recoverable(&self) -> bool {
        matches!(self, Self::Measurement { .. } | Self::Report { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_creation() {
        let err = UvBotError::configuration("missing app id");
        assert!(matches!(err, UvBotError::Configuration { .. }));

        let err = UvBotError::measurement("Tel-Aviv", "timeout");
        assert!(matches!(err, UvBotError::Measurement { .. }));

        let err = UvBotError::report("Tel-Aviv", "forbidden");
        assert!(matches!(err, UvBotError::Report { .. }));
    }

    #[test]
    fn test_recoverable_classification() {
        assert!(UvBotError::measurement("a", "b").is_recoverable());
        assert!(UvBotError::report("a", "b").is_recoverable());
        assert!(!UvBotError::configuration("b").is_recoverable());
        assert!(!UvBotError::location_load("haha", "unknown time zone haha").is_recoverable());
    }

    #[test]
    fn test_messages_name_the_location() {
        let err = UvBotError::measurement("Tel-Aviv", "connection refused");
        assert_eq!(
            err.to_string(),
            "failed to get UV index for Tel-Aviv: connection refused"
        );

        let err = UvBotError::location_load("haha", "unknown time zone haha");
        assert_eq!(
            err.to_string(),
            "failed to load location haha: unknown time zone haha"
        );
    }
}
