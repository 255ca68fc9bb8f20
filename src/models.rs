use serde::{Deserialize, Serialize};

// ============================================================================
// Monitored Locations
// ============================================================================

/// A place we keep an eye on. The display name is the unique key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Location {
    pub display_name: String,
    /// IANA time zone identifier, e.g. `Asia/Jerusalem`
    pub iana: String,
    pub latitude: String,
    pub longitude: String,
}

impl Location {
    /// Creates a location from its name, time zone and coordinates
    pub fn new(
        display_name: impl Into<String>,
        iana: impl Into<String>,
        latitude: impl Into<String>,
        longitude: impl Into<String>,
    ) -> Self {
        Self {
            display_name: display_name.into(),
            iana: iana.into(),
            latitude: latitude.into(),
            longitude: longitude.into(),
        }
    }
}

// ============================================================================
// OpenWeather Map API Models
// ============================================================================

/// One-call response; only the current conditions are read
#[derive(Debug, Deserialize)]
pub struct OneCallResponse {
    pub current: Option<OneCallCurrent>,
}

/// Current conditions block
#[derive(Debug, Deserialize)]
pub struct OneCallCurrent {
    /// UV index at the time of the measurement
    pub uvi: f64,
}

// ============================================================================
// Twitter API Models
// ============================================================================

/// Body of `POST /2/tweets`
#[derive(Debug, Serialize)]
pub struct CreateTweetRequest {
    pub text: String,
}

/// Successful `POST /2/tweets` response
#[derive(Debug, Deserialize)]
pub struct CreateTweetResponse {
    pub data: CreatedTweet,
}

/// The tweet created by a post
#[derive(Debug, Deserialize)]
pub struct CreatedTweet {
    pub id: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_one_call_response_deserialization() {
        let body =
            r#"{"lat": 32.1, "lon": 34.86, "current": {"dt": 1618317040, "uvi": 5.32, "temp": 290.1}}"#;
        let response: OneCallResponse = serde_json::from_str(body).unwrap();
        assert_eq!(response.current.unwrap().uvi, 5.32);
    }

    #[test]
    fn test_one_call_response_without_current() {
        let response: OneCallResponse = serde_json::from_str(r#"{"lat": 32.1}"#).unwrap();
        assert!(response.current.is_none());
    }

    #[test]
    fn test_create_tweet_response_deserialization() {
        let body = r#"{"data": {"id": "1445880548472328192", "text": "hello"}}"#;
        let response: CreateTweetResponse = serde_json::from_str(body).unwrap();
        assert_eq!(response.data.id, "1445880548472328192");
    }
}
