use std::time::Duration;

/// User agent string for HTTP requests
pub const USER_AGENT: &str = "uv-bot/0.1.0";

/// OpenWeather Map API base URL
pub const OPENWEATHER_MAP_API_BASE: &str = "https://api.openweathermap.org";

/// OpenWeather Map one-call endpoint path
pub const ONE_CALL_PATH: &str = "/data/2.5/onecall";

/// Sections of the one-call response we never read
pub const ONE_CALL_EXCLUDE: &str = "minutely,hourly,alerts,daily";

/// Twitter API base URL
pub const TWITTER_API_BASE: &str = "https://api.twitter.com";

/// Twitter status update endpoint path
pub const TWEETS_PATH: &str = "/2/tweets";

/// Lower bound of the Moderate band
pub const MODERATE_THRESHOLD: f64 = 3.0;

/// Lower bound of the High band
pub const HIGH_THRESHOLD: f64 = 8.0;

/// How often the poll loop wakes up to check for a stop request
pub const DEFAULT_LOOP_INTERVAL: Duration = Duration::from_secs(2);

/// How often locations are actually measured
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_secs(2 * 60);
