//! Startup configuration read from environment variables.
//!
//! Anything missing or malformed here is fatal; the bot never starts half-configured.

use std::time::Duration;

use crate::constants::{
    DEFAULT_LOOP_INTERVAL, DEFAULT_POLL_INTERVAL, OPENWEATHER_MAP_API_BASE, TWITTER_API_BASE,
};
use crate::error::UvBotError;
use crate::oauth::OAuthCredentials;
use crate::poll::PollSettings;
use crate::Result;

/// OpenWeather Map API key
pub const APP_ID_VAR: &str = "OPENWEATHER_MAP_APP_ID";
/// Overrides the OpenWeather Map base URL
pub const HOST_VAR: &str = "OPENWEATHER_MAP_HOST";
/// `console` or `twitter`
pub const REPORTER_VAR: &str = "UV_BOT_REPORTER";
/// Seconds between stop-signal checks
pub const LOOP_INTERVAL_VAR: &str = "UV_BOT_LOOP_INTERVAL_SECS";
/// Seconds between measurement cycles
pub const POLL_INTERVAL_VAR: &str = "UV_BOT_POLL_INTERVAL_SECS";
/// Overrides the Twitter API base URL
pub const TWITTER_HOST_VAR: &str = "TWITTER_API_HOST";

/// OAuth 1.0a user credentials for the Twitter reporter
pub const TWITTER_CONSUMER_KEY_VAR: &str = "TWITTER_CONSUMER_KEY";
pub const TWITTER_CONSUMER_SECRET_VAR: &str = "TWITTER_CONSUMER_SECRET";
pub const TWITTER_ACCESS_TOKEN_VAR: &str = "TWITTER_ACCESS_TOKEN";
pub const TWITTER_ACCESS_SECRET_VAR: &str = "TWITTER_ACCESS_SECRET";

/// Everything the bot needs to start
#[derive(Debug, Clone)]
pub struct Settings {
    pub weather: WeatherSettings,
    pub reporter: ReporterSettings,
    pub poll: PollSettings,
}

/// Weather provider host and credentials
#[derive(Debug, Clone)]
pub struct WeatherSettings {
    pub host: String,
    pub app_id: String,
}

/// Where alerts are published
#[derive(Debug, Clone)]
pub enum ReporterSettings {
    Console,
    Twitter {
        host: String,
        credentials: OAuthCredentials,
    },
}

impl Settings {
    /// Reads settings from the process environment
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Reads settings through `lookup`, which returns `None` for unset variables.
    /// Empty values count as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |name: &str| lookup(name).filter(|value| !value.trim().is_empty());

        let app_id = get(APP_ID_VAR).ok_or_else(|| {
            UvBotError::configuration(format!(
                "An OpenWeather Map app ID is required. Please set the {APP_ID_VAR} env var"
            ))
        })?;
        let weather = WeatherSettings {
            host: get(HOST_VAR).unwrap_or_else(|| OPENWEATHER_MAP_API_BASE.to_string()),
            app_id,
        };

        let reporter = match get(REPORTER_VAR).as_deref().map(str::to_lowercase).as_deref() {
            None | Some("console") | Some("stdout") => ReporterSettings::Console,
            Some("twitter") => {
                let require = |name: &str| {
                    get(name).ok_or_else(|| {
                        UvBotError::configuration(format!(
                            "The twitter reporter requires the {name} env var"
                        ))
                    })
                };
                ReporterSettings::Twitter {
                    host: get(TWITTER_HOST_VAR).unwrap_or_else(|| TWITTER_API_BASE.to_string()),
                    credentials: OAuthCredentials {
                        consumer_key: require(TWITTER_CONSUMER_KEY_VAR)?,
                        consumer_secret: require(TWITTER_CONSUMER_SECRET_VAR)?,
                        access_token: require(TWITTER_ACCESS_TOKEN_VAR)?,
                        access_secret: require(TWITTER_ACCESS_SECRET_VAR)?,
                    },
                }
            }
            Some(other) => {
                return Err(UvBotError::configuration(format!(
                    "Unknown reporter '{other}' in {REPORTER_VAR}, expected 'console' or 'twitter'"
                )))
            }
        };

        let poll = PollSettings {
            loop_interval: duration_secs(
                get(LOOP_INTERVAL_VAR),
                LOOP_INTERVAL_VAR,
                DEFAULT_LOOP_INTERVAL,
            )?,
            poll_interval: duration_secs(
                get(POLL_INTERVAL_VAR),
                POLL_INTERVAL_VAR,
                DEFAULT_POLL_INTERVAL,
            )?,
        };

        Ok(Self {
            weather,
            reporter,
            poll,
        })
    }
}

fn duration_secs(value: Option<String>, name: &str, default: Duration) -> Result<Duration> {
    let Some(value) = value else {
        return Ok(default);
    };
    match value.trim().parse::<u64>() {
        Ok(secs) if secs > 0 => Ok(Duration::from_secs(secs)),
        _ => Err(UvBotError::configuration(format!(
            "{name} must be a positive number of seconds, got '{value}'"
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn settings(vars: &[(&str, &str)]) -> Result<Settings> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Settings::from_lookup(|name| vars.get(name).cloned())
    }

    #[test]
    fn test_missing_app_id_is_fatal() {
        let err = settings(&[]).unwrap_err();
        assert!(matches!(err, UvBotError::Configuration { .. }));
        assert!(err.to_string().contains(APP_ID_VAR));

        assert!(settings(&[(APP_ID_VAR, "  ")]).is_err());
    }

    #[test]
    fn test_defaults() {
        let settings = settings(&[(APP_ID_VAR, "abcd")]).unwrap();
        assert_eq!(settings.weather.app_id, "abcd");
        assert_eq!(settings.weather.host, "https://api.openweathermap.org");
        assert!(matches!(settings.reporter, ReporterSettings::Console));
        assert_eq!(settings.poll, PollSettings::default());
    }

    #[test]
    fn test_twitter_reporter() {
        let settings = settings(&[
            (APP_ID_VAR, "abcd"),
            (REPORTER_VAR, "Twitter"),
            (TWITTER_CONSUMER_KEY_VAR, "ck"),
            (TWITTER_CONSUMER_SECRET_VAR, "cs"),
            (TWITTER_ACCESS_TOKEN_VAR, "at"),
            (TWITTER_ACCESS_SECRET_VAR, "as"),
        ])
        .unwrap();

        match settings.reporter {
            ReporterSettings::Twitter { host, credentials } => {
                assert_eq!(host, "https://api.twitter.com");
                assert_eq!(credentials.consumer_key, "ck");
                assert_eq!(credentials.access_secret, "as");
            }
            ReporterSettings::Console => panic!("expected twitter reporter"),
        }
    }

    #[test]
    fn test_twitter_reporter_requires_credentials() {
        let err = settings(&[
            (APP_ID_VAR, "abcd"),
            (REPORTER_VAR, "twitter"),
            (TWITTER_CONSUMER_KEY_VAR, "ck"),
        ])
        .unwrap_err();
        assert!(err.to_string().contains(TWITTER_CONSUMER_SECRET_VAR));
    }

    #[test]
    fn test_unknown_reporter() {
        assert!(settings(&[(APP_ID_VAR, "abcd"), (REPORTER_VAR, "carrier-pigeon")]).is_err());
    }

    #[test]
    fn test_intervals() {
        let settings = settings(&[
            (APP_ID_VAR, "abcd"),
            (LOOP_INTERVAL_VAR, "5"),
            (POLL_INTERVAL_VAR, "600"),
        ])
        .unwrap();
        assert_eq!(settings.poll.loop_interval, Duration::from_secs(5));
        assert_eq!(settings.poll.poll_interval, Duration::from_secs(600));
    }

    #[test]
    fn test_invalid_intervals() {
        assert!(settings(&[(APP_ID_VAR, "abcd"), (LOOP_INTERVAL_VAR, "0")]).is_err());
        assert!(settings(&[(APP_ID_VAR, "abcd"), (POLL_INTERVAL_VAR, "soon")]).is_err());
    }
}
