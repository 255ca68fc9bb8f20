use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use std::sync::Arc;

use crate::constants::{ONE_CALL_EXCLUDE, ONE_CALL_PATH, OPENWEATHER_MAP_API_BASE, USER_AGENT};
use crate::error::UvBotError;
use crate::models::{Location, OneCallResponse};
use crate::Result;

/// Source of current UV readings
#[async_trait]
pub trait MeasurementProvider: Send + Sync {
    /// Returns the current UV index at a location. Never retries.
    async fn measure(&self, location: &Location) -> Result<f64>;
}

/// OpenWeather Map one-call API client
#[derive(Clone)]
pub struct OpenWeatherMap {
    client: Arc<Client>,
    host: String,
    app_id: String,
}

impl OpenWeatherMap {
    /// Creates a client against the public API
    pub fn new(app_id: impl Into<String>) -> Result<Self> {
        Self::with_host(OPENWEATHER_MAP_API_BASE, app_id)
    }

    /// Creates a client against any host serving the one-call API
    pub fn with_host(host: impl Into<String>, app_id: impl Into<String>) -> Result<Self> {
        let client = Client::builder()
            .user_agent(USER_AGENT)
            .build()
            .map_err(|e| UvBotError::configuration(format!("failed to build HTTP client: {e}")))?;

        Ok(Self {
            client: Arc::new(client),
            host: host.into().trim_end_matches('/').to_string(),
            app_id: app_id.into(),
        })
    }

    /// Makes an HTTP GET request and deserializes the JSON response
    async fn make_request<T: for<'de> Deserialize<'de>>(
        &self,
        url: &str,
        query: &[(&str, &str)],
    ) -> std::result::Result<T, String> {
        let response = self
            .client
            .get(url)
            .query(query)
            .send()
            .await
            .map_err(|e| format!("failed to execute HTTP request: {e}"))?;

        if !response.status().is_success() {
            return Err(format!("request failed with status: {}", response.status()));
        }

        response
            .json::<T>()
            .await
            .map_err(|e| format!("failed to parse JSON response: {e}"))
    }
}

#[async_trait]
impl MeasurementProvider for OpenWeatherMap {
    async fn measure(&self, location: &Location) -> Result<f64> {
        let url = format!("{}{}", self.host, ONE_CALL_PATH);
        let query = [
            ("lat", location.latitude.as_str()),
            ("lon", location.longitude.as_str()),
            ("appid", self.app_id.as_str()),
            ("exclude", ONE_CALL_EXCLUDE),
        ];

        let response = self
            .make_request::<OneCallResponse>(&url, &query)
            .await
            .map_err(|message| UvBotError::measurement(&location.display_name, message))?;

        let current = response.current.ok_or_else(|| {
            UvBotError::measurement(&location.display_name, "response has no current conditions")
        })?;

        if !current.uvi.is_finite() || current.uvi < 0.0 {
            return Err(UvBotError::measurement(
                &location.display_name,
                format!("invalid UV index {}", current.uvi),
            ));
        }

        Ok(current.uvi)
    }
}
