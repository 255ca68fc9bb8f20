//! Publishing alerts: console output or a status update on Twitter.

use async_trait::async_trait;
use reqwest::Client;
use std::io::Write;
use std::sync::{Arc, Mutex};

use crate::constants::{TWEETS_PATH, TWITTER_API_BASE, USER_AGENT};
use crate::error::UvBotError;
use crate::formatters::format_alert;
use crate::models::{CreateTweetRequest, CreateTweetResponse, Location};
use crate::oauth::{authorization_header, OAuthCredentials};
use crate::Result;

/// Sink for UV alerts
#[async_trait]
pub trait MeasurementReporter: Send + Sync {
    /// Publishes the alert for `index` at `location`
    async fn report(&self, location: &Location, index: f64) -> Result<()>;
}

/// Prints alerts, one per line
pub struct ConsoleReporter<W = std::io::Stdout> {
    out: Mutex<W>,
}

impl ConsoleReporter {
    /// Reporter writing to the process stdout
    pub fn stdout() -> Self {
        Self::with_writer(std::io::stdout())
    }
}

impl<W: Write + Send> ConsoleReporter<W> {
    /// Reporter writing to any sink
    pub fn with_writer(out: W) -> Self {
        Self {
            out: Mutex::new(out),
        }
    }

    /// Returns the underlying writer
    pub fn into_inner(self) -> W {
        match self.out.into_inner() {
            Ok(out) => out,
            Err(poisoned) => poisoned.into_inner(),
        }
    }
}

#[async_trait]
impl<W: Write + Send> MeasurementReporter for ConsoleReporter<W> {
    async fn report(&self, location: &Location, index: f64) -> Result<()> {
        let alert = format_alert(location, index);
        let mut out = match self.out.lock() {
            Ok(out) => out,
            Err(poisoned) => poisoned.into_inner(),
        };
        // Console output is best effort.
        if let Err(e) = writeln!(out, "{alert}").and_then(|()| out.flush()) {
            tracing::warn!(location = %location.display_name, error = %e, "Failed to write alert");
        }
        Ok(())
    }
}

/// Posts alerts as tweets with OAuth 1.0a user credentials
#[derive(Clone)]
pub struct TwitterReporter {
    client: Arc<Client>,
    host: String,
    credentials: OAuthCredentials,
}

impl TwitterReporter {
    /// Creates a reporter against the public API
    pub fn new(credentials: OAuthCredentials) -> Result<Self> {
        Self::with_host(TWITTER_API_BASE, credentials)
    }

    /// Creates a reporter against any host serving the tweets endpoint
    pub fn with_host(host: impl Into<String>, credentials: OAuthCredentials) -> Result<Self> {
        let client = Client::builder()
            .user_agent(USER_AGENT)
            .build()
            .map_err(|e| UvBotError::configuration(format!("failed to build HTTP client: {e}")))?;

        Ok(Self {
            client: Arc::new(client),
            host: host.into().trim_end_matches('/').to_string(),
            credentials,
        })
    }

    /// Posts `alert`. Any status below 400 counts as published; the tweet id comes back
    /// only when the body parses.
    async fn post(&self, location: &Location, alert: String) -> Result<Option<String>> {
        let url = format!("{}{}", self.host, TWEETS_PATH);
        let authorization = authorization_header(&self.credentials, "POST", &url, &[])?;

        let response = self
            .client
            .post(&url)
            .header(reqwest::header::AUTHORIZATION, authorization)
            .json(&CreateTweetRequest { text: alert.clone() })
            .send()
            .await
            .map_err(|e| {
                UvBotError::report(
                    &location.display_name,
                    format!("failed to tweet '{alert}': {e}"),
                )
            })?;

        let status = response.status();
        if status.as_u16() >= 400 {
            let body = response.text().await.unwrap_or_default();
            return Err(UvBotError::report(
                &location.display_name,
                format!(
                    "failed to tweet '{alert}'. Response code: {}. Body: {body}",
                    status.as_u16()
                ),
            ));
        }

        let created = response.json::<CreateTweetResponse>().await.ok();
        Ok(created.map(|created| created.data.id))
    }
}

#[async_trait]
impl MeasurementReporter for TwitterReporter {
    async fn report(&self, location: &Location, index: f64) -> Result<()> {
        let alert = format_alert(location, index);
        let tweet_id = self.post(location, alert).await?;
        tracing::info!(
            location = %location.display_name,
            tweet_id = tweet_id.as_deref().unwrap_or("unknown"),
            "Posted alert"
        );
        Ok(())
    }
}
