//! UV index alert bot.
//!
//! Polls a weather provider for the UV index at a fixed set of locations and
//! publishes an alert whenever a location moves into a different severity band.

pub mod config;
pub mod constants;
pub mod error;
pub mod formatters;
pub mod location;
pub mod models;
pub mod oauth;
pub mod poll;
pub mod provider;
pub mod reporter;
pub mod severity;

pub use config::{ReporterSettings, Settings};
pub use error::UvBotError;
pub use models::Location;
pub use poll::{CycleSummary, LastKnownIndex, Outcome, PollSettings, Poller};
pub use provider::{MeasurementProvider, OpenWeatherMap};
pub use reporter::{ConsoleReporter, MeasurementReporter, TwitterReporter};
pub use severity::{changed, transition, Severity};

/// Result type used throughout the library
pub type Result<T> = std::result::Result<T, UvBotError>;
