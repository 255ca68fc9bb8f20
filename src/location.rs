//! Registry of monitored locations

use chrono_tz::Tz;

use crate::error::UvBotError;
use crate::models::Location;
use crate::Result;

/// Display name of the built-in location; alerts for it use their own wording
pub const TEL_AVIV: &str = "Tel-Aviv";

/// Locations measured on every poll, in registration order.
pub fn default_locations() -> Vec<Location> {
    vec![Location::new(TEL_AVIV, "Asia/Jerusalem", "32.109333", "34.855499")]
}

/// Resolves an IANA identifier against the bundled time zone database.
pub fn resolve_timezone(iana: &str) -> Result<Tz> {
    iana.parse::<Tz>()
        .map_err(|_| UvBotError::location_load(iana, format!("unknown time zone {iana}")))
}

/// Checks that every location's time zone resolves. Run once at startup.
pub fn validate_locations(locations: &[Location]) -> Result<()> {
    for location in locations {
        let tz = resolve_timezone(&location.iana)?;
        tracing::debug!(
            location = %location.display_name,
            timezone = %tz.name(),
            "Resolved location"
        );
    }
    Ok(())
}
