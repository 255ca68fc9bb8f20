use chrono::Utc;

use crate::location::TEL_AVIV;
use crate::models::Location;
use crate::severity::Severity;

/// Formats the alert for a location using the current time as the post tag
pub fn format_alert(location: &Location, index: f64) -> String {
    format_alert_at(location, index, Utc::now().timestamp())
}

/// Formats the alert for a location.
///
/// The trailing `#uvbot_<timestamp>` tag keeps otherwise identical posts distinct.
pub fn format_alert_at(location: &Location, index: f64, timestamp: i64) -> String {
    let severity = Severity::classify(index);
    match location.display_name.as_str() {
        TEL_AVIV => tel_aviv_alert(severity, index, timestamp),
        _ => generic_alert(location, severity, index, timestamp),
    }
}

fn tel_aviv_alert(severity: Severity, index: f64, timestamp: i64) -> String {
    match severity {
        Severity::Low => format!(
            "The UV index in Tel-Aviv is {:.1}. It's safe to go outside! \u{1F60E}\n#uvindex #telaviv #uvbot_{}",
            index, timestamp
        ),
        Severity::Moderate => format!(
            "The UV Index in Tel-Aviv is {:.1}. Seek shade and lather up on that sun screen! \u{1F31E}\n#uvindex #telaviv #uvbot_{}",
            index, timestamp
        ),
        Severity::High => format!(
            "Hot dang! The UV Index in Tel-Aviv is {:.1}. Stay indoors! \u{1F525}\n#uvindex #telaviv #uvbot_{}",
            index, timestamp
        ),
    }
}

fn generic_alert(location: &Location, severity: Severity, index: f64, timestamp: i64) -> String {
    let advice = match severity {
        Severity::Low => "Enjoy the outdoors.",
        Severity::Moderate => "Wear sunscreen and look for shade around noon.",
        Severity::High => "Avoid the sun if you can.",
    };
    format!(
        "The UV index in {} is {:.1} ({}). {}\n#uvindex #{} #uvbot_{}",
        location.display_name,
        index,
        severity,
        advice,
        hashtag(&location.display_name),
        timestamp
    )
}

/// Lowercases a display name and drops everything but letters and digits
fn hashtag(display_name: &str) -> String {
    display_name
        .chars()
        .filter(|c| c.is_alphanumeric())
        .flat_map(char::to_lowercase)
        .collect()
}
