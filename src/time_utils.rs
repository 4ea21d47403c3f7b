use chrono::{DateTime, NaiveDateTime, Utc};

/// Convert Unix seconds to a UTC datetime, truncating sub-second precision
pub fn unix_to_datetime(seconds: f64) -> Option<DateTime<Utc>> {
    if !seconds.is_finite() {
        return None;
    }
    DateTime::<Utc>::from_timestamp(seconds.floor() as i64, 0)
}

/// Format Unix seconds as "YYYY-MM-DD HH:MM:SS UTC"
pub fn format_unix(seconds: f64) -> String {
    match unix_to_datetime(seconds) {
        Some(dt) => dt.format("%Y-%m-%d %H:%M:%S UTC").to_string(),
        None => format!("{} (out of range)", seconds),
    }
}

/// Parse a query time given either as Unix seconds or as
/// "YYYY-MM-DD HH:MM:SS" / "YYYY-MM-DDTHH:MM:SS" in UTC
pub fn parse_time(input: &str) -> Result<f64, String> {
    let input = input.trim();
    if let Ok(seconds) = input.parse::<f64>() {
        return Ok(seconds);
    }
    for format in ["%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M:%S"] {
        if let Ok(dt) = NaiveDateTime::parse_from_str(input, format) {
            return Ok(dt.and_utc().timestamp() as f64);
        }
    }
    Err(format!(
        "Invalid time: {}. Expected Unix seconds or YYYY-MM-DD HH:MM:SS",
        input
    ))
}
