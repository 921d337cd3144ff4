use chrono::{SecondsFormat, Utc};

/// Returns the current UTC time as an RFC 3339 / ISO-8601 string.
///
/// Used for `cached_at` stamps on persisted issue records and for the
/// `timestamp` field of endpoint responses.
pub fn now_utc_iso() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Micros, true)
}
