//! Outbound links for a resource card.
//!
//! Plain string formatting; nothing is opened or dialed from here.

use crate::catalog::ResourceRecord;

const DIRECTIONS_BASE: &str = "https://www.google.com/maps/dir/?api=1&destination=";

/// Map-service directions URL for the record's coordinates
pub fn directions_url(record: &ResourceRecord) -> String {
    format!(
        "{}{},{}",
        DIRECTIONS_BASE, record.coordinates.lat, record.coordinates.lng
    )
}

/// `tel:` link for the record's phone, if it has one
pub fn dial_link(record: &ResourceRecord) -> Option<String> {
    record
        .contact_phone
        .as_deref()
        .map(str::trim)
        .filter(|phone| !phone.is_empty())
        .map(|phone| format!("tel:{}", phone))
}
