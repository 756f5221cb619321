//! Representation selection from the `Accept` header.

use axum::http::{HeaderMap, header};

pub const APPLICATION_JSON: &str = "application/json";
pub const APPLICATION_XML: &str = "application/xml";

/// Picks the content type announced for a user representation.
///
/// XML is chosen when any `Accept` value mentions `xml` (case-insensitive,
/// e.g. `application/xml`, `text/xml`, `application/vnd.api+xml`); JSON
/// otherwise, including when the header is absent or not valid UTF-8.
pub fn negotiated_content_type(headers: &HeaderMap) -> &'static str {
    let wants_xml = headers
        .get_all(header::ACCEPT)
        .iter()
        .filter_map(|v| v.to_str().ok())
        .any(|v| v.to_ascii_lowercase().contains("xml"));

    if wants_xml {
        APPLICATION_XML
    } else {
        APPLICATION_JSON
    }
}
