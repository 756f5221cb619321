//! Pagination query parameters and the `X-Pagination` descriptor.

use serde::{Deserialize, Deserializer, Serialize};
use serde_with::{DeserializeAs, serde_as};

use crate::domain::entities::Page;
use crate::utils::links::LinkGenerator;

/// Page number used when the caller does not ask for one.
pub const DEFAULT_PAGE_NUMBER: u32 = 1;
/// Page size used when the caller does not ask for one.
pub const DEFAULT_PAGE_SIZE: u32 = 10;
/// Upper bound for any requested page size.
pub const MAX_PAGE_SIZE: u32 = 20;

/// Pagination query parameters (`?pageNumber=&pageSize=`).
///
/// Uses `serde_with` to parse the numbers from query strings. Values are
/// accepted as signed so that out-of-range input is clamped, not rejected.
#[serde_as]
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaginationParams {
    #[serde_as(as = "SaturatingInt")]
    #[serde(default)]
    pub page_number: Option<i64>,

    #[serde_as(as = "SaturatingInt")]
    #[serde(default)]
    pub page_size: Option<i64>,
}

/// Reads an optional integer from a query string value.
///
/// An empty value is treated as absent. A signed run of digits too large for
/// `i64` saturates to `i64::MIN` or `i64::MAX`. Anything else is an error.
pub struct SaturatingInt;

impl<'de> DeserializeAs<'de, Option<i64>> for SaturatingInt {
    fn deserialize_as<D>(deserializer: D) -> Result<Option<i64>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        parse_saturating(&raw).map_err(serde::de::Error::custom)
    }
}

fn parse_saturating(raw: &str) -> Result<Option<i64>, String> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Ok(None);
    }

    let (negative, digits) = match trimmed.as_bytes()[0] {
        b'-' => (true, &trimmed[1..]),
        b'+' => (false, &trimmed[1..]),
        _ => (false, trimmed),
    };

    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return Err(format!("invalid integer '{raw}'"));
    }

    match trimmed.parse::<i64>() {
        Ok(value) => Ok(Some(value)),
        Err(_) if negative => Ok(Some(i64::MIN)),
        Err(_) => Ok(Some(i64::MAX)),
    }
}

impl PaginationParams {
    /// Clamps the request into `(page_number, page_size)`.
    ///
    /// # Defaults
    ///
    /// - `pageNumber`: 1, never below 1
    /// - `pageSize`: 10, always within `1..=20`
    pub fn clamped(&self) -> (u32, u32) {
        let page_number = self
            .page_number
            .unwrap_or(i64::from(DEFAULT_PAGE_NUMBER))
            .clamp(1, i64::from(u32::MAX)) as u32;

        let page_size = self
            .page_size
            .unwrap_or(i64::from(DEFAULT_PAGE_SIZE))
            .clamp(1, i64::from(MAX_PAGE_SIZE)) as u32;

        (page_number, page_size)
    }
}

/// Value of the `X-Pagination` response header.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaginationMetadata {
    pub previous_page_link: Option<String>,
    pub next_page_link: Option<String>,
    pub total_count: u64,
    pub page_size: u32,
    pub current_page: u32,
    pub total_pages: u32,
}

impl PaginationMetadata {
    /// Describes `page`, building neighbour links with `links`.
    pub fn from_page<T>(page: &Page<T>, links: &LinkGenerator) -> Self {
        let previous_page_link = page
            .has_previous()
            .then(|| links.users_page(page.current_page - 1, page.page_size));
        let next_page_link = page
            .has_next()
            .then(|| links.users_page(page.current_page + 1, page.page_size));

        Self {
            previous_page_link,
            next_page_link,
            total_count: page.total_count,
            page_size: page.page_size,
            current_page: page.current_page,
            total_pages: page.total_pages(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn params(page_number: Option<i64>, page_size: Option<i64>) -> PaginationParams {
        PaginationParams {
            page_number,
            page_size,
        }
    }

    #[test]
    fn test_defaults() {
        assert_eq!(params(None, None).clamped(), (1, 10));
    }

    #[test]
    fn test_custom_page_and_size() {
        assert_eq!(params(Some(3), Some(15)).clamped(), (3, 15));
    }

    #[test]
    fn test_page_number_below_one_clamps_to_one() {
        assert_eq!(params(Some(0), None).clamped().0, 1);
        assert_eq!(params(Some(-7), None).clamped().0, 1);
    }

    #[test]
    fn test_page_size_zero_or_negative_clamps_to_one() {
        assert_eq!(params(None, Some(0)).clamped().1, 1);
        assert_eq!(params(None, Some(-3)).clamped().1, 1);
    }

    #[test]
    fn test_page_size_above_maximum_clamps_to_twenty() {
        assert_eq!(params(None, Some(21)).clamped().1, 20);
        assert_eq!(params(None, Some(1000)).clamped().1, 20);
        assert_eq!(params(None, Some(20)).clamped().1, 20);
    }

    #[test]
    fn test_huge_page_number_saturates() {
        assert_eq!(params(Some(i64::MAX), None).clamped().0, u32::MAX);
    }

    #[test]
    fn test_deserialize_from_query_strings() {
        let p: PaginationParams =
            serde_json::from_value(serde_json::json!({ "pageNumber": "2", "pageSize": "-1" }))
                .unwrap();
        assert_eq!(p.page_number, Some(2));
        assert_eq!(p.page_size, Some(-1));
    }

    #[test]
    fn test_deserialize_out_of_range_saturates() {
        let p: PaginationParams = serde_json::from_value(serde_json::json!({
            "pageNumber": "-99999999999999999999",
            "pageSize": "99999999999999999999"
        }))
        .unwrap();
        assert_eq!(p.page_number, Some(i64::MIN));
        assert_eq!(p.page_size, Some(i64::MAX));
        assert_eq!(p.clamped(), (1, 20));
    }

    #[test]
    fn test_deserialize_empty_value_is_absent() {
        let p: PaginationParams =
            serde_json::from_value(serde_json::json!({ "pageNumber": "", "pageSize": " " }))
                .unwrap();
        assert_eq!(p.page_number, None);
        assert_eq!(p.page_size, None);
        assert_eq!(p.clamped(), (1, 10));
    }

    #[test]
    fn test_parse_saturating_rejects_non_numbers() {
        assert!(parse_saturating("abc").is_err());
        assert!(parse_saturating("-").is_err());
        assert!(parse_saturating("12a").is_err());
        assert!(parse_saturating("1.5").is_err());
        assert_eq!(parse_saturating("+7"), Ok(Some(7)));
    }

    #[test]
    fn test_deserialize_invalid_number_is_error() {
        let result = serde_json::from_value::<PaginationParams>(
            serde_json::json!({ "pageNumber": "abc" }),
        );
        assert!(result.is_err());
    }

    #[test]
    fn test_metadata_middle_page() {
        let links = LinkGenerator::new(None);
        let page: Page<()> = Page::new(vec![], 25, 2, 10);

        let meta = PaginationMetadata::from_page(&page, &links);

        assert_eq!(
            meta.previous_page_link.as_deref(),
            Some("/api/users?pageNumber=1&pageSize=10")
        );
        assert_eq!(
            meta.next_page_link.as_deref(),
            Some("/api/users?pageNumber=3&pageSize=10")
        );
        assert_eq!(meta.total_count, 25);
        assert_eq!(meta.total_pages, 3);
        assert_eq!(meta.current_page, 2);
        assert_eq!(meta.page_size, 10);
    }

    #[test]
    fn test_metadata_single_page_has_no_links() {
        let links = LinkGenerator::new(None);
        let page: Page<()> = Page::new(vec![], 3, 1, 10);

        let meta = PaginationMetadata::from_page(&page, &links);

        assert!(meta.previous_page_link.is_none());
        assert!(meta.next_page_link.is_none());
        assert_eq!(meta.total_pages, 1);
    }

    #[test]
    fn test_metadata_serializes_nullable_links() {
        let links = LinkGenerator::new(None);
        let page: Page<()> = Page::new(vec![], 0, 1, 10);

        let value = serde_json::to_value(PaginationMetadata::from_page(&page, &links)).unwrap();

        assert!(value["previousPageLink"].is_null());
        assert!(value["nextPageLink"].is_null());
        assert_eq!(value["totalCount"], 0);
        assert_eq!(value["totalPages"], 0);
        assert_eq!(value["currentPage"], 1);
        assert_eq!(value["pageSize"], 10);
    }
}
