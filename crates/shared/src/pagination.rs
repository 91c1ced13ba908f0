//! Offset pagination helpers for bounded list endpoints.

use serde::Serialize;

/// Default page size when the client does not ask for one.
pub const DEFAULT_PER_PAGE: u32 = 50;

/// Hard upper bound on page size.
pub const MAX_PER_PAGE: u32 = 200;

/// Normalized pagination parameters.
///
/// Built from optional query values; the page is 1-based and the page size
/// is clamped to `[1, MAX_PER_PAGE]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageParams {
    pub page: u32,
    pub per_page: u32,
}

impl PageParams {
    /// Normalizes raw query values into usable pagination parameters.
    pub fn clamped(page: Option<u32>, per_page: Option<u32>) -> Self {
        Self {
            page: page.unwrap_or(1).max(1),
            per_page: per_page.unwrap_or(DEFAULT_PER_PAGE).clamp(1, MAX_PER_PAGE),
        }
    }

    /// SQL LIMIT value.
    pub fn limit(&self) -> i64 {
        i64::from(self.per_page)
    }

    /// SQL OFFSET value.
    pub fn offset(&self) -> i64 {
        i64::from(self.page - 1) * i64::from(self.per_page)
    }
}

impl Default for PageParams {
    fn default() -> Self {
        Self::clamped(None, None)
    }
}

/// Pagination metadata returned alongside list responses.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct PageInfo {
    pub page: u32,
    pub per_page: u32,
    pub total: i64,
}

impl PageInfo {
    pub fn new(params: PageParams, total: i64) -> Self {
        Self {
            page: params.page,
            per_page: params.per_page,
            total,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let params = PageParams::clamped(None, None);
        assert_eq!(params.page, 1);
        assert_eq!(params.per_page, DEFAULT_PER_PAGE);
    }

    #[test]
    fn test_page_zero_becomes_one() {
        let params = PageParams::clamped(Some(0), None);
        assert_eq!(params.page, 1);
        assert_eq!(params.offset(), 0);
    }

    #[test]
    fn test_per_page_clamped_to_max() {
        let params = PageParams::clamped(None, Some(10_000));
        assert_eq!(params.per_page, MAX_PER_PAGE);
    }

    #[test]
    fn test_per_page_zero_becomes_one() {
        let params = PageParams::clamped(None, Some(0));
        assert_eq!(params.per_page, 1);
    }

    #[test]
    fn test_limit_offset() {
        let params = PageParams::clamped(Some(3), Some(25));
        assert_eq!(params.limit(), 25);
        assert_eq!(params.offset(), 50);
    }

    #[test]
    fn test_page_info() {
        let info = PageInfo::new(PageParams::clamped(Some(2), Some(10)), 42);
        assert_eq!(info.page, 2);
        assert_eq!(info.per_page, 10);
        assert_eq!(info.total, 42);
    }

    #[test]
    fn test_page_info_serialization() {
        let info = PageInfo::new(PageParams::default(), 7);
        let json = serde_json::to_string(&info).unwrap();
        assert!(json.contains("\"total\":7"));
        assert!(json.contains("\"page\":1"));
    }
}
