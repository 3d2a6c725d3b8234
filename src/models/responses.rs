// API envelope types
use serde::Deserialize;

/// Every API payload is wrapped as `{ data, meta }`
#[derive(Debug, Deserialize)]
pub struct ApiResponse<T> {
    pub data: T,
    #[serde(default)]
    pub meta: PageMeta,
}

/// Paging info; only present on list endpoints
#[derive(Debug, Default, Clone, PartialEq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct PageMeta {
    pub is_first_page: Option<bool>,
    pub is_last_page: Option<bool>,
    pub current_page: Option<u32>,
    pub previous_page: Option<u32>,
    pub next_page: Option<u32>,
    pub page_count: Option<u32>,
    pub total_count: Option<u32>,
}

impl PageMeta {
    pub fn has_next(&self) -> bool {
        self.next_page.is_some() && self.is_last_page != Some(true)
    }

    pub fn has_previous(&self) -> bool {
        self.previous_page.is_some() && self.is_first_page != Some(true)
    }
}

/// One page of a list endpoint
#[derive(Debug, Clone)]
pub struct Paged<T> {
    pub items: Vec<T>,
    pub meta: PageMeta,
}

impl<T> From<ApiResponse<Vec<T>>> for Paged<T> {
    fn from(response: ApiResponse<Vec<T>>) -> Self {
        Self { items: response.data, meta: response.meta }
    }
}

/// Error body: `{ errors: [{ message }], status, statusCode }`
#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ErrorBody {
    pub errors: Vec<ErrorDetail>,
    pub status: Option<String>,
    pub status_code: Option<u16>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct ErrorDetail {
    pub message: String,
}

impl ErrorBody {
    pub fn first_message(&self) -> Option<&str> {
        self.errors
            .first()
            .map(|e| e.message.as_str())
            .filter(|m| !m.is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Venue;

    #[test]
    fn test_paged_venues_from_envelope() {
        let json = r#"{
            "data": [{"id": "a", "name": "A"}, {"id": "b", "name": "B"}],
            "meta": {"isFirstPage": true, "isLastPage": false, "currentPage": 1,
                     "previousPage": null, "nextPage": 2, "pageCount": 5, "totalCount": 60}
        }"#;
        let response: ApiResponse<Vec<Venue>> = serde_json::from_str(json).unwrap();
        let page: Paged<Venue> = response.into();
        assert_eq!(page.items.len(), 2);
        assert!(page.meta.has_next());
        assert!(!page.meta.has_previous());
    }

    #[test]
    fn test_error_body_message() {
        let json = r#"{"errors":[{"message":"Invalid email or password"}],"status":"Unauthorized","statusCode":401}"#;
        let body: ErrorBody = serde_json::from_str(json).unwrap();
        assert_eq!(body.first_message(), Some("Invalid email or password"));
        assert_eq!(body.status_code, Some(401));
    }
}
