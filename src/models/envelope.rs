//! Response envelope shared by every endpoint.

use serde::{Deserialize, Serialize};

/// The `{ success, data, message? }` wrapper around single results.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiEnvelope<T> {
    #[serde(default = "default_success")]
    pub success: bool,

    pub data: T,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

/// The `{ success, data: [...], pagination? }` wrapper around lists.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ListEnvelope<T> {
    #[serde(default = "default_success")]
    pub success: bool,

    pub data: Vec<T>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pagination: Option<Pagination>,
}

/// Body of an error response: `{ success: false, message }`.
#[derive(Debug, Clone, Deserialize)]
pub struct ErrorBody {
    #[serde(default)]
    pub message: Option<String>,

    #[serde(default)]
    pub detail: Option<serde_json::Value>,

    #[serde(default)]
    pub error: Option<String>,
}

impl ErrorBody {
    /// The most specific human-readable message in the body.
    pub fn into_message(self) -> Option<String> {
        self.message
            .or_else(|| {
                self.detail.map(|d| match d {
                    serde_json::Value::String(s) => s,
                    other => other.to_string(),
                })
            })
            .or(self.error)
    }
}

fn default_success() -> bool {
    true
}

/// Pagination block of a list envelope.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Pagination {
    /// Current page number (1-based).
    pub page: u32,

    /// Page size.
    pub limit: u32,

    /// Total number of matching records.
    pub total: u64,

    /// Total number of pages.
    pub total_pages: u32,
}

impl Pagination {
    /// Whether another page follows this one.
    pub fn has_next(&self) -> bool {
        self.page < self.total_pages
    }
}

/// Paginated result handed back to callers.
#[derive(Debug, Clone)]
pub struct Paginated<T> {
    /// The records on this page.
    pub data: Vec<T>,

    /// Pagination information, when the endpoint provides it.
    pub pagination: Option<Pagination>,
}

impl<T> From<ListEnvelope<T>> for Paginated<T> {
    fn from(envelope: ListEnvelope<T>) -> Self {
        Self {
            data: envelope.data,
            pagination: envelope.pagination,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_list_envelope_with_pagination() {
        let json = r#"{
            "success": true,
            "data": [1, 2, 3],
            "pagination": {"page": 1, "limit": 3, "total": 7, "totalPages": 3}
        }"#;
        let envelope: ListEnvelope<u32> = serde_json::from_str(json).unwrap();
        let page: Paginated<u32> = envelope.into();

        assert_eq!(page.data, vec![1, 2, 3]);
        let pagination = page.pagination.unwrap();
        assert_eq!(pagination.total_pages, 3);
        assert!(pagination.has_next());
    }

    #[test]
    fn test_list_envelope_without_pagination() {
        let envelope: ListEnvelope<String> =
            serde_json::from_str(r#"{"success": true, "data": ["a"]}"#).unwrap();
        assert!(envelope.pagination.is_none());
    }

    #[test]
    fn test_error_body_message_precedence() {
        let body: ErrorBody =
            serde_json::from_str(r#"{"success": false, "message": "Grupo no encontrado"}"#).unwrap();
        assert_eq!(body.into_message().as_deref(), Some("Grupo no encontrado"));

        let body: ErrorBody =
            serde_json::from_str(r#"{"detail": [{"loc": ["body", "email"]}]}"#).unwrap();
        assert!(body.into_message().unwrap().contains("email"));

        let body: ErrorBody = serde_json::from_str("{}").unwrap();
        assert!(body.into_message().is_none());
    }
}
