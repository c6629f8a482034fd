//! Page content rules

use serde_json::Value;

use crate::domain::error::{DomainError, DomainResult};

/// Document served before anything has been saved.
pub const DEFAULT_CONTENT: &str = "<h1>Welcome to Stars' English Centre</h1>\
<p>This page has not been designed yet. Open the page designer to start editing.</p>";

/// Validated HTML content of the public page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageContent(String);

impl PageContent {
    /// Extract the `content` field of a save request.
    ///
    /// Only a JSON string is accepted; a missing field, `null`, numbers and
    /// nested values are rejected.
    pub fn from_payload(payload: &Value) -> DomainResult<Self> {
        match payload.get("content") {
            Some(Value::String(html)) => Ok(Self(html.clone())),
            _ => Err(DomainError::InvalidContent("Invalid content format".into())),
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_inner(self) -> String {
        self.0
    }
}

impl Default for PageContent {
    fn default() -> Self {
        Self(DEFAULT_CONTENT.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use serde_json::json;

    #[rstest]
    #[case(json!({"content": 123}))]
    #[case(json!({"content": null}))]
    #[case(json!({"content": ["<p>"]}))]
    #[case(json!({"html": "<p>hi</p>"}))]
    #[case(json!("<p>hi</p>"))]
    fn given_non_string_content_when_validating_then_rejects(#[case] payload: Value) {
        let err = PageContent::from_payload(&payload).unwrap_err();
        assert_eq!(err.to_string(), "Invalid content format");
    }

    #[test]
    fn given_empty_string_when_validating_then_accepts() {
        let content = PageContent::from_payload(&json!({"content": ""})).unwrap();
        assert_eq!(content.as_str(), "");
    }
}
