//! Page content service
//!
//! Backs the public view page: one HTML document, replaced wholesale on save.

use std::sync::Arc;

use serde_json::Value;
use tracing::{debug, info, instrument};

use crate::application::{ApplicationResult, IoResultExt};
use crate::domain::{PageContent, DEFAULT_CONTENT};
use crate::infrastructure::traits::ContentStore;

/// Service for reading and replacing the designed page.
pub struct ContentService {
    store: Arc<dyn ContentStore>,
}

impl ContentService {
    pub fn new(store: Arc<dyn ContentStore>) -> Self {
        Self { store }
    }

    /// Current content, or the welcome document if nothing was saved yet.
    #[instrument(level = "debug", skip(self))]
    pub fn get(&self) -> ApplicationResult<String> {
        let stored = self.store.load().with_context("load page content")?;
        Ok(stored.unwrap_or_else(|| {
            debug!("serving default content");
            DEFAULT_CONTENT.to_string()
        }))
    }

    /// Validate a save request and replace the held content.
    ///
    /// The store is left untouched when validation fails.
    #[instrument(level = "debug", skip(self, payload))]
    pub fn update(&self, payload: &Value) -> ApplicationResult<()> {
        let content = PageContent::from_payload(payload)?;
        self.store
            .save(content.as_str())
            .with_context("save page content")?;
        info!(bytes = content.as_str().len(), "page content saved");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::ApplicationError;
    use crate::domain::DomainError;
    use crate::infrastructure::storage::InMemoryContentStore;
    use serde_json::json;

    #[test]
    fn given_invalid_payload_when_updating_then_domain_error_and_content_unchanged() {
        let service = ContentService::new(Arc::new(InMemoryContentStore::new()));
        service.update(&json!({"content": "<p>kept</p>"})).unwrap();

        let err = service.update(&json!({"content": 123})).unwrap_err();

        assert!(matches!(
            err,
            ApplicationError::Domain(DomainError::InvalidContent(_))
        ));
        assert_eq!(service.get().unwrap(), "<p>kept</p>");
    }
}
