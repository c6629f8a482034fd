//! Service container for dependency injection
//!
//! Wires up all services with their dependencies.

use std::sync::Arc;

use parking_lot::Mutex;
use tracing::info;

use crate::application::services::{ContentService, MenuService};
use crate::config::{Settings, StorageBackend};
use crate::infrastructure::storage::{
    FileContentStore, InMemoryContentStore, InMemoryMenuRepository, JsonMenuRepository,
};
use crate::infrastructure::traits::{ContentStore, FileSystem, MenuRepository, RealFileSystem};
use crate::infrastructure::InfraResult;

/// Container holding all application services.
///
/// Built once at startup and shared with the HTTP handlers.
pub struct ServiceContainer {
    /// Application settings
    pub settings: Arc<Settings>,

    /// Filesystem abstraction
    pub fs: Arc<dyn FileSystem>,

    /// Page content service
    pub content: Arc<ContentService>,

    /// Menu editing session
    pub menu: Arc<Mutex<MenuService>>,
}

impl ServiceContainer {
    /// Create a new service container with real implementations.
    pub fn new(settings: Settings) -> InfraResult<Self> {
        Self::with_deps(settings, Arc::new(RealFileSystem))
    }

    /// Create a service container with a custom filesystem (for testing).
    pub fn with_deps(settings: Settings, fs: Arc<dyn FileSystem>) -> InfraResult<Self> {
        let (content_store, menu_repository): (Arc<dyn ContentStore>, Arc<dyn MenuRepository>) =
            match settings.storage.backend {
                StorageBackend::Memory => (
                    Arc::new(InMemoryContentStore::new()),
                    Arc::new(InMemoryMenuRepository::new()),
                ),
                StorageBackend::File => {
                    let dir = &settings.storage.data_dir;
                    info!("using file storage in {}", dir.display());
                    (
                        Arc::new(FileContentStore::new(fs.clone(), dir)),
                        Arc::new(JsonMenuRepository::new(fs.clone(), dir)),
                    )
                }
            };

        let content = Arc::new(ContentService::new(content_store));
        let menu = MenuService::new(menu_repository, settings.menu.entry_defaults())?;

        Ok(Self {
            settings: Arc::new(settings),
            fs,
            content,
            menu: Arc::new(Mutex::new(menu)),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn given_file_backend_when_saving_then_files_land_in_data_dir() {
        let temp = TempDir::new().unwrap();
        let mut settings = Settings::default();
        settings.storage.backend = StorageBackend::File;
        settings.storage.data_dir = temp.path().to_path_buf();

        let container = ServiceContainer::new(settings).unwrap();
        container
            .content
            .update(&serde_json::json!({"content": "<p>saved</p>"}))
            .unwrap();
        container.menu.lock().save().unwrap();

        assert!(container.fs.exists(&temp.path().join("page.html")));
        assert!(container.fs.exists(&temp.path().join("menu.json")));
    }
}
