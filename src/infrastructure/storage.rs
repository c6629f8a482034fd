//! Content and menu stores: in-memory and file-backed

use std::io;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use parking_lot::RwLock;
use tracing::{debug, instrument};

use crate::domain::MenuNode;
use crate::infrastructure::traits::{ContentStore, FileSystem, MenuRepository};

/// File name of the saved page inside the data directory.
pub const CONTENT_FILE: &str = "page.html";
/// File name of the saved menu inside the data directory.
pub const MENU_FILE: &str = "menu.json";

/// Content held for the lifetime of the process.
#[derive(Debug, Default)]
pub struct InMemoryContentStore {
    content: RwLock<Option<String>>,
}

impl InMemoryContentStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl ContentStore for InMemoryContentStore {
    fn load(&self) -> io::Result<Option<String>> {
        Ok(self.content.read().clone())
    }

    fn save(&self, content: &str) -> io::Result<()> {
        *self.content.write() = Some(content.to_string());
        Ok(())
    }
}

/// Content stored as an HTML file.
pub struct FileContentStore {
    fs: Arc<dyn FileSystem>,
    path: PathBuf,
}

impl FileContentStore {
    pub fn new(fs: Arc<dyn FileSystem>, data_dir: &Path) -> Self {
        Self {
            fs,
            path: data_dir.join(CONTENT_FILE),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl ContentStore for FileContentStore {
    #[instrument(level = "debug", skip(self), fields(path = %self.path.display()))]
    fn load(&self) -> io::Result<Option<String>> {
        if !self.fs.exists(&self.path) {
            debug!("no saved content yet");
            return Ok(None);
        }
        self.fs.read_to_string(&self.path).map(Some)
    }

    #[instrument(level = "debug", skip(self, content), fields(path = %self.path.display(), bytes = content.len()))]
    fn save(&self, content: &str) -> io::Result<()> {
        self.fs.write_atomic(&self.path, content)
    }
}

/// Menu kept in memory only.
#[derive(Debug, Default)]
pub struct InMemoryMenuRepository {
    entries: RwLock<Option<Vec<MenuNode>>>,
}

impl InMemoryMenuRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

impl MenuRepository for InMemoryMenuRepository {
    fn load(&self) -> io::Result<Option<Vec<MenuNode>>> {
        Ok(self.entries.read().clone())
    }

    fn save(&self, entries: &[MenuNode]) -> io::Result<()> {
        *self.entries.write() = Some(entries.to_vec());
        Ok(())
    }
}

/// Menu stored as pretty-printed JSON.
pub struct JsonMenuRepository {
    fs: Arc<dyn FileSystem>,
    path: PathBuf,
}

impl JsonMenuRepository {
    pub fn new(fs: Arc<dyn FileSystem>, data_dir: &Path) -> Self {
        Self {
            fs,
            path: data_dir.join(MENU_FILE),
        }
    }
}

impl MenuRepository for JsonMenuRepository {
    #[instrument(level = "debug", skip(self), fields(path = %self.path.display()))]
    fn load(&self) -> io::Result<Option<Vec<MenuNode>>> {
        if !self.fs.exists(&self.path) {
            return Ok(None);
        }
        let raw = self.fs.read_to_string(&self.path)?;
        serde_json::from_str(&raw)
            .map(Some)
            .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))
    }

    #[instrument(level = "debug", skip(self, entries), fields(path = %self.path.display()))]
    fn save(&self, entries: &[MenuNode]) -> io::Result<()> {
        let raw = serde_json::to_string_pretty(entries)
            .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;
        self.fs.write_atomic(&self.path, &raw)
    }
}
