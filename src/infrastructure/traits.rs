//! I/O boundary traits for testability
//!
//! These traits abstract external I/O operations, allowing services
//! to be tested with in-memory implementations.

use std::io;
use std::path::Path;

use crate::domain::MenuNode;

/// Filesystem abstraction for testability.
pub trait FileSystem: Send + Sync {
    /// Read file contents to string.
    fn read_to_string(&self, path: &Path) -> io::Result<String>;

    /// Check if path exists.
    fn exists(&self, path: &Path) -> bool;

    /// Create parent directories if needed.
    fn ensure_parent(&self, path: &Path) -> io::Result<()>;

    /// Write to a sibling temp file, then rename over `path`.
    fn write_atomic(&self, path: &Path, content: &str) -> io::Result<()>;
}

/// Holder of the single HTML document backing the public page.
pub trait ContentStore: Send + Sync {
    /// Currently held content, `None` if nothing was ever saved.
    fn load(&self) -> io::Result<Option<String>>;

    /// Replace the held content.
    fn save(&self, content: &str) -> io::Result<()>;
}

/// Load/save contract for the edited menu tree.
pub trait MenuRepository: Send + Sync {
    /// Previously saved menu, `None` if nothing was saved.
    fn load(&self) -> io::Result<Option<Vec<MenuNode>>>;

    fn save(&self, entries: &[MenuNode]) -> io::Result<()>;
}

// ============================================================
// REAL IMPLEMENTATIONS
// ============================================================

/// Real filesystem implementation.
#[derive(Debug, Default)]
pub struct RealFileSystem;

impl FileSystem for RealFileSystem {
    fn read_to_string(&self, path: &Path) -> io::Result<String> {
        std::fs::read_to_string(path)
    }

    fn exists(&self, path: &Path) -> bool {
        path.exists()
    }

    fn ensure_parent(&self, path: &Path) -> io::Result<()> {
        match path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => std::fs::create_dir_all(parent),
            _ => Ok(()),
        }
    }

    fn write_atomic(&self, path: &Path, content: &str) -> io::Result<()> {
        self.ensure_parent(path)?;
        let mut tmp = path.as_os_str().to_owned();
        tmp.push(".tmp");
        let tmp = std::path::PathBuf::from(tmp);
        std::fs::write(&tmp, content)?;
        std::fs::rename(&tmp, path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn given_missing_parent_when_writing_atomically_then_creates_directories() {
        let temp = TempDir::new().unwrap();
        let target = temp.path().join("nested/dir/page.html");
        let fs = RealFileSystem;

        fs.write_atomic(&target, "<p>x</p>").unwrap();

        assert!(fs.exists(&target));
        assert_eq!(fs.read_to_string(&target).unwrap(), "<p>x</p>");
        assert!(!temp.path().join("nested/dir/page.html.tmp").exists());
    }
}
