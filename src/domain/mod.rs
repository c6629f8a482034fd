//! Domain layer: menu entities, the menu tree store and page content rules
//!
//! This layer is independent of external concerns (no I/O, no HTTP, no config loading).

pub mod arena;
pub mod content;
pub mod drag;
pub mod entities;
pub mod error;
pub mod render;
pub mod seed;

pub use arena::{MenuArena, TreeNode};
pub use content::{PageContent, DEFAULT_CONTENT};
pub use drag::{DragController, DragState, ReorderRequest};
pub use entities::*;
pub use error::{DomainError, DomainResult};
pub use render::{editor_rows, navigation, EditorRow, NavItem, NavLink, TreeNodeConvert};
pub use seed::default_menu;
