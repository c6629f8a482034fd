//! Application services
//!
//! Concrete service implementations that orchestrate domain logic.
//! Services depend on I/O boundary traits (ContentStore, MenuRepository)
//! but are themselves concrete structs, not traits.

mod content;
mod menu;

pub use content::ContentService;
pub use menu::{MenuChange, MenuService};
