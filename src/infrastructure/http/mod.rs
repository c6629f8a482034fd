//! HTTP surface: page content and menu editing endpoints

pub mod content;
pub mod error;
pub mod health;
pub mod menu;
pub mod router;
pub mod state;

pub use error::{ApiError, Envelope};
pub use router::{build_router, serve};
pub use state::AppState;
