use std::sync::Arc;

use axum::extract::FromRef;
use parking_lot::Mutex;

use crate::application::services::{ContentService, MenuService};
use crate::infrastructure::di::ServiceContainer;

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub content: Arc<ContentService>,
    pub menu: Arc<Mutex<MenuService>>,
}

impl AppState {
    pub fn from_container(container: &ServiceContainer) -> Self {
        Self {
            content: container.content.clone(),
            menu: container.menu.clone(),
        }
    }
}

impl FromRef<AppState> for Arc<ContentService> {
    fn from_ref(state: &AppState) -> Self {
        state.content.clone()
    }
}

impl FromRef<AppState> for Arc<Mutex<MenuService>> {
    fn from_ref(state: &AppState) -> Self {
        state.menu.clone()
    }
}
