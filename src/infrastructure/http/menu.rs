use std::sync::Arc;

use axum::{
    body::Bytes,
    extract::{rejection::JsonRejection, Path, State},
    Json,
};
use parking_lot::Mutex;
use serde::{Deserialize, Serialize};
use tracing::{debug, error};

use crate::application::services::{MenuChange, MenuService};
use crate::domain::{editor_rows, navigation, EditorRow, EntryField, EntryId, MenuNode, NavItem};
use crate::infrastructure::http::error::{ApiError, Envelope};

type SharedMenu = State<Arc<Mutex<MenuService>>>;

#[derive(Debug, Serialize)]
pub struct MenuView {
    pub revision: u64,
    pub entries: Vec<MenuNode>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dragging: Option<EntryId>,
}

#[derive(Debug, Serialize)]
pub struct DragView {
    pub dragging: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lifted: Option<EntryId>,
}

impl DragView {
    fn of(menu: &MenuService) -> Self {
        let lifted = menu.lifted().cloned();
        Self {
            dragging: lifted.is_some(),
            lifted,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct ReorderBody {
    pub from: EntryId,
    pub to: EntryId,
}

#[derive(Debug, Deserialize)]
pub struct DragStartBody {
    pub id: EntryId,
}

#[derive(Debug, Default, Deserialize)]
pub struct DropBody {
    #[serde(default)]
    pub target: Option<EntryId>,
}

/// `GET /api/menu`
pub async fn get_menu(State(menu): SharedMenu) -> Json<MenuView> {
    let menu = menu.lock();
    Json(MenuView {
        revision: menu.revision(),
        entries: menu.snapshot(),
        dragging: menu.lifted().cloned(),
    })
}

/// `GET /api/menu/rows`
pub async fn get_rows(State(menu): SharedMenu) -> Json<Vec<EditorRow>> {
    Json(editor_rows(menu.lock().menu()))
}

/// `GET /api/menu/navigation`
pub async fn get_navigation(State(menu): SharedMenu) -> Json<Vec<NavItem>> {
    Json(navigation(menu.lock().menu()))
}

/// `POST /api/menu/entries`
pub async fn add_root(State(menu): SharedMenu) -> Json<MenuChange> {
    Json(menu.lock().add_root())
}

/// `POST /api/menu/entries/{id}/children`
pub async fn add_child(State(menu): SharedMenu, Path(id): Path<EntryId>) -> Json<MenuChange> {
    Json(menu.lock().add_child(&id))
}

/// `PATCH /api/menu/entries/{id}`
pub async fn update_entry(
    State(menu): SharedMenu,
    Path(id): Path<EntryId>,
    payload: Result<Json<EntryField>, JsonRejection>,
) -> Result<Json<MenuChange>, ApiError> {
    let Json(field) = payload?;
    Ok(Json(menu.lock().update_field(&id, field)))
}

/// `DELETE /api/menu/entries/{id}`
pub async fn delete_entry(State(menu): SharedMenu, Path(id): Path<EntryId>) -> Json<MenuChange> {
    Json(menu.lock().delete(&id))
}

/// `POST /api/menu/reorder`
pub async fn reorder(
    State(menu): SharedMenu,
    payload: Result<Json<ReorderBody>, JsonRejection>,
) -> Result<Json<MenuChange>, ApiError> {
    let Json(body) = payload?;
    Ok(Json(menu.lock().reorder_root(&body.from, &body.to)))
}

/// `POST /api/menu/drag/start`
pub async fn drag_start(
    State(menu): SharedMenu,
    payload: Result<Json<DragStartBody>, JsonRejection>,
) -> Result<Json<DragView>, ApiError> {
    let Json(body) = payload?;
    let mut menu = menu.lock();
    menu.begin_drag(&body.id);
    Ok(Json(DragView::of(&menu)))
}

/// `POST /api/menu/drag/drop`
///
/// An empty body is a drop without target. An unreadable body also ends
/// the gesture, then reports the bad request.
pub async fn drag_drop(State(menu): SharedMenu, body: Bytes) -> Result<Json<MenuChange>, ApiError> {
    let request: DropBody = if body.iter().all(u8::is_ascii_whitespace) {
        DropBody::default()
    } else {
        match serde_json::from_slice(&body) {
            Ok(request) => request,
            Err(e) => {
                debug!("unreadable drop request, discarding drag: {}", e);
                menu.lock().cancel_drag();
                return Err(ApiError::BadRequest(format!("Invalid drop request: {e}")));
            }
        }
    };
    Ok(Json(menu.lock().drop_on(request.target.as_ref())))
}

/// `POST /api/menu/drag/cancel`
pub async fn drag_cancel(State(menu): SharedMenu) -> Json<DragView> {
    let mut menu = menu.lock();
    menu.cancel_drag();
    Json(DragView::of(&menu))
}

/// `POST /api/menu/save`
pub async fn save_menu(State(menu): SharedMenu) -> Result<Json<Envelope>, ApiError> {
    menu.lock().save().map_err(|e| {
        error!("save menu: {}", e);
        ApiError::Internal("Failed to save menu".into())
    })?;
    Ok(Json(Envelope::ok()))
}

/// `POST /api/menu/reload`
pub async fn reload_menu(State(menu): SharedMenu) -> Result<Json<MenuChange>, ApiError> {
    let change = menu.lock().reload().map_err(|e| {
        error!("reload menu: {}", e);
        ApiError::Internal("Failed to load menu".into())
    })?;
    Ok(Json(change))
}
