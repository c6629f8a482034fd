//! Menu editing service
//!
//! Owns the menu tree and the drag controller for one editing session.
//! Missing ids and self-moves are absorbed here as no-ops, so no mutation
//! ever fails towards the caller.

use std::sync::Arc;

use serde::Serialize;
use tracing::{debug, info, instrument};

use crate::application::{ApplicationResult, IoResultExt};
use crate::domain::{
    default_menu, DomainResult, DragController, DragState, EntryDefaults, EntryField, EntryId,
    MenuArena, MenuNode,
};
use crate::infrastructure::traits::MenuRepository;

/// Outcome of a menu mutation.
///
/// `revision` only advances when the tree actually changed, so callers can
/// detect changes by comparing revisions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MenuChange {
    pub changed: bool,
    pub revision: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created: Option<EntryId>,
}

/// Service for editing the navigation menu.
pub struct MenuService {
    menu: MenuArena,
    drag: DragController,
    defaults: EntryDefaults,
    revision: u64,
    repository: Arc<dyn MenuRepository>,
}

impl MenuService {
    /// Start a session from the saved menu, or the default menu if none was saved.
    pub fn new(repository: Arc<dyn MenuRepository>, defaults: EntryDefaults) -> ApplicationResult<Self> {
        let saved = repository.load().with_context("load menu")?;
        let entries = match saved {
            Some(entries) => {
                debug!("starting from saved menu with {} root entries", entries.len());
                entries
            }
            None => default_menu(),
        };
        Self::with_entries(&entries, repository, defaults)
    }

    /// Start a session from explicit entries.
    pub fn with_entries(
        entries: &[MenuNode],
        repository: Arc<dyn MenuRepository>,
        defaults: EntryDefaults,
    ) -> ApplicationResult<Self> {
        Ok(Self {
            menu: MenuArena::from_nodes(entries)?,
            drag: DragController::new(),
            defaults,
            revision: 0,
            repository,
        })
    }

    pub fn menu(&self) -> &MenuArena {
        &self.menu
    }

    pub fn revision(&self) -> u64 {
        self.revision
    }

    pub fn snapshot(&self) -> Vec<MenuNode> {
        self.menu.snapshot()
    }

    pub fn drag_state(&self) -> &DragState {
        self.drag.state()
    }

    /// Entry currently lifted by a drag gesture.
    pub fn lifted(&self) -> Option<&EntryId> {
        self.drag.overlay()
    }

    pub fn rename(&mut self, id: &EntryId, name: impl Into<String>) -> MenuChange {
        self.update_field(id, EntryField::Name(name.into()))
    }

    #[instrument(level = "debug", skip(self))]
    pub fn update_field(&mut self, id: &EntryId, field: EntryField) -> MenuChange {
        let result = self.menu.update_field(id, field);
        let changed = settle("update_field", result).unwrap_or(false);
        self.record(changed, None)
    }

    #[instrument(level = "debug", skip(self))]
    pub fn add_child(&mut self, parent: &EntryId) -> MenuChange {
        let result = self.menu.add_child(parent, &self.defaults);
        let created = settle("add_child", result);
        self.record(created.is_some(), created)
    }

    #[instrument(level = "debug", skip(self))]
    pub fn add_root(&mut self) -> MenuChange {
        let result = self.menu.add_root(&self.defaults);
        let created = settle("add_root", result);
        self.record(created.is_some(), created)
    }

    #[instrument(level = "debug", skip(self))]
    pub fn delete(&mut self, id: &EntryId) -> MenuChange {
        let removed = settle("delete", self.menu.delete(id)).unwrap_or_default();
        if let Some(lifted) = self.drag.overlay() {
            if removed.contains(lifted) {
                debug!("lifted entry {} was deleted, cancelling drag", lifted);
                self.drag.cancel();
            }
        }
        self.record(!removed.is_empty(), None)
    }

    #[instrument(level = "debug", skip(self))]
    pub fn reorder_root(&mut self, from: &EntryId, to: &EntryId) -> MenuChange {
        let moved = settle("reorder_root", self.menu.reorder_root(from, to)).is_some();
        self.record(moved, None)
    }

    /// Lift a root entry for reordering.
    pub fn begin_drag(&mut self, id: &EntryId) -> bool {
        self.drag.begin(&self.menu, id)
    }

    /// Drop the lifted entry on `target`, committing the reorder when valid.
    #[instrument(level = "debug", skip(self))]
    pub fn drop_on(&mut self, target: Option<&EntryId>) -> MenuChange {
        match self.drag.drop(&self.menu, target) {
            Some(request) => self.reorder_root(&request.from, &request.to),
            None => self.record(false, None),
        }
    }

    pub fn cancel_drag(&mut self) {
        self.drag.cancel();
    }

    /// Hand the current tree to the repository.
    #[instrument(level = "debug", skip(self))]
    pub fn save(&self) -> ApplicationResult<()> {
        let entries = self.menu.snapshot();
        self.repository.save(&entries).with_context("save menu")?;
        info!(revision = self.revision, "menu saved");
        Ok(())
    }

    /// Replace the tree with the saved one, if any.
    #[instrument(level = "debug", skip(self))]
    pub fn reload(&mut self) -> ApplicationResult<MenuChange> {
        let Some(entries) = self.repository.load().with_context("load menu")? else {
            return Ok(self.record(false, None));
        };
        let reloaded = MenuArena::from_nodes(&entries)?;
        self.drag.cancel();
        if self.menu.snapshot() == entries {
            debug!("saved menu equals current tree");
            return Ok(self.record(false, None));
        }
        self.menu = reloaded;
        Ok(self.record(true, None))
    }

    fn record(&mut self, changed: bool, created: Option<EntryId>) -> MenuChange {
        if changed {
            self.revision += 1;
        }
        MenuChange {
            changed,
            revision: self.revision,
            created,
        }
    }
}

/// Turn a rejected mutation into a logged no-op.
fn settle<T>(op: &str, result: DomainResult<T>) -> Option<T> {
    match result {
        Ok(value) => Some(value),
        Err(e) => {
            debug!("{}: ignored: {}", op, e);
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::storage::InMemoryMenuRepository;

    fn service() -> MenuService {
        MenuService::new(Arc::new(InMemoryMenuRepository::new()), EntryDefaults::default())
            .unwrap()
    }

    #[test]
    fn given_no_saved_menu_when_starting_then_uses_default_menu() {
        let service = service();
        assert_eq!(service.snapshot(), default_menu());
        assert_eq!(service.revision(), 0);
    }

    #[test]
    fn given_unknown_id_when_mutating_then_revision_stays() {
        let mut service = service();
        let ghost = EntryId::new("ghost");

        assert!(!service.rename(&ghost, "x").changed);
        assert!(!service.add_child(&ghost).changed);
        assert!(!service.delete(&ghost).changed);
        assert_eq!(service.revision(), 0);
    }

    #[test]
    fn given_unedited_saved_menu_when_reloading_then_no_change_recorded() {
        let mut service = service();
        service.save().unwrap();

        let change = service.reload().unwrap();

        assert!(!change.changed);
        assert_eq!(change.revision, 0);
        assert_eq!(service.snapshot(), default_menu());
    }

    #[test]
    fn given_lifted_entry_when_deleted_then_drag_is_cancelled() {
        let mut service = service();
        let about = EntryId::new("about");
        assert!(service.begin_drag(&about));

        service.delete(&about);

        assert_eq!(service.drag_state(), &DragState::Idle);
    }
}
