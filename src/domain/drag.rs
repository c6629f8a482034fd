//! Drag controller for root-level menu reordering

use tracing::debug;

use crate::domain::arena::MenuArena;
use crate::domain::entities::EntryId;

/// Current phase of a drag gesture.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum DragState {
    #[default]
    Idle,
    Dragging { lifted: EntryId },
}

/// Reorder to commit after a successful drop.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReorderRequest {
    pub from: EntryId,
    pub to: EntryId,
}

/// Two-state machine tracking which root entry is lifted.
///
/// Only root entries can be lifted or targeted. The controller never
/// mutates the menu itself; `drop` hands back the reorder to apply.
#[derive(Debug, Default)]
pub struct DragController {
    state: DragState,
}

impl DragController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> &DragState {
        &self.state
    }

    pub fn is_dragging(&self) -> bool {
        matches!(self.state, DragState::Dragging { .. })
    }

    /// Entry shown in the drag overlay, if any.
    pub fn overlay(&self) -> Option<&EntryId> {
        match &self.state {
            DragState::Dragging { lifted } => Some(lifted),
            DragState::Idle => None,
        }
    }

    /// Lift a root entry. Non-root or unknown ids leave the state untouched.
    pub fn begin(&mut self, menu: &MenuArena, id: &EntryId) -> bool {
        if !menu.is_root(id) {
            debug!("begin: {} is not a root entry, ignoring", id);
            return false;
        }
        self.state = DragState::Dragging { lifted: id.clone() };
        true
    }

    /// Finish the gesture and return to idle.
    ///
    /// Yields a reorder only when the target is a different root entry.
    pub fn drop(&mut self, menu: &MenuArena, target: Option<&EntryId>) -> Option<ReorderRequest> {
        let DragState::Dragging { lifted } = std::mem::take(&mut self.state) else {
            return None;
        };
        match target {
            Some(to) if *to != lifted && menu.is_root(to) && menu.is_root(&lifted) => {
                Some(ReorderRequest {
                    from: lifted,
                    to: to.clone(),
                })
            }
            _ => {
                debug!("drop: discarding drag of {}", lifted);
                None
            }
        }
    }

    pub fn cancel(&mut self) {
        self.state = DragState::Idle;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::MenuNode;

    fn menu() -> MenuArena {
        MenuArena::from_nodes(&[
            MenuNode::new("about", "About")
                .with_children(vec![MenuNode::new("team", "Team")]),
            MenuNode::new("contact", "Contact"),
        ])
        .unwrap()
    }

    #[test]
    fn given_root_entry_when_beginning_then_overlay_shows_it() {
        let menu = menu();
        let mut drag = DragController::new();
        assert!(drag.begin(&menu, &EntryId::new("about")));
        assert_eq!(drag.overlay(), Some(&EntryId::new("about")));
    }

    #[test]
    fn given_nested_entry_when_beginning_then_stays_idle() {
        let menu = menu();
        let mut drag = DragController::new();
        assert!(!drag.begin(&menu, &EntryId::new("team")));
        assert_eq!(drag.state(), &DragState::Idle);
    }

    #[test]
    fn given_idle_when_dropping_then_nothing_to_commit() {
        let menu = menu();
        let mut drag = DragController::new();
        assert_eq!(drag.drop(&menu, Some(&EntryId::new("contact"))), None);
    }
}
