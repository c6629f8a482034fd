use std::collections::HashMap;

use generational_arena::{Arena, Index};
use tracing::instrument;

use crate::domain::entities::{EntryDefaults, EntryField, EntryId, MenuEntry, MenuNode};
use crate::domain::error::{DomainError, DomainResult};

/// Tree node in the arena-based menu structure.
#[derive(Debug)]
pub struct TreeNode {
    /// Menu entry data for this node
    pub data: MenuEntry,
    /// Index of parent node in the arena, None for root entries
    pub parent: Option<Index>,
    /// Indices of child nodes in display order
    pub children: Vec<Index>,
}

/// Arena-based menu tree.
///
/// Entries are addressed by generational index; a separate id map gives
/// O(1) lookup by `EntryId`. Root order lives in `roots`, child order in
/// each node's `children`.
#[derive(Debug, Default)]
pub struct MenuArena {
    arena: Arena<TreeNode>,
    roots: Vec<Index>,
    ids: HashMap<EntryId, Index>,
}

impl MenuArena {
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuild a store from owned nodes, rejecting duplicate ids.
    #[instrument(level = "debug", skip(nodes))]
    pub fn from_nodes(nodes: &[MenuNode]) -> DomainResult<Self> {
        let mut menu = Self::new();
        for node in nodes {
            menu.insert_subtree(node, None)?;
        }
        Ok(menu)
    }

    fn insert_subtree(&mut self, node: &MenuNode, parent: Option<Index>) -> DomainResult<Index> {
        let idx = self.insert_node(node.entry(), parent)?;
        for child in &node.children {
            self.insert_subtree(child, Some(idx))?;
        }
        Ok(idx)
    }

    /// Append an entry under `parent` (or at root level when `None`).
    #[instrument(level = "trace", skip(self))]
    pub fn insert_node(&mut self, data: MenuEntry, parent: Option<Index>) -> DomainResult<Index> {
        if self.ids.contains_key(&data.id) {
            return Err(DomainError::DuplicateId(data.id));
        }
        if let Some(parent_idx) = parent {
            if !self.arena.contains(parent_idx) {
                return Err(DomainError::InvalidOperation(format!(
                    "parent index {:?} is not in the tree",
                    parent_idx
                )));
            }
        }

        let id = data.id.clone();
        let node_idx = self.arena.insert(TreeNode {
            data,
            parent,
            children: Vec::new(),
        });
        self.ids.insert(id, node_idx);

        match parent.and_then(|p| self.arena.get_mut(p)) {
            Some(parent) => parent.children.push(node_idx),
            None => self.roots.push(node_idx),
        }
        Ok(node_idx)
    }

    pub fn get_node(&self, idx: Index) -> Option<&TreeNode> {
        self.arena.get(idx)
    }

    pub fn index_of(&self, id: &EntryId) -> Option<Index> {
        self.ids.get(id).copied()
    }

    pub fn get(&self, id: &EntryId) -> Option<&MenuEntry> {
        self.index_of(id)
            .and_then(|idx| self.arena.get(idx))
            .map(|node| &node.data)
    }

    pub fn contains(&self, id: &EntryId) -> bool {
        self.ids.contains_key(id)
    }

    pub fn len(&self) -> usize {
        self.arena.len()
    }

    pub fn is_empty(&self) -> bool {
        self.arena.is_empty()
    }

    pub fn roots(&self) -> &[Index] {
        &self.roots
    }

    pub fn root_ids(&self) -> Vec<EntryId> {
        self.roots
            .iter()
            .filter_map(|&idx| self.arena.get(idx))
            .map(|node| node.data.id.clone())
            .collect()
    }

    pub fn is_root(&self, id: &EntryId) -> bool {
        self.root_position(id).is_some()
    }

    fn root_position(&self, id: &EntryId) -> Option<usize> {
        let idx = self.index_of(id)?;
        self.roots.iter().position(|&r| r == idx)
    }

    /// Ids of the direct children of `id`, in order.
    pub fn child_ids(&self, id: &EntryId) -> DomainResult<Vec<EntryId>> {
        let node = self.node_for(id)?;
        Ok(node
            .children
            .iter()
            .filter_map(|&c| self.arena.get(c))
            .map(|child| child.data.id.clone())
            .collect())
    }

    fn node_for(&self, id: &EntryId) -> DomainResult<&TreeNode> {
        self.index_of(id)
            .and_then(|idx| self.arena.get(idx))
            .ok_or_else(|| DomainError::EntryNotFound(id.clone()))
    }

    /// Replace one field of the entry with `id`. Returns whether the value changed.
    #[instrument(level = "debug", skip(self))]
    pub fn update_field(&mut self, id: &EntryId, field: EntryField) -> DomainResult<bool> {
        let idx = self
            .index_of(id)
            .ok_or_else(|| DomainError::EntryNotFound(id.clone()))?;
        let node = self
            .arena
            .get_mut(idx)
            .ok_or_else(|| DomainError::EntryNotFound(id.clone()))?;
        Ok(node.data.apply(field))
    }

    pub fn rename(&mut self, id: &EntryId, name: impl Into<String>) -> DomainResult<bool> {
        self.update_field(id, EntryField::Name(name.into()))
    }

    /// Append a new default entry to the end of `parent_id`'s children.
    #[instrument(level = "debug", skip(self, defaults))]
    pub fn add_child(&mut self, parent_id: &EntryId, defaults: &EntryDefaults) -> DomainResult<EntryId> {
        let parent = self
            .index_of(parent_id)
            .ok_or_else(|| DomainError::EntryNotFound(parent_id.clone()))?;
        let entry = defaults.instantiate();
        let id = entry.id.clone();
        self.insert_node(entry, Some(parent))?;
        Ok(id)
    }

    /// Append a new default entry to the end of the root sequence.
    #[instrument(level = "debug", skip(self, defaults))]
    pub fn add_root(&mut self, defaults: &EntryDefaults) -> DomainResult<EntryId> {
        let entry = defaults.instantiate();
        let id = entry.id.clone();
        self.insert_node(entry, None)?;
        Ok(id)
    }

    /// Remove the entry with `id` and its entire subtree.
    ///
    /// Returns the removed ids, the entry itself first.
    #[instrument(level = "debug", skip(self))]
    pub fn delete(&mut self, id: &EntryId) -> DomainResult<Vec<EntryId>> {
        let idx = self
            .index_of(id)
            .ok_or_else(|| DomainError::EntryNotFound(id.clone()))?;

        let parent = self.arena.get(idx).and_then(|node| node.parent);
        match parent.and_then(|p| self.arena.get_mut(p)) {
            Some(parent) => parent.children.retain(|&c| c != idx),
            None => self.roots.retain(|&r| r != idx),
        }

        let subtree = self.subtree_indices(idx);
        let mut removed = Vec::with_capacity(subtree.len());
        for node_idx in subtree {
            if let Some(node) = self.arena.remove(node_idx) {
                self.ids.remove(&node.data.id);
                removed.push(node.data.id);
            }
        }
        Ok(removed)
    }

    fn subtree_indices(&self, start: Index) -> Vec<Index> {
        let mut out = Vec::new();
        let mut stack = vec![start];
        while let Some(idx) = stack.pop() {
            if let Some(node) = self.arena.get(idx) {
                out.push(idx);
                stack.extend(node.children.iter().rev());
            }
        }
        out
    }

    /// Move root entry `from` to the position currently held by root entry `to`.
    ///
    /// Intervening roots shift by one; nothing below root level moves.
    #[instrument(level = "debug", skip(self))]
    pub fn reorder_root(&mut self, from: &EntryId, to: &EntryId) -> DomainResult<()> {
        if from == to {
            return Err(DomainError::InvalidOperation(format!(
                "cannot move {} onto itself",
                from
            )));
        }
        let from_pos = self
            .root_position(from)
            .ok_or_else(|| DomainError::EntryNotFound(from.clone()))?;
        let to_pos = self
            .root_position(to)
            .ok_or_else(|| DomainError::EntryNotFound(to.clone()))?;

        let moved = self.roots.remove(from_pos);
        self.roots.insert(to_pos, moved);
        Ok(())
    }

    /// Owned copy of the whole tree.
    #[instrument(level = "trace", skip(self))]
    pub fn snapshot(&self) -> Vec<MenuNode> {
        self.roots
            .iter()
            .filter_map(|&idx| self.snapshot_node(idx))
            .collect()
    }

    fn snapshot_node(&self, idx: Index) -> Option<MenuNode> {
        let node = self.arena.get(idx)?;
        Some(MenuNode {
            id: node.data.id.clone(),
            name: node.data.name.clone(),
            link: node.data.link.clone(),
            icon: node.data.icon.clone(),
            children: node
                .children
                .iter()
                .filter_map(|&c| self.snapshot_node(c))
                .collect(),
        })
    }

    /// Depth-first, pre-order walk over all entries with their depth.
    pub fn iter(&self) -> TreeIterator<'_> {
        TreeIterator::new(self)
    }

    /// Number of levels; 0 for an empty menu.
    pub fn depth(&self) -> usize {
        self.iter().map(|(depth, _, _)| depth + 1).max().unwrap_or(0)
    }
}

pub struct TreeIterator<'a> {
    menu: &'a MenuArena,
    stack: Vec<(usize, Index)>,
}

impl<'a> TreeIterator<'a> {
    fn new(menu: &'a MenuArena) -> Self {
        // Push roots in reverse order for left-to-right traversal
        let stack = menu.roots.iter().rev().map(|&idx| (0, idx)).collect();
        Self { menu, stack }
    }
}

impl<'a> Iterator for TreeIterator<'a> {
    type Item = (usize, Index, &'a TreeNode);

    fn next(&mut self) -> Option<Self::Item> {
        while let Some((depth, idx)) = self.stack.pop() {
            if let Some(node) = self.menu.get_node(idx) {
                for &child in node.children.iter().rev() {
                    self.stack.push((depth + 1, child));
                }
                return Some((depth, idx, node));
            }
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> MenuArena {
        MenuArena::from_nodes(&[
            MenuNode::new("a", "A").with_children(vec![
                MenuNode::new("a1", "A1").with_children(vec![MenuNode::new("a11", "A11")]),
                MenuNode::new("a2", "A2"),
            ]),
            MenuNode::new("b", "B"),
        ])
        .unwrap()
    }

    #[test]
    fn given_nodes_when_iterating_then_yields_preorder_with_depth() {
        let menu = sample();
        let walk: Vec<(usize, String)> = menu
            .iter()
            .map(|(depth, _, node)| (depth, node.data.id.to_string()))
            .collect();
        assert_eq!(
            walk,
            vec![
                (0, "a".to_string()),
                (1, "a1".to_string()),
                (2, "a11".to_string()),
                (1, "a2".to_string()),
                (0, "b".to_string()),
            ]
        );
        assert_eq!(menu.depth(), 3);
    }

    #[test]
    fn given_duplicate_ids_when_building_then_rejects() {
        let result = MenuArena::from_nodes(&[
            MenuNode::new("a", "A"),
            MenuNode::new("b", "B").with_children(vec![MenuNode::new("a", "Again")]),
        ]);
        assert_eq!(result.unwrap_err(), DomainError::DuplicateId(EntryId::new("a")));
    }

    #[test]
    fn given_nested_entry_when_deleting_then_index_forgets_subtree() {
        let mut menu = sample();
        let removed = menu.delete(&EntryId::new("a1")).unwrap();
        assert_eq!(removed, vec![EntryId::new("a1"), EntryId::new("a11")]);
        assert!(!menu.contains(&EntryId::new("a11")));
        assert_eq!(menu.len(), 3);
        assert_eq!(
            menu.child_ids(&EntryId::new("a")).unwrap(),
            vec![EntryId::new("a2")]
        );
    }

    #[test]
    fn given_self_move_when_reordering_then_invalid_operation() {
        let mut menu = sample();
        let err = menu
            .reorder_root(&EntryId::new("a"), &EntryId::new("a"))
            .unwrap_err();
        assert!(matches!(err, DomainError::InvalidOperation(_)));
    }

    #[test]
    fn given_nested_id_when_reordering_root_then_not_found() {
        let mut menu = sample();
        let err = menu
            .reorder_root(&EntryId::new("a1"), &EntryId::new("b"))
            .unwrap_err();
        assert_eq!(err, DomainError::EntryNotFound(EntryId::new("a1")));
    }

    #[test]
    fn given_empty_menu_when_measuring_then_depth_is_zero() {
        assert_eq!(MenuArena::new().depth(), 0);
        assert!(MenuArena::new().snapshot().is_empty());
    }
}
