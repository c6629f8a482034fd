//! Views of the menu tree: editor rows, navigation preview and terminal tree

use generational_arena::Index;
use serde::Serialize;
use termtree::Tree;

use crate::domain::arena::MenuArena;
use crate::domain::entities::EntryId;

/// Spaces of indentation per nesting level in editor rows.
pub const INDENT_WIDTH: usize = 4;

/// One row of the editing surface.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EditorRow {
    pub id: EntryId,
    pub depth: usize,
    pub name: String,
    pub link: Option<String>,
    pub icon: Option<String>,
    /// Only root rows carry a drag handle
    pub draggable: bool,
}

impl EditorRow {
    pub fn indent(&self) -> usize {
        self.depth * INDENT_WIDTH
    }
}

/// Top-level item of the navigation preview.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NavItem {
    pub id: EntryId,
    pub name: String,
    pub link: Option<String>,
    pub submenu: Vec<NavLink>,
}

/// Submenu link of the navigation preview.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NavLink {
    pub id: EntryId,
    pub name: String,
    pub link: Option<String>,
}

/// Flatten the tree into rows, each child directly beneath its parent.
pub fn editor_rows(menu: &MenuArena) -> Vec<EditorRow> {
    menu.iter()
        .map(|(depth, _, node)| EditorRow {
            id: node.data.id.clone(),
            depth,
            name: node.data.name.clone(),
            link: node.data.link.clone(),
            icon: node.data.icon.clone(),
            draggable: depth == 0,
        })
        .collect()
}

/// Root entries with one level of submenu; deeper levels are not shown.
pub fn navigation(menu: &MenuArena) -> Vec<NavItem> {
    menu.roots()
        .iter()
        .filter_map(|&idx| menu.get_node(idx))
        .map(|root| NavItem {
            id: root.data.id.clone(),
            name: root.data.name.clone(),
            link: root.data.link.clone(),
            submenu: root
                .children
                .iter()
                .filter_map(|&c| menu.get_node(c))
                .map(|child| NavLink {
                    id: child.data.id.clone(),
                    name: child.data.name.clone(),
                    link: child.data.link.clone(),
                })
                .collect(),
        })
        .collect()
}

pub trait TreeNodeConvert {
    fn to_tree_string(&self) -> Tree<String>;
}

impl TreeNodeConvert for MenuArena {
    fn to_tree_string(&self) -> Tree<String> {
        fn label(menu: &MenuArena, idx: Index) -> String {
            match menu.get_node(idx) {
                Some(node) => match &node.data.link {
                    Some(link) => format!("{} ({})", node.data.name, link),
                    None => node.data.name.clone(),
                },
                None => String::new(),
            }
        }

        fn build_tree(menu: &MenuArena, node_idx: Index) -> Tree<String> {
            let mut tree = Tree::new(label(menu, node_idx));
            if let Some(node) = menu.get_node(node_idx) {
                for &child_idx in &node.children {
                    tree.push(build_tree(menu, child_idx));
                }
            }
            tree
        }

        let mut tree = Tree::new("Menu".to_string());
        for &root in self.roots() {
            tree.push(build_tree(self, root));
        }
        tree
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::MenuNode;

    fn menu() -> MenuArena {
        MenuArena::from_nodes(&[
            MenuNode::new("service", "Service").with_children(vec![MenuNode::new(
                "ielts", "IELTS",
            )
            .with_children(vec![MenuNode::new("mock", "Mock Test")])]),
            MenuNode::new("contact", "Contact").with_link("/contact"),
        ])
        .unwrap()
    }

    #[test]
    fn given_nested_menu_when_rendering_rows_then_only_roots_are_draggable() {
        let rows = editor_rows(&menu());
        let summary: Vec<(&str, usize, bool)> = rows
            .iter()
            .map(|r| (r.id.as_str(), r.indent(), r.draggable))
            .collect();
        assert_eq!(
            summary,
            vec![
                ("service", 0, true),
                ("ielts", 4, false),
                ("mock", 8, false),
                ("contact", 0, true),
            ]
        );
    }

    #[test]
    fn given_deep_menu_when_rendering_navigation_then_shows_single_submenu_level() {
        let nav = navigation(&menu());
        assert_eq!(nav.len(), 2);
        assert_eq!(nav[0].submenu.len(), 1);
        assert_eq!(nav[0].submenu[0].name, "IELTS");
        assert!(nav[1].submenu.is_empty());
    }

    #[test]
    fn given_menu_when_converting_to_tree_then_labels_include_links() {
        let rendered = menu().to_tree_string().to_string();
        assert!(rendered.starts_with("Menu"));
        assert!(rendered.contains("Contact (/contact)"));
        assert!(rendered.contains("Mock Test"));
    }
}
