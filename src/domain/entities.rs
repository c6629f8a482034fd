//! Domain entities: menu entries and their owned tree form

use std::fmt;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Stable identifier of a menu entry, unique across the whole tree.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EntryId(String);

impl EntryId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Fresh random id for entries created at runtime.
    pub fn generate() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for EntryId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for EntryId {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl From<String> for EntryId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

/// Data payload of a single menu entry.
///
/// Position is not stored here: it is given by the entry's place in its
/// parent's child sequence.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MenuEntry {
    pub id: EntryId,
    /// Human-readable label
    pub name: String,
    /// Target path or URL
    pub link: Option<String>,
    /// Presentational marker, not interpreted
    pub icon: Option<String>,
}

impl MenuEntry {
    pub fn new(id: EntryId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            link: None,
            icon: None,
        }
    }

    /// Apply a single field update. Returns `true` when the value changed.
    pub fn apply(&mut self, field: EntryField) -> bool {
        match field {
            EntryField::Name(name) => replace_if_changed(&mut self.name, name),
            EntryField::Link(link) => replace_if_changed(&mut self.link, link),
            EntryField::Icon(icon) => replace_if_changed(&mut self.icon, icon),
        }
    }
}

fn replace_if_changed<T: PartialEq>(slot: &mut T, value: T) -> bool {
    if *slot == value {
        return false;
    }
    *slot = value;
    true
}

/// One editable field of a menu entry together with its new value.
///
/// Serialized as `{"field": "name", "value": "About us"}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "field", content = "value", rename_all = "lowercase")]
pub enum EntryField {
    Name(String),
    Link(Option<String>),
    Icon(Option<String>),
}

/// Owned, nested form of a menu entry.
///
/// Used for snapshots, value comparison and the load/save contract.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MenuNode {
    pub id: EntryId,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub link: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<MenuNode>,
}

impl MenuNode {
    pub fn new(id: impl Into<EntryId>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            link: None,
            icon: None,
            children: Vec::new(),
        }
    }

    pub fn with_link(mut self, link: impl Into<String>) -> Self {
        self.link = Some(link.into());
        self
    }

    pub fn with_icon(mut self, icon: impl Into<String>) -> Self {
        self.icon = Some(icon.into());
        self
    }

    pub fn with_children(mut self, children: Vec<MenuNode>) -> Self {
        self.children = children;
        self
    }

    /// Entry data of this node without its children.
    pub fn entry(&self) -> MenuEntry {
        MenuEntry {
            id: self.id.clone(),
            name: self.name.clone(),
            link: self.link.clone(),
            icon: self.icon.clone(),
        }
    }
}

/// Name and link given to entries created by add operations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntryDefaults {
    pub name: String,
    pub link: Option<String>,
}

impl Default for EntryDefaults {
    fn default() -> Self {
        Self {
            name: "New Item".into(),
            link: Some("#".into()),
        }
    }
}

impl EntryDefaults {
    /// Build a fresh entry with a newly generated id.
    pub fn instantiate(&self) -> MenuEntry {
        MenuEntry {
            id: EntryId::generate(),
            name: self.name.clone(),
            link: self.link.clone(),
            icon: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn given_same_value_when_applying_field_then_reports_unchanged() {
        let mut entry = MenuEntry::new(EntryId::new("a"), "About");
        assert!(!entry.apply(EntryField::Name("About".into())));
        assert!(entry.apply(EntryField::Link(Some("/about".into()))));
        assert_eq!(entry.link.as_deref(), Some("/about"));
    }

    #[test]
    fn given_field_json_when_deserializing_then_yields_tagged_variant() {
        let field: EntryField =
            serde_json::from_str(r#"{"field":"link","value":null}"#).unwrap();
        assert_eq!(field, EntryField::Link(None));

        let field: EntryField =
            serde_json::from_str(r#"{"field":"name","value":"Team"}"#).unwrap();
        assert_eq!(field, EntryField::Name("Team".into()));
    }

    #[test]
    fn generated_ids_are_distinct() {
        assert_ne!(EntryId::generate(), EntryId::generate());
    }
}
