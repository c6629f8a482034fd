//! Tests for the arena-backed menu tree store

use std::collections::HashSet;

use rstest::{fixture, rstest};

use page_designer::domain::{
    default_menu, DomainError, EntryDefaults, EntryField, EntryId, MenuArena, MenuNode,
};

#[fixture]
fn menu() -> MenuArena {
    MenuArena::from_nodes(&default_menu()).expect("default menu")
}

fn id(s: &str) -> EntryId {
    EntryId::new(s)
}

fn all_ids(nodes: &[MenuNode]) -> Vec<EntryId> {
    let mut out = Vec::new();
    for node in nodes {
        out.push(node.id.clone());
        out.extend(all_ids(&node.children));
    }
    out
}

fn find<'a>(nodes: &'a [MenuNode], target: &EntryId) -> Option<&'a MenuNode> {
    for node in nodes {
        if &node.id == target {
            return Some(node);
        }
        if let Some(found) = find(&node.children, target) {
            return Some(found);
        }
    }
    None
}

// ============================================================
// rename
// ============================================================

#[rstest]
#[case("about")]
#[case("service-ielts")]
#[case("course-business")]
fn given_existing_id_when_renaming_then_only_that_name_changes(mut menu: MenuArena, #[case] target: &str) {
    let before = menu.snapshot();

    assert!(menu.rename(&id(target), "foo").unwrap());

    let after = menu.snapshot();
    assert_eq!(all_ids(&before), all_ids(&after), "shape and order preserved");
    for entry_id in all_ids(&before) {
        let old = find(&before, &entry_id).unwrap();
        let new = find(&after, &entry_id).unwrap();
        if entry_id == id(target) {
            assert_eq!(new.name, "foo");
            assert_eq!(new.link, old.link);
            assert_eq!(new.icon, old.icon);
        } else {
            assert_eq!(new.entry(), old.entry());
        }
    }
}

// ============================================================
// missing ids are no-ops
// ============================================================

#[rstest]
fn given_absent_id_when_mutating_then_tree_is_unchanged(mut menu: MenuArena) {
    let before = menu.snapshot();
    let ghost = id("ghost");
    let defaults = EntryDefaults::default();

    assert_eq!(menu.rename(&ghost, "x"), Err(DomainError::EntryNotFound(ghost.clone())));
    assert!(menu
        .update_field(&ghost, EntryField::Link(Some("/x".into())))
        .is_err());
    assert!(menu.add_child(&ghost, &defaults).is_err());
    assert!(menu.delete(&ghost).is_err());
    assert!(menu.reorder_root(&ghost, &id("about")).is_err());
    assert!(menu.reorder_root(&id("about"), &ghost).is_err());

    assert_eq!(menu.snapshot(), before);
}

// ============================================================
// delete
// ============================================================

#[rstest]
fn given_entry_with_children_when_deleting_then_subtree_is_gone(mut menu: MenuArena) {
    let before = menu.snapshot();
    let doomed: HashSet<EntryId> = [id("service"), id("service-ielts"), id("service-career")]
        .into_iter()
        .collect();

    let removed = menu.delete(&id("service")).unwrap();

    assert_eq!(removed.into_iter().collect::<HashSet<_>>(), doomed);
    let after_ids = all_ids(&menu.snapshot());
    assert!(after_ids.iter().all(|i| !doomed.contains(i)));

    let expected: Vec<EntryId> = all_ids(&before)
        .into_iter()
        .filter(|i| !doomed.contains(i))
        .collect();
    assert_eq!(after_ids, expected, "survivors keep their relative order");
}

#[rstest]
fn given_leaf_when_deleting_then_parent_keeps_other_children(mut menu: MenuArena) {
    menu.delete(&id("about-team")).unwrap();
    assert_eq!(menu.child_ids(&id("about")).unwrap(), vec![id("about-faq")]);
}

// ============================================================
// add
// ============================================================

#[rstest]
fn given_add_child_then_delete_new_id_when_comparing_then_tree_restored(mut menu: MenuArena) {
    let before = menu.snapshot();

    let new_id = menu
        .add_child(&id("contact"), &EntryDefaults::default())
        .unwrap();
    assert_ne!(menu.snapshot(), before);
    menu.delete(&new_id).unwrap();

    assert_eq!(menu.snapshot(), before);
}

#[rstest]
fn given_service_when_adding_child_then_new_item_appended(mut menu: MenuArena) {
    let existing: HashSet<EntryId> = all_ids(&menu.snapshot()).into_iter().collect();
    let before = menu.child_ids(&id("service")).unwrap();

    let new_id = menu
        .add_child(&id("service"), &EntryDefaults::default())
        .unwrap();

    let after = menu.child_ids(&id("service")).unwrap();
    assert_eq!(after.len(), before.len() + 1);
    assert_eq!(after.last(), Some(&new_id));
    assert!(!existing.contains(&new_id));
    let entry = menu.get(&new_id).unwrap();
    assert_eq!(entry.name, "New Item");
    assert_eq!(entry.link.as_deref(), Some("#"));
}

#[rstest]
fn given_leaf_when_adding_child_then_children_sequence_is_created(mut menu: MenuArena) {
    let new_id = menu
        .add_child(&id("contact"), &EntryDefaults::default())
        .unwrap();
    assert_eq!(menu.child_ids(&id("contact")).unwrap(), vec![new_id]);
}

#[rstest]
fn given_menu_when_adding_root_then_appended_at_end(mut menu: MenuArena) {
    let defaults = EntryDefaults {
        name: "Blog".into(),
        link: None,
    };
    let new_id = menu.add_root(&defaults).unwrap();

    let roots = menu.root_ids();
    assert_eq!(roots.len(), 5);
    assert_eq!(roots.last(), Some(&new_id));
    assert_eq!(menu.get(&new_id).unwrap().name, "Blog");
    assert_eq!(menu.get(&new_id).unwrap().link, None);
}

// ============================================================
// reorder_root
// ============================================================

#[rstest]
#[case("about", "course", &["contact", "service", "course", "about"])]
#[case("course", "about", &["course", "about", "contact", "service"])]
#[case("contact", "service", &["about", "service", "contact", "course"])]
#[case("service", "contact", &["about", "service", "contact", "course"])]
fn given_two_roots_when_reordering_then_matches_array_move(
    mut menu: MenuArena,
    #[case] from: &str,
    #[case] to: &str,
    #[case] expected: &[&str],
) {
    let before = menu.snapshot();
    let to_old_pos = menu.root_ids().iter().position(|r| *r == id(to)).unwrap();

    menu.reorder_root(&id(from), &id(to)).unwrap();

    let roots = menu.root_ids();
    let expected: Vec<EntryId> = expected.iter().map(|s| id(s)).collect();
    assert_eq!(roots, expected);
    assert_eq!(roots.iter().position(|r| *r == id(from)), Some(to_old_pos));

    // every subtree travels with its root unchanged
    let after = menu.snapshot();
    for root in &before {
        assert_eq!(find(&after, &root.id), Some(root));
    }
}

#[rstest]
fn given_same_id_when_reordering_then_no_op(mut menu: MenuArena) {
    let before = menu.snapshot();
    for root in menu.root_ids() {
        assert!(matches!(
            menu.reorder_root(&root, &root),
            Err(DomainError::InvalidOperation(_))
        ));
    }
    assert_eq!(menu.snapshot(), before);
}

#[rstest]
fn given_nested_entry_when_reordering_root_then_levels_untouched(mut menu: MenuArena) {
    let before = menu.snapshot();
    assert!(menu
        .reorder_root(&id("service-ielts"), &id("about"))
        .is_err());
    assert_eq!(menu.snapshot(), before);
}

// ============================================================
// field updates
// ============================================================

#[rstest]
fn given_link_and_icon_updates_when_applying_then_name_untouched(mut menu: MenuArena) {
    menu.update_field(&id("contact"), EntryField::Link(None)).unwrap();
    menu.update_field(&id("contact"), EntryField::Icon(Some("phone".into())))
        .unwrap();

    let entry = menu.get(&id("contact")).unwrap();
    assert_eq!(entry.name, "Contact");
    assert_eq!(entry.link, None);
    assert_eq!(entry.icon.as_deref(), Some("phone"));
}

#[rstest]
fn given_snapshot_when_rebuilding_then_equal_value(menu: MenuArena) {
    let rebuilt = MenuArena::from_nodes(&menu.snapshot()).unwrap();
    assert_eq!(rebuilt.snapshot(), menu.snapshot());
}
