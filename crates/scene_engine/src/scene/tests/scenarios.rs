//! Scenario tests for insertion, relocation and the children scan contract

use crate::foundation::arena::{ArenaError, GrowthPolicy};
use crate::foundation::math::{translation_of, Mat4, Vec3};
use crate::scene::{HierarchyStore, SceneObject};
use approx::assert_relative_eq;

fn named(capacity: usize) -> HierarchyStore<&'static str> {
    HierarchyStore::new(capacity)
}

fn parents_of(store: &HierarchyStore<&'static str>, indices: std::ops::RangeInclusive<usize>) -> Vec<Option<usize>> {
    indices.map(|i| store[i].parent_index()).collect()
}

#[test]
fn test_incremental_children_relocate_past_new_root() {
    let mut store = named(10);
    let a = store.add_root("A").unwrap();
    assert_eq!(a, 0);

    assert_eq!(store.add_child(a, "B"), Ok(1));
    assert_eq!(store[a].children_range(), Some(1..=1));

    assert_eq!(store.add_child(a, "C"), Ok(2));
    assert_eq!(store[a].children_range(), Some(1..=2));

    let d = store.add_root("D").unwrap();
    assert_eq!(d, 3);

    // slot 3 is taken, so B and C move together with E
    let e = store.add_child(a, "E").unwrap();
    assert_eq!(e, 6);
    assert_eq!(store[a].children_start(), Some(4));
    assert_eq!(store[a].children_end(), Some(6));
    assert_eq!(parents_of(&store, 4..=6), vec![Some(0); 3]);
    assert!(store.arena().can_place(1));
    assert!(store.arena().can_place(2));
    assert_eq!(store.validate(), Ok(()));

    // D's first child takes the hole right before it
    let f = store.add_child(d, "F").unwrap();
    assert_eq!(f, 2);
    assert!(store.arena().can_place(1));
    assert_eq!(store[d].children_range(), Some(2..=2));
    assert_eq!(store[f].parent_index(), Some(3));
    assert_eq!(store.validate(), Ok(()));
}

#[test]
fn test_batch_children_relocate_past_new_root() {
    let mut store = named(16);
    let p = store.add_root("P").unwrap();
    assert_eq!(p, 0);

    let first = store.add_children(p, ["c1", "c2", "c3", "c4"]).unwrap();
    assert_eq!(first, 1);
    assert_eq!(store[p].children_range(), Some(1..=4));

    let q = store.add_root("Q").unwrap();
    assert_eq!(q, 5);

    let first = store.add_children(p, ["c5", "c6"]).unwrap();
    assert_eq!(first, 6);
    assert_eq!(store[p].children_range(), Some(6..=11));

    let names: Vec<&str> = store.children(p).map(|(_, node)| *node.payload()).collect();
    assert_eq!(names, vec!["c1", "c2", "c3", "c4", "c5", "c6"]);
    assert!((1..=4).all(|i| store.arena().is_free(i)));
    assert_eq!(store.stats().relocations, 1);
    assert_eq!(store.validate(), Ok(()));
}

#[test]
fn test_append_returns_previous_end_plus_one() {
    let mut store = named(32);
    let root = store.add_root("root").unwrap();
    store.add_children(root, ["a", "b"]).unwrap();

    for name in ["c", "d", "e", "f", "g"] {
        let previous_end = store[root].children_end().unwrap();
        let index = store.add_child(root, name).unwrap();
        assert_eq!(index, previous_end + 1);
    }
    assert_eq!(store.stats().relocations, 0);
}

#[test]
fn test_grandparent_relocation_retargets_one_level() {
    let mut store = named(10);
    let grandparent = store.add_root("grandparent").unwrap();
    let parent = store.add_child(grandparent, "parent").unwrap();
    let child = store.add_child(parent, "child").unwrap();
    assert_eq!((grandparent, parent, child), (0, 1, 2));
    assert_eq!(store[grandparent].children_range(), Some(1..=1));
    assert_eq!(store[parent].children_range(), Some(2..=2));

    // slot 2 holds the grandchild, so parent's sibling set must move
    let uncle = store.add_child(grandparent, "uncle").unwrap();
    let relocated_parent = 3;
    assert_eq!(uncle, 4);
    assert_eq!(store[grandparent].children_range(), Some(3..=4));
    assert_eq!(*store.payload(relocated_parent), "parent");
    assert_eq!(store[relocated_parent].children_range(), Some(2..=2));
    assert_eq!(store[child].parent_index(), Some(relocated_parent));
    assert_eq!(store[relocated_parent].parent_index(), Some(grandparent));
    assert_eq!(store[uncle].parent_index(), Some(grandparent));
    assert_eq!(store.validate(), Ok(()));
}

#[test]
fn test_parent_relocation_keeps_parent_link() {
    let mut store = named(10);
    let grandparent = store.add_root("grandparent").unwrap();
    let parent = store.add_child(grandparent, "parent").unwrap();
    store.add_child(parent, "child").unwrap();
    let blocker = store.add_root("blocker").unwrap();
    assert_eq!(blocker, 3);

    let sibling = store.add_child(parent, "sibling").unwrap();
    assert_eq!(sibling, 5);
    assert_eq!(store[parent].children_range(), Some(4..=5));
    assert_eq!(*store.payload(4), "child");
    assert_eq!(store[4].parent_index(), Some(parent));
    assert_eq!(store[parent].parent_index(), Some(grandparent));
    assert_eq!(store.validate(), Ok(()));
}

#[test]
fn test_fixup_depth_is_exactly_one() {
    let mut store = named(12);
    let g = store.add_root("g").unwrap();
    let p = store.add_child(g, "p").unwrap();
    let c = store.add_child(p, "c").unwrap();
    let d = store.add_child(c, "d").unwrap();
    assert_eq!((g, p, c, d), (0, 1, 2, 3));

    store.add_child(g, "p2").unwrap();
    let moved_p = 4;
    assert_eq!(*store.payload(moved_p), "p");
    assert_eq!(store[c].parent_index(), Some(moved_p));
    assert_eq!(store[c].children_range(), Some(3..=3));
    assert_eq!(store[d].parent_index(), Some(c));
    assert_eq!(store.stats().parent_fixups, 1);
    assert_eq!(store.validate(), Ok(()));
}

#[test]
fn test_repeated_reads_are_identical() {
    let mut store = named(10);
    let root = store.add_root("root").unwrap();
    store.add_children(root, ["a", "b"]).unwrap();

    let first = store[root].clone();
    let second = store[root].clone();
    assert_eq!(first, second);
    assert_eq!(first.children_range(), second.children_range());
    assert_eq!(first.parent_index(), second.parent_index());
}

#[test]
fn test_failed_relocation_is_atomic() {
    let mut store = named(6);
    let root = store.add_root("root").unwrap();
    store.add_children(root, ["a", "b"]).unwrap();
    store.add_root("wall").unwrap();
    store.add_child(1, "leaf").unwrap();
    let snapshot = store.clone();

    let err = store.add_children(root, ["c", "d"]).unwrap_err();
    assert_eq!(err, ArenaError::ArenaFull { requested: 4, capacity: 6 });
    assert_eq!(store.arena().slots(), snapshot.arena().slots());
    assert_eq!(store.len(), snapshot.len());
    assert_eq!(store.validate(), Ok(()));
}

#[test]
fn test_growable_store_keeps_indices_on_growth() {
    let mut store: HierarchyStore<&str> = HierarchyStore::with_policy(2, GrowthPolicy::Double);
    let root = store.add_root("root").unwrap();
    store.add_child(root, "a").unwrap();
    // the in-place test never grows, so the batch relocates into fresh slots
    let first = store.add_children(root, ["b", "c", "d"]).unwrap();

    assert_eq!(first, 2);
    assert_eq!(store.capacity(), 8);
    assert_eq!(*store.payload(root), "root");
    assert_eq!(store[root].children_range(), Some(2..=5));
    assert_eq!(*store.payload(2), "a");
    assert_eq!(store.validate(), Ok(()));
}

/// Transform propagation written the way an external consumer would.
fn propagate(store: &mut HierarchyStore, index: usize, parent_world: &Mat4) {
    let world = parent_world * store.payload(index).local_matrix();
    store.payload_mut(index).world = world;
    if let Some(range) = store[index].children_range() {
        for child in range {
            propagate(store, child, &world);
        }
    }
}

#[test]
fn test_children_scan_supports_transform_propagation() {
    let mut store: HierarchyStore = HierarchyStore::new(16);
    let sun = store.add_root(SceneObject::new().with_position(Vec3::new(10.0, 0.0, 0.0))).unwrap();
    let planets = store
        .add_children(
            sun,
            [
                SceneObject::new().with_position(Vec3::new(1.0, 0.0, 0.0)),
                SceneObject::new().with_position(Vec3::new(0.0, 2.0, 0.0)),
            ],
        )
        .unwrap();
    store.add_root(SceneObject::new()).unwrap();
    let moon = store
        .add_child(planets, SceneObject::new().with_position(Vec3::new(0.0, 0.0, 3.0)))
        .unwrap();
    // forces the planets to move
    store.add_child(sun, SceneObject::new().with_position(Vec3::new(-1.0, 0.0, 0.0))).unwrap();

    let roots: Vec<usize> = store.roots().collect();
    for root in roots {
        propagate(&mut store, root, &Mat4::identity());
    }

    let first_planet = store[sun].children_start().unwrap();
    assert_relative_eq!(translation_of(&store.payload(first_planet).world), Vec3::new(11.0, 0.0, 0.0));
    assert_relative_eq!(translation_of(&store.payload(moon).world), Vec3::new(11.0, 0.0, 3.0));
    let last_planet = store[sun].children_end().unwrap();
    assert_relative_eq!(translation_of(&store.payload(last_planet).world), Vec3::new(9.0, 0.0, 0.0));
    assert_eq!(store.validate(), Ok(()));
}
