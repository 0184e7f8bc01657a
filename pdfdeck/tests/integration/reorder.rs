//! Reordering through every input path.

use pdfdeck::list::{Direction, DropPlacement, OrderedFileList, TouchDrag};
use rstest::rstest;

use crate::common::{entry, names};

fn list_of(tags: &[&str], placement: DropPlacement) -> OrderedFileList {
    let mut list = OrderedFileList::new(placement);
    list.load_selection(tags.iter().map(|t| entry(t, 1)).collect());
    list
}

#[test]
fn test_load_keeps_identity_and_order() {
    let files = vec![entry("c", 1), entry("a", 1), entry("b", 1)];
    let ids: Vec<_> = files.iter().map(|f| f.id()).collect();

    let mut list = OrderedFileList::default();
    list.load_selection(files);

    let snapshot = list.current_order();
    assert_eq!(snapshot.len(), 3);
    let order: Vec<_> = snapshot.entries.iter().map(|e| e.id()).collect();
    assert_eq!(order, ids);
}

#[test]
fn test_boundary_moves_are_noops() {
    let mut list = list_of(&["a", "b", "c"], DropPlacement::Reinsert);

    assert!(!list.move_index(0, Direction::Up));
    assert!(!list.move_index(2, Direction::Down));
    assert_eq!(names(&list), ["a.pdf", "b.pdf", "c.pdf"]);
}

#[rstest]
#[case(0)]
#[case(1)]
#[case(2)]
#[case(3)]
fn test_down_then_up_round_trips(#[case] index: usize) {
    let mut list = list_of(&["a", "b", "c", "d", "e"], DropPlacement::Reinsert);
    let before = names(&list);

    assert!(list.move_index(index, Direction::Down));
    assert!(list.move_index(index + 1, Direction::Up));
    assert_eq!(names(&list), before);
}

#[rstest]
fn test_adjacent_drag_matches_move_one(
    #[values(DropPlacement::Reinsert, DropPlacement::Swap)] placement: DropPlacement,
    #[values(0, 1, 2)] index: usize,
) {
    let mut dragged = list_of(&["a", "b", "c", "d"], placement);
    let mut moved = list_of(&["a", "b", "c", "d"], placement);

    let source = dragged.get(index + 1).unwrap().id();
    let target = dragged.get(index).unwrap().id();
    assert!(dragged.reorder_by_drag(source, target));
    assert!(moved.move_index(index + 1, Direction::Up));

    assert_eq!(names(&dragged), names(&moved));
}

#[rstest]
#[case(DropPlacement::Reinsert, 3, 0, ["d.pdf", "a.pdf", "b.pdf", "c.pdf"])]
#[case(DropPlacement::Reinsert, 0, 3, ["b.pdf", "c.pdf", "d.pdf", "a.pdf"])]
#[case(DropPlacement::Swap, 3, 0, ["d.pdf", "b.pdf", "c.pdf", "a.pdf"])]
#[case(DropPlacement::Swap, 0, 3, ["d.pdf", "b.pdf", "c.pdf", "a.pdf"])]
fn test_non_adjacent_drag(
    #[case] placement: DropPlacement,
    #[case] from: usize,
    #[case] to: usize,
    #[case] expected: [&str; 4],
) {
    let mut list = list_of(&["a", "b", "c", "d"], placement);
    let source = list.get(from).unwrap().id();
    let target = list.get(to).unwrap().id();

    assert!(list.reorder_by_drag(source, target));
    assert_eq!(names(&list), expected);
}

#[test]
fn test_touch_gesture_walks_row_down() {
    let mut list = list_of(&["a", "b", "c", "d"], DropPlacement::Reinsert);
    let a = list.get(0).unwrap().id();

    let mut drag = TouchDrag::begin(&list, a).unwrap();
    for over in [Some(1), Some(1), None, Some(2), Some(3), Some(3)] {
        drag.sample(&mut list, over);
    }

    assert_eq!(drag.end(), a);
    assert_eq!(names(&list), ["b.pdf", "c.pdf", "d.pdf", "a.pdf"]);
}

#[test]
fn test_touch_gesture_stops_after_reselection() {
    let mut list = list_of(&["a", "b"], DropPlacement::Reinsert);
    let a = list.get(0).unwrap().id();
    let mut drag = TouchDrag::begin(&list, a).unwrap();

    list.load_selection(vec![entry("x", 1), entry("y", 1)]);
    assert_eq!(drag.sample(&mut list, Some(1)), None);
    assert_eq!(names(&list), ["x.pdf", "y.pdf"]);
}
