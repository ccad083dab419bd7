use super::*;

fn cfg_with_width(w: u32) -> Configuration {
    let mut c = Configuration::default();
    c.canvas.width = w;
    c
}

#[test]
fn starts_with_one_snapshot_and_no_moves() {
    let h = History::new(&1);
    assert_eq!(h.len(), 1);
    assert!(!h.can_undo());
    assert!(!h.can_redo());
    assert_eq!(h.current(), 1);
}

#[test]
fn undo_and_redo_walk_the_sequence() {
    let mut h = History::new(&'a');
    h.push(&'b');
    h.push(&'c');

    assert_eq!(h.undo(), Some('b'));
    assert_eq!(h.undo(), Some('a'));
    assert_eq!(h.undo(), None);
    assert!(!h.can_undo());
    assert_eq!(h.redo(), Some('b'));
    assert_eq!(h.redo(), Some('c'));
    assert_eq!(h.redo(), None);
    assert!(!h.can_redo());
}

#[test]
fn pushing_after_undo_discards_the_future() {
    let mut h = History::new(&'a');
    h.push(&'b');
    h.push(&'c');
    h.undo();
    h.undo();
    h.push(&'d');
    assert!(!h.can_redo());
    assert_eq!(h.redo(), None);
    assert_eq!(h.len(), 2);
    assert_eq!(h.undo(), Some('a'));
}

#[test]
fn capacity_evicts_oldest() {
    let m = DEFAULT_CAPACITY;
    let mut h = History::new(&0usize);
    for i in 1..m + 5 {
        h.push(&i);
    }
    assert_eq!(h.len(), m);
    assert_eq!(h.cursor(), m - 1);
    assert_eq!(h.current(), m + 4);

    let mut oldest = h.current();
    while let Some(v) = h.undo() {
        oldest = v;
    }
    assert_eq!(oldest, 5);
}

#[test]
fn capacity_of_one_keeps_latest() {
    let mut h = History::with_capacity(&1, 0);
    assert_eq!(h.capacity(), 1);
    h.push(&2);
    assert_eq!(h.len(), 1);
    assert_eq!(h.current(), 2);
    assert!(!h.can_undo());
}

#[test]
fn returned_snapshots_are_isolated() {
    let mut h = HistoryManager::new(&cfg_with_width(100));
    let mut live = cfg_with_width(200);
    h.push(&live);
    live.canvas.width = 999;

    let mut back = h.undo().unwrap();
    back.canvas.width = 1;
    back.title.text.push_str(" edited");

    let mut fwd = h.redo().unwrap();
    assert_eq!(fwd.canvas.width, 200);
    fwd.canvas.width = 2;

    assert_eq!(h.undo().unwrap(), cfg_with_width(100));
    assert_eq!(h.redo().unwrap(), cfg_with_width(200));
    let mut cur = h.current();
    cur.logo.visible = false;
    assert!(h.current().logo.visible);
}
