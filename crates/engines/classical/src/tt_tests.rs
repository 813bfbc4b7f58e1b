use super::*;

const INF: f32 = f32::INFINITY;

#[test]
fn test_store_and_lookup() {
    let mut tt = TranspositionTable::new(4);
    assert!(tt.is_empty());
    assert_eq!(tt.lookup(7), None);

    tt.store(7, 3, (1.5, 1.5), 1.5);
    let e = tt.lookup(7).unwrap();
    assert_eq!(e.depth, 3);
    assert_eq!(e.value, 1.5);
    assert_eq!(e.age, 4);
    assert!(e.is_exact());
    assert_eq!(tt.value(7), Some(1.5));
    assert_eq!(tt.len(), 1);
}

#[test]
fn test_shallower_store_keeps_deeper_entry() {
    let mut tt = TranspositionTable::new(3);
    tt.store(1, 5, (2.0, 2.0), 2.0);
    tt.age_and_evict();
    assert_eq!(tt.lookup(1).unwrap().age, 2);

    tt.store(1, 2, (9.0, 9.0), 9.0);
    let e = tt.lookup(1).unwrap();
    assert_eq!(e.depth, 5);
    assert_eq!(e.value, 2.0);
    // Age is refreshed anyway.
    assert_eq!(e.age, 3);

    tt.store(1, 5, (4.0, INF), 4.0);
    assert_eq!(tt.lookup(1).unwrap().value, 4.0);
}

#[test]
fn test_entries_expire() {
    let mut tt = TranspositionTable::new(2);
    tt.store(1, 1, (0.0, 0.0), 0.0);
    tt.age_and_evict();
    assert_eq!(tt.len(), 1);
    tt.store(2, 1, (0.0, 0.0), 0.0);
    tt.age_and_evict();
    assert_eq!(tt.lookup(1), None);
    assert!(tt.lookup(2).is_some());
    tt.age_and_evict();
    assert!(tt.is_empty());
}

#[test]
fn test_zero_lifetime_is_clamped() {
    let mut tt = TranspositionTable::new(0);
    assert_eq!(tt.lifetime(), 1);
    tt.store(1, 0, (0.0, 0.0), 0.0);
    assert_eq!(tt.len(), 1);
    tt.age_and_evict();
    assert!(tt.is_empty());
}

#[test]
fn test_window_classification() {
    assert_eq!(window(1.0, 0.0, 2.0), (1.0, 1.0));
    assert_eq!(window(2.5, 0.0, 2.0), (2.5, INF));
    assert_eq!(window(-1.0, 0.0, 2.0), (-INF, -1.0));
}

#[test]
fn test_cutoff_rules() {
    let exact = Entry {
        depth: 4,
        value: 1.0,
        lower: 1.0,
        upper: 1.0,
        age: 1,
    };
    assert_eq!(exact.cutoff(4, -INF, INF, false), Some(1.0));
    assert_eq!(exact.cutoff(5, -INF, INF, true), None);

    let high = Entry {
        lower: 3.0,
        upper: INF,
        value: 3.0,
        ..exact
    };
    assert_eq!(high.cutoff(2, 0.0, 2.0, true), Some(3.0));
    assert_eq!(high.cutoff(2, 0.0, 5.0, true), None);

    let low = Entry {
        lower: -INF,
        upper: -1.0,
        value: -1.0,
        ..exact
    };
    assert_eq!(low.cutoff(2, 0.0, 2.0, true), Some(-1.0));
    assert_eq!(low.cutoff(2, -2.0, 2.0, true), None);
}

#[test]
fn test_deeper_entries_need_opt_in() {
    let deep = Entry {
        depth: 6,
        value: 0.5,
        lower: 0.5,
        upper: 0.5,
        age: 1,
    };
    assert_eq!(deep.cutoff(3, -INF, INF, false), None);
    assert_eq!(deep.cutoff(3, -INF, INF, true), Some(0.5));
    assert_eq!(deep.cutoff(6, -INF, INF, false), Some(0.5));

    let terminal = Entry {
        depth: TERMINAL_DEPTH,
        value: -1e6,
        lower: -1e6,
        upper: -1e6,
        ..deep
    };
    assert_eq!(terminal.cutoff(0, -INF, INF, false), Some(-1e6));
    assert_eq!(terminal.cutoff(9, -INF, INF, false), Some(-1e6));
}

#[test]
fn test_clear() {
    let mut tt = TranspositionTable::new(4);
    tt.store(1, TERMINAL_DEPTH, (-1e6, -1e6), -1e6);
    tt.clear();
    assert!(tt.is_empty());
}
