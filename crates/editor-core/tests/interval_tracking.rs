use editor_core::{Anchored, Document, IntervalTree, TextBuffer, TextDeltaEdit};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::sync::{Arc, Mutex};

#[derive(Debug, Clone, PartialEq, Eq)]
struct Mark {
    start: usize,
    end: usize,
    id: usize,
}

impl Anchored for Mark {
    fn start(&self) -> usize {
        self.start
    }

    fn end(&self) -> usize {
        self.end
    }

    fn set_range(&mut self, start: usize, end: usize) {
        self.start = start;
        self.end = end;
    }
}

fn brute_force(marks: &[Mark], start: usize, end: usize) -> Vec<usize> {
    if start >= end {
        return Vec::new();
    }
    marks
        .iter()
        .filter(|m| m.start < end && start < m.end)
        .map(|m| m.id)
        .collect()
}

#[test]
fn test_query_matches_brute_force_scan() {
    let mut rng = StdRng::seed_from_u64(0x5eed);
    let mut tree = IntervalTree::new();
    let mut marks = Vec::new();

    for id in 0..2_000 {
        let start = rng.gen_range(0..5_000);
        let len = if id % 50 == 0 {
            rng.gen_range(100..1_000)
        } else {
            rng.gen_range(1..20)
        };
        let mark = Mark {
            start,
            end: start + len,
            id,
        };
        tree.insert(mark.clone());
        marks.push(mark);
    }

    for _ in 0..500 {
        let start = rng.gen_range(0..6_000);
        let end = start + rng.gen_range(0..120);
        let got: Vec<usize> = tree.query_range(start, end).map(|m| m.id).collect();
        assert_eq!(got, brute_force(&marks, start, end), "query {start}..{end}");
    }
}

#[test]
fn test_empty_query_range_yields_nothing() {
    let mut tree = IntervalTree::new();
    tree.insert(Mark {
        start: 0,
        end: 10,
        id: 0,
    });
    tree.insert(Mark {
        start: 5,
        end: 6,
        id: 1,
    });

    assert_eq!(tree.query_range(5, 5).count(), 0);
    assert_eq!(tree.query_range(7, 3).count(), 0);
    assert_eq!(tree.query_range(5, 6).count(), 2);
}

#[test]
fn test_query_matches_brute_force_after_random_edits() {
    let mut rng = StdRng::seed_from_u64(42);
    let mut tree = IntervalTree::new();

    for id in 0..500 {
        let start = rng.gen_range(0..2_000);
        let len = rng.gen_range(1..40);
        tree.insert(Mark {
            start,
            end: start + len,
            id,
        });
    }

    for _ in 0..200 {
        let pos = rng.gen_range(0..2_000);
        if rng.gen_bool(0.5) {
            tree.update_for_insertion(pos, rng.gen_range(1..10));
        } else {
            tree.update_for_deletion(pos, pos + rng.gen_range(1..10));
        }
    }

    let survivors: Vec<Mark> = tree.iter().cloned().collect();
    assert!(
        survivors.iter().all(|m| m.start < m.end),
        "no empty marks survive"
    );
    assert!(
        survivors.windows(2).all(|w| w[0].id < w[1].id),
        "iteration stays in insertion order"
    );

    for _ in 0..200 {
        let start = rng.gen_range(0..2_500);
        let end = start + rng.gen_range(1..80);
        let got: Vec<usize> = tree.query_range(start, end).map(|m| m.id).collect();
        assert_eq!(
            got,
            brute_force(&survivors, start, end),
            "query {start}..{end}"
        );
    }
}

#[test]
fn test_document_edits_drive_interval_drift() {
    let tree = Arc::new(Mutex::new(IntervalTree::new()));
    {
        let mut tree = tree.lock().unwrap();
        // "foo"
        tree.insert(Mark {
            start: 0,
            end: 3,
            id: 0,
        });
        // "bar"
        tree.insert(Mark {
            start: 4,
            end: 7,
            id: 1,
        });
    }

    let mut doc = Document::new("foo bar");
    let sink = Arc::clone(&tree);
    doc.subscribe(move |edit| {
        sink.lock().unwrap().apply_edit(edit);
    });

    // Insert before both marks.
    doc.insert(0, "! ");
    let ranges: Vec<(usize, usize)> = tree
        .lock()
        .unwrap()
        .query_range(0, doc.char_count())
        .map(|m| (m.start, m.end))
        .collect();
    assert_eq!(ranges, vec![(2, 5), (6, 9)]);

    // Insert inside "foo": end grows, start stays.
    doc.insert(3, "oo");
    let ranges: Vec<(usize, usize)> = tree
        .lock()
        .unwrap()
        .iter()
        .map(|m| (m.start, m.end))
        .collect();
    assert_eq!(ranges, vec![(2, 7), (8, 11)]);

    // Delete a range covering "bar" entirely.
    doc.delete(7..11);
    let ids: Vec<usize> = tree.lock().unwrap().iter().map(|m| m.id).collect();
    assert_eq!(ids, vec![0]);
    assert_eq!(doc.text(), "! foooo");
}

#[test]
fn test_replace_edit_inside_interval() {
    let mut tree = IntervalTree::new();
    tree.insert(Mark {
        start: 2,
        end: 10,
        id: 0,
    });

    // Replace 3 chars inside with 1 char.
    tree.apply_edit(&TextDeltaEdit {
        start: 4,
        deleted_text: "abc".to_string(),
        inserted_text: "z".to_string(),
    });

    let mark = tree.iter().next().unwrap();
    assert_eq!((mark.start, mark.end), (2, 8));
}
