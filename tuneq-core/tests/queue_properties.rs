//! Invariant and distribution tests for the playback queue
//!
//! Random operation sequences must never break the pointer invariant, and
//! shuffling must only ever touch (and uniformly permute) upcoming tracks.

use proptest::prelude::*;
use rand::SeedableRng;
use rand::rngs::StdRng;
use tuneq_core::{PlaybackQueue, Playlist, QueueStatus, Track};

// ===== Helpers =====

fn track(id: &str) -> Track {
    Track::new(id, format!("Title {id}"), "Artist")
}

fn ids(tracks: &[Track]) -> Vec<String> {
    tracks.iter().map(|t| t.id.clone()).collect()
}

fn assert_pointer_invariant(queue: &PlaybackQueue) {
    match queue.pointer() {
        None => assert!(queue.is_empty(), "pointer unset on non-empty queue"),
        Some(p) => assert!(p < queue.len(), "pointer {} out of range {}", p, queue.len()),
    }
    match queue.status() {
        QueueStatus::Empty => assert!(queue.is_empty()),
        QueueStatus::LastTrack => assert!(queue.upcoming().is_empty() && !queue.is_empty()),
        QueueStatus::Playing => assert!(!queue.upcoming().is_empty()),
    }
}

#[derive(Debug, Clone)]
enum Op {
    Enqueue(Vec<u8>),
    PlayNow(u8),
    Advance,
    Retreat,
    ToggleRepeat,
    Reorder(usize, usize),
    Remove(u8),
    RemoveAt(usize),
    Shuffle,
    Clear,
    Playlist(Vec<u8>),
}

fn op() -> impl Strategy<Value = Op> {
    prop_oneof![
        prop::collection::vec(0u8..12, 0..4).prop_map(Op::Enqueue),
        (0u8..12).prop_map(Op::PlayNow),
        Just(Op::Advance),
        Just(Op::Retreat),
        Just(Op::ToggleRepeat),
        (0usize..8, 0usize..8).prop_map(|(a, b)| Op::Reorder(a, b)),
        (0u8..12).prop_map(Op::Remove),
        (0usize..10).prop_map(Op::RemoveAt),
        Just(Op::Shuffle),
        Just(Op::Clear),
        prop::collection::vec(0u8..16, 0..5).prop_map(Op::Playlist),
    ]
}

proptest! {
    /// Property: the pointer is unset iff the queue is empty, and in range otherwise
    #[test]
    fn pointer_invariant_holds_after_every_operation(ops in prop::collection::vec(op(), 1..60)) {
        let mut queue = PlaybackQueue::new();
        // ids >= 12 are unknown to the lookup
        let lookup = |id: &str| -> Option<Track> {
            id.parse::<u8>().ok().filter(|n| *n < 12).map(|_| track(id))
        };

        for op in ops {
            let before = queue.current().map(|t| t.id.clone());
            let pointer_before = queue.pointer();

            match op {
                Op::Enqueue(ns) => {
                    queue.enqueue(ns.iter().map(|n| track(&n.to_string())));
                }
                Op::PlayNow(n) => queue.play_now(track(&n.to_string())),
                Op::Advance => {
                    queue.advance();
                }
                Op::Retreat => {
                    queue.retreat();
                }
                Op::ToggleRepeat => {
                    queue.toggle_repeat();
                }
                Op::Reorder(from, to) => {
                    let upcoming = queue.upcoming().len();
                    let result = queue.reorder_upcoming(from, to);
                    prop_assert_eq!(result.is_ok(), from < upcoming && to < upcoming);
                    prop_assert_eq!(queue.current().map(|t| t.id.clone()), before);
                    prop_assert_eq!(queue.pointer(), pointer_before);
                }
                Op::Remove(n) => {
                    queue.remove(&n.to_string());
                }
                Op::RemoveAt(i) => {
                    let removed_before_pointer = matches!(pointer_before, Some(p) if i < p);
                    if queue.remove_at(i).is_some() && removed_before_pointer {
                        prop_assert_eq!(queue.pointer(), pointer_before.map(|p| p - 1));
                        prop_assert_eq!(queue.current().map(|t| t.id.clone()), before);
                    }
                }
                Op::Shuffle => {
                    let history = ids(queue.history());
                    queue.shuffle();
                    prop_assert_eq!(ids(queue.history()), history);
                    prop_assert_eq!(queue.current().map(|t| t.id.clone()), before);
                }
                Op::Clear => {
                    let repeat = queue.repeat();
                    queue.clear();
                    prop_assert_eq!(queue.repeat(), repeat);
                }
                Op::Playlist(ns) => {
                    let playlist = Playlist::new("p", "P", ns.iter().map(|n| n.to_string()));
                    let known = ns.iter().filter(|n| **n < 12).count();
                    let len_before = queue.len();
                    prop_assert_eq!(queue.enqueue_playlist(&playlist, &lookup), len_before + known);
                }
            }

            assert_pointer_invariant(&queue);
        }
    }
}

// ===== Behaviour from the queue contract =====

#[test]
fn play_now_inserts_ahead_of_upcoming() {
    let mut queue = PlaybackQueue::new();
    queue.enqueue([track("a"), track("b"), track("c")]);
    queue.play_now(track("t"));
    assert_eq!(ids(queue.items()), vec!["a", "t", "b", "c"]);
    assert_eq!(queue.pointer(), Some(1));
}

#[test]
fn end_of_queue_respects_repeat_flag() {
    let mut queue = PlaybackQueue::new();
    queue.enqueue([track("a"), track("b"), track("c")]);
    queue.advance();
    queue.advance();
    assert_eq!(queue.pointer(), Some(2));

    assert!(!queue.advance());
    assert_eq!(queue.pointer(), Some(2));

    queue.toggle_repeat();
    assert!(queue.advance());
    assert_eq!(queue.pointer(), Some(0));

    // retreat from the start never wraps, even with repeat on
    assert!(!queue.retreat());
    assert_eq!(queue.pointer(), Some(0));
}

#[test]
fn single_track_with_repeat_restarts_itself() {
    let mut queue = PlaybackQueue::new();
    queue.set_repeat(true);
    queue.enqueue_one(track("solo"));
    assert!(queue.advance());
    assert_eq!(queue.pointer(), Some(0));
}

#[test]
fn reorder_moves_first_upcoming_to_the_end() {
    let mut queue = PlaybackQueue::new();
    queue.enqueue([track("h"), track("cur"), track("x"), track("y"), track("z")]);
    queue.jump_to(1).unwrap();

    queue.reorder_upcoming(0, 2).unwrap();
    assert_eq!(ids(queue.upcoming()), vec!["y", "z", "x"]);
    assert_eq!(queue.current().unwrap().id, "cur");
    assert_eq!(ids(queue.history()), vec!["h"]);
}

#[test]
fn removing_history_decrements_pointer_by_one() {
    let mut queue = PlaybackQueue::new();
    queue.enqueue([track("a"), track("b"), track("c"), track("d")]);
    queue.jump_to(3).unwrap();

    queue.remove("b").unwrap();
    assert_eq!(queue.pointer(), Some(2));
    assert_eq!(queue.current().unwrap().id, "d");
}

// ===== Shuffle distribution =====

/// Chi-square sanity check: over 1000 shuffles of a 5-track upcoming list,
/// every track lands in every slot roughly 200 times.
#[test]
fn shuffle_is_roughly_uniform() {
    const TRIALS: usize = 1000;
    const SLOTS: usize = 5;
    // chi-square critical value, 4 degrees of freedom, p ~ 0.00005
    const CRITICAL: f64 = 25.0;

    let upcoming = ["u0", "u1", "u2", "u3", "u4"];
    let mut counts = [[0usize; SLOTS]; SLOTS];
    let mut rng = StdRng::seed_from_u64(0x5eed);

    for _ in 0..TRIALS {
        let mut queue = PlaybackQueue::new();
        queue.enqueue([track("h0"), track("h1"), track("now")]);
        queue.enqueue(upcoming.iter().map(|id| track(id)));
        queue.jump_to(2).unwrap();

        queue.shuffle_with(&mut rng);

        assert_eq!(ids(queue.history()), vec!["h0", "h1"]);
        assert_eq!(queue.current().unwrap().id, "now");
        for (slot, t) in queue.upcoming().iter().enumerate() {
            let element = upcoming.iter().position(|id| *id == t.id).unwrap();
            counts[element][slot] += 1;
        }
    }

    let expected = TRIALS as f64 / SLOTS as f64;
    for (element, row) in counts.iter().enumerate() {
        let chi_square: f64 = row
            .iter()
            .map(|&observed| {
                let diff = observed as f64 - expected;
                diff * diff / expected
            })
            .sum();
        assert!(
            chi_square < CRITICAL,
            "track {} placement skewed: {:?} (chi-square {:.2})",
            upcoming[element],
            row,
            chi_square
        );
    }
}
