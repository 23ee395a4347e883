use std::collections::HashMap;

use optimal_tables::{
    BfsEngine, DistanceTable, GridCodec, GridMoves, GridShape, MoveSet, NoProgress, StateCodec,
    Triple, TripleBounds, TripleCodec, TripleMoves,
};
use proptest::prelude::*;

fn traverse<C, M>(codec: &C, moves: &M) -> DistanceTable
where
    C: StateCodec,
    M: MoveSet<State = C::State, Bounds = C::Bounds>,
{
    BfsEngine::new(codec, moves)
        .expect("matching bounds")
        .run(&mut NoProgress)
        .expect("traversal")
        .table
}

/// Every edge out of a reached state lands on a reached state at most one
/// further away, and every reached state except the start has a parent
/// exactly one closer. Together these pin each entry to the true distance.
fn assert_exact_distances<C, M>(codec: &C, moves: &M, table: &DistanceTable)
where
    C: StateCodec,
    M: MoveSet<State = C::State, Bounds = C::Bounds>,
{
    let start = codec.encode(codec.start());
    assert_eq!(table.get(start), Some(0));

    let mut has_parent = vec![false; table.len()];
    for index in 0..table.len() {
        let Some(d) = table.get(index) else { continue };
        let state = codec.decode(index);
        for m in 0..moves.len() {
            let Some(next) = moves.apply(m, state) else { continue };
            assert!(codec.contains(next));
            let next_index = codec.encode(next);
            let next_d = table
                .get(next_index)
                .unwrap_or_else(|| panic!("{next:?} reachable from {state:?} but unreached"));
            assert!(next_d <= d + 1, "{next:?} at {next_d}, parent {state:?} at {d}");
            if next_d == d + 1 {
                has_parent[next_index] = true;
            }
        }
    }

    for index in 0..table.len() {
        if index != start && table.is_reached(index) {
            assert!(has_parent[index], "{:?} has no parent", codec.decode(index));
        }
    }
}

/// Shortest sequence length per state, by trying every move sequence up to `depth`.
fn enumerate_paths<C, M>(codec: &C, moves: &M, depth: usize) -> HashMap<usize, usize>
where
    C: StateCodec,
    M: MoveSet<State = C::State, Bounds = C::Bounds>,
{
    fn walk<C, M>(
        codec: &C,
        moves: &M,
        state: C::State,
        len: usize,
        depth: usize,
        best: &mut HashMap<usize, usize>,
    ) where
        C: StateCodec,
        M: MoveSet<State = C::State, Bounds = C::Bounds>,
    {
        let entry = best.entry(codec.encode(state)).or_insert(len);
        *entry = (*entry).min(len);
        if len == depth {
            return;
        }
        for m in 0..moves.len() {
            if let Some(next) = moves.apply(m, state) {
                walk(codec, moves, next, len + 1, depth, best);
            }
        }
    }

    let mut best = HashMap::new();
    walk(codec, moves, codec.start(), 0, depth, &mut best);
    best
}

fn assert_matches_enumeration<C, M>(codec: &C, moves: &M, depth: usize)
where
    C: StateCodec,
    M: MoveSet<State = C::State, Bounds = C::Bounds>,
{
    let table = traverse(codec, moves);
    let best = enumerate_paths(codec, moves, depth);
    for index in 0..table.len() {
        match (table.get(index), best.get(&index)) {
            (Some(d), Some(&len)) => assert_eq!(d as usize, len, "{:?}", codec.decode(index)),
            (Some(d), None) => assert!(d as usize > depth),
            (None, found) => assert_eq!(found, None),
        }
    }
}

#[test]
fn test_small_triple_distances_are_exact() {
    let bounds = TripleBounds::new(-4, 5).unwrap();
    let codec = TripleCodec::new(bounds);
    let moves = TripleMoves::new(bounds);
    let table = traverse(&codec, &moves);
    assert_exact_distances(&codec, &moves, &table);
}

#[test]
fn test_small_triple_matches_enumeration() {
    let bounds = TripleBounds::new(-2, 2).unwrap();
    assert_matches_enumeration(&TripleCodec::new(bounds), &TripleMoves::new(bounds), 5);
}

#[test]
fn test_small_grid_matches_enumeration() {
    let shape = GridShape::new(2, 2).unwrap();
    assert_matches_enumeration(&GridCodec::new(shape), &GridMoves::new(shape), 4);
}

#[test]
fn test_full_grid_distances_are_exact() {
    let codec = GridCodec::default();
    let moves = GridMoves::default();
    let table = traverse(&codec, &moves);
    assert_eq!(table.len(), 65_536);
    assert_exact_distances(&codec, &moves, &table);
}

#[test]
fn test_grid_plus_at_corner() {
    let codec = GridCodec::default();
    let moves = GridMoves::default();
    let table = traverse(&codec, &moves);

    // Plus pattern anchored at (0, 0).
    let plus_corner = 16;
    let once = moves.apply(plus_corner, 0).unwrap();
    assert_eq!(once, 0x13);
    assert_eq!(table.get(codec.encode(once)), Some(1));

    let twice = moves.apply(plus_corner, once).unwrap();
    assert_eq!(twice, 0);
    assert_eq!(table.get(codec.encode(twice)), Some(0));
}

#[test]
fn test_full_triple_start_and_increment() {
    let codec = TripleCodec::default();
    let moves = TripleMoves::default();
    let table = traverse(&codec, &moves);
    assert_eq!(table.len(), 7_880_599);
    assert_eq!(table.get(codec.encode(Triple::new(0, 0, 0))), Some(0));
    assert_eq!(table.get(codec.encode(Triple::new(0, 0, 1))), Some(1));
    assert_eq!(table.get(codec.encode(Triple::new(1, 0, 0))), Some(2));
}

#[test]
fn test_moves_never_leave_the_domain() {
    let moves = TripleMoves::default();
    let codec = TripleCodec::default();
    let edge = Triple::new(0, 0, 99);
    assert_eq!(moves.apply(0, edge), None);
    assert!(!codec.contains(Triple::new(0, 0, 100)));

    let bounds = TripleBounds::new(-3, 3).unwrap();
    let (codec, moves) = (TripleCodec::new(bounds), TripleMoves::new(bounds));
    for index in 0..codec.state_count() {
        let state = codec.decode(index);
        for m in 0..moves.len() {
            if let Some(next) = moves.apply(m, state) {
                assert!(codec.contains(next), "{state:?} -> {next:?}");
            }
        }
    }
}

proptest! {
    #[test]
    fn prop_triple_encode_decode(a in -99i32..=99, b in -99i32..=99, c in -99i32..=99) {
        let codec = TripleCodec::default();
        let state = Triple::new(a, b, c);
        let index = codec.encode(state);
        prop_assert!(index < codec.state_count());
        prop_assert_eq!(codec.decode(index), state);
    }

    #[test]
    fn prop_triple_decode_encode(index in 0usize..7_880_599) {
        let codec = TripleCodec::default();
        prop_assert_eq!(codec.encode(codec.decode(index)), index);
    }

    #[test]
    fn prop_grid_bijection(state in 0u32..65_536) {
        let codec = GridCodec::default();
        prop_assert_eq!(codec.decode(codec.encode(state)), state);
        prop_assert_eq!(codec.encode(codec.decode(state as usize)), state as usize);
    }

    #[test]
    fn prop_grid_moves_self_inverse(state in 0u32..65_536, index in 0usize..48) {
        let moves = GridMoves::default();
        let once = moves.apply(index, state).unwrap();
        prop_assert!(once < 65_536);
        prop_assert_eq!(moves.apply(index, once), Some(state));
    }

    #[test]
    fn prop_triple_order_preserved(
        a in -99i32..=99, b in -99i32..=99, c in -99i32..98,
    ) {
        let codec = TripleCodec::default();
        let lo = codec.encode(Triple::new(a, b, c));
        let hi = codec.encode(Triple::new(a, b, c + 1));
        prop_assert_eq!(hi, lo + 1);
    }
}
