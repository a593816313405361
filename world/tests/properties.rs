use std::{collections::BTreeSet, time::Duration};

use proptest::prelude::*;
use tilt_2048_core::{Coordinate, Direction};
use tilt_2048_world::{slide, spawn_random_tile, Board, RandomSource};

const NOW: Duration = Duration::from_millis(250);
const DURATION: Duration = Duration::from_millis(100);

#[derive(Debug)]
struct Fixed(usize);

impl RandomSource for Fixed {
    fn next_index(&mut self, upper: usize) -> usize {
        self.0 % upper
    }
}

fn arb_value() -> impl Strategy<Value = u32> {
    prop_oneof![
        3 => Just(0u32),
        2 => Just(2u32),
        2 => Just(4u32),
        1 => Just(8u32),
        1 => Just(16u32),
    ]
}

fn arb_rows() -> impl Strategy<Value = Vec<Vec<u32>>> {
    (1usize..=5, 1usize..=5).prop_flat_map(|(columns, rows)| {
        prop::collection::vec(prop::collection::vec(arb_value(), columns), rows)
    })
}

fn arb_direction() -> impl Strategy<Value = Direction> {
    prop::sample::select(Direction::CARDINALS.to_vec())
}

fn non_zero(rows: &[Vec<u32>]) -> Vec<u32> {
    rows.iter()
        .flatten()
        .copied()
        .filter(|&value| value != 0)
        .collect()
}

proptest! {
    #[test]
    fn slide_conserves_the_total_value(rows in arb_rows(), direction in arb_direction()) {
        let mut board = Board::from_rows(&rows).expect("rectangular rows");
        let before = non_zero(&rows);

        let _ = slide(&mut board, direction, NOW, DURATION);
        let after = non_zero(&board.to_rows());

        let sum_before: u64 = before.iter().map(|&value| u64::from(value)).sum();
        let sum_after: u64 = after.iter().map(|&value| u64::from(value)).sum();
        prop_assert_eq!(sum_before, sum_after);
        prop_assert!(after.len() <= before.len());
        prop_assert!(2 * after.len() >= before.len(), "every merge consumes exactly one pair");
    }

    #[test]
    fn slide_never_merges_a_tile_twice(rows in arb_rows(), direction in arb_direction()) {
        let mut board = Board::from_rows(&rows).expect("rectangular rows");
        let original: BTreeSet<u32> = non_zero(&rows).into_iter().collect();
        let max_before = board.max_tile_value();

        let _ = slide(&mut board, direction, NOW, DURATION);

        prop_assert!(board.max_tile_value() <= max_before.saturating_mul(2));
        for value in non_zero(&board.to_rows()) {
            prop_assert!(
                original.contains(&value) || original.contains(&(value / 2)),
                "{} is neither an original value nor a single merge of one",
                value
            );
        }
    }

    #[test]
    fn unchanged_slide_leaves_the_board_identical(
        rows in arb_rows(),
        direction in arb_direction(),
    ) {
        let mut board = Board::from_rows(&rows).expect("rectangular rows");
        let has_changed = slide(&mut board, direction, NOW, DURATION);

        prop_assert_eq!(has_changed, board.to_rows() != rows);
        if !has_changed {
            let mut again = board.clone();
            prop_assert!(!slide(&mut again, direction, NOW, DURATION));
            prop_assert_eq!(again.to_rows(), rows);
        }
    }

    #[test]
    fn neighbours_stay_within_bounds(
        columns in 1u32..=6,
        rows in 1u32..=6,
        x in -2i32..8,
        y in -2i32..8,
    ) {
        let board = Board::new(columns, rows);
        let position = Coordinate::new(x, y);
        let expected = Direction::CARDINALS
            .iter()
            .filter(|&&direction| board.in_bounds(position.step(direction)))
            .count();

        let neighbours = board.neighbours(position);
        prop_assert!(neighbours.len() <= 4);
        prop_assert_eq!(neighbours.len(), expected);
    }

    #[test]
    fn spawn_only_fills_empty_cells(rows in arb_rows(), index in 0usize..64) {
        let mut board = Board::from_rows(&rows).expect("rectangular rows");
        let empty_before = board.empty_cells();

        let spawned = spawn_random_tile(&mut board, &mut Fixed(index), NOW, DURATION);

        match spawned {
            Some(cell) => {
                prop_assert!(empty_before.contains(&cell));
                prop_assert_eq!(board.value_at(cell), Ok(2));
                prop_assert_eq!(board.empty_cells().len() + 1, empty_before.len());
            }
            None => {
                prop_assert!(empty_before.is_empty());
                prop_assert_eq!(board.to_rows(), rows);
            }
        }
    }
}
