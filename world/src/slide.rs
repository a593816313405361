//! Directional sweep that relocates and merges tiles.

use std::time::Duration;

use tilt_2048_animation::{AnimatedProperty, AnimatedValue};
use tilt_2048_core::{Coordinate, Direction};

use crate::board::{cell_center, Board};

/// Scale a freshly merged tile starts from before settling back to `1.0`.
const MERGE_POP_SCALE: f32 = 1.2;

/// Slides every tile of `board` as far as possible toward `direction`.
///
/// Cells are swept starting from the edge the tiles move toward, so every
/// tile meets already-settled neighbours. A tile merges into the next cell
/// when the values match and that cell was not itself produced by a merge
/// during this sweep. Moved tiles receive a position tween starting at `now`
/// and lasting `duration`; merged tiles also receive a scale pop.
///
/// Returns whether any tile moved. A [`Direction::Still`] tilt never does.
pub fn slide(board: &mut Board, direction: Direction, now: Duration, duration: Duration) -> bool {
    if !direction.is_cardinal() {
        return false;
    }

    board.clear_animations();

    let vector = direction.vector();
    let mut merged = vec![false; board.cell_count()];
    let mut has_changed = false;

    for origin in board.traversal(-vector.x(), -vector.y()) {
        let value = match board.value_at(origin) {
            Ok(0) | Err(_) => continue,
            Ok(value) => value,
        };

        let slide_target = furthest_empty(board, origin, direction);
        let next = slide_target.step(direction);
        let merge_index = board.index(next).filter(|&index| {
            !merged[index] && board.value_at(next).map_or(false, |found| found == value)
        });

        let (destination, new_value) = match merge_index {
            Some(index) => {
                merged[index] = true;
                (next, value.saturating_mul(2))
            }
            None => (slide_target, value),
        };

        if destination == origin {
            continue;
        }

        if let Ok(tile) = board.tile_mut(origin) {
            tile.set_value(0);
            tile.clear_animations();
        }
        if let Ok(tile) = board.tile_mut(destination) {
            tile.set_value(new_value);
            tile.animate_position(AnimatedProperty::tween(
                AnimatedValue::Position(cell_center(origin)),
                AnimatedValue::Position(cell_center(destination)),
                now,
                duration,
            ));
            if merge_index.is_some() {
                tile.animate_scale(AnimatedProperty::tween(
                    AnimatedValue::Scalar(MERGE_POP_SCALE),
                    AnimatedValue::Scalar(1.0),
                    now,
                    duration,
                ));
            }
        }
        has_changed = true;
    }

    has_changed
}

/// Last empty cell reached walking from `origin` along `direction`.
fn furthest_empty(board: &Board, origin: Coordinate, direction: Direction) -> Coordinate {
    let mut target = origin;
    let mut next = origin.step(direction);
    while board.value_at(next) == Ok(0) {
        target = next;
        next = next.step(direction);
    }
    target
}
