//! Random placement of new tiles.

use std::{fmt, time::Duration};

use rand::Rng;
use rand_chacha::ChaCha8Rng;
use tilt_2048_animation::{ease_out_quad, AnimatedProperty, AnimatedValue, AnimationStep};
use tilt_2048_core::{Coordinate, SPAWN_VALUE};

use crate::board::Board;

/// Uniform index generator used to choose spawn cells.
pub trait RandomSource: fmt::Debug {
    /// Returns an index in `0..upper`. Callers guarantee `upper > 0`.
    fn next_index(&mut self, upper: usize) -> usize;
}

impl RandomSource for ChaCha8Rng {
    fn next_index(&mut self, upper: usize) -> usize {
        self.gen_range(0..upper)
    }
}

/// Writes a [`SPAWN_VALUE`] tile into a uniformly chosen empty cell.
///
/// The new tile grows from nothing to full size over `duration`, starting at
/// `now`. Returns the chosen cell, or `None` when the board is full.
pub fn spawn_random_tile<R>(
    board: &mut Board,
    rng: &mut R,
    now: Duration,
    duration: Duration,
) -> Option<Coordinate>
where
    R: RandomSource + ?Sized,
{
    let empty = board.empty_cells();
    if empty.is_empty() {
        return None;
    }

    let cell = empty[rng.next_index(empty.len()) % empty.len()];
    let tile = board.tile_mut(cell).ok()?;
    tile.set_value(SPAWN_VALUE);
    tile.animate_scale(AnimatedProperty::with_easing(
        AnimationStep::new(AnimatedValue::Scalar(0.0), now),
        AnimationStep::new(AnimatedValue::Scalar(1.0), now.saturating_add(duration)),
        ease_out_quad,
    ));
    log::trace!("spawned {SPAWN_VALUE} at {cell}");
    Some(cell)
}
