//! Dense tile matrix and the queries the session runs against it.

use std::ops::ControlFlow;

use glam::Vec2;
use thiserror::Error;
use tilt_2048_animation::AnimatedProperty;
use tilt_2048_core::{Coordinate, Direction};

/// Errors raised by board lookups.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Error)]
pub enum BoardError {
    /// The position lies outside `[0, columns) x [0, rows)`.
    #[error("position {position} lies outside the {columns}x{rows} board")]
    OutOfBounds {
        /// Offending position.
        position: Coordinate,
        /// Number of columns of the board.
        columns: u32,
        /// Number of rows of the board.
        rows: u32,
    },
    /// A row passed to [`Board::from_rows`] differs in length from the first row.
    #[error("row {row} holds {found} cells, expected {expected}")]
    RaggedRows {
        /// Index of the offending row.
        row: usize,
        /// Length of the first row.
        expected: usize,
        /// Length of the offending row.
        found: usize,
    },
}

/// Single board cell.
///
/// A tile is identified by its slot. Values flow between slots during a
/// tilt; the animations describe how the value arrived in this slot.
#[derive(Clone, Debug, Default)]
pub struct Tile {
    value: u32,
    position: Option<AnimatedProperty>,
    scale: Option<AnimatedProperty>,
}

impl Tile {
    /// Power of two held by the tile, `0` when empty.
    #[must_use]
    pub const fn value(&self) -> u32 {
        self.value
    }

    /// Reports whether the cell holds no value.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.value == 0
    }

    /// Position tween attached by the most recent slide, if any.
    #[must_use]
    pub const fn position_animation(&self) -> Option<&AnimatedProperty> {
        self.position.as_ref()
    }

    /// Scale tween attached by the most recent merge or spawn, if any.
    #[must_use]
    pub const fn scale_animation(&self) -> Option<&AnimatedProperty> {
        self.scale.as_ref()
    }

    pub(crate) fn set_value(&mut self, value: u32) {
        self.value = value;
    }

    pub(crate) fn animate_position(&mut self, animation: AnimatedProperty) {
        self.position = Some(animation);
    }

    pub(crate) fn animate_scale(&mut self, animation: AnimatedProperty) {
        self.scale = Some(animation);
    }

    pub(crate) fn clear_animations(&mut self) {
        self.position = None;
        self.scale = None;
    }

    fn reset(&mut self) {
        self.value = 0;
        self.clear_animations();
    }
}

/// `columns x rows` matrix of tiles.
#[derive(Clone, Debug)]
pub struct Board {
    columns: u32,
    rows: u32,
    cells: Vec<Tile>,
}

impl Board {
    /// Creates an all-empty board.
    #[must_use]
    pub fn new(columns: u32, rows: u32) -> Self {
        let capacity_u64 = u64::from(columns) * u64::from(rows);
        let capacity = usize::try_from(capacity_u64).unwrap_or(0);
        Self {
            columns,
            rows,
            cells: vec![Tile::default(); capacity],
        }
    }

    /// Builds a board from row-major values, `rows[y][x]`.
    pub fn from_rows<R>(rows: &[R]) -> Result<Self, BoardError>
    where
        R: AsRef<[u32]>,
    {
        let expected = rows.first().map_or(0, |row| row.as_ref().len());
        let columns = u32::try_from(expected).unwrap_or(u32::MAX);
        let row_count = u32::try_from(rows.len()).unwrap_or(u32::MAX);
        let mut board = Self::new(columns, row_count);

        for (y, row) in rows.iter().enumerate() {
            let row = row.as_ref();
            if row.len() != expected {
                return Err(BoardError::RaggedRows {
                    row: y,
                    expected,
                    found: row.len(),
                });
            }
            for (x, &value) in row.iter().enumerate() {
                let index = y * expected + x;
                if let Some(tile) = board.cells.get_mut(index) {
                    tile.set_value(value);
                }
            }
        }

        Ok(board)
    }

    /// Number of columns.
    #[must_use]
    pub const fn columns(&self) -> u32 {
        self.columns
    }

    /// Number of rows.
    #[must_use]
    pub const fn rows(&self) -> u32 {
        self.rows
    }

    /// Pure bounds test.
    #[must_use]
    pub fn in_bounds(&self, position: Coordinate) -> bool {
        self.index(position).is_some()
    }

    /// Tile stored at `position`.
    pub fn tile_at(&self, position: Coordinate) -> Result<&Tile, BoardError> {
        self.index(position)
            .and_then(|index| self.cells.get(index))
            .ok_or(self.out_of_bounds(position))
    }

    /// Value stored at `position`.
    pub fn value_at(&self, position: Coordinate) -> Result<u32, BoardError> {
        self.tile_at(position).map(Tile::value)
    }

    /// Visits every cell once and stops as soon as the visitor breaks.
    ///
    /// `order_x` and `order_y` only matter by sign: non-negative walks the
    /// axis in ascending order, negative in descending order. Columns form
    /// the outer loop. Returns `false` when the visitor broke early.
    pub fn for_each_cell<F>(&self, mut visitor: F, order_x: i32, order_y: i32) -> bool
    where
        F: FnMut(Coordinate, &Tile) -> ControlFlow<()>,
    {
        for position in self.traversal(order_x, order_y) {
            let Ok(tile) = self.tile_at(position) else {
                continue;
            };
            if visitor(position, tile).is_break() {
                return false;
            }
        }
        true
    }

    /// Every position in the order used by [`Board::for_each_cell`].
    #[must_use]
    pub fn traversal(&self, order_x: i32, order_y: i32) -> Vec<Coordinate> {
        let xs = ordered_axis(self.columns, order_x);
        let ys = ordered_axis(self.rows, order_y);
        let mut positions = Vec::with_capacity(xs.len() * ys.len());
        for &x in &xs {
            for &y in &ys {
                positions.push(Coordinate::new(x, y));
            }
        }
        positions
    }

    /// Positions of every empty cell in ascending traversal order.
    #[must_use]
    pub fn empty_cells(&self) -> Vec<Coordinate> {
        let mut empty = Vec::new();
        let _ = self.for_each_cell(
            |position, tile| {
                if tile.is_empty() {
                    empty.push(position);
                }
                ControlFlow::Continue(())
            },
            1,
            1,
        );
        empty
    }

    /// In-bounds cardinal neighbours of `position`, in up, down, left, right order.
    #[must_use]
    pub fn neighbours(&self, position: Coordinate) -> Vec<&Tile> {
        Direction::CARDINALS
            .iter()
            .filter_map(|&direction| self.tile_at(position.step(direction)).ok())
            .collect()
    }

    /// Reports whether no tilt can change the board any more.
    ///
    /// True iff the board is full and no two cardinally adjacent cells hold
    /// the same value.
    #[must_use]
    pub fn is_losing_state(&self) -> bool {
        if !self.empty_cells().is_empty() {
            return false;
        }

        self.for_each_cell(
            |position, tile| {
                let mergeable = self
                    .neighbours(position)
                    .iter()
                    .any(|neighbour| neighbour.value() == tile.value());
                if mergeable {
                    ControlFlow::Break(())
                } else {
                    ControlFlow::Continue(())
                }
            },
            1,
            1,
        )
    }

    /// Sum of every tile value.
    #[must_use]
    pub fn score(&self) -> u64 {
        self.cells.iter().map(|tile| u64::from(tile.value())).sum()
    }

    /// Largest tile value, `0` on an empty board.
    #[must_use]
    pub fn max_tile_value(&self) -> u32 {
        self.cells.iter().map(Tile::value).max().unwrap_or(0)
    }

    /// Values laid out row by row, `rows[y][x]`.
    #[must_use]
    pub fn to_rows(&self) -> Vec<Vec<u32>> {
        let width = usize::try_from(self.columns).unwrap_or(0);
        if width == 0 {
            return Vec::new();
        }
        self.cells
            .chunks(width)
            .map(|row| row.iter().map(Tile::value).collect())
            .collect()
    }

    pub(crate) fn clear(&mut self) {
        self.cells.iter_mut().for_each(Tile::reset);
    }

    pub(crate) fn clear_animations(&mut self) {
        self.cells.iter_mut().for_each(Tile::clear_animations);
    }

    pub(crate) fn cell_count(&self) -> usize {
        self.cells.len()
    }

    pub(crate) fn tile_mut(&mut self, position: Coordinate) -> Result<&mut Tile, BoardError> {
        let error = self.out_of_bounds(position);
        self.index(position)
            .and_then(|index| self.cells.get_mut(index))
            .ok_or(error)
    }

    pub(crate) fn index(&self, position: Coordinate) -> Option<usize> {
        let column = u32::try_from(position.x()).ok()?;
        let row = u32::try_from(position.y()).ok()?;
        if column < self.columns && row < self.rows {
            let row = usize::try_from(row).ok()?;
            let column = usize::try_from(column).ok()?;
            let width = usize::try_from(self.columns).ok()?;
            Some(row * width + column)
        } else {
            None
        }
    }

    fn out_of_bounds(&self, position: Coordinate) -> BoardError {
        BoardError::OutOfBounds {
            position,
            columns: self.columns,
            rows: self.rows,
        }
    }
}

/// Cell position expressed in the floating point space animations use.
pub(crate) fn cell_center(position: Coordinate) -> Vec2 {
    Vec2::new(position.x() as f32, position.y() as f32)
}

fn ordered_axis(length: u32, order: i32) -> Vec<i32> {
    let mut axis: Vec<i32> = (0..length)
        .filter_map(|index| i32::try_from(index).ok())
        .collect();
    if order < 0 {
        axis.reverse();
    }
    axis
}
