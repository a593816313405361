#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Authoritative game session state for Tilt 2048.

use std::time::Duration;

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use thiserror::Error;
use tilt_2048_animation::AnimationError;
use tilt_2048_core::{
    Command, Coordinate, Direction, Event, SessionPhase, DEFAULT_ANIMATION_DURATION,
    DEFAULT_COLUMNS, DEFAULT_ROWS, WELCOME_BANNER,
};

mod board;
mod slide;
mod spawn;

pub use board::{Board, BoardError, Tile};
pub use slide::slide;
pub use spawn::{spawn_random_tile, RandomSource};

const DEFAULT_SEED: u64 = 0x2048_5eed_c0ff_ee00;

/// Errors surfaced by world queries.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Error)]
pub enum WorldError {
    /// A lookup addressed a cell outside the board.
    #[error(transparent)]
    Board(#[from] BoardError),
    /// A tile animation could not be evaluated.
    #[error(transparent)]
    Animation(#[from] AnimationError),
}

/// Parameters fixed for the lifetime of a world.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct WorldConfig {
    columns: u32,
    rows: u32,
    animation_duration: Duration,
    seed: u64,
}

impl WorldConfig {
    /// Creates a configuration for a board of the provided size.
    ///
    /// Both dimensions are raised to at least one cell.
    #[must_use]
    pub fn new(columns: u32, rows: u32) -> Self {
        Self {
            columns: columns.max(1),
            rows: rows.max(1),
            animation_duration: DEFAULT_ANIMATION_DURATION,
            seed: DEFAULT_SEED,
        }
    }

    /// Overrides the length of tile transitions.
    #[must_use]
    pub const fn with_animation_duration(mut self, animation_duration: Duration) -> Self {
        self.animation_duration = animation_duration;
        self
    }

    /// Overrides the seed of the spawn generator.
    #[must_use]
    pub const fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Number of board columns.
    #[must_use]
    pub const fn columns(&self) -> u32 {
        self.columns
    }

    /// Number of board rows.
    #[must_use]
    pub const fn rows(&self) -> u32 {
        self.rows
    }

    /// Length of every tile transition.
    #[must_use]
    pub const fn animation_duration(&self) -> Duration {
        self.animation_duration
    }

    /// Seed of the spawn generator.
    #[must_use]
    pub const fn seed(&self) -> u64 {
        self.seed
    }
}

impl Default for WorldConfig {
    fn default() -> Self {
        Self::new(DEFAULT_COLUMNS, DEFAULT_ROWS)
    }
}

/// Represents the authoritative Tilt 2048 session state.
#[derive(Debug)]
pub struct World {
    banner: &'static str,
    config: WorldConfig,
    board: Board,
    rng: Box<dyn RandomSource>,
    clock: Duration,
    moves: u32,
    phase: SessionPhase,
    last_direction: Direction,
}

impl World {
    /// Creates a world whose spawns are driven by a generator seeded from `config`.
    #[must_use]
    pub fn new(config: WorldConfig) -> Self {
        let rng = ChaCha8Rng::seed_from_u64(config.seed());
        Self::with_random_source(config, Box::new(rng))
    }

    /// Creates a world that draws spawn cells from the provided source.
    #[must_use]
    pub fn with_random_source(config: WorldConfig, rng: Box<dyn RandomSource>) -> Self {
        Self {
            banner: WELCOME_BANNER,
            board: Board::new(config.columns(), config.rows()),
            config,
            rng,
            clock: Duration::ZERO,
            moves: 0,
            phase: SessionPhase::NotStarted,
            last_direction: Direction::Still,
        }
    }

    fn start(&mut self, out_events: &mut Vec<Event>) {
        self.moves = 0;
        self.last_direction = Direction::Still;
        self.board.clear();
        let spawned = self.spawn();
        self.phase = SessionPhase::Running;

        if let Some(cell) = spawned {
            out_events.push(Event::TileSpawned { cell });
        }
        out_events.push(Event::GameStarted);
        log::info!(
            "game started on a {}x{} board",
            self.board.columns(),
            self.board.rows()
        );
    }

    fn tilt(&mut self, direction: Direction, out_events: &mut Vec<Event>) {
        if !direction.is_cardinal() {
            log::warn!("ignoring tilt toward {direction:?}");
            return;
        }
        if self.phase != SessionPhase::Running {
            log::debug!("tilt {direction:?} ignored while not running");
            return;
        }

        let has_changed = slide(
            &mut self.board,
            direction,
            self.clock,
            self.config.animation_duration(),
        );
        self.last_direction = direction;
        self.moves = self.moves.saturating_add(1);
        out_events.push(Event::AfterTilt { has_changed });
        log::debug!(
            "tilt {direction:?}: changed={has_changed} moves={}",
            self.moves
        );

        if !has_changed {
            return;
        }

        if let Some(cell) = self.spawn() {
            out_events.push(Event::TileSpawned { cell });
        }

        if self.board.is_losing_state() {
            self.phase = SessionPhase::Ended;
            let score = self.board.score();
            let max_tile_value = self.board.max_tile_value();
            log::info!(
                "game ended: score={score} max={max_tile_value} moves={}",
                self.moves
            );
            out_events.push(Event::GameEnded {
                score,
                max_tile_value,
                moves: self.moves,
            });
        }
    }

    fn toggle_pause(&mut self, out_events: &mut Vec<Event>) {
        self.phase = match self.phase {
            SessionPhase::Running => SessionPhase::Paused,
            SessionPhase::Paused => SessionPhase::Running,
            SessionPhase::NotStarted | SessionPhase::Ended => return,
        };
        out_events.push(Event::PauseToggled {
            paused: self.phase == SessionPhase::Paused,
        });
    }

    fn spawn(&mut self) -> Option<Coordinate> {
        spawn_random_tile(
            &mut self.board,
            self.rng.as_mut(),
            self.clock,
            self.config.animation_duration(),
        )
    }
}

/// Applies the provided command to the world, mutating state deterministically.
pub fn apply(world: &mut World, command: Command, out_events: &mut Vec<Event>) {
    match command {
        Command::Start => world.start(out_events),
        Command::Tilt { direction } => world.tilt(direction, out_events),
        Command::TogglePause => world.toggle_pause(out_events),
        Command::Tick { dt } => {
            world.clock = world.clock.saturating_add(dt);
        }
    }
}

/// Query functions that provide read-only access to the world state.
pub mod query {
    use std::time::Duration;

    use glam::Vec2;
    use tilt_2048_core::{Coordinate, Direction, SessionPhase};

    use super::{board::cell_center, Board, BoardError, World, WorldConfig, WorldError};

    /// Retrieves the welcome banner that adapters may display to players.
    #[must_use]
    pub fn welcome_banner(world: &World) -> &'static str {
        world.banner
    }

    /// Configuration the world was created with.
    #[must_use]
    pub fn config(world: &World) -> WorldConfig {
        world.config
    }

    /// Provides read-only access to the board.
    #[must_use]
    pub fn board(world: &World) -> &Board {
        &world.board
    }

    /// Board dimensions as `(columns, rows)`.
    #[must_use]
    pub fn dimensions(world: &World) -> (u32, u32) {
        (world.board.columns(), world.board.rows())
    }

    /// Value stored at `cell`.
    pub fn value_at(world: &World, cell: Coordinate) -> Result<u32, BoardError> {
        world.board.value_at(cell)
    }

    /// Current lifecycle phase.
    #[must_use]
    pub fn phase(world: &World) -> SessionPhase {
        world.phase
    }

    /// Whether a game is in progress, paused or not.
    #[must_use]
    pub fn is_ongoing(world: &World) -> bool {
        matches!(world.phase, SessionPhase::Running | SessionPhase::Paused)
    }

    /// Whether tilts are currently suspended by a pause.
    #[must_use]
    pub fn is_paused(world: &World) -> bool {
        world.phase == SessionPhase::Paused
    }

    /// Number of accepted tilts since the last start.
    #[must_use]
    pub fn moves(world: &World) -> u32 {
        world.moves
    }

    /// Sum of every tile value.
    #[must_use]
    pub fn score(world: &World) -> u64 {
        world.board.score()
    }

    /// Largest tile value, `0` on an empty board.
    #[must_use]
    pub fn max_tile_value(world: &World) -> u32 {
        world.board.max_tile_value()
    }

    /// Direction of the most recent accepted tilt, [`Direction::Still`] after a start.
    #[must_use]
    pub fn last_direction(world: &World) -> Direction {
        world.last_direction
    }

    /// Instant animations are sampled at.
    #[must_use]
    pub fn clock(world: &World) -> Duration {
        world.clock
    }

    /// Presentation state of the tile at `cell`, sampled at the world clock.
    ///
    /// Cells without a running animation report their own position and a
    /// scale of `1.0`.
    pub fn tile_snapshot(world: &World, cell: Coordinate) -> Result<TileSnapshot, WorldError> {
        let tile = world.board.tile_at(cell)?;
        let position = match tile.position_animation() {
            Some(animation) => animation.position_at(world.clock)?,
            None => cell_center(cell),
        };
        let scale = match tile.scale_animation() {
            Some(animation) => animation.scalar_at(world.clock)?,
            None => 1.0,
        };

        Ok(TileSnapshot {
            cell,
            value: tile.value(),
            position,
            scale,
        })
    }

    /// Presentation state of every occupied cell in ascending traversal order.
    pub fn tile_snapshots(world: &World) -> Result<Vec<TileSnapshot>, WorldError> {
        world
            .board
            .traversal(1, 1)
            .into_iter()
            .filter(|&cell| world.board.value_at(cell).map_or(false, |value| value != 0))
            .map(|cell| tile_snapshot(world, cell))
            .collect()
    }

    /// Immutable representation of a single tile used for rendering.
    #[derive(Clone, Copy, Debug, PartialEq)]
    pub struct TileSnapshot {
        /// Slot the value lives in.
        pub cell: Coordinate,
        /// Power of two held by the slot, `0` when empty.
        pub value: u32,
        /// Animated position expressed in cell units.
        pub position: Vec2,
        /// Animated scale factor, `1.0` at rest.
        pub scale: f32,
    }
}
