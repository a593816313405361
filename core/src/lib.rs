#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Core contracts shared across the Tilt 2048 engine.
//!
//! This crate defines the message surface that connects adapters, the
//! authoritative world, and pure systems. Adapters submit [`Command`] values
//! describing desired mutations, the world executes those commands via its
//! `apply` entry point, and then reports [`Event`] values that adapters and
//! systems consume, either directly or through a [`Notifier`].

use std::{fmt, time::Duration};

use serde::{Deserialize, Serialize};

/// Canonical banner emitted when the experience boots.
pub const WELCOME_BANNER: &str = "Welcome to Tilt 2048.";

/// Default number of board columns.
pub const DEFAULT_COLUMNS: u32 = 4;

/// Default number of board rows.
pub const DEFAULT_ROWS: u32 = 4;

/// Default length of every tile transition.
pub const DEFAULT_ANIMATION_DURATION: Duration = Duration::from_millis(100);

/// Value written into a freshly spawned tile.
pub const SPAWN_VALUE: u32 = 2;

/// Commands that express all permissible world mutations.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Command {
    /// Clears the board and begins a new game. Acts as both start and restart.
    Start,
    /// Slides every tile toward the provided direction.
    Tilt {
        /// Direction the board is tilted toward. Must be cardinal.
        direction: Direction,
    },
    /// Flips the paused flag of an ongoing game.
    TogglePause,
    /// Advances the clock used to key tile animations.
    Tick {
        /// Duration of wall-clock time that elapsed since the previous tick.
        dt: Duration,
    },
}

/// Notifications reported by the world after processing commands.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Event {
    /// Announces that a fresh game began.
    GameStarted,
    /// Reports the outcome of an accepted tilt.
    AfterTilt {
        /// Whether any tile moved or merged.
        has_changed: bool,
    },
    /// Confirms that a new tile was placed on the board.
    TileSpawned {
        /// Cell that received the new tile.
        cell: Coordinate,
    },
    /// Announces that the paused flag flipped.
    PauseToggled {
        /// Paused flag after the flip.
        paused: bool,
    },
    /// Announces that the board reached a losing state.
    GameEnded {
        /// Sum of every tile value on the final board.
        score: u64,
        /// Largest tile value on the final board.
        max_tile_value: u32,
        /// Number of accepted tilts during the game.
        moves: u32,
    },
}

impl Event {
    /// Discriminant used to route the event to subscribers.
    #[must_use]
    pub const fn kind(&self) -> EventKind {
        match self {
            Self::GameStarted => EventKind::GameStarted,
            Self::AfterTilt { .. } => EventKind::AfterTilt,
            Self::TileSpawned { .. } => EventKind::TileSpawned,
            Self::PauseToggled { .. } => EventKind::PauseToggled,
            Self::GameEnded { .. } => EventKind::GameEnded,
        }
    }
}

/// Payload-free discriminant of [`Event`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum EventKind {
    /// Matches [`Event::GameStarted`].
    GameStarted,
    /// Matches [`Event::AfterTilt`].
    AfterTilt,
    /// Matches [`Event::TileSpawned`].
    TileSpawned,
    /// Matches [`Event::PauseToggled`].
    PauseToggled,
    /// Matches [`Event::GameEnded`].
    GameEnded,
}

/// Integer pair used both as a board position and as a unit movement vector.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Coordinate {
    x: i32,
    y: i32,
}

impl Coordinate {
    /// The origin, also the vector of [`Direction::Still`].
    pub const ZERO: Self = Self::new(0, 0);

    /// Creates a new coordinate.
    #[must_use]
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Zero-based column component.
    #[must_use]
    pub const fn x(&self) -> i32 {
        self.x
    }

    /// Zero-based row component.
    #[must_use]
    pub const fn y(&self) -> i32 {
        self.y
    }

    /// Returns the coordinate reached by moving one step in `direction`.
    #[must_use]
    pub const fn step(self, direction: Direction) -> Self {
        let vector = direction.vector();
        Self::new(
            self.x.saturating_add(vector.x),
            self.y.saturating_add(vector.y),
        )
    }
}

impl fmt::Display for Coordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// Movement vectors the board can be tilted along.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    /// Toward decreasing row indices.
    Up,
    /// Toward increasing row indices.
    Down,
    /// Toward decreasing column indices.
    Left,
    /// Toward increasing column indices.
    Right,
    /// The zero vector. Never a valid tilt.
    Still,
}

impl Direction {
    /// The four cardinal directions in neighbour lookup order.
    pub const CARDINALS: [Direction; 4] = [
        Direction::Up,
        Direction::Down,
        Direction::Left,
        Direction::Right,
    ];

    /// Unit vector associated with the direction.
    #[must_use]
    pub const fn vector(self) -> Coordinate {
        match self {
            Self::Up => Coordinate::new(0, -1),
            Self::Down => Coordinate::new(0, 1),
            Self::Left => Coordinate::new(-1, 0),
            Self::Right => Coordinate::new(1, 0),
            Self::Still => Coordinate::ZERO,
        }
    }

    /// Reports whether the direction is one of [`Direction::CARDINALS`].
    #[must_use]
    pub const fn is_cardinal(self) -> bool {
        !matches!(self, Self::Still)
    }
}

/// Lifecycle phase of a game session.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SessionPhase {
    /// No game has been started yet.
    NotStarted,
    /// Tilts are accepted.
    Running,
    /// A game is ongoing but tilts are ignored.
    Paused,
    /// The board reached a losing state. Only a restart leaves this phase.
    Ended,
}

/// Summary of a finished game.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameResult {
    /// Sum of every tile value on the final board.
    pub score: u64,
    /// Largest tile value on the final board.
    pub max_tile_value: u32,
    /// Number of accepted tilts during the game.
    pub moves: u32,
}

impl GameResult {
    /// Extracts the result carried by a [`Event::GameEnded`] notification.
    #[must_use]
    pub const fn from_event(event: &Event) -> Option<Self> {
        match *event {
            Event::GameEnded {
                score,
                max_tile_value,
                moves,
            } => Some(Self {
                score,
                max_tile_value,
                moves,
            }),
            _ => None,
        }
    }
}

/// Handle returned by [`Notifier::subscribe`], used to cancel a registration.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Subscription {
    kind: EventKind,
    id: u64,
}

impl Subscription {
    /// Event kind the registration listens to.
    #[must_use]
    pub const fn kind(&self) -> EventKind {
        self.kind
    }
}

type Handler = Box<dyn FnMut(&Event)>;

/// Observer registry routing events to handlers by [`EventKind`].
///
/// Handlers run synchronously, in registration order, on the thread that
/// calls [`Notifier::dispatch`].
#[derive(Default)]
pub struct Notifier {
    next_id: u64,
    handlers: Vec<(Subscription, Handler)>,
}

impl Notifier {
    /// Creates a notifier without any registrations.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers `handler` for every event of the provided kind.
    pub fn subscribe<F>(&mut self, kind: EventKind, handler: F) -> Subscription
    where
        F: FnMut(&Event) + 'static,
    {
        let subscription = Subscription {
            kind,
            id: self.next_id,
        };
        self.next_id = self.next_id.wrapping_add(1);
        self.handlers.push((subscription, Box::new(handler)));
        subscription
    }

    /// Removes a registration. Returns `false` when it was already gone.
    pub fn unsubscribe(&mut self, subscription: Subscription) -> bool {
        let before = self.handlers.len();
        self.handlers.retain(|(candidate, _)| *candidate != subscription);
        self.handlers.len() != before
    }

    /// Number of live registrations for `kind`.
    #[must_use]
    pub fn subscriber_count(&self, kind: EventKind) -> usize {
        self.handlers
            .iter()
            .filter(|(subscription, _)| subscription.kind == kind)
            .count()
    }

    /// Delivers every event, in order, to the handlers registered for its kind.
    pub fn dispatch(&mut self, events: &[Event]) {
        for event in events {
            let kind = event.kind();
            for (subscription, handler) in self.handlers.iter_mut() {
                if subscription.kind == kind {
                    handler(event);
                }
            }
        }
    }
}

impl fmt::Debug for Notifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Notifier")
            .field("next_id", &self.next_id)
            .field("registrations", &self.handlers.len())
            .finish()
    }
}
