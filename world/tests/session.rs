use std::{collections::VecDeque, time::Duration};

use tilt_2048_core::{Command, Coordinate, Direction, Event, SessionPhase};
use tilt_2048_world::{self as world, query, RandomSource, World, WorldConfig};

/// Replays a fixed list of spawn indices, falling back to the first empty cell.
#[derive(Debug, Default)]
struct Scripted(VecDeque<usize>);

impl Scripted {
    fn boxed(indices: &[usize]) -> Box<dyn RandomSource> {
        Box::new(Self(indices.iter().copied().collect()))
    }
}

impl RandomSource for Scripted {
    fn next_index(&mut self, upper: usize) -> usize {
        self.0.pop_front().unwrap_or(0) % upper
    }
}

fn run(world: &mut World, command: Command) -> Vec<Event> {
    let mut events = Vec::new();
    world::apply(world, command, &mut events);
    events
}

fn tilt(direction: Direction) -> Command {
    Command::Tilt { direction }
}

fn occupied(world: &World) -> Vec<u32> {
    query::board(world)
        .to_rows()
        .into_iter()
        .flatten()
        .filter(|&value| value != 0)
        .collect()
}

#[test]
fn start_places_a_single_two_on_a_fresh_board() {
    let mut world = World::new(WorldConfig::default());
    assert_eq!(query::phase(&world), SessionPhase::NotStarted);
    assert!(!query::is_ongoing(&world));

    let events = run(&mut world, Command::Start);

    assert_eq!(occupied(&world), vec![2]);
    assert_eq!(query::moves(&world), 0);
    assert!(query::is_ongoing(&world));
    assert!(!query::is_paused(&world));
    assert_eq!(events.len(), 2);
    assert!(matches!(events[0], Event::TileSpawned { .. }));
    assert_eq!(events[1], Event::GameStarted);
}

#[test]
fn start_reports_the_spawned_cell() {
    let mut world = World::with_random_source(WorldConfig::default(), Scripted::boxed(&[1]));
    let events = run(&mut world, Command::Start);

    let cell = Coordinate::new(0, 1);
    assert_eq!(events[0], Event::TileSpawned { cell });
    assert_eq!(query::value_at(&world, cell), Ok(2));
}

#[test]
fn no_op_tilt_counts_as_a_move_without_spawning() {
    let mut world = World::with_random_source(WorldConfig::default(), Scripted::boxed(&[0]));
    let _ = run(&mut world, Command::Start);
    let before = query::board(&world).to_rows();

    let events = run(&mut world, tilt(Direction::Left));

    assert_eq!(events, vec![Event::AfterTilt { has_changed: false }]);
    assert_eq!(query::board(&world).to_rows(), before);
    assert_eq!(query::moves(&world), 1);
    assert_eq!(query::last_direction(&world), Direction::Left);
}

#[test]
fn successful_tilt_spawns_after_reporting_the_change() {
    let mut world = World::with_random_source(WorldConfig::default(), Scripted::boxed(&[0, 0]));
    let _ = run(&mut world, Command::Start);

    let events = run(&mut world, tilt(Direction::Right));

    assert_eq!(
        events,
        vec![
            Event::AfterTilt { has_changed: true },
            Event::TileSpawned {
                cell: Coordinate::new(0, 0)
            },
        ]
    );
    assert_eq!(query::value_at(&world, Coordinate::new(3, 0)), Ok(2));
    assert_eq!(query::value_at(&world, Coordinate::new(0, 0)), Ok(2));
    assert_eq!(query::moves(&world), 1);
}

#[test]
fn tilts_before_start_are_ignored() {
    let mut world = World::new(WorldConfig::default());
    let events = run(&mut world, tilt(Direction::Up));

    assert!(events.is_empty());
    assert_eq!(query::moves(&world), 0);
    assert_eq!(query::score(&world), 0);
}

#[test]
fn pause_suspends_tilts_until_resumed() {
    let mut world = World::with_random_source(WorldConfig::default(), Scripted::boxed(&[0, 0]));
    let _ = run(&mut world, Command::Start);

    assert_eq!(
        run(&mut world, Command::TogglePause),
        vec![Event::PauseToggled { paused: true }]
    );
    assert_eq!(query::phase(&world), SessionPhase::Paused);
    assert!(query::is_ongoing(&world));
    assert!(run(&mut world, tilt(Direction::Right)).is_empty());
    assert_eq!(query::moves(&world), 0);

    assert_eq!(
        run(&mut world, Command::TogglePause),
        vec![Event::PauseToggled { paused: false }]
    );
    let events = run(&mut world, tilt(Direction::Right));
    assert_eq!(events[0], Event::AfterTilt { has_changed: true });
}

#[test]
fn toggle_pause_requires_an_ongoing_game() {
    let mut world = World::new(WorldConfig::default());
    assert!(run(&mut world, Command::TogglePause).is_empty());
    assert_eq!(query::phase(&world), SessionPhase::NotStarted);
}

#[test]
fn still_tilt_is_ignored() {
    let mut world = World::new(WorldConfig::default());
    let _ = run(&mut world, Command::Start);

    assert!(run(&mut world, tilt(Direction::Still)).is_empty());
    assert_eq!(query::moves(&world), 0);
}

#[test]
fn narrow_board_reaches_a_losing_state() {
    let config = WorldConfig::new(2, 1);
    let mut world = World::with_random_source(config, Scripted::boxed(&[0, 0, 0]));
    let _ = run(&mut world, Command::Start);

    let events = run(&mut world, tilt(Direction::Right));
    assert_eq!(query::board(&world).to_rows(), vec![vec![2, 2]]);
    assert_eq!(events.len(), 2, "board with a pair is still playable");

    let events = run(&mut world, tilt(Direction::Right));
    assert_eq!(query::board(&world).to_rows(), vec![vec![2, 4]]);
    assert_eq!(
        events,
        vec![
            Event::AfterTilt { has_changed: true },
            Event::TileSpawned {
                cell: Coordinate::new(0, 0)
            },
            Event::GameEnded {
                score: 6,
                max_tile_value: 4,
                moves: 2,
            },
        ]
    );
    assert_eq!(query::phase(&world), SessionPhase::Ended);
    assert!(run(&mut world, tilt(Direction::Left)).is_empty());
    assert!(run(&mut world, Command::TogglePause).is_empty());
}

#[test]
fn restart_resets_the_session() {
    let config = WorldConfig::new(2, 1);
    let mut world = World::with_random_source(config, Scripted::boxed(&[0, 0, 0, 1]));
    let _ = run(&mut world, Command::Start);
    let _ = run(&mut world, tilt(Direction::Right));
    let _ = run(&mut world, tilt(Direction::Right));
    assert_eq!(query::phase(&world), SessionPhase::Ended);

    let events = run(&mut world, Command::Start);

    assert_eq!(events.last(), Some(&Event::GameStarted));
    assert_eq!(query::board(&world).to_rows(), vec![vec![0, 2]]);
    assert_eq!(query::moves(&world), 0);
    assert_eq!(query::last_direction(&world), Direction::Still);
    assert_eq!(query::phase(&world), SessionPhase::Running);
}

#[test]
fn restart_clears_the_paused_flag() {
    let mut world = World::new(WorldConfig::default());
    let _ = run(&mut world, Command::Start);
    let _ = run(&mut world, Command::TogglePause);

    let _ = run(&mut world, Command::Start);
    assert!(!query::is_paused(&world));
}

#[test]
fn ticks_drive_tile_snapshots() {
    let config = WorldConfig::default().with_animation_duration(Duration::from_millis(100));
    let mut world = World::with_random_source(config, Scripted::boxed(&[0, 0]));
    let _ = run(&mut world, Command::Start);

    let spawned = query::tile_snapshot(&world, Coordinate::new(0, 0)).expect("in bounds");
    assert_eq!(spawned.value, 2);
    assert_eq!(spawned.scale, 0.0);

    let _ = run(
        &mut world,
        Command::Tick {
            dt: Duration::from_millis(100),
        },
    );
    assert_eq!(query::clock(&world), Duration::from_millis(100));
    let grown = query::tile_snapshot(&world, Coordinate::new(0, 0)).expect("in bounds");
    assert_eq!(grown.scale, 1.0);

    let _ = run(&mut world, tilt(Direction::Right));
    let _ = run(
        &mut world,
        Command::Tick {
            dt: Duration::from_millis(50),
        },
    );
    let moving = query::tile_snapshot(&world, Coordinate::new(3, 0)).expect("in bounds");
    assert_eq!(moving.value, 2);
    assert!((moving.position.x - 1.5).abs() < 1e-5, "{moving:?}");
    assert_eq!(moving.position.y, 0.0);

    let snapshots = query::tile_snapshots(&world).expect("animations evaluate");
    assert_eq!(snapshots.len(), 2);
    assert!(snapshots.iter().all(|snapshot| snapshot.value == 2));
}

#[test]
fn snapshot_outside_the_board_is_an_error() {
    let world = World::new(WorldConfig::default());
    assert!(query::tile_snapshot(&world, Coordinate::new(4, 0)).is_err());
    assert!(query::value_at(&world, Coordinate::new(-1, 0)).is_err());
}

#[test]
fn configuration_is_exposed_through_queries() {
    let config = WorldConfig::new(0, 3).with_seed(9);
    let world = World::new(config);

    assert_eq!(query::dimensions(&world), (1, 3));
    assert_eq!(query::config(&world).seed(), 9);
    assert_eq!(query::welcome_banner(&world), "Welcome to Tilt 2048.");
}
