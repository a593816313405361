#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Pure bootstrap system that prepares a Tilt 2048 session.

use tilt_2048_core::Command;
use tilt_2048_world::{query, Board, World};

/// Produces data required to greet the player and open the first game.
#[derive(Debug, Default)]
pub struct Bootstrap;

impl Bootstrap {
    /// Derives the banner that should be shown when the experience starts.
    #[must_use]
    pub fn welcome_banner(&self, world: &World) -> &'static str {
        query::welcome_banner(world)
    }

    /// Exposes the board required for the first render.
    #[must_use]
    pub fn board<'world>(&self, world: &'world World) -> &'world Board {
        query::board(world)
    }

    /// Commands that open a session on a world that has not started yet.
    ///
    /// Returns nothing once a game is under way so a resumed adapter does
    /// not wipe the board.
    #[must_use]
    pub fn opening_commands(&self, world: &World) -> Vec<Command> {
        if query::is_ongoing(world) {
            Vec::new()
        } else {
            vec![Command::Start]
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tilt_2048_world::{self as world, WorldConfig};

    #[test]
    fn banner_matches_world_query() {
        let world = World::new(WorldConfig::default());
        let bootstrap = Bootstrap;

        assert_eq!(
            bootstrap.welcome_banner(&world),
            query::welcome_banner(&world)
        );
    }

    #[test]
    fn opening_commands_start_a_fresh_world_only() {
        let mut world = World::new(WorldConfig::default());
        let bootstrap = Bootstrap;

        let commands = bootstrap.opening_commands(&world);
        assert_eq!(commands, vec![Command::Start]);

        let mut events = Vec::new();
        for command in commands {
            world::apply(&mut world, command, &mut events);
        }
        assert!(bootstrap.opening_commands(&world).is_empty());
        assert_eq!(bootstrap.board(&world).empty_cells().len(), 15);
    }
}
