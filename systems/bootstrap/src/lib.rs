#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Pure bootstrap system that prepares the Tiger Run experience.

use tiger_run_core::Command;
use tiger_run_world::{query, MazeLayout, World};

/// Controls shown to the player next to the welcome banner.
pub const INSTRUCTIONS: &str =
    "Arrow keys move the tiger. Collect every dollar and carry them to the bank before the monkey steals them. Enter restarts, Esc quits.";

/// Produces data required to greet the player and open a session.
#[derive(Debug, Default)]
pub struct Bootstrap;

impl Bootstrap {
    /// Derives the banner that should be shown when the experience starts.
    #[must_use]
    pub fn welcome_banner<'world>(&self, world: &'world World) -> &'world str {
        query::welcome_banner(world)
    }

    /// Exposes the maze the session will be played on.
    #[must_use]
    pub fn maze<'world>(&self, world: &'world World) -> &'world MazeLayout {
        query::maze(world)
    }

    /// Commands that configure the world before the player presses start.
    #[must_use]
    pub fn configure_commands(&self, monkey_pace: u32) -> Vec<Command> {
        vec![Command::ConfigureMonkeyPace {
            moves_per_step: monkey_pace,
        }]
    }

    /// Commands that configure the world and start the first session immediately.
    #[must_use]
    pub fn opening_commands(&self, monkey_pace: u32) -> Vec<Command> {
        let mut commands = self.configure_commands(monkey_pace);
        commands.push(Command::StartGame);
        commands
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tiger_run_core::{GamePhase, WELCOME_BANNER};
    use tiger_run_world as world;

    #[test]
    fn greets_with_world_banner() {
        let world = World::new();
        assert_eq!(Bootstrap.welcome_banner(&world), WELCOME_BANNER);
        assert_eq!(Bootstrap.maze(&world).columns(), 15);
    }

    #[test]
    fn opening_commands_start_play_with_requested_pace() {
        let mut world = World::new();
        let mut events = Vec::new();
        for command in Bootstrap.opening_commands(5) {
            world::apply(&mut world, command, &mut events);
        }

        assert_eq!(query::phase(&world), GamePhase::Playing);
        assert_eq!(query::monkey_pace(&world), 5);
    }

    #[test]
    fn configure_commands_leave_world_waiting() {
        let mut world = World::new();
        let mut events = Vec::new();
        for command in Bootstrap.configure_commands(0) {
            world::apply(&mut world, command, &mut events);
        }

        assert_eq!(query::phase(&world), GamePhase::NotStarted);
        assert_eq!(query::monkey_pace(&world), 0);
    }
}
