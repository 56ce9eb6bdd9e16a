//! Property-based tests for the movement, scoring, and phase rules.

use proptest::prelude::*;

use tiger_run_core::{Command, Direction, DollarState, Event, GamePhase, DOLLAR_VALUE};
use tiger_run_world::{self as world, query, World};

#[derive(Clone, Debug)]
enum Action {
    Move(Direction),
    AcknowledgeAll,
    Restart,
}

fn direction() -> impl Strategy<Value = Direction> {
    prop_oneof![
        Just(Direction::Up),
        Just(Direction::Down),
        Just(Direction::Left),
        Just(Direction::Right),
    ]
}

fn action() -> impl Strategy<Value = Action> {
    prop_oneof![
        16 => direction().prop_map(Action::Move),
        3 => Just(Action::AcknowledgeAll),
        1 => Just(Action::Restart),
    ]
}

fn picked_up_value(world: &World) -> u32 {
    let picked_up = query::dollars(world)
        .iter()
        .filter(|dollar| dollar.state != DollarState::Active)
        .count();
    u32::try_from(picked_up).expect("dollar count fits in u32") * DOLLAR_VALUE
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(256))]

    /// Value is only ever moved between carried, banked, and stolen totals.
    #[test]
    fn prop_value_is_conserved(
        pace in 0u32..4,
        actions in prop::collection::vec(action(), 0..300)
    ) {
        let mut world = World::new();
        let mut events = Vec::new();
        world::apply(&mut world, Command::ConfigureMonkeyPace { moves_per_step: pace }, &mut events);
        world::apply(&mut world, Command::StartGame, &mut events);

        for action in actions {
            let mut events = Vec::new();
            match action {
                Action::Move(direction) => {
                    world::apply(&mut world, Command::MoveTiger { direction }, &mut events);
                }
                Action::AcknowledgeAll => {
                    for dollar in query::dollars(&world) {
                        world::apply(
                            &mut world,
                            Command::AcknowledgeCollected { dollar: dollar.id },
                            &mut events,
                        );
                    }
                }
                Action::Restart => world::apply(&mut world, Command::StartGame, &mut events),
            }

            prop_assert_eq!(query::scores(&world).total(), picked_up_value(&world));
        }
    }

    /// Walls and edges never let the tiger through, and the monkey never stands on a wall.
    #[test]
    fn prop_blocked_moves_keep_position(
        pace in 0u32..4,
        directions in prop::collection::vec(direction(), 1..300)
    ) {
        let mut world = World::new();
        let mut events = Vec::new();
        world::apply(&mut world, Command::ConfigureMonkeyPace { moves_per_step: pace }, &mut events);
        world::apply(&mut world, Command::StartGame, &mut events);
        let maze = query::maze(&world).clone();

        for direction in directions {
            let before = query::tiger(&world).cell;
            let blocked = before
                .neighbor(direction, maze.columns(), maze.rows())
                .map_or(true, |cell| !maze.is_walkable(cell));

            let mut events = Vec::new();
            world::apply(&mut world, Command::MoveTiger { direction }, &mut events);

            if blocked {
                prop_assert_eq!(query::tiger(&world).cell, before);
            }
            prop_assert_eq!(query::tiger(&world).facing, direction);
            prop_assert!(maze.is_walkable(query::tiger(&world).cell));
            if let Some(monkey) = query::monkey(&world) {
                prop_assert!(maze.is_walkable(monkey));
            }
        }
    }

    /// Captures always send both actors home and empty the tiger's pockets.
    #[test]
    fn prop_capture_resets_positions(
        directions in prop::collection::vec(direction(), 1..400)
    ) {
        let mut world = World::new();
        let mut events = Vec::new();
        world::apply(&mut world, Command::ConfigureMonkeyPace { moves_per_step: 1 }, &mut events);
        world::apply(&mut world, Command::StartGame, &mut events);
        let start = query::maze(&world).start();
        let spawn = query::maze(&world).monkey_spawn();

        for direction in directions {
            let banked_before = query::scores(&world).banked;
            let carried_before = query::scores(&world).carried;

            let mut events = Vec::new();
            world::apply(&mut world, Command::MoveTiger { direction }, &mut events);

            if events.iter().any(|event| matches!(event, Event::TigerCaught { .. })) {
                prop_assert_eq!(query::tiger(&world).cell, start);
                prop_assert_eq!(query::monkey(&world), spawn);
                prop_assert_eq!(query::scores(&world).carried, 0);
            }
            if carried_before == 0 {
                prop_assert_eq!(query::scores(&world).banked, banked_before);
            }
            prop_assert!(query::scores(&world).banked >= banked_before);
        }
    }

    /// Once every dollar is cleared the phase stays won until a restart.
    #[test]
    fn prop_win_is_sticky(
        directions in prop::collection::vec(direction(), 0..40)
    ) {
        let mut world = World::with_layout("SDD.B").expect("valid layout");
        let mut events = Vec::new();
        world::apply(&mut world, Command::StartGame, &mut events);
        for _ in 0..2 {
            world::apply(&mut world, Command::MoveTiger { direction: Direction::Right }, &mut events);
        }
        for dollar in query::dollars(&world) {
            world::apply(&mut world, Command::AcknowledgeCollected { dollar: dollar.id }, &mut events);
        }
        prop_assert_eq!(query::phase(&world), GamePhase::Won);

        for direction in directions {
            world::apply(&mut world, Command::MoveTiger { direction }, &mut events);
            world::apply(&mut world, Command::SettleTiger, &mut events);
            prop_assert_eq!(query::phase(&world), GamePhase::Won);
        }

        world::apply(&mut world, Command::StartGame, &mut events);
        prop_assert_eq!(query::phase(&world), GamePhase::Playing);
    }
}
