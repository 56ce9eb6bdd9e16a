use tiger_run_core::{Command, Direction, DOLLAR_VALUE};
use tiger_run_system_ledger::Ledger;
use tiger_run_world::{self as world, query, World};

fn run(world: &mut World, ledger: &mut Ledger, commands: &[Command]) {
    for command in commands {
        let mut events = Vec::new();
        world::apply(world, command.clone(), &mut events);
        ledger.handle(&events);
    }
}

fn moves(directions: &[Direction]) -> Vec<Command> {
    directions
        .iter()
        .map(|&direction| Command::MoveTiger { direction })
        .collect()
}

#[test]
fn ledger_agrees_with_world_scores() {
    let mut world = World::with_layout("B.SD\n....\n...M").expect("valid layout");
    let mut ledger = Ledger::new();
    let mut commands = vec![
        Command::ConfigureMonkeyPace { moves_per_step: 0 },
        Command::StartGame,
    ];
    commands.extend(moves(&[
        Direction::Up,
        Direction::Right,
        Direction::Left,
        Direction::Left,
        Direction::Left,
    ]));
    run(&mut world, &mut ledger, &commands);

    let report = ledger.report();
    let scores = query::scores(&world);
    assert_eq!(report.sessions, 1);
    assert_eq!(report.steps, 4);
    assert_eq!(report.blocked_moves, 1);
    assert_eq!(report.dollars_collected, 1);
    assert_eq!(report.deposits, 1);
    assert_eq!(report.banked, DOLLAR_VALUE);
    assert_eq!(report.banked, scores.banked);
    assert_eq!(report.stolen, scores.monkey);
    assert!(!report.won);
}

#[test]
fn ledger_tracks_captures_and_pursuit() {
    let mut world = World::with_layout("BSDM").expect("valid layout");
    let mut ledger = Ledger::new();
    let mut commands = vec![
        Command::ConfigureMonkeyPace { moves_per_step: 1 },
        Command::StartGame,
    ];
    commands.extend(moves(&[Direction::Right]));
    run(&mut world, &mut ledger, &commands);

    let report = ledger.report();
    assert_eq!(report.monkey_steps, 1);
    assert_eq!(report.captures, 1);
    assert_eq!(report.stolen, DOLLAR_VALUE);
    assert_eq!(query::scores(&world).monkey, DOLLAR_VALUE);
}
