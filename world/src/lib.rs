#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Authoritative world state management for Tiger Run.

mod maze;

pub use maze::{LayoutError, MazeLayout, TIGER_RUN_LAYOUT};

use tiger_run_core::{
    CellCoord, Command, Direction, DollarId, DollarState, Event, GamePhase, MoveRejection,
    Scoreboard, DEFAULT_MONKEY_PACE, DOLLAR_VALUE, WELCOME_BANNER,
};
use tiger_run_system_pursuit::{self as pursuit, Bounds};

/// Represents the authoritative Tiger Run world state.
#[derive(Debug)]
pub struct World {
    banner: &'static str,
    layout: MazeLayout,
    monkey_pace: u32,
    session: Session,
}

impl World {
    /// Creates a world on the built-in Tiger Run maze, waiting for a start command.
    #[must_use]
    pub fn new() -> Self {
        Self::with_layout(TIGER_RUN_LAYOUT).expect("built-in Tiger Run layout is well formed")
    }

    /// Creates a world on a custom symbolic layout, waiting for a start command.
    pub fn with_layout(source: &str) -> Result<Self, LayoutError> {
        let layout = MazeLayout::parse(source)?;
        let session = Session::from_layout(&layout, GamePhase::NotStarted);
        Ok(Self {
            banner: WELCOME_BANNER,
            layout,
            monkey_pace: DEFAULT_MONKEY_PACE,
            session,
        })
    }

    fn start(&mut self, out_events: &mut Vec<Event>) {
        self.session = Session::from_layout(&self.layout, GamePhase::Playing);
        out_events.push(Event::GameStarted {
            tiger: self.session.tiger.cell,
            monkey: self.session.monkey.map(|monkey| monkey.cell),
            dollars: u32::try_from(self.session.dollars.len()).unwrap_or(u32::MAX),
        });
        out_events.push(Event::PhaseChanged {
            phase: GamePhase::Playing,
        });
    }

    fn move_tiger(&mut self, direction: Direction, out_events: &mut Vec<Event>) {
        if self.session.phase != GamePhase::Playing {
            out_events.push(Event::MoveRejected {
                direction,
                reason: MoveRejection::NotPlaying,
            });
            return;
        }

        let tiger = &mut self.session.tiger;
        tiger.moving = true;
        if tiger.facing != direction {
            tiger.facing = direction;
            out_events.push(Event::TigerTurned { direction });
        }

        let from = tiger.cell;
        let Some(candidate) = from.neighbor(direction, self.layout.columns(), self.layout.rows())
        else {
            out_events.push(Event::MoveRejected {
                direction,
                reason: MoveRejection::OutOfBounds,
            });
            return;
        };

        if !self.layout.is_walkable(candidate) {
            out_events.push(Event::MoveRejected {
                direction,
                reason: MoveRejection::Wall,
            });
            return;
        }

        if self.session.monkey_cell() == Some(candidate) {
            self.capture(out_events);
            return;
        }

        self.session.tiger.cell = candidate;
        out_events.push(Event::TigerMoved {
            from,
            to: candidate,
        });

        let deposited = self.layout.is_bank(candidate) && self.session.scores.carried > 0;
        if deposited {
            self.deposit(out_events);
        } else {
            self.collect_at(candidate, out_events);
        }

        self.advance_monkey_clock(deposited, out_events);
    }

    fn deposit(&mut self, out_events: &mut Vec<Event>) {
        let scores = &mut self.session.scores;
        let amount = scores.carried;
        scores.banked = scores.banked.saturating_add(amount);
        scores.carried = 0;
        out_events.push(Event::Deposited {
            amount,
            banked: scores.banked,
        });

        if let Some(monkey) = self.session.monkey.as_mut() {
            monkey.cell = monkey.spawn;
            out_events.push(Event::MonkeyReturned { to: monkey.spawn });
        }
    }

    fn collect_at(&mut self, cell: CellCoord, out_events: &mut Vec<Event>) {
        let Some(dollar) = self
            .session
            .dollars
            .iter_mut()
            .find(|dollar| dollar.cell == cell && dollar.state == DollarState::Active)
        else {
            return;
        };

        dollar.state = DollarState::Collecting;
        let scores = &mut self.session.scores;
        scores.carried = scores.carried.saturating_add(DOLLAR_VALUE);
        out_events.push(Event::DollarCollected {
            dollar: dollar.id,
            cell,
            carried: scores.carried,
        });
        self.check_for_win(out_events);
    }

    fn advance_monkey_clock(&mut self, deposited: bool, out_events: &mut Vec<Event>) {
        let pace = self.monkey_pace;
        let Some(monkey) = self.session.monkey.as_mut() else {
            return;
        };

        monkey.move_counter = monkey.move_counter.wrapping_add(1);
        if pace == 0 || deposited || monkey.move_counter % pace != 0 {
            return;
        }

        self.pursue(out_events);
    }

    fn pursue(&mut self, out_events: &mut Vec<Event>) {
        let layout = &self.layout;
        let tiger = self.session.tiger.cell;
        let Some(monkey) = self.session.monkey.as_mut() else {
            return;
        };

        let bounds = Bounds::new(layout.columns(), layout.rows());
        let Some(next) = pursuit::next_cell(monkey.cell, tiger, bounds, |cell| {
            layout.is_walkable(cell)
        }) else {
            return;
        };

        let from = monkey.cell;
        monkey.cell = next;
        out_events.push(Event::MonkeyMoved { from, to: next });

        if next == tiger {
            self.capture(out_events);
        }
    }

    fn capture(&mut self, out_events: &mut Vec<Event>) {
        let scores = &mut self.session.scores;
        let stolen = scores.carried;
        scores.monkey = scores.monkey.saturating_add(stolen);
        scores.carried = 0;

        self.session.tiger.cell = self.layout.start();
        if let Some(monkey) = self.session.monkey.as_mut() {
            monkey.cell = monkey.spawn;
        }

        out_events.push(Event::TigerCaught {
            stolen,
            monkey_score: scores.monkey,
        });
    }

    fn acknowledge(&mut self, dollar_id: DollarId, out_events: &mut Vec<Event>) {
        let Some(dollar) = self
            .session
            .dollars
            .iter_mut()
            .find(|dollar| dollar.id == dollar_id)
        else {
            return;
        };

        if dollar.state != DollarState::Collecting {
            return;
        }

        dollar.state = DollarState::Collected;
        out_events.push(Event::DollarCleared { dollar: dollar_id });
        self.check_for_win(out_events);
    }

    fn check_for_win(&mut self, out_events: &mut Vec<Event>) {
        if self.session.phase != GamePhase::Playing {
            return;
        }

        let dollars = &self.session.dollars;
        if dollars.is_empty()
            || dollars
                .iter()
                .any(|dollar| dollar.state != DollarState::Collected)
        {
            return;
        }

        self.session.phase = GamePhase::Won;
        out_events.push(Event::PhaseChanged {
            phase: GamePhase::Won,
        });
    }
}

/// Applies the provided command to the world, mutating state deterministically.
pub fn apply(world: &mut World, command: Command, out_events: &mut Vec<Event>) {
    match command {
        Command::StartGame => world.start(out_events),
        Command::MoveTiger { direction } => world.move_tiger(direction, out_events),
        Command::AcknowledgeCollected { dollar } => world.acknowledge(dollar, out_events),
        Command::SettleTiger => world.session.tiger.moving = false,
        Command::ConfigureMonkeyPace { moves_per_step } => {
            world.monkey_pace = moves_per_step;
            out_events.push(Event::MonkeyPaceConfigured { moves_per_step });
        }
    }
}

/// Query functions that provide read-only access to the world state.
pub mod query {
    use tiger_run_core::{
        CellCoord, CellKind, DollarSnapshot, GamePhase, GameSnapshot, Scoreboard, TigerSnapshot,
    };

    use super::{MazeLayout, World};

    /// Retrieves the welcome banner that adapters may display to players.
    #[must_use]
    pub fn welcome_banner(world: &World) -> &'static str {
        world.banner
    }

    /// Provides read-only access to the parsed maze.
    #[must_use]
    pub fn maze(world: &World) -> &MazeLayout {
        &world.layout
    }

    /// Terrain at `cell`, or `None` outside the maze.
    #[must_use]
    pub fn cell_at(world: &World, cell: CellCoord) -> Option<CellKind> {
        world.layout.cell(cell)
    }

    /// Current session phase.
    #[must_use]
    pub fn phase(world: &World) -> GamePhase {
        world.session.phase
    }

    /// Current score totals.
    #[must_use]
    pub fn scores(world: &World) -> Scoreboard {
        world.session.scores
    }

    /// Current tiger state.
    #[must_use]
    pub fn tiger(world: &World) -> TigerSnapshot {
        let tiger = &world.session.tiger;
        TigerSnapshot {
            cell: tiger.cell,
            facing: tiger.facing,
            moving: tiger.moving,
        }
    }

    /// Cell currently occupied by the monkey, if the maze has one.
    #[must_use]
    pub fn monkey(world: &World) -> Option<CellCoord> {
        world.session.monkey_cell()
    }

    /// Tiger moves per monkey pursuit step; zero means the monkey never moves.
    #[must_use]
    pub fn monkey_pace(world: &World) -> u32 {
        world.monkey_pace
    }

    /// Captures every dollar in identifier order.
    #[must_use]
    pub fn dollars(world: &World) -> Vec<DollarSnapshot> {
        world
            .session
            .dollars
            .iter()
            .map(|dollar| DollarSnapshot {
                id: dollar.id,
                cell: dollar.cell,
                state: dollar.state,
            })
            .collect()
    }

    /// Captures a complete read-only snapshot of the session.
    #[must_use]
    pub fn snapshot(world: &World) -> GameSnapshot {
        GameSnapshot {
            columns: world.layout.columns(),
            rows: world.layout.rows(),
            cells: world.layout.cells().to_vec(),
            tiger: tiger(world),
            monkey: monkey(world),
            scores: scores(world),
            dollars: dollars(world),
            banks: world.layout.banks().to_vec(),
            phase: phase(world),
        }
    }
}

#[derive(Clone, Debug)]
struct Session {
    phase: GamePhase,
    tiger: Tiger,
    monkey: Option<Monkey>,
    dollars: Vec<Dollar>,
    scores: Scoreboard,
}

impl Session {
    fn from_layout(layout: &MazeLayout, phase: GamePhase) -> Self {
        let dollars = (0u32..)
            .zip(layout.dollar_spawns())
            .map(|(index, &cell)| Dollar {
                id: DollarId::new(index),
                cell,
                state: DollarState::Active,
            })
            .collect();

        Self {
            phase,
            tiger: Tiger {
                cell: layout.start(),
                facing: Direction::Right,
                moving: false,
            },
            monkey: layout.monkey_spawn().map(|spawn| Monkey {
                cell: spawn,
                spawn,
                move_counter: 0,
            }),
            dollars,
            scores: Scoreboard::default(),
        }
    }

    fn monkey_cell(&self) -> Option<CellCoord> {
        self.monkey.as_ref().map(|monkey| monkey.cell)
    }
}

#[derive(Clone, Copy, Debug)]
struct Tiger {
    cell: CellCoord,
    facing: Direction,
    moving: bool,
}

#[derive(Clone, Copy, Debug)]
struct Monkey {
    cell: CellCoord,
    spawn: CellCoord,
    move_counter: u32,
}

#[derive(Clone, Copy, Debug)]
struct Dollar {
    id: DollarId,
    cell: CellCoord,
    state: DollarState,
}
