#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Core contracts shared across the Tiger Run engine.
//!
//! This crate defines the message surface that connects adapters, the
//! authoritative world, and pure systems. Adapters submit [`Command`] values
//! describing desired mutations, the world executes those commands via its
//! `apply` entry point, and then broadcasts [`Event`] values that systems and
//! adapters react to deterministically. Read access goes through immutable
//! snapshots such as [`GameSnapshot`].

use std::{fmt, time::Duration};

use serde::{Deserialize, Serialize};

/// Canonical banner emitted when the experience boots.
pub const WELCOME_BANNER: &str = "Welcome to Tiger Run!";

/// Value added to the carried score for every collected dollar.
pub const DOLLAR_VALUE: u32 = 10;

/// Number of tiger moves between monkey pursuit steps unless configured otherwise.
pub const DEFAULT_MONKEY_PACE: u32 = 3;

/// Recommended time the tiger's `moving` flag stays raised after a move request.
pub const MOVE_CUE_DURATION: Duration = Duration::from_millis(150);

/// Recommended length of the fade played before a collecting dollar is acknowledged.
pub const COLLECT_CUE_DURATION: Duration = Duration::from_millis(400);

/// Commands that express all permissible world mutations.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Command {
    /// Rebuilds every piece of session state from the maze layout and starts play.
    StartGame,
    /// Requests that the tiger attempt a single step in the provided direction.
    MoveTiger {
        /// Direction of travel for the attempted step.
        direction: Direction,
    },
    /// Confirms that the presentation finished fading out a collecting dollar.
    AcknowledgeCollected {
        /// Identifier of the dollar whose fade completed.
        dollar: DollarId,
    },
    /// Clears the transient `moving` flag raised by the last move request.
    SettleTiger,
    /// Updates how many tiger moves elapse between monkey pursuit steps.
    ConfigureMonkeyPace {
        /// Tiger moves per monkey step; zero keeps the monkey still.
        moves_per_step: u32,
    },
}

/// Events broadcast by the world after processing commands.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Event {
    /// Announces that a fresh session was built from the maze layout.
    GameStarted {
        /// Cell the tiger occupies at the start of the session.
        tiger: CellCoord,
        /// Cell the monkey occupies at the start of the session, if the maze has one.
        monkey: Option<CellCoord>,
        /// Number of dollars placed in the maze.
        dollars: u32,
    },
    /// Announces that the session entered a new phase.
    PhaseChanged {
        /// Phase that became active after processing the command.
        phase: GamePhase,
    },
    /// Reports that the tiger now faces a different direction.
    TigerTurned {
        /// Direction the tiger faces after the request.
        direction: Direction,
    },
    /// Confirms that the tiger moved between two cells.
    TigerMoved {
        /// Cell the tiger occupied before moving.
        from: CellCoord,
        /// Cell the tiger occupies after moving.
        to: CellCoord,
    },
    /// Reports that a tiger move request was refused.
    MoveRejected {
        /// Direction provided in the move request.
        direction: Direction,
        /// Specific reason the move failed.
        reason: MoveRejection,
    },
    /// Confirms that the tiger picked up a dollar.
    DollarCollected {
        /// Identifier of the collected dollar.
        dollar: DollarId,
        /// Cell the dollar occupied.
        cell: CellCoord,
        /// Carried score after the pickup.
        carried: u32,
    },
    /// Confirms that a collecting dollar left play for good.
    DollarCleared {
        /// Identifier of the cleared dollar.
        dollar: DollarId,
    },
    /// Confirms that the tiger deposited its carried score at the bank.
    Deposited {
        /// Amount moved from the carried score into the bank.
        amount: u32,
        /// Banked score after the deposit.
        banked: u32,
    },
    /// Confirms that the monkey took a pursuit step.
    MonkeyMoved {
        /// Cell the monkey occupied before moving.
        from: CellCoord,
        /// Cell the monkey occupies after moving.
        to: CellCoord,
    },
    /// Reports that the monkey was sent back to its spawn after a deposit.
    MonkeyReturned {
        /// Spawn cell the monkey now occupies.
        to: CellCoord,
    },
    /// Reports that the monkey caught the tiger and took the carried score.
    TigerCaught {
        /// Carried score transferred to the monkey.
        stolen: u32,
        /// Monkey score after the capture.
        monkey_score: u32,
    },
    /// Confirms that the monkey pursuit cadence changed.
    MonkeyPaceConfigured {
        /// Tiger moves per monkey step; zero keeps the monkey still.
        moves_per_step: u32,
    },
}

/// Reasons a tiger move request may be rejected by the world.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MoveRejection {
    /// The session is not being played, so movement is disabled.
    NotPlaying,
    /// The requested step leaves the maze.
    OutOfBounds,
    /// The requested step runs into a wall.
    Wall,
}

/// Cardinal movement directions available to the tiger and the monkey.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    /// Movement toward decreasing row indices.
    Up,
    /// Movement toward increasing row indices.
    Down,
    /// Movement toward decreasing column indices.
    Left,
    /// Movement toward increasing column indices.
    Right,
}

impl Direction {
    /// Every direction in a stable order.
    pub const ALL: [Direction; 4] = [Self::Up, Self::Down, Self::Left, Self::Right];

    /// Unit offset of the direction expressed as `(column, row)` deltas.
    #[must_use]
    pub const fn offset(self) -> (i32, i32) {
        match self {
            Self::Up => (0, -1),
            Self::Down => (0, 1),
            Self::Left => (-1, 0),
            Self::Right => (1, 0),
        }
    }
}

/// Location of a single maze cell expressed as column and row coordinates.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct CellCoord {
    column: u32,
    row: u32,
}

impl CellCoord {
    /// Creates a new cell coordinate.
    #[must_use]
    pub const fn new(column: u32, row: u32) -> Self {
        Self { column, row }
    }

    /// Zero-based column index of the cell.
    #[must_use]
    pub const fn column(&self) -> u32 {
        self.column
    }

    /// Zero-based row index of the cell.
    #[must_use]
    pub const fn row(&self) -> u32 {
        self.row
    }

    /// Computes the Manhattan distance between two cell coordinates.
    #[must_use]
    pub fn manhattan_distance(self, other: CellCoord) -> u32 {
        self.column().abs_diff(other.column()) + self.row().abs_diff(other.row())
    }

    /// Returns the adjacent cell in `direction`, or `None` when it falls outside
    /// a grid of `columns` by `rows` cells.
    #[must_use]
    pub fn neighbor(self, direction: Direction, columns: u32, rows: u32) -> Option<CellCoord> {
        let (column_delta, row_delta) = direction.offset();
        let column = self.column.checked_add_signed(column_delta)?;
        let row = self.row.checked_add_signed(row_delta)?;
        if column < columns && row < rows {
            Some(CellCoord::new(column, row))
        } else {
            None
        }
    }
}

/// Terrain stored in a single maze cell.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CellKind {
    /// Impassable cell.
    Wall,
    /// Walkable cell.
    Path,
    /// Walkable cell that converts carried score into banked score.
    Bank,
}

impl CellKind {
    /// Reports whether tiger and monkey may stand on the cell.
    #[must_use]
    pub const fn is_walkable(self) -> bool {
        !matches!(self, Self::Wall)
    }
}

/// Unique identifier assigned to a dollar.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct DollarId(u32);

impl DollarId {
    /// Creates a new dollar identifier with the provided numeric value.
    #[must_use]
    pub const fn new(value: u32) -> Self {
        Self(value)
    }

    /// Retrieves the numeric representation of the identifier.
    #[must_use]
    pub const fn get(&self) -> u32 {
        self.0
    }
}

impl fmt::Display for DollarId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "dollar-{}", self.0)
    }
}

/// Lifecycle of a dollar token.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DollarState {
    /// Waiting in the maze to be picked up.
    Active,
    /// Picked up; the presentation is playing its fade.
    Collecting,
    /// Removed from play.
    Collected,
}

/// Phase of the current session.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GamePhase {
    /// No session has been started yet.
    NotStarted,
    /// The tiger accepts move requests.
    Playing,
    /// Every dollar was collected; terminal until the next start.
    Won,
}

/// Score totals tracked for a session.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Scoreboard {
    /// Value held by the tiger and at risk of capture.
    pub carried: u32,
    /// Value safely deposited at the bank.
    pub banked: u32,
    /// Value the monkey stole over the session.
    pub monkey: u32,
}

impl Scoreboard {
    /// Sum of all three totals, which equals the value of every dollar picked up so far.
    #[must_use]
    pub const fn total(&self) -> u32 {
        self.carried + self.banked + self.monkey
    }
}

/// Immutable representation of a dollar used for queries.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DollarSnapshot {
    /// Identifier assigned when the maze was parsed.
    pub id: DollarId,
    /// Cell the dollar was placed on.
    pub cell: CellCoord,
    /// Current lifecycle state.
    pub state: DollarState,
}

/// Immutable representation of the tiger used for queries.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TigerSnapshot {
    /// Cell currently occupied by the tiger.
    pub cell: CellCoord,
    /// Direction of the most recent move request.
    pub facing: Direction,
    /// Whether a move request was issued within the last cue window.
    pub moving: bool,
}

/// Read-only snapshot of the whole session handed to presentation layers.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameSnapshot {
    /// Number of columns in the maze.
    pub columns: u32,
    /// Number of rows in the maze.
    pub rows: u32,
    /// Maze cells in row-major order.
    pub cells: Vec<CellKind>,
    /// Tiger state.
    pub tiger: TigerSnapshot,
    /// Monkey cell, absent when the maze has no monkey spawn.
    pub monkey: Option<CellCoord>,
    /// Score totals.
    pub scores: Scoreboard,
    /// Every dollar placed in the maze, ordered by identifier.
    pub dollars: Vec<DollarSnapshot>,
    /// Cells that act as bank entrances.
    pub banks: Vec<CellCoord>,
    /// Current session phase.
    pub phase: GamePhase,
}

impl GameSnapshot {
    /// Returns the terrain at `cell`, or `None` when it lies outside the maze.
    #[must_use]
    pub fn cell_at(&self, cell: CellCoord) -> Option<CellKind> {
        if cell.column() >= self.columns || cell.row() >= self.rows {
            return None;
        }
        let index = usize::try_from(cell.row() * self.columns + cell.column()).ok()?;
        self.cells.get(index).copied()
    }

    /// Returns the dollar placed on `cell` that is still visible, if any.
    #[must_use]
    pub fn visible_dollar_at(&self, cell: CellCoord) -> Option<&DollarSnapshot> {
        self.dollars
            .iter()
            .find(|dollar| dollar.cell == cell && dollar.state != DollarState::Collected)
    }
}

#[cfg(test)]
mod tests {
    use super::{CellCoord, Direction, DollarId, DollarState, GamePhase, MoveRejection, Scoreboard};
    use serde::{de::DeserializeOwned, Serialize};

    #[test]
    fn manhattan_distance_matches_expectation() {
        let origin = CellCoord::new(1, 1);
        let destination = CellCoord::new(4, 3);
        assert_eq!(origin.manhattan_distance(destination), 5);
        assert_eq!(destination.manhattan_distance(origin), 5);
    }

    #[test]
    fn neighbor_stays_inside_grid() {
        let corner = CellCoord::new(0, 0);
        assert_eq!(corner.neighbor(Direction::Up, 3, 3), None);
        assert_eq!(corner.neighbor(Direction::Left, 3, 3), None);
        assert_eq!(
            corner.neighbor(Direction::Right, 3, 3),
            Some(CellCoord::new(1, 0))
        );
        assert_eq!(
            corner.neighbor(Direction::Down, 3, 3),
            Some(CellCoord::new(0, 1))
        );

        let far = CellCoord::new(2, 2);
        assert_eq!(far.neighbor(Direction::Right, 3, 3), None);
        assert_eq!(far.neighbor(Direction::Down, 3, 3), None);
    }

    #[test]
    fn dollar_id_displays_with_prefix() {
        assert_eq!(DollarId::new(7).to_string(), "dollar-7");
    }

    #[test]
    fn scoreboard_total_sums_every_bucket() {
        let scores = Scoreboard {
            carried: 10,
            banked: 30,
            monkey: 20,
        };
        assert_eq!(scores.total(), 60);
    }

    fn assert_round_trip<T>(value: &T)
    where
        T: Serialize + DeserializeOwned + PartialEq + std::fmt::Debug,
    {
        let bytes = bincode::serialize(value).expect("serialize");
        let restored: T = bincode::deserialize(&bytes).expect("deserialize");
        assert_eq!(&restored, value);
    }

    #[test]
    fn wire_types_round_trip_through_bincode() {
        assert_round_trip(&CellCoord::new(5, 7));
        assert_round_trip(&DollarState::Collecting);
        assert_round_trip(&GamePhase::Won);
        assert_round_trip(&MoveRejection::Wall);
    }
}
