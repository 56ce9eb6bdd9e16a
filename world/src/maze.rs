//! Static maze layout parsed from the symbolic board description.

use thiserror::Error;
use tiger_run_core::{CellCoord, CellKind};

/// Built-in Tiger Run board.
///
/// Symbols: `#` wall, `.` path, `S` tiger start, `D` dollar, `M` monkey spawn,
/// `B` bank entrance. Any other symbol is treated as a path.
pub const TIGER_RUN_LAYOUT: &str = "\
#B#############
#SD#DDDDDD#DDD#
#D##D##D#D#D#D#
#DDDDDDD#DDDDD#
#D###D#M###.#D#
#DDDDDDDDDDDDD#
###D##D###D####
#DDDDDDDDDDDDD#
#D######D####D#
#DDDDDDDDDDDDD#
###############
";

/// Errors produced while parsing a maze layout.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum LayoutError {
    /// The layout contained no rows.
    #[error("maze layout is empty")]
    Empty,
    /// A row had a different width than the first row.
    #[error("maze row {row} has {found} cells, expected {expected}")]
    RaggedRow {
        /// Zero-based index of the offending row.
        row: u32,
        /// Width established by the first row.
        expected: u32,
        /// Width of the offending row.
        found: u32,
    },
    /// No tiger start symbol was present.
    #[error("maze layout has no tiger start (`S`)")]
    MissingStart,
    /// More than one tiger start symbol was present.
    #[error("maze layout has a second tiger start at {second:?} (first at {first:?})")]
    DuplicateStart {
        /// Start cell found first in scan order.
        first: CellCoord,
        /// Start cell found afterwards.
        second: CellCoord,
    },
    /// No bank symbol was present.
    #[error("maze layout has no bank (`B`)")]
    MissingBank,
}

/// Immutable maze produced by [`MazeLayout::parse`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MazeLayout {
    columns: u32,
    rows: u32,
    cells: Vec<CellKind>,
    start: CellCoord,
    monkey_spawn: Option<CellCoord>,
    banks: Vec<CellCoord>,
    dollar_spawns: Vec<CellCoord>,
}

impl MazeLayout {
    /// Parses a rectangular symbolic layout.
    ///
    /// Surrounding whitespace and blank lines are ignored. Dollar spawns are
    /// listed in row-major scan order, which fixes their identifiers. When
    /// several monkey spawns are present the first one in scan order is used.
    pub fn parse(source: &str) -> Result<Self, LayoutError> {
        let lines: Vec<&str> = source
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .collect();

        let Some(first) = lines.first() else {
            return Err(LayoutError::Empty);
        };
        let columns = symbol_count(first);
        if columns == 0 {
            return Err(LayoutError::Empty);
        }
        let rows = u32::try_from(lines.len()).unwrap_or(u32::MAX);

        let mut cells = Vec::with_capacity(lines.len() * first.len());
        let mut start: Option<CellCoord> = None;
        let mut monkey_spawn = None;
        let mut banks = Vec::new();
        let mut dollar_spawns = Vec::new();

        for (row, line) in (0u32..).zip(lines.iter()) {
            let found = symbol_count(line);
            if found != columns {
                return Err(LayoutError::RaggedRow {
                    row,
                    expected: columns,
                    found,
                });
            }

            for (column, symbol) in (0u32..).zip(line.chars()) {
                let cell = CellCoord::new(column, row);
                let kind = match symbol {
                    '#' => CellKind::Wall,
                    'B' => {
                        banks.push(cell);
                        CellKind::Bank
                    }
                    'S' => {
                        if let Some(first) = start {
                            return Err(LayoutError::DuplicateStart {
                                first,
                                second: cell,
                            });
                        }
                        start = Some(cell);
                        CellKind::Path
                    }
                    'D' => {
                        dollar_spawns.push(cell);
                        CellKind::Path
                    }
                    'M' => {
                        if monkey_spawn.is_none() {
                            monkey_spawn = Some(cell);
                        }
                        CellKind::Path
                    }
                    _ => CellKind::Path,
                };
                cells.push(kind);
            }
        }

        let start = start.ok_or(LayoutError::MissingStart)?;
        if banks.is_empty() {
            return Err(LayoutError::MissingBank);
        }

        Ok(Self {
            columns,
            rows,
            cells,
            start,
            monkey_spawn,
            banks,
            dollar_spawns,
        })
    }

    /// Number of columns in the maze.
    #[must_use]
    pub const fn columns(&self) -> u32 {
        self.columns
    }

    /// Number of rows in the maze.
    #[must_use]
    pub const fn rows(&self) -> u32 {
        self.rows
    }

    /// Cells in row-major order.
    #[must_use]
    pub fn cells(&self) -> &[CellKind] {
        &self.cells
    }

    /// Cell where the tiger begins every session.
    #[must_use]
    pub const fn start(&self) -> CellCoord {
        self.start
    }

    /// Cell where the monkey begins every session, if the maze has one.
    #[must_use]
    pub const fn monkey_spawn(&self) -> Option<CellCoord> {
        self.monkey_spawn
    }

    /// Bank entrances in scan order.
    #[must_use]
    pub fn banks(&self) -> &[CellCoord] {
        &self.banks
    }

    /// Dollar spawns in scan order.
    #[must_use]
    pub fn dollar_spawns(&self) -> &[CellCoord] {
        &self.dollar_spawns
    }

    /// Terrain at `cell`, or `None` outside the maze.
    #[must_use]
    pub fn cell(&self, cell: CellCoord) -> Option<CellKind> {
        self.index(cell)
            .and_then(|index| self.cells.get(index).copied())
    }

    /// Reports whether `cell` lies inside the maze and is not a wall.
    #[must_use]
    pub fn is_walkable(&self, cell: CellCoord) -> bool {
        self.cell(cell).is_some_and(CellKind::is_walkable)
    }

    /// Reports whether `cell` is a bank entrance.
    #[must_use]
    pub fn is_bank(&self, cell: CellCoord) -> bool {
        self.cell(cell) == Some(CellKind::Bank)
    }

    fn index(&self, cell: CellCoord) -> Option<usize> {
        if cell.column() < self.columns && cell.row() < self.rows {
            let row = usize::try_from(cell.row()).ok()?;
            let column = usize::try_from(cell.column()).ok()?;
            let width = usize::try_from(self.columns).ok()?;
            Some(row * width + column)
        } else {
            None
        }
    }
}

fn symbol_count(line: &str) -> u32 {
    u32::try_from(line.chars().count()).unwrap_or(u32::MAX)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn built_in_layout_parses() {
        let layout = MazeLayout::parse(TIGER_RUN_LAYOUT).expect("built-in layout parses");

        assert_eq!(layout.columns(), 15);
        assert_eq!(layout.rows(), 11);
        assert_eq!(layout.start(), CellCoord::new(1, 1));
        assert_eq!(layout.monkey_spawn(), Some(CellCoord::new(7, 4)));
        assert_eq!(layout.banks(), &[CellCoord::new(1, 0)]);
        assert_eq!(layout.dollar_spawns().first(), Some(&CellCoord::new(2, 1)));
        assert!(!layout.dollar_spawns().is_empty());
    }

    #[test]
    fn symbols_map_to_terrain() {
        let layout = MazeLayout::parse("#B\nSx\nDM").expect("valid layout");

        assert_eq!(layout.cell(CellCoord::new(0, 0)), Some(CellKind::Wall));
        assert_eq!(layout.cell(CellCoord::new(1, 0)), Some(CellKind::Bank));
        assert_eq!(layout.cell(CellCoord::new(0, 1)), Some(CellKind::Path));
        assert_eq!(
            layout.cell(CellCoord::new(1, 1)),
            Some(CellKind::Path),
            "unknown symbols default to path"
        );
        assert_eq!(layout.cell(CellCoord::new(0, 2)), Some(CellKind::Path));
        assert_eq!(layout.cell(CellCoord::new(1, 2)), Some(CellKind::Path));
        assert_eq!(layout.cell(CellCoord::new(2, 0)), None);
    }

    #[test]
    fn dollars_are_listed_in_row_major_order() {
        let layout = MazeLayout::parse("SDD\nD.B\n..D").expect("valid layout");

        assert_eq!(
            layout.dollar_spawns(),
            &[
                CellCoord::new(1, 0),
                CellCoord::new(2, 0),
                CellCoord::new(0, 1),
                CellCoord::new(2, 2),
            ]
        );
    }

    #[test]
    fn first_monkey_spawn_wins() {
        let layout = MazeLayout::parse("SMM\n..B").expect("valid layout");
        assert_eq!(layout.monkey_spawn(), Some(CellCoord::new(1, 0)));
    }

    #[test]
    fn monkey_spawn_is_optional() {
        let layout = MazeLayout::parse("SB").expect("valid layout");
        assert_eq!(layout.monkey_spawn(), None);
    }

    #[test]
    fn missing_start_is_rejected() {
        assert_eq!(MazeLayout::parse("#B\n.."), Err(LayoutError::MissingStart));
    }

    #[test]
    fn duplicate_start_is_rejected() {
        assert_eq!(
            MazeLayout::parse("SB\n.S"),
            Err(LayoutError::DuplicateStart {
                first: CellCoord::new(0, 0),
                second: CellCoord::new(1, 1),
            })
        );
    }

    #[test]
    fn missing_bank_is_rejected() {
        assert_eq!(MazeLayout::parse("S.\n.."), Err(LayoutError::MissingBank));
    }

    #[test]
    fn ragged_rows_are_rejected() {
        assert_eq!(
            MazeLayout::parse("SB.\n.."),
            Err(LayoutError::RaggedRow {
                row: 1,
                expected: 3,
                found: 2,
            })
        );
    }

    #[test]
    fn empty_layout_is_rejected() {
        assert_eq!(MazeLayout::parse("\n  \n"), Err(LayoutError::Empty));
    }
}
