#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Deterministic greedy pursuit used by the monkey.
//!
//! The chase is a one-step heuristic: no search, no memory, no randomness. It
//! closes the larger of the two axis gaps first and falls back to the other
//! axis when a wall is in the way, which means the monkey can get stuck behind
//! walls that an optimal chaser would route around.

use tiger_run_core::{CellCoord, Direction};

/// Grid bounds the chaser must stay within.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Bounds {
    columns: u32,
    rows: u32,
}

impl Bounds {
    /// Creates bounds for a grid of `columns` by `rows` cells.
    #[must_use]
    pub const fn new(columns: u32, rows: u32) -> Self {
        Self { columns, rows }
    }

    /// Number of columns in the grid.
    #[must_use]
    pub const fn columns(&self) -> u32 {
        self.columns
    }

    /// Number of rows in the grid.
    #[must_use]
    pub const fn rows(&self) -> u32 {
        self.rows
    }
}

/// Selects the cell the chaser should step onto next.
///
/// `is_open` reports whether an in-bounds cell may be entered. Returns `None`
/// when neither axis offers a valid step toward the target, including when the
/// chaser already stands on the target.
#[must_use]
pub fn next_cell<F>(
    chaser: CellCoord,
    target: CellCoord,
    bounds: Bounds,
    is_open: F,
) -> Option<CellCoord>
where
    F: Fn(CellCoord) -> bool,
{
    let (preferred, fallback) = axis_preference(chaser, target);

    [preferred, fallback]
        .into_iter()
        .flatten()
        .filter_map(|direction| chaser.neighbor(direction, bounds.columns(), bounds.rows()))
        .find(|&cell| is_open(cell))
}

/// Orders the two candidate directions toward `target`.
///
/// The axis with the larger gap comes first; an exact tie favours the
/// vertical axis. An axis with no gap yields no direction.
#[must_use]
pub fn axis_preference(
    chaser: CellCoord,
    target: CellCoord,
) -> (Option<Direction>, Option<Direction>) {
    let dy = i64::from(target.row()) - i64::from(chaser.row());
    let dx = i64::from(target.column()) - i64::from(chaser.column());

    let vertical = match dy.signum() {
        1 => Some(Direction::Down),
        -1 => Some(Direction::Up),
        _ => None,
    };
    let horizontal = match dx.signum() {
        1 => Some(Direction::Right),
        -1 => Some(Direction::Left),
        _ => None,
    };

    let prefer_vertical = dy.abs() > dx.abs() || (dy.abs() == dx.abs() && dy != 0);
    if prefer_vertical {
        (vertical, horizontal)
    } else {
        (horizontal, vertical)
    }
}
