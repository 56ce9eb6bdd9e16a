#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Deterministic session ledger that tallies what happened during play.
//!
//! The ledger is the engine's audit trail: every counter is derived from the
//! event stream alone, so replaying the same commands always yields the same
//! report.

use std::fmt;

use tiger_run_core::{Event, GamePhase, MoveRejection};

/// Counters accumulated from the world events of a single session.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct LedgerReport {
    /// Sessions started since the ledger was created.
    pub sessions: u32,
    /// Successful tiger steps.
    pub steps: u32,
    /// Move requests refused because of walls or the maze edge.
    pub blocked_moves: u32,
    /// Move requests issued while no session was being played.
    pub ignored_moves: u32,
    /// Dollars picked up.
    pub dollars_collected: u32,
    /// Dollars whose fade completed.
    pub dollars_cleared: u32,
    /// Deposits made at a bank.
    pub deposits: u32,
    /// Total value moved into the bank.
    pub banked: u32,
    /// Times the monkey caught the tiger.
    pub captures: u32,
    /// Total value the monkey took.
    pub stolen: u32,
    /// Pursuit steps taken by the monkey.
    pub monkey_steps: u32,
    /// Whether the current session was won.
    pub won: bool,
}

impl fmt::Display for LedgerReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "steps: {} ({} blocked)", self.steps, self.blocked_moves)?;
        writeln!(
            f,
            "dollars: {} collected, {} cleared",
            self.dollars_collected, self.dollars_cleared
        )?;
        writeln!(f, "banked: ${} over {} deposits", self.banked, self.deposits)?;
        writeln!(
            f,
            "captures: {} (${} stolen, {} monkey steps)",
            self.captures, self.stolen, self.monkey_steps
        )?;
        write!(f, "outcome: {}", if self.won { "won" } else { "in progress" })
    }
}

/// Pure system that folds world events into a [`LedgerReport`].
#[derive(Debug, Default)]
pub struct Ledger {
    report: LedgerReport,
}

impl Ledger {
    /// Creates an empty ledger.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Counters for the session currently being played.
    #[must_use]
    pub const fn report(&self) -> LedgerReport {
        self.report
    }

    /// Consumes world events and updates the counters.
    ///
    /// `GameStarted` resets every per-session counter while keeping the
    /// session count.
    pub fn handle(&mut self, events: &[Event]) {
        for event in events {
            let report = &mut self.report;
            match event {
                Event::GameStarted { .. } => {
                    *report = LedgerReport {
                        sessions: report.sessions.saturating_add(1),
                        ..LedgerReport::default()
                    };
                }
                Event::TigerMoved { .. } => report.steps = report.steps.saturating_add(1),
                Event::MoveRejected {
                    reason: MoveRejection::NotPlaying,
                    ..
                } => report.ignored_moves = report.ignored_moves.saturating_add(1),
                Event::MoveRejected { .. } => {
                    report.blocked_moves = report.blocked_moves.saturating_add(1);
                }
                Event::DollarCollected { .. } => {
                    report.dollars_collected = report.dollars_collected.saturating_add(1);
                }
                Event::DollarCleared { .. } => {
                    report.dollars_cleared = report.dollars_cleared.saturating_add(1);
                }
                Event::Deposited { amount, .. } => {
                    report.deposits = report.deposits.saturating_add(1);
                    report.banked = report.banked.saturating_add(*amount);
                }
                Event::TigerCaught { stolen, .. } => {
                    report.captures = report.captures.saturating_add(1);
                    report.stolen = report.stolen.saturating_add(*stolen);
                }
                Event::MonkeyMoved { .. } => {
                    report.monkey_steps = report.monkey_steps.saturating_add(1);
                }
                Event::PhaseChanged {
                    phase: GamePhase::Won,
                } => report.won = true,
                _ => {}
            }
        }
    }
}
