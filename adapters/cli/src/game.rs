use std::time::Duration;

use tiger_run_core::{Command, Direction, Event, GameSnapshot};
use tiger_run_system_announcements::Announcements;
use tiger_run_system_cues::Cues;
use tiger_run_system_ledger::{Ledger, LedgerReport};
use tiger_run_world::{self as world, query, World};

/// Wires the world to the pure systems that react to its events.
#[derive(Debug)]
pub(crate) struct GameLoop {
    world: World,
    cues: Cues,
    announcements: Announcements,
    ledger: Ledger,
    events: Vec<Event>,
    follow_ups: Vec<Command>,
}

impl GameLoop {
    pub(crate) fn new(world: World) -> Self {
        Self {
            world,
            cues: Cues::default(),
            announcements: Announcements::new(),
            ledger: Ledger::new(),
            events: Vec::new(),
            follow_ups: Vec::new(),
        }
    }

    /// Applies player commands, then advances every system by `dt`.
    pub(crate) fn step(&mut self, commands: impl IntoIterator<Item = Command>, dt: Duration) {
        self.events.clear();
        for command in commands {
            world::apply(&mut self.world, command, &mut self.events);
        }

        self.follow_ups.clear();
        self.cues.handle(&self.events, dt, &mut self.follow_ups);
        for command in self.follow_ups.drain(..) {
            world::apply(&mut self.world, command, &mut self.events);
        }

        self.ledger.handle(&self.events);
        self.announcements
            .handle(&self.events, query::scores(&self.world), dt);
    }

    /// Plays one scripted move and lets every cue it raised run to completion.
    pub(crate) fn play_move(&mut self, direction: Direction) {
        let settle = self.cues.config().longest();
        self.step([Command::MoveTiger { direction }], settle);
    }

    /// Events produced by the most recent step.
    pub(crate) fn last_events(&self) -> &[Event] {
        &self.events
    }

    pub(crate) fn snapshot(&self) -> GameSnapshot {
        query::snapshot(&self.world)
    }

    pub(crate) fn world(&self) -> &World {
        &self.world
    }

    pub(crate) fn cues(&self) -> &Cues {
        &self.cues
    }

    pub(crate) fn announcement_text(&self) -> Option<String> {
        self.announcements
            .current()
            .map(|announcement| announcement.to_string())
    }

    pub(crate) fn report(&self) -> LedgerReport {
        self.ledger.report()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tiger_run_core::{DollarState, GamePhase, DOLLAR_VALUE};
    use tiger_run_system_announcements::Announcement;

    fn started(source: &str) -> GameLoop {
        let world = World::with_layout(source).expect("valid layout");
        let mut game = GameLoop::new(world);
        game.step([Command::StartGame], Duration::ZERO);
        game
    }

    #[test]
    fn scripted_move_clears_collected_dollar() {
        let mut game = started("BSD.D");
        game.play_move(Direction::Right);

        let snapshot = game.snapshot();
        assert_eq!(snapshot.dollars[0].state, DollarState::Collected);
        assert!(!snapshot.tiger.moving);
        assert!(game.cues().is_idle());
        assert!(game
            .last_events()
            .iter()
            .any(|event| matches!(event, Event::DollarCleared { .. })));
    }

    #[test]
    fn win_freezes_play_until_restart() {
        let mut game = started("BSD");
        game.play_move(Direction::Right);
        game.play_move(Direction::Left);
        game.play_move(Direction::Left);

        let snapshot = game.snapshot();
        assert_eq!(snapshot.phase, GamePhase::Won);
        assert_eq!(snapshot.scores.carried, DOLLAR_VALUE);
        assert_eq!(snapshot.tiger.cell, tiger_run_core::CellCoord::new(2, 0));
        assert_eq!(
            game.announcement_text(),
            Some(Announcement::Won { total: DOLLAR_VALUE }.to_string())
        );
        let report = game.report();
        assert!(report.won);
        assert_eq!(report.steps, 1);
        assert_eq!(report.ignored_moves, 2);
        assert_eq!(report.dollars_cleared, 1);

        game.step([Command::StartGame], Duration::ZERO);
        assert_eq!(game.snapshot().phase, GamePhase::Playing);
        assert_eq!(
            game.announcement_text(),
            Some(Announcement::Welcome.to_string())
        );
        assert_eq!(game.report().sessions, 2);
    }
}
