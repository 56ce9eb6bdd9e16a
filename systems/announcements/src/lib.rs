#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Queue of short player-facing messages derived from world events.
//!
//! The queue never reads world state; it only reacts to the event stream plus
//! the score totals the adapter passes along, so it can be dropped or replaced
//! without touching the engine.

use std::{collections::VecDeque, fmt, time::Duration};

use tiger_run_core::{Event, GamePhase, Scoreboard};

const WELCOME_DURATION: Duration = Duration::from_secs(4);
const DEPOSIT_DURATION: Duration = Duration::from_secs(2);
const CAUGHT_DURATION: Duration = Duration::from_millis(2500);

/// Message shown to the player.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Announcement {
    /// Shown when a session starts.
    Welcome,
    /// Shown after carried value reached the bank.
    Deposited {
        /// Amount that was deposited.
        amount: u32,
    },
    /// Shown after the monkey caught the tiger.
    Caught {
        /// Carried value the tiger lost.
        lost: u32,
    },
    /// Shown once every dollar was cleared; stays until the next start.
    Won {
        /// Banked plus carried value at the moment of winning.
        total: u32,
    },
}

impl Announcement {
    /// How long the message stays on screen, or `None` when it only leaves on restart.
    #[must_use]
    pub const fn duration(&self) -> Option<Duration> {
        match self {
            Self::Welcome => Some(WELCOME_DURATION),
            Self::Deposited { .. } => Some(DEPOSIT_DURATION),
            Self::Caught { .. } => Some(CAUGHT_DURATION),
            Self::Won { .. } => None,
        }
    }

    fn same_kind(&self, other: &Announcement) -> bool {
        std::mem::discriminant(self) == std::mem::discriminant(other)
    }
}

impl fmt::Display for Announcement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Welcome => write!(
                f,
                "Collect dollars, avoid the monkey, and bank your money!"
            ),
            Self::Deposited { amount } => write!(f, "Banked ${amount}. The monkey runs home."),
            Self::Caught { lost: 0 } => write!(f, "The monkey caught you, but your pockets were empty."),
            Self::Caught { lost } => write!(f, "The monkey caught you and took ${lost}!"),
            Self::Won { total } => write!(f, "You won! Final score: ${total}"),
        }
    }
}

/// Pure system that maintains the announcement queue.
#[derive(Debug, Default)]
pub struct Announcements {
    queue: VecDeque<Posted>,
}

impl Announcements {
    /// Creates an empty announcement queue.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Consumes world events and elapsed time to update the queue.
    ///
    /// `scores` must reflect the world after the events were produced.
    pub fn handle(&mut self, events: &[Event], scores: Scoreboard, dt: Duration) {
        for event in events {
            match event {
                Event::GameStarted { .. } => {
                    self.queue.clear();
                    self.post(Announcement::Welcome);
                }
                Event::Deposited { amount, .. } => {
                    self.post(Announcement::Deposited { amount: *amount });
                }
                Event::TigerCaught { stolen, .. } => {
                    self.post(Announcement::Caught { lost: *stolen });
                }
                Event::PhaseChanged {
                    phase: GamePhase::Won,
                } => {
                    self.queue.clear();
                    self.post(Announcement::Won {
                        total: scores.banked.saturating_add(scores.carried),
                    });
                }
                _ => {}
            }
        }

        self.expire(dt);
    }

    /// Message currently on screen.
    #[must_use]
    pub fn current(&self) -> Option<Announcement> {
        self.queue.front().map(|posted| posted.announcement)
    }

    /// Number of queued messages, including the one on screen.
    #[must_use]
    pub fn len(&self) -> usize {
        self.queue.len()
    }

    /// Reports whether no message is queued.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }

    fn post(&mut self, announcement: Announcement) {
        self.queue
            .retain(|posted| !posted.announcement.same_kind(&announcement));
        self.queue.push_back(Posted {
            announcement,
            remaining: announcement.duration(),
        });
    }

    fn expire(&mut self, mut dt: Duration) {
        while let Some(front) = self.queue.front_mut() {
            let Some(remaining) = front.remaining else {
                return;
            };
            if remaining > dt {
                front.remaining = Some(remaining - dt);
                return;
            }
            dt -= remaining;
            let _ = self.queue.pop_front();
        }
    }
}

#[derive(Clone, Copy, Debug)]
struct Posted {
    announcement: Announcement,
    remaining: Option<Duration>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use tiger_run_core::CellCoord;

    fn started() -> Event {
        Event::GameStarted {
            tiger: CellCoord::new(1, 1),
            monkey: None,
            dollars: 3,
        }
    }

    #[test]
    fn start_posts_welcome() {
        let mut announcements = Announcements::new();
        announcements.handle(&[started()], Scoreboard::default(), Duration::ZERO);

        assert_eq!(announcements.current(), Some(Announcement::Welcome));
    }

    #[test]
    fn messages_expire_in_order() {
        let mut announcements = Announcements::new();
        announcements.handle(
            &[
                started(),
                Event::Deposited {
                    amount: 20,
                    banked: 20,
                },
            ],
            Scoreboard::default(),
            Duration::ZERO,
        );
        assert_eq!(announcements.len(), 2);

        announcements.handle(&[], Scoreboard::default(), WELCOME_DURATION);
        assert_eq!(
            announcements.current(),
            Some(Announcement::Deposited { amount: 20 })
        );

        announcements.handle(&[], Scoreboard::default(), DEPOSIT_DURATION);
        assert!(announcements.is_empty());
    }

    #[test]
    fn newer_message_replaces_same_kind() {
        let mut announcements = Announcements::new();
        let caught = |stolen| Event::TigerCaught {
            stolen,
            monkey_score: stolen,
        };
        announcements.handle(&[caught(10)], Scoreboard::default(), Duration::ZERO);
        announcements.handle(&[caught(30)], Scoreboard::default(), Duration::ZERO);

        assert_eq!(announcements.len(), 1);
        assert_eq!(
            announcements.current(),
            Some(Announcement::Caught { lost: 30 })
        );
    }

    #[test]
    fn win_clears_queue_and_stays() {
        let mut announcements = Announcements::new();
        let scores = Scoreboard {
            carried: 10,
            banked: 40,
            monkey: 20,
        };
        announcements.handle(
            &[
                started(),
                Event::PhaseChanged {
                    phase: GamePhase::Won,
                },
            ],
            scores,
            Duration::from_secs(3600),
        );

        assert_eq!(announcements.current(), Some(Announcement::Won { total: 50 }));
        assert_eq!(
            Announcement::Won { total: 50 }.to_string(),
            "You won! Final score: $50"
        );
    }
}
