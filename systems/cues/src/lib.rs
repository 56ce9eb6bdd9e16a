#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Presentation-side timers that turn elapsed frame time into engine commands.
//!
//! The world never measures time. It raises the tiger's `moving` flag and
//! parks picked-up dollars in the collecting state, and this system schedules
//! the follow-up commands once the adapter's clock has advanced far enough.

use std::time::Duration;

use tiger_run_core::{
    Command, DollarId, Event, MoveRejection, COLLECT_CUE_DURATION, MOVE_CUE_DURATION,
};

/// Configuration parameters required to construct the cue system.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Config {
    move_cue: Duration,
    collect_cue: Duration,
}

impl Config {
    /// Creates a configuration using the provided cue lengths.
    #[must_use]
    pub const fn new(move_cue: Duration, collect_cue: Duration) -> Self {
        Self {
            move_cue,
            collect_cue,
        }
    }

    /// Longest cue; advancing by this much settles every pending cue.
    #[must_use]
    pub fn longest(&self) -> Duration {
        self.move_cue.max(self.collect_cue)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::new(MOVE_CUE_DURATION, COLLECT_CUE_DURATION)
    }
}

/// Pure system that emits `SettleTiger` and `AcknowledgeCollected` commands.
#[derive(Debug)]
pub struct Cues {
    config: Config,
    move_remaining: Option<Duration>,
    fades: Vec<Fade>,
}

impl Cues {
    /// Creates a new cue system using the supplied configuration.
    #[must_use]
    pub fn new(config: Config) -> Self {
        Self {
            config,
            move_remaining: None,
            fades: Vec::new(),
        }
    }

    /// Configuration the system was built with.
    #[must_use]
    pub const fn config(&self) -> Config {
        self.config
    }

    /// Consumes world events and the elapsed frame time to emit follow-up commands.
    ///
    /// Events are registered before `dt` is applied, so a cue started by this
    /// batch expires in the same call when `dt` already covers its length.
    pub fn handle(&mut self, events: &[Event], dt: Duration, out: &mut Vec<Command>) {
        for event in events {
            match event {
                Event::GameStarted { .. } => {
                    self.move_remaining = None;
                    self.fades.clear();
                }
                Event::TigerTurned { .. } | Event::TigerMoved { .. } | Event::TigerCaught { .. } => {
                    self.move_remaining = Some(self.config.move_cue);
                }
                Event::MoveRejected { reason, .. } if *reason != MoveRejection::NotPlaying => {
                    self.move_remaining = Some(self.config.move_cue);
                }
                Event::DollarCollected { dollar, .. } => {
                    self.fades.retain(|fade| fade.dollar != *dollar);
                    self.fades.push(Fade {
                        dollar: *dollar,
                        remaining: self.config.collect_cue,
                    });
                }
                _ => {}
            }
        }

        if let Some(remaining) = self.move_remaining {
            if remaining <= dt {
                self.move_remaining = None;
                out.push(Command::SettleTiger);
            } else {
                self.move_remaining = Some(remaining - dt);
            }
        }

        let mut finished: Vec<DollarId> = Vec::new();
        self.fades.retain_mut(|fade| {
            if fade.remaining <= dt {
                finished.push(fade.dollar);
                false
            } else {
                fade.remaining -= dt;
                true
            }
        });
        finished.sort_unstable();
        out.extend(
            finished
                .into_iter()
                .map(|dollar| Command::AcknowledgeCollected { dollar }),
        );
    }

    /// Fraction of the fade already played for a collecting dollar, in `0.0..=1.0`.
    #[must_use]
    pub fn fade_progress(&self, dollar: DollarId) -> Option<f32> {
        let fade = self.fades.iter().find(|fade| fade.dollar == dollar)?;
        if self.config.collect_cue.is_zero() {
            return Some(1.0);
        }
        let remaining = fade.remaining.as_secs_f32() / self.config.collect_cue.as_secs_f32();
        Some((1.0 - remaining).clamp(0.0, 1.0))
    }

    /// Reports whether no cue is pending.
    #[must_use]
    pub fn is_idle(&self) -> bool {
        self.move_remaining.is_none() && self.fades.is_empty()
    }
}

impl Default for Cues {
    fn default() -> Self {
        Self::new(Config::default())
    }
}

#[derive(Clone, Copy, Debug)]
struct Fade {
    dollar: DollarId,
    remaining: Duration,
}
