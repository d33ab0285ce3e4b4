//! Session controller: page state machine, countdown and key routing.
//!
//! All state changes go through [`Session::update`], which consumes one
//! [`Event`] and reports what the driver should do next as [`Effect`]s. It
//! performs no I/O, so restart (which needs a fresh target) is left to the
//! caller.

use std::time::Duration;

use log::{debug, info};

use crate::clock::Countdown;
use crate::error::Result;
use crate::ledger::Ledger;
use crate::metrics::{AccuracyCounters, Metrics};
use crate::router::{self, Routed};
use crate::source::Target;

#[derive(Debug, Clone, Copy, PartialEq, Eq, strum_macros::Display)]
pub enum Page {
    InProgress,
    Results,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Backspace,
    Restart,
    Quit,
    Up,
    Down,
    Confirm,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyPress {
    Char(char),
    Command(Command),
}

/// Everything the event loop can deliver to a session
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Event {
    KeyPress(KeyPress),
    Tick(Duration),
    Timeout,
    Resize(u16, u16),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Effect {
    Render,
    /// The session just moved to the results page
    Finished,
    Restart,
    Quit,
}

#[derive(Debug)]
pub struct Session {
    ledger: Box<dyn Ledger>,
    counters: AccuracyCounters,
    clock: Countdown,
    page: Page,
}

impl Session {
    pub fn new(target: Target, duration_secs: u64) -> Result<Self> {
        Ok(Self::with_ledger(target.into_ledger()?, duration_secs))
    }

    pub fn with_ledger(ledger: Box<dyn Ledger>, duration_secs: u64) -> Self {
        info!(
            "session started: {} {} units, {duration_secs}s",
            ledger.len(),
            ledger.unit()
        );
        Self {
            ledger,
            counters: AccuracyCounters::default(),
            clock: Countdown::new(duration_secs),
            page: Page::InProgress,
        }
    }

    pub fn update(&mut self, event: Event) -> Vec<Effect> {
        match event {
            Event::KeyPress(KeyPress::Command(Command::Quit)) => return vec![Effect::Quit],
            Event::KeyPress(KeyPress::Command(Command::Restart)) => return vec![Effect::Restart],
            // the terminal backend picks up the new size on the next draw
            Event::Resize(..) => return vec![Effect::Render],
            _ => {}
        }

        if self.page == Page::Results {
            return vec![];
        }

        match event {
            Event::Tick(elapsed) => {
                self.clock.tick(elapsed);
                if self.clock.is_expired() {
                    self.finish()
                } else {
                    vec![Effect::Render]
                }
            }
            Event::Timeout => {
                self.clock.expire();
                self.finish()
            }
            Event::KeyPress(KeyPress::Command(Command::Backspace)) => {
                match router::apply_backspace(self.ledger.as_mut()) {
                    Routed::Ignored => vec![],
                    _ => vec![Effect::Render],
                }
            }
            Event::KeyPress(KeyPress::Char(c)) => {
                match router::apply_char(self.ledger.as_mut(), &mut self.counters, c) {
                    Routed::Completed => self.finish(),
                    Routed::Edited => vec![Effect::Render],
                    Routed::Ignored => vec![],
                }
            }
            Event::KeyPress(KeyPress::Command(_)) | Event::Resize(..) => vec![],
        }
    }

    fn finish(&mut self) -> Vec<Effect> {
        self.page = Page::Results;
        let metrics = self.metrics();
        info!(
            "session finished after {}s: {} wpm, {}% accuracy",
            self.clock.seconds_elapsed(),
            metrics.wpm,
            metrics.accuracy
        );
        debug!("counters at finish: {:?}", self.counters);
        vec![Effect::Finished, Effect::Render]
    }

    pub fn page(&self) -> Page {
        self.page
    }

    pub fn is_finished(&self) -> bool {
        self.page == Page::Results
    }

    pub fn ledger(&self) -> &dyn Ledger {
        self.ledger.as_ref()
    }

    pub fn counters(&self) -> &AccuracyCounters {
        &self.counters
    }

    pub fn clock(&self) -> &Countdown {
        &self.clock
    }

    /// Recomputed from current state on every call
    pub fn metrics(&self) -> Metrics {
        Metrics::compute(
            self.ledger.as_ref(),
            &self.counters,
            self.clock.seconds_elapsed(),
        )
    }
}
