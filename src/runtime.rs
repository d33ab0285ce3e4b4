use std::sync::mpsc::{self, Receiver, RecvTimeoutError};
use std::time::{Duration, Instant};

use crossterm::event::{self, Event as CtEvent, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use log::warn;

use crate::session::{Command, Event, KeyPress};

/// Source of terminal events (keyboard, resize, etc.)
pub trait EventSource: Send + 'static {
    /// Block for up to `timeout` waiting for an event.
    /// Returns Ok(event) if an event arrives before the timeout, or Err(Timeout) if it expires.
    fn recv_timeout(&self, timeout: Duration) -> Result<Event, RecvTimeoutError>;
}

/// Map a crossterm key to a session key press. Keys with no meaning yield None.
pub fn translate_key(key: KeyEvent) -> Option<KeyPress> {
    if key.kind != KeyEventKind::Press {
        return None;
    }

    let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
    match key.code {
        KeyCode::Char('c') if ctrl => Some(KeyPress::Command(Command::Quit)),
        KeyCode::Char(_) if ctrl => None,
        KeyCode::Char(c) => Some(KeyPress::Char(c)),
        KeyCode::Backspace => Some(KeyPress::Command(Command::Backspace)),
        KeyCode::Tab | KeyCode::Esc => Some(KeyPress::Command(Command::Restart)),
        KeyCode::Up => Some(KeyPress::Command(Command::Up)),
        KeyCode::Down => Some(KeyPress::Command(Command::Down)),
        KeyCode::Enter => Some(KeyPress::Command(Command::Confirm)),
        _ => None,
    }
}

/// Production event source using crossterm
pub struct CrosstermEventSource {
    rx: Receiver<Event>,
}

impl CrosstermEventSource {
    pub fn new() -> Self {
        let (tx, rx) = mpsc::channel();

        std::thread::spawn(move || loop {
            let evt = match event::read() {
                Ok(CtEvent::Key(key)) => translate_key(key).map(Event::KeyPress),
                Ok(CtEvent::Resize(w, h)) => Some(Event::Resize(w, h)),
                Ok(_) => None,
                Err(e) => {
                    warn!("terminal event reader stopped: {e}");
                    break;
                }
            };

            if let Some(evt) = evt {
                if tx.send(evt).is_err() {
                    break;
                }
            }
        });

        Self { rx }
    }
}

impl Default for CrosstermEventSource {
    fn default() -> Self {
        Self::new()
    }
}

impl EventSource for CrosstermEventSource {
    fn recv_timeout(&self, timeout: Duration) -> Result<Event, RecvTimeoutError> {
        self.rx.recv_timeout(timeout)
    }
}

/// Configurable ticker interface
pub trait Ticker: Send + Sync + 'static {
    fn interval(&self) -> Duration;
}

/// A zero interval would make every step a tick and starve input
pub const MIN_TICK_INTERVAL: Duration = Duration::from_millis(1);

/// Fixed interval ticker, never faster than [`MIN_TICK_INTERVAL`]
#[derive(Clone, Copy, Debug)]
pub struct FixedTicker {
    interval: Duration,
}

impl FixedTicker {
    pub fn new(interval: Duration) -> Self {
        Self {
            interval: interval.max(MIN_TICK_INTERVAL),
        }
    }
}

impl Ticker for FixedTicker {
    fn interval(&self) -> Duration {
        self.interval
    }
}

/// Test event source for unit tests
pub struct TestEventSource {
    rx: Receiver<Event>,
}

impl TestEventSource {
    pub fn new(rx: Receiver<Event>) -> Self {
        Self { rx }
    }
}

impl EventSource for TestEventSource {
    fn recv_timeout(&self, timeout: Duration) -> Result<Event, RecvTimeoutError> {
        self.rx.recv_timeout(timeout)
    }
}

/// Merges input events and ticks into one serial stream
pub struct Runner<E: EventSource, T: Ticker> {
    event_source: E,
    ticker: T,
    last_tick: Instant,
}

impl<E: EventSource, T: Ticker> Runner<E, T> {
    pub fn new(event_source: E, ticker: T) -> Self {
        Self {
            event_source,
            ticker,
            last_tick: Instant::now(),
        }
    }

    /// Returns the next event, or a Tick carrying the real time since the
    /// previous tick once the interval has passed. Steady typing cannot
    /// starve the clock.
    pub fn step(&mut self) -> Event {
        let interval = self.ticker.interval();
        let since = self.last_tick.elapsed();
        if since >= interval {
            return self.tick();
        }

        match self.event_source.recv_timeout(interval - since) {
            Ok(ev) => ev,
            Err(RecvTimeoutError::Timeout) => self.tick(),
            Err(RecvTimeoutError::Disconnected) => {
                // no more input; keep the clock running at the tick rate
                let since = self.last_tick.elapsed();
                if since < interval {
                    std::thread::sleep(interval - since);
                }
                self.tick()
            }
        }
    }

    fn tick(&mut self) -> Event {
        let now = Instant::now();
        let elapsed = now - self.last_tick;
        self.last_tick = now;
        Event::Tick(elapsed)
    }
}
