use std::sync::mpsc::{self, Receiver, RecvTimeoutError};
use std::time::Duration;

use crossterm::event::{self, Event as CtEvent, KeyCode, KeyEvent, KeyModifiers};

/// What the player asked for, translated from raw terminal input at the
/// event-source boundary. Past this point nothing looks at key codes.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Intent {
    /// Enter or space: begin, submit, or play again, depending on screen.
    Confirm,
    Digit(char),
    Minus,
    Erase,
    Restart,
    Quit,
}

/// Unified event consumed by the app loop.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum QuizEvent {
    Input(Intent),
    Resize,
    Tick,
}

/// Map one key press to an intent. A key with no meaning anywhere in the
/// quiz maps to None and is dropped before it reaches the loop.
pub fn intent_for_key(key: KeyEvent) -> Option<Intent> {
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        return Some(Intent::Quit);
    }

    match key.code {
        KeyCode::Esc => Some(Intent::Quit),
        KeyCode::Enter | KeyCode::Char(' ') => Some(Intent::Confirm),
        KeyCode::Backspace => Some(Intent::Erase),
        KeyCode::Char('r') => Some(Intent::Restart),
        KeyCode::Char('-') => Some(Intent::Minus),
        KeyCode::Char(c) if c.is_ascii_digit() => Some(Intent::Digit(c)),
        _ => None,
    }
}

/// Where quiz events come from. Implementations own the translation from
/// whatever raw input they read.
pub trait EventSource: Send + 'static {
    /// Block for up to `timeout` waiting for an event.
    fn recv_timeout(&self, timeout: Duration) -> Result<QuizEvent, RecvTimeoutError>;
}

/// Production source: a reader thread translates crossterm events as they
/// arrive, so unmapped keys never even cross the channel.
pub struct CrosstermEventSource {
    rx: Receiver<QuizEvent>,
}

impl CrosstermEventSource {
    pub fn new() -> Self {
        let (tx, rx) = mpsc::channel();

        std::thread::spawn(move || loop {
            let event = match event::read() {
                Ok(CtEvent::Key(key)) => intent_for_key(key).map(QuizEvent::Input),
                Ok(CtEvent::Resize(_, _)) => Some(QuizEvent::Resize),
                Ok(_) => None,
                Err(_) => break,
            };

            if let Some(event) = event {
                if tx.send(event).is_err() {
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
    fn recv_timeout(&self, timeout: Duration) -> Result<QuizEvent, RecvTimeoutError> {
        self.rx.recv_timeout(timeout)
    }
}

/// Channel-fed source for headless tests; the test enqueues already
/// translated events.
pub struct TestEventSource {
    rx: Receiver<QuizEvent>,
}

impl TestEventSource {
    pub fn new(rx: Receiver<QuizEvent>) -> Self {
        Self { rx }
    }
}

impl EventSource for TestEventSource {
    fn recv_timeout(&self, timeout: Duration) -> Result<QuizEvent, RecvTimeoutError> {
        self.rx.recv_timeout(timeout)
    }
}

/// Pulls the next event, manufacturing a Tick whenever the source stays
/// quiet for one tick interval. The ticks are what drive the session's
/// feedback and celebration countdowns.
pub struct Runner<E: EventSource> {
    event_source: E,
    tick_interval: Duration,
}

impl<E: EventSource> Runner<E> {
    pub fn new(event_source: E, tick_interval: Duration) -> Self {
        Self {
            event_source,
            tick_interval,
        }
    }

    pub fn step(&self) -> QuizEvent {
        match self.event_source.recv_timeout(self.tick_interval) {
            Ok(ev) => ev,
            Err(RecvTimeoutError::Timeout) | Err(RecvTimeoutError::Disconnected) => {
                QuizEvent::Tick
            }
        }
    }
}
