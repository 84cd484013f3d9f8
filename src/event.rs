use std::sync::mpsc;
use std::thread;
use std::time::Duration;

use crossterm::event::{self, Event, KeyEvent, KeyEventKind};

pub enum AppEvent {
    Key(KeyEvent),
    /// Committed text delivered in one piece (terminal IME or paste).
    Text(String),
    /// No input within one tick; the game clock still moves.
    Tick,
    Resize,
}

/// Reads terminal events on a background thread so the belt keeps moving
/// while the player is idle.
pub struct EventHandler {
    rx: mpsc::Receiver<AppEvent>,
    _tx: mpsc::Sender<AppEvent>,
}

impl EventHandler {
    pub fn new(tick_rate: Duration) -> Self {
        let (tx, rx) = mpsc::channel();
        let _tx = tx.clone();

        thread::spawn(move || {
            loop {
                let next = if event::poll(tick_rate).unwrap_or(false) {
                    match event::read() {
                        // Release/repeat reports would double every jamo on
                        // terminals with the kitty keyboard protocol.
                        Ok(Event::Key(key)) if key.kind == KeyEventKind::Press => {
                            Some(AppEvent::Key(key))
                        }
                        Ok(Event::Paste(text)) => Some(AppEvent::Text(text)),
                        Ok(Event::Resize(..)) => Some(AppEvent::Resize),
                        Ok(_) => None,
                        Err(e) => {
                            log::error!("terminal read failed: {e}");
                            return;
                        }
                    }
                } else {
                    Some(AppEvent::Tick)
                };
                if let Some(ev) = next {
                    if tx.send(ev).is_err() {
                        return;
                    }
                }
            }
        });

        Self { rx, _tx }
    }

    pub fn next(&self) -> anyhow::Result<AppEvent> {
        Ok(self.rx.recv()?)
    }
}
