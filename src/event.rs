use std::sync::mpsc;
use std::thread;
use std::time::{Duration, Instant};

use crossterm::event::{self, KeyEvent, KeyEventKind};

use crate::error::{Error, Result};

pub enum Event {
    Key(KeyEvent),
    /// Wall time since the previous tick.
    Tick(Duration),
}

/// Terminal input on a background thread, interleaved with ticks that carry
/// the real elapsed time so game clocks do not drift under key repeat.
pub struct EventHandler {
    rx: mpsc::Receiver<Event>,
}

impl EventHandler {
    pub fn new(tick_rate: Duration) -> Self {
        let (tx, rx) = mpsc::channel();

        let spawned = thread::Builder::new()
            .name("input".into())
            .spawn(move || {
                let mut last_tick = Instant::now();
                loop {
                    let timeout = tick_rate.saturating_sub(last_tick.elapsed());
                    if event::poll(timeout).unwrap_or(false) {
                        if let Ok(crossterm::event::Event::Key(key)) = event::read() {
                            if key.kind == KeyEventKind::Press && tx.send(Event::Key(key)).is_err() {
                                return;
                            }
                        }
                    }
                    if last_tick.elapsed() >= tick_rate {
                        let now = Instant::now();
                        if tx.send(Event::Tick(now - last_tick)).is_err() {
                            return;
                        }
                        last_tick = now;
                    }
                }
            });
        if let Err(err) = spawned {
            log::error!("could not start input thread: {err}");
        }

        Self { rx }
    }

    pub fn next(&self) -> Result<Event> {
        self.rx
            .recv()
            .map_err(|e| Error::Io(std::io::Error::new(std::io::ErrorKind::BrokenPipe, e)))
    }
}
