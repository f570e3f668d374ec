use std::io;
use std::sync::mpsc::{self, RecvTimeoutError};
use std::thread;
use std::time::{Duration, Instant};

use crossterm::event::{self, KeyEvent, KeyEventKind};
use log::error;

use crate::error::{GameError, Result};

const POLL_INTERVAL: Duration = Duration::from_millis(100);

#[derive(Debug)]
pub enum Event {
    Key(KeyEvent),
    Resize(u16, u16),
    Tick,
}

/// Input arrives from a reader thread over a channel; ticks are produced
/// here, on the thread that owns the game state.
pub struct EventHandler {
    rx: mpsc::Receiver<io::Result<Event>>,
    tick_rate: Duration,
    last_tick: Instant,
}

impl EventHandler {
    pub fn new(tick_rate: Duration) -> Self {
        let (tx, rx) = mpsc::channel();

        thread::spawn(move || loop {
            let event = match event::poll(POLL_INTERVAL) {
                Ok(false) => continue,
                Ok(true) => match event::read() {
                    Ok(crossterm::event::Event::Key(key)) if key.kind == KeyEventKind::Press => {
                        Ok(Event::Key(key))
                    }
                    Ok(crossterm::event::Event::Resize(w, h)) => Ok(Event::Resize(w, h)),
                    Ok(_) => continue,
                    Err(e) => Err(e),
                },
                Err(e) => Err(e),
            };
            let failed = event.is_err();
            if let Err(e) = &event {
                error!("terminal input failed: {}", e);
            }
            if tx.send(event).is_err() || failed {
                return;
            }
        });

        Self::from_receiver(rx, tick_rate)
    }

    /// Handler fed by an arbitrary sender, without a terminal reader.
    pub fn from_receiver(rx: mpsc::Receiver<io::Result<Event>>, tick_rate: Duration) -> Self {
        Self {
            rx,
            tick_rate,
            last_tick: Instant::now(),
        }
    }

    pub fn set_tick_rate(&mut self, tick_rate: Duration) {
        self.tick_rate = tick_rate;
    }

    /// Next input event, or `Tick` once the tick interval has elapsed.
    pub fn next(&mut self) -> Result<Event> {
        let elapsed = self.last_tick.elapsed();
        if elapsed >= self.tick_rate {
            self.last_tick = Instant::now();
            return Ok(Event::Tick);
        }
        match self.rx.recv_timeout(self.tick_rate - elapsed) {
            Ok(Ok(event)) => Ok(event),
            Ok(Err(e)) => Err(GameError::Input(e)),
            Err(RecvTimeoutError::Timeout) => {
                self.last_tick = Instant::now();
                Ok(Event::Tick)
            }
            Err(RecvTimeoutError::Disconnected) => Err(GameError::Channel),
        }
    }
}
