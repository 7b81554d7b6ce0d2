use crate::command::Command;
use crate::game::{GameSession, Signal};
use crate::highscore::{HighScoreFile, HighScoreStore};
use crossterm::event::{poll, read, Event};
use rand::Rng;
use ratatui::{backend::Backend, Terminal};
use std::io;
use std::time::Instant;

/// The main loop: draw the session, feed it input until the next tick is due,
/// tick it, repeat
#[derive(Clone, Debug)]
pub(crate) struct App<R = rand::rngs::ThreadRng, S = HighScoreFile> {
    session: GameSession<R, S>,
    next_tick: Option<Instant>,
    quitting: bool,
}

impl<R: Rng, S: HighScoreStore> App<R, S> {
    pub(crate) fn new(session: GameSession<R, S>) -> App<R, S> {
        App {
            session,
            next_tick: None,
            quitting: false,
        }
    }

    pub(crate) fn run<B: Backend>(mut self, mut terminal: Terminal<B>) -> io::Result<()> {
        let r = self.main_loop(&mut terminal);
        if r.is_err() {
            // Quitting normally has already saved the score
            self.session.save_high_score();
        }
        r
    }

    fn main_loop<B: Backend>(&mut self, terminal: &mut Terminal<B>) -> io::Result<()> {
        while !self.quitting {
            terminal.draw(|frame| frame.render_widget(self.session.snapshot(), frame.area()))?;
            self.process_input()?;
        }
        Ok(())
    }

    /// Handle every input event that arrives before the next tick is due,
    /// plus any still queued once it is, then tick.
    fn process_input(&mut self) -> io::Result<()> {
        let period = self.session.tick_period();
        let when = *self.next_tick.get_or_insert_with(|| Instant::now() + period);
        while poll(when.saturating_duration_since(Instant::now()))? {
            self.handle_event(read()?);
            if self.quitting {
                return Ok(());
            }
        }
        self.next_tick = None;
        if let Some(signal) = self.session.tick() {
            self.handle_signal(signal);
        }
        Ok(())
    }

    fn handle_event(&mut self, event: Event) {
        let Some(cmd) = event
            .as_key_press_event()
            .and_then(Command::from_key_event)
        else {
            return;
        };
        tracing::trace!(?cmd, phase = ?self.session.phase(), "received command");
        if let Some(signal) = self.session.handle_command(cmd) {
            self.handle_signal(signal);
        }
    }

    fn handle_signal(&mut self, signal: Signal) {
        match signal {
            Signal::Started => {
                tracing::info!("run started");
                self.next_tick = None;
            }
            Signal::GameOver { score, high_score } => {
                tracing::info!(score, high_score, "run over");
            }
            Signal::Quit => {
                tracing::info!("quitting");
                self.quitting = true;
            }
        }
    }
}
