mod app;
mod command;
mod config;
mod consts;
mod game;
mod highscore;
mod logging;
mod util;
mod view;
use crate::app::App;
use crate::config::Config;
use crate::game::{GameSession, Grid};
use crate::highscore::HighScoreFile;
use anyhow::Context;
use std::io::ErrorKind;
use std::process::ExitCode;

fn main() -> ExitCode {
    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e)
            if e.downcast_ref::<std::io::Error>()
                .is_some_and(|e| e.kind() == ErrorKind::BrokenPipe) =>
        {
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("arcsnake: {e:?}");
            ExitCode::from(2)
        }
    }
}

fn run() -> anyhow::Result<()> {
    let config = match Config::default_path() {
        Some(path) => Config::load(&path, true)
            .with_context(|| format!("failed to load configuration from {}", path.display()))?,
        None => Config::default(),
    };
    if let Some(path) = config.log_file() {
        if let Err(e) = logging::init(&path) {
            eprintln!("arcsnake: logging disabled: {e}");
        }
    }
    let store = HighScoreFile::new(config.high_score_file());
    tracing::info!(high_score_file = %store.path().display(), "starting up");
    let session = GameSession::new(Grid::default(), rand::rng(), store);
    let terminal = ratatui::init();
    let r = App::new(session).run(terminal);
    ratatui::restore();
    r.context("terminal I/O failed")
}
