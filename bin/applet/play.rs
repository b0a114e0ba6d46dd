use crate::{config::TraceConfig, io::Io, player::Human, render::Verdict, session::Session};
use anyhow::{Context, Error as Anyhow};
use clap::Parser;
use lib::game::Game;
use std::io::{stdin, stdout};
use std::time::{SystemTime, UNIX_EPOCH};
use tracing::instrument;

/// Plays a game in the terminal, both sides typing their moves.
#[derive(Debug, Default, Parser)]
#[clap(disable_help_flag = true, disable_version_flag = true)]
pub struct Play {
    /// Where the trace of the game is written, in RON notation.
    #[clap(short, long, default_value_t)]
    trace: TraceConfig,
}

impl Play {
    #[instrument(level = "trace", skip(self), err)]
    pub fn execute(self) -> Result<(), Anyhow> {
        let now = SystemTime::now().duration_since(UNIX_EPOCH)?.as_secs();
        let comments = [
            "StuckWin Game".to_string(),
            format!("game played with the terminal interface (unix time {now})"),
        ];

        let trace = match self.trace.open(comments).context("failed to create the trace file")? {
            None => None,
            Some((path, writer)) => {
                println!("the trace of this game is written to {}", path.display());
                Some(writer)
            }
        };

        let human = Human::new(Io::new(stdout(), stdin()));
        let game = Session::new(human, trace).run(Game::default())?;
        println!("{}", Verdict::new(game.status().winner(), game.plies()));

        Ok(())
    }
}
