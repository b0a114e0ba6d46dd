use crate::player::{Player, Request};
use derive_more::{Constructor, Display, Error};
use lib::{game::Game, trace::TraceWriter};
use std::io::{self, Write};
use tracing::{field::display, info, instrument, Span};

/// The reason why the [`Session`] was interrupted.
#[derive(Debug, Display, Error)]
pub enum SessionInterrupted<E> {
    #[display(fmt = "the player encountered an error")]
    Player(E),

    #[display(fmt = "failed to append to the trace")]
    Trace(io::Error),
}

/// An interactive game session.
///
/// Every attempt is appended to the trace, if there is one, before it's
/// reported back to the [`Player`].
#[derive(Debug, Constructor)]
pub struct Session<P, W: Write> {
    player: P,
    trace: Option<TraceWriter<W>>,
}

impl<P: Player, W: Write> Session<P, W> {
    /// Drives a [`Game`] until it's over or the player walks away.
    #[instrument(level = "debug", skip(self, game), err, fields(status))]
    pub fn run(mut self, mut game: Game) -> Result<Game, SessionInterrupted<P::Error>> {
        while !game.is_over() {
            let (whence, whither) = match self.player.request(game.board(), game.turn()) {
                Ok(Request::Move(whence, whither)) => (whence, whither),
                Ok(Request::Leave) => {
                    info!(side = game.turn().name(), plies = game.plies(), "session left");
                    break;
                }
                Err(e) => return Err(SessionInterrupted::Player(e)),
            };

            let Ok(record) = game.attempt(whence, whither) else {
                break;
            };

            if let Some(trace) = &mut self.trace {
                trace.append(&record).map_err(SessionInterrupted::Trace)?;
            }

            self.player.notify(&record, game.status()).map_err(SessionInterrupted::Player)?;
        }

        Span::current().record("status", display(game.status()));
        Ok(game)
    }
}
