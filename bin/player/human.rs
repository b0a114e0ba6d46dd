use crate::{io::Io, player::Player, player::Request, render::Diagram};
use derive_more::{Constructor, From};
use lib::game::Status;
use lib::hex::{Board, Side};
use lib::trace::Record;
use std::io::{self, Read, Write};
use tracing::instrument;

/// A [`Player`] typing requests in a terminal.
#[derive(Debug, From, Constructor)]
pub struct Human<W: Write, R: Read> {
    io: Io<W, R>,
}

impl<W: Write, R: Read> Player for Human<W, R> {
    type Error = io::Error;

    #[instrument(level = "trace", skip(self, board), err)]
    fn request(&mut self, board: &Board, side: Side) -> io::Result<Request> {
        self.io.send(Diagram::new(*board))?;

        loop {
            self.io.send(format_args!(
                "{} to move, `<source> <destination>` or `{}`:",
                side.name(),
                lib::hex::Target::QUIT
            ))?;

            self.io.flush()?;

            match self.io.recv()?.parse() {
                Ok(r) => break Ok(r),
                Err(e) => self.io.send(e)?,
            }
        }
    }

    #[instrument(level = "trace", skip(self), err)]
    fn notify(&mut self, record: &Record, status: Status) -> io::Result<()> {
        self.io.send(format_args!(
            "{} -> {} / {}, {}",
            record.whence, record.whither, record.outcome, status
        ))?;

        self.io.flush()
    }
}
