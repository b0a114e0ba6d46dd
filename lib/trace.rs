use crate::hex::{Board, Mode, Outcome, ParseOutcomeError, ParseSideError, ParseSquareError};
use crate::hex::{ParseTargetError, Side, Square, Target};
use derive_more::{Constructor, Display, Error, From};
use std::fmt::{self, Display};
use std::io::{self, Write};
use std::str::FromStr;
use tracing::{instrument, warn};

/// The header row of every trace.
pub const HEADER: &str = "color,start,dest,result";

/// The prefix shared by the names of trace files.
pub const PREFIX: &str = "StuckWin";

/// One move attempt and its [`Outcome`].
#[derive(Debug, Display, Copy, Clone, Eq, PartialEq, Hash, Constructor)]
#[display(fmt = "{},{},{},{}", side, whence, whither, outcome)]
pub struct Record {
    pub side: Side,
    pub whence: Square,
    pub whither: Target,
    pub outcome: Outcome,
}

/// The reason why parsing [`Record`] failed.
#[derive(Debug, Display, Copy, Clone, Eq, PartialEq, Hash, Error, From)]
pub enum ParseRecordError {
    #[display(fmt = "expected 4 comma separated fields")]
    #[from(ignore)]
    InvalidFieldCount,
    #[display(fmt = "invalid side")]
    InvalidSide(ParseSideError),
    #[display(fmt = "invalid source")]
    InvalidSource(ParseSquareError),
    #[display(fmt = "invalid destination")]
    InvalidDestination(ParseTargetError),
    #[display(fmt = "invalid result")]
    InvalidOutcome(ParseOutcomeError),
}

impl FromStr for Record {
    type Err = ParseRecordError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let fields: Vec<_> = s.split(',').map(str::trim).collect();
        let [side, whence, whither, outcome] = &fields[..] else {
            return Err(ParseRecordError::InvalidFieldCount);
        };

        Ok(Record {
            side: side.parse()?,
            whence: whence.parse()?,
            whither: whither.parse()?,
            outcome: outcome.parse()?,
        })
    }
}

/// The log of every move attempt of one game session.
#[derive(Debug, Default, Clone, Eq, PartialEq, Hash)]
pub struct Trace {
    /// Free form lines identifying the session.
    pub comments: Vec<String>,
    pub records: Vec<Record>,
}

impl Trace {
    /// Replays every [`Record`] from the starting layout.
    ///
    /// Each record is played by its recorded side, whatever its recorded
    /// [`Outcome`], so the result can be compared against the recording.
    #[instrument(level = "debug", skip(self), fields(records = self.records.len()))]
    pub fn replay(&self) -> Replay {
        let mut board = Board::default();
        let mut next = Side::Blue;
        let mut moves = 0;

        let steps = self
            .records
            .iter()
            .map(|&record| {
                let observed = board.play(record.side, record.whence, record.whither, Mode::Real);

                if observed.is_ok() {
                    moves += 1;
                    next = !record.side;
                }

                if observed != record.outcome {
                    warn!(%record, %observed, "replay diverged from the recording");
                }

                Step { record, observed }
            })
            .collect();

        Replay {
            winner: board.winner(next),
            board,
            steps,
            moves,
        }
    }
}

impl Display for Trace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for comment in &self.comments {
            writeln!(f, "# {comment}")?;
        }

        writeln!(f, "{HEADER}")?;

        for record in &self.records {
            writeln!(f, "{record}")?;
        }

        Ok(())
    }
}

/// The reason why parsing [`Trace`] failed.
#[derive(Debug, Display, Copy, Clone, Eq, PartialEq, Hash, Error)]
#[display(fmt = "failed to parse trace at line {}, {}", line, error)]
pub struct ParseTraceError {
    /// The 1-based line number.
    #[error(not(source))]
    pub line: usize,
    #[error(source)]
    pub error: ParseRecordError,
}

impl FromStr for Trace {
    type Err = ParseTraceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut trace = Trace::default();

        for (i, line) in s.lines().map(str::trim).enumerate() {
            if let Some(comment) = line.strip_prefix('#') {
                trace.comments.push(comment.trim().to_string());
            } else if !line.is_empty() && line != HEADER {
                let record = line
                    .parse()
                    .map_err(|error| ParseTraceError { line: i + 1, error })?;

                trace.records.push(record);
            }
        }

        Ok(trace)
    }
}

/// A replayed [`Record`] and the [`Outcome`] observed when replaying it.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub struct Step {
    pub record: Record,
    pub observed: Outcome,
}

impl Step {
    /// Whether replaying reproduced the recorded [`Outcome`].
    pub fn is_faithful(&self) -> bool {
        self.record.outcome == self.observed
    }
}

/// The result of replaying a [`Trace`].
#[derive(Debug, Clone, Eq, PartialEq, Hash)]
pub struct Replay {
    /// The board after the last step.
    pub board: Board,
    pub steps: Vec<Step>,
    /// The number of accepted moves.
    pub moves: usize,
    /// The winner, if the side that would move next is stuck.
    pub winner: Option<Side>,
}

impl Replay {
    /// An iterator over the steps whose outcome differs from the recording.
    pub fn diverged(&self) -> impl Iterator<Item = &Step> + '_ {
        self.steps.iter().filter(|s| !s.is_faithful())
    }
}

/// Writes a [`Trace`] incrementally, one [`Record`] at a time.
#[derive(Debug)]
pub struct TraceWriter<W: Write> {
    writer: W,
}

impl<W: Write> TraceWriter<W> {
    /// Starts a trace with some comments followed by the header.
    pub fn new<I>(mut writer: W, comments: I) -> io::Result<Self>
    where
        I: IntoIterator,
        I::Item: Display,
    {
        for comment in comments {
            writeln!(writer, "# {comment}")?;
        }

        writeln!(writer, "{HEADER}")?;
        writer.flush()?;

        Ok(TraceWriter { writer })
    }

    /// Appends a [`Record`] and flushes it.
    #[instrument(level = "trace", skip(self, record), err, fields(%record))]
    pub fn append(&mut self, record: &Record) -> io::Result<()> {
        writeln!(self.writer, "{record}")?;
        self.writer.flush()
    }

    /// Gives back the underlying writer.
    pub fn into_inner(self) -> W {
        self.writer
    }
}

/// The name of the next trace file, given the names of existing files.
///
/// Trace files are numbered `<prefix>_NN.csv`, the next number is one more
/// than the highest one found.
pub fn next_file_name<I>(prefix: &str, existing: I) -> String
where
    I: IntoIterator,
    I::Item: AsRef<str>,
{
    let highest = existing
        .into_iter()
        .filter_map(|name| file_number(prefix, name.as_ref()))
        .max()
        .unwrap_or(0);

    format!("{prefix}_{:02}.csv", highest.saturating_add(1))
}

fn file_number(prefix: &str, name: &str) -> Option<u32> {
    let digits = name.strip_prefix(prefix)?.strip_prefix('_')?.strip_suffix(".csv")?;
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }

    digits.parse().ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::{prelude::*, sample::Selector};
    use std::str;
    use test_strategy::proptest;

    fn labeled() -> impl Strategy<Value = Square> {
        (0i8..26, 0i8..10).prop_map(|(r, c)| Square::new(r, c))
    }

    fn record() -> impl Strategy<Value = Record> {
        let whither = prop_oneof![labeled().prop_map(Target::Square), Just(Target::Quit)];
        (any::<Side>(), labeled(), whither, any::<Outcome>())
            .prop_map(|(s, whence, whither, o)| Record::new(s, whence, whither, o))
    }

    #[test]
    fn record_is_printed_as_comma_separated_fields() {
        let r = Record::new(
            Side::Red,
            "A4".parse().unwrap(),
            Target::Quit,
            Outcome::Quit,
        );

        assert_eq!(r.to_string(), "R,A4,q,QUIT");
    }

    #[proptest]
    fn parsing_printed_record_is_an_identity(#[strategy(record())] r: Record) {
        assert_eq!(r.to_string().parse(), Ok(r));
    }

    #[test]
    fn parsing_record_fails_for_wrong_field_count() {
        assert_eq!(
            "B,D2,C2".parse::<Record>(),
            Err(ParseRecordError::InvalidFieldCount)
        );

        assert_eq!(
            "B,D2,C2,OK,OK".parse::<Record>(),
            Err(ParseRecordError::InvalidFieldCount)
        );
    }

    #[test]
    fn parsing_record_reports_the_invalid_field() {
        assert!(matches!(
            "X,D2,C2,OK".parse::<Record>(),
            Err(ParseRecordError::InvalidSide(_))
        ));

        assert!(matches!(
            "B,d2,C2,OK".parse::<Record>(),
            Err(ParseRecordError::InvalidSource(_))
        ));

        assert!(matches!(
            "B,D2,C22,OK".parse::<Record>(),
            Err(ParseRecordError::InvalidDestination(_))
        ));

        assert!(matches!(
            "B,D2,C2,FINE".parse::<Record>(),
            Err(ParseRecordError::InvalidOutcome(_))
        ));
    }

    #[test]
    fn trace_skips_comments_header_and_blank_lines() {
        let s = "# StuckWin Game\n# played in a terminal\ncolor,start,dest,result\n\nB,D2,C2,OK\nR,A4,B3,OK\n";
        let trace: Trace = s.parse().unwrap();

        assert_eq!(trace.comments, vec!["StuckWin Game", "played in a terminal"]);
        assert_eq!(trace.records.len(), 2);
        assert_eq!(trace.to_string(), s.replace("\n\n", "\n"));
    }

    #[test]
    fn trace_errors_report_the_line_number() {
        let s = "# comment\ncolor,start,dest,result\nB,D2,C2,OK\nB,D2\n";
        assert_eq!(
            s.parse::<Trace>(),
            Err(ParseTraceError {
                line: 4,
                error: ParseRecordError::InvalidFieldCount
            })
        );
    }

    #[test]
    fn legacy_traces_can_be_parsed() {
        let s = "color,start,dest,result\nB,D2,A4,DEST_NOT_FREE\nB,D2,C2,OK\nR,B4,C3,EXT_BOARD\nR,A4,q,EXIT\n";
        let trace: Trace = s.parse().unwrap();
        let outcomes: Vec<_> = trace.records.iter().map(|r| r.outcome).collect();

        assert_eq!(
            outcomes,
            vec![
                Outcome::DestOccupied,
                Outcome::Ok,
                Outcome::OffBoard,
                Outcome::Quit
            ]
        );
    }

    #[proptest]
    fn replaying_a_recorded_game_reproduces_it(selector: Selector, #[strategy(0usize..64)] n: usize) {
        let mut game = crate::game::Game::default();
        let mut trace = Trace::default();

        for i in 0..n {
            if game.is_over() {
                break;
            }

            let turn = game.turn();
            let m = selector.select(game.board().moves(turn));
            let whither = if i % 5 == 4 {
                // an occasional rejected attempt
                Target::Square(m.whence)
            } else {
                Target::Square(m.whither)
            };

            trace.records.push(game.attempt(m.whence, whither)?);
        }

        let replay = trace.to_string().parse::<Trace>()?.replay();
        assert_eq!(replay.diverged().count(), 0);
        assert_eq!(replay.board, *game.board());
        assert_eq!(replay.moves, game.plies());
        assert_eq!(replay.winner, game.status().winner());
    }

    #[test]
    fn replay_reports_divergent_steps() {
        let s = "color,start,dest,result\nB,D2,C2,TOO_FAR\nR,A4,B3,OK\n";
        let replay = s.parse::<Trace>().unwrap().replay();

        let divergences: Vec<_> = replay.diverged().collect();
        assert_eq!(divergences.len(), 1);
        assert_eq!(divergences[0].observed, Outcome::Ok);
        assert_eq!(replay.moves, 2);
    }

    #[proptest]
    fn trace_writer_produces_parsable_traces(
        comments: Vec<String>,
        #[strategy(proptest::collection::vec(record(), 0..32))] records: Vec<Record>,
    ) {
        let comments: Vec<_> = comments.iter().map(|c| c.replace(['\n', '\r'], " ")).collect();

        let mut writer = TraceWriter::new(Vec::new(), &comments)?;
        for r in &records {
            writer.append(r)?;
        }

        let buffer = writer.into_inner();
        let trace: Trace = str::from_utf8(&buffer)?.parse()?;
        let trimmed: Vec<_> = comments.iter().map(|c| c.trim().to_string()).collect();
        assert_eq!(trace.comments, trimmed);
        assert_eq!(trace.records, records);
    }

    #[test]
    fn next_file_name_follows_the_highest_number() {
        let names = ["StuckWin_03.csv", "StuckWin_11.csv", "notes.txt", "StuckWin_x.csv"];
        assert_eq!(next_file_name(PREFIX, names), "StuckWin_12.csv");
    }

    #[test]
    fn next_file_name_does_not_overflow() {
        let names = ["StuckWin_4294967295.csv", "StuckWin_99999999999.csv"];
        assert_eq!(next_file_name(PREFIX, names), "StuckWin_4294967295.csv");
    }

    #[test]
    fn next_file_name_is_zero_padded() {
        assert_eq!(next_file_name(PREFIX, Vec::<String>::new()), "StuckWin_01.csv");
        assert_eq!(next_file_name(PREFIX, ["StuckWin_08.csv"]), "StuckWin_09.csv");
        assert_eq!(next_file_name(PREFIX, ["StuckWin_09.csv"]), "StuckWin_10.csv");
    }
}
