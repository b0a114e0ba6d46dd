use crate::render::{Diagram, Verdict};
use anyhow::{ensure, Context, Error as Anyhow};
use clap::Parser;
use lib::trace::{Trace, PREFIX};
use std::fmt::Write;
use std::{fs, path::Path, path::PathBuf};
use tracing::instrument;

/// Replays a recorded game.
#[derive(Debug, Parser)]
#[clap(disable_help_flag = true, disable_version_flag = true)]
pub struct Replay {
    /// The common prefix of trace file names.
    #[clap(short, long, default_value = PREFIX)]
    prefix: String,

    /// The trace file, named like `StuckWin_01.csv`.
    path: PathBuf,
}

fn is_trace_file(prefix: &str, path: &Path) -> bool {
    match path.file_name().and_then(|n| n.to_str()) {
        Some(name) => name.starts_with(prefix) && name.ends_with(".csv"),
        None => false,
    }
}

impl Replay {
    #[instrument(level = "trace", skip(self), err)]
    pub fn execute(self) -> Result<(), Anyhow> {
        print!("{}", self.report()?);
        Ok(())
    }

    fn report(&self) -> Result<String, Anyhow> {
        let path = self.path.display();
        let prefix = &self.prefix;
        ensure!(is_trace_file(prefix, &self.path), "`{path}` is not a {prefix} trace file");

        let text = fs::read_to_string(&self.path).with_context(|| format!("failed to read `{path}`"))?;
        let trace: Trace = text.parse().with_context(|| format!("failed to replay `{path}`"))?;
        let replay = trace.replay();

        let mut report = String::new();
        for (i, step) in replay.steps.iter().enumerate() {
            let r = &step.record;
            write!(report, "{:>3}. {}: {} -> {} / {}", i + 1, r.side, r.whence, r.whither, step.observed)?;

            if !step.is_faithful() {
                write!(report, " (recorded {})", r.outcome)?;
            }

            writeln!(report)?;
        }

        writeln!(report, "{}", Diagram::new(replay.board))?;
        writeln!(report, "{}", Verdict::new(replay.winner, replay.moves))?;

        Ok(report)
    }
}
