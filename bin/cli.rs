use crate::applet::Applet;
use anyhow::Error as Anyhow;
use clap::Parser;
use std::{cmp::min, io::stderr};
use tracing::{instrument, Level};
use tracing_subscriber::fmt::{format::FmtSpan, layer};
use tracing_subscriber::{filter::Targets, prelude::*, registry, util::SubscriberInitExt};

/// Play StuckWin in a terminal, or replay a recorded game.
///
/// Without a subcommand a new game is started.
#[derive(Debug, Parser)]
#[clap(author, version, about)]
pub struct Cli {
    /// Verbosity level of the log written to stderr.
    #[clap(short, long)]
    #[cfg_attr(not(debug_assertions), clap(default_value_t = Level::INFO))]
    #[cfg_attr(debug_assertions, clap(default_value_t = Level::DEBUG))]
    verbosity: Level,

    #[clap(subcommand)]
    applet: Option<Applet>,
}

impl Cli {
    #[instrument(level = "trace", skip(self), err)]
    pub fn execute(self) -> Result<(), Anyhow> {
        let filter = Targets::new()
            .with_target("cli", self.verbosity)
            .with_target("lib", self.verbosity)
            .with_default(min(Level::WARN, self.verbosity));

        let writer = layer()
            .pretty()
            .with_span_events(FmtSpan::CLOSE)
            .with_writer(stderr);

        registry().with(filter).with(writer).init();

        self.applet.unwrap_or_default().execute()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn numeric_aliases_select_the_applet() {
        let cli = Cli::try_parse_from(["cli", "1"]).unwrap();
        assert!(matches!(cli.applet, Some(Applet::Play(_))));

        let cli = Cli::try_parse_from(["cli", "3", "StuckWin_01.csv"]).unwrap();
        assert!(matches!(cli.applet, Some(Applet::Replay(_))));
    }

    #[test]
    fn graphical_mode_is_not_available() {
        assert!(Cli::try_parse_from(["cli", "2"]).is_err());
    }

    #[test]
    fn play_accepts_a_trace_configuration() {
        let cli = Cli::try_parse_from(["cli", "-v", "warn", "play", "--trace", "(enabled: false)"]);
        assert!(matches!(cli.map(|c| c.applet), Ok(Some(Applet::Play(_)))));
    }

    #[test]
    fn malformed_trace_configuration_is_rejected() {
        assert!(Cli::try_parse_from(["cli", "play", "--trace", "(colors: 3)"]).is_err());
    }

    #[test]
    fn replay_requires_a_path() {
        assert!(Cli::try_parse_from(["cli", "replay"]).is_err());
    }
}
