use derive_more::{Display, Error, From};
use lib::trace::{next_file_name, TraceWriter, PREFIX};
use serde::{Deserialize, Serialize};
use std::fmt::{self, Display};
use std::fs::{self, File, OpenOptions};
use std::{io, path::PathBuf, str::FromStr};
use tracing::{info, instrument};

/// The reason why parsing trace configuration failed.
#[derive(Debug, Display, Eq, PartialEq, Error, From)]
#[display(fmt = "failed to parse trace configuration")]
pub struct ParseConfigError(ron::de::SpannedError);

/// Where and whether game sessions are traced.
#[derive(Debug, Clone, Eq, PartialEq, Hash, Deserialize, Serialize)]
#[cfg_attr(test, derive(test_strategy::Arbitrary))]
#[serde(default, deny_unknown_fields)]
pub struct TraceConfig {
    /// The directory trace files are written to.
    pub dir: String,
    /// The common prefix of trace file names.
    pub prefix: String,
    pub enabled: bool,
}

impl Default for TraceConfig {
    fn default() -> Self {
        TraceConfig {
            dir: ".".into(),
            prefix: PREFIX.into(),
            enabled: true,
        }
    }
}

impl Display for TraceConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&ron::ser::to_string(self).map_err(|_| fmt::Error)?)
    }
}

impl FromStr for TraceConfig {
    type Err = ParseConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(ron::de::from_str(s)?)
    }
}

impl TraceConfig {
    /// Creates the next trace file in [`TraceConfig::dir`], if enabled.
    #[instrument(level = "debug", skip(comments), err)]
    pub fn open<I>(&self, comments: I) -> io::Result<Option<(PathBuf, TraceWriter<File>)>>
    where
        I: IntoIterator,
        I::Item: Display,
    {
        if !self.enabled {
            return Ok(None);
        }

        let mut names = Vec::new();
        for entry in fs::read_dir(&self.dir)? {
            names.push(entry?.file_name().to_string_lossy().into_owned());
        }

        let path = PathBuf::from(&self.dir).join(next_file_name(&self.prefix, names));
        let file = OpenOptions::new().write(true).create_new(true).open(&path)?;
        info!(path = %path.display(), "tracing the session");

        Ok(Some((path, TraceWriter::new(file, comments)?)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lib::trace::Trace;
    use tempfile::tempdir;
    use test_strategy::proptest;

    #[proptest]
    fn parsing_printed_trace_config_is_an_identity(c: TraceConfig) {
        assert_eq!(c.to_string().parse(), Ok(c));
    }

    #[test]
    fn missing_fields_take_default_values() {
        assert_eq!("()".parse(), Ok(TraceConfig::default()));
        assert_eq!(
            "(enabled: false)".parse(),
            Ok(TraceConfig {
                enabled: false,
                ..TraceConfig::default()
            })
        );
    }

    #[test]
    fn parsing_trace_config_fails_for_unknown_fields() {
        assert!("(colors: true)".parse::<TraceConfig>().is_err());
    }

    #[test]
    fn disabled_trace_opens_nothing() -> Result<(), io::Error> {
        let dir = tempdir()?;
        let config = TraceConfig {
            dir: dir.path().display().to_string(),
            enabled: false,
            ..TraceConfig::default()
        };

        assert!(config.open(["comment"])?.is_none());
        assert_eq!(fs::read_dir(dir.path())?.count(), 0);
        Ok(())
    }

    #[test]
    fn trace_files_are_numbered_in_sequence() -> Result<(), io::Error> {
        let dir = tempdir()?;
        fs::write(dir.path().join("StuckWin_07.csv"), "")?;

        let config = TraceConfig {
            dir: dir.path().display().to_string(),
            ..TraceConfig::default()
        };

        let (first, writer) = config.open(["StuckWin Game"])?.unwrap();
        drop(writer);
        let (second, _) = config.open(["StuckWin Game"])?.unwrap();

        assert_eq!(first.file_name().unwrap(), "StuckWin_08.csv");
        assert_eq!(second.file_name().unwrap(), "StuckWin_09.csv");

        let trace: Trace = fs::read_to_string(first)?.parse().unwrap();
        assert_eq!(trace.comments, vec!["StuckWin Game"]);
        assert!(trace.records.is_empty());
        Ok(())
    }
}
