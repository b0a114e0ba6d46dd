use anyhow::Error as Anyhow;
use clap::Subcommand;
use derive_more::From;

mod play;
mod replay;

#[derive(Debug, From, Subcommand)]
pub enum Applet {
    #[clap(alias = "1")]
    Play(play::Play),
    #[clap(alias = "3")]
    Replay(replay::Replay),
}

impl Default for Applet {
    fn default() -> Self {
        play::Play::default().into()
    }
}

impl Applet {
    pub fn execute(self) -> Result<(), Anyhow> {
        match self {
            Applet::Play(a) => a.execute(),
            Applet::Replay(a) => a.execute(),
        }
    }
}
