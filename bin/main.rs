use anyhow::Error as Anyhow;
use clap::Parser;

mod applet;
mod cli;
mod config;
mod io;
mod player;
mod render;
mod session;

fn main() -> Result<(), Anyhow> {
    cli::Cli::parse().execute()
}
