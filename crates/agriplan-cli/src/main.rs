//! agriplan CLI Application
//!
//! Command-line interface for the agriplan planning core.

mod args;
mod cli;
mod renderer;

use anyhow::Result;
use args::{Args, Commands};
use clap::Parser;
use cli::Cli;
use log::info;
use renderer::TerminalRenderer;
use Commands::*;

fn main() -> Result<()> {
    env_logger::init();

    let Args { no_color, command } = Args::parse();

    let cli = Cli::new(TerminalRenderer::new(!no_color));

    info!("agriplan started");

    match command {
        Check(args) => cli.check(args),
        Submit(args) => cli.submit(args),
        Decans(args) => cli.decans(args),
        Expand(args) => cli.expand(args),
        Schema => cli.schema(),
    }
}
