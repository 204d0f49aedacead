mod app;
mod cli;
mod ffmpeg;
mod manifest;
mod track;

use anyhow::Result;
use clap::Parser;

fn main() -> Result<()> {
    env_logger::init();
    let args = cli::Args::parse();
    app::run(args)
}
