use clap::{Parser, Subcommand};

use self::solve::SolveArg;

mod solve;

#[derive(Debug, Clone, Parser)]
#[command(author, version, about, long_about = None)]
pub struct CommandArgs {
    #[command(subcommand)]
    mode: Mode,
}

#[derive(Debug, Clone, Subcommand)]
enum Mode {
    /// Search for a low-waste guillotine layout with a genetic algorithm
    Solve(#[clap(flatten)] SolveArg),
}

pub fn run() -> anyhow::Result<()> {
    let args = CommandArgs::parse();
    match args.mode {
        Mode::Solve(arg) => solve::run(&arg)?,
    }
    Ok(())
}
