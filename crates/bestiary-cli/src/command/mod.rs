use clap::{Parser, Subcommand};

use self::{explore::ExploreArg, report::ReportArg};

mod explore;
mod report;
mod selection;

#[derive(Debug, Clone, Parser)]
#[command(author, version, about, long_about = None)]
pub struct CommandArgs {
    /// What mode to run the program in
    #[command(subcommand)]
    mode: Mode,
}

#[derive(Debug, Clone, Subcommand)]
enum Mode {
    /// Explore the monster data in an interactive dashboard
    Explore(#[clap(flatten)] ExploreArg),
    /// Print every dashboard view as JSON or text
    Report(#[clap(flatten)] ReportArg),
}

pub fn run() -> anyhow::Result<()> {
    let args = CommandArgs::parse();
    match args.mode {
        Mode::Explore(arg) => explore::run(&arg)?,
        Mode::Report(arg) => report::run(&arg)?,
    }
    Ok(())
}
