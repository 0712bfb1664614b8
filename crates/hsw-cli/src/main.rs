use std::error::Error;

use clap::{Parser, Subcommand};
use commands::{
    ls::{self, LsArgs},
    run::{self, RunArgs},
    show::{self, ShowArgs},
};
use tracing_subscriber::EnvFilter;

mod commands;

#[derive(Parser, Debug)]
#[command(name = "hsw", about = "HOLON scenario sweep CLI")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Execute an experiment sweep from a YAML definition.
    Run(RunArgs),
    /// List recorded experiments, or the runs of one experiment.
    Ls(LsArgs),
    /// Show the tables or cost benefit payloads of one run.
    Show(ShowArgs),
}

fn main() -> Result<(), Box<dyn Error>> {
    init_tracing();
    let cli = Cli::parse();
    match cli.command {
        Command::Run(args) => run::run(&args),
        Command::Ls(args) => ls::run(&args),
        Command::Show(args) => show::run(&args),
    }
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();
}
