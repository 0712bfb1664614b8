use std::error::Error;
use std::path::PathBuf;

use clap::Args;
use hsw_exp::{load_config, Experiment};

#[derive(Args, Debug)]
pub struct RunArgs {
    /// YAML experiment definition.
    #[arg(long)]
    pub config: PathBuf,
    /// Output root for run artefacts.
    #[arg(long, default_value = "experiment_outputs")]
    pub out: PathBuf,
    /// Let the endpoint serve cached results.
    #[arg(long)]
    pub keep_cache: bool,
    /// Turn off diagnostic logging on the service side.
    #[arg(long)]
    pub no_sentry: bool,
}

pub fn run(args: &RunArgs) -> Result<(), Box<dyn Error>> {
    let mut config = load_config(&args.config)?;
    if args.keep_cache {
        config.disable_cache = false;
    }
    if args.no_sentry {
        config.enable_sentry_logging = false;
    }
    let experiment = Experiment::from_config(config)?;
    let report = experiment.run(&args.out)?;
    println!(
        "{} points ({} scored, {} rejected) -> {}",
        report.points,
        report.succeeded,
        report.failed,
        report.run_dir.display()
    );
    Ok(())
}
