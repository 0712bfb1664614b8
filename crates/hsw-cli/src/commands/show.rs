use std::error::Error;
use std::path::PathBuf;

use clap::Args;
use hsw_res::ResultLoader;

#[derive(Args, Debug)]
pub struct ShowArgs {
    /// Output root the runs were written under.
    #[arg(long, default_value = "experiment_outputs")]
    pub root: PathBuf,
    /// Experiment title.
    #[arg(long)]
    pub experiment: String,
    /// Run folder timestamp, as printed by `hsw ls`.
    #[arg(long)]
    pub run: String,
    /// Run point to project the cost benefit payload for.
    #[arg(long)]
    pub point: Option<String>,
    /// Detail sub-group to show instead of the overview.
    #[arg(long, requires = "point")]
    pub subgroup: Option<String>,
}

pub fn run(args: &ShowArgs) -> Result<(), Box<dyn Error>> {
    let loader = ResultLoader::new(&args.root);
    let tables = loader.load_run(&args.experiment, &args.run)?;
    let Some(point) = &args.point else {
        println!(
            "{} input rows, {} result rows, {} cost benefit rows, {} errors",
            tables.inputs.len(),
            tables.results.len(),
            tables.cost_benefit.len(),
            tables.errors.len()
        );
        return Ok(());
    };
    match &args.subgroup {
        None => match tables.cost_benefit_overview(point)? {
            Some(overview) => println!("{}", serde_json::to_string_pretty(&overview)?),
            None => println!("no cost benefit data for {point}"),
        },
        Some(subgroup) => match tables.cost_benefit_detail(point, subgroup)? {
            Some(detail) => println!("{}", serde_json::to_string_pretty(&detail)?),
            None => println!("no cost benefit data for {point} / {subgroup}"),
        },
    }
    Ok(())
}
