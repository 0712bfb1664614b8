use std::error::Error;
use std::path::PathBuf;

use clap::Args;
use hsw_res::{run_label, ResultLoader};

#[derive(Args, Debug)]
pub struct LsArgs {
    /// Output root the runs were written under.
    #[arg(long, default_value = "experiment_outputs")]
    pub root: PathBuf,
    /// Experiment title; when absent, the titles themselves are listed.
    #[arg(long)]
    pub experiment: Option<String>,
}

pub fn run(args: &LsArgs) -> Result<(), Box<dyn Error>> {
    let loader = ResultLoader::new(&args.root);
    match &args.experiment {
        None => {
            for title in loader.list_experiments()? {
                println!("{title}");
            }
        }
        Some(experiment) => {
            for stamp in loader.list_runs(experiment)? {
                match run_label(&stamp) {
                    Ok(label) => println!("{stamp}  {label}"),
                    Err(_) => println!("{stamp}"),
                }
            }
        }
    }
    Ok(())
}
