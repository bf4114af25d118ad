use std::path::PathBuf;

use clap::Parser;

use crate::{
    configuration::{FailurePolicy, Settings},
    domain::search_request::DEFAULT_SPECIALTY,
};

#[derive(Debug, Parser)]
#[command(
    name = "dentist-finder",
    version,
    about = "Scrape the ADA Find-a-Dentist directory, one JSON file per zip code"
)]
pub struct Cli {
    /// JSON file with a `zipcodes` array
    #[arg(short = 'f', long = "file", default_value = "zipcodes.json")]
    pub file: PathBuf,

    /// Specialty filter
    #[arg(short = 's', long = "specialty", default_value = DEFAULT_SPECIALTY)]
    pub specialty: String,

    /// Directory for the `<zipcode>.json` files
    #[arg(short = 'o', long = "output-dir")]
    pub output_dir: Option<PathBuf>,

    #[arg(short = 'c', long = "config", default_value = "configuration.yaml")]
    pub config: PathBuf,

    /// Keep going when a whole zip code fails instead of stopping the run
    #[arg(long)]
    pub keep_going: bool,
}

impl Cli {
    /// Command-line flags win over the configuration file.
    pub fn apply(&self, settings: &mut Settings) {
        if let Some(dir) = &self.output_dir {
            settings.scraper.output_dir = dir.clone();
        }
        if self.keep_going {
            settings.scraper.failure_policy = FailurePolicy::Continue;
        }
    }
}
