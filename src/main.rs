use anyhow::Context;
use clap::Parser;
use dentist_finder::{
    cli::Cli,
    configuration::get_configuration,
    domain::zipcodes::read_zipcodes,
    services::{run_batch, Droid, ListingScraper},
};
use env_logger::Env;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();
    let mut configuration =
        get_configuration(&cli.config).context("Failed to read configuration.")?;
    cli.apply(&mut configuration);

    let zipcodes = read_zipcodes(&cli.file).context("Could not read input file.")?;

    let droid = Droid::new(&configuration.browser)
        .await
        .context("Failed to start browser session.")?;

    let outcome = {
        let scraper = ListingScraper::new(&droid, &configuration);
        run_batch(
            &scraper,
            &zipcodes,
            &cli.specialty,
            &configuration.scraper.output_dir,
            configuration.scraper.failure_policy,
        )
        .await
    };

    if let Err(e) = droid.quit().await {
        log::warn!("Failed to close browser session: {}", e);
    }

    let summary = outcome.context("Scraping stopped.")?;
    log::info!(
        "Wrote {} files, {} zip codes failed",
        summary.written.len(),
        summary.failed.len()
    );
    if !summary.failed.is_empty() {
        log::warn!("Failed zip codes: {}", summary.failed.join(", "));
    }

    Ok(())
}
