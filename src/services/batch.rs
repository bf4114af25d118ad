use std::path::{Path, PathBuf};

use crate::{
    configuration::FailurePolicy, domain::search_request::SearchRequest, error::ScrapeError,
};

use super::{browser::Browser, data_persistence::write_crawl_result, ListingScraper};

#[derive(Debug, Default)]
pub struct BatchSummary {
    pub written: Vec<PathBuf>,
    pub failed: Vec<String>,
}

/// Crawls the postal codes one after another, writing each result as soon as
/// it is done.
///
/// Listing-level failures never reach this point. A failure of a whole
/// postal code stops the batch under `FailurePolicy::Halt` and is logged and
/// skipped under `FailurePolicy::Continue`. Output errors always stop it.
pub async fn run_batch<B: Browser>(
    scraper: &ListingScraper<'_, B>,
    zipcodes: &[String],
    specialty: &str,
    output_dir: &Path,
    policy: FailurePolicy,
) -> Result<BatchSummary, ScrapeError> {
    let mut summary = BatchSummary::default();

    for zipcode in zipcodes {
        log::info!("Crawling {}.", zipcode);
        let request = SearchRequest::new(zipcode.as_str(), specialty);

        let result = match scraper.scrape(&request).await {
            Ok(result) => result,
            Err(e) => {
                log::error!("Error while scraping zipcode {}: {}", zipcode, e);
                match policy {
                    FailurePolicy::Halt => return Err(e),
                    FailurePolicy::Continue => {
                        summary.failed.push(zipcode.clone());
                        continue;
                    }
                }
            }
        };

        debug_assert!(result.is_complete());
        log::info!(
            "Done crawling {}. {} of {} listings scraped.",
            zipcode,
            result.records.len(),
            result.listings_found
        );

        summary
            .written
            .push(write_crawl_result(output_dir, &result).await?);
    }

    Ok(summary)
}
