use std::path::{Path, PathBuf};

use crate::{domain::crawl_result::CrawlResult, error::ScrapeError};

pub fn output_path(output_dir: &Path, postal_code: &str) -> PathBuf {
    output_dir.join(format!("{}.json", postal_code))
}

/// Writes the records of one crawl to `<output_dir>/<postal code>.json` as a
/// compact JSON array.
pub async fn write_crawl_result(
    output_dir: &Path,
    result: &CrawlResult,
) -> Result<PathBuf, ScrapeError> {
    let path = output_path(output_dir, &result.request.postal_code);
    let json = serde_json::to_vec(&result.records)?;

    let io_error = |source| ScrapeError::Output {
        path: path.clone(),
        source,
    };
    tokio::fs::create_dir_all(output_dir)
        .await
        .map_err(io_error)?;
    tokio::fs::write(&path, json).await.map_err(io_error)?;

    log::info!(
        "Wrote {} dentists to {}",
        result.records.len(),
        path.display()
    );
    Ok(path)
}
