use std::path::Path;

use serde::Deserialize;

use crate::error::ScrapeError;

#[derive(Debug, Deserialize)]
struct ZipcodeInput {
    zipcodes: Option<Vec<String>>,
}

pub fn read_zipcodes(path: &Path) -> Result<Vec<String>, ScrapeError> {
    let content = std::fs::read_to_string(path).map_err(|source| ScrapeError::InputFile {
        path: path.to_path_buf(),
        source,
    })?;

    parse_zipcodes(&content).map_err(|e| match e {
        ScrapeError::Serialize(source) => ScrapeError::MalformedInput {
            path: path.to_path_buf(),
            source,
        },
        other => other,
    })
}

pub fn parse_zipcodes(content: &str) -> Result<Vec<String>, ScrapeError> {
    let input: ZipcodeInput = serde_json::from_str(content)?;
    input.zipcodes.ok_or(ScrapeError::MissingZipcodes)
}
