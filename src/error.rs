use std::{path::PathBuf, time::Duration};

use thirtyfour::error::WebDriverError;

#[derive(Debug, thiserror::Error)]
pub enum ScrapeError {
    #[error("Could not read input file {path}: {source}")]
    InputFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Input file {path} is not valid JSON: {source}")]
    MalformedInput {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Malformed input file is missing zipcodes.")]
    MissingZipcodes,

    #[error("Could not find {0}.")]
    ElementNotFound(String),

    #[error("Timed out after {waited:?} waiting for `{selector}`")]
    Timeout { selector: String, waited: Duration },

    #[error("Still blocked by captcha after {attempts} reloads")]
    CaptchaRetriesExhausted { attempts: u32 },

    #[error("Could not navigate to {url}: {reason}")]
    Navigation { url: String, reason: String },

    #[error("Invalid listing link `{href}`: {source}")]
    InvalidLink {
        href: String,
        #[source]
        source: url::ParseError,
    },

    #[error(transparent)]
    Driver(#[from] WebDriverError),

    #[error("Could not write {path}: {source}")]
    Output {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Could not serialize records: {0}")]
    Serialize(#[from] serde_json::Error),
}
