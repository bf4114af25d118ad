use std::{path::Path, path::PathBuf, time::Duration};

use serde::Deserialize;
use serde_aux::field_attributes::{
    deserialize_number_from_string, deserialize_option_number_from_string,
};

use crate::services::ThrottlePolicy;

pub const SITE_URL: &str = "https://findadentist.ada.org/";

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub browser: BrowserSettings,
    pub scraper: ScraperSettings,
    pub selectors: SiteSelectors,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct BrowserSettings {
    pub webdriver_url: String,
    pub headless: bool,
    pub maximize_window: bool,
}

impl Default for BrowserSettings {
    fn default() -> Self {
        BrowserSettings {
            webdriver_url: "http://localhost:4444".to_string(),
            headless: false,
            maximize_window: true,
        }
    }
}

/// What the batch does when a whole postal-code crawl fails.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FailurePolicy {
    /// Stop the run and surface the error.
    #[default]
    Halt,
    /// Log the error and move on to the next postal code.
    Continue,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ScraperSettings {
    pub site_url: String,
    /// Settle time after every navigation, in milliseconds.
    #[serde(deserialize_with = "deserialize_number_from_string")]
    pub timeout_ms: u64,
    #[serde(deserialize_with = "deserialize_number_from_string")]
    pub captcha_delay_ms: u64,
    /// Absent means retry forever.
    #[serde(deserialize_with = "deserialize_option_number_from_string")]
    pub max_captcha_retries: Option<u32>,
    #[serde(deserialize_with = "deserialize_number_from_string")]
    pub listing_wait_ms: u64,
    #[serde(deserialize_with = "deserialize_number_from_string")]
    pub poll_interval_ms: u64,
    pub output_dir: PathBuf,
    pub screenshot_dir: Option<PathBuf>,
    pub failure_policy: FailurePolicy,
}

impl Default for ScraperSettings {
    fn default() -> Self {
        ScraperSettings {
            site_url: SITE_URL.to_string(),
            timeout_ms: 3_000,
            captcha_delay_ms: 3_000,
            max_captcha_retries: None,
            listing_wait_ms: 30_000,
            poll_interval_ms: 250,
            output_dir: PathBuf::from("."),
            screenshot_dir: None,
            failure_policy: FailurePolicy::Halt,
        }
    }
}

impl ScraperSettings {
    pub fn throttle_policy(&self) -> ThrottlePolicy {
        ThrottlePolicy {
            settle_delay: Duration::from_millis(self.timeout_ms),
            captcha_delay: Duration::from_millis(self.captcha_delay_ms),
            max_captcha_retries: self.max_captcha_retries,
            wait_timeout: Duration::from_millis(self.listing_wait_ms),
            poll_interval: Duration::from_millis(self.poll_interval_ms),
        }
    }
}

/// CSS selectors for the parts of the site the scraper touches.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct SiteSelectors {
    pub captcha_marker: String,
    pub specialty_toggle: String,
    pub specialty_option: String,
    pub zip_input: String,
    pub submit_button: String,
    pub terms_label: String,
    pub listing_ready: String,
    pub listing_link: String,
    pub dentist_name: String,
    pub detail_lists: String,
}

impl Default for SiteSelectors {
    fn default() -> Self {
        SiteSelectors {
            captcha_marker: ".high-traffic-captcha-container".to_string(),
            specialty_toggle: ".specialty-filter__toggle".to_string(),
            specialty_option: ".specialty-filter__option".to_string(),
            zip_input: "[title='Address or ZIP Code']".to_string(),
            submit_button: "button[type='submit']".to_string(),
            terms_label: "label[for='terms']".to_string(),
            listing_ready: ".dentist-list__item a".to_string(),
            listing_link: ".dentist-list__item h2 > a".to_string(),
            dentist_name: "div.name > h1".to_string(),
            detail_lists: ".dentist-details dl:not(.hours)".to_string(),
        }
    }
}

/// Layers an optional YAML/TOML/JSON file under `APP_`-prefixed environment
/// variables, e.g. `APP_SCRAPER__TIMEOUT_MS=5000`.
pub fn get_configuration(path: &Path) -> Result<Settings, config::ConfigError> {
    let settings = config::Config::builder()
        .add_source(config::File::from(path).required(false))
        .add_source(
            config::Environment::with_prefix("APP")
                .prefix_separator("_")
                .separator("__"),
        )
        .build()?;

    settings.try_deserialize::<Settings>()
}
