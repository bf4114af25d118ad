use std::time::Duration;

use tokio::time::{sleep, Instant};

use crate::error::ScrapeError;

use super::{browser::Page, captcha::captcha_guard};

#[derive(Debug, Clone, PartialEq)]
pub struct ThrottlePolicy {
    /// Fixed pause after every navigation.
    pub settle_delay: Duration,
    /// Pause after each captcha reload.
    pub captcha_delay: Duration,
    pub max_captcha_retries: Option<u32>,
    pub wait_timeout: Duration,
    pub poll_interval: Duration,
}

impl ThrottlePolicy {
    pub fn immediate() -> Self {
        ThrottlePolicy {
            settle_delay: Duration::ZERO,
            captcha_delay: Duration::ZERO,
            max_captcha_retries: None,
            wait_timeout: Duration::ZERO,
            poll_interval: Duration::ZERO,
        }
    }
}

/// Every navigation goes through here: load, wait, then clear any captcha.
#[derive(Debug, Clone)]
pub struct Navigator {
    policy: ThrottlePolicy,
    captcha_marker: String,
}

impl Navigator {
    pub fn new(policy: ThrottlePolicy, captcha_marker: impl Into<String>) -> Self {
        Navigator {
            policy,
            captcha_marker: captcha_marker.into(),
        }
    }

    pub async fn goto<P: Page>(&self, page: &P, url: &str) -> Result<(), ScrapeError> {
        log::debug!("Navigating to {}", url);
        page.goto(url).await?;
        self.settle(page).await
    }

    /// For navigations the page triggered itself, e.g. a form submit.
    pub async fn settle<P: Page>(&self, page: &P) -> Result<(), ScrapeError> {
        sleep(self.policy.settle_delay).await;
        captcha_guard(page, &self.captcha_marker, &self.policy).await?;
        Ok(())
    }

    pub async fn wait_for<P: Page>(
        &self,
        page: &P,
        selector: &str,
    ) -> Result<P::Element, ScrapeError> {
        let started = Instant::now();

        loop {
            if let Some(element) = page.find(selector).await? {
                return Ok(element);
            }

            let waited = started.elapsed();
            if waited >= self.policy.wait_timeout {
                return Err(ScrapeError::Timeout {
                    selector: selector.to_string(),
                    waited,
                });
            }
            sleep(self.policy.poll_interval).await;
        }
    }
}
