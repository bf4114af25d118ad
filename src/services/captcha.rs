use crate::error::ScrapeError;

use super::{browser::Page, navigator::ThrottlePolicy};

/// Reloads the page until the high-traffic captcha marker is gone.
///
/// Returns how many reloads it took. With no `max_captcha_retries` set this
/// keeps going for as long as the site keeps blocking.
pub async fn captcha_guard<P: Page>(
    page: &P,
    marker: &str,
    policy: &ThrottlePolicy,
) -> Result<u32, ScrapeError> {
    let mut reloads = 0;

    while page.find(marker).await?.is_some() {
        if let Some(max) = policy.max_captcha_retries {
            if reloads >= max {
                log::error!("Still blocked by captcha after {} reloads", reloads);
                return Err(ScrapeError::CaptchaRetriesExhausted { attempts: reloads });
            }
        }

        log::warn!("Blocked by captcha, reloading (attempt {})", reloads + 1);
        page.reload().await?;
        tokio::time::sleep(policy.captcha_delay).await;
        reloads += 1;
    }

    Ok(reloads)
}
