pub mod batch;
pub mod browser;
pub mod captcha;
pub mod data_persistence;
pub mod definition_list;
pub mod detail_scraper;
pub mod droid;
#[cfg(test)]
pub mod fixture;
pub mod listing_scraper;
pub mod navigator;

pub use batch::*;
pub use browser::*;
pub use captcha::*;
pub use data_persistence::*;
pub use definition_list::*;
pub use detail_scraper::*;
pub use droid::*;
pub use listing_scraper::*;
pub use navigator::*;
