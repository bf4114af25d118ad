use url::Url;

use super::{dentist::DentistRecord, search_request::SearchRequest};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListingFailure {
    pub url: Url,
    pub reason: String,
}

/// Records gathered for one postal code. Failed listings are tracked on the
/// side and never take a slot in `records`.
#[derive(Debug, Clone)]
pub struct CrawlResult {
    pub request: SearchRequest,
    pub listings_found: usize,
    pub records: Vec<DentistRecord>,
    pub failures: Vec<ListingFailure>,
}

impl CrawlResult {
    pub fn new(request: SearchRequest, listings_found: usize) -> Self {
        CrawlResult {
            request,
            listings_found,
            records: Vec::with_capacity(listings_found),
            failures: vec![],
        }
    }

    pub fn push_record(&mut self, record: DentistRecord) {
        self.records.push(record);
    }

    pub fn push_failure(&mut self, url: Url, reason: impl ToString) {
        self.failures.push(ListingFailure {
            url,
            reason: reason.to_string(),
        });
    }

    pub fn is_complete(&self) -> bool {
        self.records.len() + self.failures.len() == self.listings_found
    }
}
