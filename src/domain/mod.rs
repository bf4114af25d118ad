pub mod crawl_result;
pub mod dentist;
pub mod search_request;
pub mod zipcodes;
