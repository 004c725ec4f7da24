pub mod extractor;
pub mod fetcher;
