// Page acquisition: fetch a URL, then clean its text for prompting.

pub mod cleaner;
pub mod fetcher;

pub use cleaner::clean_text;
pub use fetcher::{HttpPageFetcher, PageFetcher};
