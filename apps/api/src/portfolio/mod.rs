// Portfolio catalog: loaded once at startup, read-only while serving.

pub mod catalog;
pub mod index;

pub use catalog::load_catalog;
pub use index::PortfolioIndex;
