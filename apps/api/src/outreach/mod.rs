// Outreach pipeline: job extraction, portfolio matching, email composition.
// All completion calls go through the `TextCompletion` trait.

pub mod email_composer;
pub mod handlers;
pub mod job_extractor;
pub mod pipeline;
pub mod prompts;
