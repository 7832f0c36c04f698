use serde::{Deserialize, Serialize};

use crate::models::portfolio::MatchResult;

/// A single job posting extracted from a careers page.
/// Every field is present after normalization; absent values are empty.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct JobPosting {
    pub role: String,
    /// Free-form, e.g. "5+ years".
    pub experience: String,
    pub skills: Vec<String>,
    pub description: String,
}

/// One composed outreach email and the evidence it cites.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutreachResult {
    pub job: JobPosting,
    pub links: MatchResult,
    pub email: String,
}
