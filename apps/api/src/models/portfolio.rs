use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum PortfolioError {
    #[error("portfolio entry has no skill tags")]
    NoTags,

    #[error("portfolio entry has no link")]
    NoLink,

    #[error("catalog read error: {0}")]
    Csv(#[from] csv::Error),

    #[error("catalog IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// A case study offered as proof of capability.
/// Invariant: at least one lower-cased, de-duplicated tag and exactly one link.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PortfolioEntry {
    tags: Vec<String>,
    link: String,
}

impl PortfolioEntry {
    pub fn new<I, S>(tags: I, link: &str) -> Result<Self, PortfolioError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut normalized: Vec<String> = Vec::new();
        for tag in tags {
            let tag = tag.as_ref().trim().to_lowercase();
            if !tag.is_empty() && !normalized.contains(&tag) {
                normalized.push(tag);
            }
        }

        if normalized.is_empty() {
            return Err(PortfolioError::NoTags);
        }

        let link = link.trim();
        if link.is_empty() {
            return Err(PortfolioError::NoLink);
        }

        Ok(Self {
            tags: normalized,
            link: link.to_string(),
        })
    }

    pub fn tags(&self) -> &[String] {
        &self.tags
    }

    pub fn link(&self) -> &str {
        &self.link
    }
}

/// Ordered, de-duplicated case-study links selected for one job.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MatchResult(Vec<String>);

impl MatchResult {
    pub fn links(&self) -> &[String] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn contains(&self, link: &str) -> bool {
        self.0.iter().any(|l| l == link)
    }
}

impl From<Vec<String>> for MatchResult {
    fn from(links: Vec<String>) -> Self {
        let mut deduped: Vec<String> = Vec::with_capacity(links.len());
        for link in links {
            if !deduped.contains(&link) {
                deduped.push(link);
            }
        }
        Self(deduped)
    }
}
