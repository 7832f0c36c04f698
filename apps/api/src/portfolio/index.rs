//! Portfolio Index — in-memory catalog of case studies answering skill queries.
//!
//! Matching is pure-Rust, deterministic, and involves no completion call.
//!
//! Algorithm:
//! 1. Turn each job skill and each entry tag into a phrase (its `skill_tokens`)
//! 2. A tag matches a skill when either phrase appears word-for-word inside
//!    the other ("github actions" inside "ci/cd (github actions)")
//! 3. Score each entry with `similarity`: matched tags plus matched skills over
//!    all tags plus all skills
//! 4. Drop entries scoring 0, stable-sort the rest by descending score
//!    (ties keep catalog order)
//! 5. Emit distinct links until `max_links` are collected
//!
//! Words are never matched on their own, so "Big Data" does not hit
//! "Core Data" and "Focus on quality" does not hit "Ruby on Rails".
//!
//! An empty query returns the first `max_links` distinct links in catalog order.

use crate::models::portfolio::{MatchResult, PortfolioEntry};

// ────────────────────────────────────────────────────────────────────────────
// Similarity metric
// ────────────────────────────────────────────────────────────────────────────

const SEPARATORS: &[char] = &[',', '/', ';', '(', ')', '|'];

/// Lower-cased words of one skill or tag, in order.
pub type Phrase = Vec<String>;

/// Splits one free-text skill into comparable tokens.
///
/// "Node.js / React" → ["node", "react"]; "C++" → ["c++"]; "CI/CD" → ["ci", "cd"].
pub fn skill_tokens(skill: &str) -> Vec<String> {
    skill
        .to_lowercase()
        .split(|c: char| c.is_whitespace() || SEPARATORS.contains(&c))
        .map(|raw| raw.trim_matches(|c: char| !(c.is_alphanumeric() || c == '+' || c == '#')))
        .map(|token| token.strip_suffix(".js").unwrap_or(token))
        .filter(|token| !token.is_empty())
        .map(str::to_string)
        .collect()
}

/// One phrase per skill or tag. Empty and repeated phrases are dropped.
pub fn phrases<S: AsRef<str>>(skills: &[S]) -> Vec<Phrase> {
    let mut out: Vec<Phrase> = Vec::with_capacity(skills.len());
    for skill in skills {
        let phrase = skill_tokens(skill.as_ref());
        if !phrase.is_empty() && !out.contains(&phrase) {
            out.push(phrase);
        }
    }
    out
}

fn contains_phrase(haystack: &[String], needle: &[String]) -> bool {
    !needle.is_empty()
        && needle.len() <= haystack.len()
        && haystack.windows(needle.len()).any(|window| window == needle)
}

/// True when either phrase occurs word-for-word inside the other.
pub fn phrases_match(skill: &[String], tag: &[String]) -> bool {
    contains_phrase(skill, tag) || contains_phrase(tag, skill)
}

/// Matched tags plus matched skills over all tags plus all skills, in [0, 1].
/// Zero when either side is empty.
pub fn similarity(query: &[Phrase], tags: &[Phrase]) -> f64 {
    if query.is_empty() || tags.is_empty() {
        return 0.0;
    }
    let matched_tags = tags
        .iter()
        .filter(|tag| query.iter().any(|skill| phrases_match(skill, tag)))
        .count();
    let matched_skills = query
        .iter()
        .filter(|skill| tags.iter().any(|tag| phrases_match(skill, tag)))
        .count();
    (matched_tags + matched_skills) as f64 / (tags.len() + query.len()) as f64
}

// ────────────────────────────────────────────────────────────────────────────
// Index
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone)]
struct IndexedEntry {
    entry: PortfolioEntry,
    phrases: Vec<Phrase>,
}

/// Read-only after startup; shared across requests as `Arc<PortfolioIndex>`.
#[derive(Debug, Clone)]
pub struct PortfolioIndex {
    entries: Vec<IndexedEntry>,
    max_links: usize,
}

impl PortfolioIndex {
    pub fn new(max_links: usize) -> Self {
        Self {
            entries: Vec::new(),
            max_links,
        }
    }

    /// Replaces the index contents wholesale.
    pub fn load(&mut self, rows: Vec<PortfolioEntry>) {
        self.entries = rows
            .into_iter()
            .map(|entry| IndexedEntry {
                phrases: phrases(entry.tags()),
                entry,
            })
            .collect();
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn max_links(&self) -> usize {
        self.max_links
    }

    /// Returns up to `max_links` distinct links, most relevant first.
    pub fn query<S: AsRef<str>>(&self, skills: &[S]) -> MatchResult {
        let query = phrases(skills);

        if query.is_empty() {
            return self.collect_links(self.entries.iter().map(|e| &e.entry));
        }

        let mut scored: Vec<(&IndexedEntry, f64)> = self
            .entries
            .iter()
            .map(|indexed| (indexed, similarity(&query, &indexed.phrases)))
            .filter(|(_, score)| *score > 0.0)
            .collect();

        // sort_by is stable: equal scores keep catalog order
        scored.sort_by(|a, b| {
            b.1.partial_cmp(&a.1)
                .unwrap_or(std::cmp::Ordering::Equal)
        });

        self.collect_links(scored.into_iter().map(|(indexed, _)| &indexed.entry))
    }

    fn collect_links<'a>(&self, ranked: impl Iterator<Item = &'a PortfolioEntry>) -> MatchResult {
        let mut links: Vec<String> = Vec::with_capacity(self.max_links);
        for entry in ranked {
            if links.len() >= self.max_links {
                break;
            }
            if !links.iter().any(|l| l == entry.link()) {
                links.push(entry.link().to_string());
            }
        }
        MatchResult::from(links)
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────
