//! Pipeline Orchestrator — drives one `/generate` request end to end.
//!
//! Flow: fetch → clean → extract_jobs → for each job (in order):
//!       portfolio query → write_email → assemble.
//!
//! All-or-nothing: the first failure aborts the request and no partial
//! results are returned.

use tracing::info;
use url::Url;

use crate::errors::AppError;
use crate::models::job::OutreachResult;
use crate::outreach::email_composer::write_email;
use crate::outreach::job_extractor::extract_jobs;
use crate::page::clean_text;
use crate::state::AppState;

/// Runs the full outreach pipeline for one careers-page URL.
///
/// Steps:
/// 1. fetcher.fetch() → raw documents (none → `NoContent`)
/// 2. clean_text() on the last document (empty → `NoContent`)
/// 3. extract_jobs() → Vec<JobPosting> (zero postings is a valid outcome)
/// 4. per job: portfolio.query() → MatchResult, then write_email()
pub async fn generate_outreach(
    state: &AppState,
    url: &Url,
) -> Result<Vec<OutreachResult>, AppError> {
    // Step 1: Fetch
    let mut documents = state
        .fetcher
        .fetch(url)
        .await
        .map_err(|e| AppError::Fetch(e.to_string()))?;
    let document = documents.pop().ok_or(AppError::NoContent)?;
    info!(
        "Fetched {} characters from {}",
        document.page_content.len(),
        document.source
    );

    // Step 2: Clean
    let page_text = clean_text(&document.page_content);
    if page_text.is_empty() {
        return Err(AppError::NoContent);
    }
    info!("Cleaned page text to {} characters", page_text.len());

    // Step 3: Extract
    let jobs = extract_jobs(&page_text, state.llm.as_ref()).await?;
    info!("Extracted {} job postings", jobs.len());

    // Step 4: Match and compose, one job at a time
    let mut results = Vec::with_capacity(jobs.len());
    for (i, job) in jobs.into_iter().enumerate() {
        let links = state.portfolio.query(&job.skills);
        info!(
            "Job {} ({:?}): matched {} portfolio links",
            i + 1,
            job.role,
            links.len()
        );

        let email = write_email(&job, &links, &state.persona, state.llm.as_ref()).await?;
        results.push(OutreachResult { job, links, email });
    }

    info!("Composed {} outreach emails", results.len());
    Ok(results)
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::llm_client::{LlmError, MockTextCompletion};
    use crate::models::portfolio::PortfolioEntry;
    use crate::outreach::email_composer::SenderPersona;
    use crate::page::fetcher::{FetchError, MockPageFetcher, RawDocument};
    use crate::portfolio::PortfolioIndex;

    const EXTRACT_MARKER: &str = "### SCRAPED TEXT FROM WEBSITE:";
    const EMAIL_MARKER: &str = "### JOB DESCRIPTION:";

    const CAREERS_PAGE: &str = "<h1>Careers</h1>\n\
        Senior Backend Engineer (5+ years, Go, Kubernetes)\n\
        Build the services behind our checkout flow.";

    fn target() -> Url {
        Url::parse("https://acme.example/careers").unwrap()
    }

    fn fetcher_returning(pages: &[&str]) -> MockPageFetcher {
        let documents: Vec<RawDocument> = pages
            .iter()
            .map(|page| RawDocument {
                source: target(),
                page_content: page.to_string(),
            })
            .collect();
        let mut fetcher = MockPageFetcher::new();
        fetcher
            .expect_fetch()
            .times(1)
            .returning(move |_| Ok(documents.clone()));
        fetcher
    }

    fn portfolio(rows: Vec<PortfolioEntry>) -> PortfolioIndex {
        let mut index = PortfolioIndex::new(2);
        index.load(rows);
        index
    }

    fn state(llm: MockTextCompletion, fetcher: MockPageFetcher, index: PortfolioIndex) -> AppState {
        AppState {
            llm: Arc::new(llm),
            fetcher: Arc::new(fetcher),
            portfolio: Arc::new(index),
            persona: SenderPersona {
                sender_name: "Ashish".to_string(),
                agency_name: "PitchKraft".to_string(),
            },
        }
    }

    #[tokio::test]
    async fn test_single_posting_matches_portfolio_and_composes_email() {
        let mut llm = MockTextCompletion::new();
        llm.expect_complete()
            .withf(|p| p.starts_with(EXTRACT_MARKER) && p.contains("Senior Backend Engineer (5+ years, Go, Kubernetes)"))
            .times(1)
            .returning(|_| {
                Ok(r#"[{"role": "Senior Backend Engineer", "experience": "5+ years",
                        "skills": ["Go", "Kubernetes"], "description": "Checkout services"}]"#
                    .to_string())
            });
        llm.expect_complete()
            .withf(|p| p.starts_with(EMAIL_MARKER) && p.contains("https://p.dev/go-k8s"))
            .times(1)
            .returning(|_| Ok("Subject: Regarding your Senior Backend Engineer search".to_string()));

        let index = portfolio(vec![
            PortfolioEntry::new(["react", "node.js"], "https://p.dev/web").unwrap(),
            PortfolioEntry::new(["go", "kubernetes"], "https://p.dev/go-k8s").unwrap(),
        ]);
        let state = state(llm, fetcher_returning(&[CAREERS_PAGE]), index);

        let results = generate_outreach(&state, &target()).await.unwrap();

        assert_eq!(results.len(), 1);
        assert_eq!(results[0].job.role, "Senior Backend Engineer");
        assert!(results[0].links.contains("https://p.dev/go-k8s"));
        assert!(!results[0].email.is_empty());
    }

    #[tokio::test]
    async fn test_no_documents_fails_without_extraction() {
        let mut llm = MockTextCompletion::new();
        llm.expect_complete().never();

        let state = state(llm, fetcher_returning(&[]), portfolio(vec![]));
        let err = generate_outreach(&state, &target()).await.unwrap_err();

        assert!(matches!(err, AppError::NoContent));
        assert_eq!(err.to_string(), "No content found");
    }

    #[tokio::test]
    async fn test_page_with_no_text_after_cleaning_is_no_content() {
        let mut llm = MockTextCompletion::new();
        llm.expect_complete().never();

        let state = state(llm, fetcher_returning(&["<div></div> ★ "]), portfolio(vec![]));
        let err = generate_outreach(&state, &target()).await.unwrap_err();
        assert!(matches!(err, AppError::NoContent));
    }

    #[tokio::test]
    async fn test_malformed_extraction_never_composes() {
        let mut llm = MockTextCompletion::new();
        llm.expect_complete()
            .withf(|p| p.starts_with(EXTRACT_MARKER))
            .times(1)
            .returning(|_| Ok("[{\"role\": \"Senior Backend".to_string()));
        llm.expect_complete()
            .withf(|p| p.starts_with(EMAIL_MARKER))
            .never();

        let state = state(llm, fetcher_returning(&[CAREERS_PAGE]), portfolio(vec![]));
        let err = generate_outreach(&state, &target()).await.unwrap_err();

        assert!(matches!(err, AppError::ExtractionParse));
        assert_eq!(err.to_string(), "Context too big. Unable to parse jobs.");
    }

    #[tokio::test]
    async fn test_two_postings_with_empty_portfolio_still_compose() {
        let mut llm = MockTextCompletion::new();
        llm.expect_complete()
            .withf(|p| p.starts_with(EXTRACT_MARKER))
            .times(1)
            .returning(|_| {
                Ok(r#"[{"role": "Frontend Engineer", "skills": ["React"]},
                       {"role": "Data Engineer", "skills": ["Spark"]}]"#
                    .to_string())
            });
        llm.expect_complete()
            .withf(|p| p.starts_with(EMAIL_MARKER))
            .times(2)
            .returning(|p| {
                let role = if p.contains("Frontend Engineer") { "frontend" } else { "data" };
                Ok(format!("Email for {role}"))
            });

        let state = state(llm, fetcher_returning(&[CAREERS_PAGE]), portfolio(vec![]));
        let results = generate_outreach(&state, &target()).await.unwrap();

        assert_eq!(results.len(), 2);
        assert_eq!(results[0].job.role, "Frontend Engineer");
        assert_eq!(results[1].job.role, "Data Engineer");
        assert!(results.iter().all(|r| r.links.is_empty()));
        assert_eq!(results[0].email, "Email for frontend");
        assert_eq!(results[1].email, "Email for data");
    }

    #[tokio::test]
    async fn test_zero_postings_is_empty_success() {
        let mut llm = MockTextCompletion::new();
        llm.expect_complete()
            .withf(|p| p.starts_with(EXTRACT_MARKER))
            .times(1)
            .returning(|_| Ok("[]".to_string()));
        llm.expect_complete()
            .withf(|p| p.starts_with(EMAIL_MARKER))
            .never();

        let state = state(llm, fetcher_returning(&["About us. We are not hiring right now."]), portfolio(vec![]));
        assert!(generate_outreach(&state, &target()).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_composition_failure_discards_all_results() {
        let mut llm = MockTextCompletion::new();
        llm.expect_complete()
            .withf(|p| p.starts_with(EXTRACT_MARKER))
            .times(1)
            .returning(|_| Ok(r#"[{"role": "First"}, {"role": "Second"}]"#.to_string()));
        llm.expect_complete()
            .withf(|p| p.starts_with(EMAIL_MARKER) && p.contains("\"First\""))
            .times(1)
            .returning(|_| Ok("Email one".to_string()));
        llm.expect_complete()
            .withf(|p| p.starts_with(EMAIL_MARKER) && p.contains("\"Second\""))
            .times(1)
            .returning(|_| {
                Err(LlmError::Api {
                    status: 500,
                    message: "internal model error".to_string(),
                })
            });

        let state = state(llm, fetcher_returning(&[CAREERS_PAGE]), portfolio(vec![]));
        let err = generate_outreach(&state, &target()).await.unwrap_err();

        match err {
            AppError::Service(msg) => assert!(msg.contains("internal model error")),
            other => panic!("Expected Service error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_fetch_failure_is_fetch_error() {
        let mut llm = MockTextCompletion::new();
        llm.expect_complete().never();
        let mut fetcher = MockPageFetcher::new();
        fetcher
            .expect_fetch()
            .times(1)
            .returning(|_| Err(FetchError::Status(503)));

        let state = state(llm, fetcher, portfolio(vec![]));
        let err = generate_outreach(&state, &target()).await.unwrap_err();
        assert!(matches!(err, AppError::Fetch(msg) if msg.contains("503")));
    }

    #[tokio::test]
    async fn test_last_document_is_used() {
        let mut llm = MockTextCompletion::new();
        llm.expect_complete()
            .withf(|p| p.starts_with(EXTRACT_MARKER) && p.contains("second page") && !p.contains("first page"))
            .times(1)
            .returning(|_| Ok("[]".to_string()));

        let state = state(llm, fetcher_returning(&["first page", "second page"]), portfolio(vec![]));
        assert!(generate_outreach(&state, &target()).await.unwrap().is_empty());
    }
}
