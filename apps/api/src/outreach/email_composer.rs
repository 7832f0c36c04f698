//! Email Composer — writes one cold email per job from its matched case studies.
//!
//! The reply is freeform prose and is returned verbatim; nothing is parsed.

use crate::errors::AppError;
use crate::llm_client::prompts::{render, PROSE_ONLY_INSTRUCTION};
use crate::llm_client::TextCompletion;
use crate::models::job::JobPosting;
use crate::models::portfolio::MatchResult;
use crate::outreach::prompts::WRITE_EMAIL_PROMPT_TEMPLATE;

/// Who the emails are written as.
#[derive(Debug, Clone)]
pub struct SenderPersona {
    pub sender_name: String,
    pub agency_name: String,
}

/// Composes the outreach email for `job` with one completion call.
pub async fn write_email(
    job: &JobPosting,
    links: &MatchResult,
    persona: &SenderPersona,
    llm: &dyn TextCompletion,
) -> Result<String, AppError> {
    let prompt = build_email_prompt(job, links, persona)?;

    llm.complete(&prompt)
        .await
        .map_err(|e| AppError::Service(format!("Email composition failed: {e}")))
}

fn build_email_prompt(
    job: &JobPosting,
    links: &MatchResult,
    persona: &SenderPersona,
) -> Result<String, AppError> {
    let job_description = serde_json::to_string_pretty(job)
        .map_err(|e| AppError::Internal(anyhow::anyhow!("Failed to serialize job: {e}")))?;
    let link_list = serde_json::to_string(links.links())
        .map_err(|e| AppError::Internal(anyhow::anyhow!("Failed to serialize links: {e}")))?;

    Ok(render(
        WRITE_EMAIL_PROMPT_TEMPLATE,
        &[
            ("sender_name", persona.sender_name.as_str()),
            ("agency_name", persona.agency_name.as_str()),
            ("prose_only_instruction", PROSE_ONLY_INSTRUCTION),
            ("link_list", link_list.as_str()),
            ("role", job.role.as_str()),
            ("job_description", job_description.as_str()),
        ],
    ))
}
