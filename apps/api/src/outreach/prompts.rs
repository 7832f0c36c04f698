// All prompt templates for the outreach pipeline.
// Rendered with `llm_client::prompts::render`.

/// Job extraction prompt.
/// Fill: {page_data}, {json_only_instruction}
pub const EXTRACT_JOBS_PROMPT_TEMPLATE: &str = r#"### SCRAPED TEXT FROM WEBSITE:
{page_data}

### INSTRUCTION:
The scraped text above comes from the careers page of a company website.
Extract every job posting it contains and return them as JSON: an array of
objects, one per posting, each with exactly these keys:

{
  "role": "Senior Full Stack Engineer",
  "experience": "5+ years",
  "skills": ["React", "Python", "AWS"],
  "description": "Owns the customer-facing web platform end to end."
}

Guidelines:
- role: the exact job title as written on the page.
- experience: years of experience required. If the page is silent, infer it
  from the level (Senior = "5+ years", Junior = "0-2 years").
- skills: the key technical stack plus any soft skills the posting stresses.
- description: a concise summary of the key responsibilities and the problems
  this hire is meant to solve.

If the page lists no job postings, return an empty array: []

{json_only_instruction}

### VALID JSON (NO PREAMBLE):
"#;

/// Cold email prompt.
/// Fill: {job_description}, {role}, {link_list}, {sender_name}, {agency_name},
///       {prose_only_instruction}
pub const WRITE_EMAIL_PROMPT_TEMPLATE: &str = r#"### JOB DESCRIPTION:
{job_description}

### INSTRUCTION:
You are {sender_name}, a Business Development Executive at {agency_name}.
{agency_name} is an AI and software automation agency that helps companies
scale their engineering velocity and cut operational costs.

Write a cold email to the hiring manager for the role described above.

### EMAIL STRUCTURE (AIDA):
1. Subject line: short and relevant, e.g. "Regarding your {role} search".
2. Attention: acknowledge their need for a {role} and name one concrete pain
   point from the description.
3. Interest: explain how {agency_name} delivers this faster and more reliably
   than a traditional hire, by building automated systems rather than only
   writing code.
4. Desire: weave in these case studies as proof of capability: {link_list}
   If the list is empty, describe relevant experience without inventing links.
5. Action: ask for a brief 15-minute call to discuss how {agency_name} can
   contribute immediately.

Tone: professional, confident, conversational. Not salesy.
Formatting: short paragraphs, no generic filler. Sign off as {sender_name}.

{prose_only_instruction}

### EMAIL (NO PREAMBLE):
"#;
