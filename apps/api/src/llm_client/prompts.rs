// Shared prompt fragments and template rendering.
// Each module that needs completion calls defines its own prompts.rs alongside it.
// This file contains cross-cutting pieces.

/// Instruction that closes every prompt expecting structured data back.
pub const JSON_ONLY_INSTRUCTION: &str = "Only return the valid JSON. \
    Do NOT include any text outside the JSON. \
    Do NOT use markdown code fences. \
    Do NOT include explanations or apologies.";

/// Instruction that closes every prompt expecting prose back.
pub const PROSE_ONLY_INSTRUCTION: &str = "Return only the requested text. \
    Do NOT add a preamble, notes, or commentary about what you wrote.";

/// Fills `{name}` placeholders in a single left-to-right pass.
///
/// Substituted values are never rescanned, so page text containing `{...}`
/// cannot inject into other placeholders. Unknown `{...}` sequences (such as
/// JSON examples inside a template) are left untouched.
pub fn render(template: &str, vars: &[(&str, &str)]) -> String {
    let mut out = String::with_capacity(template.len());
    let mut rest = template;

    while let Some(start) = rest.find('{') {
        out.push_str(&rest[..start]);
        let tail = &rest[start..];

        let substituted = vars.iter().find_map(|(name, value)| {
            tail.strip_prefix('{')
                .and_then(|t| t.strip_prefix(name))
                .and_then(|t| t.strip_prefix('}'))
                .map(|remaining| (*value, remaining))
        });

        match substituted {
            Some((value, remaining)) => {
                out.push_str(value);
                rest = remaining;
            }
            None => {
                out.push('{');
                rest = &tail[1..];
            }
        }
    }

    out.push_str(rest);
    out
}
