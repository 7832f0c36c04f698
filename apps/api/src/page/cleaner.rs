use once_cell::sync::Lazy;
use regex::Regex;

static TAG_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"<[^>]*?>").expect("valid tag regex"));
static URL_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"https?://\S+").expect("valid url regex"));
// Letters, digits, whitespace and the punctuation job ads rely on ("5+ years", "C#", "Node.js")
static DISALLOWED_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"[^\p{L}\p{N}\s+#.,:;()/'&%$-]").expect("valid charset regex")
});
static WHITESPACE_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").expect("valid whitespace regex"));

/// Reduces raw page text to prompt-ready text. Never fails; may return "".
pub fn clean_text(raw: &str) -> String {
    let text = TAG_RE.replace_all(raw, " ");
    let text = URL_RE.replace_all(&text, " ");
    let text = DISALLOWED_RE.replace_all(&text, "");
    WHITESPACE_RE.replace_all(&text, " ").trim().to_string()
}
