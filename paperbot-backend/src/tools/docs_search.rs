use crate::error::ToolError;
use crate::tools::Tool;
use async_trait::async_trait;
use std::time::Duration;

/// Default cap on the evidence a search contributes to a prompt.
const DEFAULT_MAX_CHARS: usize = 12_000;
/// Passages shorter than this are navigation noise, not documentation.
const MIN_PASSAGE_CHARS: usize = 80;

/// Searches an external documentation corpus for passages relevant to the
/// invoking task.
///
/// The target is fetched over HTTP, readable text is extracted from the
/// HTML, and the passages with the highest term overlap against the task
/// context are returned, best first, up to the configured length cap.
/// The target document may change between runs; results are only
/// idempotent within a single invocation.
pub struct DocsSearchTool {
    target: String,
    max_chars: usize,
}

impl DocsSearchTool {
    pub fn new(target: impl Into<String>) -> Self {
        DocsSearchTool {
            target: target.into(),
            max_chars: DEFAULT_MAX_CHARS,
        }
    }

    pub fn with_max_chars(mut self, max_chars: usize) -> Self {
        self.max_chars = max_chars;
        self
    }

    fn unavailable(&self, reason: impl Into<String>) -> ToolError {
        ToolError::Unavailable {
            target: self.target.clone(),
            reason: reason.into(),
        }
    }
}

#[async_trait]
impl Tool for DocsSearchTool {
    fn name(&self) -> &str {
        "docs_search"
    }

    async fn invoke(&self, task_context: &str) -> Result<String, ToolError> {
        let url = url::Url::parse(&self.target)
            .map_err(|e| self.unavailable(format!("invalid URL: {}", e)))?;
        if url.scheme() != "http" && url.scheme() != "https" {
            return Err(self.unavailable("target must be an http(s) URL"));
        }

        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(30))
            .user_agent("PaperBot/1.0 (Docs Search Tool)")
            .redirect(reqwest::redirect::Policy::limited(5))
            .build()
            .map_err(|e| self.unavailable(format!("failed to create HTTP client: {}", e)))?;

        let response = client
            .get(url)
            .send()
            .await
            .map_err(|e| self.unavailable(format!("fetch failed: {}", e)))?;

        let status = response.status();
        if !status.is_success() {
            return Err(self.unavailable(format!("HTTP status {}", status)));
        }

        let content_type = response
            .headers()
            .get("content-type")
            .and_then(|v| v.to_str().ok())
            .unwrap_or("")
            .to_string();

        let body = response
            .text()
            .await
            .map_err(|e| self.unavailable(format!("failed to read body: {}", e)))?;

        let text = if content_type.contains("text/html") || looks_like_html(&body) {
            extract_text_from_html(&body)
        } else {
            body
        };

        let passages = select_passages(&text, task_context, self.max_chars);
        if passages.is_empty() {
            return Err(self.unavailable("no readable content extracted"));
        }

        log::info!(
            "[TOOL] docs_search: {} passages ({} chars) from {}",
            passages.len(),
            passages.iter().map(|p| p.len()).sum::<usize>(),
            self.target
        );
        Ok(passages.join("\n\n"))
    }
}

fn looks_like_html(body: &str) -> bool {
    let head = body.trim_start();
    head.starts_with("<!DOCTYPE") || head.starts_with("<!doctype") || head.starts_with("<html")
}

/// Strip tags, scripts, styles, and common entities from an HTML page,
/// keeping paragraph boundaries as blank lines.
fn extract_text_from_html(html: &str) -> String {
    let mut text = String::new();
    let mut rest = html;

    while let Some(start) = rest.find('<') {
        text.push_str(&rest[..start]);
        rest = &rest[start..];

        // Skip script/style bodies entirely.
        let skipped = if starts_with_ci(rest, "<script") {
            skip_past_ci(rest, "</script>")
        } else if starts_with_ci(rest, "<style") {
            skip_past_ci(rest, "</style>")
        } else {
            None
        };
        if let Some(next) = skipped {
            rest = next;
            continue;
        }

        match rest.find('>') {
            Some(end) => {
                let tag = rest[1..end].to_lowercase();
                let tag_name = tag
                    .trim_start_matches('/')
                    .split([' ', '\t', '\n', '/'])
                    .next()
                    .unwrap_or("");
                if matches!(
                    tag_name,
                    "p" | "div" | "br" | "li" | "tr" | "h1" | "h2" | "h3" | "h4" | "h5" | "h6"
                        | "section" | "article" | "pre"
                ) {
                    text.push('\n');
                    if tag.starts_with('/') {
                        text.push('\n');
                    }
                }
                rest = &rest[end + 1..];
            }
            None => break,
        }
    }
    text.push_str(rest);

    let decoded = text
        .replace("&nbsp;", " ")
        .replace("&amp;", "&")
        .replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&#39;", "'");

    // Collapse intra-line whitespace while keeping paragraph breaks.
    let mut out = String::new();
    let mut blank_run = 0;
    for line in decoded.lines() {
        let line = line.split_whitespace().collect::<Vec<_>>().join(" ");
        if line.is_empty() {
            blank_run += 1;
            if blank_run == 1 && !out.is_empty() {
                out.push('\n');
            }
        } else {
            blank_run = 0;
            out.push_str(&line);
            out.push('\n');
        }
    }
    out
}

fn starts_with_ci(haystack: &str, prefix: &str) -> bool {
    haystack.len() >= prefix.len()
        && haystack.as_bytes()[..prefix.len()].eq_ignore_ascii_case(prefix.as_bytes())
}

/// Byte offset of an ASCII-case-insensitive needle; safe to slice with
/// because the needle itself is pure ASCII.
fn skip_past_ci<'a>(haystack: &'a str, closing: &str) -> Option<&'a str> {
    haystack
        .as_bytes()
        .windows(closing.len())
        .position(|w| w.eq_ignore_ascii_case(closing.as_bytes()))
        .map(|pos| &haystack[pos + closing.len()..])
}

/// Split extracted text into passages and return those most relevant to
/// the query, best first, until the length budget is spent.
fn select_passages(text: &str, query: &str, max_chars: usize) -> Vec<String> {
    let query_terms = terms(query);

    let mut scored: Vec<(usize, usize, &str)> = text
        .split("\n\n")
        .map(str::trim)
        .filter(|p| p.len() >= MIN_PASSAGE_CHARS)
        .enumerate()
        .map(|(position, passage)| (score_passage(passage, &query_terms), position, passage))
        .collect();

    // Highest score first; document order breaks ties.
    scored.sort_by(|a, b| b.0.cmp(&a.0).then(a.1.cmp(&b.1)));

    let mut out = Vec::new();
    let mut budget = max_chars;
    for (_, _, passage) in scored {
        if passage.len() > budget {
            continue;
        }
        budget -= passage.len();
        out.push(passage.to_string());
    }
    out
}

/// Lowercased alphanumeric terms long enough to carry meaning.
fn terms(text: &str) -> Vec<String> {
    text.to_lowercase()
        .split(|c: char| !c.is_alphanumeric())
        .filter(|t| t.len() > 3)
        .map(|t| t.to_string())
        .collect()
}

fn score_passage(passage: &str, query_terms: &[String]) -> usize {
    let passage_terms = terms(passage);
    query_terms
        .iter()
        .filter(|q| passage_terms.iter().any(|p| p == *q))
        .count()
}
