use std::time::Duration;

use async_trait::async_trait;
use reqwest::{redirect, Client};
use scraper::Html;
use thiserror::Error;
use tracing::{debug, instrument};
use url::Url;

const USER_AGENT: &str = "OutreachBot/0.1";
const MAX_REDIRECTS: usize = 10;
const SKIPPED_ELEMENTS: &[&str] = &["script", "style", "noscript", "template"];

#[derive(Debug, Error)]
pub enum FetchError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("page returned status {0}")]
    Status(u16),
}

/// One fetched document's textual content.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawDocument {
    pub source: Url,
    pub page_content: String,
}

/// Fetches the raw documents behind a URL. May return zero documents.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait PageFetcher: Send + Sync {
    async fn fetch(&self, url: &Url) -> Result<Vec<RawDocument>, FetchError>;
}

/// Fetches a page over HTTP and reduces HTML to its visible text.
#[derive(Clone)]
pub struct HttpPageFetcher {
    client: Client,
}

impl HttpPageFetcher {
    pub fn new(timeout: Duration) -> Result<Self, FetchError> {
        let client = Client::builder()
            .connect_timeout(Duration::from_secs(10))
            .timeout(timeout)
            .user_agent(USER_AGENT)
            .redirect(redirect::Policy::limited(MAX_REDIRECTS))
            .build()?;
        Ok(Self { client })
    }
}

#[async_trait]
impl PageFetcher for HttpPageFetcher {
    #[instrument(skip_all, fields(url = %url))]
    async fn fetch(&self, url: &Url) -> Result<Vec<RawDocument>, FetchError> {
        let response = self.client.get(url.clone()).send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status(status.as_u16()));
        }

        let source = response.url().clone();
        let is_html = response
            .headers()
            .get(reqwest::header::CONTENT_TYPE)
            .and_then(|ct| ct.to_str().ok())
            .map(|ct| ct.contains("text/html") || ct.contains("application/xhtml"))
            .unwrap_or(true);

        let body = response.text().await?;
        let page_content = if is_html { html_to_text(&body) } else { body };

        debug!("Fetched {} characters of text", page_content.len());

        if page_content.trim().is_empty() {
            return Ok(Vec::new());
        }

        Ok(vec![RawDocument {
            source,
            page_content,
        }])
    }
}

/// Collects visible text nodes, one per line, skipping script-like subtrees.
pub fn html_to_text(html: &str) -> String {
    let document = Html::parse_document(html);
    let mut lines: Vec<&str> = Vec::new();

    for node in document.root_element().descendants() {
        let Some(text) = node.value().as_text() else {
            continue;
        };
        let hidden = node.ancestors().any(|ancestor| {
            ancestor
                .value()
                .as_element()
                .map(|el| SKIPPED_ELEMENTS.contains(&el.name()))
                .unwrap_or(false)
        });
        let text = text.trim();
        if !hidden && !text.is_empty() {
            lines.push(text);
        }
    }

    lines.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::{
        matchers::{method, path},
        Mock, MockServer, ResponseTemplate,
    };

    fn fetcher() -> HttpPageFetcher {
        HttpPageFetcher::new(Duration::from_secs(5)).unwrap()
    }

    #[test]
    fn test_html_to_text_drops_scripts_and_styles() {
        let html = r#"<html><head><title>Careers</title><style>body{color:red}</style></head>
            <body><h1>Open roles</h1><script>track('visit')</script>
            <p>Senior Backend Engineer</p><noscript>enable js</noscript></body></html>"#;

        let text = html_to_text(html);
        assert!(text.contains("Open roles"));
        assert!(text.contains("Senior Backend Engineer"));
        assert!(!text.contains("track("));
        assert!(!text.contains("color:red"));
        assert!(!text.contains("enable js"));
    }

    #[tokio::test]
    async fn test_fetch_returns_visible_text() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/careers"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_raw(
                        "<html><body><h2>Staff Engineer</h2><p>Go, Kubernetes</p></body></html>",
                        "text/html; charset=utf-8",
                    ),
            )
            .mount(&server)
            .await;

        let url = Url::parse(&format!("{}/careers", server.uri())).unwrap();
        let docs = fetcher().fetch(&url).await.unwrap();

        assert_eq!(docs.len(), 1);
        assert_eq!(docs[0].page_content, "Staff Engineer\nGo, Kubernetes");
        assert_eq!(docs[0].source, url);
    }

    #[tokio::test]
    async fn test_fetch_passes_plain_text_through() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/jobs.txt"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_raw("Data Engineer - Python, Spark", "text/plain"),
            )
            .mount(&server)
            .await;

        let url = Url::parse(&format!("{}/jobs.txt", server.uri())).unwrap();
        let docs = fetcher().fetch(&url).await.unwrap();
        assert_eq!(docs[0].page_content, "Data Engineer - Python, Spark");
    }

    #[tokio::test]
    async fn test_fetch_empty_page_yields_no_documents() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/blank"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_raw("<html><body><script>1</script></body></html>", "text/html"),
            )
            .mount(&server)
            .await;

        let url = Url::parse(&format!("{}/blank", server.uri())).unwrap();
        assert!(fetcher().fetch(&url).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_fetch_non_success_status_is_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/gone"))
            .respond_with(ResponseTemplate::new(410))
            .mount(&server)
            .await;

        let url = Url::parse(&format!("{}/gone", server.uri())).unwrap();
        match fetcher().fetch(&url).await {
            Err(FetchError::Status(status)) => assert_eq!(status, 410),
            other => panic!("Expected status error, got {other:?}"),
        }
    }
}
