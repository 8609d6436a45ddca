// src/render/http.rs
// =============================================================================
// A page renderer that fetches HTML over HTTP.
//
// How it works:
// 1. navigate() sends a GET request with a desktop browser user agent
// 2. A success response body is parsed into a DomSnapshot
// 3. title()/query() read from that snapshot until the next navigate()
//
// Scripts are not executed, so what you get is the server-rendered markup.
// =============================================================================

use reqwest::Client;
use std::time::Duration;
use tracing::debug;

use super::dom::{DomElement, DomSnapshot};
use super::{PageRenderer, RenderError};

// Same user agent a desktop Chrome sends, so sites serve their normal markup
const USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 \
                          (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36";

// How often wait_until_ready() re-checks the page
const READY_POLL: Duration = Duration::from_millis(100);

pub struct HttpRenderer {
    client: Client,
    page: Option<DomSnapshot>,
}

impl HttpRenderer {
    /// Builds the HTTP client. Failing here is a startup error for the crawl.
    pub fn new(request_timeout: Duration) -> Result<Self, RenderError> {
        let client = Client::builder()
            .timeout(request_timeout)
            .user_agent(USER_AGENT)
            .redirect(reqwest::redirect::Policy::limited(5))
            .build()?;

        Ok(Self { client, page: None })
    }

    fn page(&self) -> Result<&DomSnapshot, RenderError> {
        self.page.as_ref().ok_or(RenderError::NoPage)
    }
}

impl PageRenderer for HttpRenderer {
    type Element = DomElement;

    async fn navigate(&mut self, url: &str) -> Result<(), RenderError> {
        // Drop the old page first so a failed navigation never leaves stale content
        self.page = None;

        let response = self.client.get(url).send().await?;
        if !response.status().is_success() {
            return Err(RenderError::Status(response.status()));
        }

        let html = response.text().await?;
        debug!(url, bytes = html.len(), "fetched page");
        self.page = Some(DomSnapshot::parse(&html));
        Ok(())
    }

    async fn wait_until_ready(&self, timeout: Duration) -> Result<(), RenderError> {
        let page = self.page()?;
        let ready = async {
            while !page.has_body() {
                tokio::time::sleep(READY_POLL).await;
            }
        };

        tokio::time::timeout(timeout, ready)
            .await
            .map_err(|_| RenderError::Timeout(timeout))
    }

    fn title(&self) -> Result<String, RenderError> {
        self.page()?.title()
    }

    fn query(&self, selector: &str) -> Result<Vec<DomElement>, RenderError> {
        self.page()?.query(selector)
    }
}
