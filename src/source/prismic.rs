//! Prismic REST API v2 source
//!
//! Every search needs the repository's master ref, read once from the API
//! entry point. `next_page` URLs returned by a search already carry the ref
//! and token, so cursors are followed verbatim.

use async_trait::async_trait;
use reqwest::header::ACCEPT;
use reqwest::{Client, Url};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use tokio::sync::OnceCell;

use super::ContentSource;
use crate::config::ApiConfig;
use crate::content::{Cursor, RawDocument, RawPage};
use crate::error::FetchError;

/// Longest error body kept in `FetchError::Status`
const MAX_ERROR_BODY: usize = 512;

/// Summary fields requested for listings
const SUMMARY_FIELDS: [&str; 3] = ["title", "subtitle", "author"];
const ORDER_NEWEST_FIRST: &str = "[document.first_publication_date desc]";

#[derive(Debug, Deserialize)]
struct ApiInfo {
    #[serde(default)]
    refs: Vec<ApiRef>,
}

#[derive(Debug, Deserialize)]
struct ApiRef {
    #[serde(rename = "ref")]
    id: String,
    #[serde(rename = "isMasterRef", default)]
    is_master: bool,
}

/// Content source backed by a Prismic repository
pub struct PrismicSource {
    client: Client,
    endpoint: Url,
    access_token: Option<String>,
    document_type: String,
    master_ref: OnceCell<String>,
}

impl PrismicSource {
    pub fn new(api: &ApiConfig) -> Result<Self, FetchError> {
        let endpoint = Url::parse(&api.endpoint).map_err(|e| {
            FetchError::Transport(format!("invalid endpoint {:?}: {}", api.endpoint, e))
        })?;
        let client = Client::builder().timeout(api.timeout()).build()?;

        Ok(Self {
            client,
            endpoint,
            access_token: api.access_token.clone().filter(|t| !t.is_empty()),
            document_type: api.document_type.clone(),
            master_ref: OnceCell::new(),
        })
    }

    async fn master_ref(&self) -> Result<&str, FetchError> {
        let master = self
            .master_ref
            .get_or_try_init(|| async {
                let mut url = self.endpoint.clone();
                if let Some(token) = &self.access_token {
                    url.query_pairs_mut().append_pair("access_token", token);
                }
                let info: ApiInfo = self.get_json(url).await?;
                let master = info
                    .refs
                    .into_iter()
                    .find(|r| r.is_master)
                    .map(|r| r.id)
                    .ok_or(FetchError::MissingRef)?;
                tracing::debug!("Resolved master ref {}", master);
                Ok::<_, FetchError>(master)
            })
            .await?;
        Ok(master.as_str())
    }

    /// Build a `documents/search` URL for the given predicate
    fn search_url(
        &self,
        master_ref: &str,
        predicate: &str,
        page_size: Option<usize>,
        fetch: &[&str],
    ) -> Result<Url, FetchError> {
        let mut url = self.endpoint.clone();
        url.path_segments_mut()
            .map_err(|_| {
                FetchError::Transport(format!("endpoint {} cannot be a base", self.endpoint))
            })?
            .pop_if_empty()
            .push("documents")
            .push("search");

        {
            let mut query = url.query_pairs_mut();
            query.append_pair("ref", master_ref);
            query.append_pair("q", &format!("[{}]", predicate));
            if let Some(size) = page_size {
                query.append_pair("pageSize", &size.max(1).to_string());
            }
            if !fetch.is_empty() {
                let fields: Vec<String> = fetch
                    .iter()
                    .map(|f| format!("{}.{}", self.document_type, f))
                    .collect();
                query.append_pair("fetch", &fields.join(","));
            }
            if let Some(token) = &self.access_token {
                query.append_pair("access_token", token);
            }
        }

        Ok(url)
    }

    /// Newest posts first
    fn first_page_url(&self, master_ref: &str, page_size: usize) -> Result<Url, FetchError> {
        let predicate = format!(r#"[at(document.type,"{}")]"#, self.document_type);
        let mut url = self.search_url(master_ref, &predicate, Some(page_size), &SUMMARY_FIELDS)?;
        url.query_pairs_mut()
            .append_pair("orderings", ORDER_NEWEST_FIRST);
        Ok(url)
    }

    fn uid_predicate(&self, uid: &str) -> String {
        let escaped = uid.replace('\\', "\\\\").replace('"', "\\\"");
        format!(r#"[at(my.{}.uid,"{}")]"#, self.document_type, escaped)
    }

    async fn get_json<T: DeserializeOwned>(&self, url: Url) -> Result<T, FetchError> {
        // the query may carry the access token
        tracing::debug!("GET {}{}", url.host_str().unwrap_or_default(), url.path());

        let response = self
            .client
            .get(url)
            .header(ACCEPT, "application/json")
            .send()
            .await?;

        let status = response.status();
        let body = response.bytes().await?;
        if !status.is_success() {
            return Err(FetchError::Status {
                status: status.as_u16(),
                body: String::from_utf8_lossy(&body)
                    .chars()
                    .take(MAX_ERROR_BODY)
                    .collect(),
            });
        }

        serde_json::from_slice(&body).map_err(|e| FetchError::Decode(e.to_string()))
    }
}

#[async_trait]
impl ContentSource for PrismicSource {
    async fn first_page(&self, page_size: usize) -> Result<RawPage, FetchError> {
        let master_ref = self.master_ref().await?;
        let url = self.first_page_url(master_ref, page_size)?;
        self.get_json(url).await
    }

    async fn page_at(&self, cursor: &Cursor) -> Result<RawPage, FetchError> {
        let url = Url::parse(cursor.as_str())
            .map_err(|e| FetchError::InvalidCursor(format!("{}: {}", cursor, e)))?;
        self.get_json(url).await
    }

    async fn by_uid(&self, uid: &str) -> Result<Option<RawDocument>, FetchError> {
        let master_ref = self.master_ref().await?;
        let url = self.search_url(master_ref, &self.uid_predicate(uid), Some(1), &[])?;
        let page: RawPage = self.get_json(url).await?;
        Ok(page.results.into_iter().next())
    }
}
