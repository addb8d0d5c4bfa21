//! In-memory source for tests

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Mutex;

use super::ContentSource;
use crate::content::{Cursor, RawDocument, RawPage};
use crate::error::FetchError;

/// Serves fixed pages keyed by cursor and records every request
#[derive(Default)]
pub(crate) struct MemorySource {
    first: RawPage,
    pages: HashMap<Cursor, RawPage>,
    documents: Vec<RawDocument>,
    requests: Mutex<Vec<String>>,
}

impl MemorySource {
    pub(crate) fn new(first: serde_json::Value) -> Self {
        Self {
            first: page(first),
            ..Self::default()
        }
    }

    pub(crate) fn with_page(mut self, cursor: &str, body: serde_json::Value) -> Self {
        self.pages.insert(Cursor::from(cursor), page(body));
        self
    }

    pub(crate) fn with_document(mut self, body: serde_json::Value) -> Self {
        self.documents
            .push(serde_json::from_value(body).expect("fixture document"));
        self
    }

    pub(crate) fn requests(&self) -> Vec<String> {
        self.requests.lock().unwrap().clone()
    }

    fn record(&self, request: String) {
        self.requests.lock().unwrap().push(request);
    }
}

fn page(body: serde_json::Value) -> RawPage {
    serde_json::from_value(body).expect("fixture page")
}

#[async_trait]
impl ContentSource for MemorySource {
    async fn first_page(&self, page_size: usize) -> Result<RawPage, FetchError> {
        self.record(format!("first:{}", page_size));
        Ok(self.first.clone())
    }

    async fn page_at(&self, cursor: &Cursor) -> Result<RawPage, FetchError> {
        self.record(format!("page:{}", cursor));
        self.pages.get(cursor).cloned().ok_or_else(|| FetchError::Status {
            status: 404,
            body: format!("no page at {}", cursor),
        })
    }

    async fn by_uid(&self, uid: &str) -> Result<Option<RawDocument>, FetchError> {
        self.record(format!("uid:{}", uid));
        Ok(self
            .documents
            .iter()
            .find(|d| d.uid.as_deref() == Some(uid))
            .cloned())
    }
}
