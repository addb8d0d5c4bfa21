//! Content sources - where raw posts come from

#[cfg(test)]
pub(crate) mod memory;
mod prismic;

use async_trait::async_trait;

use crate::content::{Cursor, RawDocument, RawPage};
use crate::error::FetchError;

pub use prismic::PrismicSource;

/// Fetches raw post records from the headless CMS
#[async_trait]
pub trait ContentSource: Send + Sync {
    /// First page of published posts, newest first
    async fn first_page(&self, page_size: usize) -> Result<RawPage, FetchError>;

    /// The page a cursor points at
    async fn page_at(&self, cursor: &Cursor) -> Result<RawPage, FetchError>;

    /// A single post with its full content, `None` if no post has that uid
    async fn by_uid(&self, uid: &str) -> Result<Option<RawDocument>, FetchError>;
}
