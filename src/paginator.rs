//! Incremental post list pagination
//!
//! Each call takes the list shown so far and returns a new list with the
//! fetched page appended, plus the cursor of the page after it. The caller
//! owns the state and must not run two calls against the same list at once.

use chrono_tz::Tz;
use std::collections::HashSet;

use crate::content::{Cursor, Post, PostDetail, PostPagination, RawPage};
use crate::error::{FetchError, PaginationError, ValidationError};
use crate::source::ContentSource;

/// Loads pages of posts and merges them into the displayed list
pub struct PostListPaginator<'a> {
    source: &'a dyn ContentSource,
    timezone: Tz,
}

impl<'a> PostListPaginator<'a> {
    pub fn new(source: &'a dyn ContentSource, timezone: Tz) -> Self {
        Self { source, timezone }
    }

    /// The initial page, normalized exactly like every later page
    pub async fn load_first_page(&self, page_size: usize) -> Result<PostPagination, PaginationError> {
        let raw = self.source.first_page(page_size).await?;
        self.merge(&[], raw)
    }

    /// Fetch the page at `cursor` and append it to `current_posts`.
    ///
    /// A `None` cursor means the list is exhausted and fails with
    /// [`ValidationError::ExhaustedCursor`] without touching the source.
    /// On any error `current_posts` is left as it was.
    pub async fn load_next_page(
        &self,
        current_posts: &[Post],
        cursor: Option<&Cursor>,
    ) -> Result<PostPagination, PaginationError> {
        let cursor = cursor.ok_or(ValidationError::ExhaustedCursor)?;
        let raw = self.source.page_at(cursor).await?;
        self.merge(current_posts, raw)
    }

    /// Walk every page until the cursor runs out
    pub async fn load_all(&self, page_size: usize) -> Result<Vec<Post>, PaginationError> {
        let mut state = self.load_first_page(page_size).await?;
        let mut visited = HashSet::new();

        while let Some(cursor) = state.next_page.take() {
            if !visited.insert(cursor.clone()) {
                return Err(FetchError::CursorLoop(cursor.to_string()).into());
            }
            state = self.load_next_page(&state.results, Some(&cursor)).await?;
        }

        Ok(state.results)
    }

    /// Look up one article, `None` if the uid is unknown
    pub async fn load_post(&self, uid: &str) -> Result<Option<PostDetail>, PaginationError> {
        match self.source.by_uid(uid).await? {
            Some(raw) => Ok(Some(raw.into_detail(self.timezone)?)),
            None => Ok(None),
        }
    }

    fn merge(&self, current_posts: &[Post], raw: RawPage) -> Result<PostPagination, PaginationError> {
        // normalize the whole page before touching the list
        let incoming = raw
            .results
            .into_iter()
            .map(|doc| doc.into_post(self.timezone))
            .collect::<Result<Vec<_>, _>>()?;

        let mut seen: HashSet<String> = current_posts.iter().map(|p| p.uid.clone()).collect();
        let mut results = Vec::with_capacity(current_posts.len() + incoming.len());
        results.extend_from_slice(current_posts);

        for post in incoming {
            if seen.insert(post.uid.clone()) {
                results.push(post);
            } else {
                tracing::warn!("Skipping duplicate post {:?}", post.uid);
            }
        }

        tracing::debug!(
            "Post list now holds {} posts (more: {})",
            results.len(),
            raw.next_page.is_some()
        );

        Ok(PostPagination {
            next_page: raw.next_page,
            results,
        })
    }
}
