//! Generator module - writes the listing, article pages and "load more" pages

use anyhow::Result;
use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};

use chrono_tz::Tz;
use tera::Context;

use crate::content::{Cursor, Post, PostPagination};
use crate::error::{FetchError, PaginationError};
use crate::helpers::posts_page_url;
use crate::paginator::PostListPaginator;
use crate::source::ContentSource;
use crate::templates::{SiteData, TemplateRenderer, LOGO_SVG};
use crate::SpaceTraveling;

/// What a generation run produced
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GenerateReport {
    /// Listing pages: the index plus one JSON page per further page
    pub listing_pages: usize,
    /// Article pages written
    pub posts: usize,
    /// Articles skipped because their record could not be shown
    pub skipped: usize,
}

/// Static site generator
pub struct Generator<'a> {
    app: &'a SpaceTraveling,
    renderer: TemplateRenderer,
    source: &'a dyn ContentSource,
    timezone: Tz,
}

impl<'a> Generator<'a> {
    /// Create a new generator
    pub fn new(app: &'a SpaceTraveling, source: &'a dyn ContentSource) -> Result<Self> {
        let renderer = TemplateRenderer::new(&app.config)?;
        let timezone = app.config.tz()?;

        Ok(Self {
            app,
            renderer,
            source,
            timezone,
        })
    }

    /// Generate the entire site
    pub async fn generate(&self) -> Result<GenerateReport> {
        fs::create_dir_all(&self.app.public_dir)?;
        write_file(&self.app.public_dir.join("logo.svg"), LOGO_SVG)?;

        let paginator = PostListPaginator::new(self.source, self.timezone);
        let mut report = GenerateReport::default();

        let posts = self.generate_listing(&paginator, &mut report).await?;
        self.generate_post_pages(&paginator, &posts, &mut report)
            .await?;

        Ok(report)
    }

    /// Render the index from the first page, then one JSON file per later page.
    /// Returns every post seen, in listing order.
    async fn generate_listing(
        &self,
        paginator: &PostListPaginator<'_>,
        report: &mut GenerateReport,
    ) -> Result<Vec<Post>> {
        let per_page = self.app.config.per_page.max(1);
        let mut state = paginator.load_first_page(per_page).await?;

        let mut context = self.base_context();
        context.insert("posts", &state.results);
        context.insert("next_page", &self.local_cursor(&state, 2));
        let html = self.renderer.render("index.html", &context)?;
        write_file(&self.app.public_dir.join("index.html"), &html)?;
        report.listing_pages += 1;

        let mut visited = HashSet::new();
        let mut page_num = 2;
        while let Some(cursor) = state.next_page.clone() {
            if !visited.insert(cursor.clone()) {
                return Err(PaginationError::from(FetchError::CursorLoop(cursor.to_string())).into());
            }

            let shown = state.results.len();
            state = paginator
                .load_next_page(&state.results, Some(&cursor))
                .await?;

            let page = PostPagination {
                next_page: self.local_cursor(&state, page_num + 1),
                results: state.results[shown..].to_vec(),
            };
            let output_path = self
                .app
                .public_dir
                .join(format!("posts/page-{}.json", page_num));
            write_file(&output_path, &serde_json::to_string(&page)?)?;
            report.listing_pages += 1;
            page_num += 1;
        }

        tracing::info!(
            "Generated listing: {} posts on {} pages",
            state.results.len(),
            report.listing_pages
        );

        Ok(state.results)
    }

    /// Generate individual post pages
    async fn generate_post_pages(
        &self,
        paginator: &PostListPaginator<'_>,
        posts: &[Post],
        report: &mut GenerateReport,
    ) -> Result<()> {
        for post in posts {
            let Some(output_path) = self.post_output_path(&post.uid) else {
                tracing::warn!("Skipping post with unusable uid {:?}", post.uid);
                report.skipped += 1;
                continue;
            };

            let detail = match paginator.load_post(&post.uid).await {
                Ok(Some(detail)) => detail,
                Ok(None) => {
                    tracing::warn!("Post {:?} disappeared while generating", post.uid);
                    report.skipped += 1;
                    continue;
                }
                Err(PaginationError::Validation(e)) => {
                    tracing::warn!("Skipping post {:?}: {}", post.uid, e);
                    report.skipped += 1;
                    continue;
                }
                Err(e) => return Err(e.into()),
            };

            let mut context = self.base_context();
            context.insert("post", &detail);
            let html = self.renderer.render("post.html", &context)?;
            write_file(&output_path, &html)?;
            report.posts += 1;
        }

        Ok(())
    }

    fn base_context(&self) -> Context {
        let mut context = Context::new();
        context.insert("site", &SiteData::from(&self.app.config));
        context.insert("version", env!("CARGO_PKG_VERSION"));
        context
    }

    /// The upstream cursor is replaced by the static page that holds the same posts
    fn local_cursor(&self, state: &PostPagination, page_num: usize) -> Option<Cursor> {
        state
            .next_page
            .as_ref()
            .map(|_| Cursor::new(posts_page_url(&self.app.config, page_num)))
    }

    /// Servers decode the request path before the lookup, so the directory
    /// carries the raw uid while hrefs stay percent-encoded.
    fn post_output_path(&self, uid: &str) -> Option<PathBuf> {
        if !is_safe_segment(uid) {
            return None;
        }
        Some(
            self.app
                .public_dir
                .join("post")
                .join(uid)
                .join("index.html"),
        )
    }
}

fn is_safe_segment(uid: &str) -> bool {
    !uid.is_empty()
        && uid != "."
        && uid != ".."
        && !uid
            .chars()
            .any(|c| c == '/' || c == '\\' || c.is_control())
}

fn write_file(path: &Path, contents: &str) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .map_err(|e| anyhow::anyhow!("Failed to create dir {:?}: {}", parent, e))?;
    }
    fs::write(path, contents).map_err(|e| anyhow::anyhow!("Failed to write {:?}: {}", path, e))?;
    tracing::debug!("Generated: {:?}", path);
    Ok(())
}
