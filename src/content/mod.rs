//! Content module - post models, rich text and reading time

mod de;
mod post;
pub mod raw;
pub mod reading_time;
pub mod richtext;

pub use post::{
    Banner, ContentBlock, Cursor, Post, PostData, PostDetail, PostDetailData, PostPagination,
};
pub use raw::{RawDocument, RawPage};
pub use richtext::{NodeKind, RichTextNode, Span};
