//! Wire shapes of the content API
//!
//! Responses decode into these transport structs first, then normalize into
//! the display models in one pass.

use chrono_tz::Tz;
use serde::Deserialize;

use super::de::{lenient_vec, text_field};
use super::post::{Banner, ContentBlock, Cursor, Post, PostData, PostDetail, PostDetailData};
use super::reading_time;
use crate::error::ValidationError;
use crate::helpers::format_display_date;

/// One page of a search response
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawPage {
    #[serde(default)]
    pub results: Vec<RawDocument>,
    #[serde(default)]
    pub next_page: Option<Cursor>,
}

/// A document as returned by the API
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawDocument {
    #[serde(default)]
    pub uid: Option<String>,
    #[serde(default)]
    pub first_publication_date: Option<String>,
    #[serde(default)]
    pub data: RawPostData,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawPostData {
    #[serde(default, deserialize_with = "text_field")]
    pub title: Option<String>,
    #[serde(default, deserialize_with = "text_field")]
    pub subtitle: Option<String>,
    #[serde(default, deserialize_with = "text_field")]
    pub author: Option<String>,
    #[serde(default)]
    pub banner: Option<Banner>,
    #[serde(default, deserialize_with = "lenient_vec")]
    pub content: Vec<ContentBlock>,
}

impl RawDocument {
    /// Normalize into the listing form
    pub fn into_post(self, tz: Tz) -> Result<Post, ValidationError> {
        let uid = self.required_uid()?;
        let title = self.required_title(&uid)?;
        let first_publication_date = self.display_date(tz)?;

        Ok(Post {
            uid,
            first_publication_date,
            data: PostData {
                title,
                subtitle: self.data.subtitle.unwrap_or_default(),
                author: self.data.author.unwrap_or_default(),
            },
        })
    }

    /// Normalize into the article form, computing reading time
    pub fn into_detail(self, tz: Tz) -> Result<PostDetail, ValidationError> {
        let uid = self.required_uid()?;
        let title = self.required_title(&uid)?;
        let first_publication_date = self.display_date(tz)?;
        let reading_time = reading_time::estimate(&self.data.content);

        Ok(PostDetail {
            uid,
            first_publication_date,
            reading_time,
            data: PostDetailData {
                title,
                subtitle: self.data.subtitle.unwrap_or_default(),
                author: self.data.author.unwrap_or_default(),
                banner: self.data.banner.unwrap_or_default(),
                content: self.data.content,
            },
        })
    }

    fn required_uid(&self) -> Result<String, ValidationError> {
        match self.uid.as_deref() {
            Some(uid) if !uid.trim().is_empty() => Ok(uid.to_string()),
            _ => Err(ValidationError::MissingField {
                uid: None,
                field: "uid",
            }),
        }
    }

    fn required_title(&self, uid: &str) -> Result<String, ValidationError> {
        self.data
            .title
            .clone()
            .ok_or_else(|| ValidationError::MissingField {
                uid: Some(uid.to_string()),
                field: "title",
            })
    }

    fn display_date(&self, tz: Tz) -> Result<Option<String>, ValidationError> {
        self.first_publication_date
            .as_deref()
            .map(|date| format_display_date(date, tz))
            .transpose()
    }
}
