//! Built-in templates using the Tera template engine
//!
//! Templates are embedded in the binary. HTML autoescaping stays on; only
//! rendered rich text is marked `safe`.

use anyhow::Result;
use serde::Serialize;
use std::collections::HashMap;
use tera::{Context, Tera};

use crate::config::SiteConfig;
use crate::content::richtext::{as_html, RichTextNode};
use crate::helpers::post_url;

/// Site logo, written next to the generated pages
pub const LOGO_SVG: &str = include_str!("spacetraveling/logo.svg");

/// Template renderer with the embedded theme
pub struct TemplateRenderer {
    tera: Tera,
}

impl TemplateRenderer {
    /// Create a new renderer with all templates loaded
    pub fn new(config: &SiteConfig) -> Result<Self> {
        let mut tera = Tera::default();

        tera.add_raw_templates(vec![
            ("layout.html", include_str!("spacetraveling/layout.html")),
            ("index.html", include_str!("spacetraveling/index.html")),
            ("post.html", include_str!("spacetraveling/post.html")),
            // Partials
            (
                "partials/header.html",
                include_str!("spacetraveling/partials/header.html"),
            ),
            (
                "partials/post_item.html",
                include_str!("spacetraveling/partials/post_item.html"),
            ),
        ])?;

        tera.register_filter("rich_text", rich_text_filter);

        let link_config = config.clone();
        tera.register_filter(
            "post_url",
            move |value: &tera::Value, _args: &HashMap<String, tera::Value>| {
                let uid = tera::try_get_value!("post_url", "value", String, value);
                Ok(tera::Value::String(post_url(&link_config, &uid)))
            },
        );

        Ok(Self { tera })
    }

    /// Render a template with given context
    pub fn render(&self, template_name: &str, context: &Context) -> Result<String> {
        Ok(self.tera.render(template_name, context)?)
    }
}

/// Tera filter: rich-text body to HTML
fn rich_text_filter(
    value: &tera::Value,
    _args: &HashMap<String, tera::Value>,
) -> tera::Result<tera::Value> {
    let nodes = tera::try_get_value!("rich_text", "value", Vec<RichTextNode>, value);
    Ok(tera::Value::String(as_html(&nodes)))
}

/// Data structures for template context

#[derive(Debug, Clone, Serialize)]
pub struct SiteData {
    pub title: String,
    pub description: String,
    pub language: String,
    pub root: String,
}

impl From<&SiteConfig> for SiteData {
    fn from(config: &SiteConfig) -> Self {
        Self {
            title: config.title.clone(),
            description: config.description.clone(),
            language: config.language.clone(),
            root: format!("{}/", config.root.trim_end_matches('/')),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::{Banner, ContentBlock, Post, PostData, PostDetail, PostDetailData};

    fn render(template: &str, context: &Context) -> String {
        TemplateRenderer::new(&SiteConfig::default())
            .unwrap()
            .render(template, context)
            .unwrap()
    }

    fn base_context() -> Context {
        let mut context = Context::new();
        context.insert("site", &SiteData::from(&SiteConfig::default()));
        context.insert("version", "test");
        context
    }

    #[test]
    fn test_index_with_more_pages() {
        let mut context = base_context();
        context.insert(
            "posts",
            &vec![Post {
                uid: "a".to_string(),
                first_publication_date: Some("15 Mar 2021".to_string()),
                data: PostData {
                    title: "Como utilizar <Hooks>".to_string(),
                    subtitle: "S".to_string(),
                    author: "A".to_string(),
                },
            }],
        );
        context.insert("next_page", &Some("/posts/page-2.json"));

        let html = render("index.html", &context);
        assert!(html.contains(r#"href="/post/a/""#));
        assert!(html.contains("Como utilizar &lt;Hooks&gt;"));
        assert!(html.contains("15 Mar 2021"));
        assert!(html.contains("Carregar mais posts"));
        assert!(html.contains(r#"alt="logo""#));
    }

    #[test]
    fn test_index_last_page_hides_button() {
        let mut context = base_context();
        context.insert("posts", &Vec::<Post>::new());
        context.insert("next_page", &Option::<String>::None);

        let html = render("index.html", &context);
        assert!(!html.contains("Carregar mais posts"));
        assert!(!html.contains("<script>"));
    }

    fn sample_post() -> PostDetail {
        PostDetail {
            uid: "a".to_string(),
            first_publication_date: Some("15 Mar 2021".to_string()),
            reading_time: 4,
            data: PostDetailData {
                title: "T".to_string(),
                subtitle: String::new(),
                author: "A".to_string(),
                banner: Banner {
                    url: "https://img/banner.png".to_string(),
                    alt: None,
                },
                content: vec![ContentBlock::new(
                    "Heading",
                    vec![RichTextNode::paragraph("Body <text>")],
                )],
            },
        }
    }

    #[test]
    fn test_post_page() {
        let mut context = base_context();
        context.insert("post", &sample_post());

        let html = render("post.html", &context);
        assert!(html.contains("<title>T | spacetraveling</title>"));
        assert!(html.contains("4 min"));
        assert!(html.contains(r#"src="https:&#x2F;&#x2F;img&#x2F;banner.png""#));
        assert!(html.contains("<h2>Heading</h2>"));
        assert!(html.contains("<p>Body &lt;text&gt;</p>"));
    }

    #[test]
    fn test_post_title_follows_site_title() {
        let config = SiteConfig {
            title: "Meu Blog".to_string(),
            ..SiteConfig::default()
        };
        let mut context = Context::new();
        context.insert("site", &SiteData::from(&config));
        context.insert("version", "test");
        context.insert("post", &sample_post());

        let html = TemplateRenderer::new(&config)
            .unwrap()
            .render("post.html", &context)
            .unwrap();
        assert!(html.contains("<title>T | Meu Blog</title>"));
    }
}
