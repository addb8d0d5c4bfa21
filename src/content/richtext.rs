//! Structured rich text as returned by the content API
//!
//! A body is a flat sequence of block nodes. Inline formatting is carried as
//! spans: `[start, end)` offsets into the node text, counted in UTF-16 code
//! units.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

use super::de::null_as_default;
use crate::helpers::{html_escape, tag};

/// Block node type
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum NodeKind {
    #[default]
    Paragraph,
    Heading1,
    Heading2,
    Heading3,
    Heading4,
    Heading5,
    Heading6,
    Preformatted,
    ListItem,
    OListItem,
    Image,
    Embed,
    #[serde(other)]
    Unknown,
}

/// One block of rich text
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RichTextNode {
    #[serde(rename = "type", default)]
    pub kind: NodeKind,
    #[serde(default, deserialize_with = "null_as_default")]
    pub text: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub spans: Vec<Span>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub alt: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub oembed: Option<OEmbed>,
}

impl RichTextNode {
    /// A paragraph without formatting
    pub fn paragraph(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            ..Self::default()
        }
    }
}

/// Inline formatting over a node's text
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Span {
    pub start: usize,
    pub end: usize,
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<SpanData>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SpanData {
    pub url: Option<String>,
    pub label: Option<String>,
    pub target: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct OEmbed {
    pub embed_url: Option<String>,
    pub html: Option<String>,
}

/// Flatten nodes to plain text, one space between blocks
pub fn as_text(nodes: &[RichTextNode]) -> String {
    nodes
        .iter()
        .map(|n| n.text.as_str())
        .filter(|t| !t.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}

/// Render nodes to HTML. Consecutive list items share one list element.
pub fn as_html(nodes: &[RichTextNode]) -> String {
    let mut html = String::new();
    let mut open_list: Option<&'static str> = None;

    for node in nodes {
        let list = match node.kind {
            NodeKind::ListItem => Some("ul"),
            NodeKind::OListItem => Some("ol"),
            _ => None,
        };

        if open_list != list {
            if let Some(name) = open_list {
                html.push_str(&format!("</{}>", name));
            }
            if let Some(name) = list {
                html.push_str(&format!("<{}>", name));
            }
            open_list = list;
        }

        html.push_str(&render_node(node));
    }

    if let Some(name) = open_list {
        html.push_str(&format!("</{}>", name));
    }

    html
}

fn render_node(node: &RichTextNode) -> String {
    let inner = || render_spans(&node.text, &node.spans);
    match node.kind {
        NodeKind::Paragraph => tag("p", &[], &inner()),
        NodeKind::Heading1 => tag("h1", &[], &inner()),
        NodeKind::Heading2 => tag("h2", &[], &inner()),
        NodeKind::Heading3 => tag("h3", &[], &inner()),
        NodeKind::Heading4 => tag("h4", &[], &inner()),
        NodeKind::Heading5 => tag("h5", &[], &inner()),
        NodeKind::Heading6 => tag("h6", &[], &inner()),
        NodeKind::Preformatted => tag("pre", &[], &inner()),
        NodeKind::ListItem | NodeKind::OListItem => tag("li", &[], &inner()),
        NodeKind::Image => match node.url.as_deref() {
            Some(url) => format!(
                r#"<p class="block-img"><img src="{}" alt="{}" /></p>"#,
                html_escape(url),
                html_escape(node.alt.as_deref().unwrap_or(""))
            ),
            None => String::new(),
        },
        NodeKind::Embed => match &node.oembed {
            Some(embed) => tag(
                "div",
                &[("data-oembed", embed.embed_url.as_deref().unwrap_or(""))],
                embed.html.as_deref().unwrap_or(""),
            ),
            None => String::new(),
        },
        NodeKind::Unknown => String::new(),
    }
}

/// Apply spans to text. Every segment between span boundaries is wrapped
/// in all spans covering it, so overlapping spans still nest correctly.
fn render_spans(text: &str, spans: &[Span]) -> String {
    let chars: Vec<char> = text.chars().collect();

    // utf16 offset of each char boundary
    let mut offsets = Vec::with_capacity(chars.len() + 1);
    let mut acc = 0;
    offsets.push(0);
    for c in &chars {
        acc += c.len_utf16();
        offsets.push(acc);
    }
    let to_char = |unit: usize| offsets.partition_point(|&o| o < unit).min(chars.len());

    let mut spans: Vec<&Span> = spans.iter().filter(|s| s.start < s.end).collect();
    spans.sort_by(|a, b| a.start.cmp(&b.start).then(b.end.cmp(&a.end)));

    let mut bounds = BTreeSet::from([0, chars.len()]);
    for span in &spans {
        bounds.insert(to_char(span.start));
        bounds.insert(to_char(span.end));
    }
    let bounds: Vec<usize> = bounds.into_iter().collect();

    let mut html = String::new();
    for window in bounds.windows(2) {
        let (from, to) = (window[0], window[1]);
        let segment: String = chars[from..to].iter().collect();
        let mut out = html_escape(&segment).replace('\n', "<br />");

        for span in spans
            .iter()
            .filter(|s| to_char(s.start) <= from && to_char(s.end) >= to)
            .rev()
        {
            out = wrap_span(span, &out);
        }
        html.push_str(&out);
    }

    html
}

fn wrap_span(span: &Span, inner: &str) -> String {
    let data = span.data.clone().unwrap_or_default();
    match span.kind.as_str() {
        "strong" => tag("strong", &[], inner),
        "em" => tag("em", &[], inner),
        "hyperlink" => match (data.url.as_deref(), data.target.as_deref()) {
            (Some(url), Some(target)) => tag(
                "a",
                &[("href", url), ("target", target), ("rel", "noopener noreferrer")],
                inner,
            ),
            (Some(url), None) => tag("a", &[("href", url)], inner),
            (None, _) => inner.to_string(),
        },
        "label" => tag("span", &[("class", data.label.as_deref().unwrap_or(""))], inner),
        _ => inner.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn span(start: usize, end: usize, kind: &str) -> Span {
        Span {
            start,
            end,
            kind: kind.to_string(),
            data: None,
        }
    }

    #[test]
    fn test_node_without_type_is_paragraph() {
        let nodes: Vec<RichTextNode> =
            serde_json::from_str(r#"[{"text": "one two three"}]"#).unwrap();
        assert_eq!(nodes[0].kind, NodeKind::Paragraph);
        assert_eq!(as_text(&nodes), "one two three");
    }

    #[test]
    fn test_unknown_type_is_tolerated() {
        let nodes: Vec<RichTextNode> =
            serde_json::from_str(r#"[{"type": "table", "text": null}]"#).unwrap();
        assert_eq!(nodes[0].kind, NodeKind::Unknown);
        assert_eq!(as_html(&nodes), "");
    }

    #[test]
    fn test_as_text_joins_blocks() {
        let nodes = vec![
            RichTextNode::paragraph("first"),
            RichTextNode {
                kind: NodeKind::Image,
                url: Some("https://img/x.png".to_string()),
                ..RichTextNode::default()
            },
            RichTextNode::paragraph("second"),
        ];
        assert_eq!(as_text(&nodes), "first second");
    }

    #[test]
    fn test_as_html_spans() {
        let mut node = RichTextNode::paragraph("Hello <world>");
        node.spans = vec![span(0, 5, "strong")];
        assert_eq!(
            as_html(&[node]),
            "<p><strong>Hello</strong> &lt;world&gt;</p>"
        );
    }

    #[test]
    fn test_overlapping_spans_nest() {
        let mut node = RichTextNode::paragraph("abcd");
        node.spans = vec![span(0, 3, "strong"), span(2, 4, "em")];
        assert_eq!(
            as_html(&[node]),
            "<p><strong>ab</strong><strong><em>c</em></strong><em>d</em></p>"
        );
    }

    #[test]
    fn test_hyperlink_span() {
        let mut node = RichTextNode::paragraph("see docs");
        node.spans = vec![Span {
            start: 4,
            end: 8,
            kind: "hyperlink".to_string(),
            data: Some(SpanData {
                url: Some("https://example.com".to_string()),
                target: Some("_blank".to_string()),
                ..SpanData::default()
            }),
        }];
        assert_eq!(
            as_html(&[node]),
            r#"<p>see <a href="https://example.com" target="_blank" rel="noopener noreferrer">docs</a></p>"#
        );
    }

    #[test]
    fn test_span_offsets_are_utf16() {
        // "🚀" is two UTF-16 units
        let mut node = RichTextNode::paragraph("🚀 go");
        node.spans = vec![span(3, 5, "em")];
        assert_eq!(as_html(&[node]), "<p>🚀 <em>go</em></p>");
    }

    #[test]
    fn test_list_items_are_grouped() {
        let nodes: Vec<RichTextNode> = serde_json::from_str(
            r#"[
                {"type": "list-item", "text": "a", "spans": []},
                {"type": "list-item", "text": "b", "spans": []},
                {"type": "o-list-item", "text": "c", "spans": []},
                {"type": "paragraph", "text": "d", "spans": []}
            ]"#,
        )
        .unwrap();
        assert_eq!(
            as_html(&nodes),
            "<ul><li>a</li><li>b</li></ul><ol><li>c</li></ol><p>d</p>"
        );
    }

    #[test]
    fn test_headings_and_line_breaks() {
        let nodes = vec![
            RichTextNode {
                kind: NodeKind::Heading2,
                text: "Title".to_string(),
                ..RichTextNode::default()
            },
            RichTextNode::paragraph("line one\nline two"),
        ];
        assert_eq!(
            as_html(&nodes),
            "<h2>Title</h2><p>line one<br />line two</p>"
        );
    }
}
