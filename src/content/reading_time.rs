//! Reading time estimation

use super::post::ContentBlock;
use super::richtext::as_text;

/// Fixed reading speed
pub const WORDS_PER_MINUTE: usize = 200;

/// Whitespace-separated words in one block body
pub fn count_words(block: &ContentBlock) -> usize {
    as_text(&block.body).split_whitespace().count()
}

/// Whole minutes needed to read the content, rounded up.
/// Empty content takes 0 minutes.
pub fn estimate(content: &[ContentBlock]) -> usize {
    let words: usize = content.iter().map(count_words).sum();
    words.div_ceil(WORDS_PER_MINUTE)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::RichTextNode;

    fn block_with_words(n: usize) -> ContentBlock {
        ContentBlock::new("h", vec![RichTextNode::paragraph("word ".repeat(n))])
    }

    #[test]
    fn test_empty_content() {
        assert_eq!(estimate(&[]), 0);
        assert_eq!(estimate(&[ContentBlock::default()]), 0);
    }

    #[test]
    fn test_short_block_rounds_up() {
        let blocks: Vec<ContentBlock> =
            serde_json::from_str(r#"[{"heading": "h", "body": [{"text": "one two three"}]}]"#)
                .unwrap();
        assert_eq!(estimate(&blocks), 1);
    }

    #[test]
    fn test_boundaries() {
        assert_eq!(estimate(&[block_with_words(400)]), 2);
        assert_eq!(estimate(&[block_with_words(401)]), 3);
        assert_eq!(estimate(&[block_with_words(200), block_with_words(200)]), 2);
        assert_eq!(estimate(&[block_with_words(200), block_with_words(201)]), 3);
    }

    #[test]
    fn test_words_do_not_merge_across_nodes() {
        let block = ContentBlock::new(
            "h",
            vec![
                RichTextNode::paragraph("end"),
                RichTextNode::paragraph("start"),
            ],
        );
        assert_eq!(count_words(&block), 2);
    }

    #[test]
    fn test_whitespace_runs() {
        let block = ContentBlock::new("h", vec![RichTextNode::paragraph("  a \n\t b   c  ")]);
        assert_eq!(count_words(&block), 3);
    }
}
