//! URL helper functions

use percent_encoding::{utf8_percent_encode, AsciiSet, CONTROLS};

use crate::config::SiteConfig;

/// Characters escaped inside a single path segment
const SEGMENT: &AsciiSet = &CONTROLS
    .add(b' ')
    .add(b'"')
    .add(b'#')
    .add(b'%')
    .add(b'/')
    .add(b'<')
    .add(b'>')
    .add(b'?')
    .add(b'`')
    .add(b'{')
    .add(b'}');

/// Generate a URL with the root path
///
/// # Examples
/// ```ignore
/// url_for(&config, "/css/style.css") // -> "/blog/css/style.css"
/// ```
pub fn url_for(config: &SiteConfig, path: &str) -> String {
    let root = config.root.trim_end_matches('/');
    let path = path.trim_start_matches('/');

    if path.is_empty() {
        format!("{}/", root)
    } else {
        format!("{}/{}", root, path)
    }
}

/// Path of an article page
pub fn post_url(config: &SiteConfig, uid: &str) -> String {
    url_for(config, &format!("post/{}/", encode_segment(uid)))
}

/// Path of the n-th "load more" page (n >= 2)
pub fn posts_page_url(config: &SiteConfig, page: usize) -> String {
    url_for(config, &format!("posts/page-{}.json", page))
}

/// Percent-encode a value for use as one path segment
pub fn encode_segment(value: &str) -> String {
    utf8_percent_encode(value, SEGMENT).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config_with_root(root: &str) -> SiteConfig {
        SiteConfig {
            root: root.to_string(),
            ..SiteConfig::default()
        }
    }

    #[test]
    fn test_url_for() {
        let config = config_with_root("/blog/");
        assert_eq!(url_for(&config, "/css/style.css"), "/blog/css/style.css");
        assert_eq!(url_for(&config, ""), "/blog/");
        assert_eq!(url_for(&config_with_root("/"), "about"), "/about");
    }

    #[test]
    fn test_post_url() {
        let config = config_with_root("/");
        assert_eq!(post_url(&config, "como-utilizar-hooks"), "/post/como-utilizar-hooks/");
        assert_eq!(post_url(&config, "a/b c"), "/post/a%2Fb%20c/");
    }

    #[test]
    fn test_posts_page_url() {
        assert_eq!(posts_page_url(&config_with_root("/"), 2), "/posts/page-2.json");
    }
}
