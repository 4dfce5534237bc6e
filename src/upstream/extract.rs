use once_cell::sync::Lazy;
use regex::Regex;

/// Pulls image URLs out of the free-form text the image service replies with.
pub trait UrlExtractor: Send + Sync {
    fn extract(&self, content: &str) -> Vec<String>;
}

// http(s) URL wrapped in parentheses, no whitespace or ')' inside.
static PARENTHESIZED_URL: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\((https?://[^\s)]+)\)").expect("parenthesized URL pattern is valid")
});

/// Matches markdown-style `(https://...)` links, in order of appearance.
#[derive(Debug, Clone, Copy, Default)]
pub struct ParenthesizedUrls;

impl UrlExtractor for ParenthesizedUrls {
    fn extract(&self, content: &str) -> Vec<String> {
        PARENTHESIZED_URL
            .captures_iter(content)
            .filter_map(|caps| caps.get(1))
            .map(|m| m.as_str().to_string())
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extracts_all_urls_in_order() {
        let urls = ParenthesizedUrls
            .extract("Image: (https://example.com/a.png) more text (http://x.io/b)");
        assert_eq!(urls, vec!["https://example.com/a.png", "http://x.io/b"]);
    }

    #[test]
    fn test_no_parenthesized_url() {
        assert!(ParenthesizedUrls
            .extract("see https://example.com/a.png for details")
            .is_empty());
        assert!(ParenthesizedUrls.extract("").is_empty());
    }

    #[test]
    fn test_markdown_image_link() {
        let content = "![image](https://cdn.example.com/gen/1.png)\n\n![image](https://cdn.example.com/gen/2.png)";
        assert_eq!(
            ParenthesizedUrls.extract(content),
            vec![
                "https://cdn.example.com/gen/1.png",
                "https://cdn.example.com/gen/2.png"
            ]
        );
    }

    #[test]
    fn test_rejects_whitespace_and_other_schemes() {
        assert!(ParenthesizedUrls
            .extract("(https://example.com/a b.png) (ftp://example.com/c.png)")
            .is_empty());
    }

    #[test]
    fn test_url_ends_at_first_closing_paren() {
        // '(' is allowed inside the URL, it stops at the first ')'
        let urls = ParenthesizedUrls.extract("(https://a.io/x(1))");
        assert_eq!(urls, vec!["https://a.io/x(1"]);
    }
}
