//! Article URL normalization for grouping.

const SCHEMES: [&str; 2] = ["https://", "http://"];

/// Canonicalize an article URL into its grouping key
///
/// Lowercases, drops any leading `http://` / `https://` and trailing `/`.
/// Total and idempotent: `normalize_url(&normalize_url(x)) == normalize_url(x)`.
pub fn normalize_url(url: &str) -> String {
    let lowered = url.to_lowercase();

    let mut rest = lowered.trim();
    while let Some(stripped) = SCHEMES.iter().find_map(|scheme| rest.strip_prefix(scheme)) {
        rest = stripped.trim_start();
    }

    rest.trim_end_matches(|c: char| c == '/' || c.is_whitespace())
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::decoder::UNKNOWN_PAGE;

    #[test]
    fn test_normalize_strips_http_scheme() {
        assert_eq!(normalize_url("http://example.com/a"), "example.com/a");
    }

    #[test]
    fn test_normalize_strips_https_scheme() {
        assert_eq!(normalize_url("https://example.com/a"), "example.com/a");
    }

    #[test]
    fn test_normalize_strips_trailing_slashes() {
        assert_eq!(normalize_url("https://example.com/a///"), "example.com/a");
    }

    #[test]
    fn test_normalize_lowercases() {
        assert_eq!(normalize_url("HTTPS://Example.COM/Article"), "example.com/article");
    }

    #[test]
    fn test_normalize_variants_share_a_key() {
        let variants = [
            "http://example.com/a",
            "https://example.com/a",
            "https://example.com/a/",
            "HTTP://EXAMPLE.com/A",
            "example.com/a",
        ];
        for variant in variants {
            assert_eq!(normalize_url(variant), "example.com/a", "variant {}", variant);
        }
    }

    #[test]
    fn test_normalize_keeps_query_and_path() {
        assert_eq!(
            normalize_url("https://example.com/a/b?id=7"),
            "example.com/a/b?id=7"
        );
    }

    #[test]
    fn test_normalize_sentinel_is_total() {
        assert_eq!(normalize_url(UNKNOWN_PAGE), "unknown page");
    }

    #[test]
    fn test_normalize_empty_and_degenerate() {
        assert_eq!(normalize_url(""), "");
        assert_eq!(normalize_url("/"), "");
        assert_eq!(normalize_url("http://"), "");
    }

    #[test]
    fn test_normalize_is_idempotent() {
        let inputs = [
            "http://example.com/a",
            "HTTP://http://Example.com//",
            "https://http:/",
            "  https://example.com/a/  ",
            "http:// example.com/a / ",
            "ftp://example.com/",
            "Ünicode.example/PATH",
            "",
            UNKNOWN_PAGE,
        ];
        for input in inputs {
            let once = normalize_url(input);
            assert_eq!(normalize_url(&once), once, "input {:?}", input);
        }
    }
}
