//! CDN cover URL compression.
//!
//! Stored paths are relative to the CDN image root so the persisted map stays
//! small. URLs served from anywhere else are stored verbatim.

/// Default CDN image root.
pub const DEFAULT_CDN_BASE: &str = "https://cdn.myanimelist.net/images";

const SECURE_SCHEME: &str = "https:";

/// Converts cover URLs to stored paths and back.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UrlCodec {
    base_url: String,
}

impl UrlCodec {
    /// Creates a codec for the given CDN root. A trailing `/` is ignored.
    #[must_use]
    pub fn new(base_url: impl Into<String>) -> Self {
        let mut base_url = base_url.into();
        while base_url.ends_with('/') {
            base_url.pop();
        }
        Self { base_url }
    }

    /// Returns the CDN root.
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Compresses a cover URL into a stored path.
    ///
    /// Protocol-relative input is upgraded to `https:` first. URLs under the
    /// CDN root lose the root; anything else is returned as is.
    #[must_use]
    pub fn compress(&self, url: &str) -> String {
        if url.is_empty() {
            return String::new();
        }

        let url = upgrade_protocol_relative(url);
        match url.strip_prefix(self.base_url.as_str()) {
            Some(rest) => rest.to_string(),
            None => url,
        }
    }

    /// Expands a stored path back into an absolute URL.
    #[must_use]
    pub fn expand(&self, path: &str) -> String {
        if path.is_empty() || path.starts_with("http") {
            return path.to_string();
        }
        if path.starts_with("//") {
            return format!("{SECURE_SCHEME}{path}");
        }
        if path.starts_with('/') {
            format!("{}{path}", self.base_url)
        } else {
            format!("{}/{path}", self.base_url)
        }
    }
}

impl Default for UrlCodec {
    fn default() -> Self {
        Self::new(DEFAULT_CDN_BASE)
    }
}

fn upgrade_protocol_relative(url: &str) -> String {
    if url.starts_with("//") {
        format!("{SECURE_SCHEME}{url}")
    } else {
        url.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    #[test_case("https://cdn.myanimelist.net/images/anime/1223/96541.jpg", "/anime/1223/96541.jpg" ; "https_cdn")]
    #[test_case("//cdn.myanimelist.net/images/anime/1223/96541.jpg", "/anime/1223/96541.jpg" ; "protocol_relative_cdn")]
    #[test_case("https://example.com/cover.jpg", "https://example.com/cover.jpg" ; "foreign")]
    #[test_case("//example.com/cover.jpg", "https://example.com/cover.jpg" ; "protocol_relative_foreign")]
    #[test_case("http://cdn.myanimelist.net/images/a.jpg", "http://cdn.myanimelist.net/images/a.jpg" ; "plain_http_is_foreign")]
    #[test_case("", "" ; "empty")]
    fn test_compress(input: &str, expected: &str) {
        assert_eq!(UrlCodec::default().compress(input), expected);
    }

    #[test_case("/anime/1223/96541.jpg", "https://cdn.myanimelist.net/images/anime/1223/96541.jpg" ; "rooted_path")]
    #[test_case("anime/1223/96541.jpg", "https://cdn.myanimelist.net/images/anime/1223/96541.jpg" ; "bare_path")]
    #[test_case("https://example.com/cover.jpg", "https://example.com/cover.jpg" ; "absolute")]
    #[test_case("http://example.com/cover.jpg", "http://example.com/cover.jpg" ; "absolute_http")]
    #[test_case("//example.com/cover.jpg", "https://example.com/cover.jpg" ; "protocol_relative")]
    #[test_case("", "" ; "empty")]
    fn test_expand(input: &str, expected: &str) {
        assert_eq!(UrlCodec::default().expand(input), expected);
    }

    #[test]
    fn test_cdn_urls_survive_round_trip() {
        let codec = UrlCodec::default();
        for url in [
            "https://cdn.myanimelist.net/images/anime/5/87048.jpg",
            "https://cdn.myanimelist.net/images/manga/3/243675l.webp",
        ] {
            assert_eq!(codec.expand(&codec.compress(url)), url);
        }

        let relative = "//cdn.myanimelist.net/images/anime/5/87048.jpg";
        assert_eq!(
            codec.expand(&codec.compress(relative)),
            "https://cdn.myanimelist.net/images/anime/5/87048.jpg"
        );
    }

    #[test]
    fn test_foreign_urls_survive_round_trip() {
        let codec = UrlCodec::default();
        let url = "https://s4.anilist.co/file/anilistcdn/media/anime/cover/large/bx5114.jpg";
        assert_eq!(codec.compress(url), url);
        assert_eq!(codec.expand(&codec.compress(url)), url);
    }

    #[test]
    fn test_custom_base_trailing_slash() {
        let codec = UrlCodec::new("https://cdn.example.net/images/");
        assert_eq!(codec.base_url(), "https://cdn.example.net/images");
        assert_eq!(
            codec.compress("//cdn.example.net/images/5114.jpg"),
            "/5114.jpg"
        );
        assert_eq!(
            codec.expand("/5114.jpg"),
            "https://cdn.example.net/images/5114.jpg"
        );
    }
}
