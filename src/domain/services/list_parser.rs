//! Cover list payload parsing.
//!
//! A payload is a stylesheet fragment made of rules like
//! `.animetitle[href^="/anime/5114/"]{background-image:url(//cdn/.../5114.jpg)}`.
//! Rules that do not match exactly are skipped.

use std::sync::LazyLock;

use regex::Regex;

use super::UrlCodec;
use crate::domain::entities::{Category, EntityRef, ImageMap};

static RECORD_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r#"\.animetitle\[href\^="/(anime|manga)/(\d+)/"\]\{background-image:url\(([^)]+)\)\}"#,
    )
    .expect("cover record pattern is valid")
});

/// One cover rule extracted from a payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListRecord {
    /// Entity the cover belongs to.
    pub entity: EntityRef,
    /// Cover URL exactly as it appeared in the payload.
    pub url: String,
}

/// Extracts every well-formed record from `raw`, in document order.
#[must_use]
pub fn parse_records(raw: &str) -> Vec<ListRecord> {
    RECORD_RE
        .captures_iter(raw)
        .filter_map(|caps| {
            let category: Category = caps.get(1)?.as_str().parse().ok()?;
            let id: u64 = caps.get(2)?.as_str().parse().ok()?;
            let url = caps.get(3)?.as_str().to_string();
            Some(ListRecord {
                entity: EntityRef::new(category, id),
                url,
            })
        })
        .collect()
}

/// Parses `raw` into `map`, compressing each URL. Returns the number of
/// records applied.
pub fn populate(map: &mut ImageMap, raw: &str, codec: &UrlCodec) -> usize {
    let records = parse_records(raw);
    let applied = records.len();
    for record in records {
        map.insert(record.entity, codec.compress(&record.url));
    }
    applied
}

#[cfg(test)]
mod tests {
    use super::*;

    const CDN: &str = "https://cdn.myanimelist.net/images";

    #[test]
    fn test_parse_single_record() {
        let raw = r#".animetitle[href^="/anime/5114/"]{background-image:url(//cdn.myanimelist.net/images/5114.jpg)}"#;
        let records = parse_records(raw);

        assert_eq!(
            records,
            vec![ListRecord {
                entity: EntityRef::new(Category::Anime, 5114),
                url: "//cdn.myanimelist.net/images/5114.jpg".to_string(),
            }]
        );
    }

    #[test]
    fn test_document_order_and_skipping() {
        let raw = concat!(
            r#".animetitle[href^="/anime/1/"]{background-image:url(/a/1.jpg)}"#,
            "\n/* header */\n",
            r#".animetitle[href^="/anime/abc/"]{background-image:url(/bad.jpg)}"#,
            r#".animetitle[href^="/character/3/"]{background-image:url(/c.jpg)}"#,
            r#".animetitle[href^="/anime/4/"]{background-image:url()}"#,
            r#".animetitle[href^="/manga/2/"]{background-image:url(/m/2.jpg)}"#,
            r#".animetitle[href^="/anime/3/"]{background-image: url(/spaced.jpg)}"#,
        );

        let ids: Vec<_> = parse_records(raw).into_iter().map(|r| r.entity).collect();
        assert_eq!(
            ids,
            vec![
                EntityRef::new(Category::Anime, 1),
                EntityRef::new(Category::Manga, 2),
            ]
        );
    }

    #[test]
    fn test_overflowing_id_is_skipped() {
        let raw = r#".animetitle[href^="/anime/99999999999999999999999/"]{background-image:url(/x.jpg)}"#;
        assert!(parse_records(raw).is_empty());
    }

    #[test]
    fn test_no_records_leaves_category_empty() {
        let mut map = ImageMap::new();
        let applied = populate(&mut map, "body { color: red }", &UrlCodec::new(CDN));

        assert_eq!(applied, 0);
        assert!(map.category(Category::Anime).is_empty());
        assert!(map.category(Category::Manga).is_empty());
    }

    #[test]
    fn test_populate_compresses_urls() {
        let codec = UrlCodec::new(CDN);
        let anime = r#".animetitle[href^="/anime/5114/"]{background-image:url(//cdn.myanimelist.net/images/5114.jpg)}"#;
        let manga = r#".animetitle[href^="/manga/2/"]{background-image:url(https://cdn.myanimelist.net/images/2.jpg)}"#;

        let mut map = ImageMap::new();
        assert_eq!(populate(&mut map, anime, &codec), 1);
        assert_eq!(populate(&mut map, manga, &codec), 1);

        let mut expected = ImageMap::new();
        expected.insert(EntityRef::new(Category::Anime, 5114), "/5114.jpg");
        expected.insert(EntityRef::new(Category::Manga, 2), "/2.jpg");
        assert_eq!(map, expected);
    }

    #[test]
    fn test_later_duplicate_wins() {
        let raw = concat!(
            r#".animetitle[href^="/anime/1/"]{background-image:url(/old.jpg)}"#,
            r#".animetitle[href^="/anime/1/"]{background-image:url(/new.jpg)}"#,
        );
        let mut map = ImageMap::new();
        populate(&mut map, raw, &UrlCodec::new(CDN));

        assert_eq!(map.get(EntityRef::new(Category::Anime, 1)), Some("/new.jpg"));
    }
}
