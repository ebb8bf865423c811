//! Entity extraction from page links.

use std::sync::LazyLock;

use regex::Regex;

use crate::domain::entities::{Category, EntityRef};

static ENTITY_LINK_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"/(anime|manga)/(\d+)/").expect("entity link pattern is valid"));

/// Extracts the entity a link points at, if it is an anime or manga page.
///
/// Works on absolute URLs and bare paths alike; the first
/// `/<category>/<id>/` segment wins.
#[must_use]
pub fn extract_entity_ref(link: &str) -> Option<EntityRef> {
    let caps = ENTITY_LINK_RE.captures(link)?;
    let category: Category = caps.get(1)?.as_str().parse().ok()?;
    let id = caps.get(2)?.as_str().parse().ok()?;
    Some(EntityRef::new(category, id))
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    #[test_case("/anime/5114/some-slug", Some((Category::Anime, 5114)) ; "anime_path")]
    #[test_case("https://myanimelist.net/manga/2/Berserk", Some((Category::Manga, 2)) ; "manga_url")]
    #[test_case("/anime/9999/x", Some((Category::Anime, 9999)) ; "unknown_id_still_matches")]
    #[test_case("/character/1/x", None ; "other_category")]
    #[test_case("/anime/5114", None ; "missing_trailing_slash")]
    #[test_case("/anime/season/2024/", None ; "non_numeric")]
    #[test_case("", None ; "empty")]
    fn test_extract(link: &str, expected: Option<(Category, u64)>) {
        let expected = expected.map(|(c, id)| EntityRef::new(c, id));
        assert_eq!(extract_entity_ref(link), expected);
    }
}
