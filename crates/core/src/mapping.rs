//! Conversion of Google Books volumes into the host's metadata records.

use crate::book::{
    Book, ImageType, MetadataResult, PersonInfo, PersonKind, RemoteImageInfo, RemoteSearchResult,
    GOOGLE_BOOKS_PROVIDER_ID,
};
use crate::lookup::google_books_types::{BookResult, VolumeInfo};

/// Name shown for results and images coming from this provider.
pub const PROVIDER_NAME: &str = "Google Books";

/// Category segment that never becomes a genre or tag.
const IGNORED_CATEGORY: &str = "General";

/// Year from a `YYYY[-MM[-DD]]` date: the leading four characters, or the
/// whole string when shorter. `None` when those are not an integer.
pub fn published_year(date: &str) -> Option<i32> {
    let head: String = date.chars().take(4).collect();
    head.parse().ok()
}

/// Split `a/b` categories, drop "General" and blanks, dedupe keeping order.
pub fn split_categories(categories: &[String]) -> Vec<String> {
    let mut out: Vec<String> = Vec::new();
    for segment in categories.iter().flat_map(|c| c.split('/')).map(str::trim) {
        if segment.is_empty() || segment == IGNORED_CATEGORY {
            continue;
        }
        if !out.iter().any(|s| s == segment) {
            out.push(segment.to_string());
        }
    }
    out
}

/// Full metadata for a detail record. Returns an empty result when the record
/// has no volume info.
pub fn to_metadata_result(book: &BookResult) -> MetadataResult {
    let Some(info) = &book.volume_info else {
        return MetadataResult::default();
    };

    let mut item = Book {
        name: Some(info.title.clone()),
        overview: info.description.clone(),
        production_year: info.published_date.as_deref().and_then(published_year),
        community_rating: info.average_rating.map(|r| r * 2.0),
        ..Default::default()
    };

    if let Some(publisher) = info.publisher.as_deref().filter(|p| !p.is_empty()) {
        item.studios.push(publisher.to_string());
    }

    let mut categories = split_categories(&info.categories).into_iter();
    if let Some(genre) = categories.next() {
        item.genres.push(genre);
    }
    item.tags = categories.collect();

    if !book.id.is_empty() {
        item.set_provider_id(GOOGLE_BOOKS_PROVIDER_ID, book.id.clone());
    }

    let mut result = MetadataResult {
        item: Some(item),
        has_metadata: true,
        result_language: info.language.clone().filter(|l| !l.is_empty()),
        ..Default::default()
    };
    for author in &info.authors {
        result.add_person(PersonInfo {
            name: author.clone(),
            kind: PersonKind::Author,
        });
    }
    result
}

/// Candidate summary for a search listing.
pub fn to_search_result(id: &str, info: &VolumeInfo) -> RemoteSearchResult {
    let mut result = RemoteSearchResult {
        name: info.title.clone(),
        overview: info.description.clone(),
        production_year: info.published_date.as_deref().and_then(published_year),
        image_url: info
            .image_links
            .as_ref()
            .and_then(|links| links.thumbnail.clone()),
        search_provider_name: PROVIDER_NAME.to_string(),
        ..Default::default()
    };
    if !id.is_empty() {
        result
            .provider_ids
            .insert(GOOGLE_BOOKS_PROVIDER_ID.to_string(), id.to_string());
    }
    result
}

/// Every image link of a volume, largest first.
pub fn to_remote_images(info: &VolumeInfo) -> Vec<RemoteImageInfo> {
    info.image_links
        .iter()
        .flat_map(|links| links.largest_first())
        .map(|url| RemoteImageInfo {
            provider_name: PROVIDER_NAME.to_string(),
            url: url.to_string(),
            image_type: ImageType::Primary,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lookup::google_books_types::ImageLinks;
    use pretty_assertions::assert_eq;

    fn volume(id: &str, info: VolumeInfo) -> BookResult {
        BookResult {
            id: id.to_string(),
            volume_info: Some(info),
        }
    }

    #[test]
    fn published_year_variants() {
        assert_eq!(published_year("2001-05-01"), Some(2001));
        assert_eq!(published_year("1999-03"), Some(1999));
        assert_eq!(published_year("1987"), Some(1987));
        assert_eq!(published_year("199"), Some(199));
        assert_eq!(published_year("abcd-01-01"), None);
        assert_eq!(published_year(""), None);
    }

    #[test]
    fn categories_drop_general_and_dedupe() {
        let categories = vec!["Fiction/General".to_string(), "Fiction/Fantasy".to_string()];
        assert_eq!(split_categories(&categories), vec!["Fiction", "Fantasy"]);
    }

    #[test]
    fn genre_and_tags_from_categories() {
        let book = volume(
            "abc",
            VolumeInfo {
                title: "Title".to_string(),
                categories: vec![
                    "Fiction/General".to_string(),
                    "Fiction/Fantasy".to_string(),
                ],
                ..Default::default()
            },
        );
        let item = to_metadata_result(&book).item.unwrap();
        assert_eq!(item.genres, vec!["Fiction"]);
        assert_eq!(item.tags, vec!["Fantasy"]);
    }

    #[test]
    fn only_general_category_yields_nothing() {
        let book = volume(
            "abc",
            VolumeInfo {
                categories: vec!["General".to_string()],
                ..Default::default()
            },
        );
        let item = to_metadata_result(&book).item.unwrap();
        assert!(item.genres.is_empty());
        assert!(item.tags.is_empty());
    }

    #[test]
    fn full_mapping() {
        let book = volume(
            "zyTCAlFPjgYC",
            VolumeInfo {
                title: "The Google Story".to_string(),
                description: Some("Here is the story".to_string()),
                published_date: Some("2005-11-15".to_string()),
                average_rating: Some(4.5),
                authors: vec!["David A. Vise".to_string(), "Mark Malseed".to_string()],
                language: Some("en".to_string()),
                publisher: Some("Random House".to_string()),
                ..Default::default()
            },
        );
        let result = to_metadata_result(&book);
        assert!(result.has_metadata);
        assert_eq!(result.result_language.as_deref(), Some("en"));
        assert_eq!(
            result.people,
            vec![
                PersonInfo {
                    name: "David A. Vise".to_string(),
                    kind: PersonKind::Author
                },
                PersonInfo {
                    name: "Mark Malseed".to_string(),
                    kind: PersonKind::Author
                },
            ]
        );
        let item = result.item.unwrap();
        assert_eq!(item.name.as_deref(), Some("The Google Story"));
        assert_eq!(item.overview.as_deref(), Some("Here is the story"));
        assert_eq!(item.production_year, Some(2005));
        assert_eq!(item.community_rating, Some(9.0));
        assert_eq!(item.studios, vec!["Random House"]);
        assert_eq!(item.provider_id(GOOGLE_BOOKS_PROVIDER_ID), Some("zyTCAlFPjgYC"));
    }

    #[test]
    fn malformed_fields_are_left_absent() {
        let book = volume(
            "",
            VolumeInfo {
                title: "X".to_string(),
                published_date: Some("unknown".to_string()),
                language: Some(String::new()),
                publisher: Some(String::new()),
                ..Default::default()
            },
        );
        let result = to_metadata_result(&book);
        assert!(result.has_metadata);
        assert_eq!(result.result_language, None);
        let item = result.item.unwrap();
        assert_eq!(item.production_year, None);
        assert_eq!(item.community_rating, None);
        assert!(item.studios.is_empty());
        assert!(item.provider_ids.is_empty());
    }

    #[test]
    fn missing_volume_info_means_no_metadata() {
        let book = BookResult {
            id: "abc".to_string(),
            volume_info: None,
        };
        assert_eq!(to_metadata_result(&book), MetadataResult::default());
    }

    #[test]
    fn search_result_summary() {
        let info = VolumeInfo {
            title: "Dune".to_string(),
            published_date: Some("1965".to_string()),
            image_links: Some(ImageLinks {
                thumbnail: Some("http://img/t.jpg".to_string()),
                ..Default::default()
            }),
            ..Default::default()
        };
        let summary = to_search_result("dune1", &info);
        assert_eq!(summary.name, "Dune");
        assert_eq!(summary.production_year, Some(1965));
        assert_eq!(summary.image_url.as_deref(), Some("http://img/t.jpg"));
        assert_eq!(summary.provider_ids[GOOGLE_BOOKS_PROVIDER_ID], "dune1");
        assert_eq!(summary.search_provider_name, PROVIDER_NAME);
    }

    #[test]
    fn remote_images_largest_first() {
        let info = VolumeInfo {
            image_links: Some(ImageLinks {
                small_thumbnail: Some("s".to_string()),
                thumbnail: Some("t".to_string()),
                large: Some("l".to_string()),
                ..Default::default()
            }),
            ..Default::default()
        };
        let urls: Vec<String> = to_remote_images(&info).into_iter().map(|i| i.url).collect();
        assert_eq!(urls, vec!["l", "t", "s"]);
        assert!(to_remote_images(&VolumeInfo::default()).is_empty());
    }
}
