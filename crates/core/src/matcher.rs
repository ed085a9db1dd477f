//! Candidate selection: pick the search result that denotes the target book.

use crate::book::BookInfo;
use crate::lookup::google_books_types::BookResult;
use crate::mapping::published_year;
use crate::normalize::comparable_name;

/// Allowed distance between the target year and a candidate's year.
const YEAR_TOLERANCE: u32 = 1;

/// Normalized name the candidates are compared against. Falls back to
/// "{series} {index}" when the target has no name of its own.
pub fn target_comparable_name(target: &BookInfo) -> String {
    let name = comparable_name(&target.name);
    if !name.is_empty() {
        return name;
    }
    match (target.series_name.as_deref(), target.index_number) {
        (Some(series), Some(index)) if !series.trim().is_empty() => {
            comparable_name(&format!("{series} {index}"))
        }
        _ => name,
    }
}

/// First candidate, in remote order, whose title and year fit the target.
pub fn select_candidate<'a>(candidates: &'a [BookResult], target: &BookInfo) -> Option<&'a BookResult> {
    let wanted = target_comparable_name(target);

    candidates.iter().find(|candidate| {
        let Some(info) = &candidate.volume_info else {
            return false;
        };
        if comparable_name(&info.title) != wanted {
            tracing::trace!(id = %candidate.id, title = %info.title, "title mismatch");
            return false;
        }
        let Some(year) = info.published_date.as_deref().and_then(published_year) else {
            tracing::trace!(id = %candidate.id, "unparsable published date");
            return false;
        };
        if let Some(target_year) = target.year {
            if year.abs_diff(target_year) > YEAR_TOLERANCE {
                tracing::trace!(id = %candidate.id, year, target_year, "year out of range");
                return false;
            }
        }
        true
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lookup::google_books_types::VolumeInfo;

    fn candidate(id: &str, title: &str, date: Option<&str>) -> BookResult {
        BookResult {
            id: id.to_string(),
            volume_info: Some(VolumeInfo {
                title: title.to_string(),
                published_date: date.map(str::to_string),
                ..Default::default()
            }),
        }
    }

    fn target(name: &str, year: Option<i32>) -> BookInfo {
        BookInfo {
            name: name.to_string(),
            year,
            ..Default::default()
        }
    }

    #[test]
    fn year_window_is_plus_minus_one() {
        let book = target("Dune", Some(2000));
        let passing: Vec<i32> = (1998..=2002)
            .filter(|year| {
                let candidates = [candidate("id", "Dune", Some(year.to_string().as_str()))];
                select_candidate(&candidates, &book).is_some()
            })
            .collect();
        assert_eq!(passing, vec![1999, 2000, 2001]);
    }

    #[test]
    fn first_passing_candidate_wins() {
        let candidates = [
            candidate("a", "Other Book", Some("2000")),
            candidate("b", "Dune", Some("2000-01-01")),
            candidate("c", "Dune", Some("2000")),
        ];
        let found = select_candidate(&candidates, &target("Dune", Some(2000))).unwrap();
        assert_eq!(found.id, "b");
    }

    #[test]
    fn candidates_without_volume_info_are_skipped() {
        let candidates = [
            BookResult {
                id: "empty".to_string(),
                volume_info: None,
            },
            candidate("ok", "Dune", Some("1965")),
        ];
        let found = select_candidate(&candidates, &target("Dune", None)).unwrap();
        assert_eq!(found.id, "ok");
    }

    #[test]
    fn unparsable_or_missing_dates_are_rejected() {
        let candidates = [
            candidate("nodate", "Dune", None),
            candidate("bad", "Dune", Some("n/a")),
        ];
        assert!(select_candidate(&candidates, &target("Dune", None)).is_none());
    }

    #[test]
    fn no_target_year_skips_year_filter() {
        let candidates = [candidate("old", "Dune", Some("1965"))];
        assert!(select_candidate(&candidates, &target("Dune", None)).is_some());
    }

    #[test]
    fn zero_target_year_is_compared_literally() {
        let candidates = [candidate("old", "Dune", Some("1965"))];
        assert!(select_candidate(&candidates, &target("Dune", Some(0))).is_none());
    }

    #[test]
    fn extreme_target_years_reject_without_overflow() {
        let candidates = [candidate("d", "Dune", Some("2000"))];
        assert!(select_candidate(&candidates, &target("Dune", Some(i32::MIN))).is_none());
        assert!(select_candidate(&candidates, &target("Dune", Some(i32::MAX))).is_none());
    }

    #[test]
    fn titles_are_compared_normalized() {
        let candidates = [candidate("h", "The Hobbit: There and Back Again", Some("1937"))];
        let found = select_candidate(&candidates, &target("hobbit there and back again", Some(1937)));
        assert_eq!(found.map(|c| c.id.as_str()), Some("h"));
    }

    #[test]
    fn series_and_index_stand_in_for_missing_name() {
        let book = BookInfo {
            name: String::new(),
            series_name: Some("Discworld".to_string()),
            index_number: Some(3),
            ..Default::default()
        };
        assert_eq!(target_comparable_name(&book), "discworld 3");
        let candidates = [candidate("d3", "Discworld III", Some("1987"))];
        assert_eq!(select_candidate(&candidates, &book).map(|c| c.id.as_str()), Some("d3"));
    }
}
