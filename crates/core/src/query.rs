//! Search query composition.

use crate::book::BookInfo;

/// Build the free-text query for a book, or `None` when there is nothing to
/// search for. A series name takes priority over name + year.
pub fn search_query(info: &BookInfo) -> Option<String> {
    let name = Some(info.name.trim()).filter(|n| !n.is_empty());

    if let Some(series) = info.series_name.as_deref().map(str::trim).filter(|s| !s.is_empty()) {
        return Some(match (name, info.index_number) {
            (Some(name), _) => format!("{series} {name}"),
            (None, Some(index)) => format!("{series} {index}"),
            (None, None) => series.to_string(),
        });
    }

    let name = name?;
    Some(match info.year {
        Some(year) => format!("{name} {year}"),
        None => name.to_string(),
    })
}
