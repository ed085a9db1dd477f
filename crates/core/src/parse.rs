//! Filename parser: pulls series, index and year out of a raw book title.
//!
//! Patterns are tried in order and the first full-string match wins, so the
//! list order is the priority policy.

use regex::{Captures, Regex};
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use std::sync::LazyLock;

static NAME_PATTERNS: LazyLock<[Regex; 5]> = LazyLock::new(|| {
    [
        // "Series (1999) #3 (of 12) (2001)"
        Regex::new(
            r"^(?P<seriesName>.+?)(?:\s\((?P<seriesYear>\d{4})\))?\s#(?P<index>\d+)(?:\s\(of\s(?P<count>\d+)\))?(?:\s\((?P<year>\d{4})\))?$",
        )
        .unwrap(),
        // "Name (Series, #3) (2001)"
        Regex::new(
            r"^(?P<name>.+?)\s\((?P<seriesName>.+?),\s#(?P<index>\d+)\)(?:\s\((?P<year>\d{4})\))?$",
        )
        .unwrap(),
        // "3 - Name (2001)"
        Regex::new(r"^(?P<index>\d+)\s-\s(?P<name>.+?)(?:\s\((?P<year>\d{4})\))?$").unwrap(),
        // "Name (2001)"
        Regex::new(r"^(?P<name>.*?)\s*\((?P<year>\d{4})\)$").unwrap(),
        Regex::new(r"^(?P<name>.*)$").unwrap(),
    ]
});

/// Structured decomposition of a raw title.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParsedName {
    /// Empty when the matching pattern has no name group.
    pub name: String,
    pub series_name: Option<String>,
    pub index: Option<u32>,
    pub year: Option<i32>,
    pub series_year: Option<i32>,
    /// Total volumes, from "(of N)".
    pub count: Option<u32>,
}

/// Parse a raw title. Never fails: the last pattern matches everything.
pub fn parse_name(raw: &str) -> ParsedName {
    let input = collapse_whitespace(raw);
    for pattern in NAME_PATTERNS.iter() {
        if let Some(caps) = pattern.captures(&input) {
            return from_captures(&caps);
        }
    }
    ParsedName {
        name: input,
        ..Default::default()
    }
}

fn from_captures(caps: &Captures<'_>) -> ParsedName {
    ParsedName {
        name: capture_text(caps, "name").unwrap_or_default(),
        series_name: capture_text(caps, "seriesName").filter(|s| !s.is_empty()),
        index: capture_number(caps, "index"),
        year: capture_number(caps, "year"),
        series_year: capture_number(caps, "seriesYear"),
        count: capture_number(caps, "count"),
    }
}

fn capture_text(caps: &Captures<'_>, group: &str) -> Option<String> {
    caps.name(group).map(|m| m.as_str().trim().to_string())
}

// A group that did not participate, or does not fit the type, is None.
fn capture_number<T: FromStr>(caps: &Captures<'_>, group: &str) -> Option<T> {
    caps.name(group).and_then(|m| m.as_str().parse().ok())
}

fn collapse_whitespace(s: &str) -> String {
    s.split_whitespace().collect::<Vec<_>>().join(" ")
}
