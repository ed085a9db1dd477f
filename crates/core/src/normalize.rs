//! Title normalization for candidate comparison.
//!
//! Normalized names are only ever compared for equality, never displayed.

use unicode_normalization::UnicodeNormalization;

/// Trailing roman numerals and their arabic replacements.
const END_NUMERALS: &[(&str, &str)] = &[
    (" i", " 1"),
    (" ii", " 2"),
    (" iii", " 3"),
    (" iv", " 4"),
    (" v", " 5"),
    (" vi", " 6"),
    (" vii", " 7"),
    (" viii", " 8"),
    (" ix", " 9"),
    (" x", " 10"),
];

/// Removed outright.
const STRIP_CHARS: &[char] = &['"', '\'', '!', '`', '?'];

/// Replaced by a single space.
const SPACER_CHARS: &[char] = &[
    '/', ',', '.', ':', ';', '\\', '(', ')', '{', '}', '[', ']', '+', '-', '_', '=', '\u{2013}',
    '*',
];

/// Spacing modifier letters and combining diacritics.
const MODIFIER_RANGE: std::ops::RangeInclusive<char> = '\u{02B0}'..='\u{0333}';

/// Fold a title into its comparable form.
pub fn comparable_name(name: &str) -> String {
    let mut name: String = name.to_lowercase().nfc().collect();
    replace_end_numeral(&mut name);

    let mut folded = String::with_capacity(name.len());
    for c in name.chars() {
        if MODIFIER_RANGE.contains(&c) || STRIP_CHARS.contains(&c) {
            continue;
        }
        if SPACER_CHARS.contains(&c) {
            folded.push(' ');
        } else if c == '&' {
            folded.push_str(" and ");
        } else {
            folded.push(c);
        }
    }

    // Already lower-cased, so a plain replace is case-insensitive here.
    let folded = folded.replace("the", " ").replace(" - ", ": ");

    // Dropping characters can expose a numeral suffix or a composable pair,
    // so both steps run again on the collapsed form.
    let mut name: String = folded.split_whitespace().collect::<Vec<_>>().join(" ").nfc().collect();
    replace_end_numeral(&mut name);
    name
}

fn replace_end_numeral(name: &mut String) {
    if let Some((suffix, arabic)) = END_NUMERALS.iter().find(|(s, _)| name.ends_with(s)) {
        name.truncate(name.len() - suffix.len());
        name.push_str(arabic);
    }
}
