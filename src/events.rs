//! Event catalogue: codes, display names and dashboard ordering.

use std::cmp::Ordering;

/// Known event codes with display names, in dashboard order: fewest moves
/// before blindfolded, clock after Square-1. Retired events come last.
pub const EVENTS: &[(&str, &str)] = &[
    ("333", "3x3x3"),
    ("222", "2x2x2"),
    ("444", "4x4x4"),
    ("555", "5x5x5"),
    ("666", "6x6x6"),
    ("777", "7x7x7"),
    ("333fm", "3x3x3 Fewest Moves"),
    ("333bf", "3x3x3 Blindfolded"),
    ("333oh", "3x3x3 One-Handed"),
    ("minx", "Megaminx"),
    ("pyram", "Pyraminx"),
    ("skewb", "Skewb"),
    ("sq1", "Square-1"),
    ("clock", "Clock"),
    ("444bf", "4x4x4 Blindfolded"),
    ("555bf", "5x5x5 Blindfolded"),
    ("333mbf", "3x3x3 Multi-Blind"),
    ("333ft", "3x3x3 With Feet"),
    ("magic", "Magic"),
    ("mmagic", "Master Magic"),
];

/// Fewest moves.
pub const FEWEST_MOVES: &str = "333fm";
/// Multi-blind.
pub const MULTI_BLIND: &str = "333mbf";

/// Display name for `code`, or the code itself when unknown.
pub fn event_name(code: &str) -> &str {
    EVENTS
        .iter()
        .find(|(c, _)| *c == code)
        .map_or(code, |(_, name)| *name)
}

/// Position of `code` in the catalogue.
pub fn event_rank(code: &str) -> Option<usize> {
    EVENTS.iter().position(|(c, _)| *c == code)
}

/// Whether `code` is in the catalogue.
pub fn is_known(code: &str) -> bool {
    event_rank(code).is_some()
}

/// Catalogue order; unknown events after all known ones, alphabetically.
pub fn compare_events(a: &str, b: &str) -> Ordering {
    match (event_rank(a), event_rank(b)) {
        (Some(x), Some(y)) => x.cmp(&y),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => a.cmp(b),
    }
}

/// Sort event codes into catalogue order in place.
pub fn sort_events<S: AsRef<str>>(codes: &mut [S]) {
    codes.sort_by(|a, b| compare_events(a.as_ref(), b.as_ref()));
}
