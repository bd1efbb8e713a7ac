//! Country helpers.

/// Shown when no flag can be derived.
pub const GLOBE: &str = "🌍";

const REGIONAL_INDICATOR_OFFSET: u32 = 0x1F1E6 - 'A' as u32;

/// Regional-indicator flag for an ISO 3166-1 alpha-2 code.
///
/// Missing, `N/A`, wrong-length or non-alphabetic codes yield [`GLOBE`].
pub fn flag_emoji(iso2: &str) -> String {
    let code = iso2.trim();
    if code.len() != 2 || !code.chars().all(|c| c.is_ascii_alphabetic()) {
        return GLOBE.to_owned();
    }
    code.chars()
        .filter_map(|c| char::from_u32(c.to_ascii_uppercase() as u32 + REGIONAL_INDICATOR_OFFSET))
        .collect()
}
