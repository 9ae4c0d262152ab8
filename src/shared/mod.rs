pub mod geo;

pub use geo::*;

/// Folds free text into the form stop names are indexed under:
/// surrounding whitespace and double quotes removed, lower-cased.
pub fn normalize_name(text: &str) -> String {
    text.trim().replace('"', "").to_lowercase()
}

#[test]
fn normalize_name_strips_quotes_and_case() {
    assert_eq!(normalize_name(" \"Downtown Transit Centre\"\n"), "downtown transit centre");
}

#[test]
fn normalize_name_keeps_inner_spacing() {
    assert_eq!(normalize_name("West  Edmonton Mall"), "west  edmonton mall");
}
