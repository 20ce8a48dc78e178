use capture_deck_core::WindowEntry;

/// Overlay title: the query, the match count and the highlighted entry.
///
/// With no highlight the first row is named, since Enter would pick it.
pub(crate) fn overlay_title(
    query: &str,
    results: &[WindowEntry],
    highlighted: Option<usize>,
) -> String {
    let query = if query.is_empty() { "type to search" } else { query };
    let matches = match results.len() {
        1 => "1 match".to_string(),
        n => format!("{} matches", n),
    };

    let target = results
        .get(highlighted.unwrap_or(0))
        .map(|entry| entry.display_label.as_str());

    match target {
        Some(label) => format!("Find window: {} ({}) > {}", query, matches, label),
        None => format!("Find window: {} ({})", query, matches),
    }
}
