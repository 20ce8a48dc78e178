use crate::WindowEntry;

/// Best match of a query inside one label.
///
/// Ordered so that a smaller value is a better match: shortest span first,
/// then earliest start.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub(crate) struct MatchScore {
    /// Length of the label slice containing the query as a subsequence.
    pub(crate) span: usize,
    /// Position where that slice starts.
    pub(crate) start: usize,
}

/// Filters `entries` to those whose label contains `query` as a
/// case-insensitive subsequence, best match first.
///
/// An empty query returns every entry in its original order. Equal scores
/// keep snapshot order, so identical inputs always produce identical output.
pub fn fuzzy_filter(query: &str, entries: &[WindowEntry]) -> Vec<WindowEntry> {
    if query.is_empty() {
        return entries.to_vec();
    }

    let needle = fold_case(query);

    let mut ranked: Vec<(MatchScore, &WindowEntry)> = entries
        .iter()
        .filter_map(|entry| {
            best_match(&needle, &fold_case(&entry.display_label)).map(|score| (score, entry))
        })
        .collect();

    // Stable: ties stay in snapshot order.
    ranked.sort_by_key(|(score, _)| *score);

    ranked.into_iter().map(|(_, entry)| entry.clone()).collect()
}

fn fold_case(text: &str) -> Vec<char> {
    text.chars().flat_map(char::to_lowercase).collect()
}

/// Most compact occurrence of `needle` as a subsequence of `haystack`.
///
/// From each candidate start the remaining characters are taken at their
/// earliest occurrence, which gives the shortest span for that start.
pub(crate) fn best_match(needle: &[char], haystack: &[char]) -> Option<MatchScore> {
    let (&first, rest) = needle.split_first()?;

    let mut best: Option<MatchScore> = None;

    for (start, _) in haystack.iter().enumerate().filter(|(_, c)| **c == first) {
        let Some(end) = match_end(rest, &haystack[start + 1..]).map(|offset| start + offset)
        else {
            // No later start can complete either.
            break;
        };

        let score = MatchScore {
            span: end - start + 1,
            start,
        };

        if best.is_none_or(|current| score < current) {
            best = Some(score);
        }
    }

    best
}

/// Offset (relative to the character before `haystack`) of the last matched
/// character when `needle` is matched greedily.
fn match_end(needle: &[char], haystack: &[char]) -> Option<usize> {
    let mut offset = 0;
    let mut remaining = haystack.iter().enumerate();

    for wanted in needle {
        let (index, _) = remaining.by_ref().find(|(_, c)| *c == wanted)?;
        offset = index + 1;
    }

    Some(offset)
}
