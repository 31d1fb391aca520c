//! Token-budgeted recursive text splitting
//!
//! Splits long text into chunks that fit a token budget, preferring the
//! highest-priority separator that yields in-budget pieces and falling
//! back down the priority list only where needed. Adjacent chunks share
//! an overlap region so content near a boundary is never seen in
//! isolation.

/// Separator priority: paragraph breaks, line breaks, then punctuation
/// and spaces. Punctuation without a following space is kept late in the
/// list since it may itself be a censorship artifact.
pub const SEPARATOR_PRIORITY: &[&str] = &["\n\n", "\n", ",", " ", "!", ".", "?", "'"];

/// Split into sentence-sized groups: boundaries are whitespace runs that
/// follow a sentence terminator. Terminators stay with their sentence.
pub fn split_sentence_groups(text: &str) -> Vec<String> {
    let mut groups = Vec::new();
    let mut current = String::new();
    let mut chars = text.chars().peekable();

    while let Some(c) = chars.next() {
        current.push(c);
        if matches!(c, '.' | '!' | '?') && chars.peek().is_some_and(|n| n.is_whitespace()) {
            while chars.peek().is_some_and(|n| n.is_whitespace()) {
                chars.next();
            }
            groups.push(std::mem::take(&mut current));
        }
    }
    if !current.is_empty() {
        groups.push(current);
    }
    groups
}

/// Split `text` into chunks whose measure stays within `budget`,
/// descending through `separators` only where a piece is still too
/// large. `measure` is the token counter of the downstream consumer.
///
/// Whitespace-only input yields no chunks. A piece that no separator can
/// break is passed through oversized rather than dropped.
pub fn split_with_budget<F>(
    text: &str,
    budget: usize,
    overlap: usize,
    separators: &[&str],
    measure: &F,
) -> Vec<String>
where
    F: Fn(&str) -> usize,
{
    split_recursive(text, budget, overlap, separators, measure)
        .into_iter()
        .map(|chunk| chunk.trim().to_string())
        .filter(|chunk| !chunk.is_empty())
        .collect()
}

fn split_recursive<F>(
    text: &str,
    budget: usize,
    overlap: usize,
    separators: &[&str],
    measure: &F,
) -> Vec<String>
where
    F: Fn(&str) -> usize,
{
    if text.trim().is_empty() {
        return Vec::new();
    }
    if measure(text) <= budget {
        return vec![text.to_string()];
    }

    let Some(position) = separators.iter().position(|sep| text.contains(sep)) else {
        // nothing left to split on
        return vec![text.to_string()];
    };
    let separator = separators[position];
    let remaining = &separators[position + 1..];

    let mut chunks = Vec::new();
    let mut pending: Vec<String> = Vec::new();

    for piece in split_keeping_separator(text, separator) {
        if measure(&piece) <= budget {
            pending.push(piece);
            continue;
        }
        if !pending.is_empty() {
            chunks.extend(merge_pieces(&pending, budget, overlap, measure));
            pending.clear();
        }
        if remaining.is_empty() {
            chunks.push(piece);
        } else {
            chunks.extend(split_recursive(&piece, budget, overlap, remaining, measure));
        }
    }
    if !pending.is_empty() {
        chunks.extend(merge_pieces(&pending, budget, overlap, measure));
    }
    chunks
}

/// Split on a separator, keeping each separator attached to the piece it
/// terminates, so concatenating the pieces reproduces the input.
fn split_keeping_separator(text: &str, separator: &str) -> Vec<String> {
    let mut pieces = Vec::new();
    let mut start = 0;
    while let Some(found) = text[start..].find(separator) {
        let end = start + found + separator.len();
        pieces.push(text[start..end].to_string());
        start = end;
    }
    if start < text.len() {
        pieces.push(text[start..].to_string());
    }
    pieces
}

/// Greedily pack in-budget pieces into chunks, carrying roughly `overlap`
/// tokens of trailing context into each following chunk.
fn merge_pieces<F>(pieces: &[String], budget: usize, overlap: usize, measure: &F) -> Vec<String>
where
    F: Fn(&str) -> usize,
{
    let mut chunks = Vec::new();
    let mut window: std::collections::VecDeque<&String> = std::collections::VecDeque::new();
    let mut total = 0usize;

    for piece in pieces {
        let len = measure(piece);
        if total + len > budget && !window.is_empty() {
            chunks.push(window.iter().map(|piece| piece.as_str()).collect::<String>());
            while total > overlap || (total + len > budget && total > 0) {
                let Some(front) = window.pop_front() else {
                    break;
                };
                total -= measure(front).min(total);
            }
        }
        window.push_back(piece);
        total += len;
    }
    if !window.is_empty() {
        chunks.push(window.iter().map(|piece| piece.as_str()).collect::<String>());
    }
    chunks
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Whitespace word count, the simplest token measure.
    fn words(text: &str) -> usize {
        text.split_whitespace().count()
    }

    #[test]
    fn test_sentence_groups() {
        let groups = split_sentence_groups("One two. Three four! Five?");
        assert_eq!(groups, vec!["One two.", "Three four!", "Five?"]);
    }

    #[test]
    fn test_sentence_groups_keep_unterminated_tail() {
        let groups = split_sentence_groups("Done. and then some");
        assert_eq!(groups, vec!["Done.", "and then some"]);
    }

    #[test]
    fn test_under_budget_text_is_one_chunk() {
        let chunks = split_with_budget("short text", 10, 2, SEPARATOR_PRIORITY, &words);
        assert_eq!(chunks, vec!["short text"]);
    }

    #[test]
    fn test_empty_text_yields_no_chunks() {
        assert!(split_with_budget("", 10, 2, SEPARATOR_PRIORITY, &words).is_empty());
        assert!(split_with_budget("   \n ", 10, 2, SEPARATOR_PRIORITY, &words).is_empty());
    }

    #[test]
    fn test_chunks_respect_budget() {
        let text = "alpha beta gamma delta epsilon zeta eta theta iota kappa";
        let chunks = split_with_budget(text, 3, 1, SEPARATOR_PRIORITY, &words);
        assert!(chunks.len() > 1);
        for chunk in &chunks {
            assert!(words(chunk) <= 3, "chunk over budget: {chunk:?}");
        }
    }

    #[test]
    fn test_adjacent_chunks_overlap() {
        let text = "alpha beta gamma delta epsilon zeta";
        let chunks = split_with_budget(text, 2, 1, SEPARATOR_PRIORITY, &words);
        for pair in chunks.windows(2) {
            let last_word = pair[0].split_whitespace().last().unwrap();
            let first_word = pair[1].split_whitespace().next().unwrap();
            assert_eq!(last_word, first_word);
        }
    }

    #[test]
    fn test_paragraph_breaks_take_priority() {
        let text = "first paragraph here\n\nsecond paragraph here";
        let chunks = split_with_budget(text, 3, 0, SEPARATOR_PRIORITY, &words);
        assert_eq!(chunks, vec!["first paragraph here", "second paragraph here"]);
    }

    #[test]
    fn test_unsplittable_piece_passes_through_oversized() {
        let chunks = split_with_budget("abcdefghij", 1, 0, &[" "], &|t: &str| t.len());
        assert_eq!(chunks, vec!["abcdefghij"]);
    }
}
