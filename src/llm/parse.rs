use regex::Regex;
use std::sync::LazyLock;

/// Most hints taken from one reply.
pub const MAX_HINTS: usize = 10;

/// "<digits>. <content>" with optional leading indentation.
static NUMBERED_LINE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\s*\d+\.\s+(.+)$").expect("numbered-line pattern is valid")
});

const SEPARATORS: [char; 4] = ['–', '—', ':', '-'];

/// Stripped from both ends of a candidate title.
const STRAY: [char; 6] = ['"', '\'', '*', '-', '–', '—'];

/// Extract ranked titles from a numbered list in free text.
///
/// For each "1. Title – reason" line the text before the first separator is
/// kept, with quotes, asterisks and dashes trimmed off. Other lines are
/// ignored. An empty result means the reply had no usable list.
pub fn parse_ranked_titles(text: &str) -> Vec<String> {
    text.lines()
        .filter_map(|line| NUMBERED_LINE.captures(line))
        .filter_map(|caps| {
            let content = caps.get(1)?.as_str();
            let title = content
                .split(SEPARATORS)
                .next()
                .unwrap_or_default()
                .trim()
                .trim_matches(STRAY)
                .trim();
            (!title.is_empty()).then(|| title.to_string())
        })
        .take(MAX_HINTS)
        .collect()
}
