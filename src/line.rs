//! Line classification for outline documents.
//!
//! Every physical line is tried against a fixed, ordered list of structural rules (bulleted item,
//! numbered item, heading) and the first rule that matches produces a [`LineRecord`]. Filename
//! mentions and inline node references are searched for separately, so a single line can be both
//! a list item and an export request.

use regex::Regex;
use std::sync::LazyLock;

static CHOICE_ITEM: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(\s*)[*+-] (.*)$").expect("valid bullet item regex"));

static SEQUENTIAL_ITEM: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(\s*)\d+\. (.*)$").expect("valid numbered item regex"));

static HEADING: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(#+)\s+(.+?)(?:\s+#+)?\s*$").expect("valid heading regex"));

static FILENAME_MENTION: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\bgraph_(?P<query>.+?)\.(?P<filetype>.+?)\b").expect("valid filename regex")
});

static NODE_REFERENCE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\|([^|]+)\|").expect("valid node reference regex"));

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
/// Structural category of a classified line.
pub enum LineKind {
    /// Bulleted item (`*`, `+` or `-`): alternatives hanging off a shallower item.
    ChoiceItem,
    /// Numbered item (`1.`): a step that follows the previous step at the same depth.
    SequentialItem,
    /// ATX heading (`#`): opens a new cluster.
    Heading,
}

impl LineKind {
    #[must_use]
    /// Whether lines of this kind define graph nodes.
    pub fn defines_node(self) -> bool {
        matches!(self, Self::ChoiceItem | Self::SequentialItem)
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
/// Immutable result of classifying one line.
pub struct LineRecord {
    /// Which rule matched.
    pub kind: LineKind,
    /// Label text with surrounding whitespace and markup removed.
    pub label: String,
    /// Leading whitespace width for items, number of `#` for headings.
    pub depth: usize,
    /// 1-based position in the document, unique per record within a document.
    pub line: usize,
}

#[derive(Clone, Debug, PartialEq, Eq)]
/// Request to export the cluster whose title contains `query`, found as `graph_<query>.<filetype>`.
pub struct FilenameMention {
    /// The whole matched text, used as the output file name.
    pub filename: String,
    /// Substring searched for in heading titles.
    pub query: String,
    /// Output format passed to the renderer.
    pub filetype: String,
    /// 1-based line the mention was found on.
    pub line: usize,
}

#[must_use]
/// Apply the structural rules in priority order, returning the first match.
///
/// Items and headings whose text is empty after trimming do not match.
pub fn classify(text: &str, line: usize) -> Option<LineRecord> {
    let rules: [(LineKind, &Regex); 3] = [
        (LineKind::ChoiceItem, &CHOICE_ITEM),
        (LineKind::SequentialItem, &SEQUENTIAL_ITEM),
        (LineKind::Heading, &HEADING),
    ];

    rules.iter().find_map(|(kind, regex)| {
        let caps = regex.captures(text)?;
        let label = caps[2].trim();
        if label.is_empty() {
            return None;
        }
        let depth = caps[1].chars().count();
        Some(LineRecord {
            kind: *kind,
            label: label.to_string(),
            depth,
            line,
        })
    })
}

#[must_use]
/// Find every `graph_<query>.<filetype>` mention anywhere in the line.
pub fn filename_mentions(text: &str, line: usize) -> Vec<FilenameMention> {
    FILENAME_MENTION
        .captures_iter(text)
        .map(|caps| FilenameMention {
            filename: caps[0].to_string(),
            query: caps["query"].to_string(),
            filetype: caps["filetype"].to_string(),
            line,
        })
        .collect()
}

#[must_use]
/// Labels of inline `|Label|` node references, trimmed and in order of appearance.
pub fn node_references(text: &str) -> Vec<String> {
    NODE_REFERENCE
        .captures_iter(text)
        .map(|caps| caps[1].trim().to_string())
        .filter(|label| !label.is_empty())
        .collect()
}

#[cfg(test)]
#[path = "tests/line.rs"]
mod tests;
