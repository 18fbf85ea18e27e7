//! Markdown Line Renderer — classifies generated text line-by-line into display nodes.
//!
//! This is a deliberately small subset: headings (levels 1–3), list items,
//! blank lines and plain paragraphs. Lists are not grouped and inline spans
//! (bold, links, code) pass through untouched.

use serde::{Deserialize, Serialize};

pub mod handlers;

/// A single display node. Exactly one node is produced per input line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum MarkdownNode {
    Heading { level: u8, text: String },
    ListItem { text: String },
    LineBreak,
    Paragraph { text: String },
}

/// Heading markers in match precedence order.
const HEADING_MARKERS: [(&str, u8); 3] = [("# ", 1), ("## ", 2), ("### ", 3)];

const LIST_MARKERS: [&str; 2] = ["- ", "* "];

/// Lazily classifies each line of `text`, preserving input order.
pub fn nodes(text: &str) -> impl Iterator<Item = MarkdownNode> + '_ {
    text.split('\n').map(classify_line)
}

/// Eagerly renders `text` into its node sequence.
pub fn render(text: &str) -> Vec<MarkdownNode> {
    nodes(text).collect()
}

/// Classifies one line (without its trailing newline).
pub fn classify_line(line: &str) -> MarkdownNode {
    for (marker, level) in HEADING_MARKERS {
        if let Some(rest) = line.strip_prefix(marker) {
            return MarkdownNode::Heading {
                level,
                text: rest.to_string(),
            };
        }
    }

    if let Some(rest) = LIST_MARKERS.iter().find_map(|m| line.strip_prefix(m)) {
        return MarkdownNode::ListItem {
            text: rest.to_string(),
        };
    }

    if line.trim().is_empty() {
        return MarkdownNode::LineBreak;
    }

    MarkdownNode::Paragraph {
        text: line.to_string(),
    }
}
