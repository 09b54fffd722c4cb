//! Indentation-tree front end.
//!
//! Descriptions are structured by leading whitespace alone. This module
//! turns raw text into a tree of [`Node`]s before any keyword is
//! interpreted: tabs expand to eight spaces, `#` starts a comment, and
//! blank lines vanish. A line deeper than the previous one opens a
//! child block; a shallower line must return to the exact depth of an
//! open ancestor, and siblings must share their block's depth.

use ludi_core::ParseError;

/// Number of spaces a tab character expands to.
const TAB_WIDTH: usize = 8;

/// One content line and its nested children.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Node {
    /// The line's text with indentation and comments stripped.
    pub content: String,
    /// 1-based source line, for error reporting.
    pub line: usize,
    /// Nested lines, in source order.
    pub children: Vec<Node>,
}

/// A line reduced to its depth and content.
struct Line {
    depth: usize,
    content: String,
    number: usize,
}

/// Parse a document into its top-level nodes.
///
/// # Errors
///
/// Returns [`ParseError::BadIndentation`] when a line's depth matches
/// no open block, and [`ParseError::EmptyDocument`] when nothing
/// remains after stripping comments and blank lines.
pub fn parse_tree(text: &str) -> Result<Vec<Node>, ParseError> {
    let lines = scan(text);
    if lines.is_empty() {
        return Err(ParseError::EmptyDocument);
    }
    let mut pos = 0;
    let roots = build_block(&lines, &mut pos, &[])?;
    debug_assert_eq!(pos, lines.len());
    Ok(roots)
}

/// Strip comments, drop blank lines, and measure indentation.
fn scan(text: &str) -> Vec<Line> {
    let mut out = Vec::new();
    for (idx, raw) in text.lines().enumerate() {
        let expanded = if raw.contains('\t') {
            raw.replace('\t', &" ".repeat(TAB_WIDTH))
        } else {
            raw.to_string()
        };
        let uncommented = match expanded.find('#') {
            Some(pos) => &expanded[..pos],
            None => &expanded,
        };
        let trimmed = uncommented.trim_end();
        if trimmed.trim_start().is_empty() {
            continue;
        }
        let depth = trimmed.len() - trimmed.trim_start().len();
        out.push(Line {
            depth,
            content: trimmed.trim_start().to_string(),
            number: idx + 1,
        });
    }
    out
}

/// Consume one block of sibling nodes starting at `lines[*pos]`.
///
/// `ancestors` holds the depths of every enclosing block; a dedent must
/// land on one of them exactly.
fn build_block(
    lines: &[Line],
    pos: &mut usize,
    ancestors: &[usize],
) -> Result<Vec<Node>, ParseError> {
    let block_depth = lines[*pos].depth;
    let mut nodes: Vec<Node> = Vec::new();

    while *pos < lines.len() {
        let line = &lines[*pos];
        if line.depth < block_depth {
            if ancestors.contains(&line.depth) {
                break;
            }
            return Err(ParseError::BadIndentation { line: line.number });
        }
        if line.depth > block_depth {
            // Deeper lines open a child block under the previous node.
            let mut inner = ancestors.to_vec();
            inner.push(block_depth);
            let children = build_block(lines, pos, &inner)?;
            match nodes.last_mut() {
                Some(parent) => parent.children = children,
                None => return Err(ParseError::BadIndentation { line: line.number }),
            }
            continue;
        }
        nodes.push(Node {
            content: line.content.clone(),
            line: line.number,
            children: Vec::new(),
        });
        *pos += 1;
    }
    Ok(nodes)
}
