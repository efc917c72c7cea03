//! PHPDoc tag extraction.
//!
//! This submodule locates the `/** ... */` comment that belongs to an AST
//! node by scanning the file's trivia backwards from it, and pulls the
//! `@return` type alternatives out of it.
//!
//! The `@return` grammar is narrow: the tag is only recognised
//! when written as `" * @return"` (the conventional per-line continuation
//! prefix), and only the first word after it is read as the type
//! expression.  Anything else on the line is description text.

use mago_span::HasSpan;
use mago_syntax::ast::*;

/// The literal marker that introduces a return type declaration.
pub const RETURN_TAG_MARKER: &str = " * @return";

// ─── Public API ─────────────────────────────────────────────────────────────

/// Extract the ordered return type alternatives from a docblock.
///
/// Handles the format:
///   - ` * @return Type1|Type2|Type3 Optional free-text description`
///
/// Steps: find the first `" * @return"`, take the rest of that line, trim
/// it, keep its first whitespace-delimited word, split on `|` and trim each
/// piece.
///
/// Returns an empty list when the marker is absent.  A marker with nothing
/// after it on its line yields a single empty token.
pub fn parse_return_types(docblock: &str) -> Vec<String> {
    let Some(pos) = docblock.find(RETURN_TAG_MARKER) else {
        return Vec::new();
    };

    let rest = &docblock[pos + RETURN_TAG_MARKER.len()..];
    let line = rest.lines().next().unwrap_or("");
    let type_expr = line.split_whitespace().next().unwrap_or("");

    type_expr
        .split('|')
        .map(|token| token.trim().to_string())
        .collect()
}

/// Look up the docblock comment (if any) for an AST node.
///
/// Walks backwards through the trivia preceding `node`, skipping whitespace
/// and ordinary comments.  Returns the first `/** ... */` found, or `None`
/// as soon as real code sits between a comment and the node.
pub fn get_docblock_text_for_node<'a>(
    trivia: &'a [Trivia<'a>],
    content: &str,
    node: &impl HasSpan,
) -> Option<&'a str> {
    let node_start = node.span().start.offset;
    let candidate_idx = trivia.partition_point(|t| t.span.start.offset < node_start);
    if candidate_idx == 0 {
        return None;
    }

    let content_bytes = content.as_bytes();
    let mut covered_from = node_start;

    for t in trivia[..candidate_idx].iter().rev() {
        let gap = content_bytes
            .get(t.span.end.offset as usize..covered_from as usize)
            .unwrap_or(&[]);
        if !gap.iter().all(u8::is_ascii_whitespace) {
            return None;
        }

        match t.kind {
            TriviaKind::DocBlockComment => return Some(t.value),
            TriviaKind::WhiteSpace
            | TriviaKind::SingleLineComment
            | TriviaKind::MultiLineComment
            | TriviaKind::HashComment => {
                covered_from = t.span.start.offset;
            }
        }
    }

    None
}
