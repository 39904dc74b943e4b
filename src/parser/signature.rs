//! Family signature line detection
//!
//! A signature line names a family: a line of capitalized words, brackets and
//! commas standing at the head of a paragraph. It is recognised by looking
//! back from every blank line, and from the end of input when no blank line
//! produced a match. Every `Name` on a recognised line becomes a `Surname`.
//!
//! Each check reads only the tokens between the previous blank line and its
//! own, and no lexer pass reaches back across a blank line, so the checks are
//! independent of each other and of the order they run in. They are computed
//! read-only (on the rayon pool when [`LexOptions`] allows it) and applied
//! after all of them have joined.

use std::ops::Range;

use rayon::prelude::*;
use tracing::trace;

use super::lexer::run_before;
use super::options::LexOptions;
use super::token::Token;
use super::token_kind::{TokenKind, TokenKinds};

/// Tokens allowed between a signature line and the boundary that closes it
const TRAILING: TokenKinds = TokenKinds::COMMENT
    .union(TokenKinds::INVALID)
    .union(TokenKinds::NEW_LINE);

/// Tokens a signature line is made of
const SIGNATURE: TokenKinds = TokenKinds::NAME
    .union(TokenKinds::SURNAME)
    .union(TokenKinds::BRACKET)
    .union(TokenKinds::PUNCTUATION)
    .union(TokenKinds::COMMENT)
    .union(TokenKinds::INVALID);

/// Where a check is anchored
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Boundary {
    BlankLine,
    EndOfInput,
}

/// Run every check and promote the names on the lines they find.
///
/// `boundaries` holds the indices of the blank-line tokens in `tokens`.
pub(crate) fn mark_signature_lines(
    tokens: &mut [Token],
    boundaries: &[usize],
    options: &LexOptions,
) {
    let view: &[Token] = tokens;
    let check = |&boundary: &usize| signature_line(&view[..boundary], Boundary::BlankLine);

    let found: Vec<Range<usize>> = if options.runs_parallel(boundaries.len()) {
        boundaries.par_iter().filter_map(check).collect()
    } else {
        boundaries.iter().filter_map(check).collect()
    };

    if found.is_empty() {
        if let Some(line) = signature_line(tokens, Boundary::EndOfInput) {
            promote(tokens, line);
        }
        return;
    }

    for line in found {
        promote(tokens, line);
    }
}

/// Look for a signature line at the end of `prefix`.
pub(crate) fn signature_line(prefix: &[Token], boundary: Boundary) -> Option<Range<usize>> {
    let (trailing, stop) = run_before(prefix, prefix.len(), TRAILING);

    // No second consecutive blank paragraph
    if stop.is_some_and(|index| prefix[index].kind == TokenKind::BlankLines) {
        return None;
    }

    let head_end = stop.map_or(0, |index| index + 1);
    let (mut line, mut stop) = run_before(prefix, head_end, SIGNATURE);
    let mut extended = false;

    if let Some(newline) = stop.filter(|&index| prefix[index].kind == TokenKind::NewLine) {
        (line, stop) = run_before(prefix, newline, SIGNATURE);
        extended = true;
    }

    if stop.is_some_and(|index| prefix[index].kind != TokenKind::BlankLines) {
        return None;
    }

    // A lone terminated last line is a relation, not a header
    if boundary == Boundary::EndOfInput
        && !extended
        && prefix[trailing].iter().any(|t| t.kind == TokenKind::NewLine)
    {
        return None;
    }

    let candidate = &prefix[line.clone()];

    if candidate
        .iter()
        .any(|t| t.kind == TokenKind::Punctuation && t.sub_kind != Some(TokenKind::Comma))
    {
        return None;
    }

    if !candidate.iter().any(|t| t.kind == TokenKind::Name) {
        return None;
    }

    Some(line)
}

fn promote(tokens: &mut [Token], line: Range<usize>) {
    for token in &mut tokens[line] {
        if token.kind == TokenKind::Name {
            trace!(text = %token.text, line = token.line, "signature name promoted to surname");
            token.kind = TokenKind::Surname;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::lexer::tokenize_with;

    fn surnames(src: &str, options: &LexOptions) -> Vec<String> {
        tokenize_with(src, options)
            .iter()
            .filter(|t| t.kind == TokenKind::Surname)
            .map(|t| t.text().to_string())
            .collect()
    }

    #[test]
    fn test_header_before_blank_line() {
        let src = "Smith (Smithy)\n\n1. Ann\n";
        assert_eq!(surnames(src, &LexOptions::sequential()), vec!["Smith", "Smithy"]);
    }

    #[test]
    fn test_header_followed_by_comment_lines() {
        let src = "Smith\n* the Smith family\n\nAnn + Bob\n";
        assert_eq!(surnames(src, &LexOptions::sequential()), vec!["Smith"]);
    }

    #[test]
    fn test_header_above_single_relation_line() {
        let src = "Smith\nAnn + Bob\n\nJones\nCid + Dee\n";
        assert_eq!(surnames(src, &LexOptions::sequential()), vec!["Smith"]);
    }

    #[test]
    fn test_end_of_input_fallback() {
        assert_eq!(surnames("Smith\nAnn + Bob\n", &LexOptions::sequential()), vec!["Smith"]);
        assert_eq!(surnames("Smith (Sm)", &LexOptions::sequential()), vec!["Smith", "Sm"]);
        // Plain name run on the last line keeps its lexer-assigned surname only
        assert_eq!(surnames("Ann Bob\n", &LexOptions::sequential()), vec!["Bob"]);
    }

    #[test]
    fn test_rejects_non_comma_punctuation() {
        let src = "Ann + Bob\n\nCid\n";
        assert!(surnames(src, &LexOptions::sequential()).is_empty());
    }

    #[test]
    fn test_second_blank_paragraph_is_ignored() {
        let tokens = tokenize_with("Ann\n\n* note\n\nBob", &LexOptions::sequential());
        let boundary = tokens
            .iter()
            .rposition(|t| t.kind == TokenKind::BlankLines)
            .unwrap_or_default();
        assert_eq!(signature_line(&tokens[..boundary], Boundary::BlankLine), None);
    }

    #[test]
    fn test_parallel_matches_sequential() {
        let src = (0..20)
            .map(|i| format!("Family{i} (Alias{i})\n* note\n\n1. Ann + Bob = Cid\n\n"))
            .collect::<String>();
        let parallel = LexOptions {
            parallel_signatures: true,
            parallel_threshold: 1,
        };

        assert_eq!(
            tokenize_with(&src, &parallel),
            tokenize_with(&src, &LexOptions::sequential())
        );
    }
}
