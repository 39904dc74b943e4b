//! Cursor over the finalized token array
//!
//! The parser productions share one [`Cursor`]. Each production walks forward
//! from the current token and stops on the token that ends it; the caller
//! steps back one so its own walk re-examines that token.

use std::ops::ControlFlow;

use tracing::trace;

use super::token::{Token, TokenError, TokenId};
use super::token_kind::{TokenKind, TokenKinds};
use crate::base::Position;

/// Direction of a nearest-significant-token lookup
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Forward,
    Backward,
}

/// Stateful navigation over a token buffer.
///
/// The index never exceeds the token count; `index == len` means the end of
/// input has been reached.
pub struct Cursor<'a> {
    tokens: &'a mut [Token],
    index: usize,
}

impl<'a> Cursor<'a> {
    pub fn new(tokens: &'a mut [Token]) -> Self {
        Self { tokens, index: 0 }
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    pub fn is_end(&self) -> bool {
        self.index >= self.tokens.len()
    }

    pub fn current(&self) -> Option<&Token> {
        self.tokens.get(self.index)
    }

    pub fn token(&self, id: TokenId) -> &Token {
        &self.tokens[id.index()]
    }

    /// Record a structural problem on a token.
    pub fn flag(&mut self, id: TokenId, error: TokenError) {
        let token = &mut self.tokens[id.index()];
        trace!(
            text = %token.text,
            line = token.line,
            column = token.column,
            %error,
            "token flagged"
        );
        token.error = Some(error);
    }

    // =========================================================================
    // ITERATION
    // =========================================================================

    /// Visit tokens from the current one onwards.
    ///
    /// `visit` receives the cursor itself, so productions can recurse and move
    /// the index. Breaking leaves the index on the visited token.
    pub fn walk<B>(
        &mut self,
        mut visit: impl FnMut(&mut Self, TokenId) -> ControlFlow<B>,
    ) -> Option<B> {
        while !self.is_end() {
            if let ControlFlow::Break(value) = visit(self, TokenId(self.index)) {
                return Some(value);
            }
            self.advance();
        }

        None
    }

    /// Move one token forward, stopping at the end.
    pub fn advance(&mut self) {
        if !self.is_end() {
            self.index += 1;
        }
    }

    pub fn step_back_if_not_end(&mut self) {
        if self.index > 0 && !self.is_end() {
            self.index -= 1;
        }
    }

    /// Consume every following token whose kind or sub-kind is in `set`.
    ///
    /// The index parks on the last consumed token (on the current one when
    /// nothing matched), or at the end when the input ran out.
    pub fn get_all_next(&mut self, set: TokenKinds) -> Vec<TokenId> {
        let mut consumed = Vec::new();

        self.advance();
        while let Some(token) = self.current() {
            if !token.is_any(set) {
                break;
            }
            consumed.push(TokenId(self.index));
            self.index += 1;
        }

        self.step_back_if_not_end();
        consumed
    }

    // =========================================================================
    // LOOKUP
    // =========================================================================

    /// Check the next non-space token after the current one.
    pub fn is_next(&self, kind: TokenKind) -> bool {
        self.tokens
            .iter()
            .skip(self.index + 1)
            .find(|t| t.kind != TokenKind::Space)
            .is_some_and(|t| t.kind == kind)
    }

    /// Whether only spaces separate the current token from a line break or
    /// the start of input.
    pub fn is_start_of_new_line(&self) -> bool {
        self.tokens[..self.index.min(self.tokens.len())]
            .iter()
            .rev()
            .find(|t| t.kind != TokenKind::Space)
            .is_none_or(|t| matches!(t.kind, TokenKind::NewLine | TokenKind::BlankLines))
    }

    /// Nearest token that is not trivia, looking from the current index.
    pub fn pick(&self, direction: Direction, skip_current: bool) -> Option<TokenId> {
        let significant = |&index: &usize| !self.tokens[index].kind.is_trivia();
        let len = self.tokens.len();

        match direction {
            Direction::Forward => {
                let from = self.index + usize::from(skip_current);
                (from..len).find(significant).map(TokenId)
            }
            Direction::Backward => {
                let to = if skip_current {
                    self.index.min(len)
                } else {
                    (self.index + 1).min(len)
                };
                (0..to).rev().find(significant).map(TokenId)
            }
        }
    }

    pub fn pick_next(&self) -> Option<TokenId> {
        self.pick(Direction::Forward, false)
    }

    pub fn pick_prev(&self) -> Option<TokenId> {
        self.pick(Direction::Backward, false)
    }

    pub fn pick_prev_skip_current(&self) -> Option<TokenId> {
        self.pick(Direction::Backward, true)
    }

    /// Start of the nearest significant token from here on.
    pub fn next_start(&self) -> Position {
        self.pick_next()
            .map(|id| self.token(id).start_position())
            .unwrap_or_default()
    }

    /// End of the nearest significant token behind the cursor.
    pub fn prev_end(&self, skip_current: bool) -> Position {
        self.pick(Direction::Backward, skip_current)
            .map(|id| self.token(id).end_position())
            .unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::lexer::tokenize;

    #[test]
    fn test_walk_break_keeps_index() {
        let mut tokens = tokenize("Ann + Bob");
        let mut cursor = Cursor::new(&mut tokens);

        let found = cursor.walk(|c, id| {
            if c.token(id).is(TokenKind::Plus) {
                ControlFlow::Break(id)
            } else {
                ControlFlow::Continue(())
            }
        });

        assert_eq!(found, Some(TokenId(2)));
        assert_eq!(cursor.index(), 2);
    }

    #[test]
    fn test_walk_runs_to_end() {
        let mut tokens = tokenize("a b c");
        let mut cursor = Cursor::new(&mut tokens);
        let mut seen = 0;

        let result: Option<()> = cursor.walk(|_, _| {
            seen += 1;
            ControlFlow::Continue(())
        });

        assert_eq!(result, None);
        assert_eq!(seen, 1);
        assert!(cursor.is_end());
    }

    #[test]
    fn test_get_all_next_parks_before_mismatch() {
        let mut tokens = tokenize("Ann (Annie, Nan) Smith");
        let mut cursor = Cursor::new(&mut tokens);
        cursor.index = 2;

        let consumed =
            cursor.get_all_next(TokenKinds::ALIAS | TokenKinds::COMMA | TokenKinds::SPACE);

        let texts: Vec<_> = consumed.iter().map(|&id| cursor.token(id).text()).collect();
        assert_eq!(texts, vec!["Annie", ",", " ", "Nan"]);
        assert_eq!(cursor.index(), 6);
    }

    #[test]
    fn test_get_all_next_at_end() {
        let mut tokens = tokenize("Ann  ");
        let mut cursor = Cursor::new(&mut tokens);

        let consumed = cursor.get_all_next(TokenKinds::SPACE);

        assert_eq!(consumed, vec![TokenId(1)]);
        assert!(cursor.is_end());
    }

    #[test]
    fn test_is_next_skips_spaces() {
        let mut tokens = tokenize("Ann   2.");
        let cursor = Cursor::new(&mut tokens);
        assert!(cursor.is_next(TokenKind::Num));
        assert!(!cursor.is_next(TokenKind::Name));
    }

    #[test]
    fn test_start_of_new_line() {
        let mut tokens = tokenize("Ann\n  Bob Cid");
        let mut cursor = Cursor::new(&mut tokens);
        assert!(cursor.is_start_of_new_line());

        cursor.index = 3;
        assert_eq!(cursor.current().map(|t| t.text()), Some("Bob"));
        assert!(cursor.is_start_of_new_line());

        cursor.index = 5;
        assert!(!cursor.is_start_of_new_line());
    }

    #[test]
    fn test_pick_skips_trivia() {
        let mut tokens = tokenize("  Ann \n\n Bob @ ");
        let mut cursor = Cursor::new(&mut tokens);

        assert_eq!(cursor.pick_next().map(|id| cursor.token(id).text()), Some("Ann"));

        cursor.index = cursor.len();
        assert_eq!(cursor.pick_prev().map(|id| cursor.token(id).text()), Some("Bob"));

        cursor.index = 5;
        assert_eq!(cursor.current().map(|t| t.text()), Some("Bob"));
        assert_eq!(cursor.pick_prev().map(|id| cursor.token(id).text()), Some("Bob"));
        assert_eq!(
            cursor.pick_prev_skip_current().map(|id| cursor.token(id).text()),
            Some("Ann")
        );
    }

    #[test]
    fn test_positions_default_without_tokens() {
        let mut tokens = Vec::new();
        let cursor = Cursor::new(&mut tokens);
        assert_eq!(cursor.next_start(), Position::default());
        assert_eq!(cursor.prev_end(true), Position::default());
    }
}
