//! Recursive descent parser for the family notation
//!
//! Four productions (root, family, relation, person) share one [`Cursor`].
//! A production returns with the cursor on the token that ended it and the
//! caller steps back one, so the caller's walk looks at that token again.
//!
//! Nothing aborts: tokens that fit nowhere are flagged and skipped.

use std::ops::ControlFlow;

use tracing::debug;

use super::cursor::Cursor;
use super::errors::SyntaxError;
use super::lexer::{tokenize, tokenize_with};
use super::options::LexOptions;
use super::token::{Token, TokenError, TokenId};
use super::token_kind::{TokenKind, TokenKinds};
use crate::base::{Loc, Position};
use crate::syntax::ast::{Family, Person, RelList, Relation, Root, Side};
use crate::syntax::lookup::{self, NodeRef};

/// Tokens consumed right after a family name
const FAMILY_TAIL: TokenKinds = TokenKinds::SURNAME
    .union(TokenKinds::BRACKET)
    .union(TokenKinds::PUNCTUATION)
    .union(TokenKinds::SPACE)
    .union(TokenKinds::INVALID);

/// Tokens consumed right after an arrow
const ARROW_TAIL: TokenKinds = TokenKinds::SPACE.union(TokenKinds::WORD);

/// Tokens consumed inside a person's alias bracket
const ALIAS_GROUP: TokenKinds = TokenKinds::ALIAS
    .union(TokenKinds::COMMA)
    .union(TokenKinds::SPACE);

/// Lines attached to a person that opened its line
const PERSON_TAIL: TokenKinds = TokenKinds::COMMENT
    .union(TokenKinds::NEW_LINE)
    .union(TokenKinds::SPACE);

/// Parse result: the token buffer and the tree referencing it
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Parse {
    pub tokens: Vec<Token>,
    pub root: Root,
}

impl Parse {
    pub fn token(&self, id: TokenId) -> Option<&Token> {
        self.tokens.get(id.index())
    }

    pub fn text(&self, id: TokenId) -> Option<&str> {
        self.token(id).map(Token::text)
    }

    /// Collect flagged and invalid tokens as diagnostics, in source order.
    pub fn errors(&self) -> Vec<SyntaxError> {
        self.tokens
            .iter()
            .enumerate()
            .filter_map(|(index, token)| SyntaxError::from_token(TokenId(index), token))
            .collect()
    }

    /// Check if parsing succeeded without errors
    pub fn ok(&self) -> bool {
        self.tokens
            .iter()
            .all(|t| !t.has_error() && t.kind != TokenKind::Invalid)
    }

    /// Innermost node at `position`
    pub fn node_at(&self, position: Position) -> Option<NodeRef<'_>> {
        lookup::node_at(&self.root, position)
    }
}

/// Parse family notation into a tree
pub fn parse(src: &str) -> Parse {
    parse_tokens(tokenize(src))
}

/// Parse with explicit lexer options
pub fn parse_with(src: &str, options: &LexOptions) -> Parse {
    parse_tokens(tokenize_with(src, options))
}

/// Parse an already lexed token buffer
pub fn parse_tokens(mut tokens: Vec<Token>) -> Parse {
    let root = parse_root(&mut Cursor::new(&mut tokens));

    debug!(
        tokens = tokens.len(),
        families = root.families.len(),
        relations = root.relations().count(),
        flagged = tokens.iter().filter(|t| t.has_error()).count(),
        "parsed source"
    );

    Parse { tokens, root }
}

// =========================================================================
// PRODUCTIONS
// =========================================================================

fn parse_root(c: &mut Cursor<'_>) -> Root {
    let mut root = Root::default();

    if c.pick_next().is_none() {
        return root;
    }
    let start = c.next_start();

    c.walk(|c, id| {
        let kind = c.token(id).kind;

        match kind {
            TokenKind::Comment => root.comments.push(id),
            TokenKind::NewLine | TokenKind::BlankLines | TokenKind::Space | TokenKind::Invalid => {}
            _ => {
                let family = parse_family(c);
                root.push_family(family);
                c.step_back_if_not_end();
            }
        }
        ControlFlow::<()>::Continue(())
    });

    root.loc = Loc::new(start, c.prev_end(false));
    root
}

fn parse_family(c: &mut Cursor<'_>) -> Family {
    let start = c.next_start();
    let mut family = Family::default();

    let end = c.walk(|c, id| {
        let kind = c.token(id).kind;

        match kind {
            TokenKind::Surname => {
                // Next family's signature line
                if family.name.is_some() {
                    return ControlFlow::Break(c.prev_end(true));
                }

                family.name = Some(id);

                for next in c.get_all_next(FAMILY_TAIL) {
                    if c.token(next).is_alias() {
                        family.aliases.push(next);
                    } else if c.token(next).kind == TokenKind::Surname {
                        c.flag(next, TokenError::Duplicate);
                    }
                }
            }
            TokenKind::Comment => family.comments.push(id),
            TokenKind::NewLine | TokenKind::BlankLines | TokenKind::Space | TokenKind::Invalid => {}
            TokenKind::Name | TokenKind::Unknown | TokenKind::Num => {
                let relation = parse_relation(c);
                family.relations.push(relation);
                c.step_back_if_not_end();
            }
            _ => c.flag(id, TokenError::Unexpected),
        }

        ControlFlow::Continue(())
    });

    family.loc = Loc::new(start, end.unwrap_or_else(|| c.prev_end(false)));
    family
}

fn parse_relation(c: &mut Cursor<'_>) -> Relation {
    let start = c.next_start();
    let mut relation = Relation::default();
    let mut side = Side::Sources;

    let end = c.walk(|c, id| {
        let kind = c.token(id).kind;

        match kind {
            TokenKind::Name | TokenKind::Unknown | TokenKind::Num => {
                let person = parse_person(c);
                active_list(&mut relation, side).persons.push(person);
                c.step_back_if_not_end();
            }
            TokenKind::Word | TokenKind::Punctuation => {
                active_list(&mut relation, side).separators.push(id);
            }
            TokenKind::Arrow => {
                if relation.arrow.is_some() {
                    c.flag(id, TokenError::Duplicate);
                    return ControlFlow::Continue(());
                }

                relation.arrow = Some(id);
                relation.targets = Some(RelList::default());
                side = Side::Targets;

                for next in c.get_all_next(ARROW_TAIL) {
                    if c.token(next).kind == TokenKind::Word {
                        relation.label = Some(next);
                    }
                }
            }
            TokenKind::Comment => relation.comments.push(id),
            TokenKind::BlankLines => {
                // Numbered target list continued after an empty line
                if side == Side::Targets && c.is_next(TokenKind::Num) {
                    c.flag(id, TokenError::BlankLineInList);
                    return ControlFlow::Continue(());
                }
                return ControlFlow::Break(c.prev_end(false));
            }
            TokenKind::Space | TokenKind::Invalid | TokenKind::NewLine => {}
            _ => return ControlFlow::Break(c.prev_end(true)),
        }

        ControlFlow::Continue(())
    });

    relation.loc = Loc::new(start, end.unwrap_or_else(|| c.prev_end(false)));
    relation.is_family_def = relation
        .arrow
        .is_some_and(|arrow| c.token(arrow).sub_kind == Some(TokenKind::Equal));
    relation.seal();
    relation
}

fn active_list(relation: &mut Relation, side: Side) -> &mut RelList {
    match side {
        Side::Sources => &mut relation.sources,
        Side::Targets => relation.targets.get_or_insert_with(RelList::default),
    }
}

fn parse_person(c: &mut Cursor<'_>) -> Person {
    let start = c.next_start();
    let at_line_start = c.is_start_of_new_line();
    let mut person = Person::default();

    let end = c.walk(|c, id| {
        let token = c.token(id);
        let (kind, sub_kind) = (token.kind, token.sub_kind);

        match kind {
            TokenKind::Unknown => {
                if person.unknown.is_some() {
                    return ControlFlow::Break(c.prev_end(true));
                }
                person.unknown = Some(id);
            }
            // Last number wins
            TokenKind::Num => person.num = Some(id),
            TokenKind::Name => set_once(c, &mut person.name, id),
            TokenKind::Surname => set_once(c, &mut person.surname, id),
            TokenKind::Bracket => {
                if sub_kind == Some(TokenKind::BracketRight) {
                    return ControlFlow::Continue(());
                }

                for next in c.get_all_next(ALIAS_GROUP) {
                    if c.token(next).is_alias() {
                        person.aliases.push(next);
                    }
                }
            }
            TokenKind::Comment => person.comments.push(id),
            TokenKind::NewLine => {
                if !at_line_start {
                    return ControlFlow::Break(c.prev_end(true));
                }

                let tail = c.get_all_next(PERSON_TAIL);
                let end = c.prev_end(false);

                if !tail.is_empty() {
                    c.advance();
                }

                person.comments.extend(
                    tail.into_iter()
                        .filter(|&next| c.token(next).kind == TokenKind::Comment),
                );

                return ControlFlow::Break(end);
            }
            TokenKind::Space | TokenKind::Invalid => {}
            _ => return ControlFlow::Break(c.prev_end(true)),
        }

        ControlFlow::Continue(())
    });

    person.loc = Loc::new(start, end.unwrap_or_else(|| c.prev_end(false)));
    person
}

/// Fill an empty slot, or flag the token as a duplicate
fn set_once(c: &mut Cursor<'_>, slot: &mut Option<TokenId>, id: TokenId) {
    match slot {
        Some(_) => c.flag(id, TokenError::Duplicate),
        None => *slot = Some(id),
    }
}
