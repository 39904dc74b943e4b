//! Rule-based lexer for the family notation
//!
//! Tokenization walks an ordered rule table: the first rule whose pattern
//! matches at the current offset wins. Three passes run inline while tokens
//! are emitted, each reacting only to tokens already in the buffer:
//!
//! - merging of multi-word labels and unknown markers,
//! - name/surname disambiguation,
//! - alias-bracket tracking.
//!
//! Family signature lines are detected once the buffer is complete (see
//! [`signature`](super::signature)).

use std::ops::Range;
use std::sync::LazyLock;

use regex::Regex;
use tracing::{debug, trace};

use super::options::LexOptions;
use super::signature;
use super::token::Token;
use super::token_kind::{TokenKind, TokenKinds};

/// A pattern anchored at the current offset and the kinds it produces
struct Rule {
    kind: TokenKind,
    sub_kind: Option<TokenKind>,
    pattern: Regex,
}

fn rule(kind: TokenKind, sub_kind: Option<TokenKind>, pattern: &str) -> Rule {
    Rule {
        kind,
        sub_kind,
        pattern: Regex::new(pattern).expect("lexer rule patterns are valid"),
    }
}

/// Rule table in priority order
static RULES: LazyLock<Vec<Rule>> = LazyLock::new(|| {
    use TokenKind::*;

    vec![
        rule(BlankLines, None, r"^\r?\n[\r\n\t ]*\n"),
        rule(NewLine, None, r"^\r?\n"),
        rule(Space, None, r"^ +"),
        rule(Arrow, None, r"^<?-+>"),
        rule(Arrow, None, r"^<-+>?"),
        rule(Unknown, None, r#"^[\p{L}0-9"'\-.]*\?"#),
        rule(Name, None, r"^\p{Lu}[\p{L}0-9'.]*(-+[\p{L}0-9'.]+)*"),
        rule(Word, None, r#"^['"][\p{Ll}0-9'".]+(-+[\p{Ll}0-9'".]+)*"#),
        rule(Word, None, r#"^\p{Ll}[\p{Ll}0-9'".]*(-+[\p{Ll}0-9'".]+)*"#),
        rule(Arrow, None, r"^-+"),
        rule(Arrow, Some(Equal), r"^=+"),
        rule(Punctuation, Some(Plus), r"^\+"),
        rule(Punctuation, Some(Comma), r"^,"),
        rule(Bracket, Some(BracketLeft), r"^\("),
        rule(Bracket, Some(BracketRight), r"^\)"),
        rule(Num, None, r"^[0-9]+\.?"),
        rule(Comment, None, r"^[/#*][^\r\n]*"),
    ]
});

/// Tokens that keep an open alias bracket open
const ALIAS_CONTEXT: TokenKinds = TokenKinds::NAME
    .union(TokenKinds::SURNAME)
    .union(TokenKinds::BRACKET)
    .union(TokenKinds::SPACE)
    .union(TokenKinds::WORD)
    .union(TokenKinds::INVALID)
    .union(TokenKinds::COMMA);

/// Lexer state over one source text
pub struct Lexer<'a> {
    src: &'a str,
    tokens: Vec<Token>,
    offset: usize,
    line: usize,
    column: usize,
    alias_open: bool,
    /// Indices of emitted blank-line tokens
    boundaries: Vec<usize>,
    options: LexOptions,
}

impl<'a> Lexer<'a> {
    pub fn new(src: &'a str) -> Self {
        Self::with_options(src, LexOptions::default())
    }

    pub fn with_options(src: &'a str, options: LexOptions) -> Self {
        Self {
            src,
            tokens: Vec::new(),
            offset: 0,
            line: 0,
            column: 0,
            alias_open: false,
            boundaries: Vec::new(),
            options,
        }
    }

    /// Consume the whole source and return the finalized tokens.
    pub fn tokenize(mut self) -> Vec<Token> {
        while self.offset < self.src.len() {
            self.step();
        }

        signature::mark_signature_lines(&mut self.tokens, &self.boundaries, &self.options);

        debug!(
            tokens = self.tokens.len(),
            blank_lines = self.boundaries.len(),
            "lexed source"
        );

        self.tokens
    }

    fn step(&mut self) {
        let rest = &self.src[self.offset..];
        let matched = RULES
            .iter()
            .find_map(|rule| rule.pattern.find(rest).map(|m| (rule, m.len())));

        match matched {
            Some((rule, len)) => {
                let token = Token::new(
                    rule.kind,
                    rule.sub_kind,
                    self.src,
                    self.offset,
                    len,
                    self.line,
                    self.column,
                );
                self.emit(token);
            }
            None => self.push_invalid(rest),
        }
    }

    /// One undecodable char; grows the previous token if it is invalid too.
    fn push_invalid(&mut self, rest: &str) {
        let size = rest.chars().next().map_or(1, char::len_utf8);

        match self.tokens.last_mut() {
            Some(last) if last.kind == TokenKind::Invalid => {
                last.len += size;
                last.char_count += 1;
                last.text = self.src[last.offset..last.end()].into();
            }
            _ => {
                let token = Token::new(
                    TokenKind::Invalid,
                    None,
                    self.src,
                    self.offset,
                    size,
                    self.line,
                    self.column,
                );
                self.tokens.push(token);
            }
        }

        self.offset += size;
        self.column += 1;
    }

    fn emit(&mut self, mut token: Token) {
        match token.kind {
            TokenKind::Name => {
                if self.alias_open {
                    trace!(text = %token.text, "alias inside brackets");
                    token.sub_kind = Some(TokenKind::Alias);
                } else {
                    self.check_surname(&mut token);
                }
            }
            TokenKind::Unknown => self.merge_unknown(&mut token),
            TokenKind::Word => self.merge_words(&mut token),
            TokenKind::Bracket => {
                self.alias_open = token.sub_kind == Some(TokenKind::BracketLeft);
            }
            TokenKind::BlankLines => self.boundaries.push(self.tokens.len()),
            _ => {}
        }

        if self.alias_open && !token.is_any(ALIAS_CONTEXT) {
            self.alias_open = false;
        }

        self.offset = token.end();
        match token.kind {
            TokenKind::NewLine | TokenKind::BlankLines => {
                self.line += token.text.matches('\n').count();
                self.column = 0;
            }
            _ => self.column = token.end_column(),
        }

        self.tokens.push(token);
    }

    fn merge_unknown(&mut self, token: &mut Token) {
        let (mut run, stop) = run_before(
            &self.tokens,
            self.tokens.len(),
            TokenKinds::NAME | TokenKinds::WORD,
        );

        if run.is_empty() {
            return;
        }

        // Words right after an arrow are its label, not part of the unknown
        if stop.is_some_and(|index| self.tokens[index].kind == TokenKind::Arrow) {
            let mut label = leading_run(&self.tokens[run.clone()], TokenKinds::WORD);

            if label > 0 {
                if label == run.len() && self.tokens[run.end - 1].kind == TokenKind::Word {
                    label -= 1;
                }

                run.start += label;
                if run.start < run.end && self.tokens[run.start].kind == TokenKind::Space {
                    run.start += 1;
                }
            }
        }

        self.absorb(run, token);
    }

    fn merge_words(&mut self, token: &mut Token) {
        let (run, _) = run_before(&self.tokens, self.tokens.len(), TokenKinds::WORD);
        self.absorb(run, token);
    }

    /// Fold the tail `run` of the buffer into `token`.
    fn absorb(&mut self, run: Range<usize>, token: &mut Token) {
        if run.is_empty() {
            return;
        }

        debug_assert_eq!(run.end, self.tokens.len());

        let first = &self.tokens[run.start];
        let merged = Token::new(
            token.kind,
            token.sub_kind,
            self.src,
            first.offset,
            token.end() - first.offset,
            first.line,
            first.column,
        );

        trace!(text = %merged.text, absorbed = run.len(), "merged tokens");

        *token = merged;
        self.tokens.truncate(run.start);
    }

    fn check_surname(&mut self, token: &mut Token) {
        let (run, stop) = run_before(
            &self.tokens,
            self.tokens.len(),
            TokenKinds::NAME | TokenKinds::SURNAME,
        );

        if !run.is_empty() {
            // Rightmost capitalized word of a run is the surname
            for prev in &mut self.tokens[run] {
                if prev.kind == TokenKind::Surname {
                    prev.kind = TokenKind::Name;
                }
            }

            trace!(text = %token.text, "surname after name run");
            token.kind = TokenKind::Surname;
            return;
        }

        let Some(stop) = stop else {
            return;
        };

        if self.tokens[stop].sub_kind != Some(TokenKind::BracketRight) {
            return;
        }

        // Name (Alias) Surname
        let cut = alias_group_start(&self.tokens);
        let (names, _) = run_before(&self.tokens[..cut], cut, TokenKinds::NAME);

        if !names.is_empty() {
            trace!(text = %token.text, "surname after alias group");
            token.kind = TokenKind::Surname;
        }
    }
}

/// Tokenize `src` with default options.
pub fn tokenize(src: &str) -> Vec<Token> {
    Lexer::new(src).tokenize()
}

/// Tokenize `src` with explicit options.
pub fn tokenize_with(src: &str, options: &LexOptions) -> Vec<Token> {
    Lexer::with_options(src, options.clone()).tokenize()
}

/// Find the run of `accept` tokens ending at `end` (exclusive), skipping
/// spaces. A leading space is trimmed from the run.
///
/// Returns the run and the index of the token that stopped the scan, if any.
pub(crate) fn run_before(
    tokens: &[Token],
    end: usize,
    accept: TokenKinds,
) -> (Range<usize>, Option<usize>) {
    let mut start = 0;
    let mut stop = None;

    for index in (0..end).rev() {
        let kind = tokens[index].kind;

        if kind == TokenKind::Space {
            continue;
        }

        if !accept.includes(kind) {
            stop = Some(index);
            start = index + 1;
            break;
        }
    }

    if start < end && tokens[start].kind == TokenKind::Space {
        start += 1;
    }

    (start..end, stop)
}

/// Length of the leading run of `accept` tokens, skipping spaces inside the
/// run and trimming a trailing one.
fn leading_run(tokens: &[Token], accept: TokenKinds) -> usize {
    let mut end = tokens.len();

    for (index, token) in tokens.iter().enumerate() {
        if token.kind == TokenKind::Space {
            continue;
        }

        if !accept.includes(token.kind) {
            end = index;
            break;
        }
    }

    if end > 0 && tokens[end - 1].kind == TokenKind::Space {
        end -= 1;
    }

    end
}

/// If the buffer ends with a bracket group `( ... )` on the current line,
/// return the index of its opening bracket, otherwise the buffer length.
fn alias_group_start(tokens: &[Token]) -> usize {
    let mut closed = false;

    for index in (0..tokens.len()).rev() {
        let token = &tokens[index];

        match token.kind {
            TokenKind::Space => continue,
            TokenKind::NewLine | TokenKind::BlankLines => return tokens.len(),
            _ => {}
        }

        if !closed {
            if token.sub_kind != Some(TokenKind::BracketRight) {
                return tokens.len();
            }
            closed = true;
            continue;
        }

        if token.sub_kind == Some(TokenKind::BracketLeft) {
            return index;
        }
    }

    tokens.len()
}
