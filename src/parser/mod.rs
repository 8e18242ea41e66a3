//! Parser entry points and the per-parse context.
//!
//! A parse owns a cursor over the input and a [`Ctx`] that accumulates
//! tokens. Backtracking truncates the token accumulator back to a
//! saved mark, which is what guarantees that a rule that does not end
//! up in the accepted parse contributes nothing to the stream.

mod rules;

use rules::Rule;

use crate::cursor::Cursor;
use crate::error::ParseErrorMsg;
use crate::{ParseResult, Span, Token, TokenKind, TokenStream};

/// Tokenizes one formula string.
///
/// Accepts `=body`, `{=body}`, a bare body, or pure whitespace, and
/// only if the whole input parses. `label` is an opaque source label
/// echoed into any [`crate::ParseError`].
pub fn parse_formula(input: &str, label: &str) -> ParseResult<TokenStream> {
    run(rules::FormulaRoot, input, label)
}

/// Extracts A1-style cell and range references from mixed text.
///
/// Non-reference stretches (quoted strings, words, punctuation) are
/// emitted as `Text` tokens, so the stream covers the input exactly as
/// with [`parse_formula`].
pub fn parse_refs_in_text(input: &str, label: &str) -> ParseResult<TokenStream> {
    run(rules::TextRefsRoot, input, label)
}

fn run<R: Rule>(root: R, input: &str, label: &str) -> ParseResult<TokenStream> {
    let mut cursor = Cursor::new(input);
    let mut ctx = Ctx::new();
    match root.try_match(&mut cursor, &mut ctx) {
        Ok(true) => Ok(ctx.into_stream()),
        Ok(false) => Err(ParseErrorMsg::NoParse.at(input, label, ctx.deepest())),
        Err(commit) => Err(commit.into_parse_error(input, label)),
    }
}

/// Per-parse accumulator: the token stream under construction and the
/// deepest offset any rule reached (reported on a soft failure at the
/// root).
pub(crate) struct Ctx {
    tokens: Vec<Token>,
    deepest: usize,
}

impl Ctx {
    pub fn new() -> Self {
        Self {
            tokens: Vec::new(),
            deepest: 0,
        }
    }

    /// Current length of the token stream, used as a rollback mark.
    pub fn mark(&self) -> usize {
        self.tokens.len()
    }

    /// Discards every token emitted since `mark`.
    pub fn rollback(&mut self, mark: usize) {
        self.tokens.truncate(mark);
    }

    /// Records that matching reached `offset`.
    pub fn note(&mut self, offset: usize) {
        self.deepest = self.deepest.max(offset);
    }

    pub fn deepest(&self) -> usize {
        self.deepest
    }

    /// Appends a token for `source[start..end]`. Token boundaries
    /// always fall next to ASCII structure, so the slice is on char
    /// boundaries even for inputs with multi-byte text inside strings
    /// or sheet names.
    pub fn emit(&mut self, kind: TokenKind, source: &str, start: usize, end: usize) {
        let span = Span { start, end };
        self.tokens.push(Token {
            kind,
            lexeme: span.of_str(source).to_string(),
            span,
        });
    }

    pub fn into_stream(self) -> TokenStream {
        self.tokens
    }
}
