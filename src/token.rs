//! Token stream types.
//!
//! A successful parse yields an ordered [`TokenStream`] whose lexemes,
//! concatenated in order, reproduce the input exactly. Token kinds form
//! a closed taxonomy; a token's kind is determined by the first grammar
//! alternative that matched it, in the grammar's documented priority
//! order.

use itertools::Itertools;
use serde::{Deserialize, Serialize};
use strum_macros::Display;

use crate::Span;

/// An ordered sequence of tokens covering the parsed input.
pub type TokenStream = Vec<Token>;

/// A single lexical token: its kind, the exact matched substring, and
/// the byte range it was matched at.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub kind: TokenKind,
    pub lexeme: String,
    pub span: Span,
}

impl Token {
    /// Byte offset of the first byte of the token.
    pub fn start(&self) -> usize {
        self.span.start
    }
    /// Byte offset just past the last byte of the token.
    pub fn end(&self) -> usize {
        self.span.end
    }
}

/// Reassembles the original input from a token stream.
pub fn reconstruct(tokens: &[Token]) -> String {
    tokens.iter().map(|t| t.lexeme.as_str()).join("")
}

/// The closed taxonomy of lexical categories.
#[derive(Serialize, Deserialize, Debug, Display, Copy, Clone, PartialEq, Eq, Hash)]
pub enum TokenKind {
    // Structure
    #[strum(to_string = "left paren")]
    OpenParen,
    #[strum(to_string = "right paren")]
    CloseParen,
    #[strum(to_string = "left bracket")]
    OpenSquare,
    #[strum(to_string = "right bracket")]
    CloseSquare,
    #[strum(to_string = "left brace")]
    OpenCurly,
    #[strum(to_string = "right brace")]
    CloseCurly,
    #[strum(to_string = "comma")]
    Comma,
    #[strum(to_string = "semicolon")]
    Semicolon,
    #[strum(to_string = "colon")]
    Colon,
    #[strum(to_string = "exclamation mark")]
    Bang,
    #[strum(to_string = "dollar sign")]
    Dollar,
    #[strum(to_string = "at sign")]
    At,

    // Operators
    #[strum(to_string = "plus operator")]
    Plus,
    #[strum(to_string = "minus operator")]
    Minus,
    #[strum(to_string = "multiplication operator")]
    Mul,
    #[strum(to_string = "division operator")]
    Div,
    #[strum(to_string = "exponentiation operator")]
    Exp,
    #[strum(to_string = "concatenation operator")]
    Concat,
    #[strum(to_string = "percent operator")]
    Percent,
    #[strum(to_string = "equals comparison")]
    Eq,
    #[strum(to_string = "not-equals comparison")]
    Neq,
    #[strum(to_string = "less-than comparison")]
    Lt,
    #[strum(to_string = "greater-than comparison")]
    Gt,
    #[strum(to_string = "less-than-or-equal comparison")]
    Lte,
    #[strum(to_string = "greater-than-or-equal comparison")]
    Gte,
    #[strum(to_string = "intersection operator")]
    Intersect,

    // Literals
    #[strum(to_string = "numeric literal")]
    Number,
    #[strum(to_string = "string literal")]
    Text,
    #[strum(to_string = "boolean literal")]
    Bool,
    #[strum(to_string = "error literal")]
    Error,
    #[strum(to_string = "reference error literal")]
    RefError,

    // References
    #[strum(to_string = "cell reference")]
    Cell,
    #[strum(to_string = "column range")]
    VRange,
    #[strum(to_string = "row range")]
    HRange,
    #[strum(to_string = "name")]
    NamedRange,
    #[strum(to_string = "reserved name")]
    ReservedName,
    #[strum(to_string = "sheet prefix")]
    SheetPrefix,
    #[strum(to_string = "file index")]
    FileIndex,
    #[strum(to_string = "structured reference column")]
    StructuredRef,
    #[strum(to_string = "dynamic data exchange link")]
    DynamicDataExchange,

    // Callables
    #[strum(to_string = "built-in function")]
    ExcelFunction,
    #[strum(to_string = "reference function")]
    RefFunction,
    #[strum(to_string = "conditional reference function")]
    CondRefFunction,
    #[strum(to_string = "user-defined function")]
    UDFName,

    // Whitespace (significant only as the intersection operator, which
    // is emitted as `Intersect`; a `Space` token is always padding)
    #[strum(to_string = "whitespace")]
    Space,
}
