//! Tokenizer and syntax validator for Microsoft Excel formula strings.
//!
//! [`parse_formula`] runs a scannerless recursive-descent grammar
//! (ordered choice, unlimited lookahead, committed regions) over a
//! formula and returns a flat [`TokenStream`] labelling every
//! substring with its lexical category — cells, ranges, names,
//! built-in and user-defined function calls, sheet and workbook
//! prefixes, structured table references, literals, and operators.
//! Excel's overlapping token classes are disambiguated by rule
//! priority exactly as Excel writes formulas into files: `A1A1` is a
//! name, not two cells; `TRUEISH` is a name, not a boolean; `SUM(` is
//! one function token; a run of spaces between references is the
//! intersection operator.
//!
//! [`parse_refs_in_text`] is a companion scanner that pulls A1-style
//! references out of free-form text such as comments or documentation.
//!
//! Parsing is all-or-nothing: on failure both return a
//! [`ParseError`] carrying the byte offset, line, and column. For
//! every accepted input the concatenated token lexemes reproduce the
//! input exactly.
//!
//! ```
//! use gridlex::{TokenKind, parse_formula};
//!
//! let tokens = parse_formula("=SUM(A1,B2)", "Sheet1!C3").unwrap();
//! let kinds: Vec<TokenKind> = tokens.iter().map(|t| t.kind).collect();
//! assert_eq!(
//!     vec![
//!         TokenKind::Eq,
//!         TokenKind::ExcelFunction,
//!         TokenKind::Cell,
//!         TokenKind::Comma,
//!         TokenKind::Cell,
//!         TokenKind::CloseParen,
//!     ],
//!     kinds,
//! );
//! ```


mod cursor;
mod error;
pub mod functions;
mod parser;
mod span;
mod token;

pub use error::{ParseError, ParseErrorMsg, ParseResult};
pub use parser::{parse_formula, parse_refs_in_text};
pub use span::Span;
pub use token::{Token, TokenKind, TokenStream, reconstruct};
