//! Error reporting for formula parsing.
//!
//! Two failure modes exist inside the rule machinery: a *soft* failure
//! rewinds the cursor and lets an enclosing ordered choice try its next
//! alternative, and never surfaces to the caller; a *hard* failure is
//! raised inside a committed region (`Must`/`IfMust`) and propagates
//! straight to the entry point, where it is decorated with the source
//! label and a line/column derived from the offset.

use std::borrow::Cow;

use serde::{Deserialize, Serialize};
use thiserror::Error;

pub type ParseResult<T> = std::result::Result<T, ParseError>;

/// Position and description of a parse failure.
///
/// The `label` is the opaque source label the caller passed in, echoed
/// back for caller-side diagnostics. `line` and `column` are 1-based
/// and derived from `offset`.
#[derive(Error, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[error("{label}:{line}:{column}: {msg}")]
pub struct ParseError {
    pub label: String,
    pub offset: usize,
    pub line: usize,
    pub column: usize,
    pub msg: ParseErrorMsg,
}

/// Information about the kind of parse failure that occurred.
#[derive(Error, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ParseErrorMsg {
    /// No alternative of the root rule matched the whole input.
    #[error("formula does not parse")]
    NoParse,
    /// A committed region required something that was not there.
    #[error("expected {0}")]
    Expected(Cow<'static, str>),
}

impl ParseErrorMsg {
    /// Builds a [`ParseError`] at `offset` within `source`.
    pub(crate) fn at(self, source: &str, label: &str, offset: usize) -> ParseError {
        let (line, column) = line_col(source, offset);
        ParseError {
            label: label.to_string(),
            offset,
            line,
            column,
            msg: self,
        }
    }
}

/// A hard failure raised by a committed region. Carries only the byte
/// offset; the entry point attaches the label and line/column.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct CommitError {
    pub offset: usize,
    pub msg: ParseErrorMsg,
}

impl CommitError {
    pub fn expected(offset: usize, what: &'static str) -> Self {
        Self {
            offset,
            msg: ParseErrorMsg::Expected(Cow::Borrowed(what)),
        }
    }

    pub fn into_parse_error(self, source: &str, label: &str) -> ParseError {
        self.msg.at(source, label, self.offset)
    }
}

/// 1-based line and byte column of `offset` within `source`.
fn line_col(source: &str, offset: usize) -> (usize, usize) {
    let offset = offset.min(source.len());
    let prefix = &source.as_bytes()[..offset];
    let line = prefix.iter().filter(|&&b| b == b'\n').count() + 1;
    let line_start = prefix
        .iter()
        .rposition(|&b| b == b'\n')
        .map(|i| i + 1)
        .unwrap_or(0);
    (line, offset - line_start + 1)
}
