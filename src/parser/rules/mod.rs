use super::Ctx;
use crate::cursor::Cursor;
use crate::error::CommitError;

mod atoms;
mod combinators;
mod expression;
mod text_refs;

pub(crate) use atoms::*;
pub(crate) use combinators::*;
pub(crate) use expression::*;
pub(crate) use text_refs::*;

/// `Ok(true)` — matched, cursor advanced past the match. `Ok(false)` —
/// soft failure, cursor and token stream exactly as before the attempt.
/// `Err` — hard failure from a committed region, propagated to the
/// entry point without trying further alternatives.
pub(crate) type MatchResult = Result<bool, CommitError>;

/// A composable matcher over the input cursor.
///
/// Rules are stateless values; matching either consumes input and
/// possibly appends tokens, or leaves both untouched. Every
/// implementation must uphold the soft-failure contract above — the
/// combinators rely on it instead of re-saving state around each
/// alternative.
pub(crate) trait Rule {
    fn try_match(&self, c: &mut Cursor<'_>, ctx: &mut Ctx) -> MatchResult;
}

impl<R: Rule + ?Sized> Rule for &R {
    fn try_match(&self, c: &mut Cursor<'_>, ctx: &mut Ctx) -> MatchResult {
        (*self).try_match(c, ctx)
    }
}
