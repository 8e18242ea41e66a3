//! Primitive matchers.
//!
//! These are the building blocks every lexical and grammar rule is
//! composed from: single bytes, byte classes, literals, sequencing,
//! ordered choice, bounded repetition, lookahead, and the committing
//! `Must`/`IfMust` forms that turn a missing sub-match into a hard
//! error instead of a backtrack.
//!
//! Ordered choice is strictly left-biased: the first alternative that
//! matches wins, and later alternatives are never revisited even if
//! the surrounding rule subsequently fails.

use super::{Ctx, Cursor, MatchResult, Rule};
use crate::TokenKind;
use crate::error::CommitError;

/// Matches exactly the byte `0`.
pub(crate) struct One(pub u8);
impl Rule for One {
    fn try_match(&self, c: &mut Cursor<'_>, ctx: &mut Ctx) -> MatchResult {
        if c.peek() == Some(self.0) {
            c.bump();
            ctx.note(c.pos());
            Ok(true)
        } else {
            Ok(false)
        }
    }
}

/// Matches any single byte not in the set.
pub(crate) struct NotOne(pub &'static [u8]);
impl Rule for NotOne {
    fn try_match(&self, c: &mut Cursor<'_>, ctx: &mut Ctx) -> MatchResult {
        match c.peek() {
            Some(b) if !self.0.contains(&b) => {
                c.bump();
                ctx.note(c.pos());
                Ok(true)
            }
            _ => Ok(false),
        }
    }
}

/// Matches one byte in the inclusive range `0..=1`.
pub(crate) struct CharRange(pub u8, pub u8);
impl Rule for CharRange {
    fn try_match(&self, c: &mut Cursor<'_>, ctx: &mut Ctx) -> MatchResult {
        match c.peek() {
            Some(b) if self.0 <= b && b <= self.1 => {
                c.bump();
                ctx.note(c.pos());
                Ok(true)
            }
            _ => Ok(false),
        }
    }
}

/// Matches the exact string.
pub(crate) struct Literal(pub &'static str);
impl Rule for Literal {
    fn try_match(&self, c: &mut Cursor<'_>, ctx: &mut Ctx) -> MatchResult {
        if c.eat_str(self.0) {
            ctx.note(c.pos());
            Ok(true)
        } else {
            Ok(false)
        }
    }
}

/// Matches any single byte.
pub(crate) struct Any;
impl Rule for Any {
    fn try_match(&self, c: &mut Cursor<'_>, ctx: &mut Ctx) -> MatchResult {
        if c.is_eof() {
            Ok(false)
        } else {
            c.bump();
            ctx.note(c.pos());
            Ok(true)
        }
    }
}

/// Matches only at end of input, consuming nothing.
pub(crate) struct Eof;
impl Rule for Eof {
    fn try_match(&self, c: &mut Cursor<'_>, _ctx: &mut Ctx) -> MatchResult {
        Ok(c.is_eof())
    }
}

/// ASCII letter.
pub(crate) struct Alpha;
impl Rule for Alpha {
    fn try_match(&self, c: &mut Cursor<'_>, ctx: &mut Ctx) -> MatchResult {
        match c.peek() {
            Some(b) if b.is_ascii_alphabetic() => {
                c.bump();
                ctx.note(c.pos());
                Ok(true)
            }
            _ => Ok(false),
        }
    }
}

/// ASCII digit.
pub(crate) struct Digit;
impl Rule for Digit {
    fn try_match(&self, c: &mut Cursor<'_>, ctx: &mut Ctx) -> MatchResult {
        match c.peek() {
            Some(b) if b.is_ascii_digit() => {
                c.bump();
                ctx.note(c.pos());
                Ok(true)
            }
            _ => Ok(false),
        }
    }
}

/// ASCII uppercase letter.
pub(crate) struct Upper;
impl Rule for Upper {
    fn try_match(&self, c: &mut Cursor<'_>, ctx: &mut Ctx) -> MatchResult {
        match c.peek() {
            Some(b) if b.is_ascii_uppercase() => {
                c.bump();
                ctx.note(c.pos());
                Ok(true)
            }
            _ => Ok(false),
        }
    }
}

/// ASCII letter or digit.
pub(crate) struct Alnum;
impl Rule for Alnum {
    fn try_match(&self, c: &mut Cursor<'_>, ctx: &mut Ctx) -> MatchResult {
        match c.peek() {
            Some(b) if b.is_ascii_alphanumeric() => {
                c.bump();
                ctx.note(c.pos());
                Ok(true)
            }
            _ => Ok(false),
        }
    }
}

/// All rules in order.
pub(crate) struct Seq<T>(pub T);

/// Ordered choice: the first matching alternative wins.
pub(crate) struct Sor<T>(pub T);

macro_rules! impl_seq_sor {
    ($($name:ident)+) => {
        impl<$($name: Rule),+> Rule for Seq<($($name,)+)> {
            fn try_match(&self, c: &mut Cursor<'_>, ctx: &mut Ctx) -> MatchResult {
                let save = *c;
                let mark = ctx.mark();
                #[allow(non_snake_case)]
                let ($($name,)+) = &self.0;
                $(
                    if !$name.try_match(c, ctx)? {
                        *c = save;
                        ctx.rollback(mark);
                        return Ok(false);
                    }
                )+
                Ok(true)
            }
        }
        impl<$($name: Rule),+> Rule for Sor<($($name,)+)> {
            fn try_match(&self, c: &mut Cursor<'_>, ctx: &mut Ctx) -> MatchResult {
                #[allow(non_snake_case)]
                let ($($name,)+) = &self.0;
                $(
                    if $name.try_match(c, ctx)? {
                        return Ok(true);
                    }
                )+
                Ok(false)
            }
        }
    };
}

impl_seq_sor!(R1);
impl_seq_sor!(R1 R2);
impl_seq_sor!(R1 R2 R3);
impl_seq_sor!(R1 R2 R3 R4);
impl_seq_sor!(R1 R2 R3 R4 R5);
impl_seq_sor!(R1 R2 R3 R4 R5 R6);
impl_seq_sor!(R1 R2 R3 R4 R5 R6 R7);
impl_seq_sor!(R1 R2 R3 R4 R5 R6 R7 R8);

/// Always succeeds, consuming the inner match if there is one.
pub(crate) struct Opt<R>(pub R);
impl<R: Rule> Rule for Opt<R> {
    fn try_match(&self, c: &mut Cursor<'_>, ctx: &mut Ctx) -> MatchResult {
        self.0.try_match(c, ctx)?;
        Ok(true)
    }
}

/// Greedy repetition, zero or more. Stops on a zero-width match so a
/// nullable inner rule cannot loop forever.
pub(crate) struct Star<R>(pub R);
impl<R: Rule> Rule for Star<R> {
    fn try_match(&self, c: &mut Cursor<'_>, ctx: &mut Ctx) -> MatchResult {
        loop {
            let before = c.pos();
            if !self.0.try_match(c, ctx)? || c.pos() == before {
                return Ok(true);
            }
        }
    }
}

/// Greedy repetition, one or more.
pub(crate) struct Plus<R>(pub R);
impl<R: Rule> Rule for Plus<R> {
    fn try_match(&self, c: &mut Cursor<'_>, ctx: &mut Ctx) -> MatchResult {
        if !self.0.try_match(c, ctx)? {
            return Ok(false);
        }
        Star(&self.0).try_match(c, ctx)
    }
}

/// Greedy repetition with inclusive bounds: `RepMinMax(min, max, rule)`.
pub(crate) struct RepMinMax<R>(pub usize, pub usize, pub R);
impl<R: Rule> Rule for RepMinMax<R> {
    fn try_match(&self, c: &mut Cursor<'_>, ctx: &mut Ctx) -> MatchResult {
        let save = *c;
        let mark = ctx.mark();
        let mut count = 0;
        while count < self.1 {
            let before = c.pos();
            if !self.2.try_match(c, ctx)? || c.pos() == before {
                break;
            }
            count += 1;
        }
        if count >= self.0 {
            Ok(true)
        } else {
            *c = save;
            ctx.rollback(mark);
            Ok(false)
        }
    }
}

/// Positive lookahead: succeeds iff the inner rule matches, consuming
/// nothing and emitting nothing either way.
pub(crate) struct At<R>(pub R);
impl<R: Rule> Rule for At<R> {
    fn try_match(&self, c: &mut Cursor<'_>, ctx: &mut Ctx) -> MatchResult {
        let save = *c;
        let mark = ctx.mark();
        let matched = self.0.try_match(c, ctx)?;
        *c = save;
        ctx.rollback(mark);
        Ok(matched)
    }
}

/// Negative lookahead: succeeds iff the inner rule fails.
pub(crate) struct NotAt<R>(pub R);
impl<R: Rule> Rule for NotAt<R> {
    fn try_match(&self, c: &mut Cursor<'_>, ctx: &mut Ctx) -> MatchResult {
        let save = *c;
        let mark = ctx.mark();
        let matched = self.0.try_match(c, ctx)?;
        *c = save;
        ctx.rollback(mark);
        Ok(!matched)
    }
}

/// Commits to the inner rule: a soft failure becomes a hard failure
/// reported at the cursor position, described as `expected <1>`.
pub(crate) struct Must<R>(pub R, pub &'static str);
impl<R: Rule> Rule for Must<R> {
    fn try_match(&self, c: &mut Cursor<'_>, ctx: &mut Ctx) -> MatchResult {
        if self.0.try_match(c, ctx)? {
            Ok(true)
        } else {
            Err(CommitError::expected(c.pos(), self.1))
        }
    }
}

/// `IfMust(guard, body, what)`: if the guard matches, the body must
/// follow; failure of the guard is soft, failure of the body is hard.
pub(crate) struct IfMust<G, R>(pub G, pub R, pub &'static str);
impl<G: Rule, R: Rule> Rule for IfMust<G, R> {
    fn try_match(&self, c: &mut Cursor<'_>, ctx: &mut Ctx) -> MatchResult {
        if !self.0.try_match(c, ctx)? {
            return Ok(false);
        }
        Must(&self.1, self.2).try_match(c, ctx)
    }
}

/// Records a token covering whatever the inner rule matched. Tokens
/// emitted by the inner rule's own sub-rules land first, so completion
/// order is child-before-parent.
pub(crate) struct Emit<R>(pub TokenKind, pub R);
impl<R: Rule> Rule for Emit<R> {
    fn try_match(&self, c: &mut Cursor<'_>, ctx: &mut Ctx) -> MatchResult {
        let start = c.pos();
        if self.1.try_match(c, ctx)? {
            ctx.emit(self.0, c.source(), start, c.pos());
            Ok(true)
        } else {
            Ok(false)
        }
    }
}

/// A single-byte symbol that is its own token, e.g. `Sym(b',', Comma)`.
pub(crate) struct Sym(pub u8, pub TokenKind);
impl Rule for Sym {
    fn try_match(&self, c: &mut Cursor<'_>, ctx: &mut Ctx) -> MatchResult {
        let start = c.pos();
        if c.eat(self.0) {
            ctx.note(c.pos());
            ctx.emit(self.1, c.source(), start, c.pos());
            Ok(true)
        } else {
            Ok(false)
        }
    }
}
