//! Extraction of A1-style references from mixed text.
//!
//! The scan alternates between reference attempts and three kinds of
//! filler: double-quoted strings, runs of alphanumerics, and runs of
//! everything else. A reference attempt refuses to match when it is
//! followed by more word characters (`A1A` is a word) or by `(`
//! (`LOG10(` is a function, not a cell).

use super::{Ctx, Cursor, MatchResult, Rule};
use super::{
    Alnum, Any, BadColToken, Digit, Emit, Eof, NotAt, One, Opt, Plus, RepMinMax, Seq, Sor, Star,
    TextTok, Upper,
};
use crate::TokenKind;

/// The whole-text rule: `Ref? (NonRef Ref?)*` to end of input.
pub(crate) struct TextRefsRoot;
impl Rule for TextRefsRoot {
    fn try_match(&self, c: &mut Cursor<'_>, ctx: &mut Ctx) -> MatchResult {
        Seq((
            Opt(ProseRef),
            Star(Seq((NonRef, Opt(ProseRef)))),
            Eof,
        ))
        .try_match(c, ctx)
    }
}

/// Anything that is not a reference: quoted text or a filler run.
/// Everything emits `Text` so the stream still covers the input.
struct NonRef;
impl Rule for NonRef {
    fn try_match(&self, c: &mut Cursor<'_>, ctx: &mut Ctx) -> MatchResult {
        Sor((
            TextTok,
            Emit(TokenKind::Text, Plus(Alnum)),
            Emit(TokenKind::Text, Plus(NonWordChar)),
        ))
        .try_match(c, ctx)
    }
}

/// One byte that is neither alphanumeric nor a double quote.
struct NonWordChar;
impl Rule for NonWordChar {
    fn try_match(&self, c: &mut Cursor<'_>, ctx: &mut Ctx) -> MatchResult {
        Seq((NotAt(Sor((Alnum, One(b'"')))), Any)).try_match(c, ctx)
    }
}

struct ProseCol;
impl Rule for ProseCol {
    fn try_match(&self, c: &mut Cursor<'_>, ctx: &mut Ctx) -> MatchResult {
        Seq((NotAt(BadColToken), RepMinMax(1, 3, Upper))).try_match(c, ctx)
    }
}

struct ProseRow;
impl Rule for ProseRow {
    fn try_match(&self, c: &mut Cursor<'_>, ctx: &mut Ctx) -> MatchResult {
        RepMinMax(1, 7, Digit).try_match(c, ctx)
    }
}

/// An A1-style reference in prose: `A1`, `A1:B2`, `A:A`, or `1:1`,
/// with optional `$` anchors throughout. Classified by shape: letters
/// and digits make a `Cell` (including `A1:B2` ranges), letters alone
/// a `VRange`, digits alone an `HRange`.
pub(crate) struct ProseRef;
impl Rule for ProseRef {
    fn try_match(&self, c: &mut Cursor<'_>, ctx: &mut Ctx) -> MatchResult {
        let dollar = || Opt(One(b'$'));
        let start = c.pos();
        let matched = Seq((
            dollar(),
            Sor((
                Seq((
                    ProseCol,
                    Sor((
                        Seq((One(b':'), dollar(), ProseCol)),
                        Seq((
                            dollar(),
                            ProseRow,
                            Opt(Seq((
                                One(b':'),
                                dollar(),
                                ProseCol,
                                dollar(),
                                ProseRow,
                            ))),
                        )),
                    )),
                )),
                Seq((ProseRow, One(b':'), dollar(), ProseRow)),
            )),
            NotAt(Alnum),
            NotAt(One(b'(')),
        ))
        .try_match(c, ctx)?;
        if !matched {
            return Ok(false);
        }
        let lexeme = c.slice_from(start);
        let has_alpha = lexeme.bytes().any(|b| b.is_ascii_alphabetic());
        let has_digit = lexeme.bytes().any(|b| b.is_ascii_digit());
        let kind = match (has_alpha, has_digit) {
            (true, true) => TokenKind::Cell,
            (true, false) => TokenKind::VRange,
            (false, _) => TokenKind::HRange,
        };
        ctx.emit(kind, c.source(), start, c.pos());
        Ok(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[track_caller]
    fn ref_kind(input: &str) -> Option<(TokenKind, String)> {
        let mut c = Cursor::new(input);
        let mut ctx = Ctx::new();
        match ProseRef.try_match(&mut c, &mut ctx) {
            Ok(true) => {
                let t = ctx.into_stream().pop().expect("a ref emits one token");
                Some((t.kind, t.lexeme))
            }
            Ok(false) => None,
            Err(e) => panic!("unexpected hard failure: {e:?}"),
        }
    }

    #[test]
    fn test_ref_shapes() {
        assert_eq!(Some((TokenKind::Cell, "A1".into())), ref_kind("A1"));
        assert_eq!(Some((TokenKind::Cell, "$A$1".into())), ref_kind("$A$1"));
        assert_eq!(Some((TokenKind::Cell, "A1:B2".into())), ref_kind("A1:B2"));
        assert_eq!(Some((TokenKind::VRange, "A:A".into())), ref_kind("A:A"));
        assert_eq!(Some((TokenKind::HRange, "1:1".into())), ref_kind("1:1"));
        assert_eq!(None, ref_kind("A"), "a bare column letter is a word");
        assert_eq!(None, ref_kind("A1A"), "word continues");
        assert_eq!(None, ref_kind("LOG10("), "function call");
        assert_eq!(None, ref_kind("XFE1"), "past the last column");
    }
}
