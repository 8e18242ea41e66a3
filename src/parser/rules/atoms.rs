//! Lexical token rules: the terminal patterns of Excel formula syntax.
//!
//! Several of these overlap heavily (a cell reference is a prefix of
//! many names, `TRUE` is a prefix of `TRUEISH`, built-in function
//! names collide with names and cells). Disambiguation is entirely by
//! the grammar's ordered choice plus the trailing lookaheads here, so
//! the exact shape of each rule matters.

use super::{Ctx, Cursor, MatchResult, Rule};
use super::{
    Alnum, Alpha, CharRange, Digit, Emit, Literal, Must, NotAt, NotOne, One, Opt, Plus, RepMinMax,
    Seq, Sor, Star, Upper,
};
use crate::TokenKind;
use crate::functions;

/// Characters that may start a defined name: a letter, `_`, or `\`.
pub(crate) struct NameStartChar;
impl Rule for NameStartChar {
    fn try_match(&self, c: &mut Cursor<'_>, ctx: &mut Ctx) -> MatchResult {
        Sor((Alpha, One(b'_'), One(b'\\'))).try_match(c, ctx)
    }
}

/// Characters that may continue a defined name. Also the set used by
/// the trailing lookaheads of `Cell` and `Bool`: a cell or boolean
/// followed by one of these is really the prefix of a name.
pub(crate) struct NameContinueChar;
impl Rule for NameContinueChar {
    fn try_match(&self, c: &mut Cursor<'_>, ctx: &mut Ctx) -> MatchResult {
        Sor((NameStartChar, Digit, One(b'.'), One(b'?'))).try_match(c, ctx)
    }
}

/// A defined name, without token emission (several rules embed this).
pub(crate) struct RawName;
impl Rule for RawName {
    fn try_match(&self, c: &mut Cursor<'_>, ctx: &mut Ctx) -> MatchResult {
        Seq((NameStartChar, Star(NameContinueChar))).try_match(c, ctx)
    }
}

/// A string that is shaped exactly like a cell reference
/// (`$? letters{1,4} $? digits`, then nothing name-like). Such strings
/// are never valid names, so `NamedRange` refuses them; rows with a
/// leading `0` and columns past `XFD` then fail to parse at all
/// instead of silently becoming names.
pub(crate) struct CellShape;
impl Rule for CellShape {
    fn try_match(&self, c: &mut Cursor<'_>, ctx: &mut Ctx) -> MatchResult {
        Seq((
            Opt(One(b'$')),
            RepMinMax(1, 4, Upper),
            Opt(One(b'$')),
            Plus(Digit),
            NotAt(NameContinueChar),
        ))
        .try_match(c, ctx)
    }
}

/// A name used as a reference.
pub(crate) struct NamedRangeTok;
impl Rule for NamedRangeTok {
    fn try_match(&self, c: &mut Cursor<'_>, ctx: &mut Ctx) -> MatchResult {
        Emit(TokenKind::NamedRange, Seq((NotAt(CellShape), RawName))).try_match(c, ctx)
    }
}

/// `_xlnm.` followed by one or more letters or underscores.
pub(crate) struct ReservedNameTok;
impl Rule for ReservedNameTok {
    fn try_match(&self, c: &mut Cursor<'_>, ctx: &mut Ctx) -> MatchResult {
        Emit(
            TokenKind::ReservedName,
            Seq((Literal("_xlnm."), Plus(Sor((Alpha, One(b'_')))))),
        )
        .try_match(c, ctx)
    }
}

/// Columns past `XFD` do not exist; the column matcher refuses any
/// three-letter prefix in `[X-Z][F-Z][E-Z]`.
pub(crate) struct BadColToken;
impl Rule for BadColToken {
    fn try_match(&self, c: &mut Cursor<'_>, ctx: &mut Ctx) -> MatchResult {
        Seq((
            CharRange(b'X', b'Z'),
            CharRange(b'F', b'Z'),
            CharRange(b'E', b'Z'),
        ))
        .try_match(c, ctx)
    }
}

/// A column label, `A` through `XFD`.
pub(crate) struct ColToken;
impl Rule for ColToken {
    fn try_match(&self, c: &mut Cursor<'_>, ctx: &mut Ctx) -> MatchResult {
        Seq((NotAt(BadColToken), RepMinMax(1, 3, Upper))).try_match(c, ctx)
    }
}

/// A row number; rows start at 1.
pub(crate) struct RowToken;
impl Rule for RowToken {
    fn try_match(&self, c: &mut Cursor<'_>, ctx: &mut Ctx) -> MatchResult {
        Seq((CharRange(b'1', b'9'), Star(Digit))).try_match(c, ctx)
    }
}

/// An A1-style cell reference, optionally `$`-anchored on either axis.
/// The trailing lookahead keeps it from swallowing the front of a name
/// (`A1A1` must not become `Cell Cell`).
pub(crate) struct CellTok;
impl Rule for CellTok {
    fn try_match(&self, c: &mut Cursor<'_>, ctx: &mut Ctx) -> MatchResult {
        Emit(
            TokenKind::Cell,
            Seq((
                Opt(One(b'$')),
                ColToken,
                Opt(One(b'$')),
                RowToken,
                NotAt(NameContinueChar),
            )),
        )
        .try_match(c, ctx)
    }
}

/// A whole-column range such as `A:A` or `$B:$D`.
pub(crate) struct VRangeTok;
impl Rule for VRangeTok {
    fn try_match(&self, c: &mut Cursor<'_>, ctx: &mut Ctx) -> MatchResult {
        Emit(
            TokenKind::VRange,
            Seq((
                Opt(One(b'$')),
                RepMinMax(1, 4, Upper),
                One(b':'),
                Opt(One(b'$')),
                RepMinMax(1, 4, Upper),
            )),
        )
        .try_match(c, ctx)
    }
}

/// A whole-row range such as `1:1` or `$2:$10`.
pub(crate) struct HRangeTok;
impl Rule for HRangeTok {
    fn try_match(&self, c: &mut Cursor<'_>, ctx: &mut Ctx) -> MatchResult {
        Emit(
            TokenKind::HRange,
            Seq((
                Opt(One(b'$')),
                RowToken,
                One(b':'),
                Opt(One(b'$')),
                RowToken,
            )),
        )
        .try_match(c, ctx)
    }
}

/// `TRUE` or `FALSE`, as long as no name continues past it
/// (`TRUEISH` is a name, not a boolean).
pub(crate) struct BoolTok;
impl Rule for BoolTok {
    fn try_match(&self, c: &mut Cursor<'_>, ctx: &mut Ctx) -> MatchResult {
        Emit(
            TokenKind::Bool,
            Seq((
                Sor((Literal("TRUE"), Literal("FALSE"))),
                NotAt(NameContinueChar),
            )),
        )
        .try_match(c, ctx)
    }
}

/// A number: optional sign, integer/decimal body, optional exponent.
pub(crate) struct NumberTok;
impl Rule for NumberTok {
    fn try_match(&self, c: &mut Cursor<'_>, ctx: &mut Ctx) -> MatchResult {
        let sign = || Opt(Sor((One(b'+'), One(b'-'))));
        Emit(
            TokenKind::Number,
            Seq((
                sign(),
                Sor((
                    Seq((One(b'.'), Plus(Digit))),
                    Seq((Plus(Digit), Opt(Seq((One(b'.'), Star(Digit)))))),
                )),
                Opt(Seq((Sor((One(b'e'), One(b'E'))), sign(), Plus(Digit)))),
            )),
        )
        .try_match(c, ctx)
    }
}

/// The error literals that may appear in a formula, `#REF!` excluded.
pub(crate) struct ErrorTok;
impl Rule for ErrorTok {
    fn try_match(&self, c: &mut Cursor<'_>, ctx: &mut Ctx) -> MatchResult {
        Emit(
            TokenKind::Error,
            Sor((
                Literal("#NULL!"),
                Literal("#DIV/0!"),
                Literal("#VALUE!"),
                Literal("#NAME?"),
                Literal("#NUM!"),
                Literal("#N/A"),
            )),
        )
        .try_match(c, ctx)
    }
}

/// `#REF!`, kept apart from the other errors because it can stand
/// where a reference is expected.
pub(crate) struct RefErrorTok;
impl Rule for RefErrorTok {
    fn try_match(&self, c: &mut Cursor<'_>, ctx: &mut Ctx) -> MatchResult {
        Emit(TokenKind::RefError, Literal("#REF!")).try_match(c, ctx)
    }
}

/// A double-quoted string with `""` escapes. Once the opening quote is
/// consumed the closing quote is committed.
pub(crate) struct TextTok;
impl Rule for TextTok {
    fn try_match(&self, c: &mut Cursor<'_>, ctx: &mut Ctx) -> MatchResult {
        let start = c.pos();
        if !c.eat(b'"') {
            return Ok(false);
        }
        ctx.note(c.pos());
        Star(Sor((Literal("\"\""), NotOne(b"\"")))).try_match(c, ctx)?;
        Must(One(b'"'), "closing quote").try_match(c, ctx)?;
        ctx.emit(TokenKind::Text, c.source(), start, c.pos());
        Ok(true)
    }
}

/// A single-quoted string with `''` escapes, without token emission
/// (the enclosing rule decides what the quotes mean). The closing
/// quote is committed, as with `TextTok`.
pub(crate) struct RawSingleQuoted;
impl Rule for RawSingleQuoted {
    fn try_match(&self, c: &mut Cursor<'_>, ctx: &mut Ctx) -> MatchResult {
        if !c.eat(b'\'') {
            return Ok(false);
        }
        ctx.note(c.pos());
        Star(Sor((Literal("''"), NotOne(b"'")))).try_match(c, ctx)?;
        Must(One(b'\''), "closing quote").try_match(c, ctx)?;
        Ok(true)
    }
}

/// `[N]`, Excel's normalized reference to an external workbook,
/// without token emission.
pub(crate) struct RawFileIndex;
impl Rule for RawFileIndex {
    fn try_match(&self, c: &mut Cursor<'_>, ctx: &mut Ctx) -> MatchResult {
        Seq((One(b'['), Plus(Digit), One(b']'))).try_match(c, ctx)
    }
}

/// `[N]` as its own token.
pub(crate) struct FileIndexTok;
impl Rule for FileIndexTok {
    fn try_match(&self, c: &mut Cursor<'_>, ctx: &mut Ctx) -> MatchResult {
        Emit(TokenKind::FileIndex, RawFileIndex).try_match(c, ctx)
    }
}

// Characters that force a sheet name into single quotes.
const SHEET_NAME_FORBIDDEN: &[u8] = b"[]\\/(){}<>+-'*:?=^%;#\"&, !";

/// An unquoted sheet name.
pub(crate) struct NormalSheetName;
impl Rule for NormalSheetName {
    fn try_match(&self, c: &mut Cursor<'_>, ctx: &mut Ctx) -> MatchResult {
        Plus(NotOne(SHEET_NAME_FORBIDDEN)).try_match(c, ctx)
    }
}

/// The inside of a quoted sheet name; `''` is an escaped quote.
pub(crate) struct QuotedSheetName;
impl Rule for QuotedSheetName {
    fn try_match(&self, c: &mut Cursor<'_>, ctx: &mut Ctx) -> MatchResult {
        Star(Sor((NotOne(b"[]\\/'*:?"), Literal("''")))).try_match(c, ctx)
    }
}

/// An unquoted sheet prefix: `Sheet1!` or a sheet range
/// `Sheet1:Sheet3!`, emitted as one `SheetPrefix` token including the
/// terminating `!`.
pub(crate) struct UnquotedSheetPrefixTok;
impl Rule for UnquotedSheetPrefixTok {
    fn try_match(&self, c: &mut Cursor<'_>, ctx: &mut Ctx) -> MatchResult {
        Emit(
            TokenKind::SheetPrefix,
            Seq((
                NormalSheetName,
                Sor((One(b'!'), Seq((One(b':'), NormalSheetName, One(b'!'))))),
            )),
        )
        .try_match(c, ctx)
    }
}

/// A quoted sheet prefix: `'Sheet one'!`, `'[2]Year End'!`, or the
/// sheet-range form `'First:Last'!`. One `SheetPrefix` token covering
/// everything from the opening quote through the `!`; an embedded file
/// index stays inside the lexeme.
pub(crate) struct QuotedSheetPrefixTok;
impl Rule for QuotedSheetPrefixTok {
    fn try_match(&self, c: &mut Cursor<'_>, ctx: &mut Ctx) -> MatchResult {
        Emit(
            TokenKind::SheetPrefix,
            Seq((
                One(b'\''),
                Opt(RawFileIndex),
                QuotedSheetName,
                Sor((
                    Literal("'!"),
                    Seq((One(b':'), QuotedSheetName, Literal("'!"))),
                )),
            )),
        )
        .try_match(c, ctx)
    }
}

fn eat_function_name<'a>(c: &mut Cursor<'a>) -> &'a str {
    let start = c.pos();
    while matches!(c.peek(), Some(b'A'..=b'Z' | b'0'..=b'9' | b'.')) {
        c.bump();
    }
    c.slice_from(start)
}

/// A built-in function name with its opening `(`, as one token. The
/// longest possible name run is read and checked against the table,
/// which is equivalent to a longest-first alternation of all names.
pub(crate) struct ExcelFunctionTok;
impl Rule for ExcelFunctionTok {
    fn try_match(&self, c: &mut Cursor<'_>, ctx: &mut Ctx) -> MatchResult {
        let save = *c;
        let start = c.pos();
        let name = eat_function_name(c);
        if name.is_empty() || !functions::is_builtin(name) || !c.eat(b'(') {
            *c = save;
            return Ok(false);
        }
        ctx.note(c.pos());
        ctx.emit(TokenKind::ExcelFunction, c.source(), start, c.pos());
        Ok(true)
    }
}

/// `IF(`/`CHOOSE(` or `INDEX(`/`OFFSET(`/`INDIRECT(`, emitted as
/// `RefFunction` and `CondRefFunction` respectively.
pub(crate) struct RefFunctionNameTok;
impl Rule for RefFunctionNameTok {
    fn try_match(&self, c: &mut Cursor<'_>, ctx: &mut Ctx) -> MatchResult {
        let save = *c;
        let start = c.pos();
        let name = eat_function_name(c);
        let kind = if functions::is_ref_function(name) {
            TokenKind::RefFunction
        } else if functions::is_cond_ref_function(name) {
            TokenKind::CondRefFunction
        } else {
            *c = save;
            return Ok(false);
        };
        if !c.eat(b'(') {
            *c = save;
            return Ok(false);
        }
        ctx.note(c.pos());
        ctx.emit(kind, c.source(), start, c.pos());
        Ok(true)
    }
}

/// A user-defined function name with its opening `(`: an optional
/// `_xll.` prefix, then word characters. Tried only after the built-in
/// alternations have failed.
pub(crate) struct UdfNameTok;
impl Rule for UdfNameTok {
    fn try_match(&self, c: &mut Cursor<'_>, ctx: &mut Ctx) -> MatchResult {
        Emit(
            TokenKind::UDFName,
            Seq((
                Opt(Literal("_xll.")),
                Plus(Sor((Alnum, One(b'_'), One(b'.')))),
                One(b'('),
            )),
        )
        .try_match(c, ctx)
    }
}

/// A structured-reference column inside brackets: word characters,
/// `_`, or `.`.
pub(crate) struct SrColumnTok;
impl Rule for SrColumnTok {
    fn try_match(&self, c: &mut Cursor<'_>, ctx: &mut Ctx) -> MatchResult {
        Emit(
            TokenKind::StructuredRef,
            Plus(Sor((Alnum, One(b'_'), One(b'.')))),
        )
        .try_match(c, ctx)
    }
}

/// An item selector inside structured-reference brackets, such as
/// `#Headers`, `#Totals`, or `#All`.
pub(crate) struct SrSelectorTok;
impl Rule for SrSelectorTok {
    fn try_match(&self, c: &mut Cursor<'_>, ctx: &mut Ctx) -> MatchResult {
        Emit(TokenKind::StructuredRef, Seq((One(b'#'), Star(Alpha)))).try_match(c, ctx)
    }
}

/// A run of spaces emitted as insignificant padding.
pub(crate) struct SpacesTok;
impl Rule for SpacesTok {
    fn try_match(&self, c: &mut Cursor<'_>, ctx: &mut Ctx) -> MatchResult {
        eat_spaces(c, ctx, TokenKind::Space)
    }
}

/// A run of spaces acting as the reference intersection operator.
pub(crate) struct IntersectOpTok;
impl Rule for IntersectOpTok {
    fn try_match(&self, c: &mut Cursor<'_>, ctx: &mut Ctx) -> MatchResult {
        eat_spaces(c, ctx, TokenKind::Intersect)
    }
}

fn eat_spaces(c: &mut Cursor<'_>, ctx: &mut Ctx, kind: TokenKind) -> MatchResult {
    let start = c.pos();
    while c.eat(b' ') {}
    if c.pos() > start {
        ctx.note(c.pos());
        ctx.emit(kind, c.source(), start, c.pos());
    }
    Ok(true)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[track_caller]
    fn matched<'a>(rule: impl Rule, input: &'a str) -> Option<&'a str> {
        let mut c = Cursor::new(input);
        let mut ctx = Ctx::new();
        match rule.try_match(&mut c, &mut ctx) {
            Ok(true) => Some(c.slice_from(0)),
            Ok(false) => None,
            Err(e) => panic!("unexpected hard failure: {e:?}"),
        }
    }

    #[test]
    fn test_number_shapes() {
        assert_eq!(Some("1"), matched(NumberTok, "1"));
        assert_eq!(Some("1.5"), matched(NumberTok, "1.5"));
        assert_eq!(Some(".5"), matched(NumberTok, ".5"));
        assert_eq!(Some("1."), matched(NumberTok, "1."));
        assert_eq!(Some("-2"), matched(NumberTok, "-2"));
        assert_eq!(Some("+2"), matched(NumberTok, "+2"));
        assert_eq!(Some("6.022e23"), matched(NumberTok, "6.022e23"));
        assert_eq!(Some("1E-10"), matched(NumberTok, "1E-10"));
        assert_eq!(None, matched(NumberTok, "e5"));
        assert_eq!(None, matched(NumberTok, "."));
        // The exponent is optional, so a dangling `e` is left behind.
        assert_eq!(Some("1"), matched(NumberTok, "1e"));
    }

    #[test]
    fn test_cell_shapes() {
        assert_eq!(Some("A1"), matched(CellTok, "A1"));
        assert_eq!(Some("$A$1"), matched(CellTok, "$A$1"));
        assert_eq!(Some("XFD1048576"), matched(CellTok, "XFD1048576"));
        assert_eq!(Some("A1"), matched(CellTok, "A1:B2"), "stops at the colon");
        assert_eq!(None, matched(CellTok, "A0"), "rows start at 1");
        assert_eq!(None, matched(CellTok, "XFE1"), "past the last column");
        assert_eq!(None, matched(CellTok, "A1A1"), "name continuation follows");
        assert_eq!(None, matched(CellTok, "a1"), "columns are uppercase");
    }

    #[test]
    fn test_ranges() {
        assert_eq!(Some("A:A"), matched(VRangeTok, "A:A"));
        assert_eq!(Some("$A:$XFD"), matched(VRangeTok, "$A:$XFD"));
        assert_eq!(None, matched(VRangeTok, "A:1"));
        assert_eq!(Some("1:1"), matched(HRangeTok, "1:1"));
        assert_eq!(Some("$10:$20"), matched(HRangeTok, "$10:$20"));
        assert_eq!(None, matched(HRangeTok, "0:1"));
    }

    #[test]
    fn test_bool_vs_name() {
        assert_eq!(Some("TRUE"), matched(BoolTok, "TRUE"));
        assert_eq!(Some("FALSE"), matched(BoolTok, "FALSE"));
        assert_eq!(None, matched(BoolTok, "TRUEISH"));
        assert_eq!(Some("TRUE"), matched(BoolTok, "TRUE+1"));
    }

    #[test]
    fn test_name_rejects_cell_shapes() {
        assert_eq!(Some("TRUEISH"), matched(NamedRangeTok, "TRUEISH"));
        assert_eq!(Some("A1A1"), matched(NamedRangeTok, "A1A1"));
        assert_eq!(Some("A11B"), matched(NamedRangeTok, "A11B"));
        assert_eq!(Some("A\\"), matched(NamedRangeTok, "A\\"));
        assert_eq!(Some("_Tax.Rate?"), matched(NamedRangeTok, "_Tax.Rate?"));
        assert_eq!(None, matched(NamedRangeTok, "A0"));
        assert_eq!(None, matched(NamedRangeTok, "XFE1"));
        assert_eq!(None, matched(NamedRangeTok, "$A$1"));
        assert_eq!(None, matched(NamedRangeTok, "1name"));
    }

    #[test]
    fn test_text_escapes_and_commit() {
        assert_eq!(Some("\"hi\""), matched(TextTok, "\"hi\""));
        assert_eq!(Some("\"he\"\"llo\""), matched(TextTok, "\"he\"\"llo\""));
        assert_eq!(Some("\"\""), matched(TextTok, "\"\""));

        let mut c = Cursor::new("\"unterminated");
        let mut ctx = Ctx::new();
        let err = TextTok.try_match(&mut c, &mut ctx).expect_err("must commit");
        assert_eq!(13, err.offset);
    }

    #[test]
    fn test_error_literals() {
        for s in ["#NULL!", "#DIV/0!", "#VALUE!", "#NAME?", "#NUM!", "#N/A"] {
            assert_eq!(Some(s), matched(ErrorTok, s));
        }
        assert_eq!(None, matched(ErrorTok, "#REF!"));
        assert_eq!(Some("#REF!"), matched(RefErrorTok, "#REF!"));
        assert_eq!(None, matched(ErrorTok, "#NA!"));
    }

    #[test]
    fn test_sheet_prefixes() {
        assert_eq!(Some("Sheet1!"), matched(UnquotedSheetPrefixTok, "Sheet1!A1"));
        assert_eq!(
            Some("Jan:Dec!"),
            matched(UnquotedSheetPrefixTok, "Jan:Dec!A1")
        );
        assert_eq!(None, matched(UnquotedSheetPrefixTok, "Bad Name!A1"));
        assert_eq!(
            Some("'My Sheet'!"),
            matched(QuotedSheetPrefixTok, "'My Sheet'!A1")
        );
        assert_eq!(
            Some("'[2]Year End'!"),
            matched(QuotedSheetPrefixTok, "'[2]Year End'!A1")
        );
        assert_eq!(
            Some("'It''s'!"),
            matched(QuotedSheetPrefixTok, "'It''s'!A1")
        );
        assert_eq!(
            Some("'First:Last'!"),
            matched(QuotedSheetPrefixTok, "'First:Last'!A1")
        );
    }

    #[test]
    fn test_function_tokens() {
        assert_eq!(Some("SUM("), matched(ExcelFunctionTok, "SUM(A1)"));
        assert_eq!(Some("SUMIFS("), matched(ExcelFunctionTok, "SUMIFS(A1)"));
        assert_eq!(Some("ERROR.TYPE("), matched(ExcelFunctionTok, "ERROR.TYPE(1)"));
        assert_eq!(None, matched(ExcelFunctionTok, "SUM"), "the paren is part of the token");
        assert_eq!(None, matched(ExcelFunctionTok, "SUMX("));
        assert_eq!(None, matched(ExcelFunctionTok, "IF("), "IF is a reference function");

        assert_eq!(Some("IF("), matched(RefFunctionNameTok, "IF(A1,1,2)"));
        assert_eq!(Some("INDEX("), matched(RefFunctionNameTok, "INDEX(A1:B2,1)"));
        assert_eq!(None, matched(RefFunctionNameTok, "IFERROR("));

        assert_eq!(Some("myfunc("), matched(UdfNameTok, "myfunc(1)"));
        assert_eq!(Some("_xll.custom("), matched(UdfNameTok, "_xll.custom(1)"));
    }

    #[test]
    fn test_reserved_name() {
        assert_eq!(
            Some("_xlnm.Print_Area"),
            matched(ReservedNameTok, "_xlnm.Print_Area")
        );
        assert_eq!(None, matched(ReservedNameTok, "_xlnm."));
    }

    #[test]
    fn test_file_index() {
        assert_eq!(Some("[12]"), matched(FileIndexTok, "[12]"));
        assert_eq!(None, matched(FileIndexTok, "[a]"));
        assert_eq!(None, matched(FileIndexTok, "[]"));
    }
}
