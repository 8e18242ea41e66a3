//! Grammar productions: how tokens compose into formulas.
//!
//! The layering mirrors how Excel writes formulas into files. A root
//! formula is `=body`, `{=body}`, a bare body, or nothing but spaces.
//! The body is a flat expression grammar — operator precedence is the
//! consumer's concern, the parser only certifies that a valid operator
//! token sits between valid operands. References form their own
//! sub-grammar because `:`, `,` and runs of spaces combine them into
//! ranges, unions, and intersections.

use super::{Ctx, Cursor, MatchResult, Rule};
use super::{
    At, Emit, Eof, IfMust, Must, One, Opt, RawName, RawSingleQuoted, RepMinMax, Seq, Sor, Star,
    Sym,
};
use super::{
    BoolTok, CellTok, ErrorTok, ExcelFunctionTok, FileIndexTok, HRangeTok, IntersectOpTok,
    NamedRangeTok, NumberTok, QuotedSheetPrefixTok, RefErrorTok, RefFunctionNameTok,
    ReservedNameTok, SpacesTok, SrColumnTok, SrSelectorTok, TextTok, UdfNameTok,
    UnquotedSheetPrefixTok, VRangeTok,
};
use crate::TokenKind;

/// The root rule: an entire formula string, to end of input.
pub(crate) struct FormulaRoot;
impl Rule for FormulaRoot {
    fn try_match(&self, c: &mut Cursor<'_>, ctx: &mut Ctx) -> MatchResult {
        Seq((
            Sor((FormulaWithEq, ArrayFormula, FormulaBody, SpacesTok)),
            Eof,
        ))
        .try_match(c, ctx)
    }
}

/// `= body`, the usual stored form.
pub(crate) struct FormulaWithEq;
impl Rule for FormulaWithEq {
    fn try_match(&self, c: &mut Cursor<'_>, ctx: &mut Ctx) -> MatchResult {
        Seq((Sym(b'=', TokenKind::Eq), FormulaBody)).try_match(c, ctx)
    }
}

/// `{= body}`, the stored form of a legacy array formula.
pub(crate) struct ArrayFormula;
impl Rule for ArrayFormula {
    fn try_match(&self, c: &mut Cursor<'_>, ctx: &mut Ctx) -> MatchResult {
        Seq((
            Sym(b'{', TokenKind::OpenCurly),
            Sym(b'=', TokenKind::Eq),
            FormulaBody,
            Must(Sym(b'}', TokenKind::CloseCurly), "closing brace"),
        ))
        .try_match(c, ctx)
    }
}

/// An expression: a parenthesized body, a prefixed body, or an atom
/// with optional postfix/infix tails.
pub(crate) struct FormulaBody;
impl Rule for FormulaBody {
    fn try_match(&self, c: &mut Cursor<'_>, ctx: &mut Ctx) -> MatchResult {
        Sor((
            Seq((
                Sym(b'(', TokenKind::OpenParen),
                FormulaBody,
                Sym(b')', TokenKind::CloseParen),
                Opt(Seq((InfixOpTok, FormulaBody))),
            )),
            Seq((PrefixOpTok, FormulaBody)),
            Seq((
                Formula,
                Opt(Sor((
                    Seq((PostfixOpTok, Opt(Seq((InfixOpTok, FormulaBody))))),
                    Star(Seq((InfixOpTok, FormulaBody))),
                ))),
            )),
        ))
        .try_match(c, ctx)
    }
}

/// An atomic formula. Priority order is what disambiguates the
/// overlapping classes: constants shadow references, built-in calls
/// shadow user-defined ones, and everything reference-like is last.
pub(crate) struct Formula;
impl Rule for Formula {
    fn try_match(&self, c: &mut Cursor<'_>, ctx: &mut Ctx) -> MatchResult {
        Sor((
            ConstantArray,
            Constant,
            ReservedNameTok,
            FunctionCall,
            References,
        ))
        .try_match(c, ctx)
    }
}

/// A literal constant.
pub(crate) struct Constant;
impl Rule for Constant {
    fn try_match(&self, c: &mut Cursor<'_>, ctx: &mut Ctx) -> MatchResult {
        Sor((NumberTok, TextTok, BoolTok, ErrorTok)).try_match(c, ctx)
    }
}

/// A built-in function call. The function token carries its own `(`.
pub(crate) struct FunctionCall;
impl Rule for FunctionCall {
    fn try_match(&self, c: &mut Cursor<'_>, ctx: &mut Ctx) -> MatchResult {
        Seq((
            ExcelFunctionTok,
            Opt(Arguments),
            Sym(b')', TokenKind::CloseParen),
        ))
        .try_match(c, ctx)
    }
}

/// A possibly-empty argument list. Every comma commits to a following
/// argument, which may itself be empty (`SUM(,A1,)` has three).
pub(crate) struct Arguments;
impl Rule for Arguments {
    fn try_match(&self, c: &mut Cursor<'_>, ctx: &mut Ctx) -> MatchResult {
        if At(One(b')')).try_match(c, ctx)? {
            return Ok(true);
        }
        if !Argument.try_match(c, ctx)? {
            return Ok(false);
        }
        Star(IfMust(
            Sym(b',', TokenKind::Comma),
            Seq((SpacesTok, Argument)),
            "argument after comma",
        ))
        .try_match(c, ctx)
    }
}

/// One argument: empty if the next character ends or continues the
/// list, otherwise a full formula body.
pub(crate) struct Argument;
impl Rule for Argument {
    fn try_match(&self, c: &mut Cursor<'_>, ctx: &mut Ctx) -> MatchResult {
        Sor((At(Sor((One(b','), One(b')')))), FormulaBody)).try_match(c, ctx)
    }
}

/// `+` or `-` before an expression.
pub(crate) struct PrefixOpTok;
impl Rule for PrefixOpTok {
    fn try_match(&self, c: &mut Cursor<'_>, ctx: &mut Ctx) -> MatchResult {
        Sor((
            Sym(b'+', TokenKind::Plus),
            Sym(b'-', TokenKind::Minus),
        ))
        .try_match(c, ctx)
    }
}

/// `%` after an expression.
pub(crate) struct PostfixOpTok;
impl Rule for PostfixOpTok {
    fn try_match(&self, c: &mut Cursor<'_>, ctx: &mut Ctx) -> MatchResult {
        Sym(b'%', TokenKind::Percent).try_match(c, ctx)
    }
}

// Two-character operators sit before their one-character prefixes so
// the alternation stays longest-first.
const INFIX_OPS: &[(&str, TokenKind)] = &[
    ("^", TokenKind::Exp),
    ("*", TokenKind::Mul),
    ("/", TokenKind::Div),
    ("+", TokenKind::Plus),
    ("-", TokenKind::Minus),
    ("&", TokenKind::Concat),
    ("<>", TokenKind::Neq),
    (">=", TokenKind::Gte),
    ("<=", TokenKind::Lte),
    (">", TokenKind::Gt),
    ("=", TokenKind::Eq),
    ("<", TokenKind::Lt),
];

/// A binary operator, with optional spaces on both sides.
pub(crate) struct InfixOpTok;
impl Rule for InfixOpTok {
    fn try_match(&self, c: &mut Cursor<'_>, ctx: &mut Ctx) -> MatchResult {
        let save = *c;
        let mark = ctx.mark();
        SpacesTok.try_match(c, ctx)?;
        let start = c.pos();
        for &(op, kind) in INFIX_OPS {
            if c.eat_str(op) {
                ctx.note(c.pos());
                ctx.emit(kind, c.source(), start, c.pos());
                SpacesTok.try_match(c, ctx)?;
                return Ok(true);
            }
        }
        *c = save;
        ctx.rollback(mark);
        Ok(false)
    }
}

/// One or more references joined by `:` (range) or by a run of spaces
/// (intersection). The separator can be empty, so the loop stops as
/// soon as an iteration makes no progress.
pub(crate) struct References;
impl Rule for References {
    fn try_match(&self, c: &mut Cursor<'_>, ctx: &mut Ctx) -> MatchResult {
        if !Reference.try_match(c, ctx)? {
            return Ok(false);
        }
        loop {
            let save = *c;
            let mark = ctx.mark();
            let before = c.pos();
            Sor((Sym(b':', TokenKind::Colon), IntersectOpTok)).try_match(c, ctx)?;
            if !Reference.try_match(c, ctx)? || c.pos() == before {
                *c = save;
                ctx.rollback(mark);
                return Ok(true);
            }
        }
    }
}

/// A single reference.
pub(crate) struct Reference;
impl Rule for Reference {
    fn try_match(&self, c: &mut Cursor<'_>, ctx: &mut Ctx) -> MatchResult {
        Sor((
            ReferenceFunctionCall,
            DynamicDataExchange,
            Seq((
                Sym(b'(', TokenKind::OpenParen),
                Reference,
                Sym(b')', TokenKind::CloseParen),
            )),
            Seq((RefPrefix, ReferenceItem)),
            ReferenceItem,
        ))
        .try_match(c, ctx)
    }
}

/// A parenthesized union, or a call of a reference-producing function.
pub(crate) struct ReferenceFunctionCall;
impl Rule for ReferenceFunctionCall {
    fn try_match(&self, c: &mut Cursor<'_>, ctx: &mut Ctx) -> MatchResult {
        Sor((
            Seq((
                Sym(b'(', TokenKind::OpenParen),
                Union,
                Sym(b')', TokenKind::CloseParen),
            )),
            Seq((
                RefFunctionNameTok,
                Opt(Arguments),
                Sym(b')', TokenKind::CloseParen),
            )),
        ))
        .try_match(c, ctx)
    }
}

/// Two or more references separated by commas; each comma commits to a
/// following reference.
pub(crate) struct Union;
impl Rule for Union {
    fn try_match(&self, c: &mut Cursor<'_>, ctx: &mut Ctx) -> MatchResult {
        Seq((
            Reference,
            Sym(b',', TokenKind::Comma),
            Must(Reference, "reference after comma"),
            Star(IfMust(
                Sym(b',', TokenKind::Comma),
                Reference,
                "reference after comma",
            )),
        ))
        .try_match(c, ctx)
    }
}

/// The reference atoms. `Cell` is first because it syntactically
/// shadows the front of a name; its trailing lookahead makes it fall
/// through to `NamedRangeTok` for things like `A1A1`.
pub(crate) struct ReferenceItem;
impl Rule for ReferenceItem {
    fn try_match(&self, c: &mut Cursor<'_>, ctx: &mut Ctx) -> MatchResult {
        Sor((
            CellTok,
            VRangeTok,
            HRangeTok,
            RefErrorTok,
            UdFunctionCall,
            StructuredReference,
            NamedRangeTok,
        ))
        .try_match(c, ctx)
    }
}

/// A user-defined function call.
pub(crate) struct UdFunctionCall;
impl Rule for UdFunctionCall {
    fn try_match(&self, c: &mut Cursor<'_>, ctx: &mut Ctx) -> MatchResult {
        Seq((UdfNameTok, Opt(Arguments), Sym(b')', TokenKind::CloseParen))).try_match(c, ctx)
    }
}

/// `[N]!'application|topic'` — a link to another running application.
pub(crate) struct DynamicDataExchange;
impl Rule for DynamicDataExchange {
    fn try_match(&self, c: &mut Cursor<'_>, ctx: &mut Ctx) -> MatchResult {
        Seq((
            FileIndexTok,
            Sym(b'!', TokenKind::Bang),
            Emit(TokenKind::DynamicDataExchange, RawSingleQuoted),
        ))
        .try_match(c, ctx)
    }
}

/// What can stand before a reference item: a quoted sheet prefix
/// (possibly with an embedded file index), a file index followed by a
/// bang or an unquoted sheet prefix, or an unquoted sheet prefix
/// alone.
pub(crate) struct RefPrefix;
impl Rule for RefPrefix {
    fn try_match(&self, c: &mut Cursor<'_>, ctx: &mut Ctx) -> MatchResult {
        Sor((
            QuotedSheetPrefixTok,
            Seq((
                FileIndexTok,
                Sor((Sym(b'!', TokenKind::Bang), UnquotedSheetPrefixTok)),
            )),
            UnquotedSheetPrefixTok,
        ))
        .try_match(c, ctx)
    }
}

/// One bracketed element of a structured reference: a column, a name,
/// or a `#` item selector.
pub(crate) struct SrElement;
impl Rule for SrElement {
    fn try_match(&self, c: &mut Cursor<'_>, ctx: &mut Ctx) -> MatchResult {
        let open = || Sym(b'[', TokenKind::OpenSquare);
        let close = || Sym(b']', TokenKind::CloseSquare);
        Sor((
            Seq((open(), SrSelectorTok, close())),
            Seq((open(), SrColumnTok, close())),
            Seq((open(), Emit(TokenKind::StructuredRef, RawName), close())),
        ))
        .try_match(c, ctx)
    }
}

/// Inside a table's outer brackets: one to four elements separated by
/// `:` or `,`.
pub(crate) struct SrExpression;
impl Rule for SrExpression {
    fn try_match(&self, c: &mut Cursor<'_>, ctx: &mut Ctx) -> MatchResult {
        Seq((
            SrElement,
            RepMinMax(
                0,
                3,
                Seq((
                    Sor((Sym(b':', TokenKind::Colon), Sym(b',', TokenKind::Comma))),
                    SrElement,
                )),
            ),
        ))
        .try_match(c, ctx)
    }
}

/// A structured (table) reference: `[Col]`, `[[Col]]`, `T[Col]`,
/// `T[]`, or `T[...]` with a bracketed expression.
pub(crate) struct StructuredReference;
impl Rule for StructuredReference {
    fn try_match(&self, c: &mut Cursor<'_>, ctx: &mut Ctx) -> MatchResult {
        let table = || Emit(TokenKind::NamedRange, RawName);
        let open = || Sym(b'[', TokenKind::OpenSquare);
        let close = || Sym(b']', TokenKind::CloseSquare);
        Sor((
            SrElement,
            Seq((open(), SrElement, close())),
            Seq((table(), SrElement)),
            Seq((table(), open(), close())),
            Seq((table(), open(), SrExpression, close())),
        ))
        .try_match(c, ctx)
    }
}

/// `{…}` array literal: rows of constants, `,` between columns and
/// `;` between rows. Rows may be jagged; checking widths is left to
/// the consumer.
pub(crate) struct ConstantArray;
impl Rule for ConstantArray {
    fn try_match(&self, c: &mut Cursor<'_>, ctx: &mut Ctx) -> MatchResult {
        Seq((
            Sym(b'{', TokenKind::OpenCurly),
            ArrayColumns,
            Must(Sym(b'}', TokenKind::CloseCurly), "closing brace"),
        ))
        .try_match(c, ctx)
    }
}

pub(crate) struct ArrayColumns;
impl Rule for ArrayColumns {
    fn try_match(&self, c: &mut Cursor<'_>, ctx: &mut Ctx) -> MatchResult {
        Seq((
            ArrayRows,
            Star(IfMust(
                Sym(b';', TokenKind::Semicolon),
                ArrayRows,
                "array row after semicolon",
            )),
        ))
        .try_match(c, ctx)
    }
}

pub(crate) struct ArrayRows;
impl Rule for ArrayRows {
    fn try_match(&self, c: &mut Cursor<'_>, ctx: &mut Ctx) -> MatchResult {
        Seq((
            ArrayConstant,
            Star(IfMust(
                Sym(b',', TokenKind::Comma),
                ArrayConstant,
                "array element after comma",
            )),
        ))
        .try_match(c, ctx)
    }
}

pub(crate) struct ArrayConstant;
impl Rule for ArrayConstant {
    fn try_match(&self, c: &mut Cursor<'_>, ctx: &mut Ctx) -> MatchResult {
        Sor((Constant, Seq((PrefixOpTok, NumberTok)), RefErrorTok)).try_match(c, ctx)
    }
}
