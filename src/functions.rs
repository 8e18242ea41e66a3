//! Built-in Excel function names.
//!
//! The grammar treats a built-in function name plus its opening `(` as
//! a single token. Matching reads the longest run of name characters
//! and checks it against these tables, which gives the same result as
//! a longest-first ordered alternation of the names with O(length)
//! lookup.
//!
//! `IF`/`CHOOSE` and `INDEX`/`OFFSET`/`INDIRECT` are deliberately
//! absent from [`BUILTIN_FUNCTIONS`]: they participate in reference
//! expressions and are tokenized as `RefFunction` and
//! `CondRefFunction` respectively.

use std::collections::HashSet;

use lazy_static::lazy_static;

/// Functions whose calls may be used where a reference is expected.
pub const REF_FUNCTIONS: &[&str] = &["IF", "CHOOSE"];

/// Functions whose calls conditionally produce references.
pub const COND_REF_FUNCTIONS: &[&str] = &["INDEX", "OFFSET", "INDIRECT"];

/// All other built-in function names, uppercase, as Excel writes them
/// into files.
pub const BUILTIN_FUNCTIONS: &[&str] = &[
    "ABS", "ACCRINT", "ACCRINTM", "ACOS", "ACOSH", "ADDRESS", "AMORDEGRC", "AMORLINC", "AND",
    "AREAS", "ASC", "ASIN", "ASINH", "ATAN", "ATAN2", "ATANH", "AVEDEV", "AVERAGE", "AVERAGEA",
    "AVERAGEIF", "AVERAGEIFS", "BAHTTEXT", "BESSELI", "BESSELJ", "BESSELK", "BESSELY", "BETADIST",
    "BETAINV", "BIN2DEC", "BIN2HEX", "BIN2OCT", "BINOMDIST", "CALL", "CEILING", "CELL", "CHAR",
    "CHIDIST", "CHIINV", "CHITEST", "CLEAN", "CODE", "COLUMN", "COLUMNS", "COMBIN", "COMPLEX",
    "CONCATENATE", "CONFIDENCE", "CONVERT", "CORREL", "COS", "COSH", "COUNT", "COUNTA",
    "COUNTBLANK", "COUNTIF", "COUNTIFS", "COUPDAYBS", "COUPDAYS", "COUPDAYSNC", "COUPNCD",
    "COUPNUM", "COUPPCD", "COVAR", "CRITBINOM", "CUBEKPIMEMBER", "CUBEMEMBER",
    "CUBEMEMBERPROPERTY", "CUBERANKEDMEMBER", "CUBESET", "CUBESETCOUNT", "CUBEVALUE", "CUMIPMT",
    "CUMPRINC", "DATE", "DATEVALUE", "DAVERAGE", "DAY", "DAYS360", "DB", "DCOUNT", "DCOUNTA",
    "DDB", "DEC2BIN", "DEC2HEX", "DEC2OCT", "DEGREES", "DELTA", "DEVSQ", "DGET", "DISC", "DMAX",
    "DMIN", "DOLLAR", "DOLLARDE", "DOLLARFR", "DPRODUCT", "DSTDEV", "DSTDEVP", "DSUM", "DURATION",
    "DVAR", "DVARP", "EDATE", "EFFECT", "EOMONTH", "ERF", "ERFC", "ERROR.TYPE", "EUROCONVERT",
    "EVEN", "EXACT", "EXP", "EXPONDIST", "FACT", "FACTDOUBLE", "FALSE", "FDIST", "FIND", "FINV",
    "FISHER", "FISHERINV", "FIXED", "FLOOR", "FORECAST", "FREQUENCY", "FTEST", "FV", "FVSCHEDULE",
    "GAMMADIST", "GAMMAINV", "GAMMALN", "GCD", "GEOMEAN", "GESTEP", "GETPIVOTDATA", "GROWTH",
    "HARMEAN", "HEX2BIN", "HEX2DEC", "HEX2OCT", "HLOOKUP", "HOUR", "HYPERLINK", "HYPGEOMDIST",
    "IFERROR", "IMABS", "IMAGINARY", "IMARGUMENT", "IMCONJUGATE", "IMCOS", "IMDIV", "IMEXP",
    "IMLN", "IMLOG10", "IMLOG2", "IMPOWER", "IMPRODUCT", "IMREAL", "IMSIN", "IMSQRT", "IMSUB",
    "IMSUM", "INFO", "INT", "INTERCEPT", "INTRATE", "IPMT", "IRR", "IS", "ISB", "ISBLANK",
    "ISERROR", "ISNA", "ISNUMBER", "ISPMT", "JIS", "KURT", "LARGE", "LCM", "LEFT", "LEFTB", "LEN",
    "LENB", "LINEST", "LN", "LOG", "LOG10", "LOGEST", "LOGINV", "LOGNORMDIST", "LOOKUP", "LOWER",
    "MATCH", "MAX", "MAXA", "MDETERM", "MDURATION", "MEDIAN", "MID", "MIDB", "MIN", "MINA",
    "MINUTE", "MINVERSE", "MIRR", "MMULT", "MOD", "MODE", "MONTH", "MROUND", "MULTINOMIAL", "N",
    "NA", "NEGBINOMDIST", "NETWORKDAYS", "NOMINAL", "NORMDIST", "NORMINV", "NORMSDIST",
    "NORMSINV", "NOT", "NOW", "NPER", "NPV", "OCT2BIN", "OCT2DEC", "OCT2HEX", "ODD", "ODDFPRICE",
    "ODDFYIELD", "ODDLPRICE", "ODDLYIELD", "OR", "PEARSON", "PERCENTILE", "PERCENTRANK", "PERMUT",
    "PHONETIC", "PI", "PMT", "POISSON", "POWER", "PPMT", "PRICE", "PRICEDISC", "PRICEMAT", "PROB",
    "PRODUCT", "PROPER", "PV", "QUARTILE", "QUOTIENT", "RADIANS", "RAND", "RANDBETWEEN", "RANK",
    "RATE", "RECEIVED", "REGISTER.ID", "REPLACE", "REPLACEB", "REPT", "RIGHT", "RIGHTB", "ROMAN",
    "ROUND", "ROUNDDOWN", "ROUNDUP", "ROW", "ROWS", "RSQ", "RTD", "SEARCH", "SEARCHB", "SECOND",
    "SERIESSUM", "SIGN", "SIN", "SINH", "SKEW", "SLN", "SLOPE", "SMALL", "SQL.REQUEST", "SQRT",
    "SQRTPI", "STANDARDIZE", "STDEV", "STDEVA", "STDEVP", "STDEVPA", "STEYX", "SUBSTITUTE",
    "SUBTOTAL", "SUM", "SUMIF", "SUMIFS", "SUMPRODUCT", "SUMSQ", "SUMX2MY2", "SUMX2PY2",
    "SUMXMY2", "SYD", "T", "TAN", "TANH", "TBILLEQ", "TBILLPRICE", "TBILLYIELD", "TDIST", "TEXT",
    "TIME", "TIMEVALUE", "TINV", "TODAY", "TRANSPOSE", "TREND", "TRIM", "TRIMMEAN", "TRUE",
    "TRUNC", "TTEST", "TYPE", "UPPER", "VALUE", "VAR", "VARA", "VARP", "VARPA", "VDB", "VLOOKUP",
    "WEEKDAY", "WEEKNUM", "WEIBULL", "WORKDAY", "XIRR", "XNPV", "YEAR", "YEARFRAC", "YIELD",
    "YIELDDISC", "YIELDMAT", "ZTEST",
];

lazy_static! {
    static ref BUILTIN_SET: HashSet<&'static str> = BUILTIN_FUNCTIONS.iter().copied().collect();
}

/// Whether `name` is a built-in function (excluding the reference and
/// conditional-reference functions).
pub fn is_builtin(name: &str) -> bool {
    BUILTIN_SET.contains(name)
}

/// Whether `name` is one of the reference functions (`IF`, `CHOOSE`).
pub fn is_ref_function(name: &str) -> bool {
    REF_FUNCTIONS.contains(&name)
}

/// Whether `name` is one of the conditional reference functions
/// (`INDEX`, `OFFSET`, `INDIRECT`).
pub fn is_cond_ref_function(name: &str) -> bool {
    COND_REF_FUNCTIONS.contains(&name)
}
