//! Character library.
//!
//! Comparisons are chained over two or more arguments, as in
//! `(char<? #\a #\b #\c)`. The `-ci` variants compare simple lowercase
//! foldings. Case mappings only apply when the mapping is a single
//! character; otherwise the argument comes back unchanged.

use super::args::{char_arg, int_arg};
use crate::errors::{invalid_char_code, EvalError, EvalResult};
use crate::executor::Executor;
use crate::value::{Arity, Primitive, Value};

pub(super) static PRIMITIVES: &[Primitive] = &[
    Primitive::new("char?", Arity::exactly(1), is_char),
    Primitive::new("char=?", Arity::at_least(2), char_eq),
    Primitive::new("char<?", Arity::at_least(2), char_lt),
    Primitive::new("char>?", Arity::at_least(2), char_gt),
    Primitive::new("char<=?", Arity::at_least(2), char_le),
    Primitive::new("char>=?", Arity::at_least(2), char_ge),
    Primitive::new("char-ci=?", Arity::at_least(2), char_ci_eq),
    Primitive::new("char-ci<?", Arity::at_least(2), char_ci_lt),
    Primitive::new("char-ci>?", Arity::at_least(2), char_ci_gt),
    Primitive::new("char-ci<=?", Arity::at_least(2), char_ci_le),
    Primitive::new("char-ci>=?", Arity::at_least(2), char_ci_ge),
    Primitive::new("char-alphabetic?", Arity::exactly(1), is_alphabetic),
    Primitive::new("char-numeric?", Arity::exactly(1), is_numeric),
    Primitive::new("char-whitespace?", Arity::exactly(1), is_whitespace),
    Primitive::new("char-upper-case?", Arity::exactly(1), is_upper_case),
    Primitive::new("char-lower-case?", Arity::exactly(1), is_lower_case),
    Primitive::new("char->integer", Arity::exactly(1), char_to_integer),
    Primitive::new("integer->char", Arity::exactly(1), integer_to_char),
    Primitive::new("char-upcase", Arity::exactly(1), char_upcase),
    Primitive::new("char-downcase", Arity::exactly(1), char_downcase),
];

fn is_char(_: &mut dyn Executor, args: &[Value]) -> EvalResult {
    Ok(Value::Bool(matches!(args[0], Value::Char(_))))
}

// Comparisons

/// Check every argument is a char, then test `ordered` on each adjacent pair.
fn chain(
    name: &str,
    args: &[Value],
    fold: fn(char) -> char,
    ordered: fn(char, char) -> bool,
) -> EvalResult {
    let chars = (0..args.len())
        .map(|i| char_arg(name, args, i).map(fold))
        .collect::<Result<Vec<char>, EvalError>>()?;
    Ok(Value::Bool(chars.windows(2).all(|w| ordered(w[0], w[1]))))
}

fn same(c: char) -> char {
    c
}

fn char_eq(_: &mut dyn Executor, args: &[Value]) -> EvalResult {
    chain("char=?", args, same, |a, b| a == b)
}

fn char_lt(_: &mut dyn Executor, args: &[Value]) -> EvalResult {
    chain("char<?", args, same, |a, b| a < b)
}

fn char_gt(_: &mut dyn Executor, args: &[Value]) -> EvalResult {
    chain("char>?", args, same, |a, b| a > b)
}

fn char_le(_: &mut dyn Executor, args: &[Value]) -> EvalResult {
    chain("char<=?", args, same, |a, b| a <= b)
}

fn char_ge(_: &mut dyn Executor, args: &[Value]) -> EvalResult {
    chain("char>=?", args, same, |a, b| a >= b)
}

fn char_ci_eq(_: &mut dyn Executor, args: &[Value]) -> EvalResult {
    chain("char-ci=?", args, downcase, |a, b| a == b)
}

fn char_ci_lt(_: &mut dyn Executor, args: &[Value]) -> EvalResult {
    chain("char-ci<?", args, downcase, |a, b| a < b)
}

fn char_ci_gt(_: &mut dyn Executor, args: &[Value]) -> EvalResult {
    chain("char-ci>?", args, downcase, |a, b| a > b)
}

fn char_ci_le(_: &mut dyn Executor, args: &[Value]) -> EvalResult {
    chain("char-ci<=?", args, downcase, |a, b| a <= b)
}

fn char_ci_ge(_: &mut dyn Executor, args: &[Value]) -> EvalResult {
    chain("char-ci>=?", args, downcase, |a, b| a >= b)
}

// Classification

fn is_alphabetic(_: &mut dyn Executor, args: &[Value]) -> EvalResult {
    Ok(Value::Bool(char_arg("char-alphabetic?", args, 0)?.is_alphabetic()))
}

fn is_numeric(_: &mut dyn Executor, args: &[Value]) -> EvalResult {
    Ok(Value::Bool(char_arg("char-numeric?", args, 0)?.is_numeric()))
}

fn is_whitespace(_: &mut dyn Executor, args: &[Value]) -> EvalResult {
    Ok(Value::Bool(char_arg("char-whitespace?", args, 0)?.is_whitespace()))
}

fn is_upper_case(_: &mut dyn Executor, args: &[Value]) -> EvalResult {
    Ok(Value::Bool(char_arg("char-upper-case?", args, 0)?.is_uppercase()))
}

fn is_lower_case(_: &mut dyn Executor, args: &[Value]) -> EvalResult {
    Ok(Value::Bool(char_arg("char-lower-case?", args, 0)?.is_lowercase()))
}

// Conversion

fn char_to_integer(_: &mut dyn Executor, args: &[Value]) -> EvalResult {
    let c = char_arg("char->integer", args, 0)?;
    Ok(Value::Int(i64::from(u32::from(c))))
}

fn integer_to_char(_: &mut dyn Executor, args: &[Value]) -> EvalResult {
    let code = int_arg("integer->char", args, 0)?;
    u32::try_from(code)
        .ok()
        .and_then(char::from_u32)
        .map(Value::Char)
        .ok_or_else(|| invalid_char_code(code))
}

fn char_upcase(_: &mut dyn Executor, args: &[Value]) -> EvalResult {
    Ok(Value::Char(upcase(char_arg("char-upcase", args, 0)?)))
}

fn char_downcase(_: &mut dyn Executor, args: &[Value]) -> EvalResult {
    Ok(Value::Char(downcase(char_arg("char-downcase", args, 0)?)))
}

fn upcase(c: char) -> char {
    single(c.to_uppercase()).unwrap_or(c)
}

fn downcase(c: char) -> char {
    single(c.to_lowercase()).unwrap_or(c)
}

/// The mapping's only character, if it has exactly one.
fn single(mut mapping: impl Iterator<Item = char>) -> Option<char> {
    match (mapping.next(), mapping.next()) {
        (Some(c), None) => Some(c),
        _ => None,
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, reason = "tests unwrap expected failures")]
mod tests {
    use super::*;
    use crate::errors::EvalErrorKind;
    use crate::library::testing::Harness;
    use pretty_assertions::assert_eq;

    fn chars(s: &str) -> Vec<Value> {
        s.chars().map(Value::Char).collect()
    }

    #[test]
    fn test_chained_comparisons() {
        let mut h = Harness::new();
        assert_eq!(h.call(PRIMITIVES, "char<?", chars("abc")), Ok(Value::Bool(true)));
        assert_eq!(h.call(PRIMITIVES, "char<?", chars("aba")), Ok(Value::Bool(false)));
        assert_eq!(h.call(PRIMITIVES, "char<=?", chars("aab")), Ok(Value::Bool(true)));
        assert_eq!(h.call(PRIMITIVES, "char>?", chars("cba")), Ok(Value::Bool(true)));
        assert_eq!(h.call(PRIMITIVES, "char>=?", chars("cca")), Ok(Value::Bool(true)));
        assert_eq!(h.call(PRIMITIVES, "char=?", chars("aaa")), Ok(Value::Bool(true)));
        assert_eq!(h.call(PRIMITIVES, "char=?", chars("aA")), Ok(Value::Bool(false)));
    }

    #[test]
    fn test_case_insensitive() {
        let mut h = Harness::new();
        assert_eq!(h.call(PRIMITIVES, "char-ci=?", chars("aA")), Ok(Value::Bool(true)));
        assert_eq!(h.call(PRIMITIVES, "char-ci<?", chars("aB")), Ok(Value::Bool(true)));
        assert_eq!(h.call(PRIMITIVES, "char-ci>?", chars("Ba")), Ok(Value::Bool(true)));
        assert_eq!(h.call(PRIMITIVES, "char-ci<=?", chars("Aa")), Ok(Value::Bool(true)));
        assert_eq!(h.call(PRIMITIVES, "char-ci>=?", chars("aZ")), Ok(Value::Bool(false)));
    }

    #[test]
    fn test_comparison_checks_every_argument() {
        let mut h = Harness::new();
        // The chain fails at the first pair, but the third argument is still
        // type-checked.
        let err = h
            .call(
                PRIMITIVES,
                "char<?",
                vec![Value::Char('b'), Value::Char('a'), Value::Int(1)],
            )
            .unwrap_err();
        assert!(matches!(
            err.kind,
            EvalErrorKind::TypeMismatch { position: 3, .. }
        ));
    }

    #[test]
    fn test_classification() {
        let mut h = Harness::new();
        let yes = Ok(Value::Bool(true));
        let no = Ok(Value::Bool(false));
        assert_eq!(h.call(PRIMITIVES, "char-alphabetic?", chars("q")), yes);
        assert_eq!(h.call(PRIMITIVES, "char-alphabetic?", chars("3")), no);
        assert_eq!(h.call(PRIMITIVES, "char-numeric?", chars("3")), yes);
        assert_eq!(h.call(PRIMITIVES, "char-whitespace?", chars(" ")), yes);
        assert_eq!(h.call(PRIMITIVES, "char-whitespace?", chars("\n")), yes);
        assert_eq!(h.call(PRIMITIVES, "char-upper-case?", chars("Q")), yes);
        assert_eq!(h.call(PRIMITIVES, "char-lower-case?", chars("Q")), no);
        assert_eq!(h.call(PRIMITIVES, "char?", chars("Q")), yes);
        assert_eq!(h.call(PRIMITIVES, "char?", vec![Value::string("Q")]), no);
    }

    #[test]
    fn test_integer_conversion() {
        let mut h = Harness::new();
        assert_eq!(h.call(PRIMITIVES, "char->integer", chars("A")), Ok(Value::Int(65)));
        assert_eq!(
            h.call(PRIMITIVES, "integer->char", vec![Value::Int(955)]),
            Ok(Value::Char('λ'))
        );

        for bad in [-1, 0xD800, 0x11_0000] {
            let err = h
                .call(PRIMITIVES, "integer->char", vec![Value::Int(bad)])
                .unwrap_err();
            assert_eq!(err.kind, EvalErrorKind::InvalidCharCode { code: bad });
        }
    }

    #[test]
    fn test_case_mapping() {
        let mut h = Harness::new();
        assert_eq!(h.call(PRIMITIVES, "char-upcase", chars("a")), Ok(Value::Char('A')));
        assert_eq!(h.call(PRIMITIVES, "char-downcase", chars("A")), Ok(Value::Char('a')));
        assert_eq!(h.call(PRIMITIVES, "char-upcase", chars("1")), Ok(Value::Char('1')));
        // 'ß' upcases to "SS": not a single char, so it is left alone.
        assert_eq!(h.call(PRIMITIVES, "char-upcase", chars("ß")), Ok(Value::Char('ß')));
    }

    #[test]
    fn test_wrong_type() {
        let mut h = Harness::new();
        let err = h
            .call(PRIMITIVES, "char-upcase", vec![Value::Int(3)])
            .unwrap_err();
        assert_eq!(
            err.to_string(),
            "char-upcase: argument 1 must be of type char, got integer"
        );
    }
}
