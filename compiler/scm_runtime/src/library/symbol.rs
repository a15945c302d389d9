//! Symbol library.

use super::args::{string_arg, symbol_arg};
use crate::errors::{foreign_symbol, EvalResult};
use crate::executor::Executor;
use crate::value::{Arity, Primitive, Value};

pub(super) static PRIMITIVES: &[Primitive] = &[
    Primitive::new("symbol?", Arity::exactly(1), is_symbol),
    Primitive::new("symbol->string", Arity::exactly(1), symbol_to_string),
    Primitive::new("string->symbol", Arity::exactly(1), string_to_symbol),
    Primitive::new("symbol=?", Arity::at_least(2), symbol_eq),
];

fn is_symbol(_: &mut dyn Executor, args: &[Value]) -> EvalResult {
    Ok(Value::Bool(matches!(args[0], Value::Symbol(_))))
}

/// Returns a fresh string each call.
fn symbol_to_string(exec: &mut dyn Executor, args: &[Value]) -> EvalResult {
    let symbol = symbol_arg("symbol->string", args, 0)?;
    match exec.symbols().try_resolve(symbol) {
        Some(name) => Ok(Value::string(name)),
        None => Err(foreign_symbol("symbol->string", symbol)),
    }
}

fn string_to_symbol(exec: &mut dyn Executor, args: &[Value]) -> EvalResult {
    let text = string_arg("string->symbol", args, 0)?;
    Ok(Value::Symbol(exec.symbols().intern(text)))
}

fn symbol_eq(_: &mut dyn Executor, args: &[Value]) -> EvalResult {
    let first = symbol_arg("symbol=?", args, 0)?;
    let mut all_equal = true;
    for i in 1..args.len() {
        all_equal &= symbol_arg("symbol=?", args, i)? == first;
    }
    Ok(Value::Bool(all_equal))
}

#[cfg(test)]
#[allow(clippy::unwrap_used, reason = "tests unwrap expected failures")]
mod tests {
    use super::*;
    use crate::errors::EvalErrorKind;
    use crate::library::testing::Harness;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_symbol_predicate() {
        let mut h = Harness::new();
        let foo = h.sym("foo");
        assert_eq!(h.call(PRIMITIVES, "symbol?", vec![foo]), Ok(Value::Bool(true)));
        assert_eq!(
            h.call(PRIMITIVES, "symbol?", vec![Value::string("foo")]),
            Ok(Value::Bool(false))
        );
    }

    #[test]
    fn test_string_to_symbol_interns() {
        let mut h = Harness::new();
        let made = h
            .call(PRIMITIVES, "string->symbol", vec![Value::string("hello-world")])
            .unwrap();
        assert_eq!(made.as_symbol(), Some(h.symbol("hello-world")));
    }

    #[test]
    fn test_symbol_to_string() {
        let mut h = Harness::new();
        let sym = h.sym("set-car!");
        let text = h.call(PRIMITIVES, "symbol->string", vec![sym]).unwrap();
        assert_eq!(text.as_str(), Some("set-car!"));
        assert_eq!(h.show(&text), "\"set-car!\"");
    }

    #[test]
    fn test_symbol_to_string_foreign_symbol() {
        let mut h = Harness::new();
        let foreign = scm_ir::SymbolTable::new().intern("elsewhere");
        let err = h
            .call(PRIMITIVES, "symbol->string", vec![Value::Symbol(foreign)])
            .unwrap_err();
        assert_eq!(
            err.kind,
            EvalErrorKind::ForeignSymbol {
                name: "symbol->string".to_string(),
                symbol: foreign,
            }
        );
        // Printing never needs the foreign table.
        assert_eq!(h.show(&Value::Symbol(foreign)), foreign.to_string());
    }

    #[test]
    fn test_symbol_eq() {
        let mut h = Harness::new();
        let args = vec![h.sym("a"), h.sym("a"), h.sym("a")];
        assert_eq!(h.call(PRIMITIVES, "symbol=?", args), Ok(Value::Bool(true)));

        let args = vec![h.sym("a"), h.sym("b")];
        assert_eq!(h.call(PRIMITIVES, "symbol=?", args), Ok(Value::Bool(false)));

        let err = h
            .call(PRIMITIVES, "symbol=?", vec![h.sym("a"), Value::string("a")])
            .unwrap_err();
        assert!(matches!(
            err.kind,
            EvalErrorKind::TypeMismatch {
                position: 2,
                expected: "symbol",
                got: "string",
                ..
            }
        ));
    }

    #[test]
    fn test_string_to_symbol_rejects_symbol() {
        let mut h = Harness::new();
        let err = h
            .call(PRIMITIVES, "string->symbol", vec![h.sym("x")])
            .unwrap_err();
        assert!(matches!(err.kind, EvalErrorKind::TypeMismatch { .. }));
    }
}
