//! Error library: building, signaling and inspecting error objects.
//!
//! Signaling is an `Err(EvalError)` of kind `Raised` whose payload is the
//! raised object. The evaluator's handlers get it back through
//! `EvalError::raised_value`.

use super::args::condition_arg;
use crate::errors::{raised, EvalResult};
use crate::executor::Executor;
use crate::value::{Arity, Condition, Primitive, Value};

pub(super) static PRIMITIVES: &[Primitive] = &[
    Primitive::new("error", Arity::at_least(1), error),
    Primitive::new("raise", Arity::exactly(1), raise),
    Primitive::new("error-object?", Arity::exactly(1), is_error_object),
    Primitive::new("error-object-message", Arity::exactly(1), error_object_message),
    Primitive::new("error-object-irritants", Arity::exactly(1), error_object_irritants),
    Primitive::new("make-condition", Arity::at_least(1), make_condition),
];

/// `(error message irritant ...)`
fn error(exec: &mut dyn Executor, args: &[Value]) -> EvalResult {
    let condition = build_condition(exec, args);
    let message = describe(exec, &condition);
    Err(raised(message, Value::condition(condition)))
}

/// `(raise obj)`: signal any object, not only error objects.
fn raise(exec: &mut dyn Executor, args: &[Value]) -> EvalResult {
    let payload = args[0].clone();
    let message = match payload.as_condition() {
        Some(condition) => describe(exec, condition),
        None => format!(
            "uncaught raise: {}",
            payload.write_with(exec.symbols())
        ),
    };
    Err(raised(message, payload))
}

fn is_error_object(_: &mut dyn Executor, args: &[Value]) -> EvalResult {
    Ok(Value::Bool(matches!(args[0], Value::Condition(_))))
}

fn error_object_message(_: &mut dyn Executor, args: &[Value]) -> EvalResult {
    let condition = condition_arg("error-object-message", args, 0)?;
    Ok(Value::string(condition.message()))
}

fn error_object_irritants(_: &mut dyn Executor, args: &[Value]) -> EvalResult {
    let condition = condition_arg("error-object-irritants", args, 0)?;
    Ok(Value::list(condition.irritants().to_vec()))
}

/// Same arguments as `error`, but returns the object instead of signaling.
fn make_condition(exec: &mut dyn Executor, args: &[Value]) -> EvalResult {
    Ok(Value::condition(build_condition(exec, args)))
}

/// A string message is taken as-is; any other datum is written out.
fn build_condition(exec: &dyn Executor, args: &[Value]) -> Condition {
    let message = match args[0].as_str() {
        Some(text) => text.to_string(),
        None => args[0].write_with(exec.symbols()),
    };
    Condition::new(message, args[1..].to_vec())
}

/// Message followed by the written irritants.
fn describe(exec: &dyn Executor, condition: &Condition) -> String {
    let mut text = condition.message().to_string();
    for irritant in condition.irritants() {
        text.push(' ');
        text.push_str(&irritant.write_with(exec.symbols()));
    }
    text
}

#[cfg(test)]
#[allow(clippy::unwrap_used, reason = "tests unwrap expected failures")]
mod tests {
    use super::*;
    use crate::errors::EvalErrorKind;
    use crate::library::testing::Harness;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_error_signals_condition() {
        let mut h = Harness::new();
        let err = h
            .call(
                PRIMITIVES,
                "error",
                vec![Value::string("bad thing:"), Value::Int(42), h.sym("foo")],
            )
            .unwrap_err();

        assert_eq!(
            err.kind,
            EvalErrorKind::Raised {
                message: "bad thing: 42 foo".to_string()
            }
        );
        let payload = err.raised_value().unwrap();
        let condition = payload.as_condition().unwrap();
        assert_eq!(condition.message(), "bad thing:");
        assert_eq!(condition.irritants(), &[Value::Int(42), h.sym("foo")]);
    }

    #[test]
    fn test_error_with_symbol_message() {
        let mut h = Harness::new();
        let err = h
            .call(PRIMITIVES, "error", vec![h.sym("my-proc"), Value::string("oops")])
            .unwrap_err();
        assert_eq!(err.to_string(), "my-proc \"oops\"");
    }

    #[test]
    fn test_raise_any_object() {
        let mut h = Harness::new();
        let err = h.call(PRIMITIVES, "raise", vec![Value::Int(7)]).unwrap_err();
        assert_eq!(err.raised_value(), Some(&Value::Int(7)));
        assert_eq!(err.to_string(), "uncaught raise: 7");
    }

    #[test]
    fn test_make_condition_and_accessors() {
        let mut h = Harness::new();
        let condition = h
            .call(
                PRIMITIVES,
                "make-condition",
                vec![Value::string("msg"), Value::Char('c')],
            )
            .unwrap();

        assert_eq!(
            h.call(PRIMITIVES, "error-object?", vec![condition.clone()]),
            Ok(Value::Bool(true))
        );
        assert_eq!(
            h.call(PRIMITIVES, "error-object?", vec![Value::string("msg")]),
            Ok(Value::Bool(false))
        );
        assert_eq!(
            h.call(PRIMITIVES, "error-object-message", vec![condition.clone()]),
            Ok(Value::string("msg"))
        );
        let irritants = h
            .call(PRIMITIVES, "error-object-irritants", vec![condition.clone()])
            .unwrap();
        assert_eq!(h.show(&irritants), "(#\\c)");

        // Raising a built condition reports its message and irritants.
        let err = h.call(PRIMITIVES, "raise", vec![condition]).unwrap_err();
        assert_eq!(err.to_string(), "msg #\\c");
    }

    #[test]
    fn test_accessor_rejects_non_condition() {
        let mut h = Harness::new();
        let err = h
            .call(PRIMITIVES, "error-object-message", vec![Value::Int(1)])
            .unwrap_err();
        assert_eq!(
            err.kind,
            EvalErrorKind::TypeMismatch {
                name: "error-object-message".to_string(),
                position: 1,
                expected: "condition",
                got: "integer",
            }
        );
    }
}
