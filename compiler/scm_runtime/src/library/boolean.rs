//! Boolean library: `true`, `false`, `not`, `boolean?`, `boolean=?` and the
//! equivalence predicates.

use super::args::bool_arg;
use super::Library;
use crate::errors::EvalResult;
use crate::executor::Executor;
use crate::value::{Arity, Primitive, Value};

pub(super) static PRIMITIVES: &[Primitive] = &[
    Primitive::new("not", Arity::exactly(1), not),
    Primitive::new("boolean?", Arity::exactly(1), is_boolean),
    Primitive::new("eq?", Arity::exactly(2), eq),
    Primitive::new("eqv?", Arity::exactly(2), eqv),
    Primitive::new("equal?", Arity::exactly(2), equal),
    Primitive::new("boolean=?", Arity::at_least(2), boolean_eq),
];

/// The named constants.
pub(super) fn bind_constants(library: Library) -> Library {
    library
        .bind("true", Value::Bool(true))
        .bind("false", Value::Bool(false))
}

fn not(_: &mut dyn Executor, args: &[Value]) -> EvalResult {
    Ok(Value::Bool(!args[0].is_true()))
}

fn is_boolean(_: &mut dyn Executor, args: &[Value]) -> EvalResult {
    Ok(Value::Bool(matches!(args[0], Value::Bool(_))))
}

// Immediates carry no identity beyond their value, so `eq?` and `eqv?`
// coincide here.
fn eq(_: &mut dyn Executor, args: &[Value]) -> EvalResult {
    Ok(Value::Bool(args[0].eqv(&args[1])))
}

fn eqv(_: &mut dyn Executor, args: &[Value]) -> EvalResult {
    Ok(Value::Bool(args[0].eqv(&args[1])))
}

fn equal(_: &mut dyn Executor, args: &[Value]) -> EvalResult {
    Ok(Value::Bool(args[0].equal(&args[1])))
}

fn boolean_eq(_: &mut dyn Executor, args: &[Value]) -> EvalResult {
    let first = bool_arg("boolean=?", args, 0)?;
    let mut all_equal = true;
    for i in 1..args.len() {
        all_equal &= bool_arg("boolean=?", args, i)? == first;
    }
    Ok(Value::Bool(all_equal))
}
