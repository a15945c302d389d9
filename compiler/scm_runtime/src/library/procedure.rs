//! Procedure library: `procedure?`, `apply`, `map`, `for-each` and
//! `procedure-arity`.
//!
//! Everything that calls back into a procedure goes through
//! `executor::apply`, so lambdas reach the evaluator and primitives get the
//! same arity check as any other call.

use super::args::{list_arg, procedure_arg};
use crate::errors::{wrong_arg_type, EvalError, EvalResult};
use crate::executor::{self, Executor};
use crate::value::{Arity, Primitive, Value};

pub(super) static PRIMITIVES: &[Primitive] = &[
    Primitive::new("procedure?", Arity::exactly(1), is_procedure),
    Primitive::new("apply", Arity::at_least(2), apply),
    Primitive::new("map", Arity::at_least(2), map),
    Primitive::new("for-each", Arity::at_least(2), for_each),
    Primitive::new("procedure-arity", Arity::exactly(1), procedure_arity),
];

fn is_procedure(_: &mut dyn Executor, args: &[Value]) -> EvalResult {
    Ok(Value::Bool(args[0].is_procedure()))
}

/// `(apply proc arg ... list)`
fn apply(exec: &mut dyn Executor, args: &[Value]) -> EvalResult {
    let procedure = procedure_arg("apply", args, 0)?;
    let last = args.len() - 1;
    let mut call_args = args[1..last].to_vec();
    call_args.extend(list_arg("apply", args, last)?);
    executor::apply(exec, procedure, call_args)
}

/// The list arguments of `map`/`for-each`, and the length of the shortest.
fn list_columns(name: &str, args: &[Value]) -> Result<(Vec<Vec<Value>>, usize), EvalError> {
    let lists = (1..args.len())
        .map(|i| list_arg(name, args, i))
        .collect::<Result<Vec<_>, _>>()?;
    let shortest = lists.iter().map(Vec::len).min().unwrap_or(0);
    Ok((lists, shortest))
}

fn map(exec: &mut dyn Executor, args: &[Value]) -> EvalResult {
    let procedure = procedure_arg("map", args, 0)?;
    let (lists, shortest) = list_columns("map", args)?;
    let mut results = Vec::with_capacity(shortest);
    for i in 0..shortest {
        let row = lists.iter().map(|list| list[i].clone()).collect();
        results.push(executor::apply(exec, procedure, row)?);
    }
    Ok(Value::list(results))
}

fn for_each(exec: &mut dyn Executor, args: &[Value]) -> EvalResult {
    let procedure = procedure_arg("for-each", args, 0)?;
    let (lists, shortest) = list_columns("for-each", args)?;
    for i in 0..shortest {
        let row = lists.iter().map(|list| list[i].clone()).collect();
        executor::apply(exec, procedure, row)?;
    }
    Ok(Value::Unspecified)
}

/// `(min . max)`, with `#f` for no maximum.
fn procedure_arity(_: &mut dyn Executor, args: &[Value]) -> EvalResult {
    let arity = match &args[0] {
        Value::Primitive(prim) => prim.arity(),
        Value::Lambda(lambda) => lambda.arity(),
        other => return Err(wrong_arg_type("procedure-arity", 1, "procedure", other)),
    };
    let max = arity.max.map_or(Value::Bool(false), count);
    Ok(Value::cons(count(arity.min), max))
}

fn count(n: usize) -> Value {
    Value::Int(i64::try_from(n).unwrap_or(i64::MAX))
}
