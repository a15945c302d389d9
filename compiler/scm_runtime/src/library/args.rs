//! Argument extraction shared by the primitive libraries.
//!
//! Positions are 0-based here and reported 1-based in errors. Callers rely
//! on `Primitive::call` having checked the argument count.

use crate::errors::{improper_list, wrong_arg_type, EvalError};
use crate::value::{Condition, Value};
use scm_ir::Symbol;

pub(super) fn char_arg(name: &str, args: &[Value], i: usize) -> Result<char, EvalError> {
    args[i]
        .as_char()
        .ok_or_else(|| wrong_arg_type(name, i + 1, "char", &args[i]))
}

pub(super) fn int_arg(name: &str, args: &[Value], i: usize) -> Result<i64, EvalError> {
    args[i]
        .as_int()
        .ok_or_else(|| wrong_arg_type(name, i + 1, "integer", &args[i]))
}

pub(super) fn bool_arg(name: &str, args: &[Value], i: usize) -> Result<bool, EvalError> {
    args[i]
        .as_bool()
        .ok_or_else(|| wrong_arg_type(name, i + 1, "boolean", &args[i]))
}

pub(super) fn symbol_arg(name: &str, args: &[Value], i: usize) -> Result<Symbol, EvalError> {
    args[i]
        .as_symbol()
        .ok_or_else(|| wrong_arg_type(name, i + 1, "symbol", &args[i]))
}

pub(super) fn string_arg<'a>(
    name: &str,
    args: &'a [Value],
    i: usize,
) -> Result<&'a str, EvalError> {
    args[i]
        .as_str()
        .ok_or_else(|| wrong_arg_type(name, i + 1, "string", &args[i]))
}

pub(super) fn condition_arg<'a>(
    name: &str,
    args: &'a [Value],
    i: usize,
) -> Result<&'a Condition, EvalError> {
    args[i]
        .as_condition()
        .ok_or_else(|| wrong_arg_type(name, i + 1, "condition", &args[i]))
}

pub(super) fn procedure_arg<'a>(
    name: &str,
    args: &'a [Value],
    i: usize,
) -> Result<&'a Value, EvalError> {
    if args[i].is_procedure() {
        Ok(&args[i])
    } else {
        Err(wrong_arg_type(name, i + 1, "procedure", &args[i]))
    }
}

pub(super) fn list_arg(name: &str, args: &[Value], i: usize) -> Result<Vec<Value>, EvalError> {
    args[i].list_to_vec().ok_or_else(|| improper_list(name, i + 1))
}
