//! Procedure values: built-in primitives and user lambdas.

use std::fmt;

use scm_ir::Symbol;

use super::Value;
use crate::environment::Environment;
use crate::errors::{wrong_arg_count, EvalResult};
use crate::executor::Executor;

/// Number of arguments a procedure accepts.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Arity {
    pub min: usize,
    /// `None` for variadic procedures.
    pub max: Option<usize>,
}

impl Arity {
    /// Exactly `n` arguments.
    pub const fn exactly(n: usize) -> Self {
        Arity {
            min: n,
            max: Some(n),
        }
    }

    /// `n` or more arguments.
    pub const fn at_least(n: usize) -> Self {
        Arity { min: n, max: None }
    }

    /// Between `min` and `max` arguments, inclusive.
    pub const fn between(min: usize, max: usize) -> Self {
        Arity {
            min,
            max: Some(max),
        }
    }

    /// Whether a call with `count` arguments is allowed.
    #[inline]
    pub fn accepts(self, count: usize) -> bool {
        match self.max {
            Some(max) => (self.min..=max).contains(&count),
            None => count >= self.min,
        }
    }
}

impl fmt::Display for Arity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.max {
            Some(max) if max == self.min => write!(f, "{max}"),
            Some(max) => write!(f, "{} to {max}", self.min),
            None => write!(f, "at least {}", self.min),
        }
    }
}

/// Native implementation of a primitive.
///
/// Arguments are already counted against the primitive's `Arity` when this
/// runs.
pub type PrimitiveFn = fn(&mut dyn Executor, &[Value]) -> EvalResult;

/// A built-in procedure.
///
/// Libraries keep their primitives in `static` tables and bind
/// `Value::Primitive(&TABLE[i])`, so a primitive's identity is its address
/// and re-installing a library binds the very same descriptor.
pub struct Primitive {
    name: &'static str,
    arity: Arity,
    func: PrimitiveFn,
}

impl Primitive {
    pub const fn new(name: &'static str, arity: Arity, func: PrimitiveFn) -> Self {
        Primitive { name, arity, func }
    }

    #[inline]
    pub fn name(&self) -> &'static str {
        self.name
    }

    #[inline]
    pub fn arity(&self) -> Arity {
        self.arity
    }

    /// Check the argument count, then run the primitive.
    pub fn call(&self, exec: &mut dyn Executor, args: &[Value]) -> EvalResult {
        if !self.arity.accepts(args.len()) {
            return Err(wrong_arg_count(self.name, self.arity, args.len()));
        }
        (self.func)(exec, args)
    }
}

impl fmt::Debug for Primitive {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Primitive")
            .field("name", &self.name)
            .field("arity", &self.arity)
            .finish_non_exhaustive()
    }
}

/// A user-defined procedure, created by the evaluator's `lambda` form.
///
/// The runtime only stores and identifies lambdas; applying one is the
/// evaluator's job (`Executor::call_lambda`).
pub struct Lambda {
    /// Required parameters, in order.
    pub params: Vec<Symbol>,
    /// Parameter receiving surplus arguments as a list.
    pub rest: Option<Symbol>,
    /// Body datum, as read.
    pub body: Value,
    /// Frame the lambda closes over.
    pub env: Environment,
    /// Name given by `define`, if any.
    pub name: Option<Symbol>,
}

impl Lambda {
    pub fn arity(&self) -> Arity {
        if self.rest.is_some() {
            Arity::at_least(self.params.len())
        } else {
            Arity::exactly(self.params.len())
        }
    }
}

// The captured environment is left out: it usually binds this lambda.
impl fmt::Debug for Lambda {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Lambda")
            .field("params", &self.params)
            .field("rest", &self.rest)
            .field("name", &self.name)
            .field("body", &self.body)
            .finish_non_exhaustive()
    }
}
