//! The seam between primitives and the evaluator.
//!
//! Primitives such as `apply` and `map` must call procedures they were
//! handed, and `string->symbol` must intern. Both go through an `Executor`,
//! which the evaluator implements. `PrimitiveExecutor` covers hosts that
//! only ever apply primitives.

use std::borrow::Cow;

use scm_ir::{SharedSymbolTable, SymbolLookup, SymbolTable};

use crate::environment::Environment;
use crate::errors::{not_callable, requires_evaluator, wrong_arg_count, EvalResult};
use crate::value::{Lambda, Value};

/// Services a primitive may need from whoever is running it.
pub trait Executor {
    /// Table used to intern and spell symbols.
    fn symbols(&self) -> &SymbolTable;

    /// Apply a user lambda. The argument count has already been checked.
    fn call_lambda(&mut self, lambda: &Lambda, args: Vec<Value>) -> EvalResult;
}

/// Apply any procedure value to `args`.
///
/// Primitives run directly after an arity check; lambdas are checked and
/// handed to the executor; anything else is not applicable.
pub fn apply(exec: &mut dyn Executor, procedure: &Value, args: Vec<Value>) -> EvalResult {
    match procedure {
        Value::Primitive(prim) => prim.call(exec, &args),
        Value::Lambda(lambda) => {
            let arity = lambda.arity();
            if !arity.accepts(args.len()) {
                let name = match lambda.name {
                    Some(name) => exec.symbols().spelling(name),
                    None => Cow::Borrowed("#<procedure>"),
                };
                return Err(wrong_arg_count(&name, arity, args.len()));
            }
            exec.call_lambda(lambda, args)
        }
        other => Err(not_callable(other)),
    }
}

/// Executor without an evaluator: primitives only.
///
/// Applying a lambda fails with `RequiresEvaluator`.
#[derive(Clone, Debug)]
pub struct PrimitiveExecutor {
    symbols: SharedSymbolTable,
}

impl PrimitiveExecutor {
    pub fn new(symbols: SharedSymbolTable) -> Self {
        PrimitiveExecutor { symbols }
    }

    /// Executor interning into the same table as `env`.
    pub fn for_env(env: &Environment) -> Self {
        Self::new(env.symbols().clone())
    }
}

impl Executor for PrimitiveExecutor {
    fn symbols(&self) -> &SymbolTable {
        &self.symbols
    }

    fn call_lambda(&mut self, _lambda: &Lambda, _args: Vec<Value>) -> EvalResult {
        Err(requires_evaluator())
    }
}
