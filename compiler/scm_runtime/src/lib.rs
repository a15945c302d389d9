//! scm runtime - the global environment and built-in libraries.
//!
//! This crate holds what a Scheme reader and evaluator consult at run time:
//! the values they manipulate, the environment that maps symbols to values,
//! and the primitive libraries installed into it before any program runs.
//!
//! # Architecture
//!
//! - `Value`: closed sum of runtime values; heap payloads behind `Heap<T>`
//! - `Environment`: chained binding frames with `define` / `lookup` / `set`
//! - `Executor`: the seam primitives use to call back into the evaluator
//! - `init_fun`, `init_char`, `init_error`, `init_syntax`, `init_symbol`,
//!   `init_bool`: one installer per library
//! - `Bootstrap`: installs a selection of libraries at once, rejecting
//!   name collisions before anything is defined
//!
//! # Example
//!
//! ```text
//! let mut env = Environment::create_global();
//! Bootstrap::new().run(&mut env)?;
//! let not = env.lookup_named("not")?;
//! let mut exec = PrimitiveExecutor::for_env(&env);
//! assert_eq!(apply(&mut exec, &not, vec![Value::Bool(false)])?, Value::Bool(true));
//! ```
//!
//! Values and environments are single-threaded. Only the symbol table may
//! be shared between interpreters.

mod bootstrap;
mod environment;
pub mod errors;
mod executor;
mod library;
mod tracing_setup;
mod value;

pub use bootstrap::{Bootstrap, BootstrapError, BootstrapReport};
pub use environment::Environment;
pub use errors::{EvalError, EvalErrorKind, EvalResult};
pub use executor::{apply, Executor, PrimitiveExecutor};
pub use library::{
    init_bool, init_char, init_error, init_fun, init_symbol, init_syntax, InstallError, Library,
    LibraryKind,
};
pub use tracing_setup::{init_tracing, LOG_ENV};
pub use value::{
    Arity, Condition, Heap, Lambda, Pair, Primitive, PrimitiveFn, SyntaxForm, Value, Written,
};

// Re-export the symbol layer so hosts need only one dependency.
pub use scm_ir::{SharedSymbolTable, Symbol, SymbolLookup, SymbolTable, TableTag, TextError};
