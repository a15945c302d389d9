//! Primitive libraries and their installers.
//!
//! Each built-in library is an independent registration unit: a fixed list
//! of `(name, value)` bindings. `init_bool`, `init_char` and friends install
//! one library into a global environment; `Bootstrap` installs several at
//! once and rejects name collisions between them.
//!
//! Installing is idempotent. Primitive descriptors are `static`, and
//! constants and syntax markers are immediates, so a second install defines
//! values `eqv?` to the first.

mod args;
mod boolean;
mod character;
mod error;
mod procedure;
mod symbol;
mod syntax;
#[cfg(test)]
mod testing;

use std::borrow::Cow;
use std::fmt;

use scm_ir::{check_literal_name, TextError};

use crate::environment::Environment;
use crate::value::{Primitive, Value};

/// The built-in libraries.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum LibraryKind {
    /// `procedure?`, `apply`, `map`, `for-each`, `procedure-arity`.
    Procedure,
    /// Character predicates, comparisons and conversions.
    Character,
    /// `error`, `raise` and error-object accessors.
    Error,
    /// Special-form keywords.
    Syntax,
    /// `symbol?`, `symbol->string`, `string->symbol`, `symbol=?`.
    Symbol,
    /// Boolean constants, `not`, `boolean?` and the equivalence predicates.
    Boolean,
}

impl LibraryKind {
    pub const ALL: [LibraryKind; 6] = [
        LibraryKind::Procedure,
        LibraryKind::Character,
        LibraryKind::Error,
        LibraryKind::Syntax,
        LibraryKind::Symbol,
        LibraryKind::Boolean,
    ];

    pub const fn name(self) -> &'static str {
        match self {
            LibraryKind::Procedure => "procedure",
            LibraryKind::Character => "char",
            LibraryKind::Error => "error",
            LibraryKind::Syntax => "syntax",
            LibraryKind::Symbol => "symbol",
            LibraryKind::Boolean => "bool",
        }
    }

    /// Build the library's binding list.
    pub fn library(self) -> Library {
        let library = Library::new(self.name());
        match self {
            LibraryKind::Procedure => library.primitives(procedure::PRIMITIVES),
            LibraryKind::Character => library.primitives(character::PRIMITIVES),
            LibraryKind::Error => library.primitives(error::PRIMITIVES),
            LibraryKind::Syntax => syntax::bind_keywords(library),
            LibraryKind::Symbol => library.primitives(symbol::PRIMITIVES),
            LibraryKind::Boolean => {
                boolean::bind_constants(library).primitives(boolean::PRIMITIVES)
            }
        }
    }
}

impl fmt::Display for LibraryKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Why an installer refused to run.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum InstallError {
    /// A literal binding name failed `check_literal_name`.
    #[error("library `{library}`: invalid name {name:?}: {source}")]
    InvalidName {
        library: String,
        name: String,
        #[source]
        source: TextError,
    },
    /// Installers only define into the top-level frame.
    #[error("library `{library}` must be installed into a global environment")]
    NotGlobal { library: String },
}

/// A named set of bindings installed as one unit.
///
/// Built-in libraries come from `LibraryKind::library`; hosts can build
/// their own and hand them to `Bootstrap::library`.
#[derive(Clone, Debug)]
pub struct Library {
    name: Cow<'static, str>,
    bindings: Vec<(Cow<'static, str>, Value)>,
}

impl Library {
    pub fn new(name: impl Into<Cow<'static, str>>) -> Self {
        Library {
            name: name.into(),
            bindings: Vec::new(),
        }
    }

    /// Add a binding.
    #[must_use]
    pub fn bind(mut self, name: impl Into<Cow<'static, str>>, value: Value) -> Self {
        self.bindings.push((name.into(), value));
        self
    }

    /// Bind every primitive in a static table under its own name.
    #[must_use]
    pub fn primitives(mut self, table: &'static [Primitive]) -> Self {
        self.bindings.extend(
            table
                .iter()
                .map(|prim| (Cow::Borrowed(prim.name()), Value::Primitive(prim))),
        );
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn bindings(&self) -> impl Iterator<Item = (&str, &Value)> + '_ {
        self.bindings
            .iter()
            .map(|(name, value)| (name.as_ref(), value))
    }

    pub fn len(&self) -> usize {
        self.bindings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }

    /// Validate every binding name.
    pub fn check_names(&self) -> Result<(), InstallError> {
        for (name, _) in &self.bindings {
            check_literal_name(name).map_err(|source| InstallError::InvalidName {
                library: self.name.to_string(),
                name: name.to_string(),
                source,
            })?;
        }
        Ok(())
    }

    /// Define every binding into `env`, which must be a global environment.
    ///
    /// Names are validated first, so a rejected library defines nothing.
    /// Returns the number of bindings defined.
    #[tracing::instrument(level = "debug", skip_all, fields(library = %self.name))]
    pub fn install(&self, env: &mut Environment) -> Result<usize, InstallError> {
        if !env.is_global() {
            return Err(InstallError::NotGlobal {
                library: self.name.to_string(),
            });
        }
        self.check_names()?;
        for (name, value) in &self.bindings {
            tracing::trace!(%name, kind = value.type_name(), "define");
            let symbol = env.intern(name);
            env.define(symbol, value.clone());
        }
        tracing::debug!(bindings = self.bindings.len(), "installed");
        Ok(self.bindings.len())
    }
}

/// Install the procedure library.
pub fn init_fun(env: &mut Environment) -> Result<(), InstallError> {
    LibraryKind::Procedure.library().install(env).map(drop)
}

/// Install the character library.
pub fn init_char(env: &mut Environment) -> Result<(), InstallError> {
    LibraryKind::Character.library().install(env).map(drop)
}

/// Install the error library.
pub fn init_error(env: &mut Environment) -> Result<(), InstallError> {
    LibraryKind::Error.library().install(env).map(drop)
}

/// Install the special-form keywords.
pub fn init_syntax(env: &mut Environment) -> Result<(), InstallError> {
    LibraryKind::Syntax.library().install(env).map(drop)
}

/// Install the symbol library.
pub fn init_symbol(env: &mut Environment) -> Result<(), InstallError> {
    LibraryKind::Symbol.library().install(env).map(drop)
}

/// Install the boolean library.
pub fn init_bool(env: &mut Environment) -> Result<(), InstallError> {
    LibraryKind::Boolean.library().install(env).map(drop)
}

#[cfg(test)]
#[allow(clippy::unwrap_used, reason = "tests unwrap expected results")]
mod tests;
