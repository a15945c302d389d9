//! Populating a fresh global environment.
//!
//! `Bootstrap` installs several libraries as one step. Every binding is
//! staged first; a name bound by two libraries to values that are not
//! `eqv?` is a collision and nothing gets defined. Only once staging
//! succeeds are the bindings written into the environment, so the outcome
//! does not depend on library order.
//!
//! ```text
//! let mut env = Environment::create_global();
//! Bootstrap::new().run(&mut env)?;                        // all built-ins
//! Bootstrap::empty().with(LibraryKind::Boolean).run(&mut env)?;
//! ```

use rustc_hash::FxHashMap;

use crate::environment::Environment;
use crate::library::{InstallError, Library, LibraryKind};
use crate::value::Value;

/// Why a bootstrap was rejected. Nothing is defined when it fails.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum BootstrapError {
    /// Two libraries bind one name to different values.
    #[error("`{name}` is bound by both library `{first}` and library `{second}`")]
    BindingCollision {
        name: String,
        first: String,
        second: String,
    },
    #[error(transparent)]
    Install(#[from] InstallError),
}

/// What a successful run defined.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BootstrapReport {
    /// Library names, in installation order.
    pub libraries: Vec<String>,
    /// Distinct names defined.
    pub bindings: usize,
}

/// Builder selecting the libraries to install.
///
/// Built-ins are tracked by `LibraryKind`, never by name, so a host library
/// may share a built-in's name without replacing or hiding it. Both are
/// installed and staging decides whether their bindings agree.
#[derive(Clone, Debug)]
pub struct Bootstrap {
    /// `Some` for built-ins, `None` for host libraries.
    libraries: Vec<(Option<LibraryKind>, Library)>,
}

impl Bootstrap {
    /// Every built-in library.
    pub fn new() -> Self {
        Self::empty().only(LibraryKind::ALL)
    }

    /// No libraries at all.
    pub fn empty() -> Self {
        Bootstrap {
            libraries: Vec::new(),
        }
    }

    /// Add a built-in library. Adding one twice has no effect.
    #[must_use]
    pub fn with(mut self, kind: LibraryKind) -> Self {
        if !self.includes(kind) {
            self.libraries.push((Some(kind), kind.library()));
        }
        self
    }

    /// Restrict the built-in libraries to `kinds`. Host libraries added
    /// with `library` are kept.
    #[must_use]
    pub fn only(mut self, kinds: impl IntoIterator<Item = LibraryKind>) -> Self {
        self.libraries.retain(|(kind, _)| kind.is_none());
        kinds.into_iter().fold(self, Bootstrap::with)
    }

    /// Add a host-supplied library.
    #[must_use]
    pub fn library(mut self, library: Library) -> Self {
        self.libraries.push((None, library));
        self
    }

    /// Whether the built-in `kind` is selected.
    pub fn includes(&self, kind: LibraryKind) -> bool {
        self.libraries.iter().any(|(k, _)| *k == Some(kind))
    }

    pub fn library_names(&self) -> impl Iterator<Item = &str> + '_ {
        self.selected().map(Library::name)
    }

    fn selected(&self) -> impl Iterator<Item = &Library> + '_ {
        self.libraries.iter().map(|(_, library)| library)
    }

    /// Stage every selected library, then define the lot into `env`.
    #[tracing::instrument(level = "debug", skip_all, fields(libraries = self.libraries.len()))]
    pub fn run(&self, env: &mut Environment) -> Result<BootstrapReport, BootstrapError> {
        if let Some(first) = self.selected().next() {
            if !env.is_global() {
                return Err(InstallError::NotGlobal {
                    library: first.name().to_string(),
                }
                .into());
            }
        }

        let staged = self.stage()?;
        for (name, value) in &staged {
            tracing::trace!(%name, kind = value.type_name(), "define");
            let symbol = env.intern(name);
            env.define(symbol, (*value).clone());
        }

        let report = BootstrapReport {
            libraries: self.library_names().map(str::to_string).collect(),
            bindings: staged.len(),
        };
        tracing::debug!(bindings = report.bindings, "bootstrapped");
        Ok(report)
    }

    /// Validate names and collect one value per name, in first-seen order.
    fn stage(&self) -> Result<Vec<(&str, &Value)>, BootstrapError> {
        let mut staged: Vec<(&str, &Value)> = Vec::new();
        // name -> (index into `staged`, library that bound it)
        let mut seen: FxHashMap<&str, (usize, &str)> = FxHashMap::default();

        for library in self.selected() {
            library.check_names()?;
            for (name, value) in library.bindings() {
                match seen.get(name) {
                    Some(&(index, first)) => {
                        if !staged[index].1.eqv(value) {
                            tracing::debug!(%name, first, second = library.name(), "collision");
                            return Err(BootstrapError::BindingCollision {
                                name: name.to_string(),
                                first: first.to_string(),
                                second: library.name().to_string(),
                            });
                        }
                    }
                    None => {
                        seen.insert(name, (staged.len(), library.name()));
                        staged.push((name, value));
                    }
                }
            }
        }
        Ok(staged)
    }
}

impl Default for Bootstrap {
    fn default() -> Self {
        Self::new()
    }
}
