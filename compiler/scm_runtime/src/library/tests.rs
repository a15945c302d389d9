use super::*;
use crate::errors::EvalErrorKind;
use crate::executor::PrimitiveExecutor;
use crate::value::SyntaxForm;
use pretty_assertions::assert_eq;
use rustc_hash::FxHashSet;

type Installer = fn(&mut Environment) -> Result<(), InstallError>;

const INSTALLERS: [(LibraryKind, Installer); 6] = [
    (LibraryKind::Procedure, init_fun),
    (LibraryKind::Character, init_char),
    (LibraryKind::Error, init_error),
    (LibraryKind::Syntax, init_syntax),
    (LibraryKind::Symbol, init_symbol),
    (LibraryKind::Boolean, init_bool),
];

#[test]
fn test_installer_defines_its_library() {
    for (kind, install) in INSTALLERS {
        let mut env = Environment::create_global();
        install(&mut env).unwrap();

        let library = kind.library();
        assert_eq!(env.local_len(), library.len(), "{kind}");
        for (name, value) in library.bindings() {
            let bound = env.lookup_named(name).unwrap();
            assert!(bound.eqv(value), "{kind}: {name}");
        }
    }
}

#[test]
fn test_installers_are_idempotent() {
    for (kind, install) in INSTALLERS {
        let mut env = Environment::create_global();
        install(&mut env).unwrap();
        let first = env.capture();
        install(&mut env).unwrap();
        let second = env.capture();

        assert_eq!(first.len(), second.len(), "{kind}");
        for (symbol, value) in &first {
            assert!(second[symbol].eqv(value), "{kind}");
        }
    }
}

#[test]
fn test_builtin_names_are_disjoint() {
    let mut seen = FxHashSet::default();
    for kind in LibraryKind::ALL {
        for (name, _) in kind.library().bindings() {
            assert!(seen.insert(name.to_string()), "{name} bound twice");
        }
    }
}

#[test]
fn test_boolean_constants() {
    let mut env = Environment::create_global();
    init_bool(&mut env).unwrap();

    assert_eq!(env.lookup_named("true"), Ok(Value::Bool(true)));
    assert_eq!(env.lookup_named("false"), Ok(Value::Bool(false)));
    let t = env.lookup_named("true").unwrap();
    let f = env.lookup_named("false").unwrap();
    assert!(!t.eqv(&f));
}

#[test]
fn test_syntax_markers() {
    let mut env = Environment::create_global();
    init_syntax(&mut env).unwrap();

    assert_eq!(
        env.lookup_named("lambda").unwrap().as_syntax(),
        Some(SyntaxForm::Lambda)
    );
    assert_eq!(
        env.lookup_named("set!").unwrap().as_syntax(),
        Some(SyntaxForm::Set)
    );
    assert!(env
        .lookup_named("call-with-current-continuation")
        .unwrap_err()
        .is_unbound_variable());
}

#[test]
fn test_install_leaves_other_bindings_alone() {
    let mut env = Environment::create_global();
    let mine = env.define_named("my-var", Value::Int(5));
    init_char(&mut env).unwrap();
    assert_eq!(env.lookup(mine), Ok(Value::Int(5)));
}

#[test]
fn test_install_requires_global() {
    let global = Environment::create_global();
    let mut child = global.child();

    let err = init_symbol(&mut child).unwrap_err();
    assert_eq!(
        err,
        InstallError::NotGlobal {
            library: "symbol".to_string()
        }
    );
    assert_eq!(child.local_len(), 0);
}

#[test]
fn test_invalid_name_aborts_whole_library() {
    let mut env = Environment::create_global();
    let library = Library::new("host")
        .bind("fine", Value::Int(1))
        .bind("not fine", Value::Int(2));

    let err = library.install(&mut env).unwrap_err();
    assert_eq!(
        err,
        InstallError::InvalidName {
            library: "host".to_string(),
            name: "not fine".to_string(),
            source: TextError::Whitespace { index: 3 },
        }
    );
    assert!(env.lookup_named("fine").is_err());
    assert_eq!(env.local_len(), 0);
}

#[test]
fn test_empty_name_rejected() {
    let library = Library::new("host").bind("", Value::Nil);
    assert!(matches!(
        library.check_names(),
        Err(InstallError::InvalidName {
            source: TextError::Empty,
            ..
        })
    ));
}

#[test]
fn test_installed_primitive_is_callable() {
    let mut env = Environment::create_global();
    init_char(&mut env).unwrap();

    let upcase = env.lookup_named("char-upcase").unwrap();
    let mut exec = PrimitiveExecutor::for_env(&env);
    let result = crate::executor::apply(&mut exec, &upcase, vec![Value::Char('q')]);
    assert_eq!(result, Ok(Value::Char('Q')));

    let err = crate::executor::apply(&mut exec, &upcase, vec![]).unwrap_err();
    assert!(matches!(err.kind, EvalErrorKind::ArityMismatch { .. }));
}

#[test]
fn test_library_kind_names() {
    let names: Vec<_> = LibraryKind::ALL.into_iter().map(LibraryKind::name).collect();
    assert_eq!(
        names,
        vec!["procedure", "char", "error", "syntax", "symbol", "bool"]
    );
    assert_eq!(LibraryKind::Character.to_string(), "char");
}
