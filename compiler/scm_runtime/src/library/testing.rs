//! Shared fixture for the library test modules.

use scm_ir::{SharedSymbolTable, Symbol};

use crate::errors::EvalResult;
use crate::executor::PrimitiveExecutor;
use crate::value::{Primitive, Value};

pub(super) struct Harness {
    pub(super) exec: PrimitiveExecutor,
    pub(super) symbols: SharedSymbolTable,
}

impl Harness {
    pub(super) fn new() -> Self {
        let symbols = SharedSymbolTable::new();
        Harness {
            exec: PrimitiveExecutor::new(symbols.clone()),
            symbols,
        }
    }

    pub(super) fn sym(&self, name: &str) -> Value {
        Value::Symbol(self.symbols.intern(name))
    }

    pub(super) fn symbol(&self, name: &str) -> Symbol {
        self.symbols.intern(name)
    }

    /// Call the primitive named `name` from `table`.
    pub(super) fn call(
        &mut self,
        table: &'static [Primitive],
        name: &str,
        args: Vec<Value>,
    ) -> EvalResult {
        let prim = find(table, name);
        prim.call(&mut self.exec, &args)
    }

    pub(super) fn show(&self, value: &Value) -> String {
        value.write_with(&*self.symbols)
    }
}

pub(super) fn find(table: &'static [Primitive], name: &str) -> &'static Primitive {
    table
        .iter()
        .find(|prim| prim.name() == name)
        .unwrap_or_else(|| panic!("no primitive named {name}"))
}

/// `Value::Primitive` for a table entry.
pub(super) fn primitive(table: &'static [Primitive], name: &str) -> Value {
    Value::Primitive(find(table, name))
}
