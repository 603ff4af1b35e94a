//! The preloaded prelude (§1, §6): type names and boolean literals seeded into a fresh module's
//! global scope before any user line is ever submitted.

use mandalang_ir::{NameInterner, ScopeId, ScopePool, Symbol, SymbolKind, SymbolPool, Type, Value};

/// Defines `integer`, `double`, `boolean`, `true`, `false` in `global`. Called exactly once, by
/// [`crate::Module::new`]/[`crate::Module::with_limits`], against an empty scope, so `define`
/// (not `redefine`) is the right primitive — a prelude name colliding with itself would be a bug.
pub(crate) fn seed(
    interner: &mut NameInterner,
    symbols: &mut SymbolPool,
    scopes: &mut ScopePool,
    global: ScopeId,
) {
    let mut bind = |text: &str, kind: SymbolKind| {
        let name = interner.intern(text);
        let symbol = symbols.alloc(Symbol::new(name, kind));
        scopes[global]
            .define(name, symbol)
            .expect("prelude names are defined once against an empty scope");
    };

    bind("integer", SymbolKind::Type(Type::Integer));
    bind("double", SymbolKind::Type(Type::Float));
    bind("boolean", SymbolKind::Type(Type::Boolean));
    bind("true", SymbolKind::Value(Value::Boolean(true)));
    bind("false", SymbolKind::Value(Value::Boolean(false)));
}

#[cfg(test)]
mod tests {
    use super::*;
    use mandalang_ir::{lookup, Scope};

    #[test]
    fn seeds_type_names_and_boolean_literals() {
        let mut interner = NameInterner::new();
        let mut symbols = SymbolPool::new();
        let mut scopes = ScopePool::new();
        let global = scopes.alloc(Scope::new(None));

        seed(&mut interner, &mut symbols, &mut scopes, global);

        for text in ["integer", "double", "boolean", "true", "false"] {
            let name = interner.intern(text);
            assert!(lookup(&scopes, global, name).is_some(), "{text} should be bound");
        }
    }
}
