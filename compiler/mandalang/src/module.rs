//! The persistent module (§4.6): owns the global scope, the module-wide symbol/scope/composite
//! pools, every line's retained fragment IR, and the pipeline that turns one input line into an
//! [`Outcome`] or a discarded binding (the fragment itself stays in the pool either way, see
//! [`Module::fragments`]).

use mandalang_diagnostic::{ErrorKind, MandaError, Result};
use mandalang_ir::{
    CompositeTypePool, Fragment, FragmentId, FragmentPool, Name, NameInterner, NodeId, Scope,
    ScopeId, ScopePool, Symbol, SymbolKind, SymbolPool, Type, Value,
};
use mandalang_eval::EvalCtx;
use mandalang_parse::{parse_top_level, ParsedTop, Parser};
use mandalang_resolve::{resolve_expr, resolve_type_expr, ResolveCtx};
use mandalang_types::{solve_expr, solve_type_expr, SolveCtx};

use crate::outcome::{Binding, Outcome};
use crate::prelude;
use crate::render;
use crate::Limits;

/// Owns every pool a fragment's pipeline needs that must outlive the fragment itself (§3
/// "Lifecycle & ownership"): symbols, scopes, and composite types live here so a `let`/`type`
/// binding and a function's inner scope both stay reachable for every later line.
pub struct Module {
    interner: NameInterner,
    symbols: SymbolPool,
    scopes: ScopePool,
    composites: CompositeTypePool,
    global: ScopeId,
    /// Every line's fragment, retained forever: a bound symbol's value may hold a
    /// [`mandalang_ir::FunctionBody::Native`] index into any of their arenas (§3), and since the
    /// pool never frees a slot individually, a `FragmentId` handed to a function value at
    /// evaluation time stays valid no matter how many later lines are parsed. Fragments that
    /// turn out not to be bound to anything (a bare expression, a failed line's partial parse)
    /// are harmless leftover garbage in the pool, same as an orphaned symbol or scope.
    fragments: FragmentPool,
    limits: Limits,
    /// Monotonic counter used only to tag `tracing` spans with a stable per-call identifier
    /// (§4.8); it has no bearing on pipeline semantics.
    call_count: u32,
}

impl Module {
    pub fn new() -> Self {
        Module::with_limits(Limits::default())
    }

    pub fn with_limits(limits: Limits) -> Self {
        let mut interner = NameInterner::new();
        let mut symbols = SymbolPool::new();
        let mut scopes = ScopePool::new();
        let global = scopes.alloc(Scope::new(None));
        prelude::seed(&mut interner, &mut symbols, &mut scopes, global);

        Module {
            interner,
            symbols,
            scopes,
            composites: CompositeTypePool::new(),
            global,
            fragments: FragmentPool::new(),
            limits,
            call_count: 0,
        }
    }

    pub fn limits(&self) -> Limits {
        self.limits
    }

    pub fn global_scope(&self) -> ScopeId {
        self.global
    }

    /// Installs or replaces a value-symbol under `name` in the global scope (§4.6 `redefine`,
    /// §6 `Engine::redefine`). Public so both `let`-definitions and the REPL's `_`-rebinding
    /// convention go through the same in-place-mutation path.
    pub fn redefine(&mut self, name: &str, value: Value) {
        let name = self.interner.intern(name);
        self.redefine_value(name, value);
    }

    /// Renders `outcome` to the canonical textual form of §6 (`<name> = <value>` or `<value>`).
    pub fn render_outcome(&self, outcome: &Outcome) -> String {
        match outcome {
            Outcome::Expression(value) => render::render_value(value, &self.composites),
            Outcome::Definition { name, binding } => match binding {
                Binding::Value(value) => {
                    format!("{name} = {}", render::render_value(value, &self.composites))
                }
                Binding::Type(ty) => format!("{name} = {}", render::render_type(*ty, &self.composites)),
            },
        }
    }

    /// Parses, resolves, solves and evaluates one input line (§4.6). On any failure nothing else
    /// in the module changes (no symbol is installed); on success a definition's symbol is
    /// installed, per the step list in §4.6. Either way the line's fragment stays in the pool —
    /// see [`Module::fragments`].
    pub fn evaluate_definition_or_expression(&mut self, source: &str) -> Result<Outcome> {
        self.call_count += 1;
        let call = self.call_count;
        let _span = tracing::debug_span!("evaluate_definition_or_expression", call).entered();

        if let Some(max) = self.limits.max_source_len {
            if source.len() > max {
                let err = MandaError::new(ErrorKind::NotEnoughMemory);
                tracing::warn!(kind = ?err.kind, "source line exceeds max_source_len");
                return Err(err);
            }
        }

        match self.process_line(source) {
            Ok(outcome) => Ok(outcome),
            Err(err) => {
                tracing::warn!(kind = ?err.kind, line = err.line, "fragment discarded");
                Err(err)
            }
        }
    }

    /// Evaluates `source` as a bare expression; fails if it parses as a `let`/`type` definition
    /// instead (§6). Unlike [`Module::evaluate_definition_or_expression`], does not rebind `_`.
    pub fn evaluate_expression(&mut self, source: &str) -> Result<Value> {
        match self.evaluate_definition_or_expression(source)? {
            Outcome::Expression(value) => Ok(value),
            Outcome::Definition { .. } => Err(MandaError::new(ErrorKind::InvalidExpression)),
        }
    }

    /// As [`Module::evaluate_definition_or_expression`], but additionally rebinds the
    /// distinguished name `_` to a bare expression's result (§4.6 "Re-entry into `_`"). This is
    /// the REPL-facing entry point; library embedders that don't want the `_` convention should
    /// call the plain method instead.
    pub fn evaluate_expression_and_bind_underscore(&mut self, source: &str) -> Result<Outcome> {
        let outcome = self.evaluate_definition_or_expression(source)?;
        if let Some(value) = outcome.expression_value() {
            self.redefine(Name::UNDERSCORE, value);
        }
        Ok(outcome)
    }

    fn process_line(&mut self, source: &str) -> Result<Outcome> {
        // Allocated up front, not after the pipeline succeeds: a function literal evaluated
        // partway through this line needs a stable `FragmentId` to close over (§3), and the
        // pool tolerates the occasional orphaned fragment from a line that turns out to be a
        // bare expression or that fails a later stage, the same way it tolerates orphaned
        // symbols and scopes.
        let fragment_id = self.fragments.alloc(Fragment::new(source));

        let _parse_span = tracing::debug_span!("parse").entered();
        let top = {
            let mut parser = Parser::new(source, &mut self.fragments[fragment_id], &mut self.interner)?;
            parse_top_level(&mut parser)?
        };
        drop(_parse_span);

        match top {
            ParsedTop::Expr(root) => {
                self.resolve(fragment_id, root)?;
                self.solve(fragment_id, root)?;
                let value = self.eval(fragment_id, root)?;
                Ok(Outcome::Expression(value))
            }

            ParsedTop::ValueDef { name, expr } => {
                self.resolve(fragment_id, expr)?;
                self.solve(fragment_id, expr)?;
                let value = self.eval(fragment_id, expr)?;
                self.redefine_value(name, value);
                Ok(Outcome::Definition {
                    name: self.interner.resolve(name).to_string(),
                    binding: Binding::Value(value),
                })
            }

            ParsedTop::TypeDef { name, type_expr } => {
                self.resolve_type(fragment_id, type_expr)?;
                let ty = self.solve_type(fragment_id, type_expr)?;
                self.redefine_type(name, ty);
                Ok(Outcome::Definition {
                    name: self.interner.resolve(name).to_string(),
                    binding: Binding::Type(ty),
                })
            }
        }
    }

    fn resolve(&mut self, fragment_id: FragmentId, root: NodeId) -> Result<()> {
        let _span = tracing::debug_span!("resolve").entered();
        let mut ctx = ResolveCtx {
            fragment: &mut self.fragments[fragment_id],
            symbols: &mut self.symbols,
            scopes: &mut self.scopes,
            interner: &mut self.interner,
        };
        resolve_expr(&mut ctx, self.global, root)
    }

    fn resolve_type(&mut self, fragment_id: FragmentId, root: NodeId) -> Result<()> {
        let _span = tracing::debug_span!("resolve").entered();
        let mut ctx = ResolveCtx {
            fragment: &mut self.fragments[fragment_id],
            symbols: &mut self.symbols,
            scopes: &mut self.scopes,
            interner: &mut self.interner,
        };
        resolve_type_expr(&mut ctx, self.global, root)
    }

    fn solve(&mut self, fragment_id: FragmentId, root: NodeId) -> Result<()> {
        let _span = tracing::debug_span!("solve").entered();
        let mut ctx = SolveCtx {
            fragment: &mut self.fragments[fragment_id],
            symbols: &mut self.symbols,
            composites: &mut self.composites,
            max_function_params: self.limits.max_function_params,
        };
        solve_expr(&mut ctx, root).map(|_| ())
    }

    fn solve_type(&mut self, fragment_id: FragmentId, root: NodeId) -> Result<Type> {
        let _span = tracing::debug_span!("solve").entered();
        let mut ctx = SolveCtx {
            fragment: &mut self.fragments[fragment_id],
            symbols: &mut self.symbols,
            composites: &mut self.composites,
            max_function_params: self.limits.max_function_params,
        };
        solve_type_expr(&mut ctx, root)
    }

    fn eval(&self, fragment_id: FragmentId, root: NodeId) -> Result<Value> {
        let _span = tracing::debug_span!("eval").entered();
        let mut ctx = EvalCtx::new(&self.fragments, fragment_id, &self.symbols, &self.composites);
        mandalang_eval::evaluate(&mut ctx, root)
    }

    fn redefine_value(&mut self, name: Name, value: Value) -> mandalang_ir::SymbolId {
        self.redefine_symbol(name, SymbolKind::Value(value))
    }

    fn redefine_type(&mut self, name: Name, ty: Type) -> mandalang_ir::SymbolId {
        self.redefine_symbol(name, SymbolKind::Type(ty))
    }

    /// `redefine` (§4.6): mutate the existing local symbol in place if `name` is already bound
    /// in the global scope (so IR resolved against the old symbol observes the new payload),
    /// otherwise allocate a fresh symbol and bind it.
    fn redefine_symbol(&mut self, name: Name, kind: SymbolKind) -> mandalang_ir::SymbolId {
        if let Some(existing) = self.scopes[self.global].local(name) {
            self.symbols[existing] = Symbol::new(name, kind);
            existing
        } else {
            let symbol = self.symbols.alloc(Symbol::new(name, kind));
            self.scopes[self.global].rebind(name, symbol);
            symbol
        }
    }
}

impl Default for Module {
    fn default() -> Self {
        Module::new()
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn evaluates_arithmetic_expression() {
        let mut module = Module::new();
        let Outcome::Expression(Value::Integer(v)) =
            module.evaluate_definition_or_expression("1 + 2 * 3").unwrap()
        else {
            panic!("expected integer expression");
        };
        assert_eq!(v, 7);
    }

    #[test]
    fn value_definition_is_retained_and_referenceable() {
        let mut module = Module::new();
        module.evaluate_definition_or_expression("let x = 10").unwrap();
        let Outcome::Expression(Value::Integer(v)) =
            module.evaluate_definition_or_expression("x + 5").unwrap()
        else {
            panic!("expected integer expression");
        };
        assert_eq!(v, 15);
    }

    #[test]
    fn rebinding_does_not_affect_already_evaluated_dependents() {
        let mut module = Module::new();
        module.evaluate_definition_or_expression("let x = 10").unwrap();
        module.evaluate_definition_or_expression("let y = x + 5").unwrap();
        module.evaluate_definition_or_expression("let x = 100").unwrap();
        let Outcome::Expression(Value::Integer(v)) =
            module.evaluate_definition_or_expression("y").unwrap()
        else {
            panic!("expected integer expression");
        };
        assert_eq!(v, 15);
    }

    #[test]
    fn failing_line_leaves_global_scope_untouched() {
        let mut module = Module::new();
        module.evaluate_definition_or_expression("let x = 10").unwrap();
        assert!(module.evaluate_definition_or_expression("1 + true").is_err());
        let Outcome::Expression(Value::Integer(v)) =
            module.evaluate_definition_or_expression("x").unwrap()
        else {
            panic!("expected integer expression");
        };
        assert_eq!(v, 10);
    }

    #[test]
    fn evaluate_expression_rejects_a_definition_line() {
        let mut module = Module::new();
        let err = module.evaluate_expression("let x = 1").unwrap_err();
        assert_eq!(err.kind, ErrorKind::InvalidExpression);
    }

    #[test]
    fn underscore_rebinds_after_a_bare_expression() {
        let mut module = Module::new();
        module.evaluate_expression_and_bind_underscore("1 + 1").unwrap();
        let Outcome::Expression(Value::Integer(v)) =
            module.evaluate_definition_or_expression("_").unwrap()
        else {
            panic!("expected integer expression");
        };
        assert_eq!(v, 2);
    }

    #[test]
    fn underscore_is_not_rebound_by_the_plain_entry_point() {
        let mut module = Module::new();
        module.evaluate_definition_or_expression("1 + 1").unwrap();
        let err = module.evaluate_definition_or_expression("_").unwrap_err();
        assert_eq!(err.kind, ErrorKind::UnknownName);
    }

    #[test]
    fn function_definition_then_call_round_trips_through_retained_fragment() {
        let mut module = Module::new();
        let def = module
            .evaluate_definition_or_expression("let sq = fn (integer x) -> integer x * x")
            .unwrap();
        assert_eq!(module.render_outcome(&def), "sq = fn (integer) -> integer");

        let Outcome::Expression(Value::Integer(v)) =
            module.evaluate_definition_or_expression("sq(5)").unwrap()
        else {
            panic!("expected integer expression");
        };
        assert_eq!(v, 25);
    }

    #[test]
    fn type_definition_renders_the_aliased_type() {
        let mut module = Module::new();
        let def = module.evaluate_definition_or_expression("type t = integer").unwrap();
        assert_eq!(module.render_outcome(&def), "t = integer");
    }
}
