//! The embedder-facing façade (§6): a single [`Module`] behind the handful of entry points a host
//! actually needs, so callers never have to reach into the pipeline crates directly.

use mandalang_diagnostic::Result;
use mandalang_ir::Value;

use crate::module::Module;
use crate::outcome::Outcome;
use crate::Limits;

/// A ready-to-use Mandalang module: prelude seeded, no fragments retained yet.
pub struct Engine {
    module: Module,
}

impl Engine {
    /// Creates an engine with default limits (§4.9).
    pub fn create() -> Self {
        Engine { module: Module::new() }
    }

    /// Creates an engine with the given limits in place of the defaults.
    pub fn with_limits(limits: Limits) -> Self {
        Engine { module: Module::with_limits(limits) }
    }

    /// Evaluates a bare expression. Fails with `invalid_expression` if `source` is a
    /// `let`/`type` definition instead.
    pub fn evaluate_expression(&mut self, source: &str) -> Result<Value> {
        self.module.evaluate_expression(source)
    }

    /// Processes one top-level line: a `let`/`type` definition is bound and its fragment
    /// retained, a bare expression is evaluated and its result additionally bound to `_` (§4.6).
    pub fn evaluate_definition_or_expression(&mut self, source: &str) -> Result<Outcome> {
        self.module.evaluate_expression_and_bind_underscore(source)
    }

    /// Rebinds `name` to `value` in the global scope, as if by `let name = ...` (§6).
    pub fn redefine(&mut self, name: &str, value: Value) {
        self.module.redefine(name, value);
    }

    /// Renders an [`Outcome`] in the canonical textual form of §6.
    pub fn render(&self, outcome: &Outcome) -> String {
        self.module.render_outcome(outcome)
    }

    /// The module's current configuration.
    pub fn limits(&self) -> Limits {
        self.module.limits()
    }
}

impl Default for Engine {
    fn default() -> Self {
        Engine::create()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mandalang_ir::Value;

    #[test]
    fn evaluate_expression_round_trips_arithmetic() {
        let mut engine = Engine::create();
        let Value::Integer(v) = engine.evaluate_expression("2 * (3 + 4)").unwrap() else {
            panic!("expected integer");
        };
        assert_eq!(v, 14);
    }

    #[test]
    fn definition_then_bare_expression_rebinds_underscore() {
        let mut engine = Engine::create();
        engine.evaluate_definition_or_expression("let x = 41").unwrap();
        let outcome = engine.evaluate_definition_or_expression("x + 1").unwrap();
        assert_eq!(engine.render(&outcome), "42");
        let underscore = engine.evaluate_definition_or_expression("_").unwrap();
        assert_eq!(engine.render(&underscore), "42");
    }

    #[test]
    fn redefine_overrides_a_previous_binding() {
        let mut engine = Engine::create();
        engine.evaluate_definition_or_expression("let x = 1").unwrap();
        engine.redefine("x", Value::Integer(99));
        let Value::Integer(v) = engine.evaluate_expression("x").unwrap() else {
            panic!("expected integer");
        };
        assert_eq!(v, 99);
    }
}
