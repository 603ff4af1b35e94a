//! Tree-walking evaluator over fully resolved-and-typed IR.
//!
//! Pure: it only reads the IR and reads/writes an activation stack of frames, each frame an
//! ordered list of [`Value`]s indexed by a `fn_parameter`'s `index`, chosen from the stack by the
//! occurrence `depth` the resolver recorded on the `resolved_name` node.

use mandalang_diagnostic::{ErrorKind, MandaError, Result};
use mandalang_ir::{
    ArithOp, CmpOp, CompositeTypePool, Fragment, FragmentId, FragmentPool, FunctionBody,
    FunctionValue, NodeId, NodeKind, SymbolId, SymbolKind, SymbolPool, Value,
};

/// Borrows threaded through every evaluation call: every fragment the module has ever accepted
/// (a call may cross from the fragment being evaluated now into one retained from an earlier
/// line), the pools symbols live in, and the call-activation stack built up as native functions
/// are entered. `current` names which fragment's arena `node_id`s in flight are addressed
/// against; `eval_call` swaps it for the duration of a native call and restores it afterwards.
pub struct EvalCtx<'a> {
    pub fragments: &'a FragmentPool,
    pub current: FragmentId,
    pub symbols: &'a SymbolPool,
    pub composites: &'a CompositeTypePool,
    pub stack: Vec<Vec<Value>>,
}

impl<'a> EvalCtx<'a> {
    pub fn new(
        fragments: &'a FragmentPool,
        current: FragmentId,
        symbols: &'a SymbolPool,
        composites: &'a CompositeTypePool,
    ) -> Self {
        EvalCtx { fragments, current, symbols, composites, stack: Vec::new() }
    }

    fn fragment(&self) -> &Fragment {
        &self.fragments[self.current]
    }
}

fn invalid(line: u32) -> MandaError {
    MandaError::new(ErrorKind::InvalidAstNodeToEvaluate).with_line(line)
}

/// Entry point: evaluates `root`, rejecting a vector-typed result outright since no vector value
/// can ever be constructed (§4.5, §6).
pub fn evaluate(ctx: &mut EvalCtx, root: NodeId) -> Result<Value> {
    let ty = ctx.fragment().nodes[root].ty;
    let line = ctx.fragment().nodes[root].line;
    if ty.is_some_and(|t| t.is_vector(ctx.composites)) {
        return Err(invalid(line));
    }
    eval_expr(ctx, root)
}

fn eval_expr(ctx: &mut EvalCtx, node_id: NodeId) -> Result<Value> {
    let line = ctx.fragment().nodes[node_id].line;
    let kind = ctx.fragment().nodes[node_id].kind.clone();
    match kind {
        NodeKind::IntLiteral(value) => Ok(Value::Integer(value)),
        NodeKind::FloatLiteral(value) => Ok(Value::Float(value)),

        NodeKind::ResolvedName { symbol, depth } => eval_resolved_name(ctx, symbol, depth, line),

        NodeKind::BooleanNot(inner) => match eval_expr(ctx, inner)? {
            Value::Boolean(b) => Ok(Value::Boolean(!b)),
            _ => Err(invalid(line)),
        },
        NodeKind::BooleanAnd(lhs, rhs) => {
            let Value::Boolean(left) = eval_expr(ctx, lhs)? else { return Err(invalid(line)) };
            if !left {
                return Ok(Value::Boolean(false));
            }
            let Value::Boolean(right) = eval_expr(ctx, rhs)? else { return Err(invalid(line)) };
            Ok(Value::Boolean(right))
        }
        NodeKind::BooleanOr(lhs, rhs) => {
            let Value::Boolean(left) = eval_expr(ctx, lhs)? else { return Err(invalid(line)) };
            if left {
                return Ok(Value::Boolean(true));
            }
            let Value::Boolean(right) = eval_expr(ctx, rhs)? else { return Err(invalid(line)) };
            Ok(Value::Boolean(right))
        }

        NodeKind::IntegerNegate(inner) => match eval_expr(ctx, inner)? {
            Value::Integer(v) => Ok(Value::Integer(v.wrapping_neg())),
            _ => Err(invalid(line)),
        },
        NodeKind::FloatingPointNegate(inner) => match eval_expr(ctx, inner)? {
            Value::Float(v) => Ok(Value::Float(-v)),
            _ => Err(invalid(line)),
        },

        NodeKind::IntegerArith(op, lhs, rhs) => {
            let (Value::Integer(a), Value::Integer(b)) = (eval_expr(ctx, lhs)?, eval_expr(ctx, rhs)?)
            else {
                return Err(invalid(line));
            };
            eval_integer_arith(op, a, b, line)
        }
        NodeKind::FloatingPointArith(op, lhs, rhs) => {
            let (Value::Float(a), Value::Float(b)) = (eval_expr(ctx, lhs)?, eval_expr(ctx, rhs)?)
            else {
                return Err(invalid(line));
            };
            Ok(Value::Float(apply_float_arith(op, a, b)))
        }

        NodeKind::IntegerCompare(op, lhs, rhs) => {
            let (Value::Integer(a), Value::Integer(b)) = (eval_expr(ctx, lhs)?, eval_expr(ctx, rhs)?)
            else {
                return Err(invalid(line));
            };
            Ok(Value::Boolean(apply_cmp(op, a, b)))
        }
        NodeKind::FloatingPointCompare(op, lhs, rhs) => {
            let (Value::Float(a), Value::Float(b)) = (eval_expr(ctx, lhs)?, eval_expr(ctx, rhs)?)
            else {
                return Err(invalid(line));
            };
            Ok(Value::Boolean(apply_cmp(op, a, b)))
        }
        NodeKind::BooleanEqualsTo(lhs, rhs) => {
            let (Value::Boolean(a), Value::Boolean(b)) = (eval_expr(ctx, lhs)?, eval_expr(ctx, rhs)?)
            else {
                return Err(invalid(line));
            };
            Ok(Value::Boolean(a == b))
        }
        NodeKind::BooleanNotEqualsTo(lhs, rhs) => {
            let (Value::Boolean(a), Value::Boolean(b)) = (eval_expr(ctx, lhs)?, eval_expr(ctx, rhs)?)
            else {
                return Err(invalid(line));
            };
            Ok(Value::Boolean(a != b))
        }

        NodeKind::Subexpression(inner) => eval_expr(ctx, inner),

        NodeKind::Conditional { cond, then_branch, else_branch } => match eval_expr(ctx, cond)? {
            Value::Boolean(true) => eval_expr(ctx, then_branch),
            Value::Boolean(false) => eval_expr(ctx, else_branch),
            _ => Err(invalid(line)),
        },

        NodeKind::ResolvedFunctionLit { .. } => {
            let ty = ctx.fragment().nodes[node_id].ty.ok_or_else(|| invalid(line))?;
            Ok(Value::Function(FunctionValue { ty, body: FunctionBody::Native(ctx.current, node_id) }))
        }

        NodeKind::ResolvedFunctionCall { callee, args } => eval_call(ctx, callee, &args, line),

        _ => Err(invalid(line)),
    }
}

fn eval_resolved_name(ctx: &mut EvalCtx, symbol: SymbolId, depth: u32, line: u32) -> Result<Value> {
    let kind = ctx.symbols[symbol].kind.clone();
    match kind {
        SymbolKind::Value(value) => Ok(value),
        SymbolKind::Expression(expr_node) => eval_expr(ctx, expr_node),
        SymbolKind::FnParameter { index, .. } => read_param(ctx, depth, index as usize, line),
        SymbolKind::SelfFunction { body, ty } => {
            let ty = ty.ok_or_else(|| MandaError::new(ErrorKind::InvalidSymbol).with_line(line))?;
            Ok(Value::Function(FunctionValue { ty, body: FunctionBody::Native(ctx.current, body) }))
        }
        SymbolKind::Type(_) | SymbolKind::TypeExpression(_) => {
            Err(MandaError::new(ErrorKind::InvalidSymbolToEvaluate).with_line(line))
        }
    }
}

/// Reads `stack[stack.len()-1-depth][index]` (§4.5). Every native call pushes exactly one frame
/// regardless of its own arity (see `eval_call`), so `depth` — the count of function boundaries
/// crossed at resolve time — lines up with frames on the runtime stack one-for-one, including
/// through zero-parameter functions that contribute no parameter symbols of their own.
fn read_param(ctx: &EvalCtx, depth: u32, index: usize, line: u32) -> Result<Value> {
    let depth = depth as usize;
    let bad = || MandaError::new(ErrorKind::InvalidStackOperation).with_line(line);
    if depth >= ctx.stack.len() {
        return Err(bad());
    }
    let frame = &ctx.stack[ctx.stack.len() - 1 - depth];
    frame.get(index).copied().ok_or_else(bad)
}

fn eval_call(ctx: &mut EvalCtx, callee: NodeId, args: &[NodeId], line: u32) -> Result<Value> {
    let Value::Function(func) = eval_expr(ctx, callee)? else { return Err(invalid(line)) };

    let mut arg_values = Vec::with_capacity(args.len());
    for arg in args {
        arg_values.push(eval_expr(ctx, *arg)?);
    }

    match func.body {
        FunctionBody::Builtin(builtin) => builtin(&arg_values)
            .map_err(|err| MandaError::new(ErrorKind::InvalidSymbolToEvaluate).with_line(line).with_detail(err.0)),
        FunctionBody::Native(fragment_id, lit_node) => {
            let prior_fragment = ctx.current;
            ctx.current = fragment_id;
            let NodeKind::ResolvedFunctionLit { body, .. } = ctx.fragment().nodes[lit_node].kind.clone()
            else {
                ctx.current = prior_fragment;
                return Err(invalid(line));
            };
            ctx.stack.push(arg_values);
            let result = eval_expr(ctx, body);
            ctx.stack.pop();
            ctx.current = prior_fragment;
            result
        }
    }
}

/// Wraps on overflow rather than panicking, matching the platform two's-complement integer
/// semantics of §4.4 — well-typed input never traps (§8).
fn eval_integer_arith(op: ArithOp, a: i64, b: i64, line: u32) -> Result<Value> {
    match op {
        ArithOp::Add => Ok(Value::Integer(a.wrapping_add(b))),
        ArithOp::Subtract => Ok(Value::Integer(a.wrapping_sub(b))),
        ArithOp::Multiply => Ok(Value::Integer(a.wrapping_mul(b))),
        ArithOp::Divide => {
            if b == 0 {
                Err(MandaError::new(ErrorKind::DivisionByZero).with_line(line))
            } else {
                Ok(Value::Integer(a.wrapping_div(b)))
            }
        }
    }
}

fn apply_float_arith(op: ArithOp, a: f64, b: f64) -> f64 {
    match op {
        ArithOp::Add => a + b,
        ArithOp::Subtract => a - b,
        ArithOp::Multiply => a * b,
        ArithOp::Divide => a / b,
    }
}

fn apply_cmp<T: PartialOrd>(op: CmpOp, a: T, b: T) -> bool {
    match op {
        CmpOp::EqualsTo => a == b,
        CmpOp::NotEqualsTo => a != b,
        CmpOp::GreaterThan => a > b,
        CmpOp::GreaterOrEquals => a >= b,
        CmpOp::LessThan => a < b,
        CmpOp::LessOrEquals => a <= b,
    }
}

#[cfg(test)]
#[expect(clippy::unwrap_used, reason = "tests use unwrap for brevity")]
mod tests {
    use mandalang_ir::{CompositeTypePool, Fragment, FragmentPool, NameInterner, Scope, ScopePool, SymbolPool};
    use mandalang_parse::{parse_top_level, ParsedTop};
    use mandalang_resolve::{resolve_expr, ResolveCtx};
    use mandalang_types::{solve_expr, SolveCtx};
    use pretty_assertions::assert_eq;

    use super::*;

    /// Parses, resolves, solves and evaluates `source` as a bare expression against a prelude
    /// seeded with `integer`/`double`/`boolean`/`true`/`false`, mirroring the prelude §6 promises.
    fn run(source: &str) -> Result<Value> {
        let mut interner = NameInterner::new();
        let mut symbols = SymbolPool::new();
        let mut scopes = ScopePool::new();
        let mut composites = CompositeTypePool::new();
        let mut fragments = FragmentPool::new();

        let global = scopes.alloc(Scope::new(None));
        seed_prelude(&mut interner, &mut symbols, &mut scopes, global);

        let fragment_id = fragments.alloc(Fragment::new(source));
        let top = {
            let mut p = mandalang_parse::Parser::new(source, &mut fragments[fragment_id], &mut interner).unwrap();
            parse_top_level(&mut p).unwrap()
        };
        let ParsedTop::Expr(root) = top else { panic!("expected bare expression") };

        {
            let mut ctx = ResolveCtx {
                fragment: &mut fragments[fragment_id],
                symbols: &mut symbols,
                scopes: &mut scopes,
                interner: &mut interner,
            };
            resolve_expr(&mut ctx, global, root).unwrap();
        }
        {
            let mut ctx = SolveCtx {
                fragment: &mut fragments[fragment_id],
                symbols: &mut symbols,
                composites: &mut composites,
                max_function_params: 16,
            };
            solve_expr(&mut ctx, root).unwrap();
        }

        let mut ctx = EvalCtx::new(&fragments, fragment_id, &symbols, &composites);
        evaluate(&mut ctx, root)
    }

    fn seed_prelude(
        interner: &mut NameInterner,
        symbols: &mut SymbolPool,
        scopes: &mut ScopePool,
        global: mandalang_ir::ScopeId,
    ) {
        use mandalang_ir::{Symbol, Type};

        for (name, kind) in [
            ("integer", SymbolKind::Type(Type::Integer)),
            ("double", SymbolKind::Type(Type::Float)),
            ("boolean", SymbolKind::Type(Type::Boolean)),
            ("true", SymbolKind::Value(Value::Boolean(true))),
            ("false", SymbolKind::Value(Value::Boolean(false))),
        ] {
            let name = interner.intern(name);
            let symbol = symbols.alloc(Symbol::new(name, kind));
            scopes[global].define(name, symbol).unwrap();
        }
    }

    #[test]
    fn arithmetic_follows_precedence() {
        assert!(matches!(run("1 + 2 * 3").unwrap(), Value::Integer(7)));
    }

    #[test]
    fn squares_via_function_literal_and_call() {
        let result = run("(fn (integer x) -> integer x * x)(5)").unwrap();
        assert!(matches!(result, Value::Integer(25)));
    }

    #[test]
    fn factorial_recurses_through_self() {
        let source = "(fn (integer n) -> integer if n <= 1 then 1 else n * self(n - 1))(5)";
        assert!(matches!(run(source).unwrap(), Value::Integer(120)));
    }

    #[test]
    fn integer_division_by_zero_is_a_runtime_error() {
        let err = run("1 / 0").unwrap_err();
        assert_eq!(err.kind, ErrorKind::DivisionByZero);
    }

    #[test]
    fn short_circuit_and_skips_right_operand() {
        let source = "false && (1 / 0 == 0)";
        assert!(matches!(run(source).unwrap(), Value::Boolean(false)));
    }

    #[test]
    fn short_circuit_or_skips_right_operand() {
        let source = "true || (1 / 0 == 0)";
        assert!(matches!(run(source).unwrap(), Value::Boolean(true)));
    }

    #[test]
    fn conditional_evaluates_exactly_one_branch() {
        assert!(matches!(run("if true then 1 else 1 / 0").unwrap(), Value::Integer(1)));
    }

    #[test]
    fn zero_arity_function_call_reads_outer_parameter_at_correct_depth() {
        let source = "(fn (integer x) -> integer (fn () -> integer x)())(9)";
        assert!(matches!(run(source).unwrap(), Value::Integer(9)));
    }

    #[test]
    fn float_division_follows_ieee_semantics() {
        assert!(matches!(run("1.0 / 0.0").unwrap(), Value::Float(v) if v.is_infinite()));
    }
}
