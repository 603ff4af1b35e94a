//! Name resolution (§4.3): rewrites every `name` leaf in a fragment's IR to a `resolved_name`
//! pointing at the symbol it refers to, binds function parameters and the implicit `self`
//! self-reference, and rejects anything that doesn't refer to a known symbol.
//!
//! Symbols and scopes live in pools owned by the surrounding module (see
//! [`mandalang_ir::Fragment`]'s doc comment) and are threaded through as a [`ResolveCtx`] so a
//! function literal's inner scope can chain up to the module's persistent global scope without
//! any cross-arena index aliasing.

use mandalang_diagnostic::{ErrorKind, MandaError, Result};
use mandalang_ir::{
    Fragment, Name, NameInterner, NodeId, NodeKind, ResolvedParam, Scope, ScopeId, ScopePool,
    Symbol, SymbolId, SymbolKind, SymbolPool,
};

pub struct ResolveCtx<'a> {
    pub fragment: &'a mut Fragment,
    pub symbols: &'a mut SymbolPool,
    pub scopes: &'a mut ScopePool,
    pub interner: &'a mut NameInterner,
}

/// Walks outward from `start`, counting scope hops. Every scope boundary in this language is a
/// function literal's inner scope, so the hop count doubles as the occurrence `depth` a
/// `fn_parameter` reference needs for activation-stack indexing (§3 invariant 3, §4.5).
fn lookup_with_depth(scopes: &ScopePool, start: ScopeId, name: Name) -> Option<(SymbolId, u32)> {
    let mut current = Some(start);
    let mut depth = 0;
    while let Some(id) = current {
        let scope = &scopes[id];
        if let Some(symbol) = scope.local(name) {
            return Some((symbol, depth));
        }
        current = scope.parent;
        depth += 1;
    }
    None
}

fn unknown_name(ctx: &ResolveCtx, name: Name, line: u32) -> MandaError {
    MandaError::new(ErrorKind::UnknownName).with_line(line).with_detail(ctx.interner.resolve(name))
}

/// Resolves an expression-position subtree rooted at `node`, in `scope`.
pub fn resolve_expr(ctx: &mut ResolveCtx, scope: ScopeId, node: NodeId) -> Result<()> {
    let line = ctx.fragment.nodes[node].line;
    let kind = ctx.fragment.nodes[node].kind.clone();
    match kind {
        NodeKind::IntLiteral(_) | NodeKind::FloatLiteral(_) => Ok(()),

        NodeKind::Name(name) => {
            let (symbol, depth) =
                lookup_with_depth(ctx.scopes, scope, name).ok_or_else(|| unknown_name(ctx, name, line))?;
            ctx.fragment.nodes[node].kind = NodeKind::ResolvedName { symbol, depth };
            Ok(())
        }

        NodeKind::Negate(inner) | NodeKind::BooleanNot(inner) | NodeKind::Subexpression(inner) => {
            resolve_expr(ctx, scope, inner)
        }

        NodeKind::Arith(_, left, right)
        | NodeKind::Compare(_, left, right)
        | NodeKind::BooleanAnd(left, right)
        | NodeKind::BooleanOr(left, right) => {
            resolve_expr(ctx, scope, left)?;
            resolve_expr(ctx, scope, right)
        }

        NodeKind::Conditional { cond, then_branch, else_branch } => {
            resolve_expr(ctx, scope, cond)?;
            resolve_expr(ctx, scope, then_branch)?;
            resolve_expr(ctx, scope, else_branch)
        }

        NodeKind::FunctionLit { params, result_ty, body } => {
            resolve_type_expr(ctx, scope, result_ty)?;

            let inner_scope = ctx.scopes.alloc(Scope::new(Some(scope)));

            let self_name = ctx.interner.intern(Name::SELF);
            let self_symbol = ctx.symbols.alloc(Symbol::new(self_name, SymbolKind::SelfFunction { body: node, ty: None }));
            if ctx.scopes[inner_scope].define(self_name, self_symbol).is_err() {
                return Err(MandaError::new(ErrorKind::InvalidAstNodeToResolve).with_line(line));
            }

            let mut resolved_params = Vec::with_capacity(params.len());
            for (index, param) in params.into_iter().enumerate() {
                resolve_type_expr(ctx, inner_scope, param.type_expr)?;
                let symbol = ctx
                    .symbols
                    .alloc(Symbol::new(param.name, SymbolKind::FnParameter { index: index as u32, ty: None }));
                if ctx.scopes[inner_scope].define(param.name, symbol).is_err() {
                    return Err(unknown_name_as_duplicate(ctx, param.name, line));
                }
                resolved_params.push(ResolvedParam { symbol, type_expr: param.type_expr });
            }

            resolve_expr(ctx, inner_scope, body)?;

            ctx.fragment.nodes[node].kind = NodeKind::ResolvedFunctionLit {
                params: resolved_params,
                result_ty,
                body,
                scope: inner_scope,
                self_symbol,
            };
            Ok(())
        }

        NodeKind::FunctionCall { callee, args } => {
            resolve_expr(ctx, scope, callee)?;
            for arg in &args {
                resolve_expr(ctx, scope, *arg)?;
            }
            ctx.fragment.nodes[node].kind = NodeKind::ResolvedFunctionCall { callee, args };
            Ok(())
        }

        _ => Err(MandaError::new(ErrorKind::InvalidAstNodeToResolve).with_line(line)),
    }
}

fn unknown_name_as_duplicate(ctx: &ResolveCtx, name: Name, line: u32) -> MandaError {
    MandaError::new(ErrorKind::DuplicatedName).with_line(line).with_detail(ctx.interner.resolve(name))
}

/// Resolves a type-position subtree rooted at `node`, in `scope`. A name here must already be
/// bound to a fully solved type symbol; finding anything else is `type_name_expected`.
pub fn resolve_type_expr(ctx: &mut ResolveCtx, scope: ScopeId, node: NodeId) -> Result<()> {
    let line = ctx.fragment.nodes[node].line;
    let kind = ctx.fragment.nodes[node].kind.clone();
    match kind {
        NodeKind::Name(name) => {
            let (symbol, _depth) =
                lookup_with_depth(ctx.scopes, scope, name).ok_or_else(|| unknown_name(ctx, name, line))?;
            if !matches!(ctx.symbols[symbol].kind, SymbolKind::Type(_)) {
                return Err(MandaError::new(ErrorKind::TypeNameExpected)
                    .with_line(line)
                    .with_detail(ctx.interner.resolve(name)));
            }
            ctx.fragment.nodes[node].kind = NodeKind::ResolvedName { symbol, depth: 0 };
            Ok(())
        }

        NodeKind::TypeFunction { params, result } => {
            for param in &params {
                resolve_type_expr(ctx, scope, *param)?;
            }
            resolve_type_expr(ctx, scope, result)
        }

        NodeKind::TypeVector { elem } => resolve_type_expr(ctx, scope, elem),

        _ => Err(MandaError::new(ErrorKind::InvalidAstNodeToResolve).with_line(line)),
    }
}

#[cfg(test)]
mod tests {
    use mandalang_ir::{Fragment, Node, NodeKind, Scope, ScopePool, SymbolPool, Type, Value};
    use pretty_assertions::assert_eq;

    use super::*;

    fn new_ctx_parts() -> (Fragment, SymbolPool, ScopePool, NameInterner) {
        (Fragment::new(""), SymbolPool::new(), ScopePool::new(), NameInterner::new())
    }

    #[test]
    fn unknown_name_fails() {
        let (mut fragment, mut symbols, mut scopes, mut interner) = new_ctx_parts();
        let global = scopes.alloc(Scope::new(None));
        let name = interner.intern("missing");
        let node = fragment.alloc_node(Node::new(NodeKind::Name(name), 1));
        let mut ctx = ResolveCtx { fragment: &mut fragment, symbols: &mut symbols, scopes: &mut scopes, interner: &mut interner };
        let err = resolve_expr(&mut ctx, global, node).expect_err("should fail");
        assert_eq!(err.kind, ErrorKind::UnknownName);
    }

    #[test]
    fn known_value_name_resolves() {
        let (mut fragment, mut symbols, mut scopes, mut interner) = new_ctx_parts();
        let mut global_scope = Scope::new(None);
        let name = interner.intern("x");
        let symbol = symbols.alloc(Symbol::new(name, SymbolKind::Value(Value::Integer(1))));
        global_scope.define(name, symbol).unwrap();
        let global = scopes.alloc(global_scope);

        let node = fragment.alloc_node(Node::new(NodeKind::Name(name), 1));
        let mut ctx = ResolveCtx { fragment: &mut fragment, symbols: &mut symbols, scopes: &mut scopes, interner: &mut interner };
        resolve_expr(&mut ctx, global, node).expect("should resolve");
        assert!(matches!(fragment.nodes[node].kind, NodeKind::ResolvedName { depth: 0, .. }));
    }

    #[test]
    fn function_literal_binds_self_and_parameters() {
        let (mut fragment, mut symbols, mut scopes, mut interner) = new_ctx_parts();
        let integer_name = interner.intern("integer");
        let integer_symbol = symbols.alloc(Symbol::new(integer_name, SymbolKind::Type(Type::Integer)));
        let mut global_scope = Scope::new(None);
        global_scope.define(integer_name, integer_symbol).unwrap();
        let global = scopes.alloc(global_scope);

        let result_ty = fragment.alloc_node(Node::new(NodeKind::Name(integer_name), 1));
        let param_ty = fragment.alloc_node(Node::new(NodeKind::Name(integer_name), 1));
        let n_name = interner.intern("n");
        let body = fragment.alloc_node(Node::new(NodeKind::Name(n_name), 1));
        let params = vec![mandalang_ir::Param { name: n_name, type_expr: param_ty }];
        let func = fragment.alloc_node(Node::new(NodeKind::FunctionLit { params, result_ty, body }, 1));

        let mut ctx = ResolveCtx { fragment: &mut fragment, symbols: &mut symbols, scopes: &mut scopes, interner: &mut interner };
        resolve_expr(&mut ctx, global, func).expect("should resolve");

        match &fragment.nodes[func].kind {
            NodeKind::ResolvedFunctionLit { params, scope, self_symbol, .. } => {
                assert_eq!(params.len(), 1);
                assert_eq!(scopes[*scope].local(interner.intern("self")), Some(*self_symbol));
            }
            other => panic!("expected ResolvedFunctionLit, got {other:?}"),
        }
        assert!(matches!(fragment.nodes[body].kind, NodeKind::ResolvedName { depth: 0, .. }));
    }

    #[test]
    fn duplicate_parameter_names_fail() {
        let (mut fragment, mut symbols, mut scopes, mut interner) = new_ctx_parts();
        let integer_name = interner.intern("integer");
        let integer_symbol = symbols.alloc(Symbol::new(integer_name, SymbolKind::Type(Type::Integer)));
        let mut global_scope = Scope::new(None);
        global_scope.define(integer_name, integer_symbol).unwrap();
        let global = scopes.alloc(global_scope);

        let result_ty = fragment.alloc_node(Node::new(NodeKind::Name(integer_name), 1));
        let n_name = interner.intern("n");
        let param_ty_a = fragment.alloc_node(Node::new(NodeKind::Name(integer_name), 1));
        let param_ty_b = fragment.alloc_node(Node::new(NodeKind::Name(integer_name), 1));
        let body = fragment.alloc_node(Node::new(NodeKind::IntLiteral(0), 1));
        let params = vec![
            mandalang_ir::Param { name: n_name, type_expr: param_ty_a },
            mandalang_ir::Param { name: n_name, type_expr: param_ty_b },
        ];
        let func = fragment.alloc_node(Node::new(NodeKind::FunctionLit { params, result_ty, body }, 1));

        let mut ctx = ResolveCtx { fragment: &mut fragment, symbols: &mut symbols, scopes: &mut scopes, interner: &mut interner };
        let err = resolve_expr(&mut ctx, global, func).expect_err("should fail");
        assert_eq!(err.kind, ErrorKind::DuplicatedName);
    }

    #[test]
    fn nested_function_parameter_has_positive_depth() {
        let (mut fragment, mut symbols, mut scopes, mut interner) = new_ctx_parts();
        let integer_name = interner.intern("integer");
        let integer_symbol = symbols.alloc(Symbol::new(integer_name, SymbolKind::Type(Type::Integer)));
        let mut global_scope = Scope::new(None);
        global_scope.define(integer_name, integer_symbol).unwrap();
        let global = scopes.alloc(global_scope);

        // fn (integer outer) -> integer  fn (integer inner) -> integer  outer
        let outer_name = interner.intern("outer");
        let inner_name = interner.intern("inner");

        let outer_result_ty = fragment.alloc_node(Node::new(NodeKind::Name(integer_name), 1));
        let outer_param_ty = fragment.alloc_node(Node::new(NodeKind::Name(integer_name), 1));

        let inner_result_ty = fragment.alloc_node(Node::new(NodeKind::Name(integer_name), 1));
        let inner_param_ty = fragment.alloc_node(Node::new(NodeKind::Name(integer_name), 1));
        let outer_ref = fragment.alloc_node(Node::new(NodeKind::Name(outer_name), 1));
        let inner_func = fragment.alloc_node(Node::new(
            NodeKind::FunctionLit {
                params: vec![mandalang_ir::Param { name: inner_name, type_expr: inner_param_ty }],
                result_ty: inner_result_ty,
                body: outer_ref,
            },
            1,
        ));
        let outer_func = fragment.alloc_node(Node::new(
            NodeKind::FunctionLit {
                params: vec![mandalang_ir::Param { name: outer_name, type_expr: outer_param_ty }],
                result_ty: outer_result_ty,
                body: inner_func,
            },
            1,
        ));

        let mut ctx = ResolveCtx { fragment: &mut fragment, symbols: &mut symbols, scopes: &mut scopes, interner: &mut interner };
        resolve_expr(&mut ctx, global, outer_func).expect("should resolve");

        assert!(matches!(fragment.nodes[outer_ref].kind, NodeKind::ResolvedName { depth: 1, .. }));
    }
}
