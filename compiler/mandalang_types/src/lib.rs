//! The type solver (§4.4): walks resolved IR bottom-up, assigning a [`Type`] to every node and
//! rewriting each generic arithmetic/comparison node to its monomorphic, operand-typed variant.
//!
//! Unlike the resolver, the solver never allocates scopes; it only reads symbols (to discover a
//! `resolved_name`'s type) and occasionally writes back into a `fn_parameter`/`self` symbol's
//! type slot the first time a function literal is solved.

use mandalang_diagnostic::{ErrorKind, MandaError, Result};
use mandalang_ir::{
    CmpOp, CompositeType, CompositeTypePool, Fragment, NodeId, NodeKind, SymbolKind,
    SymbolPool, Type,
};
use smallvec::SmallVec;

pub struct SolveCtx<'a> {
    pub fragment: &'a mut Fragment,
    pub symbols: &'a mut SymbolPool,
    pub composites: &'a mut CompositeTypePool,
    pub max_function_params: usize,
}

fn set_type(ctx: &mut SolveCtx, node: NodeId, ty: Type) -> Type {
    ctx.fragment.nodes[node].ty = Some(ty);
    ty
}

/// Solves an already-resolved expression subtree, returning (and caching on the node) its type.
pub fn solve_expr(ctx: &mut SolveCtx, node: NodeId) -> Result<Type> {
    let line = ctx.fragment.nodes[node].line;
    let kind = ctx.fragment.nodes[node].kind.clone();
    match kind {
        NodeKind::IntLiteral(_) => Ok(set_type(ctx, node, Type::Integer)),
        NodeKind::FloatLiteral(_) => Ok(set_type(ctx, node, Type::Float)),

        NodeKind::ResolvedName { symbol, .. } => {
            let ty = match ctx.symbols[symbol].kind.clone() {
                SymbolKind::Value(value) => value.type_of(),
                SymbolKind::Expression(expr_node) => solve_expr(ctx, expr_node)?,
                SymbolKind::Type(ty) => ty,
                SymbolKind::TypeExpression(type_node) => solve_type_expr(ctx, type_node)?,
                SymbolKind::FnParameter { ty, .. } | SymbolKind::SelfFunction { ty, .. } => {
                    ty.ok_or_else(|| MandaError::new(ErrorKind::InvalidTypeResolving).with_line(line))?
                }
            };
            Ok(set_type(ctx, node, ty))
        }

        NodeKind::Negate(inner) => {
            let inner_ty = solve_expr(ctx, inner)?;
            match inner_ty {
                Type::Float => {
                    ctx.fragment.nodes[node].kind = NodeKind::FloatingPointNegate(inner);
                    Ok(set_type(ctx, node, Type::Float))
                }
                Type::Integer => {
                    ctx.fragment.nodes[node].kind = NodeKind::IntegerNegate(inner);
                    Ok(set_type(ctx, node, Type::Integer))
                }
                _ => Err(MandaError::new(ErrorKind::UnaryMinusShouldHaveNumericalOperand).with_line(line)),
            }
        }

        NodeKind::BooleanNot(inner) => {
            let inner_ty = solve_expr(ctx, inner)?;
            if !matches!(inner_ty, Type::Boolean) {
                return Err(MandaError::new(ErrorKind::BooleanNotShouldHaveBooleanOperand).with_line(line));
            }
            Ok(set_type(ctx, node, Type::Boolean))
        }

        NodeKind::Arith(op, left, right) => {
            let lt = solve_expr(ctx, left)?;
            let rt = solve_expr(ctx, right)?;
            if !ctx.composites.types_eq(lt, rt) {
                return Err(MandaError::new(ErrorKind::OperandsShouldHaveSameType).with_line(line));
            }
            match lt {
                Type::Float => {
                    ctx.fragment.nodes[node].kind = NodeKind::FloatingPointArith(op, left, right);
                    Ok(set_type(ctx, node, Type::Float))
                }
                Type::Integer => {
                    ctx.fragment.nodes[node].kind = NodeKind::IntegerArith(op, left, right);
                    Ok(set_type(ctx, node, Type::Integer))
                }
                _ => Err(MandaError::new(ErrorKind::OperandsShouldHaveNumericalTypes).with_line(line)),
            }
        }

        NodeKind::Compare(op, left, right) => {
            let lt = solve_expr(ctx, left)?;
            let rt = solve_expr(ctx, right)?;
            if !ctx.composites.types_eq(lt, rt) {
                return Err(MandaError::new(ErrorKind::OperandsShouldHaveSameType).with_line(line));
            }
            let equality_op = matches!(op, CmpOp::EqualsTo | CmpOp::NotEqualsTo);
            match lt {
                Type::Boolean if equality_op => {
                    ctx.fragment.nodes[node].kind = match op {
                        CmpOp::EqualsTo => NodeKind::BooleanEqualsTo(left, right),
                        _ => NodeKind::BooleanNotEqualsTo(left, right),
                    };
                    Ok(set_type(ctx, node, Type::Boolean))
                }
                Type::Float => {
                    ctx.fragment.nodes[node].kind = NodeKind::FloatingPointCompare(op, left, right);
                    Ok(set_type(ctx, node, Type::Boolean))
                }
                Type::Integer => {
                    ctx.fragment.nodes[node].kind = NodeKind::IntegerCompare(op, left, right);
                    Ok(set_type(ctx, node, Type::Boolean))
                }
                _ => Err(MandaError::new(ErrorKind::OperandsShouldHaveNumericalTypes).with_line(line)),
            }
        }

        NodeKind::BooleanAnd(left, right) | NodeKind::BooleanOr(left, right) => {
            let lt = solve_expr(ctx, left)?;
            let rt = solve_expr(ctx, right)?;
            if !matches!(lt, Type::Boolean) || !matches!(rt, Type::Boolean) {
                return Err(MandaError::new(ErrorKind::OperandsShouldHaveBooleanType).with_line(line));
            }
            Ok(set_type(ctx, node, Type::Boolean))
        }

        NodeKind::Subexpression(inner) => {
            let ty = solve_expr(ctx, inner)?;
            Ok(set_type(ctx, node, ty))
        }

        NodeKind::Conditional { cond, then_branch, else_branch } => {
            let cond_ty = solve_expr(ctx, cond)?;
            if !matches!(cond_ty, Type::Boolean) {
                return Err(MandaError::new(ErrorKind::ConditionShouldBeBoolean).with_line(line));
            }
            let then_ty = solve_expr(ctx, then_branch)?;
            let else_ty = solve_expr(ctx, else_branch)?;
            if !ctx.composites.types_eq(then_ty, else_ty) {
                return Err(MandaError::new(ErrorKind::ConditionalExpressionTypesMismatch).with_line(line));
            }
            Ok(set_type(ctx, node, then_ty))
        }

        NodeKind::ResolvedFunctionLit { params, result_ty, body, self_symbol, .. } => {
            let result_type = solve_type_expr(ctx, result_ty)?;

            if params.len() > ctx.max_function_params {
                return Err(MandaError::new(ErrorKind::NotEnoughMemory).with_line(line));
            }

            let mut param_types: SmallVec<[Type; 16]> = SmallVec::with_capacity(params.len());
            for param in &params {
                let ty = solve_type_expr(ctx, param.type_expr)?;
                if let SymbolKind::FnParameter { ty: slot, .. } = &mut ctx.symbols[param.symbol].kind {
                    *slot = Some(ty);
                }
                param_types.push(ty);
            }

            let composite = ctx.composites.alloc(CompositeType::Function { params: param_types, result: result_type });
            let func_type = Type::Composite(composite);

            if let SymbolKind::SelfFunction { ty: slot, .. } = &mut ctx.symbols[self_symbol].kind {
                *slot = Some(func_type);
            }

            let body_ty = solve_expr(ctx, body)?;
            if !ctx.composites.types_eq(body_ty, result_type) {
                return Err(MandaError::new(ErrorKind::MismatchFunctionTypeAndExpression).with_line(line));
            }

            Ok(set_type(ctx, node, func_type))
        }

        NodeKind::ResolvedFunctionCall { callee, args } => {
            let callee_ty = solve_expr(ctx, callee)?;
            let Type::Composite(composite_id) = callee_ty else {
                return Err(MandaError::new(ErrorKind::ExpectedFunctionToCall).with_line(line));
            };
            let (param_types, result_type) = match ctx.composites.get(composite_id) {
                CompositeType::Function { params, result } => (params.clone(), *result),
                CompositeType::Vector { .. } => {
                    return Err(MandaError::new(ErrorKind::ExpectedFunctionToCall).with_line(line));
                }
            };
            if args.len() != param_types.len() {
                return Err(MandaError::new(ErrorKind::MismatchParametersAndArgumentsCount).with_line(line));
            }
            for (arg, expected) in args.iter().zip(param_types.iter()) {
                let arg_ty = solve_expr(ctx, *arg)?;
                if !ctx.composites.types_eq(arg_ty, *expected) {
                    return Err(MandaError::new(ErrorKind::MismatchParameterAndArgumentTypes).with_line(line));
                }
            }
            Ok(set_type(ctx, node, result_type))
        }

        _ => Err(MandaError::new(ErrorKind::InvalidAstNodeToSolveType).with_line(line)),
    }
}

/// Solves a type-position subtree, producing the [`Type`] it denotes. Also writes the result
/// into the node's own `ty` slot via [`set_type`], same as [`solve_expr`], so a type-position
/// node is just as reachable-and-typed as any value node once solving finishes.
pub fn solve_type_expr(ctx: &mut SolveCtx, node: NodeId) -> Result<Type> {
    let line = ctx.fragment.nodes[node].line;
    let kind = ctx.fragment.nodes[node].kind.clone();
    match kind {
        NodeKind::ResolvedName { symbol, .. } => match ctx.symbols[symbol].kind.clone() {
            SymbolKind::Type(ty) => Ok(set_type(ctx, node, ty)),
            _ => Err(MandaError::new(ErrorKind::TypeNameExpected).with_line(line)),
        },

        NodeKind::TypeFunction { params, result } => {
            let mut param_types: SmallVec<[Type; 16]> = SmallVec::with_capacity(params.len());
            for param in &params {
                param_types.push(solve_type_expr(ctx, *param)?);
            }
            let result_type = solve_type_expr(ctx, result)?;
            let composite = ctx.composites.alloc(CompositeType::Function { params: param_types, result: result_type });
            Ok(set_type(ctx, node, Type::Composite(composite)))
        }

        NodeKind::TypeVector { elem } => {
            let elem_type = solve_type_expr(ctx, elem)?;
            let composite = ctx.composites.alloc(CompositeType::Vector { elem: elem_type });
            Ok(set_type(ctx, node, Type::Composite(composite)))
        }

        _ => Err(MandaError::new(ErrorKind::InvalidAstNodeToSolveType).with_line(line)),
    }
}
