//! `expr` and its precedence ladder (§4.2):
//! `expr -> fn-literal | conditional | comparison -> bool_term -> bool_factor -> term -> factor
//! -> unary -> primary`, plus calls.

use mandalang_diagnostic::{ErrorKind, MandaError, Result};
use mandalang_ir::{ArithOp, CmpOp, Name, NodeId, NodeKind, Param};
use mandalang_lexer::TokenKind;

use crate::grammar_type::parse_type;
use crate::parser::Parser;

pub(crate) fn parse_expr(p: &mut Parser) -> Result<NodeId> {
    match p.current.kind {
        TokenKind::Fn => parse_function_literal(p),
        TokenKind::If => parse_conditional(p),
        _ => parse_comparison(p),
    }
}

fn parse_function_literal(p: &mut Parser) -> Result<NodeId> {
    let line = p.line();
    p.bump()?; // 'fn'
    let (params, result_ty) = parse_header(p)?;
    let body = parse_expr(p)
        .map_err(|_| MandaError::new(ErrorKind::ExpectedExpressionAfterFunctionHeader).with_line(p.line()))?;
    Ok(p.alloc(NodeKind::FunctionLit { params, result_ty, body }, line))
}

fn parse_header(p: &mut Parser) -> Result<(Vec<Param>, NodeId)> {
    p.expect(&TokenKind::LParen, ErrorKind::ExpectedLeftParenthesis)?;
    let mut params = Vec::new();
    if !p.at(&TokenKind::RParen) {
        loop {
            params.push(parse_typed_name(p)?);
            if p.eat(&TokenKind::Comma)? {
                continue;
            }
            break;
        }
    }
    p.expect(&TokenKind::RParen, ErrorKind::ExpectedCommaOrRightParenthesis)?;
    p.expect(&TokenKind::Arrow, ErrorKind::ExpectedArrow)?;
    let result_ty = parse_type(p)?;
    Ok((params, result_ty))
}

fn parse_typed_name(p: &mut Parser) -> Result<Param> {
    let type_expr = parse_type(p)?;
    let name = p.expect_ident(ErrorKind::ExpectedParameterName)?;
    Ok(Param { name, type_expr })
}

fn parse_conditional(p: &mut Parser) -> Result<NodeId> {
    let line = p.line();
    p.bump()?; // 'if'
    let cond = parse_expr(p)?;
    p.expect(&TokenKind::Then, ErrorKind::ExpectedKeywordThen)?;
    let then_branch = parse_expr(p)?;
    p.expect(&TokenKind::Else, ErrorKind::ExpectedKeywordElse)?;
    let else_branch = parse_expr(p)?;
    Ok(p.alloc(NodeKind::Conditional { cond, then_branch, else_branch }, line))
}

fn cmp_op(kind: &TokenKind) -> Option<CmpOp> {
    Some(match kind {
        TokenKind::EqEq => CmpOp::EqualsTo,
        TokenKind::NotEq => CmpOp::NotEqualsTo,
        TokenKind::Gt => CmpOp::GreaterThan,
        TokenKind::Ge => CmpOp::GreaterOrEquals,
        TokenKind::Lt => CmpOp::LessThan,
        TokenKind::Le => CmpOp::LessOrEquals,
        _ => return None,
    })
}

fn parse_comparison(p: &mut Parser) -> Result<NodeId> {
    let left = parse_bool_term(p)?;
    let Some(op) = cmp_op(&p.current.kind) else {
        return Ok(left);
    };
    let line = p.line();
    p.bump()?;
    let right = parse_bool_term(p)?;
    // Comparison is non-associative (§4.2, REDESIGN FLAGS): a second comparison operator here
    // would otherwise silently parse as `a < (b < c)`, which is rejected instead.
    if cmp_op(&p.current.kind).is_some() {
        return Err(MandaError::new(ErrorKind::InvalidExpression).with_line(p.line()));
    }
    Ok(p.alloc(NodeKind::Compare(op, left, right), line))
}

fn parse_bool_term(p: &mut Parser) -> Result<NodeId> {
    let mut left = parse_bool_factor(p)?;
    while p.at(&TokenKind::OrOr) {
        let line = p.line();
        p.bump()?;
        let right = parse_bool_factor(p)?;
        left = p.alloc(NodeKind::BooleanOr(left, right), line);
    }
    Ok(left)
}

fn parse_bool_factor(p: &mut Parser) -> Result<NodeId> {
    let mut left = parse_term(p)?;
    while p.at(&TokenKind::AndAnd) {
        let line = p.line();
        p.bump()?;
        let right = parse_term(p)?;
        left = p.alloc(NodeKind::BooleanAnd(left, right), line);
    }
    Ok(left)
}

fn parse_term(p: &mut Parser) -> Result<NodeId> {
    let mut left = parse_factor(p)?;
    loop {
        let op = match p.current.kind {
            TokenKind::Plus => ArithOp::Add,
            TokenKind::Minus => ArithOp::Subtract,
            _ => break,
        };
        let line = p.line();
        p.bump()?;
        let right = parse_factor(p)?;
        left = p.alloc(NodeKind::Arith(op, left, right), line);
    }
    Ok(left)
}

fn parse_factor(p: &mut Parser) -> Result<NodeId> {
    let mut left = parse_unary(p)?;
    loop {
        let op = match p.current.kind {
            TokenKind::Star => ArithOp::Multiply,
            TokenKind::Slash => ArithOp::Divide,
            _ => break,
        };
        let line = p.line();
        p.bump()?;
        let right = parse_unary(p)?;
        left = p.alloc(NodeKind::Arith(op, left, right), line);
    }
    Ok(left)
}

fn parse_unary(p: &mut Parser) -> Result<NodeId> {
    let line = p.line();
    match p.current.kind {
        TokenKind::Plus => {
            p.bump()?;
            // Unary '+' is a no-op (§4.2): it re-enters `unary` and contributes no node.
            parse_unary(p)
        }
        TokenKind::Minus => {
            p.bump()?;
            let operand = parse_unary(p)?;
            Ok(p.alloc(NodeKind::Negate(operand), line))
        }
        TokenKind::Bang => {
            p.bump()?;
            let operand = parse_unary(p)?;
            Ok(p.alloc(NodeKind::BooleanNot(operand), line))
        }
        _ => parse_primary(p),
    }
}

fn parse_primary(p: &mut Parser) -> Result<NodeId> {
    let line = p.line();
    match p.current.kind.clone() {
        TokenKind::Int(value) => {
            p.bump()?;
            Ok(p.alloc(NodeKind::IntLiteral(value), line))
        }
        TokenKind::Float(value) => {
            p.bump()?;
            Ok(p.alloc(NodeKind::FloatLiteral(value), line))
        }
        TokenKind::Ident(text) => {
            p.bump()?;
            let name: Name = p.intern(&text);
            let name_node = p.alloc(NodeKind::Name(name), line);
            parse_call_chain(p, name_node)
        }
        TokenKind::LParen => {
            p.bump()?;
            let inner = parse_expr(p)?;
            p.expect(&TokenKind::RParen, ErrorKind::UnclosedParenthesisInExpression)?;
            let wrapped = p.alloc(NodeKind::Subexpression(inner), line);
            parse_call_chain(p, wrapped)
        }
        _ => Err(MandaError::new(ErrorKind::InvalidExpression).with_line(line)),
    }
}

/// Parses zero or more `call` suffixes, left-associatively: `f(a)(b)` is two chained calls.
fn parse_call_chain(p: &mut Parser, mut callee: NodeId) -> Result<NodeId> {
    while p.at(&TokenKind::LParen) {
        let line = p.line();
        p.bump()?;
        let mut args = Vec::new();
        if !p.at(&TokenKind::RParen) {
            loop {
                args.push(parse_expr(p).map_err(|_| {
                    MandaError::new(ErrorKind::ExpectedArgumentOrRightParenthesis).with_line(p.line())
                })?);
                if p.eat(&TokenKind::Comma)? {
                    continue;
                }
                break;
            }
        }
        p.expect(&TokenKind::RParen, ErrorKind::ExpectedCommaOrRightParenthesis)?;
        callee = p.alloc(NodeKind::FunctionCall { callee, args }, line);
    }
    Ok(callee)
}
