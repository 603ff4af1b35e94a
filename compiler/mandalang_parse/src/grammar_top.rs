//! Top-level line dispatch (§4.2): `'let' name '=' expr | 'type' name '=' type | expr`.

use mandalang_diagnostic::{ErrorKind, Result};
use mandalang_ir::{Name, NodeId};
use mandalang_lexer::TokenKind;

use crate::grammar_expr::parse_expr;
use crate::grammar_type::parse_type;
use crate::parser::Parser;

/// The parsed shape of one top-level line, before resolution or typing.
#[derive(Debug)]
pub enum ParsedTop {
    ValueDef { name: Name, expr: NodeId },
    TypeDef { name: Name, type_expr: NodeId },
    Expr(NodeId),
}

pub fn parse_top_level(p: &mut Parser) -> Result<ParsedTop> {
    let _span = tracing::debug_span!("parse_top_level", line = p.line()).entered();
    match p.current.kind {
        TokenKind::Let => {
            p.bump()?;
            let name = p.expect_ident(ErrorKind::ExpectedValueName)?;
            p.expect(&TokenKind::Equals, ErrorKind::ExpectedEquals)?;
            let expr = parse_expr(p)?;
            Ok(ParsedTop::ValueDef { name, expr })
        }
        TokenKind::Type => {
            p.bump()?;
            let name = p.expect_ident(ErrorKind::ExpectedTypeName)?;
            p.expect(&TokenKind::Equals, ErrorKind::ExpectedEquals)?;
            let type_expr = parse_type(p)?;
            Ok(ParsedTop::TypeDef { name, type_expr })
        }
        _ => Ok(ParsedTop::Expr(parse_expr(p)?)),
    }
}
