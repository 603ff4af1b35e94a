//! `type` production (§4.2): `name | '(' type ')' | 'fn' '(' ... ')' '->' type | 'vector' '[' type ']'`.

use mandalang_diagnostic::{ErrorKind, MandaError, Result};
use mandalang_ir::{NodeId, NodeKind};
use mandalang_lexer::TokenKind;

use crate::parser::Parser;

pub(crate) fn parse_type(p: &mut Parser) -> Result<NodeId> {
    let line = p.line();
    match p.current.kind.clone() {
        TokenKind::Ident(text) => {
            p.bump()?;
            let name = p.intern(&text);
            Ok(p.alloc(NodeKind::Name(name), line))
        }
        TokenKind::LParen => {
            p.bump()?;
            let inner = parse_type(p)?;
            p.expect(&TokenKind::RParen, ErrorKind::ExpectedRightParenthesis)?;
            Ok(inner)
        }
        TokenKind::Fn => {
            p.bump()?;
            p.expect(&TokenKind::LParen, ErrorKind::ExpectedLeftParenthesis)?;
            let mut params = Vec::new();
            if !p.at(&TokenKind::RParen) {
                loop {
                    params.push(parse_type(p)?);
                    if p.eat(&TokenKind::Comma)? {
                        continue;
                    }
                    break;
                }
            }
            p.expect(&TokenKind::RParen, ErrorKind::ExpectedCommaOrRightParenthesis)?;
            p.expect(&TokenKind::Arrow, ErrorKind::ExpectedArrow)?;
            let result = parse_type(p)?;
            Ok(p.alloc(NodeKind::TypeFunction { params, result }, line))
        }
        TokenKind::Vector => {
            p.bump()?;
            p.expect(&TokenKind::LBracket, ErrorKind::ExpectedLeftSquareBrace)?;
            let elem = parse_type(p)?;
            p.expect(&TokenKind::RBracket, ErrorKind::ExpectedRightSquareBrace)?;
            Ok(p.alloc(NodeKind::TypeVector { elem }, line))
        }
        _ => Err(MandaError::new(ErrorKind::InvalidTypeSyntax).with_line(line)),
    }
}
