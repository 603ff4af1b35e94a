//! Parser core: token management over a one-token-lookahead [`Scanner`].

use mandalang_diagnostic::{ErrorKind, MandaError, Result};
use mandalang_ir::{Fragment, Name, NameInterner, Node, NodeId, NodeKind};
use mandalang_lexer::{Scanner, Token, TokenKind};

pub struct Parser<'a> {
    scanner: Scanner<'a>,
    pub(crate) current: Token,
    pub(crate) fragment: &'a mut Fragment,
    pub(crate) interner: &'a mut NameInterner,
}

impl<'a> Parser<'a> {
    pub fn new(
        source: &'a str,
        fragment: &'a mut Fragment,
        interner: &'a mut NameInterner,
    ) -> Result<Self> {
        let mut scanner = Scanner::new(source);
        let current = scanner.next()?;
        Ok(Parser { scanner, current, fragment, interner })
    }

    pub(crate) fn line(&self) -> u32 {
        self.current.line
    }

    pub(crate) fn alloc(&mut self, kind: NodeKind, line: u32) -> NodeId {
        self.fragment.alloc_node(Node::new(kind, line))
    }

    pub(crate) fn intern(&mut self, text: &str) -> Name {
        self.interner.intern(text)
    }

    /// Advances past the current token, returning it.
    pub(crate) fn bump(&mut self) -> Result<Token> {
        let next = self.scanner.next()?;
        Ok(std::mem::replace(&mut self.current, next))
    }

    pub(crate) fn at(&self, kind: &TokenKind) -> bool {
        std::mem::discriminant(&self.current.kind) == std::mem::discriminant(kind)
    }

    pub(crate) fn eat(&mut self, kind: &TokenKind) -> Result<bool> {
        if self.at(kind) {
            self.bump()?;
            Ok(true)
        } else {
            Ok(false)
        }
    }

    pub(crate) fn expect(&mut self, kind: &TokenKind, on_missing: ErrorKind) -> Result<Token> {
        if self.at(kind) {
            self.bump()
        } else {
            Err(MandaError::new(on_missing).with_line(self.line()))
        }
    }

    pub(crate) fn expect_ident(&mut self, on_missing: ErrorKind) -> Result<Name> {
        if let TokenKind::Ident(text) = self.current.kind.clone() {
            self.bump()?;
            Ok(self.intern(&text))
        } else {
            Err(MandaError::new(on_missing).with_line(self.line()))
        }
    }
}
