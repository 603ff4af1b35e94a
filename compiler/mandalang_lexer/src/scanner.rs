//! A left-to-right scanner over one source line, with one-token pushback.
//!
//! The cursor tracks a byte position into the source and a 1-based line counter, the same shape
//! as a sentinel-terminated cursor over a fixed buffer (§4.1, and the "zero-cost cursor" this is
//! drawn from) — here expressed as ordinary bounds-checked slice indexing rather than an actual
//! NUL sentinel byte, since Rust's `&[u8]` already carries its own length.

use mandalang_diagnostic::{ErrorKind, MandaError, Result};

use crate::token::{Token, TokenKind};

pub struct Scanner<'a> {
    source: &'a [u8],
    pos: usize,
    line: u32,
    pushback: Option<Token>,
}

impl<'a> Scanner<'a> {
    pub fn new(source: &'a str) -> Self {
        Scanner { source: source.as_bytes(), pos: 0, line: 1, pushback: None }
    }

    /// Returns the next token, honoring a pending pushback (§4.1).
    pub fn next(&mut self) -> Result<Token> {
        if let Some(token) = self.pushback.take() {
            return Ok(token);
        }
        self.scan_token()
    }

    /// Un-consumes `token` so the next call to [`Scanner::next`] returns it again. Only one
    /// token of pushback is supported; a second call before the first is drained overwrites it
    /// silently, matching the single-slot pushback described in §4.1 (callers never need more).
    pub fn push_back(&mut self, token: Token) {
        self.pushback = Some(token);
    }

    fn peek_byte(&self) -> Option<u8> {
        self.source.get(self.pos).copied()
    }

    fn peek_at(&self, offset: usize) -> Option<u8> {
        self.source.get(self.pos + offset).copied()
    }

    #[allow(dead_code)]
    fn advance(&mut self) -> Option<u8> {
        let byte = self.peek_byte()?;
        self.pos += 1;
        Some(byte)
    }

    fn skip_whitespace_and_comments(&mut self) {
        loop {
            match self.peek_byte() {
                Some(b' ' | b'\t' | b'\r') => {
                    self.pos += 1;
                }
                Some(b'\n') => {
                    self.pos += 1;
                    self.line += 1;
                }
                Some(b'-') if self.peek_at(1) == Some(b'-') => {
                    match memchr::memchr(b'\n', &self.source[self.pos..]) {
                        Some(offset) => self.pos += offset,
                        None => self.pos = self.source.len(),
                    }
                }
                _ => break,
            }
        }
    }

    fn scan_token(&mut self) -> Result<Token> {
        self.skip_whitespace_and_comments();
        let line = self.line;

        let Some(byte) = self.peek_byte() else {
            return Ok(Token::new(TokenKind::Stop, line));
        };

        if byte.is_ascii_digit() {
            return self.scan_number(line);
        }
        if byte == b'_' || byte.is_ascii_alphabetic() {
            return Ok(self.scan_identifier(line));
        }

        self.pos += 1;
        let kind = match byte {
            b'(' => TokenKind::LParen,
            b')' => TokenKind::RParen,
            b'[' => TokenKind::LBracket,
            b']' => TokenKind::RBracket,
            b',' => TokenKind::Comma,
            b'+' => TokenKind::Plus,
            b'*' => TokenKind::Star,
            b'/' => TokenKind::Slash,
            b'-' => {
                if self.peek_byte() == Some(b'>') {
                    self.pos += 1;
                    TokenKind::Arrow
                } else {
                    TokenKind::Minus
                }
            }
            b'=' => {
                if self.peek_byte() == Some(b'=') {
                    self.pos += 1;
                    TokenKind::EqEq
                } else {
                    TokenKind::Equals
                }
            }
            b'!' => {
                if self.peek_byte() == Some(b'=') {
                    self.pos += 1;
                    TokenKind::NotEq
                } else {
                    TokenKind::Bang
                }
            }
            b'>' => {
                if self.peek_byte() == Some(b'=') {
                    self.pos += 1;
                    TokenKind::Ge
                } else {
                    TokenKind::Gt
                }
            }
            b'<' => {
                if self.peek_byte() == Some(b'=') {
                    self.pos += 1;
                    TokenKind::Le
                } else {
                    TokenKind::Lt
                }
            }
            b'&' if self.peek_byte() == Some(b'&') => {
                self.pos += 1;
                TokenKind::AndAnd
            }
            b'|' if self.peek_byte() == Some(b'|') => {
                self.pos += 1;
                TokenKind::OrOr
            }
            b'&' | b'|' => {
                return Err(MandaError::new(ErrorKind::InvalidOperator)
                    .with_line(line)
                    .with_detail((byte as char).to_string()));
            }
            other => {
                return Err(MandaError::new(ErrorKind::InvalidCharacter)
                    .with_line(line)
                    .with_detail((other as char).to_string()));
            }
        };
        Ok(Token::new(kind, line))
    }

    fn scan_identifier(&mut self, line: u32) -> Token {
        let start = self.pos;
        while matches!(self.peek_byte(), Some(b) if b == b'_' || b.is_ascii_alphanumeric()) {
            self.pos += 1;
        }
        // The slice is built purely from ASCII identifier bytes, so this is always valid UTF-8.
        let text = std::str::from_utf8(&self.source[start..self.pos]).unwrap_or_default();
        match TokenKind::keyword_for(text) {
            Some(keyword) => Token::new(keyword, line),
            None => Token::new(TokenKind::Ident(text.to_string()), line),
        }
    }

    fn scan_number(&mut self, line: u32) -> Result<Token> {
        let start = self.pos;
        let mut is_float = false;

        while matches!(self.peek_byte(), Some(b) if b.is_ascii_digit()) {
            self.pos += 1;
        }

        if self.peek_byte() == Some(b'.') && matches!(self.peek_at(1), Some(b) if b.is_ascii_digit())
        {
            is_float = true;
            self.pos += 1; // consume '.'
            while matches!(self.peek_byte(), Some(b) if b.is_ascii_digit()) {
                self.pos += 1;
            }
        }

        if matches!(self.peek_byte(), Some(b'e' | b'E')) {
            let mark = self.pos;
            self.pos += 1;
            if matches!(self.peek_byte(), Some(b'+' | b'-')) {
                self.pos += 1;
            }
            if matches!(self.peek_byte(), Some(b) if b.is_ascii_digit()) {
                is_float = true;
                while matches!(self.peek_byte(), Some(b) if b.is_ascii_digit()) {
                    self.pos += 1;
                }
            } else {
                self.pos = mark;
                return Err(MandaError::new(ErrorKind::InvalidNumber)
                    .with_line(line)
                    .with_detail(self.text(start)));
            }
        }

        let text = self.text(start);
        if is_float {
            text.parse::<f64>()
                .map(|value| Token::new(TokenKind::Float(value), line))
                .map_err(|_| {
                    MandaError::new(ErrorKind::InvalidNumber).with_line(line).with_detail(text)
                })
        } else {
            text.parse::<i64>()
                .map(|value| Token::new(TokenKind::Int(value), line))
                .map_err(|_| {
                    MandaError::new(ErrorKind::InvalidNumber).with_line(line).with_detail(text)
                })
        }
    }

    fn text(&self, start: usize) -> String {
        std::str::from_utf8(&self.source[start..self.pos]).unwrap_or_default().to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kinds(source: &str) -> Vec<TokenKind> {
        let mut scanner = Scanner::new(source);
        let mut out = Vec::new();
        loop {
            let token = scanner.next().expect("scan should succeed");
            if token.is_stop() {
                break;
            }
            out.push(token.kind);
        }
        out
    }

    #[test]
    fn scans_arithmetic_expression() {
        assert_eq!(
            kinds("1 + 2 * 3"),
            vec![
                TokenKind::Int(1),
                TokenKind::Plus,
                TokenKind::Int(2),
                TokenKind::Star,
                TokenKind::Int(3),
            ]
        );
    }

    #[test]
    fn distinguishes_integer_from_float_literal() {
        assert_eq!(kinds("1"), vec![TokenKind::Int(1)]);
        assert_eq!(kinds("1.5"), vec![TokenKind::Float(1.5)]);
        assert_eq!(kinds("2e3"), vec![TokenKind::Float(2000.0)]);
    }

    #[test]
    fn trailing_dot_without_digit_is_not_part_of_the_number() {
        // "1." has no digit after the dot, so only "1" is a number token; the bare '.' that
        // follows is not a valid token in this language and is reported as a scan error.
        let mut scanner = Scanner::new("1.");
        assert_eq!(scanner.next().unwrap().kind, TokenKind::Int(1));
        assert!(scanner.next().is_err());
    }

    #[test]
    fn recognizes_keywords_but_not_their_prefixes() {
        assert_eq!(kinds("fn"), vec![TokenKind::Fn]);
        assert_eq!(kinds("function"), vec![TokenKind::Ident("function".to_string())]);
    }

    #[test]
    fn pushback_replays_the_last_token() {
        let mut scanner = Scanner::new("+ -");
        let plus = scanner.next().unwrap();
        scanner.push_back(plus.clone());
        assert_eq!(scanner.next().unwrap(), plus);
        assert_eq!(scanner.next().unwrap().kind, TokenKind::Minus);
    }

    #[test]
    fn line_comment_runs_to_end_of_line() {
        assert_eq!(kinds("1 -- comment\n+ 2"), vec![
            TokenKind::Int(1),
            TokenKind::Plus,
            TokenKind::Int(2),
        ]);
    }

    #[test]
    fn newline_increments_line_number() {
        let mut scanner = Scanner::new("1\n2");
        assert_eq!(scanner.next().unwrap().line, 1);
        assert_eq!(scanner.next().unwrap().line, 2);
    }

    #[test]
    fn invalid_character_is_reported_with_detail() {
        let mut scanner = Scanner::new("@");
        let err = scanner.next().unwrap_err();
        assert_eq!(err.kind, ErrorKind::InvalidCharacter);
        assert_eq!(err.detail.as_deref(), Some("@"));
    }

    #[test]
    fn lone_ampersand_is_invalid_operator_not_invalid_character() {
        let mut scanner = Scanner::new("&");
        let err = scanner.next().unwrap_err();
        assert_eq!(err.kind, ErrorKind::InvalidOperator);
    }
}
