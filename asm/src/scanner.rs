use crate::token::{Pos, Token, TokenKind};
use std::iter::Peekable;
use std::str::CharIndices;

/// Lazy tokenizer with a single cached token of lookahead.
///
/// Once the input is exhausted every call yields an `Eof` token.
pub struct Scanner<'a> {
    src: &'a str,
    iter: Peekable<CharIndices<'a>>,
    line: usize,
    line_start: usize,
    peeked: Option<Token>,
}

impl<'a> Scanner<'a> {
    pub fn new(src: &'a str) -> Self {
        Scanner {
            src,
            iter: src.char_indices().peekable(),
            line: 1,
            line_start: 0,
            peeked: None,
        }
    }

    /// Watch next token without consuming it
    pub fn peek(&mut self) -> &Token {
        let token = match self.peeked.take() {
            Some(token) => token,
            None => self.scan(),
        };
        self.peeked.insert(token)
    }

    /// Consume next token and return it
    pub fn next(&mut self) -> Token {
        match self.peeked.take() {
            Some(token) => token,
            None => self.scan(),
        }
    }
}

// ----------------------------------------------------------------------------
// Helpers
// ----------------------------------------------------------------------------

impl Scanner<'_> {
    fn peek_nth(&self, n: usize) -> Option<char> {
        self.iter.clone().nth(n).map(|(_, ch)| ch)
    }

    fn offset(&mut self) -> usize {
        match self.iter.peek() {
            Some(&(idx, _)) => idx,
            None => self.src.len(),
        }
    }

    fn pos_at(&self, idx: usize) -> Pos {
        Pos::new(self.line, idx - self.line_start + 1)
    }

    fn consume_while<F: Fn(char) -> bool>(&mut self, cond: F) {
        while self.iter.next_if(|&(_, ch)| cond(ch)).is_some() {}
    }

    /// Skip whitespace and `#` comments
    fn skip_blank(&mut self) {
        while let Some(&(idx, ch)) = self.iter.peek() {
            match ch {
                '\n' => {
                    self.iter.next();
                    self.line += 1;
                    self.line_start = idx + 1;
                }
                ' ' | '\t' | '\r' => {
                    self.iter.next();
                }
                '#' => self.consume_while(|ch| ch != '\n'),
                _ => break,
            }
        }
    }
}

// ----------------------------------------------------------------------------
// Scanner
// ----------------------------------------------------------------------------

impl Scanner<'_> {
    fn scan(&mut self) -> Token {
        self.skip_blank();

        let Some(&(idx, ch0)) = self.iter.peek() else {
            return Token::new(TokenKind::Eof, "", self.pos_at(self.src.len()));
        };
        let pos = self.pos_at(idx);

        // 1. Punctuation
        if let Some(kind) = single_char_token(ch0) {
            self.iter.next();
            return Token::new(kind, ch0, pos);
        }

        // 2. Number literal
        if ch0.is_ascii_digit() {
            let kind = self.scan_number();
            let end = self.offset();
            return Token::new(kind, &self.src[idx..end], pos);
        }

        // 3. Identifier
        if ch0.is_ascii_alphabetic() || ch0 == '_' {
            self.consume_while(|ch| ch.is_ascii_alphanumeric() || ch == '_');
            let end = self.offset();
            return Token::new(TokenKind::Ident, &self.src[idx..end], pos);
        }

        // Error
        self.iter.next();
        Token::new(TokenKind::Invalid, ch0, pos)
    }

    fn scan_number(&mut self) -> TokenKind {
        if let (Some('0'), Some(ch1), Some(ch2)) =
            (self.peek_nth(0), self.peek_nth(1), self.peek_nth(2))
        {
            let prefixed = match ch1 {
                'x' | 'X' => Some((TokenKind::Hex, 16)),
                'b' | 'B' => Some((TokenKind::Bin, 2)),
                'o' | 'O' => Some((TokenKind::Oct, 8)),
                _ => None,
            };
            if let Some((kind, radix)) = prefixed {
                if ch2.is_digit(radix) {
                    self.iter.next(); // consume '0'
                    self.iter.next(); // consume prefix letter
                    self.consume_while(|ch| ch.is_digit(radix));
                    return kind;
                }
            }
        }
        self.consume_while(|ch| ch.is_ascii_digit());
        TokenKind::Dec
    }
}

fn single_char_token(ch: char) -> Option<TokenKind> {
    match ch {
        ',' => Some(TokenKind::Comma),
        '(' => Some(TokenKind::LParen),
        ')' => Some(TokenKind::RParen),
        '%' => Some(TokenKind::Percent),
        '$' => Some(TokenKind::Dollar),
        ':' => Some(TokenKind::Colon),
        '.' => Some(TokenKind::Dot),
        _ => None,
    }
}

/// Parses a standalone literal such as `0x100` in any of the source bases.
pub fn parse_with_prefix(s: &str) -> Option<u32> {
    let mut scanner = Scanner::new(s);
    let token = scanner.next();
    match scanner.next().kind {
        TokenKind::Eof => token.value(),
        _ => None,
    }
}
