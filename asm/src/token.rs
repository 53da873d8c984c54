use std::fmt;

/// 1-based source position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Pos {
    pub line: usize,
    pub col: usize,
}

impl Pos {
    pub fn new(line: usize, col: usize) -> Self {
        Pos { line, col }
    }
}

impl fmt::Display for Pos {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.line, self.col)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenKind {
    Ident,

    // Integer literals, one kind per base
    Dec, // 42
    Hex, // 0x2a
    Oct, // 0o52
    Bin, // 0b101010

    Comma,   // ','
    LParen,  // '('
    RParen,  // ')'
    Percent, // '%'
    Dollar,  // '$'
    Colon,   // ':'
    Dot,     // '.'

    Invalid,
    Eof,
}

impl TokenKind {
    pub fn radix(self) -> Option<u32> {
        match self {
            TokenKind::Dec => Some(10),
            TokenKind::Hex => Some(16),
            TokenKind::Oct => Some(8),
            TokenKind::Bin => Some(2),
            _ => None,
        }
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            TokenKind::Ident => "identifier",
            TokenKind::Dec => "decimal literal",
            TokenKind::Hex => "hex literal",
            TokenKind::Oct => "octal literal",
            TokenKind::Bin => "binary literal",
            TokenKind::Comma => "`,`",
            TokenKind::LParen => "`(`",
            TokenKind::RParen => "`)`",
            TokenKind::Percent => "`%`",
            TokenKind::Dollar => "`$`",
            TokenKind::Colon => "`:`",
            TokenKind::Dot => "`.`",
            TokenKind::Invalid => "invalid character",
            TokenKind::Eof => "end of input",
        };
        f.write_str(s)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub kind: TokenKind,
    pub text: String,
    pub pos: Pos,
}

impl Token {
    pub fn new(kind: TokenKind, text: impl Into<String>, pos: Pos) -> Self {
        Token {
            kind,
            text: text.into(),
            pos,
        }
    }

    /// Numeric value of a literal, parsed in the base its kind records.
    /// `None` for non-literals and for values that overflow 32 bits.
    pub fn value(&self) -> Option<u32> {
        let radix = self.kind.radix()?;
        let digits = match self.kind {
            TokenKind::Dec => self.text.as_str(),
            _ => self.text.get(2..)?,
        };
        u32::from_str_radix(digits, radix).ok()
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.kind {
            TokenKind::Eof => write!(f, "{}", self.kind),
            _ => write!(f, "{} `{}`", self.kind, self.text),
        }
    }
}

/// What the parser wanted at a syntax error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Expected {
    Kind(TokenKind),
    Literal,
    Statement,
}

impl fmt::Display for Expected {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Expected::Kind(kind) => write!(f, "{kind}"),
            Expected::Literal => f.write_str("integer literal"),
            Expected::Statement => f.write_str("instruction, label or directive"),
        }
    }
}
