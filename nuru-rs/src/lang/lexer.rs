//! Tokenizer for the built-in language.

use std::fmt;

// ── Token ─────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq)]
pub enum TokenKind {
    // Literals
    Int(i64),
    Float(f64),
    Str(String),
    Ident(String),

    // Keywords
    Fanya,
    Kweli,
    Sikweli,
    Tupu,

    // Operators
    Plus,
    Minus,
    Star,
    Slash,
    Percent,
    Bang,
    Assign,
    Eq, // ==
    Ne, // !=
    Lt,
    Le,
    Gt,
    Ge,
    And, // &&
    Or,  // ||

    // Delimiters
    LParen,
    RParen,
    Semicolon,
    Newline,

    /// Malformed input; carries the diagnostic (without line prefix).
    Error(String),
    Eof,
}

impl TokenKind {
    /// Whether this token ends a statement.
    pub fn is_terminator(&self) -> bool {
        matches!(self, TokenKind::Semicolon | TokenKind::Newline | TokenKind::Eof)
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TokenKind::Int(n) => write!(f, "number {n}"),
            TokenKind::Float(x) => write!(f, "number {x}"),
            TokenKind::Str(s) => write!(f, "string \"{s}\""),
            TokenKind::Ident(name) => write!(f, "identifier '{name}'"),
            TokenKind::Fanya => f.write_str("'fanya'"),
            TokenKind::Kweli => f.write_str("'kweli'"),
            TokenKind::Sikweli => f.write_str("'sikweli'"),
            TokenKind::Tupu => f.write_str("'tupu'"),
            TokenKind::Plus => f.write_str("'+'"),
            TokenKind::Minus => f.write_str("'-'"),
            TokenKind::Star => f.write_str("'*'"),
            TokenKind::Slash => f.write_str("'/'"),
            TokenKind::Percent => f.write_str("'%'"),
            TokenKind::Bang => f.write_str("'!'"),
            TokenKind::Assign => f.write_str("'='"),
            TokenKind::Eq => f.write_str("'=='"),
            TokenKind::Ne => f.write_str("'!='"),
            TokenKind::Lt => f.write_str("'<'"),
            TokenKind::Le => f.write_str("'<='"),
            TokenKind::Gt => f.write_str("'>'"),
            TokenKind::Ge => f.write_str("'>='"),
            TokenKind::And => f.write_str("'&&'"),
            TokenKind::Or => f.write_str("'||'"),
            TokenKind::LParen => f.write_str("'('"),
            TokenKind::RParen => f.write_str("')'"),
            TokenKind::Semicolon => f.write_str("';'"),
            TokenKind::Newline => f.write_str("end of line"),
            TokenKind::Error(msg) => f.write_str(msg),
            TokenKind::Eof => f.write_str("end of input"),
        }
    }
}

/// A token and the 1-based line it starts on.
#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    pub kind: TokenKind,
    pub line: usize,
}

// ── Lexer ─────────────────────────────────────────────────────────────────────

pub struct Lexer {
    src: Vec<char>,
    pos: usize,
    line: usize,
    done: bool,
}

impl Lexer {
    pub fn new(src: &str) -> Self {
        Lexer {
            src: src.chars().collect(),
            pos: 0,
            line: 1,
            done: false,
        }
    }

    fn peek(&self) -> Option<char> {
        self.src.get(self.pos).copied()
    }

    fn peek2(&self) -> Option<char> {
        self.src.get(self.pos + 1).copied()
    }

    fn advance(&mut self) -> Option<char> {
        let ch = self.peek();
        if ch.is_some() {
            self.pos += 1;
        }
        ch
    }

    fn eat(&mut self, ch: char) -> bool {
        if self.peek() == Some(ch) {
            self.pos += 1;
            true
        } else {
            false
        }
    }

    /// Skip spaces, tabs, carriage returns and `//` comments (not newlines).
    fn skip_trivia(&mut self) {
        loop {
            match self.peek() {
                Some(' ' | '\t' | '\r') => self.pos += 1,
                Some('/') if self.peek2() == Some('/') => {
                    while !matches!(self.peek(), None | Some('\n')) {
                        self.pos += 1;
                    }
                }
                _ => break,
            }
        }
    }

    fn read_number(&mut self, first: char) -> TokenKind {
        let mut s = String::from(first);
        while let Some(c @ '0'..='9') = self.peek() {
            s.push(c);
            self.pos += 1;
        }
        let is_float = self.peek() == Some('.') && matches!(self.peek2(), Some('0'..='9'));
        if is_float {
            s.push('.');
            self.pos += 1;
            while let Some(c @ '0'..='9') = self.peek() {
                s.push(c);
                self.pos += 1;
            }
            return match s.parse() {
                Ok(x) => TokenKind::Float(x),
                Err(_) => TokenKind::Error(format!("invalid number {s}")),
            };
        }
        match s.parse() {
            Ok(n) => TokenKind::Int(n),
            Err(_) => TokenKind::Error(format!("number too large: {s}")),
        }
    }

    fn read_string(&mut self, quote: char) -> TokenKind {
        let mut s = String::new();
        loop {
            // Strings never span lines, escaped or not.  The newline is left
            // for the next token so line counting stays right.
            if matches!(self.peek(), None | Some('\n')) {
                return TokenKind::Error("unterminated string".to_owned());
            }
            match self.advance() {
                Some('\\') => {
                    if matches!(self.peek(), None | Some('\n')) {
                        return TokenKind::Error("unterminated string".to_owned());
                    }
                    match self.advance() {
                        Some('n') => s.push('\n'),
                        Some('t') => s.push('\t'),
                        Some(c) => s.push(c),
                        None => return TokenKind::Error("unterminated string".to_owned()),
                    }
                }
                Some(c) if c == quote => return TokenKind::Str(s),
                Some(c) => s.push(c),
                None => return TokenKind::Error("unterminated string".to_owned()),
            }
        }
    }

    fn read_word(&mut self, first: char) -> TokenKind {
        let mut s = String::from(first);
        while let Some(c) = self.peek() {
            if c.is_alphanumeric() || c == '_' {
                s.push(c);
                self.pos += 1;
            } else {
                break;
            }
        }
        match s.as_str() {
            "fanya" => TokenKind::Fanya,
            "kweli" => TokenKind::Kweli,
            "sikweli" => TokenKind::Sikweli,
            "tupu" => TokenKind::Tupu,
            _ => TokenKind::Ident(s),
        }
    }

    /// Produce the next token.  After the input is exhausted this keeps
    /// returning [`TokenKind::Eof`].
    pub fn next_token(&mut self) -> Token {
        self.skip_trivia();
        let line = self.line;
        let Some(ch) = self.advance() else {
            return Token { kind: TokenKind::Eof, line };
        };
        let kind = match ch {
            '\n' => {
                self.line += 1;
                TokenKind::Newline
            }
            '+' => TokenKind::Plus,
            '-' => TokenKind::Minus,
            '*' => TokenKind::Star,
            '/' => TokenKind::Slash,
            '%' => TokenKind::Percent,
            '(' => TokenKind::LParen,
            ')' => TokenKind::RParen,
            ';' => TokenKind::Semicolon,
            '=' if self.eat('=') => TokenKind::Eq,
            '=' => TokenKind::Assign,
            '!' if self.eat('=') => TokenKind::Ne,
            '!' => TokenKind::Bang,
            '<' if self.eat('=') => TokenKind::Le,
            '<' => TokenKind::Lt,
            '>' if self.eat('=') => TokenKind::Ge,
            '>' => TokenKind::Gt,
            '&' if self.eat('&') => TokenKind::And,
            '|' if self.eat('|') => TokenKind::Or,
            '"' | '\'' => self.read_string(ch),
            '0'..='9' => self.read_number(ch),
            c if c.is_alphabetic() || c == '_' => self.read_word(c),
            c => TokenKind::Error(format!("unexpected character '{c}'")),
        };
        Token { kind, line }
    }
}

impl Iterator for Lexer {
    type Item = Token;

    /// Yields every token including a single trailing `Eof`, then stops.
    fn next(&mut self) -> Option<Token> {
        if self.done {
            return None;
        }
        let tok = self.next_token();
        if tok.kind == TokenKind::Eof {
            self.done = true;
        }
        Some(tok)
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
