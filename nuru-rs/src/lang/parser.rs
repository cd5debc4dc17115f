//! Pratt parser for the built-in language.
//!
//! Operator precedence (lowest → highest):
//!   or  →  and  →  equality  →  comparison  →  additive  →
//!   multiplicative  →  prefix  →  primary
//!
//! Errors never abort the parse: each one is recorded as `"Line N: …"`, the
//! parser skips to the next statement terminator, and the statements that did
//! parse are kept.
//!
//! Expression trees are at most [`MAX_DEPTH`] levels tall.  Deeper input,
//! whether nested (`----1`, `((((1))))`) or a long operator chain
//! (`1+1+…+1`), is reported as a parse error so that neither the parser nor
//! the evaluator recurses without bound.

use super::ast::{Expr, InfixOp, PrefixOp, Program, Stmt};
use super::lexer::{Lexer, Token, TokenKind};

/// Tallest expression tree the parser will build.
pub const MAX_DEPTH: usize = 256;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
enum Prec {
    Lowest,
    Or,
    And,
    Equals,
    Compare,
    Sum,
    Product,
    Prefix,
}

fn infix_op(kind: &TokenKind) -> Option<(InfixOp, Prec)> {
    Some(match kind {
        TokenKind::Or => (InfixOp::Or, Prec::Or),
        TokenKind::And => (InfixOp::And, Prec::And),
        TokenKind::Eq => (InfixOp::Eq, Prec::Equals),
        TokenKind::Ne => (InfixOp::Ne, Prec::Equals),
        TokenKind::Lt => (InfixOp::Lt, Prec::Compare),
        TokenKind::Le => (InfixOp::Le, Prec::Compare),
        TokenKind::Gt => (InfixOp::Gt, Prec::Compare),
        TokenKind::Ge => (InfixOp::Ge, Prec::Compare),
        TokenKind::Plus => (InfixOp::Add, Prec::Sum),
        TokenKind::Minus => (InfixOp::Sub, Prec::Sum),
        TokenKind::Star => (InfixOp::Mul, Prec::Product),
        TokenKind::Slash => (InfixOp::Div, Prec::Product),
        TokenKind::Percent => (InfixOp::Rem, Prec::Product),
        _ => return None,
    })
}

pub struct Parser {
    tokens: Vec<Token>,
    pos: usize,
    errors: Vec<String>,
    /// Active `parse_nested` calls.
    depth: usize,
}

impl Parser {
    /// Drain `lexer` and prepare to parse.
    pub fn new(lexer: Lexer) -> Self {
        let mut tokens: Vec<Token> = lexer.collect();
        if tokens.last().map(|t| &t.kind) != Some(&TokenKind::Eof) {
            let line = tokens.last().map_or(1, |t| t.line);
            tokens.push(Token { kind: TokenKind::Eof, line });
        }
        Parser { tokens, pos: 0, errors: Vec::new(), depth: 0 }
    }

    /// Errors collected by [`Parser::parse_program`], in source order.
    pub fn errors(&self) -> &[String] {
        &self.errors
    }

    /// Consume the parser, returning its errors.
    pub fn into_errors(self) -> Vec<String> {
        self.errors
    }

    // ── Token cursor ──────────────────────────────────────────────────────────

    fn current(&self) -> &Token {
        // `new` guarantees a trailing Eof, and `advance` never passes it.
        &self.tokens[self.pos.min(self.tokens.len() - 1)]
    }

    fn kind(&self) -> &TokenKind {
        &self.current().kind
    }

    fn peek_kind(&self) -> &TokenKind {
        let i = (self.pos + 1).min(self.tokens.len() - 1);
        &self.tokens[i].kind
    }

    fn advance(&mut self) -> Token {
        let tok = self.current().clone();
        if tok.kind != TokenKind::Eof {
            self.pos += 1;
        }
        tok
    }

    fn error_here(&self, msg: impl std::fmt::Display) -> String {
        format!("Line {}: {msg}", self.current().line)
    }

    fn expect(&mut self, want: TokenKind, what: &str) -> Result<(), String> {
        if *self.kind() == want {
            self.advance();
            Ok(())
        } else {
            Err(self.error_here(format_args!("expected {what}, found {}", self.kind())))
        }
    }

    /// Skip to just past the next statement terminator.
    fn synchronize(&mut self) {
        while !self.kind().is_terminator() {
            self.advance();
        }
        self.advance();
    }

    // ── Statements ────────────────────────────────────────────────────────────

    /// Parse every statement in the input.
    pub fn parse_program(&mut self) -> Program {
        let mut program = Program::default();
        loop {
            while matches!(self.kind(), TokenKind::Semicolon | TokenKind::Newline) {
                self.advance();
            }
            if *self.kind() == TokenKind::Eof {
                break;
            }
            match self.parse_statement() {
                Ok(stmt) => program.statements.push(stmt),
                Err(msg) => {
                    self.errors.push(msg);
                    self.synchronize();
                }
            }
        }
        program
    }

    fn parse_statement(&mut self) -> Result<Stmt, String> {
        let assigns = *self.peek_kind() == TokenKind::Assign;
        let stmt = match self.kind().clone() {
            TokenKind::Fanya => {
                self.advance();
                let name = match self.kind().clone() {
                    TokenKind::Ident(name) => {
                        self.advance();
                        name
                    }
                    other => {
                        return Err(self.error_here(format_args!(
                            "expected a name after 'fanya', found {other}"
                        )))
                    }
                };
                self.expect(TokenKind::Assign, "'='")?;
                let value = self.parse_expr(Prec::Lowest)?;
                Stmt::Declare { name, value }
            }
            TokenKind::Ident(name) if assigns => {
                self.advance();
                self.advance();
                let value = self.parse_expr(Prec::Lowest)?;
                Stmt::Assign { name, value }
            }
            _ => Stmt::Expr(self.parse_expr(Prec::Lowest)?),
        };
        if !self.kind().is_terminator() {
            return Err(self.error_here(format_args!(
                "expected end of statement, found {}",
                self.kind()
            )));
        }
        Ok(stmt)
    }

    // ── Expressions ───────────────────────────────────────────────────────────

    fn parse_expr(&mut self, min: Prec) -> Result<Expr, String> {
        self.parse_nested(min).map(|(expr, _)| expr)
    }

    fn too_deep(&self) -> String {
        self.error_here("expression too deeply nested")
    }

    /// Parse an expression, returning it with its tree height.
    fn parse_nested(&mut self, min: Prec) -> Result<(Expr, usize), String> {
        if self.depth >= MAX_DEPTH {
            return Err(self.too_deep());
        }
        self.depth += 1;
        let result = self.parse_chain(min);
        self.depth -= 1;
        result
    }

    fn parse_chain(&mut self, min: Prec) -> Result<(Expr, usize), String> {
        let (mut left, mut height) = self.parse_prefix()?;
        while let Some((op, prec)) = infix_op(self.kind()) {
            if prec <= min {
                break;
            }
            self.advance();
            let (right, right_height) = self.parse_nested(prec)?;
            height = height.max(right_height) + 1;
            if height > MAX_DEPTH {
                return Err(self.too_deep());
            }
            left = Expr::Infix { left: Box::new(left), op, right: Box::new(right) };
        }
        Ok((left, height))
    }

    fn parse_prefix(&mut self) -> Result<(Expr, usize), String> {
        let tok = self.current().clone();
        let expr = match tok.kind {
            TokenKind::Int(n) => Expr::Int(n),
            TokenKind::Float(x) => Expr::Float(x),
            TokenKind::Str(s) => Expr::Str(s),
            TokenKind::Ident(name) => Expr::Ident(name),
            TokenKind::Kweli => Expr::Bool(true),
            TokenKind::Sikweli => Expr::Bool(false),
            TokenKind::Tupu => Expr::Null,
            TokenKind::Minus => return self.parse_prefix_op(PrefixOp::Neg),
            TokenKind::Bang => return self.parse_prefix_op(PrefixOp::Not),
            TokenKind::LParen => {
                self.advance();
                let inner = self.parse_nested(Prec::Lowest)?;
                self.expect(TokenKind::RParen, "')'")?;
                return Ok(inner);
            }
            TokenKind::Error(msg) => return Err(self.error_here(msg)),
            other => return Err(self.error_here(format_args!("expected expression, found {other}"))),
        };
        self.advance();
        Ok((expr, 1))
    }

    fn parse_prefix_op(&mut self, op: PrefixOp) -> Result<(Expr, usize), String> {
        self.advance();
        let (right, height) = self.parse_nested(Prec::Prefix)?;
        if height >= MAX_DEPTH {
            return Err(self.too_deep());
        }
        Ok((Expr::Prefix { op, right: Box::new(right) }, height + 1))
    }
}

/// Convenience: lex and parse `src` in one call.
pub fn parse(src: &str) -> (Program, Vec<String>) {
    let mut parser = Parser::new(Lexer::new(src));
    let program = parser.parse_program();
    (program, parser.into_errors())
}

// ── Tests ─────────────────────────────────────────────────────────────────────
