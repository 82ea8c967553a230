/*!
Recursive‑descent parser for Imp surface syntax.

Consumes the token slice produced by [`Scanner`](crate::scanner::Scanner) and
builds an owned [`Program`]. Identifier lexemes are copied into the AST, so the
tree outlives the source buffer. The first syntax error aborts the parse; there
is no recovery. Nesting deeper than [`MAX_DEPTH`] is a syntax error, which keeps
both parsing and later evaluation off the end of the stack.

### Logging Policy

| Location                     | Level  | Purpose                                   |
|------------------------------|--------|-------------------------------------------|
| `Parser::new`, `parse`       | `info` | Lifecycle milestones.                     |
| `statement`                  | `debug`| High‑level descent into grammar branches. |

--------------------------------------------------------------------------------
Grammar (EBNF)
--------------

```text
program        → statement* EOF ;
statement      → assignStmt | ifStmt | whileStmt | returnStmt ;
assignStmt     → IDENT "=" expression ";" ;
ifStmt         → "if" "(" expression ")" block ;
whileStmt      → "while" "(" expression ")" block ;
returnStmt     → "return" expression ";" ;
block          → "{" statement* "}" ;
expression     → logic_or ;
logic_or       → logic_and ( "or" logic_and )* ;
logic_and      → equality  ( "and" equality )* ;
equality       → term ( ( "!=" | "==" ) term )* ;
term           → unary ( ( "-" | "+" ) unary )* ;
unary          → ( "!" | "not" ) unary | primary ;
primary        → INTEGER | "true" | "false" | IDENT | "(" expression ")" ;
```
*/

use crate::error::{ImpError, Result};
use crate::expr::Expr;
use crate::scanner::Scanner;
use crate::stmt::{Program, Stmt};
use crate::token::{Token, TokenType};

use log::{debug, info};

/// Deepest tree the parser will build. Blocks, parentheses, prefix `!` and
/// every operator in a left-associative chain each add one level.
pub const MAX_DEPTH: usize = 256;

/// Top‑level parser over an immutable slice of tokens.
pub struct Parser<'a> {
    tokens: &'a [Token<'a>],
    current: usize,
    depth: usize,
}

impl<'a> Parser<'a> {
    /// Construct a new parser. `tokens` must end with an `EOF` token.
    pub fn new(tokens: &'a [Token<'a>]) -> Self {
        info!("Parser created with {} tokens", tokens.len());

        Self {
            tokens,
            current: 0,
            depth: 0,
        }
    }

    // ───────────────────────── public API ─────────────────────────

    /// Parse an entire program and return its statement list.
    pub fn parse(&mut self) -> Result<Program> {
        info!("Beginning parse phase");

        let mut statements: Program = Vec::new();

        while !self.is_at_end() {
            statements.push(self.statement()?);
        }

        info!("Parsed {} top-level statements", statements.len());

        Ok(statements)
    }

    // ───────────────────────── statement rules ────────────────────

    fn statement(&mut self) -> Result<Stmt> {
        debug!("Entering statement at line {}", self.peek().line);

        if self.matches(TokenType::IF) {
            self.if_statement()
        } else if self.matches(TokenType::WHILE) {
            self.while_statement()
        } else if self.matches(TokenType::RETURN) {
            self.return_statement()
        } else if self.matches(TokenType::IDENTIFIER) {
            self.assign_statement()
        } else {
            Err(ImpError::parse(self.peek().line, "Expected statement"))
        }
    }

    fn assign_statement(&mut self) -> Result<Stmt> {
        let name: &Token<'_> = self.previous();

        self.consume(TokenType::EQUAL, "Expected '=' after variable name")?;
        let value: Expr = self.expression()?;
        self.consume(TokenType::SEMICOLON, "Expected ';' after assignment")?;

        Ok(Stmt::Assign(name.lexeme.to_string(), value))
    }

    fn if_statement(&mut self) -> Result<Stmt> {
        let condition: Expr = self.condition("if")?;
        let body: Vec<Stmt> = self.block()?;

        Ok(Stmt::If(condition, body))
    }

    fn while_statement(&mut self) -> Result<Stmt> {
        let condition: Expr = self.condition("while")?;
        let body: Vec<Stmt> = self.block()?;

        Ok(Stmt::While(condition, body))
    }

    fn return_statement(&mut self) -> Result<Stmt> {
        let value: Expr = self.expression()?;

        self.consume(TokenType::SEMICOLON, "Expected ';' after return value")?;

        Ok(Stmt::Return(value))
    }

    /// `"(" expression ")"` following `if` / `while`.
    fn condition(&mut self, keyword: &str) -> Result<Expr> {
        self.consume(
            TokenType::LEFT_PAREN,
            &format!("Expected '(' after '{}'", keyword),
        )?;
        let condition: Expr = self.expression()?;
        self.consume(TokenType::RIGHT_PAREN, "Expected ')' after condition")?;

        Ok(condition)
    }

    fn block(&mut self) -> Result<Vec<Stmt>> {
        self.consume(TokenType::LEFT_BRACE, "Expected '{' before block")?;
        self.enter()?;

        let mut statements: Vec<Stmt> = Vec::new();

        while !self.check(TokenType::RIGHT_BRACE) && !self.is_at_end() {
            statements.push(self.statement()?);
        }

        self.consume(TokenType::RIGHT_BRACE, "Expected '}' after block")?;
        self.leave(1);
        Ok(statements)
    }

    // ───────────────────────── expression rules ───────────────────

    fn expression(&mut self) -> Result<Expr> {
        self.logical_or()
    }

    fn logical_or(&mut self) -> Result<Expr> {
        let mut expr: Expr = self.logical_and()?;
        let mut folds: usize = 0;

        while self.matches(TokenType::OR) {
            self.enter()?;
            folds += 1;
            let right: Expr = self.logical_and()?;
            expr = Expr::or(expr, right);
        }

        self.leave(folds);
        Ok(expr)
    }

    fn logical_and(&mut self) -> Result<Expr> {
        let mut expr: Expr = self.equality()?;
        let mut folds: usize = 0;

        while self.matches(TokenType::AND) {
            self.enter()?;
            folds += 1;
            let right: Expr = self.equality()?;
            expr = Expr::and(expr, right);
        }

        self.leave(folds);
        Ok(expr)
    }

    fn equality(&mut self) -> Result<Expr> {
        let mut expr: Expr = self.term()?;
        let mut folds: usize = 0;

        loop {
            if self.matches(TokenType::EQUAL_EQUAL) {
                self.enter()?;
                folds += 1;
                let right: Expr = self.term()?;
                expr = Expr::eq(expr, right);
            } else if self.matches(TokenType::BANG_EQUAL) {
                self.enter()?;
                folds += 1;
                let right: Expr = self.term()?;
                expr = Expr::not_eq(expr, right);
            } else {
                break;
            }
        }

        self.leave(folds);
        Ok(expr)
    }

    fn term(&mut self) -> Result<Expr> {
        let mut expr: Expr = self.unary()?;
        let mut folds: usize = 0;

        loop {
            if self.matches(TokenType::PLUS) {
                self.enter()?;
                folds += 1;
                let right: Expr = self.unary()?;
                expr = Expr::add(expr, right);
            } else if self.matches(TokenType::MINUS) {
                self.enter()?;
                folds += 1;
                let right: Expr = self.unary()?;
                expr = Expr::sub(expr, right);
            } else {
                break;
            }
        }

        self.leave(folds);
        Ok(expr)
    }

    fn unary(&mut self) -> Result<Expr> {
        if self.matches(TokenType::BANG) || self.matches(TokenType::NOT) {
            self.enter()?;
            let operand: Expr = self.unary()?;
            self.leave(1);
            return Ok(Expr::not(operand));
        }

        self.primary()
    }

    fn primary(&mut self) -> Result<Expr> {
        if self.matches(TokenType::FALSE) {
            return Ok(Expr::BoolLiteral(false));
        }
        if self.matches(TokenType::TRUE) {
            return Ok(Expr::BoolLiteral(true));
        }

        if let TokenType::INTEGER(n) = self.peek().token_type {
            self.advance();
            return Ok(Expr::IntLiteral(n));
        }

        if self.matches(TokenType::IDENTIFIER) {
            return Ok(Expr::var(self.previous().lexeme));
        }

        if self.matches(TokenType::LEFT_PAREN) {
            self.enter()?;
            let expr: Expr = self.expression()?;

            self.consume(TokenType::RIGHT_PAREN, "Expected ')' after expression")?;
            self.leave(1);

            return Ok(expr);
        }

        Err(ImpError::parse(self.peek().line, "Expected expression"))
    }

    // ────────────────────── utility helpers ───────────────────────

    /// Descend one nesting level, failing once [`MAX_DEPTH`] is reached.
    /// Errors abort the whole parse, so no level is released on that path.
    fn enter(&mut self) -> Result<()> {
        if self.depth >= MAX_DEPTH {
            debug!("Nesting limit of {} hit at line {}", MAX_DEPTH, self.peek().line);

            return Err(ImpError::parse(self.peek().line, "Too much nesting"));
        }

        self.depth += 1;
        Ok(())
    }

    #[inline(always)]
    fn leave(&mut self, levels: usize) {
        self.depth -= levels;
    }

    #[inline(always)]
    fn matches(&mut self, ttype: TokenType) -> bool {
        if self.check(ttype) {
            self.advance();

            return true;
        }

        false
    }

    #[inline(always)]
    fn consume(&mut self, ttype: TokenType, message: &str) -> Result<&'a Token<'a>> {
        if self.check(ttype) {
            return Ok(self.advance());
        }

        Err(ImpError::parse(self.peek().line, message))
    }

    #[inline(always)]
    fn check(&self, ttype: TokenType) -> bool {
        if self.is_at_end() {
            return false;
        }

        self.peek().token_type == ttype
    }

    #[inline(always)]
    fn advance(&mut self) -> &'a Token<'a> {
        if !self.is_at_end() {
            self.current += 1;
        }

        self.previous()
    }

    #[inline(always)]
    fn is_at_end(&self) -> bool {
        matches!(self.peek().token_type, TokenType::EOF)
    }

    #[inline(always)]
    fn peek(&self) -> &'a Token<'a> {
        &self.tokens[self.current]
    }

    #[inline(always)]
    fn previous(&self) -> &'a Token<'a> {
        &self.tokens[self.current - 1]
    }
}

/// Scans and parses `src` in one go. The first lex error is reported.
pub fn parse_source(src: &[u8]) -> Result<Program> {
    let tokens: Vec<Token<'_>> = Scanner::new(src).collect::<Result<_>>()?;

    Parser::new(&tokens).parse()
}
