use log::debug;
use std::fmt;
use std::mem;

/// The different kinds of tokens recognized by the Imp scanner.
///
/// Variants without data represent punctuation or keyword tokens.
/// `INTEGER(i64)` carries its literal value.
/// `IDENTIFIER` is used for variable names.
/// `EOF` marks the end of input.
#[allow(non_camel_case_types)]
#[derive(Debug, Clone)]
pub enum TokenType {
    /// '('
    LEFT_PAREN,

    /// ')'
    RIGHT_PAREN,

    /// '{'
    LEFT_BRACE,

    /// '}'
    RIGHT_BRACE,

    /// ';'
    SEMICOLON,

    /// '+'
    PLUS,

    /// '-'
    MINUS,

    /// '!'
    BANG,

    /// '!='
    BANG_EQUAL,

    /// '='
    EQUAL,

    /// '=='
    EQUAL_EQUAL,

    /// A variable name
    IDENTIFIER,

    /// An integer literal
    INTEGER(i64),

    /// 'and'
    AND,

    /// 'or'
    OR,

    /// 'not'
    NOT,

    /// 'true'
    TRUE,

    /// 'false'
    FALSE,

    /// 'if'
    IF,

    /// 'while'
    WHILE,

    /// 'return'
    RETURN,

    /// End‑of‑file marker
    EOF,
}

impl TokenType {
    /// Upper-case variant name without payload, as printed by `tokenize`.
    pub fn name(&self) -> &'static str {
        match self {
            TokenType::LEFT_PAREN => "LEFT_PAREN",
            TokenType::RIGHT_PAREN => "RIGHT_PAREN",
            TokenType::LEFT_BRACE => "LEFT_BRACE",
            TokenType::RIGHT_BRACE => "RIGHT_BRACE",
            TokenType::SEMICOLON => "SEMICOLON",
            TokenType::PLUS => "PLUS",
            TokenType::MINUS => "MINUS",
            TokenType::BANG => "BANG",
            TokenType::BANG_EQUAL => "BANG_EQUAL",
            TokenType::EQUAL => "EQUAL",
            TokenType::EQUAL_EQUAL => "EQUAL_EQUAL",
            TokenType::IDENTIFIER => "IDENTIFIER",
            TokenType::INTEGER(_) => "INTEGER",
            TokenType::AND => "AND",
            TokenType::OR => "OR",
            TokenType::NOT => "NOT",
            TokenType::TRUE => "TRUE",
            TokenType::FALSE => "FALSE",
            TokenType::IF => "IF",
            TokenType::WHILE => "WHILE",
            TokenType::RETURN => "RETURN",
            TokenType::EOF => "EOF",
        }
    }
}

impl PartialEq for TokenType {
    /// Two TokenTypes are equal if they share the same variant
    /// (ignoring any inner data). Uses `mem::discriminant` to compare.
    fn eq(&self, other: &Self) -> bool {
        mem::discriminant(self) == mem::discriminant(other)
    }
}

/// A scanned token, including its type, the original lexeme,
/// and the line number where it was found.
#[derive(Debug, Clone, PartialEq)]
pub struct Token<'a> {
    /// The category of this token.
    pub token_type: TokenType,

    /// The exact substring from the source that produced this token.
    pub lexeme: &'a str,

    /// 1‑based line number in the source.
    pub line: usize,
}

impl<'a> Token<'a> {
    pub fn new(token_type: TokenType, lexeme: &'a str, line: usize) -> Self {
        Self {
            token_type,
            lexeme,
            line,
        }
    }
}

impl<'a> fmt::Display for Token<'a> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        debug!(
            "Formatting token: type={:?}, lexeme={}, line={}",
            self.token_type, self.lexeme, self.line
        );

        match &self.token_type {
            TokenType::INTEGER(n) => {
                let mut buf: itoa::Buffer = itoa::Buffer::new();
                write!(f, "INTEGER {} {}", self.lexeme, buf.format(*n))
            }

            other => write!(f, "{} {} null", other.name(), self.lexeme),
        }
    }
}
