//! Module `scanner` implements a one‑pass, streaming lexer for Imp source text.
//!
//! It transforms a byte slice (`&[u8]`) into a sequence of `Token<'a>`s, skipping whitespace
//! and comments, and emitting exactly one `EOF` token at the end. Designed as a `FusedIterator`,
//! it can be chained safely with other iterator adapters.
//!
//! # Token Recognition
//!
//! - Single‑character tokens: `(`, `)`, `{`, `}`, `;`, `+`, `-`.
//! - One‑or‑two character operators: `!`, `!=`, `=`, `==`.
//! - Integer literals: ASCII digit runs that fit in an `i64`.
//! - Identifiers/keywords: alphanumeric/_ sequences, resolved via a perfect‑hash `KEYWORDS` map.
//! - Comments: `//` to end of line, skipped with `memchr`.
//! - Errors: any unexpected character yields `ImpError::lex(line, message)`; scanning resumes
//!   after it, so one pass reports every bad character. Multi‑byte UTF‑8 characters are
//!   reported once, invalid bytes in hex.
//!
//! # Example
//!
//! ```rust
//! use imp_interpreter::scanner::Scanner;
//!
//! let source = b"x = 1; // example";
//! for result in Scanner::new(source) {
//!     match result {
//!         Ok(token) => println!("{}", token),
//!         Err(err) => eprintln!("Lex error: {}", err),
//!     }
//! }
//! ```

use crate::error::{ImpError, Result};
use crate::token::{Token, TokenType};
use log::{debug, info};
use memchr::memchr;
use phf::phf_map;
use std::iter::FusedIterator;

// ─────────────────────────────────────────────────────────────────────────────
// Static keyword map (compile‑time perfect hash)
// ─────────────────────────────────────────────────────────────────────────────

static KEYWORDS: phf::Map<&'static [u8], TokenType> = phf_map! {
    b"and"    => TokenType::AND,
    b"false"  => TokenType::FALSE,
    b"if"     => TokenType::IF,
    b"not"    => TokenType::NOT,
    b"or"     => TokenType::OR,
    b"return" => TokenType::RETURN,
    b"true"   => TokenType::TRUE,
    b"while"  => TokenType::WHILE,
};

/// A single pass **scanner / lexer** that converts raw bytes into a
/// sequence of [`Token`]s.  The lifetime `'a` ties every emitted token’s
/// `lexeme` slice back to the original source buffer.
pub struct Scanner<'a> {
    src: &'a [u8],              // entire source file
    start: usize,               // index of the *first* byte of the current lexeme
    curr: usize,                // index *one past* the last byte examined
    line: usize,                // 1‑based line counter (\n increments)
    pending: Option<TokenType>, // recognised token kind waiting to be emitted
}

impl<'a> Scanner<'a> {
    /// Create a new lexer over `src`.
    #[inline]
    pub fn new(src: &'a [u8]) -> Self {
        info!("Scanner created over {} bytes", src.len());

        Self {
            src,
            start: 0,
            curr: 0,
            line: 1,
            pending: None,
        }
    }

    // ───────────────────────────── primitive helpers ────────────────────────

    #[inline(always)]
    const fn len(&self) -> usize {
        self.src.len()
    }

    #[inline(always)]
    fn is_at_end(&self) -> bool {
        self.curr >= self.len()
    }

    /// Advance one byte and return it.  Callers guard with [`is_at_end`].
    #[inline(always)]
    fn advance(&mut self) -> u8 {
        let b = self.src[self.curr];
        self.curr += 1;
        b
    }

    /// Peek at the current byte without consuming it.  Returns `0` past EOF.
    #[inline(always)]
    fn peek(&self) -> u8 {
        if self.is_at_end() {
            0
        } else {
            self.src[self.curr]
        }
    }

    /// Conditionally consume a byte **iff** it matches `expected`.
    #[inline(always)]
    fn match_byte(&mut self, expected: u8) -> bool {
        if !self.is_at_end() && self.peek() == expected {
            self.advance();
            true
        } else {
            false
        }
    }

    /// Current lexeme as text. Every byte accepted into a lexeme is ASCII.
    fn lexeme(&self) -> &'a str {
        let src: &'a [u8] = self.src;
        std::str::from_utf8(&src[self.start..self.curr]).unwrap_or("")
    }

    /// Renders the unexpected byte `b` at `self.start`. A well-formed UTF-8
    /// sequence is consumed whole and shown as its character; a stray byte is
    /// shown in hex.
    fn unexpected_char(&mut self, b: u8) -> String {
        let width: usize = match b {
            0xC2..=0xDF => 2,
            0xE0..=0xEF => 3,
            0xF0..=0xF4 => 4,
            _ => 1,
        };
        let end: usize = (self.start + width).min(self.len());

        match std::str::from_utf8(&self.src[self.start..end]) {
            Ok(ch) if width > 1 || b.is_ascii() => {
                self.curr = end;
                ch.to_string()
            }

            _ => format!("{:#04x}", b),
        }
    }

    // ───────────────────────────── core lexing ─────────────────────────────

    /// Scan a *single* token starting at `self.curr`.  Whitespace and
    /// comments return `Ok(())` with `pending = None`.
    fn scan_token(&mut self) -> Result<()> {
        let b = self.advance();

        match b {
            // ── single‑character punctuators ──────────────────────────────
            b'(' => self.pending = Some(TokenType::LEFT_PAREN),
            b')' => self.pending = Some(TokenType::RIGHT_PAREN),
            b'{' => self.pending = Some(TokenType::LEFT_BRACE),
            b'}' => self.pending = Some(TokenType::RIGHT_BRACE),
            b';' => self.pending = Some(TokenType::SEMICOLON),
            b'+' => self.pending = Some(TokenType::PLUS),
            b'-' => self.pending = Some(TokenType::MINUS),

            // ── one‑or‑two character operators ───────────────────────────
            b'!' => {
                let tt = if self.match_byte(b'=') {
                    TokenType::BANG_EQUAL
                } else {
                    TokenType::BANG
                };

                self.pending = Some(tt);
            }

            b'=' => {
                let tt = if self.match_byte(b'=') {
                    TokenType::EQUAL_EQUAL
                } else {
                    TokenType::EQUAL
                };

                self.pending = Some(tt);
            }

            // ── whitespace / newline ─────────────────────────────────────
            b' ' | b'\r' | b'\t' => {
                return Ok(());
            }

            b'\n' => {
                self.line += 1;

                return Ok(());
            }

            // ── comments (// … until newline) ────────────────────────────
            b'/' => {
                if self.match_byte(b'/') {
                    if let Some(pos) = memchr(b'\n', &self.src[self.curr..]) {
                        self.curr += pos;
                    } else {
                        self.curr = self.len();
                    }

                    return Ok(());
                }

                return Err(ImpError::lex(self.line, "Unexpected character: /"));
            }

            b'0'..=b'9' => {
                return self.parse_integer();
            }

            b'a'..=b'z' | b'A'..=b'Z' | b'_' => {
                self.parse_identifier();
            }

            _ => {
                return Err(ImpError::lex(
                    self.line,
                    format!("Unexpected character: {}", self.unexpected_char(b)),
                ));
            }
        }

        Ok(())
    }

    /// Parse an integer literal. Values outside `i64` are rejected.
    fn parse_integer(&mut self) -> Result<()> {
        while self.peek().is_ascii_digit() {
            self.advance();
        }

        let text: &str = self.lexeme();

        let n: i64 = text.parse::<i64>().map_err(|_| {
            ImpError::lex(self.line, format!("Integer literal out of range: {}", text))
        })?;

        self.pending = Some(TokenType::INTEGER(n));

        Ok(())
    }

    /// Parse an identifier and decide if it is a **keyword** or a generic
    /// `IDENTIFIER` token.
    fn parse_identifier(&mut self) {
        while {
            let c: u8 = self.peek();
            c.is_ascii_alphanumeric() || c == b'_'
        } {
            self.advance();
        }

        let slice: &[u8] = &self.src[self.start..self.curr];

        let tt: TokenType = KEYWORDS
            .get(slice)
            .cloned()
            .unwrap_or(TokenType::IDENTIFIER);

        self.pending = Some(tt);
    }
}

// ───────────────────────── Iterator implementation ─────────────────────────

impl<'a> Iterator for Scanner<'a> {
    type Item = Result<Token<'a>>;

    fn next(&mut self) -> Option<Self::Item> {
        while self.curr <= self.len() {
            // Emit exactly one EOF then terminate.
            if self.curr == self.len() {
                self.curr += 1;
                return Some(Ok(Token::new(TokenType::EOF, "", self.line)));
            }

            self.start = self.curr;
            self.pending = None;

            if let Err(e) = self.scan_token() {
                return Some(Err(e));
            }

            if let Some(tt) = self.pending.take() {
                debug!("Scanned token ({:?}) on line {}", tt, self.line);

                return Some(Ok(Token::new(tt, self.lexeme(), self.line)));
            }
            // Otherwise it was whitespace / comment → continue loop.
        }

        None // already yielded EOF
    }
}

impl<'a> FusedIterator for Scanner<'a> {}
