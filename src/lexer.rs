use std::collections::HashMap;
use std::iter::FusedIterator;

use lazy_static::lazy_static;

use crate::error::{LexError, LexErrorKind, ScanResult};
use crate::token::{Literal, Token, TokenType};

lazy_static! {
    static ref KEYWORDS: HashMap<&'static str, TokenType> = HashMap::from([
        ("and", TokenType::And),
        ("class", TokenType::Class),
        ("else", TokenType::Else),
        ("false", TokenType::False),
        ("for", TokenType::For),
        ("fun", TokenType::Fun),
        ("if", TokenType::If),
        ("nil", TokenType::Nil),
        ("or", TokenType::Or),
        ("print", TokenType::Print),
        ("return", TokenType::Return),
        ("super", TokenType::Super),
        ("this", TokenType::This),
        ("true", TokenType::True),
        ("var", TokenType::Var),
        ("while", TokenType::While),
    ]);
}

/// Scan `source` lazily. Shorthand for [`Scanner::new`].
pub fn scan(source: &str) -> Scanner<'_> {
    Scanner::new(source)
}

/// Forward-only scanner over a source text.
///
/// Each call to `next` advances past whitespace and comments until one token
/// or one error is produced. Malformed input never stops the scan; the error
/// is yielded and scanning resumes after the offending construct. Once the
/// end of text is reached the scanner is spent.
pub struct Scanner<'a> {
    source: &'a str,
    start: usize,
    current: usize,
    line: u32,
}

impl<'a> Scanner<'a> {
    pub fn new(source: &'a str) -> Self {
        Self {
            source,
            start: 0,
            current: 0,
            line: 1,
        }
    }

    pub fn line(&self) -> u32 {
        self.line
    }

    /// Dispatch on the character just consumed. `None` means the character
    /// began whitespace or a comment and nothing is produced for it.
    fn scan_token(&mut self, c: char) -> Option<ScanResult<'a>> {
        let result = match c {
            ' ' | '\r' | '\t' => return None,
            '\n' => {
                self.line += 1;
                return None;
            }
            '(' => self.make_token(TokenType::LeftParen),
            ')' => self.make_token(TokenType::RightParen),
            '{' => self.make_token(TokenType::LeftBrace),
            '}' => self.make_token(TokenType::RightBrace),
            ';' => self.make_token(TokenType::Semicolon),
            ',' => self.make_token(TokenType::Comma),
            '.' => self.make_token(TokenType::Dot),
            '-' => self.make_token(TokenType::Minus),
            '+' => self.make_token(TokenType::Plus),
            '*' => self.make_token(TokenType::Star),
            '!' => {
                if self.match_next('=') {
                    self.make_token(TokenType::BangEqual)
                } else {
                    self.make_token(TokenType::Bang)
                }
            }
            '=' => {
                if self.match_next('=') {
                    self.make_token(TokenType::EqualEqual)
                } else {
                    self.make_token(TokenType::Equal)
                }
            }
            '<' => {
                if self.match_next('=') {
                    self.make_token(TokenType::LessEqual)
                } else {
                    self.make_token(TokenType::Less)
                }
            }
            '>' => {
                if self.match_next('=') {
                    self.make_token(TokenType::GreaterEqual)
                } else {
                    self.make_token(TokenType::Greater)
                }
            }
            '/' => {
                if self.match_next('/') {
                    self.line_comment();
                    return None;
                }
                if self.match_next('*') {
                    return self.block_comment();
                }
                self.make_token(TokenType::Slash)
            }
            '"' => self.string(),
            '0'..='9' => self.number(),
            'a'..='z' | 'A'..='Z' | '_' => self.identifier(),
            _ => {
                // Skip the whole character so a multi-byte one is reported once.
                let character = self.source[self.start..].chars().next().unwrap_or(c);
                self.current = self.start + character.len_utf8();
                self.error(LexErrorKind::UnexpectedCharacter {
                    character,
                    offset: self.start,
                })
            }
        };

        Some(result)
    }

    fn is_end(&self) -> bool {
        self.current >= self.source.len()
    }

    fn next_char(&mut self) -> char {
        self.current += 1;
        self.source.as_bytes()[self.current - 1] as char
    }

    fn peek_char(&self) -> char {
        if self.is_end() {
            return '\0';
        }
        self.source.as_bytes()[self.current] as char
    }

    fn peek_next_char(&self) -> char {
        if self.current + 1 >= self.source.len() {
            return '\0';
        }
        self.source.as_bytes()[self.current + 1] as char
    }

    fn match_next(&mut self, expected: char) -> bool {
        if self.is_end() {
            return false;
        }
        if self.source.as_bytes()[self.current] as char != expected {
            return false;
        }
        self.current += 1;
        true
    }

    fn lexeme(&self) -> &'a str {
        &self.source[self.start..self.current]
    }

    fn make_token(&self, token_type: TokenType) -> ScanResult<'a> {
        self.make_literal_token(token_type, Literal::None)
    }

    fn make_literal_token(&self, token_type: TokenType, literal: Literal<'a>) -> ScanResult<'a> {
        let token = Token::new(token_type, self.lexeme(), literal, self.line);
        tracing::trace!(%token, line = self.line, "scanned token");
        Ok(token)
    }

    fn error(&self, kind: LexErrorKind) -> ScanResult<'a> {
        tracing::debug!(line = self.line, error = %kind, "lexical error");
        Err(LexError::new(self.line, kind))
    }

    // The newline is left for dispatch so it is counted there.
    fn line_comment(&mut self) {
        while self.peek_char() != '\n' && !self.is_end() {
            let _ = self.next_char();
        }
    }

    fn block_comment(&mut self) -> Option<ScanResult<'a>> {
        while !(self.peek_char() == '*' && self.peek_next_char() == '/') {
            if self.is_end() {
                return Some(self.error(LexErrorKind::UnterminatedComment));
            }
            if self.next_char() == '\n' {
                self.line += 1;
            }
        }

        // Consume the closing "*/".
        self.current += 2;
        None
    }

    fn string(&mut self) -> ScanResult<'a> {
        while self.peek_char() != '"' && !self.is_end() {
            if self.next_char() == '\n' {
                self.line += 1;
            }
        }

        if self.is_end() {
            return self.error(LexErrorKind::UnterminatedString);
        }

        // Consume the closing quote.
        let _ = self.next_char();
        let value = &self.source[self.start + 1..self.current - 1];
        self.make_literal_token(TokenType::String, Literal::String(value))
    }

    fn number(&mut self) -> ScanResult<'a> {
        while self.peek_char().is_ascii_digit() {
            let _ = self.next_char();
        }

        // A trailing '.' without digits belongs to the next token.
        if self.peek_char() == '.' && self.peek_next_char().is_ascii_digit() {
            let _ = self.next_char();

            while self.peek_char().is_ascii_digit() {
                let _ = self.next_char();
            }
        }

        let lexeme = self.lexeme();
        match lexeme.parse::<f64>() {
            Ok(value) => self.make_literal_token(TokenType::Number, Literal::Number(value)),
            Err(_) => self.error(LexErrorKind::InvalidNumber(lexeme.to_string())),
        }
    }

    fn identifier(&mut self) -> ScanResult<'a> {
        while self.peek_char().is_ascii_alphanumeric() || self.peek_char() == '_' {
            let _ = self.next_char();
        }

        let lexeme = self.lexeme();
        match KEYWORDS.get(lexeme) {
            Some(&keyword) => self.make_token(keyword),
            None => self.make_literal_token(TokenType::Identifier, Literal::Identifier(lexeme)),
        }
    }
}

impl<'a> Iterator for Scanner<'a> {
    type Item = ScanResult<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        while !self.is_end() {
            self.start = self.current;
            let c = self.next_char();
            if let Some(result) = self.scan_token(c) {
                return Some(result);
            }
        }
        None
    }
}

impl FusedIterator for Scanner<'_> {}
