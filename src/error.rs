use crate::token::Token;

/// One unit of scanner output: a token, or a lexical error with its line.
///
/// Use `is_ok`/`is_err` to discriminate. `unwrap` on an error result (or
/// `unwrap_err` on a token result) is caller misuse and panics.
pub type ScanResult<'a> = Result<Token<'a>, LexError>;

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum LexErrorKind {
    #[error("Encountered unexpected character {character} at position {offset}")]
    UnexpectedCharacter { character: char, offset: usize },
    #[error("Unterminated string")]
    UnterminatedString,
    #[error("Unterminated multi-line comment")]
    UnterminatedComment,
    #[error("Invalid number literal: {0}")]
    InvalidNumber(String),
}

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[error("[line {line}] Error: {kind}")]
pub struct LexError {
    pub line: u32,
    pub kind: LexErrorKind,
}

impl LexError {
    pub fn new(line: u32, kind: LexErrorKind) -> Self {
        Self { line, kind }
    }

    pub fn message(&self) -> String {
        self.kind.to_string()
    }
}
