//! Scanner for the Lox scripting language.
//!
//! [`scan`] turns source text into a lazy sequence of [`ScanResult`]s, each
//! either a [`Token`] or a positioned [`LexError`].

pub mod error;
pub mod expr;
pub mod lexer;
pub mod token;
pub mod value;

pub use error::{LexError, LexErrorKind, ScanResult};
pub use expr::Expr;
pub use lexer::{scan, Scanner};
pub use token::{Literal, Token, TokenType};
pub use value::Value;
