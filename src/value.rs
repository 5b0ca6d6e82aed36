use std::fmt::{Display, Error, Formatter};

use crate::token::{Literal, Token, TokenType};

#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Number(f64),
    Nil,
    Bool(bool),
    String(String),
}

impl Display for Value {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result<(), Error> {
        match self {
            Value::Number(v) => write!(f, "{}", v),
            Value::Nil => write!(f, "nil"),
            Value::Bool(v) => write!(f, "{}", v),
            Value::String(v) => write!(f, "{}", v),
        }
    }
}

impl Value {
    /// The value a literal-bearing token denotes, if it denotes one.
    pub fn from_token(token: &Token) -> Option<Value> {
        match (token.t, token.literal) {
            (TokenType::Number, Literal::Number(n)) => Some(Value::Number(n)),
            (TokenType::String, Literal::String(s)) => Some(Value::String(s.to_string())),
            (TokenType::True, _) => Some(Value::Bool(true)),
            (TokenType::False, _) => Some(Value::Bool(false)),
            (TokenType::Nil, _) => Some(Value::Nil),
            _ => None,
        }
    }
}
