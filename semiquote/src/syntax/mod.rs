//! ECMAScript front-end consumed by the style rules.
//!
//! Produces the three inputs every rule works from: the exact source text,
//! the token list (comments kept as trivia tokens) and a statement tree whose
//! nodes point back into that token list. All of them are addressed by the
//! same byte offsets.

pub mod ast;
pub mod error;
pub mod lexer;
pub mod parser;
pub mod prologue;
pub mod token;

pub use error::SyntaxError;
pub use parser::{parse, ParsedSource};
pub use token::{Token, TokenKind};
