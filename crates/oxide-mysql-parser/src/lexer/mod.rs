//! SQL scanner
//!
//! A hand-written, byte-oriented scanner that produces a stream of tokens.
//! It steps over input one character at a time as defined by the client
//! [`Charset`], and keeps the content of optimizer hint comments visible
//! between [`TokenKind::HintBegin`] and [`TokenKind::HintEnd`] markers.

mod charset;
mod span;
mod token;
mod tokenizer;

pub use charset::{Charset, Collation};
pub use span::Pos;
pub use token::{Keyword, Token, TokenKind};
pub use tokenizer::{scan, LexicalError, Scanner};
