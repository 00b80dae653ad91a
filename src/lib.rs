pub mod ast;
pub mod cli;
pub mod codec;
pub mod engine;
pub mod error;
pub mod interpreter;
pub mod lexer;
pub mod output;
pub mod parser;
pub mod value;

pub use ast::{Filter, Query, Root, Selector, Source, Token, TokenKind};
pub use codec::{CodecError, DocumentCodec, EncodeOptions, Format};
pub use engine::{Tq, compile, run, validate};
pub use error::{Error, Result};
pub use interpreter::{InterpretError, Interpreter, Program, Stage};
pub use lexer::{LexError, LexErrorKind, LexErrors, Lexer};
pub use output::to_inline;
pub use parser::{ParseError, ParseErrorKind, Parser};
pub use value::Value;
