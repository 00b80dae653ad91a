//! Crate-level error type.

use crate::{codec::CodecError, interpreter::InterpretError, lexer::LexErrors, parser::ParseError};

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error(transparent)]
    Lex(#[from] LexErrors),

    #[error(transparent)]
    Parse(#[from] ParseError),

    #[error(transparent)]
    Interpret(#[from] InterpretError),

    #[error(transparent)]
    Codec(#[from] CodecError),
}

pub type Result<T> = std::result::Result<T, Error>;
