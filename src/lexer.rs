use std::fmt;

use thiserror::Error;

use crate::ast::{Source, Token, TokenKind};

/// What went wrong while scanning.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum LexErrorKind {
    #[error("disallowed character")]
    DisallowedChar,

    #[error("unterminated string literal")]
    UnterminatedString,

    /// Reserved for key characters outside `. : [ ]`; the scanner treats
    /// every such character as disallowed today.
    #[error("unsupported key character")]
    UnsupportedKeyChar,
}

/// A lexical error positioned in a copy of the query it came from.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{}", self.query.mark(self.offset, &format!("Lexer error: {}", self.kind)))]
pub struct LexError {
    kind: LexErrorKind,
    query: Source,
    offset: usize,
}

impl LexError {
    pub fn new(kind: LexErrorKind, query: Source, offset: usize) -> Self {
        LexError {
            kind,
            query,
            offset,
        }
    }

    pub fn kind(&self) -> LexErrorKind {
        self.kind
    }

    pub fn offset(&self) -> usize {
        self.offset
    }
}

/// Every lexical error found in one query, in source order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LexErrors(pub Vec<LexError>);

impl LexErrors {
    pub fn errors(&self) -> &[LexError] {
        &self.0
    }

    pub fn first(&self) -> Option<&LexError> {
        self.0.first()
    }
}

impl fmt::Display for LexErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, err) in self.0.iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            write!(f, "{}", err)?;
        }
        Ok(())
    }
}

impl std::error::Error for LexErrors {}

pub struct Lexer<'a> {
    source: &'a Source,
    position: usize,
    current: Token,
    errors: Vec<LexError>,
}

impl<'a> Lexer<'a> {
    pub fn new(source: &'a Source) -> Self {
        Lexer {
            source,
            position: 0,
            current: Token::new(TokenKind::Undefined, 0, 0),
            errors: Vec::new(),
        }
    }

    /// Scans the whole source, skipping whitespace, and fails with every
    /// lexical error found.
    pub fn tokenize(source: &'a Source) -> Result<Vec<Token>, LexErrors> {
        let mut lexer = Lexer::new(source);
        let (tokens, ok) = lexer.scan_all(true);
        if ok {
            Ok(tokens)
        } else {
            Err(LexErrors(lexer.errors))
        }
    }

    /// The most recently scanned token.
    pub fn token(&self) -> Token {
        self.current
    }

    pub fn errors(&self) -> &[LexError] {
        &self.errors
    }

    pub fn errored(&self) -> bool {
        !self.errors.is_empty()
    }

    /// Scans every remaining token. The flag is false when any error was
    /// recorded; the tokens are then unfit for parsing.
    pub fn scan_all(&mut self, ignore_whitespace: bool) -> (Vec<Token>, bool) {
        let mut tokens = Vec::new();
        while self.scan() {
            let token = self.token();
            if ignore_whitespace && token.kind == TokenKind::Whitespace {
                continue;
            }
            tokens.push(token);
        }
        (tokens, !self.errored())
    }

    /// Scans the next token. Returns false once the source is exhausted.
    pub fn scan(&mut self) -> bool {
        let Some(ch) = self.current_char() else {
            return false;
        };

        if let Some(kind) = TokenKind::of_key_char(ch) {
            self.scan_key_char(kind);
            return true;
        }

        match ch {
            '\'' | '"' => self.scan_string(ch),
            c if c.is_ascii_digit() => self.scan_integer(),
            c if is_bare_char(c) => self.scan_bare_string(),
            c if c.is_whitespace() => self.scan_whitespace(),
            _ => {
                // Recorded, then skipped so later characters are checked too
                self.set_token(TokenKind::Undefined, self.position, self.position + 1);
                self.push_error(LexErrorKind::DisallowedChar, self.position);
                self.advance();
            }
        }
        true
    }

    fn current_char(&self) -> Option<char> {
        self.source.get(self.position)
    }

    fn advance(&mut self) {
        self.position += 1;
    }

    fn advance_while(&mut self, accept: impl Fn(char) -> bool) {
        while self.current_char().is_some_and(&accept) {
            self.advance();
        }
    }

    fn set_token(&mut self, kind: TokenKind, start: usize, end: usize) {
        self.current = Token::new(kind, start, end);
    }

    fn push_error(&mut self, kind: LexErrorKind, offset: usize) {
        self.errors
            .push(LexError::new(kind, self.source.clone(), offset));
    }

    fn scan_key_char(&mut self, kind: TokenKind) {
        let start = self.position;
        self.advance();
        self.set_token(kind, start, self.position);
    }

    fn scan_string(&mut self, quote: char) {
        let start = self.position;
        let mut escaped = false;
        self.advance(); // opening quote

        while let Some(ch) = self.current_char() {
            if is_line_break(ch) {
                break;
            }
            self.advance();
            match ch {
                c if c == quote && !escaped => {
                    self.set_token(TokenKind::String, start, self.position);
                    return;
                }
                '\\' => escaped = !escaped,
                _ => escaped = false,
            }
        }

        // Reached a line break or the end of input first
        self.set_token(TokenKind::Undefined, start, self.position);
        self.push_error(LexErrorKind::UnterminatedString, start);
    }

    fn scan_integer(&mut self) {
        let start = self.position;
        self.advance_while(|c| c.is_ascii_digit());
        self.set_token(TokenKind::Integer, start, self.position);
    }

    fn scan_bare_string(&mut self) {
        let start = self.position;
        self.advance_while(is_bare_char);
        self.set_token(TokenKind::String, start, self.position);
    }

    fn scan_whitespace(&mut self) {
        let start = self.position;
        self.advance_while(char::is_whitespace);
        self.set_token(TokenKind::Whitespace, start, self.position);
    }
}

/// TOML bare key characters.
pub fn is_bare_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '-' || c == '_'
}

fn is_line_break(c: char) -> bool {
    c == '\n' || c == '\r'
}

#[test]
fn test_selector_tokens() {
    let source = Source::new(".['servers'][1:]");
    let kinds: Vec<TokenKind> = Lexer::tokenize(&source)
        .unwrap()
        .iter()
        .map(|t| t.kind)
        .collect();
    assert_eq!(
        kinds,
        vec![
            TokenKind::Dot,
            TokenKind::ArrayOpen,
            TokenKind::String,
            TokenKind::ArrayClose,
            TokenKind::ArrayOpen,
            TokenKind::Integer,
            TokenKind::Colon,
            TokenKind::ArrayClose,
        ]
    );
}

#[test]
fn test_escaped_quote_does_not_terminate() {
    let source = Source::new(r#"'it\'s'"#);
    let tokens = Lexer::tokenize(&source).unwrap();
    assert_eq!(tokens.len(), 1);
    assert_eq!(tokens[0].lexeme(&source), "it's");
}

#[test]
fn test_escaped_backslash_before_quote_terminates() {
    let source = Source::new(r#"'a\\'"#);
    let tokens = Lexer::tokenize(&source).unwrap();
    assert_eq!(tokens.len(), 1);
    assert_eq!(tokens[0].lexeme(&source), "a\\");
}

#[test]
fn test_unsupported_key_char_renders() {
    let error = LexError::new(LexErrorKind::UnsupportedKeyChar, Source::new("[a]"), 0);
    assert_eq!(error.to_string(), "[a]\n^\nLexer error: unsupported key character");
}
