use thiserror::Error;

use crate::{
    ast::{Filter, IntegerLiteral, Query, Root, Selector, Source, Span, StringLiteral, Token, TokenKind},
    lexer::{LexErrors, Lexer},
};

/// What the parser expected and did not find.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ParseErrorKind {
    #[error("expected '.' or '[' to parse query element")]
    QueryElement,

    #[error("expected ']' to terminate selector")]
    SelectorUnterminated,
}

/// A syntax error with the lexeme it stumbled on.
///
/// The lexeme is `EOF` when the query ended early; the caret then points one
/// past the last character.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{}", self.render())]
pub struct ParseError {
    kind: ParseErrorKind,
    lexeme: String,
    query: Source,
    offset: usize,
}

impl ParseError {
    pub fn new(kind: ParseErrorKind, lexeme: impl Into<String>, query: Source, offset: usize) -> Self {
        ParseError {
            kind,
            lexeme: lexeme.into(),
            query,
            offset,
        }
    }

    pub fn kind(&self) -> ParseErrorKind {
        self.kind
    }

    pub fn lexeme(&self) -> &str {
        &self.lexeme
    }

    pub fn offset(&self) -> usize {
        self.offset
    }

    fn render(&self) -> String {
        let message = format!("Parser error: {} but got '{}'", self.kind, self.lexeme);
        if self.query.is_empty() {
            message
        } else {
            self.query.mark(self.offset, &message)
        }
    }
}

/// Recursive-descent parser over whitespace-free lexemes.
///
/// Keeps a cursor into the token buffer and never reads past either end;
/// running out of tokens is reported as `EOF`.
pub struct Parser<'a> {
    source: &'a Source,
    tokens: Vec<Token>,
    current: usize,
}

impl<'a> Parser<'a> {
    /// Tokenizes `source`; lexical errors stop here, before any parsing.
    pub fn new(source: &'a Source) -> Result<Self, LexErrors> {
        let tokens = Lexer::tokenize(source)?;
        Ok(Parser::from_tokens(source, tokens))
    }

    /// Builds a parser over already scanned tokens. Whitespace is dropped.
    pub fn from_tokens(source: &'a Source, tokens: Vec<Token>) -> Self {
        let tokens = tokens
            .into_iter()
            .filter(|t| t.kind != TokenKind::Whitespace)
            .collect();
        Parser {
            source,
            tokens,
            current: 0,
        }
    }

    /// Parse a complete query
    pub fn parse(&mut self) -> Result<Root, ParseError> {
        let query = self.parse_query()?;
        Ok(Root { query })
    }

    fn parse_query(&mut self) -> Result<Query, ParseError> {
        let mut filters = vec![];
        while !self.is_at_end() {
            filters.push(self.parse_filter()?);
        }
        Ok(Query { filters })
    }

    fn parse_filter(&mut self) -> Result<Filter, ParseError> {
        if self.matches(TokenKind::Dot) {
            Ok(Filter::Identity)
        } else if self.matches(TokenKind::ArrayOpen) {
            Ok(Filter::Selector(self.parse_selector()?))
        } else {
            Err(self.error_at_current(ParseErrorKind::QueryElement))
        }
    }

    fn parse_selector(&mut self) -> Result<Selector, ParseError> {
        // Inside brackets, we can have:
        // 1. Nothing -> Iterator
        // 2. String -> Key
        // 3. Colon -> Span without a left bound
        // 4. Integer -> Index, or the left bound of a Span when a colon follows
        let selector = if self.check(TokenKind::ArrayClose) {
            Selector::Iterator
        } else if self.matches(TokenKind::String) {
            Selector::Key(StringLiteral::new(self.previous_lexeme()))
        } else if self.matches(TokenKind::Colon) {
            Selector::Span(self.parse_span(None))
        } else if self.matches(TokenKind::Integer) {
            let index = IntegerLiteral::new(self.previous_lexeme());
            if self.matches(TokenKind::Colon) {
                Selector::Span(self.parse_span(Some(index)))
            } else {
                Selector::Index(index)
            }
        } else {
            return Err(self.error_at_current(ParseErrorKind::SelectorUnterminated));
        };

        self.consume(TokenKind::ArrayClose, ParseErrorKind::SelectorUnterminated)?;
        Ok(selector)
    }

    /// Parses what follows the colon of a span.
    fn parse_span(&mut self, left: Option<IntegerLiteral>) -> Span {
        let right = if self.matches(TokenKind::Integer) {
            Some(IntegerLiteral::new(self.previous_lexeme()))
        } else {
            None
        };
        Span::new(left, right)
    }

    fn consume(&mut self, kind: TokenKind, error: ParseErrorKind) -> Result<Token, ParseError> {
        if self.check(kind) {
            Ok(self.advance())
        } else {
            Err(self.error_at_current(error))
        }
    }

    fn error_at_current(&self, kind: ParseErrorKind) -> ParseError {
        let (lexeme, offset) = match self.peek() {
            Some(token) => (token.lexeme(self.source), token.start),
            None => ("EOF".to_string(), self.source.len()),
        };
        ParseError::new(kind, lexeme, self.source.clone(), offset)
    }

    fn matches(&mut self, kind: TokenKind) -> bool {
        if self.check(kind) {
            self.advance();
            true
        } else {
            false
        }
    }

    fn check(&self, kind: TokenKind) -> bool {
        self.peek().is_some_and(|t| t.kind == kind)
    }

    fn advance(&mut self) -> Token {
        if !self.is_at_end() {
            self.current += 1;
        }
        self.previous()
    }

    fn is_at_end(&self) -> bool {
        self.current >= self.tokens.len()
    }

    fn peek(&self) -> Option<Token> {
        self.tokens.get(self.current).copied()
    }

    /// The most recently consumed token, or an empty `Undefined` token before
    /// anything was consumed.
    fn previous(&self) -> Token {
        self.current
            .checked_sub(1)
            .and_then(|i| self.tokens.get(i).copied())
            .unwrap_or(Token::new(TokenKind::Undefined, 0, 0))
    }

    fn previous_lexeme(&self) -> String {
        self.previous().lexeme(self.source)
    }
}

/// Tokenizes and parses a query string in one go.
pub fn parse_query(source: &Source) -> Result<Root, crate::Error> {
    let mut parser = Parser::new(source)?;
    Ok(parser.parse()?)
}
