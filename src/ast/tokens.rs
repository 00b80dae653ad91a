use std::fmt;

/// The decoded characters of a query string.
///
/// Tokens never copy text out of the query. They keep `start..end` offsets
/// into the `Source` they were scanned from, and render their text on demand.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Source {
    chars: Vec<char>,
}

impl Source {
    pub fn new(text: &str) -> Self {
        Source {
            chars: text.chars().collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.chars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.chars.is_empty()
    }

    pub fn get(&self, offset: usize) -> Option<char> {
        self.chars.get(offset).copied()
    }

    /// Characters in `start..end`, clamped to the buffer.
    pub fn slice(&self, start: usize, end: usize) -> &[char] {
        let end = end.min(self.chars.len());
        let start = start.min(end);
        &self.chars[start..end]
    }

    /// Renders `message` under the query with a caret at `offset`.
    ///
    /// ```
    /// use tq_lang::ast::Source;
    ///
    /// let source = Source::new(".?");
    /// assert_eq!(source.mark(1, "Lexer error: disallowed character"),
    ///            ".?\n ^\nLexer error: disallowed character");
    /// ```
    pub fn mark(&self, offset: usize, message: &str) -> String {
        let mut out = String::with_capacity(self.chars.len() + offset + message.len() + 3);
        out.extend(self.chars.iter());
        out.push('\n');
        out.push_str(&" ".repeat(offset));
        out.push('^');
        out.push('\n');
        out.push_str(message);
        out
    }
}

impl From<&str> for Source {
    fn from(text: &str) -> Self {
        Source::new(text)
    }
}

impl fmt::Display for Source {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.chars.iter().try_for_each(|c| write!(f, "{}", c))
    }
}

/// Lexeme classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenKind {
    /// Produced only alongside a lexer error
    Undefined,

    /// Quoted or bare key
    ///
    /// # Examples
    /// ```text
    /// 'servers'
    /// "ip address"
    /// prod-1
    /// ```
    String,

    /// Run of decimal digits
    Integer,

    /// Identity filter
    Dot,

    /// Span separator inside a selector
    Colon,

    /// Opens a selector
    ArrayOpen,

    /// Closes a selector
    ArrayClose,

    /// Run of whitespace, dropped before parsing
    Whitespace,
}

impl TokenKind {
    /// Kind of a structural character, if `c` is one.
    pub fn of_key_char(c: char) -> Option<TokenKind> {
        match c {
            '.' => Some(TokenKind::Dot),
            ':' => Some(TokenKind::Colon),
            '[' => Some(TokenKind::ArrayOpen),
            ']' => Some(TokenKind::ArrayClose),
            _ => None,
        }
    }
}

/// A positioned lexeme. `start <= end <= source.len()` always holds for tokens
/// produced by the lexer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Token {
    pub kind: TokenKind,
    pub start: usize,
    pub end: usize,
}

impl Token {
    pub fn new(kind: TokenKind, start: usize, end: usize) -> Self {
        Token { kind, start, end }
    }

    /// The raw source text covered by the token.
    pub fn text(&self, source: &Source) -> String {
        source.slice(self.start, self.end).iter().collect()
    }

    /// The rendered lexeme. Quoted strings lose their quotes and have their
    /// escape sequences decoded; everything else is the raw text.
    pub fn lexeme(&self, source: &Source) -> String {
        let chars = source.slice(self.start, self.end);
        match (self.kind, chars) {
            (TokenKind::String, [open, inner @ .., close])
                if (*open == '\'' || *open == '"') && open == close =>
            {
                unescape(inner)
            }
            _ => chars.iter().collect(),
        }
    }
}

fn unescape(chars: &[char]) -> String {
    let mut result = String::with_capacity(chars.len());
    let mut head = 0;

    while head < chars.len() {
        let c = chars[head];
        if c == '\\' {
            if let Some((decoded, width)) = decode_escape(&chars[head + 1..]) {
                result.push(decoded);
                head += 1 + width;
                continue;
            }
        }
        result.push(c);
        head += 1;
    }
    result
}

/// Decodes the escape following a backslash. Returns the character and the
/// number of characters consumed after the backslash.
fn decode_escape(rest: &[char]) -> Option<(char, usize)> {
    match rest.first()? {
        'b' => Some(('\u{0008}', 1)),
        't' => Some(('\t', 1)),
        'n' => Some(('\n', 1)),
        'f' => Some(('\u{000C}', 1)),
        'r' => Some(('\r', 1)),
        '"' => Some(('"', 1)),
        '\'' => Some(('\'', 1)),
        '\\' => Some(('\\', 1)),
        'u' => decode_code_point(rest.get(1..5)?).map(|c| (c, 5)),
        'U' => decode_code_point(rest.get(1..9)?).map(|c| (c, 9)),
        _ => None,
    }
}

fn decode_code_point(digits: &[char]) -> Option<char> {
    if !digits.iter().all(char::is_ascii_hexdigit) {
        return None;
    }
    let hex: String = digits.iter().collect();
    u32::from_str_radix(&hex, 16).ok().and_then(char::from_u32)
}

#[test]
fn test_lexeme_strips_quotes_and_decodes() {
    let source = Source::new(r#"'a\tb\u0041\U0001F600\q'"#);
    let token = Token::new(TokenKind::String, 0, source.len());
    assert_eq!(token.lexeme(&source), "a\tbA\u{1F600}\\q");
    assert_eq!(token.text(&source), r#"'a\tb\u0041\U0001F600\q'"#);
}

#[test]
fn test_short_unicode_escape_passes_through() {
    let source = Source::new(r#""\u12""#);
    let token = Token::new(TokenKind::String, 0, source.len());
    assert_eq!(token.lexeme(&source), "\\u12");
}
