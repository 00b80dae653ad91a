// tests/lexer_tests.rs

use tq_lang::ast::{Source, Token, TokenKind};
use tq_lang::lexer::{LexErrorKind, Lexer};

fn kinds(query: &str) -> Vec<TokenKind> {
    let source = Source::new(query);
    Lexer::tokenize(&source)
        .unwrap()
        .iter()
        .map(|t| t.kind)
        .collect()
}

fn lexemes(query: &str) -> Vec<String> {
    let source = Source::new(query);
    Lexer::tokenize(&source)
        .unwrap()
        .iter()
        .map(|t| t.lexeme(&source))
        .collect()
}

// ============================================================================
// Single Character Tokens
// ============================================================================

#[test]
fn test_key_chars() {
    let test_cases = vec![
        (".", TokenKind::Dot),
        (":", TokenKind::Colon),
        ("[", TokenKind::ArrayOpen),
        ("]", TokenKind::ArrayClose),
    ];

    for (input, expected) in test_cases {
        assert_eq!(kinds(input), vec![expected], "Failed for input: {}", input);
    }
}

#[test]
fn test_empty_query() {
    let source = Source::new("");
    let mut lexer = Lexer::new(&source);
    assert!(!lexer.scan());
    assert_eq!(lexer.scan_all(false), (vec![], true));
}

// ============================================================================
// Strings
// ============================================================================

#[test]
fn test_quoted_strings() {
    assert_eq!(lexemes("'servers'"), vec!["servers"]);
    assert_eq!(lexemes("\"ip address\""), vec!["ip address"]);
    assert_eq!(lexemes("''"), vec![""]);
}

#[test]
fn test_escape_sequences() {
    let test_cases = vec![
        (r#""a\bz""#, "a\u{0008}z"),
        (r#""a\tz""#, "a\tz"),
        (r#""a\nz""#, "a\nz"),
        (r#""a\fz""#, "a\u{000C}z"),
        (r#""a\rz""#, "a\rz"),
        (r#""a\"z""#, "a\"z"),
        (r#"'a\'z'"#, "a'z"),
        (r#""a\\z""#, "a\\z"),
        (r#""é""#, "é"),
        (r#""\U0001F600""#, "\u{1F600}"),
    ];

    for (input, expected) in test_cases {
        assert_eq!(lexemes(input), vec![expected], "Failed for input: {}", input);
    }
}

#[test]
fn test_unknown_escape_passes_through() {
    assert_eq!(lexemes(r#""a\qz""#), vec!["a\\qz"]);
    assert_eq!(lexemes(r#""\uZZZZ""#), vec!["\\uZZZZ"]);
}

#[test]
fn test_other_quote_inside_string() {
    assert_eq!(lexemes(r#"'say "hi"'"#), vec!["say \"hi\""]);
    assert_eq!(lexemes(r#""it's""#), vec!["it's"]);
}

#[test]
fn test_bare_strings() {
    assert_eq!(lexemes("prod-1"), vec!["prod-1"]);
    assert_eq!(lexemes("snake_case"), vec!["snake_case"]);
    assert_eq!(kinds("prod-1"), vec![TokenKind::String]);
}

#[test]
fn test_bare_strings_are_not_unescaped() {
    // The backslash is not a bare key character
    let source = Source::new("a\\n");
    assert!(Lexer::tokenize(&source).is_err());
}

// ============================================================================
// Integers
// ============================================================================

#[test]
fn test_integers() {
    assert_eq!(kinds("0"), vec![TokenKind::Integer]);
    assert_eq!(lexemes("1234"), vec!["1234"]);
}

#[test]
fn test_digits_then_letters_split() {
    assert_eq!(kinds("12ab"), vec![TokenKind::Integer, TokenKind::String]);
    assert_eq!(lexemes("12ab"), vec!["12", "ab"]);
}

// ============================================================================
// Whitespace
// ============================================================================

#[test]
fn test_whitespace_is_retained_on_request() {
    let source = Source::new(". [ 'a' ]");
    let mut lexer = Lexer::new(&source);
    let (tokens, ok) = lexer.scan_all(false);
    assert!(ok);
    let kinds: Vec<TokenKind> = tokens.iter().map(|t| t.kind).collect();
    assert_eq!(
        kinds,
        vec![
            TokenKind::Dot,
            TokenKind::Whitespace,
            TokenKind::ArrayOpen,
            TokenKind::Whitespace,
            TokenKind::String,
            TokenKind::Whitespace,
            TokenKind::ArrayClose,
        ]
    );
}

#[test]
fn test_whitespace_run_is_one_token() {
    let source = Source::new(" \t\n ");
    let mut lexer = Lexer::new(&source);
    assert!(lexer.scan());
    assert_eq!(lexer.token(), Token::new(TokenKind::Whitespace, 0, 4));
    assert!(!lexer.scan());
}

#[test]
fn test_round_trip_with_whitespace() {
    let query = ".[ 'servers' ] [\"prod\"][0 : 2][]";
    let source = Source::new(query);
    let mut lexer = Lexer::new(&source);
    let (tokens, ok) = lexer.scan_all(false);
    assert!(ok);
    let rebuilt: String = tokens.iter().map(|t| t.text(&source)).collect();
    assert_eq!(rebuilt, query);
}

#[test]
fn test_offsets() {
    let source = Source::new(".['ab'][12]");
    let tokens = Lexer::tokenize(&source).unwrap();
    let spans: Vec<(usize, usize)> = tokens.iter().map(|t| (t.start, t.end)).collect();
    assert_eq!(
        spans,
        vec![(0, 1), (1, 2), (2, 6), (6, 7), (7, 8), (8, 10), (10, 11)]
    );
}

// ============================================================================
// Errors
// ============================================================================

#[test]
fn test_disallowed_char() {
    let source = Source::new(".?");
    let errors = Lexer::tokenize(&source).unwrap_err();
    assert_eq!(errors.errors().len(), 1);
    assert_eq!(errors.errors()[0].kind(), LexErrorKind::DisallowedChar);
    assert_eq!(errors.errors()[0].offset(), 1);
    assert_eq!(
        errors.to_string(),
        ".?\n ^\nLexer error: disallowed character"
    );
}

#[test]
fn test_every_disallowed_char_is_reported() {
    let source = Source::new(".?[!]");
    let mut lexer = Lexer::new(&source);
    let (tokens, ok) = lexer.scan_all(true);
    assert!(!ok);
    assert_eq!(tokens.len(), 5);
    let offsets: Vec<usize> = lexer.errors().iter().map(|e| e.offset()).collect();
    assert_eq!(offsets, vec![1, 3]);
}

#[test]
fn test_unterminated_string() {
    let source = Source::new(".['g");
    let errors = Lexer::tokenize(&source).unwrap_err();
    let first = errors.first().unwrap();
    assert_eq!(first.kind(), LexErrorKind::UnterminatedString);
    assert_eq!(
        first.to_string(),
        ".['g\n  ^\nLexer error: unterminated string literal"
    );
}

#[test]
fn test_line_break_inside_string() {
    let source = Source::new("['a\nb']");
    let errors = Lexer::tokenize(&source).unwrap_err();
    assert_eq!(
        errors.first().map(|e| e.kind()),
        Some(LexErrorKind::UnterminatedString)
    );
}

#[test]
fn test_mismatched_quotes_are_unterminated() {
    let source = Source::new("['a\"]");
    let errors = Lexer::tokenize(&source).unwrap_err();
    assert_eq!(errors.errors()[0].kind(), LexErrorKind::UnterminatedString);
}

#[test]
fn test_multiple_errors_render_on_separate_lines() {
    let source = Source::new("?!");
    let errors = Lexer::tokenize(&source).unwrap_err();
    assert_eq!(
        errors.to_string(),
        "?!\n^\nLexer error: disallowed character\n?!\n ^\nLexer error: disallowed character"
    );
}
