//! TOML documents via the `toml` crate.

use super::{CodecError, DocumentCodec, EncodeOptions};
use crate::output::key_repr;
use crate::value::{Table, Value};

#[derive(Debug, Clone, Copy, Default)]
pub struct TomlCodec;

impl DocumentCodec for TomlCodec {
    fn decode(&self, input: &[u8]) -> Result<Value, CodecError> {
        let text = std::str::from_utf8(input)?;
        let table: ::toml::Table = ::toml::from_str(text)?;
        Ok(Value::Table(from_toml_table(table)))
    }

    fn encode(&self, value: &Value, options: &EncodeOptions) -> Result<String, CodecError> {
        let Value::Table(table) = value else {
            // Only tables form documents; everything else renders inline
            return Ok(to_toml(value).to_string());
        };

        if options.inline_tables {
            return Ok(inline_document(table));
        }

        let table = to_toml_table(table);
        let text = if options.multiline_arrays {
            ::toml::to_string_pretty(&table)?
        } else {
            ::toml::to_string(&table)?
        };

        if options.indent_tables {
            Ok(indent_tables(&text, &options.indent_symbol))
        } else {
            Ok(text)
        }
    }
}

/// Convert a `toml::Value` into a document value
pub fn from_toml(v: ::toml::Value) -> Value {
    match v {
        ::toml::Value::String(s) => Value::String(s),
        ::toml::Value::Integer(n) => Value::Integer(n),
        ::toml::Value::Float(n) => Value::Float(n),
        ::toml::Value::Boolean(b) => Value::Boolean(b),
        ::toml::Value::Datetime(d) => Value::Datetime(d),
        ::toml::Value::Array(items) => Value::Array(items.into_iter().map(from_toml).collect()),
        ::toml::Value::Table(table) => Value::Table(from_toml_table(table)),
    }
}

fn from_toml_table(table: ::toml::Table) -> Table {
    table.into_iter().map(|(k, v)| (k, from_toml(v))).collect()
}

/// Convert a document value into a `toml::Value`
pub fn to_toml(v: &Value) -> ::toml::Value {
    match v {
        Value::String(s) => ::toml::Value::String(s.clone()),
        Value::Integer(n) => ::toml::Value::Integer(*n),
        Value::Float(n) => ::toml::Value::Float(*n),
        Value::Boolean(b) => ::toml::Value::Boolean(*b),
        Value::Datetime(d) => ::toml::Value::Datetime(*d),
        Value::Array(items) => ::toml::Value::Array(items.iter().map(to_toml).collect()),
        Value::Table(table) => ::toml::Value::Table(to_toml_table(table)),
    }
}

fn to_toml_table(table: &Table) -> ::toml::Table {
    table.iter().map(|(k, v)| (k.clone(), to_toml(v))).collect()
}

/// Every top-level entry on one line, nested tables inline.
fn inline_document(table: &Table) -> String {
    let mut out = String::new();
    for (key, value) in table {
        out.push_str(&key_repr(key));
        out.push_str(" = ");
        out.push_str(&to_toml(value).to_string());
        out.push('\n');
    }
    out
}

/// Indents table headers by their depth minus one and their keys by their
/// depth. Headers are the only lines starting with `[` in serializer output.
///
/// Lines that begin inside a multiline string are content: they are copied
/// verbatim and never read as headers.
fn indent_tables(text: &str, symbol: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut depth = 0;
    let mut state = StringState::Outside;

    for line in text.lines() {
        let inside = state != StringState::Outside;
        state = scan_line(line, state);
        if inside {
            out.push_str(line);
            out.push('\n');
            continue;
        }

        let level = match table_header(line) {
            Some(header) => {
                depth = key_depth(header);
                depth - 1
            }
            None => depth,
        };
        if !line.is_empty() {
            out.push_str(&symbol.repeat(level));
        }
        out.push_str(line);
        out.push('\n');
    }
    out
}

/// String context carried from one line to the next.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum StringState {
    Outside,
    MultilineBasic,
    MultilineLiteral,
}

/// Follows string delimiters through one line and returns the context the
/// next line starts in. Single-line strings always close on their own line.
fn scan_line(line: &str, mut state: StringState) -> StringState {
    let chars: Vec<char> = line.chars().collect();
    let mut i = 0;

    while i < chars.len() {
        match state {
            StringState::Outside => match chars[i] {
                '"' if opens(&chars[i..], '"') => {
                    state = StringState::MultilineBasic;
                    i += 3;
                }
                '\'' if opens(&chars[i..], '\'') => {
                    state = StringState::MultilineLiteral;
                    i += 3;
                }
                '"' => i = skip_quoted(&chars, i + 1, '"', true),
                '\'' => i = skip_quoted(&chars, i + 1, '\'', false),
                '#' => break,
                _ => i += 1,
            },
            StringState::MultilineBasic => match chars[i] {
                '\\' => i += 2,
                '"' if opens(&chars[i..], '"') => {
                    i = skip_run(&chars, i, '"');
                    state = StringState::Outside;
                }
                _ => i += 1,
            },
            StringState::MultilineLiteral => match chars[i] {
                '\'' if opens(&chars[i..], '\'') => {
                    i = skip_run(&chars, i, '\'');
                    state = StringState::Outside;
                }
                _ => i += 1,
            },
        }
    }
    state
}

fn opens(rest: &[char], quote: char) -> bool {
    rest.len() >= 3 && rest[..3].iter().all(|&c| c == quote)
}

/// Index just past the closing quote of a single-line string.
fn skip_quoted(chars: &[char], mut i: usize, quote: char, escapes: bool) -> usize {
    while i < chars.len() {
        match chars[i] {
            '\\' if escapes => i += 2,
            c if c == quote => return i + 1,
            _ => i += 1,
        }
    }
    i
}

/// Up to two quotes of content may precede a closing delimiter; the whole run
/// ends the string.
fn skip_run(chars: &[char], mut i: usize, quote: char) -> usize {
    while chars.get(i) == Some(&quote) {
        i += 1;
    }
    i
}

fn table_header(line: &str) -> Option<&str> {
    line.strip_prefix("[[")
        .and_then(|rest| rest.strip_suffix("]]"))
        .or_else(|| line.strip_prefix('[').and_then(|rest| rest.strip_suffix(']')))
}

/// Number of segments in a dotted key, ignoring dots inside quotes.
fn key_depth(key: &str) -> usize {
    let mut depth = 1;
    let mut quote: Option<char> = None;
    let mut escaped = false;

    for c in key.chars() {
        match quote {
            Some(q) => {
                if escaped {
                    escaped = false;
                } else if c == '\\' && q == '"' {
                    escaped = true;
                } else if c == q {
                    quote = None;
                }
            }
            None => match c {
                '"' | '\'' => quote = Some(c),
                '.' => depth += 1,
                _ => {}
            },
        }
    }
    depth
}

#[test]
fn test_key_depth() {
    assert_eq!(key_depth("servers"), 1);
    assert_eq!(key_depth("servers.alpha"), 2);
    assert_eq!(key_depth("servers.\"a.b\".c"), 3);
}

#[test]
fn test_indent_tables() {
    let text = "title = \"x\"\n\n[fruit]\nname = \"apple\"\n\n[fruit.geometry]\nshape = \"round\"\n";
    assert_eq!(
        indent_tables(text, "  "),
        "title = \"x\"\n\n[fruit]\n  name = \"apple\"\n\n  [fruit.geometry]\n    shape = \"round\"\n"
    );
}

#[test]
fn test_indent_tables_leaves_multiline_strings_alone() {
    let text = "[server]\nmotd = \"\"\"\nline one\n[banner]\nline three\"\"\"\nport = 80\n";
    assert_eq!(
        indent_tables(text, "  "),
        "[server]\n  motd = \"\"\"\nline one\n[banner]\nline three\"\"\"\n  port = 80\n"
    );

    let text = "[a]\nraw = '''\n  [b]\n'''\n[a.c]\nk = 1\n";
    assert_eq!(
        indent_tables(text, "  "),
        "[a]\n  raw = '''\n  [b]\n'''\n  [a.c]\n    k = 1\n"
    );
}

#[test]
fn test_scan_line_tracks_delimiters() {
    use StringState::*;

    assert_eq!(scan_line("a = '''", Outside), MultilineLiteral);
    assert_eq!(scan_line("x'''' ", MultilineLiteral), Outside);
    assert_eq!(scan_line(r#"a = "\"x\"""#, Outside), Outside);
    assert_eq!(scan_line(r##"a = "#" # """"##, Outside), Outside);
    assert_eq!(scan_line(r#"end \""" more"#, MultilineBasic), MultilineBasic);
    assert_eq!(scan_line(r#"a = """x"""#, Outside), Outside);
}
