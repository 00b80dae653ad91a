//! Inline rendering of document values.
//!
//! Values are printed the way they would appear on the right-hand side of a
//! TOML key/value pair: strings quoted and escaped, arrays in brackets and
//! tables as inline `{ key = value }` tables. The rendering is deterministic
//! (tables iterate in key order) and is what `Display` for [`Value`] produces,
//! so it doubles as the value description in interpreter diagnostics.
//!
//! # Examples
//!
//! ```
//! use tq_lang::value::{Table, Value};
//! use tq_lang::output::to_inline;
//!
//! let mut table = Table::new();
//! table.insert("ip".to_string(), Value::from("10.0.0.1"));
//! table.insert("ports".to_string(), Value::Array(vec![Value::Integer(80)]));
//!
//! assert_eq!(to_inline(&Value::Table(table)), r#"{ ip = "10.0.0.1", ports = [80] }"#);
//! ```

use std::fmt;

use crate::lexer::is_bare_char;
use crate::value::{Table, Value};

pub struct InlinePrinter;

impl InlinePrinter {
    pub fn print(&self, value: &Value) -> String {
        let mut out = String::new();
        self.print_value(value, &mut out);
        out
    }

    fn print_value(&self, value: &Value, out: &mut String) {
        match value {
            Value::String(s) => self.print_string(s, out),
            Value::Integer(n) => out.push_str(&n.to_string()),
            Value::Float(n) => out.push_str(&self.float(*n)),
            Value::Boolean(b) => out.push_str(&b.to_string()),
            Value::Datetime(d) => out.push_str(&d.to_string()),
            Value::Array(items) => self.print_array(items, out),
            Value::Table(table) => self.print_table(table, out),
        }
    }

    fn print_array(&self, items: &[Value], out: &mut String) {
        out.push('[');
        for (i, item) in items.iter().enumerate() {
            if i > 0 {
                out.push_str(", ");
            }
            self.print_value(item, out);
        }
        out.push(']');
    }

    fn print_table(&self, table: &Table, out: &mut String) {
        if table.is_empty() {
            out.push_str("{}");
            return;
        }

        out.push_str("{ ");
        for (i, (key, value)) in table.iter().enumerate() {
            if i > 0 {
                out.push_str(", ");
            }
            out.push_str(&key_repr(key));
            out.push_str(" = ");
            self.print_value(value, out);
        }
        out.push_str(" }");
    }

    fn print_string(&self, s: &str, out: &mut String) {
        out.push('"');
        out.push_str(&escape_string(s));
        out.push('"');
    }

    fn float(&self, n: f64) -> String {
        if n.is_nan() {
            "nan".to_string()
        } else if n.is_infinite() {
            if n > 0.0 { "inf" } else { "-inf" }.to_string()
        } else if n.fract() == 0.0 && n.abs() < 1e16 {
            // Keep floats distinguishable from integers
            format!("{:.1}", n)
        } else {
            n.to_string()
        }
    }
}

/// A key as written in TOML: bare when possible, quoted otherwise.
pub fn key_repr(key: &str) -> String {
    if !key.is_empty() && key.chars().all(is_bare_char) {
        key.to_string()
    } else {
        format!("\"{}\"", escape_string(key))
    }
}

fn escape_string(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            '\u{0008}' => out.push_str("\\b"),
            '\u{000C}' => out.push_str("\\f"),
            c if c.is_control() => out.push_str(&format!("\\u{:04X}", c as u32)),
            c => out.push(c),
        }
    }
    out
}

/// Renders a value as an inline TOML value.
pub fn to_inline(value: &Value) -> String {
    InlinePrinter.print(value)
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&to_inline(self))
    }
}

#[test]
fn test_quoted_keys_and_escapes() {
    let mut table = Table::new();
    table.insert("ip address".to_string(), Value::from("a\"b"));
    table.insert("empty".to_string(), Value::Table(Table::new()));
    assert_eq!(
        to_inline(&Value::Table(table)),
        r#"{ empty = {}, "ip address" = "a\"b" }"#
    );
}

#[test]
fn test_float_keeps_fraction() {
    assert_eq!(to_inline(&Value::Float(3.0)), "3.0");
    assert_eq!(to_inline(&Value::Float(2.5)), "2.5");
}
