//! # tq Query Language - Abstract Syntax Tree
//!
//! This module defines the lexemes and the syntax tree of the tq query
//! language, a small language for navigating TOML configuration documents.
//!
//! ## Architecture Overview
//!
//! - **[tokens]** - Query source buffer and the positioned lexemes scanned from it
//! - **[query]** - Root, query and filter nodes
//! - **[selectors]** - Selector bodies: keys, indices, spans and the iterator
//!
//! ## Grammar
//!
//! ```text
//! root      = query
//! query     = filter*
//! filter    = identity | selector
//! identity  = "."
//! selector  = "[" ( string | integer span? | ":" integer? | ) "]"
//! span      = integer? ":" integer?
//! ```
//!
//! ## Quick Start
//!
//! ```text
//! .['servers']['prod']['ip']
//! ```
//!
//! Selects the `ip` key of the `prod` table nested in `servers`.
//!
//! ## Selectors
//!
//! - `['key']`, `["key"]`, `[key]` - table lookup; a missing key yields nothing
//! - `[3]` - array element; an out-of-range index yields nothing
//! - `[1:3]`, `[1:]`, `[:3]`, `[:]` - half-open sub-array, kept as one array
//! - `[]` - every value of a table or element of an array
//!
//! ## Multiple Results
//!
//! Each filter maps a list of candidate values to a new list, so a query may
//! produce many results:
//!
//! ```text
//! .['servers'][]['ip']
//! ```
//!
//! yields the `ip` of every server table.
pub mod query;
pub mod selectors;
pub mod tokens;

pub use query::{Filter, Query, Root};
pub use selectors::{IntegerLiteral, NotANumber, Selector, Span, StringLiteral};
pub use tokens::{Source, Token, TokenKind};
