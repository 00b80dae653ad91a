use crate::ast::Selector;

/// Top-level node. A program holds exactly one query.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Root {
    pub query: Query,
}

/// An ordered pipeline of filters applied left to right.
///
/// An empty filter list is legal: it leaves the document untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Query {
    pub filters: Vec<Filter>,
}

/// A single pipeline stage.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Filter {
    /// `.` returns its input unchanged
    Identity,

    /// `[...]` selects keys, indices, spans or every child
    Selector(Selector),
}

impl Root {
    pub fn new(filters: Vec<Filter>) -> Self {
        Root {
            query: Query { filters },
        }
    }
}
