use thiserror::Error;

/// Body of a bracketed filter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Selector {
    /// Table lookup by key
    ///
    /// # Examples
    /// ```text
    /// ['servers']
    /// ["ip address"]
    /// [prod]
    /// ```
    Key(StringLiteral),

    /// Array lookup by position
    ///
    /// # Examples
    /// ```text
    /// [0]
    /// [12]
    /// ```
    Index(IntegerLiteral),

    /// Half-open sub-array
    ///
    /// # Examples
    /// ```text
    /// [1:3]
    /// [2:]
    /// [:5]
    /// [:]
    /// ```
    Span(Span),

    /// `[]` expands every child of a table or array
    Iterator,
}

/// Both bounds are optional and independently omittable.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Span {
    pub left: Option<IntegerLiteral>,
    pub right: Option<IntegerLiteral>,
}

/// A key as written in the query, already unquoted and unescaped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StringLiteral {
    pub value: String,
}

/// Decimal digit text of an index or span bound.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IntegerLiteral {
    pub value: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("'{0}' is not a number")]
pub struct NotANumber(pub String);

impl StringLiteral {
    pub fn new(value: impl Into<String>) -> Self {
        StringLiteral {
            value: value.into(),
        }
    }
}

impl IntegerLiteral {
    pub fn new(value: impl Into<String>) -> Self {
        IntegerLiteral {
            value: value.into(),
        }
    }

    /// Numeric value of the literal.
    ///
    /// Digit runs too large for `usize` saturate to `usize::MAX`, which every
    /// selector treats as out of range. Anything that is not a digit run fails.
    pub fn value(&self) -> Result<usize, NotANumber> {
        if self.value.is_empty() || !self.value.bytes().all(|b| b.is_ascii_digit()) {
            return Err(NotANumber(self.value.clone()));
        }
        Ok(self.value.parse::<usize>().unwrap_or(usize::MAX))
    }
}

impl Span {
    pub fn new(left: Option<IntegerLiteral>, right: Option<IntegerLiteral>) -> Self {
        Span { left, right }
    }
}

#[test]
fn test_integer_literal_saturates() {
    let literal = IntegerLiteral::new("99999999999999999999999999");
    assert_eq!(literal.value(), Ok(usize::MAX));
    assert_eq!(IntegerLiteral::new("42").value(), Ok(42));
}

#[test]
fn test_integer_literal_rejects_non_digits() {
    assert_eq!(
        IntegerLiteral::new("4x").value(),
        Err(NotANumber("4x".to_string()))
    );
    assert!(IntegerLiteral::new("").value().is_err());
}
