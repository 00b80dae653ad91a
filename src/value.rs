use std::collections::BTreeMap;

pub use toml::value::Datetime;

/// Key/value mapping of a table. Keys iterate in sorted order.
pub type Table = BTreeMap<String, Value>;

/// A decoded configuration document or any part of it.
///
/// This is the closed set of shapes the query filters operate on. Values are
/// produced by a document codec and never mutated by a query; filters only
/// move them into new candidate lists.
///
/// # Examples
///
/// ```
/// use tq_lang::value::{Table, Value};
///
/// // Scalars
/// let name = Value::from("alpha");
/// let port = Value::Integer(8080);
///
/// // Collections
/// let ports = Value::Array(vec![Value::Integer(80), Value::Integer(443)]);
///
/// let mut server = Table::new();
/// server.insert("name".to_string(), name);
/// server.insert("ports".to_string(), ports);
/// let server = Value::Table(server);
///
/// assert_eq!(server.type_name(), "table");
/// assert_eq!(port.type_name(), "integer");
/// ```
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    /// Mapping of keys to values
    Table(Table),

    /// Ordered sequence of values (possibly heterogeneous)
    Array(Vec<Value>),

    /// UTF-8 string
    String(String),

    /// Signed 64-bit integer
    Integer(i64),

    /// 64-bit float
    Float(f64),

    /// Boolean (true/false)
    Boolean(bool),

    /// Offset date-time, local date-time, local date or local time
    Datetime(Datetime),
}

impl Value {
    /// Human-readable name of the value's shape, used in diagnostics.
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Table(_) => "table",
            Value::Array(_) => "array",
            Value::String(_) => "string",
            Value::Integer(_) => "integer",
            Value::Float(_) => "float",
            Value::Boolean(_) => "boolean",
            Value::Datetime(_) => "datetime",
        }
    }

    pub fn as_table(&self) -> Option<&Table> {
        match self {
            Value::Table(table) => Some(table),
            _ => None,
        }
    }

    pub fn as_array(&self) -> Option<&[Value]> {
        match self {
            Value::Array(items) => Some(items.as_slice()),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s),
            _ => None,
        }
    }

    /// Get a table entry by key
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.as_table().and_then(|table| table.get(key))
    }

    /// Get an array element by position
    pub fn index(&self, index: usize) -> Option<&Value> {
        self.as_array().and_then(|items| items.get(index))
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::String(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::String(s)
    }
}

impl From<i64> for Value {
    fn from(n: i64) -> Self {
        Value::Integer(n)
    }
}

impl From<f64> for Value {
    fn from(n: f64) -> Self {
        Value::Float(n)
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Boolean(b)
    }
}

impl From<Datetime> for Value {
    fn from(d: Datetime) -> Self {
        Value::Datetime(d)
    }
}

impl From<Vec<Value>> for Value {
    fn from(items: Vec<Value>) -> Self {
        Value::Array(items)
    }
}

impl From<Table> for Value {
    fn from(table: Table) -> Self {
        Value::Table(table)
    }
}
