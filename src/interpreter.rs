use std::fmt;

use thiserror::Error;

use crate::{
    ast::{Filter, IntegerLiteral, NotANumber, Query, Root, Selector, Span},
    value::Value,
};

/// Errors that can occur while compiling or running a query.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum InterpretError {
    /// A candidate value has a shape the stage cannot select from
    #[error("Interpreter error: cannot query [ {kind} ] ( {value} ) with ( {filter} )")]
    WrongType {
        kind: &'static str,
        value: String,
        filter: String,
    },

    /// An index or span bound that is not a digit run
    #[error("Interpreter error: {0}")]
    NotANumber(#[from] NotANumber),
}

impl InterpretError {
    fn wrong_type(candidate: &Value, stage: &Stage) -> Self {
        InterpretError::WrongType {
            kind: candidate.type_name(),
            value: candidate.to_string(),
            filter: stage.to_string(),
        }
    }
}

/// One compiled pipeline stage.
///
/// Applied to a single candidate, every selecting stage does exactly one of:
/// contribute values, contribute nothing (missing key, index out of range,
/// empty span) or reject the candidate because of its type. Rejections abort
/// the whole pipeline; omissions never do.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Stage {
    Identity,
    Key(String),
    Index(usize),
    Span {
        left: Option<usize>,
        right: Option<usize>,
    },
    Iterator,
}

/// Outcome of a stage applied to one candidate.
enum Selected {
    One(Value),
    Many(Vec<Value>),
    Nothing,
    Rejected(Value),
}

impl Stage {
    /// Name of the stage as shown in diagnostics.
    pub fn name(&self) -> &'static str {
        match self {
            Stage::Identity => "identity",
            Stage::Key(_) => "string",
            Stage::Index(_) => "integer",
            Stage::Span { .. } => "span",
            Stage::Iterator => "iterator",
        }
    }

    /// Maps a candidate list onto the next one.
    pub fn apply(&self, candidates: Vec<Value>) -> Result<Vec<Value>, InterpretError> {
        let mut result = Vec::with_capacity(candidates.len());
        for candidate in candidates {
            match self.select(candidate) {
                Selected::One(value) => result.push(value),
                Selected::Many(values) => result.extend(values),
                Selected::Nothing => {}
                Selected::Rejected(candidate) => {
                    return Err(InterpretError::wrong_type(&candidate, self));
                }
            }
        }
        Ok(result)
    }

    fn select(&self, candidate: Value) -> Selected {
        match (self, candidate) {
            (Stage::Identity, value) => Selected::One(value),

            (Stage::Key(key), Value::Table(mut table)) => match table.remove(key) {
                Some(value) => Selected::One(value),
                None => Selected::Nothing,
            },

            (Stage::Index(index), Value::Array(mut items)) => {
                if *index < items.len() {
                    Selected::One(items.swap_remove(*index))
                } else {
                    Selected::Nothing
                }
            }

            (Stage::Span { left, right }, Value::Array(mut items)) => {
                let len = items.len();
                let left = left.unwrap_or(0);
                let right = right.unwrap_or(len).min(len);
                if left > right || left >= len {
                    return Selected::Nothing;
                }
                items.truncate(right);
                items.drain(..left);
                Selected::One(Value::Array(items))
            }

            (Stage::Iterator, Value::Table(table)) => Selected::Many(table.into_values().collect()),
            (Stage::Iterator, Value::Array(items)) => Selected::Many(items),

            (_, other) => Selected::Rejected(other),
        }
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Stage::Identity | Stage::Iterator => write!(f, "{}", self.name()),
            Stage::Key(key) => write!(f, "{} {:?}", self.name(), key),
            Stage::Index(index) => write!(f, "{} {}", self.name(), index),
            Stage::Span { left, right } => {
                let bound = |b: &Option<usize>| b.map(|n| n.to_string()).unwrap_or_default();
                write!(f, "{} {}:{}", self.name(), bound(left), bound(right))
            }
        }
    }
}

/// A compiled query: the ordered stages and nothing else.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Program {
    stages: Vec<Stage>,
}

impl Program {
    pub fn stages(&self) -> &[Stage] {
        &self.stages
    }

    pub fn is_empty(&self) -> bool {
        self.stages.is_empty()
    }

    /// Runs the pipeline against a whole document.
    ///
    /// Starts from a single candidate holding the document. An empty program
    /// returns that candidate unchanged.
    ///
    /// # Examples
    ///
    /// ```
    /// use tq_lang::{Interpreter, Parser, Value};
    /// use tq_lang::ast::Source;
    /// use tq_lang::value::Table;
    ///
    /// let mut doc = Table::new();
    /// doc.insert("items".to_string(), Value::Array(vec![Value::Integer(10), Value::Integer(20)]));
    ///
    /// let source = Source::new("['items'][1]");
    /// let root = Parser::new(&source).unwrap().parse().unwrap();
    ///
    /// let mut interpreter = Interpreter::new();
    /// let program = interpreter.interpret(&root).unwrap();
    /// assert_eq!(program.execute(Value::Table(doc)).unwrap(), vec![Value::Integer(20)]);
    /// ```
    pub fn execute(&self, document: Value) -> Result<Vec<Value>, InterpretError> {
        self.execute_all(vec![document])
    }

    /// Runs the pipeline against an arbitrary candidate list. The first type
    /// mismatch discards every partial result.
    pub fn execute_all(&self, candidates: Vec<Value>) -> Result<Vec<Value>, InterpretError> {
        self.stages
            .iter()
            .try_fold(candidates, |candidates, stage| stage.apply(candidates))
    }
}

/// Compiles syntax trees into programs.
///
/// Each `interpret` call starts from an empty program, so one interpreter can
/// compile many queries in sequence without stages leaking between them.
#[derive(Debug, Default)]
pub struct Interpreter {
    program: Program,
}

impl Interpreter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn interpret(&mut self, root: &Root) -> Result<&Program, InterpretError> {
        self.program = Program::default();
        self.visit_root(root)?;
        Ok(&self.program)
    }

    fn emit(&mut self, stage: Stage) {
        self.program.stages.push(stage);
    }

    fn visit_root(&mut self, root: &Root) -> Result<(), InterpretError> {
        self.visit_query(&root.query)
    }

    fn visit_query(&mut self, query: &Query) -> Result<(), InterpretError> {
        query
            .filters
            .iter()
            .try_for_each(|filter| self.visit_filter(filter))
    }

    fn visit_filter(&mut self, filter: &Filter) -> Result<(), InterpretError> {
        match filter {
            Filter::Identity => {
                self.emit(Stage::Identity);
                Ok(())
            }
            Filter::Selector(selector) => self.visit_selector(selector),
        }
    }

    fn visit_selector(&mut self, selector: &Selector) -> Result<(), InterpretError> {
        let stage = match selector {
            Selector::Key(literal) => Stage::Key(literal.value.clone()),
            Selector::Index(literal) => Stage::Index(literal.value()?),
            Selector::Span(span) => self.visit_span(span)?,
            Selector::Iterator => Stage::Iterator,
        };
        self.emit(stage);
        Ok(())
    }

    fn visit_span(&self, span: &Span) -> Result<Stage, InterpretError> {
        let bound = |literal: &Option<IntegerLiteral>| literal.as_ref().map(IntegerLiteral::value).transpose();
        Ok(Stage::Span {
            left: bound(&span.left)?,
            right: bound(&span.right)?,
        })
    }
}

#[test]
fn test_interpreter_resets_between_queries() {
    let mut interpreter = Interpreter::new();
    let first = Root::new(vec![Filter::Identity, Filter::Selector(Selector::Iterator)]);
    assert_eq!(interpreter.interpret(&first).unwrap().stages().len(), 2);

    let second = Root::new(vec![Filter::Identity]);
    assert_eq!(interpreter.interpret(&second).unwrap().stages(), &[Stage::Identity]);
}

#[test]
fn test_stage_descriptions() {
    assert_eq!(Stage::Key("persons".to_string()).to_string(), "string \"persons\"");
    assert_eq!(Stage::Span { left: None, right: Some(3) }.to_string(), "span :3");
    assert_eq!(Stage::Iterator.to_string(), "iterator");
}
