//! Query entry point: compile a query, run it against raw document bytes and
//! render every result.

use tracing::{debug, trace};

use crate::{
    ast::Source,
    codec::{EncodeOptions, Format},
    error::{Error, Result},
    interpreter::{Interpreter, Program},
    parser::Parser,
    value::Value,
};

/// Runs queries against documents of one format.
///
/// # Examples
///
/// ```
/// use tq_lang::Tq;
///
/// let input = br#"
/// [servers.alpha]
/// ip = "10.0.0.1"
///
/// [servers.beta]
/// ip = "10.0.0.2"
/// "#;
///
/// let tq = Tq::default();
/// let results = tq.run(input, "['servers'][]['ip']").unwrap();
/// assert_eq!(results, vec!["10.0.0.1", "10.0.0.2"]);
/// ```
#[derive(Debug, Clone, Default)]
pub struct Tq {
    format: Format,
    options: EncodeOptions,
}

impl Tq {
    pub fn new(format: Format, options: EncodeOptions) -> Self {
        Tq { format, options }
    }

    pub fn format(&self) -> Format {
        self.format
    }

    pub fn options(&self) -> &EncodeOptions {
        &self.options
    }

    /// Checks that the query is lexically and syntactically valid.
    pub fn validate(&self, query: &str) -> Result<()> {
        compile(query).map(|_| ())
    }

    /// Runs `query` against the document in `input`.
    ///
    /// The query is compiled before the document is decoded, so a malformed
    /// query fails without touching the input. String results are returned
    /// verbatim; every other result is encoded with the configured codec and
    /// trimmed.
    #[tracing::instrument(level = "debug", skip(self, input), fields(input_len = input.len(), format = ?self.format))]
    pub fn run(&self, input: &[u8], query: &str) -> Result<Vec<String>> {
        let program = compile(query)?;
        debug!(stages = program.stages().len(), "compiled query");

        let document = self.format.codec().decode(input)?;
        let results = program.execute(document)?;
        trace!(results = results.len(), "executed query");

        results.iter().map(|value| self.render(value)).collect()
    }

    fn render(&self, value: &Value) -> Result<String> {
        match value {
            Value::String(s) => Ok(s.clone()),
            other => {
                let text = self.format.codec().encode(other, &self.options)?;
                Ok(text.trim().to_string())
            }
        }
    }
}

/// Compiles a query string into an executable program.
pub fn compile(query: &str) -> Result<Program> {
    let source = Source::new(query);
    let root = Parser::new(&source)?.parse()?;
    let mut interpreter = Interpreter::new();
    let program = interpreter.interpret(&root)?.clone();
    Ok(program)
}

/// Syntax-checks a query without running it.
///
/// # Examples
///
/// ```
/// let err = tq_lang::validate("['interfaces'][0").unwrap();
/// assert!(err.to_string().ends_with("but got 'EOF'"));
/// assert!(tq_lang::validate(".['interfaces'][0]").is_none());
/// ```
pub fn validate(query: &str) -> Option<Error> {
    compile(query).err()
}

/// Runs a query against a TOML document with default layout options.
pub fn run(input: &[u8], query: &str) -> Result<Vec<String>> {
    Tq::default().run(input, query)
}
