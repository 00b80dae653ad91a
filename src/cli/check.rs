//! Execute tq queries against document input

use super::CliError;
use crate::{
    Tq,
    codec::{EncodeOptions, Format},
};

/// Options for one `tq` invocation
#[derive(Debug, Clone)]
pub struct CheckOptions {
    /// The tq query to execute
    pub query: String,
    /// Document input, one entry per file (or stdin)
    pub inputs: Vec<Vec<u8>>,
    /// Format of the input documents and of encoded results
    pub format: Format,
    /// Layout of encoded results
    pub encode: EncodeOptions,
    /// Only validate syntax, don't execute
    pub syntax_only: bool,
}

impl Default for CheckOptions {
    fn default() -> Self {
        CheckOptions {
            query: ".".to_string(),
            inputs: Vec::new(),
            format: Format::default(),
            encode: EncodeOptions::default(),
            syntax_only: false,
        }
    }
}

/// Result of a check operation
#[derive(Debug, PartialEq, Eq)]
pub enum CheckResult {
    /// Syntax validation passed
    SyntaxValid,
    /// Rendered results of every input, in input order
    Success(Vec<String>),
}

/// Execute a tq check operation
pub fn execute_check(options: &CheckOptions) -> Result<CheckResult, CliError> {
    let tq = Tq::new(options.format, options.encode.clone());

    if options.syntax_only {
        tq.validate(&options.query)?;
        return Ok(CheckResult::SyntaxValid);
    }

    if options.inputs.is_empty() {
        return Err(CliError::NoInput);
    }

    let mut output = Vec::new();
    for input in &options.inputs {
        output.extend(tq.run(input, &options.query)?);
    }
    Ok(CheckResult::Success(output))
}
