use crate::base::error::ExecError;

/// A program and its arguments, parsed from the text after `exec=`.
///
/// The text is split on runs of whitespace. There is no quoting or escaping,
/// so an argument can never contain a space.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandLine {
    program: String,
    args: Vec<String>,
}

impl CommandLine {
    /// Parses `<program> [arg1 arg2 ...]`.
    pub fn parse(s: &str) -> Result<Self, ExecError> {
        let mut fields = s.split_whitespace().map(str::to_string);
        let program = fields.next().ok_or(ExecError::MissingCommand)?;

        Ok(Self {
            program,
            args: fields.collect(),
        })
    }

    pub fn program(&self) -> &str {
        &self.program
    }

    pub fn args(&self) -> &[String] {
        &self.args
    }
}
