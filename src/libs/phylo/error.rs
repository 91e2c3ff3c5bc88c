use std::fmt;

/// Newick syntax error with a 1-based source position.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TreeError {
    pub message: String,
    pub line: usize,
    pub column: usize,
    /// Start of the unconsumed input at the failure point
    pub snippet: String,
}

impl fmt::Display for TreeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Newick parse error at line {} column {}:\n{}\nnear: \"{}\"",
            self.line, self.column, self.message, self.snippet
        )
    }
}

impl std::error::Error for TreeError {}
