use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TreeError {
    /// Error during parsing (e.g., unbalanced parentheses, missing `;`)
    ParseError {
        /// A human-readable message explaining the error
        message: String,
        /// The line number (1-based)
        line: usize,
        /// The column number (1-based)
        column: usize,
        /// The snippet of input where the error occurred
        snippet: String,
    },
    /// A non-empty line of a label table with fewer than two fields
    MalformedTableRow {
        /// The line number (1-based)
        line: usize,
        /// The offending line
        content: String,
    },
    /// An input artifact could not be opened
    MissingInputFile { path: String, reason: String },
    /// An opened input failed mid-read (I/O error, invalid UTF-8)
    ReadError { path: String, reason: String },
}

impl fmt::Display for TreeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TreeError::ParseError {
                message,
                line,
                column,
                snippet,
            } => {
                write!(
                    f,
                    "Parse error at line {}, column {}:\n{}\nSnippet: \"{}\"",
                    line, column, message, snippet
                )
            }
            TreeError::MalformedTableRow { line, content } => write!(
                f,
                "Malformed label table row at line {}: expected <name> <label>, got \"{}\"",
                line, content
            ),
            TreeError::MissingInputFile { path, reason } => {
                write!(f, "Could not read input file {}: {}", path, reason)
            }
            TreeError::ReadError { path, reason } => {
                write!(f, "Failed to read {}: {}", path, reason)
            }
        }
    }
}

impl std::error::Error for TreeError {}
