//! Error types for scanning and recognition
//!
//! Every failure carries the [`SourceLocation`] it was detected at. Errors are
//! terminal for the session that produced them; callers decide whether to
//! abort, report and continue, or retry.

use crate::parser::token::SourceLocation;
use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Largest exponent magnitude accepted in scientific notation
pub const MAX_EXPONENT: i32 = 308;

/// Lexical error categories
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LexErrorKind {
    #[error("integer overflow, constant value too large to read")]
    IntegerOverflow,

    #[error("exponent overflow, maximum value for exponent is {}", MAX_EXPONENT)]
    ExponentOverflow,

    #[error("number expected in exponent")]
    MissingExponentDigits,

    #[error("single period on its own is not a valid number")]
    MalformedNumber,

    #[error("string without terminating quotation mark")]
    UnterminatedString,

    #[error("unterminated comment, expecting \"*/\"")]
    UnterminatedComment,

    #[error("expecting '=' after '!'")]
    LoneBang,

    #[error("unrecognized character in source code: '{0}'")]
    UnrecognizedCharacter(char),
}

#[derive(Debug, Clone, PartialEq, Error)]
#[error("lexical error at {location}: {kind}")]
pub struct LexError {
    pub kind: LexErrorKind,
    pub location: SourceLocation,
}

impl LexError {
    pub fn new(kind: LexErrorKind, location: SourceLocation) -> Self {
        Self { kind, location }
    }
}

/// Grammar violation: the token found where something else was required
#[derive(Debug, Clone, PartialEq, Error)]
#[error("syntax error at {location}: expected {expected}, found {found}")]
pub struct SyntaxError {
    pub expected: String,
    pub found: String,
    pub location: SourceLocation,
}

/// Failure of a scan/recognize session
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ParseError {
    #[error(transparent)]
    Lex(#[from] LexError),

    #[error(transparent)]
    Syntax(#[from] SyntaxError),
}

impl ParseError {
    pub fn location(&self) -> SourceLocation {
        match self {
            ParseError::Lex(err) => err.location,
            ParseError::Syntax(err) => err.location,
        }
    }

    /// Message without the location prefix, for diagnostics that print the
    /// position separately.
    pub fn message(&self) -> String {
        match self {
            ParseError::Lex(err) => err.kind.to_string(),
            ParseError::Syntax(err) => format!("expected {}, found {}", err.expected, err.found),
        }
    }
}

/// A source file could not be loaded
#[derive(Debug, Error)]
#[error("could not read '{}': {}", .path.display(), .source)]
pub struct LoadError {
    pub path: PathBuf,
    #[source]
    pub source: io::Error,
}

impl LoadError {
    pub fn is_not_found(&self) -> bool {
        self.source.kind() == io::ErrorKind::NotFound
    }
}

/// Any failure of the file-level entry points
#[derive(Debug, Error)]
pub enum RhodusError {
    #[error(transparent)]
    Load(#[from] LoadError),

    #[error(transparent)]
    Parse(#[from] ParseError),
}

impl From<LexError> for RhodusError {
    fn from(err: LexError) -> Self {
        RhodusError::Parse(err.into())
    }
}

impl From<SyntaxError> for RhodusError {
    fn from(err: SyntaxError) -> Self {
        RhodusError::Parse(err.into())
    }
}
