//! Rhodus source code front end
//!
//! This module turns Rhodus source text into an accept/reject judgment:
//! - [`stream`]: character stream with one character of lookahead
//! - [`scanner`]: tokenization (source text → tokens)
//! - [`parse`]: the grammar recognizer and session entry points
//! - [`events`]: optional observer for recognizer events
//! - [`token`] and [`errors`]: shared data types
//!
//! # Recognizer Implementation
//!
//! Hand-written recursive descent, one method per grammar production, with
//! precedence encoded by the call structure. No tree is built; callers that
//! need one implement [`events::ParseEvents`].

mod declarations;
pub mod errors;
pub mod events;
mod expressions;
pub mod parse;
pub mod scanner;
mod stack;
mod statements;
pub mod stream;
pub mod token;

pub use errors::{LexError, LexErrorKind, LoadError, ParseError, RhodusError, SyntaxError};
pub use parse::{check_file, check_source, check_source_with, recognize, Recognizer};
pub use scanner::{load_source, Scanner};
pub use token::{SourceLocation, Token, TokenKind};
