//! # Introduction
//!
//! Rhodus is a small procedural scripting language with Pascal-flavored
//! syntax (`if/then/else/end`, `while/do`, `repeat/until`, `for ... to`).
//! This crate is its front end: it scans source text and checks it against
//! the grammar, reporting the first lexical or syntax error with its line and
//! column.
//!
//! ## Pipeline
//!
//! ```text
//! Source → StreamReader → Scanner → Recognizer → ParseEvents (optional)
//! ```
//!
//! 1. [`parser`]: character stream, scanner, recognizer and error types.
//! 2. [`diagnostic`]: renders a [`parser::ParseError`] against its source.
//! 3. [`shell`]: the interactive shell behind the `rhodus` binary.
//! 4. [`config`] and [`logging`]: environment-driven settings and tracing.
//!
//! ```
//! assert!(rhodus::parser::check_source("for i = 1 to 10 do println(i) end").is_ok());
//! assert!(rhodus::parser::check_source("while x do").is_err());
//! ```

pub mod config;
pub mod diagnostic;
pub mod logging;
pub mod parser;
pub mod shell;
