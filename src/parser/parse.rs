//! Recognizer coordinator
//!
//! This module provides the [`Recognizer`] struct, its token-matching helpers
//! and the entry points that run a whole scan/recognize session.
//!
//! # Recognizer Architecture
//!
//! The recognizer is a recursive descent validator with one method per grammar
//! production, split across files with `impl Recognizer` blocks:
//! - This module: Recognizer struct, helper methods, `program`
//! - `statements`: statement lists and every statement form
//! - `declarations`: function definitions and parameter lists
//! - `expressions`: the operator-precedence expression grammar
//!
//! Tokens are pulled from the [`Scanner`] on demand. The first mismatch ends
//! the session with a [`ParseError`]; there is no recovery.

use crate::parser::errors::{ParseError, RhodusError, SyntaxError};
use crate::parser::events::{NoEvents, ParseEvents};
use crate::parser::scanner::Scanner;
use crate::parser::token::{SourceLocation, TokenKind};
use std::path::Path;
use tracing::debug;

/// Grammar recognizer over a primed [`Scanner`]
pub struct Recognizer<'s, E: ParseEvents = NoEvents> {
    pub(crate) scanner: &'s mut Scanner,
    pub(crate) events: E,
}

impl<'s> Recognizer<'s, NoEvents> {
    /// Validate-only recognizer. The scanner must already hold its first token.
    pub fn new(scanner: &'s mut Scanner) -> Self {
        Self {
            scanner,
            events: NoEvents,
        }
    }
}

impl<'s, E: ParseEvents> Recognizer<'s, E> {
    pub fn with_events(scanner: &'s mut Scanner, events: E) -> Self {
        Self { scanner, events }
    }

    pub fn into_events(self) -> E {
        self.events
    }

    /// program ::= statementList EOF
    pub fn program(&mut self) -> Result<(), ParseError> {
        debug!(first = %self.scanner.token_record(), "recognizing program");
        self.statement_list()?;

        if self.check(TokenKind::Eof) {
            debug!("program accepted");
            Ok(())
        } else {
            Err(self.error("';' or end of program"))
        }
    }

    // ===== Helper methods =====

    pub(crate) fn token(&self) -> TokenKind {
        self.scanner.token()
    }

    pub(crate) fn check(&self, kind: TokenKind) -> bool {
        self.scanner.token() == kind
    }

    pub(crate) fn advance(&mut self) -> Result<(), ParseError> {
        self.scanner.next_token()?;
        Ok(())
    }

    /// Consume the current token if it is `kind`
    pub(crate) fn advance_if(&mut self, kind: TokenKind) -> Result<bool, ParseError> {
        if self.check(kind) {
            self.advance()?;
            Ok(true)
        } else {
            Ok(false)
        }
    }

    pub(crate) fn current_location(&self) -> SourceLocation {
        self.scanner.token_record().location
    }

    /// Match the current token against `kind` and consume it.
    pub(crate) fn expect(&mut self, kind: TokenKind) -> Result<(), ParseError> {
        if self.check(kind) {
            self.advance()
        } else {
            Err(self.error(kind.to_string()))
        }
    }

    pub(crate) fn expect_identifier(&mut self) -> Result<(String, SourceLocation), ParseError> {
        if self.check(TokenKind::Ident) {
            let token = self.scanner.token_record();
            let ident = (token.text().to_string(), token.location);
            self.advance()?;
            Ok(ident)
        } else {
            Err(self.error(TokenKind::Ident.to_string()))
        }
    }

    /// Syntax error at the current token
    pub(crate) fn error(&self, expected: impl Into<String>) -> ParseError {
        let token = self.scanner.token_record();
        SyntaxError {
            expected: expected.into(),
            found: token.describe(),
            location: token.location,
        }
        .into()
    }
}

/// Recognize `source` without observing the parse.
pub fn check_source(source: &str) -> Result<(), ParseError> {
    check_source_with(source, NoEvents)
}

/// Recognize `source`, reporting parse events to `events`.
pub fn check_source_with<E: ParseEvents>(source: &str, events: E) -> Result<(), ParseError> {
    let mut scanner = Scanner::new();
    scanner.scan_string(source);
    recognize(&mut scanner, events)
}

/// Load and recognize the file at `path`.
pub fn check_file(path: impl AsRef<Path>) -> Result<(), RhodusError> {
    let mut scanner = Scanner::new();
    scanner.scan_file(path)?;
    recognize(&mut scanner, NoEvents)?;
    Ok(())
}

/// Prime the scanner and run [`Recognizer::program`].
pub fn recognize<E: ParseEvents>(scanner: &mut Scanner, events: E) -> Result<(), ParseError> {
    scanner.next_token()?;
    Recognizer::with_events(scanner, events).program()
}
