//! Statement recognition
//!
//! # Grammar
//!
//! ```text
//! statementList ::= [ statement { ';' [statement] } ]
//! statement     ::= assignment | call | ifStmt | forStmt | whileStmt
//!                 | repeatStmt | returnStmt | breakStmt | functionDef | printStmt
//! assignment    ::= IDENT [ '[' exprList ']' ] '=' expression
//! call          ::= IDENT '(' [ exprList ] ')'
//! ifStmt        ::= 'if' expression 'then' statementList [ 'else' statementList ] 'end'
//! whileStmt     ::= 'while' expression 'do' statementList 'end'
//! repeatStmt    ::= 'repeat' statementList 'until' expression
//! forStmt       ::= 'for' IDENT '=' expression ('to'|'downto') expression
//!                   'do' statementList 'end'
//! returnStmt    ::= 'return' expression
//! breakStmt     ::= 'break'
//! printStmt     ::= ('print'|'println') '(' expression ')'
//! ```
//!
//! A statement list stops in front of `until`, `end`, `else` and end of file,
//! leaving the terminator to the enclosing production.

use crate::parser::errors::ParseError;
use crate::parser::events::{ParseEvents, StatementKind};
use crate::parser::parse::Recognizer;
use crate::parser::stack::ensure_sufficient_stack;
use crate::parser::token::{SourceLocation, TokenKind};
use tracing::trace;

impl<E: ParseEvents> Recognizer<'_, E> {
    pub(crate) fn statement_list(&mut self) -> Result<(), ParseError> {
        ensure_sufficient_stack(|| self.statements())
    }

    fn statements(&mut self) -> Result<(), ParseError> {
        loop {
            if matches!(
                self.token(),
                TokenKind::Until | TokenKind::End | TokenKind::Else | TokenKind::Eof
            ) {
                return Ok(());
            }

            self.statement()?;

            if !self.advance_if(TokenKind::Semicolon)? {
                return Ok(());
            }
        }
    }

    pub(crate) fn statement(&mut self) -> Result<(), ParseError> {
        let loc = self.current_location();

        match self.token() {
            TokenKind::Ident => {
                // An identifier followed by '(' is a call, anything else an assignment
                if self.scanner.peek_at(0)?.kind == TokenKind::LParen {
                    self.scoped(StatementKind::Call, loc, |r| r.factor())
                } else {
                    self.scoped(StatementKind::Assignment, loc, |r| r.assignment())
                }
            }
            TokenKind::If => self.scoped(StatementKind::If, loc, |r| r.if_statement()),
            TokenKind::For => self.scoped(StatementKind::For, loc, |r| r.for_statement()),
            TokenKind::While => self.scoped(StatementKind::While, loc, |r| r.while_statement()),
            TokenKind::Repeat => self.scoped(StatementKind::Repeat, loc, |r| r.repeat_statement()),
            TokenKind::Return => self.scoped(StatementKind::Return, loc, |r| {
                r.advance()?;
                r.expression()
            }),
            TokenKind::Break => self.scoped(StatementKind::Break, loc, |r| r.advance()),
            TokenKind::Function => {
                self.scoped(StatementKind::FunctionDef, loc, |r| r.function_definition(loc))
            }
            TokenKind::Print | TokenKind::Println => {
                self.scoped(StatementKind::Print, loc, |r| r.print_statement())
            }
            _ => Err(self.error("a statement")),
        }
    }

    /// Run `body` between the enter/exit events for `kind`
    fn scoped(
        &mut self,
        kind: StatementKind,
        loc: SourceLocation,
        body: impl FnOnce(&mut Self) -> Result<(), ParseError>,
    ) -> Result<(), ParseError> {
        trace!(?kind, line = loc.line, column = loc.column, "statement");
        self.events.enter_statement(kind, loc);
        body(self)?;
        self.events.exit_statement(kind);
        Ok(())
    }

    fn assignment(&mut self) -> Result<(), ParseError> {
        let (name, name_loc) = self.expect_identifier()?;

        if self.advance_if(TokenKind::LBracket)? {
            let arity = self.expression_list()?;
            self.expect(TokenKind::RBracket)?;
            self.events.index(&name, arity, name_loc);
        } else {
            self.events.variable(&name, name_loc);
        }

        self.expect(TokenKind::Assign)?;
        self.expression()
    }

    fn if_statement(&mut self) -> Result<(), ParseError> {
        self.advance()?; // 'if'
        self.expression()?;
        self.expect(TokenKind::Then)?;
        self.statement_list()?;

        if self.advance_if(TokenKind::Else)? {
            self.statement_list()?;
        }
        self.expect(TokenKind::End)
    }

    fn for_statement(&mut self) -> Result<(), ParseError> {
        self.advance()?; // 'for'
        let (name, name_loc) = self.expect_identifier()?;
        self.events.variable(&name, name_loc);
        self.expect(TokenKind::Assign)?;
        self.expression()?;

        if !(self.advance_if(TokenKind::To)? || self.advance_if(TokenKind::Downto)?) {
            return Err(self.error("'to' or 'downto'"));
        }

        self.expression()?;
        self.expect(TokenKind::Do)?;
        self.statement_list()?;
        self.expect(TokenKind::End)
    }

    fn while_statement(&mut self) -> Result<(), ParseError> {
        self.advance()?; // 'while'
        self.expression()?;
        self.expect(TokenKind::Do)?;
        self.statement_list()?;
        self.expect(TokenKind::End)
    }

    fn repeat_statement(&mut self) -> Result<(), ParseError> {
        self.advance()?; // 'repeat'
        self.statement_list()?;
        self.expect(TokenKind::Until)?;
        self.expression()
    }

    fn print_statement(&mut self) -> Result<(), ParseError> {
        self.advance()?; // 'print' or 'println'
        self.expect(TokenKind::LParen)?;
        self.expression()?;
        self.expect(TokenKind::RParen)
    }
}
