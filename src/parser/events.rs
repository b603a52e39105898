//! Parse events emitted by the recognizer
//!
//! The recognizer builds no tree. Callers that want more than accept/reject
//! implement [`ParseEvents`]; every method defaults to a no-op, so an observer
//! only overrides what it cares about. Expression events arrive in post-order
//! (operands before their operator), which makes the stream read as reverse
//! Polish notation: `1 + 2 * 3` yields `1 2 3 * +`.

use crate::parser::token::{SourceLocation, TokenKind};

/// Statement categories reported by [`ParseEvents::enter_statement`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatementKind {
    Assignment,
    Call,
    If,
    For,
    While,
    Repeat,
    Return,
    Break,
    FunctionDef,
    Print,
}

/// Literal operands
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Literal<'a> {
    Integer(i32),
    Float(f64),
    Str(&'a str),
    Boolean(bool),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnaryOp {
    /// Folded leading `-` signs (odd count)
    Negate,
    Not,
}

/// A parameter in a function definition; `by_ref` for `ref name`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Param {
    pub name: String,
    pub by_ref: bool,
}

/// Observer invoked at production boundaries.
pub trait ParseEvents {
    fn enter_statement(&mut self, _kind: StatementKind, _location: SourceLocation) {}

    fn exit_statement(&mut self, _kind: StatementKind) {}

    fn literal(&mut self, _literal: Literal<'_>, _location: SourceLocation) {}

    /// A bare identifier used as a value or assignment target
    fn variable(&mut self, _name: &str, _location: SourceLocation) {}

    /// `name[i, j]`; emitted after the index expressions
    fn index(&mut self, _name: &str, _arity: usize, _location: SourceLocation) {}

    /// `name(args)`; emitted after the argument expressions
    fn call(&mut self, _name: &str, _arg_count: usize, _location: SourceLocation) {}

    /// `{a, b, c}`; emitted after the element expressions
    fn list(&mut self, _len: usize, _location: SourceLocation) {}

    /// Binary operator, identified by its token kind
    fn binary(&mut self, _op: TokenKind, _location: SourceLocation) {}

    fn unary(&mut self, _op: UnaryOp, _location: SourceLocation) {}

    /// Emitted once the header is read, before the body statements
    fn function_def(&mut self, _name: &str, _params: &[Param], _location: SourceLocation) {}
}

/// Validate-only observer
#[derive(Debug, Default, Clone, Copy)]
pub struct NoEvents;

impl ParseEvents for NoEvents {}

impl<E: ParseEvents + ?Sized> ParseEvents for &mut E {
    fn enter_statement(&mut self, kind: StatementKind, location: SourceLocation) {
        (**self).enter_statement(kind, location)
    }

    fn exit_statement(&mut self, kind: StatementKind) {
        (**self).exit_statement(kind)
    }

    fn literal(&mut self, literal: Literal<'_>, location: SourceLocation) {
        (**self).literal(literal, location)
    }

    fn variable(&mut self, name: &str, location: SourceLocation) {
        (**self).variable(name, location)
    }

    fn index(&mut self, name: &str, arity: usize, location: SourceLocation) {
        (**self).index(name, arity, location)
    }

    fn call(&mut self, name: &str, arg_count: usize, location: SourceLocation) {
        (**self).call(name, arg_count, location)
    }

    fn list(&mut self, len: usize, location: SourceLocation) {
        (**self).list(len, location)
    }

    fn binary(&mut self, op: TokenKind, location: SourceLocation) {
        (**self).binary(op, location)
    }

    fn unary(&mut self, op: UnaryOp, location: SourceLocation) {
        (**self).unary(op, location)
    }

    fn function_def(&mut self, name: &str, params: &[Param], location: SourceLocation) {
        (**self).function_def(name, params, location)
    }
}
