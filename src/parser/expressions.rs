//! Expression recognition
//!
//! Precedence is encoded structurally, lowest first:
//!
//! ```text
//! expression ::= simpleExpr [ relOp expression ]    relOp: < <= > >= == !=
//! simpleExpr ::= term { addOp term }                addOp: + - or xor
//! term       ::= power { mulOp power }              mulOp: * / and mod div
//! power      ::= {'+'|'-'} factor ['^' factor]
//! factor     ::= INTEGER | FLOAT | STRING | 'True' | 'False'
//!              | IDENT [ '[' exprList ']' | '(' [exprList] ')' ]
//!              | '(' expression ')' | 'not' expression | '{' [exprList] '}'
//! exprList   ::= expression { ',' expression }
//! ```
//!
//! Relational operators recurse to the right instead of looping, so a chain
//! like `a < b < c` groups as `a < (b < c)`.

use crate::parser::errors::ParseError;
use crate::parser::events::{Literal, ParseEvents, UnaryOp};
use crate::parser::parse::Recognizer;
use crate::parser::stack::ensure_sufficient_stack;
use crate::parser::token::TokenKind;

impl<E: ParseEvents> Recognizer<'_, E> {
    /// Every nested `(`, `not`, index, call and list comes back through here
    pub(crate) fn expression(&mut self) -> Result<(), ParseError> {
        ensure_sufficient_stack(|| self.relation())
    }

    fn relation(&mut self) -> Result<(), ParseError> {
        self.simple_expression()?;

        if matches!(
            self.token(),
            TokenKind::Less
                | TokenKind::LessEq
                | TokenKind::Greater
                | TokenKind::GreaterEq
                | TokenKind::Equal
                | TokenKind::NotEq
        ) {
            let op = self.token();
            let loc = self.current_location();
            self.advance()?;
            self.expression()?;
            self.events.binary(op, loc);
        }

        Ok(())
    }

    fn simple_expression(&mut self) -> Result<(), ParseError> {
        self.term()?;

        while matches!(
            self.token(),
            TokenKind::Plus | TokenKind::Minus | TokenKind::Or | TokenKind::Xor
        ) {
            let op = self.token();
            let loc = self.current_location();
            self.advance()?;
            self.term()?;
            self.events.binary(op, loc);
        }

        Ok(())
    }

    fn term(&mut self) -> Result<(), ParseError> {
        self.power()?;

        while matches!(
            self.token(),
            TokenKind::Mult | TokenKind::Divide | TokenKind::And | TokenKind::Mod | TokenKind::Div
        ) {
            let op = self.token();
            let loc = self.current_location();
            self.advance()?;
            self.power()?;
            self.events.binary(op, loc);
        }

        Ok(())
    }

    /// Leading signs fold into one: an odd number of '-' negates the power
    fn power(&mut self) -> Result<(), ParseError> {
        let loc = self.current_location();
        let mut negate = false;

        while matches!(self.token(), TokenKind::Plus | TokenKind::Minus) {
            if self.check(TokenKind::Minus) {
                negate = !negate;
            }
            self.advance()?;
        }

        self.factor()?;

        if self.check(TokenKind::Power) {
            let op_loc = self.current_location();
            self.advance()?;
            self.factor()?;
            self.events.binary(TokenKind::Power, op_loc);
        }

        if negate {
            self.events.unary(UnaryOp::Negate, loc);
        }
        Ok(())
    }

    pub(crate) fn factor(&mut self) -> Result<(), ParseError> {
        let loc = self.current_location();

        match self.token() {
            TokenKind::Integer => {
                let value = self.scanner.token_record().int_value();
                self.events.literal(Literal::Integer(value), loc);
                self.advance()
            }
            TokenKind::Float => {
                let value = self.scanner.token_record().float_value();
                self.events.literal(Literal::Float(value), loc);
                self.advance()
            }
            TokenKind::String => {
                self.events
                    .literal(Literal::Str(self.scanner.token_record().text()), loc);
                self.advance()
            }
            TokenKind::True | TokenKind::False => {
                let value = self.check(TokenKind::True);
                self.events.literal(Literal::Boolean(value), loc);
                self.advance()
            }
            TokenKind::Ident => {
                let name = self.scanner.token_record().text().to_string();
                self.advance()?;

                if self.advance_if(TokenKind::LBracket)? {
                    let arity = self.expression_list()?;
                    self.expect(TokenKind::RBracket)?;
                    self.events.index(&name, arity, loc);
                } else if self.advance_if(TokenKind::LParen)? {
                    let arg_count = if self.check(TokenKind::RParen) {
                        0
                    } else {
                        self.expression_list()?
                    };
                    self.expect(TokenKind::RParen)?;
                    self.events.call(&name, arg_count, loc);
                } else {
                    self.events.variable(&name, loc);
                }
                Ok(())
            }
            TokenKind::LParen => {
                self.advance()?;
                self.expression()?;
                self.expect(TokenKind::RParen)
            }
            TokenKind::Not => {
                self.advance()?;
                self.expression()?;
                self.events.unary(UnaryOp::Not, loc);
                Ok(())
            }
            TokenKind::LBrace => {
                self.advance()?;
                let len = if self.check(TokenKind::RBrace) {
                    0
                } else {
                    self.expression_list()?
                };
                self.expect(TokenKind::RBrace)?;
                self.events.list(len, loc);
                Ok(())
            }
            _ => Err(self.error("an expression")),
        }
    }

    /// Returns the number of expressions read
    pub(crate) fn expression_list(&mut self) -> Result<usize, ParseError> {
        let mut count = 0;
        loop {
            self.expression()?;
            count += 1;
            if !self.advance_if(TokenKind::Comma)? {
                return Ok(count);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::parser::errors::ParseError;
    use crate::parser::events::{Literal, ParseEvents, UnaryOp};
    use crate::parser::parse::{check_source, check_source_with};
    use crate::parser::token::{SourceLocation, TokenKind};
    use pretty_assertions::assert_eq;

    /// Renders expression events as reverse Polish notation
    #[derive(Default)]
    struct Rpn(Vec<String>);

    impl ParseEvents for Rpn {
        fn literal(&mut self, literal: Literal<'_>, _location: SourceLocation) {
            self.0.push(match literal {
                Literal::Integer(v) => v.to_string(),
                Literal::Float(v) => format!("{:?}", v),
                Literal::Str(s) => format!("{:?}", s),
                Literal::Boolean(b) => b.to_string(),
            });
        }

        fn variable(&mut self, name: &str, _location: SourceLocation) {
            self.0.push(name.to_string());
        }

        fn index(&mut self, name: &str, arity: usize, _location: SourceLocation) {
            self.0.push(format!("{}[{}]", name, arity));
        }

        fn call(&mut self, name: &str, arg_count: usize, _location: SourceLocation) {
            self.0.push(format!("{}({})", name, arg_count));
        }

        fn list(&mut self, len: usize, _location: SourceLocation) {
            self.0.push(format!("{{{}}}", len));
        }

        fn binary(&mut self, op: TokenKind, _location: SourceLocation) {
            let text = op
                .symbol_text()
                .or_else(|| op.keyword_text())
                .unwrap_or("?");
            self.0.push(text.to_string());
        }

        fn unary(&mut self, op: UnaryOp, _location: SourceLocation) {
            self.0.push(match op {
                UnaryOp::Negate => "neg".to_string(),
                UnaryOp::Not => "not".to_string(),
            });
        }
    }

    /// RPN of the right-hand side of `x = <expr>`
    fn rpn(expr: &str) -> String {
        let mut out = Rpn::default();
        check_source_with(&format!("x = {}", expr), &mut out).unwrap();
        out.0[1..].join(" ")
    }

    #[test]
    fn test_precedence() {
        assert_eq!(rpn("1 + 2 * 3"), "1 2 3 * +");
        assert_eq!(rpn("(1 + 2) * 3"), "1 2 + 3 *");
        assert_eq!(rpn("a - b - c"), "a b - c -");
        assert_eq!(rpn("a or b and c"), "a b c and or");
        assert_eq!(rpn("a + b < c * d"), "a b + c d * <");
        assert_eq!(rpn("n mod 2 == 0"), "n 2 mod 0 ==");
        assert_eq!(rpn("a xor b div c"), "a b c div xor");
    }

    #[test]
    fn test_relational_groups_right() {
        assert_eq!(rpn("a < b < c"), "a b c < <");
        assert_eq!(rpn("a <> b"), "a b !=");
    }

    #[test]
    fn test_power_and_signs() {
        assert_eq!(rpn("2 ^ 3"), "2 3 ^");
        assert_eq!(rpn("-2 ^ 2"), "2 2 ^ neg");
        assert_eq!(rpn("--2"), "2");
        assert_eq!(rpn("-+-x"), "x");
        assert_eq!(rpn("---x * 2"), "x neg 2 *");
        assert_eq!(rpn("2 ^ (-1)"), "2 1 neg ^");
    }

    #[test]
    fn test_power_takes_a_single_factor() {
        // the exponent is a factor, so a second '^' has nothing to attach to
        assert!(check_source("x = 2 ^ 3 ^ 4").is_err());
        assert!(check_source("x = 2 ^ (3 ^ 4)").is_ok());
        assert!(check_source("x = 2 ^ -1").is_err());
    }

    #[test]
    fn test_factors() {
        assert_eq!(rpn("True"), "true");
        assert_eq!(rpn("'hi'"), "\"hi\"");
        assert_eq!(rpn("1.5"), "1.5");
        assert_eq!(rpn("not (a == b)"), "a b == not");
        assert_eq!(rpn("f()"), "f(0)");
        assert_eq!(rpn("max(a, b + 1)"), "a b 1 + max(2)");
        assert_eq!(rpn("m[i, j]"), "i j m[2]");
        assert_eq!(rpn("{}"), "{0}");
        assert_eq!(rpn("{1, {2, 3}}"), "1 2 3 {2} {2}");
    }

    #[test]
    fn test_not_takes_whole_expression() {
        assert_eq!(rpn("not a < b"), "a b < not");
    }

    #[test]
    fn test_deep_nesting() {
        let depth = 5000;
        let parens = format!("x = {}1{}", "(".repeat(depth), ")".repeat(depth));
        assert!(check_source(&parens).is_ok());

        let nots = format!("x = {}True", "not ".repeat(depth));
        assert!(check_source(&nots).is_ok());

        let lists = format!("x = {}{}", "{".repeat(depth), "}".repeat(depth));
        assert!(check_source(&lists).is_ok());
    }

    #[test]
    fn test_deep_nesting_unbalanced() {
        let source = format!("x = {}1", "(".repeat(5000));
        match check_source(&source) {
            Err(ParseError::Syntax(err)) => {
                assert_eq!(err.expected, "')'");
                assert_eq!(err.found, "end of file");
            }
            other => panic!("unexpected result {:?}", other),
        }
    }

    #[test]
    fn test_expression_errors() {
        for source in ["x = ", "x = 1 +", "x = (1", "x = {1,", "x = *2", "x = a[]"] {
            assert!(
                matches!(check_source(source), Err(ParseError::Syntax(_))),
                "{:?} should be rejected",
                source
            );
        }

        match check_source("x = )") {
            Err(ParseError::Syntax(err)) => {
                assert_eq!(err.expected, "an expression");
                assert_eq!(err.found, "')'");
            }
            other => panic!("unexpected result {:?}", other),
        }
    }
}
