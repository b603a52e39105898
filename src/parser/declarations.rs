//! Function definition recognition
//!
//! ```text
//! functionDef ::= 'function' IDENT [ '(' [argList] ')' ] statementList 'end'
//! argList     ::= arg { ',' arg }
//! arg         ::= ['ref'] IDENT
//! ```

use crate::parser::errors::ParseError;
use crate::parser::events::{Param, ParseEvents};
use crate::parser::parse::Recognizer;
use crate::parser::token::{SourceLocation, TokenKind};

impl<E: ParseEvents> Recognizer<'_, E> {
    pub(crate) fn function_definition(&mut self, loc: SourceLocation) -> Result<(), ParseError> {
        self.advance()?; // 'function'
        let (name, _) = self.expect_identifier()?;

        let mut params = Vec::new();
        if self.advance_if(TokenKind::LParen)? {
            if !self.check(TokenKind::RParen) {
                params = self.parameter_list()?;
            }
            self.expect(TokenKind::RParen)?;
        }
        self.events.function_def(&name, &params, loc);

        self.statement_list()?;
        self.expect(TokenKind::End)
    }

    fn parameter_list(&mut self) -> Result<Vec<Param>, ParseError> {
        let mut params = Vec::new();

        loop {
            let by_ref = self.advance_if(TokenKind::Ref)?;
            let (name, _) = self.expect_identifier()?;
            params.push(Param { name, by_ref });

            if !self.advance_if(TokenKind::Comma)? {
                break;
            }
        }

        Ok(params)
    }
}

#[cfg(test)]
mod tests {
    use crate::parser::errors::ParseError;
    use crate::parser::events::{Param, ParseEvents};
    use crate::parser::parse::{check_source, check_source_with};
    use crate::parser::token::SourceLocation;
    use pretty_assertions::assert_eq;

    #[derive(Default)]
    struct Definitions(Vec<(String, Vec<Param>)>);

    impl ParseEvents for Definitions {
        fn function_def(&mut self, name: &str, params: &[Param], _location: SourceLocation) {
            self.0.push((name.to_string(), params.to_vec()));
        }
    }

    fn param(name: &str, by_ref: bool) -> Param {
        Param {
            name: name.to_string(),
            by_ref,
        }
    }

    #[test]
    fn test_parse_function_definitions() {
        let source = "function swap(ref a, ref b, n)\n  t = a; a = b; b = t\nend;\n\
                      function tick\n  count = count + 1\nend;\n\
                      function none() return 0 end";
        let mut defs = Definitions::default();
        check_source_with(source, &mut defs).unwrap();

        assert_eq!(
            defs.0,
            vec![
                (
                    "swap".to_string(),
                    vec![param("a", true), param("b", true), param("n", false)]
                ),
                ("tick".to_string(), vec![]),
                ("none".to_string(), vec![]),
            ]
        );
    }

    #[test]
    fn test_function_errors() {
        match check_source("function (a) end") {
            Err(ParseError::Syntax(err)) => {
                assert_eq!(err.expected, "identifier");
                assert_eq!(err.found, "'('");
            }
            other => panic!("unexpected result {:?}", other),
        }

        match check_source("function f(ref) end") {
            Err(ParseError::Syntax(err)) => assert_eq!(err.found, "')'"),
            other => panic!("unexpected result {:?}", other),
        }

        match check_source("function f(a b) end") {
            Err(ParseError::Syntax(err)) => assert_eq!(err.expected, "')'"),
            other => panic!("unexpected result {:?}", other),
        }

        match check_source("function f(a) x = 1") {
            Err(ParseError::Syntax(err)) => assert_eq!(err.expected, "'end'"),
            other => panic!("unexpected result {:?}", other),
        }
    }
}
