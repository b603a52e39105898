//! Token definitions for Rhodus source code
//!
//! A [`Token`] pairs a [`TokenKind`] with its payload and the position of its
//! first character. Reserved words are resolved through a shared, read-only
//! keyword table built on first use.

use rustc_hash::FxHashMap;
use std::fmt;
use std::sync::OnceLock;

/// Source location information for diagnostics (1-based line and column)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SourceLocation {
    pub line: usize,
    pub column: usize,
}

impl SourceLocation {
    pub fn new(line: usize, column: usize) -> Self {
        Self { line, column }
    }
}

impl fmt::Display for SourceLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "line {}, column {}", self.line, self.column)
    }
}

/// All token categories produced by the scanner.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenKind {
    Eof,
    String,
    Ident,
    Integer,
    Float,

    // Operators and punctuation
    Plus,      // +
    Minus,     // -
    Mult,      // *
    Divide,    // /
    Less,      // <
    Greater,   // >
    LessEq,    // <=
    GreaterEq, // >=
    Equal,     // ==
    Assign,    // =
    NotEq,     // != or <>
    Colon,     // :
    Semicolon, // ;
    Comma,     // ,
    Power,     // ^
    LParen,    // (
    RParen,    // )
    LBracket,  // [
    RBracket,  // ]
    LBrace,    // {
    RBrace,    // }

    // Keywords
    Break,
    If,
    Downto,
    Else,
    Then,
    End,
    True,
    False,
    While,
    Do,
    Repeat,
    Until,
    For,
    To,
    And,
    Or,
    Not,
    Xor,
    Div,
    Mod,
    Function,
    Ref,
    Return,
    Print,
    Println,
}

const KEYWORDS: [(&str, TokenKind); 25] = [
    ("break", TokenKind::Break),
    ("if", TokenKind::If),
    ("downto", TokenKind::Downto),
    ("else", TokenKind::Else),
    ("then", TokenKind::Then),
    ("end", TokenKind::End),
    ("True", TokenKind::True),
    ("False", TokenKind::False),
    ("while", TokenKind::While),
    ("do", TokenKind::Do),
    ("repeat", TokenKind::Repeat),
    ("until", TokenKind::Until),
    ("for", TokenKind::For),
    ("to", TokenKind::To),
    ("and", TokenKind::And),
    ("or", TokenKind::Or),
    ("not", TokenKind::Not),
    ("xor", TokenKind::Xor),
    ("div", TokenKind::Div),
    ("mod", TokenKind::Mod),
    ("function", TokenKind::Function),
    ("ref", TokenKind::Ref),
    ("return", TokenKind::Return),
    ("print", TokenKind::Print),
    ("println", TokenKind::Println),
];

/// Reserved word table, shared by every scanner.
pub fn keywords() -> &'static FxHashMap<&'static str, TokenKind> {
    static TABLE: OnceLock<FxHashMap<&'static str, TokenKind>> = OnceLock::new();
    TABLE.get_or_init(|| KEYWORDS.iter().copied().collect())
}

/// Resolve a word to its keyword kind, or [`TokenKind::Ident`].
pub fn lookup_keyword(word: &str) -> TokenKind {
    keywords().get(word).copied().unwrap_or(TokenKind::Ident)
}

impl TokenKind {
    pub fn is_keyword(self) -> bool {
        self.keyword_text().is_some()
    }

    /// Source spelling of a keyword kind.
    pub fn keyword_text(self) -> Option<&'static str> {
        KEYWORDS
            .iter()
            .find(|(_, kind)| *kind == self)
            .map(|(text, _)| *text)
    }

    /// Source spelling of an operator or punctuation kind.
    pub fn symbol_text(self) -> Option<&'static str> {
        let text = match self {
            TokenKind::Plus => "+",
            TokenKind::Minus => "-",
            TokenKind::Mult => "*",
            TokenKind::Divide => "/",
            TokenKind::Less => "<",
            TokenKind::Greater => ">",
            TokenKind::LessEq => "<=",
            TokenKind::GreaterEq => ">=",
            TokenKind::Equal => "==",
            TokenKind::Assign => "=",
            TokenKind::NotEq => "!=",
            TokenKind::Colon => ":",
            TokenKind::Semicolon => ";",
            TokenKind::Comma => ",",
            TokenKind::Power => "^",
            TokenKind::LParen => "(",
            TokenKind::RParen => ")",
            TokenKind::LBracket => "[",
            TokenKind::RBracket => "]",
            TokenKind::LBrace => "{",
            TokenKind::RBrace => "}",
            _ => return None,
        };
        Some(text)
    }
}

/// Describes the kind the way diagnostics name it: `'then'`, `'+'`, `identifier`.
impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(text) = self.keyword_text().or_else(|| self.symbol_text()) {
            return write!(f, "'{}'", text);
        }
        match self {
            TokenKind::Eof => write!(f, "end of file"),
            TokenKind::String => write!(f, "string"),
            TokenKind::Ident => write!(f, "identifier"),
            TokenKind::Integer => write!(f, "integer"),
            TokenKind::Float => write!(f, "float"),
            _ => unreachable!("keywords and symbols are handled above"),
        }
    }
}

/// Payload carried by a token; which variant is present depends on the kind.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum TokenValue {
    #[default]
    None,
    Text(String),
    Integer(i32),
    Float(f64),
}

/// A classified lexical unit.
#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    pub kind: TokenKind,
    pub value: TokenValue,
    pub location: SourceLocation,
}

impl Token {
    pub fn new(kind: TokenKind, location: SourceLocation) -> Self {
        Self {
            kind,
            value: TokenValue::None,
            location,
        }
    }

    pub fn with_value(kind: TokenKind, value: TokenValue, location: SourceLocation) -> Self {
        Self {
            kind,
            value,
            location,
        }
    }

    /// Decoded text of an identifier or string, empty for other kinds.
    pub fn text(&self) -> &str {
        match &self.value {
            TokenValue::Text(text) => text,
            _ => "",
        }
    }

    pub fn int_value(&self) -> i32 {
        match self.value {
            TokenValue::Integer(value) => value,
            _ => 0,
        }
    }

    pub fn float_value(&self) -> f64 {
        match self.value {
            TokenValue::Float(value) => value,
            _ => 0.0,
        }
    }

    /// Short description used in "found ..." parts of diagnostics.
    pub fn describe(&self) -> String {
        match self.kind {
            TokenKind::Ident => format!("identifier '{}'", self.text()),
            TokenKind::Integer => format!("integer {}", self.int_value()),
            TokenKind::Float => format!("float {}", self.float_value()),
            TokenKind::String => format!("string \"{}\"", self.text()),
            kind => kind.to_string(),
        }
    }
}

/// Token dump format: `identifier <x>`, `special <'+'>`, `keyword <'while'>`.
impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.kind {
            TokenKind::Ident => write!(f, "identifier <{}>", self.text()),
            TokenKind::Integer => write!(f, "integer <{}>", self.int_value()),
            TokenKind::Float => write!(f, "float <{:.6}>", self.float_value()),
            TokenKind::String => write!(f, "string <\"{}\">", self.text()),
            TokenKind::Eof => write!(f, "end of stream <EOF>"),
            kind => match kind.keyword_text() {
                Some(text) => write!(f, "keyword <'{}'>", text),
                None => write!(f, "special <{}>", kind),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_keyword_lookup() {
        assert_eq!(lookup_keyword("while"), TokenKind::While);
        assert_eq!(lookup_keyword("True"), TokenKind::True);
        assert_eq!(lookup_keyword("true"), TokenKind::Ident);
        assert_eq!(lookup_keyword("println"), TokenKind::Println);
        assert_eq!(keywords().len(), 25);
    }

    #[test]
    fn test_payload_defaults() {
        let loc = SourceLocation::new(1, 1);
        let token = Token::with_value(TokenKind::Integer, TokenValue::Integer(7), loc);

        assert_eq!(token.int_value(), 7);
        assert_eq!(token.float_value(), 0.0);
        assert_eq!(token.text(), "");
    }

    #[test]
    fn test_display_forms() {
        let loc = SourceLocation::new(1, 1);

        assert_eq!(Token::new(TokenKind::Plus, loc).to_string(), "special <'+'>");
        assert_eq!(Token::new(TokenKind::Do, loc).to_string(), "keyword <'do'>");
        assert_eq!(
            Token::with_value(TokenKind::Float, TokenValue::Float(1.5), loc).to_string(),
            "float <1.500000>"
        );
        assert_eq!(TokenKind::Eof.to_string(), "end of file");
        assert_eq!(TokenKind::Then.to_string(), "'then'");
    }
}
