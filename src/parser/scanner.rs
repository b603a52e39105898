//! Scanner (lexer) for Rhodus source code
//!
//! Pulls characters from a [`StreamReader`] and produces one [`Token`] per
//! [`Scanner::next_token`] call. Line endings are folded (CR, LF and CRLF all
//! count as one logical newline), blanks and both comment styles are skipped,
//! and every token records the line and column of its first character.
//!
//! Tokens handed back through [`Scanner::push_back_token`] sit in a FIFO queue
//! that is always drained before any fresh characters are read. The recognizer
//! uses [`Scanner::peek_at`], which fills the same queue, to look past the
//! current token.

use super::errors::{LexError, LexErrorKind, LoadError, MAX_EXPONENT};
use super::stream::StreamReader;
use super::token::{keywords, SourceLocation, Token, TokenKind, TokenValue};
use rustc_hash::FxHashMap;
use std::collections::VecDeque;
use std::fs;
use std::path::Path;
use tracing::{debug, trace};

const CR: char = '\r';
const LF: char = '\n';

/// Scanner over a single source text
pub struct Scanner {
    reader: StreamReader,
    /// Character under the read head, `None` at end of input
    ch: Option<char>,
    line: usize,
    column: usize,
    current: Token,
    queue: VecDeque<Token>,
    keywords: &'static FxHashMap<&'static str, TokenKind>,
}

impl Default for Scanner {
    fn default() -> Self {
        Self::new()
    }
}

impl Scanner {
    /// Create a scanner bound to empty input.
    pub fn new() -> Self {
        let mut scanner = Self {
            reader: StreamReader::default(),
            ch: None,
            line: 1,
            column: 0,
            current: Token::new(TokenKind::Eof, SourceLocation::new(1, 1)),
            queue: VecDeque::new(),
            keywords: keywords(),
        };
        scanner.scan_string("");
        scanner
    }

    /// Lex `text` from the start, returning every token through `Eof`.
    pub fn tokenize(text: &str) -> Result<Vec<Token>, LexError> {
        let mut scanner = Scanner::new();
        scanner.scan_string(text);

        let mut tokens = Vec::new();
        loop {
            scanner.next_token()?;
            let token = scanner.token_record().clone();
            let at_end = token.kind == TokenKind::Eof;
            tokens.push(token);
            if at_end {
                break;
            }
        }
        Ok(tokens)
    }

    /// Reset all cursor state and start scanning `text`.
    pub fn scan_string(&mut self, text: &str) {
        self.reader = StreamReader::new(text);
        self.line = 1;
        self.column = 0;
        self.queue.clear();
        self.current = Token::new(TokenKind::Eof, SourceLocation::new(1, 1));
        self.ch = self.next_char();
    }

    /// Read `path` in full and start scanning its contents.
    pub fn scan_file(&mut self, path: impl AsRef<Path>) -> Result<(), LoadError> {
        let text = load_source(path)?;
        self.scan_string(&text);
        Ok(())
    }

    /// Kind of the current token
    pub fn token(&self) -> TokenKind {
        self.current.kind
    }

    /// The current token with its payload and position
    pub fn token_record(&self) -> &Token {
        &self.current
    }

    /// Advance to the next token, replaying pushed-back tokens first.
    pub fn next_token(&mut self) -> Result<(), LexError> {
        self.current = match self.queue.pop_front() {
            Some(token) => token,
            None => self.lex()?,
        };
        trace!(token = %self.current, line = self.current.location.line, "next token");
        Ok(())
    }

    /// Queue `token` to be returned by a later [`next_token`](Self::next_token)
    /// before anything new is lexed. The current token is left untouched.
    pub fn push_back_token(&mut self, token: Token) {
        self.queue.push_back(token);
    }

    /// Look `n` tokens past the current one without consuming anything;
    /// `peek_at(0)` is the token the next `next_token` call will produce.
    pub fn peek_at(&mut self, n: usize) -> Result<&Token, LexError> {
        while self.queue.len() <= n {
            let token = self.lex()?;
            self.push_back_token(token);
        }
        Ok(&self.queue[n])
    }

    // ===== Character level =====

    /// Next logical character; CRLF and lone CR read as LF.
    fn next_char(&mut self) -> Option<char> {
        let mut ch = self.reader.read()?;
        if ch == CR {
            if self.reader.peek() == Some(LF) {
                self.reader.read();
            }
            ch = LF;
        }

        if ch == LF {
            self.line += 1;
            self.column = 0;
        } else {
            self.column += 1;
        }
        Some(ch)
    }

    fn bump(&mut self) {
        self.ch = self.next_char();
    }

    fn current_digit(&self) -> Option<u32> {
        self.ch.and_then(|ch| ch.to_digit(10))
    }

    fn current_location(&self) -> SourceLocation {
        SourceLocation::new(self.line, self.column)
    }

    fn skip_blanks_and_comments(&mut self) -> Result<(), LexError> {
        loop {
            match self.ch {
                Some(' ') | Some('\t') | Some(LF) => self.bump(),
                Some('/') => match self.reader.peek() {
                    Some('/') => self.skip_line_comment(),
                    Some('*') => self.skip_block_comment()?,
                    _ => break,
                },
                _ => break,
            }
        }
        Ok(())
    }

    /// Skip `// ...` up to, not including, the line break
    fn skip_line_comment(&mut self) {
        while !matches!(self.ch, None | Some(LF)) {
            self.bump();
        }
    }

    /// Skip `/* ... */`; the first `*/` closes it regardless of nesting
    fn skip_block_comment(&mut self) -> Result<(), LexError> {
        let start = self.current_location();
        self.bump(); // '/'
        self.bump(); // '*'

        loop {
            match self.ch {
                None => {
                    return Err(LexError::new(LexErrorKind::UnterminatedComment, start));
                }
                Some('*') if self.reader.peek() == Some('/') => {
                    self.bump();
                    self.bump();
                    return Ok(());
                }
                Some(_) => self.bump(),
            }
        }
    }

    // ===== Token level =====

    fn lex(&mut self) -> Result<Token, LexError> {
        self.skip_blanks_and_comments()?;

        let loc = self.current_location();
        let Some(ch) = self.ch else {
            return Ok(Token::new(
                TokenKind::Eof,
                SourceLocation::new(self.line, self.column + 1),
            ));
        };

        match ch {
            'a'..='z' | 'A'..='Z' | '_' => Ok(self.word(loc)),
            '0'..='9' | '.' => self.number(loc),
            '"' | '\'' => self.string(ch, loc),
            _ => self.special(ch, loc),
        }
    }

    fn word(&mut self, loc: SourceLocation) -> Token {
        let mut word = String::new();
        while let Some(ch) = self.ch.filter(|c| c.is_ascii_alphanumeric() || *c == '_') {
            word.push(ch);
            self.bump();
        }

        match self.keywords.get(word.as_str()) {
            Some(&kind) => Token::new(kind, loc),
            None => Token::with_value(TokenKind::Ident, TokenValue::Text(word), loc),
        }
    }

    fn number(&mut self, loc: SourceLocation) -> Result<Token, LexError> {
        let mut integer: i32 = 0;
        let mut has_integer_part = false;
        let mut has_fraction = false;
        let mut float: Option<f64> = None;

        while let Some(digit) = self.current_digit() {
            has_integer_part = true;
            integer = integer
                .checked_mul(10)
                .and_then(|value| value.checked_add(digit as i32))
                .ok_or(LexError::new(LexErrorKind::IntegerOverflow, loc))?;
            self.bump();
        }

        if self.ch == Some('.') {
            self.bump();
            let mut value = integer as f64;
            let mut scale = 1.0_f64;
            while let Some(digit) = self.current_digit() {
                has_fraction = true;
                scale *= 0.1;
                value += digit as f64 * scale;
                self.bump();
            }
            float = Some(value);
        }

        if !has_integer_part && !has_fraction {
            return Err(LexError::new(LexErrorKind::MalformedNumber, loc));
        }

        if matches!(self.ch, Some('e') | Some('E')) {
            let mantissa = float.unwrap_or(integer as f64);
            self.bump();

            let mut sign = 1;
            if let Some(ch @ ('+' | '-')) = self.ch {
                if ch == '-' {
                    sign = -1;
                }
                self.bump();
            }

            if self.current_digit().is_none() {
                return Err(LexError::new(
                    LexErrorKind::MissingExponentDigits,
                    self.current_location(),
                ));
            }

            let mut exponent: i32 = 0;
            while let Some(digit) = self.current_digit() {
                let digit = digit as i32;
                if exponent > (MAX_EXPONENT - digit) / 10 {
                    return Err(LexError::new(LexErrorKind::ExponentOverflow, loc));
                }
                exponent = exponent * 10 + digit;
                self.bump();
            }

            let value = mantissa * 10_f64.powi(sign * exponent);
            if !value.is_finite() {
                return Err(LexError::new(LexErrorKind::ExponentOverflow, loc));
            }
            float = Some(value);
        }

        Ok(match float {
            Some(value) => Token::with_value(TokenKind::Float, TokenValue::Float(value), loc),
            None => Token::with_value(TokenKind::Integer, TokenValue::Integer(integer), loc),
        })
    }

    fn string(&mut self, delimiter: char, loc: SourceLocation) -> Result<Token, LexError> {
        let unterminated = LexError::new(LexErrorKind::UnterminatedString, loc);
        let mut text = String::new();
        self.bump(); // opening delimiter

        loop {
            match self.ch {
                None => return Err(unterminated),
                Some('\\') => {
                    self.bump();
                    match self.ch {
                        None => return Err(unterminated),
                        Some('\\') => text.push('\\'),
                        Some('n') => text.push('\n'),
                        Some('r') => text.push('\r'),
                        Some('t') => text.push('\t'),
                        Some(other) => {
                            text.push('\\');
                            text.push(other);
                        }
                    }
                    self.bump();
                }
                Some(ch) if ch == delimiter => {
                    self.bump();
                    return Ok(Token::with_value(TokenKind::String, TokenValue::Text(text), loc));
                }
                Some(ch) => {
                    text.push(ch);
                    self.bump();
                }
            }
        }
    }

    fn special(&mut self, ch: char, loc: SourceLocation) -> Result<Token, LexError> {
        let kind = match ch {
            '+' => TokenKind::Plus,
            '-' => TokenKind::Minus,
            '*' => TokenKind::Mult,
            '/' => TokenKind::Divide,
            '^' => TokenKind::Power,
            '(' => TokenKind::LParen,
            ')' => TokenKind::RParen,
            '[' => TokenKind::LBracket,
            ']' => TokenKind::RBracket,
            '{' => TokenKind::LBrace,
            '}' => TokenKind::RBrace,
            ',' => TokenKind::Comma,
            ';' => TokenKind::Semicolon,
            ':' => TokenKind::Colon,
            '<' => match self.reader.peek() {
                Some('=') => {
                    self.bump();
                    TokenKind::LessEq
                }
                Some('>') => {
                    self.bump();
                    TokenKind::NotEq
                }
                _ => TokenKind::Less,
            },
            '>' => {
                if self.reader.peek() == Some('=') {
                    self.bump();
                    TokenKind::GreaterEq
                } else {
                    TokenKind::Greater
                }
            }
            '=' => {
                if self.reader.peek() == Some('=') {
                    self.bump();
                    TokenKind::Equal
                } else {
                    TokenKind::Assign
                }
            }
            '!' => {
                if self.reader.peek() == Some('=') {
                    self.bump();
                    TokenKind::NotEq
                } else {
                    return Err(LexError::new(LexErrorKind::LoneBang, loc));
                }
            }
            other => {
                return Err(LexError::new(
                    LexErrorKind::UnrecognizedCharacter(other),
                    loc,
                ));
            }
        };

        self.bump();
        Ok(Token::new(kind, loc))
    }
}

/// Read a source file as UTF-8 text.
pub fn load_source(path: impl AsRef<Path>) -> Result<String, LoadError> {
    let path = path.as_ref();
    let text = fs::read_to_string(path).map_err(|source| LoadError {
        path: path.to_path_buf(),
        source,
    })?;
    debug!(path = %path.display(), bytes = text.len(), "loaded source file");
    Ok(text)
}
