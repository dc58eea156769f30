//! SQL Tokenizer implementation.

use super::{Keyword, LexError, Span, Token, TokenKind};

/// A lexer that tokenizes SQL input on demand.
///
/// `Lexer` is also an [`Iterator`] over `Result<Token, LexError>`: it yields
/// every token up to (but not including) end of input, and stops for good
/// after the first error.
pub struct Lexer<'a> {
    /// The input source code.
    input: &'a str,
    /// The current byte position.
    pos: usize,
    /// The byte position of the start of the current token.
    start: usize,
    /// Set once the iterator has hit end of input or an error.
    finished: bool,
}

impl<'a> Lexer<'a> {
    /// Creates a new lexer for the given input.
    #[must_use]
    pub const fn new(input: &'a str) -> Self {
        Self {
            input,
            pos: 0,
            start: 0,
            finished: false,
        }
    }

    /// Returns the current character without advancing.
    fn peek(&self) -> Option<char> {
        self.input[self.pos..].chars().next()
    }

    /// Returns the next character without advancing.
    fn peek_next(&self) -> Option<char> {
        let mut chars = self.input[self.pos..].chars();
        chars.next();
        chars.next()
    }

    /// Advances to the next character and returns it.
    fn advance(&mut self) -> Option<char> {
        let c = self.peek()?;
        self.pos += c.len_utf8();
        Some(c)
    }

    /// Skips whitespace and comments.
    fn skip_whitespace_and_comments(&mut self) -> Result<(), LexError> {
        loop {
            while self.peek().is_some_and(char::is_whitespace) {
                self.advance();
            }

            // -- to end of line
            if self.peek() == Some('-') && self.peek_next() == Some('-') {
                while self.peek().is_some_and(|c| c != '\n') {
                    self.advance();
                }
                continue;
            }

            // /* ... */, not nested
            if self.peek() == Some('/') && self.peek_next() == Some('*') {
                let offset = self.pos;
                self.advance();
                self.advance();
                loop {
                    match self.advance() {
                        Some('*') if self.peek() == Some('/') => {
                            self.advance();
                            break;
                        }
                        Some(_) => {}
                        None => return Err(LexError::UnterminatedComment { offset }),
                    }
                }
                continue;
            }

            return Ok(());
        }
    }

    /// Creates a token spanning from `start` to the current position.
    fn make_token(&self, kind: TokenKind) -> Token {
        let span = Span::new(self.start, self.pos);
        Token::new(kind, span.slice(self.input), span)
    }

    /// Scans an identifier or keyword.
    fn scan_identifier(&mut self) -> Token {
        while self.peek().is_some_and(|c| c.is_alphanumeric() || c == '_') {
            self.advance();
        }

        let text = &self.input[self.start..self.pos];
        match Keyword::lookup(text) {
            Some(keyword) => self.make_token(TokenKind::Keyword(keyword)),
            None => self.make_token(TokenKind::Identifier(String::from(text))),
        }
    }

    /// Scans a quoted identifier (e.g., "column name" or `column name`).
    fn scan_quoted_identifier(&mut self, quote: char) -> Result<Token, LexError> {
        let value = self.scan_quoted(quote).ok_or(LexError::UnterminatedIdentifier {
            offset: self.start,
        })?;
        Ok(self.make_token(TokenKind::Identifier(value)))
    }

    /// Scans a string literal.
    fn scan_string(&mut self) -> Result<Token, LexError> {
        let value = self
            .scan_quoted('\'')
            .ok_or(LexError::UnterminatedString { offset: self.start })?;
        Ok(self.make_token(TokenKind::String(value)))
    }

    /// Consumes a quoted run whose opening quote was already consumed.
    ///
    /// A doubled quote stands for one literal quote. Returns `None` when the
    /// input ends before the closing quote.
    fn scan_quoted(&mut self, quote: char) -> Option<String> {
        let mut value = String::new();
        loop {
            match self.advance()? {
                c if c == quote && self.peek() == Some(quote) => {
                    value.push(quote);
                    self.advance();
                }
                c if c == quote => return Some(value),
                c => value.push(c),
            }
        }
    }

    /// Scans a number (integer or float). `first` is already consumed and is
    /// either a digit or the `.` of a literal such as `.5`.
    ///
    /// A trailing `.` belongs to the number (`1.`) unless an identifier
    /// follows it, so `1.x` stays `1`, `.`, `x`.
    fn scan_number(&mut self, first: char) -> Result<Token, LexError> {
        let mut is_float = first == '.';

        while self.peek().is_some_and(|c| c.is_ascii_digit()) {
            self.advance();
        }

        if !is_float
            && self.peek() == Some('.')
            && !self.peek_next().is_some_and(|c| c.is_alphabetic() || c == '_')
        {
            is_float = true;
            self.advance();
            while self.peek().is_some_and(|c| c.is_ascii_digit()) {
                self.advance();
            }
        }

        if self.peek().is_some_and(|c| c == 'e' || c == 'E') {
            is_float = true;
            self.advance();
            if self.peek().is_some_and(|c| c == '+' || c == '-') {
                self.advance();
            }
            if !self.peek().is_some_and(|c| c.is_ascii_digit()) {
                return Err(self.invalid_number());
            }
            while self.peek().is_some_and(|c| c.is_ascii_digit()) {
                self.advance();
            }
        }

        let text = &self.input[self.start..self.pos];
        let kind = if is_float {
            text.parse::<f64>()
                .map(TokenKind::Float)
                .map_err(|_| self.invalid_number())?
        } else {
            text.parse::<i64>()
                .map(TokenKind::Integer)
                .map_err(|_| self.invalid_number())?
        };
        Ok(self.make_token(kind))
    }

    fn invalid_number(&self) -> LexError {
        LexError::InvalidNumber {
            text: String::from(&self.input[self.start..self.pos]),
            offset: self.start,
        }
    }

    /// Scans the next token, returning [`TokenKind::Eof`] once the input is
    /// exhausted.
    ///
    /// # Errors
    ///
    /// Returns a [`LexError`] for an unrecognized character, an unterminated
    /// literal or comment, or a malformed number.
    pub fn next_token(&mut self) -> Result<Token, LexError> {
        self.skip_whitespace_and_comments()?;
        self.start = self.pos;

        let Some(c) = self.advance() else {
            return Ok(Token::eof(self.pos));
        };

        let kind = match c {
            '(' => TokenKind::LeftParen,
            ')' => TokenKind::RightParen,
            ',' => TokenKind::Comma,
            '.' if self.peek().is_some_and(|c| c.is_ascii_digit()) => return self.scan_number(c),
            '.' => TokenKind::Dot,
            ';' => TokenKind::Semicolon,
            '+' => TokenKind::Plus,
            '-' => TokenKind::Minus,
            '*' => TokenKind::Star,
            '/' => TokenKind::Slash,
            '%' => TokenKind::Percent,
            '=' => TokenKind::Eq,
            '<' => match self.peek() {
                Some('=') => {
                    self.advance();
                    TokenKind::LtEq
                }
                Some('>') => {
                    self.advance();
                    TokenKind::NotEq
                }
                _ => TokenKind::Lt,
            },
            '>' => {
                if self.peek() == Some('=') {
                    self.advance();
                    TokenKind::GtEq
                } else {
                    TokenKind::Gt
                }
            }
            '!' if self.peek() == Some('=') => {
                self.advance();
                TokenKind::NotEq
            }
            '|' if self.peek() == Some('|') => {
                self.advance();
                TokenKind::Concat
            }

            '\'' => return self.scan_string(),
            '"' | '`' => return self.scan_quoted_identifier(c),
            c if c.is_ascii_digit() => return self.scan_number(c),
            c if c.is_alphabetic() || c == '_' => return Ok(self.scan_identifier()),

            ch => {
                return Err(LexError::UnexpectedCharacter {
                    ch,
                    offset: self.start,
                })
            }
        };

        Ok(self.make_token(kind))
    }
}

impl Iterator for Lexer<'_> {
    type Item = Result<Token, LexError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.finished {
            return None;
        }
        match self.next_token() {
            Ok(token) if token.is_eof() => {
                self.finished = true;
                None
            }
            Ok(token) => Some(Ok(token)),
            Err(e) => {
                self.finished = true;
                Some(Err(e))
            }
        }
    }
}

impl core::iter::FusedIterator for Lexer<'_> {}

/// Tokenizes the entire input, without the trailing end-of-input token.
///
/// # Errors
///
/// Returns the first [`LexError`] encountered.
pub fn tokenize(input: &str) -> Result<Vec<Token>, LexError> {
    Lexer::new(input).collect()
}
