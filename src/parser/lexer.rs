use crate::base::{Location, SourceBuffer};

use super::keywords;
use super::token::{Token, TokenKind};

/// Produces a lazy sequence of [`Token`]s from a [`SourceBuffer`].
///
/// Wraps a byte cursor directly rather than dispatching through a
/// generated-table lexer: distinguishing "unterminated at end-of-line" from
/// "unterminated at end-of-file" needs access to the raw remainder at the
/// point a string or comment fails to close, which a table-driven lexer
/// doesn't expose as naturally. Rust-analyzer's own hand-rolled `Cursor`
/// follows the same reasoning.
pub struct Lexer {
    cursor: crate::base::Cursor,
}

impl Lexer {
    pub fn new(buffer: &SourceBuffer) -> Self {
        Self {
            cursor: buffer.cursor(),
        }
    }

    fn peek_byte(&self) -> Option<u8> {
        self.cursor.remainder().as_bytes().first().copied()
    }

    fn peek_byte_at(&self, offset: usize) -> Option<u8> {
        self.cursor.remainder().as_bytes().get(offset).copied()
    }

    /// Skip whitespace and brace comments. Returns an error token if a
    /// comment reaches EOF unclosed.
    fn skip_trivia(&mut self) -> Option<Token> {
        loop {
            match self.peek_byte() {
                Some(b' ') | Some(b'\t') | Some(b'\r') | Some(b'\n') => {
                    self.cursor.advance(1);
                }
                Some(b'{') => {
                    let start = self.cursor.location();
                    self.cursor.advance(1);
                    let mut closed = false;
                    while let Some(b) = self.peek_byte() {
                        self.cursor.advance(1);
                        if b == b'}' {
                            closed = true;
                            break;
                        }
                    }
                    if !closed {
                        return Some(Token::new(
                            TokenKind::ErrorUnterminatedConstructAtEof,
                            "{",
                            start,
                        ));
                    }
                }
                _ => return None,
            }
        }
    }

    fn lex_number(&mut self, start: Location) -> Token {
        let text_start = self.cursor.offset();
        while matches!(self.peek_byte(), Some(b) if b.is_ascii_digit()) {
            self.cursor.advance(1);
        }
        let mut kind = TokenKind::Integer;
        if self.peek_byte() == Some(b'.')
            && matches!(self.peek_byte_at(1), Some(b) if b.is_ascii_digit())
        {
            kind = TokenKind::Real;
            self.cursor.advance(1); // '.'
            while matches!(self.peek_byte(), Some(b) if b.is_ascii_digit()) {
                self.cursor.advance(1);
            }
        }
        if matches!(self.peek_byte(), Some(b'i') | Some(b'I')) {
            kind = TokenKind::Complex;
            self.cursor.advance(1);
        }
        let lexeme = self.slice_from(text_start);
        Token::new(kind, lexeme, start)
    }

    fn lex_string(&mut self, start: Location, quote: u8) -> Token {
        let text_start = self.cursor.offset();
        self.cursor.advance(1); // opening quote
        loop {
            match self.peek_byte() {
                None => {
                    let lexeme = self.slice_from(text_start);
                    return Token::new(TokenKind::ErrorUnterminatedConstructAtEof, lexeme, start);
                }
                Some(b'\n') => {
                    let lexeme = self.slice_from(text_start);
                    return Token::new(TokenKind::ErrorUnterminatedStringAtEol, lexeme, start);
                }
                Some(b) if b == quote => {
                    self.cursor.advance(1);
                    let lexeme = self.slice_from(text_start);
                    return Token::new(TokenKind::String, lexeme, start);
                }
                Some(_) => {
                    self.cursor.advance(1);
                }
            }
        }
    }

    fn lex_identifier_or_keyword(&mut self, start: Location) -> Token {
        let text_start = self.cursor.offset();
        while matches!(self.peek_byte(), Some(b) if b.is_ascii_alphanumeric() || b == b'_') {
            self.cursor.advance(1);
        }
        let lexeme = self.slice_from(text_start);
        let uppercased = lexeme.to_ascii_uppercase();
        let kind = keywords::classify(&uppercased).unwrap_or(TokenKind::Identifier);
        Token::new(kind, lexeme, start)
    }

    fn slice_from(&self, start: text_size::TextSize) -> String {
        let start: usize = start.into();
        let end: usize = self.cursor.offset().into();
        self.cursor.source()[start..end].to_string()
    }

    fn simple(&mut self, kind: TokenKind, start: Location, len: usize) -> Token {
        let text_start = self.cursor.offset();
        self.cursor.advance(len);
        let lexeme = self.slice_from(text_start);
        Token::new(kind, lexeme, start)
    }

    /// Produce the next token, or `Eof` once the buffer is exhausted.
    pub fn next_token(&mut self) -> Token {
        if let Some(err) = self.skip_trivia() {
            return err;
        }
        let start = self.cursor.location();
        let Some(b) = self.peek_byte() else {
            return Token::new(TokenKind::Eof, "", start);
        };

        match b {
            b'(' => self.simple(TokenKind::LParen, start, 1),
            b')' => self.simple(TokenKind::RParen, start, 1),
            b',' => self.simple(TokenKind::Comma, start, 1),
            b';' => self.simple(TokenKind::Semicolon, start, 1),
            b'+' => self.simple(TokenKind::Plus, start, 1),
            b'-' => self.simple(TokenKind::Minus, start, 1),
            b'*' => self.simple(TokenKind::Star, start, 1),
            b'/' => self.simple(TokenKind::Slash, start, 1),
            b'^' => self.simple(TokenKind::Caret, start, 1),
            b'=' => self.simple(TokenKind::Equal, start, 1),
            b'#' => self.simple(TokenKind::Hash, start, 1),
            b'&' => self.simple(TokenKind::Amp, start, 1),
            b'|' => self.simple(TokenKind::Pipe, start, 1),
            b'%' => self.simple(TokenKind::Percent, start, 1),
            b':' => {
                if self.peek_byte_at(1) == Some(b'=') {
                    self.simple(TokenKind::Assign, start, 2)
                } else {
                    self.simple(TokenKind::ErrorUndefinedToken, start, 1)
                }
            }
            b'<' => {
                if self.peek_byte_at(1) == Some(b'=') {
                    self.simple(TokenKind::LessEqual, start, 2)
                } else {
                    self.simple(TokenKind::Less, start, 1)
                }
            }
            b'>' => {
                if self.peek_byte_at(1) == Some(b'=') {
                    self.simple(TokenKind::GreaterEqual, start, 2)
                } else {
                    self.simple(TokenKind::Greater, start, 1)
                }
            }
            b'0'..=b'9' => self.lex_number(start),
            b'\'' | b'"' => self.lex_string(start, b),
            b if b.is_ascii_alphabetic() => self.lex_identifier_or_keyword(start),
            _ => self.simple(TokenKind::ErrorUndefinedToken, start, 1),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::base::FileId;

    fn tokens_of(text: &str) -> Vec<Token> {
        let buffer = SourceBuffer::new(FileId::new(0), text.to_string());
        let mut lexer = Lexer::new(&buffer);
        let mut out = Vec::new();
        loop {
            let tok = lexer.next_token();
            let done = tok.kind == TokenKind::Eof;
            out.push(tok);
            if done {
                break;
            }
        }
        out
    }

    #[test]
    fn lexes_simple_punctuation() {
        let toks = tokens_of(":= <= >= < > ( ) , ;");
        let kinds: Vec<_> = toks.iter().map(|t| t.kind).collect();
        assert_eq!(
            kinds,
            vec![
                TokenKind::Assign,
                TokenKind::LessEqual,
                TokenKind::GreaterEqual,
                TokenKind::Less,
                TokenKind::Greater,
                TokenKind::LParen,
                TokenKind::RParen,
                TokenKind::Comma,
                TokenKind::Semicolon,
                TokenKind::Eof,
            ]
        );
    }

    #[test]
    fn lone_colon_is_an_error_token() {
        let toks = tokens_of(":");
        assert_eq!(toks[0].kind, TokenKind::ErrorUndefinedToken);
    }

    #[test]
    fn integer_real_and_complex_promotion() {
        let toks = tokens_of("4 4.5 4i 4.5I");
        let kinds: Vec<_> = toks.iter().map(|t| t.kind).collect();
        assert_eq!(
            kinds,
            vec![
                TokenKind::Integer,
                TokenKind::Real,
                TokenKind::Complex,
                TokenKind::Complex,
                TokenKind::Eof,
            ]
        );
    }

    #[test]
    fn integer_dot_non_digit_is_integer_then_separate_dot() {
        // '.' is not itself a valid token in this grammar; this test only
        // asserts the integer does not swallow the dot.
        let toks = tokens_of("4.x");
        assert_eq!(toks[0].kind, TokenKind::Integer);
        assert_eq!(toks[0].lexeme, "4");
    }

    #[test]
    fn keywords_are_case_insensitive() {
        let toks = tokens_of("begin Begin BEGIN");
        for t in &toks[..3] {
            assert_eq!(t.kind, TokenKind::Begin);
        }
    }

    #[test]
    fn unterminated_string_at_eol_vs_eof() {
        let eol = tokens_of("\"abc\ndef\"");
        assert_eq!(eol[0].kind, TokenKind::ErrorUnterminatedStringAtEol);

        let eof = tokens_of("\"abc");
        assert_eq!(eof[0].kind, TokenKind::ErrorUnterminatedConstructAtEof);
    }

    #[test]
    fn unterminated_comment_at_eof() {
        let toks = tokens_of("{ this never closes");
        assert_eq!(toks[0].kind, TokenKind::ErrorUnterminatedConstructAtEof);
    }

    #[test]
    fn comment_is_skipped_not_emitted() {
        let toks = tokens_of("variable { a comment } x 4;");
        let kinds: Vec<_> = toks.iter().map(|t| t.kind).collect();
        assert_eq!(
            kinds,
            vec![
                TokenKind::Variable,
                TokenKind::Identifier,
                TokenKind::Integer,
                TokenKind::Semicolon,
                TokenKind::Eof,
            ]
        );
    }
}
