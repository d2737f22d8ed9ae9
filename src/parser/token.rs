use crate::base::Location;
use std::fmt;

/// The kind of a single lexical token.
///
/// Variants cover the full lexical taxonomy: punctuation/operators,
/// literal kinds, identifier, keywords (plus a handful of legacy tokens kept
/// only for lexer fidelity), `CommentBlock`/`Newline` (reserved, never
/// actually emitted by the lexer — see [`crate::parser::lexer::Lexer`]),
/// `Eof`, and the three distinguished error kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenKind {
    LParen,
    RParen,
    Comma,
    Semicolon,
    Assign,
    Plus,
    Minus,
    Star,
    Slash,
    Caret,
    Equal,
    Hash,
    Less,
    LessEqual,
    Greater,
    GreaterEqual,
    Amp,
    Pipe,
    Percent,

    Integer,
    Real,
    Complex,
    String,

    Identifier,

    Begin,
    End,
    Include,
    Procedure,
    EndProcedure,
    Function,
    EndFunction,
    Variable,
    Scope,
    EndScope,
    If,
    ElseIf,
    EndIf,
    While,
    EndWhile,
    Loop,
    EndLoop,
    Read,
    Write,

    /// Legacy keyword kept only for lexer fidelity; never wired into a
    /// grammar production.
    Fit,
    /// Legacy keyword kept only for lexer fidelity; never wired into a
    /// grammar production.
    EndFit,
    /// Legacy keyword kept only for lexer fidelity; never wired into a
    /// grammar production.
    Ploop,
    /// Legacy keyword kept only for lexer fidelity; never wired into a
    /// grammar production.
    EndPloop,
    /// Legacy keyword kept only for lexer fidelity; never wired into a
    /// grammar production.
    Save,

    /// Reserved; never produced by the lexer (comments are skipped, not
    /// tokenized).
    CommentBlock,
    /// Reserved; never produced by the lexer (newlines are whitespace and
    /// are skipped, not tokenized).
    Newline,

    Eof,

    ErrorUndefinedToken,
    ErrorUnterminatedStringAtEol,
    ErrorUnterminatedConstructAtEof,
}

impl TokenKind {
    pub fn is_error(self) -> bool {
        matches!(
            self,
            TokenKind::ErrorUndefinedToken
                | TokenKind::ErrorUnterminatedStringAtEol
                | TokenKind::ErrorUnterminatedConstructAtEof
        )
    }

    pub fn is_keyword(self) -> bool {
        use TokenKind::*;
        matches!(
            self,
            Begin | End
                | Include
                | Procedure
                | EndProcedure
                | Function
                | EndFunction
                | Variable
                | Scope
                | EndScope
                | If
                | ElseIf
                | EndIf
                | While
                | EndWhile
                | Loop
                | EndLoop
                | Read
                | Write
                | Fit
                | EndFit
                | Ploop
                | EndPloop
                | Save
        )
    }

    /// A short human name for diagnostics, e.g. "`;`" or "identifier".
    pub fn describe(self) -> &'static str {
        use TokenKind::*;
        match self {
            LParen => "`(`",
            RParen => "`)`",
            Comma => "`,`",
            Semicolon => "`;`",
            Assign => "`:=`",
            Plus => "`+`",
            Minus => "`-`",
            Star => "`*`",
            Slash => "`/`",
            Caret => "`^`",
            Equal => "`=`",
            Hash => "`#`",
            Less => "`<`",
            LessEqual => "`<=`",
            Greater => "`>`",
            GreaterEqual => "`>=`",
            Amp => "`&`",
            Pipe => "`|`",
            Percent => "`%`",
            Integer => "integer literal",
            Real => "real literal",
            Complex => "complex literal",
            String => "string literal",
            Identifier => "identifier",
            Begin => "`BEGIN`",
            End => "`END`",
            Include => "`INCLUDE`",
            Procedure => "`PROCEDURE`",
            EndProcedure => "`ENDPROCEDURE`",
            Function => "`FUNCTION`",
            EndFunction => "`ENDFUNCTION`",
            Variable => "`VARIABLE`",
            Scope => "`SCOPE`",
            EndScope => "`ENDSCOPE`",
            If => "`IF`",
            ElseIf => "`ELSEIF`",
            EndIf => "`ENDIF`",
            While => "`WHILE`",
            EndWhile => "`ENDWHILE`",
            Loop => "`LOOP`",
            EndLoop => "`ENDLOOP`",
            Read => "`READ`",
            Write => "`WRITE`",
            Fit => "`FIT`",
            EndFit => "`ENDFIT`",
            Ploop => "`PLOOP`",
            EndPloop => "`ENDPLOOP`",
            Save => "`SAVE`",
            CommentBlock => "comment",
            Newline => "newline",
            Eof => "end of file",
            ErrorUndefinedToken => "undefined token",
            ErrorUnterminatedStringAtEol => "unterminated string",
            ErrorUnterminatedConstructAtEof => "unterminated construct",
        }
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.describe())
    }
}

/// A single lexical token: kind, the exact source text it covers, and its
/// starting location.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub kind: TokenKind,
    pub lexeme: String,
    pub location: Location,
}

impl Token {
    pub fn new(kind: TokenKind, lexeme: impl Into<String>, location: Location) -> Self {
        Self {
            kind,
            lexeme: lexeme.into(),
            location,
        }
    }
}
