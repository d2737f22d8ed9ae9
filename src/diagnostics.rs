use crate::base::Location;
use std::fmt;

/// Which of the four taxonomy buckets a [`Diagnostic`] belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Category {
    Lexical,
    Syntactic,
    SemanticDeclaration,
    Internal,
}

impl Category {
    pub fn as_str(self) -> &'static str {
        match self {
            Category::Lexical => "lexical",
            Category::Syntactic => "syntactic",
            Category::SemanticDeclaration => "semantic",
            Category::Internal => "internal",
        }
    }
}

/// A specific diagnosed condition, bucketed by category the way a
/// lexer/parser/semantic-pass front end typically splits its taxonomy, but
/// naming each variant after what it reports rather than an opaque `Exxx`
/// code, since this front end's taxonomy is small enough to enumerate
/// directly.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCode {
    // Lexical
    UnterminatedStringAtEol,
    UnterminatedStringAtEof,
    UnterminatedCommentAtEof,
    UndefinedCharacter,

    // Syntactic
    UnexpectedToken,
    MissingSemicolon,
    MissingTerminatorKeyword,
    MissingIdentifier,
    MissingRParen,

    // Semantic / declaration
    RedeclarationInSameScope,
    ShadowingInOuterScope,
    UndeclaredIdentifier,
    WrongKind,
    NoReturnValue,
    ArityMismatch,
    CyclicalInclude,
    IncludeFailedToParse,
    IncludeDidNotFullyPopScopes,
    TypeMismatch,

    // Internal / invariant
    SymbolUnlocatable,
}

impl ErrorCode {
    pub fn category(self) -> Category {
        use ErrorCode::*;
        match self {
            UnterminatedStringAtEol
            | UnterminatedStringAtEof
            | UnterminatedCommentAtEof
            | UndefinedCharacter => Category::Lexical,

            UnexpectedToken
            | MissingSemicolon
            | MissingTerminatorKeyword
            | MissingIdentifier
            | MissingRParen => Category::Syntactic,

            RedeclarationInSameScope
            | ShadowingInOuterScope
            | UndeclaredIdentifier
            | WrongKind
            | NoReturnValue
            | ArityMismatch
            | CyclicalInclude
            | IncludeFailedToParse
            | IncludeDidNotFullyPopScopes
            | TypeMismatch => Category::SemanticDeclaration,

            SymbolUnlocatable => Category::Internal,
        }
    }

    /// Whether this code is a warning by default (may still be promoted to
    /// an error by `Settings::warnings_as_errors`).
    pub fn default_severity(self) -> Severity {
        match self {
            ErrorCode::ShadowingInOuterScope => Severity::Warning,
            _ => Severity::Error,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Error,
    Warning,
}

impl Severity {
    pub fn as_str(self) -> &'static str {
        match self {
            Severity::Error => "error",
            Severity::Warning => "warning",
        }
    }
}

/// A single reported condition: location, taxonomy code, severity, a
/// human-readable message, and the offending lexeme. The structured fields
/// are the contract; `render` is a display convenience on top of them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    pub location: Location,
    pub code: ErrorCode,
    pub severity: Severity,
    pub message: String,
    pub lexeme: String,
}

impl Diagnostic {
    pub fn new(
        location: Location,
        code: ErrorCode,
        message: impl Into<String>,
        lexeme: impl Into<String>,
    ) -> Self {
        Self {
            location,
            code,
            severity: code.default_severity(),
            message: message.into(),
            lexeme: lexeme.into(),
        }
    }

    /// Re-tag the severity, e.g. when `warnings_as_errors` is set.
    pub fn with_severity(mut self, severity: Severity) -> Self {
        self.severity = severity;
        self
    }

    pub fn render(&self) -> String {
        format!(
            "{}: {} [{}]: {} (at `{}`)",
            self.location,
            self.severity.as_str(),
            self.code.category().as_str(),
            self.message,
            self.lexeme
        )
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::base::FileId;

    #[test]
    fn shadowing_defaults_to_warning() {
        let d = Diagnostic::new(
            Location::new(FileId::new(0), 1, 1),
            ErrorCode::ShadowingInOuterScope,
            "shadows an outer declaration",
            "x",
        );
        assert_eq!(d.severity, Severity::Warning);
    }

    #[test]
    fn render_includes_category_and_lexeme() {
        let d = Diagnostic::new(
            Location::new(FileId::new(0), 3, 7),
            ErrorCode::UndeclaredIdentifier,
            "undeclared identifier",
            "foo",
        );
        let rendered = d.render();
        assert!(rendered.contains("3:7"));
        assert!(rendered.contains("semantic"));
        assert!(rendered.contains("foo"));
    }
}
