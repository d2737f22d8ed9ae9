use super::token::TokenKind;

/// Classify an identifier run as a keyword, case-insensitively.
///
/// Implemented as a `match` over the uppercased spelling rather than a
/// runtime-initialized hash map: this compiles to a jump table with no
/// allocation and no initialization order to reason about.
pub fn classify(uppercased: &str) -> Option<TokenKind> {
    use TokenKind::*;
    Some(match uppercased {
        "BEGIN" => Begin,
        "END" => End,
        "INCLUDE" => Include,
        "PROCEDURE" => Procedure,
        "ENDPROCEDURE" => EndProcedure,
        "FUNCTION" => Function,
        "ENDFUNCTION" => EndFunction,
        "VARIABLE" => Variable,
        "SCOPE" => Scope,
        "ENDSCOPE" => EndScope,
        "IF" => If,
        "ELSEIF" => ElseIf,
        "ENDIF" => EndIf,
        "WHILE" => While,
        "ENDWHILE" => EndWhile,
        "LOOP" => Loop,
        "ENDLOOP" => EndLoop,
        "READ" => Read,
        "WRITE" => Write,
        "FIT" => Fit,
        "ENDFIT" => EndFit,
        "PLOOP" => Ploop,
        "ENDPLOOP" => EndPloop,
        "SAVE" => Save,
        _ => return None,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[test]
    fn classification_is_case_insensitive() {
        assert_eq!(classify("begin"), Some(TokenKind::Begin));
        assert_eq!(classify("Begin"), Some(TokenKind::Begin));
        assert_eq!(classify("BEGIN"), Some(TokenKind::Begin));
    }

    #[test]
    fn non_keywords_classify_to_none() {
        assert_eq!(classify("TOTAL"), None);
        assert_eq!(classify(""), None);
    }

    #[rstest]
    #[case("FIT", TokenKind::Fit)]
    #[case("ENDFIT", TokenKind::EndFit)]
    #[case("PLOOP", TokenKind::Ploop)]
    #[case("ENDPLOOP", TokenKind::EndPloop)]
    #[case("SAVE", TokenKind::Save)]
    fn legacy_tokens_are_classified(#[case] spelling: &str, #[case] expected: TokenKind) {
        assert_eq!(classify(spelling), Some(expected));
    }
}
