use super::token::{Delimiter, Token};

/// Splits one question line into delimiter and fragment tokens.
///
/// Every delimiter is preceded by a fragment token holding the text since the
/// previous delimiter, which may be empty. The tail after the last delimiter is
/// emitted only when it is non-empty, so joining the tokens' source text always
/// reproduces `line`.
pub fn lex(line: &str) -> Vec<Token> {
    let mut tokens = Vec::new();
    let mut span_start = 0;

    for (index, c) in line.char_indices() {
        if let Some(delimiter) = Delimiter::from_char(c) {
            tokens.push(Token::Fragment(line[span_start..index].to_string()));
            tokens.push(Token::Delimiter(delimiter));
            span_start = index + c.len_utf8();
        }
    }

    if span_start < line.len() {
        tokens.push(Token::Fragment(line[span_start..].to_string()));
    }

    tokens
}
