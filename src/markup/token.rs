use std::fmt;

/// Reserved single-character delimiters of the `{reading|answer}` markup
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Delimiter {
    OpenBrace,
    CloseBrace,
    Bar,
}

impl Delimiter {
    pub fn from_char(c: char) -> Option<Self> {
        match c {
            '{' => Some(Delimiter::OpenBrace),
            '}' => Some(Delimiter::CloseBrace),
            '|' => Some(Delimiter::Bar),
            _ => None,
        }
    }

    pub fn as_char(self) -> char {
        match self {
            Delimiter::OpenBrace => '{',
            Delimiter::CloseBrace => '}',
            Delimiter::Bar => '|',
        }
    }
}

/// Lexical unit of one question line.
///
/// Fragments keep the exact source text between delimiters, including the
/// empty string when two delimiters touch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Token {
    Delimiter(Delimiter),
    Fragment(String),
}

impl Token {
    /// Source text this token was lexed from
    pub fn source_text(&self) -> std::borrow::Cow<'_, str> {
        match self {
            Token::Delimiter(delimiter) => delimiter.as_char().to_string().into(),
            Token::Fragment(text) => text.as_str().into(),
        }
    }

    /// Width of the token in characters (columns in the source line)
    pub fn char_len(&self) -> usize {
        match self {
            Token::Delimiter(_) => 1,
            Token::Fragment(text) => text.chars().count(),
        }
    }
}

impl fmt::Display for Delimiter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "`{}`", self.as_char())
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Token::Delimiter(delimiter) => write!(f, "{}", delimiter),
            Token::Fragment(text) => write!(f, "{:?}", text),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_delimiter_char_mapping() {
        for c in ['{', '}', '|'] {
            let delimiter = Delimiter::from_char(c).unwrap();
            assert_eq!(delimiter.as_char(), c);
        }
        assert_eq!(Delimiter::from_char('a'), None);
        assert_eq!(Delimiter::from_char('｛'), None);
    }

    #[test]
    fn test_token_char_len_counts_chars_not_bytes() {
        assert_eq!(Token::Fragment("漢字".to_string()).char_len(), 2);
        assert_eq!(Token::Delimiter(Delimiter::Bar).char_len(), 1);
        assert_eq!(Token::Fragment(String::new()).char_len(), 0);
    }

    #[test]
    fn test_token_display() {
        assert_eq!(Token::Delimiter(Delimiter::OpenBrace).to_string(), "`{`");
        assert_eq!(Token::Fragment("かんじ".to_string()).to_string(), "\"かんじ\"");
    }
}
