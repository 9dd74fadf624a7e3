use std::fmt;

use thiserror::Error;
use tracing::debug;

use super::lexer::lex;
use super::segment::{DisplaySegment, ParsedLine};
use super::token::{Delimiter, Token};

/// Position inside a `{reading|answer}` group
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GroupStep {
    ExpectReading,
    ExpectBar,
    ExpectAnswer,
    ExpectClose,
}

impl fmt::Display for GroupStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GroupStep::ExpectReading => write!(f, "a reading"),
            GroupStep::ExpectBar => write!(f, "`|`"),
            GroupStep::ExpectAnswer => write!(f, "an answer"),
            GroupStep::ExpectClose => write!(f, "`}}`"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ParseState {
    Plain,
    InGroup(GroupStep),
}

/// Malformed markup in a single line. Columns are 1-based character positions.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SyntaxError {
    #[error("column {column}: expected {expected}, found {found}")]
    Unexpected {
        column: usize,
        expected: GroupStep,
        found: String,
    },

    #[error("column {column}: unexpected end of line, expected {expected}")]
    UnexpectedEnd { column: usize, expected: GroupStep },

    #[error("column {column}: {delimiter} outside of a `{{reading|answer}}` group")]
    StrayDelimiter { column: usize, delimiter: Delimiter },
}

impl SyntaxError {
    pub fn column(&self) -> usize {
        match self {
            SyntaxError::Unexpected { column, .. }
            | SyntaxError::UnexpectedEnd { column, .. }
            | SyntaxError::StrayDelimiter { column, .. } => *column,
        }
    }
}

/// Builds display segments and answers from a token stream.
///
/// Plain fragments become plain segments; each `{ reading | answer }` group
/// adds one underlined segment and one answer, so both lists stay in lockstep.
/// Empty plain fragments are dropped, empty readings and answers are kept.
pub fn parse(tokens: &[Token]) -> Result<ParsedLine, SyntaxError> {
    let mut line = ParsedLine::default();
    let mut state = ParseState::Plain;
    let mut column = 1;

    for token in tokens {
        state = match (state, token) {
            (ParseState::Plain, Token::Delimiter(Delimiter::OpenBrace)) => {
                ParseState::InGroup(GroupStep::ExpectReading)
            }
            (ParseState::Plain, Token::Delimiter(delimiter)) => {
                return Err(SyntaxError::StrayDelimiter {
                    column,
                    delimiter: *delimiter,
                });
            }
            (ParseState::Plain, Token::Fragment(text)) => {
                if !text.is_empty() {
                    line.display.push(DisplaySegment::plain(text.as_str()));
                }
                ParseState::Plain
            }
            (ParseState::InGroup(GroupStep::ExpectReading), Token::Fragment(yomi)) => {
                line.display.push(DisplaySegment::reading(yomi.as_str()));
                ParseState::InGroup(GroupStep::ExpectBar)
            }
            (ParseState::InGroup(GroupStep::ExpectBar), Token::Delimiter(Delimiter::Bar)) => {
                ParseState::InGroup(GroupStep::ExpectAnswer)
            }
            (ParseState::InGroup(GroupStep::ExpectAnswer), Token::Fragment(kaki)) => {
                line.answers.push(kaki.clone());
                ParseState::InGroup(GroupStep::ExpectClose)
            }
            (
                ParseState::InGroup(GroupStep::ExpectClose),
                Token::Delimiter(Delimiter::CloseBrace),
            ) => ParseState::Plain,
            (ParseState::InGroup(expected), found) => {
                return Err(SyntaxError::Unexpected {
                    column,
                    expected,
                    found: found.to_string(),
                });
            }
        };
        column += token.char_len();
    }

    match state {
        ParseState::Plain => Ok(line),
        ParseState::InGroup(expected) => Err(SyntaxError::UnexpectedEnd { column, expected }),
    }
}

/// Lexes and parses one raw question line
pub fn parse_line(line: &str) -> Result<ParsedLine, SyntaxError> {
    let tokens = lex(line);
    let parsed = parse(&tokens)?;
    debug!(
        tokens = tokens.len(),
        segments = parsed.display.len(),
        answers = parsed.answers.len(),
        "parsed question line"
    );
    Ok(parsed)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_empty_line() {
        let line = parse_line("").unwrap();
        assert!(line.display.is_empty());
        assert!(line.answers.is_empty());
    }

    #[test]
    fn test_parse_plain_line() {
        let line = parse_line("今日は晴れです。").unwrap();
        assert_eq!(line.display, vec![DisplaySegment::plain("今日は晴れです。")]);
        assert!(line.answers.is_empty());
    }

    #[test]
    fn test_parse_single_group() {
        let line = parse_line("{AB|CD}").unwrap();
        assert_eq!(line.display, vec![DisplaySegment::reading("AB")]);
        assert_eq!(line.answers, vec!["CD"]);
    }

    #[test]
    fn test_parse_group_with_surrounding_text() {
        let line = parse_line("X{AB|CD}Y").unwrap();
        assert_eq!(
            line.display,
            vec![
                DisplaySegment::plain("X"),
                DisplaySegment::reading("AB"),
                DisplaySegment::plain("Y"),
            ]
        );
        assert_eq!(line.answers, vec!["CD"]);
    }

    #[test]
    fn test_parse_empty_reading_is_kept() {
        let line = parse_line("{|CD}").unwrap();
        assert_eq!(line.display, vec![DisplaySegment::reading("")]);
        assert_eq!(line.answers, vec!["CD"]);
    }

    #[test]
    fn test_parse_empty_answer_is_kept() {
        let line = parse_line("{よみ|}").unwrap();
        assert_eq!(line.display, vec![DisplaySegment::reading("よみ")]);
        assert_eq!(line.answers, vec![""]);
    }

    #[test]
    fn test_parse_adjacent_groups() {
        let line = parse_line("{やま|山}{かわ|川}").unwrap();
        assert_eq!(
            line.display,
            vec![DisplaySegment::reading("やま"), DisplaySegment::reading("かわ")]
        );
        assert_eq!(line.answers, vec!["山", "川"]);
    }

    #[test]
    fn test_parse_unterminated_group() {
        let err = parse_line("あ{かん|漢").unwrap_err();
        assert_eq!(
            err,
            SyntaxError::UnexpectedEnd {
                column: 7,
                expected: GroupStep::ExpectClose,
            }
        );
    }

    #[test]
    fn test_parse_missing_bar() {
        let err = parse_line("{AB}").unwrap_err();
        assert_eq!(
            err,
            SyntaxError::Unexpected {
                column: 4,
                expected: GroupStep::ExpectBar,
                found: "`}`".to_string(),
            }
        );
    }

    #[test]
    fn test_parse_nested_open_brace() {
        let err = parse_line("{{a|b}|c}").unwrap_err();
        assert_eq!(
            err,
            SyntaxError::Unexpected {
                column: 2,
                expected: GroupStep::ExpectBar,
                found: "`{`".to_string(),
            }
        );
    }

    #[test]
    fn test_parse_extra_bar_inside_group() {
        let err = parse_line("{a|b|c}").unwrap_err();
        assert_eq!(err.column(), 5);
        assert!(matches!(
            err,
            SyntaxError::Unexpected {
                expected: GroupStep::ExpectClose,
                ..
            }
        ));
    }

    #[test]
    fn test_parse_stray_close_brace() {
        let err = parse_line("abc}").unwrap_err();
        assert_eq!(
            err,
            SyntaxError::StrayDelimiter {
                column: 4,
                delimiter: Delimiter::CloseBrace,
            }
        );
    }

    #[test]
    fn test_parse_stray_bar() {
        let err = parse_line("a|b").unwrap_err();
        assert_eq!(err.column(), 2);
    }

    #[test]
    fn test_parse_accepts_tokens_without_leading_fragment() {
        let tokens = vec![
            Token::Delimiter(Delimiter::OpenBrace),
            Token::Fragment("よ".to_string()),
            Token::Delimiter(Delimiter::Bar),
            Token::Fragment("読".to_string()),
            Token::Delimiter(Delimiter::CloseBrace),
        ];
        let line = parse(&tokens).unwrap();
        assert_eq!(line.display, vec![DisplaySegment::reading("よ")]);
        assert_eq!(line.answers, vec!["読"]);
    }

    #[test]
    fn test_syntax_error_messages() {
        let err = parse_line("{AB").unwrap_err();
        assert_eq!(
            err.to_string(),
            "column 4: unexpected end of line, expected `|`"
        );
        let err = parse_line("|").unwrap_err();
        assert_eq!(
            err.to_string(),
            "column 1: `|` outside of a `{reading|answer}` group"
        );
    }
}
