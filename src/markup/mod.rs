//! Question-line markup: `{reading|answer}` groups inside plain text.
//!
//! A line is lexed into delimiter/fragment tokens, then parsed into display
//! segments plus the answers hidden behind the underlined readings.

pub mod lexer;
pub mod parser;
pub mod segment;
pub mod token;

pub use lexer::lex;
pub use parser::{parse, parse_line, GroupStep, SyntaxError};
pub use segment::{DisplaySegment, ParsedLine};
pub use token::{Delimiter, Token};
