/// One visually distinct chunk of a question line, in draw order
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DisplaySegment {
    pub text: String,
    /// True for a reading (yomi) that stands in for a hidden answer
    pub underline: bool,
}

impl DisplaySegment {
    pub fn plain(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            underline: false,
        }
    }

    pub fn reading(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            underline: true,
        }
    }
}

/// Parsed form of one question line.
///
/// The i-th underlined segment pairs with `answers[i]`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParsedLine {
    pub display: Vec<DisplaySegment>,
    pub answers: Vec<String>,
}

impl ParsedLine {
    /// Raw line shown as-is, with no blanks and no answers
    pub fn verbatim(line: &str) -> Self {
        let display = if line.is_empty() {
            Vec::new()
        } else {
            vec![DisplaySegment::plain(line)]
        };
        Self {
            display,
            answers: Vec::new(),
        }
    }

    pub fn blank_count(&self) -> usize {
        self.display.iter().filter(|s| s.underline).count()
    }

    /// Question as the student sees it: every group flattened to its reading
    pub fn question_text(&self) -> String {
        self.display.iter().map(|s| s.text.as_str()).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_verbatim_line() {
        let line = ParsedLine::verbatim("{broken");
        assert_eq!(line.display, vec![DisplaySegment::plain("{broken")]);
        assert!(line.answers.is_empty());
        assert!(ParsedLine::verbatim("").display.is_empty());
    }

    #[test]
    fn test_question_view_and_blank_count() {
        let line = ParsedLine {
            display: vec![
                DisplaySegment::reading("やま"),
                DisplaySegment::plain("と"),
                DisplaySegment::reading("かわ"),
            ],
            answers: vec!["山".to_string(), "川".to_string()],
        };
        assert_eq!(line.blank_count(), 2);
        assert_eq!(line.question_text(), "やまとかわ");
    }
}
