//! Error types for parsing binding scripts

use ariadne::{Color, Label, Report, ReportKind, Source};
use thiserror::Error;

use crate::parser::lexer::Token;

/// Byte range in source text
pub type Span = std::ops::Range<usize>;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ParseError {
    #[error("Parse error at {span:?}: {message}")]
    Syntax {
        span: Span,
        message: String,
        expected: Vec<String>,
    },
}

impl ParseError {
    /// Input the lexer could not turn into any token
    pub fn unexpected_input(text: &str, span: Span) -> Self {
        ParseError::Syntax {
            span,
            message: format!("Unexpected character '{}'", text),
            expected: Vec::new(),
        }
    }

    pub fn span(&self) -> &Span {
        match self {
            ParseError::Syntax { span, .. } => span,
        }
    }

    /// Format the error with source context using ariadne
    pub fn format(&self, source: &str, filename: &str) -> String {
        match self {
            ParseError::Syntax {
                span,
                message,
                expected,
            } => {
                let note = if expected.is_empty() {
                    None
                } else {
                    Some(format!("Expected: {}", expected.join(", ")))
                };
                render_report(source, filename, span, message, message, note)
            }
        }
    }
}

/// Render a single-label error report pointing at `span`
pub(crate) fn render_report(
    source: &str,
    filename: &str,
    span: &Span,
    message: &str,
    label: &str,
    note: Option<String>,
) -> String {
    let mut report = Report::build(ReportKind::Error, filename, span.start)
        .with_message(message)
        .with_label(
            Label::new((filename, span.clone()))
                .with_message(label)
                .with_color(Color::Red),
        );
    if let Some(note) = note {
        report = report.with_note(note);
    }

    let mut buf = Vec::new();
    if report
        .finish()
        .write((filename, Source::from(source)), &mut buf)
        .is_err()
    {
        return format!("{}: {}", filename, message);
    }
    String::from_utf8_lossy(&buf).into_owned()
}

impl<'a> From<chumsky::error::Rich<'a, Token>> for ParseError {
    fn from(err: chumsky::error::Rich<'a, Token>) -> Self {
        use chumsky::error::RichReason;

        let message = match err.reason() {
            RichReason::ExpectedFound { found, .. } => {
                let found_str = match found {
                    Some(tok) => format_token(tok),
                    None => "end of input".to_string(),
                };
                format!("Unexpected {}", found_str)
            }
            RichReason::Custom(msg) => msg.to_string(),
            #[allow(unreachable_patterns)]
            _ => "Syntax error".to_string(),
        };

        // Format expected tokens nicely
        let expected: Vec<String> = err
            .expected()
            .filter_map(|e| match e {
                chumsky::error::RichPattern::Token(tok) => Some(format_token(tok)),
                chumsky::error::RichPattern::Label(label) => Some(label.to_string()),
                chumsky::error::RichPattern::EndOfInput => Some("end of input".to_string()),
                chumsky::error::RichPattern::Identifier(s) => Some(format!("identifier '{}'", s)),
                #[allow(unreachable_patterns)]
                _ => None,
            })
            .collect();

        ParseError::Syntax {
            span: err.span().into_range(),
            message,
            expected,
        }
    }
}

/// Format a token for human-readable error messages
fn format_token(tok: &Token) -> String {
    match tok {
        Token::Ident(s) => format!("identifier '{}'", s),
        Token::Number(n) => format!("number {}", n),
        Token::View => "keyword 'view'".to_string(),
        Token::In => "keyword 'in'".to_string(),
        Token::Myself => "keyword 'myself'".to_string(),
        Token::Plus => "'+'".to_string(),
        Token::Minus => "'-'".to_string(),
        Token::Star => "'*'".to_string(),
        Token::Slash => "'/'".to_string(),
        Token::Equals => "'='".to_string(),
        Token::ParenOpen => "'('".to_string(),
        Token::ParenClose => "')'".to_string(),
        Token::Dot => "'.'".to_string(),
        Token::LineComment | Token::BlockComment => "comment".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_includes_message_and_source() {
        let source = "a.top = )";
        let err = ParseError::Syntax {
            span: 8..9,
            message: "Unexpected ')'".to_string(),
            expected: vec!["number".to_string()],
        };
        let rendered = err.format(source, "layout.anchors");
        assert!(rendered.contains("Unexpected ')'"));
        assert!(rendered.contains("layout.anchors"));
        assert!(rendered.contains("Expected: number"));
    }

    #[test]
    fn test_parse_failure_converts_to_syntax_error() {
        let errors = crate::parser::parse("view a in").unwrap_err();
        match &errors[0] {
            ParseError::Syntax { message, span, .. } => {
                assert!(message.starts_with("Unexpected"), "got {}", message);
                assert!(span.start >= 7, "got {:?}", span);
            }
        }
    }
}
