use std::ops::Range;

use chumsky::error::Rich;

/// A lexing or parsing failure with the byte range it applies to.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{message} at {}..{}", span.start, span.end)]
pub struct ParseError {
    pub message: String,
    pub span: Range<usize>,
}

impl ParseError {
    pub fn new(message: impl Into<String>, span: Range<usize>) -> Self {
        Self {
            message: message.into(),
            span,
        }
    }

    /// Convert a chumsky error whose span is relative to `offset`.
    pub(crate) fn from_rich<T: std::fmt::Display>(err: &Rich<'_, T>, offset: usize) -> Self {
        let span = err.span();
        Self::new(err.to_string(), offset + span.start..offset + span.end)
    }

    /// Render the error against its source text using Ariadne.
    ///
    /// Output is plain text without ANSI colors.
    pub fn report(&self, file_name: &str, source: &str) -> String {
        use ariadne::Color;
        use ariadne::Config;
        use ariadne::Label;
        use ariadne::Report;
        use ariadne::ReportKind;
        use ariadne::Source;

        let file_id = file_name.to_string();
        let span = self.span.start.min(source.len())..self.span.end.min(source.len());
        let mut output = Vec::new();

        let report = Report::build(ReportKind::Error, (file_id.clone(), span.clone()))
            .with_config(Config::default().with_color(false))
            .with_message("Failed to parse Tailwind config")
            .with_label(
                Label::new((file_id.clone(), span))
                    .with_message(&self.message)
                    .with_color(Color::Red),
            )
            .finish();
        report
            .write((file_id, Source::from(source.to_string())), &mut output)
            .ok();

        String::from_utf8_lossy(&output).into_owned()
    }
}
