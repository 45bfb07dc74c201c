use colored::*;
use commitmsg::{ContextParseError, NodeKind, Span};
use std::fmt;

/// Enhanced error with context and suggestions
pub struct EnhancedError {
    pub message: String,
    pub span: Option<Span>,
    pub file: Option<String>,
    pub source: Option<String>,
    pub suggestion: Option<String>,
    pub help: Option<String>,
}

impl EnhancedError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            span: None,
            file: None,
            source: None,
            suggestion: None,
            help: None,
        }
    }

    pub fn with_span(mut self, span: Span) -> Self {
        self.span = Some(span);
        self
    }

    pub fn with_file(mut self, file: impl Into<String>) -> Self {
        self.file = Some(file.into());
        self
    }

    pub fn with_source(mut self, source: impl Into<String>) -> Self {
        self.source = Some(source.into());
        self
    }

    pub fn with_suggestion(mut self, suggestion: impl Into<String>) -> Self {
        self.suggestion = Some(suggestion.into());
        self
    }

    pub fn with_help(mut self, help: impl Into<String>) -> Self {
        self.help = Some(help.into());
        self
    }

    /// Display the error with colored output and context
    pub fn display(&self) {
        eprint!("{}", self.render());
    }

    pub fn render(&self) -> String {
        let mut out = format!("{} {}\n", "error:".red().bold(), self.message.bold());

        if let (Some(source), Some(span)) = (&self.source, &self.span) {
            let (line, col) = span.line_col(source);
            let file = self.file.as_deref().unwrap_or("<message>");
            out.push_str(&format!("  {} {}:{}:{}\n", "-->".blue().bold(), file, line, col));
            out.push('\n');
            out.push_str(&render_source_line(source, line, col));
        }

        if let Some(suggestion) = &self.suggestion {
            out.push_str(&format!("\n{} {}\n", "suggestion:".green().bold(), suggestion));
        }

        if let Some(help) = &self.help {
            out.push_str(&format!("\n{} {}\n", "help:".cyan().bold(), help));
        }

        out
    }
}

fn render_source_line(source: &str, line: usize, col: usize) -> String {
    let Some(text) = source.split('\n').nth(line - 1) else {
        return String::new();
    };
    let width = line.to_string().len();
    format!(
        "{} {} {}\n{:>width$} {} {}{}\n",
        line.to_string().blue().bold(),
        "|".blue().bold(),
        text,
        "",
        "|".blue().bold(),
        " ".repeat(col.saturating_sub(1)),
        "^".red().bold(),
        width = width
    )
}

impl fmt::Display for EnhancedError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl fmt::Debug for EnhancedError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "EnhancedError: {}", self.message)
    }
}

impl std::error::Error for EnhancedError {}

/// Builds the user-facing report for a failed parse, with a suggestion
/// chosen by what the grammar expected.
pub fn enhance_parse_error(err: &ContextParseError, source: &str, file: Option<String>) -> EnhancedError {
    let mut enhanced = EnhancedError::new(err.to_string())
        .with_span(err.span())
        .with_source(source);

    if let Some(file) = file {
        enhanced = enhanced.with_file(file);
    }

    enhanced = match (err.kind, err.expected()) {
        (_, ": ") => enhanced
            .with_suggestion("Separate the type from the description with ': '")
            .with_help("Expected form: type(scope)!: description."),
        (NodeKind::Type, _) => enhanced
            .with_suggestion("Start the message with a type such as 'feat' or 'fix'")
            .with_help("Types are made of letters and digits only"),
        (NodeKind::Scope, _) => enhanced
            .with_suggestion("Close the scope with ')' and use only letters and digits inside"),
        (NodeKind::Description, ".") => {
            enhanced.with_suggestion("End the description with a period")
        }
        (NodeKind::Description, _) => enhanced
            .with_suggestion("Start the description with a word right after ': '")
            .with_help("Descriptions may contain letters, digits and spaces"),
        (NodeKind::CommitMessage, "end of input") => enhanced
            .with_suggestion("Remove the text after the description")
            .with_help("Pass --full to also parse body and BREAKING CHANGE footer paragraphs"),
        _ => enhanced,
    };

    enhanced
}
