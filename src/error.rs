//! Error types for lexing and document building
//!
//! Every error is fatal for the document being processed: the builder never hands back a
//! partially populated [`Document`](crate::Document).

use crate::lexer::Command;
use thiserror::Error;

/// Errors raised by the lexer.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LexError {
    /// No recognizer consumed any input. The fallback recognizer accepts any residual text,
    /// so this signals a broken recognizer set rather than bad input.
    #[error("no recognizer matched the input starting at {snippet:?}")]
    NoRecognizer { snippet: String },

    /// A lexer was configured without any language alias for code fences.
    #[error("at least one code fence language alias is required")]
    NoLanguageAliases,

    /// A language alias was empty or contained whitespace.
    #[error("invalid code fence language alias {alias:?}")]
    InvalidLanguageAlias { alias: String },
}

/// Errors raised while folding the token stream into a document.
///
/// `line` is the 1-based source line the error points at, when the tokens carried spans.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    #[error("directives must be directly followed by a code block{}", at_line(.line))]
    DanglingDirective { line: Option<usize> },

    #[error("`globals` must not be combined with `{command}`{}", at_line(.line))]
    IncompatibleDirective { command: Command, line: Option<usize> },

    #[error("snippet `{name}` is used before being defined{}", at_line(.line))]
    UndefinedSnippet { name: String, line: Option<usize> },

    #[error("`{command}` takes exactly one argument, found {found}{}", at_line(.line))]
    InvalidArguments {
        command: Command,
        found: usize,
        line: Option<usize>,
    },
}

impl ParseError {
    /// The source line this error points at, if known.
    pub fn line(&self) -> Option<usize> {
        match self {
            ParseError::DanglingDirective { line }
            | ParseError::IncompatibleDirective { line, .. }
            | ParseError::UndefinedSnippet { line, .. }
            | ParseError::InvalidArguments { line, .. } => *line,
        }
    }
}

fn at_line(line: &Option<usize>) -> String {
    match line {
        Some(line) => format!(" (line {})", line),
        None => String::new(),
    }
}

/// Top-level error for turning document text into a [`Document`](crate::Document).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    #[error(transparent)]
    Lex(#[from] LexError),

    #[error(transparent)]
    Parse(#[from] ParseError),
}
