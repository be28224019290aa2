//! Lexer module for fulky documents
//!
//! This module scans document text into a flat token stream. Only fulky directives and
//! fenced code blocks in the example language are meaningful; every other span of text
//! becomes an `Unknown` token so that the document builder can check directive placement.
//!
//! Scanning happens in two layers:
//!
//! - [`Lexer::scan`] recognizes a single token at the start of the remaining input and
//!   hands back the unconsumed remainder. Blank runs are consumed without a token.
//! - [`Lexer::lex`] / [`Lexer::lex_with_spans`] drive `scan` until the input is exhausted,
//!   coalesce consecutive `Unknown` tokens into one and append a final `Eof` token.

pub mod recognizers;
pub mod tokens;

pub use recognizers::DEFAULT_LANGUAGE_ALIASES;
pub use tokens::{Command, Token};

use crate::config::LexerConfig;
use crate::error::LexError;
use log::{debug, trace};
use once_cell::sync::Lazy;
use regex::Regex;
use std::ops::Range;

static DEFAULT_LEXER: Lazy<Lexer> = Lazy::new(|| {
    // The built-in aliases are known to be valid
    Lexer::with_language_aliases(DEFAULT_LANGUAGE_ALIASES).unwrap()
});

/// A lexer for one set of example-language aliases
#[derive(Debug, Clone)]
pub struct Lexer {
    language_aliases: Vec<String>,
    code_fence: Regex,
}

impl Lexer {
    /// Create a lexer that recognizes code fences tagged with any of `aliases`.
    /// Matching is case-sensitive.
    pub fn with_language_aliases<S: AsRef<str>>(aliases: &[S]) -> Result<Self, LexError> {
        let code_fence = recognizers::code_fence_regex(aliases)?;
        Ok(Self {
            language_aliases: aliases.iter().map(|a| a.as_ref().to_string()).collect(),
            code_fence,
        })
    }

    pub fn from_config(config: &LexerConfig) -> Result<Self, LexError> {
        Self::with_language_aliases(config.language_aliases.as_slice())
    }

    pub fn language_aliases(&self) -> &[String] {
        &self.language_aliases
    }

    /// Recognize one token at the start of `remaining`.
    ///
    /// Returns the token, or `None` for a blank run, together with the unconsumed input.
    pub fn scan<'a>(&self, remaining: &'a str) -> Result<(Option<Token>, &'a str), LexError> {
        let recognized = recognizers::blank_run(remaining)
            .or_else(|| recognizers::code_fence(&self.code_fence, remaining))
            .or_else(|| recognizers::directive(remaining));

        let (token, consumed) = match recognized {
            Some(recognized) => recognized,
            None => recognizers::rest_of_line(remaining)?,
        };

        Ok((token, &remaining[consumed..]))
    }

    /// Tokenize a whole document, keeping the byte range each token covers.
    ///
    /// Coalesced `Unknown` tokens cover the whole run they replace. The final `Eof` token has
    /// an empty span at the end of the source.
    pub fn lex_with_spans(&self, source: &str) -> Result<Vec<(Token, Range<usize>)>, LexError> {
        let mut tokens: Vec<(Token, Range<usize>)> = Vec::new();
        let mut remaining = source;

        while !remaining.is_empty() {
            let start = source.len() - remaining.len();
            let (token, rest) = self.scan(remaining)?;
            remaining = rest;
            let end = source.len() - remaining.len();

            let Some(token) = token else {
                continue;
            };

            if let (Token::Unknown, Some((Token::Unknown, span))) = (&token, tokens.last_mut()) {
                span.end = end;
                continue;
            }

            trace!("{:?} at {:?}", token, start..end);
            tokens.push((token, start..end));
        }

        tokens.push((Token::Eof, source.len()..source.len()));
        debug!("lexed {} tokens from {} bytes", tokens.len(), source.len());

        Ok(tokens)
    }

    /// Tokenize a whole document
    pub fn lex(&self, source: &str) -> Result<Vec<Token>, LexError> {
        Ok(self
            .lex_with_spans(source)?
            .into_iter()
            .map(|(token, _)| token)
            .collect())
    }
}

impl Default for Lexer {
    fn default() -> Self {
        DEFAULT_LEXER.clone()
    }
}

/// The lexer for the default `js` / `javascript` aliases
pub fn default_lexer() -> &'static Lexer {
    &DEFAULT_LEXER
}

/// Tokenize a document with the default lexer
pub fn lex(source: &str) -> Result<Vec<Token>, LexError> {
    DEFAULT_LEXER.lex(source)
}

/// Tokenize a document with the default lexer, keeping spans
pub fn lex_with_spans(source: &str) -> Result<Vec<(Token, Range<usize>)>, LexError> {
    DEFAULT_LEXER.lex_with_spans(source)
}
