//! # fulky
//!
//! Extracts runnable JavaScript examples from Markdown documents.
//!
//! A document is scanned into tokens by the [`lexer`], and the [`parser`] folds those tokens
//! into a [`Document`] holding the globals, the examples and the named snippets. HTML comment
//! directives placed right before a code block control what happens to it:
//!
//! ~~~markdown
//! <!-- fulky:define setup -->
//! ```js
//! const value = 42;
//! ```
//!
//! <!-- fulky:use setup -->
//! ```js
//! assert.equal(value, 42);
//! ```
//! ~~~
//!
//! The [`render`] module turns a document into a test suite, and the [`processor`] module
//! exposes every stage (tokens, document, suite) in the formats the `fulky` binary prints.

pub mod config;
pub mod document;
pub mod error;
pub mod lexer;
pub mod location;
pub mod parser;
pub mod processor;
pub mod render;

pub use document::Document;
pub use error::{Error, LexError, ParseError};
pub use lexer::{Command, Lexer, Token};

/// Build a document from Markdown text, recognizing `js` and `javascript` code fences.
pub fn build_document(text: &str) -> Result<Document, Error> {
    build_document_with(lexer::default_lexer(), text)
}

/// Build a document from Markdown text with a specific lexer.
pub fn build_document_with(lexer: &Lexer, text: &str) -> Result<Document, Error> {
    let tokens = lexer.lex_with_spans(text)?;
    Ok(parser::parse_with_source(tokens, text)?)
}
