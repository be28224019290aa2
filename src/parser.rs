//! Document builder
//!
//! Folds the token stream into a [`Document`]. Directives are buffered in
//! [`PendingDirectives`] and applied to the code block that immediately follows them:
//!
//! - `globals` with a body sets the globals right away and never waits for a code block
//! - `globals` without a body turns the next code block into the globals
//! - `skip-test` keeps the next code block out of the examples
//! - `define <name>` stores the next code block (after `use` composition) under `name`
//! - `use <name>` prepends the snippet stored under `name`, repeatable and applied in order
//!
//! `globals` cannot share a buffer with any of the other directives, and a buffer that is
//! followed by anything but a code block (including the end of input) is an error.

pub mod pending;

pub use pending::PendingDirectives;

use crate::document::Document;
use crate::error::ParseError;
use crate::lexer::{Command, Token};
use crate::location::SourceLocation;
use log::{debug, warn};
use std::ops::Range;

/// Type alias for token with span
type TokenSpan = (Token, Range<usize>);

/// Fold accumulator: the document so far plus the directives awaiting a code block
#[derive(Debug, Default)]
pub struct DocumentBuilder {
    document: Document,
    pending: PendingDirectives,
}

impl DocumentBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Directives buffered since the last code block
    pub fn pending(&self) -> &PendingDirectives {
        &self.pending
    }

    /// Apply one token. `line` is the token's source line, when known.
    pub fn push(mut self, token: Token, line: Option<usize>) -> Result<Self, ParseError> {
        match token {
            Token::Directive {
                command,
                arguments,
                body,
            } => self.apply_directive(command, arguments, body, line)?,
            Token::Code { code } => self.apply_code(code, line)?,
            Token::Unknown | Token::Eof => self.expect_idle()?,
        }
        Ok(self)
    }

    /// Finish the document. Nothing may be left pending.
    pub fn finish(self) -> Result<Document, ParseError> {
        self.expect_idle()?;
        debug!(
            "built document: {} examples, {} definitions, {} bytes of globals",
            self.document.examples.len(),
            self.document.definitions.len(),
            self.document.globals.len()
        );
        Ok(self.document)
    }

    fn expect_idle(&self) -> Result<(), ParseError> {
        if self.pending.is_empty() {
            Ok(())
        } else {
            Err(ParseError::DanglingDirective {
                line: self.pending.line,
            })
        }
    }

    fn apply_directive(
        &mut self,
        command: Command,
        arguments: Option<Vec<String>>,
        body: Option<String>,
        line: Option<usize>,
    ) -> Result<(), ParseError> {
        match command {
            Command::Globals => match body {
                Some(body) => {
                    if let Some(modifier) = self.pending.modifier() {
                        return Err(ParseError::IncompatibleDirective {
                            command: modifier,
                            line,
                        });
                    }
                    self.document.globals = body;
                }
                None => {
                    self.pending.mark(line);
                    self.pending.globals = true;
                }
            },
            Command::SkipTest => {
                self.pending.mark(line);
                self.pending.skip = true;
            }
            Command::Define => {
                let name = single_argument(command, arguments, line)?;
                self.pending.mark(line);
                self.pending.define = Some(name);
            }
            Command::Use => {
                // One name per directive; stack several `use` directives to compose more
                let name = single_argument(command, arguments, line)?;
                self.pending.mark(line);
                self.pending.uses.push(name);
            }
        }
        Ok(())
    }

    fn apply_code(&mut self, code: String, line: Option<usize>) -> Result<(), ParseError> {
        let pending = self.pending.take();
        let line = pending.line.or(line);

        if pending.globals {
            if let Some(modifier) = pending.modifier() {
                return Err(ParseError::IncompatibleDirective {
                    command: modifier,
                    line,
                });
            }
            self.document.globals = code;
            return Ok(());
        }

        let code = if pending.uses.is_empty() {
            code
        } else {
            self.compose(&pending.uses, &code, line)?
        };

        if let Some(name) = pending.define {
            if self.document.definitions.contains_key(&name) {
                warn!("snippet `{}` redefined, keeping the latest definition", name);
            }
            self.document.definitions.insert(name, code.clone());
        }

        if !pending.skip {
            self.document.examples.push(code);
        }

        Ok(())
    }

    /// Concatenate the used snippets, in order, ahead of `code`
    fn compose(
        &self,
        uses: &[String],
        code: &str,
        line: Option<usize>,
    ) -> Result<String, ParseError> {
        let mut composed = String::new();
        for name in uses {
            let snippet = self.document.definitions.get(name).ok_or_else(|| {
                ParseError::UndefinedSnippet {
                    name: name.clone(),
                    line,
                }
            })?;
            composed.push_str(snippet);
        }
        composed.push_str(code);
        Ok(composed)
    }
}

fn single_argument(
    command: Command,
    arguments: Option<Vec<String>>,
    line: Option<usize>,
) -> Result<String, ParseError> {
    match arguments.as_deref() {
        Some([name]) => Ok(name.clone()),
        other => Err(ParseError::InvalidArguments {
            command,
            found: other.map_or(0, <[String]>::len),
            line,
        }),
    }
}

/// Build a document from tokens and the source they were lexed from.
/// Errors carry the line they point at.
pub fn parse_with_source(tokens: Vec<TokenSpan>, source: &str) -> Result<Document, ParseError> {
    let location = SourceLocation::new(source);
    tokens
        .into_iter()
        .try_fold(DocumentBuilder::new(), |builder, (token, span)| {
            builder.push(token, Some(location.line_number(span.start)))
        })?
        .finish()
}

/// Build a document from a bare token stream
pub fn parse(tokens: Vec<Token>) -> Result<Document, ParseError> {
    tokens
        .into_iter()
        .try_fold(DocumentBuilder::new(), |builder, token| {
            builder.push(token, None)
        })?
        .finish()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn define(name: &str) -> Token {
        Token::Directive {
            command: Command::Define,
            arguments: Some(vec![name.to_string()]),
            body: None,
        }
    }

    fn use_snippet(name: &str) -> Token {
        Token::Directive {
            command: Command::Use,
            arguments: Some(vec![name.to_string()]),
            body: None,
        }
    }

    fn globals_body(body: &str) -> Token {
        Token::Directive {
            command: Command::Globals,
            arguments: None,
            body: Some(body.to_string()),
        }
    }

    #[test]
    fn test_plain_code_blocks() {
        let doc = parse(vec![
            Token::code("check(true);\n"),
            Token::Unknown,
            Token::code("check(1);\n"),
            Token::Eof,
        ])
        .unwrap();
        assert_eq!(doc.examples, vec!["check(true);\n", "check(1);\n"]);
        assert_eq!(doc.globals, "");
    }

    #[test]
    fn test_skip_test() {
        let doc = parse(vec![
            Token::directive(Command::SkipTest),
            Token::code("boom();"),
            Token::Eof,
        ])
        .unwrap();
        assert!(doc.examples.is_empty());
    }

    #[test]
    fn test_define_and_use() {
        let doc = parse(vec![
            define("foo"),
            Token::code("x();"),
            use_snippet("foo"),
            Token::code("y();"),
            Token::Eof,
        ])
        .unwrap();
        assert_eq!(doc.definition("foo"), Some("x();"));
        assert_eq!(doc.examples, vec!["x();", "x();y();"]);
    }

    #[test]
    fn test_uses_compose_in_order() {
        let doc = parse(vec![
            Token::directive(Command::SkipTest),
            define("a"),
            Token::code("a();"),
            Token::directive(Command::SkipTest),
            define("b"),
            Token::code("b();"),
            use_snippet("b"),
            use_snippet("a"),
            Token::code("c();"),
            Token::Eof,
        ])
        .unwrap();
        assert_eq!(doc.examples, vec!["b();a();c();"]);
    }

    #[test]
    fn test_define_stores_composed_code() {
        let doc = parse(vec![
            define("base"),
            Token::code("a();"),
            use_snippet("base"),
            define("extended"),
            Token::code("b();"),
            Token::Eof,
        ])
        .unwrap();
        assert_eq!(doc.definition("extended"), Some("a();b();"));
    }

    #[test]
    fn test_redefinition_keeps_latest() {
        let doc = parse(vec![
            define("foo"),
            Token::code("first();"),
            define("foo"),
            Token::code("second();"),
            use_snippet("foo"),
            Token::code("z();"),
            Token::Eof,
        ])
        .unwrap();
        assert_eq!(doc.definition("foo"), Some("second();"));
        assert_eq!(doc.examples[2], "second();z();");
    }

    #[test]
    fn test_globals_body() {
        let doc = parse(vec![
            globals_body("setup();"),
            Token::code("x();"),
            Token::Eof,
        ])
        .unwrap();
        assert_eq!(doc.globals, "setup();");
        assert_eq!(doc.examples, vec!["x();"]);
    }

    #[test]
    fn test_globals_code_block() {
        let doc = parse(vec![
            Token::directive(Command::Globals),
            Token::code("setup();"),
            Token::Eof,
        ])
        .unwrap();
        assert_eq!(doc.globals, "setup();");
        assert!(doc.examples.is_empty());
    }

    #[test]
    fn test_last_globals_wins() {
        let doc = parse(vec![
            globals_body("one();"),
            Token::Unknown,
            Token::directive(Command::Globals),
            Token::code("two();"),
            Token::Eof,
        ])
        .unwrap();
        assert_eq!(doc.globals, "two();");
    }

    #[test]
    fn test_undefined_snippet() {
        let err = parse(vec![use_snippet("nope"), Token::code("x();"), Token::Eof]).unwrap_err();
        assert_eq!(
            err,
            ParseError::UndefinedSnippet {
                name: "nope".to_string(),
                line: None
            }
        );
    }

    #[test]
    fn test_definition_is_not_visible_to_its_own_block() {
        let err = parse(vec![
            define("foo"),
            use_snippet("foo"),
            Token::code("x();"),
            Token::Eof,
        ])
        .unwrap_err();
        assert!(matches!(err, ParseError::UndefinedSnippet { .. }));
    }

    #[test]
    fn test_define_requires_one_argument() {
        let err = parse(vec![
            Token::directive(Command::Define),
            Token::code("x();"),
            Token::Eof,
        ])
        .unwrap_err();
        assert_eq!(
            err,
            ParseError::InvalidArguments {
                command: Command::Define,
                found: 0,
                line: None
            }
        );

        let err = parse(vec![
            Token::Directive {
                command: Command::Use,
                arguments: Some(vec!["a".to_string(), "b".to_string()]),
                body: None,
            },
            Token::code("x();"),
            Token::Eof,
        ])
        .unwrap_err();
        assert!(matches!(
            err,
            ParseError::InvalidArguments {
                command: Command::Use,
                found: 2,
                ..
            }
        ));
    }

    #[test]
    fn test_missing_eof_still_checks_pending() {
        let err = parse(vec![Token::directive(Command::SkipTest)]).unwrap_err();
        assert_eq!(err, ParseError::DanglingDirective { line: None });
    }

    #[test]
    fn test_builder_tracks_pending_state() {
        let builder = DocumentBuilder::new()
            .push(Token::directive(Command::SkipTest), Some(2))
            .unwrap();
        assert!(builder.pending().skip);
        assert_eq!(builder.pending().line, Some(2));

        let builder = builder.push(Token::code("x();"), Some(3)).unwrap();
        assert!(builder.pending().is_empty());
        assert!(builder.finish().unwrap().examples.is_empty());
    }

    #[test]
    fn test_error_lines_from_source() {
        let source = "# Title\n\n<!-- fulky:skip-test -->\n\nProse in between.\n";
        let tokens = crate::lexer::lex_with_spans(source).unwrap();
        let err = parse_with_source(tokens, source).unwrap_err();
        assert_eq!(err, ParseError::DanglingDirective { line: Some(3) });
    }
}
