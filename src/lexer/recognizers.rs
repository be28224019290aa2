//! Recognizers for the fulky lexer
//!
//! Each recognizer is a regex anchored at the start of the remaining input. The lexer tries
//! them in a fixed priority order:
//!
//! 1. blank run (whitespace up to and including its last line break, produces no token)
//! 2. code fence in one of the configured example languages
//! 3. fulky directive
//! 4. fallback: the rest of the current line
//!
//! The directive body is matched lazily so that it ends at the first `-->`. A greedy body
//! would run on to the close marker of the next directive and merge the two.

use super::tokens::{Command, Token};
use crate::error::LexError;
use once_cell::sync::Lazy;
use regex::Regex;

/// Opening marker of a directive
pub const DIRECTIVE_OPEN: &str = "<!--";
/// Closing marker of a directive
pub const DIRECTIVE_CLOSE: &str = "-->";
/// Prefix of every directive command word
pub const NAMESPACE: &str = "fulky:";
/// Code fence marker
pub const FENCE: &str = "```";
/// Language tags recognized when no configuration says otherwise
pub const DEFAULT_LANGUAGE_ALIASES: &[&str] = &["js", "javascript"];

static BLANK_RUN: Lazy<Regex> = Lazy::new(|| Regex::new(r"\A\s*\n").unwrap());

static DIRECTIVE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(&format!(
        concat!(
            r"(?s)\A{open}\s*{namespace}(?P<command>[\w-]+)",
            // Arguments never leave the command line
            r"(?P<arguments>[ \t]+[\w \t-]*)?",
            // Lazy body: stop at the first close marker
            r"(?:\r?\n(?P<body>.*?))?",
            r"\s*{close}"
        ),
        open = regex::escape(DIRECTIVE_OPEN),
        namespace = regex::escape(NAMESPACE),
        close = regex::escape(DIRECTIVE_CLOSE),
    ))
    .unwrap()
});

static REST_OF_LINE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\A.*").unwrap());

/// A recognized span: the token it produced (if any) and how many bytes it consumed
pub(crate) type Recognized = (Option<Token>, usize);

pub(crate) fn blank_run(remaining: &str) -> Option<Recognized> {
    BLANK_RUN.find(remaining).map(|m| (None, m.end()))
}

/// Build the code fence recognizer for a set of language aliases
pub(crate) fn code_fence_regex<S: AsRef<str>>(aliases: &[S]) -> Result<Regex, LexError> {
    if aliases.is_empty() {
        return Err(LexError::NoLanguageAliases);
    }

    let mut alternatives = Vec::with_capacity(aliases.len());
    for alias in aliases {
        let alias = alias.as_ref();
        if alias.is_empty() || alias.chars().any(char::is_whitespace) {
            return Err(LexError::InvalidLanguageAlias {
                alias: alias.to_string(),
            });
        }
        alternatives.push(regex::escape(alias));
    }

    let pattern = format!(
        r"(?s)\A{fence}(?:{aliases})[ \t]*\r?\n(?P<code>.*?){fence}",
        fence = regex::escape(FENCE),
        aliases = alternatives.join("|"),
    );

    Regex::new(&pattern).map_err(|_| LexError::InvalidLanguageAlias {
        alias: aliases
            .iter()
            .map(|alias| alias.as_ref())
            .collect::<Vec<_>>()
            .join(" "),
    })
}

pub(crate) fn code_fence(regex: &Regex, remaining: &str) -> Option<Recognized> {
    let caps = regex.captures(remaining)?;
    let code = caps.name("code").map_or("", |m| m.as_str());
    Some((Some(Token::code(code)), caps[0].len()))
}

/// Recognize a directive. Command words outside the fulky vocabulary are left to the
/// fallback recognizer.
pub(crate) fn directive(remaining: &str) -> Option<Recognized> {
    let caps = DIRECTIVE.captures(remaining)?;
    let command = Command::from_word(caps.name("command")?.as_str())?;

    let arguments = caps
        .name("arguments")
        .map(|m| {
            m.as_str()
                .split_whitespace()
                .map(str::to_string)
                .collect::<Vec<_>>()
        })
        .filter(|arguments| !arguments.is_empty());

    let body = caps
        .name("body")
        .map(|m| m.as_str().trim())
        .filter(|body| !body.is_empty())
        .map(str::to_string);

    let token = Token::Directive {
        command,
        arguments,
        body,
    };
    Some((Some(token), caps[0].len()))
}

pub(crate) fn rest_of_line(remaining: &str) -> Result<Recognized, LexError> {
    match REST_OF_LINE.find(remaining) {
        Some(m) if m.end() > 0 => Ok((Some(Token::Unknown), m.end())),
        _ => Err(LexError::NoRecognizer {
            snippet: remaining.chars().take(20).collect(),
        }),
    }
}
