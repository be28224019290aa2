//! Token definitions for fulky documents
//!
//! The lexer only distinguishes what the document builder cares about: fulky directives,
//! code blocks in the example language, and everything else.

use serde::{Deserialize, Serialize};
use std::fmt;

/// The commands a fulky directive can carry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Command {
    /// Code run once ahead of every example.
    Globals,
    /// Exclude the next code block from the examples.
    SkipTest,
    /// Store the next code block under a name.
    Define,
    /// Prepend a previously defined snippet to the next code block.
    Use,
}

impl Command {
    pub const ALL: [Command; 4] = [
        Command::Globals,
        Command::SkipTest,
        Command::Define,
        Command::Use,
    ];

    /// Parse the command word found after the `fulky:` prefix
    pub fn from_word(word: &str) -> Option<Self> {
        match word {
            "globals" => Some(Command::Globals),
            "skip-test" => Some(Command::SkipTest),
            "define" => Some(Command::Define),
            "use" => Some(Command::Use),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Command::Globals => "globals",
            Command::SkipTest => "skip-test",
            Command::Define => "define",
            Command::Use => "use",
        }
    }
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// All possible tokens in a fulky document
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum Token {
    /// `<!-- fulky:command [arguments]\n[body] -->`
    Directive {
        command: Command,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        arguments: Option<Vec<String>>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        body: Option<String>,
    },

    /// The verbatim content of a fenced block in the example language
    Code { code: String },

    /// Anything the lexer does not recognize
    Unknown,

    /// Synthetic end-of-input marker
    Eof,
}

impl Token {
    pub fn directive(command: Command) -> Self {
        Token::Directive {
            command,
            arguments: None,
            body: None,
        }
    }

    pub fn code(code: impl Into<String>) -> Self {
        Token::Code { code: code.into() }
    }

    /// Check if this token is a directive
    pub fn is_directive(&self) -> bool {
        matches!(self, Token::Directive { .. })
    }

    /// Check if this token is a code block
    pub fn is_code(&self) -> bool {
        matches!(self, Token::Code { .. })
    }

    pub fn is_unknown(&self) -> bool {
        matches!(self, Token::Unknown)
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Token::Directive {
                command,
                arguments,
                body,
            } => {
                write!(f, "directive {}", command)?;
                if let Some(arguments) = arguments {
                    write!(f, " {}", arguments.join(" "))?;
                }
                if body.is_some() {
                    f.write_str(" +body")?;
                }
                Ok(())
            }
            Token::Code { code } => write!(f, "code ({} lines)", code.lines().count()),
            Token::Unknown => f.write_str("unknown"),
            Token::Eof => f.write_str("eof"),
        }
    }
}
