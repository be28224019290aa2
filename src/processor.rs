//! File processing API for fulky documents
//!
//! This module provides an extensible API for processing documents with different
//! stages (token, document, suite) and formats (simple, json, yaml, mocha, tape).
//! Format strings are written `<stage>-<format>`, for example `token-simple` or
//! `suite-tape`.
//!
//! # Sample Sources
//!
//! The `doc_sources` module reads the Markdown documents under `tests/fixtures/`. Each one
//! shows a whole-file scenario (a passing example, a skipped one, snippets, globals, or a
//! directive error) and can be fetched raw, as a [`Document`], or in any output format.
//!
//! ## Example Usage
//!
//! ```rust
//! use fulky::processor::doc_sources::DocSources;
//!
//! // Get raw string content
//! let content = DocSources::get_string("skip-test.md").unwrap();
//!
//! // Get the built document
//! let document = DocSources::get_document("define-and-use.md").unwrap();
//!
//! // Get processed content in the given format
//! let suite = DocSources::get_processed("basic-passing.md", "suite-mocha").unwrap();
//! ```

use crate::config::FulkyConfig;
use crate::error::{Error, LexError};
use crate::lexer::{Lexer, Token};
use crate::location::SourceLocation;
use crate::render::{render, Framework, RenderOptions};
use crate::{build_document_with, Document};
use std::fs;
use std::ops::Range;
use std::path::Path;
use thiserror::Error;

/// Represents the processing stage (what data to extract)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProcessingStage {
    Token,
    Document,
    Suite,
}

/// Represents the output format
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Simple,
    Json,
    Yaml,
    Suite(Framework),
}

/// Represents a complete processing specification
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProcessingSpec {
    pub stage: ProcessingStage,
    pub format: OutputFormat,
}

impl ProcessingSpec {
    /// Parse a format string like "token-simple" or "suite-mocha"
    pub fn from_string(format_str: &str) -> Result<Self, ProcessingError> {
        let (stage, format) = format_str
            .split_once('-')
            .ok_or_else(|| ProcessingError::InvalidFormat(format_str.to_string()))?;

        let stage = match stage {
            "token" => ProcessingStage::Token,
            "document" => ProcessingStage::Document,
            "suite" => ProcessingStage::Suite,
            _ => return Err(ProcessingError::InvalidStage(stage.to_string())),
        };

        let format = match (stage, format) {
            (ProcessingStage::Token, "simple") => OutputFormat::Simple,
            (ProcessingStage::Token | ProcessingStage::Document, "json") => OutputFormat::Json,
            (ProcessingStage::Document, "yaml") => OutputFormat::Yaml,
            (ProcessingStage::Suite, name) => match Framework::from_name(name) {
                Some(framework) => OutputFormat::Suite(framework),
                None => return Err(ProcessingError::InvalidFormatType(name.to_string())),
            },
            (_, name) => {
                return Err(ProcessingError::InvalidFormatType(format!(
                    "Format '{}' not supported for the {} stage",
                    name,
                    Self::stage_name(stage)
                )))
            }
        };

        Ok(ProcessingSpec { stage, format })
    }

    /// Get all available processing specifications
    pub fn available_specs() -> Vec<ProcessingSpec> {
        let mut specs = vec![
            ProcessingSpec {
                stage: ProcessingStage::Token,
                format: OutputFormat::Simple,
            },
            ProcessingSpec {
                stage: ProcessingStage::Token,
                format: OutputFormat::Json,
            },
            ProcessingSpec {
                stage: ProcessingStage::Document,
                format: OutputFormat::Json,
            },
            ProcessingSpec {
                stage: ProcessingStage::Document,
                format: OutputFormat::Yaml,
            },
        ];
        specs.extend(Framework::ALL.into_iter().map(|framework| ProcessingSpec {
            stage: ProcessingStage::Suite,
            format: OutputFormat::Suite(framework),
        }));
        specs
    }

    /// The `<stage>-<format>` string this spec parses from
    pub fn name(&self) -> String {
        let format = match self.format {
            OutputFormat::Simple => "simple",
            OutputFormat::Json => "json",
            OutputFormat::Yaml => "yaml",
            OutputFormat::Suite(framework) => framework.name(),
        };
        format!("{}-{}", Self::stage_name(self.stage), format)
    }

    fn stage_name(stage: ProcessingStage) -> &'static str {
        match stage {
            ProcessingStage::Token => "token",
            ProcessingStage::Document => "document",
            ProcessingStage::Suite => "suite",
        }
    }
}

/// Errors that can occur during processing
#[derive(Debug, Error)]
pub enum ProcessingError {
    #[error("File not found: {0}")]
    FileNotFound(String),
    #[error("Invalid format: {0}")]
    InvalidFormat(String),
    #[error("Invalid stage: {0}")]
    InvalidStage(String),
    #[error("Invalid format type: {0}")]
    InvalidFormatType(String),
    #[error("IO error: {0}")]
    IoError(String),
    #[error("Serialization error: {0}")]
    Serialization(String),
    #[error("{path}: {source}")]
    Document {
        path: String,
        #[source]
        source: Error,
    },
}

/// Processes documents with one lexer and one set of render options
#[derive(Debug, Clone, Default)]
pub struct Processor {
    lexer: Lexer,
    preview_max_chars: usize,
}

impl Processor {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_config(config: &FulkyConfig) -> Result<Self, LexError> {
        Ok(Self {
            lexer: Lexer::from_config(&config.lexer)?,
            preview_max_chars: config.render.preview_max_chars,
        })
    }

    pub fn lexer(&self) -> &Lexer {
        &self.lexer
    }

    /// Process document text. `name` identifies the document in error messages and
    /// generated suite names.
    pub fn process_source(
        &self,
        source: &str,
        name: &str,
        spec: &ProcessingSpec,
    ) -> Result<String, ProcessingError> {
        let in_document = |source: Error| ProcessingError::Document {
            path: name.to_string(),
            source,
        };

        match spec.stage {
            ProcessingStage::Token => {
                let tokens = self
                    .lexer
                    .lex_with_spans(source)
                    .map_err(|e| in_document(e.into()))?;
                format_tokens(&tokens, source, &spec.format)
            }
            ProcessingStage::Document => {
                let document = build_document_with(&self.lexer, source).map_err(in_document)?;
                format_document(&document, &spec.format)
            }
            ProcessingStage::Suite => {
                let document = build_document_with(&self.lexer, source).map_err(in_document)?;
                match spec.format {
                    OutputFormat::Suite(framework) => {
                        let options = RenderOptions {
                            framework,
                            preview_max_chars: self.preview_max_chars,
                        };
                        Ok(render(&document, name, &options))
                    }
                    _ => Err(ProcessingError::InvalidFormatType(spec.name())),
                }
            }
        }
    }

    /// Process a document file according to the given specification
    pub fn process_file<P: AsRef<Path>>(
        &self,
        file_path: P,
        spec: &ProcessingSpec,
    ) -> Result<String, ProcessingError> {
        let file_path = file_path.as_ref();
        let content =
            fs::read_to_string(file_path).map_err(|e| ProcessingError::IoError(e.to_string()))?;
        self.process_source(&content, &file_path.display().to_string(), spec)
    }
}

/// Process a document file with the default lexer and render options
pub fn process_file<P: AsRef<Path>>(
    file_path: P,
    spec: &ProcessingSpec,
) -> Result<String, ProcessingError> {
    Processor::new().process_file(file_path, spec)
}

/// Format tokens according to the specified format
fn format_tokens(
    tokens: &[(Token, Range<usize>)],
    source: &str,
    format: &OutputFormat,
) -> Result<String, ProcessingError> {
    match format {
        OutputFormat::Simple => {
            let location = SourceLocation::new(source);
            let mut result = String::new();
            for (token, span) in tokens {
                result.push_str(&format!("{}: {}\n", location.line_number(span.start), token));
            }
            Ok(result)
        }
        OutputFormat::Json => {
            let tokens: Vec<&Token> = tokens.iter().map(|(token, _)| token).collect();
            serde_json::to_string_pretty(&tokens)
                .map_err(|e| ProcessingError::Serialization(e.to_string()))
        }
        OutputFormat::Yaml | OutputFormat::Suite(_) => Err(ProcessingError::InvalidFormatType(
            "token stage supports only 'simple' and 'json'".to_string(),
        )),
    }
}

fn format_document(document: &Document, format: &OutputFormat) -> Result<String, ProcessingError> {
    match format {
        OutputFormat::Json => serde_json::to_string_pretty(document)
            .map_err(|e| ProcessingError::Serialization(e.to_string())),
        OutputFormat::Yaml => serde_yaml::to_string(document)
            .map_err(|e| ProcessingError::Serialization(e.to_string())),
        OutputFormat::Simple | OutputFormat::Suite(_) => Err(ProcessingError::InvalidFormatType(
            "document stage supports only 'json' and 'yaml'".to_string(),
        )),
    }
}

/// Get all available format strings
pub fn available_formats() -> Vec<String> {
    ProcessingSpec::available_specs()
        .iter()
        .map(ProcessingSpec::name)
        .collect()
}

/// Sample sources module for accessing the curated Markdown fixtures
pub mod doc_sources {
    use super::*;
    use std::path::PathBuf;

    /// Directory holding the fixtures, relative to the crate root
    pub const FIXTURES_DIR: &str = "tests/fixtures";

    /// Available fixture files (canonical sources)
    pub const AVAILABLE_FIXTURES: &[&str] = &[
        "basic-passing.md",
        "basic-failing.md",
        "empty.md",
        "skip-test.md",
        "define-and-use.md",
        "globals-comment.md",
        "globals-code-block.md",
        "globals-multiple-times.md",
        "dangling-directive.md",
        "incompatible-globals.md",
        "undefined-snippet.md",
    ];

    /// Main interface for accessing fixture files
    pub struct DocSources;

    impl DocSources {
        /// Get the full path to a fixture file
        pub fn fixture_path(filename: &str) -> PathBuf {
            Path::new(FIXTURES_DIR).join(filename)
        }

        /// Validate that a fixture exists and is available
        fn validate_fixture(filename: &str) -> Result<(), ProcessingError> {
            if !AVAILABLE_FIXTURES.contains(&filename) {
                return Err(ProcessingError::FileNotFound(format!(
                    "Fixture '{}' is not available. Available fixtures: {:?}",
                    filename, AVAILABLE_FIXTURES
                )));
            }
            Ok(())
        }

        /// Get fixture content as raw string
        pub fn get_string(filename: &str) -> Result<String, ProcessingError> {
            Self::validate_fixture(filename)?;
            let path = Self::fixture_path(filename);
            fs::read_to_string(&path).map_err(|e| {
                ProcessingError::IoError(format!("Failed to read {}: {}", path.display(), e))
            })
        }

        /// Get the document built from a fixture
        pub fn get_document(filename: &str) -> Result<Document, ProcessingError> {
            let content = Self::get_string(filename)?;
            crate::build_document(&content).map_err(|source| ProcessingError::Document {
                path: filename.to_string(),
                source,
            })
        }

        /// Get fixture content processed with the specified format
        pub fn get_processed(filename: &str, format: &str) -> Result<String, ProcessingError> {
            let spec = ProcessingSpec::from_string(format)?;
            let content = Self::get_string(filename)?;
            Processor::new().process_source(&content, filename, &spec)
        }

        /// List all available fixture files
        pub fn list_fixtures() -> Vec<&'static str> {
            AVAILABLE_FIXTURES.to_vec()
        }
    }
}
