//! Configuration loading for fulky.
//!
//! Settings are resolved in layers, later layers winning key by key:
//!
//! 1. `defaults/fulky.default.toml`, compiled into the crate
//! 2. `fulky.toml` in the working directory, when present ([`PROJECT_CONFIG_FILE`])
//! 3. a file named with `--config`
//!
//! [`Loader`] stacks these layers and deserializes the result into [`FulkyConfig`].

use crate::render::Framework;
use config::builder::DefaultState;
use config::{Config, ConfigBuilder, ConfigError, File, FileFormat, ValueKind};
use serde::Deserialize;
use std::path::Path;

const DEFAULT_TOML: &str = include_str!("../defaults/fulky.default.toml");

/// Conventional name of a project-level configuration file
pub const PROJECT_CONFIG_FILE: &str = "fulky.toml";

/// Top-level configuration consumed by fulky applications.
#[derive(Debug, Clone, Deserialize)]
pub struct FulkyConfig {
    pub lexer: LexerConfig,
    pub render: RenderConfig,
}

/// Which code fences count as examples.
#[derive(Debug, Clone, Deserialize)]
pub struct LexerConfig {
    pub language_aliases: Vec<String>,
}

/// Controls generated test suites.
#[derive(Debug, Clone, Deserialize)]
pub struct RenderConfig {
    pub framework: Framework,
    pub preview_max_chars: usize,
}

/// Stacks configuration layers over the compiled-in defaults.
#[derive(Debug, Clone)]
pub struct Loader {
    builder: ConfigBuilder<DefaultState>,
}

impl Loader {
    /// A loader holding only the compiled-in defaults: `js`/`javascript` fences, mocha suites.
    pub fn new() -> Self {
        let builder = Config::builder().add_source(File::from_str(DEFAULT_TOML, FileFormat::Toml));
        Self { builder }
    }

    /// Layer a file the user asked for explicitly, such as `--config`. It must exist.
    pub fn with_file(mut self, path: impl AsRef<Path>) -> Self {
        let source = File::from(path.as_ref())
            .format(FileFormat::Toml)
            .required(true);
        self.builder = self.builder.add_source(source);
        self
    }

    /// Layer a conventional file such as `fulky.toml`, skipped when it does not exist.
    pub fn with_optional_file(mut self, path: impl AsRef<Path>) -> Self {
        let source = File::from(path.as_ref())
            .format(FileFormat::Toml)
            .required(false);
        self.builder = self.builder.add_source(source);
        self
    }

    /// Override one dotted key, e.g. `render.framework`, above every file layer.
    pub fn set_override<I>(mut self, key: &str, value: I) -> Result<Self, ConfigError>
    where
        I: Into<ValueKind>,
    {
        self.builder = self.builder.set_override(key, value)?;
        Ok(self)
    }

    /// Merge the layers. Unknown frameworks or malformed files fail here.
    pub fn build(self) -> Result<FulkyConfig, ConfigError> {
        self.builder.build()?.try_deserialize()
    }
}

impl Default for Loader {
    fn default() -> Self {
        Self::new()
    }
}

/// The compiled-in defaults alone
pub fn load_defaults() -> Result<FulkyConfig, ConfigError> {
    Loader::new().build()
}
