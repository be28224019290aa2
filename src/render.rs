//! Test-suite rendering
//!
//! Turns a [`Document`] into the source of a JavaScript test file. The globals run once,
//! ahead of every case, and each example becomes one case named after the first line of
//! its code.

use crate::config::RenderConfig;
use crate::document::Document;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Test framework a suite is rendered for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Framework {
    /// `describe`/`it` suites, also understood by Jest and Jasmine
    Mocha,
    /// `test(name, t => ...)` cases ending with `t.end()`
    Tape,
}

impl Framework {
    pub const ALL: [Framework; 2] = [Framework::Mocha, Framework::Tape];

    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "mocha" => Some(Framework::Mocha),
            "tape" => Some(Framework::Tape),
            _ => None,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Framework::Mocha => "mocha",
            Framework::Tape => "tape",
        }
    }
}

impl fmt::Display for Framework {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RenderOptions {
    pub framework: Framework,
    /// Longest preview used in a case name, in characters. `0` keeps the whole line.
    pub preview_max_chars: usize,
}

impl RenderOptions {
    pub fn new(framework: Framework) -> Self {
        Self {
            framework,
            preview_max_chars: 0,
        }
    }
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self::new(Framework::Mocha)
    }
}

impl From<&RenderConfig> for RenderOptions {
    fn from(config: &RenderConfig) -> Self {
        Self {
            framework: config.framework,
            preview_max_chars: config.preview_max_chars,
        }
    }
}

/// Short, single-line label for an example: its first line, or its first non-blank line
/// when the code starts with blank lines. Longer previews are cut to `max_chars`
/// characters and marked with `...`.
pub fn preview(example: &str, max_chars: usize) -> String {
    let line = example
        .lines()
        .map(str::trim_end)
        .find(|line| !line.trim().is_empty())
        .unwrap_or("");

    if max_chars > 0 && line.chars().count() > max_chars {
        let cut: String = line.chars().take(max_chars).collect();
        format!("{}...", cut)
    } else {
        line.to_string()
    }
}

/// Escape text for use inside a single-quoted JavaScript string
fn escape_single_quoted(text: &str) -> String {
    text.replace('\\', "\\\\").replace('\'', "\\'")
}

/// Append a block of code on its own lines
fn push_block(out: &mut String, code: &str) {
    if code.is_empty() {
        return;
    }
    out.push_str(code);
    if !code.ends_with('\n') {
        out.push('\n');
    }
}

fn case_name(index: usize, example: &str, options: &RenderOptions) -> String {
    format!(
        "should run API example #{}: {}",
        index + 1,
        escape_single_quoted(&preview(example, options.preview_max_chars))
    )
}

/// Render a whole test file for `document`, read from `filename`
pub fn render(document: &Document, filename: &str, options: &RenderOptions) -> String {
    let filename = escape_single_quoted(filename);
    let mut out = String::from("'use strict';\n\n");

    if options.framework == Framework::Tape {
        out.push_str("const test = require('tape');\n\n");
    }

    if !document.globals.is_empty() {
        push_block(&mut out, &document.globals);
        out.push('\n');
    }

    match options.framework {
        Framework::Mocha => {
            out.push_str(&format!("describe('Markdown file: {}', function () {{\n", filename));
            for (index, example) in document.examples.iter().enumerate() {
                out.push_str(&format!(
                    "  it('{}', function () {{\n",
                    case_name(index, example, options)
                ));
                push_block(&mut out, example);
                out.push_str("  });\n");
            }
            out.push_str("});\n");
        }
        Framework::Tape => {
            for (index, example) in document.examples.iter().enumerate() {
                if index > 0 {
                    out.push('\n');
                }
                out.push_str(&format!(
                    "test('Markdown file {} {}', function (t) {{\n",
                    filename,
                    case_name(index, example, options)
                ));
                push_block(&mut out, example);
                out.push_str("  t.end();\n});\n");
            }
        }
    }

    out
}
