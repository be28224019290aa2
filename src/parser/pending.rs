//! Directives waiting for the next code block

use crate::lexer::Command;

/// The directives buffered since the last code block.
///
/// The builder is `idle` while this is empty and `pending` otherwise.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PendingDirectives {
    pub globals: bool,
    pub skip: bool,
    pub define: Option<String>,
    pub uses: Vec<String>,
    /// Line of the first buffered directive
    pub line: Option<usize>,
}

impl PendingDirectives {
    pub fn is_empty(&self) -> bool {
        !self.globals && !self.skip && self.define.is_none() && self.uses.is_empty()
    }

    /// The first buffered directive that cannot be combined with `globals`
    pub fn modifier(&self) -> Option<Command> {
        if self.skip {
            Some(Command::SkipTest)
        } else if self.define.is_some() {
            Some(Command::Define)
        } else if !self.uses.is_empty() {
            Some(Command::Use)
        } else {
            None
        }
    }

    /// Remember where the buffer started, if this is its first directive
    pub fn mark(&mut self, line: Option<usize>) {
        if self.is_empty() {
            self.line = line;
        }
    }

    /// Hand the buffer over for application, leaving it empty
    pub fn take(&mut self) -> Self {
        std::mem::take(self)
    }
}
