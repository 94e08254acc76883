//! Indentation-aware text buffer for emitted JavaScript.

const INDENT: &str = "    ";

/// Accumulates generated lines at the current brace depth.
///
/// Block openers and closers keep the depth in step, so the emitted text is
/// always balanced as long as every `open` is matched by a `close`.
#[derive(Debug, Default)]
pub(crate) struct CodeBuffer {
    text: String,
    depth: usize,
}

impl CodeBuffer {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Writes one indented line.
    pub(crate) fn line(&mut self, text: &str) {
        for _ in 0..self.depth {
            self.text.push_str(INDENT);
        }
        self.text.push_str(text);
        self.text.push('\n');
    }

    /// Writes text exactly as given, with no indentation.
    pub(crate) fn raw(&mut self, text: &str) {
        self.text.push_str(text);
        if !text.ends_with('\n') {
            self.text.push('\n');
        }
    }

    /// Writes `header {` (or a bare `{`) and indents.
    pub(crate) fn open(&mut self, header: &str) {
        if header.is_empty() {
            self.line("{");
        } else {
            self.line(&format!("{header} {{"));
        }
        self.depth += 1;
    }

    /// Closes the current block and opens a sibling: `} header {`.
    pub(crate) fn reopen(&mut self, header: &str) {
        self.depth = self.depth.saturating_sub(1);
        self.line(&format!("}} {header} {{"));
        self.depth += 1;
    }

    pub(crate) fn close(&mut self) {
        self.close_with("");
    }

    /// Closes the current block, appending `suffix` after the brace.
    pub(crate) fn close_with(&mut self, suffix: &str) {
        self.depth = self.depth.saturating_sub(1);
        self.line(&format!("}}{suffix}"));
    }

    pub(crate) fn finish(self) -> String {
        self.text
    }
}
