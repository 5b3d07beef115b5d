//! Per-UE diagnostic trace
//!
//! Decoders report what they parse as indented lines, two spaces per
//! nesting level. Every line goes to `tracing` at debug level; a recording
//! context also keeps the lines so callers can print or inspect them.
//! The trace never influences decoding.

use std::fmt;

/// Indentation-aware diagnostic sink passed through decode calls
#[derive(Debug, Clone, Default)]
pub struct TraceContext {
    depth: usize,
    record: bool,
    lines: Vec<String>,
}

impl TraceContext {
    /// Trace that only forwards to `tracing`
    pub fn new() -> Self {
        Self::default()
    }

    /// Trace that also keeps every line
    pub fn recording() -> Self {
        Self {
            record: true,
            ..Self::default()
        }
    }

    /// Current nesting depth
    pub fn depth(&self) -> usize {
        self.depth
    }

    /// Emit a line at the current depth
    pub fn line(&mut self, message: impl fmt::Display) {
        let text = format!("{:width$}{message}", "", width = self.depth * 2);
        tracing::debug!(target: "uesim_nas::trace", depth = self.depth, "{}", text);
        if self.record {
            self.lines.push(text);
        }
    }

    /// Emit a line one level deeper than the current depth
    pub fn detail(&mut self, message: impl fmt::Display) {
        self.depth += 1;
        self.line(message);
        self.depth -= 1;
    }

    /// Run `f` one level deeper, restoring the depth afterwards
    pub fn nested<R>(&mut self, f: impl FnOnce(&mut Self) -> R) -> R {
        self.depth += 1;
        let result = f(self);
        self.depth -= 1;
        result
    }

    /// Recorded lines, empty unless created with [`TraceContext::recording`]
    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    /// Take the recorded lines, leaving the trace empty
    pub fn take_lines(&mut self) -> Vec<String> {
        std::mem::take(&mut self.lines)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_indentation() {
        let mut trace = TraceContext::recording();
        trace.line("EPD");
        trace.nested(|t| {
            t.line("ngKSI");
            t.detail("value");
        });
        trace.line("done");

        assert_eq!(trace.lines(), ["EPD", "  ngKSI", "    value", "done"]);
        assert_eq!(trace.depth(), 0);
    }

    #[test]
    fn test_nested_restores_depth_on_error() {
        let mut trace = TraceContext::recording();
        let result: Result<(), &str> = trace.nested(|t| {
            t.line("inner");
            Err("boom")
        });
        assert!(result.is_err());
        assert_eq!(trace.depth(), 0);
    }

    #[test]
    fn test_non_recording_keeps_nothing() {
        let mut trace = TraceContext::new();
        trace.line("dropped");
        assert!(trace.lines().is_empty());
    }

    #[test]
    fn test_take_lines() {
        let mut trace = TraceContext::recording();
        trace.line("a");
        assert_eq!(trace.take_lines(), vec!["a".to_string()]);
        assert!(trace.lines().is_empty());
    }
}
