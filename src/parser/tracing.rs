use super::Parser;
use crate::token::Token;
use log::{log_enabled, trace, Level};

const TRACE_INDENT: &str = "\t";

impl<I: Iterator<Item = Token>> Parser<I> {
    /// Runs one grammar rule, bracketing it with `BEGIN`/`END` trace lines
    /// indented by the current nesting depth.
    pub(super) fn traced<T>(&mut self, rule: &str, parse: impl FnOnce(&mut Self) -> T) -> T {
        if !log_enabled!(Level::Trace) {
            return parse(self);
        }

        self.trace_level += 1;
        trace!("{}BEGIN {}", self.indent(), rule);

        let result = parse(self);

        trace!("{}END {}", self.indent(), rule);
        self.trace_level -= 1;

        result
    }

    fn indent(&self) -> String {
        TRACE_INDENT.repeat(self.trace_level.saturating_sub(1))
    }
}
