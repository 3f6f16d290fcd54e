//! Parser state and grammar rules.

use log::trace;
use regasm_core::Automaton;

use crate::diagnostics::{DiagnosticKind, Diagnostics, Span};
use crate::pattern::DEFAULT_MAX_NESTING;

#[derive(Debug)]
pub struct ParseResult {
    /// `None` when an error was reported.
    pub automaton: Option<Automaton>,
    pub diagnostics: Diagnostics,
}

/// Signals that an error diagnostic was emitted and parsing stops.
struct Abort;

type Parsed<T> = Result<T, Abort>;

pub struct Parser<'src> {
    source: &'src str,
    pos: usize,
    depth: u32,
    max_nesting: Option<u32>,
    diagnostics: Diagnostics,
}

impl<'src> Parser<'src> {
    /// Nesting is capped at [`DEFAULT_MAX_NESTING`] until overridden.
    pub fn new(source: &'src str) -> Self {
        Self {
            source,
            pos: 0,
            depth: 0,
            max_nesting: Some(DEFAULT_MAX_NESTING),
            diagnostics: Diagnostics::new(),
        }
    }

    /// Limits group nesting; `None` means unlimited.
    pub fn with_max_nesting(mut self, limit: Option<u32>) -> Self {
        self.max_nesting = limit;
        self
    }

    pub fn parse(mut self) -> ParseResult {
        let automaton = self.parse_root().ok();
        trace!(
            "parsed {:?}: {} states, {} diagnostics",
            self.source,
            automaton.as_ref().map_or(0, Automaton::len),
            self.diagnostics.len()
        );
        ParseResult {
            automaton,
            diagnostics: self.diagnostics,
        }
    }

    fn parse_root(&mut self) -> Parsed<Automaton> {
        let automaton = self.parse_expr()?;
        if self.pos < self.source.len() {
            let span = Span::new(self.pos, self.source.len());
            self.diagnostics
                .report(DiagnosticKind::TrailingInput, span)
                .emit();
            return Err(Abort);
        }
        Ok(automaton)
    }

    fn parse_expr(&mut self) -> Parsed<Automaton> {
        let Some(c) = self.peek() else {
            self.error(DiagnosticKind::UnexpectedEnd, Span::at(self.pos));
            return Err(Abort);
        };

        match c {
            b'(' => self.parse_group_expr(),
            b'_' => {
                self.pos += 1;
                Ok(Automaton::epsilon())
            }
            c if c.is_ascii() => {
                self.pos += 1;
                Ok(Automaton::literal(c))
            }
            _ => {
                let span = self.char_span();
                let detail = &self.source[span.start..span.end];
                self.diagnostics
                    .report(DiagnosticKind::NonAsciiSymbol, span)
                    .message(detail)
                    .emit();
                Err(Abort)
            }
        }
    }

    /// `'(' E ')'` followed by an operator.
    fn parse_group_expr(&mut self) -> Parsed<Automaton> {
        let group_start = self.pos;
        let mut left = self.parse_group()?;

        let Some(op) = self.peek() else {
            self.error(DiagnosticKind::ExpectedOperator, Span::at(self.pos));
            return Err(Abort);
        };

        match op {
            b'.' | b'|' => {
                self.pos += 1;
                if self.peek() != Some(b'(') {
                    let span = self.char_span();
                    self.error(DiagnosticKind::ExpectedOpenParen, span);
                    return Err(Abort);
                }
                let right = self.parse_group()?;
                if op == b'.' {
                    left.concat(right);
                } else {
                    left.union(right);
                }
            }
            b'*' => {
                if &self.source[group_start..self.pos] == "(_)" {
                    let span = Span::new(group_start, self.pos + 1);
                    self.diagnostics
                        .report(DiagnosticKind::RedundantStar, span)
                        .emit();
                }
                self.pos += 1;
                left.star();
            }
            _ => {
                let span = self.char_span();
                let detail = &self.source[span.start..span.end];
                self.diagnostics
                    .report(DiagnosticKind::UnknownOperator, span)
                    .message(detail)
                    .emit();
                return Err(Abort);
            }
        }
        Ok(left)
    }

    /// `'(' E ')'`
    fn parse_group(&mut self) -> Parsed<Automaton> {
        let open = self.pos;
        debug_assert_eq!(self.peek(), Some(b'('));
        self.pos += 1;

        self.depth += 1;
        if let Some(limit) = self.max_nesting
            && self.depth > limit
        {
            self.diagnostics
                .report(DiagnosticKind::NestingTooDeep, Span::new(open, open + 1))
                .message(limit.to_string())
                .emit();
            return Err(Abort);
        }
        let inner = self.parse_expr()?;
        self.depth -= 1;

        if self.peek() != Some(b')') {
            let span = if self.pos < self.source.len() {
                self.char_span()
            } else {
                Span::at(self.pos)
            };
            self.diagnostics
                .report(DiagnosticKind::UnclosedGroup, span)
                .related_to("group opened here", Span::new(open, open + 1))
                .emit();
            return Err(Abort);
        }
        self.pos += 1;
        Ok(inner)
    }

    fn peek(&self) -> Option<u8> {
        self.source.as_bytes().get(self.pos).copied()
    }

    /// Span of the character starting at the cursor, or an empty span at the end.
    fn char_span(&self) -> Span {
        let len = self.source[self.pos..]
            .chars()
            .next()
            .map_or(0, char::len_utf8);
        Span::new(self.pos, self.pos + len)
    }

    fn error(&mut self, kind: DiagnosticKind, span: Span) {
        self.diagnostics.report(kind, span).emit();
    }
}
