//! Batch compilation into linkable artifacts.
//!
//! Patterns that fail are recorded and skipped; the rest are numbered in the
//! order they were added (`match0`, `match1`, ...). The rendered files are
//! meant for an external assembler and C compiler.

use std::fmt::Write;

use log::{info, warn};
use regasm_codegen::render::nasm::PREAMBLE;

use crate::Error;
use crate::pattern::{CompiledPattern, PatternBuilder, PatternConfig};

/// File names written by a batch build.
pub const ASM_FILE: &str = "matchers.asm";
pub const C_FILE: &str = "matchers.c";
pub const DEFS_FILE: &str = "defs.c";

#[derive(Debug)]
pub struct BatchFailure {
    /// Position among all added patterns.
    pub index: usize,
    pub pattern: String,
    pub error: Error,
}

#[derive(Debug, Default)]
pub struct Batch {
    config: PatternConfig,
    compiled: Vec<CompiledPattern>,
    failures: Vec<BatchFailure>,
    added: usize,
}

impl Batch {
    pub fn new(config: PatternConfig) -> Self {
        Self {
            config,
            ..Self::default()
        }
    }

    /// Compiles `pattern`; returns `false` if it failed and was skipped.
    pub fn add(&mut self, pattern: &str) -> bool {
        let index = self.added;
        self.added += 1;

        let result = PatternBuilder::new(pattern)
            .with_config(self.config)
            .parse()
            .and_then(|parsed| parsed.determinize())
            .map(|det| det.compile());

        match result {
            Ok(compiled) => {
                info!("{pattern:?} compiled as {}", function_name(self.compiled.len()));
                self.compiled.push(compiled);
                true
            }
            Err(error) => {
                warn!("skipping {pattern:?}: {error}");
                self.failures.push(BatchFailure {
                    index,
                    pattern: pattern.to_string(),
                    error,
                });
                false
            }
        }
    }

    pub fn extend<'p>(&mut self, patterns: impl IntoIterator<Item = &'p str>) {
        for pattern in patterns {
            self.add(pattern);
        }
    }

    pub fn compiled(&self) -> &[CompiledPattern] {
        &self.compiled
    }

    pub fn failures(&self) -> &[BatchFailure] {
        &self.failures
    }

    pub fn is_empty(&self) -> bool {
        self.compiled.is_empty()
    }

    /// One assembly file holding every matcher.
    pub fn render_asm(&self) -> String {
        let mut out = String::from(PREAMBLE);
        for (i, pattern) in self.compiled.iter().enumerate() {
            out.push('\n');
            out.push_str(&pattern.to_nasm_function(&function_name(i)));
        }
        out
    }

    /// One C file holding every matcher definition.
    pub fn render_c(&self) -> String {
        let functions: Vec<String> = self
            .compiled
            .iter()
            .enumerate()
            .map(|(i, pattern)| pattern.to_c(&function_name(i)))
            .collect();
        functions.join("\n")
    }

    /// Prototypes plus tables of function pointers and pattern texts.
    pub fn render_defs(&self) -> String {
        let mut out = String::new();
        // Writing into a String never fails.
        let _ = self.write_defs(&mut out);
        out
    }

    fn write_defs(&self, out: &mut String) -> std::fmt::Result {
        for (i, pattern) in self.compiled.iter().enumerate() {
            write!(out, "{}", pattern.to_header(&function_name(i)))?;
        }
        if !self.compiled.is_empty() {
            writeln!(out)?;
        }

        writeln!(out, "typedef long (*matchFunc)(const char*, long);")?;
        writeln!(out)?;
        writeln!(out, "long nPatterns = {};", self.compiled.len())?;

        let (funcs, patterns) = if self.compiled.is_empty() {
            ("0".to_string(), "0".to_string())
        } else {
            let funcs: Vec<String> = (0..self.compiled.len()).map(function_name).collect();
            let patterns: Vec<String> = self
                .compiled
                .iter()
                .map(|p| c_string(p.source()))
                .collect();
            (funcs.join(", "), patterns.join(", "))
        };
        writeln!(out, "matchFunc funcs[] = {{{funcs}}};")?;
        writeln!(out, "const char* patterns[] = {{{patterns}}};")
    }
}

pub fn function_name(index: usize) -> String {
    format!("match{index}")
}

/// Quoted C string literal.
fn c_string(text: &str) -> String {
    let mut out = String::with_capacity(text.len() + 2);
    out.push('"');
    for b in text.bytes() {
        match b {
            b'"' => out.push_str("\\\""),
            b'\\' => out.push_str("\\\\"),
            b' ' => out.push(' '),
            _ if b.is_ascii_graphic() => out.push(b as char),
            _ => {
                let _ = write!(out, "\\{b:03o}");
            }
        }
    }
    out.push('"');
    out
}
