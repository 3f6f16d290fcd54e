//! Staged compilation of a single pattern.
//!
//! ```text
//! PatternBuilder ─parse─▶ PatternParsed ─determinize─▶ PatternDeterministic ─compile─▶ CompiledPattern
//! ```
//!
//! Each stage owns its automaton; later stages consume earlier ones.

use log::{debug, warn};
use regasm_codegen::{CompiledMatcher, Target, generate, render};
use regasm_core::{Automaton, MAX_SUBSET_STATES};

use crate::diagnostics::Diagnostics;
use crate::parser::Parser;
use crate::{Error, Result};

/// Default cap on NFA states entering subset construction (`2^16` subsets).
pub const DEFAULT_MAX_NFA_STATES: usize = 16;

/// Default maximum group nesting.
pub const DEFAULT_MAX_NESTING: u32 = 256;

/// Name of the generated function when none is given.
pub const DEFAULT_FUNCTION_NAME: &str = "match";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PatternConfig {
    /// Largest pruned NFA accepted for subset construction.
    pub max_nfa_states: usize,
    pub max_nesting: u32,
    /// Prune the NFA before and the DFA after subset construction.
    pub prune: bool,
}

impl Default for PatternConfig {
    fn default() -> Self {
        Self {
            max_nfa_states: DEFAULT_MAX_NFA_STATES,
            max_nesting: DEFAULT_MAX_NESTING,
            prune: true,
        }
    }
}

impl PatternConfig {
    /// Values above [`MAX_SUBSET_STATES`] are clamped.
    pub fn with_max_nfa_states(mut self, limit: usize) -> Self {
        self.max_nfa_states = limit.min(MAX_SUBSET_STATES);
        self
    }

    pub fn with_max_nesting(mut self, limit: u32) -> Self {
        self.max_nesting = limit;
        self
    }

    pub fn with_pruning(mut self, prune: bool) -> Self {
        self.prune = prune;
        self
    }
}

pub struct PatternBuilder<'a> {
    source: &'a str,
    config: PatternConfig,
}

impl<'a> PatternBuilder<'a> {
    pub fn new(source: &'a str) -> Self {
        Self {
            source,
            config: PatternConfig::default(),
        }
    }

    pub fn with_config(mut self, config: PatternConfig) -> Self {
        self.config = config;
        self
    }

    pub fn with_max_nfa_states(mut self, limit: usize) -> Self {
        self.config = self.config.with_max_nfa_states(limit);
        self
    }

    pub fn with_max_nesting(mut self, limit: u32) -> Self {
        self.config = self.config.with_max_nesting(limit);
        self
    }

    pub fn with_pruning(mut self, prune: bool) -> Self {
        self.config = self.config.with_pruning(prune);
        self
    }

    /// Reads the pattern into an NFA.
    pub fn parse(self) -> Result<PatternParsed> {
        let result = Parser::new(self.source)
            .with_max_nesting(Some(self.config.max_nesting))
            .parse();

        let Some(nfa) = result.automaton else {
            return Err(Error::Parse(result.diagnostics));
        };
        for diag in &result.diagnostics {
            warn!("{:?}: {}", self.source, diag);
        }

        Ok(PatternParsed {
            source: self.source.to_string(),
            nfa,
            diagnostics: result.diagnostics,
            config: self.config,
        })
    }
}

/// A pattern read into a Thompson NFA.
#[derive(Debug, Clone)]
pub struct PatternParsed {
    source: String,
    nfa: Automaton,
    diagnostics: Diagnostics,
    config: PatternConfig,
}

impl PatternParsed {
    pub fn source(&self) -> &str {
        &self.source
    }

    /// The NFA as built, before any pruning.
    pub fn nfa(&self) -> &Automaton {
        &self.nfa
    }

    /// Warnings collected while parsing.
    pub fn diagnostics(&self) -> &Diagnostics {
        &self.diagnostics
    }

    /// Prunes the NFA and runs subset construction.
    ///
    /// Fails when the pruned NFA exceeds the state cap or when the result
    /// does not satisfy [`Automaton::is_dfa`].
    pub fn determinize(self) -> Result<PatternDeterministic> {
        let nfa = subset_input(self.nfa, &self.config)?;

        let mut dfa = nfa.to_dfa();
        if self.config.prune {
            dfa.prune();
        }
        debug!(
            "{:?}: {} NFA states, {} DFA states",
            self.source,
            nfa.len(),
            dfa.len()
        );

        if !dfa.is_dfa() {
            return Err(Error::NotDeterministic);
        }

        Ok(PatternDeterministic {
            source: self.source,
            nfa,
            dfa,
            diagnostics: self.diagnostics,
        })
    }

    /// Subset construction output before the DFA is pruned.
    ///
    /// Every subset of NFA states is kept, the empty one included. No
    /// eligibility check is made, so patterns that [`Self::determinize`]
    /// rejects can still be inspected.
    pub fn raw_dfa(&self) -> Result<Automaton> {
        let nfa = subset_input(self.nfa.clone(), &self.config)?;
        Ok(nfa.to_dfa())
    }
}

/// Prunes `nfa` when configured, enforces the state cap and names states.
fn subset_input(mut nfa: Automaton, config: &PatternConfig) -> Result<Automaton> {
    if config.prune {
        nfa.prune();
    }

    let limit = config.max_nfa_states.min(MAX_SUBSET_STATES);
    if nfa.len() > limit {
        return Err(Error::TooManyStates {
            states: nfa.len(),
            limit,
        });
    }
    nfa.assign_default_names();
    Ok(nfa)
}

/// A pattern whose DFA passed the eligibility check.
#[derive(Debug, Clone)]
pub struct PatternDeterministic {
    source: String,
    nfa: Automaton,
    dfa: Automaton,
    diagnostics: Diagnostics,
}

impl PatternDeterministic {
    pub fn source(&self) -> &str {
        &self.source
    }

    /// The NFA that entered subset construction, with default state names.
    pub fn nfa(&self) -> &Automaton {
        &self.nfa
    }

    pub fn dfa(&self) -> &Automaton {
        &self.dfa
    }

    pub fn diagnostics(&self) -> &Diagnostics {
        &self.diagnostics
    }

    pub fn compile(self) -> CompiledPattern {
        let matcher = generate(&self.dfa);
        CompiledPattern {
            source: self.source,
            dfa: self.dfa,
            matcher,
            diagnostics: self.diagnostics,
        }
    }
}

/// A pattern lowered to matcher IR, ready for rendering.
#[derive(Debug, Clone)]
pub struct CompiledPattern {
    source: String,
    dfa: Automaton,
    matcher: CompiledMatcher,
    diagnostics: Diagnostics,
}

impl CompiledPattern {
    pub fn source(&self) -> &str {
        &self.source
    }

    pub fn dfa(&self) -> &Automaton {
        &self.dfa
    }

    pub fn matcher(&self) -> &CompiledMatcher {
        &self.matcher
    }

    pub fn diagnostics(&self) -> &Diagnostics {
        &self.diagnostics
    }

    pub fn render(&self, target: Target, name: &str) -> String {
        target.render(&self.matcher, name)
    }

    pub fn to_c(&self, name: &str) -> String {
        render::c::render(&self.matcher, name)
    }

    pub fn to_header(&self, name: &str) -> String {
        render::c::header(&self.matcher, name)
    }

    pub fn to_nasm(&self, name: &str) -> String {
        render::nasm::render(&self.matcher, name)
    }

    /// Assembly for this function only, without the file preamble.
    pub fn to_nasm_function(&self, name: &str) -> String {
        render::nasm::render_function(&self.matcher, name)
    }
}

/// Runs the whole pipeline with the default configuration.
pub fn compile(source: &str) -> Result<CompiledPattern> {
    Ok(PatternBuilder::new(source).parse()?.determinize()?.compile())
}
