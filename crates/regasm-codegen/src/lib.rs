#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

//! Code generation for regasm matchers.
//!
//! A DFA is lowered into a target-agnostic instruction sequence
//! ([`CompiledMatcher`]), which the renderers turn into text:
//! - `render::c`: structured C source
//! - `render::nasm`: NASM x86-64 assembly (System V calling convention)

mod generate;
pub mod ir;
mod list;
mod matcher;
pub mod render;

#[cfg(test)]
mod eval;
#[cfg(test)]
mod list_tests;

pub use generate::generate;
pub use ir::{Condition, InstrId, Instruction, Register, ValueType, VarId, VarKind, Variable};
pub use list::{Chain, InstructionArena};
pub use matcher::{Block, CompiledMatcher};
pub use render::Target;
