//! Text renderers over a [`CompiledMatcher`].
//!
//! Each renderer is a pure function with one exhaustive `match` over
//! [`Instruction`](crate::Instruction).

pub mod c;
pub mod nasm;

use crate::matcher::CompiledMatcher;

/// Output flavour of a rendered matcher.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Target {
    /// C function definition.
    C,
    /// NASM x86-64 source file.
    Nasm,
    /// C prototype for the matcher.
    Header,
}

impl Target {
    pub fn render(self, matcher: &CompiledMatcher, name: &str) -> String {
        match self {
            Target::C => c::render(matcher, name),
            Target::Nasm => nasm::render(matcher, name),
            Target::Header => c::header(matcher, name),
        }
    }

    pub fn extension(self) -> &'static str {
        match self {
            Target::C => "c",
            Target::Nasm => "asm",
            Target::Header => "h",
        }
    }
}
