//! NASM x86-64 rendering (System V integer calling convention).
//!
//! Parameters and locals live in their preassigned registers; markers become
//! local labels scoped to the function symbol.

use std::fmt::Write;

use crate::ir::{Instruction, RETURN_REGISTER, VarId};
use crate::matcher::CompiledMatcher;

pub const PREAMBLE: &str = "bits 64\nsection .text\n";

/// A complete assembly file with one function.
pub fn render(matcher: &CompiledMatcher, name: &str) -> String {
    format!("{PREAMBLE}\n{}", render_function(matcher, name))
}

/// The function alone, for files that hold several matchers.
pub fn render_function(matcher: &CompiledMatcher, name: &str) -> String {
    let mut out = String::new();
    // Writing into a String never fails.
    let _ = write_function(&mut out, matcher, name);
    out
}

fn write_function(out: &mut String, matcher: &CompiledMatcher, name: &str) -> std::fmt::Result {
    writeln!(out, "global {name}")?;
    writeln!(out, "{name}:")?;

    for local in matcher.locals() {
        let (Some(reg), Some(value)) = (local.register, local.initial) else {
            continue;
        };
        if value == 0 {
            writeln!(out, "  xor {0}, {0}", reg.name32())?;
        } else {
            writeln!(out, "  mov {}, {}", reg.name(local.ty), value)?;
        }
    }

    for (id, instr) in matcher.instructions() {
        let var = |v: VarId| operand(matcher, v);
        match instr {
            Instruction::Nop => writeln!(out, ".{}:", id.label())?,
            Instruction::Load {
                dest,
                base,
                offset,
                width,
            } => {
                let dest = register(matcher, *dest).name32();
                writeln!(
                    out,
                    "  movzx {}, {} [{} + {}]",
                    dest,
                    width.asm_size(),
                    var(*base),
                    var(*offset)
                )?
            }
            Instruction::Add { dest, operand } => {
                writeln!(out, "  add {}, {}", var(*dest), var(*operand))?
            }
            Instruction::Copy { dest, source } => {
                writeln!(out, "  mov {}, {}", var(*dest), var(*source))?
            }
            Instruction::Jump { target } => writeln!(out, "  jmp .{}", target.label())?,
            Instruction::Branch {
                lhs,
                cond,
                rhs,
                target,
            } => {
                writeln!(out, "  cmp {}, {}", var(*lhs), var(*rhs))?;
                writeln!(out, "  j{} .{}", cond.asm_suffix(), target.label())?;
            }
            Instruction::Return { value } => {
                writeln!(out, ".{}:", id.label())?;
                let variable = matcher.variable(*value);
                if variable.register != Some(RETURN_REGISTER) {
                    writeln!(
                        out,
                        "  mov {}, {}",
                        RETURN_REGISTER.name(variable.ty),
                        var(*value)
                    )?;
                }
                writeln!(out, "  ret")?;
            }
        }
    }

    Ok(())
}

fn register(matcher: &CompiledMatcher, id: VarId) -> crate::ir::Register {
    let var = matcher.variable(id);
    var.register
        .unwrap_or_else(|| panic!("variable `{}` has no register", var.name))
}

fn operand(matcher: &CompiledMatcher, id: VarId) -> String {
    let var = matcher.variable(id);
    match (var.register, var.initial) {
        (Some(reg), _) => reg.name(var.ty).to_string(),
        (None, Some(value)) => value.to_string(),
        (None, None) => panic!("variable `{}` has neither register nor value", var.name),
    }
}
