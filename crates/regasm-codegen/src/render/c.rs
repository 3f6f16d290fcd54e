//! C rendering.
//!
//! Markers become labels and every instruction becomes one statement.

use std::fmt::Write;

use crate::ir::{Instruction, ValueType, VarId};
use crate::matcher::CompiledMatcher;

/// `long name(const char* input, long length)`
pub fn prototype(matcher: &CompiledMatcher, name: &str) -> String {
    let params: Vec<String> = matcher
        .parameters()
        .map(|v| format!("{} {}", v.ty.c_name(), v.name))
        .collect();
    format!(
        "{} {}({})",
        matcher.return_type().c_name(),
        name,
        params.join(", ")
    )
}

pub fn header(matcher: &CompiledMatcher, name: &str) -> String {
    format!("{};\n", prototype(matcher, name))
}

pub fn render(matcher: &CompiledMatcher, name: &str) -> String {
    let mut out = String::new();
    // Writing into a String never fails.
    let _ = write_function(&mut out, matcher, name);
    out
}

fn write_function(out: &mut String, matcher: &CompiledMatcher, name: &str) -> std::fmt::Result {
    writeln!(out, "{} {{", prototype(matcher, name))?;

    for local in matcher.locals() {
        match local.initial {
            Some(value) => writeln!(out, "  {} {} = {};", local.ty.c_name(), local.name, value)?,
            None => writeln!(out, "  {} {};", local.ty.c_name(), local.name)?,
        }
    }

    for (id, instr) in matcher.instructions() {
        let var = |v: VarId| operand(matcher, v);
        match instr {
            Instruction::Nop => writeln!(out, "{}:", id.label())?,
            Instruction::Load {
                dest, base, offset, ..
            } => writeln!(out, "  {} = {}[{}];", var(*dest), var(*base), var(*offset))?,
            Instruction::Add { dest, operand } => {
                writeln!(out, "  {} += {};", var(*dest), var(*operand))?
            }
            Instruction::Copy { dest, source } => {
                writeln!(out, "  {} = {};", var(*dest), var(*source))?
            }
            Instruction::Jump { target } => writeln!(out, "  goto {};", target.label())?,
            Instruction::Branch {
                lhs,
                cond,
                rhs,
                target,
            } => writeln!(
                out,
                "  if ({} {} {}) goto {};",
                var(*lhs),
                cond.c_operator(),
                var(*rhs),
                target.label()
            )?,
            Instruction::Return { value } => {
                writeln!(out, "{}:", id.label())?;
                writeln!(out, "  return {};", var(*value))?;
            }
        }
    }

    writeln!(out, "}}")
}

fn operand(matcher: &CompiledMatcher, id: VarId) -> String {
    let var = matcher.variable(id);
    match (var.is_immediate(), var.ty, var.initial) {
        (true, ValueType::Byte, Some(value)) => byte_literal(value),
        (true, _, Some(value)) => value.to_string(),
        _ => var.name.clone(),
    }
}

/// Printable ASCII becomes a character literal, anything else stays numeric
/// so that values above 127 compare correctly against `unsigned char`.
fn byte_literal(value: i64) -> String {
    match u8::try_from(value) {
        Ok(b'\'') => "'\\''".to_string(),
        Ok(b'\\') => "'\\\\'".to_string(),
        Ok(c) if c == b' ' || c.is_ascii_graphic() => format!("'{}'", c as char),
        _ => value.to_string(),
    }
}
