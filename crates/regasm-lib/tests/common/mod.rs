//! Reference interpreters for the emitted C and NASM text.
//!
//! Both understand exactly the statement forms the renderers produce, which
//! lets the tests execute generated matchers without a toolchain.

#![allow(dead_code)]

use std::collections::HashMap;

mod reference;

pub use reference::{all_inputs, simulate_nfa};

const STEP_LIMIT: usize = 1_000_000;

// ============================================================================
// C
// ============================================================================

/// Runs function `name` from C source produced by the C renderer.
pub fn run_c(source: &str, name: &str, input: &[u8]) -> i64 {
    let lines = function_lines(source, &format!("long {name}("), "}");
    let labels: HashMap<&str, usize> = lines
        .iter()
        .enumerate()
        .filter_map(|(i, l)| l.strip_suffix(':').map(|label| (label, i)))
        .collect();

    let mut vars: HashMap<String, i64> = HashMap::from([("length".to_string(), input.len() as i64)]);
    let value = |vars: &HashMap<String, i64>, operand: &str| -> i64 {
        if let Some(lit) = operand.strip_prefix('\'').and_then(|s| s.strip_suffix('\'')) {
            return match lit {
                "\\'" => i64::from(b'\''),
                "\\\\" => i64::from(b'\\'),
                other => i64::from(other.as_bytes()[0]),
            };
        }
        operand
            .parse()
            .unwrap_or_else(|_| *vars.get(operand).unwrap_or_else(|| panic!("unknown `{operand}`")))
    };

    let mut pc = 1;
    for _ in 0..STEP_LIMIT {
        let line = lines[pc];
        pc += 1;

        if line.ends_with(':') {
            continue;
        }
        let stmt = line.strip_suffix(';').unwrap_or_else(|| panic!("bad line `{line}`"));

        if let Some(rest) = stmt.strip_prefix("if (") {
            let (cond, target) = rest.split_once(") goto ").expect("if-goto");
            let parts: Vec<&str> = cond.split(' ').collect();
            let (lhs, op, rhs) = (value(&vars, parts[0]), parts[1], value(&vars, parts[2]));
            let taken = match op {
                "==" => lhs == rhs,
                "!=" => lhs != rhs,
                ">" => lhs > rhs,
                ">=" => lhs >= rhs,
                "<" => lhs < rhs,
                "<=" => lhs <= rhs,
                _ => panic!("unknown operator `{op}`"),
            };
            if taken {
                pc = labels[target];
            }
        } else if let Some(target) = stmt.strip_prefix("goto ") {
            pc = labels[target];
        } else if let Some(var) = stmt.strip_prefix("return ") {
            return value(&vars, var);
        } else if let Some((dest, amount)) = stmt.split_once(" += ") {
            let sum = value(&vars, dest) + value(&vars, amount);
            vars.insert(dest.to_string(), sum);
        } else if let Some((decl, init)) = stmt.split_once(" = ") {
            let dest = decl.rsplit(' ').next().expect("assignment target");
            let v = match init.strip_prefix("input[") {
                Some(index) => {
                    let index = value(&vars, index.trim_end_matches(']'));
                    i64::from(input[index as usize])
                }
                None => value(&vars, init),
            };
            vars.insert(dest.to_string(), v);
        } else {
            // Declaration without initializer.
            let name = stmt.rsplit(' ').next().expect("declaration");
            vars.insert(name.to_string(), 0);
        }
    }
    panic!("C matcher `{name}` did not terminate");
}

// ============================================================================
// NASM
// ============================================================================

fn canonical(reg: &str) -> (&'static str, bool) {
    match reg {
        "rdi" | "edi" => ("di", false),
        "dil" => ("di", true),
        "rsi" | "esi" => ("si", false),
        "sil" => ("si", true),
        "rdx" | "edx" => ("d", false),
        "dl" => ("d", true),
        "rax" | "eax" => ("a", false),
        "al" => ("a", true),
        "rcx" | "ecx" => ("c", false),
        "cl" => ("c", true),
        _ => panic!("unknown register `{reg}`"),
    }
}

/// Runs function `name` from assembly produced by the NASM renderer.
pub fn run_nasm(source: &str, name: &str, input: &[u8]) -> i64 {
    let lines = function_lines(source, &format!("{name}:"), "ret");
    let labels: HashMap<&str, usize> = lines
        .iter()
        .enumerate()
        .filter_map(|(i, l)| l.strip_prefix('.')?.strip_suffix(':').map(|label| (label, i)))
        .collect();

    let mut regs: HashMap<&'static str, i64> = HashMap::from([("si", input.len() as i64)]);
    let read = |regs: &HashMap<&'static str, i64>, operand: &str| -> i64 {
        if let Ok(imm) = operand.parse::<i64>() {
            return imm;
        }
        let (reg, low_byte) = canonical(operand);
        let v = regs.get(reg).copied().unwrap_or(0);
        if low_byte { v & 0xff } else { v }
    };

    let mut flags = (0i64, 0i64);
    let mut pc = 1;
    for _ in 0..STEP_LIMIT {
        let line = lines[pc];
        pc += 1;

        if line.ends_with(':') {
            continue;
        }
        let (op, args) = line.split_once(' ').unwrap_or((line, ""));
        let args: Vec<&str> = args.split(", ").collect();

        match op {
            "ret" => return read(&regs, "rax"),
            "xor" => {
                regs.insert(canonical(args[0]).0, 0);
            }
            "mov" => {
                let v = read(&regs, args[1]);
                regs.insert(canonical(args[0]).0, v);
            }
            "add" => {
                let v = read(&regs, args[0]) + read(&regs, args[1]);
                regs.insert(canonical(args[0]).0, v);
            }
            "movzx" => {
                let address = args[1]
                    .strip_prefix("byte [")
                    .and_then(|a| a.strip_suffix(']'))
                    .expect("byte memory operand");
                let (_, offset) = address.split_once(" + ").expect("base + offset");
                let index = read(&regs, offset);
                regs.insert(canonical(args[0]).0, i64::from(input[index as usize]));
            }
            "cmp" => flags = (read(&regs, args[0]), read(&regs, args[1])),
            "jmp" => pc = labels[&args[0][1..]],
            jump if jump.starts_with('j') => {
                let (lhs, rhs) = flags;
                let taken = match &jump[1..] {
                    "e" => lhs == rhs,
                    "ne" => lhs != rhs,
                    "g" => lhs > rhs,
                    "ge" => lhs >= rhs,
                    "l" => lhs < rhs,
                    "le" => lhs <= rhs,
                    other => panic!("unknown condition `{other}`"),
                };
                if taken {
                    pc = labels[&args[0][1..]];
                }
            }
            _ => panic!("unknown instruction `{line}`"),
        }
    }
    panic!("NASM matcher `{name}` did not terminate");
}

/// Trimmed lines from the one starting with `start` through the first line
/// equal to `end` that follows it. For NASM the final `ret` belongs to the
/// shared return, which is always the last instruction of a function.
fn function_lines<'s>(source: &'s str, start: &str, end: &str) -> Vec<&'s str> {
    let mut lines = source
        .lines()
        .map(str::trim)
        .skip_while(|l| !l.starts_with(start));
    let mut out: Vec<&str> = Vec::new();
    for line in lines.by_ref() {
        out.push(line);
        if line == end {
            break;
        }
    }
    assert!(!out.is_empty(), "function starting with `{start}` not found");
    out
}
