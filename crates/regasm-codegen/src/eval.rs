//! Reference interpreter for matcher IR, used to check generated code.

use crate::ir::Instruction;
use crate::matcher::{CompiledMatcher, LENGTH};

const STEP_LIMIT: usize = 1_000_000;

pub fn run(matcher: &CompiledMatcher, input: &[u8]) -> i64 {
    let mut values: Vec<i64> = matcher
        .variables()
        .iter()
        .map(|v| v.initial.unwrap_or(0))
        .collect();
    values[LENGTH.index()] = input.len() as i64;

    let arena = matcher.arena();
    let mut pc = matcher.body().head();
    for _ in 0..STEP_LIMIT {
        let id = pc.expect("execution fell off the end of the body");
        let mut next = arena.next(id);
        match arena.get(id) {
            Instruction::Nop => {}
            Instruction::Load { dest, offset, .. } => {
                values[dest.index()] = i64::from(input[values[offset.index()] as usize]);
            }
            Instruction::Add { dest, operand } => {
                values[dest.index()] += values[operand.index()];
            }
            Instruction::Copy { dest, source } => {
                values[dest.index()] = values[source.index()];
            }
            Instruction::Jump { target } => next = Some(*target),
            Instruction::Branch {
                lhs,
                cond,
                rhs,
                target,
            } => {
                if cond.holds(values[lhs.index()], values[rhs.index()]) {
                    next = Some(*target);
                }
            }
            Instruction::Return { value } => return values[value.index()],
        }
        pc = next;
    }
    panic!("matcher did not terminate within {STEP_LIMIT} steps");
}
