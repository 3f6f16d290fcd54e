//! The compiled matcher: one fixed-signature function in IR form.
//!
//! Signature: `long match(const char* input, long length)`. Locals:
//! `counter = 0`, `longestMatch = -1`, `nextChar`. Every block jumps to the
//! single shared `done` instruction, which returns `longestMatch`.

use indexmap::IndexMap;

use crate::ir::{
    ARGUMENT_REGISTERS, Condition, InstrId, Instruction, RETURN_REGISTER, Register, ValueType, VarId,
    VarKind, Variable,
};
use crate::list::{Chain, InstructionArena};

pub const INPUT: VarId = VarId(0);
pub const LENGTH: VarId = VarId(1);
pub const COUNTER: VarId = VarId(2);
pub const LONGEST_MATCH: VarId = VarId(3);
pub const NEXT_CHAR: VarId = VarId(4);

/// Instructions for one automaton state, not yet linked into the body.
#[derive(Debug)]
pub struct Block {
    chain: Chain,
    marker: InstrId,
}

impl Block {
    /// Jump target of this block.
    pub fn marker(&self) -> InstrId {
        self.marker
    }
}

#[derive(Debug, Clone)]
pub struct CompiledMatcher {
    arena: InstructionArena,
    body: Chain,
    variables: Vec<Variable>,
    immediates: IndexMap<(ValueType, i64), VarId>,
    done: InstrId,
    insert_point: Option<InstrId>,
}

impl Default for CompiledMatcher {
    fn default() -> Self {
        Self::new()
    }
}

impl CompiledMatcher {
    /// An empty matcher whose body holds only the `done` return.
    pub fn new() -> Self {
        let variables = vec![
            Variable::parameter("input", ValueType::ConstCharPtr, ARGUMENT_REGISTERS[0]),
            Variable::parameter("length", ValueType::Long, ARGUMENT_REGISTERS[1]),
            Variable::local("counter", ValueType::Long, Register::D, Some(0)),
            Variable::local("longestMatch", ValueType::Long, RETURN_REGISTER, Some(-1)),
            Variable::local("nextChar", ValueType::Byte, Register::C, None),
        ];

        let mut arena = InstructionArena::new();
        let mut body = Chain::default();
        let done = arena.alloc(Instruction::Return {
            value: LONGEST_MATCH,
        });
        arena.push_back(&mut body, done);

        Self {
            arena,
            body,
            variables,
            immediates: IndexMap::new(),
            done,
            insert_point: None,
        }
    }

    pub fn done(&self) -> InstrId {
        self.done
    }

    /// Type of the value returned by `done`.
    pub fn return_type(&self) -> ValueType {
        match self.arena.get(self.done) {
            Instruction::Return { value } => self.variable(*value).ty,
            other => unreachable!("done must be a return, found {other:?}"),
        }
    }

    pub fn insert_point(&self) -> Option<InstrId> {
        self.insert_point
    }

    pub fn body(&self) -> Chain {
        self.body
    }

    pub fn arena(&self) -> &InstructionArena {
        &self.arena
    }

    pub fn variable(&self, id: VarId) -> &Variable {
        &self.variables[id.index()]
    }

    pub fn variables(&self) -> &[Variable] {
        &self.variables
    }

    pub fn parameters(&self) -> impl Iterator<Item = &Variable> {
        self.variables
            .iter()
            .filter(|v| v.kind == VarKind::Parameter)
    }

    pub fn locals(&self) -> impl Iterator<Item = &Variable> {
        self.variables.iter().filter(|v| v.kind == VarKind::Local)
    }

    /// Body instructions in execution order.
    pub fn instructions(&self) -> impl Iterator<Item = (InstrId, &Instruction)> {
        self.arena.iter(self.body)
    }

    /// Interns a constant operand.
    pub fn immediate(&mut self, ty: ValueType, value: i64) -> VarId {
        if let Some(&id) = self.immediates.get(&(ty, value)) {
            return id;
        }
        let id = VarId(self.variables.len() as u32);
        self.variables.push(Variable::immediate(ty, value));
        self.immediates.insert((ty, value), id);
        id
    }

    /// Starts a block: marker, bounds check, symbol load, counter increment.
    pub fn new_block(&mut self) -> Block {
        let one = self.immediate(ValueType::Long, 1);
        let mut chain = Chain::default();

        let marker = self.arena.alloc(Instruction::Nop);
        let bounds = self.arena.alloc(Instruction::Branch {
            lhs: COUNTER,
            cond: Condition::Ge,
            rhs: LENGTH,
            target: self.done,
        });
        let load = self.arena.alloc(Instruction::Load {
            dest: NEXT_CHAR,
            base: INPUT,
            offset: COUNTER,
            width: ValueType::Byte,
        });
        let step = self.arena.alloc(Instruction::Add {
            dest: COUNTER,
            operand: one,
        });
        for id in [marker, bounds, load, step] {
            self.arena.push_back(&mut chain, id);
        }

        Block { chain, marker }
    }

    /// Records `counter` as the longest match on entry to the block.
    pub fn store_match(&mut self, block: &mut Block) {
        let copy = self.arena.alloc(Instruction::Copy {
            dest: LONGEST_MATCH,
            source: COUNTER,
        });
        self.arena.insert_after(&mut block.chain, block.marker, copy);
    }

    /// Appends `if nextChar == symbol goto target`.
    pub fn match_symbol(&mut self, block: &mut Block, symbol: u8, target: InstrId) {
        let rhs = self.immediate(ValueType::Byte, i64::from(symbol));
        self.push_back(
            block,
            Instruction::Branch {
                lhs: NEXT_CHAR,
                cond: Condition::Eq,
                rhs,
                target,
            },
        );
    }

    pub fn push_back(&mut self, block: &mut Block, instr: Instruction) -> InstrId {
        let id = self.arena.alloc(instr);
        self.arena.push_back(&mut block.chain, id);
        id
    }

    pub fn insert_after(&mut self, block: &mut Block, anchor: InstrId, instr: Instruction) -> InstrId {
        let id = self.arena.alloc(instr);
        self.arena.insert_after(&mut block.chain, anchor, id);
        id
    }

    /// Closes the block with `goto done` and links it into the body.
    ///
    /// The first finished block goes to the front of the body; each later one
    /// follows the previously finished block. `done` stays last.
    pub fn finish_block(&mut self, mut block: Block) {
        let jump = self.arena.alloc(Instruction::Jump { target: self.done });
        self.arena.push_back(&mut block.chain, jump);

        match self.insert_point {
            None => self.arena.prepend(&mut self.body, &mut block.chain),
            Some(anchor) => self
                .arena
                .splice_after(&mut self.body, anchor, &mut block.chain),
        }
        self.insert_point = Some(jump);
    }
}
