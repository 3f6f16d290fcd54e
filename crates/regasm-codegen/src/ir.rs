//! Typed instruction IR.
//!
//! Instructions refer to storage through [`VarId`] and to jump targets
//! through [`InstrId`]; both index into the owning
//! [`CompiledMatcher`](crate::CompiledMatcher).

use std::fmt;

/// Index into the matcher's variable table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct VarId(pub u32);

impl VarId {
    #[inline]
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

/// Index of an instruction node in the arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct InstrId(pub u32);

impl InstrId {
    #[inline]
    pub fn index(self) -> usize {
        self.0 as usize
    }

    /// Label text shared by every renderer.
    pub fn label(self) -> String {
        format!("L{}", self.0)
    }
}

impl fmt::Display for InstrId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "L{}", self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ValueType {
    Byte,
    ConstCharPtr,
    Long,
    Int,
}

impl ValueType {
    pub fn c_name(self) -> &'static str {
        match self {
            ValueType::Byte => "unsigned char",
            ValueType::ConstCharPtr => "const char*",
            ValueType::Long => "long",
            ValueType::Int => "int",
        }
    }

    /// NASM size specifier for memory operands.
    pub fn asm_size(self) -> &'static str {
        match self {
            ValueType::Byte => "byte",
            ValueType::Int => "dword",
            ValueType::ConstCharPtr | ValueType::Long => "qword",
        }
    }
}

/// x86-64 general purpose registers used by generated matchers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Register {
    Di,
    Si,
    D,
    A,
    C,
}

/// System V integer argument registers, in order.
pub const ARGUMENT_REGISTERS: [Register; 4] = [Register::Di, Register::Si, Register::D, Register::C];

pub const RETURN_REGISTER: Register = Register::A;

impl Register {
    /// Register name at the width of `ty`.
    pub fn name(self, ty: ValueType) -> &'static str {
        match ty {
            ValueType::Byte => self.name8(),
            ValueType::Int => self.name32(),
            ValueType::Long | ValueType::ConstCharPtr => self.name64(),
        }
    }

    pub fn name8(self) -> &'static str {
        match self {
            Register::Di => "dil",
            Register::Si => "sil",
            Register::D => "dl",
            Register::A => "al",
            Register::C => "cl",
        }
    }

    pub fn name32(self) -> &'static str {
        match self {
            Register::Di => "edi",
            Register::Si => "esi",
            Register::D => "edx",
            Register::A => "eax",
            Register::C => "ecx",
        }
    }

    pub fn name64(self) -> &'static str {
        match self {
            Register::Di => "rdi",
            Register::Si => "rsi",
            Register::D => "rdx",
            Register::A => "rax",
            Register::C => "rcx",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VarKind {
    Parameter,
    Local,
    /// Constant operand; `initial` holds its value.
    Immediate,
}

/// Typed storage slot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Variable {
    pub name: String,
    pub ty: ValueType,
    pub kind: VarKind,
    pub register: Option<Register>,
    pub initial: Option<i64>,
}

impl Variable {
    pub fn parameter(name: &str, ty: ValueType, register: Register) -> Self {
        Self {
            name: name.to_string(),
            ty,
            kind: VarKind::Parameter,
            register: Some(register),
            initial: None,
        }
    }

    pub fn local(name: &str, ty: ValueType, register: Register, initial: Option<i64>) -> Self {
        Self {
            name: name.to_string(),
            ty,
            kind: VarKind::Local,
            register: Some(register),
            initial,
        }
    }

    pub fn immediate(ty: ValueType, value: i64) -> Self {
        Self {
            name: value.to_string(),
            ty,
            kind: VarKind::Immediate,
            register: None,
            initial: Some(value),
        }
    }

    pub fn is_immediate(&self) -> bool {
        self.kind == VarKind::Immediate
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Condition {
    Eq,
    Ne,
    Gt,
    Ge,
    Lt,
    Le,
}

impl Condition {
    pub fn c_operator(self) -> &'static str {
        match self {
            Condition::Eq => "==",
            Condition::Ne => "!=",
            Condition::Gt => ">",
            Condition::Ge => ">=",
            Condition::Lt => "<",
            Condition::Le => "<=",
        }
    }

    /// Suffix of the signed conditional jump (`j<suffix>`).
    pub fn asm_suffix(self) -> &'static str {
        match self {
            Condition::Eq => "e",
            Condition::Ne => "ne",
            Condition::Gt => "g",
            Condition::Ge => "ge",
            Condition::Lt => "l",
            Condition::Le => "le",
        }
    }

    pub fn holds(self, lhs: i64, rhs: i64) -> bool {
        match self {
            Condition::Eq => lhs == rhs,
            Condition::Ne => lhs != rhs,
            Condition::Gt => lhs > rhs,
            Condition::Ge => lhs >= rhs,
            Condition::Lt => lhs < rhs,
            Condition::Le => lhs <= rhs,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Instruction {
    /// Label marker; the jump target of a block.
    Nop,
    /// `dest = base[offset]`, zero-extended from `width`.
    Load {
        dest: VarId,
        base: VarId,
        offset: VarId,
        width: ValueType,
    },
    /// `dest += operand`
    Add { dest: VarId, operand: VarId },
    /// `dest = source`
    Copy { dest: VarId, source: VarId },
    Jump { target: InstrId },
    /// Jump to `target` when `lhs <cond> rhs`.
    Branch {
        lhs: VarId,
        cond: Condition,
        rhs: VarId,
        target: InstrId,
    },
    Return { value: VarId },
}

impl Instruction {
    pub fn target(&self) -> Option<InstrId> {
        match self {
            Instruction::Jump { target } | Instruction::Branch { target, .. } => Some(*target),
            _ => None,
        }
    }

    /// Markers and returns start with a label in rendered output.
    pub fn is_labelled(&self) -> bool {
        matches!(self, Instruction::Nop | Instruction::Return { .. })
    }
}
