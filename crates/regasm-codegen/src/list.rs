//! Arena-backed doubly-linked instruction list.
//!
//! Nodes are allocated once and linked through `prev`/`next` indices.
//! A [`Chain`] is a lightweight view (head and tail) over linked nodes, so
//! whole blocks can be spliced without moving instructions.

use crate::ir::{InstrId, Instruction};

#[derive(Debug, Clone)]
struct Node {
    instr: Instruction,
    prev: Option<InstrId>,
    next: Option<InstrId>,
    linked: bool,
}

/// Head and tail of a run of linked nodes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Chain {
    head: Option<InstrId>,
    tail: Option<InstrId>,
}

impl Chain {
    pub fn head(&self) -> Option<InstrId> {
        self.head
    }

    pub fn tail(&self) -> Option<InstrId> {
        self.tail
    }

    pub fn is_empty(&self) -> bool {
        self.head.is_none()
    }
}

#[derive(Debug, Clone, Default)]
pub struct InstructionArena {
    nodes: Vec<Node>,
}

impl InstructionArena {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Allocates an unlinked node.
    pub fn alloc(&mut self, instr: Instruction) -> InstrId {
        let id = InstrId(self.nodes.len() as u32);
        self.nodes.push(Node {
            instr,
            prev: None,
            next: None,
            linked: false,
        });
        id
    }

    pub fn get(&self, id: InstrId) -> &Instruction {
        &self.nodes[id.index()].instr
    }

    pub fn next(&self, id: InstrId) -> Option<InstrId> {
        self.nodes[id.index()].next
    }

    pub fn prev(&self, id: InstrId) -> Option<InstrId> {
        self.nodes[id.index()].prev
    }

    fn link(&mut self, id: InstrId, prev: Option<InstrId>, next: Option<InstrId>) {
        let node = &mut self.nodes[id.index()];
        debug_assert!(!node.linked, "instruction {id} is already linked");
        node.prev = prev;
        node.next = next;
        node.linked = true;
    }

    fn set_next(&mut self, id: Option<InstrId>, next: Option<InstrId>) {
        if let Some(id) = id {
            self.nodes[id.index()].next = next;
        }
    }

    fn set_prev(&mut self, id: Option<InstrId>, prev: Option<InstrId>) {
        if let Some(id) = id {
            self.nodes[id.index()].prev = prev;
        }
    }

    pub fn push_back(&mut self, chain: &mut Chain, id: InstrId) {
        self.link(id, chain.tail, None);
        self.set_next(chain.tail, Some(id));
        chain.tail = Some(id);
        chain.head.get_or_insert(id);
    }

    pub fn push_front(&mut self, chain: &mut Chain, id: InstrId) {
        self.link(id, None, chain.head);
        self.set_prev(chain.head, Some(id));
        chain.head = Some(id);
        chain.tail.get_or_insert(id);
    }

    pub fn insert_after(&mut self, chain: &mut Chain, anchor: InstrId, id: InstrId) {
        let next = self.next(anchor);
        self.link(id, Some(anchor), next);
        self.nodes[anchor.index()].next = Some(id);
        self.set_prev(next, Some(id));
        if chain.tail == Some(anchor) {
            chain.tail = Some(id);
        }
    }

    pub fn insert_before(&mut self, chain: &mut Chain, anchor: InstrId, id: InstrId) {
        let prev = self.prev(anchor);
        self.link(id, prev, Some(anchor));
        self.nodes[anchor.index()].prev = Some(id);
        self.set_next(prev, Some(id));
        if chain.head == Some(anchor) {
            chain.head = Some(id);
        }
    }

    /// Moves every node of `other` to the end of `chain`, leaving `other` empty.
    pub fn append(&mut self, chain: &mut Chain, other: &mut Chain) {
        let taken = std::mem::take(other);
        let (Some(head), Some(tail)) = (taken.head, taken.tail) else {
            return;
        };
        self.nodes[head.index()].prev = chain.tail;
        self.set_next(chain.tail, Some(head));
        chain.head.get_or_insert(head);
        chain.tail = Some(tail);
    }

    /// Moves every node of `other` right after `anchor`, leaving `other` empty.
    pub fn splice_after(&mut self, chain: &mut Chain, anchor: InstrId, other: &mut Chain) {
        let taken = std::mem::take(other);
        let (Some(head), Some(tail)) = (taken.head, taken.tail) else {
            return;
        };
        let next = self.next(anchor);
        self.nodes[anchor.index()].next = Some(head);
        self.nodes[head.index()].prev = Some(anchor);
        self.nodes[tail.index()].next = next;
        self.set_prev(next, Some(tail));
        if chain.tail == Some(anchor) {
            chain.tail = Some(tail);
        }
    }

    /// Moves every node of `other` to the front of `chain`, leaving `other` empty.
    pub fn prepend(&mut self, chain: &mut Chain, other: &mut Chain) {
        let mut taken = std::mem::take(other);
        self.append(&mut taken, chain);
        *chain = taken;
    }

    pub fn iter(&self, chain: Chain) -> Iter<'_> {
        Iter {
            arena: self,
            cursor: chain.head,
            tail: chain.tail,
        }
    }
}

pub struct Iter<'a> {
    arena: &'a InstructionArena,
    cursor: Option<InstrId>,
    tail: Option<InstrId>,
}

impl<'a> Iterator for Iter<'a> {
    type Item = (InstrId, &'a Instruction);

    fn next(&mut self) -> Option<Self::Item> {
        let id = self.cursor?;
        self.cursor = if Some(id) == self.tail {
            None
        } else {
            self.arena.next(id)
        };
        Some((id, self.arena.get(id)))
    }
}
