use crate::ir::{InstrId, Instruction};
use crate::list::{Chain, InstructionArena};

fn ids(arena: &InstructionArena, chain: Chain) -> Vec<u32> {
    arena.iter(chain).map(|(id, _)| id.0).collect()
}

fn nops(arena: &mut InstructionArena, n: usize) -> Vec<InstrId> {
    (0..n).map(|_| arena.alloc(Instruction::Nop)).collect()
}

#[test]
fn push_front_and_back() {
    let mut arena = InstructionArena::new();
    let n = nops(&mut arena, 3);
    let mut chain = Chain::default();

    arena.push_back(&mut chain, n[1]);
    arena.push_back(&mut chain, n[2]);
    arena.push_front(&mut chain, n[0]);

    assert_eq!(ids(&arena, chain), vec![0, 1, 2]);
    assert_eq!(chain.head(), Some(n[0]));
    assert_eq!(chain.tail(), Some(n[2]));
    assert_eq!(arena.prev(n[1]), Some(n[0]));
}

#[test]
fn insert_around_anchor() {
    let mut arena = InstructionArena::new();
    let n = nops(&mut arena, 4);
    let mut chain = Chain::default();
    arena.push_back(&mut chain, n[0]);

    arena.insert_after(&mut chain, n[0], n[2]);
    arena.insert_before(&mut chain, n[2], n[1]);
    arena.insert_before(&mut chain, n[0], n[3]);

    assert_eq!(ids(&arena, chain), vec![3, 0, 1, 2]);
    assert_eq!(chain.head(), Some(n[3]));
    assert_eq!(chain.tail(), Some(n[2]));
}

#[test]
fn append_moves_whole_chain() {
    let mut arena = InstructionArena::new();
    let n = nops(&mut arena, 4);
    let mut left = Chain::default();
    let mut right = Chain::default();
    arena.push_back(&mut left, n[0]);
    arena.push_back(&mut left, n[1]);
    arena.push_back(&mut right, n[2]);
    arena.push_back(&mut right, n[3]);

    arena.append(&mut left, &mut right);

    assert!(right.is_empty());
    assert_eq!(ids(&arena, left), vec![0, 1, 2, 3]);
    assert_eq!(arena.prev(n[2]), Some(n[1]));
}

#[test]
fn splice_after_middle_node() {
    let mut arena = InstructionArena::new();
    let n = nops(&mut arena, 5);
    let mut body = Chain::default();
    let mut block = Chain::default();
    arena.push_back(&mut body, n[0]);
    arena.push_back(&mut body, n[1]);
    arena.push_back(&mut block, n[2]);
    arena.push_back(&mut block, n[3]);

    arena.splice_after(&mut body, n[0], &mut block);

    assert!(block.is_empty());
    assert_eq!(ids(&arena, body), vec![0, 2, 3, 1]);
    assert_eq!(body.tail(), Some(n[1]));
    assert_eq!(arena.prev(n[1]), Some(n[3]));
}

#[test]
fn prepend_puts_chain_first() {
    let mut arena = InstructionArena::new();
    let n = nops(&mut arena, 3);
    let mut body = Chain::default();
    let mut block = Chain::default();
    arena.push_back(&mut body, n[2]);
    arena.push_back(&mut block, n[0]);
    arena.push_back(&mut block, n[1]);

    arena.prepend(&mut body, &mut block);

    assert!(block.is_empty());
    assert_eq!(ids(&arena, body), vec![0, 1, 2]);
}

#[test]
fn splice_into_empty_operands_is_noop() {
    let mut arena = InstructionArena::new();
    let n = nops(&mut arena, 1);
    let mut body = Chain::default();
    arena.push_back(&mut body, n[0]);

    arena.append(&mut body, &mut Chain::default());
    arena.splice_after(&mut body, n[0], &mut Chain::default());

    assert_eq!(ids(&arena, body), vec![0]);
}

#[test]
#[cfg(debug_assertions)]
#[should_panic(expected = "already linked")]
fn relinking_a_node_panics() {
    let mut arena = InstructionArena::new();
    let n = nops(&mut arena, 1);
    let mut chain = Chain::default();
    arena.push_back(&mut chain, n[0]);
    arena.push_back(&mut chain, n[0]);
}
