use super::*;

#[test]
fn reserves_zeroed_slots() {
    let (mut m, _) = machine(&[instr!(AddStack, -16), instr!(Halt)], &[], &[]);
    run(&mut m).unwrap();

    assert_eq!(m.stack_pointer(), m.stack_base_pointer() - 16);
    assert_eq!(top_cell(&m), Variable::Int(0));
    assert_eq!(cell_at(&m, m.stack_pointer() + 8), Variable::Int(0));
}

#[test]
fn releases_part_of_the_frame() {
    let (mut m, _) = machine(
        &[instr!(AddStack, -16), instr!(AddStack, 8), instr!(Halt)],
        &[],
        &[],
    );
    run(&mut m).unwrap();
    assert_eq!(m.stack_pointer(), m.stack_base_pointer() - 8);
}

#[test]
fn growing_past_the_heap_fails() {
    let (mut m, _) = machine_sized(&[instr!(AddStack, -4096), instr!(Halt)], &[], &[], 64);
    assert_eq!(m.step().unwrap_err().kind, ErrorKind::Overflow);
}

#[test]
fn releasing_past_the_stack_base_fails() {
    // Returning the pointer to the very end of memory counts as out of
    // bounds; the frame can only shrink strictly inside it.
    let (mut m, _) = machine(
        &[instr!(AddStack, -8), instr!(AddStack, 8), instr!(Halt)],
        &[],
        &[],
    );
    m.step().unwrap();
    assert_eq!(m.step().unwrap_err().kind, ErrorKind::Overflow);
}
