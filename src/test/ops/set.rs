use super::*;

#[test]
fn stores_into_the_frame_slot() {
    let (mut m, _) = machine(
        &[
            instr!(AddStack, -8),
            instr!(LoadVar, -8),
            instr!(LoadData, 0),
            instr!(Set),
            instr!(Halt),
        ],
        &[Variable::Int(99)],
        &[],
    );
    run(&mut m).unwrap();
    assert_eq!(cell_at(&m, m.stack_base_pointer() - 8), Variable::Int(99));
    // Both operands are consumed.
    assert_eq!(m.stack_pointer(), m.stack_base_pointer() - 8);
}

#[test]
fn source_side_may_be_a_variable() {
    // x = 5; y = x
    let (mut m, _) = machine(
        &[
            instr!(AddStack, -16),
            instr!(LoadVar, -8),
            instr!(LoadData, 0),
            instr!(Set),
            instr!(LoadVar, -16),
            instr!(LoadVar, -8),
            instr!(Set),
            instr!(Halt),
        ],
        &[Variable::Int(5)],
        &[],
    );
    run(&mut m).unwrap();
    assert_eq!(cell_at(&m, m.stack_base_pointer() - 16), Variable::Int(5));
}

#[test]
fn assigning_into_a_constant_fails() {
    let (mut m, _) = machine(
        &[
            instr!(LoadData, 0),
            instr!(LoadData, 0),
            instr!(Set),
            instr!(Halt),
        ],
        &[Variable::Int(1)],
        &[],
    );
    assert_eq!(run(&mut m).unwrap_err().kind, ErrorKind::ConstSet);
}
