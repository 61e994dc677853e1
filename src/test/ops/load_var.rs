use super::*;

#[test]
fn pushes_the_offset_form() {
    let (mut m, _) = machine(
        &[instr!(AddStack, -8), instr!(LoadVar, -8), instr!(Halt)],
        &[],
        &[],
    );
    run(&mut m).unwrap();
    // The L-value stays an offset until an operation dereferences it.
    assert_eq!(top_cell(&m), Variable::Offset(-8));
}

#[test]
fn fresh_slots_read_as_zero() {
    let (mut m, _) = machine(
        &[
            instr!(AddStack, -8),
            instr!(LoadVar, -8),
            instr!(LoadData, 0),
            instr!(Add),
            instr!(Halt),
        ],
        &[Variable::Int(5)],
        &[],
    );
    run(&mut m).unwrap();
    assert_eq!(top_cell(&m), Variable::Int(5));
}
