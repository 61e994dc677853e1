use super::*;

#[test]
fn exec_and_return_are_inert() {
    let (mut m, _) = machine(
        &[instr!(Exec), instr!(Return), instr!(Halt)],
        &[],
        &[],
    );
    run(&mut m).unwrap();
    assert_eq!(m.ticks(), 3);
    assert_eq!(m.stack_pointer(), m.stack_base_pointer());
}
