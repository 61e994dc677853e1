use super::*;

#[test]
fn records_the_source_line() {
    let (mut m, _) = machine(&[instr!(Nop, 12), instr!(Halt)], &[], &[]);
    assert_eq!(m.current_line(), 1);

    m.step().unwrap();
    assert_eq!(m.current_line(), 12);
}

#[test]
fn costs_a_tick() {
    let (mut m, _) = machine(&[instr!(Nop, 1), instr!(Nop, 2), instr!(Halt)], &[], &[]);
    run(&mut m).unwrap();
    assert_eq!(m.ticks(), 3);
}
