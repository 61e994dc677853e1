use super::*;
use crate::Interrupt;

#[test]
fn pushes_the_first_byte() {
    let (mut m, out) = machine(&[instr!(GetKey), instr!(Disp), instr!(Halt)], &[], &[]);

    assert_eq!(m.step().unwrap(), Interrupt::GetKey);
    m.release_interrupt("A");
    run(&mut m).unwrap();

    assert_eq!(out.contents(), "65");
}

#[test]
fn empty_input_reads_as_zero() {
    let (mut m, out) = machine(&[instr!(GetKey), instr!(Disp), instr!(Halt)], &[], &[]);

    m.step().unwrap();
    m.release_interrupt("");
    run(&mut m).unwrap();

    assert_eq!(out.contents(), "0");
}
