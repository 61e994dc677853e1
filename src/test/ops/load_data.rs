use super::*;

#[test]
fn pushes_a_copy_of_the_data_cell() {
    let (mut m, _) = machine(
        &[instr!(LoadData, 8), instr!(Halt)],
        &[Variable::Int(1), Variable::Int(2)],
        &[],
    );
    run(&mut m).unwrap();
    assert_eq!(top_cell(&m), Variable::Int(2));
}

#[test]
fn stack_collides_with_the_heap() {
    // Memory leaves room for exactly one stack cell.
    let instructions = [instr!(LoadData, 0), instr!(LoadData, 0), instr!(Halt)];
    let (mut m, _) = machine_sized(&instructions, &[Variable::Int(1)], &[], 40);

    m.step().unwrap();
    assert_eq!(m.step().unwrap_err().kind, ErrorKind::Overflow);
}

#[test]
fn offset_outside_the_image_fails() {
    let (mut m, _) = machine(&[instr!(LoadData, -64), instr!(Halt)], &[], &[]);
    assert_eq!(m.step().unwrap_err().kind, ErrorKind::Overflow);
}
