use super::*;

#[test]
fn writes_one_pixel() {
    // output(3, 2, 1): x, y, color pushed left to right.
    let (mut m, _) = machine(
        &[
            instr!(LoadData, 0),
            instr!(LoadData, 8),
            instr!(LoadData, 16),
            instr!(Output),
            instr!(Halt),
        ],
        &[Variable::Int(3), Variable::Int(2), Variable::Int(1)],
        &[],
    );
    run(&mut m).unwrap();

    let index = 2 * m.screen_width() + 3;
    assert_eq!(m.screen()[index], 1);
    assert_eq!(m.screen().iter().filter(|&&b| b != 0).count(), 1);
    assert_eq!(m.stack_pointer(), m.stack_base_pointer());
}

#[test]
fn out_of_bounds_coordinates_fail() {
    for (x, y) in [(-1, 0), (16, 0), (0, -1), (0, 16)].iter() {
        let (mut m, _) = machine(
            &[
                instr!(LoadData, 0),
                instr!(LoadData, 8),
                instr!(LoadData, 16),
                instr!(Output),
                instr!(Halt),
            ],
            &[Variable::Int(*x), Variable::Int(*y), Variable::Int(1)],
            &[],
        );
        assert_eq!(run(&mut m).unwrap_err().kind, ErrorKind::Overflow);
    }
}

#[test]
fn non_int_arguments_fail() {
    let (mut m, _) = machine(
        &[
            instr!(LoadData, 0),
            instr!(LoadData, 8),
            instr!(LoadData, 16),
            instr!(Output),
            instr!(Halt),
        ],
        &[Variable::Int(0), Variable::Float(1.0), Variable::Int(1)],
        &[],
    );
    assert_eq!(run(&mut m).unwrap_err().kind, ErrorKind::TypeMismatch);
}
