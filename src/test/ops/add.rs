use super::*;

#[test]
fn int_operands() {
    assert_eq!(eval_int_op(Opcode::Add, 23, 34), Variable::Int(57));
}

#[test]
fn wraps_on_overflow() {
    assert_eq!(
        eval_int_op(Opcode::Add, i32::max_value(), 1),
        Variable::Int(i32::min_value())
    );
}

#[test]
fn rejects_float_operands() {
    assert_eq!(
        eval_op_error(Opcode::Add, Variable::Float(1.0), Variable::Int(1)),
        ErrorKind::TypeMismatch
    );
}

#[test]
fn dereferences_frame_slots() {
    // x = 40; x + 2
    let (mut m, _) = machine(
        &[
            instr!(AddStack, -8),
            instr!(LoadVar, -8),
            instr!(LoadData, 0),
            instr!(Set),
            instr!(LoadVar, -8),
            instr!(LoadData, 8),
            instr!(Add),
            instr!(Halt),
        ],
        &[Variable::Int(40), Variable::Int(2)],
        &[],
    );
    run(&mut m).unwrap();
    assert_eq!(top_cell(&m), Variable::Int(42));
}
