use super::*;

#[test]
fn truth_table() {
    assert_eq!(eval_int_op(Opcode::And, 1, 1), Variable::Int(1));
    assert_eq!(eval_int_op(Opcode::And, 1, 0), Variable::Int(0));
    assert_eq!(eval_int_op(Opcode::And, 0, 1), Variable::Int(0));
    assert_eq!(eval_int_op(Opcode::And, 0, 0), Variable::Int(0));
}

#[test]
fn any_nonzero_is_true() {
    assert_eq!(eval_int_op(Opcode::And, -3, 7), Variable::Int(1));
}

#[test]
fn accepts_bool_operands() {
    let (mut m, _) = machine(
        &[
            instr!(LoadData, 0),
            instr!(LoadData, 8),
            instr!(And),
            instr!(Halt),
        ],
        &[Variable::Bool(true), Variable::Bool(true)],
        &[],
    );
    run(&mut m).unwrap();
    assert_eq!(top_cell(&m), Variable::Int(1));
}

#[test]
fn rejects_string_operands() {
    assert_eq!(
        eval_op_error(Opcode::And, Variable::Str(0), Variable::Int(1)),
        ErrorKind::TypeMismatch
    );
}
