use super::*;

#[test]
fn int_operands() {
    assert_eq!(eval_int_op(Opcode::Mul, 7, 6), Variable::Int(42));
}

#[test]
fn wraps_on_overflow() {
    assert_eq!(
        eval_int_op(Opcode::Mul, i32::max_value(), 2),
        Variable::Int(-2)
    );
}

#[test]
fn rejects_bool_operands() {
    assert_eq!(
        eval_op_error(Opcode::Mul, Variable::Bool(true), Variable::Int(2)),
        ErrorKind::TypeMismatch
    );
}
