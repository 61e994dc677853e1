use super::*;

#[test]
fn equal() {
    assert_eq!(eval_int_op(Opcode::Eq, 5, 5), Variable::Int(1));
}

#[test]
fn not_equal() {
    assert_eq!(eval_int_op(Opcode::Eq, 5, 6), Variable::Int(0));
}

#[test]
fn rejects_float_operands() {
    assert_eq!(
        eval_op_error(Opcode::Eq, Variable::Float(5.0), Variable::Float(5.0)),
        ErrorKind::TypeMismatch
    );
}
