use super::*;

#[test]
fn not_equal() {
    assert_eq!(eval_int_op(Opcode::NotEq, 5, 6), Variable::Int(1));
}

#[test]
fn equal() {
    assert_eq!(eval_int_op(Opcode::NotEq, 5, 5), Variable::Int(0));
}
