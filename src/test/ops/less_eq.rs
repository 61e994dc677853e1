use super::*;

#[test]
fn less() {
    assert_eq!(eval_int_op(Opcode::LessEq, 5, 6), Variable::Int(1));
}

#[test]
fn equal() {
    assert_eq!(eval_int_op(Opcode::LessEq, 5, 5), Variable::Int(1));
}

#[test]
fn greater() {
    assert_eq!(eval_int_op(Opcode::LessEq, 6, 5), Variable::Int(0));
}
