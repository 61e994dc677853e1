use super::*;

#[test]
fn less() {
    assert_eq!(eval_int_op(Opcode::Less, 5, 6), Variable::Int(1));
}

#[test]
fn equal_is_not_less() {
    assert_eq!(eval_int_op(Opcode::Less, 5, 5), Variable::Int(0));
}
