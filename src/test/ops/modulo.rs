use super::*;

#[test]
fn int_operands() {
    assert_eq!(eval_int_op(Opcode::Mod, 2096, 37), Variable::Int(24));
}

#[test]
fn follows_the_dividend_sign() {
    assert_eq!(eval_int_op(Opcode::Mod, -7, 2), Variable::Int(-1));
}

#[test]
fn by_zero() {
    assert_eq!(
        eval_op_error(Opcode::Mod, Variable::Int(1), Variable::Int(0)),
        ErrorKind::DivZero
    );
}
