use super::*;

fn eval_not(cell: Variable) -> Variable {
    let (mut m, _) = machine(
        &[instr!(LoadData, 0), instr!(Not), instr!(Halt)],
        &[cell],
        &[],
    );
    run(&mut m).unwrap();
    // Not rewrites the top cell in place, so the stack height is unchanged.
    assert_eq!(m.stack_pointer(), m.stack_base_pointer() - 8);
    top_cell(&m)
}

#[test]
fn zero_becomes_one() {
    assert_eq!(eval_not(Variable::Int(0)), Variable::Int(1));
}

#[test]
fn nonzero_becomes_zero() {
    assert_eq!(eval_not(Variable::Int(7)), Variable::Int(0));
}

#[test]
fn accepts_bool_operands() {
    assert_eq!(eval_not(Variable::Bool(false)), Variable::Int(1));
}

#[test]
fn rejects_string_operands() {
    let (mut m, _) = machine(
        &[instr!(LoadData, 0), instr!(Not), instr!(Halt)],
        &[Variable::Str(8)],
        &[b'x', 0],
    );
    assert_eq!(run(&mut m).unwrap_err().kind, ErrorKind::TypeMismatch);
}

#[test]
fn leaves_the_named_variable_alone() {
    // x = 3; !x — the frame slot keeps its value, only the operand changes.
    let (mut m, _) = machine(
        &[
            instr!(AddStack, -8),
            instr!(LoadVar, -8),
            instr!(LoadData, 0),
            instr!(Set),
            instr!(LoadVar, -8),
            instr!(Not),
            instr!(Halt),
        ],
        &[Variable::Int(3)],
        &[],
    );
    run(&mut m).unwrap();
    assert_eq!(top_cell(&m), Variable::Int(0));
    assert_eq!(cell_at(&m, m.stack_base_pointer() - 8), Variable::Int(3));
}
