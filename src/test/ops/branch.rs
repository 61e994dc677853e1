use super::*;

fn run_branch(cond: Variable) -> String {
    let (mut m, out) = machine(
        &[
            instr!(LoadData, 0),
            instr!(If, 3),
            instr!(LoadData, 8),
            instr!(Disp),
            instr!(Halt),
        ],
        &[cond, Variable::Int(7)],
        &[],
    );
    run(&mut m).unwrap();
    out.contents()
}

#[test]
fn false_condition_jumps_past_the_block() {
    assert_eq!(run_branch(Variable::Int(0)), "");
}

#[test]
fn true_condition_falls_through() {
    assert_eq!(run_branch(Variable::Int(1)), "7");
}

#[test]
fn float_and_bool_conditions_are_accepted() {
    assert_eq!(run_branch(Variable::Float(0.0)), "");
    assert_eq!(run_branch(Variable::Float(1.5)), "7");
    assert_eq!(run_branch(Variable::Bool(false)), "");
    assert_eq!(run_branch(Variable::Bool(true)), "7");
}

#[test]
fn string_conditions_are_rejected() {
    let (mut m, _) = machine(
        &[instr!(LoadData, 0), instr!(If, 2), instr!(Halt)],
        &[Variable::Str(8)],
        &[b'x', 0],
    );
    assert_eq!(run(&mut m).unwrap_err().kind, ErrorKind::TypeMismatch);
}

#[test]
fn condition_is_consumed() {
    let (mut m, _) = machine(
        &[instr!(LoadData, 0), instr!(If, 2), instr!(Halt)],
        &[Variable::Int(1)],
        &[],
    );
    run(&mut m).unwrap();
    assert_eq!(m.stack_pointer(), m.stack_base_pointer());
}
