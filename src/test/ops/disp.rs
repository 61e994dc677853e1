use super::*;

#[test]
fn prints_integers_in_decimal() {
    let (mut m, out) = machine(
        &[instr!(LoadData, 0), instr!(Disp), instr!(Halt)],
        &[Variable::Int(-42)],
        &[],
    );
    run(&mut m).unwrap();
    assert_eq!(out.contents(), "-42");
}

#[test]
fn prints_strings_and_translates_newlines() {
    let (mut m, out) = machine(
        &[instr!(LoadData, 0), instr!(Disp), instr!(Halt)],
        &[Variable::Str(8)],
        b"Hello\\nWorld\0",
    );
    run(&mut m).unwrap();
    assert_eq!(out.contents(), "Hello\nWorld");
}

#[test]
fn prints_a_named_variable() {
    let (mut m, out) = machine(
        &[
            instr!(AddStack, -8),
            instr!(LoadVar, -8),
            instr!(LoadData, 0),
            instr!(Set),
            instr!(LoadVar, -8),
            instr!(Disp),
            instr!(Halt),
        ],
        &[Variable::Int(14)],
        &[],
    );
    run(&mut m).unwrap();
    assert_eq!(out.contents(), "14");
}

#[test]
fn floats_and_bools_are_rejected() {
    for cell in [Variable::Float(1.0), Variable::Bool(true)].iter() {
        let (mut m, _) = machine(
            &[instr!(LoadData, 0), instr!(Disp), instr!(Halt)],
            &[*cell],
            &[],
        );
        assert_eq!(run(&mut m).unwrap_err().kind, ErrorKind::TypeMismatch);
    }
}
