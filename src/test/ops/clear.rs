use super::*;

#[test]
fn zeroes_the_whole_screen() {
    let (mut m, _) = machine(
        &[
            instr!(LoadData, 0),
            instr!(LoadData, 0),
            instr!(LoadData, 8),
            instr!(Output),
            instr!(Clear),
            instr!(Halt),
        ],
        &[Variable::Int(1), Variable::Int(3)],
        &[],
    );
    run(&mut m).unwrap();
    assert!(m.screen().iter().all(|&b| b == 0));
}
