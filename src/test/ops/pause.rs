use super::*;
use crate::Interrupt;

#[test]
fn suspends_until_released() {
    let (mut m, _) = machine(&[instr!(Pause), instr!(Halt)], &[], &[]);

    assert_eq!(m.step().unwrap(), Interrupt::Pause);
    let ticks = m.ticks();

    // Further steps are no-ops while the interrupt is pending.
    assert_eq!(m.step().unwrap(), Interrupt::Pause);
    assert_eq!(m.step().unwrap(), Interrupt::Pause);
    assert_eq!(m.ticks(), ticks);

    m.release_interrupt("ignored");
    run(&mut m).unwrap();
    // Pause discards the input: nothing was pushed.
    assert_eq!(m.stack_pointer(), m.stack_base_pointer());
}
