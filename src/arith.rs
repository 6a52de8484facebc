//! A standard set of primitives for hosts that don't bring their own.
//! Truth values are `1` and `0`.

use crate::entry::EntryRef;
use crate::error::*;
use crate::prelude::Xint;
use crate::state::*;

fn arithmetic_ops_int(xs: &mut State, ops_int: fn(Xint, Xint) -> Xint) -> Xresult {
    let b = xs.pop_data()?;
    let a = xs.pop_data()?;
    xs.push_data(ops_int(a, b))
}

fn division_ops_int(xs: &mut State, ops_int: fn(Xint, Xint) -> Xint) -> Xresult {
    let b = xs.pop_data()?;
    let a = xs.pop_data()?;
    if b == 0 {
        return Err(Xerr::DivisionByZero);
    }
    xs.push_data(ops_int(a, b))
}

fn compare_ops_int(xs: &mut State, ops_cmp: fn(&Xint, &Xint) -> bool) -> Xresult {
    let b = xs.pop_data()?;
    let a = xs.pop_data()?;
    xs.push_data(ops_cmp(&a, &b) as Xint)
}

pub fn core_word_add(xs: &mut State, _: EntryRef) -> Xresult {
    arithmetic_ops_int(xs, Xint::wrapping_add)
}

pub fn core_word_sub(xs: &mut State, _: EntryRef) -> Xresult {
    arithmetic_ops_int(xs, Xint::wrapping_sub)
}

pub fn core_word_mul(xs: &mut State, _: EntryRef) -> Xresult {
    arithmetic_ops_int(xs, Xint::wrapping_mul)
}

pub fn core_word_div(xs: &mut State, _: EntryRef) -> Xresult {
    division_ops_int(xs, Xint::wrapping_div)
}

pub fn core_word_rem(xs: &mut State, _: EntryRef) -> Xresult {
    division_ops_int(xs, Xint::wrapping_rem)
}

pub fn core_word_neg(xs: &mut State, _: EntryRef) -> Xresult {
    let a = xs.pop_data()?;
    xs.push_data(a.wrapping_neg())
}

pub fn core_word_eq(xs: &mut State, _: EntryRef) -> Xresult {
    compare_ops_int(xs, Xint::eq)
}

pub fn core_word_lt(xs: &mut State, _: EntryRef) -> Xresult {
    compare_ops_int(xs, Xint::lt)
}

pub fn core_word_gt(xs: &mut State, _: EntryRef) -> Xresult {
    compare_ops_int(xs, Xint::gt)
}

pub fn core_word_not(xs: &mut State, _: EntryRef) -> Xresult {
    let a = xs.pop_data()?;
    xs.push_data((a == 0) as Xint)
}

pub fn core_word_dup(xs: &mut State, _: EntryRef) -> Xresult {
    let a = xs.top_data().ok_or(Xerr::StackUnderflow)?;
    xs.push_data(a)
}

pub fn core_word_drop(xs: &mut State, _: EntryRef) -> Xresult {
    xs.pop_data()?;
    OK
}

pub fn core_word_swap(xs: &mut State, _: EntryRef) -> Xresult {
    let b = xs.pop_data()?;
    let a = xs.pop_data()?;
    xs.push_data(b)?;
    xs.push_data(a)
}

pub fn core_word_over(xs: &mut State, _: EntryRef) -> Xresult {
    let a = xs.get_data(1).ok_or(Xerr::StackUnderflow)?;
    xs.push_data(a)
}

pub fn core_word_display_top(xs: &mut State, _: EntryRef) -> Xresult {
    let a = xs.pop_data()?;
    xs.print(&format!("{} ", a));
    OK
}

pub fn core_word_display_stack(xs: &mut State, _: EntryRef) -> Xresult {
    let mut s = format!("<{}>", xs.data_depth());
    for a in xs.data_stack() {
        s.push_str(&format!(" {}", a));
    }
    s.push('\n');
    xs.print(&s);
    OK
}

pub fn load(xs: &mut State) -> Xresult {
    xs.defword("ADD", core_word_add)?;
    xs.defword("SUB", core_word_sub)?;
    xs.defword("MUL", core_word_mul)?;
    xs.defword("DIV", core_word_div)?;
    xs.defword("MOD", core_word_rem)?;
    xs.defword("NEG", core_word_neg)?;
    xs.defword("=", core_word_eq)?;
    xs.defword("<", core_word_lt)?;
    xs.defword(">", core_word_gt)?;
    xs.defword("NOT", core_word_not)?;
    xs.defword("DUP", core_word_dup)?;
    xs.defword("DROP", core_word_drop)?;
    xs.defword("SWAP", core_word_swap)?;
    xs.defword("OVER", core_word_over)?;
    xs.defword(".", core_word_display_top)?;
    xs.defword(".S", core_word_display_stack)?;
    OK
}

#[cfg(test)]
mod tests {
    use super::*;

    fn boot() -> State {
        let mut xs = State::boot().unwrap();
        load(&mut xs).unwrap();
        xs
    }

    #[test]
    fn test_arith() {
        let mut xs = boot();
        xs.eval("7 2 SUB 3 MUL 4 DIV 3 MOD").unwrap();
        assert_eq!(vec![0], xs.data_stack().to_vec());
        let mut xs = boot();
        xs.eval("-7 2 DIV 5 NEG").unwrap();
        assert_eq!(vec![-3, -5], xs.data_stack().to_vec());
        let mut xs = boot();
        assert_eq!(Err(Xerr::DivisionByZero), xs.eval("1 0 DIV"));
        assert_eq!(Err(Xerr::DivisionByZero), xs.eval("1 0 MOD"));
        let mut xs = boot();
        let line = format!("{} 1 ADD", Xint::MAX);
        xs.eval(&line).unwrap();
        assert_eq!(Some(Xint::MIN), xs.top_data());
    }

    #[test]
    fn test_compare() {
        let mut xs = boot();
        xs.eval("1 2 < 1 2 > 3 3 = 0 NOT 5 NOT").unwrap();
        assert_eq!(vec![1, 0, 1, 1, 0], xs.data_stack().to_vec());
    }

    #[test]
    fn test_data_stack() {
        let mut xs = boot();
        xs.eval("1 2 DUP").unwrap();
        assert_eq!(vec![1, 2, 2], xs.data_stack().to_vec());
        xs.eval("DROP SWAP").unwrap();
        assert_eq!(vec![2, 1], xs.data_stack().to_vec());
        xs.eval("OVER").unwrap();
        assert_eq!(vec![2, 1, 2], xs.data_stack().to_vec());
        let mut xs = boot();
        assert_eq!(Err(Xerr::StackUnderflow), xs.eval("DUP"));
        assert_eq!(Err(Xerr::StackUnderflow), xs.eval("DROP"));
        assert_eq!(Err(Xerr::StackUnderflow), xs.eval("1 SWAP"));
        xs.clear_data();
        assert_eq!(Err(Xerr::StackUnderflow), xs.eval("1 OVER"));
    }

    #[test]
    fn test_display() {
        let mut xs = boot();
        xs.capture_stdout();
        xs.eval("1 2 3 .S . .").unwrap();
        assert_eq!(Some(&mut String::from("<3> 1 2 3\n3 2 ")), xs.console());
        assert_eq!(vec![1], xs.data_stack().to_vec());
    }
}
