use crate::entry::EntryRef;
use crate::prelude::Xstr;

use std::fmt;

#[derive(PartialEq, Clone)]
pub enum Xerr {
    // tokenizer
    TokenTooLong { offset: usize },
    // assembler
    UnresolvedSymbol { index: usize, name: Xstr },
    UnmatchedElseOrEnd(usize),
    DanglingIf(usize),
    JumpOutOfBounds { index: usize, target: isize },
    // interpreter
    StackUnderflow,
    StackOverflow,
    RecursionLimitExceeded(usize),
    InvalidEntry(EntryRef),
    // host
    InvalidName(Xstr),
    UnknownWord(Xstr),
    DivisionByZero,
}

impl Xerr {
    /// Integer result code of a failed line, `None` for errors raised while running.
    pub fn code(&self) -> Option<isize> {
        match self {
            Xerr::TokenTooLong { offset } => Some(*offset as isize),
            Xerr::UnresolvedSymbol { index, .. }
            | Xerr::UnmatchedElseOrEnd(index)
            | Xerr::JumpOutOfBounds { index, .. }
            | Xerr::DanglingIf(index) => Some(-(*index as isize + 1)),
            _ => None,
        }
    }
}

impl fmt::Debug for Xerr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Xerr::TokenTooLong { offset } => write!(f, "token too long at offset {}", offset),
            Xerr::UnresolvedSymbol { index, name } => {
                write!(f, "unresolved symbol {} at token {}", name, index)
            }
            Xerr::UnmatchedElseOrEnd(index) => {
                write!(f, "ELSE or END without IF at token {}", index)
            }
            Xerr::DanglingIf(count) => write!(f, "IF without END after {} tokens", count),
            Xerr::JumpOutOfBounds { index, target } => {
                write!(f, "branch at {} lands outside the word ({})", index, target)
            }
            Xerr::StackUnderflow => f.write_str("StackUnderflow"),
            Xerr::StackOverflow => f.write_str("StackOverflow"),
            Xerr::RecursionLimitExceeded(depth) => {
                write!(f, "nesting depth {} exceeds the limit", depth)
            }
            Xerr::InvalidEntry(r) => write!(f, "invalid entry {:?}", r),
            Xerr::InvalidName(name) => write!(f, "invalid name {:?}", name.as_str()),
            Xerr::UnknownWord(name) => write!(f, "unknown word {}", name),
            Xerr::DivisionByZero => f.write_str("division by zero"),
        }
    }
}

pub type Xresult = Xresult1<()>;

pub type Xresult1<T> = Result<T, Xerr>;

pub const OK: Xresult = Ok(());

// tests ---------------------------------------------------------------------

#[test]
fn test_result_codes() {
    assert_eq!(Some(40), Xerr::TokenTooLong { offset: 40 }.code());
    let e = Xerr::UnresolvedSymbol {
        index: 0,
        name: Xstr::from("x"),
    };
    assert_eq!(Some(-1), e.code());
    assert_eq!(Some(-1), Xerr::UnmatchedElseOrEnd(0).code());
    assert_eq!(Some(-3), Xerr::DanglingIf(2).code());
    assert_eq!(None, Xerr::StackUnderflow.code());
    assert_eq!(None, Xerr::RecursionLimitExceeded(3).code());
    assert_eq!(None, Xerr::UnknownWord(Xstr::from("x")).code());
}
