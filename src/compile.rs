use crate::entry::*;
use crate::error::*;
use crate::lex::*;
use crate::prelude::Xstr;
use crate::stack::Stack;
use crate::state::State;
use crate::vm::jump_target;

/// Assembles one line into an anonymous word, `None` for a blank line.
///
/// Every token takes exactly one slot, so token indices and positions in
/// the word are the same thing; IF/ELSE/END offsets and hand written
/// `BRANCH<N>` offsets rely on it. Literals and branches created here are
/// registered in the dictionary and stay there even if a later token fails.
pub fn compile_line(xs: &mut State, line: &str) -> Xresult1<Option<Word>> {
    let toks = tokenize(line, xs.config().name_len)?;
    if toks.is_empty() {
        return Ok(None);
    }
    let mut code: Vec<EntryRef> = Vec::with_capacity(toks.len());
    let mut flow: Stack<usize> = Stack::new(toks.len());
    for (t, tok) in toks.iter().enumerate() {
        let r = match tok.tok() {
            Tok::Branch(offs) => xs.dict_mut().register(Entry::Branch(offs)),
            Tok::ZBranch(offs) => xs.dict_mut().register(Entry::ZBranch(offs)),
            Tok::If => {
                flow.push(t)?;
                xs.dict_mut().register(Entry::ZBranch(0))
            }
            Tok::Else => {
                let if_org = pop_flow(&mut flow, t)?;
                backpatch_jump(xs, &code, if_org, t)?;
                flow.push(t)?;
                xs.dict_mut().register(Entry::Branch(0))
            }
            Tok::End => {
                let org = pop_flow(&mut flow, t)?;
                backpatch_jump(xs, &code, org, t)?;
                xs.nop()
            }
            Tok::Word(name) => resolve_word(xs, t, name)?,
        };
        code.push(r);
    }
    if !flow.is_empty() {
        return Err(Xerr::DanglingIf(toks.len()));
    }
    let word = Word::anonymous(code);
    check_jumps(xs, &word)?;
    tracing::debug!(tokens = toks.len(), len = word.len(), "compiled line");
    Ok(Some(word))
}

fn pop_flow(flow: &mut Stack<usize>, t: usize) -> Xresult1<usize> {
    flow.pop().map_err(|_| Xerr::UnmatchedElseOrEnd(t))
}

fn resolve_word(xs: &mut State, index: usize, name: &str) -> Xresult1<EntryRef> {
    if let Some(r) = xs.dict().lookup(name) {
        return Ok(r);
    }
    match parse_literal(name) {
        Some(n) => Ok(xs.dict_mut().register(Entry::Literal(n))),
        None => Err(Xerr::UnresolvedSymbol {
            index,
            name: Xstr::from(name),
        }),
    }
}

fn backpatch_jump(xs: &mut State, code: &[EntryRef], at: usize, dest: usize) -> Xresult {
    let r = code[at];
    if xs.dict_mut().entry_mut(r)?.set_branch_offset(jump_offset(at, dest)) {
        OK
    } else {
        Err(Xerr::InvalidEntry(r))
    }
}

fn jump_offset(origin: usize, dest: usize) -> isize {
    if origin > dest {
        -((origin - dest) as isize)
    } else {
        (dest - origin) as isize
    }
}

/// Every branch must land inside the word or exactly at its end.
pub fn check_jumps(xs: &State, word: &Word) -> Xresult {
    for (ip, r) in word.body().iter().enumerate() {
        if let Some(offs) = xs.dict().entry(*r)?.branch_offset() {
            jump_target(ip, offs, word.len())?;
        }
    }
    OK
}

#[cfg(test)]
mod tests {
    use super::*;

    fn offsets(xs: &State, word: &Word) -> Vec<Option<isize>> {
        word.body()
            .iter()
            .map(|r| xs.dict().entry(*r).unwrap().branch_offset())
            .collect()
    }

    #[test]
    fn test_jump_offset() {
        assert_eq!(2, jump_offset(2, 4));
        assert_eq!(-2, jump_offset(4, 2));
    }

    #[test]
    fn test_if_flow() {
        let mut xs = State::boot().unwrap();
        let w = compile_line(&mut xs, "1 IF 222 END").unwrap().unwrap();
        assert_eq!(vec![None, Some(2), None, None], offsets(&xs, &w));
        assert_eq!(xs.nop(), w.body()[3]);
        let w = compile_line(&mut xs, "1 IF 222 ELSE 333 END").unwrap().unwrap();
        assert_eq!(
            vec![None, Some(2), None, Some(2), None, None],
            offsets(&xs, &w)
        );
        assert_eq!(Ok(&Entry::ZBranch(2)), xs.dict().entry(w.body()[1]));
        assert_eq!(Ok(&Entry::Branch(2)), xs.dict().entry(w.body()[3]));
    }

    #[test]
    fn test_nested_if_offsets() {
        let mut xs = State::boot().unwrap();
        let w = compile_line(&mut xs, "IF IF 1 ELSE 2 END ELSE 3 END")
            .unwrap()
            .unwrap();
        assert_eq!(
            vec![
                Some(6),
                Some(2),
                None,
                Some(2),
                None,
                None,
                Some(2),
                None,
                None
            ],
            offsets(&xs, &w)
        );
    }

    #[test]
    fn test_flow_errors() {
        let mut xs = State::boot().unwrap();
        assert_eq!(
            Err(Xerr::UnmatchedElseOrEnd(0)),
            compile_line(&mut xs, "END")
        );
        assert_eq!(
            Err(Xerr::UnmatchedElseOrEnd(1)),
            compile_line(&mut xs, "1 ELSE 2 END")
        );
        assert_eq!(
            Err(Xerr::UnmatchedElseOrEnd(3)),
            compile_line(&mut xs, "IF 1 END END")
        );
        assert_eq!(Err(Xerr::DanglingIf(2)), compile_line(&mut xs, "IF 1"));
        assert_eq!(
            Err(Xerr::DanglingIf(4)),
            compile_line(&mut xs, "IF 1 ELSE 2")
        );
        assert_eq!(
            Err(Xerr::DanglingIf(5)),
            compile_line(&mut xs, "IF IF 1 ELSE END")
        );
    }

    #[test]
    fn test_unresolved() {
        let mut xs = State::boot().unwrap();
        let res = compile_line(&mut xs, "1 2 frob 3");
        assert_eq!(
            Err(Xerr::UnresolvedSymbol {
                index: 2,
                name: Xstr::from("frob")
            }),
            res
        );
    }

    #[test]
    fn test_no_rollback() {
        let mut xs = State::boot().unwrap();
        let before = xs.dict().len();
        assert!(compile_line(&mut xs, "1 IF 2 frob").is_err());
        // literal 1, placeholder branch, literal 2
        assert_eq!(before + 3, xs.dict().len());
        assert_eq!(None, xs.dict().lookup("1"));
    }

    #[test]
    fn test_blank_line() {
        let mut xs = State::boot().unwrap();
        let before = xs.dict().len();
        assert_eq!(Ok(None), compile_line(&mut xs, "   "));
        assert_eq!(before, xs.dict().len());
    }

    #[test]
    fn test_direct_branches() {
        let mut xs = State::boot().unwrap();
        let w = compile_line(&mut xs, "BRANCH1 1 2").unwrap().unwrap();
        assert_eq!(vec![Some(1), None, None], offsets(&xs, &w));
        let w = compile_line(&mut xs, "1 ZBRANCH-2").unwrap().unwrap();
        assert_eq!(vec![None, Some(-2)], offsets(&xs, &w));
        // lands exactly past the last slot
        assert!(compile_line(&mut xs, "BRANCH2 1 2").is_ok());
        assert_eq!(
            Err(Xerr::JumpOutOfBounds {
                index: 0,
                target: 4
            }),
            compile_line(&mut xs, "BRANCH3 1 2")
        );
        assert_eq!(
            Err(Xerr::JumpOutOfBounds {
                index: 1,
                target: -1
            }),
            compile_line(&mut xs, "1 BRANCH-3")
        );
    }

    #[test]
    fn test_extreme_branch_offsets() {
        let mut xs = State::boot().unwrap();
        let max = isize::MAX;
        let min = isize::MIN;
        for prefix in &["BRANCH", "ZBRANCH"] {
            let res = compile_line(&mut xs, &format!("{}{}", prefix, max));
            assert_eq!(
                Err(Xerr::JumpOutOfBounds {
                    index: 0,
                    target: max
                }),
                res
            );
            let res = compile_line(&mut xs, &format!("1 {}{}", prefix, max - 1));
            assert_eq!(
                Err(Xerr::JumpOutOfBounds {
                    index: 1,
                    target: max
                }),
                res
            );
            let res = compile_line(&mut xs, &format!("{}{}", prefix, min));
            assert_eq!(
                Err(Xerr::JumpOutOfBounds {
                    index: 0,
                    target: min + 1
                }),
                res
            );
            let res = compile_line(&mut xs, &format!("1 {}{}", prefix, min));
            assert_eq!(
                Err(Xerr::JumpOutOfBounds {
                    index: 1,
                    target: min + 2
                }),
                res
            );
        }
    }

    #[test]
    fn test_keywords_shadow_dictionary() {
        let mut xs = State::boot().unwrap();
        xs.defword("IF", |xs, _| xs.push_data(7)).unwrap();
        assert_eq!(Err(Xerr::DanglingIf(1)), compile_line(&mut xs, "IF"));
    }

    #[test]
    fn test_names_shadow_literals() {
        let mut xs = State::boot().unwrap();
        let five = xs.defword("5", |xs, _| xs.push_data(6)).unwrap();
        let w = compile_line(&mut xs, "5").unwrap().unwrap();
        assert_eq!(&[five], w.body());
    }
}
