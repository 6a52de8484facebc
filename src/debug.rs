use crate::entry::*;
use crate::error::*;
use crate::prelude::Xstr;
use crate::state::State;
use crate::vm::branch_dest;

use std::fmt::Write;

pub fn fmt_entry(xs: &State, ip: usize, r: EntryRef) -> Xresult1<String> {
    let s = match xs.dict().entry(r)? {
        Entry::Literal(n) => format!("lit     {}", n),
        Entry::Primitive { name, .. } => format!("prim    {}", name),
        Entry::Compound(w) => format!("call    {}", w.name()),
        Entry::Branch(offs) => format!("branch  {:+} -> {}", offs, branch_dest(ip, *offs)),
        Entry::ZBranch(offs) => format!("zbranch {:+} -> {}", offs, branch_dest(ip, *offs)),
    };
    Ok(s)
}

/// One numbered line per slot.
pub fn fmt_word(xs: &State, word: &Word) -> Xresult1<String> {
    let mut buf = String::new();
    for (ip, r) in word.body().iter().enumerate() {
        let s = fmt_entry(xs, ip, *r)?;
        // writing into a String never fails
        let _ = writeln!(buf, "{:4} {}", ip, s);
    }
    Ok(buf)
}

impl State {
    pub fn see(&self, name: &str) -> Xresult1<String> {
        let r = self
            .lookup(name)
            .ok_or_else(|| Xerr::UnknownWord(Xstr::from(name)))?;
        match self.dict().entry(r)? {
            Entry::Compound(w) => fmt_word(self, w),
            _ => Ok(format!("{}\n", fmt_entry(self, 0, r)?)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::arith;

    #[test]
    fn test_fmt_word() {
        let mut xs = State::boot().unwrap();
        arith::load(&mut xs).unwrap();
        xs.define("SQ", "DUP MUL").unwrap();
        let w = xs.compile("5 IF SQ ELSE 0 END").unwrap().unwrap();
        let lines: Vec<String> = fmt_word(&xs, &w)
            .unwrap()
            .lines()
            .map(|s| s.to_string())
            .collect();
        assert_eq!(lines[0], "   0 lit     5");
        assert_eq!(lines[1], "   1 zbranch +2 -> 4");
        assert_eq!(lines[2], "   2 call    SQ");
        assert_eq!(lines[3], "   3 branch  +2 -> 6");
        assert_eq!(lines[4], "   4 lit     0");
        assert_eq!(lines[5], "   5 prim    NOP");
    }

    #[test]
    fn test_fmt_wild_branch() {
        let mut xs = State::boot().unwrap();
        let far = xs.dict_mut().register(Entry::Branch(isize::MAX));
        let back = xs.dict_mut().register(Entry::ZBranch(isize::MIN));
        let w = Word::anonymous(vec![far, back]);
        assert_eq!(
            Ok(format!(
                "   0 branch  +{} -> {}\n   1 zbranch {} -> {}\n",
                isize::MAX,
                isize::MAX,
                isize::MIN,
                isize::MIN + 2
            )),
            fmt_word(&xs, &w)
        );
    }

    #[test]
    fn test_see() {
        let mut xs = State::boot().unwrap();
        arith::load(&mut xs).unwrap();
        xs.define("SQ", "DUP MUL").unwrap();
        assert_eq!(Ok("   0 prim    DUP\n   1 prim    MUL\n".to_string()), xs.see("SQ"));
        assert_eq!(Ok("prim    ADD\n".to_string()), xs.see("ADD"));
        assert_eq!(
            Err(Xerr::UnknownWord(Xstr::from("nothing"))),
            xs.see("nothing")
        );
    }
}
