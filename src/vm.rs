use crate::entry::*;
use crate::error::*;
use crate::state::State;

/// Inner interpreter. Walks `word` and recurses into nested compounds,
/// `depth` counts the compounds already on the call path.
pub fn run_word(xs: &mut State, word: &Word, depth: usize) -> Xresult {
    if depth > xs.config().max_depth {
        return Err(Xerr::RecursionLimitExceeded(depth));
    }
    let body = word.body();
    let len = body.len();
    let mut ip = 0;
    while ip < len {
        let r = body[ip];
        let entry = xs.dict().entry(r)?.clone();
        tracing::trace!(ip, depth, ?entry, "next");
        match entry {
            Entry::Literal(n) => xs.push_data(n)?,
            Entry::Primitive { xf, .. } => (xf.0)(xs, r)?,
            Entry::Compound(w) => run_word(xs, &w, depth + 1)?,
            Entry::Branch(offs) => {
                ip = jump_target(ip, offs, len)?;
                continue;
            }
            Entry::ZBranch(offs) => {
                if xs.pop_data()? == 0 {
                    ip = jump_target(ip, offs, len)?;
                    continue;
                }
            }
        }
        ip += 1;
    }
    OK
}

/// Where a branch at `ip` goes: one past the slot `offs` away.
/// `len` itself is a valid target and ends the word.
pub fn jump_target(ip: usize, offs: isize, len: usize) -> Xresult1<usize> {
    let target = branch_dest(ip, offs);
    if target < 0 || target > len as isize {
        Err(Xerr::JumpOutOfBounds { index: ip, target })
    } else {
        tracing::trace!(ip, target, "jump");
        Ok(target as usize)
    }
}

/// `ip + offs + 1`, saturated. A saturated value is never a valid target.
pub(crate) fn branch_dest(ip: usize, offs: isize) -> isize {
    (ip as isize).saturating_add(offs).saturating_add(1)
}
