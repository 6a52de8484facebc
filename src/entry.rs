use crate::error::Xresult;
use crate::prelude::{Xint, Xstr};
use crate::state::State;

use std::fmt;
use std::rc::Rc;

/// Native callback of a primitive, receives the entry it was invoked through.
pub type XfnType = fn(&mut State, EntryRef) -> Xresult;

#[derive(Clone, Copy)]
pub struct XfnPtr(pub XfnType);

impl PartialEq for XfnPtr {
    fn eq(&self, other: &Self) -> bool {
        (self.0 as usize) == (other.0 as usize)
    }
}

impl fmt::Debug for XfnPtr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:#x}", self.0 as usize)
    }
}

/// Handle of an entry owned by the dictionary ledger.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct EntryRef(usize);

impl EntryRef {
    pub(crate) fn from_index(idx: usize) -> Self {
        Self(idx)
    }

    pub fn index(&self) -> usize {
        self.0
    }
}

/// Ordered sequence of entries, the unit produced by compiling a line.
/// Shares its body so nested calls don't copy it.
#[derive(Clone, PartialEq)]
pub struct Word {
    name: Xstr,
    body: Rc<[EntryRef]>,
}

impl Word {
    pub fn new(name: Xstr, body: Vec<EntryRef>) -> Self {
        Self {
            name,
            body: Rc::from(body),
        }
    }

    pub fn anonymous(body: Vec<EntryRef>) -> Self {
        Self::new(Xstr::new(), body)
    }

    pub fn name(&self) -> &str {
        self.name.as_str()
    }

    pub fn body(&self) -> &[EntryRef] {
        &self.body
    }

    pub fn len(&self) -> usize {
        self.body.len()
    }

    pub fn is_empty(&self) -> bool {
        self.body.is_empty()
    }

    pub(crate) fn with_name(self, name: Xstr) -> Self {
        Self {
            name,
            body: self.body,
        }
    }
}

impl fmt::Debug for Word {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Word({:?}, [", self.name.as_str())?;
        for (i, r) in self.body.iter().enumerate() {
            if i > 0 {
                f.write_str(" ")?;
            }
            write!(f, "{}", r.0)?;
        }
        f.write_str("])")
    }
}

#[derive(Clone, PartialEq)]
pub enum Entry {
    Primitive { name: Xstr, xf: XfnPtr },
    Compound(Word),
    Literal(Xint),
    Branch(isize),
    ZBranch(isize),
}

impl Entry {
    /// Only primitives and compounds can be found by name.
    pub fn name(&self) -> Option<&str> {
        match self {
            Entry::Primitive { name, .. } => Some(name.as_str()),
            Entry::Compound(w) => Some(w.name()),
            Entry::Literal(_) | Entry::Branch(_) | Entry::ZBranch(_) => None,
        }
    }

    pub fn is_addressable(&self) -> bool {
        self.name().is_some()
    }

    pub fn branch_offset(&self) -> Option<isize> {
        match self {
            Entry::Branch(offs) | Entry::ZBranch(offs) => Some(*offs),
            _ => None,
        }
    }

    pub(crate) fn set_branch_offset(&mut self, new_offs: isize) -> bool {
        match self {
            Entry::Branch(offs) | Entry::ZBranch(offs) => {
                *offs = new_offs;
                true
            }
            _ => false,
        }
    }
}

impl fmt::Debug for Entry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Primitive { name, xf } => write!(f, "Primitive({}, {:?})", name, xf),
            Self::Compound(w) => write!(f, "Compound({:?})", w),
            Self::Literal(n) => write!(f, "Literal({})", n),
            Self::Branch(offs) => write!(f, "Branch({})", offs),
            Self::ZBranch(offs) => write!(f, "ZBranch({})", offs),
        }
    }
}
