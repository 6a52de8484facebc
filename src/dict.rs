use crate::entry::*;
use crate::error::*;

/// Symbol table. `entries` owns every entry ever created, named or not,
/// `names` indexes the addressable ones newest first.
#[derive(Clone, Default)]
pub struct Dict {
    entries: Vec<Entry>,
    names: rpds::List<EntryRef>,
}

impl Dict {
    pub fn new() -> Self {
        Self::default()
    }

    /// Newest primitive or compound called `name`.
    pub fn lookup(&self, name: &str) -> Option<EntryRef> {
        self.names
            .iter()
            .find(|r| self.entries[r.index()].name() == Some(name))
            .copied()
    }

    pub fn register(&mut self, e: Entry) -> EntryRef {
        let r = EntryRef::from_index(self.entries.len());
        if e.is_addressable() {
            self.names.push_front_mut(r);
        }
        self.entries.push(e);
        r
    }

    pub fn entry(&self, r: EntryRef) -> Xresult1<&Entry> {
        self.entries.get(r.index()).ok_or(Xerr::InvalidEntry(r))
    }

    pub(crate) fn entry_mut(&mut self, r: EntryRef) -> Xresult1<&mut Entry> {
        self.entries.get_mut(r.index()).ok_or(Xerr::InvalidEntry(r))
    }

    /// Names of addressable entries, shadowed ones included, newest first.
    pub fn names(&self) -> impl Iterator<Item = &str> + '_ {
        self.names
            .iter()
            .filter_map(move |r| self.entries[r.index()].name())
    }

    /// Size of the ledger.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn teardown(&mut self) {
        self.names = rpds::List::new();
        self.entries.clear();
    }
}
