pub mod config;
pub mod error;
pub mod stack;
pub mod entry;
pub mod dict;
pub mod lex;
mod compile;
mod vm;
pub mod state;
pub mod arith;
pub mod debug;
#[cfg(feature = "stdio")]
pub mod repl;

pub mod prelude {
    pub type Xstate = crate::state::State;
    pub type Xint = isize;
    pub type Xstr = arcstr::ArcStr;
    pub use crate::config::Config;
    pub use crate::entry::{Entry, EntryRef, Word, XfnPtr, XfnType};
    pub use crate::error::{Xerr, Xresult, Xresult1, OK};
}
