use crate::compile::{check_jumps, compile_line};
use crate::config::Config;
use crate::dict::Dict;
use crate::entry::*;
use crate::error::*;
use crate::lex::{line_from_bytes, Lex};
use crate::prelude::{Xint, Xstr};
use crate::stack::Stack;
use crate::vm::run_word;

/// Runtime state: one dictionary and one value stack. Nothing is shared
/// between states, hosts wanting several interpreters create several states.
pub struct State {
    dict: Dict,
    data_stack: Stack<Xint>,
    config: Config,
    nop: EntryRef,
    console: Option<String>,
}

fn do_nop(_xs: &mut State, _: EntryRef) -> Xresult {
    OK
}

impl State {
    pub fn boot() -> Xresult1<State> {
        Self::boot_with(Config::default())
    }

    pub fn boot_with(mut config: Config) -> Xresult1<State> {
        // offset 0 is the success code, a too long token must be reported past it
        config.name_len = config.name_len.max(1);
        let mut dict = Dict::new();
        let nop = dict.register(Entry::Primitive {
            name: Xstr::from("NOP"),
            xf: XfnPtr(do_nop),
        });
        tracing::info!(?config, "state created");
        Ok(State {
            dict,
            data_stack: Stack::new(config.stack_size),
            config,
            nop,
            console: None,
        })
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn dict(&self) -> &Dict {
        &self.dict
    }

    pub(crate) fn dict_mut(&mut self) -> &mut Dict {
        &mut self.dict
    }

    /// The `NOP` registered at boot, emitted for every `END`.
    pub fn nop(&self) -> EntryRef {
        self.nop
    }

    pub fn lookup(&self, name: &str) -> Option<EntryRef> {
        self.dict.lookup(name)
    }

    fn check_name(&self, name: &str) -> Xresult {
        let mut lex = Lex::new(name, self.config.name_len);
        match lex.next() {
            Ok(Some(t)) if t.text == name => OK,
            _ => Err(Xerr::InvalidName(Xstr::from(name))),
        }
    }

    pub fn defword(&mut self, name: &str, f: XfnType) -> Xresult1<EntryRef> {
        self.check_name(name)?;
        Ok(self.dict.register(Entry::Primitive {
            name: Xstr::from(name),
            xf: XfnPtr(f),
        }))
    }

    /// Compiles `source` into a compound called `name`. The name is not
    /// visible while compiling, so a redefinition calls the previous one.
    pub fn define(&mut self, name: &str, source: &str) -> Xresult1<EntryRef> {
        self.check_name(name)?;
        let word = self.compile(source)?.unwrap_or_else(|| Word::anonymous(vec![]));
        let r = self
            .dict
            .register(Entry::Compound(word.with_name(Xstr::from(name))));
        tracing::debug!(name, "defined");
        Ok(r)
    }

    pub fn compile(&mut self, source: &str) -> Xresult1<Option<Word>> {
        compile_line(self, source).map_err(|e| {
            tracing::debug!(error = ?e, source, "compile failed");
            e
        })
    }

    pub fn run(&mut self, word: &Word) -> Xresult {
        check_jumps(self, word)?;
        run_word(self, word, 0).map_err(|e| {
            tracing::debug!(error = ?e, "execution failed");
            e
        })
    }

    pub fn eval(&mut self, source: &str) -> Xresult {
        match self.compile(source)? {
            Some(word) => self.run(&word),
            None => OK,
        }
    }

    /// Compiles and runs one line. Failures to compile are folded into the
    /// result code: `0` ok, `n > 0` token too long at byte `n`, `-(k + 1)`
    /// bad token `k`. Errors raised while running are returned as `Err`.
    /// Lines that may not be UTF-8 go through `exec_bytes`.
    pub fn exec_line(&mut self, source: &str) -> Xresult1<isize> {
        let word = match self.compile(source) {
            Ok(Some(word)) => word,
            Ok(None) => return Ok(0),
            Err(e) => return e.code().ok_or(e),
        };
        self.run(&word)?;
        Ok(0)
    }

    /// `exec_line` over a raw byte buffer, a token that is not UTF-8 can
    /// never resolve and gets the code of an unresolved symbol.
    pub fn exec_bytes(&mut self, line: &[u8]) -> Xresult1<isize> {
        match line_from_bytes(line, self.config.name_len) {
            Ok(source) => self.exec_line(source),
            Err(e) => e.code().ok_or(e),
        }
    }

    pub fn push_data(&mut self, data: Xint) -> Xresult {
        self.data_stack.push(data)
    }

    pub fn pop_data(&mut self) -> Xresult1<Xint> {
        self.data_stack.pop()
    }

    pub fn top_data(&self) -> Option<Xint> {
        self.data_stack.top()
    }

    pub fn get_data(&self, idx: usize) -> Option<Xint> {
        self.data_stack.get(idx)
    }

    pub fn data_depth(&self) -> usize {
        self.data_stack.len()
    }

    /// Bottom first.
    pub fn data_stack(&self) -> &[Xint] {
        self.data_stack.as_slice()
    }

    pub fn clear_data(&mut self) {
        self.data_stack.clear()
    }

    pub fn print(&mut self, msg: &str) {
        if let Some(out) = self.console.as_mut() {
            out.push_str(msg)
        } else {
            print!("{}", msg);
        }
    }

    pub fn capture_stdout(&mut self) {
        if self.console.is_none() {
            self.console = Some(String::new());
        }
    }

    pub fn console(&mut self) -> Option<&mut String> {
        self.console.as_mut()
    }

    pub fn teardown(mut self) {
        tracing::info!(entries = self.dict.len(), "teardown");
        self.dict.teardown();
        self.data_stack.clear();
    }
}
