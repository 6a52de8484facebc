use crate::prelude::*;
use rustyline::error::ReadlineError;
use rustyline::Editor;

/// Human readable outcome of `exec_line`, `None` when the line succeeded.
pub fn format_result(res: &Xresult1<isize>) -> Option<String> {
    match res {
        Ok(0) => None,
        Ok(code) if *code > 0 => Some(format!("error {}: token too long", code)),
        Ok(code) => Some(format!("error {}: bad token {}", code, -code - 1)),
        Err(e) => Some(format!("error: {:?}", e)),
    }
}

fn words(xs: &Xstate) -> String {
    let mut seen = std::collections::HashSet::new();
    let names: Vec<&str> = xs.dict().names().filter(|n| seen.insert(*n)).collect();
    names.join(" ")
}

pub fn console_repl(xs: &mut Xstate, load_history: bool) {
    let mut rl = Editor::<()>::new();
    if load_history {
        let _ = rl.load_history("history.txt");
    }
    loop {
        let readline = rl.readline("> ");
        match readline {
            Ok(line) => {
                rl.add_history_entry(line.as_str());
                let line = line.trim_end_matches(&['\r', '\n'][..]);
                let cmd = line.trim();
                if cmd == ".s" {
                    println!("{:?}", xs.data_stack());
                } else if cmd == ".words" {
                    println!("{}", words(xs));
                } else if let Some(name) = cmd.strip_prefix(".see ") {
                    match xs.see(name.trim()) {
                        Ok(s) => print!("{}", s),
                        Err(e) => println!("error: {:?}", e),
                    }
                } else {
                    let res = xs.exec_line(line);
                    match format_result(&res) {
                        Some(msg) => println!("{}", msg),
                        None => println!(" ok"),
                    }
                }
            }
            Err(ReadlineError::Interrupted) => {
                println!("CTRL-C");
                break;
            }
            Err(ReadlineError::Eof) => {
                println!("CTRL-D");
                break;
            }
            Err(err) => {
                println!("Error: {:?}", err);
                break;
            }
        }
    }
    if load_history {
        if let Err(e) = rl.save_history("history.txt") {
            println!("history save failed: {:}", e);
        }
    }
}

#[test]
fn test_format_result() {
    assert_eq!(None, format_result(&Ok(0)));
    assert_eq!(
        Some("error 32: token too long".to_string()),
        format_result(&Ok(32))
    );
    assert_eq!(
        Some("error -3: bad token 2".to_string()),
        format_result(&Ok(-3))
    );
    assert_eq!(
        Some("error: StackUnderflow".to_string()),
        format_result(&Err(Xerr::StackUnderflow))
    );
}
