use afi::prelude::*;
use afi::repl::{console_repl, format_result};

use getopts::{Matches, Options};
use tracing_subscriber::filter::Targets;
use tracing_subscriber::prelude::*;

fn opt_usize(matches: &Matches, name: &str, default: usize) -> Result<usize, String> {
    match matches.opt_str(name) {
        None => Ok(default),
        Some(s) => s
            .parse()
            .map_err(|e| format!("-{} {}: {}", name, s, e)),
    }
}

fn config_from(matches: &Matches) -> Result<Config, String> {
    let defaults = Config::default();
    Ok(Config::default()
        .with_stack_size(opt_usize(matches, "s", defaults.stack_size)?)
        .with_name_len(opt_usize(matches, "n", defaults.name_len)?)
        .with_max_depth(opt_usize(matches, "d", defaults.max_depth)?))
}

fn init_tracing(filter: &str) -> Result<(), String> {
    let targets: Targets = filter.parse().map_err(|e| format!("-l {}: {}", filter, e))?;
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .without_time()
                .with_writer(std::io::stderr),
        )
        .with(targets)
        .init();
    Ok(())
}

fn main() {
    let args: Vec<String> = std::env::args().collect();
    let mut opts = Options::new();
    opts.optopt("s", "", "set value stack size", "SIZE");
    opts.optopt("n", "", "set maximum name length", "LEN");
    opts.optopt("d", "", "set maximum nesting depth", "DEPTH");
    opts.optmulti("e", "", "execute a line before the console starts", "LINE");
    opts.optflag("q", "", "don't start the console");
    opts.optopt("l", "", "log filter, e.g. afi=debug", "TARGETS");
    opts.optflag("h", "help", "print this help");
    let matches = match opts.parse(&args[1..]) {
        Ok(m) => m,
        Err(e) => {
            eprintln!("{}", e);
            std::process::exit(2);
        }
    };
    if matches.opt_present("h") {
        print!("{}", opts.usage("Usage: afi [options]"));
        return;
    }
    let filter = matches.opt_str("l").unwrap_or_else(|| "warn".to_string());
    if let Err(e) = init_tracing(&filter) {
        eprintln!("{}", e);
        std::process::exit(2);
    }
    let config = match config_from(&matches) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("{}", e);
            std::process::exit(2);
        }
    };

    let mut xs = match Xstate::boot_with(config).and_then(|mut xs| {
        afi::arith::load(&mut xs)?;
        Ok(xs)
    }) {
        Ok(xs) => xs,
        Err(e) => {
            eprintln!("error: {:?}", e);
            std::process::exit(1);
        }
    };
    let mut failed = false;
    for line in matches.opt_strs("e") {
        if let Some(msg) = format_result(&xs.exec_line(&line)) {
            eprintln!("{}", msg);
            failed = true;
        }
    }
    if !matches.opt_present("q") {
        console_repl(&mut xs, true);
    }
    xs.teardown();
    if failed {
        std::process::exit(1);
    }
}
