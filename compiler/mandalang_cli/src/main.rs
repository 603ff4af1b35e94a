//! Thin REPL front end (§6 "Textual I/O"): reads one line at a time from stdin, feeds it to a
//! [`mandalang::Engine`], and prints the canonical rendering of the result. An empty line stops
//! the loop. Contains no language logic of its own.

use std::io::{self, BufRead, Write as _};

use mandalang::Engine;

fn init_tracing() {
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_from_env("MANDALANG_LOG").unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt().with_env_filter(filter).with_writer(io::stderr).init();
}

fn main() {
    init_tracing();

    let mut engine = Engine::create();
    let stdin = io::stdin();
    let stdout = io::stdout();
    let mut out = stdout.lock();

    for line in stdin.lock().lines() {
        let Ok(line) = line else { break };
        if line.is_empty() {
            break;
        }

        match engine.evaluate_definition_or_expression(&line) {
            Ok(outcome) => {
                let _ = writeln!(out, "{}", engine.render(&outcome));
            }
            Err(err) => {
                let _ = writeln!(out, "{err}");
            }
        }
    }
}
