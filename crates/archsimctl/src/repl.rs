//! REPL - line-oriented interface to the simulator

use crate::session::{Reply, Session};
use anyhow::Result;
use archsim_common::llm_client::CommandTranslator;
use owo_colors::OwoColorize;
use std::io::{self, BufRead, Write};

pub const PROMPT: &str = "archsim $ ";

/// Render a reply for the terminal. `None` means print nothing.
pub fn render(reply: &Reply) -> Option<String> {
    match reply {
        Reply::Nothing | Reply::Exit => None,
        Reply::Output(text) => Some(text.clone()),
        Reply::Translated(translation) if translation.is_noop() => {
            Some(format!("{}", "nothing to do".dimmed()))
        }
        Reply::Translated(translation) => {
            let header = format!("$ {}", translation.command);
            if translation.output.is_empty() {
                Some(format!("{}", header.cyan()))
            } else {
                Some(format!("{}\n{}", header.cyan(), translation.output))
            }
        }
        Reply::Rejected(e) if e.is_safety() => Some(format!("{} {}", "blocked:".red().bold(), e)),
        Reply::Rejected(e) => Some(format!("{} {}", "error:".red().bold(), e)),
        Reply::Usage(msg) => Some(format!("{}", msg.yellow())),
    }
}

/// Main REPL loop
pub fn run<T: CommandTranslator>(session: &mut Session<T>) -> Result<()> {
    println!("archsim {} - type 'help' for commands, 'exit' to leave", crate::cli::VERSION);

    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();

    loop {
        print!("{}", PROMPT);
        io::stdout().flush()?;

        let line = match lines.next() {
            Some(Ok(line)) => line,
            Some(Err(e)) => {
                eprintln!("{} {}", "Error reading input:".red(), e);
                continue;
            }
            None => break, // EOF
        };

        let reply = session.handle_line(&line);
        if matches!(reply, Reply::Exit) {
            break;
        }
        if let Some(text) = render(&reply) {
            println!("{}", text);
        }
    }

    Ok(())
}
