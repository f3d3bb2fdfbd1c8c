//! Interactive decision loop.
//!
//! Each pending dispatch step blocks on one stdin line, with no timeout:
//! this is a single-user tool driven by a human at a terminal. A fatal
//! confirmation or selection error ends the invocation.

use std::io::{self, Write};

use caltrack_dispatch::{Dispatcher, Outcome, Prompt, Reply, Step};
use caltrack_domain::{Command, Journal};

use crate::error::Result;

/// Drive a command to completion, prompting on stdin for every pending
/// decision.
pub fn drive<J: Journal>(
    dispatcher: &mut Dispatcher<'_, J>,
    cmd: Command,
) -> Result<Outcome> {
    let mut step = dispatcher.execute(cmd)?;
    loop {
        match step {
            Step::Done(outcome) => return Ok(outcome),
            Step::Pending(pending) => {
                let reply = prompt(&pending.prompt)?;
                step = dispatcher.resume(pending, reply)?;
            }
        }
    }
}

fn prompt(prompt: &Prompt) -> Result<Reply> {
    match prompt {
        Prompt::ConfirmDate { day, label } => {
            let response = ask(&format!(
                "Date for '{}' resolved to {}. Is that correct? [y/N] ",
                label, day
            ))?;
            if is_yes(&response) {
                return Ok(Reply::Confirm);
            }
            let replacement = ask("Please enter the correct date (YYYY-MM-DD): ")?;
            Ok(Reply::Override(replacement.trim().to_string()))
        }
        Prompt::PickCandidate { candidates } => {
            println!("Multiple records match:");
            for c in candidates {
                println!("  {}) {}  {}  (id={})", c.index, c.day, c.label, c.id);
            }
            let response = ask(&format!("Select one [1-{}]: ", candidates.len()))?;
            // An unparsable selection becomes choice 0, which dispatch
            // rejects as fatal; there is no retry.
            Ok(Reply::Choice(response.trim().parse().unwrap_or(0)))
        }
        Prompt::ConfirmBulkDelete { candidates } => {
            println!("About to delete {} record(s):", candidates.len());
            for c in candidates {
                println!("  - {}  {}  (id={})", c.day, c.label, c.id);
            }
            let response = ask("Continue? [y/N] ")?;
            if is_yes(&response) {
                Ok(Reply::Confirm)
            } else {
                Ok(Reply::Decline)
            }
        }
    }
}

fn is_yes(response: &str) -> bool {
    response.trim().to_lowercase().starts_with('y')
}

fn ask(question: &str) -> Result<String> {
    print!("{}", question);
    io::stdout().flush()?;

    let mut line = String::new();
    io::stdin().read_line(&mut line)?;
    Ok(line)
}
