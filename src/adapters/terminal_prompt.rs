use std::io::{self, BufRead, ErrorKind, IsTerminal, Write};
use std::sync::Mutex;

use dialoguer::{Confirm, Error as DialoguerError, Input};

use crate::domain::AppError;
use crate::ports::Prompt;

/// Prompt backed by the process's stdin/stdout.
///
/// Interactive terminals get dialoguer widgets. Piped input is read line by
/// line so the tool can be driven from scripts.
pub struct TerminalPrompt<R: BufRead> {
    interactive: bool,
    input: Mutex<R>,
}

impl TerminalPrompt<io::StdinLock<'static>> {
    pub fn stdin() -> Self {
        let stdin = io::stdin();
        let interactive = stdin.is_terminal();
        Self { interactive, input: Mutex::new(stdin.lock()) }
    }
}

impl<R: BufRead> TerminalPrompt<R> {
    /// Line-based prompt over an arbitrary reader.
    pub fn from_reader(input: R) -> Self {
        Self { interactive: false, input: Mutex::new(input) }
    }

    fn next_line(&self, prompt: &str) -> Result<String, AppError> {
        print!("{} ", prompt);
        io::stdout().flush()?;

        let mut line = String::new();
        let read = self
            .input
            .lock()
            .map_err(|_| AppError::Prompt("input reader poisoned".to_string()))?
            .read_line(&mut line)?;
        if read == 0 {
            println!();
            return Err(AppError::InputClosed);
        }
        Ok(line.trim_end_matches(['\r', '\n']).to_string())
    }
}

fn map_dialoguer(err: DialoguerError) -> AppError {
    match err {
        DialoguerError::IO(err) if err.kind() == ErrorKind::Interrupted => AppError::InputClosed,
        DialoguerError::IO(err) if err.kind() == ErrorKind::UnexpectedEof => AppError::InputClosed,
        err => AppError::Prompt(err.to_string()),
    }
}

impl<R: BufRead> Prompt for TerminalPrompt<R> {
    fn read_line(&self, prompt: &str) -> Result<String, AppError> {
        if !self.interactive {
            return self.next_line(prompt);
        }
        Input::<String>::new()
            .with_prompt(prompt)
            .allow_empty(true)
            .interact_text()
            .map_err(map_dialoguer)
    }

    fn confirm(&self, question: &str) -> Result<bool, AppError> {
        if self.interactive {
            return Confirm::new().with_prompt(question).interact().map_err(map_dialoguer);
        }
        loop {
            let answer = self.next_line(&format!("{} [y/n]", question))?;
            match answer.trim().to_lowercase().as_str() {
                "y" | "yes" => return Ok(true),
                "n" | "no" => return Ok(false),
                _ => println!("Please answer yes or no."),
            }
        }
    }

    fn say(&self, message: &str) {
        println!("{}", message);
    }
}
