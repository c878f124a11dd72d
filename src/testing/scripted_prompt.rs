use std::collections::VecDeque;
use std::sync::Mutex;

use crate::domain::AppError;
use crate::ports::Prompt;

/// Prompt that answers from a fixed script and records everything shown.
pub struct ScriptedPrompt {
    answers: Mutex<VecDeque<String>>,
    pub transcript: Mutex<Vec<String>>,
}

impl ScriptedPrompt {
    pub fn new(answers: &[&str]) -> Self {
        Self {
            answers: Mutex::new(answers.iter().map(|a| a.to_string()).collect()),
            transcript: Mutex::new(Vec::new()),
        }
    }

    pub fn transcript(&self) -> Vec<String> {
        self.transcript.lock().unwrap().clone()
    }

    /// Number of times `text` appears as a line of the transcript.
    pub fn count(&self, text: &str) -> usize {
        self.transcript().iter().filter(|line| line.contains(text)).count()
    }

    pub fn remaining(&self) -> usize {
        self.answers.lock().unwrap().len()
    }

    fn next(&self, prompt: &str) -> Result<String, AppError> {
        self.transcript.lock().unwrap().push(prompt.to_string());
        self.answers.lock().unwrap().pop_front().ok_or(AppError::InputClosed)
    }
}

impl Prompt for ScriptedPrompt {
    fn read_line(&self, prompt: &str) -> Result<String, AppError> {
        self.next(prompt)
    }

    fn confirm(&self, question: &str) -> Result<bool, AppError> {
        loop {
            match self.next(question)?.as_str() {
                "y" | "yes" => return Ok(true),
                "n" | "no" => return Ok(false),
                _ => self.say("Please answer yes or no."),
            }
        }
    }

    fn say(&self, message: &str) {
        self.transcript.lock().unwrap().push(message.to_string());
    }
}
