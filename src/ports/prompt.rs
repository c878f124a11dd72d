use crate::domain::AppError;

/// Terminal interaction primitives.
pub trait Prompt {
    /// Show `prompt` and read one line of input, without the trailing newline.
    fn read_line(&self, prompt: &str) -> Result<String, AppError>;

    /// Ask a yes/no question.
    fn confirm(&self, question: &str) -> Result<bool, AppError>;

    /// Print a message for the user.
    fn say(&self, message: &str);
}
