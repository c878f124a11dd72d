pub mod gcloud_command;
pub mod terminal_prompt;

pub use gcloud_command::GcloudCommandAdapter;
pub use terminal_prompt::TerminalPrompt;
