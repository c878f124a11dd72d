mod fake_gcloud;
mod scripted_prompt;

pub use fake_gcloud::FakeGcloud;
pub use scripted_prompt::ScriptedPrompt;
