mod gcloud;
mod prompt;

pub use gcloud::{Gcloud, GcloudError};
pub use prompt::Prompt;
