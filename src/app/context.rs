use crate::ports::{Gcloud, Prompt};
use crate::services::ResourceLister;

/// Application context holding dependencies for command execution.
pub struct AppContext<G: Gcloud, P: Prompt> {
    gcloud: G,
    prompt: P,
}

impl<G: Gcloud, P: Prompt> AppContext<G, P> {
    /// Create a new application context.
    pub fn new(gcloud: G, prompt: P) -> Self {
        Self { gcloud, prompt }
    }

    /// Get a reference to the gcloud runner.
    pub fn gcloud(&self) -> &G {
        &self.gcloud
    }

    /// Get a reference to the user prompt.
    pub fn prompt(&self) -> &P {
        &self.prompt
    }

    pub fn lister(&self) -> ResourceLister<'_, G> {
        ResourceLister::new(&self.gcloud)
    }
}
